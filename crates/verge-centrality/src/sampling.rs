//! Seeded source-vertex sampling for subset centrality runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Returns the source vertices for a centrality run.
///
/// `k = None`, `k = 0`, or `k >= num_vertices` selects every vertex.
/// Otherwise a k-subset is drawn without replacement from a ChaCha8 RNG
/// seeded with `seed`, so the same `(num_vertices, k, seed)` triple always
/// yields the same sources. The result is sorted ascending.
pub fn sample_sources(num_vertices: usize, k: Option<usize>, seed: u64) -> Vec<u32> {
    match k {
        Some(k) if k > 0 && k < num_vertices => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut sources = rand::seq::index::sample(&mut rng, num_vertices, k).into_vec();
            sources.sort_unstable();
            sources.into_iter().map(|v| v as u32).collect()
        }
        _ => (0..num_vertices as u32).collect(),
    }
}
