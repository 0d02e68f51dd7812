//! Straight-line reference implementation of edge betweenness.
//!
//! Deliberately plain: adjacency maps, f64 everywhere, no buffer reuse.
//! The batched engine is validated against this implementation by the
//! correctness suites, so it must stay independent of the accumulation
//! code in `brandes` — only the graph accessors, the source sampling, and
//! the rescale formula are shared.

use std::collections::{BinaryHeap, HashMap, VecDeque};

use anyhow::{ensure, Result};

use verge_core::Graph;

use crate::edge_betweenness::{rescale, BcOptions};
use crate::sampling::sample_sources;

/// Computes edge betweenness centrality the slow, obvious way.
///
/// Scores are returned in canonical edge-id order and always accumulate
/// in f64 regardless of `opts.dtype`. Sampling honors `opts.k` and
/// `opts.seed` exactly as the main engines do, so results are directly
/// comparable.
pub fn edge_betweenness_centrality(graph: &Graph, opts: &BcOptions) -> Result<Vec<f64>> {
    if opts.weighted {
        ensure!(
            graph.is_weighted(),
            "weighted run requested on an unweighted graph"
        );
    }

    let n = graph.num_vertices();
    let sources = sample_sources(n, opts.k, opts.seed);

    // Edge scores keyed by canonical endpoint pair.
    let mut scores: HashMap<(u32, u32), f64> = HashMap::new();

    for &s in &sources {
        let (order, sigma, preds) = if opts.weighted {
            shortest_paths_dijkstra(graph, s)
        } else {
            shortest_paths_bfs(graph, s)
        };

        // Dependency accumulation in reverse settle order.
        let mut delta: HashMap<u32, f64> = HashMap::new();
        for &w in order.iter().rev() {
            let coeff = (1.0 + delta.get(&w).copied().unwrap_or(0.0)) / sigma[&w];
            if let Some(parents) = preds.get(&w) {
                for &v in parents {
                    let contribution = sigma[&v] * coeff;
                    let key = canonical_key(graph, v, w);
                    *scores.entry(key).or_insert(0.0) += contribution;
                    *delta.entry(v).or_insert(0.0) += contribution;
                }
            }
        }
    }

    // Flatten into edge-id order.
    let mut flat = vec![0.0; graph.num_edges()];
    for edge in 0..graph.num_edges() {
        let key = graph.edge_endpoints(edge);
        flat[edge] = scores.get(&key).copied().unwrap_or(0.0);
    }
    rescale(&mut flat, n, graph.is_directed(), opts.normalized);
    Ok(flat)
}

fn canonical_key(graph: &Graph, v: u32, w: u32) -> (u32, u32) {
    if graph.is_directed() || v < w {
        (v, w)
    } else {
        (w, v)
    }
}

type PathData = (Vec<u32>, HashMap<u32, f64>, HashMap<u32, Vec<u32>>);

fn shortest_paths_bfs(graph: &Graph, s: u32) -> PathData {
    let mut order = Vec::new();
    let mut sigma: HashMap<u32, f64> = HashMap::new();
    let mut preds: HashMap<u32, Vec<u32>> = HashMap::new();
    let mut dist: HashMap<u32, usize> = HashMap::new();

    sigma.insert(s, 1.0);
    dist.insert(s, 0);
    let mut queue = VecDeque::from([s]);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let dv = dist[&v];
        for &w in graph.neighbors(v as usize) {
            if !dist.contains_key(&w) {
                dist.insert(w, dv + 1);
                queue.push_back(w);
            }
            if dist[&w] == dv + 1 {
                let sv = sigma[&v];
                *sigma.entry(w).or_insert(0.0) += sv;
                preds.entry(w).or_default().push(v);
            }
        }
    }

    (order, sigma, preds)
}

fn shortest_paths_dijkstra(graph: &Graph, s: u32) -> PathData {
    let mut order = Vec::new();
    let mut sigma: HashMap<u32, f64> = HashMap::new();
    let mut preds: HashMap<u32, Vec<u32>> = HashMap::new();
    let mut dist: HashMap<u32, f64> = HashMap::new();

    sigma.insert(s, 1.0);
    dist.insert(s, 0.0);

    // Max-heap on negated distance; ties broken on vertex id.
    let mut heap: BinaryHeap<(std::cmp::Reverse<OrderedF64>, u32)> = BinaryHeap::new();
    heap.push((std::cmp::Reverse(OrderedF64(0.0)), s));

    while let Some((std::cmp::Reverse(OrderedF64(d)), v)) = heap.pop() {
        if d > dist[&v] {
            continue;
        }
        if order.contains(&v) {
            continue;
        }
        order.push(v);

        for arc in graph.arc_range(v as usize) {
            let w = graph.target(arc);
            let nd = d + graph.arc_weight(arc);
            let sv = sigma[&v];
            match dist.get(&w).copied() {
                None => {
                    dist.insert(w, nd);
                    sigma.insert(w, sv);
                    preds.insert(w, vec![v]);
                    heap.push((std::cmp::Reverse(OrderedF64(nd)), w));
                }
                Some(dw) if nd < dw => {
                    dist.insert(w, nd);
                    sigma.insert(w, sv);
                    preds.insert(w, vec![v]);
                    heap.push((std::cmp::Reverse(OrderedF64(nd)), w));
                }
                Some(dw) if nd == dw => {
                    *sigma.entry(w).or_insert(0.0) += sv;
                    preds.entry(w).or_default().push(v);
                }
                _ => {}
            }
        }
    }

    (order, sigma, preds)
}

/// f64 wrapper with a total order (weights are validated finite upstream).
#[derive(PartialEq, Clone, Copy)]
struct OrderedF64(f64);

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedF64 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
