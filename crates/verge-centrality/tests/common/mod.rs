//! Shared parameters and helpers for the edge betweenness suites.
//!
//! Both the single-device and the OPG suites iterate the same parameter
//! lists and go through the same computation and comparison helpers, so a
//! semantic change in either suite is a change here.

use verge_centrality::{
    edge_betweenness_centrality, edge_betweenness_centrality_opg, reference, BcOptions,
    ResultDtype, ScoreTable,
};
use verge_cluster::OpgContext;
use verge_core::datasets::Dataset;

pub use verge_core::datasets::DATASETS;

/// Relative tolerance for score comparison.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Absolute comparison floor for near-zero scores.
pub const ABSOLUTE_TOLERANCE: f64 = 1e-8;

pub const DIRECTED_OPTIONS: &[bool] = &[true, false];
pub const NORMALIZED_OPTIONS: &[bool] = &[true, false];
pub const SUBSET_SIZE_OPTIONS: &[Option<usize>] = &[Some(4), None];
pub const SUBSET_SEED_OPTIONS: &[u64] = &[42];
pub const RESULT_DTYPE_OPTIONS: &[ResultDtype] = &[ResultDtype::F32, ResultDtype::F64];

pub fn init_logging() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Human-readable label for one parameter combination.
pub fn case_label(
    dataset: &Dataset,
    directed: bool,
    normalized: bool,
    subset_size: Option<usize>,
    seed: u64,
    dtype: ResultDtype,
) -> String {
    format!(
        "dataset={} directed={} normalized={} k={:?} seed={} dtype={}",
        dataset.name, directed, normalized, subset_size, seed, dtype
    )
}

/// Runs the engine under test plus the reference implementation on the
/// same sampled sources and joins the two score columns.
///
/// `ctx = None` exercises the serial engine; `Some(ctx)` the OPG engine.
#[allow(clippy::too_many_arguments)]
pub fn calc_edge_betweenness_centrality(
    dataset: &Dataset,
    directed: bool,
    normalized: bool,
    subset_size: Option<usize>,
    seed: u64,
    weighted: bool,
    dtype: ResultDtype,
    ctx: Option<&OpgContext>,
) -> ScoreTable {
    let graph = dataset
        .load(directed)
        .unwrap_or_else(|e| panic!("failed to load dataset {}: {}", dataset.name, e));

    let opts = BcOptions {
        normalized,
        k: subset_size,
        seed,
        weighted,
        dtype,
    };

    let computed = match ctx {
        Some(ctx) => edge_betweenness_centrality_opg(&graph, &opts, ctx),
        None => edge_betweenness_centrality(&graph, &opts),
    }
    .expect("edge betweenness computation failed");

    let ref_scores =
        reference::edge_betweenness_centrality(&graph, &opts).expect("reference run failed");

    ScoreTable::join(&computed, &ref_scores).expect("score join failed")
}

/// Asserts that two named columns of `table` agree within `epsilon`
/// (relative to the second column, with an absolute floor for zeros).
pub fn compare_scores(table: &ScoreTable, first_key: &str, second_key: &str, epsilon: f64) {
    let first = table.column(first_key).expect("unknown first column");
    let second = table.column(second_key).expect("unknown second column");

    for (row, (a, b)) in table.rows().iter().zip(first.iter().zip(&second)) {
        let tolerance = ABSOLUTE_TOLERANCE + epsilon * b.abs();
        assert!(
            (a - b).abs() <= tolerance,
            "score mismatch on edge ({}, {}): {}={}, {}={}, |diff|={:e} > {:e}",
            row.src,
            row.dst,
            first_key,
            a,
            second_key,
            b,
            (a - b).abs(),
            tolerance
        );
    }
}
