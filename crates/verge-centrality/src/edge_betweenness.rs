//! Edge betweenness centrality engines.
//!
//! Both engines share the Brandes accumulation in [`crate::brandes`]; the
//! OPG variant partitions source vertices round-robin across the devices
//! of an [`OpgContext`] and sums the per-device partial score buffers in
//! device order before the final rescale. Partial sums stay in the
//! requested accumulator precision so an f32 run behaves like an f32 run
//! end to end.

use std::time::Instant;

use anyhow::{ensure, Context as _, Result};
use serde::{Deserialize, Serialize};

use verge_cluster::OpgContext;
use verge_core::Graph;

use crate::brandes::{accumulate_unweighted, accumulate_weighted, Accum};
use crate::sampling::sample_sources;

/// Accumulation precision of the computed scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultDtype {
    F32,
    F64,
}

impl std::fmt::Display for ResultDtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultDtype::F32 => write!(f, "f32"),
            ResultDtype::F64 => write!(f, "f64"),
        }
    }
}

/// Options for an edge betweenness run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BcOptions {
    /// Rescale scores by `1 / (n * (n - 1))`
    pub normalized: bool,

    /// Number of source vertices to sample; `None` uses every vertex
    pub k: Option<usize>,

    /// Seed for source sampling
    pub seed: u64,

    /// Use arc weights (requires a weighted graph with positive weights)
    pub weighted: bool,

    /// Accumulation precision of the computed scores
    pub dtype: ResultDtype,
}

impl Default for BcOptions {
    fn default() -> Self {
        Self {
            normalized: true,
            k: None,
            seed: 42,
            weighted: false,
            dtype: ResultDtype::F64,
        }
    }
}

/// Edge betweenness scores, one per canonical edge in edge-id order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeScores {
    /// Canonical edge endpoints, aligned with `scores`
    pub edges: Vec<(u32, u32)>,

    /// Centrality score per edge
    pub scores: Vec<f64>,

    /// Wall-clock computation time in milliseconds
    pub elapsed_ms: f64,

    /// Number of devices that participated
    pub device_count: usize,
}

/// Computes edge betweenness centrality serially.
pub fn edge_betweenness_centrality(graph: &Graph, opts: &BcOptions) -> Result<EdgeScores> {
    validate(graph, opts)?;
    let sources = sample_sources(graph.num_vertices(), opts.k, opts.seed);
    let start = Instant::now();

    let mut raw = match opts.dtype {
        ResultDtype::F32 => serial_accumulate::<f32>(graph, &sources, opts.weighted),
        ResultDtype::F64 => serial_accumulate::<f64>(graph, &sources, opts.weighted),
    };
    rescale(&mut raw, graph.num_vertices(), graph.is_directed(), opts.normalized);

    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    log::debug!(
        "edge betweenness: {} edges, {} sources, serial, {:.2} ms",
        graph.num_edges(),
        sources.len(),
        elapsed_ms
    );

    Ok(EdgeScores {
        edges: edge_list(graph),
        scores: raw,
        elapsed_ms,
        device_count: 1,
    })
}

/// Computes edge betweenness centrality across the devices of `ctx`.
///
/// Sources are partitioned round-robin; each device accumulates a partial
/// score buffer over its share, and the partials are summed in device
/// order before rescaling. Results match the serial engine within
/// floating-point tolerance (exactly, for f64 on a single device).
pub fn edge_betweenness_centrality_opg(
    graph: &Graph,
    opts: &BcOptions,
    ctx: &OpgContext,
) -> Result<EdgeScores> {
    validate(graph, opts)?;
    let sources = sample_sources(graph.num_vertices(), opts.k, opts.seed);
    let start = Instant::now();

    let mut raw = match opts.dtype {
        ResultDtype::F32 => opg_accumulate::<f32>(graph, &sources, opts.weighted, ctx)?,
        ResultDtype::F64 => opg_accumulate::<f64>(graph, &sources, opts.weighted, ctx)?,
    };
    rescale(&mut raw, graph.num_vertices(), graph.is_directed(), opts.normalized);

    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    log::debug!(
        "edge betweenness: {} edges, {} sources, OPG({}), {:.2} ms",
        graph.num_edges(),
        sources.len(),
        ctx.device_count(),
        elapsed_ms
    );

    Ok(EdgeScores {
        edges: edge_list(graph),
        scores: raw,
        elapsed_ms,
        device_count: ctx.device_count(),
    })
}

fn serial_accumulate<S: Accum>(graph: &Graph, sources: &[u32], weighted: bool) -> Vec<f64> {
    let mut buffer = vec![S::ZERO; graph.num_edges()];
    if weighted {
        accumulate_weighted(graph, sources, &mut buffer);
    } else {
        accumulate_unweighted(graph, sources, &mut buffer);
    }
    buffer.into_iter().map(Accum::to_f64).collect()
}

fn opg_accumulate<S: Accum>(
    graph: &Graph,
    sources: &[u32],
    weighted: bool,
    ctx: &OpgContext,
) -> Result<Vec<f64>> {
    let partials: Vec<Vec<S>> = ctx
        .launch_partitioned(sources, |device, chunk| {
            let worker_start = Instant::now();
            let mut buffer = vec![S::ZERO; graph.num_edges()];
            if weighted {
                accumulate_weighted(graph, chunk, &mut buffer);
            } else {
                accumulate_unweighted(graph, chunk, &mut buffer);
            }
            log::debug!(
                "device {}: {} sources in {:.2} ms",
                device.id,
                chunk.len(),
                worker_start.elapsed().as_secs_f64() * 1e3
            );
            Ok(buffer)
        })
        .context("edge betweenness batch failed")?;

    // Sum partials in device order, in the accumulator precision.
    let mut total = vec![S::ZERO; graph.num_edges()];
    for partial in partials {
        for (slot, value) in total.iter_mut().zip(partial) {
            *slot += value;
        }
    }
    Ok(total.into_iter().map(Accum::to_f64).collect())
}

fn validate(graph: &Graph, opts: &BcOptions) -> Result<()> {
    if opts.weighted {
        ensure!(
            graph.is_weighted(),
            "weighted run requested on an unweighted graph"
        );
        for arc in 0..graph.num_arcs() {
            let w = graph.arc_weight(arc);
            ensure!(
                w > 0.0,
                "weighted betweenness requires positive weights, found {}",
                w
            );
        }
    }
    Ok(())
}

/// Rescales raw accumulations in place.
///
/// Normalized scores divide by `n * (n - 1)` ordered pairs; unnormalized
/// undirected scores are halved because the accumulation visits each
/// unordered pair from both endpoints. Graphs with fewer than two
/// vertices are left untouched.
pub(crate) fn rescale(scores: &mut [f64], num_vertices: usize, directed: bool, normalized: bool) {
    let scale = if normalized {
        if num_vertices <= 1 {
            return;
        }
        1.0 / (num_vertices as f64 * (num_vertices - 1) as f64)
    } else if !directed {
        0.5
    } else {
        return;
    };

    for score in scores.iter_mut() {
        *score *= scale;
    }
}

fn edge_list(graph: &Graph) -> Vec<(u32, u32)> {
    (0..graph.num_edges()).map(|e| graph.edge_endpoints(e)).collect()
}
