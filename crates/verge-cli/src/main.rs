//! Verge CLI entry point.
//!
//! Computes edge betweenness centrality on an edge-list file, serially or
//! across a provisioned multi-device context, and prints the top-scoring
//! edges or writes a JSON report.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use verge_centrality::{
    edge_betweenness_centrality, edge_betweenness_centrality_opg, reference, BcOptions,
    EdgeScores, ResultDtype,
};
use verge_cluster::{get_visible_devices, OpgContext};
use verge_core::read_edge_list;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "verge")]
#[command(version = VERSION)]
#[command(about = "Verge: multi-device edge betweenness centrality", long_about = None)]
struct Args {
    /// Input edge-list file (`src dst [weight]` per line, 0-indexed)
    #[arg(short, long)]
    input: PathBuf,

    /// Treat the input as a directed graph
    #[arg(long)]
    directed: bool,

    /// Report raw accumulations instead of normalized scores
    #[arg(long)]
    raw: bool,

    /// Sample this many source vertices instead of using all of them
    ///
    /// Example: --k 64
    #[arg(long)]
    k: Option<usize>,

    /// Seed for source sampling
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Use the weight column of the input (requires positive weights)
    #[arg(long)]
    weighted: bool,

    /// Number of devices to provision; omit for a serial run
    ///
    /// Example: --devices 4
    #[arg(long)]
    devices: Option<usize>,

    /// Accumulation precision of the scores: f32 or f64
    #[arg(long, default_value = "f64")]
    dtype: String,

    /// Also run the reference implementation and report the largest
    /// deviation from it
    #[arg(long)]
    verify: bool,

    /// Write a JSON report to this path instead of printing scores
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of top-scoring edges to print
    #[arg(long, default_value = "10")]
    top: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// JSON report written by `--output`.
#[derive(Debug, Serialize)]
struct Report {
    generated_at: String,
    input: String,
    num_vertices: usize,
    num_edges: usize,
    options: BcOptions,
    result: EdgeScores,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_reference_deviation: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    run(args)
}

fn run(args: Args) -> Result<()> {
    let dtype = match args.dtype.as_str() {
        "f32" => ResultDtype::F32,
        "f64" => ResultDtype::F64,
        other => bail!("unsupported dtype '{}': expected f32 or f64", other),
    };

    let graph = read_edge_list(&args.input, args.directed)
        .with_context(|| format!("failed to load graph from {}", args.input.display()))?;
    log::info!(
        "loaded {}: {} vertices, {} edges ({})",
        args.input.display(),
        graph.num_vertices(),
        graph.num_edges(),
        if args.directed { "directed" } else { "undirected" }
    );

    let opts = BcOptions {
        normalized: !args.raw,
        k: args.k,
        seed: args.seed,
        weighted: args.weighted,
        dtype,
    };

    let result = match args.devices {
        Some(device_count) => {
            let visible = get_visible_devices().len();
            log::info!(
                "requesting {} of {} visible device(s)",
                device_count,
                visible
            );
            let ctx = OpgContext::new(device_count)
                .context("failed to provision multi-device context")?;
            edge_betweenness_centrality_opg(&graph, &opts, &ctx)?
        }
        None => edge_betweenness_centrality(&graph, &opts)?,
    };

    let max_reference_deviation = if args.verify {
        let ref_scores = reference::edge_betweenness_centrality(&graph, &opts)
            .context("reference verification run failed")?;
        let max_dev = result
            .scores
            .iter()
            .zip(&ref_scores)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        log::info!("largest deviation from reference: {:e}", max_dev);
        Some(max_dev)
    } else {
        None
    };

    log::info!(
        "computed {} edge scores on {} device(s) in {:.2} ms",
        result.scores.len(),
        result.device_count,
        result.elapsed_ms
    );

    match &args.output {
        Some(path) => {
            let report = Report {
                generated_at: chrono::Utc::now().to_rfc3339(),
                input: args.input.display().to_string(),
                num_vertices: graph.num_vertices(),
                num_edges: graph.num_edges(),
                options: opts,
                result,
                max_reference_deviation,
            };
            let file = File::create(path)
                .with_context(|| format!("failed to create report file {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
            log::info!("report written to {}", path.display());
        }
        None => print_top_edges(&result, args.top),
    }

    Ok(())
}

/// Prints the `top` highest-scoring edges, ties broken by endpoints.
fn print_top_edges(result: &EdgeScores, top: usize) {
    let mut ranked: Vec<(usize, f64)> = result
        .scores
        .iter()
        .copied()
        .enumerate()
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    println!("{:>8} {:>8} {:>16}", "src", "dst", "betweenness");
    for (edge, score) in ranked.into_iter().take(top) {
        let (src, dst) = result.edges[edge];
        println!("{:>8} {:>8} {:>16.8}", src, dst, score);
    }
}
