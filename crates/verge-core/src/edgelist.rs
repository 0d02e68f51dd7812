//! Whitespace-separated edge-list parser.
//!
//! The bundled datasets use the layout `src dst [weight]`, one arc per
//! line, 0-indexed vertex ids, with an optional floating-point weight
//! (defaulting to 1.0). Lines starting with `#` or `%` are comments.
//! Symmetric files that list both arc directions collapse to one canonical
//! edge per pair when loaded undirected.
//!
//! ## Example
//! ```text
//! # triangle
//! 0 1 1.0
//! 1 2 1.0
//! 0 2 1.0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::{Graph, Result, VergeError};

/// Parses an edge-list file into a [`Graph`].
///
/// The vertex count is inferred as `max id + 1`. When `directed` is false,
/// mirror arcs (`v u` for an already-seen `u v`) are deduplicated into a
/// single canonical edge.
///
/// ## Errors
/// - `VergeError::Graph`: file not found or unreadable
/// - `VergeError::Parse`: malformed line (with its 1-based line number)
pub fn read_edge_list<P: AsRef<Path>>(path: P, directed: bool) -> Result<Graph> {
    let path_ref = path.as_ref();
    let file = File::open(path_ref).map_err(|e| {
        VergeError::graph(format!(
            "failed to open edge list '{}': {}",
            path_ref.display(),
            e
        ))
    })?;
    let reader = BufReader::new(file);

    let mut edges: Vec<(u32, u32, f64)> = Vec::new();
    let mut max_vertex: Option<u32> = None;

    for (idx, line_result) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line_result.map_err(|e| {
            VergeError::graph(format!(
                "failed to read line {} from '{}': {}",
                line_num,
                path_ref.display(),
                e
            ))
        })?;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(VergeError::parse(
                line_num,
                format!("expected 'src dst [weight]', got '{}'", line),
            ));
        }

        let src = parts[0].parse::<u32>().map_err(|_| {
            VergeError::parse(line_num, format!("invalid vertex id '{}'", parts[0]))
        })?;
        let dst = parts[1].parse::<u32>().map_err(|_| {
            VergeError::parse(line_num, format!("invalid vertex id '{}'", parts[1]))
        })?;

        let weight = match parts.get(2) {
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                VergeError::parse(line_num, format!("invalid edge weight '{}'", raw))
            })?,
            None => 1.0,
        };
        if !weight.is_finite() {
            return Err(VergeError::parse(
                line_num,
                format!("non-finite edge weight '{}'", parts[2]),
            ));
        }

        max_vertex = Some(max_vertex.map_or(src.max(dst), |m| m.max(src).max(dst)));
        edges.push((src, dst, weight));
    }

    let num_vertices = max_vertex.map_or(0, |m| m as usize + 1);
    log::debug!(
        "parsed {} arcs over {} vertices from '{}'",
        edges.len(),
        num_vertices,
        path_ref.display()
    );

    Graph::from_weighted_edges(num_vertices, &edges, directed)
}
