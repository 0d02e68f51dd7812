//! CSR graph representation with stable canonical edge identifiers.
//!
//! Edge-centric analytics need a stable id per edge so that score buffers
//! computed on different workers can be summed index-wise. The CSR layout
//! therefore carries an `arc_edge` map: every stored arc points at the
//! canonical edge it belongs to. For undirected graphs both mirror arcs of
//! an edge share one id; for directed graphs arcs and edges coincide.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

use crate::{Result, VergeError};

/// Graph in CSR (compressed sparse row) form.
///
/// Canonical edges are ordered by `(min, max)` endpoint pair (undirected)
/// or by `(src, dst)` (directed), and score vectors produced by the
/// centrality algorithms are indexed in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    num_vertices: usize,
    directed: bool,

    /// CSR row offsets, length `num_vertices + 1`
    offsets: Vec<usize>,

    /// Arc targets, grouped by source and sorted by target
    targets: Vec<u32>,

    /// Per-arc weights; `None` for unweighted graphs
    #[serde(skip_serializing_if = "Option::is_none")]
    weights: Option<Vec<f64>>,

    /// Per-arc canonical edge id
    arc_edge: Vec<usize>,

    /// Canonical edge endpoints, indexed by edge id
    edge_endpoints: Vec<(u32, u32)>,
}

impl Graph {
    /// Builds an unweighted graph from an edge list.
    ///
    /// Duplicate edges are dropped (first occurrence wins) and self-loops
    /// are skipped with a warning. Endpoints must be `< num_vertices`.
    pub fn from_edges(num_vertices: usize, edges: &[(u32, u32)], directed: bool) -> Result<Self> {
        let triples: Vec<(u32, u32, f64)> = edges.iter().map(|&(u, v)| (u, v, 1.0)).collect();
        Self::build(num_vertices, &triples, directed, false)
    }

    /// Builds a weighted graph from `(src, dst, weight)` triples.
    ///
    /// Weights must be finite. Positivity is not enforced here; algorithms
    /// that require positive weights validate at their own entry points.
    pub fn from_weighted_edges(
        num_vertices: usize,
        edges: &[(u32, u32, f64)],
        directed: bool,
    ) -> Result<Self> {
        Self::build(num_vertices, edges, directed, true)
    }

    fn build(
        num_vertices: usize,
        edges: &[(u32, u32, f64)],
        directed: bool,
        store_weights: bool,
    ) -> Result<Self> {
        // Deduplicate on the canonical key; first occurrence keeps its weight.
        let mut canonical: HashMap<(u32, u32), f64> = HashMap::new();
        for &(u, v, w) in edges {
            if u as usize >= num_vertices || v as usize >= num_vertices {
                return Err(VergeError::graph(format!(
                    "edge ({}, {}) out of range for {} vertices",
                    u, v, num_vertices
                )));
            }
            if !w.is_finite() {
                return Err(VergeError::numerical(format!(
                    "non-finite weight {} on edge ({}, {})",
                    w, u, v
                )));
            }
            if u == v {
                log::warn!("skipping self-loop edge ({}, {})", u, v);
                continue;
            }
            let key = if directed || u < v { (u, v) } else { (v, u) };
            canonical.entry(key).or_insert(w);
        }

        // Canonical edge order: lexicographic by endpoint pair.
        let mut edge_endpoints: Vec<(u32, u32)> = canonical.keys().copied().collect();
        edge_endpoints.sort_unstable();

        let edge_id: HashMap<(u32, u32), usize> = edge_endpoints
            .iter()
            .enumerate()
            .map(|(id, &pair)| (pair, id))
            .collect();

        // Expand canonical edges into arcs (both directions when undirected).
        let mut arcs: Vec<(u32, u32, f64, usize)> = Vec::with_capacity(
            edge_endpoints.len() * if directed { 1 } else { 2 },
        );
        for (id, &(u, v)) in edge_endpoints.iter().enumerate() {
            let w = canonical[&(u, v)];
            arcs.push((u, v, w, id));
            if !directed {
                arcs.push((v, u, w, id));
            }
        }
        arcs.sort_unstable_by_key(|&(u, v, _, _)| (u, v));

        let mut offsets = vec![0usize; num_vertices + 1];
        for &(u, _, _, _) in &arcs {
            offsets[u as usize + 1] += 1;
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }

        let targets: Vec<u32> = arcs.iter().map(|&(_, v, _, _)| v).collect();
        let arc_edge: Vec<usize> = arcs.iter().map(|&(_, _, _, id)| id).collect();
        let weights = if store_weights {
            Some(arcs.iter().map(|&(_, _, w, _)| w).collect())
        } else {
            None
        };

        Ok(Self {
            num_vertices,
            directed,
            offsets,
            targets,
            weights,
            arc_edge,
            edge_endpoints,
        })
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of stored arcs (twice the edge count for undirected graphs).
    pub fn num_arcs(&self) -> usize {
        self.targets.len()
    }

    /// Number of canonical edges.
    pub fn num_edges(&self) -> usize {
        self.edge_endpoints.len()
    }

    /// Whether the graph is directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether per-arc weights are stored.
    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// Arc index range for the arcs leaving `v`.
    pub fn arc_range(&self, v: usize) -> Range<usize> {
        self.offsets[v]..self.offsets[v + 1]
    }

    /// Target vertex of an arc.
    pub fn target(&self, arc: usize) -> u32 {
        self.targets[arc]
    }

    /// Weight of an arc (1.0 when the graph is unweighted).
    pub fn arc_weight(&self, arc: usize) -> f64 {
        self.weights.as_ref().map_or(1.0, |w| w[arc])
    }

    /// Canonical edge id of an arc.
    pub fn arc_edge(&self, arc: usize) -> usize {
        self.arc_edge[arc]
    }

    /// Endpoints of a canonical edge.
    pub fn edge_endpoints(&self, edge: usize) -> (u32, u32) {
        self.edge_endpoints[edge]
    }

    /// Neighbors of `v` as a target slice.
    pub fn neighbors(&self, v: usize) -> &[u32] {
        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Out-degree of `v`.
    pub fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Graph density relative to the complete (di)graph on the same vertices.
    pub fn density(&self) -> f64 {
        if self.num_vertices <= 1 {
            return 0.0;
        }
        let possible = (self.num_vertices * (self.num_vertices - 1)) as f64;
        if self.directed {
            self.num_arcs() as f64 / possible
        } else {
            (2 * self.num_edges()) as f64 / possible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_undirected() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 2), (0, 2)], false).unwrap();

        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.num_arcs(), 6);
        assert_eq!(g.neighbors(0), &[1, 2]);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.neighbors(2), &[0, 1]);

        // Canonical edge order is lexicographic by endpoints.
        assert_eq!(g.edge_endpoints(0), (0, 1));
        assert_eq!(g.edge_endpoints(1), (0, 2));
        assert_eq!(g.edge_endpoints(2), (1, 2));
    }

    #[test]
    fn test_mirror_arcs_share_edge_id() {
        let g = Graph::from_edges(3, &[(2, 0), (0, 1)], false).unwrap();

        // Find arcs 0->2 and 2->0; they must map to the same canonical edge.
        let fwd = g.arc_range(0).find(|&a| g.target(a) == 2).unwrap();
        let rev = g.arc_range(2).find(|&a| g.target(a) == 0).unwrap();
        assert_eq!(g.arc_edge(fwd), g.arc_edge(rev));
        assert_eq!(g.edge_endpoints(g.arc_edge(fwd)), (0, 2));
    }

    #[test]
    fn test_directed_keeps_both_directions() {
        let g = Graph::from_edges(2, &[(0, 1), (1, 0)], true).unwrap();
        assert_eq!(g.num_edges(), 2);
        assert_eq!(g.num_arcs(), 2);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0]);
    }

    #[test]
    fn test_duplicate_and_mirror_dedup() {
        let g = Graph::from_edges(2, &[(0, 1), (0, 1), (1, 0)], false).unwrap();
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.num_arcs(), 2);
    }

    #[test]
    fn test_self_loop_skipped() {
        let g = Graph::from_edges(3, &[(0, 1), (1, 1), (1, 2)], false).unwrap();
        assert_eq!(g.num_edges(), 2);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let result = Graph::from_edges(3, &[(0, 5)], false);
        assert!(matches!(result, Err(VergeError::Graph(_))));
    }

    #[test]
    fn test_weights_follow_arcs() {
        let g = Graph::from_weighted_edges(3, &[(1, 0, 2.5), (1, 2, 4.0)], false).unwrap();
        assert!(g.is_weighted());

        let arc = g.arc_range(0).next().unwrap();
        assert_eq!(g.target(arc), 1);
        assert_eq!(g.arc_weight(arc), 2.5);

        let arc = g.arc_range(2).next().unwrap();
        assert_eq!(g.arc_weight(arc), 4.0);
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        let result = Graph::from_weighted_edges(2, &[(0, 1, f64::NAN)], false);
        assert!(matches!(result, Err(VergeError::Numerical(_))));
    }

    #[test]
    fn test_density() {
        let g = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)], false).unwrap();
        assert!((g.density() - 0.5).abs() < 1e-12);

        let empty = Graph::from_edges(0, &[], false).unwrap();
        assert_eq!(empty.density(), 0.0);
    }
}
