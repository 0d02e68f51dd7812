//! Joined computed/reference score tables.
//!
//! The correctness suites compare a computed score column against a
//! reference column row by row; this module provides the joined table
//! with named column access so the comparison helper can be pointed at
//! any pair of columns.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::edge_betweenness::EdgeScores;

/// Column name of the computed scores.
pub const COMPUTED_COLUMN: &str = "bc";

/// Column name of the reference scores.
pub const REFERENCE_COLUMN: &str = "ref_bc";

/// One edge with its computed and reference scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub src: u32,
    pub dst: u32,
    pub bc: f64,
    pub ref_bc: f64,
}

/// Computed and reference scores joined per edge, sorted by endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTable {
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    /// Joins computed scores with a reference column.
    ///
    /// The reference must have one entry per edge in the same edge-id
    /// order the engines produce (canonical endpoint order, so the table
    /// comes out sorted by `(src, dst)`).
    pub fn join(computed: &EdgeScores, reference: &[f64]) -> Result<Self> {
        ensure!(
            computed.scores.len() == reference.len(),
            "score column length mismatch: {} computed vs {} reference",
            computed.scores.len(),
            reference.len()
        );

        let rows = computed
            .edges
            .iter()
            .zip(computed.scores.iter().zip(reference))
            .map(|(&(src, dst), (&bc, &ref_bc))| ScoreRow {
                src,
                dst,
                bc,
                ref_bc,
            })
            .collect();
        Ok(Self { rows })
    }

    /// Rows in edge order.
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// Extracts a column by name (`"bc"` or `"ref_bc"`).
    pub fn column(&self, key: &str) -> Result<Vec<f64>> {
        match key {
            COMPUTED_COLUMN => Ok(self.rows.iter().map(|r| r.bc).collect()),
            REFERENCE_COLUMN => Ok(self.rows.iter().map(|r| r.ref_bc).collect()),
            other => anyhow::bail!("unknown score column '{}'", other),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
