//! Registry of the small graph datasets bundled with the repository.
//!
//! The files live in `datasets/` at the workspace root, in symmetric
//! `src dst weight` edge-list form (both arc directions present, weights
//! all 1.0). The correctness suites iterate [`DATASETS`] the same way the
//! benchmark graphs are iterated elsewhere in the workspace.

use std::path::PathBuf;

use crate::{edgelist, Graph, Result};

/// A bundled dataset: a short name plus its file under `datasets/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    /// Short name used in logs and test case labels
    pub name: &'static str,
    file: &'static str,
}

impl Dataset {
    /// Absolute path of the dataset file.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../datasets")
            .join(self.file)
    }

    /// Loads the dataset with the requested directedness.
    pub fn load(&self, directed: bool) -> Result<Graph> {
        edgelist::read_edge_list(self.path(), directed)
    }
}

/// Zachary's karate club (34 vertices, 78 undirected edges).
pub const KARATE: Dataset = Dataset {
    name: "karate",
    file: "karate.csv",
};

/// 4x4 lattice graph (16 vertices, 24 undirected edges).
pub const GRID4X4: Dataset = Dataset {
    name: "grid4x4",
    file: "grid4x4.csv",
};

/// Datasets exercised by the correctness suites.
pub const DATASETS: &[Dataset] = &[KARATE, GRID4X4];
