//! # verge-core
//!
//! Core types and I/O for the Verge graph analytics toolkit.
//!
//! This crate defines the fundamental pieces shared by all Verge components:
//! - **Graph**: CSR adjacency with stable canonical edge identifiers
//! - **Edge lists**: whitespace-separated `src dst [weight]` file parsing
//! - **Datasets**: registry of the small graphs bundled with the repository
//! - **Errors**: unified error handling with `VergeError`
//!
//! Higher layers build on these types: `verge-cluster` provisions logical
//! compute devices, `verge-centrality` runs Brandes edge betweenness over
//! them, and `verge-cli` exposes both from the command line.

pub mod datasets;
pub mod edgelist;
pub mod errors;
pub mod graph;

// Re-export commonly used items
pub use datasets::{Dataset, DATASETS};
pub use edgelist::read_edge_list;
pub use errors::{Result, VergeError};
pub use graph::Graph;
