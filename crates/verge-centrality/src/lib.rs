//! # verge-centrality
//!
//! Edge betweenness centrality for Verge graphs, computed two ways:
//!
//! - [`edge_betweenness_centrality`]: serial Brandes accumulation
//! - [`edge_betweenness_centrality_opg`]: the same semantics with source
//!   vertices partitioned round-robin across the devices of an
//!   [`verge_cluster::OpgContext`], per-device partial score buffers summed
//!   in device order
//!
//! The [`reference`] module carries a deliberately plain implementation
//! used to validate both engines, and [`scores`] joins computed and
//! reference columns into a table for tolerance comparison.
//!
//! Source subsets (`k` of `n` vertices) are sampled once per computation
//! with a seeded ChaCha8 RNG and shared verbatim by every engine, so runs
//! are reproducible and comparable.

mod brandes;

pub mod edge_betweenness;
pub mod reference;
pub mod sampling;
pub mod scores;

pub use edge_betweenness::{
    edge_betweenness_centrality, edge_betweenness_centrality_opg, BcOptions, EdgeScores,
    ResultDtype,
};
pub use sampling::sample_sources;
pub use scores::{ScoreRow, ScoreTable};
