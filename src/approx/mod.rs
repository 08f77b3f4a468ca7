//! MST-based 2-approximation.
//!
//! Builds a minimum spanning tree from a randomly chosen root and takes its
//! pre-order walk as the tour. Runs in `O(N²)` and always completes; the
//! cutoff does not apply.
//!
//! # Key Types
//!
//! - [`ApproxConfig`]: seed (required) and cutoff
//! - [`ApproxRunner`]: builds the tour
//! - [`SpanningTree`]: the tree, exposed for inspection
//!
//! # References
//!
//! - Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several Heuristics
//!   for the Traveling Salesman Problem"

mod config;
mod mst;
mod runner;

pub use config::ApproxConfig;
pub use mst::{prim, SpanningTree, TreeEdge};
pub use runner::{ApproxResult, ApproxRunner};
