//! Exact Branch-and-Bound search.
//!
//! Depth-first enumeration of tours from a fixed root city, visiting
//! candidates nearest-first and pruning every extension whose running
//! distance plus remaining lower bound cannot beat the incumbent.
//!
//! # Key Types
//!
//! - [`BnbConfig`]: cutoff and [`BoundRule`]
//! - [`BnbRunner`]: executes the search
//! - [`BnbResult`]: incumbent, trace and node statistics
//! - [`SearchState`]: the explicit, backtrackable search state
//!
//! # References
//!
//! - Little, Murty, Sweeney & Karel (1963), "An Algorithm for the Traveling
//!   Salesman Problem"
//! - Held & Karp (1970), "The Traveling-Salesman Problem and Minimum Spanning Trees"

mod config;
mod runner;
mod state;

pub use config::{BnbConfig, BoundRule};
pub use runner::{BnbResult, BnbRunner, BnbStatus, MIN_CITIES};
pub use state::{Frame, SearchState};
