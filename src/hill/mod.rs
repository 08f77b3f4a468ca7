//! Hill climbing with random restarts (LS1).
//!
//! First-improvement descent over the pairwise-swap neighborhood. A global
//! set of visited tours keeps later restarts and moves off ground that has
//! already been covered.
//!
//! # Key Types
//!
//! - [`HillClimbConfig`]: cutoff and seed (required)
//! - [`HillClimbRunner`]: executes the search
//! - [`SwapOrder`]: the randomized neighbor scan order
//!
//! # Reference
//!
//! Russell, S. & Norvig, P. (2010). *Artificial Intelligence: A Modern
//! Approach*, 3rd ed., §4.1.1 "Hill-climbing search".

mod config;
mod neighborhood;
mod runner;

pub use config::HillClimbConfig;
pub use neighborhood::SwapOrder;
pub use runner::{HillClimbResult, HillClimbRunner};
