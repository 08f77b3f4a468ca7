//! Simulated Annealing (LS2).
//!
//! A single-state trajectory search that accepts worsening moves with a
//! probability that shrinks as the temperature follows an exponential
//! schedule, letting the search leave local optima early on. The loop runs
//! until the cutoff; the best state ever accepted is returned.
//!
//! # Key Types
//!
//! - [`SaConfig`] and [`CoolingSchedule`]: parameters and the temperature curve
//! - [`AnnealingProblem`]: the capability a problem implements (`energy`,
//!   `propose_move`)
//! - [`TspAnnealing`]: tours under random pairwise swaps
//! - [`SaRunner`]: the annealing loop
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{metropolis_accepts, SaResult, SaRunner};
pub use types::{AnnealingProblem, TspAnnealing};
