//! Travelling salesman solvers for planar instances under a wall-clock cutoff.
//!
//! Four algorithms share one input model (a symmetric integer
//! [`DistanceMatrix`]) and one output model (a tour, its length and an
//! improvement [`Trace`](trace::Trace)):
//!
//! - **Branch-and-Bound (`BnB`)**: depth-first exact search with an
//!   incremental lower bound and an explicit frame stack.
//! - **MST Approximation (`Approx`)**: Prim's tree from a random root,
//!   shortcut by a preorder walk; at most twice the optimum.
//! - **Hill Climbing (`LS1`)**: first-improvement pairwise swaps with random
//!   restarts that never revisit a start permutation.
//! - **Simulated Annealing (`LS2`)**: random pairwise swaps accepted by the
//!   Metropolis rule under an exponential cooling schedule.
//!
//! Every solver polls a [`Budget`](clock::Budget) and returns the best tour
//! found when the cutoff expires. The randomized ones take a seed and are
//! deterministic for a fixed seed and step count.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_tsp::{solve, Algorithm, City, DistanceMatrix, SolveOptions};
//!
//! let cities = [
//!     City::new(1, 0.0, 0.0),
//!     City::new(2, 3.0, 0.0),
//!     City::new(3, 3.0, 4.0),
//!     City::new(4, 0.0, 4.0),
//! ];
//! let matrix = DistanceMatrix::from_cities(&cities);
//! let options = SolveOptions::new(Algorithm::SimulatedAnnealing, Duration::from_millis(200))
//!     .with_seed(7);
//!
//! let solution = solve(&matrix, &options).unwrap();
//! assert_eq!(solution.tour.len(), 4);
//! assert_eq!(solution.cost, 14);
//! ```

pub mod approx;
pub mod bnb;
pub mod clock;
pub mod error;
pub mod hill;
pub mod instance;
pub mod matrix;
pub mod output;
pub mod random;
pub mod sa;
pub mod solver;
pub mod tour;
pub mod trace;

#[cfg(test)]
mod test_utils;

pub use error::{Result, TspError};
pub use instance::Instance;
pub use matrix::{City, Distance, DistanceMatrix};
pub use solver::{solve, solve_with_budget, Algorithm, Solution, SolveOptions, SolveStatus};
