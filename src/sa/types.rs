//! Core trait for simulated annealing, and the TSP problem.

use crate::error::{Result, TspError};
use crate::matrix::{Distance, DistanceMatrix};
use crate::random::random_permutation;
use crate::tour::{swap_delta, tour_length};
use rand::Rng;

/// Defines an annealing problem.
///
/// The runner owns the state, keeps a copy of the last accepted state, and
/// restores it when a move is rejected, so `propose_move` may mutate the
/// state freely.
///
/// # Minimization
///
/// The runner minimizes energy.
pub trait AnnealingProblem {
    /// The state representation.
    type State: Clone;

    /// Creates the starting state.
    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State;

    /// Energy of `state`. Lower is better.
    fn energy(&self, state: &Self::State) -> Distance;

    /// Applies a random move to `state`.
    ///
    /// Returns the energy change if it is cheap to compute, or `None` to let
    /// the runner recompute the energy from scratch.
    fn propose_move<R: Rng>(&self, state: &mut Self::State, rng: &mut R) -> Option<i64>;
}

/// The travelling salesman problem as an annealing problem.
///
/// The state is a tour; a move swaps two cities chosen uniformly and
/// independently (possibly the same position, a no-op).
#[derive(Debug, Clone, Copy)]
pub struct TspAnnealing<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> TspAnnealing<'a> {
    /// # Errors
    ///
    /// [`TspError::EmptyInstance`] if the matrix has no cities.
    pub fn new(matrix: &'a DistanceMatrix) -> Result<Self> {
        if matrix.city_count() == 0 {
            return Err(TspError::EmptyInstance);
        }
        Ok(Self { matrix })
    }

    pub fn matrix(&self) -> &'a DistanceMatrix {
        self.matrix
    }
}

impl AnnealingProblem for TspAnnealing<'_> {
    type State = Vec<usize>;

    fn initial_state<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        random_permutation(self.matrix.city_count(), rng)
    }

    fn energy(&self, tour: &Vec<usize>) -> Distance {
        tour_length(self.matrix, tour)
    }

    fn propose_move<R: Rng>(&self, tour: &mut Vec<usize>, rng: &mut R) -> Option<i64> {
        let n = tour.len();
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        let delta = swap_delta(self.matrix, tour, a, b);
        tour.swap(a, b);
        Some(delta)
    }
}
