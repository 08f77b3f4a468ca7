//! Hill climbing execution engine.
//!
//! # Algorithm
//!
//! 1. Draw a random permutation that has not been visited yet; it becomes
//!    the current tour and is marked visited.
//! 2. Scan the swap neighborhood in a freshly shuffled order and move to the
//!    first neighbor that is shorter and not yet visited. Mark it visited and
//!    scan again from there.
//! 3. When a scan finds nothing, the current tour is a local optimum; go to 1.
//!
//! Every tour that becomes current is compared with the global best, and each
//! strict improvement is traced. The budget is polled before every restart,
//! inside the restart rejection loop, and before every neighbor evaluation.
//! The search also ends once all `N!` permutations have been visited.

use super::config::HillClimbConfig;
use super::neighborhood::SwapOrder;
use crate::clock::{Budget, Clock};
use crate::error::{Result, TspError};
use crate::matrix::{Distance, DistanceMatrix, INFINITY};
use crate::random::{create_rng, random_permutation};
use crate::tour::{swap_delta, tour_length};
use crate::trace::Trace;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbResult {
    /// Best tour found.
    pub best: Vec<usize>,
    /// Length of the best tour.
    pub best_cost: Distance,
    /// Improvements of the global best over time.
    pub trace: Trace,
    /// Random starting points climbed from.
    pub restarts: usize,
    /// Improving moves taken.
    pub accepted_moves: usize,
    /// Neighbors whose cost was evaluated.
    pub evaluated_neighbors: u64,
    /// Distinct tours visited.
    pub visited: usize,
    /// Every permutation was visited before the budget ran out.
    pub exhausted: bool,
    /// Whether the run was stopped by the cancel flag.
    pub cancelled: bool,
}

/// Hill climbing runner.
pub struct HillClimbRunner;

impl HillClimbRunner {
    /// Runs hill climbing against the real clock.
    pub fn run(matrix: &DistanceMatrix, config: &HillClimbConfig) -> Result<HillClimbResult> {
        Self::run_with_budget(matrix, config, &Budget::wall_clock(config.cutoff))
    }

    /// Runs hill climbing under an explicit budget.
    ///
    /// The first restart always runs, so a result exists even for a zero
    /// cutoff.
    ///
    /// # Errors
    ///
    /// - [`TspError::MissingSeed`] if `config.seed` is `None`
    /// - [`TspError::EmptyInstance`] for an instance without cities
    pub fn run_with_budget<C: Clock>(
        matrix: &DistanceMatrix,
        config: &HillClimbConfig,
        budget: &Budget<C>,
    ) -> Result<HillClimbResult> {
        config.validate()?;
        let n = matrix.city_count();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }
        log::info!(
            "hill-climbing: {n} cities, cutoff {:.2}s",
            budget.cutoff().as_secs_f64()
        );

        let mut climb = Climb {
            matrix,
            budget,
            rng: create_rng(config.seed.unwrap_or_default()),
            visited: HashSet::new(),
            best: Vec::new(),
            best_cost: INFINITY,
            trace: Trace::new(),
            restarts: 0,
            accepted_moves: 0,
            evaluated_neighbors: 0,
        };
        let exhausted = climb.run(permutation_count(n));

        let cancelled = budget.is_cancelled();
        log::info!(
            "hill-climbing: best {} after {} restarts, {} moves, {} neighbors",
            climb.best_cost,
            climb.restarts,
            climb.accepted_moves,
            climb.evaluated_neighbors
        );

        Ok(HillClimbResult {
            best: climb.best,
            best_cost: climb.best_cost,
            trace: climb.trace,
            restarts: climb.restarts,
            accepted_moves: climb.accepted_moves,
            evaluated_neighbors: climb.evaluated_neighbors,
            visited: climb.visited.len(),
            exhausted,
            cancelled,
        })
    }
}

/// `n!`, or `None` if it does not fit in `usize`.
fn permutation_count(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

enum Scan {
    Moved,
    LocalOptimum,
    Interrupted,
}

struct Climb<'a, C: Clock> {
    matrix: &'a DistanceMatrix,
    budget: &'a Budget<C>,
    rng: StdRng,
    visited: HashSet<Vec<usize>>,
    best: Vec<usize>,
    best_cost: Distance,
    trace: Trace,
    restarts: usize,
    accepted_moves: usize,
    evaluated_neighbors: u64,
}

impl<C: Clock> Climb<'_, C> {
    /// Restarts until the budget runs out. Returns `true` if the search
    /// stopped because every permutation had been visited.
    fn run(&mut self, permutations: Option<usize>) -> bool {
        let n = self.matrix.city_count();
        loop {
            if permutations.is_some_and(|total| self.visited.len() >= total) {
                return true;
            }
            if self.restarts > 0 && self.budget.expired() {
                return false;
            }

            let mut current = random_permutation(n, &mut self.rng);
            while self.visited.contains(&current) {
                if self.budget.expired() {
                    return false;
                }
                current = random_permutation(n, &mut self.rng);
            }
            self.restarts += 1;

            let mut cost = tour_length(self.matrix, &current);
            self.visited.insert(current.clone());
            self.consider(&current, cost);

            loop {
                match self.scan(&mut current, &mut cost) {
                    Scan::Moved => {
                        self.accepted_moves += 1;
                        self.consider(&current, cost);
                    }
                    Scan::LocalOptimum => {
                        log::trace!("local optimum {cost} on restart {}", self.restarts);
                        break;
                    }
                    Scan::Interrupted => return false,
                }
            }
        }
    }

    /// One first-improvement pass over the neighborhood of `tour`.
    fn scan(&mut self, tour: &mut [usize], cost: &mut Distance) -> Scan {
        let order = SwapOrder::shuffled(tour.len(), &mut self.rng);
        for (i, j) in order.pairs() {
            if self.budget.expired() {
                return Scan::Interrupted;
            }
            self.evaluated_neighbors += 1;

            let delta = swap_delta(self.matrix, tour, i, j);
            if delta >= 0 {
                continue;
            }
            tour.swap(i, j);
            if self.visited.contains(&*tour) {
                tour.swap(i, j);
                continue;
            }
            *cost -= delta.unsigned_abs();
            self.visited.insert(tour.to_vec());
            return Scan::Moved;
        }
        Scan::LocalOptimum
    }

    fn consider(&mut self, tour: &[usize], cost: Distance) {
        if cost < self.best_cost {
            self.best_cost = cost;
            self.best = tour.to_vec();
            self.trace.record(self.budget.elapsed_secs(), cost);
        }
    }
}
