//! Branch-and-Bound execution engine.
//!
//! # Algorithm
//!
//! 1. Sort every city's neighbors by ascending distance.
//! 2. Initial bound: half the sum, over all cities, of the nearest plus the
//!    second-nearest neighbor distance.
//! 3. Depth-first from city 1. For each unvisited candidate `i` of the last
//!    city `u`, in ascending distance order:
//!    - distance += `d(u, i)`
//!    - bound -= (`d(u, 1st(u))` on the first edge, else `d(u, 2nd(u))`,
//!      plus `d(i, 1st(i))`) / 2 under [`BoundRule::HalfSum`]
//!    - prune if `bound + distance >= best`, else descend and backtrack.
//! 4. A full path is closed back to city 1; a strictly shorter cycle becomes
//!    the incumbent and is traced.
//!
//! The clock is polled once per node entry. When the budget is exhausted every
//! frame unwinds immediately and the incumbent is returned.
//!
//! # Reference
//!
//! Little, Murty, Sweeney & Karel (1963), "An Algorithm for the Traveling
//! Salesman Problem", *Operations Research* 11(6), 972-989.

use super::config::{BnbConfig, BoundRule};
use super::state::SearchState;
use crate::clock::{Budget, Clock};
use crate::error::{Result, TspError};
use crate::matrix::{Distance, DistanceMatrix};
use crate::trace::Trace;

/// The search starts from the first city (one-based).
const ROOT: usize = 1;

/// The bound needs a second-nearest neighbor for every city.
pub const MIN_CITIES: usize = 3;

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BnbStatus {
    /// The whole tree was explored or pruned. Optimal under
    /// [`BoundRule::Admissible`].
    Exhausted,
    /// The cutoff interrupted the search; the result is the best found.
    Timeout,
    /// The cancel flag interrupted the search.
    Cancelled,
}

/// Result of a Branch-and-Bound run.
#[derive(Debug, Clone)]
pub struct BnbResult {
    /// Best tour, zero-based, starting at city 0.
    pub best: Vec<usize>,
    /// Length of the best tour.
    pub best_cost: Distance,
    /// Improvements of the incumbent over time.
    pub trace: Trace,
    pub status: BnbStatus,
    /// Nodes entered (after the clock check).
    pub nodes: u64,
    /// Candidate extensions cut off by the bound.
    pub pruned: u64,
}

/// Branch-and-Bound runner.
pub struct BnbRunner;

impl BnbRunner {
    /// Runs the exact search against the real clock.
    pub fn run(matrix: &DistanceMatrix, config: &BnbConfig) -> Result<BnbResult> {
        Self::run_with_budget(matrix, config, &Budget::wall_clock(config.cutoff))
    }

    /// Runs the exact search under an explicit budget.
    ///
    /// `matrix` may use either layout; the search always works on the
    /// one-based form. The cutoff comes from `budget`, not `config`.
    ///
    /// # Errors
    ///
    /// - [`TspError::TooFewCities`] for fewer than three cities
    /// - [`TspError::NoSolutionWithinCutoff`] if no tour was completed in time
    pub fn run_with_budget<C: Clock>(
        matrix: &DistanceMatrix,
        config: &BnbConfig,
        budget: &Budget<C>,
    ) -> Result<BnbResult> {
        let n = matrix.city_count();
        if n < MIN_CITIES {
            return Err(TspError::TooFewCities {
                found: n,
                required: MIN_CITIES,
            });
        }

        let matrix = matrix.to_one_based();
        let neighbors = sorted_neighbors(&matrix);
        let bound = initial_bound(&matrix, &neighbors);
        log::info!("branch-and-bound: {n} cities, initial bound {bound:.1}");

        let mut search = Search {
            matrix: &matrix,
            neighbors: &neighbors,
            budget,
            rule: config.bound,
            cities: n,
            best_cost: None,
            best_path: Vec::new(),
            trace: Trace::new(),
            nodes: 0,
            pruned: 0,
            interrupted: false,
        };
        let mut state = SearchState::new(n, ROOT, bound);
        search.expand(&mut state);
        debug_assert_eq!(state.path(), &[ROOT]);

        let status = if !search.interrupted {
            BnbStatus::Exhausted
        } else if budget.is_cancelled() {
            BnbStatus::Cancelled
        } else {
            BnbStatus::Timeout
        };

        let Some(best_cost) = search.best_cost else {
            log::info!(
                "branch-and-bound: no complete tour after {} nodes",
                search.nodes
            );
            return Err(TspError::NoSolutionWithinCutoff {
                cutoff: budget.cutoff(),
            });
        };
        log::info!(
            "branch-and-bound: {status:?}, cost {best_cost}, {} nodes, {} pruned",
            search.nodes,
            search.pruned
        );

        Ok(BnbResult {
            best: search.best_path.iter().map(|&c| c - 1).collect(),
            best_cost,
            trace: search.trace,
            status,
            nodes: search.nodes,
            pruned: search.pruned,
        })
    }
}

/// For each one-based city, every other city by ascending distance.
/// Ties keep index order.
fn sorted_neighbors(matrix: &DistanceMatrix) -> Vec<Vec<usize>> {
    let dim = matrix.dimension();
    let mut neighbors = vec![Vec::new()];
    for city in 1..dim {
        let mut order: Vec<usize> = (1..dim).filter(|&other| other != city).collect();
        order.sort_by_key(|&other| matrix.get(city, other));
        neighbors.push(order);
    }
    neighbors
}

fn initial_bound(matrix: &DistanceMatrix, neighbors: &[Vec<usize>]) -> f64 {
    let sum: Distance = (1..neighbors.len())
        .map(|c| matrix.get(c, neighbors[c][0]) + matrix.get(c, neighbors[c][1]))
        .sum();
    sum as f64 / 2.0
}

struct Search<'a, C: Clock> {
    matrix: &'a DistanceMatrix,
    neighbors: &'a [Vec<usize>],
    budget: &'a Budget<C>,
    rule: BoundRule,
    cities: usize,
    best_cost: Option<Distance>,
    best_path: Vec<usize>,
    trace: Trace,
    nodes: u64,
    pruned: u64,
    interrupted: bool,
}

impl<C: Clock> Search<'_, C> {
    #[inline]
    fn nearest(&self, city: usize) -> Distance {
        self.matrix.get(city, self.neighbors[city][0])
    }

    #[inline]
    fn second_nearest(&self, city: usize) -> Distance {
        self.matrix.get(city, self.neighbors[city][1])
    }

    /// Cheapest edge `city` could still use once its edge to `via` is fixed.
    #[inline]
    fn remaining(&self, city: usize, via: usize) -> Distance {
        if self.neighbors[city][0] == via {
            self.second_nearest(city)
        } else {
            self.nearest(city)
        }
    }

    /// Total bound decrease for fixing the edge `(last, city)`.
    fn bound_decrease(&self, state: &SearchState, last: usize, city: usize) -> f64 {
        let (leaving, entering) = match self.rule {
            BoundRule::HalfSum => {
                let leaving = if state.depth() == 1 {
                    self.nearest(last)
                } else {
                    self.second_nearest(last)
                };
                (leaving, self.nearest(city))
            }
            BoundRule::Admissible => {
                let leaving = if state.depth() == 1 {
                    self.nearest(last) + self.second_nearest(last) - self.remaining(last, city)
                } else {
                    let previous = state.path()[state.depth() - 2];
                    self.remaining(last, previous)
                };
                let entering =
                    self.nearest(city) + self.second_nearest(city) - self.remaining(city, last);
                (leaving, entering)
            }
        };
        (leaving + entering) as f64 / 2.0
    }

    #[inline]
    fn incumbent(&self) -> f64 {
        self.best_cost.map_or(f64::INFINITY, |c| c as f64)
    }

    fn expand(&mut self, state: &mut SearchState) {
        debug_assert!(
            state.is_consistent(),
            "inconsistent state at {:?}",
            state.path()
        );
        if self.budget.expired() {
            self.interrupted = true;
            return;
        }
        self.nodes += 1;

        let last = state.last();
        if state.depth() == self.cities {
            let cost = state.distance() + self.matrix.get(last, state.first());
            if self.best_cost.is_none_or(|best| cost < best) {
                self.best_cost = Some(cost);
                self.best_path.clear();
                self.best_path.extend_from_slice(state.path());
                self.trace.record(self.budget.elapsed_secs(), cost);
            }
            return;
        }

        for k in 0..self.neighbors[last].len() {
            let city = self.neighbors[last][k];
            if state.is_visited(city) {
                continue;
            }
            let edge = self.matrix.get(last, city);
            let distance = state.distance() + edge;
            let bound = state.bound() - self.bound_decrease(state, last, city);
            if bound + distance as f64 >= self.incumbent() {
                self.pruned += 1;
                continue;
            }

            let frame = state.descend(city, edge, bound);
            self.expand(state);
            state.backtrack(frame);
            debug_assert!(
                state.is_consistent(),
                "inconsistent state after backtracking to {:?}",
                state.path()
            );

            if self.interrupted {
                return;
            }
        }
    }
}
