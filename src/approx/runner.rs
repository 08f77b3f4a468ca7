//! MST approximation execution.
//!
//! # Algorithm
//!
//! 1. Pick the root uniformly at random from the seeded generator.
//! 2. Build the minimum spanning tree with Prim's algorithm.
//! 3. Walk the tree in pre-order; the walk, closed back to its start, is the
//!    tour.
//!
//! By the triangle inequality the shortcut walk is no longer than twice the
//! tree, and the tree is no heavier than the optimal tour, so the result is
//! within a factor of two of optimal. Rounding distances to integers can
//! break the triangle inequality by at most one unit per edge.

use super::config::ApproxConfig;
use super::mst::{prim, SpanningTree};
use crate::clock::{Budget, Clock};
use crate::error::{Result, TspError};
use crate::matrix::{Distance, DistanceMatrix};
use crate::random::create_rng;
use crate::tour::tour_length;
use crate::trace::Trace;
use rand::Rng;

/// Result of the MST approximation.
#[derive(Debug, Clone)]
pub struct ApproxResult {
    /// Tour in pre-order, starting at the root.
    pub best: Vec<usize>,
    pub best_cost: Distance,
    /// A single event: construction time and tour length.
    pub trace: Trace,
    /// The spanning tree the tour was derived from.
    pub tree: SpanningTree,
}

/// MST approximation runner.
pub struct ApproxRunner;

impl ApproxRunner {
    /// Builds the tour, timing it against the real clock.
    pub fn run(matrix: &DistanceMatrix, config: &ApproxConfig) -> Result<ApproxResult> {
        Self::run_with_budget(matrix, config, &Budget::wall_clock(config.cutoff))
    }

    /// Builds the tour. `budget` only supplies the clock for the trace.
    ///
    /// # Errors
    ///
    /// - [`TspError::MissingSeed`] if `config.seed` is `None`
    /// - [`TspError::EmptyInstance`] for an instance without cities
    pub fn run_with_budget<C: Clock>(
        matrix: &DistanceMatrix,
        config: &ApproxConfig,
        budget: &Budget<C>,
    ) -> Result<ApproxResult> {
        config.validate()?;
        let n = matrix.city_count();
        if n == 0 {
            return Err(TspError::EmptyInstance);
        }

        let mut rng = create_rng(config.seed.unwrap_or_default());
        let root = rng.random_range(0..n);
        log::info!("mst-approx: {n} cities, root {root}");

        let tree = prim(matrix, root);
        let best = tree.preorder();
        let best_cost = tour_length(matrix, &best);

        let mut trace = Trace::new();
        trace.record(budget.elapsed_secs(), best_cost);
        log::info!(
            "mst-approx: tree weight {}, tour cost {best_cost}",
            tree.weight()
        );

        Ok(ApproxResult {
            best,
            best_cost,
            trace,
            tree,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::test_utils::{brute_force_optimum, random_matrix, unit_square};
    use crate::tour::is_permutation;
    use proptest::prelude::*;
    use std::time::Duration;

    fn run(m: &DistanceMatrix, seed: u64) -> ApproxResult {
        let budget = Budget::new(ManualClock::new(), Duration::from_secs(1));
        ApproxRunner::run_with_budget(m, &ApproxConfig::default().with_seed(seed), &budget)
            .unwrap()
    }

    #[test]
    fn test_unit_square() {
        let m = unit_square();
        let result = run(&m, 0);
        assert!(is_permutation(&result.best, 4));
        assert_eq!(result.best_cost, 4);
        assert_eq!(result.tree.weight(), 3);
        assert_eq!(result.trace.len(), 1);
        assert_eq!(result.trace.last().unwrap().objective, 4);
    }

    #[test]
    fn test_same_seed_same_tour() {
        let m = random_matrix(40, 9);
        let a = run(&m, 123);
        let b = run(&m, 123);
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.tree, b.tree);
    }

    #[test]
    fn test_root_depends_on_seed() {
        let m = random_matrix(50, 4);
        let roots: std::collections::HashSet<usize> =
            (0..20).map(|seed| run(&m, seed).tree.root).collect();
        assert!(roots.len() > 1);
    }

    #[test]
    fn test_missing_seed_is_rejected() {
        let m = random_matrix(5, 0);
        let err = ApproxRunner::run(&m, &ApproxConfig::default()).unwrap_err();
        assert!(matches!(err, TspError::MissingSeed { .. }));
    }

    #[test]
    fn test_empty_instance() {
        let m = DistanceMatrix::from_cities(&[]);
        let err = ApproxRunner::run(&m, &ApproxConfig::default().with_seed(1)).unwrap_err();
        assert!(matches!(err, TspError::EmptyInstance));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_within_twice_optimal(instance in 0u64..10_000, seed in 0u64..1000, n in 3usize..9) {
            let m = random_matrix(n, instance);
            let result = run(&m, seed);
            prop_assert!(is_permutation(&result.best, n));
            prop_assert_eq!(result.best[0], result.tree.root);
            prop_assert_eq!(tour_length(&m, &result.best), result.best_cost);
            let optimum = brute_force_optimum(&m);
            prop_assert!(result.tree.weight() <= optimum);
            prop_assert!(result.best_cost <= 2 * optimum);
        }
    }
}
