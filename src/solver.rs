//! Algorithm selection and the common result type.
//!
//! [`solve`] is the single entry point used by the binary: it checks the
//! options, resolves degenerate instances without running a solver, and
//! otherwise dispatches to the selected runner and maps its result to a
//! [`Solution`].

use crate::approx::{ApproxConfig, ApproxRunner};
use crate::bnb::{BnbConfig, BnbRunner, BnbStatus, BoundRule};
use crate::clock::{Budget, Clock};
use crate::error::{Result, TspError};
use crate::hill::{HillClimbConfig, HillClimbRunner};
use crate::matrix::{Distance, DistanceMatrix};
use crate::sa::{SaConfig, SaRunner};
use crate::tour::tour_length;
use crate::trace::Trace;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The four solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Exact Branch-and-Bound (`BnB`).
    BranchAndBound,
    /// MST 2-approximation (`Approx`).
    Approximation,
    /// Hill climbing with restarts (`LS1`).
    HillClimbing,
    /// Simulated annealing (`LS2`).
    SimulatedAnnealing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BranchAndBound,
        Algorithm::Approximation,
        Algorithm::HillClimbing,
        Algorithm::SimulatedAnnealing,
    ];

    /// Short name, as accepted on the command line and used in file names.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BranchAndBound => "BnB",
            Algorithm::Approximation => "Approx",
            Algorithm::HillClimbing => "LS1",
            Algorithm::SimulatedAnnealing => "LS2",
        }
    }

    /// Whether the algorithm is randomized and needs a seed.
    pub fn requires_seed(self) -> bool {
        !matches!(self, Algorithm::BranchAndBound)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = TspError;

    /// Parses a short name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TspError::UnknownAlgorithm(s.to_string()))
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// A one-shot construction finished.
    Completed,
    /// The search space was exhausted before the cutoff.
    Exhausted,
    /// The cutoff stopped the search.
    Timeout,
    /// The cancel flag stopped the search.
    Cancelled,
    /// The instance was degenerate and solved without a solver.
    Trivial,
}

/// What to run and for how long.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::solver::{Algorithm, SolveOptions};
///
/// let options = SolveOptions::new(Algorithm::SimulatedAnnealing, Duration::from_secs(10))
///     .with_seed(42);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolveOptions {
    pub algorithm: Algorithm,
    pub cutoff: Duration,
    /// Required by every algorithm except `BnB`, which ignores it.
    pub seed: Option<u64>,
    /// Bound rule for `BnB`.
    pub bound: BoundRule,
    /// Temperature schedule for `LS2`. Its `cutoff` and `seed` are replaced
    /// by the ones above.
    pub annealing: SaConfig,
}

impl SolveOptions {
    pub fn new(algorithm: Algorithm, cutoff: Duration) -> Self {
        Self {
            algorithm,
            cutoff,
            seed: None,
            bound: BoundRule::default(),
            annealing: SaConfig::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_bound_rule(mut self, bound: BoundRule) -> Self {
        self.bound = bound;
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    /// Checks the options before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.algorithm.requires_seed() && self.seed.is_none() {
            return Err(TspError::MissingSeed {
                algorithm: self.algorithm.name(),
            });
        }
        if self.algorithm == Algorithm::SimulatedAnnealing {
            self.annealing_config().validate()?;
        }
        Ok(())
    }

    fn bnb_config(&self) -> BnbConfig {
        BnbConfig::default()
            .with_cutoff(self.cutoff)
            .with_bound_rule(self.bound)
    }

    fn approx_config(&self) -> ApproxConfig {
        let config = ApproxConfig::default().with_cutoff(self.cutoff);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn hill_config(&self) -> HillClimbConfig {
        let config = HillClimbConfig::default().with_cutoff(self.cutoff);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn annealing_config(&self) -> SaConfig {
        let mut config = self.annealing.clone().with_cutoff(self.cutoff);
        config.seed = self.seed;
        config
    }
}

/// The best tour a run produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub algorithm: Algorithm,
    /// Zero-based tour.
    pub tour: Vec<usize>,
    /// Length of the closed tour.
    pub cost: Distance,
    /// Improvements over time; the last event carries `cost`.
    pub trace: Trace,
    pub status: SolveStatus,
}

/// Solves `matrix` with the selected algorithm against the real clock.
pub fn solve(matrix: &DistanceMatrix, options: &SolveOptions) -> Result<Solution> {
    solve_with_budget(matrix, options, &Budget::wall_clock(options.cutoff))
}

/// Solves `matrix` under an explicit budget.
///
/// # Errors
///
/// - [`TspError::MissingSeed`] or [`TspError::InvalidConfig`] from
///   [`SolveOptions::validate`]
/// - [`TspError::EmptyInstance`] for an instance without cities
/// - [`TspError::NoSolutionWithinCutoff`] if `BnB` completed no tour in time
pub fn solve_with_budget<C: Clock>(
    matrix: &DistanceMatrix,
    options: &SolveOptions,
    budget: &Budget<C>,
) -> Result<Solution> {
    options.validate()?;
    let n = matrix.city_count();
    if n == 0 {
        return Err(TspError::EmptyInstance);
    }
    if n <= 2 || matrix.is_all_zero() {
        log::info!("{}: degenerate instance of {n} cities", options.algorithm);
        return Ok(trivial(matrix, options.algorithm));
    }

    let algorithm = options.algorithm;
    let solution = match algorithm {
        Algorithm::BranchAndBound => {
            let result = BnbRunner::run_with_budget(matrix, &options.bnb_config(), budget)?;
            let status = match result.status {
                BnbStatus::Exhausted => SolveStatus::Exhausted,
                BnbStatus::Timeout => SolveStatus::Timeout,
                BnbStatus::Cancelled => SolveStatus::Cancelled,
            };
            Solution {
                algorithm,
                tour: result.best,
                cost: result.best_cost,
                trace: result.trace,
                status,
            }
        }
        Algorithm::Approximation => {
            let result = ApproxRunner::run_with_budget(matrix, &options.approx_config(), budget)?;
            Solution {
                algorithm,
                tour: result.best,
                cost: result.best_cost,
                trace: result.trace,
                status: SolveStatus::Completed,
            }
        }
        Algorithm::HillClimbing => {
            let result = HillClimbRunner::run_with_budget(matrix, &options.hill_config(), budget)?;
            let status = if result.exhausted {
                SolveStatus::Exhausted
            } else {
                stopped(result.cancelled)
            };
            Solution {
                algorithm,
                tour: result.best,
                cost: result.best_cost,
                trace: result.trace,
                status,
            }
        }
        Algorithm::SimulatedAnnealing => {
            let result =
                SaRunner::run_tsp_with_budget(matrix, &options.annealing_config(), budget)?;
            Solution {
                algorithm,
                tour: result.best,
                cost: result.best_energy,
                trace: result.trace,
                status: stopped(result.cancelled),
            }
        }
    };
    Ok(solution)
}

fn stopped(cancelled: bool) -> SolveStatus {
    if cancelled {
        SolveStatus::Cancelled
    } else {
        SolveStatus::Timeout
    }
}

/// Identity tour for instances where every tour has the same length.
fn trivial(matrix: &DistanceMatrix, algorithm: Algorithm) -> Solution {
    let tour: Vec<usize> = (0..matrix.city_count()).collect();
    let cost = tour_length(matrix, &tour);
    let mut trace = Trace::new();
    trace.record(0.0, cost);
    Solution {
        algorithm,
        tour,
        cost,
        trace,
        status: SolveStatus::Trivial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::matrix::City;
    use crate::test_utils::{brute_force_optimum, random_matrix};
    use crate::tour::is_permutation;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn ticking_budget() -> Budget<ManualClock> {
        Budget::new(
            ManualClock::ticking(Duration::from_micros(1)),
            Duration::from_millis(20),
        )
    }

    fn options(algorithm: Algorithm) -> SolveOptions {
        SolveOptions::new(algorithm, Duration::from_secs(1)).with_seed(17)
    }

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
        assert_eq!("ls2".parse::<Algorithm>().unwrap(), Algorithm::SimulatedAnnealing);
        assert!(matches!(
            "LS3".parse::<Algorithm>(),
            Err(TspError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_requires_seed() {
        assert!(!Algorithm::BranchAndBound.requires_seed());
        assert!(Algorithm::Approximation.requires_seed());
        assert!(Algorithm::HillClimbing.requires_seed());
        assert!(Algorithm::SimulatedAnnealing.requires_seed());
    }

    #[test]
    fn test_missing_seed_rejected_before_running() {
        let m = random_matrix(6, 0);
        for algorithm in [
            Algorithm::Approximation,
            Algorithm::HillClimbing,
            Algorithm::SimulatedAnnealing,
        ] {
            let opts = SolveOptions::new(algorithm, Duration::from_secs(1));
            let err = solve_with_budget(&m, &opts, &ticking_budget()).unwrap_err();
            assert!(matches!(err, TspError::MissingSeed { .. }), "{algorithm}");
        }
        let opts = SolveOptions::new(Algorithm::BranchAndBound, Duration::from_secs(1));
        assert!(solve_with_budget(&m, &opts, &ticking_budget()).is_ok());
    }

    #[test]
    fn test_bad_annealing_parameters_rejected() {
        let m = random_matrix(6, 0);
        let opts = options(Algorithm::SimulatedAnnealing)
            .with_annealing(SaConfig::default().with_t_min(-1.0));
        assert!(matches!(
            solve_with_budget(&m, &opts, &ticking_budget()),
            Err(TspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_every_algorithm_returns_a_valid_tour() {
        let m = random_matrix(9, 4);
        let optimum = brute_force_optimum(&m);
        for algorithm in Algorithm::ALL {
            let solution = solve_with_budget(&m, &options(algorithm), &ticking_budget()).unwrap();
            assert_eq!(solution.algorithm, algorithm);
            assert!(is_permutation(&solution.tour, 9), "{algorithm}");
            assert_eq!(tour_length(&m, &solution.tour), solution.cost, "{algorithm}");
            assert_eq!(solution.trace.last().unwrap().objective, solution.cost);
            assert!(solution.cost >= optimum);
        }
    }

    #[test]
    fn test_status_mapping() {
        let m = random_matrix(7, 3);
        let approx = solve_with_budget(&m, &options(Algorithm::Approximation), &ticking_budget());
        assert_eq!(approx.unwrap().status, SolveStatus::Completed);

        let opts = options(Algorithm::BranchAndBound).with_bound_rule(BoundRule::Admissible);
        let budget = Budget::new(ManualClock::new(), Duration::from_secs(1));
        let bnb = solve_with_budget(&m, &opts, &budget).unwrap();
        assert_eq!(bnb.status, SolveStatus::Exhausted);
        assert_eq!(bnb.cost, brute_force_optimum(&m));

        let annealing =
            solve_with_budget(&m, &options(Algorithm::SimulatedAnnealing), &ticking_budget());
        assert_eq!(annealing.unwrap().status, SolveStatus::Timeout);

        let cancel = Arc::new(AtomicBool::new(true));
        let budget = Budget::new(ManualClock::new(), Duration::from_secs(1)).with_cancel(cancel);
        let hill = solve_with_budget(&m, &options(Algorithm::HillClimbing), &budget).unwrap();
        assert_eq!(hill.status, SolveStatus::Cancelled);
    }

    #[test]
    fn test_degenerate_instances_are_trivial() {
        let two = DistanceMatrix::from_cities(&[City::new(1, 0.0, 0.0), City::new(2, 3.0, 4.0)]);
        let stacked = DistanceMatrix::from_cities(&[City::new(1, 2.0, 2.0); 5]);
        for algorithm in Algorithm::ALL {
            let solution = solve_with_budget(&two, &options(algorithm), &ticking_budget()).unwrap();
            assert_eq!(solution.status, SolveStatus::Trivial);
            assert_eq!(solution.tour, vec![0, 1]);
            assert_eq!(solution.cost, 10);
            assert_eq!(solution.trace.events()[0].elapsed, 0.0);

            let solution =
                solve_with_budget(&stacked, &options(algorithm), &ticking_budget()).unwrap();
            assert_eq!(solution.status, SolveStatus::Trivial);
            assert_eq!(solution.cost, 0);
            assert!(is_permutation(&solution.tour, 5));
        }
    }

    #[test]
    fn test_empty_instance() {
        let m = DistanceMatrix::from_cities(&[]);
        let err = solve_with_budget(&m, &options(Algorithm::HillClimbing), &ticking_budget());
        assert!(matches!(err, Err(TspError::EmptyInstance)));
    }

    #[test]
    fn test_bnb_without_solution_is_an_error() {
        let m = random_matrix(8, 1);
        let budget = Budget::new(ManualClock::new(), Duration::ZERO);
        let err = solve_with_budget(&m, &options(Algorithm::BranchAndBound), &budget).unwrap_err();
        assert!(matches!(err, TspError::NoSolutionWithinCutoff { .. }));
    }
}
