//! SA execution loop.
//!
//! # Algorithm
//!
//! Until the budget expires:
//!
//! 1. `step += 1`, `T = schedule(step)`
//! 2. Apply a random move and obtain `dE`.
//! 3. Accept if `dE <= 0`. Otherwise draw `r` uniform in `[0, 1)` and accept
//!    iff `r <= exp(-dE / T)`.
//! 4. On rejection restore the last accepted state. On acceptance keep it,
//!    and if its energy is strictly below the best, copy it as the new best
//!    and trace it.
//!
//! The best state, not the current one, is returned.

use super::config::SaConfig;
use super::types::{AnnealingProblem, TspAnnealing};
use crate::clock::{Budget, Clock};
use crate::error::Result;
use crate::matrix::{Distance, DistanceMatrix};
use crate::random::create_rng;
use crate::tour::rotate_to_front;
use crate::trace::Trace;
use rand::Rng;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best state found.
    pub best: S,

    /// Energy of the best state.
    pub best_energy: Distance,

    /// Improvements of the best energy over time. The first event is the
    /// initial state.
    pub trace: Trace,

    /// Number of annealing steps (trials) executed.
    pub steps: u64,

    /// Temperature at the last step.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: u64,

    /// Number of accepted moves that lowered the energy.
    pub improving_moves: u64,

    /// Whether cancelled externally.
    pub cancelled: bool,
}

/// Metropolis criterion.
///
/// Accepts every move with `delta <= 0`. A move with `delta > 0` is accepted
/// iff `draw <= exp(-delta / temperature)`, where `draw` is uniform in
/// `[0, 1)`. A temperature that has underflowed to zero rejects every uphill
/// move.
#[inline]
pub fn metropolis_accepts(delta: i64, temperature: f64, draw: f64) -> bool {
    if delta <= 0 {
        return true;
    }
    if temperature <= 0.0 {
        return false;
    }
    draw <= (-(delta as f64) / temperature).exp()
}

/// Per-window counters, reset every `steps / updates` steps.
#[derive(Debug, Default)]
struct Window {
    trials: u64,
    accepts: u64,
    improves: u64,
}

/// Executes simulated annealing.
pub struct SaRunner;

impl SaRunner {
    /// Anneals a TSP tour against the real clock.
    pub fn run_tsp(matrix: &DistanceMatrix, config: &SaConfig) -> Result<SaResult<Vec<usize>>> {
        Self::run_tsp_with_budget(matrix, config, &Budget::wall_clock(config.cutoff))
    }

    /// Anneals a TSP tour. The returned tour is rotated to start at city 0.
    ///
    /// # Errors
    ///
    /// - [`TspError::InvalidConfig`](crate::error::TspError::InvalidConfig)
    ///   or [`TspError::MissingSeed`](crate::error::TspError::MissingSeed)
    ///   from [`SaConfig::validate`]
    /// - [`TspError::EmptyInstance`](crate::error::TspError::EmptyInstance)
    ///   for an instance without cities
    pub fn run_tsp_with_budget<C: Clock>(
        matrix: &DistanceMatrix,
        config: &SaConfig,
        budget: &Budget<C>,
    ) -> Result<SaResult<Vec<usize>>> {
        let problem = TspAnnealing::new(matrix)?;
        let mut result = Self::run_with_budget(&problem, config, budget)?;
        rotate_to_front(&mut result.best, 0);
        Ok(result)
    }

    /// Runs SA on any [`AnnealingProblem`] against the real clock.
    pub fn run<P: AnnealingProblem>(problem: &P, config: &SaConfig) -> Result<SaResult<P::State>> {
        Self::run_with_budget(problem, config, &Budget::wall_clock(config.cutoff))
    }

    /// Runs SA until `budget` expires.
    ///
    /// The initial state is always evaluated, so a result exists even for a
    /// zero cutoff.
    pub fn run_with_budget<P: AnnealingProblem, C: Clock>(
        problem: &P,
        config: &SaConfig,
        budget: &Budget<C>,
    ) -> Result<SaResult<P::State>> {
        config.validate()?;
        let schedule = config.schedule();
        let mut rng = create_rng(config.seed.unwrap_or_default());

        let mut current = problem.initial_state(&mut rng);
        let mut energy = problem.energy(&current);
        let mut previous = current.clone();
        let mut best = current.clone();
        let mut best_energy = energy;

        let mut trace = Trace::new();
        trace.record(budget.elapsed_secs(), energy);
        log::info!(
            "annealing: initial energy {energy}, T {} -> {} over {} steps",
            config.t_max,
            config.t_min,
            config.steps
        );

        let wavelength = (config.updates > 1).then(|| config.steps as f64 / config.updates as f64);
        let mut window = Window::default();

        let mut step = 0u64;
        let mut temperature = config.t_max;
        let mut accepted_moves = 0u64;
        let mut improving_moves = 0u64;

        while !budget.expired() {
            step += 1;
            temperature = schedule.temperature(step);

            let delta = match problem.propose_move(&mut current, &mut rng) {
                Some(delta) => delta,
                None => problem.energy(&current) as i64 - energy as i64,
            };
            window.trials += 1;

            // Downhill moves short-circuit, so the draw is only taken uphill.
            if delta <= 0 || metropolis_accepts(delta, temperature, rng.random()) {
                energy = energy.saturating_add_signed(delta);
                accepted_moves += 1;
                window.accepts += 1;
                if delta < 0 {
                    improving_moves += 1;
                    window.improves += 1;
                }
                previous.clone_from(&current);

                if energy < best_energy {
                    best.clone_from(&current);
                    best_energy = energy;
                    trace.record(budget.elapsed_secs(), energy);
                }
            } else {
                current.clone_from(&previous);
            }

            if let Some(wavelength) = wavelength {
                if (step as f64 / wavelength).floor() > ((step - 1) as f64 / wavelength).floor() {
                    log::debug!(
                        "annealing: step {step}, T {temperature:.4}, energy {energy}, \
                         best {best_energy}, accepted {}/{} improved {}",
                        window.accepts,
                        window.trials,
                        window.improves
                    );
                    window = Window::default();
                }
            }
        }

        let cancelled = budget.is_cancelled();
        log::info!(
            "annealing: best {best_energy} after {step} steps ({accepted_moves} accepted), \
             final T {temperature:.4}"
        );

        Ok(SaResult {
            best,
            best_energy,
            trace,
            steps: step,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
        })
    }
}
