//! SA configuration and the exponential cooling schedule.

use crate::error::{Result, TspError};
use std::time::Duration;

/// Exponential cooling from `t_max` towards `t_min` over `steps` steps.
///
/// `T(step) = t_max * exp(-ln(t_max / t_min) * step / steps)`, so
/// `T(0) = t_max` and `T(steps) = t_min`. The schedule is not clamped: runs
/// longer than `steps` keep cooling below `t_min`.
#[derive(Debug, Clone, Copy)]
pub struct CoolingSchedule {
    t_max: f64,
    factor: f64,
    steps: f64,
}

impl CoolingSchedule {
    pub fn new(t_max: f64, t_min: f64, steps: u64) -> Self {
        Self {
            t_max,
            factor: -(t_max / t_min).ln(),
            steps: steps as f64,
        }
    }

    /// Temperature at `step`.
    #[inline]
    pub fn temperature(&self, step: u64) -> f64 {
        self.t_max * (self.factor * step as f64 / self.steps).exp()
    }
}

/// Configuration for simulated annealing.
///
/// The loop is bounded by `cutoff`; `steps` only shapes the cooling curve.
///
/// # Examples
///
/// ```
/// use u_tsp::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_t_max(1000.0)
///     .with_t_min(0.5)
///     .with_steps(20_000)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Starting temperature.
    pub t_max: f64,

    /// Temperature reached after `steps` steps. Must be positive.
    pub t_min: f64,

    /// Planned length of the schedule.
    pub steps: u64,

    /// Number of statistics windows per `steps`. Trial, acceptance and
    /// improvement counts are logged and reset at every window boundary.
    /// 0 or 1 disables the windows.
    pub updates: u64,

    /// Wall-clock budget.
    pub cutoff: Duration,

    /// Random seed. Required.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            t_max: 250_000.0,
            t_min: 0.25,
            steps: 500_000,
            updates: 100,
            cutoff: Duration::from_secs(600),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_t_max(mut self, t: f64) -> Self {
        self.t_max = t;
        self
    }

    pub fn with_t_min(mut self, t: f64) -> Self {
        self.t_min = t;
        self
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_updates(mut self, updates: u64) -> Self {
        self.updates = updates;
        self
    }

    pub fn with_cutoff(mut self, cutoff: Duration) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The cooling schedule these parameters describe.
    pub fn schedule(&self) -> CoolingSchedule {
        CoolingSchedule::new(self.t_max, self.t_min, self.steps)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.t_min.is_nan() || self.t_min <= 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "t_min must be positive, got {}",
                self.t_min
            )));
        }
        if !self.t_max.is_finite() || self.t_max <= self.t_min {
            return Err(TspError::InvalidConfig(format!(
                "t_max must be finite and greater than t_min, got {} <= {}",
                self.t_max, self.t_min
            )));
        }
        if self.steps == 0 {
            return Err(TspError::InvalidConfig("steps must be positive".into()));
        }
        if self.seed.is_none() {
            return Err(TspError::MissingSeed { algorithm: "LS2" });
        }
        Ok(())
    }
}
