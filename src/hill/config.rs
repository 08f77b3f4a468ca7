//! Hill climbing configuration.

use crate::error::{Result, TspError};
use std::time::Duration;

/// Configuration parameters for hill climbing with random restarts.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::hill::HillClimbConfig;
///
/// let config = HillClimbConfig::default()
///     .with_cutoff(Duration::from_secs(5))
///     .with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct HillClimbConfig {
    /// Wall-clock budget for the whole run.
    pub cutoff: Duration,
    /// Seed for restart points and neighbor order. Required.
    pub seed: Option<u64>,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            cutoff: Duration::from_secs(600),
            seed: None,
        }
    }
}

impl HillClimbConfig {
    pub fn with_cutoff(mut self, cutoff: Duration) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.seed.is_none() {
            return Err(TspError::MissingSeed { algorithm: "LS1" });
        }
        Ok(())
    }
}
