//! MST approximation configuration.

use crate::error::{Result, TspError};
use std::time::Duration;

/// Configuration for the MST 2-approximation.
///
/// The construction always runs to completion; `cutoff` is carried only so
/// it can be reported alongside the result.
#[derive(Debug, Clone)]
pub struct ApproxConfig {
    /// Seed for the root choice. Required.
    pub seed: Option<u64>,
    pub cutoff: Duration,
}

impl Default for ApproxConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cutoff: Duration::from_secs(600),
        }
    }
}

impl ApproxConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cutoff(mut self, cutoff: Duration) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.seed.is_none() {
            return Err(TspError::MissingSeed {
                algorithm: "Approx",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_required() {
        assert!(matches!(
            ApproxConfig::default().validate(),
            Err(TspError::MissingSeed { .. })
        ));
        assert!(ApproxConfig::default().with_seed(1).validate().is_ok());
    }
}
