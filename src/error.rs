//! Error types shared by every solver.
//!
//! Configuration problems and degenerate instances are reported before a
//! solver enters its timed loop. Once inside the loop nothing fails; the only
//! late error is [`TspError::NoSolutionWithinCutoff`], raised by the exact
//! search when the budget ran out before a single tour was completed.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by instance loading, configuration, and the solvers.
#[derive(Error, Debug)]
pub enum TspError {
    /// A solver or annealing parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A randomized algorithm was invoked without a seed.
    #[error("algorithm {algorithm} requires a random seed")]
    MissingSeed { algorithm: &'static str },

    /// The algorithm name is not one of `BnB`, `Approx`, `LS1`, `LS2`.
    #[error("unknown algorithm '{0}', expected one of BnB, Approx, LS1, LS2")]
    UnknownAlgorithm(String),

    /// Malformed instance file.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The instance contains no cities.
    #[error("instance contains no cities")]
    EmptyInstance,

    /// The instance is too small for the requested solver.
    #[error("instance has {found} cities, solver requires at least {required}")]
    TooFewCities { found: usize, required: usize },

    /// The cutoff expired before any complete tour was evaluated.
    #[error("no feasible solution found within cutoff of {:.2}s", .cutoff.as_secs_f64())]
    NoSolutionWithinCutoff { cutoff: Duration },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_readable() {
        let err = TspError::MissingSeed { algorithm: "LS2" };
        assert_eq!(err.to_string(), "algorithm LS2 requires a random seed");

        let err = TspError::NoSolutionWithinCutoff {
            cutoff: Duration::from_millis(1500),
        };
        assert_eq!(
            err.to_string(),
            "no feasible solution found within cutoff of 1.50s"
        );

        let err = TspError::Parse {
            line: 7,
            message: "expected 3 fields".into(),
        };
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(TspError::Io(_))));
    }
}
