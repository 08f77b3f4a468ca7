//! Improvement trace.
//!
//! Every time a solver's global best strictly improves it appends one
//! [`TraceEvent`]. The sequence is time ordered and its objective values
//! strictly decrease.

use crate::matrix::Distance;

/// One improvement of the best known tour.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEvent {
    /// Seconds since the solver started.
    pub elapsed: f64,
    /// Tour length after the improvement.
    pub objective: Distance,
}

/// Append-only list of improvements.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an improvement.
    ///
    /// Callers only record strict improvements; anything else is a bug in the
    /// caller and trips a debug assertion.
    pub fn record(&mut self, elapsed: f64, objective: Distance) {
        if let Some(last) = self.events.last() {
            debug_assert!(
                objective < last.objective,
                "trace must strictly improve: {} after {}",
                objective,
                last.objective
            );
            debug_assert!(elapsed >= last.elapsed, "trace must be time ordered");
        }
        log::debug!("improved to {objective} at {elapsed:.2}s");
        self.events.push(TraceEvent { elapsed, objective });
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&TraceEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
