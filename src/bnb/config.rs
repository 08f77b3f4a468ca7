//! Branch-and-Bound configuration.

use std::time::Duration;

/// How the remaining-problem bound is tightened when an edge is fixed.
///
/// Both rules start from half the sum, over all cities, of the nearest plus
/// second-nearest neighbor distance. They differ in what they subtract when
/// the edge `(u, i)` is added to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundRule {
    /// Subtract half of `d(u, 1st(u))` (first edge out of the root) or
    /// `d(u, 2nd(u))` (any later edge), plus half of `d(i, 1st(i))`.
    ///
    /// Fast and usually tight, but it may overestimate when a city is entered
    /// through an edge other than its nearest one, so an exhausted search is
    /// not a proof of optimality.
    #[default]
    HalfSum,
    /// Track, for every city with one fixed edge, the cheapest edge it could
    /// still use, and subtract exactly what the fixed edge replaces. Never
    /// overestimates; an exhausted search is optimal.
    Admissible,
}

/// Configuration for the exact search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::bnb::{BnbConfig, BoundRule};
///
/// let config = BnbConfig::default()
///     .with_cutoff(Duration::from_secs(5))
///     .with_bound_rule(BoundRule::Admissible);
/// assert_eq!(config.cutoff, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct BnbConfig {
    /// Wall-clock budget. The search stops at the first node entered after
    /// this much time has passed.
    pub cutoff: Duration,
    /// Bound tightening rule.
    pub bound: BoundRule,
}

impl Default for BnbConfig {
    fn default() -> Self {
        Self {
            cutoff: Duration::from_secs(600),
            bound: BoundRule::default(),
        }
    }
}

impl BnbConfig {
    pub fn with_cutoff(mut self, cutoff: Duration) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_bound_rule(mut self, bound: BoundRule) -> Self {
        self.bound = bound;
        self
    }
}
