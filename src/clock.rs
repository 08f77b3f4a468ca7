//! Time sources and the cutoff budget.
//!
//! Solvers never call `Instant::now()` directly. They poll a [`Budget`], which
//! combines an injected [`Clock`], the wall-clock cutoff and an optional
//! cooperative cancel flag. Tests substitute [`ManualClock`] to make
//! time-bounded runs deterministic.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A monotonic source of elapsed time since the solver started.
pub trait Clock {
    /// Time elapsed since the clock was started.
    fn elapsed(&self) -> Duration;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Starts the clock now.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Deterministic clock for tests.
///
/// Time only moves when [`advance`](ManualClock::advance) is called, or, if
/// built with [`ticking`](ManualClock::ticking), by a fixed amount on every
/// read. A ticking clock turns "cutoff after T seconds" into "stop after
/// T / tick polls", which makes timed runs reproducible.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    tick: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock that advances by `tick` every time it is read.
    pub fn ticking(tick: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            tick,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Current reading without ticking.
    pub fn peek(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.tick);
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

/// Stop condition shared by all solvers.
pub struct Budget<C: Clock> {
    clock: C,
    cutoff: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget<SystemClock> {
    /// Real-time budget starting now.
    pub fn wall_clock(cutoff: Duration) -> Self {
        Self::new(SystemClock::start(), cutoff)
    }
}

impl<C: Clock> Budget<C> {
    pub fn new(clock: C, cutoff: Duration) -> Self {
        Self {
            clock,
            cutoff,
            cancel: None,
        }
    }

    /// Attaches a cancel flag. Setting it to `true` stops the solver at its
    /// next poll; the best result found so far is still returned.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    #[inline]
    pub fn cutoff(&self) -> Duration {
        self.cutoff
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Elapsed seconds, as recorded in trace events.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// `true` once the cutoff is reached or the cancel flag is set.
    #[inline]
    pub fn expired(&self) -> bool {
        self.is_cancelled() || self.clock.elapsed() >= self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_only_moves_when_advanced() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.elapsed(), Duration::ZERO);
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_ticking_clock() {
        let clock = ManualClock::ticking(Duration::from_millis(10));
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert_eq!(clock.elapsed(), Duration::from_millis(10));
        assert_eq!(clock.peek(), Duration::from_millis(20));
    }

    #[test]
    fn test_budget_expires_at_cutoff() {
        let clock = ManualClock::new();
        let budget = Budget::new(&clock, Duration::from_secs(1));
        assert!(!budget.expired());
        clock.advance(Duration::from_millis(999));
        assert!(!budget.expired());
        clock.advance(Duration::from_millis(1));
        assert!(budget.expired());
    }

    #[test]
    fn test_budget_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = Budget::new(ManualClock::new(), Duration::from_secs(60))
            .with_cancel(Arc::clone(&flag));
        assert!(!budget.expired());
        flag.store(true, Ordering::Relaxed);
        assert!(budget.is_cancelled());
        assert!(budget.expired());
    }

    #[test]
    fn test_wall_clock_zero_cutoff_is_expired() {
        assert!(Budget::wall_clock(Duration::ZERO).expired());
    }
}
