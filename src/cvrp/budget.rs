//! Wall-clock budget for the improvement phase.

use std::time::{Duration, Instant};

/// A wall-clock limit started when the budget is created.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use route_optimizer::cvrp::TimeBudget;
///
/// let budget = TimeBudget::start(Duration::from_secs(10));
/// assert!(!budget.is_exhausted());
/// assert!(budget.remaining() <= Duration::from_secs(10));
///
/// let none = TimeBudget::start(Duration::ZERO);
/// assert!(none.is_exhausted());
/// assert_eq!(none.estimate(), 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeBudget {
    start: Instant,
    limit: Duration,
}

impl TimeBudget {
    /// Starts the clock now.
    pub fn start(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// The full allowance.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left, zero once the limit has passed.
    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.elapsed())
    }

    /// `true` once the elapsed time reaches the limit; a zero limit is
    /// exhausted from the start.
    pub fn is_exhausted(&self) -> bool {
        self.elapsed() >= self.limit
    }

    /// Fraction of the budget spent, in `[0, 1]`; reported in the
    /// improvement-round logs.
    pub fn estimate(&self) -> f64 {
        if self.limit.is_zero() {
            return 1.0;
        }
        (self.elapsed().as_secs_f64() / self.limit.as_secs_f64()).min(1.0)
    }
}
