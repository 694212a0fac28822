use std::time::{Duration, Instant};

/// A one-shot delay owned by whichever screen started it.
///
/// There is no callback: the owner polls [`DelayedTask::is_due`] on every
/// tick. Dropping the owner drops the task, so a completion can never land
/// on a screen that has already been left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedTask {
    started: Instant,
    deadline: Instant,
}

impl DelayedTask {
    pub fn start(now: Instant, delay: Duration) -> Self {
        Self {
            started: now,
            deadline: now + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Fraction of the delay that has elapsed, clamped to `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f64 {
        let total = self.deadline.duration_since(self.started).as_secs_f64();
        if total == 0.0 {
            return 1.0;
        }
        (now.saturating_duration_since(self.started).as_secs_f64() / total).clamp(0.0, 1.0)
    }
}
