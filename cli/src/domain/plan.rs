//! Rollover step schedule.

use std::time::Duration;

/// Derived schedule for a single rollover run. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverPlan {
    /// One step per source instance.
    pub total_steps: u32,
    /// Pause between consecutive steps.
    pub step_interval: Duration,
}

impl RolloverPlan {
    /// Spread `duration` evenly over `source_requested` steps.
    ///
    /// The interval uses integer nanosecond division; the remainder is
    /// dropped, so the run finishes at most `total_steps - 1` ns early.
    #[must_use]
    pub fn new(source_requested: u32, duration: Duration) -> Self {
        let step_interval = if source_requested == 0 {
            Duration::ZERO
        } else {
            let per_step = duration.as_nanos() / u128::from(source_requested);
            // duration came from a 64-bit nanosecond literal
            Duration::from_nanos(u64::try_from(per_step).unwrap_or(u64::MAX))
        };
        Self {
            total_steps: source_requested,
            step_interval,
        }
    }

    /// `true` when the source has nothing to hand over.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.total_steps == 0
    }
}
