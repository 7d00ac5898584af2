//! Cooldown tracking for scale actions.
//!
//! One timestamp per direction, overwritten on each attempt. A direction
//! becomes eligible again only once *strictly more* than its cooldown has
//! elapsed, so the boundary instant itself still holds.

use std::time::Duration;

use tokio::time::Instant;

/// Which directions are currently allowed to act.
///
/// Computed by the poll loop and handed to [`crate::decision::evaluate`],
/// keeping the decision function pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownEligibility {
    pub up: bool,
    pub down: bool,
}

/// Last-attempt timestamps for both scale directions.
///
/// Owned by the poll loop; both timestamps start at loop start, so neither
/// direction can act until a full cooldown has passed.
#[derive(Debug, Clone, Copy)]
pub struct CooldownTracker {
    last_scale_up: Instant,
    last_scale_down: Instant,
}

impl CooldownTracker {
    /// Create a tracker with both timestamps set to `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            last_scale_up: now,
            last_scale_down: now,
        }
    }

    /// True iff strictly more than `cooldown` has passed since the last
    /// scale-up attempt.
    pub fn can_scale_up(&self, now: Instant, cooldown: Duration) -> bool {
        now.saturating_duration_since(self.last_scale_up) > cooldown
    }

    /// True iff strictly more than `cooldown` has passed since the last
    /// scale-down attempt.
    pub fn can_scale_down(&self, now: Instant, cooldown: Duration) -> bool {
        now.saturating_duration_since(self.last_scale_down) > cooldown
    }

    /// Record a scale-up attempt.
    pub fn record_scale_up(&mut self, now: Instant) {
        self.last_scale_up = now;
    }

    /// Record a scale-down attempt.
    pub fn record_scale_down(&mut self, now: Instant) {
        self.last_scale_down = now;
    }

    /// Eligibility of both directions at `now`.
    pub fn eligibility(
        &self,
        now: Instant,
        up_cooldown: Duration,
        down_cooldown: Duration,
    ) -> CooldownEligibility {
        CooldownEligibility {
            up: self.can_scale_up(now, up_cooldown),
            down: self.can_scale_down(now, down_cooldown),
        }
    }
}
