//! Pointer-hover tracking for the top bar
//!
//! Enter shows the bar at once. Leave arms a hide deadline; the bar only
//! hides when a tick at or past that deadline arrives, and any enter in
//! between disarms it. Times are offsets from an arbitrary clock origin so
//! the same logic runs against `performance.now()` and test clocks.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HoverTracker {
    delay: Duration,
    hovering: bool,
    hide_at: Option<Duration>,
}

impl HoverTracker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hovering: false,
            hide_at: None,
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Time left before a pending hide is due at `now`.
    ///
    /// `None` when no hide is pending. A timer that fires early sees the
    /// shortfall here and waits again.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.hide_at.map(|deadline| deadline.saturating_sub(now))
    }

    /// Pointer entered. Cancels any pending hide.
    pub fn enter(&mut self) {
        self.hovering = true;
        self.hide_at = None;
    }

    /// Pointer left at `now`. Returns how long to wait before calling [`tick`].
    ///
    /// [`tick`]: HoverTracker::tick
    pub fn leave(&mut self, now: Duration) -> Duration {
        self.hide_at = Some(now + self.delay);
        self.delay
    }

    /// Apply a due hide. Returns true if the hover flag changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                let changed = self.hovering;
                self.hovering = false;
                changed
            }
            _ => false,
        }
    }

    /// Drop any pending hide without touching the hover flag
    pub fn cancel(&mut self) {
        self.hide_at = None;
    }
}
