// SPDX-License-Identifier: MIT OR Apache-2.0
//! Hover tracking with a debounced auto-clear.
//!
//! Pointer-leave events can be missed, which would leave a component stuck
//! in its hovered visual state. The state therefore carries a deadline:
//! every qualifying pointer activity pushes it out, and once it passes the
//! hovered flag is cleared regardless of whether a leave event ever arrived.

use std::time::{Duration, Instant};

/// How long hover survives without qualifying pointer activity
pub const HOVER_CLEAR_TIMEOUT: Duration = Duration::from_millis(7500);

/// Local hover state with a cancellable auto-clear deadline.
///
/// Callers pass the current time in, which keeps the state a plain value:
/// no timer thread, nothing to cancel beyond dropping it.
#[derive(Debug, Default)]
pub struct HoverState {
    hovered: bool,
    deadline: Option<Instant>,
}

impl HoverState {
    /// Create a non-hovered state
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered the component
    pub fn pointer_enter(&mut self, now: Instant) {
        self.hovered = true;
        self.deadline = Some(now + HOVER_CLEAR_TIMEOUT);
    }

    /// Qualifying pointer activity while inside the component; pushes the
    /// auto-clear deadline out.
    pub fn pointer_activity(&mut self, now: Instant) {
        if self.hovered {
            self.deadline = Some(now + HOVER_CLEAR_TIMEOUT);
        }
    }

    /// Pointer left the component; cancels the pending deadline.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.deadline = None;
    }

    /// Clear hovered if the deadline has passed, then report the flag.
    pub fn poll(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.deadline {
            if now >= deadline {
                self.hovered = false;
                self.deadline = None;
            }
        }
        self.hovered
    }

    /// Current hovered flag, without evaluating the deadline
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_clear_without_leave() {
        let mut hover = HoverState::new();
        let start = Instant::now();
        hover.pointer_enter(start);
        assert!(hover.poll(start + HOVER_CLEAR_TIMEOUT - Duration::from_millis(1)));
        assert!(!hover.poll(start + HOVER_CLEAR_TIMEOUT));
        assert!(!hover.is_hovered());
    }

    #[test]
    fn test_activity_resets_deadline() {
        let mut hover = HoverState::new();
        let start = Instant::now();
        hover.pointer_enter(start);

        let later = start + Duration::from_secs(5);
        hover.pointer_activity(later);
        // Past the first deadline, inside the refreshed one
        assert!(hover.poll(start + HOVER_CLEAR_TIMEOUT + Duration::from_secs(1)));
        assert!(!hover.poll(later + HOVER_CLEAR_TIMEOUT));
    }

    #[test]
    fn test_leave_cancels_deadline() {
        let mut hover = HoverState::new();
        let start = Instant::now();
        hover.pointer_enter(start);
        hover.pointer_leave();
        assert!(!hover.is_hovered());
        assert!(!hover.poll(start + HOVER_CLEAR_TIMEOUT));
    }

    #[test]
    fn test_activity_while_not_hovered_is_ignored() {
        let mut hover = HoverState::new();
        hover.pointer_activity(Instant::now());
        assert!(!hover.is_hovered());
    }
}
