//! Selection state machine - which (group, layer) is picked, and whether a
//! camera drag is in flight.
//!
//! A click during a drag is swallowed, and so is a click within a short
//! cooldown after drag end: the release click of a pan must not register as
//! a selection. Reducer methods take an explicit `now` so the cooldown is
//! testable without sleeping.

use std::time::{Duration, Instant};

/// Delay after drag end before click-to-select re-enables.
pub const DRAG_COOLDOWN: Duration = Duration::from_millis(200);

/// Sentinel for "nothing selected".
pub const NONE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionState {
    pub group_idx: i32,
    pub layer_idx: i32,
    pub is_dragging: bool,
    drag_ended_at: Option<Instant>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            group_idx: NONE,
            layer_idx: NONE,
            is_dragging: false,
            drag_ended_at: None,
        }
    }
}

impl SelectionState {
    pub fn has_selection(&self) -> bool {
        self.group_idx != NONE && self.layer_idx != NONE
    }

    /// True while clicks must be swallowed: mid-drag, or cooling down.
    pub fn suppresses_select(&self, now: Instant) -> bool {
        if self.is_dragging {
            return true;
        }
        match self.drag_ended_at {
            Some(t) => now.duration_since(t) < DRAG_COOLDOWN,
            None => false,
        }
    }

    /// Apply a select. No-op on the selection fields while suppressed.
    pub fn select(&mut self, group: i32, layer: i32, now: Instant) {
        if self.suppresses_select(now) {
            return;
        }
        self.group_idx = group;
        self.layer_idx = layer;
    }

    /// Explicit clear - always allowed.
    pub fn clear(&mut self) {
        self.group_idx = NONE;
        self.layer_idx = NONE;
    }

    pub fn drag_begin(&mut self) {
        self.is_dragging = true;
    }

    pub fn drag_end(&mut self, now: Instant) {
        self.is_dragging = false;
        self.drag_ended_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_select_then_clear() {
        let mut s = SelectionState::default();
        s.select(2, 3, t0());
        assert_eq!((s.group_idx, s.layer_idx), (2, 3));
        assert!(s.has_selection());
        s.clear();
        assert_eq!((s.group_idx, s.layer_idx), (NONE, NONE));
        assert!(!s.has_selection());
    }

    #[test]
    fn test_select_swallowed_while_dragging() {
        let mut s = SelectionState::default();
        s.drag_begin();
        s.select(1, 1, t0());
        assert_eq!((s.group_idx, s.layer_idx), (NONE, NONE));
    }

    #[test]
    fn test_select_swallowed_during_cooldown() {
        let mut s = SelectionState::default();
        let start = t0();
        s.drag_begin();
        s.drag_end(start);
        // Release click right after drag end - swallowed
        s.select(1, 1, start + Duration::from_millis(50));
        assert!(!s.has_selection());
        // After the cooldown elapses selection works again
        s.select(1, 1, start + DRAG_COOLDOWN + Duration::from_millis(1));
        assert_eq!((s.group_idx, s.layer_idx), (1, 1));
    }

    #[test]
    fn test_clear_is_not_suppressed() {
        let mut s = SelectionState::default();
        s.select(4, 5, t0());
        s.drag_begin();
        s.clear();
        assert!(!s.has_selection());
    }

    #[test]
    fn test_reselect_replaces() {
        let mut s = SelectionState::default();
        s.select(0, 0, t0());
        s.select(2, 7, t0());
        assert_eq!((s.group_idx, s.layer_idx), (2, 7));
    }
}
