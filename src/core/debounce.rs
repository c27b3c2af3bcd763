//! Request debounce - collapses rapid repeated triggers into the last one.
//!
//! Repeated file drops while a previous drop is still settling would each
//! fire an upload; instead every schedule resets a quiet-period timer and
//! only the last request goes out once the period elapses. Polled from the
//! frame loop via `tick()`.

use std::time::{Duration, Instant};

use log::trace;

/// Default quiet period before a scheduled request fires.
pub const DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEBOUNCE_MS),
            pending: None,
        }
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            pending: None,
        }
    }

    /// Schedule a payload. A pending one is replaced and the timer resets.
    pub fn schedule(&mut self, payload: T) {
        let trigger_at = Instant::now() + self.delay;
        self.pending = Some((payload, trigger_at));
        trace!("debounce: scheduled, fires in {}ms", self.delay.as_millis());
    }

    /// Drop any pending payload.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Fire if the quiet period has elapsed. Clears the pending state.
    pub fn tick(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, at)) if Instant::now() >= *at => {
                self.pending.take().map(|(payload, _)| payload)
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_immediate_fire() {
        let mut d = Debouncer::new(100);
        d.schedule(1u32);
        assert!(d.is_pending());
        assert!(d.tick().is_none());
    }

    #[test]
    fn test_fires_after_delay() {
        let mut d = Debouncer::new(10);
        d.schedule(7u32);
        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(d.tick(), Some(7));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_reschedule_keeps_last_payload() {
        let mut d = Debouncer::new(10);
        d.schedule("first");
        d.schedule("second");
        std::thread::sleep(Duration::from_millis(15));
        assert_eq!(d.tick(), Some("second"));
    }

    #[test]
    fn test_reschedule_resets_timer() {
        let mut d = Debouncer::new(50);
        d.schedule(1u32);
        std::thread::sleep(Duration::from_millis(30));
        d.schedule(2u32);
        // Timer restarted - nothing fires yet
        assert!(d.tick().is_none());
    }

    #[test]
    fn test_cancel() {
        let mut d = Debouncer::new(10);
        d.schedule(1u32);
        d.cancel();
        std::thread::sleep(Duration::from_millis(15));
        assert!(d.tick().is_none());
    }
}
