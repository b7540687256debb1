//! Debounce and at-most-one-rebuild gate.

use std::time::{Duration, Instant};

/// Whether a rebuild is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Rebuilding,
}

/// Why the gate refused an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Arrived inside the debounce window of the last accepted event
    Debounced,
    /// Arrived while a rebuild was running; dropped, not queued
    Busy,
}

/// Two-state gate: Idle → Rebuilding on an accepted event, Rebuilding →
/// Idle when the rebuild finishes regardless of its outcome.
#[derive(Debug, Clone)]
pub struct RebuildGate {
    state: GateState,
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl RebuildGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: GateState::Idle,
            interval,
            last_accepted: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Try to move to Rebuilding for an event observed at `now`.
    pub fn try_begin(&mut self, now: Instant) -> Result<(), Rejection> {
        if self.state == GateState::Rebuilding {
            return Err(Rejection::Busy);
        }
        if let Some(last) = self.last_accepted
            && now.saturating_duration_since(last) < self.interval
        {
            return Err(Rejection::Debounced);
        }

        self.last_accepted = Some(now);
        self.state = GateState::Rebuilding;
        Ok(())
    }

    /// Return to Idle.
    pub fn finish(&mut self) {
        self.state = GateState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEBOUNCE_INTERVAL;

    #[test]
    fn test_first_event_is_accepted() {
        let mut gate = RebuildGate::new(DEBOUNCE_INTERVAL);
        assert_eq!(gate.try_begin(Instant::now()), Ok(()));
        assert_eq!(gate.state(), GateState::Rebuilding);
    }

    #[test]
    fn test_two_events_200ms_apart_trigger_one_rebuild() {
        let mut gate = RebuildGate::new(DEBOUNCE_INTERVAL);
        let start = Instant::now();

        assert_eq!(gate.try_begin(start), Ok(()));
        gate.finish();
        assert_eq!(gate.try_begin(start + Duration::from_millis(200)), Err(Rejection::Debounced));
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_event_after_window_is_accepted() {
        let mut gate = RebuildGate::new(DEBOUNCE_INTERVAL);
        let start = Instant::now();

        assert_eq!(gate.try_begin(start), Ok(()));
        gate.finish();
        assert_eq!(gate.try_begin(start + Duration::from_millis(500)), Ok(()));
    }

    #[test]
    fn test_event_while_rebuilding_is_dropped() {
        let mut gate = RebuildGate::new(DEBOUNCE_INTERVAL);
        let start = Instant::now();

        assert_eq!(gate.try_begin(start), Ok(()));
        // Well past the debounce window, but the first rebuild has not finished.
        assert_eq!(gate.try_begin(start + Duration::from_secs(5)), Err(Rejection::Busy));
        gate.finish();

        // Dropped events are not replayed; the next one is judged on its own.
        assert_eq!(gate.try_begin(start + Duration::from_secs(6)), Ok(()));
    }

    #[test]
    fn test_debounce_measured_from_last_accepted_event() {
        let mut gate = RebuildGate::new(DEBOUNCE_INTERVAL);
        let start = Instant::now();

        assert_eq!(gate.try_begin(start), Ok(()));
        gate.finish();
        assert!(gate.try_begin(start + Duration::from_millis(300)).is_err());
        // 600ms after the accepted event, even though only 300ms after the rejected one
        assert_eq!(gate.try_begin(start + Duration::from_millis(600)), Ok(()));
    }
}
