//! Drag accumulation.
//!
//! Hosts feed raw pointer events in; the tracker matches them against the
//! active pointer, accumulates translation, estimates instantaneous velocity,
//! and yields exactly one terminal [`GestureSample`] per gesture. Events from
//! other pointers while a drag is active are ignored, so a stray second
//! finger cannot corrupt the gesture.

use super::types::{GesturePhase, GestureSample};

#[derive(Debug, Clone, PartialEq)]
struct DragState {
    pointer_id: i64,
    start_x: f64,
    start_y: f64,
    last_x: f64,
    last_y: f64,
    last_t_ms: f64,
    velocity_x: f64,
    velocity_y: f64,
}

/// Accumulates one pointer drag at a time.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<DragState>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Whether a drag is currently being tracked.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start tracking a pointer. Ignored if a drag is already active.
    pub fn begin(&mut self, pointer_id: i64, x: f64, y: f64, t_ms: f64) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(DragState {
            pointer_id,
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
            last_t_ms: t_ms,
            velocity_x: 0.0,
            velocity_y: 0.0,
        });
    }

    /// Record an intermediate position. Returns the in-flight sample so the
    /// host can drive the card's follow-the-finger transform.
    pub fn update(&mut self, pointer_id: i64, x: f64, y: f64, t_ms: f64) -> Option<GestureSample> {
        let state = self.active.as_mut()?;
        if state.pointer_id != pointer_id {
            return None;
        }

        let dt_secs = (t_ms - state.last_t_ms) / 1000.0;
        if dt_secs > 0.0 {
            state.velocity_x = (x - state.last_x) / dt_secs;
            state.velocity_y = (y - state.last_y) / dt_secs;
        }
        state.last_x = x;
        state.last_y = y;
        state.last_t_ms = t_ms;

        Some(GestureSample {
            translation_x: state.last_x - state.start_x,
            translation_y: state.last_y - state.start_y,
            velocity_x: state.velocity_x,
            velocity_y: state.velocity_y,
            phase: GesturePhase::Active,
        })
    }

    /// Finish the drag. Returns the terminal sample for classification, or
    /// `None` when no matching drag was in flight.
    pub fn end(&mut self, pointer_id: i64, x: f64, y: f64, t_ms: f64) -> Option<GestureSample> {
        match &self.active {
            Some(state) if state.pointer_id == pointer_id => {}
            _ => return None,
        }
        let _ = self.update(pointer_id, x, y, t_ms);
        let state = self.active.take()?;

        Some(GestureSample {
            translation_x: state.last_x - state.start_x,
            translation_y: state.last_y - state.start_y,
            velocity_x: state.velocity_x,
            velocity_y: state.velocity_y,
            phase: GesturePhase::Ended,
        })
    }

    /// Abort the drag without producing a sample (pointer capture lost).
    pub fn cancel(&mut self, pointer_id: i64) {
        if let Some(state) = &self.active
            && state.pointer_id == pointer_id
        {
            self.active = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_drag_yields_one_terminal_sample() {
        let mut tracker = DragTracker::new();
        tracker.begin(1, 100.0, 100.0, 0.0);
        tracker.update(1, 150.0, 100.0, 50.0);
        let sample = tracker.end(1, 400.0, 110.0, 100.0).unwrap();

        assert_eq!(sample.phase, GesturePhase::Ended);
        assert_eq!(sample.translation_x, 300.0);
        assert_eq!(sample.translation_y, 10.0);
        assert!(!tracker.is_active());
    }

    #[test]
    fn velocity_reflects_last_movement() {
        let mut tracker = DragTracker::new();
        tracker.begin(1, 0.0, 0.0, 0.0);
        // 100 px over 100 ms = 1000 px/s.
        let sample = tracker.end(1, 100.0, 0.0, 100.0).unwrap();
        assert_eq!(sample.velocity_x, 1000.0);
    }

    #[test]
    fn second_pointer_is_ignored() {
        let mut tracker = DragTracker::new();
        tracker.begin(1, 0.0, 0.0, 0.0);
        tracker.begin(2, 500.0, 500.0, 10.0);

        assert!(tracker.update(2, 600.0, 600.0, 20.0).is_none());
        assert!(tracker.end(2, 700.0, 700.0, 30.0).is_none());

        let sample = tracker.end(1, 50.0, 0.0, 40.0).unwrap();
        assert_eq!(sample.translation_x, 50.0);
    }

    #[test]
    fn end_without_begin_yields_none() {
        let mut tracker = DragTracker::new();
        assert!(tracker.end(1, 10.0, 10.0, 0.0).is_none());
    }

    #[test]
    fn cancel_discards_the_gesture() {
        let mut tracker = DragTracker::new();
        tracker.begin(1, 0.0, 0.0, 0.0);
        tracker.cancel(1);

        assert!(!tracker.is_active());
        assert!(tracker.end(1, 100.0, 0.0, 50.0).is_none());
    }

    #[test]
    fn zero_time_delta_keeps_previous_velocity() {
        let mut tracker = DragTracker::new();
        tracker.begin(1, 0.0, 0.0, 0.0);
        tracker.update(1, 50.0, 0.0, 100.0);
        let sample = tracker.end(1, 60.0, 0.0, 100.0).unwrap();
        assert_eq!(sample.velocity_x, 500.0);
    }
}
