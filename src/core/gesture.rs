//! Vertical drag recognition.
//!
//! Terminals report pointer positions in whole rows and carry no timestamps,
//! so the tracker records when each sample arrived and converts rows into
//! the sheet's logical units.  At release it estimates the pointer velocity
//! from the samples inside the prediction window and projects it forward,
//! which is what the sheet compares against its dismiss threshold.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default window used both to estimate release velocity and to project it.
pub const DEFAULT_PREDICTION_WINDOW: Duration = Duration::from_millis(100);

// ───────────────────────────────────────── events ────────────

/// Snapshot of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Vertical translation from the press point (units, down is positive).
    pub translation: f64,
    /// Where the translation would end up if the motion carried on.
    pub predicted_end_translation: f64,
}

impl GestureSample {
    /// Projected distance still to travel, the "velocity" the sheet
    /// compares against its dismiss threshold.
    pub fn velocity(&self) -> f64 {
        self.predicted_end_translation - self.translation
    }
}

/// Output of the tracker, ready to feed into [`SheetState`](super::sheet::SheetState).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// The pointer moved while pressed.
    Changed { translation: f64 },
    /// The pointer was released after dragging.
    Ended(GestureSample),
    /// Press and release without any vertical movement.
    Tap { column: u16, row: u16 },
}

// ───────────────────────────────────────── tracker ───────────

#[derive(Debug, Clone)]
struct Press {
    column: u16,
    start_row: u16,
    dragging: bool,
    /// Recent `(arrival time, translation)` samples, oldest first.
    samples: VecDeque<(Instant, f64)>,
}

/// Turns press / move / release samples into [`DragEvent`]s.
#[derive(Debug, Clone)]
pub struct DragTracker {
    units_per_row: f64,
    prediction_window: Duration,
    press: Option<Press>,
}

impl DragTracker {
    pub fn new(units_per_row: f64) -> Self {
        Self {
            units_per_row,
            prediction_window: DEFAULT_PREDICTION_WINDOW,
            press: None,
        }
    }

    pub fn with_prediction_window(mut self, window: Duration) -> Self {
        self.prediction_window = window;
        self
    }

    /// True between a press and its release.
    pub fn is_tracking(&self) -> bool {
        self.press.is_some()
    }

    /// Pointer went down.  Any unfinished press is forgotten.
    pub fn press(&mut self, column: u16, row: u16, at: Instant) {
        let mut samples = VecDeque::new();
        samples.push_back((at, 0.0));
        self.press = Some(Press {
            column,
            start_row: row,
            dragging: false,
            samples,
        });
    }

    /// Pointer moved while pressed.
    pub fn move_to(&mut self, row: u16, at: Instant) -> Option<DragEvent> {
        let translation = self.translation_at(row)?;
        let window = self.prediction_window;
        let press = self.press.as_mut()?;

        if !press.dragging && translation == 0.0 {
            return None;
        }
        press.dragging = true;
        press.samples.push_back((at, translation));
        prune(&mut press.samples, at, window);

        Some(DragEvent::Changed { translation })
    }

    /// Pointer released.  Returns the drag end, a tap, or nothing when no
    /// press was being tracked.
    pub fn release(&mut self, row: u16, at: Instant) -> Option<DragEvent> {
        let translation = self.translation_at(row)?;
        let mut press = self.press.take()?;

        if !press.dragging && translation == 0.0 {
            return Some(DragEvent::Tap {
                column: press.column,
                row: press.start_row,
            });
        }

        press.samples.push_back((at, translation));
        prune(&mut press.samples, at, self.prediction_window);

        let velocity = match (press.samples.front(), press.samples.back()) {
            (Some(&(t0, y0)), Some(&(t1, y1))) if t1 > t0 => {
                (y1 - y0) / t1.duration_since(t0).as_secs_f64()
            }
            _ => 0.0,
        };
        let predicted = translation + velocity * self.prediction_window.as_secs_f64();
        tracing::debug!(translation, velocity, predicted, "drag released");

        Some(DragEvent::Ended(GestureSample {
            translation,
            predicted_end_translation: predicted,
        }))
    }

    /// Drop the current press without producing an event.
    pub fn cancel(&mut self) {
        self.press = None;
    }

    fn translation_at(&self, row: u16) -> Option<f64> {
        let press = self.press.as_ref()?;
        let rows = i32::from(row) - i32::from(press.start_row);
        Some(f64::from(rows) * self.units_per_row)
    }
}

/// Keep only samples that arrived within `window` of `now`.
fn prune(samples: &mut VecDeque<(Instant, f64)>, now: Instant, window: Duration) {
    while let Some(&(t, _)) = samples.front() {
        if now.duration_since(t) > window {
            samples.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPR: f64 = 16.0;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn move_reports_translation_in_units() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(UPR);
        tracker.press(4, 10, t0);

        assert_eq!(
            tracker.move_to(13, t0 + ms(20)),
            Some(DragEvent::Changed { translation: 48.0 })
        );
        assert_eq!(
            tracker.move_to(8, t0 + ms(40)),
            Some(DragEvent::Changed { translation: -32.0 })
        );
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut tracker = DragTracker::new(UPR);
        assert_eq!(tracker.move_to(3, Instant::now()), None);
        assert_eq!(tracker.release(3, Instant::now()), None);
    }

    #[test]
    fn press_and_release_in_place_is_a_tap() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(UPR);
        tracker.press(7, 20, t0);
        assert_eq!(tracker.move_to(20, t0 + ms(10)), None);
        assert_eq!(
            tracker.release(20, t0 + ms(30)),
            Some(DragEvent::Tap { column: 7, row: 20 })
        );
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn fast_flick_projects_past_the_release_point() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(UPR);
        tracker.press(0, 10, t0);
        tracker.move_to(12, t0 + ms(20));
        tracker.move_to(15, t0 + ms(40));

        let Some(DragEvent::Ended(sample)) = tracker.release(18, t0 + ms(60)) else {
            panic!("expected a drag end");
        };
        // 8 rows in 60 ms → 128 units / 0.06 s, projected over 100 ms.
        assert_eq!(sample.translation, 128.0);
        assert!((sample.velocity() - 213.333).abs() < 0.01, "{}", sample.velocity());
    }

    #[test]
    fn pausing_before_release_kills_the_velocity() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(UPR);
        tracker.press(0, 10, t0);
        tracker.move_to(14, t0 + ms(20));

        let Some(DragEvent::Ended(sample)) = tracker.release(14, t0 + ms(500)) else {
            panic!("expected a drag end");
        };
        assert_eq!(sample.translation, 64.0);
        assert_eq!(sample.velocity(), 0.0);
    }

    #[test]
    fn dragging_back_to_the_start_still_ends_the_drag() {
        let t0 = Instant::now();
        let mut tracker = DragTracker::new(UPR);
        tracker.press(0, 10, t0);
        tracker.move_to(12, t0 + ms(20));
        let ended = tracker.release(10, t0 + ms(40));
        assert!(matches!(ended, Some(DragEvent::Ended(s)) if s.translation == 0.0));
    }
}
