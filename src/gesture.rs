//! Button gestures
//!
//! The debounced input delivers press and release edges. [`PressTracker`]
//! measures the time between them and [`classify`] turns that duration
//! into a [`Gesture`].

use embassy_time::{Duration, Instant};

use crate::config::GestureThresholds;

/// What the user asked for with a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Short press: step brightness by one increment
    Adjust,
    /// Long press: fade to the opposite extreme
    Toggle,
    /// Very long press: blink the current extreme on the status LED
    Diagnostic,
}

/// Classify a press by its duration
pub fn classify(press: Duration, thresholds: &GestureThresholds) -> Gesture {
    if press >= thresholds.diagnostic {
        Gesture::Diagnostic
    } else if press >= thresholds.long_press {
        Gesture::Toggle
    } else {
        Gesture::Adjust
    }
}

/// Measures press durations from button edges
#[derive(Debug, Clone, Copy, Default)]
pub struct PressTracker {
    pressed_at: Option<Instant>,
}

impl PressTracker {
    pub const fn new() -> Self {
        Self { pressed_at: None }
    }

    /// Whether the button is currently held
    pub const fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Record a press edge
    ///
    /// A press while already pressed restarts the measurement.
    pub fn press(&mut self, at: Instant) {
        self.pressed_at = Some(at);
    }

    /// Record a release edge, returning the press duration
    ///
    /// Returns `None` for a release without a matching press.
    pub fn release(&mut self, at: Instant) -> Option<Duration> {
        let start = self.pressed_at.take()?;
        Some(at.saturating_duration_since(start))
    }
}
