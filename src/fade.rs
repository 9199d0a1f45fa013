use embassy_time::{Duration, Instant};

use crate::brightness::Brightness;

/// A single timed brightness fade
///
/// Created in one piece by [`FadeSpec::new`] and never edited afterwards;
/// a new fade replaces the old one entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSpec {
    /// Value at the start of the fade
    pub initial: Brightness,
    /// Value the fade ends at
    pub target: Brightness,
    /// Time at which the fade started
    pub start: Instant,
    /// Total fade duration
    pub duration: Duration,
}

/// Interpolated brightness at one point of a fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeSample {
    pub brightness: Brightness,
    /// Whether the fade has reached its target
    pub finished: bool,
}

impl FadeSpec {
    /// Create a fade, or `None` when there is nothing to travel or no time
    /// to travel it in
    pub fn new(
        initial: Brightness,
        target: Brightness,
        duration: Duration,
        start: Instant,
    ) -> Option<Self> {
        if initial == target || duration.as_millis() == 0 {
            return None;
        }
        Some(Self {
            initial,
            target,
            start,
            duration,
        })
    }

    /// Fraction of the fade elapsed at `now`, clamped to 0.0-1.0
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now: Instant) -> f32 {
        let duration = self.duration.as_millis();
        if duration == 0 {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_millis();
        (elapsed as f32 / duration as f32).clamp(0.0, 1.0)
    }

    /// Sample the fade at `now`
    pub fn sample(&self, now: Instant) -> FadeSample {
        let progress = self.progress(now);
        let brightness = interpolate(self.initial, self.target, progress);
        if progress >= 1.0 || brightness == self.target {
            return FadeSample {
                brightness: self.target,
                finished: true,
            };
        }
        FadeSample {
            brightness,
            finished: false,
        }
    }
}

/// Linear interpolation between two brightness values, rounded to nearest
#[allow(clippy::cast_possible_truncation)]
pub fn interpolate(from: Brightness, to: Brightness, progress: f32) -> Brightness {
    let from = f32::from(from.percent());
    let to = f32::from(to.percent());
    let value = from + (to - from) * progress.clamp(0.0, 1.0);
    Brightness::clamped(libm::roundf(value) as i32)
}

/// Fade duration scaled by the share of the full 0-100 range travelled
///
/// A full swing takes `full`, half a swing takes half of it.
pub fn proportional_duration(from: Brightness, to: Brightness, full: Duration) -> Duration {
    let distance = u64::from(from.distance(to));
    if distance == 0 {
        return Duration::from_millis(0);
    }
    Duration::from_millis((full.as_millis() * distance + 50) / 100)
}

