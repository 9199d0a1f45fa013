//! Lamp configuration
//!
//! All values have fixed defaults matching the lamp's hardware and schedule.

use embassy_time::Duration;

use crate::gamma::DEFAULT_GAMMA;

/// Duration of a short-press adjustment fade
pub const ADJUST_FADE: Duration = Duration::from_secs(10);

/// Duration of a full 0-100 fade (toggle and schedule)
pub const FULL_FADE: Duration = Duration::from_secs(3600);

/// Brightness step of a short press, in percent
pub const ADJUST_STEP: u8 = 20;

/// Presses at least this long toggle the lamp
pub const LONG_PRESS: Duration = Duration::from_millis(1000);

/// Presses at least this long run the diagnostic blink
pub const DIAGNOSTIC_PRESS: Duration = Duration::from_millis(5000);

/// Hour at which the lamp fades to full
pub const FADE_ON_HOUR: u8 = 11;

/// Hour at which the lamp fades to off
pub const FADE_OFF_HOUR: u8 = 20;

/// Control loop period
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Fade durations
#[derive(Debug, Clone, Copy)]
pub struct FadeTimings {
    /// Fixed duration of a short-press adjustment
    pub adjust: Duration,
    /// Duration of a full swing; partial swings are scaled down
    pub full: Duration,
}

/// Press duration thresholds, compared from longest to shortest
#[derive(Debug, Clone, Copy)]
pub struct GestureThresholds {
    pub long_press: Duration,
    pub diagnostic: Duration,
}

/// Fixed trigger hours of the daily schedule
///
/// The two hours must differ.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleConfig {
    pub fade_on_hour: u8,
    pub fade_off_hour: u8,
}

/// Status LED timings
#[derive(Debug, Clone, Copy)]
pub struct IndicatorTimings {
    /// Half period of the blink shown while adjusting
    pub adjust_blink: Duration,
    /// Half period of the diagnostic burst
    pub diagnostic_blink: Duration,
}

/// Configuration for the lamp controller
#[derive(Debug, Clone, Copy)]
pub struct LampConfig {
    pub timings: FadeTimings,
    pub adjust_step: u8,
    pub gestures: GestureThresholds,
    pub schedule: ScheduleConfig,
    pub indicator: IndicatorTimings,
    pub gamma: f32,
    pub tick_interval: Duration,
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            adjust: ADJUST_FADE,
            full: FULL_FADE,
        }
    }
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            long_press: LONG_PRESS,
            diagnostic: DIAGNOSTIC_PRESS,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            fade_on_hour: FADE_ON_HOUR,
            fade_off_hour: FADE_OFF_HOUR,
        }
    }
}

impl Default for IndicatorTimings {
    fn default() -> Self {
        Self {
            adjust_blink: Duration::from_millis(250),
            diagnostic_blink: Duration::from_millis(200),
        }
    }
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            timings: FadeTimings::default(),
            adjust_step: ADJUST_STEP,
            gestures: GestureThresholds::default(),
            schedule: ScheduleConfig::default(),
            indicator: IndicatorTimings::default(),
            gamma: DEFAULT_GAMMA,
            tick_interval: TICK_INTERVAL,
        }
    }
}
