//! Status LED
//!
//! The LED mirrors the lamp state: lit while a long fade runs, blinking
//! while an adjustment fades, dark at rest. A diagnostic press instead
//! plays a short blocking burst that reports which extreme the lamp is at.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::brightness::Brightness;
use crate::lamp::LampState;

/// Pattern shown for a lamp state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPattern {
    Steady,
    Blink,
    Dark,
}

impl IndicatorPattern {
    pub const fn for_state(state: LampState) -> Self {
        match state {
            LampState::FadeOn | LampState::FadeOff => Self::Steady,
            LampState::Adjusting => Self::Blink,
            LampState::Off | LampState::On => Self::Dark,
        }
    }
}

/// Derives the status LED level from the lamp state
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    half_period: Duration,
    lit: bool,
    last_toggle: Instant,
}

impl StatusIndicator {
    pub const fn new(half_period: Duration) -> Self {
        Self {
            half_period,
            lit: false,
            last_toggle: Instant::from_millis(0),
        }
    }

    /// Current LED level
    pub const fn is_lit(&self) -> bool {
        self.lit
    }

    /// Update the LED level for `state` at `now`
    pub fn update(&mut self, state: LampState, now: Instant) -> bool {
        match IndicatorPattern::for_state(state) {
            IndicatorPattern::Steady => self.lit = true,
            IndicatorPattern::Dark => self.lit = false,
            IndicatorPattern::Blink => {
                if now.saturating_duration_since(self.last_toggle) > self.half_period {
                    self.last_toggle = now;
                    self.lit = !self.lit;
                }
            }
        }
        self.lit
    }
}

/// Number of diagnostic blinks for `brightness`
pub const fn diagnostic_blinks(brightness: Brightness) -> u8 {
    match brightness.percent() {
        0 => 2,
        100 => 4,
        _ => 0,
    }
}

/// Blink `pin` `count` times, blocking for the whole burst
pub fn blink_burst<P: OutputPin, D: DelayNs>(
    pin: &mut P,
    delay: &mut D,
    count: u8,
    half_period: Duration,
) -> Result<(), P::Error> {
    #[allow(clippy::cast_possible_truncation)]
    let half_period_ms = half_period.as_millis() as u32;
    for _ in 0..count {
        pin.set_high()?;
        delay.delay_ms(half_period_ms);
        pin.set_low()?;
        delay.delay_ms(half_period_ms);
    }
    Ok(())
}
