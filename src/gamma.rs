//! Perceptual brightness curve
//!
//! Maps a logical brightness percentage to the PWM level of the lamp stage.
//! The stage conducts on a low signal, so the curve is inverted: full
//! brightness is level 0 and off is level 255.

use crate::brightness::Brightness;

/// Default perceptual exponent
pub const DEFAULT_GAMMA: f32 = 2.0;

/// Highest output level accepted by the driver
pub const MAX_OUTPUT_LEVEL: u8 = 255;

/// Compute the inverted output level for `brightness` using exponent `gamma`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn output_level(brightness: Brightness, gamma: f32) -> u8 {
    let normalized = f32::from(brightness.percent()) / 100.0;
    let scaled = libm::roundf(libm::powf(normalized, gamma) * f32::from(MAX_OUTPUT_LEVEL));
    let duty = scaled.clamp(0.0, f32::from(MAX_OUTPUT_LEVEL)) as u8;
    MAX_OUTPUT_LEVEL - duty
}

