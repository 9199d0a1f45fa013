//! Adapters from `embedded-hal` peripherals to the lamp's driver traits

use embedded_hal::pwm::SetDutyCycle;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::gamma::MAX_OUTPUT_LEVEL;

/// Drives the lamp through any PWM channel
///
/// The 0-255 output level is scaled onto the channel's duty range.
pub struct PwmOutput<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmOutput<P> {
    pub const fn new(pwm: P) -> Self {
        Self { pwm }
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> OutputDriver for PwmOutput<P> {
    fn write(&mut self, level: u8) {
        let result = self
            .pwm
            .set_duty_cycle_fraction(u16::from(level), u16::from(MAX_OUTPUT_LEVEL));
        #[cfg(feature = "esp32-log")]
        if result.is_err() {
            println!("[PwmOutput.write] failed to set level {}", level);
        }
        // The next tick writes the level again.
        let _ = result;
    }
}
