#![no_std]

pub mod brightness;
pub mod channel;
pub mod config;
pub mod controller;
pub mod fade;
pub mod gamma;
pub mod gesture;
pub mod hal;
pub mod indicator;
pub mod lamp;
pub mod schedule;
pub mod tick_scheduler;

pub use brightness::Brightness;
pub use channel::{ButtonEdge, EdgeChannel, EdgeReceiver, EdgeSender};
pub use config::{FadeTimings, GestureThresholds, IndicatorTimings, LampConfig, ScheduleConfig};
pub use controller::{LampController, LampDrivers};
pub use fade::{FadeSpec, proportional_duration};
pub use gamma::output_level;
pub use gesture::{Gesture, PressTracker, classify};
pub use hal::PwmOutput;
pub use indicator::{IndicatorPattern, StatusIndicator};
pub use lamp::{BrightnessStateMachine, Effects, LampEvent, LampState};
pub use schedule::{ScheduleEvent, Scheduler};
pub use tick_scheduler::TickScheduler;
pub use embassy_time::{Duration, Instant};

/// Lamp output stage
///
/// Receives the gamma-corrected, inverted level (0-255) once per tick.
pub trait OutputDriver {
    /// Write the output level
    fn write(&mut self, level: u8);
}

/// Non-volatile storage for a single brightness byte
pub trait BrightnessStore {
    /// Read the stored byte; the caller clamps it
    fn load(&mut self) -> u8;

    /// Store a brightness value
    fn store(&mut self, brightness: Brightness);
}

/// Real-time clock
pub trait HourClock {
    /// Current hour of day, 0-23
    fn hour(&mut self) -> u8;
}
