//! Control tick pacing.
//!
//! Keeps the controller on a fixed cadence without async/await or a
//! platform timer. The caller sleeps between ticks.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::controller::LampController;
use crate::{BrightnessStore, HourClock, OutputDriver};

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Fixed-cadence driver for a [`LampController`].
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(controller, config.tick_interval);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     delay.delay_ms(result.sleep_duration.as_millis() as u32);
/// }
/// ```
pub struct TickScheduler<'a, O, S, C, L, D, const EDGE_QUEUE_SIZE: usize> {
    controller: LampController<'a, O, S, C, L, D, EDGE_QUEUE_SIZE>,
    next_tick: Instant,
    interval: Duration,
}

impl<'a, O, S, C, L, D, const EDGE_QUEUE_SIZE: usize> TickScheduler<'a, O, S, C, L, D, EDGE_QUEUE_SIZE>
where
    O: OutputDriver,
    S: BrightnessStore,
    C: HourClock,
    L: OutputPin,
    D: DelayNs,
{
    pub fn new(controller: LampController<'a, O, S, C, L, D, EDGE_QUEUE_SIZE>, interval: Duration) -> Self {
        Self {
            controller,
            next_tick: Instant::from_millis(0),
            interval,
        }
    }

    /// Run the controller once and return when to run it next.
    ///
    /// If the previous deadline was missed by more than two intervals (a
    /// diagnostic burst, for instance) the cadence restarts from `now`
    /// instead of catching up with a burst of ticks.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        let max_drift = self.interval.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        self.controller.tick(now);

        self.next_tick += self.interval;

        let sleep_duration = if self.next_tick > now {
            self.next_tick.saturating_duration_since(now)
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    pub fn controller(&self) -> &LampController<'a, O, S, C, L, D, EDGE_QUEUE_SIZE> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LampController<'a, O, S, C, L, D, EDGE_QUEUE_SIZE> {
        &mut self.controller
    }
}
