use embassy_time::Instant;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::brightness::Brightness;
use crate::channel::{ButtonEdge, EdgeReceiver};
use crate::config::LampConfig;
use crate::gamma::output_level;
use crate::gesture::{Gesture, PressTracker, classify};
use crate::indicator::{StatusIndicator, blink_burst, diagnostic_blinks};
use crate::lamp::{BrightnessStateMachine, Effects, LampEvent, LampState};
use crate::schedule::Scheduler;
use crate::{BrightnessStore, HourClock, OutputDriver};

/// Hardware the controller drives
pub struct LampDrivers<O, S, C, L, D> {
    /// Lamp PWM stage
    pub output: O,
    /// Non-volatile brightness byte
    pub store: S,
    /// Real-time clock
    pub clock: C,
    /// Status LED
    pub status: L,
    /// Blocking delay for the diagnostic burst
    pub delay: D,
}

/// Lamp controller - runs one control tick at a time
pub struct LampController<'a, O, S, C, L, D, const EDGE_QUEUE_SIZE: usize> {
    // External dependencies and configuration
    edges: EdgeReceiver<'a, EDGE_QUEUE_SIZE>,
    drivers: LampDrivers<O, S, C, L, D>,
    config: LampConfig,

    // Internal state
    lamp: BrightnessStateMachine,
    press: PressTracker,
    scheduler: Scheduler,
    indicator: StatusIndicator,
    /// Byte last read from or written to the store
    stored: u8,
}

impl<'a, O, S, C, L, D, const EDGE_QUEUE_SIZE: usize> LampController<'a, O, S, C, L, D, EDGE_QUEUE_SIZE>
where
    O: OutputDriver,
    S: BrightnessStore,
    C: HourClock,
    L: OutputPin,
    D: DelayNs,
{
    /// Power up the lamp
    ///
    /// Loads the persisted brightness, reads the clock to pick the initial
    /// state and writes the initial output level.
    pub fn new(
        edges: EdgeReceiver<'a, EDGE_QUEUE_SIZE>,
        mut drivers: LampDrivers<O, S, C, L, D>,
        config: LampConfig,
    ) -> Self {
        let stored = drivers.store.load();
        let persisted = Brightness::new(stored);
        let hour = drivers.clock.hour();
        let lamp = BrightnessStateMachine::at_startup(hour, persisted, &config);

        drivers.output.write(output_level(lamp.brightness(), config.gamma));
        let _ = drivers.status.set_low();

        Self {
            edges,
            drivers,
            lamp,
            press: PressTracker::new(),
            scheduler: Scheduler::new(config.schedule, hour),
            indicator: StatusIndicator::new(config.indicator.adjust_blink),
            stored,
            config,
        }
    }

    /// Run one control tick
    ///
    /// Input handling happens before the fade step, which happens before the
    /// indicator update and the schedule check.
    pub fn tick(&mut self, now: Instant) {
        self.process_edges(now);

        let effects = self.lamp.tick(now);
        self.apply_effects(effects);
        self.drivers
            .output
            .write(output_level(self.lamp.brightness(), self.config.gamma));

        let lit = self.indicator.update(self.lamp.state(), now);
        let _ = self.drivers.status.set_state(lit.into());

        self.check_schedule(now);
    }

    pub fn state(&self) -> LampState {
        self.lamp.state()
    }

    pub fn brightness(&self) -> Brightness {
        self.lamp.brightness()
    }

    pub fn lamp(&self) -> &BrightnessStateMachine {
        &self.lamp
    }

    pub fn drivers(&self) -> &LampDrivers<O, S, C, L, D> {
        &self.drivers
    }

    pub fn drivers_mut(&mut self) -> &mut LampDrivers<O, S, C, L, D> {
        &mut self.drivers
    }

    /// Drain queued button edges and act on completed presses
    fn process_edges(&mut self, now: Instant) {
        while let Ok(edge) = self.edges.try_receive() {
            match edge {
                ButtonEdge::Pressed(at) => self.press.press(at),
                ButtonEdge::Released(at) => {
                    if let Some(duration) = self.press.release(at) {
                        let gesture = classify(duration, &self.config.gestures);
                        #[cfg(feature = "esp32-log")]
                        println!(
                            "[LampController.process_edges] {}ms press -> {:?}",
                            duration.as_millis(),
                            gesture
                        );
                        self.on_gesture(gesture, now);
                    }
                }
            }
        }
    }

    fn on_gesture(&mut self, gesture: Gesture, now: Instant) {
        let event = match gesture {
            Gesture::Adjust => LampEvent::ShortPress,
            Gesture::Toggle => LampEvent::LongPress,
            Gesture::Diagnostic => {
                self.run_diagnostic();
                return;
            }
        };
        let effects = self.lamp.handle(event, now);
        self.apply_effects(effects);
    }

    /// Blocking blink burst reporting the current extreme
    fn run_diagnostic(&mut self) {
        let count = diagnostic_blinks(self.lamp.brightness());
        let result = blink_burst(
            &mut self.drivers.status,
            &mut self.drivers.delay,
            count,
            self.config.indicator.diagnostic_blink,
        );
        #[cfg(feature = "esp32-log")]
        if result.is_err() {
            println!("[LampController.run_diagnostic] status LED write failed");
        }
        let _ = result;
    }

    fn check_schedule(&mut self, now: Instant) {
        let hour = self.drivers.clock.hour();
        let Some(event) = self.scheduler.evaluate(hour) else {
            return;
        };
        #[cfg(feature = "esp32-log")]
        println!("[LampController.check_schedule] hour {} -> {:?}", hour, event);
        let effects = self.lamp.handle(event.into(), now);
        self.apply_effects(effects);
    }

    /// Write the persisted brightness if it differs from the stored byte
    fn apply_effects(&mut self, effects: Effects) {
        let Some(brightness) = effects.persist else {
            return;
        };
        if brightness.percent() == self.stored {
            return;
        }
        #[cfg(feature = "esp32-log")]
        println!("[LampController.apply_effects] persisting {:?}", brightness);
        self.drivers.store.store(brightness);
        self.stored = brightness.percent();
    }
}
