//! Brightness state machine
//!
//! Owns the lamp's brightness, the fade in progress and the discrete
//! [`LampState`]. Gestures and schedule events enter through
//! [`BrightnessStateMachine::handle`]; [`BrightnessStateMachine::tick`]
//! advances the fade. Both return [`Effects`] telling the caller what to
//! persist.
//!
//! | state \ event       | short press     | long press        | fade to full | fade to off | fade done        |
//! |---------------------|-----------------|-------------------|--------------|-------------|------------------|
//! | Off / On            | Adjusting (*)   | FadeOn / FadeOff  | FadeOn       | FadeOff     | -                |
//! | FadeOn              | Adjusting (*)   | FadeOn / FadeOff  | ignored      | FadeOff     | Off / On         |
//! | FadeOff             | Adjusting (*)   | FadeOn / FadeOff  | FadeOn       | ignored     | Off / On         |
//! | Adjusting           | Adjusting (*)   | FadeOn / FadeOff  | FadeOn       | FadeOff     | Off / On         |
//!
//! (*) settles to Off / On immediately when the step cannot move.
//! Schedule events are also ignored when the lamp already sits at their
//! extreme.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::brightness::Brightness;
use crate::config::LampConfig;
use crate::fade::{FadeSpec, proportional_duration};
use crate::schedule::{ScheduleEvent, is_night};

/// Discrete lamp state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampState {
    Off,
    FadeOn,
    On,
    FadeOff,
    Adjusting,
}

impl LampState {
    /// Rest state for a lamp sitting at `brightness`
    pub const fn resting(brightness: Brightness) -> Self {
        if brightness.percent() == 0 { Self::Off } else { Self::On }
    }
}

/// Events consumed by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LampEvent {
    ShortPress,
    LongPress,
    ScheduledFadeToFull,
    ScheduledFadeToOff,
}

impl From<ScheduleEvent> for LampEvent {
    fn from(event: ScheduleEvent) -> Self {
        match event {
            ScheduleEvent::FadeToFull => Self::ScheduledFadeToFull,
            ScheduleEvent::FadeToOff => Self::ScheduledFadeToOff,
        }
    }
}

/// Side effects the caller has to carry out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effects {
    /// Brightness to write to non-volatile storage
    pub persist: Option<Brightness>,
}

impl Effects {
    const fn none() -> Self {
        Self { persist: None }
    }

    const fn persist(brightness: Brightness) -> Self {
        Self {
            persist: Some(brightness),
        }
    }
}

/// The lamp's brightness state machine
#[derive(Debug, Clone)]
pub struct BrightnessStateMachine {
    state: LampState,
    current: Brightness,
    long_press_target: Brightness,
    increasing: bool,
    fade: Option<FadeSpec>,

    adjust_step: i32,
    adjust_fade: Duration,
    full_fade: Duration,
}

impl BrightnessStateMachine {
    /// Create a state machine resting at `brightness`
    pub fn new(brightness: Brightness, long_press_target: Brightness, config: &LampConfig) -> Self {
        Self {
            state: LampState::resting(brightness),
            current: brightness,
            long_press_target,
            increasing: true,
            fade: None,
            adjust_step: i32::from(config.adjust_step),
            adjust_fade: config.timings.adjust,
            full_fade: config.timings.full,
        }
    }

    /// Create the state machine for a power-up at `hour`
    ///
    /// The lamp starts off during the night window and fully on otherwise.
    /// The persisted brightness only decides which way the next long press
    /// goes.
    pub fn at_startup(hour: u8, persisted: Brightness, config: &LampConfig) -> Self {
        let brightness = if is_night(hour, &config.schedule) {
            Brightness::OFF
        } else {
            Brightness::FULL
        };
        let long_press_target = if persisted == Brightness::OFF {
            Brightness::OFF
        } else {
            Brightness::FULL
        };
        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessStateMachine.at_startup] hour {} -> {:?}, persisted {:?}",
            hour,
            brightness,
            persisted
        );
        Self::new(brightness, long_press_target, config)
    }

    pub const fn state(&self) -> LampState {
        self.state
    }

    pub const fn brightness(&self) -> Brightness {
        self.current
    }

    pub const fn long_press_target(&self) -> Brightness {
        self.long_press_target
    }

    /// Direction of the next short press
    pub const fn is_increasing(&self) -> bool {
        self.increasing
    }

    /// The fade in progress, if any
    pub const fn fade(&self) -> Option<&FadeSpec> {
        self.fade.as_ref()
    }

    /// Dispatch an event to its transition
    pub fn handle(&mut self, event: LampEvent, now: Instant) -> Effects {
        match event {
            LampEvent::ShortPress => self.on_short_press_adjust(now),
            LampEvent::LongPress => {
                self.on_long_press_toggle(now);
                Effects::none()
            }
            LampEvent::ScheduledFadeToFull => {
                self.on_scheduled_fade_to_full(now);
                Effects::none()
            }
            LampEvent::ScheduledFadeToOff => {
                self.on_scheduled_fade_to_off(now);
                Effects::none()
            }
        }
    }

    /// Replace the fade in progress
    ///
    /// Equal endpoints or a zero duration clear the fade and leave the
    /// discrete state alone.
    pub fn start_fade(&mut self, from: Brightness, to: Brightness, duration: Duration, now: Instant) {
        self.fade = FadeSpec::new(from, to, duration, now);
        #[cfg(feature = "esp32-log")]
        println!("[BrightnessStateMachine.start_fade] {:?}", self.fade);
    }

    /// Fade towards the opposite extreme
    pub fn on_long_press_toggle(&mut self, now: Instant) {
        if self.current == self.long_press_target {
            self.long_press_target = self.long_press_target.opposite_extreme();
        }
        let target = self.long_press_target;
        self.fade_to_extreme(target, now);
    }

    /// Step brightness one increment, bouncing between the extremes
    pub fn on_short_press_adjust(&mut self, now: Instant) -> Effects {
        let target = if self.increasing {
            let target = self.current.step(self.adjust_step);
            if target == Brightness::FULL {
                self.increasing = false;
            }
            target
        } else {
            let target = self.current.step(-self.adjust_step);
            if target == Brightness::OFF {
                self.increasing = true;
            }
            target
        };

        self.start_fade(self.current, target, self.adjust_fade, now);

        if self.fade.is_none() {
            self.state = LampState::resting(self.current);
            return Effects::persist(self.current);
        }

        self.long_press_target = if target > self.current {
            Brightness::FULL
        } else {
            Brightness::OFF
        };
        self.state = LampState::Adjusting;
        Effects::none()
    }

    /// Scheduled morning fade
    ///
    /// Returns `false` when the lamp is already fading on or already full.
    pub fn on_scheduled_fade_to_full(&mut self, now: Instant) -> bool {
        if self.state == LampState::FadeOn || self.current == Brightness::FULL {
            return false;
        }
        self.long_press_target = Brightness::FULL;
        self.fade_to_extreme(Brightness::FULL, now);
        true
    }

    /// Scheduled evening fade
    ///
    /// Returns `false` when the lamp is already fading off or already off.
    pub fn on_scheduled_fade_to_off(&mut self, now: Instant) -> bool {
        if self.state == LampState::FadeOff || self.current == Brightness::OFF {
            return false;
        }
        self.long_press_target = Brightness::OFF;
        self.fade_to_extreme(Brightness::OFF, now);
        true
    }

    /// Advance the fade in progress
    pub fn tick(&mut self, now: Instant) -> Effects {
        let Some(fade) = self.fade else {
            return Effects::none();
        };

        let sample = fade.sample(now);
        self.current = sample.brightness;
        if !sample.finished {
            return Effects::none();
        }

        // A partial adjustment that stops short of the extreme still leaves
        // the lamp on unless it landed at zero, same as reaching the extreme.
        self.fade = None;
        self.state = LampState::resting(self.current);
        #[cfg(feature = "esp32-log")]
        println!(
            "[BrightnessStateMachine.tick] fade finished at {:?}, state {:?}",
            self.current,
            self.state
        );
        Effects::persist(self.current)
    }

    fn fade_to_extreme(&mut self, target: Brightness, now: Instant) {
        let duration = proportional_duration(self.current, target, self.full_fade);
        self.start_fade(self.current, target, duration, now);

        if target == Brightness::FULL {
            self.state = LampState::FadeOn;
            self.increasing = true;
        } else {
            self.state = LampState::FadeOff;
            self.increasing = false;
        }
    }
}
