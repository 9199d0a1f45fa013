//! Daily fade schedule
//!
//! The lamp fades to full at the morning hour and to off at the evening
//! hour. Each hour is evaluated once, so a trigger fires only on the tick
//! where the clock first reports it.

use crate::config::ScheduleConfig;

/// Event emitted when a trigger hour is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    FadeToFull,
    FadeToOff,
}

/// Evaluate the trigger hours for `hour`, given the last evaluated hour
pub fn evaluate(hour: u8, last_hour: Option<u8>, config: &ScheduleConfig) -> Option<ScheduleEvent> {
    if last_hour == Some(hour) {
        return None;
    }
    if hour == config.fade_on_hour {
        Some(ScheduleEvent::FadeToFull)
    } else if hour == config.fade_off_hour {
        Some(ScheduleEvent::FadeToOff)
    } else {
        None
    }
}

/// Whether `hour` lies in the window between the evening and morning triggers
pub fn is_night(hour: u8, config: &ScheduleConfig) -> bool {
    hour >= config.fade_off_hour || hour < config.fade_on_hour
}

/// Schedule evaluator that remembers the last hour it looked at
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: ScheduleConfig,
    last_hour: Option<u8>,
}

impl Scheduler {
    /// Create a scheduler that treats `hour` as already evaluated
    pub const fn new(config: ScheduleConfig, hour: u8) -> Self {
        Self {
            config,
            last_hour: Some(hour),
        }
    }

    /// Last evaluated hour
    pub const fn last_hour(&self) -> Option<u8> {
        self.last_hour
    }

    /// Evaluate `hour` and advance the hour mark
    pub fn evaluate(&mut self, hour: u8) -> Option<ScheduleEvent> {
        let event = evaluate(hour, self.last_hour, &self.config);
        self.last_hour = Some(hour);
        event
    }
}
