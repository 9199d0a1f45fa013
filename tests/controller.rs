mod tests {
    use std::convert::Infallible;

    use embassy_time::{Duration, Instant};
    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType, OutputPin};
    use embedded_hal::pwm::{self, SetDutyCycle};
    use lumen_lamp::{
        Brightness, BrightnessStore, EdgeChannel, HourClock, LampConfig, LampController,
        LampDrivers, LampState, OutputDriver, PwmOutput, TickScheduler,
    };

    #[derive(Default)]
    struct Output {
        levels: Vec<u8>,
    }

    impl OutputDriver for Output {
        fn write(&mut self, level: u8) {
            self.levels.push(level);
        }
    }

    #[derive(Default)]
    struct Store {
        value: u8,
        writes: Vec<u8>,
    }

    impl BrightnessStore for Store {
        fn load(&mut self) -> u8 {
            self.value
        }

        fn store(&mut self, brightness: Brightness) {
            self.value = brightness.percent();
            self.writes.push(self.value);
        }
    }

    struct Clock {
        hour: u8,
    }

    impl HourClock for Clock {
        fn hour(&mut self) -> u8 {
            self.hour
        }
    }

    #[derive(Default)]
    struct Pin {
        high: bool,
        pulses: usize,
    }

    impl ErrorType for Pin {
        type Error = Infallible;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if !self.high {
                self.pulses += 1;
            }
            self.high = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Delay {
        total_ns: u64,
    }

    impl DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    type Drivers = LampDrivers<Output, Store, Clock, Pin, Delay>;

    fn drivers(hour: u8, stored: u8) -> Drivers {
        LampDrivers {
            output: Output::default(),
            store: Store {
                value: stored,
                writes: Vec::new(),
            },
            clock: Clock { hour },
            status: Pin::default(),
            delay: Delay::default(),
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn press(channel: &EdgeChannel<8>, from: u64, to: u64) {
        let sender = channel.sender();
        sender.pressed(at(from)).unwrap();
        sender.released(at(to)).unwrap();
    }

    #[test]
    fn test_startup_at_night_is_off() {
        let channel = EdgeChannel::<8>::new();
        let controller = LampController::new(channel.receiver(), drivers(23, 80), LampConfig::default());

        assert_eq!(controller.state(), LampState::Off);
        assert_eq!(controller.brightness(), Brightness::OFF);
        assert_eq!(controller.drivers().output.levels, [255]);
        assert_eq!(controller.lamp().long_press_target(), Brightness::FULL);
    }

    #[test]
    fn test_startup_clamps_stored_value() {
        let channel = EdgeChannel::<8>::new();
        let controller = LampController::new(channel.receiver(), drivers(12, 200), LampConfig::default());

        assert_eq!(controller.state(), LampState::On);
        assert_eq!(controller.brightness(), Brightness::FULL);
        assert_eq!(controller.drivers().output.levels, [0]);
        assert_eq!(controller.lamp().long_press_target(), Brightness::FULL);
    }

    #[test]
    fn test_output_written_every_tick() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(23, 0), LampConfig::default());
        for ms in (20..=100).step_by(20) {
            controller.tick(at(ms));
        }
        assert_eq!(controller.drivers().output.levels, [255; 6]);
    }

    #[test]
    fn test_short_press_adjusts_and_persists_on_completion() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(23, 0), LampConfig::default());

        press(&channel, 1000, 1200);
        controller.tick(at(1200));
        assert_eq!(controller.state(), LampState::Adjusting);
        assert!(controller.drivers().store.writes.is_empty());

        controller.tick(at(6200));
        assert_eq!(controller.brightness(), Brightness::new(10));
        assert!(controller.drivers().store.writes.is_empty());

        controller.tick(at(11_200));
        assert_eq!(controller.brightness(), Brightness::new(20));
        assert_eq!(controller.state(), LampState::On);
        assert_eq!(controller.drivers().store.writes, [20]);
        assert_eq!(*controller.drivers().output.levels.last().unwrap(), 255 - 10);
    }

    #[test]
    fn test_status_led_blinks_while_adjusting() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(23, 0), LampConfig::default());

        press(&channel, 1000, 1100);
        let mut now = 1100;
        while now < 3100 {
            controller.tick(at(now));
            now += 20;
        }
        // One toggle every ~260 ms over two seconds
        let pulses = controller.drivers().status.pulses;
        assert!((3..=5).contains(&pulses), "{pulses} pulses");
    }

    #[test]
    fn test_long_press_fades_and_status_led_steady() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(23, 0), LampConfig::default());

        press(&channel, 0, 1500);
        controller.tick(at(1500));
        assert_eq!(controller.state(), LampState::FadeOn);
        assert!(controller.drivers().status.high);

        controller.tick(at(1500 + 1_800_000));
        assert_eq!(controller.brightness(), Brightness::new(50));
        assert!(controller.drivers().store.writes.is_empty());

        controller.tick(at(1500 + 3_600_000));
        assert_eq!(controller.state(), LampState::On);
        assert!(!controller.drivers().status.high);
        assert_eq!(controller.drivers().store.writes, [100]);
    }

    #[test]
    fn test_unchanged_brightness_is_not_rewritten() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(12, 100), LampConfig::default());

        // At full while increasing: nothing to move, value already stored
        press(&channel, 0, 100);
        controller.tick(at(100));
        assert_eq!(controller.state(), LampState::On);
        assert!(controller.drivers().store.writes.is_empty());
    }

    #[test]
    fn test_out_of_range_store_is_rewritten() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(23, 200), LampConfig::default());

        press(&channel, 0, 1500);
        controller.tick(at(1500));
        controller.tick(at(1500 + 3_600_000));

        assert_eq!(controller.brightness(), Brightness::FULL);
        assert_eq!(controller.drivers().store.writes, [100]);
        assert_eq!(controller.drivers().store.value, 100);
    }

    #[test]
    fn test_immediate_adjustment_persists() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(12, 0), LampConfig::default());

        press(&channel, 0, 100);
        controller.tick(at(100));
        assert_eq!(controller.drivers().store.writes, [100]);

        // Stored 0 made the toggle target off
        press(&channel, 200, 1400);
        controller.tick(at(1400));
        assert_eq!(controller.state(), LampState::FadeOff);
        controller.tick(at(1400 + 3_600_000));
        assert_eq!(controller.state(), LampState::Off);
        assert_eq!(controller.drivers().store.writes, [100, 0]);
    }

    #[test]
    fn test_diagnostic_press_blinks_full() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(12, 100), LampConfig::default());

        press(&channel, 0, 6000);
        controller.tick(at(6000));

        assert_eq!(controller.drivers().status.pulses, 4);
        assert_eq!(controller.drivers().delay.total_ns, 1_600_000_000);
        assert_eq!(controller.state(), LampState::On);
        assert_eq!(controller.brightness(), Brightness::FULL);
    }

    #[test]
    fn test_diagnostic_press_blinks_off() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(2, 0), LampConfig::default());

        press(&channel, 0, 5000);
        controller.tick(at(5000));
        assert_eq!(controller.drivers().status.pulses, 2);
        assert_eq!(controller.state(), LampState::Off);
    }

    #[test]
    fn test_schedule_fires_once_per_hour() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(10, 0), LampConfig::default());

        controller.tick(at(20));
        assert_eq!(controller.state(), LampState::Off);

        controller.drivers_mut().clock.hour = 11;
        controller.tick(at(40));
        assert_eq!(controller.state(), LampState::FadeOn);
        let fade = *controller.lamp().fade().unwrap();
        assert_eq!(fade.target, Brightness::FULL);
        assert_eq!(fade.duration, Duration::from_secs(3600));

        // Manual change within the same hour is not undone by the schedule
        press(&channel, 60, 200);
        controller.tick(at(200));
        assert_eq!(controller.state(), LampState::Adjusting);
        assert_eq!(controller.lamp().fade().unwrap().target, Brightness::new(20));
        controller.tick(at(220));
        assert_eq!(controller.state(), LampState::Adjusting);
    }

    #[test]
    fn test_evening_schedule_fades_off() {
        let channel = EdgeChannel::<8>::new();
        let mut controller = LampController::new(channel.receiver(), drivers(19, 100), LampConfig::default());

        controller.drivers_mut().clock.hour = 20;
        controller.tick(at(20));
        assert_eq!(controller.state(), LampState::FadeOff);
        assert_eq!(controller.lamp().long_press_target(), Brightness::OFF);

        controller.tick(at(20 + 3_600_000));
        assert_eq!(controller.state(), LampState::Off);
        assert_eq!(controller.drivers().store.writes, [0]);
    }

    #[test]
    fn test_tick_scheduler_cadence() {
        let channel = EdgeChannel::<8>::new();
        let controller = LampController::new(channel.receiver(), drivers(23, 0), LampConfig::default());
        let mut scheduler = TickScheduler::new(controller, Duration::from_millis(20));

        let result = scheduler.tick(at(0));
        assert_eq!(result.next_deadline, at(20));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));

        let result = scheduler.tick(at(25));
        assert_eq!(result.next_deadline, at(40));
        assert_eq!(result.sleep_duration, Duration::from_millis(15));

        // Stalled past the drift limit: restart from now
        let result = scheduler.tick(at(200));
        assert_eq!(result.next_deadline, at(220));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));

        // Slightly behind: catch up without sleeping
        let result = scheduler.tick(at(250));
        assert_eq!(result.next_deadline, at(240));
        assert_eq!(result.sleep_duration, Duration::from_millis(0));

        assert_eq!(scheduler.controller().drivers().output.levels.len(), 5);
    }

    struct Pwm {
        duty: u16,
    }

    impl pwm::ErrorType for Pwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for Pwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_pwm_output_scales_level() {
        let mut output = PwmOutput::new(Pwm { duty: 0 });
        output.write(255);
        output.write(0);
        assert_eq!(output.release().duty, 0);

        let mut output = PwmOutput::new(Pwm { duty: 0 });
        output.write(255);
        assert_eq!(output.release().duty, 1000);
    }
}
