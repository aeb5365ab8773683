mod tests {
    use std::{cell::RefCell, rc::Rc};

    use embassy_time::{Duration, Instant};
    use pixel_effects::{
        AddressableEffect, Color, ColorWipeEffect, EffectError, EffectHost, EffectSlot,
        EffectState, FrameScheduler, HostConfig, OutputDriver, Progress, RainbowEffect,
        TickRateCounter, WipeColor,
        frame_scheduler::{HIGH_RATE_FRAME_DURATION, IDLE_FRAME_DURATION},
    };
    use rand::{SeedableRng, rngs::SmallRng};

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);
    const WARM: Color = Color::new(255, 180, 100);

    #[derive(Default, Clone)]
    struct Recorder {
        last: Rc<RefCell<Vec<Color>>>,
        writes: Rc<RefCell<usize>>,
    }

    impl OutputDriver for Recorder {
        fn write(&mut self, colors: &[Color]) {
            *self.last.borrow_mut() = colors.to_vec();
            *self.writes.borrow_mut() += 1;
        }
    }

    fn host<'a>(
        driver: Recorder,
        counter: &'a TickRateCounter,
        pixel_count: usize,
    ) -> EffectHost<'a, Recorder, SmallRng, 30> {
        let config = HostConfig {
            pixel_count,
            color: WARM,
        };
        EffectHost::new(driver, SmallRng::seed_from_u64(3), counter, &config)
    }

    fn wipe<'a>() -> AddressableEffect<'a, 30> {
        let wipe = ColorWipeEffect::default()
            .with_colors(&[WipeColor::new(RED), WipeColor::new(BLUE)])
            .unwrap()
            .with_add_led_interval(100);
        AddressableEffect::new("Wipe", EffectSlot::ColorWipe(wipe)).unwrap()
    }

    fn rainbow<'a>() -> AddressableEffect<'a, 30> {
        AddressableEffect::new("Rainbow", EffectSlot::Rainbow(RainbowEffect::default())).unwrap()
    }

    #[test]
    fn test_color_wipe_end_to_end() {
        let counter = TickRateCounter::new();
        let driver = Recorder::default();
        let mut host = host(driver.clone(), &counter, 30);
        host.activate(wipe(), Instant::from_millis(0)).unwrap();

        host.tick(Instant::from_millis(0));
        assert_eq!(*driver.last.borrow(), vec![Color::BLACK; 30]);

        let mut t = 10;
        while t <= 3_000 {
            host.tick(Instant::from_millis(t));
            t += 10;
        }
        assert_eq!(*driver.last.borrow(), vec![RED; 30]);

        // Blue advances from the first pixel
        host.tick(Instant::from_millis(3_100));
        assert_eq!(host.frame()[0], BLUE);
        assert_eq!(host.frame()[1..], [RED; 29]);

        let mut t = 3_200;
        while t <= 5_900 {
            host.tick(Instant::from_millis(t));
            let frame = host.frame();
            let blue = frame.iter().take_while(|led| **led == BLUE).count();
            assert!(frame[blue..].iter().all(|led| *led == RED));
            t += 100;
        }
        assert_eq!(host.frame()[..29], [BLUE; 29]);
        assert_eq!(host.frame()[29], RED);

        host.tick(Instant::from_millis(6_000));
        assert_eq!(*driver.last.borrow(), vec![BLUE; 30]);

        // Wrapped back to red, starting over from the first pixel
        host.tick(Instant::from_millis(6_100));
        assert_eq!(host.frame()[0], RED);
        assert_eq!(host.frame()[1..], [BLUE; 29]);
    }

    #[test]
    fn test_idle_host_shows_nominal_color() {
        let counter = TickRateCounter::new();
        let driver = Recorder::default();
        let mut host = host(driver.clone(), &counter, 8);

        assert_eq!(host.tick(Instant::from_millis(0)), Progress::Rendered);
        assert_eq!(*driver.last.borrow(), vec![WARM; 8]);

        host.set_color(BLUE);
        host.tick(Instant::from_millis(16));
        assert_eq!(*driver.last.borrow(), vec![BLUE; 8]);
        assert_eq!(*driver.writes.borrow(), 2);
    }

    #[test]
    fn test_pixel_count_is_clamped() {
        let counter = TickRateCounter::new();
        let host = host(Recorder::default(), &counter, 500);
        assert_eq!(host.pixel_count(), 30);
        assert_eq!(host.frame().len(), 30);
    }

    #[test]
    fn test_activation_replaces_effect() {
        let counter = TickRateCounter::new();
        let mut host = host(Recorder::default(), &counter, 30);

        host.activate(rainbow(), Instant::from_millis(0)).unwrap();
        assert_eq!(host.active_name(), Some("Rainbow"));
        assert_eq!(counter.outstanding(), 1);

        host.activate(wipe(), Instant::from_millis(10)).unwrap();
        assert_eq!(host.active_name(), Some("Wipe"));
        assert!(host.is_running());
        assert_eq!(counter.outstanding(), 1);

        let stopped = host.deactivate().unwrap();
        assert_eq!(stopped.name(), "Wipe");
        assert_eq!(stopped.state(), EffectState::Stopped);
        assert_eq!(counter.outstanding(), 0);
        assert!(host.active().is_none());
        assert!(host.deactivate().is_none());
    }

    #[test]
    fn test_refused_activation_falls_back_to_static_color() {
        let counter = TickRateCounter::new();
        let driver = Recorder::default();
        let mut host = host(driver.clone(), &counter, 4);
        host.activate(rainbow(), Instant::from_millis(0)).unwrap();

        let empty = ColorWipeEffect::default().with_colors(&[]).unwrap();
        let effect = AddressableEffect::new("Empty", EffectSlot::ColorWipe(empty)).unwrap();
        assert_eq!(
            host.activate(effect, Instant::from_millis(10)),
            Err(EffectError::EmptyColorList)
        );
        assert!(host.active().is_none());
        assert_eq!(counter.outstanding(), 0);

        host.tick(Instant::from_millis(20));
        assert_eq!(*driver.last.borrow(), vec![WARM; 4]);
    }

    #[test]
    fn test_scheduler_follows_tick_rate() {
        let counter = TickRateCounter::new();
        let mut scheduler = FrameScheduler::new(host(Recorder::default(), &counter, 30));

        assert_eq!(scheduler.frame_duration(), IDLE_FRAME_DURATION);
        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.sleep_duration, Duration::from_millis(16));
        assert_eq!(result.next_deadline, Instant::from_millis(16));

        scheduler
            .host_mut()
            .activate(rainbow(), Instant::from_millis(16))
            .unwrap();
        assert_eq!(scheduler.frame_duration(), HIGH_RATE_FRAME_DURATION);
        let result = scheduler.tick(Instant::from_millis(16));
        assert_eq!(result.progress, Progress::Rendered);
        assert_eq!(result.sleep_duration, Duration::from_millis(1));

        // A long stall drops the backlog
        let result = scheduler.tick(Instant::from_millis(1_000));
        assert_eq!(result.next_deadline, Instant::from_millis(1_001));

        scheduler.host_mut().deactivate();
        assert_eq!(scheduler.frame_duration(), IDLE_FRAME_DURATION);
    }
}
