mod tests {
    use embassy_time::Instant;
    use pixel_effects::{
        Color, ColorWipeEffect, Effect, EffectError, Progress, Tick, WipeColor,
        effect::MAX_WIPE_COLORS,
    };
    use rand::{SeedableRng, rngs::SmallRng};

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn run(
        wipe: &mut ColorWipeEffect,
        leds: &mut [Color],
        rng: &mut SmallRng,
        from: u64,
        to: u64,
        step: u64,
    ) {
        let mut t = from;
        while t <= to {
            let mut tick = Tick::new(Instant::from_millis(t), Color::WHITE, &mut *rng);
            wipe.apply(&mut tick, leds);
            t += step;
        }
    }

    #[test]
    fn test_fills_strip_after_n_intervals() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut leds = [Color::BLACK; 30];
        let mut wipe = ColorWipeEffect::default()
            .with_colors(&[WipeColor::new(RED), WipeColor::new(BLUE)])
            .unwrap();
        wipe.start(Instant::from_millis(0), &mut leds).unwrap();

        run(&mut wipe, &mut leds, &mut rng, 0, 2_990, 10);
        assert_eq!(leds[..29], [RED; 29]);
        assert_eq!(leds[29], Color::BLACK);

        run(&mut wipe, &mut leds, &mut rng, 3_000, 3_000, 10);
        assert_eq!(leds, [RED; 30]);
        assert_eq!(wipe.at_color(), 1);
        assert_eq!(wipe.leds_added(), 0);
    }

    #[test]
    fn test_reverse_paints_from_the_end() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut leds = [Color::BLACK; 5];
        let mut wipe = ColorWipeEffect::default()
            .with_colors(&[WipeColor::new(RED)])
            .unwrap()
            .with_reverse(true);
        wipe.start(Instant::from_millis(0), &mut leds).unwrap();

        run(&mut wipe, &mut leds, &mut rng, 100, 200, 100);
        assert_eq!(leds, [Color::BLACK, Color::BLACK, Color::BLACK, RED, RED]);
    }

    #[test]
    fn test_color_index_wraps() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut leds = [Color::BLACK; 3];
        let mut wipe = ColorWipeEffect::default()
            .with_colors(&[WipeColor::new(RED), WipeColor::new(BLUE)])
            .unwrap()
            .with_add_led_interval(10);
        wipe.start(Instant::from_millis(0), &mut leds).unwrap();

        run(&mut wipe, &mut leds, &mut rng, 10, 60, 10);
        assert_eq!(leds, [BLUE; 3]);
        assert_eq!(wipe.at_color(), 0);

        run(&mut wipe, &mut leds, &mut rng, 70, 70, 10);
        assert_eq!(leds, [RED, BLUE, BLUE]);
    }

    #[test]
    fn test_num_leds_is_clamped() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut leds = [Color::BLACK; 4];
        let mut wipe = ColorWipeEffect::default()
            .with_colors(&[
                WipeColor::new(RED).with_num_leds(2),
                WipeColor::new(BLUE).with_num_leds(100),
            ])
            .unwrap()
            .with_add_led_interval(0);
        wipe.start(Instant::from_millis(0), &mut leds).unwrap();

        run(&mut wipe, &mut leds, &mut rng, 0, 1, 1);
        assert_eq!(leds, [RED, RED, Color::BLACK, Color::BLACK]);
        assert_eq!(wipe.at_color(), 1);

        run(&mut wipe, &mut leds, &mut rng, 2, 5, 1);
        assert_eq!(leds, [BLUE; 4]);
        assert_eq!(wipe.at_color(), 0);
    }

    #[test]
    fn test_random_color_drawn_once_per_slot() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut leds = [Color::BLACK; 6];
        let mut wipe = ColorWipeEffect::default()
            .with_colors(&[WipeColor::random()])
            .unwrap()
            .with_add_led_interval(1);
        wipe.start(Instant::from_millis(0), &mut leds).unwrap();

        run(&mut wipe, &mut leds, &mut rng, 1, 6, 1);
        assert!(!leds[0].is_black());
        assert!(leds.iter().all(|led| *led == leds[0]));
    }

    #[test]
    fn test_default_is_one_random_color() {
        let wipe = ColorWipeEffect::default();
        assert_eq!(wipe.colors(), &[WipeColor::random()]);
    }

    #[test]
    fn test_empty_colors_refused() {
        let mut leds = [Color::BLACK; 3];
        let mut wipe = ColorWipeEffect::default().with_colors(&[]).unwrap();
        assert_eq!(
            wipe.start(Instant::from_millis(0), &mut leds),
            Err(EffectError::EmptyColorList)
        );

        let mut rng = SmallRng::seed_from_u64(5);
        let mut tick = Tick::new(Instant::from_millis(1_000), RED, &mut rng);
        assert_eq!(wipe.apply(&mut tick, &mut leds), Progress::Skipped);
        assert_eq!(leds, [Color::BLACK; 3]);
    }

    #[test]
    fn test_too_many_colors() {
        let colors = [WipeColor::new(RED); MAX_WIPE_COLORS + 1];
        assert_eq!(
            ColorWipeEffect::default().with_colors(&colors).err(),
            Some(EffectError::TooManyColors(MAX_WIPE_COLORS))
        );
    }
}
