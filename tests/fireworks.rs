mod tests {
    use embassy_time::Instant;
    use pixel_effects::{Color, Effect, FireworksEffect, Progress, Tick};
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    const ORANGE: Color = Color::new(255, 120, 0);

    fn scatter(leds: &mut [Color], rng: &mut SmallRng) {
        for led in leds.iter_mut() {
            *led = Color::new_rgbw(rng.r#gen(), rng.r#gen(), rng.r#gen(), rng.r#gen());
        }
    }

    #[test]
    fn test_start_clears_strip() {
        let mut leds = [Color::WHITE; 8];
        let mut fireworks = FireworksEffect::default();
        fireworks.start(Instant::from_millis(0), &mut leds).unwrap();
        assert_eq!(leds, [Color::BLACK; 8]);
    }

    #[test]
    fn test_without_sparks_only_decays() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut leds = [Color::BLACK; 40];
        let mut fireworks = FireworksEffect::default()
            .with_spark_probability(0.0)
            .with_fade_out_rate(10);
        fireworks.start(Instant::from_millis(0), &mut leds).unwrap();
        scatter(&mut leds, &mut rng);

        for k in 1..300u64 {
            let before = leds;
            let mut tick = Tick::new(Instant::from_millis(k * 32), ORANGE, &mut rng);
            fireworks.apply(&mut tick, &mut leds);
            for (old, new) in before.iter().zip(leds.iter()) {
                assert!(new.r <= old.r && new.g <= old.g && new.b <= old.b && new.w <= old.w);
            }
        }
        assert_eq!(leds, [Color::BLACK; 40]);
    }

    #[test]
    fn test_full_fade_clears_in_one_update() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut leds = [Color::BLACK; 40];
        let mut fireworks = FireworksEffect::default()
            .with_spark_probability(0.0)
            .with_fade_out_rate(255);
        fireworks.start(Instant::from_millis(0), &mut leds).unwrap();
        scatter(&mut leds, &mut rng);

        let mut tick = Tick::new(Instant::from_millis(32), ORANGE, &mut rng);
        assert_eq!(fireworks.apply(&mut tick, &mut leds), Progress::Rendered);
        assert_eq!(leds, [Color::BLACK; 40]);
    }

    #[test]
    fn test_sparks_use_nominal_color() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut leds = [Color::BLACK; 40];
        let mut fireworks = FireworksEffect::default().with_spark_probability(1.0);
        fireworks.start(Instant::from_millis(0), &mut leds).unwrap();

        let mut tick = Tick::new(Instant::from_millis(32), ORANGE, &mut rng);
        fireworks.apply(&mut tick, &mut leds);
        let sparks = leds.iter().filter(|led| **led == ORANGE).count();
        assert!((1..=4).contains(&sparks));
        assert!(leds.iter().all(|led| *led == ORANGE || led.is_black()));
    }

    #[test]
    fn test_sparks_use_random_color() {
        let mut rng = SmallRng::seed_from_u64(22);
        let mut leds = [Color::BLACK; 40];
        let mut fireworks = FireworksEffect::default()
            .with_spark_probability(1.0)
            .with_random_color(true);
        fireworks.start(Instant::from_millis(0), &mut leds).unwrap();

        let mut tick = Tick::new(Instant::from_millis(32), Color::BLACK, &mut rng);
        fireworks.apply(&mut tick, &mut leds);
        let lit: Vec<_> = leds.iter().filter(|led| !led.is_black()).collect();
        assert!(!lit.is_empty());
        assert!(lit.iter().all(|led| led.max_channel() == 255));
    }

    #[test]
    fn test_gated_by_update_interval() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut leds = [Color::BLACK; 4];
        let mut fireworks = FireworksEffect::default().with_spark_probability(1.0);
        fireworks.start(Instant::from_millis(0), &mut leds).unwrap();

        let mut tick = Tick::new(Instant::from_millis(31), ORANGE, &mut rng);
        assert_eq!(fireworks.apply(&mut tick, &mut leds), Progress::Skipped);
        assert_eq!(leds, [Color::BLACK; 4]);
    }
}
