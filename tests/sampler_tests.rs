//! Sampler unit tests

#[cfg(test)]
mod tests {
    use scene_populator::sampler::{PlacementSampler, UniformSampler};
    use scene_populator::types::{Hsv, SpawnVolume, Vec3};

    use approx::assert_relative_eq;

    fn make_volume() -> SpawnVolume {
        SpawnVolume::new(Vec3::new(-5.0, 3.0, -5.0), Vec3::new(5.0, 10.0, 5.0))
    }

    // -----------------------------------------------------------------------
    // Determinism
    // -----------------------------------------------------------------------

    #[test]
    fn equal_seeds_replay_identical_draws() {
        let volume = make_volume();
        let mut a = UniformSampler::seeded(42);
        let mut b = UniformSampler::seeded(42);

        for _ in 0..32 {
            assert_eq!(a.bright_color(), b.bright_color());
            assert_eq!(a.point_in(&volume), b.point_in(&volume));
        }
    }

    #[test]
    fn different_seeds_produce_different_draws() {
        let volume = make_volume();
        let mut a = UniformSampler::seeded(1);
        let mut b = UniformSampler::seeded(999999);

        // Check several draws – very unlikely to all be identical.
        let all_same = (0..8).all(|_| a.point_in(&volume) == b.point_in(&volume));
        assert!(!all_same, "at least one draw should differ between seeds");
    }

    // -----------------------------------------------------------------------
    // Draw domains
    // -----------------------------------------------------------------------

    #[test]
    fn points_stay_inside_the_volume() {
        let volume = make_volume();
        let mut sampler = UniformSampler::seeded(7);

        for _ in 0..256 {
            let p = sampler.point_in(&volume);
            assert!(volume.contains(p), "point {} escaped the volume", p);
        }
    }

    #[test]
    fn colors_are_always_fully_saturated_and_bright() {
        let mut sampler = UniformSampler::seeded(7);

        for _ in 0..256 {
            let color = sampler.bright_color();
            assert_eq!(color.s, 1.0);
            assert_eq!(color.v, 1.0);
            assert!(
                (0.0..360.0).contains(&color.h),
                "hue {} out of range",
                color.h
            );
        }
    }

    // -----------------------------------------------------------------------
    // HSV → RGB conversion
    // -----------------------------------------------------------------------

    #[test]
    fn primary_hues_convert_exactly() {
        assert_eq!(Hsv::new(0.0, 1.0, 1.0).to_rgb(), [1.0, 0.0, 0.0]);
        assert_eq!(Hsv::new(120.0, 1.0, 1.0).to_rgb(), [0.0, 1.0, 0.0]);
        assert_eq!(Hsv::new(240.0, 1.0, 1.0).to_rgb(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn full_saturation_and_value_is_never_muted() {
        // One channel pegged at 1, one at 0 – no whites, blacks, or grays.
        for step in 0..36 {
            let rgb = Hsv::new(step as f32 * 10.0, 1.0, 1.0).to_rgb();
            let max = rgb[0].max(rgb[1]).max(rgb[2]);
            let min = rgb[0].min(rgb[1]).min(rgb[2]);
            assert_relative_eq!(max, 1.0, epsilon = 1e-5);
            assert_relative_eq!(min, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_saturation_is_gray_at_value() {
        let rgb = Hsv::new(200.0, 0.0, 0.25).to_rgb();
        assert_relative_eq!(rgb[0], 0.25, epsilon = 1e-5);
        assert_relative_eq!(rgb[1], 0.25, epsilon = 1e-5);
        assert_relative_eq!(rgb[2], 0.25, epsilon = 1e-5);
    }

    #[test]
    fn hue_wraps_past_a_full_turn() {
        assert_eq!(
            Hsv::new(360.0, 1.0, 1.0).to_rgb(),
            Hsv::new(0.0, 1.0, 1.0).to_rgb()
        );
    }
}
