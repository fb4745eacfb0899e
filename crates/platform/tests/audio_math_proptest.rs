//! Property-based tests for volume arithmetic.
//! Verifies invariants hold for ALL inputs, not just fixed examples.

use platform::audio_types::Volume;

proptest::proptest! {
    /// Volume::new never panics and always lands in 0..=127.
    #[test]
    fn volume_new_always_in_range(raw in 0u8..=255u8) {
        assert!(Volume::new(raw).get() <= 127);
    }

    /// try_new accepts exactly the values new() leaves untouched.
    #[test]
    fn try_new_agrees_with_new(raw in 0u8..=255u8) {
        match Volume::try_new(raw) {
            Ok(v) => assert_eq!(v, Volume::new(raw)),
            Err(_) => assert!(raw > 127),
        }
    }

    /// Stepping up never lowers the volume and never leaves the range.
    #[test]
    fn step_up_is_monotone(raw in 0u8..=127u8, step in 0u8..=255u8) {
        let v = Volume::new(raw);
        let up = v.step_up(step);
        assert!(up >= v);
        assert!(up.get() <= 127);
    }

    /// Stepping down never raises the volume.
    #[test]
    fn step_down_is_monotone(raw in 0u8..=127u8, step in 0u8..=255u8) {
        let v = Volume::new(raw);
        assert!(v.step_down(step) <= v);
    }

    /// Up then down by the same step returns to the start when no bound was hit.
    #[test]
    fn step_round_trip_away_from_bounds(raw in 10u8..=117u8, step in 0u8..=10u8) {
        let v = Volume::new(raw);
        assert_eq!(v.step_up(step).step_down(step), v);
    }
}
