//! Property-based tests for software volume and the sink contract.
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use platform::{PlaybackControls, Volume};
use playback::{scale_sample, PcmQueue, PcmSink};

proptest::proptest! {
    /// Scaled output equals round(s * v / 127), halves away from zero.
    #[test]
    fn scale_matches_rounded_reference(s in i16::MIN..=i16::MAX, v in 0u8..=127u8) {
        let expected = (f64::from(s) * f64::from(v) / 127.0).round();
        assert_eq!(f64::from(scale_sample(s, Volume::new(v))), expected);
    }

    /// Attenuation never increases magnitude.
    #[test]
    fn scale_never_amplifies(s in i16::MIN..=i16::MAX, v in 0u8..=127u8) {
        let out = scale_sample(s, Volume::new(v));
        assert!(i32::from(out).abs() <= i32::from(s).abs());
    }

    /// Full volume is the identity.
    #[test]
    fn max_volume_is_identity(s in i16::MIN..=i16::MAX) {
        assert_eq!(scale_sample(s, Volume::MAX), s);
    }

    /// pull always fills the whole buffer, whatever is queued.
    #[test]
    fn pull_always_returns_requested_length(
        queued in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..256),
        len in 0usize..512,
    ) {
        let q: PcmQueue<NoopRawMutex, 256> = PcmQueue::new();
        embassy_futures::block_on(q.push(&queued));
        let controls = PlaybackControls::new();
        let sink = PcmSink::new(&q, &controls);
        let mut out = vec![0xA5u8; len];
        assert_eq!(sink.pull(&mut out), len);
        let taken = queued.len().min(len);
        assert!(out[taken..].iter().all(|&b| b == 0));
    }
}
