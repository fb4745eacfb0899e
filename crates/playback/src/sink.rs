//! Transport-facing pull adapter.
//!
//! The A2DP stack asks for a fixed number of PCM bytes on its own clock and
//! must always get exactly that many. [`PcmSink::pull`] drains what the
//! decoder has queued, pads the rest with silence and applies the current
//! volume. It never blocks and never fails.

use embassy_sync::blocking_mutex::raw::RawMutex;
use platform::PlaybackControls;

use crate::pcm_queue::PcmQueue;
use crate::volume::apply_volume;

/// Consumer end of the PCM queue.
pub struct PcmSink<'a, M: RawMutex, const N: usize> {
    queue: &'a PcmQueue<M, N>,
    controls: &'a PlaybackControls,
}

impl<'a, M: RawMutex, const N: usize> PcmSink<'a, M, N> {
    /// Create a sink over `queue`, reading volume from `controls`.
    pub const fn new(queue: &'a PcmQueue<M, N>, controls: &'a PlaybackControls) -> Self {
        Self { queue, controls }
    }

    /// Fill `out` completely and return `out.len()`.
    ///
    /// Queued bytes come first; an underrun is zero-filled. Volume scaling
    /// runs after padding (silence is unaffected by scaling).
    pub fn pull(&self, out: &mut [u8]) -> usize {
        let mut filled = 0usize;
        while let Some(rest) = out.get_mut(filled..) {
            if rest.is_empty() {
                break;
            }
            let n = self.queue.pop_upto(rest);
            if n == 0 {
                rest.fill(0);
                break;
            }
            filled = filled.saturating_add(n);
        }
        apply_volume(out, self.controls.volume());
        out.len()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use platform::Volume;

    #[test]
    fn test_pull_on_empty_queue_is_silence() {
        let q: PcmQueue<NoopRawMutex, 64> = PcmQueue::new();
        let controls = PlaybackControls::new();
        let sink = PcmSink::new(&q, &controls);
        let mut out = [0xAAu8; 32];
        for _ in 0..3 {
            assert_eq!(sink.pull(&mut out), 32);
            assert!(out.iter().all(|&b| b == 0));
        }
    }

    #[tokio::test]
    async fn test_pull_pads_partial_data() {
        let q: PcmQueue<NoopRawMutex, 64> = PcmQueue::new();
        let controls = PlaybackControls::new();
        controls.set_volume(Volume::MAX);
        q.push(&[1, 2, 3, 4]).await;

        let sink = PcmSink::new(&q, &controls);
        let mut out = [0xAAu8; 8];
        assert_eq!(sink.pull(&mut out), 8);
        assert_eq!(out, [1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_pull_applies_volume() {
        let q: PcmQueue<NoopRawMutex, 64> = PcmQueue::new();
        let controls = PlaybackControls::new();
        controls.set_volume(Volume::new(20));
        q.push(&1000i16.to_le_bytes()).await;

        let sink = PcmSink::new(&q, &controls);
        let mut out = [0u8; 4];
        sink.pull(&mut out);
        assert_eq!(i16::from_le_bytes([out[0], out[1]]), 157);
        assert_eq!(&out[2..], &[0, 0]);
    }
}
