//! nanomp3-based MP3 frame decoder.
//!
//! Implements the `FrameDecoder` trait using the `nanomp3` crate.
//! nanomp3 is a pure-Rust, no_std c2rust translation of minimp3 with ARM
//! soundness fixes.
//!
//! # Feature flag
//!
//! The `nanomp3` dependency and the real decode path are both gated behind the
//! `mp3` feature so the crate compiles on targets that don't need MP3 support.
//! Without it the decoder consumes nothing and produces nothing.

use crate::decoder::{FrameDecoder, FrameInfo, PcmFrame};

// ─── Implementation ───────────────────────────────────────────────────────────

/// MP3 frame decoder backed by nanomp3.
///
/// `nanomp3::Decoder` has no internal buffering; the caller provides all
/// buffered bytes on each call and compacts by `bytes_consumed`.
pub struct NanoMp3Decoder {
    #[cfg(feature = "mp3")]
    inner: nanomp3::Decoder,
    /// f32 scratch for one frame; converted to i16 in place afterwards.
    #[cfg(feature = "mp3")]
    scratch: [f32; nanomp3::MAX_SAMPLES_PER_FRAME],
}

impl NanoMp3Decoder {
    /// Create a new MP3 decoder.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "mp3")]
            inner: nanomp3::Decoder::new(),
            #[cfg(feature = "mp3")]
            scratch: [0.0; nanomp3::MAX_SAMPLES_PER_FRAME],
        }
    }
}

impl Default for NanoMp3Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a float sample in `[-1.0, 1.0]` to signed 16-bit, clamping.
#[allow(clippy::cast_possible_truncation)] // Safety: clamped to [-1, 1] before scaling
#[allow(clippy::arithmetic_side_effects)] // f32 multiply cannot panic
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

impl FrameDecoder for NanoMp3Decoder {
    /// # nanomp3 API
    ///
    /// `nanomp3::Decoder::decode(mp3: &[u8], pcm: &mut [f32]) -> (usize, Option<FrameInfo>)`
    ///
    /// - Returns `(bytes_consumed, Some(FrameInfo))` on success.
    /// - Returns `(bytes_consumed, None)` when no frame was decoded (garbage
    ///   skipped, or not enough data for a whole frame).
    fn decode_frame(&mut self, input: &[u8], output: &mut PcmFrame) -> FrameInfo {
        if input.is_empty() {
            return FrameInfo::default();
        }

        #[cfg(feature = "mp3")]
        {
            let (consumed, info_opt) = self.inner.decode(input, &mut self.scratch);
            match info_opt {
                Some(info) => {
                    #[allow(clippy::cast_possible_truncation)] // Safety: 1 or 2 channels
                    let channels = info.channels.num() as u8;
                    let total = info
                        .samples_produced
                        .saturating_mul(usize::from(channels))
                        .min(output.samples.len());
                    for (dst, &src) in output
                        .samples
                        .iter_mut()
                        .zip(self.scratch.iter())
                        .take(total)
                    {
                        *dst = f32_to_i16(src);
                    }
                    FrameInfo {
                        samples: info.samples_produced,
                        channels,
                        sample_rate: info.sample_rate,
                        bytes_consumed: consumed,
                    }
                }
                None => FrameInfo {
                    bytes_consumed: consumed,
                    ..FrameInfo::default()
                },
            }
        }

        #[cfg(not(feature = "mp3"))]
        {
            let _ = output;
            FrameInfo::default()
        }
    }

    fn reset(&mut self) {
        #[cfg(feature = "mp3")]
        {
            self.inner = nanomp3::Decoder::new();
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)] // Test indexing into known-length buffers is safe
mod tests {
    use super::*;

    #[test]
    fn test_nanomp3_decoder_implements_frame_decoder() {
        fn assert_impl<T: crate::decoder::FrameDecoder>() {}
        assert_impl::<NanoMp3Decoder>();
    }

    #[test]
    fn test_nanomp3_decode_empty_produces_nothing() {
        let mut decoder = NanoMp3Decoder::new();
        let mut output = PcmFrame::default();
        let info = decoder.decode_frame(&[], &mut output);
        assert_eq!(info, FrameInfo::default());
    }

    #[test]
    fn test_nanomp3_decode_garbage_produces_no_samples() {
        let mut decoder = NanoMp3Decoder::new();
        let mut output = PcmFrame::default();
        let garbage = [0x00u8; 100];
        let info = decoder.decode_frame(&garbage, &mut output);
        assert_eq!(info.samples, 0);
        assert!(info.bytes_consumed <= garbage.len());
    }

    #[test]
    fn test_f32_to_i16_clamps() {
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(f32_to_i16(1.0), i16::MAX);
        assert_eq!(f32_to_i16(2.0), i16::MAX);
        assert_eq!(f32_to_i16(-2.0), -i16::MAX);
    }
}
