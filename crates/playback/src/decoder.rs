//! Audio decoder abstractions: PCM frame type and the codec trait.
//!
//! The pipeline hands the codec whatever compressed bytes are buffered and
//! gets back one [`FrameInfo`] per call. A codec never fails: "no frame" is
//! reported as zero samples, and the pipeline decides between discarding
//! consumed bytes and resynchronising.
//!
//! # Decoder crate selection rationale
//!
//! * **MP3**: `nanomp3` (pure-Rust, `no_std`, c2rust translation of minimp3 with
//!   soundness fixes). `minimp3` / `minimp3-rs` have ARM-specific UB issues.
//!   `symphonia` requires `std` and is too large for internal flash.

/// Largest number of interleaved samples one MP3 frame can produce
/// (1 152 per channel, stereo).
pub const MAX_SAMPLES_PER_FRAME: usize = 1152 * 2;

/// Largest PCM byte count one frame can produce (16-bit samples).
pub const MAX_PCM_BYTES: usize = MAX_SAMPLES_PER_FRAME * 2;

/// Result of one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameInfo {
    /// Samples produced per channel; 0 when no frame was decoded.
    pub samples: usize,
    /// Channel count of the decoded frame (1 = mono, 2 = stereo).
    pub channels: u8,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Compressed bytes the codec consumed (frame or skipped garbage).
    pub bytes_consumed: usize,
}

impl FrameInfo {
    /// PCM byte length of the frame: `samples * channels * 2`, capped at
    /// [`MAX_PCM_BYTES`].
    pub fn pcm_bytes(&self) -> usize {
        self.samples
            .saturating_mul(usize::from(self.channels))
            .saturating_mul(2)
            .min(MAX_PCM_BYTES)
    }
}

/// Interleaved signed 16-bit PCM for one decoded frame.
///
/// The array is always fully allocated; the accompanying [`FrameInfo`] says
/// how much of it is valid.
#[derive(Clone)]
pub struct PcmFrame {
    /// Interleaved samples (L, R, L, R, … for stereo).
    pub samples: [i16; MAX_SAMPLES_PER_FRAME],
}

impl PcmFrame {
    /// Create a zeroed `PcmFrame` suitable for use as an output buffer.
    pub const fn zeroed() -> Self {
        Self {
            samples: [0i16; MAX_SAMPLES_PER_FRAME],
        }
    }

    /// Serialise the valid part of the frame as little-endian bytes.
    ///
    /// Returns the number of bytes written, `min(info.pcm_bytes(), out.len())`
    /// rounded down to whole samples.
    pub fn write_le_bytes(&self, info: &FrameInfo, out: &mut [u8]) -> usize {
        let mut written = 0usize;
        let limit = info.pcm_bytes().min(out.len());
        for (dst, sample) in out
            .get_mut(..limit)
            .unwrap_or(&mut [])
            .chunks_exact_mut(2)
            .zip(self.samples.iter())
        {
            dst.copy_from_slice(&sample.to_le_bytes());
            written = written.saturating_add(2);
        }
        written
    }
}

impl Default for PcmFrame {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Trait for stateful, frame-by-frame audio decoders.
///
/// Each call to [`decode_frame`] inspects `input`, decodes at most one frame
/// into `output`, and reports how many input bytes it consumed.
/// Implementations must be `no_std`-safe and must not allocate.
///
/// [`decode_frame`]: FrameDecoder::decode_frame
pub trait FrameDecoder {
    /// Decode one frame from `input` into `output`.
    ///
    /// - `samples > 0`: a frame was decoded.
    /// - `samples == 0 && bytes_consumed > 0`: bytes were skipped (tags,
    ///   garbage, a frame without audio).
    /// - `samples == 0 && bytes_consumed == 0`: more data needed, or the
    ///   codec lost sync.
    fn decode_frame(&mut self, input: &[u8], output: &mut PcmFrame) -> FrameInfo;

    /// Forget inter-frame state (bit reservoir, overlap) before a new file.
    fn reset(&mut self);
}
