//! Shared fixtures for playback integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use playback::{FrameDecoder, FrameInfo, PcmFrame};

/// Codec stand-in: every `frame_len` input bytes decode to one stereo frame
/// of `samples` samples per channel, each sample equal to the frame's first
/// byte.
pub struct FixedFrameDecoder {
    pub frame_len: usize,
    pub samples: usize,
    pub resets: usize,
}

impl FixedFrameDecoder {
    pub fn new(frame_len: usize, samples: usize) -> Self {
        Self {
            frame_len,
            samples,
            resets: 0,
        }
    }
}

impl FrameDecoder for FixedFrameDecoder {
    fn decode_frame(&mut self, input: &[u8], output: &mut PcmFrame) -> FrameInfo {
        if input.len() < self.frame_len {
            return FrameInfo::default();
        }
        let value = i16::from(input[0]);
        for s in output.samples.iter_mut().take(self.samples * 2) {
            *s = value;
        }
        FrameInfo {
            samples: self.samples,
            channels: 2,
            sample_rate: 44_100,
            bytes_consumed: self.frame_len,
        }
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// Lost-sync codec that records `(input length, first byte)` of every call.
#[derive(Default)]
pub struct SeenInputs {
    pub calls: Arc<Mutex<Vec<(usize, u8)>>>,
}

impl FrameDecoder for SeenInputs {
    fn decode_frame(&mut self, input: &[u8], _output: &mut PcmFrame) -> FrameInfo {
        let first = input.first().copied().unwrap_or(0);
        self.calls.lock().unwrap().push((input.len(), first));
        FrameInfo::default()
    }

    fn reset(&mut self) {}
}
