//! Audio playback: MP3 decode pipeline, PCM queue and transport sink.
//!
//! ```text
//! Storage ─► DecodePipeline ─► PcmQueue (32 KiB) ─► PcmSink::pull ─► A2DP
//!                 ▲                                     ▲
//!                 └──────── PlaybackControls ───────────┘
//! ```
//!
//! The decode pipeline is the only producer and suspends when the queue is
//! full. The sink is the only consumer; it never blocks and pads underruns
//! with silence.
//!
//! # Features
//!
//! - `mp3`: nanomp3-backed [`mp3_decoder::NanoMp3Decoder`]
//! - `defmt` / `tracing`: logging backend

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![allow(async_fn_in_trait)]

#[macro_use]
mod fmt;

pub mod decoder;
pub mod input_buffer;
pub mod mp3_decoder;
pub mod pcm_queue;
pub mod pipeline;
pub mod sink;
pub mod volume;

pub use decoder::{FrameDecoder, FrameInfo, PcmFrame, MAX_PCM_BYTES, MAX_SAMPLES_PER_FRAME};
pub use input_buffer::InputBuffer;
pub use pcm_queue::{PcmQueue, SharedPcmQueue};
pub use pipeline::{DecodePipeline, PipelineConfig, TrackOutcome};
pub use sink::PcmSink;
pub use volume::{apply_volume, scale_sample};
