//! Application configuration and constants
//!
//! This module defines central configuration values used across the
//! application. Runtime-tunable settings live in the `PipelineConfig` /
//! `LinkConfig` structs of the feature crates; their defaults reference these
//! constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "SD A2DP Source";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name this device advertises over Bluetooth Classic.
pub const LOCAL_DEVICE_NAME: &str = "ESP_A2DP_SRC";

/// EIR name of the speaker the discovery filter connects to.
pub const PEER_DEVICE_NAME: &str = "ESP_SPEAKER";

/// Mount point of the SD card; the playlist scan enumerates this directory.
pub const MOUNT_POINT: &str = "/sdcard";

/// Maximum number of tracks kept from one scan.
pub const MAX_PLAYLIST_SIZE: usize = 20;

/// Maximum stored path length (`<mount>/<name>`), in bytes.
pub const MAX_PATH_LEN: usize = 300;

/// Capacity of the decoder → sink PCM queue, in bytes (32 KiB).
pub const PCM_QUEUE_BYTES: usize = 32 * 1024;

/// Capacity of the compressed-input staging buffer, in bytes (4 KiB).
pub const INPUT_BUFFER_BYTES: usize = 4 * 1024;

/// Initial volume on the AVRCP 0–127 scale (about 16 %).
pub const DEFAULT_VOLUME: u8 = 20;

/// Volume change per VolumeUp / VolumeDown press.
pub const VOLUME_STEP: u8 = 5;

/// Period of the link heartbeat timer.
pub const HEARTBEAT_PERIOD_MS: u64 = 10_000;

/// Heartbeats spent in `Connecting` before the attempt is abandoned.
pub const CONNECT_TIMEOUT_TICKS: u8 = 2;

/// Depth of the serialized event channel.
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Size of one transport pull for the default SBC cadence, in bytes.
pub const SINK_PULL_BYTES: usize = 512;
