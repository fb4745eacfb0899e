//! Music library management: SD-card scan and the cyclic playlist.
//!
//! # Modules
//!
//! - [`track`] - `Track` record (path + playlist position)
//! - [`playlist`] - fixed-capacity, cyclic `Playlist`
//! - [`scanner`] - directory walk and `.mp3` name filtering

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod playlist;
pub mod scanner;
pub mod track;

// Top-level re-exports for convenience
pub use playlist::{Playlist, PlaylistError, MAX_TRACKS};
pub use scanner::{is_playable, join_path, scan_playlist, ScanError};
pub use track::{Track, TrackPath};
