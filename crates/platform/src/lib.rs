//! Hardware Abstraction Layer (HAL) for the SD-card A2DP source
//!
//! This crate provides trait-based abstractions for every external
//! collaborator of the player, enabling development and testing without the
//! Bluetooth controller, SD card or buttons attached.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layers (playback, bluetooth, library)
//!         ↓
//! Platform HAL (this crate - trait abstractions + shared controls)
//!         ↓
//! Vendor stack / filesystem / GPIO
//! ```
//!
//! # Abstraction Levels
//!
//! - [`Storage`] - File system access (SD card, local directory)
//! - [`InputDevice`] - Debounced button input
//! - [`A2dpSource`], [`DeviceDiscovery`], [`AvrcpController`] - Commands into
//!   the wireless host stack
//! - [`PlaybackControls`] - Lock-free scalars shared between contexts
//!
//! # Features
//!
//! - `std`: Local filesystem storage and in-memory mocks (emulator, tests)
//! - `defmt`: Enable defmt derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{File, Storage};
//!
//! async fn first_byte<S: Storage>(storage: &mut S) -> Option<u8> {
//!     let mut file = storage.open_file("/sdcard/track.mp3").await.ok()?;
//!     let mut buf = [0u8; 1];
//!     file.read(&mut buf).await.ok()?;
//!     Some(buf[0])
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // accessors - callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod audio_types;
pub mod bluetooth;
pub mod config;
pub mod controls;
pub mod input;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod storage_local;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use audio_types::{OutOfRangeError, Volume};
pub use bluetooth::{A2dpSource, AvrcpController, BdAddr, DeviceDiscovery, MediaCtrl};
pub use controls::PlaybackControls;
pub use input::{Button, InputDevice, InputEvent};
pub use storage::{File, Storage};
