//! SD-card MP3 player streaming to a Bluetooth speaker.
//!
//! This crate wires the feature crates together:
//!
//! ```text
//! Application Layer (this crate: app, input, status, emulator)
//!         ↓
//! Feature Layers (playback, bluetooth)
//!         ↓
//! Platform HAL (platform)
//! ```
//!
//! # Features
//!
//! - `emulator` - Desktop build: local music directory, loopback speaker,
//!   stdin controls (`cargo run -p firmware --bin emulator --features emulator`)
//! - `std` - Enable standard library (for emulator and testing)
//! - `defmt` / `tracing` - Logging backend

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

pub mod app;
pub mod config;
pub mod input;
pub mod loopback;
pub mod status;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use app::{run, AppShared};
pub use config::AppConfig;
pub use input::InputHandler;
pub use loopback::LoopbackTransport;
pub use status::StatusSnapshot;
