//! Bluetooth link management for the A2DP source.
//!
//! ```text
//! stack callbacks ─┐
//! heartbeat ───────┼─► EventQueue ─► Dispatcher ─► LinkMachine ─┐
//! input task ──────┘                     │         VolumeSync ──┤ Effects
//!                                        ▼                      ▼
//!                                    LinkStatus     A2dpSource / DeviceDiscovery /
//!                                                   AvrcpController, PlaybackControls
//! ```
//!
//! The state machine itself is pure (`machine::transition`); only the
//! dispatcher talks to the host stack. This crate is `no_std` and uses
//! `embassy-sync` / `embassy-time` for the queue and the heartbeat.
//!
//! # Features
//!
//! - `defmt` / `tracing`: logging backend

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

#[macro_use]
mod fmt;

pub mod avrcp;
pub mod discovery;
pub mod dispatcher;
pub mod event;
pub mod machine;
pub mod state;

pub use avrcp::VolumeSync;
pub use dispatcher::{heartbeat, Dispatcher, EventQueue, QueueFull};
pub use event::{
    AvrcpEvent, ConnectionStatus, DiscoveryEvent, Effect, Effects, Event, FoundDevice,
};
pub use machine::{transition, LinkConfig, LinkMachine, Transition};
pub use state::{ConnectionState, Link, LinkState, LinkStatus, MediaState};
