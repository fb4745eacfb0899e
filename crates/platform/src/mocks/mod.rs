//! Mock implementations for testing
//!
//! This module provides in-memory implementations of the platform traits for
//! unit tests, integration tests and the host emulator.

extern crate std;

use std::collections::{BTreeMap, VecDeque};
use std::string::{String, ToString};
use std::vec::Vec;

use crate::bluetooth::{A2dpSource, AvrcpController, BdAddr, DeviceDiscovery, MediaCtrl};
use crate::input::{InputDevice, InputEvent};
use crate::storage::{File, Storage};

// ── Storage ──────────────────────────────────────────────────────────────────

/// Error returned by [`MemStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemStorageError {
    /// No file or directory at the requested path.
    NotFound,
}

/// In-memory file system keyed by full path.
///
/// Directory listing returns files whose parent is exactly the requested
/// directory, in insertion order, mimicking a FAT directory walk.
#[derive(Default)]
pub struct MemStorage {
    files: BTreeMap<String, Vec<u8>>,
    order: Vec<String>,
    /// Upper bound on bytes returned by a single read; 0 means unlimited.
    read_chunk: usize,
}

impl MemStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: &str, contents: &[u8]) {
        if self.files.insert(path.to_string(), contents.to_vec()).is_none() {
            self.order.push(path.to_string());
        }
    }

    /// Builder form of [`MemStorage::insert`].
    #[must_use]
    pub fn with_file(mut self, path: &str, contents: &[u8]) -> Self {
        self.insert(path, contents);
        self
    }

    /// Limit every read to at most `chunk` bytes, like a slow card.
    #[must_use]
    pub fn with_read_chunk(mut self, chunk: usize) -> Self {
        self.read_chunk = chunk;
        self
    }

    /// Remove a file.
    pub fn remove(&mut self, path: &str) {
        self.files.remove(path);
        self.order.retain(|p| p != path);
    }
}

fn split_parent(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

/// Open handle on a [`MemStorage`] file (holds a copy of the contents).
pub struct MemFile {
    data: Vec<u8>,
    pos: usize,
    read_chunk: usize,
}

impl File for MemFile {
    type Error = MemStorageError;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.data.get(self.pos..).unwrap_or(&[]);
        let mut n = remaining.len().min(buf.len());
        if self.read_chunk > 0 {
            n = n.min(self.read_chunk);
        }
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), remaining.get(..n)) {
            dst.copy_from_slice(src);
        }
        self.pos = self.pos.saturating_add(n);
        Ok(n)
    }

    async fn seek(&mut self, pos: u64) -> Result<u64, Self::Error> {
        self.pos = usize::try_from(pos).unwrap_or(usize::MAX).min(self.data.len());
        Ok(self.pos as u64)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl Storage for MemStorage {
    type Error = MemStorageError;
    type File = MemFile;

    async fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        let data = self.files.get(path).ok_or(MemStorageError::NotFound)?.clone();
        Ok(MemFile {
            data,
            pos: 0,
            read_chunk: self.read_chunk,
        })
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.files.contains_key(path))
    }

    async fn list_dir<F>(&mut self, dir: &str, mut visit: F) -> Result<(), Self::Error>
    where
        F: FnMut(&str) -> bool,
    {
        let dir = dir.trim_end_matches('/');
        let mut found = false;
        for path in &self.order {
            let (parent, name) = split_parent(path);
            if parent == dir {
                found = true;
                if !visit(name) {
                    break;
                }
            }
        }
        if found || self.order.is_empty() || dir.is_empty() {
            Ok(())
        } else {
            Err(MemStorageError::NotFound)
        }
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Mock input device
pub struct MockInput {
    events: VecDeque<InputEvent>,
}

impl MockInput {
    /// Create new mock input
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
        }
    }

    /// Add event to queue
    pub fn add_event(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDevice for MockInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        loop {
            if let Some(event) = self.events.pop_front() {
                return event;
            }
            embassy_futures::yield_now().await;
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

// ── Bluetooth transport ──────────────────────────────────────────────────────

/// Every request a [`RecordingTransport`] received, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    /// `A2dpSource::connect`
    Connect(BdAddr),
    /// `A2dpSource::disconnect`
    Disconnect(BdAddr),
    /// `A2dpSource::media_ctrl`
    MediaCtrl(MediaCtrl),
    /// `DeviceDiscovery::start_discovery`
    StartDiscovery,
    /// `DeviceDiscovery::cancel_discovery`
    CancelDiscovery,
    /// `AvrcpController::get_capabilities`
    GetCapabilities,
    /// `AvrcpController::register_volume_notification`
    RegisterVolumeNotification,
    /// `AvrcpController::set_absolute_volume`
    SetAbsoluteVolume(u8),
}

/// Error returned by a [`RecordingTransport`] configured to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportRejected;

/// Host-stack stand-in that records requests instead of performing them.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Vec<TransportCall>,
    fail: bool,
}

impl RecordingTransport {
    /// Create a transport that accepts every request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent request return an error (still recorded).
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Requests received so far.
    pub fn calls(&self) -> &[TransportCall] {
        &self.calls
    }

    /// Drain the recorded requests.
    pub fn take_calls(&mut self) -> Vec<TransportCall> {
        core::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: TransportCall) -> Result<(), TransportRejected> {
        self.calls.push(call);
        if self.fail {
            Err(TransportRejected)
        } else {
            Ok(())
        }
    }
}

impl A2dpSource for RecordingTransport {
    type Error = TransportRejected;

    async fn connect(&mut self, peer: BdAddr) -> Result<(), Self::Error> {
        self.record(TransportCall::Connect(peer))
    }

    async fn disconnect(&mut self, peer: BdAddr) -> Result<(), Self::Error> {
        self.record(TransportCall::Disconnect(peer))
    }

    async fn media_ctrl(&mut self, cmd: MediaCtrl) -> Result<(), Self::Error> {
        self.record(TransportCall::MediaCtrl(cmd))
    }
}

impl DeviceDiscovery for RecordingTransport {
    type Error = TransportRejected;

    async fn start_discovery(&mut self) -> Result<(), Self::Error> {
        self.record(TransportCall::StartDiscovery)
    }

    async fn cancel_discovery(&mut self) -> Result<(), Self::Error> {
        self.record(TransportCall::CancelDiscovery)
    }
}

impl AvrcpController for RecordingTransport {
    type Error = TransportRejected;

    async fn get_capabilities(&mut self) -> Result<(), Self::Error> {
        self.record(TransportCall::GetCapabilities)
    }

    async fn register_volume_notification(&mut self) -> Result<(), Self::Error> {
        self.record(TransportCall::RegisterVolumeNotification)
    }

    async fn set_absolute_volume(&mut self, volume: u8) -> Result<(), Self::Error> {
        self.record(TransportCall::SetAbsoluteVolume(volume))
    }
}
