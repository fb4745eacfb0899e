//! Lock-free playback controls shared between execution contexts.
//!
//! Writers: the input task (buttons), the bluetooth dispatcher (AVRCP volume).
//! Readers: the decode task (intents, rescan), the sink pull (volume), the
//! display (everything). Every field is a single atomic word: a reader may see
//! a value that is stale by one event, never a torn one.
//!
//! Next / previous / rescan are *requests*: they are set by a writer and
//! consumed with a swap by the decode task, so each press acts at most once.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::audio_types::Volume;
use crate::config::DEFAULT_VOLUME;

/// Sentinel stored in `current_index` while no playlist is loaded.
const NO_TRACK: usize = usize::MAX;

/// Shared transport intents, volume and now-playing position.
///
/// `const`-constructible so a single instance can live in a `static`.
pub struct PlaybackControls {
    playing: AtomicBool,
    next_requested: AtomicBool,
    prev_requested: AtomicBool,
    rescan_requested: AtomicBool,
    volume: AtomicU8,
    current_index: AtomicUsize,
    track_count: AtomicUsize,
    changed: Signal<CriticalSectionRawMutex, ()>,
}

impl PlaybackControls {
    /// Playing, default volume, no track loaded.
    pub const fn new() -> Self {
        Self {
            playing: AtomicBool::new(true),
            next_requested: AtomicBool::new(false),
            prev_requested: AtomicBool::new(false),
            rescan_requested: AtomicBool::new(false),
            volume: AtomicU8::new(Volume::new(DEFAULT_VOLUME).get()),
            current_index: AtomicUsize::new(NO_TRACK),
            track_count: AtomicUsize::new(0),
            changed: Signal::new(),
        }
    }

    // ── Play / pause ────────────────────────────────────────────────────────

    /// `true` while the decoder should consume input.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Set the play state.
    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Release);
        self.notify();
    }

    /// Flip the play state and return the new value.
    pub fn toggle_playing(&self) -> bool {
        let was = self.playing.fetch_xor(true, Ordering::AcqRel);
        self.notify();
        !was
    }

    // ── Track requests (edge-triggered) ─────────────────────────────────────

    /// Ask the decoder to skip to the next track.
    pub fn request_next(&self) {
        self.next_requested.store(true, Ordering::Release);
        self.notify();
    }

    /// Ask the decoder to go back to the previous track.
    pub fn request_prev(&self) {
        self.prev_requested.store(true, Ordering::Release);
        self.notify();
    }

    /// Ask the decoder to re-enumerate storage.
    pub fn request_rescan(&self) {
        self.rescan_requested.store(true, Ordering::Release);
        self.notify();
    }

    /// Consume a pending next request.
    pub fn take_next_request(&self) -> bool {
        self.next_requested.swap(false, Ordering::AcqRel)
    }

    /// Consume a pending previous request.
    pub fn take_prev_request(&self) -> bool {
        self.prev_requested.swap(false, Ordering::AcqRel)
    }

    /// Consume a pending rescan request.
    pub fn take_rescan_request(&self) -> bool {
        self.rescan_requested.swap(false, Ordering::AcqRel)
    }

    // ── Volume ──────────────────────────────────────────────────────────────

    /// Current volume.
    pub fn volume(&self) -> Volume {
        Volume::new(self.volume.load(Ordering::Relaxed))
    }

    /// Replace the volume. The value is already clamped by [`Volume`].
    pub fn set_volume(&self, volume: Volume) {
        self.volume.store(volume.get(), Ordering::Relaxed);
    }

    // ── Now playing ─────────────────────────────────────────────────────────

    /// Publish the decoder's position for the display.
    pub fn publish_track(&self, index: usize, count: usize) {
        self.track_count.store(count, Ordering::Relaxed);
        self.current_index.store(index, Ordering::Release);
    }

    /// Mark the playlist as empty.
    pub fn clear_track(&self) {
        self.current_index.store(NO_TRACK, Ordering::Release);
        self.track_count.store(0, Ordering::Relaxed);
    }

    /// `(index, count)` of the current track, `None` with an empty playlist.
    pub fn current_track(&self) -> Option<(usize, usize)> {
        match self.current_index.load(Ordering::Acquire) {
            NO_TRACK => None,
            index => Some((index, self.track_count.load(Ordering::Relaxed))),
        }
    }

    // ── Change notification ─────────────────────────────────────────────────

    /// Resolve after the next intent change.
    ///
    /// Only one task (the decoder) may wait at a time. A change that happened
    /// before the call may already have been latched; callers re-read the
    /// atomics after waking either way.
    pub async fn changed(&self) {
        self.changed.wait().await;
    }

    fn notify(&self) {
        self.changed.signal(());
    }
}

impl Default for PlaybackControls {
    fn default() -> Self {
        Self::new()
    }
}
