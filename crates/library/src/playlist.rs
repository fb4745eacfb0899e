//! Playlist: fixed-capacity, ordered track list with a cyclic cursor.
//!
//! Owned exclusively by the decode task. The cursor invariant
//! `index < len()` holds whenever the playlist is non-empty; navigation wraps
//! modulo the track count.

use crate::track::Track;
use heapless::Vec;
use platform::config::MAX_PLAYLIST_SIZE;

/// Maximum number of tracks kept from one scan.
pub const MAX_TRACKS: usize = MAX_PLAYLIST_SIZE;

/// Error type for playlist operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistError {
    /// The playlist has reached its compile-time capacity.
    Full,
    /// The requested position does not exist.
    OutOfBounds,
}

impl core::fmt::Display for PlaylistError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "playlist full ({MAX_TRACKS} tracks)"),
            Self::OutOfBounds => f.write_str("track index out of bounds"),
        }
    }
}

/// Ordered tracks plus the zero-based current index.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track, MAX_TRACKS>,
    index: usize,
}

impl Playlist {
    /// Create an empty playlist.
    pub const fn new() -> Self {
        Self {
            tracks: Vec::new(),
            index: 0,
        }
    }

    /// Append a track built from `path`, numbering it with its position.
    ///
    /// Returns `Err(PlaylistError::Full)` once [`MAX_TRACKS`] are stored.
    /// Paths longer than the track path capacity are reported as
    /// `OutOfBounds`.
    pub fn push(&mut self, path: &str) -> Result<(), PlaylistError> {
        if self.tracks.is_full() {
            return Err(PlaylistError::Full);
        }
        let track = Track::new(path, self.tracks.len()).ok_or(PlaylistError::OutOfBounds)?;
        self.tracks.push(track).map_err(|_| PlaylistError::Full)
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns `true` when no tracks are loaded.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns `true` when no more tracks can be appended.
    pub fn is_full(&self) -> bool {
        self.tracks.is_full()
    }

    /// Current zero-based index (0 when empty).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Track under the cursor, `None` when empty.
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    /// Track at `pos`, or `None`.
    pub fn get(&self, pos: usize) -> Option<&Track> {
        self.tracks.get(pos)
    }

    /// All tracks in playlist order.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Advance the cursor, wrapping from the last track to the first.
    ///
    /// No-op on an empty playlist. Returns the new index.
    pub fn next(&mut self) -> usize {
        let next = self.index.saturating_add(1);
        self.index = if next < self.tracks.len() { next } else { 0 };
        self.index
    }

    /// Move the cursor back, wrapping from the first track to the last.
    ///
    /// No-op on an empty playlist. Returns the new index.
    pub fn prev(&mut self) -> usize {
        self.index = match self.index.checked_sub(1) {
            Some(prev) => prev,
            None => self.tracks.len().saturating_sub(1),
        };
        self.index
    }

    /// Jump to `pos`.
    pub fn select(&mut self, pos: usize) -> Result<(), PlaylistError> {
        if pos < self.tracks.len() {
            self.index = pos;
            Ok(())
        } else {
            Err(PlaylistError::OutOfBounds)
        }
    }

    /// Remove all tracks and reset the cursor.
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = 0;
    }
}
