//! Aggregated status for the display and the periodic status log.

use bluetooth::{ConnectionState, LinkStatus, MediaState};
use platform::{PlaybackControls, Volume};

use crate::input::volume_percent;

/// Everything a status line shows, read in one go.
///
/// Fields come from independent atomics, so a snapshot may mix values from
/// either side of a concurrent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Link state.
    pub connection: ConnectionState,
    /// Media sub-state.
    pub media: MediaState,
    /// Play / pause.
    pub playing: bool,
    /// Current volume.
    pub volume: Volume,
    /// `(index, count)` of the current track.
    pub track: Option<(usize, usize)>,
}

impl StatusSnapshot {
    /// Read the shared state.
    pub fn capture(controls: &PlaybackControls, link: &LinkStatus) -> Self {
        Self {
            connection: link.connection_state(),
            media: link.media_state(),
            playing: controls.is_playing(),
            volume: controls.volume(),
            track: controls.current_track(),
        }
    }

    /// `true` while audio is flowing to the speaker.
    pub fn is_streaming(&self) -> bool {
        self.connection == ConnectionState::Connected && self.media == MediaState::Started
    }
}

impl core::fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.connection)?;
        if self.connection == ConnectionState::Connected {
            write!(f, "/{}", self.media)?;
        }
        let state = if self.playing { "playing" } else { "paused" };
        write!(f, " | {} | vol {}%", state, volume_percent(self.volume))?;
        match self.track {
            Some((index, count)) => write!(f, " | track {}/{}", index.saturating_add(1), count),
            None => f.write_str(" | no tracks"),
        }
    }
}
