//! Link and media state.
//!
//! [`LinkState`] is the single source of truth, owned by the dispatcher. The
//! flat [`ConnectionState`] / [`MediaState`] views and the lock-free
//! [`LinkStatus`] mirror exist for readers in other contexts (display, logs).

use core::sync::atomic::{AtomicU8, Ordering};

use platform::BdAddr;

/// Flat connection state, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConnectionState {
    /// Stack not yet up.
    Idle = 0,
    /// Inquiry running, looking for the peer.
    Discovering = 1,
    /// Peer found, waiting for the inquiry to stop.
    Discovered = 2,
    /// Peer known, not connected; next heartbeat connects.
    Unconnected = 3,
    /// Connect request outstanding.
    Connecting = 4,
    /// Link up.
    Connected = 5,
    /// Disconnect request outstanding.
    Disconnecting = 6,
}

impl ConnectionState {
    /// Name for log lines and the display.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Discovering => "Discovering",
            Self::Discovered => "Discovered",
            Self::Unconnected => "Unconnected",
            Self::Connecting => "Connecting",
            Self::Connected => "Connected",
            Self::Disconnecting => "Disconnecting",
        }
    }

    const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Discovering,
            2 => Self::Discovered,
            3 => Self::Unconnected,
            4 => Self::Connecting,
            5 => Self::Connected,
            6 => Self::Disconnecting,
            _ => Self::Idle,
        }
    }
}

impl core::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media sub-state; meaningful only while connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MediaState {
    /// No stream; the next heartbeat checks readiness.
    #[default]
    Idle = 0,
    /// Start requested.
    Starting = 1,
    /// Streaming.
    Started = 2,
    /// Suspend requested.
    Stopping = 3,
}

impl MediaState {
    /// Name for log lines and the display.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Starting => "Starting",
            Self::Started => "Started",
            Self::Stopping => "Stopping",
        }
    }

    const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::Starting,
            2 => Self::Started,
            3 => Self::Stopping,
            _ => Self::Idle,
        }
    }
}

impl core::fmt::Display for MediaState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link state with per-state data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Stack not yet up.
    #[default]
    Idle,
    /// Inquiry running.
    Discovering,
    /// Peer found; waiting for the inquiry to stop.
    Discovered,
    /// Peer known, not connected.
    Unconnected,
    /// Connect request outstanding for `ticks` heartbeats.
    Connecting {
        /// Heartbeats seen since the connect request.
        ticks: u8,
    },
    /// Link up.
    Connected {
        /// Media sub-state.
        media: MediaState,
        /// Heartbeats spent in `Started` (auto-suspend counter).
        started_ticks: u16,
    },
    /// Disconnect request outstanding.
    Disconnecting,
}

impl LinkState {
    /// Freshly connected: media idle, counters cleared.
    pub const fn connected() -> Self {
        Self::Connected {
            media: MediaState::Idle,
            started_ticks: 0,
        }
    }

    /// Flat view.
    pub const fn connection_state(&self) -> ConnectionState {
        match self {
            Self::Idle => ConnectionState::Idle,
            Self::Discovering => ConnectionState::Discovering,
            Self::Discovered => ConnectionState::Discovered,
            Self::Unconnected => ConnectionState::Unconnected,
            Self::Connecting { .. } => ConnectionState::Connecting,
            Self::Connected { .. } => ConnectionState::Connected,
            Self::Disconnecting => ConnectionState::Disconnecting,
        }
    }

    /// Media sub-state; `Idle` when not connected.
    pub const fn media_state(&self) -> MediaState {
        match self {
            Self::Connected { media, .. } => *media,
            _ => MediaState::Idle,
        }
    }
}

/// Link state plus the peer it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Link {
    /// Current state.
    pub state: LinkState,
    /// Peer address (all zero until discovered or configured).
    pub peer: BdAddr,
}

/// Lock-free mirror of the link state for other contexts.
///
/// Written by the dispatcher after every event; read anywhere.
pub struct LinkStatus {
    connection: AtomicU8,
    media: AtomicU8,
}

impl LinkStatus {
    /// Idle / Idle.
    pub const fn new() -> Self {
        Self {
            connection: AtomicU8::new(ConnectionState::Idle as u8),
            media: AtomicU8::new(MediaState::Idle as u8),
        }
    }

    /// Mirror `state`.
    pub fn publish(&self, state: &LinkState) {
        self.connection
            .store(state.connection_state() as u8, Ordering::Relaxed);
        self.media.store(state.media_state() as u8, Ordering::Relaxed);
    }

    /// Last published connection state.
    pub fn connection_state(&self) -> ConnectionState {
        ConnectionState::from_code(self.connection.load(Ordering::Relaxed))
    }

    /// Last published media state.
    pub fn media_state(&self) -> MediaState {
        MediaState::from_code(self.media.load(Ordering::Relaxed))
    }
}

impl Default for LinkStatus {
    fn default() -> Self {
        Self::new()
    }
}
