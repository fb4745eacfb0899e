//! Bluetooth host-stack abstraction
//!
//! The vendor stack owns pairing, SDP, L2CAP and the SBC encoder. The player
//! only issues the requests below; every outcome comes back asynchronously as
//! a stack callback, which the application forwards into the bluetooth
//! crate's event dispatcher. None of these methods wait for the outcome.

/// 48-bit Bluetooth device address, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BdAddr(pub [u8; 6]);

impl core::fmt::Display for BdAddr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// A2DP media-control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediaCtrl {
    /// Ask whether the source side is ready to stream.
    CheckSourceReady,
    /// Open the media channel and start streaming.
    Start,
    /// Suspend streaming, keeping the link up.
    Suspend,
}

/// A2DP source role of the host stack.
pub trait A2dpSource {
    /// Error type
    type Error: core::fmt::Debug;

    /// Request a signalling + media connection to `peer`.
    async fn connect(&mut self, peer: BdAddr) -> Result<(), Self::Error>;

    /// Request disconnection from `peer`.
    async fn disconnect(&mut self, peer: BdAddr) -> Result<(), Self::Error>;

    /// Issue a media-control request; acknowledged by a later event.
    async fn media_ctrl(&mut self, cmd: MediaCtrl) -> Result<(), Self::Error>;
}

/// Classic inquiry (GAP discovery).
pub trait DeviceDiscovery {
    /// Error type
    type Error: core::fmt::Debug;

    /// Start a general inquiry.
    async fn start_discovery(&mut self) -> Result<(), Self::Error>;

    /// Cancel a running inquiry; a "discovery stopped" event follows.
    async fn cancel_discovery(&mut self) -> Result<(), Self::Error>;
}

/// AVRCP controller role, used for absolute-volume synchronisation.
pub trait AvrcpController {
    /// Error type
    type Error: core::fmt::Debug;

    /// Ask the target which notification events it supports.
    async fn get_capabilities(&mut self) -> Result<(), Self::Error>;

    /// Register for the next volume-changed notification.
    async fn register_volume_notification(&mut self) -> Result<(), Self::Error>;

    /// Tell the target to apply an absolute volume (0–127).
    async fn set_absolute_volume(&mut self, volume: u8) -> Result<(), Self::Error>;
}
