//! Inputs to and outputs from the link state machine.
//!
//! Every stack callback and every heartbeat becomes one [`Event`] posted to
//! the dispatcher queue. Handling an event yields [`Effects`]: requests the
//! dispatcher carries out against the transport or the shared controls.

use heapless::{String, Vec};
use platform::{BdAddr, MediaCtrl, Volume};

/// Longest remote name kept from an inquiry result. Longer names cannot
/// match the configured peer and are dropped.
pub const MAX_NAME_LEN: usize = 32;

/// Upper bound on effects produced by a single event.
pub const MAX_EFFECTS: usize = 4;

/// Requests produced by one event, in execution order.
pub type Effects = Vec<Effect, MAX_EFFECTS>;

/// A2DP signalling connection status reported by the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionStatus {
    /// Link closed (or a connect attempt failed).
    Disconnected,
    /// Link setup in progress.
    Connecting,
    /// Signalling and media channels are up.
    Connected,
    /// Link teardown in progress.
    Disconnecting,
}

/// One inquiry result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundDevice {
    /// Remote address.
    pub addr: BdAddr,
    /// Class-of-device word (0 when the result carried none).
    pub class_of_device: u32,
    /// Name from the extended inquiry response, if present and short enough.
    pub name: Option<String<MAX_NAME_LEN>>,
}

impl FoundDevice {
    /// Build an inquiry result; `name` is dropped when longer than
    /// [`MAX_NAME_LEN`].
    pub fn new(addr: BdAddr, class_of_device: u32, name: Option<&str>) -> Self {
        let name = name.and_then(|n| {
            let mut s = String::new();
            s.push_str(n).ok()?;
            Some(s)
        });
        Self {
            addr,
            class_of_device,
            name,
        }
    }
}

/// GAP inquiry events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryEvent {
    /// Inquiry running.
    Started,
    /// Inquiry finished or was cancelled.
    Stopped,
    /// A device answered the inquiry.
    DeviceFound(FoundDevice),
}

/// AVRCP controller events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AvrcpEvent {
    /// Remote-control channel came up.
    Connected,
    /// Remote-control channel went down.
    Disconnected,
    /// Reply to the capabilities query.
    Capabilities {
        /// Peer can notify absolute-volume changes.
        volume_change: bool,
    },
    /// Peer-side volume change notification.
    VolumeChanged(Volume),
    /// Peer acknowledged a set-absolute-volume command.
    SetVolumeResponse(Volume),
}

/// Everything the dispatcher consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Periodic retry / poll tick.
    Heartbeat,
    /// The host stack finished initialising.
    StackUp,
    /// A2DP connection status changed.
    Connection(ConnectionStatus),
    /// Acknowledgement of an earlier media-control request.
    MediaCtrlAck {
        /// The request being acknowledged.
        cmd: MediaCtrl,
        /// Whether the peer accepted it.
        success: bool,
    },
    /// Audio stream started or stopped on the air.
    AudioState {
        /// `true` when streaming started.
        started: bool,
    },
    /// Sink reported its rendering delay, in 1/10 ms.
    SinkDelay(u16),
    /// GAP discovery progress.
    Discovery(DiscoveryEvent),
    /// AVRCP controller event.
    Avrcp(AvrcpEvent),
    /// Volume changed by a local button.
    LocalVolumeChanged(Volume),
}

impl Event {
    /// Short event name for log lines.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Heartbeat => "Heartbeat",
            Self::StackUp => "StackUp",
            Self::Connection(_) => "Connection",
            Self::MediaCtrlAck { .. } => "MediaCtrlAck",
            Self::AudioState { .. } => "AudioState",
            Self::SinkDelay(_) => "SinkDelay",
            Self::Discovery(DiscoveryEvent::Started) => "DiscoveryStarted",
            Self::Discovery(DiscoveryEvent::Stopped) => "DiscoveryStopped",
            Self::Discovery(DiscoveryEvent::DeviceFound(_)) => "DeviceFound",
            Self::Avrcp(_) => "Avrcp",
            Self::LocalVolumeChanged(_) => "LocalVolumeChanged",
        }
    }
}

/// A request carried out by the dispatcher after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
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
    SetAbsoluteVolume(Volume),
    /// Store a volume in the shared playback controls.
    SetLocalVolume(Volume),
}

impl Effect {
    /// Short effect name for log lines.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connect(_) => "Connect",
            Self::Disconnect(_) => "Disconnect",
            Self::MediaCtrl(MediaCtrl::CheckSourceReady) => "CheckSourceReady",
            Self::MediaCtrl(MediaCtrl::Start) => "Start",
            Self::MediaCtrl(MediaCtrl::Suspend) => "Suspend",
            Self::StartDiscovery => "StartDiscovery",
            Self::CancelDiscovery => "CancelDiscovery",
            Self::GetCapabilities => "GetCapabilities",
            Self::RegisterVolumeNotification => "RegisterVolumeNotification",
            Self::SetAbsoluteVolume(_) => "SetAbsoluteVolume",
            Self::SetLocalVolume(_) => "SetLocalVolume",
        }
    }
}

/// Collect `list` into [`Effects`]; anything past [`MAX_EFFECTS`] is dropped.
pub fn effects(list: &[Effect]) -> Effects {
    list.iter().copied().take(MAX_EFFECTS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found_device_drops_overlong_name() {
        let long = "n".repeat(MAX_NAME_LEN + 1);
        let dev = FoundDevice::new(BdAddr::default(), 0, Some(&long));
        assert!(dev.name.is_none());
        let dev = FoundDevice::new(BdAddr::default(), 0, Some("ESP_SPEAKER"));
        assert_eq!(dev.name.as_deref(), Some("ESP_SPEAKER"));
    }

    #[test]
    fn test_effects_preserves_order() {
        let e = effects(&[Effect::GetCapabilities, Effect::StartDiscovery]);
        assert_eq!(e.as_slice(), &[Effect::GetCapabilities, Effect::StartDiscovery]);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(Event::Heartbeat.name(), "Heartbeat");
        assert_eq!(
            Event::Discovery(DiscoveryEvent::Stopped).name(),
            "DiscoveryStopped"
        );
    }
}
