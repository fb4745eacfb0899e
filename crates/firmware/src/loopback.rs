//! Host-stack stand-in that answers every request itself.
//!
//! Each request is acknowledged at once by posting the event a cooperative
//! speaker would produce. Used by the emulator and the end-to-end tests.
//! Posting uses [`EventQueue::try_post`] because the caller is the
//! dispatcher, the queue's only consumer.

use bluetooth::{
    AvrcpEvent, ConnectionStatus, DiscoveryEvent, Event, EventQueue, FoundDevice, QueueFull,
};
use platform::config::PEER_DEVICE_NAME;
use platform::{A2dpSource, AvrcpController, BdAddr, DeviceDiscovery, MediaCtrl, Volume};

/// Class of device of a loudspeaker: Audio/Video major class with the
/// Rendering and Audio service bits.
pub const SPEAKER_CLASS_OF_DEVICE: u32 = 0x0024_0414;

/// Simulated speaker.
pub struct LoopbackTransport<'a> {
    events: &'a EventQueue,
    peer: BdAddr,
    peer_name: &'static str,
    volume_change: bool,
}

impl<'a> LoopbackTransport<'a> {
    /// A speaker named like the configured peer, at `peer`.
    pub const fn new(events: &'a EventQueue, peer: BdAddr) -> Self {
        Self {
            events,
            peer,
            peer_name: PEER_DEVICE_NAME,
            volume_change: true,
        }
    }

    /// Advertise `name` instead of the configured peer name.
    #[must_use]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.peer_name = name;
        self
    }

    /// Whether the speaker reports absolute-volume notifications.
    #[must_use]
    pub const fn with_volume_change(mut self, supported: bool) -> Self {
        self.volume_change = supported;
        self
    }

    fn post(&self, event: Event) -> Result<(), QueueFull> {
        self.events.try_post(event)
    }
}

impl A2dpSource for LoopbackTransport<'_> {
    type Error = QueueFull;

    async fn connect(&mut self, _peer: BdAddr) -> Result<(), Self::Error> {
        self.post(Event::Connection(ConnectionStatus::Connecting))?;
        self.post(Event::Connection(ConnectionStatus::Connected))?;
        self.post(Event::Avrcp(AvrcpEvent::Connected))
    }

    async fn disconnect(&mut self, _peer: BdAddr) -> Result<(), Self::Error> {
        self.post(Event::Avrcp(AvrcpEvent::Disconnected))?;
        self.post(Event::Connection(ConnectionStatus::Disconnected))
    }

    async fn media_ctrl(&mut self, cmd: MediaCtrl) -> Result<(), Self::Error> {
        self.post(Event::MediaCtrlAck { cmd, success: true })?;
        match cmd {
            MediaCtrl::Start => self.post(Event::AudioState { started: true }),
            MediaCtrl::Suspend => self.post(Event::AudioState { started: false }),
            MediaCtrl::CheckSourceReady => Ok(()),
        }
    }
}

impl DeviceDiscovery for LoopbackTransport<'_> {
    type Error = QueueFull;

    async fn start_discovery(&mut self) -> Result<(), Self::Error> {
        self.post(Event::Discovery(DiscoveryEvent::Started))?;
        self.post(Event::Discovery(DiscoveryEvent::DeviceFound(
            FoundDevice::new(self.peer, SPEAKER_CLASS_OF_DEVICE, Some(self.peer_name)),
        )))
    }

    async fn cancel_discovery(&mut self) -> Result<(), Self::Error> {
        self.post(Event::Discovery(DiscoveryEvent::Stopped))
    }
}

impl AvrcpController for LoopbackTransport<'_> {
    type Error = QueueFull;

    async fn get_capabilities(&mut self) -> Result<(), Self::Error> {
        self.post(Event::Avrcp(AvrcpEvent::Capabilities {
            volume_change: self.volume_change,
        }))
    }

    async fn register_volume_notification(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn set_absolute_volume(&mut self, volume: u8) -> Result<(), Self::Error> {
        self.post(Event::Avrcp(AvrcpEvent::SetVolumeResponse(Volume::new(
            volume,
        ))))
    }
}
