//! AVRCP absolute-volume synchronisation.
//!
//! The first capabilities reply of each remote-control connection pushes the
//! default volume to the speaker. After that the speaker's notifications
//! update the local volume and local button changes are forwarded to it.

use platform::Volume;

use crate::event::{effects, AvrcpEvent, Effect, Effects};

/// Per-connection AVRCP bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeSync {
    volume_change_supported: bool,
    initial_volume_sent: bool,
    initial: Volume,
}

impl VolumeSync {
    /// Push `initial` to every newly connected speaker.
    pub const fn new(initial: Volume) -> Self {
        Self {
            volume_change_supported: false,
            initial_volume_sent: false,
            initial,
        }
    }

    /// Whether the peer notifies volume changes.
    pub const fn volume_change_supported(&self) -> bool {
        self.volume_change_supported
    }

    /// Whether the initial volume went out on this connection.
    pub const fn initial_volume_sent(&self) -> bool {
        self.initial_volume_sent
    }

    /// Handle a controller event.
    pub fn on_event(&mut self, event: &AvrcpEvent) -> Effects {
        match *event {
            AvrcpEvent::Connected => effects(&[Effect::GetCapabilities]),
            AvrcpEvent::Disconnected => {
                self.volume_change_supported = false;
                self.initial_volume_sent = false;
                Effects::new()
            }
            AvrcpEvent::Capabilities { volume_change } => {
                self.volume_change_supported = volume_change;
                let mut out = Effects::new();
                if !self.initial_volume_sent {
                    self.initial_volume_sent = true;
                    let _ = out.push(Effect::SetLocalVolume(self.initial));
                    let _ = out.push(Effect::SetAbsoluteVolume(self.initial));
                }
                if volume_change {
                    let _ = out.push(Effect::RegisterVolumeNotification);
                }
                out
            }
            AvrcpEvent::VolumeChanged(volume) => {
                if self.volume_change_supported {
                    effects(&[
                        Effect::SetLocalVolume(volume),
                        Effect::RegisterVolumeNotification,
                    ])
                } else {
                    effects(&[Effect::SetLocalVolume(volume)])
                }
            }
            AvrcpEvent::SetVolumeResponse(_) => Effects::new(),
        }
    }

    /// Forward a locally changed volume to the speaker.
    pub fn on_local_volume(&mut self, volume: Volume) -> Effects {
        effects(&[Effect::SetAbsoluteVolume(volume)])
    }
}

impl Default for VolumeSync {
    fn default() -> Self {
        Self::new(Volume::default())
    }
}
