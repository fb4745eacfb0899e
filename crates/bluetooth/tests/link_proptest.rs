//! Property tests: arbitrary event sequences keep the link consistent.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use bluetooth::{
    transition, AvrcpEvent, ConnectionStatus, DiscoveryEvent, Effect, Event, FoundDevice, Link,
    LinkConfig, LinkState, MediaState,
};
use platform::config::PEER_DEVICE_NAME;
use platform::{BdAddr, MediaCtrl, Volume};
use proptest::prelude::*;

const PEER: BdAddr = BdAddr([0xAC, 0x67, 0xB2, 0x01, 0x02, 0x03]);

fn media_ctrl() -> impl Strategy<Value = MediaCtrl> {
    prop_oneof![
        Just(MediaCtrl::CheckSourceReady),
        Just(MediaCtrl::Start),
        Just(MediaCtrl::Suspend),
    ]
}

fn connection_status() -> impl Strategy<Value = ConnectionStatus> {
    prop_oneof![
        Just(ConnectionStatus::Disconnected),
        Just(ConnectionStatus::Connecting),
        Just(ConnectionStatus::Connected),
        Just(ConnectionStatus::Disconnecting),
    ]
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Heartbeat),
        Just(Event::StackUp),
        connection_status().prop_map(Event::Connection),
        (media_ctrl(), any::<bool>()).prop_map(|(cmd, success)| Event::MediaCtrlAck { cmd, success }),
        any::<bool>().prop_map(|started| Event::AudioState { started }),
        any::<u16>().prop_map(Event::SinkDelay),
        Just(Event::Discovery(DiscoveryEvent::Started)),
        Just(Event::Discovery(DiscoveryEvent::Stopped)),
        (any::<bool>(), any::<u32>()).prop_map(|(named, cod)| {
            let name = if named { Some(PEER_DEVICE_NAME) } else { Some("other") };
            Event::Discovery(DiscoveryEvent::DeviceFound(FoundDevice::new(PEER, cod, name)))
        }),
        any::<u8>().prop_map(|v| Event::Avrcp(AvrcpEvent::VolumeChanged(Volume::new(v)))),
        any::<u8>().prop_map(|v| Event::LocalVolumeChanged(Volume::new(v))),
    ]
}

proptest! {
    #[test]
    fn link_invariants_hold(
        events in proptest::collection::vec(event(), 0..200),
        auto_suspend in proptest::option::of(1u16..5),
    ) {
        let config = LinkConfig { auto_suspend_ticks: auto_suspend, ..LinkConfig::default() };
        let mut link = Link::default();
        for ev in &events {
            let t = transition(&link, ev, &config);

            if let LinkState::Connecting { ticks } = t.next.state {
                prop_assert!(ticks < config.connect_timeout_ticks);
            }
            if !matches!(t.next.state, LinkState::Connected { .. }) {
                prop_assert_eq!(t.next.state.media_state(), MediaState::Idle);
            }
            if let Some(limit) = auto_suspend {
                if let LinkState::Connected { started_ticks, .. } = t.next.state {
                    prop_assert!(started_ticks < limit);
                }
            }
            if !t.handled {
                prop_assert_eq!(t.next, link);
                prop_assert!(t.effects.is_empty());
            }
            for effect in &t.effects {
                match effect {
                    // Only a discovered (or configured) peer is ever dialled.
                    Effect::Connect(addr) | Effect::Disconnect(addr) => {
                        prop_assert_eq!(*addr, PEER);
                    }
                    Effect::SetLocalVolume(_)
                    | Effect::SetAbsoluteVolume(_)
                    | Effect::GetCapabilities
                    | Effect::RegisterVolumeNotification => {
                        prop_assert!(false, "link machine produced an AVRCP effect");
                    }
                    _ => {}
                }
            }
            link = t.next;
        }
    }
}
