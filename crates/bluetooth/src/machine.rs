//! Connection / media state machine.
//!
//! [`transition`] is a pure function of the current [`Link`], one [`Event`]
//! and the [`LinkConfig`]. It never touches the transport: requests come
//! back as [`Effects`] for the dispatcher to execute. AVRCP volume events are
//! not link events and are routed to [`crate::avrcp::VolumeSync`] instead.
//!
//! ```text
//! Idle ─StackUp─► Discovering ─DeviceFound(peer)─► Discovered
//!                     ▲  │ Stopped (restart)            │ Stopped
//!                     └──┘                              ▼
//! Unconnected ─Heartbeat─────────────────────────► Connecting
//!     ▲   ▲                    Closed / 2nd Heartbeat   │ Connected
//!     │   └─────────────────────────────────────────────┤
//!     │                                                 ▼
//!     └──Closed── Disconnecting ◄─SuspendAck(ok)── Connected[media]
//! ```

use platform::config::{CONNECT_TIMEOUT_TICKS, PEER_DEVICE_NAME};
use platform::{BdAddr, MediaCtrl};

use crate::discovery::is_target;
use crate::event::{effects, ConnectionStatus, DiscoveryEvent, Effect, Effects, Event};
use crate::state::{Link, LinkState, MediaState};

/// Static link-management settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkConfig {
    /// EIR name the discovered peer must carry.
    pub peer_name: &'static str,
    /// Skip discovery and connect straight to this address.
    pub fixed_peer: Option<BdAddr>,
    /// Heartbeats a connect attempt may stay outstanding.
    pub connect_timeout_ticks: u8,
    /// Suspend the stream after this many heartbeats in `Started`.
    pub auto_suspend_ticks: Option<u16>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            peer_name: PEER_DEVICE_NAME,
            fixed_peer: None,
            connect_timeout_ticks: CONNECT_TIMEOUT_TICKS,
            auto_suspend_ticks: None,
        }
    }
}

/// Result of feeding one event to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Link after the event.
    pub next: Link,
    /// Requests to carry out, in order.
    pub effects: Effects,
    /// `false` when the (state, event) pair has no defined behaviour.
    pub handled: bool,
}

impl Transition {
    fn to(next: Link, effects: Effects) -> Self {
        Self {
            next,
            effects,
            handled: true,
        }
    }

    fn stay(link: Link) -> Self {
        Self::to(link, Effects::new())
    }

    fn unhandled(link: Link) -> Self {
        Self {
            next: link,
            effects: Effects::new(),
            handled: false,
        }
    }
}

/// Compute the successor of `link` under `event`.
pub fn transition(link: &Link, event: &Event, config: &LinkConfig) -> Transition {
    let link = *link;

    // Valid in every state, no effect on the link.
    if matches!(
        event,
        Event::SinkDelay(_) | Event::Discovery(DiscoveryEvent::Started)
    ) {
        return Transition::stay(link);
    }
    if matches!(event, Event::Avrcp(_) | Event::LocalVolumeChanged(_)) {
        return Transition::unhandled(link);
    }

    match link.state {
        LinkState::Idle => idle(link, event, config),
        LinkState::Discovering => discovering(link, event, config),
        LinkState::Discovered => discovered(link, event),
        LinkState::Unconnected => unconnected(link, event),
        LinkState::Connecting { ticks } => connecting(link, ticks, event, config),
        LinkState::Connected {
            media,
            started_ticks,
        } => connected(link, media, started_ticks, event, config),
        LinkState::Disconnecting => disconnecting(link, event),
    }
}

fn with_state(link: Link, state: LinkState) -> Link {
    Link { state, ..link }
}

fn connect(link: Link) -> Transition {
    Transition::to(
        with_state(link, LinkState::Connecting { ticks: 0 }),
        effects(&[Effect::Connect(link.peer)]),
    )
}

fn is_link_event(event: &Event) -> bool {
    matches!(
        event,
        Event::Heartbeat
            | Event::Connection(_)
            | Event::MediaCtrlAck { .. }
            | Event::AudioState { .. }
    )
}

fn idle(link: Link, event: &Event, config: &LinkConfig) -> Transition {
    match (event, config.fixed_peer) {
        (Event::StackUp, Some(peer)) => Transition::stay(Link {
            state: LinkState::Unconnected,
            peer,
        }),
        (Event::StackUp, None) => Transition::to(
            with_state(link, LinkState::Discovering),
            effects(&[Effect::StartDiscovery]),
        ),
        _ => Transition::unhandled(link),
    }
}

fn discovering(link: Link, event: &Event, config: &LinkConfig) -> Transition {
    match event {
        Event::Discovery(DiscoveryEvent::DeviceFound(device)) => {
            if is_target(device, config.peer_name) {
                Transition::to(
                    Link {
                        state: LinkState::Discovered,
                        peer: device.addr,
                    },
                    effects(&[Effect::CancelDiscovery]),
                )
            } else {
                Transition::stay(link)
            }
        }
        Event::Discovery(DiscoveryEvent::Stopped) => {
            Transition::to(link, effects(&[Effect::StartDiscovery]))
        }
        e if is_link_event(e) => Transition::stay(link),
        _ => Transition::unhandled(link),
    }
}

fn discovered(link: Link, event: &Event) -> Transition {
    match event {
        Event::Discovery(DiscoveryEvent::Stopped) => connect(link),
        Event::Discovery(DiscoveryEvent::DeviceFound(_)) => Transition::stay(link),
        e if is_link_event(e) => Transition::stay(link),
        _ => Transition::unhandled(link),
    }
}

fn unconnected(link: Link, event: &Event) -> Transition {
    match event {
        Event::Heartbeat => connect(link),
        Event::Connection(_) | Event::AudioState { .. } | Event::MediaCtrlAck { .. } => {
            Transition::stay(link)
        }
        _ => Transition::unhandled(link),
    }
}

fn connecting(link: Link, ticks: u8, event: &Event, config: &LinkConfig) -> Transition {
    match event {
        Event::Connection(ConnectionStatus::Connected) => {
            Transition::stay(with_state(link, LinkState::connected()))
        }
        Event::Connection(ConnectionStatus::Disconnected) => {
            Transition::stay(with_state(link, LinkState::Unconnected))
        }
        Event::Connection(_) => Transition::stay(link),
        Event::Heartbeat => {
            let ticks = ticks.saturating_add(1);
            let state = if ticks >= config.connect_timeout_ticks {
                LinkState::Unconnected
            } else {
                LinkState::Connecting { ticks }
            };
            Transition::stay(with_state(link, state))
        }
        _ => Transition::unhandled(link),
    }
}

fn connected(
    link: Link,
    media: MediaState,
    started_ticks: u16,
    event: &Event,
    config: &LinkConfig,
) -> Transition {
    let media_state = |media, started_ticks| {
        with_state(
            link,
            LinkState::Connected {
                media,
                started_ticks,
            },
        )
    };

    match (event, media) {
        (Event::Connection(ConnectionStatus::Disconnected), _) => {
            Transition::stay(with_state(link, LinkState::Unconnected))
        }
        (Event::Connection(_) | Event::AudioState { .. }, _) => Transition::stay(link),

        (Event::Heartbeat, MediaState::Idle) => Transition::to(
            link,
            effects(&[Effect::MediaCtrl(MediaCtrl::CheckSourceReady)]),
        ),
        (
            Event::MediaCtrlAck {
                cmd: MediaCtrl::CheckSourceReady,
                success,
            },
            MediaState::Idle,
        ) => {
            if *success {
                Transition::to(
                    media_state(MediaState::Starting, 0),
                    effects(&[Effect::MediaCtrl(MediaCtrl::Start)]),
                )
            } else {
                Transition::stay(link)
            }
        }

        (
            Event::MediaCtrlAck {
                cmd: MediaCtrl::Start,
                success: true,
            },
            MediaState::Starting,
        ) => Transition::stay(media_state(MediaState::Started, 0)),
        (Event::MediaCtrlAck { .. }, MediaState::Starting) => {
            Transition::stay(media_state(MediaState::Idle, 0))
        }

        (Event::Heartbeat, MediaState::Started) => match config.auto_suspend_ticks {
            Some(limit) => {
                let ticks = started_ticks.saturating_add(1);
                if ticks >= limit {
                    Transition::to(
                        media_state(MediaState::Stopping, 0),
                        effects(&[Effect::MediaCtrl(MediaCtrl::Suspend)]),
                    )
                } else {
                    Transition::stay(media_state(MediaState::Started, ticks))
                }
            }
            None => Transition::stay(link),
        },

        (
            Event::MediaCtrlAck {
                cmd: MediaCtrl::Suspend,
                success,
            },
            MediaState::Stopping,
        ) => {
            if *success {
                Transition::to(
                    with_state(link, LinkState::Disconnecting),
                    effects(&[Effect::Disconnect(link.peer)]),
                )
            } else {
                Transition::to(link, effects(&[Effect::MediaCtrl(MediaCtrl::Suspend)]))
            }
        }

        _ => Transition::unhandled(link),
    }
}

fn disconnecting(link: Link, event: &Event) -> Transition {
    match event {
        Event::Connection(ConnectionStatus::Disconnected) => {
            Transition::stay(with_state(link, LinkState::Unconnected))
        }
        Event::AudioState { .. } | Event::MediaCtrlAck { .. } | Event::Heartbeat => {
            Transition::stay(link)
        }
        _ => Transition::unhandled(link),
    }
}

/// Owns a [`Link`] and advances it one event at a time.
#[derive(Debug, Clone)]
pub struct LinkMachine {
    link: Link,
    config: LinkConfig,
}

impl LinkMachine {
    /// Start in `Idle` with no peer.
    pub fn new(config: LinkConfig) -> Self {
        Self {
            link: Link::default(),
            config,
        }
    }

    /// Current link.
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Current state.
    pub fn state(&self) -> LinkState {
        self.link.state
    }

    /// Settings in use.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Apply `event`, returning the requests to carry out.
    pub fn step(&mut self, event: &Event) -> Transition {
        let t = transition(&self.link, event, &self.config);
        self.link = t.next;
        t
    }
}
