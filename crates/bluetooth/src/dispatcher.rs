//! Event queue and dispatcher task.
//!
//! Stack callbacks, the heartbeat ticker and the input task all post into one
//! bounded [`EventQueue`]. A single [`Dispatcher`] drains it, so link state
//! and counters have exactly one writer. After every event the dispatcher
//! executes the resulting effects and mirrors the state into [`LinkStatus`].

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use platform::config::EVENT_QUEUE_DEPTH;
use platform::{A2dpSource, AvrcpController, DeviceDiscovery, PlaybackControls};

use crate::avrcp::VolumeSync;
use crate::event::{DiscoveryEvent, Effect, Effects, Event};
use crate::fmt::Dbg;
use crate::machine::{LinkConfig, LinkMachine};
use crate::state::{Link, LinkStatus};

/// Returned by [`EventQueue::try_post`] when the queue has no free slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QueueFull;

impl core::fmt::Display for QueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("event queue full")
    }
}

/// Bounded multi-producer event queue feeding the dispatcher.
pub struct EventQueue {
    channel: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_DEPTH>,
}

impl EventQueue {
    /// Empty queue; `const` so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Post `event`, waiting for space. Never drops.
    pub async fn post(&self, event: Event) {
        self.channel.send(event).await;
    }

    /// Post from a context that cannot wait (a stack callback).
    ///
    /// # Errors
    ///
    /// [`QueueFull`] when every slot is taken; the event is lost.
    pub fn try_post(&self, event: Event) -> Result<(), QueueFull> {
        let name = event.name();
        self.channel.try_send(event).map_err(|_| {
            warn!("Event queue full, dropping {}", name);
            QueueFull
        })
    }

    /// Wait for the next event.
    pub async fn receive(&self) -> Event {
        self.channel.receive().await
    }

    /// Take an event if one is queued.
    pub fn try_receive(&self) -> Option<Event> {
        self.channel.try_receive().ok()
    }

    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Post a [`Event::Heartbeat`] every `period`. Never returns.
pub async fn heartbeat(queue: &EventQueue, period: Duration) {
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        queue.post(Event::Heartbeat).await;
    }
}

/// The single consumer of the [`EventQueue`].
pub struct Dispatcher<'a, T>
where
    T: A2dpSource + DeviceDiscovery + AvrcpController,
{
    transport: T,
    queue: &'a EventQueue,
    controls: &'a PlaybackControls,
    status: &'a LinkStatus,
    machine: LinkMachine,
    volume_sync: VolumeSync,
}

impl<'a, T> Dispatcher<'a, T>
where
    T: A2dpSource + DeviceDiscovery + AvrcpController,
{
    /// Wire a dispatcher; the link starts `Idle` and waits for `StackUp`.
    pub fn new(
        transport: T,
        queue: &'a EventQueue,
        controls: &'a PlaybackControls,
        status: &'a LinkStatus,
        config: LinkConfig,
    ) -> Self {
        status.publish(&Link::default().state);
        Self {
            transport,
            queue,
            controls,
            status,
            machine: LinkMachine::new(config),
            volume_sync: VolumeSync::default(),
        }
    }

    /// Current link.
    pub fn link(&self) -> &Link {
        self.machine.link()
    }

    /// AVRCP bookkeeping.
    pub fn volume_sync(&self) -> &VolumeSync {
        &self.volume_sync
    }

    /// The transport, e.g. to inspect a test double.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Drain the queue forever.
    pub async fn run(&mut self) {
        loop {
            let event = self.queue.receive().await;
            self.handle(event).await;
        }
    }

    /// Handle every event already queued, without waiting for more.
    pub async fn drain(&mut self) -> usize {
        let mut handled = 0usize;
        while let Some(event) = self.queue.try_receive() {
            self.handle(event).await;
            handled = handled.saturating_add(1);
        }
        handled
    }

    /// Process one event: transition, execute effects, publish status.
    pub async fn handle(&mut self, event: Event) {
        debug!("Event: {}", event.name());
        log_event(&event);

        let effects = match &event {
            Event::Avrcp(ev) => self.volume_sync.on_event(ev),
            Event::LocalVolumeChanged(v) => self.volume_sync.on_local_volume(*v),
            _ => {
                let before = self.machine.state();
                let t = self.machine.step(&event);
                if !t.handled {
                    warn!(
                        "Unhandled {} in {}",
                        event.name(),
                        before.connection_state().as_str()
                    );
                }
                let after = self.machine.state();
                if before.connection_state() != after.connection_state() {
                    info!(
                        "Link: {} -> {}",
                        before.connection_state().as_str(),
                        after.connection_state().as_str()
                    );
                }
                if before.media_state() != after.media_state() {
                    info!(
                        "Media: {} -> {}",
                        before.media_state().as_str(),
                        after.media_state().as_str()
                    );
                }
                t.effects
            }
        };

        self.execute(&effects).await;
        self.status.publish(&self.machine.state());
    }

    async fn execute(&mut self, effects: &Effects) {
        for effect in effects {
            trace!("Effect: {}", effect.name());
            let result = match *effect {
                Effect::Connect(peer) => {
                    info!("Connecting to {}", peer);
                    A2dpSource::connect(&mut self.transport, peer)
                        .await
                        .map_err(|e| error!("connect failed: {}", Dbg(&e)))
                }
                Effect::Disconnect(peer) => {
                    info!("Disconnecting from {}", peer);
                    A2dpSource::disconnect(&mut self.transport, peer)
                        .await
                        .map_err(|e| error!("disconnect failed: {}", Dbg(&e)))
                }
                Effect::MediaCtrl(cmd) => self
                    .transport
                    .media_ctrl(cmd)
                    .await
                    .map_err(|e| error!("media_ctrl {} failed: {}", effect.name(), Dbg(&e))),
                Effect::StartDiscovery => self
                    .transport
                    .start_discovery()
                    .await
                    .map_err(|e| error!("start_discovery failed: {}", Dbg(&e))),
                Effect::CancelDiscovery => self
                    .transport
                    .cancel_discovery()
                    .await
                    .map_err(|e| error!("cancel_discovery failed: {}", Dbg(&e))),
                Effect::GetCapabilities => self
                    .transport
                    .get_capabilities()
                    .await
                    .map_err(|e| error!("get_capabilities failed: {}", Dbg(&e))),
                Effect::RegisterVolumeNotification => self
                    .transport
                    .register_volume_notification()
                    .await
                    .map_err(|e| error!("register_volume_notification failed: {}", Dbg(&e))),
                Effect::SetAbsoluteVolume(v) => self
                    .transport
                    .set_absolute_volume(v.get())
                    .await
                    .map_err(|e| error!("set_absolute_volume failed: {}", Dbg(&e))),
                Effect::SetLocalVolume(v) => {
                    self.controls.set_volume(v);
                    info!("Volume: {}", v.get());
                    Ok(())
                }
            };
            // Failures are logged above; the next heartbeat retries.
            let _ = result;
        }
    }
}

fn log_event(event: &Event) {
    match event {
        Event::SinkDelay(delay) => info!("Sink delay: {} x0.1 ms", delay),
        Event::Discovery(DiscoveryEvent::Started) => info!("Discovery started"),
        Event::Discovery(DiscoveryEvent::DeviceFound(dev)) => {
            debug!(
                "Found {} cod 0x{:x} name {}",
                dev.addr,
                dev.class_of_device,
                dev.name.as_ref().map_or("-", |n| n.as_str())
            );
        }
        Event::AudioState { started } => info!("Audio state: started={}", started),
        Event::Avrcp(crate::event::AvrcpEvent::SetVolumeResponse(v)) => {
            info!("Speaker volume set to {}", v.get());
        }
        _ => {}
    }
}
