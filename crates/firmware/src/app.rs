//! Task wiring.
//!
//! ```text
//! storage ─► DecodePipeline ─► AppShared::pcm ─► PcmSink::pull (transport)
//! input ───► InputHandler ─┬─► AppShared::controls
//!                          └─► AppShared::events ─► Dispatcher ─► transport
//! heartbeat ──────────────────►┘
//! ```
//!
//! [`AppShared`] holds everything the tasks share and is `const`-constructible
//! so it can live in a `static`. [`run`] joins the long-lived tasks on the
//! current executor; none of them returns.

use bluetooth::{heartbeat, Dispatcher, EventQueue, LinkStatus};
use embassy_futures::join::join5;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{Duration, Ticker};
use platform::config::{APP_NAME, APP_VERSION, PCM_QUEUE_BYTES};
use platform::{
    A2dpSource, AvrcpController, DeviceDiscovery, InputDevice, PlaybackControls, Storage,
};
use playback::{DecodePipeline, FrameDecoder, PcmSink, SharedPcmQueue};

use crate::config::AppConfig;
use crate::input::InputHandler;
use crate::status::StatusSnapshot;

/// Period of the status log line.
pub const STATUS_LOG_PERIOD: Duration = Duration::from_secs(5);

/// State shared between the tasks and the transport's pull context.
pub struct AppShared {
    /// Decoded PCM, decoder → sink.
    pub pcm: SharedPcmQueue,
    /// Transport intents, volume, now playing.
    pub controls: PlaybackControls,
    /// Dispatcher input.
    pub events: EventQueue,
    /// Link state mirror.
    pub link_status: LinkStatus,
}

impl AppShared {
    /// Empty queues, default controls, link idle.
    pub const fn new() -> Self {
        Self {
            pcm: SharedPcmQueue::new(),
            controls: PlaybackControls::new(),
            events: EventQueue::new(),
            link_status: LinkStatus::new(),
        }
    }

    /// The sink the transport pulls from.
    pub const fn sink(&self) -> PcmSink<'_, CriticalSectionRawMutex, PCM_QUEUE_BYTES> {
        PcmSink::new(&self.pcm, &self.controls)
    }

    /// Current status.
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot::capture(&self.controls, &self.link_status)
    }
}

impl Default for AppShared {
    fn default() -> Self {
        Self::new()
    }
}

/// Log the status every `period`. Never returns.
pub async fn status_log(shared: &AppShared, period: Duration) {
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        let s = shared.status();
        let (index, count) = s.track.unwrap_or((0, 0));
        info!(
            "Status: {} {} playing={} volume={} track={}/{}",
            s.connection.as_str(),
            s.media.as_str(),
            s.playing,
            s.volume.get(),
            index,
            count
        );
    }
}

/// Run every task until the executor is dropped.
///
/// The host stack must post [`bluetooth::Event::StackUp`] once it is
/// initialised; link management starts from there.
pub async fn run<S, D, T, I>(
    shared: &AppShared,
    storage: S,
    decoder: D,
    transport: T,
    input: &mut I,
    config: &AppConfig,
) where
    S: Storage,
    D: FrameDecoder,
    T: A2dpSource + DeviceDiscovery + AvrcpController,
    I: InputDevice,
{
    info!("{} v{}", APP_NAME, APP_VERSION);

    let mut pipeline = DecodePipeline::new(
        storage,
        decoder,
        &shared.pcm,
        &shared.controls,
        config.pipeline,
    );
    let mut dispatcher = Dispatcher::new(
        transport,
        &shared.events,
        &shared.controls,
        &shared.link_status,
        config.link,
    );
    let input_handler = InputHandler::new(&shared.controls, &shared.events, config.volume_step);

    join5(
        pipeline.run(),
        dispatcher.run(),
        heartbeat(&shared.events, config.heartbeat_period),
        input_handler.run(input),
        status_log(shared, STATUS_LOG_PERIOD),
    )
    .await;
}
