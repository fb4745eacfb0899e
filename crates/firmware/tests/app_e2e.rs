//! Whole-application run against in-memory storage and the loopback speaker.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use bluetooth::{ConnectionState, Event, MediaState};
use embassy_time::{with_timeout, Duration};
use firmware::{AppConfig, AppShared, LoopbackTransport};
use platform::config::DEFAULT_VOLUME;
use platform::mocks::{MemStorage, MockInput};
use platform::{BdAddr, Button, InputEvent, Volume};
use playback::{FrameDecoder, FrameInfo, PcmFrame};

const SPEAKER: BdAddr = BdAddr([0x02, 0, 0, 0, 0, 0x01]);

/// Every 4 input bytes decode to 1152 stereo samples of value 1.
struct OnesDecoder;

impl FrameDecoder for OnesDecoder {
    fn decode_frame(&mut self, input: &[u8], output: &mut PcmFrame) -> FrameInfo {
        if input.len() < 4 {
            return FrameInfo::default();
        }
        output.samples.fill(1);
        FrameInfo {
            samples: 1152,
            channels: 2,
            sample_rate: 44_100,
            bytes_consumed: 4,
        }
    }

    fn reset(&mut self) {}
}

fn storage() -> MemStorage {
    MemStorage::new()
        .with_file("/sdcard/one.mp3", &[0u8; 64])
        .with_file("/sdcard/notes.txt", b"skip me")
        .with_file("/sdcard/two.MP3", &[0u8; 64])
}

fn fast_config() -> AppConfig {
    AppConfig::default().with_heartbeat_period(Duration::from_millis(10))
}

#[tokio::test]
async fn test_boot_discovers_connects_and_streams() {
    let shared = AppShared::new();
    let transport = LoopbackTransport::new(&shared.events, SPEAKER);
    let mut input = MockInput::new();
    let config = fast_config();

    shared.events.post(Event::StackUp).await;
    let _ = with_timeout(
        Duration::from_millis(200),
        firmware::run(&shared, storage(), OnesDecoder, transport, &mut input, &config),
    )
    .await;

    let status = shared.status();
    assert_eq!(status.connection, ConnectionState::Connected);
    assert_eq!(status.media, MediaState::Started);
    assert!(status.is_streaming());
    assert_eq!(status.track.map(|(_, count)| count), Some(2));
    // AVRCP pushed the default volume on connect.
    assert_eq!(status.volume, Volume::new(DEFAULT_VOLUME));

    // The decoder has been filling the queue; the sink drains it attenuated.
    assert!(!shared.pcm.is_empty());
    let mut buf = [0xAAu8; 512];
    assert_eq!(shared.sink().pull(&mut buf), 512);
    assert!(buf.iter().all(|&b| b == 0));
}

#[tokio::test]
async fn test_buttons_reach_controls_and_speaker() {
    let shared = AppShared::new();
    let transport = LoopbackTransport::new(&shared.events, SPEAKER);
    let mut input = MockInput::new();
    input.add_event(InputEvent::ButtonPress(Button::Play));
    input.add_event(InputEvent::ButtonPress(Button::VolumeUp));
    input.add_event(InputEvent::ButtonPress(Button::VolumeUp));
    let config = fast_config().with_fixed_peer(SPEAKER);

    shared.events.post(Event::StackUp).await;
    let run = firmware::run(&shared, storage(), OnesDecoder, transport, &mut input, &config);
    let _ = with_timeout(Duration::from_millis(200), run).await;

    let status = shared.status();
    assert!(!status.playing);
    assert_eq!(status.connection, ConnectionState::Connected);
    // Button steps land either before or after the initial AVRCP volume push;
    // both leave the volume on the 5-step grid around the default.
    assert!(status.volume.get() % 5 == 0);
}

#[tokio::test]
async fn test_pull_without_playlist_is_silence() {
    let shared = AppShared::new();
    let transport = LoopbackTransport::new(&shared.events, SPEAKER);
    let mut input = MockInput::new();
    let config = fast_config();

    let _ = with_timeout(
        Duration::from_millis(50),
        firmware::run(&shared, MemStorage::new(), OnesDecoder, transport, &mut input, &config),
    )
    .await;

    assert_eq!(shared.status().track, None);
    // No StackUp: the link never left Idle.
    assert_eq!(shared.status().connection, ConnectionState::Idle);
    let mut buf = [0x55u8; 64];
    assert_eq!(shared.sink().pull(&mut buf), 64);
    assert!(buf.iter().all(|&b| b == 0));
}

#[tokio::test]
async fn test_empty_track_does_not_starve_the_link() {
    let shared = AppShared::new();
    let transport = LoopbackTransport::new(&shared.events, SPEAKER);
    let mut input = MockInput::new();
    let config = fast_config();
    let storage = MemStorage::new().with_file("/sdcard/empty.mp3", &[]);

    shared.events.post(Event::StackUp).await;
    let run = with_timeout(
        Duration::from_millis(200),
        firmware::run(&shared, storage, OnesDecoder, transport, &mut input, &config),
    )
    .await;

    assert!(run.is_err(), "run must keep yielding to the timeout");
    let status = shared.status();
    assert_eq!(status.connection, ConnectionState::Connected);
    assert_eq!(status.track, Some((0, 1)));
    assert!(shared.pcm.is_empty());
}
