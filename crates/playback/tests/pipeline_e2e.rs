//! End-to-end tests: storage → decode pipeline → PCM queue → sink pull.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]

mod common;

use common::{FixedFrameDecoder, SeenInputs};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::{with_timeout, Duration};
use library::Playlist;
use platform::config::INPUT_BUFFER_BYTES;
use platform::mocks::MemStorage;
use platform::{PlaybackControls, Volume};
use playback::{DecodePipeline, PcmQueue, PcmSink, PipelineConfig, SharedPcmQueue, TrackOutcome};

fn two_tracks() -> MemStorage {
    MemStorage::new()
        .with_file("/sdcard/a.mp3", &[1u8; 4])
        .with_file("/sdcard/b.mp3", &[2u8; 4])
}

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        open_retry: Duration::from_millis(10),
        empty_retry: Duration::from_millis(10),
        pause_poll: Duration::from_millis(20),
        ..PipelineConfig::default()
    }
}

#[tokio::test]
async fn test_track_end_advances_and_sink_drains_then_pads() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    controls.set_volume(Volume::MAX);

    let mut pipeline = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    assert_eq!(pipeline.rescan().await, 2);

    assert_eq!(pipeline.play_current().await, TrackOutcome::Finished);
    assert_eq!(pipeline.playlist().index(), 1);
    assert_eq!(controls.current_track(), Some((1, 2)));
    assert_eq!(queue.len(), 4608);

    let sink = PcmSink::new(&queue, &controls);
    let mut out = [0u8; 512];
    for _ in 0..9 {
        assert_eq!(sink.pull(&mut out), 512);
        assert!(out.chunks_exact(2).all(|s| s == [1, 0]));
    }
    for _ in 0..3 {
        assert_eq!(sink.pull(&mut out), 512);
        assert!(out.iter().all(|&b| b == 0));
    }

    // Second track plays, then the cursor wraps.
    assert_eq!(pipeline.play_current().await, TrackOutcome::Finished);
    assert_eq!(pipeline.playlist().index(), 0);
}

#[tokio::test]
async fn test_next_request_aborts_track_without_decoding() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let mut pipeline = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    pipeline.rescan().await;

    controls.request_next();
    assert_eq!(pipeline.play_current().await, TrackOutcome::SkippedForward);
    assert_eq!(pipeline.playlist().index(), 1);
    assert!(queue.is_empty());
    // Consumed exactly once.
    assert!(!controls.take_next_request());
}

#[tokio::test]
async fn test_prev_request_wraps_to_last_track() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let mut pipeline = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    pipeline.rescan().await;

    controls.request_prev();
    assert_eq!(pipeline.play_current().await, TrackOutcome::SkippedBack);
    assert_eq!(pipeline.playlist().index(), 1);
}

#[tokio::test]
async fn test_skip_keeps_queued_audio_unless_flush_enabled() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();

    queue.push(&[7u8; 100]).await;
    let mut keep = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    keep.rescan().await;
    controls.request_next();
    keep.play_current().await;
    assert_eq!(queue.len(), 100);

    let mut flush = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        PipelineConfig {
            flush_on_skip: true,
            ..fast_config()
        },
    );
    flush.rescan().await;
    controls.request_next();
    flush.play_current().await;
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_open_failure_skips_to_next_track() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let mut pipeline = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    let mut playlist = Playlist::new();
    playlist.push("/sdcard/missing.mp3").unwrap();
    playlist.push("/sdcard/a.mp3").unwrap();
    pipeline.set_playlist(playlist);

    assert_eq!(pipeline.play_current().await, TrackOutcome::OpenFailed);
    assert_eq!(pipeline.playlist().index(), 1);
    assert_eq!(pipeline.play_current().await, TrackOutcome::Finished);
}

#[tokio::test]
async fn test_pause_stops_consumption() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let mut pipeline = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    pipeline.rescan().await;

    controls.set_playing(false);
    let paused = with_timeout(Duration::from_millis(150), pipeline.play_current()).await;
    assert!(paused.is_err(), "paused pipeline must keep waiting");
    assert!(queue.is_empty());
    assert_eq!(pipeline.playlist().index(), 0);

    controls.set_playing(true);
    assert_eq!(pipeline.play_current().await, TrackOutcome::Finished);
    assert_eq!(queue.len(), 4608);
}

#[tokio::test]
async fn test_lost_sync_resyncs_byte_by_byte_until_eof() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    // Byte i holds i % 251 so the front of the buffer identifies its offset.
    let noise: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    let storage = MemStorage::new().with_file("/sdcard/noise.mp3", &noise);
    let decoder = SeenInputs::default();
    let calls = decoder.calls.clone();
    let mut pipeline = DecodePipeline::new(storage, decoder, &queue, &controls, fast_config());
    pipeline.rescan().await;

    assert_eq!(pipeline.play_current().await, TrackOutcome::Undecodable);
    assert!(queue.is_empty());

    let calls = calls.lock().unwrap();
    // One stuck attempt on the first full buffer, then one per refilled byte.
    assert_eq!(calls.len(), 1 + (5000 - INPUT_BUFFER_BYTES));
    for (offset, &(len, first)) in calls.iter().enumerate() {
        assert_eq!(len, INPUT_BUFFER_BYTES, "attempt {offset} saw a partial buffer");
        assert_eq!(first, (offset % 251) as u8, "attempt {offset} skipped more than one byte");
    }
}

#[tokio::test]
async fn test_empty_file_backs_off_and_advances() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let storage = MemStorage::new()
        .with_file("/sdcard/empty.mp3", &[])
        .with_file("/sdcard/b.mp3", &[2u8; 4]);
    let mut pipeline = DecodePipeline::new(
        storage,
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    pipeline.rescan().await;

    assert_eq!(pipeline.play_current().await, TrackOutcome::Undecodable);
    assert_eq!(pipeline.playlist().index(), 1);
    assert_eq!(pipeline.play_current().await, TrackOutcome::Finished);
    assert_eq!(queue.len(), 4608);
}

#[tokio::test]
async fn test_run_yields_on_a_playlist_of_empty_files() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let storage = MemStorage::new().with_file("/sdcard/empty.mp3", &[]);
    let mut pipeline = DecodePipeline::new(
        storage,
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );

    let run = with_timeout(Duration::from_millis(50), pipeline.run()).await;
    assert!(run.is_err(), "run never returns, but must let the timeout fire");
    assert_eq!(controls.current_track(), Some((0, 1)));
}

#[tokio::test]
async fn test_short_reads_still_assemble_frames() {
    let queue: PcmQueue<CriticalSectionRawMutex, 32768> = PcmQueue::new();
    let controls = PlaybackControls::new();
    let storage = MemStorage::new()
        .with_file("/sdcard/a.mp3", &[3u8; 12])
        .with_read_chunk(5);
    let mut pipeline = DecodePipeline::new(
        storage,
        FixedFrameDecoder::new(4, 10),
        &queue,
        &controls,
        fast_config(),
    );
    pipeline.rescan().await;

    assert_eq!(pipeline.play_current().await, TrackOutcome::Finished);
    // Three 4-byte frames, 10 stereo samples each.
    assert_eq!(queue.len(), 3 * 10 * 2 * 2);
}

#[tokio::test]
async fn test_rescan_request_reloads_playlist_from_index_zero() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let mut pipeline = DecodePipeline::new(
        two_tracks(),
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    pipeline.rescan().await;
    pipeline.play_current().await;
    assert_eq!(pipeline.playlist().index(), 1);

    pipeline.storage_mut().insert("/sdcard/c.mp3", &[3u8; 4]);
    controls.request_rescan();
    assert_eq!(pipeline.play_current().await, TrackOutcome::RescanRequested);
    assert_eq!(pipeline.rescan().await, 3);
    assert_eq!(pipeline.playlist().index(), 0);
    assert_eq!(controls.current_track(), Some((0, 3)));
}

#[tokio::test]
async fn test_empty_playlist_reports_empty() {
    let queue = SharedPcmQueue::new();
    let controls = PlaybackControls::new();
    let storage = MemStorage::new().with_file("/sdcard/readme.txt", b"hi");
    let mut pipeline = DecodePipeline::new(
        storage,
        FixedFrameDecoder::new(4, 1152),
        &queue,
        &controls,
        fast_config(),
    );
    assert_eq!(pipeline.rescan().await, 0);
    assert_eq!(pipeline.play_current().await, TrackOutcome::Empty);
    assert_eq!(controls.current_track(), None);
}
