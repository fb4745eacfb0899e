//! Decode pipeline: turns the playlist into a continuous PCM stream.
//!
//! One long-lived task owns the storage handle, the codec, the playlist and
//! the input buffer. It is the only writer of the PCM queue and suspends on
//! it when the queue is full. Control arrives through [`PlaybackControls`]:
//! intents are checked before every decode step, so a skip takes effect
//! within one frame.
//!
//! Failures never end the task: a file that cannot be opened or that ends
//! before yielding a single frame is skipped after a back-off, a read error
//! ends the track, and an empty playlist idles until a rescan is requested.
//! Every track boundary suspends at least once so the other tasks on the
//! executor keep running.

use embassy_futures::select::select;
use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{with_timeout, Duration, Timer};
use library::{scan_playlist, Playlist, TrackPath};
use platform::config::{INPUT_BUFFER_BYTES, MOUNT_POINT};
use platform::{PlaybackControls, Storage};

use crate::decoder::{FrameDecoder, PcmFrame, MAX_PCM_BYTES};
use crate::fmt::Dbg;
use crate::input_buffer::InputBuffer;
use crate::pcm_queue::PcmQueue;

/// Runtime settings for the decode pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Directory enumerated for the playlist.
    pub music_dir: &'static str,
    /// Longest wait between intent checks while paused.
    pub pause_poll: Duration,
    /// Back-off after a track fails to open.
    pub open_retry: Duration,
    /// Retry period while the playlist is empty.
    pub empty_retry: Duration,
    /// Drop queued PCM of the old track on a user skip.
    pub flush_on_skip: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            music_dir: MOUNT_POINT,
            pause_poll: Duration::from_millis(100),
            open_retry: Duration::from_millis(1000),
            empty_retry: Duration::from_millis(1000),
            flush_on_skip: false,
        }
    }
}

/// How a call to [`DecodePipeline::play_current`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackOutcome {
    /// End of file (or a read error); the cursor moved to the next track.
    Finished,
    /// A next request was consumed.
    SkippedForward,
    /// A previous request was consumed.
    SkippedBack,
    /// The file could not be opened; cursor advanced after the back-off.
    OpenFailed,
    /// End of file before any frame decoded; cursor advanced after the
    /// back-off.
    Undecodable,
    /// A rescan request was consumed; the caller must re-enumerate.
    RescanRequested,
    /// Nothing to play.
    Empty,
}

/// The decode task's state.
pub struct DecodePipeline<'a, S, D, M, const N: usize>
where
    S: Storage,
    D: FrameDecoder,
    M: RawMutex,
{
    storage: S,
    decoder: D,
    queue: &'a PcmQueue<M, N>,
    controls: &'a PlaybackControls,
    config: PipelineConfig,
    playlist: Playlist,
    input: InputBuffer<INPUT_BUFFER_BYTES>,
    pcm: PcmFrame,
    pcm_bytes: [u8; MAX_PCM_BYTES],
    format_logged: bool,
}

impl<'a, S, D, M, const N: usize> DecodePipeline<'a, S, D, M, N>
where
    S: Storage,
    D: FrameDecoder,
    M: RawMutex,
{
    /// Create a pipeline with an empty playlist; call [`rescan`] or [`run`].
    ///
    /// [`rescan`]: Self::rescan
    /// [`run`]: Self::run
    pub fn new(
        storage: S,
        decoder: D,
        queue: &'a PcmQueue<M, N>,
        controls: &'a PlaybackControls,
        config: PipelineConfig,
    ) -> Self {
        Self {
            storage,
            decoder,
            queue,
            controls,
            config,
            playlist: Playlist::new(),
            input: InputBuffer::new(),
            pcm: PcmFrame::zeroed(),
            pcm_bytes: [0u8; MAX_PCM_BYTES],
            format_logged: false,
        }
    }

    /// The current playlist.
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Replace the playlist (cursor as given) and publish it.
    pub fn set_playlist(&mut self, playlist: Playlist) {
        self.playlist = playlist;
        self.publish();
    }

    /// Mutable access to the storage collaborator.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Re-enumerate the music directory. The cursor restarts at 0.
    ///
    /// A scan failure leaves an empty playlist. Returns the track count.
    pub async fn rescan(&mut self) -> usize {
        match scan_playlist(&mut self.storage, self.config.music_dir).await {
            Ok(playlist) => {
                info!("Found {} tracks in {}", playlist.len(), self.config.music_dir);
                self.playlist = playlist;
            }
            Err(e) => {
                error!("Scan of {} failed: {}", self.config.music_dir, Dbg(&e));
                self.playlist.clear();
            }
        }
        self.publish();
        self.playlist.len()
    }

    /// Scan once, then play the playlist forever. Never returns.
    pub async fn run(&mut self) {
        self.rescan().await;
        loop {
            if self.controls.take_rescan_request() {
                self.rescan().await;
            }
            match self.play_current().await {
                TrackOutcome::RescanRequested => {
                    self.rescan().await;
                }
                TrackOutcome::Empty => {
                    // Idle until the retry period elapses or a control changes.
                    select(
                        Timer::after(self.config.empty_retry),
                        self.controls.changed(),
                    )
                    .await;
                }
                TrackOutcome::Finished
                | TrackOutcome::SkippedForward
                | TrackOutcome::SkippedBack
                | TrackOutcome::OpenFailed
                | TrackOutcome::Undecodable => yield_now().await,
            }
        }
    }

    /// Decode the track under the cursor until it ends or an intent aborts it.
    ///
    /// The cursor has already moved to the following track when this returns
    /// (except for [`TrackOutcome::RescanRequested`] and
    /// [`TrackOutcome::Empty`]).
    pub async fn play_current(&mut self) -> TrackOutcome {
        let Some(path) = self.current_path() else {
            return TrackOutcome::Empty;
        };
        self.publish();
        info!("Playing: {}", path.as_str());

        let mut file = match self.storage.open_file(path.as_str()).await {
            Ok(file) => file,
            Err(e) => {
                error!("Failed to open {}: {}", path.as_str(), Dbg(&e));
                self.advance();
                Timer::after(self.config.open_retry).await;
                return TrackOutcome::OpenFailed;
            }
        };

        self.decoder.reset();
        self.input.clear();
        let mut decoded_any = false;

        loop {
            if self.controls.take_next_request() {
                self.skip();
                self.advance();
                return TrackOutcome::SkippedForward;
            }
            if self.controls.take_prev_request() {
                self.skip();
                self.playlist.prev();
                self.publish();
                return TrackOutcome::SkippedBack;
            }
            if self.controls.take_rescan_request() {
                return TrackOutcome::RescanRequested;
            }

            if !self.controls.is_playing() {
                // Pause stops consumption; the queued backlog still drains.
                let _ = with_timeout(self.config.pause_poll, self.controls.changed()).await;
                continue;
            }

            if !self.input.is_full() {
                match self.input.fill_from(&mut file).await {
                    Ok(0) => {
                        debug!("End of {}", path.as_str());
                        return self.end_track(path.as_str(), decoded_any).await;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Read error on {}: {}", path.as_str(), Dbg(&e));
                        return self.end_track(path.as_str(), decoded_any).await;
                    }
                }
            }

            let info = self.decoder.decode_frame(self.input.valid(), &mut self.pcm);

            if info.samples > 0 {
                decoded_any = true;
                if !self.format_logged {
                    info!(
                        "MP3 format: {} Hz, {} channels",
                        info.sample_rate,
                        info.channels
                    );
                    self.format_logged = true;
                }
                let n = self.pcm.write_le_bytes(&info, &mut self.pcm_bytes);
                self.queue
                    .push(self.pcm_bytes.get(..n).unwrap_or(&[]))
                    .await;
            }

            if info.bytes_consumed > 0 {
                self.input.consume(info.bytes_consumed);
            } else {
                if self.input.is_full() {
                    trace!("Resync: dropping one byte");
                    self.input.drop_front_byte();
                }
                yield_now().await;
            }
        }
    }

    async fn end_track(&mut self, path: &str, decoded_any: bool) -> TrackOutcome {
        self.advance();
        if decoded_any {
            return TrackOutcome::Finished;
        }
        warn!("No frame decoded from {}", path);
        Timer::after(self.config.open_retry).await;
        TrackOutcome::Undecodable
    }

    fn current_path(&self) -> Option<TrackPath> {
        self.playlist.current().and_then(|t| {
            let mut path = TrackPath::new();
            path.push_str(t.path()).ok()?;
            Some(path)
        })
    }

    fn advance(&mut self) {
        self.playlist.next();
        self.publish();
    }

    fn skip(&self) {
        if self.config.flush_on_skip {
            self.queue.clear();
        }
    }

    fn publish(&self) {
        if self.playlist.is_empty() {
            self.controls.clear_track();
        } else {
            self.controls
                .publish_track(self.playlist.index(), self.playlist.len());
        }
    }
}
