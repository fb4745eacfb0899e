//! Desktop emulator pieces: stdin controls and a real-time sink puller.
//!
//! | Key | Action            |
//! |-----|-------------------|
//! | `p` | Play / pause      |
//! | `n` | Next track        |
//! | `b` | Previous track    |
//! | `+` | Volume up         |
//! | `-` | Volume down       |
//! | `r` | Rescan music dir  |
//! | `q` | Quit              |

use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration as StdDuration, Instant};

use platform::config::SINK_PULL_BYTES;
use platform::{Button, InputDevice, InputEvent};
use tokio::sync::{mpsc, oneshot};

use crate::app::AppShared;
use crate::fmt::Dbg;

/// Output rate the sink thread emulates (44.1 kHz, 16-bit stereo).
pub const SINK_BYTES_PER_SEC: u64 = 44_100 * 4;

/// What one stdin line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward to the input handler.
    Input(InputEvent),
    /// Stop the emulator.
    Quit,
}

/// Map one line of stdin to a command; unknown input yields `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let event = match line.trim() {
        "p" => InputEvent::ButtonPress(Button::Play),
        "n" => InputEvent::ButtonPress(Button::Next),
        "b" => InputEvent::ButtonPress(Button::Previous),
        "+" => InputEvent::ButtonPress(Button::VolumeUp),
        "-" => InputEvent::ButtonPress(Button::VolumeDown),
        "r" => InputEvent::ButtonLongPress(Button::Play),
        "q" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Input(event))
}

/// Input device fed by the stdin thread.
pub struct StdinInput {
    rx: mpsc::UnboundedReceiver<InputEvent>,
}

impl InputDevice for StdinInput {
    async fn wait_for_event(&mut self) -> InputEvent {
        match self.rx.recv().await {
            Some(event) => event,
            // stdin closed: no more input, ever.
            None => core::future::pending().await,
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.rx.try_recv().ok()
    }
}

/// Start the stdin reader thread.
///
/// Returns the input device and a receiver that resolves on `q` or EOF.
pub fn spawn_stdin() -> std::io::Result<(StdinInput, oneshot::Receiver<()>)> {
    let (tx, rx) = mpsc::unbounded_channel();
    let (quit_tx, quit_rx) = oneshot::channel();
    thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Some(Command::Input(event)) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Some(Command::Quit) => break,
                    None => warn!("Unknown command '{}' (p n b + - r q)", line.trim()),
                }
            }
            let _ = quit_tx.send(());
        })?;
    Ok((StdinInput { rx }, quit_rx))
}

/// Start the thread that plays the transport: pull [`SINK_PULL_BYTES`] at
/// the real-time cadence while the stream is started.
///
/// When `out` is given, pulled PCM is appended to it (raw s16le stereo).
pub fn spawn_sink(
    shared: &'static AppShared,
    mut out: Option<std::fs::File>,
) -> std::io::Result<thread::JoinHandle<()>> {
    let period = StdDuration::from_micros(
        u64::try_from(SINK_PULL_BYTES)
            .unwrap_or(u64::MAX)
            .saturating_mul(1_000_000)
            .checked_div(SINK_BYTES_PER_SEC)
            .unwrap_or(1),
    );
    thread::Builder::new().name("a2dp-sink".into()).spawn(move || {
        let sink = shared.sink();
        let mut buf = [0u8; SINK_PULL_BYTES];
        let mut next = Instant::now();
        loop {
            next = next.checked_add(period).unwrap_or(next);
            if let Some(wait) = next.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
            if !shared.status().is_streaming() {
                continue;
            }
            let n = sink.pull(&mut buf);
            if let Some(file) = out.as_mut() {
                if let Err(e) = file.write_all(buf.get(..n).unwrap_or(&[])) {
                    error!("PCM dump failed: {}", Dbg(&e));
                    out = None;
                }
            }
        }
    })
}
