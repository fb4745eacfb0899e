//! Desktop emulator: plays `MUSIC_PATH` to a simulated speaker.
//!
//! ```bash
//! MUSIC_PATH=~/Music RUST_LOG=debug cargo run -p firmware --bin emulator --features emulator
//! ```
//!
//! Environment:
//! - `MUSIC_PATH` - directory whose `.mp3` files form the playlist (default `.`)
//! - `PEER_ADDR` - speaker address `aa:bb:cc:dd:ee:ff`; skips discovery
//! - `HEARTBEAT_MS` - heartbeat period (default 10000)
//! - `PCM_OUT` - append the pulled PCM (s16le, 44.1 kHz stereo) to this file

#![allow(clippy::print_stdout)]

use anyhow::Context;
use bluetooth::Event;
use embassy_time::Duration;
use firmware::config::parse_bd_addr;
use firmware::emulator::{spawn_sink, spawn_stdin};
use firmware::{AppConfig, AppShared, LoopbackTransport};
use platform::config::APP_NAME;
use platform::storage_local::LocalFileStorage;
use platform::BdAddr;
use playback::mp3_decoder::NanoMp3Decoder;
use tracing_subscriber::EnvFilter;

static SHARED: AppShared = AppShared::new();

/// Address the loopback speaker answers discovery with.
const EMULATED_SPEAKER: BdAddr = BdAddr([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let music_path = std::env::var("MUSIC_PATH").unwrap_or_else(|_| ".".into());
    let storage = LocalFileStorage::new(&music_path);

    let mut config = AppConfig::default().with_music_dir("/");
    if let Ok(addr) = std::env::var("PEER_ADDR") {
        let peer = parse_bd_addr(&addr).with_context(|| format!("bad PEER_ADDR {addr}"))?;
        config = config.with_fixed_peer(peer);
    }
    if let Ok(ms) = std::env::var("HEARTBEAT_MS") {
        let ms: u64 = ms.parse().with_context(|| format!("bad HEARTBEAT_MS {ms}"))?;
        config = config.with_heartbeat_period(Duration::from_millis(ms));
    }
    let pcm_out = std::env::var("PCM_OUT")
        .ok()
        .map(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open PCM_OUT {path}"))
        })
        .transpose()?;

    println!("{APP_NAME} emulator - music from {music_path}");
    println!("Commands: p play/pause, n next, b prev, + / - volume, r rescan, q quit");

    let peer = config.link.fixed_peer.unwrap_or(EMULATED_SPEAKER);
    let transport = LoopbackTransport::new(&SHARED.events, peer);
    let (mut input, quit) = spawn_stdin().context("stdin thread")?;
    spawn_sink(&SHARED, pcm_out).context("sink thread")?;

    // The loopback stack is up as soon as it exists.
    SHARED.events.post(Event::StackUp).await;

    tokio::select! {
        () = firmware::run(&SHARED, storage, NanoMp3Decoder::new(), transport, &mut input, &config) => {}
        _ = quit => {}
    }

    println!("{}", SHARED.status());
    Ok(())
}
