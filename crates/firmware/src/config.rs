//! Application configuration.
//!
//! One [`AppConfig`] bundles the settings of every task. Defaults come from
//! [`platform::config`]; the emulator overrides the music directory and the
//! heartbeat period from the environment.

use bluetooth::LinkConfig;
use embassy_time::Duration;
use platform::config::{HEARTBEAT_PERIOD_MS, VOLUME_STEP};
use platform::BdAddr;
use playback::PipelineConfig;

/// Settings for the decode, link, heartbeat and input tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// Decode pipeline settings.
    pub pipeline: PipelineConfig,
    /// Link management settings.
    pub link: LinkConfig,
    /// Heartbeat period.
    pub heartbeat_period: Duration,
    /// Volume change per button press or encoder detent.
    pub volume_step: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            link: LinkConfig::default(),
            heartbeat_period: Duration::from_millis(HEARTBEAT_PERIOD_MS),
            volume_step: VOLUME_STEP,
        }
    }
}

impl AppConfig {
    /// Enumerate `dir` instead of the SD mount point.
    #[must_use]
    pub fn with_music_dir(mut self, dir: &'static str) -> Self {
        self.pipeline.music_dir = dir;
        self
    }

    /// Connect to `peer` directly, skipping discovery.
    #[must_use]
    pub fn with_fixed_peer(mut self, peer: BdAddr) -> Self {
        self.link.fixed_peer = Some(peer);
        self
    }

    /// Override the heartbeat period.
    #[must_use]
    pub fn with_heartbeat_period(mut self, period: Duration) -> Self {
        self.heartbeat_period = period;
        self
    }
}

/// Parse `aa:bb:cc:dd:ee:ff` (case-insensitive).
pub fn parse_bd_addr(s: &str) -> Option<BdAddr> {
    let mut out = [0u8; 6];
    let mut parts = s.split(':');
    for byte in &mut out {
        let part = parts.next()?;
        if part.len() != 2 {
            return None;
        }
        *byte = u8::from_str_radix(part, 16).ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(BdAddr(out))
}
