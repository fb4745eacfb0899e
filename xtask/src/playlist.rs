//! xtask playlist: show what a scan of `music_dir` would queue.
//!
//! Runs the device's own scanner over the local filesystem, so the output
//! honours the same extension filter, ordering and 20-track cap.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use library::{scan_playlist, Playlist, MAX_TRACKS};
use platform::storage_local::LocalFileStorage;

/// Entry point called from main.rs
pub fn run(music_dir: &Path) -> Result<()> {
    println!("Scanning: {}", music_dir.display());
    let playlist = build(music_dir)?;

    if playlist.is_empty() {
        println!("{}", "  No playable files".yellow());
        return Ok(());
    }
    for track in playlist.iter() {
        println!("  {:>2}. {}", track.position().saturating_add(1), track.file_name());
    }
    if playlist.is_full() {
        println!(
            "{}",
            format!("  Playlist full ({MAX_TRACKS} tracks); later files are ignored").yellow()
        );
    }
    println!("{}", format!("✓ {} tracks", playlist.len()).green());
    Ok(())
}

/// Scan `music_dir` as the device scans its mount point.
pub(crate) fn build(music_dir: &Path) -> Result<Playlist> {
    let root = music_dir
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("music dir is not valid UTF-8"))?;
    let mut storage = LocalFileStorage::new(root);
    embassy_futures::block_on(scan_playlist(&mut storage, "/"))
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("scanning {}", music_dir.display()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn build_filters_and_sorts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.mp3"), b"FAKE").unwrap();
        fs::write(tmp.path().join("a.MP3"), b"FAKE").unwrap();
        fs::write(tmp.path().join("cover.jpg"), b"FAKE").unwrap();

        let playlist = build(tmp.path()).unwrap();
        let names: Vec<&str> = playlist.iter().map(|t| t.file_name()).collect();
        assert_eq!(names, vec!["a.MP3", "b.mp3"]);
        assert_eq!(playlist.get(0).unwrap().path(), "/a.MP3");
    }

    #[test]
    fn build_caps_at_max_tracks() {
        let tmp = TempDir::new().unwrap();
        for i in 0..25 {
            fs::write(tmp.path().join(format!("{i:02}.mp3")), b"FAKE").unwrap();
        }
        let playlist = build(tmp.path()).unwrap();
        assert_eq!(playlist.len(), MAX_TRACKS);
        assert!(playlist.is_full());
    }

    #[test]
    fn build_reports_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(build(&tmp.path().join("missing")).is_err());
    }
}
