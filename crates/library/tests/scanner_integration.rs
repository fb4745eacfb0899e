//! Integration tests for the playlist scan over mock and real storage.
//!
//! These tests verify the name filter, the capacity cut-off and path
//! construction through the `Storage` trait, using the in-memory mock and a
//! temporary directory on the host file system.

use library::{scan_playlist, Track, MAX_TRACKS};
use platform::mocks::MemStorage;
use platform::storage_local::LocalFileStorage;

fn paths(playlist: &library::Playlist) -> Vec<String> {
    playlist.iter().map(|t: &Track| t.path().to_string()).collect()
}

#[tokio::test]
async fn test_scan_keeps_storage_order_and_filters_names() {
    let mut storage = MemStorage::new()
        .with_file("/sdcard/b.mp3", b"")
        .with_file("/sdcard/notes.txt", b"")
        .with_file("/sdcard/A.MP3", b"")
        .with_file("/sdcard/cover.jpg", b"");

    let playlist = scan_playlist(&mut storage, "/sdcard").await.expect("scan");

    assert_eq!(paths(&playlist), vec!["/sdcard/b.mp3", "/sdcard/A.MP3"]);
    assert_eq!(playlist.index(), 0);
}

#[tokio::test]
async fn test_scan_stops_at_capacity() {
    let mut storage = MemStorage::new();
    for i in 0..(MAX_TRACKS + 5) {
        storage.insert(&format!("/sdcard/t{i:02}.mp3"), b"");
    }

    let playlist = scan_playlist(&mut storage, "/sdcard").await.expect("scan");

    assert_eq!(playlist.len(), MAX_TRACKS);
    assert_eq!(
        playlist.get(MAX_TRACKS - 1).map(Track::path),
        Some("/sdcard/t19.mp3")
    );
}

#[tokio::test]
async fn test_scan_empty_directory_gives_empty_playlist() {
    let mut storage = MemStorage::new().with_file("/sdcard/readme.txt", b"");
    let playlist = scan_playlist(&mut storage, "/sdcard").await.expect("scan");
    assert!(playlist.is_empty());
}

#[tokio::test]
async fn test_scan_missing_directory_is_error() {
    let mut storage = MemStorage::new().with_file("/sdcard/a.mp3", b"");
    assert!(scan_playlist(&mut storage, "/nope").await.is_err());
}

#[tokio::test]
async fn test_scan_local_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["b.mp3", "a.mp3", "c.wav"] {
        std::fs::write(dir.path().join(name), b"x").expect("write");
    }
    std::fs::create_dir(dir.path().join("sub.mp3")).expect("mkdir");

    let mut storage = LocalFileStorage::new(dir.path().to_str().expect("utf-8 tempdir"));
    let playlist = scan_playlist(&mut storage, "/").await.expect("scan");

    // Local listing is sorted and skips directories.
    assert_eq!(paths(&playlist), vec!["/a.mp3", "/b.mp3"]);
}
