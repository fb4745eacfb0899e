//! Scanner: walks the card's root directory and collects playable files.
//!
//! A name is playable when it contains `.mp3` anywhere, compared
//! case-insensitively. The walk keeps storage order and stops as soon as the
//! playlist is full. Re-scanning is explicit: nothing here watches the card.

use crate::playlist::Playlist;
use crate::track::TrackPath;
use platform::Storage;

/// Error returned by [`scan_playlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError<E> {
    /// The directory could not be enumerated.
    Storage(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for ScanError<E> {
    #[allow(clippy::use_debug)] // storage errors only guarantee Debug
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "directory scan failed: {e:?}"),
        }
    }
}

/// Returns `true` when `name` contains `.mp3`, ignoring ASCII case.
///
/// Operates entirely in `core` so it is `no_std` compatible.
pub fn is_playable(name: &str) -> bool {
    name.as_bytes()
        .windows(4)
        .any(|w| w.eq_ignore_ascii_case(b".mp3"))
}

/// Build `<dir>/<name>`, or `None` when the result exceeds the path capacity.
///
/// An empty `dir` yields `name` unchanged; a trailing `/` on `dir` is not
/// doubled.
pub fn join_path(dir: &str, name: &str) -> Option<TrackPath> {
    let mut path = TrackPath::new();
    path.push_str(dir).ok()?;
    if !dir.is_empty() && !dir.ends_with('/') {
        path.push('/').ok()?;
    }
    path.push_str(name).ok()?;
    Some(path)
}

/// Enumerate `dir` and build a fresh playlist of its playable files.
///
/// Entries whose full path would not fit are skipped. The returned playlist
/// has its cursor at index 0; it may be empty.
pub async fn scan_playlist<S: Storage>(
    storage: &mut S,
    dir: &str,
) -> Result<Playlist, ScanError<S::Error>> {
    let mut playlist = Playlist::new();
    storage
        .list_dir(dir, |name| {
            if is_playable(name) {
                if let Some(path) = join_path(dir, name) {
                    // Full is the only error left once the path fits.
                    let _ = playlist.push(path.as_str());
                }
            }
            !playlist.is_full()
        })
        .await
        .map_err(ScanError::Storage)?;
    Ok(playlist)
}
