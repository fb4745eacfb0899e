//! Track: an opaque file reference plus its position in the playlist.

use heapless::String;
use platform::config::MAX_PATH_LEN;

/// Full path of a track on the storage volume.
pub type TrackPath = String<MAX_PATH_LEN>;

/// A single scanned audio file.
///
/// Immutable once scanned; the whole playlist is replaced on rescan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    path: TrackPath,
    position: usize,
}

impl Track {
    /// Create a track, or `None` when `path` does not fit in [`MAX_PATH_LEN`].
    pub fn new(path: &str, position: usize) -> Option<Self> {
        let mut buf = TrackPath::new();
        buf.push_str(path).ok()?;
        Some(Self {
            path: buf,
            position,
        })
    }

    /// Full path, suitable for [`platform::Storage::open_file`].
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Zero-based position in the playlist it was scanned into.
    pub fn position(&self) -> usize {
        self.position
    }

    /// File name component of the path.
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit_once('/')
            .map_or(self.path.as_str(), |(_, name)| name)
    }
}
