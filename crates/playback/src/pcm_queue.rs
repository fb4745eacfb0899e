//! Bounded byte queue between the decode task and the transport pull.
//!
//! A thin wrapper over [`embassy_sync::pipe::Pipe`]: FIFO bytes, fixed
//! capacity, `const`-constructible so it can live in a `static`.
//!
//! - [`PcmQueue::push`] suspends the producer until every byte fits. A stalled
//!   consumer stalls the decoder; that is backpressure, not a fault.
//! - [`PcmQueue::pop_upto`] never blocks and may return fewer bytes than asked.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::pipe::Pipe;
use platform::config::PCM_QUEUE_BYTES;

/// Queue type shared between the decode task and a transport callback that
/// may run on another core or thread.
pub type SharedPcmQueue = PcmQueue<CriticalSectionRawMutex, PCM_QUEUE_BYTES>;

/// Fixed-capacity SPSC byte queue of `N` bytes.
pub struct PcmQueue<M: RawMutex, const N: usize> {
    pipe: Pipe<M, N>,
}

impl<M: RawMutex, const N: usize> PcmQueue<M, N> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self { pipe: Pipe::new() }
    }

    /// Append all of `bytes`, waiting for space as needed.
    pub async fn push(&self, bytes: &[u8]) {
        let mut rest = bytes;
        while !rest.is_empty() {
            let n = self.pipe.write(rest).await;
            rest = rest.get(n..).unwrap_or(&[]);
        }
    }

    /// Copy up to `out.len()` immediately available bytes into `out`.
    ///
    /// Returns the count copied; 0 when the queue is empty.
    pub fn pop_upto(&self, out: &mut [u8]) -> usize {
        if out.is_empty() {
            return 0;
        }
        self.pipe.try_read(out).unwrap_or(0)
    }

    /// Discard everything queued.
    pub fn clear(&self) {
        self.pipe.clear();
    }

    /// Bytes currently queued.
    pub fn len(&self) -> usize {
        self.pipe.len()
    }

    /// `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pipe.is_empty()
    }

    /// Total capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<M: RawMutex, const N: usize> Default for PcmQueue<M, N> {
    fn default() -> Self {
        Self::new()
    }
}
