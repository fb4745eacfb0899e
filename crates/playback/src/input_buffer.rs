//! Staging buffer for compressed bytes not yet handed to the codec.
//!
//! Valid bytes always start at index 0: consuming compacts the remainder to
//! the front, so the codec always sees one contiguous slice.

use platform::storage::File;

/// Fixed-capacity compressed-input buffer of `N` bytes.
pub struct InputBuffer<const N: usize> {
    buf: [u8; N],
    valid: usize,
}

impl<const N: usize> InputBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            buf: [0u8; N],
            valid: 0,
        }
    }

    /// Top up from `file` with a single read into the free tail.
    ///
    /// Returns the byte count read; `Ok(0)` with free space means end of file.
    /// A full buffer returns `Ok(0)` without reading.
    pub async fn fill_from<F: File>(&mut self, file: &mut F) -> Result<usize, F::Error> {
        let Some(free) = self.buf.get_mut(self.valid..) else {
            return Ok(0);
        };
        if free.is_empty() {
            return Ok(0);
        }
        let n = file.read(free).await?.min(free.len());
        self.valid = self.valid.saturating_add(n);
        Ok(n)
    }

    /// Append bytes directly; returns how many fit.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> usize {
        let free = self.buf.get_mut(self.valid..).unwrap_or(&mut []);
        let n = free.len().min(bytes.len());
        if let (Some(dst), Some(src)) = (free.get_mut(..n), bytes.get(..n)) {
            dst.copy_from_slice(src);
        }
        self.valid = self.valid.saturating_add(n);
        n
    }

    /// The buffered bytes.
    pub fn valid(&self) -> &[u8] {
        self.buf.get(..self.valid).unwrap_or(&[])
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.valid
    }

    /// `true` when nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.valid == 0
    }

    /// `true` when no more bytes can be read in.
    pub fn is_full(&self) -> bool {
        self.valid == N
    }

    /// Remove `n` bytes from the front (clamped to the valid count) and move
    /// the remainder down.
    pub fn consume(&mut self, n: usize) {
        let n = n.min(self.valid);
        self.buf.copy_within(n..self.valid, 0);
        self.valid = self.valid.saturating_sub(n);
    }

    /// Resync step: drop exactly one byte from the front.
    pub fn drop_front_byte(&mut self) {
        self.consume(1);
    }

    /// Forget all buffered bytes.
    pub fn clear(&mut self) {
        self.valid = 0;
    }

    /// Capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for InputBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
