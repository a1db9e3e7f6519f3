//! Arena - the fixed backing memory region
//!
//! Design: one contiguous zero-initialized buffer acquired from the Rust
//! allocator at construction, never resized, released when the owning heap
//! drops. All access is offset-based and bounds-checked.

/// Default arena capacity in bytes.
pub const HEAP_CAPACITY: usize = 1024;

/// Fixed-size byte region backing all payloads.
pub(crate) struct Arena {
    buf: Box<[u8]>,
}

impl Arena {
    /// Acquire a zeroed arena of `capacity` bytes.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
        }
    }

    /// Arena capacity in bytes.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Read-only view of `len` bytes starting at `offset`.
    ///
    /// `None` when the range falls outside the arena.
    #[inline]
    pub(crate) fn slice(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.buf.get(offset..end)
    }

    /// Mutable view of `len` bytes starting at `offset`.
    #[inline]
    pub(crate) fn slice_mut(&mut self, offset: usize, len: usize) -> Option<&mut [u8]> {
        let end = offset.checked_add(len)?;
        self.buf.get_mut(offset..end)
    }
}
