//! Block metadata - layout primitives for the heap
//!
//! Design: every block is a header followed by its payload. Headers live in
//! the ledger's offset-keyed table rather than inside the arena bytes, but
//! the arena accounting charges `HEADER_SIZE` per block, so offsets, payload
//! placement, and conservation sums match the embedded layout exactly.

/// Bytes charged to the arena for every block header.
///
/// Derived from the header record's own layout so the split threshold and
/// payload offsets stay in lockstep with the metadata we actually keep.
pub const HEADER_SIZE: usize = core::mem::size_of::<BlockHeader>();

/// Per-block metadata record.
///
/// `size` is usable payload bytes (header excluded). `next` is the arena
/// offset of the successor header, `None` for the last block. Link order
/// always equals address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockHeader {
    pub is_free: bool,
    pub size: usize,
    pub next: Option<usize>,
}

impl BlockHeader {
    /// Header for a free block with no successor.
    #[inline]
    pub(crate) const fn free(size: usize) -> Self {
        Self {
            is_free: true,
            size,
            next: None,
        }
    }
}

/// Payload address handed to callers.
///
/// Wraps the payload's arena offset (header offset + `HEADER_SIZE`).
/// Callers only ever see payload addresses, never header offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(usize);

impl Address {
    /// Reconstruct an address from a raw payload offset.
    ///
    /// Only addresses previously returned by [`Heap::allocate`] are
    /// meaningful; anything else is rejected by the deallocation path's
    /// bounds and liveness checks.
    ///
    /// [`Heap::allocate`]: super::Heap::allocate
    #[inline]
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Raw payload offset within the arena.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }

    /// Payload address for the block whose header sits at `header_offset`.
    #[inline]
    pub(crate) const fn from_header(header_offset: usize) -> Self {
        Self(header_offset + HEADER_SIZE)
    }

    /// Recover the header offset this payload address points past.
    ///
    /// `None` when the address precedes any possible payload, i.e. it could
    /// never have come from an allocation.
    #[inline]
    pub(crate) const fn header_offset(self) -> Option<usize> {
        self.0.checked_sub(HEADER_SIZE)
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the diagnostic traversal: (address, size, is_free).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInfo {
    /// Arena offset of the block's header.
    pub offset: usize,
    /// Usable payload bytes.
    pub size: usize,
    /// Whether the payload is available for reuse.
    pub is_free: bool,
}

impl BlockInfo {
    /// Payload address for this block.
    #[inline]
    pub const fn payload(self) -> Address {
        Address::from_header(self.offset)
    }

    /// Total arena bytes the block accounts for, header included.
    #[inline]
    pub const fn span(self) -> usize {
        HEADER_SIZE + self.size
    }
}
