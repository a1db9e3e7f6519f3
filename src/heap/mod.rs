//! Heap allocator - explicit free list over a fixed arena
//!
//! Design: one owned `Heap` value, four responsibilities over one ledger:
//! 1. Arena: fixed byte region acquired once (`arena`)
//! 2. Ledger: offset-keyed block table linked in address order (`ledger`)
//! 3. Allocate: first-fit scan + split, O(blocks)
//! 4. Reclaim: mark free + coalesce, run after every deallocation
//!
//! Single-threaded by construction: all mutation goes through `&mut self`,
//! so the single-logical-caller assumption is enforced by the borrow
//! checker rather than by convention. Concurrent callers need an external
//! `Mutex<Heap>` serializing every call.

mod arena;
mod header;
mod ledger;


pub use arena::HEAP_CAPACITY;
pub use header::{Address, BlockInfo, HEADER_SIZE};
pub use ledger::Blocks;

use tracing::warn;

use crate::logging::{log_allocation, log_deallocation, log_exhaustion};
use arena::Arena;
use ledger::Ledger;

/// Explicit-free-list heap over a fixed-size arena.
///
/// Construction establishes a single free block spanning the whole arena.
/// Allocation hands out payload addresses; deallocation returns them. The
/// arena is never grown, shrunk, or released before the heap drops.
pub struct Heap {
    arena: Arena,
    ledger: Ledger,
}

impl Heap {
    /// Heap over the default [`HEAP_CAPACITY`] arena.
    pub fn new() -> Self {
        Self::with_capacity(HEAP_CAPACITY)
    }

    /// Heap over a `capacity`-byte arena.
    ///
    /// # Panics
    ///
    /// Panics unless `capacity > HEADER_SIZE`: the arena must at least fit
    /// the head block's header.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity > HEADER_SIZE,
            "heap capacity must exceed one header ({HEADER_SIZE} bytes)"
        );

        Self {
            arena: Arena::new(capacity),
            ledger: Ledger::new(capacity),
        }
    }

    /// Arena capacity in bytes, headers included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Allocate `size` payload bytes.
    ///
    /// First-fit: the earliest free block with `size` or more payload bytes
    /// is claimed and split when the leftover can host another block.
    /// Returns the payload address, or `None` when no free block is large
    /// enough. `size == 0` is accepted and goes through the same mechanics.
    pub fn allocate(&mut self, size: usize) -> Option<Address> {
        match self.ledger.allocate(size) {
            Some(offset) => {
                let address = Address::from_header(offset);
                log_allocation(size, address.offset());
                Some(address)
            }
            None => {
                log_exhaustion(size);
                None
            }
        }
    }

    /// Return a previously allocated payload address to the heap.
    ///
    /// `None` is a no-op. A live address is marked free and a full
    /// coalescing pass runs, so no two adjacent blocks are ever left free.
    /// An address that does not name a live block (foreign, stale after a
    /// merge, out of bounds) is ignored with a warning event; freeing an
    /// already-free block re-marks it and re-coalesces, which changes
    /// nothing. Neither case is reported to the caller.
    pub fn deallocate(&mut self, address: Option<Address>) {
        let Some(address) = address else {
            return;
        };

        let Some(offset) = address.header_offset() else {
            warn!(
                event = "deallocate_rejected",
                address = address.offset(),
                reason = "out_of_bounds",
                "address precedes any possible payload"
            );
            return;
        };
        if offset >= self.capacity() {
            warn!(
                event = "deallocate_rejected",
                address = address.offset(),
                reason = "out_of_bounds",
                "recovered header offset past arena end"
            );
            return;
        }
        if !self.ledger.release(offset) {
            warn!(
                event = "deallocate_rejected",
                address = address.offset(),
                reason = "no_such_block",
                "no live block starts at the recovered offset"
            );
            return;
        }

        self.ledger.coalesce();
        log_deallocation(address.offset());
    }

    /// Diagnostic traversal: one [`BlockInfo`] per block, head to tail.
    ///
    /// Lazy, read-only, and restartable; call again for a fresh walk.
    #[inline]
    pub fn blocks(&self) -> Blocks<'_> {
        self.ledger.iter()
    }

    /// Read-only view of a live allocation's payload bytes.
    ///
    /// `None` when the address does not name a currently allocated block.
    pub fn payload(&self, address: Address) -> Option<&[u8]> {
        let size = self.live_payload_size(address)?;
        self.arena.slice(address.offset(), size)
    }

    /// Mutable view of a live allocation's payload bytes.
    pub fn payload_mut(&mut self, address: Address) -> Option<&mut [u8]> {
        let size = self.live_payload_size(address)?;
        self.arena.slice_mut(address.offset(), size)
    }

    /// Payload size of the allocated block at `address`, `None` for free
    /// blocks and addresses that name no block at all.
    fn live_payload_size(&self, address: Address) -> Option<usize> {
        let offset = address.header_offset()?;
        let block = self.ledger.get(offset)?;
        (!block.is_free).then_some(block.size)
    }

    /// Heap statistics computed from one ledger traversal.
    pub fn stats(&self) -> HeapStats {
        let mut stats = HeapStats {
            capacity: self.capacity(),
            block_count: 0,
            free_bytes: 0,
            largest_free: 0,
        };

        for block in self.blocks() {
            stats.block_count += 1;
            if block.is_free {
                stats.free_bytes += block.size;
                stats.largest_free = stats.largest_free.max(block.size);
            }
        }

        stats
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

/// Heap statistics for monitoring and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    /// Arena capacity in bytes.
    pub capacity: usize,
    /// Blocks currently in the ledger.
    pub block_count: usize,
    /// Payload bytes sitting in free blocks.
    pub free_bytes: usize,
    /// Largest single free payload, i.e. the biggest request that can
    /// currently succeed.
    pub largest_free: usize,
}
