//! Block ledger - the singly linked partition of the arena
//!
//! Design: headers are kept in a table keyed by their arena offset, with
//! `next` links stored as offsets. Traversal always follows the links from
//! the head block, never the table's own order, so the link structure stays
//! the source of truth for address order, contiguity, and conservation.

use std::collections::BTreeMap;

use super::header::{BlockHeader, BlockInfo, HEADER_SIZE};

/// Offset-keyed table of block headers partitioning one arena.
///
/// Invariants (hold after every operation):
/// - exactly one traversal from `head` reaches every entry once
/// - link order equals ascending offset order
/// - successor offset (or the arena capacity) equals
///   `offset + HEADER_SIZE + size` for every block
/// - no two adjacent blocks are both free
pub(crate) struct Ledger {
    blocks: BTreeMap<usize, BlockHeader>,
    head: usize,
}

impl Ledger {
    /// Ledger with a single free block spanning the whole arena.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > HEADER_SIZE, "arena smaller than one header");

        let mut blocks = BTreeMap::new();
        blocks.insert(0, BlockHeader::free(capacity - HEADER_SIZE));

        Self { blocks, head: 0 }
    }

    /// Header starting at `offset`, if any block starts there.
    #[inline]
    pub(crate) fn get(&self, offset: usize) -> Option<&BlockHeader> {
        self.blocks.get(&offset)
    }

    /// First-fit allocation: claim the earliest free block that fits.
    ///
    /// Returns the header offset of the claimed block, `None` when no free
    /// block is large enough (capacity exhaustion, not corruption).
    pub(crate) fn allocate(&mut self, size: usize) -> Option<usize> {
        let offset = self.find_first_fit(size)?;

        if let Some(block) = self.blocks.get_mut(&offset) {
            block.is_free = false;
        }
        self.split(offset, size);

        Some(offset)
    }

    /// Linear scan from the head following `next` links.
    fn find_first_fit(&self, size: usize) -> Option<usize> {
        let mut cursor = Some(self.head);

        while let Some(offset) = cursor {
            let block = &self.blocks[&offset];
            if block.is_free && block.size >= size {
                return Some(offset);
            }
            cursor = block.next;
        }

        None
    }

    /// Carve the tail of the block at `offset` into a new free block.
    ///
    /// Splits only when the leftover strictly exceeds one header's worth
    /// beyond the request, so the remainder can host its own header without
    /// underflow. Otherwise the block is handed out whole and the slack is
    /// accepted as internal fragmentation.
    fn split(&mut self, offset: usize, size: usize) {
        let Some(block) = self.blocks.get(&offset).copied() else {
            return;
        };
        if block.size <= size + HEADER_SIZE {
            return;
        }

        let split_offset = offset + HEADER_SIZE + size;
        let remainder = BlockHeader {
            is_free: true,
            size: block.size - size - HEADER_SIZE,
            next: block.next,
        };
        self.blocks.insert(split_offset, remainder);

        if let Some(block) = self.blocks.get_mut(&offset) {
            block.size = size;
            block.next = Some(split_offset);
        }
    }

    /// Mark the block at `offset` free.
    ///
    /// Returns `false` when no block starts there, which means the offset
    /// did not come from a live allocation.
    pub(crate) fn release(&mut self, offset: usize) -> bool {
        match self.blocks.get_mut(&offset) {
            Some(block) => {
                block.is_free = true;
                true
            }
            None => false,
        }
    }

    /// Merge every run of adjacent free blocks into its first member.
    ///
    /// After absorbing a successor the cursor stays put and re-checks the
    /// same position against the new successor, so runs of three or more
    /// free blocks collapse within a single pass.
    pub(crate) fn coalesce(&mut self) {
        let mut cursor = Some(self.head);

        while let Some(offset) = cursor {
            let block = self.blocks[&offset];
            let Some(next_offset) = block.next else {
                break;
            };

            if block.is_free && self.blocks[&next_offset].is_free {
                let successor = self.blocks[&next_offset];
                self.blocks.remove(&next_offset);
                if let Some(block) = self.blocks.get_mut(&offset) {
                    block.size += HEADER_SIZE + successor.size;
                    block.next = successor.next;
                }
            } else {
                cursor = block.next;
            }
        }
    }

    /// Lazy read-only traversal in ascending address order.
    #[inline]
    pub(crate) fn iter(&self) -> Blocks<'_> {
        Blocks {
            ledger: self,
            cursor: Some(self.head),
        }
    }
}

/// Iterator over the ledger's blocks, head to tail.
///
/// Purely observational: holds a shared borrow, mutates nothing, and can be
/// recreated at any time to restart the walk.
pub struct Blocks<'a> {
    ledger: &'a Ledger,
    cursor: Option<usize>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        let offset = self.cursor?;
        let block = self.ledger.get(offset)?;
        self.cursor = block.next;

        Some(BlockInfo {
            offset,
            size: block.size,
            is_free: block.is_free,
        })
    }
}
