//! freeheap - explicit free-list allocator over a fixed arena
//!
//! A minimal malloc/free-style allocator: one fixed-size arena partitioned
//! into blocks linked in address order, first-fit allocation with block
//! splitting, and free-block coalescing after every deallocation.
//!
//! ```
//! use freeheap::Heap;
//!
//! let mut heap = Heap::new();
//!
//! let a = heap.allocate(100);
//! let b = heap.allocate(200);
//! assert_ne!(a, b);
//!
//! heap.deallocate(a);
//!
//! // First-fit reuses the freed block for anything that fits.
//! assert_eq!(heap.allocate(50), a);
//!
//! for block in heap.blocks() {
//!     println!("block @ {}: {} bytes, free = {}", block.offset, block.size, block.is_free);
//! }
//! # heap.deallocate(b);
//! ```

pub mod heap;
pub mod logging;

// Re-export core types
pub use heap::{Address, BlockInfo, Blocks, Heap, HeapStats, HEADER_SIZE, HEAP_CAPACITY};

/// Library initialization: sets up the logging subsystem.
///
/// Optional — the heap itself has no global state and needs no setup; each
/// [`Heap`] value is fully initialized by its constructor.
pub fn init() {
    logging::init();
}
