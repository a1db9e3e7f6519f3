//! Demonstration driver - replays the classic malloc/free walkthrough
//! against the heap's public contract: allocate 100 and 200 bytes, free the
//! first block, allocate 50 and watch first-fit reuse it, dumping the block
//! ledger after every step.

use freeheap::Heap;

fn dump(heap: &Heap) {
    println!("Heap:");
    for block in heap.blocks() {
        println!(
            "  block @ {:4}  size = {:4}  free = {}",
            block.offset, block.size, block.is_free
        );
    }
}

fn main() {
    freeheap::init();

    let mut heap = Heap::new();
    println!(
        "capacity = {} bytes, header = {} bytes",
        heap.capacity(),
        freeheap::HEADER_SIZE
    );
    dump(&heap);

    let a = heap.allocate(100);
    println!("\nallocated 100 bytes at {:?}", a);
    dump(&heap);

    let b = heap.allocate(200);
    println!("\nallocated 200 bytes at {:?}", b);
    dump(&heap);

    // Prove the payload is real storage.
    if let Some(addr) = b {
        if let Some(payload) = heap.payload_mut(addr) {
            payload.fill(0xAB);
        }
    }

    heap.deallocate(a);
    println!("\nfreed the 100-byte block");
    dump(&heap);

    let c = heap.allocate(50);
    println!(
        "\nallocated 50 bytes at {:?} (reused the freed block: {})",
        c,
        c == a
    );
    dump(&heap);
}
