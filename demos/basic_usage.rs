//! Basic usage examples of the stratalloc heap.
//!
//! This demonstrates the fundamental usage pattern: a single [`Heap`]
//! handle serving small pool requests, a large bulk request, and a resize.

use stratalloc::{Heap, HeapConfig};

fn main() {
    println!("=== stratalloc Basic Usage ===\n");

    pool_allocation_example();
    bulk_allocation_example();
    resize_example();
}

fn pool_allocation_example() {
    println!("## Pool allocation");
    println!("Use case: many small, same-sized objects, cheap reuse\n");

    let mut heap = Heap::with_config(HeapConfig::new().with_diagnostics(true));

    let ptr1 = heap.allocate(64).expect("allocation failed");
    println!("  Allocated 64 bytes at {:?}", ptr1.as_ptr());
    let ptr2 = heap.allocate(64).expect("allocation failed");
    println!("  Allocated 64 bytes at {:?}", ptr2.as_ptr());

    heap.release(Some(ptr1));
    heap.release(Some(ptr2));
    println!("  Released both blocks\n");

    // A same-sized request after release reuses the most recently freed block.
    let ptr3 = heap.allocate(64).expect("allocation failed");
    println!("  Reused address: {:?}\n", ptr3.as_ptr());
    heap.release(Some(ptr3));
}

fn bulk_allocation_example() {
    println!("## Bulk allocation");
    println!("Use case: a single request too large for the pool's chunk size\n");

    let mut heap = Heap::new();
    let len = stratalloc::CHUNK_SIZE * 8;
    let ptr = heap.allocate(len).expect("bulk allocation failed");
    println!("  Allocated {len} bytes directly via the bulk path at {:?}", ptr.as_ptr());
    heap.release(Some(ptr));
    println!("  Released\n");
}

fn resize_example() {
    println!("## Resize");
    println!("Use case: growing a buffer while preserving its contents\n");

    let mut heap = Heap::new();
    let ptr = heap.allocate(32).expect("allocation failed");
    unsafe { std::ptr::write_bytes(ptr.as_ptr(), 0x7a, 32) };

    let grown = heap.resize(Some(ptr), 500).expect("resize failed");
    println!("  Grew 32 -> 500 bytes, moved to {:?}", grown.as_ptr());

    let first_byte = unsafe { *grown.as_ptr() };
    println!("  First byte preserved across the move: 0x{first_byte:02x}\n");

    heap.release(Some(grown));
}
