//! Integration tests for the mmap-backed bulk path (requests too large for
//! a single chunk).

use stratalloc::Heap;

fn oversize() -> usize {
    stratalloc::CHUNK_SIZE + 1
}

#[test]
fn bulk_allocate_write_release_round_trip() {
    let mut heap = Heap::new();
    let len = oversize();
    let ptr = heap.allocate(len).expect("bulk allocation failed");

    unsafe {
        std::ptr::write_bytes(ptr.as_ptr(), 0x99, len);
        assert_eq!(*ptr.as_ptr(), 0x99);
        assert_eq!(*ptr.as_ptr().add(len - 1), 0x99);
    }

    heap.release(Some(ptr));
}

#[test]
fn bulk_blocks_are_not_recycled_through_the_pool() {
    let mut heap = Heap::new();
    let len = oversize();
    let a = heap.allocate(len).unwrap();
    heap.release(Some(a));

    // A pool-sized request must never be handed a stale bulk address back.
    let b = heap.allocate(64).unwrap();
    assert_ne!(a.as_ptr(), b.as_ptr());
    heap.release(Some(b));
}

#[test]
fn multiple_bulk_allocations_are_independent() {
    let mut heap = Heap::new();
    let len = oversize();
    let a = heap.allocate(len).unwrap();
    let b = heap.allocate(len).unwrap();
    assert_ne!(a.as_ptr(), b.as_ptr());
    heap.release(Some(a));
    heap.release(Some(b));
}

#[test]
fn allocate_zeroed_bulk_is_fully_zero() {
    let mut heap = Heap::new();
    let ptr = heap
        .allocate_zeroed(1, stratalloc::CHUNK_SIZE + 16)
        .expect("bulk allocate_zeroed failed");
    unsafe {
        for i in 0..(stratalloc::CHUNK_SIZE + 16) {
            assert_eq!(*ptr.as_ptr().add(i), 0);
        }
    }
    heap.release(Some(ptr));
}
