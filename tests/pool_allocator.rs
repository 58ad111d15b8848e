//! Integration tests for the segregated free-list pool path (sub-chunk sizes).

use stratalloc::Heap;

#[test]
fn pool_allocator_basic() {
    let mut heap = Heap::new();
    let ptr = heap.allocate(128).expect("allocation failed");

    unsafe {
        std::ptr::write_bytes(ptr.as_ptr(), 0x42, 128);
        assert_eq!(*ptr.as_ptr(), 0x42);
    }

    heap.release(Some(ptr));
}

#[test]
fn pool_allocator_reuse_is_lifo() {
    let mut heap = Heap::new();
    let a = heap.allocate(32).unwrap();
    let b = heap.allocate(32).unwrap();

    heap.release(Some(a));
    heap.release(Some(b));

    // Last released (b) should come back first off its size class's list.
    let c = heap.allocate(32).unwrap();
    assert_eq!(b.as_ptr(), c.as_ptr());
    let d = heap.allocate(32).unwrap();
    assert_eq!(a.as_ptr(), d.as_ptr());
}

#[test]
fn a_single_chunk_serves_many_small_blocks() {
    let mut heap = Heap::new();
    let mut ptrs = vec![];
    for i in 0..10 {
        let ptr = heap.allocate(32).expect("allocation failed");
        unsafe { std::ptr::write_bytes(ptr.as_ptr(), i as u8, 32) };
        ptrs.push(ptr);
    }

    for i in 0..ptrs.len() {
        for j in (i + 1)..ptrs.len() {
            assert_ne!(ptrs[i].as_ptr(), ptrs[j].as_ptr());
        }
    }
    for (i, ptr) in ptrs.iter().enumerate() {
        assert_eq!(unsafe { *ptr.as_ptr() }, i as u8);
    }
    for ptr in ptrs {
        heap.release(Some(ptr));
    }
}

#[test]
fn exhausting_a_size_class_grows_a_fresh_chunk() {
    let mut heap = Heap::new();
    // A 4096-byte chunk's cascade yields only one free 4096-byte (class 7)
    // block at a time once the base allocation consumes it; requesting two
    // max-class allocations in a row must grow a second chunk rather than
    // fail.
    let a = heap.allocate(stratalloc::CHUNK_SIZE - 8).expect("first max-class alloc");
    let b = heap.allocate(stratalloc::CHUNK_SIZE - 8).expect("second max-class alloc should grow a chunk");
    assert_ne!(a.as_ptr(), b.as_ptr());
    heap.release(Some(a));
    heap.release(Some(b));
}
