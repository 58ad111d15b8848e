//! End-to-end tests for the raw four-operation surface.

use stratalloc::Heap;

#[test]
fn allocate_write_release_round_trip() {
    let mut heap = Heap::new();
    let layout_size = 128;
    let ptr = heap.allocate(layout_size).expect("allocation failed");

    unsafe {
        std::ptr::write_bytes(ptr.as_ptr(), 0x42, layout_size);
        assert_eq!(*ptr.as_ptr(), 0x42);
    }

    heap.release(Some(ptr));
}

#[test]
fn released_pool_block_is_reused() {
    let mut heap = Heap::new();
    let ptr1 = heap.allocate(64).expect("first allocation failed");
    let addr1 = ptr1.as_ptr() as usize;

    heap.release(Some(ptr1));

    let ptr2 = heap.allocate(64).expect("second allocation failed");
    let addr2 = ptr2.as_ptr() as usize;

    assert_eq!(addr1, addr2, "a freed pool block should be handed back out first");
}

#[test]
fn many_small_blocks_are_pairwise_distinct() {
    let mut heap = Heap::new();
    let mut ptrs = Vec::new();
    for i in 0..32u8 {
        let ptr = heap.allocate(32).expect("allocation failed");
        unsafe { std::ptr::write_bytes(ptr.as_ptr(), i, 32) };
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
}

#[test]
fn allocate_zero_returns_none() {
    let mut heap = Heap::new();
    assert!(heap.allocate(0).is_none());
}

#[test]
fn release_none_is_a_no_op() {
    let mut heap = Heap::new();
    heap.release(None);
}

#[test]
fn scenario_e_hundred_byte_request_lands_in_class_two() {
    // allocate(100): rounds to 104, class_of(104) == 2 (total 128).
    let mut heap = Heap::new();
    let a = heap.allocate(100).unwrap();
    let b = heap.allocate(100).unwrap();
    // Distinct blocks from the same freshly carved chunk cascade.
    assert_ne!(a.as_ptr(), b.as_ptr());
    heap.release(Some(a));
    heap.release(Some(b));
}
