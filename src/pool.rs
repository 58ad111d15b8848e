//! Pool manager: the segregated free-list table, the first-fit-by-class
//! allocation policy, and the power-of-two split cascade that carves a
//! freshly acquired chunk.
//!
//! Free blocks store their prev/next links inside their own payload; a
//! block is only ever on the free list while its header's allocated bit is
//! clear, so nothing else reads those bytes as live data.

use core::ptr::{self, NonNull};

use crate::chunk;
use crate::header::{self, Header, HEADER_SIZE};
use crate::sizeclass::{class_of, class_total_size, CHUNK_SIZE, NUM_SIZE_CLASSES};

/// The free-list head table: one raw, nullable pointer per size class.
///
/// A zero-filled `Table` is a valid, all-empty table — this is relied on
/// when the table is bootstrapped directly into freshly acquired chunk
/// memory (see [`crate::heap::Heap::ensure_table`]).
pub(crate) type Table = [*mut u8; NUM_SIZE_CLASSES];

pub(crate) const EMPTY_TABLE: Table = [ptr::null_mut(); NUM_SIZE_CLASSES];

/// Prev/next links a free pool block stores at the start of its own payload.
#[repr(C)]
struct FreeLinks {
    prev: *mut u8,
    next: *mut u8,
}

const _: () = assert!(crate::sizeclass::MIN_BLOCK >= HEADER_SIZE + 2 * core::mem::size_of::<usize>());

#[inline]
unsafe fn links_ptr(block: NonNull<u8>) -> *mut FreeLinks {
    unsafe { block.as_ptr().add(HEADER_SIZE).cast::<FreeLinks>() }
}

/// Pushes `block` onto the head of `class`'s free list.
///
/// # Safety
/// `block` must be a block-start pointer of exactly `class_total_size(class)`
/// bytes, not currently linked on any list.
unsafe fn push_free(table: &mut Table, class: usize, block: NonNull<u8>) {
    let old_head = table[class];
    unsafe {
        (*links_ptr(block)).prev = ptr::null_mut();
        (*links_ptr(block)).next = old_head;
    }
    if let Some(old) = NonNull::new(old_head) {
        unsafe { (*links_ptr(old)).prev = block.as_ptr() };
    }
    table[class] = block.as_ptr();
}

/// Pops the head of `class`'s free list, if non-empty.
unsafe fn pop_free(table: &mut Table, class: usize) -> Option<NonNull<u8>> {
    let head = NonNull::new(table[class])?;
    let next = unsafe { (*links_ptr(head)).next };
    if let Some(n) = NonNull::new(next) {
        unsafe { (*links_ptr(n)).prev = ptr::null_mut() };
    }
    table[class] = next;
    Some(head)
}

/// Carves a freshly acquired chunk into the canonical descending cascade of
/// free blocks, after `alloc_size` bytes at its base have been reserved for
/// the caller (and already header-stamped by [`allocate`]).
unsafe fn split_cascade(table: &mut Table, chunk_base: NonNull<u8>, alloc_size: usize) {
    let mut offset = alloc_size;
    let mut remaining = CHUNK_SIZE - alloc_size;
    for class in (0..NUM_SIZE_CLASSES).rev() {
        let size = class_total_size(class);
        while remaining >= size {
            // SAFETY: offset + size <= CHUNK_SIZE, so this stays within the
            // chunk acquired from the break primitive.
            let block = unsafe { NonNull::new_unchecked(chunk_base.as_ptr().add(offset)) };
            unsafe {
                header::write_header(block, Header::encode(size, false));
                push_free(table, class, block);
            }
            offset += size;
            remaining -= size;
        }
    }
}

/// Serves a pool allocation of `rounded_size` payload bytes (already
/// checked by the caller to satisfy `HEADER_SIZE + rounded_size <=
/// CHUNK_SIZE`). Returns the payload pointer, or `None` if a fresh chunk was
/// needed and the break primitive was exhausted.
pub(crate) fn allocate(table: &mut Table, rounded_size: usize) -> Option<NonNull<u8>> {
    let start_class = class_of(rounded_size);

    for class in start_class..NUM_SIZE_CLASSES {
        if let Some(block) = unsafe { pop_free(table, class) } {
            let mut h = unsafe { header::read_header(block) };
            h.set_allocated();
            unsafe { header::write_header(block, h) };
            return Some(unsafe { header::payload_of(block) });
        }
    }

    let chunk_base = chunk::acquire_chunk()?;
    let alloc_size = class_total_size(start_class);
    unsafe {
        header::write_header(chunk_base, Header::encode(alloc_size, true));
        split_cascade(table, chunk_base, alloc_size);
        Some(header::payload_of(chunk_base))
    }
}

/// Returns a freed pool block of `total_size` bytes (header included) to
/// its size class. The caller must already have cleared the allocated bit.
pub(crate) fn reclaim(table: &mut Table, block: NonNull<u8>, total_size: usize) {
    let class = class_of(total_size - HEADER_SIZE);
    unsafe { push_free(table, class, block) };
}

/// Counts the free blocks on `class`'s list, for tests and diagnostics.
#[cfg(test)]
pub(crate) fn free_count(table: &Table, class: usize) -> usize {
    let mut count = 0;
    let mut cur = table[class];
    while let Some(block) = NonNull::new(cur) {
        count += 1;
        cur = unsafe { (*links_ptr(block)).next };
    }
    count
}
