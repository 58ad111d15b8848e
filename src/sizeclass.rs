//! Size-class bookkeeping: the eight pool buckets and the `class_of` mapping
//! from a requested (already 8-byte-rounded) payload size to its bucket index.

use crate::header::HEADER_SIZE;

/// Number of segregated free lists.
pub const NUM_SIZE_CLASSES: usize = 8;

/// Bytes obtained from a single call to the break primitive.
pub const CHUNK_SIZE: usize = 4096;

/// Nominal total size (header included) of the smallest size class.
pub const MIN_BLOCK: usize = 32;

/// Largest payload the pool range can serve.
pub const MAX_POOL_PAYLOAD: usize = CHUNK_SIZE - HEADER_SIZE;

const _: () = assert!(MIN_BLOCK << (NUM_SIZE_CLASSES - 1) == CHUNK_SIZE);

/// Nominal total size (header included) of size class `class`.
#[inline]
pub const fn class_total_size(class: usize) -> usize {
    MIN_BLOCK << class
}

/// The size class whose nominal total size is the smallest power of two
/// large enough to hold `HEADER_SIZE + payload`.
///
/// Mirrors the C source's `block_index(x) = 32 - clz(x + 7)` (bucket 5 is
/// total size 32, i.e. class 0), generalized to 64-bit width and clamped
/// into `[0, NUM_SIZE_CLASSES - 1]`.
#[inline]
pub fn class_of(payload: usize) -> usize {
    if payload <= 8 {
        return 0;
    }
    let x = (payload as u64) + 7;
    let ceil_log2 = (u64::BITS - x.leading_zeros()) as usize;
    ceil_log2.saturating_sub(5).min(NUM_SIZE_CLASSES - 1)
}
