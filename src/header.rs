//! Header codec: the single machine word that precedes every block's payload.
//!
//! Bit 0 of the stored word is the allocated flag; the remaining bits are
//! the block's `total_size` (header included). Decoding clears only bit 0 —
//! not the full low 5 bits the original `block_index`-era C sources masked
//! off — because that wider mask is only safe for pool blocks (always a
//! multiple of 32). Bulk blocks are only guaranteed a multiple of 8, and the
//! release path needs their exact size back to hand to `bulk_release`.

use core::mem::size_of;
use core::ptr::NonNull;

/// Bytes between a block's start address and its payload.
pub const HEADER_SIZE: usize = size_of::<usize>();

const ALLOCATED_BIT: usize = 0x1;

/// A decoded block header: total size (header + payload) and allocation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header(usize);

impl Header {
    /// Encodes a header for a block of `total_size` bytes.
    ///
    /// `total_size` must be even; every size this crate ever stores is
    /// (pool sizes are multiples of 32, bulk sizes are multiples of 8).
    #[inline]
    pub fn encode(total_size: usize, allocated: bool) -> Self {
        debug_assert_eq!(total_size & ALLOCATED_BIT, 0, "total_size must be even");
        Header(total_size | (allocated as usize))
    }

    #[inline]
    pub fn from_raw(raw: usize) -> Self {
        Header(raw)
    }

    #[inline]
    pub fn raw(self) -> usize {
        self.0
    }

    /// The block's total size (header included), independent of pool/bulk origin.
    #[inline]
    pub fn total_size(self) -> usize {
        self.0 & !ALLOCATED_BIT
    }

    #[inline]
    pub fn is_free(self) -> bool {
        self.0 & ALLOCATED_BIT == 0
    }

    #[inline]
    pub fn is_allocated(self) -> bool {
        !self.is_free()
    }

    #[inline]
    pub fn set_allocated(&mut self) {
        self.0 |= ALLOCATED_BIT;
    }

    #[inline]
    pub fn set_free(&mut self) {
        self.0 &= !ALLOCATED_BIT;
    }
}

/// Reads the header word at `block`.
///
/// # Safety
/// `block` must point at a live, readable `HEADER_SIZE`-byte header.
#[inline]
pub(crate) unsafe fn read_header(block: NonNull<u8>) -> Header {
    Header::from_raw(unsafe { block.as_ptr().cast::<usize>().read() })
}

/// Writes `header` at `block`.
///
/// # Safety
/// `block` must point at a live, writable `HEADER_SIZE`-byte header.
#[inline]
pub(crate) unsafe fn write_header(block: NonNull<u8>, header: Header) {
    unsafe { block.as_ptr().cast::<usize>().write(header.raw()) };
}

/// The payload pointer for a block whose header starts at `block`.
///
/// # Safety
/// `block` must be a valid block start (header followed by `total_size -
/// HEADER_SIZE` payload bytes).
#[inline]
pub(crate) unsafe fn payload_of(block: NonNull<u8>) -> NonNull<u8> {
    unsafe { NonNull::new_unchecked(block.as_ptr().add(HEADER_SIZE)) }
}

/// The block start for a payload pointer previously returned by [`payload_of`].
///
/// # Safety
/// `payload` must have been produced by [`payload_of`] on a still-live block.
#[inline]
pub(crate) unsafe fn block_of(payload: NonNull<u8>) -> NonNull<u8> {
    unsafe { NonNull::new_unchecked(payload.as_ptr().sub(HEADER_SIZE)) }
}
