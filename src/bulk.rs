//! Bulk backing store for oversize (non-pool) allocations.
//!
//! Requests larger than a chunk bypass the segregated free lists entirely
//! and go straight to the kernel via anonymous `mmap`/`munmap`, standing in
//! for the `bulk_alloc`/`bulk_free` pair the specification treats as an
//! opaque external collaborator.

use core::ffi::c_void;
use core::ptr::NonNull;

/// Reserves a contiguous, zero-initialized region of at least `len` bytes.
pub fn bulk_allocate(len: usize) -> Option<NonNull<u8>> {
    // SAFETY: a fixed, valid set of mmap flags requesting a fresh
    // anonymous private mapping; the kernel validates `len`.
    let ptr = unsafe {
        libc::mmap(
            core::ptr::null_mut(),
            len,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        )
    };
    if ptr == libc::MAP_FAILED {
        tracing::trace!(len, "bulk_allocate: mmap failed");
        return None;
    }
    NonNull::new(ptr as *mut u8)
}

/// Releases a region previously returned by [`bulk_allocate`]. `len` must
/// equal the value originally requested.
///
/// # Safety
/// `ptr` must have been returned by `bulk_allocate(len)` and not already
/// released.
pub unsafe fn bulk_release(ptr: NonNull<u8>, len: usize) {
    let rc = unsafe { libc::munmap(ptr.as_ptr() as *mut c_void, len) };
    debug_assert_eq!(rc, 0, "munmap failed for a bulk_allocate-owned region");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_round_trip() {
        let len = 1 << 20;
        let ptr = bulk_allocate(len).expect("mmap should succeed for 1 MiB");
        unsafe {
            core::ptr::write_bytes(ptr.as_ptr(), 0xAB, len);
            assert_eq!(*ptr.as_ptr(), 0xAB);
            bulk_release(ptr, len);
        }
    }
}
