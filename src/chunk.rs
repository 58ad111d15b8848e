//! Chunk acquisition: growing the process heap one [`CHUNK_SIZE`] span at a
//! time via the POSIX `sbrk` break-pointer primitive.
//!
//! `sbrk` is deprecated POSIX API on most modern systems but remains the
//! textbook break-pointer primitive this allocator is specified against; we
//! call it directly rather than pulling in a half-supported wrapper crate.

use core::ptr::NonNull;

use crate::sizeclass::CHUNK_SIZE;

#[cfg(unix)]
mod ffi {
    use core::ffi::c_void;

    extern "C" {
        pub fn sbrk(increment: isize) -> *mut c_void;
    }
}

/// Extends the process break by exactly one [`CHUNK_SIZE`] span and returns
/// its base address, or `None` on the `(void*)-1` failure sentinel.
#[cfg(unix)]
pub fn acquire_chunk() -> Option<NonNull<u8>> {
    // SAFETY: sbrk is async-signal-unsafe but single-threaded-reentrant;
    // this crate's single-threaded contract is exactly what makes the call
    // sound here.
    let base = unsafe { ffi::sbrk(CHUNK_SIZE as isize) };
    if base as isize == -1 || base.is_null() {
        tracing::trace!("sbrk exhausted");
        return None;
    }
    NonNull::new(base as *mut u8)
}

#[cfg(not(unix))]
pub fn acquire_chunk() -> Option<NonNull<u8>> {
    compile_error!("stratalloc's chunk provider requires sbrk, which is POSIX-only");
}
