//! Structured error type for the [`crate::traits::Allocator`] trait adapter.
//!
//! The raw, C-shaped surface (`Heap::allocate`/`release`/...) never produces
//! this type — it returns `Option<NonNull<u8>>`/nothing, matching a
//! C allocator's null-on-failure contract exactly. `AllocError` exists
//! purely so code written against the `Allocator` trait gets a `Result`
//! to match.

use core::alloc::Layout;
use core::fmt;

/// Coarse classification of why an allocation request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocErrorKind {
    /// The break or bulk primitive reported exhaustion.
    OutOfMemory,
    /// The requested alignment exceeds the 8-byte guarantee (§1 non-goal).
    InvalidAlignment,
    /// `layout.size()` or an `allocate_zeroed` count*size product overflowed.
    SizeOverflow,
}

impl AllocErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AllocErrorKind::OutOfMemory => "out of memory",
            AllocErrorKind::InvalidAlignment => "alignment exceeds the 8-byte guarantee",
            AllocErrorKind::SizeOverflow => "size computation overflowed",
        }
    }
}

impl fmt::Display for AllocErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An allocation failure, carrying the layout that was rejected.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("{kind}: requested size={requested_size} align={requested_align}")]
pub struct AllocError {
    pub kind: AllocErrorKind,
    pub requested_size: usize,
    pub requested_align: usize,
}

impl AllocError {
    pub fn new(kind: AllocErrorKind, layout: Layout) -> Self {
        Self {
            kind,
            requested_size: layout.size(),
            requested_align: layout.align(),
        }
    }

    pub fn out_of_memory(layout: Layout) -> Self {
        Self::new(AllocErrorKind::OutOfMemory, layout)
    }

    pub fn invalid_alignment(layout: Layout) -> Self {
        Self::new(AllocErrorKind::InvalidAlignment, layout)
    }

    pub fn size_overflow(layout: Layout) -> Self {
        Self::new(AllocErrorKind::SizeOverflow, layout)
    }
}

/// Result alias used by the [`crate::traits::Allocator`] trait.
pub type AllocResult<T> = Result<T, AllocError>;
