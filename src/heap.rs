//! The request router: the public allocate/allocate_zeroed/resize/release
//! surface, plus the `Allocator` trait adapter that lets a [`Heap`] compose
//! with Layout-based ecosystem code.

use core::alloc::Layout;
use core::ptr::{self, NonNull};

use crate::bulk;
use crate::chunk;
use crate::config::HeapConfig;
use crate::error::{AllocError, AllocResult};
use crate::header::{self, Header, HEADER_SIZE};
use crate::pool::{self, Table, EMPTY_TABLE};
use crate::sizeclass::{class_of, CHUNK_SIZE};
use crate::stats::AllocatorStats;
use crate::traits;

/// A single-threaded, drop-in general-purpose heap allocator.
///
/// Small requests are served from a segregated free-list pool grown one
/// [`CHUNK_SIZE`] span at a time via the break primitive ([`chunk`]);
/// requests too large for the pool range are forwarded to an mmap-backed
/// bulk store ([`bulk`]).
///
/// `Heap` holds raw, unsynchronized pointers and is intentionally neither
/// `Send` nor `Sync` — thread safety is an explicit non-goal, not an
/// oversight.
pub struct Heap {
    /// Free-list head table, living inside the first chunk ever acquired
    /// from the break primitive. `None` until that bootstrap chunk exists.
    table: Option<NonNull<Table>>,
    config: HeapConfig,
    #[cfg(feature = "stats")]
    stats: AllocatorStats,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

// A raw, dangling `Option<NonNull<Table>>` and a config flag are the only
// fields; neither is `Sync`, so `Heap` picks up `!Sync`/`!Send` for free.
// Spelled out for readers who'd otherwise have to check.
#[cfg(doctest)]
struct _AssertNotSync;

impl Heap {
    /// Creates a heap with no chunks yet acquired and diagnostics disabled.
    pub const fn new() -> Self {
        Self {
            table: None,
            config: HeapConfig::new(),
            #[cfg(feature = "stats")]
            stats: AllocatorStats::new(),
        }
    }

    /// Creates a heap with the given configuration.
    pub const fn with_config(config: HeapConfig) -> Self {
        Self {
            table: None,
            config,
            #[cfg(feature = "stats")]
            stats: AllocatorStats::new(),
        }
    }

    /// A snapshot of lifetime allocation counters. Requires the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> AllocatorStats {
        self.stats
    }

    fn table_mut(&mut self) -> &mut Table {
        // SAFETY: only reachable after `ensure_table` has populated `table`
        // with a pointer into a live chunk that this `Heap` owns exclusively.
        unsafe { &mut *self.table.expect("free-list table not initialized").as_ptr() }
    }

    /// Lazily acquires the bootstrap chunk and zero-initializes the
    /// free-list table inside it, if that hasn't happened yet.
    fn ensure_table(&mut self) -> bool {
        if self.table.is_some() {
            return true;
        }
        let Some(base) = chunk::acquire_chunk() else {
            if self.config.diagnostics {
                tracing::debug!("ensure_table: bootstrap chunk acquisition failed");
            }
            return false;
        };
        let table_ptr = base.as_ptr().cast::<Table>();
        // SAFETY: `base` is a fresh CHUNK_SIZE-byte span (>= size_of::<Table>()),
        // exclusively owned by this Heap; EMPTY_TABLE is all-null-pointers, so
        // this is the same bit pattern the chunk's break-acquired memory would
        // give us by zero-fill, made explicit rather than assumed.
        unsafe { table_ptr.write(EMPTY_TABLE) };
        self.table = NonNull::new(table_ptr);
        if self.config.diagnostics {
            tracing::trace!("ensure_table: bootstrap chunk acquired");
        }
        true
    }

    /// Allocates `n` bytes. Returns `None` for `n == 0` or on exhaustion of
    /// the break/bulk primitive.
    pub fn allocate(&mut self, n: usize) -> Option<NonNull<u8>> {
        if n == 0 {
            return None;
        }
        if !self.ensure_table() {
            return None;
        }
        let r = crate::utils::round_up_to_8(n);
        let result = if r + HEADER_SIZE <= CHUNK_SIZE {
            pool::allocate(self.table_mut(), r)
        } else {
            self.allocate_bulk(r)
        };

        #[cfg(feature = "stats")]
        if let Some(ptr) = result {
            let total = unsafe { header::read_header(header::block_of(ptr)).total_size() };
            self.stats.record_alloc(total);
        }
        if self.config.diagnostics {
            tracing::debug!(requested = n, rounded = r, ok = result.is_some(), "allocate");
        }
        result
    }

    fn allocate_bulk(&mut self, r: usize) -> Option<NonNull<u8>> {
        let total = r + HEADER_SIZE;
        let base = bulk::bulk_allocate(total)?;
        unsafe {
            header::write_header(base, Header::encode(total, true));
            Some(header::payload_of(base))
        }
    }

    /// Allocates space for `count` elements of `size` bytes each, zeroed.
    /// Returns `None` if `count * size` overflows `usize` or the underlying
    /// allocation fails.
    pub fn allocate_zeroed(&mut self, count: usize, size: usize) -> Option<NonNull<u8>> {
        let bytes = count.checked_mul(size)?;
        let ptr = self.allocate(bytes)?;
        let rounded = crate::utils::round_up_to_8(bytes);
        unsafe { ptr::write_bytes(ptr.as_ptr(), 0, rounded) };
        Some(ptr)
    }

    /// Resizes the block at `ptr` to `n` usable bytes, preserving its
    /// contents up to `min(old, new)` bytes. `ptr = None` behaves as
    /// `allocate(n)`; `n == 0` behaves as `release(ptr)` followed by `None`.
    pub fn resize(&mut self, ptr: Option<NonNull<u8>>, n: usize) -> Option<NonNull<u8>> {
        let Some(p) = ptr else {
            return self.allocate(n);
        };
        let r = crate::utils::round_up_to_8(n);
        if r == 0 {
            self.release(Some(p));
            return None;
        }

        let block = unsafe { header::block_of(p) };
        let h = unsafe { header::read_header(block) };
        let s = h.total_size();
        let u = s - HEADER_SIZE;

        if r == u {
            return Some(p);
        }
        if s <= CHUNK_SIZE && class_of(r) == class_of(u) {
            return Some(p);
        }

        if s <= CHUNK_SIZE {
            self.resize_pool_source(p, block, u, r)
        } else {
            self.resize_bulk_source(p, u, r)
        }
    }

    /// Pool-sourced slow path: the block being resized may be reissued by
    /// the very `allocate` call below, so its contents must be staged off
    /// to the side before `release` runs.
    fn resize_pool_source(
        &mut self,
        p: NonNull<u8>,
        block: NonNull<u8>,
        old_usable: usize,
        new_requested: usize,
    ) -> Option<NonNull<u8>> {
        let copy_len = old_usable.min(CHUNK_SIZE);
        let mut staging = [0u8; CHUNK_SIZE];
        unsafe { ptr::copy_nonoverlapping(p.as_ptr(), staging.as_mut_ptr(), copy_len) };
        let _ = block;
        self.release(Some(p));

        let new_ptr = self.allocate(new_requested)?;
        let new_usable = self.usable_size(new_ptr);
        let restore_len = copy_len.min(new_usable);
        unsafe { ptr::copy_nonoverlapping(staging.as_ptr(), new_ptr.as_ptr(), restore_len) };
        Some(new_ptr)
    }

    /// Bulk-sourced slow path: the old block cannot be recycled into the
    /// new allocation, so it is safe to copy directly before releasing it.
    fn resize_bulk_source(
        &mut self,
        p: NonNull<u8>,
        old_usable: usize,
        new_requested: usize,
    ) -> Option<NonNull<u8>> {
        let new_ptr = self.allocate(new_requested)?;
        let new_usable = self.usable_size(new_ptr);
        let copy_len = old_usable.min(new_usable);
        unsafe { ptr::copy_nonoverlapping(p.as_ptr(), new_ptr.as_ptr(), copy_len) };
        self.release(Some(p));
        Some(new_ptr)
    }

    fn usable_size(&self, payload: NonNull<u8>) -> usize {
        let block = unsafe { header::block_of(payload) };
        unsafe { header::read_header(block).total_size() - HEADER_SIZE }
    }

    /// Releases a block previously returned by `allocate`/`allocate_zeroed`/
    /// `resize`. `ptr = None` and double-release are both silent no-ops.
    pub fn release(&mut self, ptr: Option<NonNull<u8>>) {
        let Some(p) = ptr else {
            return;
        };
        let block = unsafe { header::block_of(p) };
        let mut h = unsafe { header::read_header(block) };
        if h.is_free() {
            if self.config.diagnostics {
                tracing::debug!("release: double-release detected, ignoring");
            }
            return;
        }
        h.set_free();
        unsafe { header::write_header(block, h) };
        let total = h.total_size();

        #[cfg(feature = "stats")]
        self.stats.record_dealloc(total);

        if total <= CHUNK_SIZE {
            pool::reclaim(self.table_mut(), block, total);
        } else {
            unsafe { bulk::bulk_release(block, total) };
        }
        if self.config.diagnostics {
            tracing::trace!(total_size = total, "release");
        }
    }
}

unsafe impl traits::Allocator for Heap {
    unsafe fn allocate(&mut self, layout: Layout) -> AllocResult<NonNull<[u8]>> {
        traits::validate_layout(layout)?;
        let ptr = Heap::allocate(self, layout.size()).ok_or_else(|| AllocError::out_of_memory(layout))?;
        Ok(NonNull::slice_from_raw_parts(ptr, layout.size()))
    }

    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, _layout: Layout) {
        Heap::release(self, Some(ptr));
    }

    unsafe fn grow(
        &mut self,
        ptr: NonNull<u8>,
        _old_layout: Layout,
        new_layout: Layout,
    ) -> AllocResult<NonNull<[u8]>> {
        traits::validate_layout(new_layout)?;
        let new_ptr = Heap::resize(self, Some(ptr), new_layout.size())
            .ok_or_else(|| AllocError::out_of_memory(new_layout))?;
        Ok(NonNull::slice_from_raw_parts(new_ptr, new_layout.size()))
    }

    unsafe fn shrink(
        &mut self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_layout: Layout,
    ) -> AllocResult<NonNull<[u8]>> {
        unsafe { traits::Allocator::grow(self, ptr, old_layout, new_layout) }
    }
}
