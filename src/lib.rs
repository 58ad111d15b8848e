//! `stratalloc` is a single-threaded, general-purpose heap allocator.
//!
//! Small requests are served from eight segregated free lists (32 bytes up
//! to 4096 bytes, doubling per class), grown a chunk at a time from the
//! process break (`sbrk`). Requests that don't fit in a chunk are served
//! directly from anonymous `mmap`, bypassing the pool entirely. A single
//! header word precedes every block, encoding its total size and allocation
//! state, which is enough for [`Heap::release`] to tell a pool block from a
//! bulk one without any side table.
//!
//! Thread safety, coalescing of adjacent free blocks, returning memory to
//! the OS, and alignment beyond 8 bytes are explicit non-goals — see the
//! module docs on [`Heap`] for what that means in practice.
//!
//! ```
//! use stratalloc::Heap;
//!
//! let mut heap = Heap::new();
//! let block = heap.allocate(128).expect("allocation should succeed");
//! unsafe { block.as_ptr().write(0x42) };
//! heap.release(Some(block));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod bulk;
mod chunk;
mod config;
mod error;
mod header;
mod heap;
mod pool;
mod sizeclass;
mod stats;
mod traits;
mod utils;

pub use config::HeapConfig;
pub use error::{AllocError, AllocErrorKind, AllocResult};
pub use heap::Heap;
pub use sizeclass::{CHUNK_SIZE, NUM_SIZE_CLASSES};
#[cfg(feature = "stats")]
pub use stats::AllocatorStats;
pub use traits::Allocator;
