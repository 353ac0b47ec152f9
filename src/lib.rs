//! # `fixed-storage` - Fixed-Capacity Allocator-Parameterized Containers
//!
//! Containers that own one contiguous block of storage for exactly `len`
//! elements, acquired once from an injected allocator and never resized.
//!
//! ## Lifecycle
//!
//! Two containers share one storage discipline and differ only in *when*
//! element lifetime begins:
//!
//! - [`FixedArray`] initializes every slot during construction. Its elements
//!   live until the array is dropped.
//! - [`UninitCollection`] only reserves storage. Calling
//!   [`construct`](UninitCollection::construct) consumes it and yields a
//!   [`FixedCollection`] whose slots are all live. Until then no accessor
//!   exists, so "use before construct" and "construct twice" are compile errors.
//!
//! Teardown undoes exactly what construction did: live elements are dropped
//! (in index order), then the block goes back to the same allocator instance.
//!
//! ## Layering
//!
//! 1. **Allocator** ([`StorageAlloc`]): acquire / release a `Layout`.
//!    [`Global`], [`System`](std::alloc::System), [`BumpAlloc`],
//!    [`CountingAlloc`], and borrowed `&A` all qualify.
//! 2. **Raw storage** ([`RawStorage`]): one block of `len` slots; never reads
//!    or drops elements.
//! 3. **Containers**: add the "every slot is live" invariant on top.
//!
//! ## Safety Surface
//!
//! - Checked access (`at`, `at_mut`) returns [`OutOfRange`] for `index >= len`.
//! - Unchecked access (`get_unchecked`, `get_unchecked_mut`) is `unsafe`.
//! - Allocation failures surface as [`StorageError`] from the `try_*`
//!   constructors, with the allocator's [`AllocError`] passed through intact.
//!
//! ## Example
//!
//! ```rust
//! use fixed_storage::{FixedArray, OutOfRange, UninitCollection};
//!
//! let mut array = FixedArray::new(3, 7);
//! assert_eq!(array.at(2), Ok(&7));
//! array.fill(9);
//! assert_eq!(array.at(1), Ok(&9));
//! assert_eq!(array.at(3), Err(OutOfRange { index: 3, len: 3 }));
//!
//! let collection = UninitCollection::new(2).construct(5);
//! assert_eq!(collection.iter().copied().collect::<Vec<_>>(), [5, 5]);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

// Emits a `tracing::trace!` event when the `tracing` feature is on; expands to
// nothing otherwise.
macro_rules! trace_storage {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::trace!(target: "fixed_storage", $($arg)*);
        }
    }};
}

pub mod alloc;
pub mod collections;
pub mod error;
pub mod storage;

pub use alloc::{AllocError, AllocStats, BumpAlloc, CountingAlloc, Global, StorageAlloc};
pub use collections::{FixedArray, FixedCollection, UninitCollection};
pub use error::{LengthMismatch, OutOfRange, StorageError};
pub use storage::{IntoIter, RawStorage};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // With a zero-sized allocator a container is exactly (ptr, len).
    assert!(mem::size_of::<Global>() == 0);
    assert!(mem::size_of::<RawStorage<u64>>() == mem::size_of::<usize>() * 2);
    assert!(mem::size_of::<FixedArray<u64>>() == mem::size_of::<RawStorage<u64>>());
    assert!(mem::size_of::<FixedCollection<u64>>() == mem::size_of::<RawStorage<u64>>());
    assert!(mem::size_of::<UninitCollection<u64>>() == mem::size_of::<RawStorage<u64>>());

    // A borrowed allocator costs one pointer.
    assert!(mem::size_of::<FixedArray<u64, &'static BumpAlloc>>() == mem::size_of::<usize>() * 3);
};
