//! Allocators backed by a process-wide `GlobalAlloc`.
//!
//! `Global` routes through whatever `#[global_allocator]` the binary installed,
//! the same path `Vec` and `Box` take. `System` and, behind the `alloc-*`
//! features, mimalloc / jemalloc / snmalloc can be injected directly so one
//! container can use a different strategy than the rest of the process.

use crate::alloc::allocator::{AllocError, StorageAlloc};
use core::alloc::{GlobalAlloc, Layout};
use core::ptr::NonNull;
use std::alloc::System;

/// The process global allocator.
///
/// This is the default allocator parameter for every container in the crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

unsafe impl StorageAlloc for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "zero-sized layouts are never requested");
        // SAFETY: containers never request zero-sized layouts.
        NonNull::new(unsafe { std::alloc::alloc(layout) }).ok_or(AllocError)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout);
    }
}

// Any `GlobalAlloc` can act as a storage allocator directly.
macro_rules! global_backed {
    ($($ty:ty),* $(,)?) => {
        $(
            unsafe impl StorageAlloc for $ty {
                #[inline]
                fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
                    debug_assert!(layout.size() != 0, "zero-sized layouts are never requested");
                    // SAFETY: containers never request zero-sized layouts.
                    NonNull::new(unsafe { GlobalAlloc::alloc(self, layout) }).ok_or(AllocError)
                }

                #[inline]
                unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
                    GlobalAlloc::dealloc(self, ptr.as_ptr(), layout);
                }
            }
        )*
    };
}

global_backed!(System);

#[cfg(feature = "alloc-mimalloc")]
global_backed!(mimalloc::MiMalloc);

#[cfg(feature = "alloc-jemalloc")]
global_backed!(jemallocator::Jemalloc);

#[cfg(feature = "alloc-snmalloc")]
global_backed!(snmalloc_rs::SnMalloc);
