//! `CountingAlloc`: an allocator wrapper that records every acquisition and
//! release passing through it.

use crate::alloc::allocator::{AllocError, StorageAlloc};
use crate::alloc::Global;
use core::alloc::Layout;
use core::ptr::NonNull;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by a `CountingAlloc`.
#[derive(Debug, Default)]
struct AllocatorMetrics {
    allocated_bytes: AtomicUsize,
    allocated_count: AtomicUsize,
    deallocated_bytes: AtomicUsize,
    deallocated_count: AtomicUsize,
    failed_count: AtomicUsize,
}

impl AllocatorMetrics {
    #[inline(always)]
    fn on_alloc(&self, size: usize) {
        self.allocated_count.fetch_add(1, Ordering::Relaxed);
        self.allocated_bytes.fetch_add(size, Ordering::Relaxed);
    }

    #[inline(always)]
    fn on_dealloc(&self, size: usize) {
        self.deallocated_count.fetch_add(1, Ordering::Relaxed);
        self.deallocated_bytes.fetch_add(size, Ordering::Relaxed);
    }
}

/// A point-in-time copy of a `CountingAlloc`'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AllocStats {
    /// Successful `allocate` calls.
    pub allocations: usize,
    /// `deallocate` calls.
    pub deallocations: usize,
    /// Bytes handed out over the allocator's lifetime.
    pub allocated_bytes: usize,
    /// Bytes returned over the allocator's lifetime.
    pub deallocated_bytes: usize,
    /// `allocate` calls the inner allocator refused.
    pub failures: usize,
}

impl AllocStats {
    /// Blocks handed out and not yet returned.
    pub fn live_blocks(&self) -> usize {
        self.allocations - self.deallocations
    }

    /// Bytes handed out and not yet returned.
    pub fn live_bytes(&self) -> usize {
        self.allocated_bytes - self.deallocated_bytes
    }
}

/// Wraps another allocator and counts the traffic through it.
///
/// Borrow it into containers (`&CountingAlloc`) to observe their lifecycle
/// from the outside.
#[derive(Debug, Default)]
pub struct CountingAlloc<A = Global> {
    inner: A,
    metrics: AllocatorMetrics,
}

impl CountingAlloc<Global> {
    /// Counts traffic to the global allocator.
    pub fn new() -> Self {
        Self::wrap(Global)
    }
}

impl<A: StorageAlloc> CountingAlloc<A> {
    /// Counts traffic to `inner`.
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            metrics: AllocatorMetrics::default(),
        }
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> AllocStats {
        let m = &self.metrics;
        AllocStats {
            allocations: m.allocated_count.load(Ordering::Relaxed),
            deallocations: m.deallocated_count.load(Ordering::Relaxed),
            allocated_bytes: m.allocated_bytes.load(Ordering::Relaxed),
            deallocated_bytes: m.deallocated_bytes.load(Ordering::Relaxed),
            failures: m.failed_count.load(Ordering::Relaxed),
        }
    }

    /// The wrapped allocator.
    pub fn inner(&self) -> &A {
        &self.inner
    }
}

unsafe impl<A: StorageAlloc> StorageAlloc for CountingAlloc<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        match self.inner.allocate(layout) {
            Ok(ptr) => {
                self.metrics.on_alloc(layout.size());
                Ok(ptr)
            }
            Err(err) => {
                self.metrics.failed_count.fetch_add(1, Ordering::Relaxed);
                Err(err)
            }
        }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.metrics.on_dealloc(layout.size());
        self.inner.deallocate(ptr, layout);
    }
}
