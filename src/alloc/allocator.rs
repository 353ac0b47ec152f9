//! The allocator contract shared by every container.

use core::alloc::Layout;
use core::ptr::NonNull;
use thiserror::Error;

/// A strategy for acquiring and releasing raw storage regions.
///
/// This trait is similar to `std::alloc::Allocator`, trimmed to the two
/// operations a fixed-capacity container needs: one acquisition at
/// construction and one release at destruction. Containers never resize, so
/// there is no `grow`/`shrink`.
///
/// Containers never pass a zero-sized layout to an allocator; zero-length
/// storage is represented by a dangling pointer instead.
///
/// # Safety
///
/// Implementors must uphold:
/// - A successful `allocate` returns a pointer to a block of at least
///   `layout.size()` bytes aligned to `layout.align()`, valid for reads and
///   writes until it is passed to `deallocate` (or the allocator itself is
///   dropped, whichever comes first).
/// - Blocks handed out are disjoint from every other live block.
/// - Moving the allocator does not invalidate blocks it handed out.
pub unsafe trait StorageAlloc {
    /// Allocates memory according to the given layout.
    ///
    /// # Errors
    /// Returns `AllocError` if the allocator cannot satisfy the request.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Deallocates memory.
    ///
    /// # Safety
    /// `ptr` must denote a block of memory currently allocated by this allocator.
    /// `layout` must be the same layout that was used to allocate that block of memory.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

// Borrowed allocators let several containers share one arena while the
// borrow checker keeps the arena alive.
unsafe impl<A: StorageAlloc + ?Sized> StorageAlloc for &A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout);
    }
}

/// The error type for allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("memory allocation failed")]
pub struct AllocError;
