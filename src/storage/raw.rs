//! `RawStorage`: one allocator-backed block sized for exactly `len` values.
//!
//! This is the bottom of the lifecycle stack:
//! - construction acquires the block from the injected allocator (once);
//! - drop returns it to the same allocator instance (once);
//! - nothing in between ever touches the slots' contents.
//!
//! Whether the slots hold live values is tracked by the types layered on top
//! (`Slots`, `UninitCollection`), not here. Every accessor that reads slots is
//! therefore `unsafe`.

use crate::alloc::{Global, StorageAlloc};
use crate::error::StorageError;
use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;
use std::alloc::handle_alloc_error;

/// An owned, fixed-size, possibly uninitialized block of `T` slots.
pub struct RawStorage<T, A: StorageAlloc = Global> {
    ptr: NonNull<T>,
    len: usize,
    alloc: A,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send, A: StorageAlloc + Send> Send for RawStorage<T, A> {}
unsafe impl<T: Sync, A: StorageAlloc + Sync> Sync for RawStorage<T, A> {}

impl<T> RawStorage<T, Global> {
    /// Allocates uninitialized storage for `len` values from the global allocator.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts via `handle_alloc_error` if the
    /// allocator fails.
    pub fn new(len: usize) -> Self {
        Self::new_in(len, Global)
    }
}

impl<T, A: StorageAlloc> RawStorage<T, A> {
    /// Allocates uninitialized storage for `len` values from `alloc`.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts via `handle_alloc_error` if the
    /// allocator fails.
    pub fn new_in(len: usize, alloc: A) -> Self {
        match Self::try_new_in(len, alloc) {
            Ok(raw) => raw,
            Err(StorageError::CapacityOverflow) => capacity_overflow(),
            Err(StorageError::Alloc(_)) => match Layout::array::<T>(len) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => capacity_overflow(),
            },
        }
    }

    /// Allocates uninitialized storage for `len` values from `alloc`.
    ///
    /// Zero-byte requests (`len == 0` or zero-sized `T`) do not reach the
    /// allocator.
    ///
    /// # Errors
    /// `CapacityOverflow` if the byte size does not fit in an `isize`;
    /// `Alloc` carrying the allocator's own error if it refuses.
    pub fn try_new_in(len: usize, alloc: A) -> Result<Self, StorageError> {
        let layout = Layout::array::<T>(len).map_err(|_| StorageError::CapacityOverflow)?;

        let ptr = if layout.size() == 0 {
            NonNull::dangling()
        } else {
            let block = alloc.allocate(layout)?;
            trace_storage!(len, bytes = layout.size(), align = layout.align(), "storage acquired");
            block.cast::<T>()
        };

        Ok(Self {
            ptr,
            len,
            alloc,
            _marker: PhantomData,
        })
    }

    /// Zero-length storage holding `alloc`. Never allocates.
    pub fn empty(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The allocator the block came from.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Pointer to the first slot. Dangling (but aligned) when no bytes were allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Views the slots as initialized values.
    ///
    /// # Safety
    /// Every slot must hold a live `T`.
    #[inline]
    pub unsafe fn as_slice(&self) -> &[T] {
        slice::from_raw_parts(self.ptr.as_ptr(), self.len)
    }

    /// Views the slots as initialized, mutable values.
    ///
    /// # Safety
    /// Every slot must hold a live `T`.
    #[inline]
    pub unsafe fn as_mut_slice(&mut self) -> &mut [T] {
        slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len)
    }

    /// Runs the destructor of every slot in index order. Storage stays allocated.
    ///
    /// # Safety
    /// Every slot must hold a live `T`, and the slots must be treated as
    /// uninitialized afterwards.
    #[inline]
    pub unsafe fn drop_elements(&mut self) {
        ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len));
    }

    /// Moves the block out, leaving `self` empty with a clone of the allocator.
    ///
    /// No slot is read, copied, or dropped.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        mem::replace(self, Self::empty(self.alloc.clone()))
    }

    fn layout(&self) -> Layout {
        // SAFETY: the same layout was validated by `Layout::array` at construction.
        unsafe { Layout::from_size_align_unchecked(mem::size_of::<T>() * self.len, mem::align_of::<T>()) }
    }
}

impl<T, A: StorageAlloc> Drop for RawStorage<T, A> {
    fn drop(&mut self) {
        let layout = self.layout();
        if layout.size() != 0 {
            trace_storage!(len = self.len, bytes = layout.size(), "storage released");
            // SAFETY: the block was allocated by `self.alloc` with this layout.
            unsafe { self.alloc.deallocate(self.ptr.cast::<u8>(), layout) };
        }
    }
}

impl<T, A: StorageAlloc> core::fmt::Debug for RawStorage<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
