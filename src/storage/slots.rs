//! `Slots`: raw storage with every slot live.

use crate::alloc::StorageAlloc;
use crate::storage::iter::IntoIter;
use crate::storage::raw::RawStorage;
use core::mem::ManuallyDrop;
use core::ptr;

/// A `RawStorage` whose every slot holds a live `T`.
///
/// Dropping it drops all elements in index order, then the inner
/// `RawStorage` releases the block.
pub(crate) struct Slots<T, A: StorageAlloc> {
    raw: RawStorage<T, A>,
}

/// Drops the initialized prefix if element construction unwinds.
struct PartialInit<T> {
    base: *mut T,
    done: usize,
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        // SAFETY: slots `0..done` were written and not yet handed to `Slots`.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.done)) };
    }
}

impl<T, A: StorageAlloc> Slots<T, A> {
    /// Adopts storage whose slots are already live.
    ///
    /// # Safety
    /// Every slot of `raw` must hold a live `T`.
    #[inline]
    pub(crate) unsafe fn assume_init(raw: RawStorage<T, A>) -> Self {
        Self { raw }
    }

    /// Writes `f(i)` into slot `i` for every slot.
    ///
    /// If `f` panics, the values already written are dropped and the storage
    /// is released before the panic propagates.
    pub(crate) fn from_fn<F>(mut raw: RawStorage<T, A>, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let len = raw.len();
        let mut guard = PartialInit {
            base: raw.as_mut_ptr(),
            done: 0,
        };
        while guard.done < len {
            let value = f(guard.done);
            // SAFETY: `done < len`, so the slot is in bounds and still uninitialized.
            unsafe { guard.base.add(guard.done).write(value) };
            guard.done += 1;
        }
        core::mem::forget(guard);

        // SAFETY: the loop wrote every slot.
        unsafe { Self::assume_init(raw) }
    }

    /// Clones `value` into every slot but the last, which receives `value` itself.
    pub(crate) fn filled(raw: RawStorage<T, A>, value: T) -> Self
    where
        T: Clone,
    {
        let last = raw.len().saturating_sub(1);
        let mut pending = Some(value);
        Self::from_fn(raw, move |i| match pending.take() {
            Some(seed) if i < last => {
                let copy = seed.clone();
                pending = Some(seed);
                copy
            }
            Some(seed) => seed,
            None => unreachable!("slot {i} requested after the last slot"),
        })
    }

    /// Zero-length slots holding `alloc`.
    pub(crate) fn empty(alloc: A) -> Self {
        // SAFETY: there are no slots to initialize.
        unsafe { Self::assume_init(RawStorage::empty(alloc)) }
    }

    #[inline]
    pub(crate) fn raw(&self) -> &RawStorage<T, A> {
        &self.raw
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        // SAFETY: every slot is live for the lifetime of `Slots`.
        unsafe { self.raw.as_slice() }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: every slot is live for the lifetime of `Slots`.
        unsafe { self.raw.as_mut_slice() }
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_mut_ptr()
    }

    pub(crate) fn take(&mut self) -> Self
    where
        A: Clone,
    {
        // SAFETY: the moved-out block keeps its live elements; the source is
        // left with zero slots.
        unsafe { Self::assume_init(self.raw.take()) }
    }

    pub(crate) fn into_iter(self) -> IntoIter<T, A> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so ownership of `raw` and its live
        // elements moves into the iterator exactly once.
        let raw = unsafe { ptr::read(&this.raw) };
        IntoIter::new(raw)
    }
}

impl<T, A: StorageAlloc> Drop for Slots<T, A> {
    fn drop(&mut self) {
        // SAFETY: every slot is live; `raw` releases the block right after.
        unsafe { self.raw.drop_elements() };
    }
}
