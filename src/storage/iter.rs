//! `IntoIter`: the consuming iterator shared by the fixed containers.

use crate::alloc::{Global, StorageAlloc};
use crate::storage::raw::RawStorage;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

/// A consuming iterator over a fixed container's elements.
///
/// Elements not yielded are dropped with the iterator, after which the
/// storage goes back to its allocator.
pub struct IntoIter<T, A: StorageAlloc = Global> {
    raw: RawStorage<T, A>,
    start: usize,
    end: usize,
}

impl<T, A: StorageAlloc> IntoIter<T, A> {
    /// Takes over storage whose every slot is live.
    pub(crate) fn new(raw: RawStorage<T, A>) -> Self {
        let end = raw.len();
        Self { raw, start: 0, end }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots `start..end` are live and owned by the iterator.
        unsafe { slice::from_raw_parts(self.raw.as_ptr().add(self.start), self.end - self.start) }
    }

    /// The allocator the storage came from.
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }
}

impl<T, A: StorageAlloc> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slot `start` is live; advancing `start` hands ownership out.
        let value = unsafe { self.raw.as_ptr().add(self.start).read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: StorageAlloc> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` is live; shrinking `end` hands ownership out.
        Some(unsafe { self.raw.as_ptr().add(self.end).read() })
    }
}

impl<T, A: StorageAlloc> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: StorageAlloc> FusedIterator for IntoIter<T, A> {}

impl<T, A: StorageAlloc> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // SAFETY: slots `start..end` are still live; `raw` then releases the block.
        unsafe {
            let base = self.raw.as_mut_ptr().add(self.start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, remaining));
        }
    }
}

impl<T: core::fmt::Debug, A: StorageAlloc> core::fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
