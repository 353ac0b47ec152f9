//! `UninitCollection` / `FixedCollection`: fixed-length storage whose
//! elements come to life in a separate step.
//!
//! The two types are the two states of one container:
//!
//! ```text
//! UninitCollection<T, A>  --construct(..)-->  FixedCollection<T, A>
//!   storage allocated                           storage allocated
//!   no live elements                            every slot live
//!   no element access                           full element access
//!   drop: release                               drop: drop elements, release
//! ```
//!
//! `construct*` consumes the uninitialized state, so reading a slot before
//! construction, or constructing twice over live values, does not compile.
//! Once constructed, `FixedCollection` has the same access surface as
//! `FixedArray`, including panicking `front` / `back` on an empty collection.

use crate::alloc::{Global, StorageAlloc};
use crate::error::StorageError;
use crate::storage::slots::Slots;
use crate::storage::RawStorage;

/// Allocated storage for `len` elements, none of which exist yet.
pub struct UninitCollection<T, A: StorageAlloc = Global> {
    raw: RawStorage<T, A>,
}

impl<T> UninitCollection<T, Global> {
    /// Reserves storage for `len` elements from the global allocator.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if the allocator fails.
    pub fn new(len: usize) -> Self {
        Self::new_in(len, Global)
    }
}

impl<T, A: StorageAlloc> UninitCollection<T, A> {
    /// Reserves storage for `len` elements from `alloc`.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if the allocator fails.
    pub fn new_in(len: usize, alloc: A) -> Self {
        Self {
            raw: RawStorage::new_in(len, alloc),
        }
    }

    /// Fallible form of [`new_in`](Self::new_in).
    ///
    /// # Errors
    /// Returns `StorageError` if the storage cannot be acquired.
    pub fn try_new_in(len: usize, alloc: A) -> Result<Self, StorageError> {
        Ok(Self {
            raw: RawStorage::try_new_in(len, alloc)?,
        })
    }

    /// Number of slots reserved.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if no slots were reserved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The allocator backing this collection.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.raw.allocator()
    }

    /// Pointer to the first (uninitialized) slot, for use with
    /// [`assume_init`](Self::assume_init).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_mut_ptr()
    }

    /// Brings every slot to life with a clone of `value`.
    pub fn construct(self, value: T) -> FixedCollection<T, A>
    where
        T: Clone,
    {
        FixedCollection {
            slots: Slots::filled(self.raw, value),
        }
    }

    /// Brings every slot to life with the result of calling `make`.
    ///
    /// `make` is called once per slot, in index order.
    pub fn construct_with<F>(self, mut make: F) -> FixedCollection<T, A>
    where
        F: FnMut() -> T,
    {
        self.construct_from_fn(|_| make())
    }

    /// Brings slot `i` to life with `f(i)`.
    ///
    /// If `f` panics, the elements built so far are dropped and the storage
    /// is released.
    pub fn construct_from_fn<F>(self, f: F) -> FixedCollection<T, A>
    where
        F: FnMut(usize) -> T,
    {
        FixedCollection {
            slots: Slots::from_fn(self.raw, f),
        }
    }

    /// Declares the slots initialized after writing them through
    /// [`as_mut_ptr`](Self::as_mut_ptr).
    ///
    /// # Safety
    /// Every one of the `len()` slots must hold a valid `T`.
    pub unsafe fn assume_init(self) -> FixedCollection<T, A> {
        FixedCollection {
            slots: Slots::assume_init(self.raw),
        }
    }

    /// Moves the reserved storage out, leaving `self` with zero slots.
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        Self {
            raw: self.raw.take(),
        }
    }
}

impl<T, A: StorageAlloc> core::fmt::Debug for UninitCollection<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UninitCollection")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// A fixed-length collection whose elements were built by `construct`.
pub struct FixedCollection<T, A: StorageAlloc = Global> {
    slots: Slots<T, A>,
}

fixed_slots_surface!(FixedCollection, "collection");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::CountingAlloc;
    use crate::collections::FixedArray;
    use crate::error::OutOfRange;

    #[test]
    fn test_construct_then_iterate() {
        let collection = UninitCollection::new(2).construct(5);
        let seen: Vec<i32> = collection.iter().copied().collect();
        assert_eq!(seen, vec![5, 5]);
    }

    #[test]
    fn test_construct_with_calls_once_per_slot() {
        let mut calls = 0;
        let collection = UninitCollection::new(4).construct_with(|| {
            calls += 1;
            String::from("slot")
        });
        assert_eq!(calls, 4);
        assert_eq!(collection.len(), 4);
        assert_eq!(collection.back(), "slot");
    }

    #[test]
    fn test_uninit_drop_only_releases() {
        let counting = CountingAlloc::new();
        {
            // String has a destructor; dropping uninitialized slots must not run it.
            let pending: UninitCollection<String, _> = UninitCollection::new_in(3, &counting);
            assert_eq!(pending.len(), 3);
        }
        let stats = counting.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.deallocations, 1);
    }

    #[test]
    fn test_assume_init_after_manual_writes() {
        let mut pending = UninitCollection::<u16>::new(3);
        let base = pending.as_mut_ptr();
        let collection = unsafe {
            for i in 0..3 {
                base.add(i).write(i as u16 + 1);
            }
            pending.assume_init()
        };
        assert_eq!(collection.as_slice(), &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "FixedCollection::back called on an empty collection")]
    fn test_back_on_empty_panics() {
        let collection: FixedCollection<u8> = FixedCollection::default();
        collection.back();
    }

    #[test]
    fn test_matches_eager_array() {
        let lazy = UninitCollection::new(3).construct(7);
        let eager = FixedArray::new(3, 7);
        assert!(lazy == eager);
        assert!(eager == lazy);
        assert_eq!(lazy.at(3), Err(OutOfRange { index: 3, len: 3 }));
    }
}
