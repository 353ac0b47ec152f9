//! `FixedArray`: a fixed-length array whose elements live from construction
//! to destruction.
//!
//! Every constructor allocates exactly once and initializes every slot before
//! returning. The length never changes afterwards; there is no push, pop, or
//! reallocation. Dropping the array drops every element and then hands the
//! block back to the same allocator instance it came from.
//!
//! Access comes in two flavours:
//! - checked: `at` / `at_mut` return `Err(OutOfRange)` for `index >= len`;
//! - unchecked: `get_unchecked` / `get_unchecked_mut` are `unsafe` and skip
//!   the bounds test entirely.
//!
//! `front` / `back` are safe functions and therefore cannot leave an empty
//! array undefined: they panic instead. Callers that want unchecked
//! semantics use `get_unchecked(0)` / `get_unchecked(len - 1)`.
//!
//! The array derefs to `[T]`, so slice iteration, reverse iteration, range
//! slicing, and panicking `[]` indexing are all available.
//!
//! The array is deliberately not `Clone`: ownership is unique and moves are
//! the only way to transfer it. `take` gives the explicit "move out and leave
//! an empty husk" operation.

use crate::alloc::{Global, StorageAlloc};
use crate::error::{LengthMismatch, StorageError};
use crate::storage::slots::Slots;
use crate::storage::RawStorage;

/// A fixed-length, eagerly initialized array in allocator-provided storage.
pub struct FixedArray<T, A: StorageAlloc = Global> {
    slots: Slots<T, A>,
}

impl<T> FixedArray<T, Global> {
    /// Creates an array of `len` clones of `value`.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if the allocator fails.
    pub fn new(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new_in(len, value, Global)
    }

    /// Creates an array of `len` default values.
    pub fn with_default(len: usize) -> Self
    where
        T: Default,
    {
        Self::default_in(len, Global)
    }

    /// Creates an array whose slot `i` holds `f(i)`.
    pub fn from_fn<F>(len: usize, f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self::from_fn_in(len, f, Global)
    }
}

impl<T, A: StorageAlloc> FixedArray<T, A> {
    /// Creates an array of `len` clones of `value` in storage from `alloc`.
    ///
    /// # Panics
    /// Panics on capacity overflow; aborts if the allocator fails.
    pub fn new_in(len: usize, value: T, alloc: A) -> Self
    where
        T: Clone,
    {
        Self {
            slots: Slots::filled(RawStorage::new_in(len, alloc), value),
        }
    }

    /// Fallible form of [`new_in`](Self::new_in).
    ///
    /// # Errors
    /// Returns `StorageError` if the storage cannot be acquired; the
    /// allocator's own error is passed through unchanged.
    pub fn try_new_in(len: usize, value: T, alloc: A) -> Result<Self, StorageError>
    where
        T: Clone,
    {
        let raw = RawStorage::try_new_in(len, alloc)?;
        Ok(Self {
            slots: Slots::filled(raw, value),
        })
    }

    /// Creates an array of `len` default values in storage from `alloc`.
    pub fn default_in(len: usize, alloc: A) -> Self
    where
        T: Default,
    {
        Self::from_fn_in(len, |_| T::default(), alloc)
    }

    /// Creates an array whose slot `i` holds `f(i)`, in storage from `alloc`.
    ///
    /// If `f` panics, the elements built so far are dropped and the storage
    /// is released before the panic continues.
    pub fn from_fn_in<F>(len: usize, f: F, alloc: A) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self {
            slots: Slots::from_fn(RawStorage::new_in(len, alloc), f),
        }
    }

    /// Fallible form of [`from_fn_in`](Self::from_fn_in).
    ///
    /// # Errors
    /// Returns `StorageError` if the storage cannot be acquired.
    pub fn try_from_fn_in<F>(len: usize, f: F, alloc: A) -> Result<Self, StorageError>
    where
        F: FnMut(usize) -> T,
    {
        let raw = RawStorage::try_new_in(len, alloc)?;
        Ok(Self {
            slots: Slots::from_fn(raw, f),
        })
    }

    /// Assigns a clone of `value` to every element. Length and storage are untouched.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.slots.as_mut_slice().fill(value);
    }

    /// Exchanges the contents of two arrays element by element.
    ///
    /// Neither array's storage moves; only the values do.
    ///
    /// # Errors
    /// `LengthMismatch` if the arrays differ in length. Nothing is swapped.
    pub fn swap_elements<B: StorageAlloc>(
        &mut self,
        other: &mut FixedArray<T, B>,
    ) -> Result<(), LengthMismatch> {
        let (left, right) = (self.len(), other.len());
        if left != right {
            return Err(LengthMismatch { left, right });
        }
        self.as_mut_slice().swap_with_slice(other.as_mut_slice());
        Ok(())
    }
}

fixed_slots_surface!(FixedArray, "array");
