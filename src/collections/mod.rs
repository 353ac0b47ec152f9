//! Fixed-capacity containers.
//!
//! - `fixed_array`: elements initialized eagerly at construction
//! - `fixed_collection`: storage first, elements later via `construct`
//!
//! Once their elements are live both containers expose the same surface,
//! generated by `fixed_slots_surface!` over a `slots: Slots<T, A>` field.

/// Generates the element-access surface and the standard trait impls for a
/// container `$name<T, A>` whose only field is `slots: Slots<T, A>`.
///
/// `$noun` names the container in panic messages.
macro_rules! fixed_slots_surface {
    ($name:ident, $noun:literal) => {
        impl<T, A: $crate::alloc::StorageAlloc> $name<T, A> {
            /// Number of elements. Fixed at construction.
            #[inline]
            pub fn len(&self) -> usize {
                self.slots.raw().len()
            }

            /// Returns `true` if there are no elements.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// The allocator backing this container.
            #[inline]
            pub fn allocator(&self) -> &A {
                self.slots.raw().allocator()
            }

            /// Returns the element at `index`.
            ///
            /// # Errors
            /// `OutOfRange` when `index >= len`.
            #[inline]
            pub fn at(&self, index: usize) -> Result<&T, $crate::error::OutOfRange> {
                let len = self.len();
                self.slots
                    .as_slice()
                    .get(index)
                    .ok_or($crate::error::OutOfRange { index, len })
            }

            /// Returns the element at `index` mutably.
            ///
            /// # Errors
            /// `OutOfRange` when `index >= len`.
            #[inline]
            pub fn at_mut(&mut self, index: usize) -> Result<&mut T, $crate::error::OutOfRange> {
                let len = self.len();
                self.slots
                    .as_mut_slice()
                    .get_mut(index)
                    .ok_or($crate::error::OutOfRange { index, len })
            }

            /// Returns the element at `index` without a bounds check.
            ///
            /// # Safety
            /// `index` must be less than `len()`. Anything else is undefined behavior.
            #[inline]
            pub unsafe fn get_unchecked(&self, index: usize) -> &T {
                debug_assert!(index < self.len());
                &*self.slots.raw().as_ptr().add(index)
            }

            /// Returns the element at `index` mutably without a bounds check.
            ///
            /// # Safety
            /// `index` must be less than `len()`. Anything else is undefined behavior.
            #[inline]
            pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
                debug_assert!(index < self.len());
                &mut *self.slots.as_mut_ptr().add(index)
            }

            /// The first element.
            ///
            /// # Panics
            /// Panics if the container is empty.
            #[inline]
            pub fn front(&self) -> &T {
                match self.slots.as_slice() {
                    [first, ..] => first,
                    [] => $crate::collections::empty_access(stringify!($name), "front", $noun),
                }
            }

            /// The first element, mutably.
            ///
            /// # Panics
            /// Panics if the container is empty.
            #[inline]
            pub fn front_mut(&mut self) -> &mut T {
                match self.slots.as_mut_slice() {
                    [first, ..] => first,
                    [] => $crate::collections::empty_access(stringify!($name), "front_mut", $noun),
                }
            }

            /// The last element.
            ///
            /// # Panics
            /// Panics if the container is empty.
            #[inline]
            pub fn back(&self) -> &T {
                match self.slots.as_slice() {
                    [.., last] => last,
                    [] => $crate::collections::empty_access(stringify!($name), "back", $noun),
                }
            }

            /// The last element, mutably.
            ///
            /// # Panics
            /// Panics if the container is empty.
            #[inline]
            pub fn back_mut(&mut self) -> &mut T {
                match self.slots.as_mut_slice() {
                    [.., last] => last,
                    [] => $crate::collections::empty_access(stringify!($name), "back_mut", $noun),
                }
            }

            /// Pointer to the first element.
            #[inline]
            pub fn as_ptr(&self) -> *const T {
                self.slots.raw().as_ptr()
            }

            /// Mutable pointer to the first element.
            #[inline]
            pub fn as_mut_ptr(&mut self) -> *mut T {
                self.slots.as_mut_ptr()
            }

            /// The elements as a slice.
            #[inline]
            pub fn as_slice(&self) -> &[T] {
                self.slots.as_slice()
            }

            /// The elements as a mutable slice.
            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [T] {
                self.slots.as_mut_slice()
            }

            /// Moves the container out, leaving `self` empty.
            ///
            /// The storage, length, and elements transfer as a unit; no element
            /// is cloned or dropped. `self` keeps a clone of the allocator and is
            /// safe to use or drop.
            pub fn take(&mut self) -> Self
            where
                A: Clone,
            {
                Self {
                    slots: self.slots.take(),
                }
            }
        }

        impl<T, A: $crate::alloc::StorageAlloc> core::ops::Deref for $name<T, A> {
            type Target = [T];

            #[inline]
            fn deref(&self) -> &[T] {
                self.as_slice()
            }
        }

        impl<T, A: $crate::alloc::StorageAlloc> core::ops::DerefMut for $name<T, A> {
            #[inline]
            fn deref_mut(&mut self) -> &mut [T] {
                self.as_mut_slice()
            }
        }

        impl<T, A: $crate::alloc::StorageAlloc> AsRef<[T]> for $name<T, A> {
            fn as_ref(&self) -> &[T] {
                self.as_slice()
            }
        }

        impl<T, A: $crate::alloc::StorageAlloc> AsMut<[T]> for $name<T, A> {
            fn as_mut(&mut self) -> &mut [T] {
                self.as_mut_slice()
            }
        }

        impl<T, A: $crate::alloc::StorageAlloc + Default> Default for $name<T, A> {
            /// An empty container. Does not allocate.
            fn default() -> Self {
                Self {
                    slots: $crate::storage::slots::Slots::empty(A::default()),
                }
            }
        }

        impl<T: Eq, A: $crate::alloc::StorageAlloc> Eq for $name<T, A> {}

        impl<T: core::hash::Hash, A: $crate::alloc::StorageAlloc> core::hash::Hash for $name<T, A> {
            fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
                core::hash::Hash::hash(self.as_slice(), state);
            }
        }

        impl<T: core::fmt::Debug, A: $crate::alloc::StorageAlloc> core::fmt::Debug for $name<T, A> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_list().entries(self.iter()).finish()
            }
        }

        impl<T, A: $crate::alloc::StorageAlloc> IntoIterator for $name<T, A> {
            type Item = T;
            type IntoIter = $crate::storage::IntoIter<T, A>;

            fn into_iter(self) -> Self::IntoIter {
                self.slots.into_iter()
            }
        }

        impl<'a, T, A: $crate::alloc::StorageAlloc> IntoIterator for &'a $name<T, A> {
            type Item = &'a T;
            type IntoIter = core::slice::Iter<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<'a, T, A: $crate::alloc::StorageAlloc> IntoIterator for &'a mut $name<T, A> {
            type Item = &'a mut T;
            type IntoIter = core::slice::IterMut<'a, T>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter_mut()
            }
        }
    };
}

/// Element-wise equality between two containers, across element and
/// allocator types. Lengths are compared first.
macro_rules! fixed_slots_eq {
    ($($left:ident == $right:ident),+ $(,)?) => {
        $(
            impl<T, U, A, B> PartialEq<$right<U, B>> for $left<T, A>
            where
                T: PartialEq<U>,
                A: $crate::alloc::StorageAlloc,
                B: $crate::alloc::StorageAlloc,
            {
                fn eq(&self, other: &$right<U, B>) -> bool {
                    self.len() == other.len() && self.as_slice() == other.as_slice()
                }
            }
        )+
    };
}

pub mod fixed_array;
pub mod fixed_collection;

pub use fixed_array::FixedArray;
pub use fixed_collection::{FixedCollection, UninitCollection};

fixed_slots_eq! {
    FixedArray == FixedArray,
    FixedArray == FixedCollection,
    FixedCollection == FixedCollection,
    FixedCollection == FixedArray,
}

#[cold]
#[inline(never)]
pub(crate) fn empty_access(container: &str, method: &str, noun: &str) -> ! {
    panic!("{container}::{method} called on an empty {noun}");
}
