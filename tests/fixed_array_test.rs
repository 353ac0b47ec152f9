use fixed_storage::{
    AllocError, BumpAlloc, CountingAlloc, FixedArray, Global, OutOfRange, StorageAlloc,
    StorageError, UninitCollection,
};
use std::alloc::Layout;
use std::cell::Cell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ptr::NonNull;
use std::rc::Rc;

/// Refuses every request.
struct Exhausted;

unsafe impl StorageAlloc for Exhausted {
    fn allocate(&self, _layout: Layout) -> Result<NonNull<u8>, AllocError> {
        Err(AllocError)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Counts how many times values of this type are dropped.
#[derive(Clone)]
struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    fn new(drops: &Rc<Cell<usize>>) -> Self {
        Self {
            drops: Rc::clone(drops),
        }
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn test_create_fill_and_bounds() -> anyhow::Result<()> {
    let mut array = FixedArray::new(3, 7);
    assert_eq!(*array.at(0)?, 7);
    assert_eq!(*array.at(1)?, 7);
    assert_eq!(*array.at(2)?, 7);

    array.fill(9);
    assert_eq!(*array.at(1)?, 9);

    let err = array.at(3).unwrap_err();
    assert_eq!(err, OutOfRange { index: 3, len: 3 });
    assert_eq!(err.to_string(), "index 3 out of range for storage of length 3");
    Ok(())
}

#[test]
fn test_at_mut_writes_through() -> anyhow::Result<()> {
    let mut array = FixedArray::new(4, 0u32);
    *array.at_mut(2)? = 42;
    assert_eq!(array.as_slice(), &[0, 0, 42, 0]);
    assert!(array.at_mut(4).is_err());
    Ok(())
}

#[test]
fn test_zero_length_array() {
    let counting = CountingAlloc::new();
    {
        let array = FixedArray::new_in(0, 1u8, &counting);
        assert!(array.is_empty());
        assert_eq!(array.at(0), Err(OutOfRange { index: 0, len: 0 }));
        assert_eq!(array.iter().count(), 0);
    }
    assert_eq!(counting.stats().allocations, 0);
    assert_eq!(counting.stats().deallocations, 0);
}

#[test]
fn test_allocator_used_exactly_twice() {
    let counting = CountingAlloc::new();
    {
        let mut array = FixedArray::new_in(16, 1u64, &counting);
        array.fill(2);
        array.iter_mut().for_each(|v| *v += 1);
        assert!(array.iter().all(|&v| v == 3));
        assert_eq!(counting.stats().allocations, 1);
        assert_eq!(counting.stats().deallocations, 0);
    }
    let stats = counting.stats();
    assert_eq!(stats.allocations, 1);
    assert_eq!(stats.deallocations, 1);
    assert_eq!(stats.allocated_bytes, 16 * 8);
    assert_eq!(stats.live_bytes(), 0);
}

#[test]
fn test_drop_destroys_every_element() {
    let drops = Rc::new(Cell::new(0));
    let template = DropCounter::new(&drops);
    {
        let _array = FixedArray::new(5, template.clone());
        assert_eq!(drops.get(), 0);
    }
    assert_eq!(drops.get(), 5);
    drop(template);
    assert_eq!(drops.get(), 6);
}

#[test]
fn test_fill_drops_previous_values() {
    let drops = Rc::new(Cell::new(0));
    let mut array = FixedArray::from_fn(3, |_| DropCounter::new(&drops));

    array.fill(DropCounter::new(&drops));
    // the three overwritten values; the argument itself lands in the last slot
    assert_eq!(drops.get(), 3);

    drop(array);
    assert_eq!(drops.get(), 6);
}

#[test]
fn test_move_transfers_everything() {
    let counting = CountingAlloc::new();
    let source = FixedArray::from_fn_in(4, |i| i * 2, &counting);
    let data = source.as_ptr();

    let destination = source;
    assert_eq!(destination.as_ptr(), data);
    assert_eq!(destination.as_slice(), &[0, 2, 4, 6]);
    assert_eq!(counting.stats().allocations, 1);

    drop(destination);
    assert_eq!(counting.stats().deallocations, 1);
}

#[test]
fn test_take_leaves_empty_source() {
    let drops = Rc::new(Cell::new(0));
    let counting = CountingAlloc::new();

    let mut source = FixedArray::from_fn_in(3, |_| DropCounter::new(&drops), &counting);
    let data = source.as_ptr();

    let destination = source.take();
    assert_eq!(destination.len(), 3);
    assert_eq!(destination.as_ptr(), data);
    assert!(source.is_empty());
    assert_eq!(source.iter().count(), 0);
    assert_eq!(drops.get(), 0);

    drop(source);
    assert_eq!(drops.get(), 0);
    assert_eq!(counting.stats().deallocations, 0);

    drop(destination);
    assert_eq!(drops.get(), 3);
    assert_eq!(counting.stats().deallocations, 1);
}

#[test]
fn test_equality() -> anyhow::Result<()> {
    let a = FixedArray::new(4, 'z');
    let b = FixedArray::new(4, 'z');
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);

    let mut c = FixedArray::new(4, 'z');
    *c.at_mut(3)? = 'y';
    assert_ne!(a, c);

    // Different lengths are unequal without reading past either end.
    let shorter = FixedArray::new(3, 'z');
    assert_ne!(a, shorter);
    assert_ne!(shorter, a);
    Ok(())
}

#[test]
fn test_equality_across_allocators() {
    let counting = CountingAlloc::new();
    let global = FixedArray::new_in(3, 1, Global);
    let counted = FixedArray::new_in(3, 1, &counting);
    assert!(global == counted);
}

#[test]
fn test_iteration_forward_reverse_and_subrange() {
    let array = FixedArray::from_fn(5, |i| i as i32);

    let forward: Vec<_> = array.iter().copied().collect();
    assert_eq!(forward, [0, 1, 2, 3, 4]);

    let reverse: Vec<_> = array.iter().rev().copied().collect();
    assert_eq!(reverse, [4, 3, 2, 1, 0]);

    assert_eq!(&array[1..4], &[1, 2, 3]);
    assert_eq!(array.iter().len(), 5);

    let mut sum = 0;
    for value in &array {
        sum += value;
    }
    assert_eq!(sum, 10);
}

#[test]
fn test_owned_iteration() {
    let drops = Rc::new(Cell::new(0));
    let array = FixedArray::from_fn(4, |_| DropCounter::new(&drops));

    let mut iter = array.into_iter();
    let first = iter.next();
    let last = iter.next_back();
    assert_eq!(iter.len(), 2);
    assert_eq!(drops.get(), 0);

    drop(iter);
    assert_eq!(drops.get(), 2);

    drop((first, last));
    assert_eq!(drops.get(), 4);
}

#[test]
fn test_owned_iteration_releases_storage() {
    let counting = CountingAlloc::new();
    let array = FixedArray::from_fn_in(3, |i| i.to_string(), &counting);

    let collected: Vec<String> = array.into_iter().collect();
    assert_eq!(collected, ["0", "1", "2"]);
    assert_eq!(counting.stats().live_blocks(), 0);
}

#[test]
fn test_try_new_in_passes_alloc_error_through() {
    let result = FixedArray::try_new_in(8, 0u8, Exhausted);
    assert!(matches!(result, Err(StorageError::Alloc(AllocError))));

    let overflow = FixedArray::try_new_in(usize::MAX, 0u64, Global);
    assert!(matches!(overflow, Err(StorageError::CapacityOverflow)));
}

#[test]
fn test_try_from_fn_in_fails_before_building_anything() {
    let mut calls = 0;
    let result = FixedArray::try_from_fn_in(
        4,
        |i| {
            calls += 1;
            i
        },
        Exhausted,
    );
    assert!(matches!(result, Err(StorageError::Alloc(AllocError))));
    assert_eq!(calls, 0);

    let counting = CountingAlloc::new();
    let built = FixedArray::try_from_fn_in(3, |i| i * 3, &counting).unwrap();
    assert_eq!(built.as_slice(), &[0, 3, 6]);
    assert_eq!(counting.stats().allocations, 1);
}

#[test]
fn test_equal_containers_hash_equal() {
    let a = FixedArray::from_fn(4, |i| i as u16);
    let b = FixedArray::from_fn_in(4, |i| i as u16, BumpAlloc::new());
    let lazy = UninitCollection::new(4).construct_from_fn(|i| i as u16);

    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(hash_of(&a), hash_of(&lazy));
    assert_eq!(hash_of(&a), hash_of(&[0u16, 1, 2, 3][..]));

    let different = FixedArray::new(4, 9u16);
    assert_ne!(hash_of(&a), hash_of(&different));
}

#[test]
fn test_slice_conversions() {
    fn total<S: AsRef<[u32]>>(values: &S) -> u32 {
        values.as_ref().iter().sum()
    }

    fn zero_first<S: AsMut<[u32]>>(values: &mut S) {
        values.as_mut()[0] = 0;
    }

    let mut array = FixedArray::new(3, 5u32);
    let mut lazy = UninitCollection::new(3).construct(5u32);
    assert_eq!(total(&array), 15);
    assert_eq!(total(&lazy), 15);

    zero_first(&mut array);
    zero_first(&mut lazy);
    assert_eq!(array.as_slice(), &[0, 5, 5]);
    assert!(array == lazy);
}

#[test]
fn test_counting_exposes_wrapped_allocator() {
    let counted = CountingAlloc::wrap(BumpAlloc::new());
    assert_eq!(counted.inner().chunk_count(), 0);

    let array = FixedArray::new_in(4, 1u32, &counted);
    assert_eq!(array.len(), 4);
    assert_eq!(counted.inner().chunk_count(), 1);
    assert!(counted.inner().reserved_bytes() >= 16);
    assert_eq!(counted.stats().allocations, 1);
}
