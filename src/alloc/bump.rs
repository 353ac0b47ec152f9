//! `BumpAlloc`: a region allocator whose releases are free.

use core::alloc::Layout;
use core::cell::UnsafeCell;
use core::ptr::NonNull;

use crate::alloc::allocator::{AllocError, StorageAlloc};

const FIRST_CHUNK: usize = 1024;
const MAX_CHUNK: usize = 1024 * 1024;
const CHUNK_ALIGN: usize = 16;

/// A chunk of memory in the bump allocator.
struct Chunk {
    ptr: NonNull<u8>,
    layout: Layout,
    allocated: usize,
}

impl Chunk {
    fn new(size: usize) -> Result<Self, AllocError> {
        let layout = Layout::from_size_align(size, CHUNK_ALIGN).map_err(|_| AllocError)?;
        // SAFETY: `size` is never zero (see `BumpAlloc::chunk_size_for`).
        let ptr = NonNull::new(unsafe { std::alloc::alloc(layout) }).ok_or(AllocError)?;
        trace_storage!(bytes = size, "bump chunk acquired");
        Ok(Self {
            ptr,
            layout,
            allocated: 0,
        })
    }

    fn try_alloc(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        let start = self.ptr.as_ptr() as usize;
        let current = start + self.allocated;

        let align_offset = (current as *const u8).align_offset(layout.align());
        if align_offset == usize::MAX {
            return None;
        }

        let aligned_current = current.checked_add(align_offset)?;
        let end = aligned_current.checked_add(layout.size())?;

        if end <= start + self.layout.size() {
            self.allocated = end - start;
            // SAFETY: `aligned_current` lies inside the chunk, which is non-null.
            unsafe { Some(self.ptr.add(aligned_current - start)) }
        } else {
            None
        }
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        unsafe {
            std::alloc::dealloc(self.ptr.as_ptr(), self.layout);
        }
    }
}

/// A region allocator that hands out storage by bumping a pointer.
///
/// Releasing a block is a no-op; all memory comes back when the `BumpAlloc`
/// itself is dropped. Containers borrow it (`FixedArray<T, &BumpAlloc>`), so
/// the arena is guaranteed to outlive every container carved from it.
///
/// Not `Sync`: the chunk list is mutated through `&self` without locking.
pub struct BumpAlloc {
    chunks: UnsafeCell<Vec<Chunk>>,
    current: UnsafeCell<Option<Chunk>>,
}

impl BumpAlloc {
    /// Creates an empty arena. No memory is reserved until the first request.
    pub fn new() -> Self {
        Self {
            chunks: UnsafeCell::new(Vec::new()),
            current: UnsafeCell::new(None),
        }
    }

    /// Total bytes reserved from the system across all chunks.
    pub fn reserved_bytes(&self) -> usize {
        // SAFETY: no `&mut` into the chunk list outlives `alloc_layout`.
        unsafe {
            let retired: usize = (*self.chunks.get()).iter().map(|c| c.layout.size()).sum();
            let live = (*self.current.get()).as_ref().map_or(0, |c| c.layout.size());
            retired + live
        }
    }

    /// Number of chunks the arena has acquired.
    pub fn chunk_count(&self) -> usize {
        // SAFETY: see `reserved_bytes`.
        unsafe { (*self.chunks.get()).len() + usize::from((*self.current.get()).is_some()) }
    }

    fn alloc_layout(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: `BumpAlloc` is `!Sync` and this is the only place that takes
        // mutable references into the cells; they do not escape this call.
        unsafe {
            let current = &mut *self.current.get();

            if let Some(chunk) = current.as_mut() {
                if let Some(ptr) = chunk.try_alloc(layout) {
                    return Ok(ptr);
                }
            }

            let previous = current.as_ref().map_or(0, |c| c.layout.size());
            let mut fresh = Chunk::new(Self::chunk_size_for(previous, layout))?;
            let ptr = fresh.try_alloc(layout).ok_or(AllocError)?;

            if let Some(full) = current.replace(fresh) {
                (*self.chunks.get()).push(full);
            }
            Ok(ptr)
        }
    }

    fn chunk_size_for(previous: usize, layout: Layout) -> usize {
        let grown = if previous == 0 {
            FIRST_CHUNK
        } else {
            (previous * 2).min(MAX_CHUNK)
        };
        // Oversized requests get a dedicated chunk with room for alignment slack.
        grown.max(layout.size().saturating_add(layout.align()))
    }

    /// Releases every chunk at once.
    ///
    /// Requires `&mut self`, so no container can still be borrowing the arena.
    pub fn reset(&mut self) {
        self.chunks.get_mut().clear();
        *self.current.get_mut() = None;
    }
}

impl Default for BumpAlloc {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl Send for BumpAlloc {}

unsafe impl StorageAlloc for BumpAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.alloc_layout(layout)
    }

    unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
        // No-op: memory is freed when the arena is dropped
    }
}

impl core::fmt::Debug for BumpAlloc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BumpAlloc")
            .field("chunks", &self.chunk_count())
            .field("reserved_bytes", &self.reserved_bytes())
            .finish()
    }
}
