//! Storage allocators: the acquire/release strategy injected into every container.

pub mod allocator;
pub mod bump;
pub mod global;
pub mod metrics;

pub use allocator::{AllocError, StorageAlloc};
pub use bump::BumpAlloc;
pub use global::Global;
pub use metrics::{AllocStats, CountingAlloc};
