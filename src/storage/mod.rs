//! Raw storage and the lifecycle layers built on it.
//!
//! - `raw`: allocator-backed block of `len` slots; acquire on create, release on drop.
//! - `slots`: the same block with every slot live; drops elements before release.
//! - `iter`: consuming iterator that owns the block while handing elements out.

pub mod iter;
pub mod raw;
pub(crate) mod slots;

pub use iter::IntoIter;
pub use raw::RawStorage;
