//! Memory subsystem: sparse main memory, write-back caches, and the
//! hierarchy binding them together.

pub mod cache;
pub mod hierarchy;
pub mod main_memory;
pub mod policies;

pub use cache::{Cache, CacheBlock, CacheStats};
pub use hierarchy::MemoryHierarchy;
pub use main_memory::MainMemory;
