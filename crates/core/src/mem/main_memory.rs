//! Sparse main memory.
//!
//! This module implements the backing store beneath the cache hierarchy. It
//! provides:
//! 1. **Sparse Storage:** A byte-granular map over the full 64-bit address
//!    space; only written bytes consume host memory.
//! 2. **Default Fill:** Reads of never-written addresses return a
//!    configurable default value.

use std::collections::HashMap;

use crate::config::MemoryConfig;

/// Byte-addressable sparse main memory.
#[derive(Clone, Debug)]
pub struct MainMemory {
    bytes: HashMap<u64, u8>,
    default_value: u8,
}

impl MainMemory {
    /// Creates an empty memory with the configured default byte.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            bytes: HashMap::new(),
            default_value: config.default_value,
        }
    }

    /// Reads one byte.
    ///
    /// # Returns
    ///
    /// The stored byte, or the default value for a never-written address.
    pub fn read(&self, addr: u64) -> u8 {
        self.bytes.get(&addr).copied().unwrap_or(self.default_value)
    }

    /// Writes one byte.
    pub fn write(&mut self, addr: u64, value: u8) {
        self.bytes.insert(addr, value);
    }

    /// Number of bytes that have been explicitly written.
    pub fn populated(&self) -> usize {
        self.bytes.len()
    }

    /// Discards all written bytes.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
