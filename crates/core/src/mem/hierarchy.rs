//! Multi-level memory hierarchy.
//!
//! This module stitches the cache levels and main memory into one
//! byte-addressed access path. It provides:
//! 1. **Recursive Access:** Every read and write enters at the first cache
//!    level; misses fill from the next level, write-backs push dirty victims
//!    down before they are displaced.
//! 2. **Typed Accessors:** Little-endian halfword, word, and doubleword
//!    loads and stores built on the byte path.
//! 3. **Instruction Words:** Fetch and store of instruction words under the
//!    configured byte order.
//! 4. **Flush:** A hierarchy-wide write-back that pushes all dirty data to
//!    main memory without invalidating any line.
//!
//! The hierarchy is write-back with write-allocate: a write miss fills the
//! line and dirties it in place, deferring the store's trip to main memory
//! until the line is displaced or flushed.

use tracing::trace;

use crate::common::error::MemError;
use crate::config::{CacheKind, Config, Endianness};
use crate::isa::codec;

use super::cache::{Cache, CacheStats};
use super::main_memory::MainMemory;

/// The cache levels and main memory of a simulated core.
///
/// Levels are ordered nearest-to-the-core first. Data loads and stores are
/// always little-endian; the configured endianness applies to instruction
/// words only.
pub struct MemoryHierarchy {
    caches: Vec<Cache>,
    memory: MainMemory,
    endianness: Endianness,
}

impl MemoryHierarchy {
    /// Builds the hierarchy described by `config`.
    ///
    /// Levels configured as [`CacheKind::None`] are skipped entirely; with
    /// no levels left, every access goes straight to main memory.
    ///
    /// The configuration must describe buildable geometries; JSON-sourced
    /// configs are checked by [`Config::from_json`], hand-built ones can be
    /// checked with [`Config::validate`] first.
    pub fn new(config: &Config) -> Self {
        let caches = config
            .caches
            .iter()
            .filter(|level| level.kind != CacheKind::None)
            .map(Cache::new)
            .collect();
        Self {
            caches,
            memory: MainMemory::new(&config.memory),
            endianness: config.memory.endianness,
        }
    }

    /// Number of active cache levels.
    pub fn levels(&self) -> usize {
        self.caches.len()
    }

    /// Access counters for one cache level.
    pub fn stats(&self, level: usize) -> Option<CacheStats> {
        self.caches.get(level).map(Cache::stats)
    }

    /// Shared view of one cache level.
    pub fn cache(&self, level: usize) -> Option<&Cache> {
        self.caches.get(level)
    }

    /// Shared view of main memory.
    pub fn memory(&self) -> &MainMemory {
        &self.memory
    }

    /// Reads one byte through the hierarchy.
    ///
    /// # Errors
    ///
    /// Propagates internal cache inconsistencies; see [`MemError`].
    pub fn read_byte(&mut self, addr: u64) -> Result<u8, MemError> {
        self.access(0, addr, None)
    }

    /// Writes one byte through the hierarchy.
    ///
    /// # Errors
    ///
    /// Propagates internal cache inconsistencies; see [`MemError`].
    pub fn write_byte(&mut self, addr: u64, value: u8) -> Result<(), MemError> {
        self.access(0, addr, Some(value)).map(|_| ())
    }

    /// Loads a little-endian halfword.
    pub fn load_u16(&mut self, addr: u64) -> Result<u16, MemError> {
        let mut bytes = [0u8; 2];
        self.load_bytes(addr, &mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Loads a little-endian word.
    pub fn load_u32(&mut self, addr: u64) -> Result<u32, MemError> {
        let mut bytes = [0u8; 4];
        self.load_bytes(addr, &mut bytes)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Loads a little-endian doubleword.
    pub fn load_u64(&mut self, addr: u64) -> Result<u64, MemError> {
        let mut bytes = [0u8; 8];
        self.load_bytes(addr, &mut bytes)?;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Stores a little-endian halfword.
    pub fn store_u16(&mut self, addr: u64, value: u16) -> Result<(), MemError> {
        self.store_bytes(addr, &value.to_le_bytes())
    }

    /// Stores a little-endian word.
    pub fn store_u32(&mut self, addr: u64, value: u32) -> Result<(), MemError> {
        self.store_bytes(addr, &value.to_le_bytes())
    }

    /// Stores a little-endian doubleword.
    pub fn store_u64(&mut self, addr: u64, value: u64) -> Result<(), MemError> {
        self.store_bytes(addr, &value.to_le_bytes())
    }

    /// Fetches an instruction word under the configured byte order.
    pub fn fetch_word(&mut self, addr: u64) -> Result<u32, MemError> {
        let mut bytes = [0u8; 4];
        self.load_bytes(addr, &mut bytes)?;
        Ok(codec::from_bytes(bytes, self.endianness))
    }

    /// Stores an instruction word under the configured byte order.
    pub fn store_word(&mut self, addr: u64, word: u32) -> Result<(), MemError> {
        self.store_bytes(addr, &codec::to_bytes(word, self.endianness))
    }

    /// Pushes every dirty line in every level down to main memory.
    ///
    /// Lines stay valid and resident; only their dirty bits are cleared.
    /// Levels are flushed nearest-to-the-core first so forwarded data
    /// cascades all the way down.
    ///
    /// # Errors
    ///
    /// Propagates internal cache inconsistencies; see [`MemError`].
    pub fn write_back_all(&mut self) -> Result<(), MemError> {
        for level in 0..self.caches.len() {
            for (row, way) in self.caches[level].dirty_blocks() {
                let base = self.caches[level].resident_base(row, way);
                let data = self.caches[level].block(row, way).data().to_vec();
                for (i, &byte) in data.iter().enumerate() {
                    self.access(level + 1, base + i as u64, Some(byte))?;
                }
                self.caches[level].note_write_back(row, way);
            }
        }
        Ok(())
    }

    fn load_bytes(&mut self, addr: u64, out: &mut [u8]) -> Result<(), MemError> {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.read_byte(addr + i as u64)?;
        }
        Ok(())
    }

    fn store_bytes(&mut self, addr: u64, bytes: &[u8]) -> Result<(), MemError> {
        for (i, &byte) in bytes.iter().enumerate() {
            self.write_byte(addr + i as u64, byte)?;
        }
        Ok(())
    }

    /// Performs one byte access at `level`, recursing into the next level on
    /// a miss. Levels at and beyond `caches.len()` are main memory.
    fn access(&mut self, level: usize, addr: u64, write: Option<u8>) -> Result<u8, MemError> {
        if level >= self.caches.len() {
            return Ok(match write {
                Some(value) => {
                    self.memory.write(addr, value);
                    value
                }
                None => self.memory.read(addr),
            });
        }

        let row = self.caches[level].row_of(addr);
        let offset = (addr % self.caches[level].block_bytes() as u64) as usize;

        if let Some(way) = self.caches[level].probe(addr) {
            return Ok(match write {
                Some(value) => {
                    self.caches[level].write_hit(row, way, offset, value);
                    value
                }
                None => self.caches[level].read_hit(row, way, offset),
            });
        }

        let way = self.caches[level].take_miss(row);
        let ways = self.caches[level].ways();
        if way >= ways {
            return Err(MemError::VictimOutOfRange { row, way, ways });
        }

        let victim = self.caches[level].block(row, way);
        if victim.is_valid() && victim.is_dirty() {
            let base = self.caches[level].resident_base(row, way);
            let data = self.caches[level].block(row, way).data().to_vec();
            trace!(level, base, "writing back dirty victim line");
            for (i, &byte) in data.iter().enumerate() {
                self.access(level + 1, base + i as u64, Some(byte))?;
            }
            self.caches[level].note_write_back(row, way);
        }

        let base = self.caches[level].line_base(addr);
        let tag = self.caches[level].tag_of(addr);
        let block_bytes = self.caches[level].block_bytes();
        let mut data = vec![0u8; block_bytes];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = self.access(level + 1, base + i as u64, None)?;
        }

        Ok(match write {
            Some(value) => {
                data[offset] = value;
                self.caches[level].fill(row, way, tag, data, true);
                value
            }
            None => {
                let value = data[offset];
                self.caches[level].fill(row, way, tag, data, false);
                value
            }
        })
    }
}
