//! Single cache level.
//!
//! This module implements one level of the write-back cache hierarchy. It
//! provides:
//! 1. **Geometry:** Row/way/block organization derived from a level config;
//!    direct-mapped and fully-associative caches are the one-way and one-row
//!    degenerate forms.
//! 2. **Lookup:** Tag/row decomposition of addresses and residency probing.
//! 3. **Line State:** Valid and dirty tracking per block, with write-back
//!    data exposed for eviction.
//! 4. **Accounting:** Hit, miss, eviction, and write-back counters.

use crate::common::constants::WORD_BYTES;
use crate::config::{CacheKind, CacheLevelConfig, ReplacementPolicy as PolicyKind};

use super::policies::{FifoPolicy, LruPolicy, RandomPolicy, ReplacementPolicy};

/// One cache block and its line state.
#[derive(Clone, Debug)]
pub struct CacheBlock {
    tag: u64,
    valid: bool,
    dirty: bool,
    data: Vec<u8>,
}

impl CacheBlock {
    fn new(block_bytes: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            data: vec![0; block_bytes],
        }
    }

    /// Tag of the resident line. Meaningless while the block is invalid.
    pub fn tag(&self) -> u64 {
        self.tag
    }

    /// Returns `true` when the block holds a line.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns `true` when the resident line has unwritten-back stores.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The block's data bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Hit/miss accounting for one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Accesses that found their line resident.
    pub hits: u64,
    /// Accesses that had to fill their line.
    pub misses: u64,
    /// Valid lines displaced by fills.
    pub evictions: u64,
    /// Dirty lines pushed to the next level.
    pub write_backs: u64,
}

/// One write-back cache level.
pub struct Cache {
    rows: usize,
    ways: usize,
    block_bytes: usize,
    blocks: Vec<CacheBlock>,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl Cache {
    /// Builds a cache level from its configuration.
    ///
    /// Geometry follows the cache kind: direct-mapped forces one way,
    /// fully-associative forces one row, and set-associative uses the
    /// configured associativity.
    pub fn new(config: &CacheLevelConfig) -> Self {
        let block_bytes = config.block_words * WORD_BYTES as usize;
        let total_blocks = config.size_bytes / block_bytes;
        let (rows, ways) = match config.kind {
            CacheKind::DirectMapped => (total_blocks, 1),
            CacheKind::FullyAssociative => (1, total_blocks),
            CacheKind::SetAssociative | CacheKind::None => {
                (total_blocks / config.ways, config.ways)
            }
        };

        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyKind::Lru => Box::new(LruPolicy::new(rows, ways)),
            PolicyKind::Fifo => Box::new(FifoPolicy::new(rows, ways)),
            PolicyKind::Random => Box::new(RandomPolicy::new(rows, ways)),
        };

        Self {
            rows,
            ways,
            block_bytes,
            blocks: vec![CacheBlock::new(block_bytes); rows * ways],
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Associativity.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Bytes per block.
    pub fn block_bytes(&self) -> usize {
        self.block_bytes
    }

    /// Accumulated access counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Row holding `addr`.
    pub fn row_of(&self, addr: u64) -> usize {
        ((addr / self.block_bytes as u64) % self.rows as u64) as usize
    }

    /// Tag identifying `addr`'s line within its row.
    pub fn tag_of(&self, addr: u64) -> u64 {
        addr / (self.block_bytes as u64 * self.rows as u64)
    }

    /// First address of the line containing `addr`.
    pub fn line_base(&self, addr: u64) -> u64 {
        addr - addr % self.block_bytes as u64
    }

    /// First address of the line resident in `(row, way)`.
    pub fn resident_base(&self, row: usize, way: usize) -> u64 {
        let block = self.block(row, way);
        (block.tag * self.rows as u64 + row as u64) * self.block_bytes as u64
    }

    /// Shared view of a block.
    pub fn block(&self, row: usize, way: usize) -> &CacheBlock {
        &self.blocks[row * self.ways + way]
    }

    fn block_mut(&mut self, row: usize, way: usize) -> &mut CacheBlock {
        &mut self.blocks[row * self.ways + way]
    }

    /// Looks for `addr`'s line in its row.
    ///
    /// # Returns
    ///
    /// The way holding the line, or `None` on a miss. Does not touch the
    /// replacement policy or counters.
    pub fn probe(&self, addr: u64) -> Option<usize> {
        let row = self.row_of(addr);
        let tag = self.tag_of(addr);
        (0..self.ways).find(|&way| {
            let block = self.block(row, way);
            block.valid && block.tag == tag
        })
    }

    /// Way the row's replacement policy would evict next.
    ///
    /// A preview only: policy state is not advanced, so the answer stands
    /// until the next fill or access changes the row's ordering.
    pub fn victim_way(&self, row: usize) -> usize {
        self.policy.peek_victim(row)
    }

    /// Records a hit on `(row, way)` and reads one byte from the block.
    pub fn read_hit(&mut self, row: usize, way: usize, offset: usize) -> u8 {
        self.stats.hits += 1;
        self.policy.touch(row, way);
        self.block(row, way).data[offset]
    }

    /// Records a hit on `(row, way)` and writes one byte into the block,
    /// marking the line dirty.
    pub fn write_hit(&mut self, row: usize, way: usize, offset: usize, value: u8) {
        self.stats.hits += 1;
        self.policy.touch(row, way);
        let block = self.block_mut(row, way);
        block.data[offset] = value;
        block.dirty = true;
    }

    /// Records a miss and selects the way the new line will occupy.
    pub fn take_miss(&mut self, row: usize) -> usize {
        self.stats.misses += 1;
        self.policy.victim(row)
    }

    /// Installs a line into `(row, way)`.
    ///
    /// `dirty` marks the line as carrying stores that have not reached the
    /// next level, which is the case for write misses. Counts an eviction
    /// when the block previously held a valid line.
    pub fn fill(&mut self, row: usize, way: usize, tag: u64, data: Vec<u8>, dirty: bool) {
        if self.block(row, way).valid {
            self.stats.evictions += 1;
        }
        let block = self.block_mut(row, way);
        block.tag = tag;
        block.valid = true;
        block.dirty = dirty;
        block.data = data;
        self.policy.filled(row, way);
    }

    /// Records that `(row, way)`'s dirty line was pushed down.
    pub fn note_write_back(&mut self, row: usize, way: usize) {
        self.stats.write_backs += 1;
        self.block_mut(row, way).dirty = false;
    }

    /// Iterates over `(row, way)` pairs of every valid dirty block.
    pub fn dirty_blocks(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for row in 0..self.rows {
            for way in 0..self.ways {
                let block = self.block(row, way);
                if block.valid && block.dirty {
                    out.push((row, way));
                }
            }
        }
        out
    }
}
