//! Configuration system for the simulator core.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline constants for main memory and the cache hierarchy.
//! 2. **Structures:** Hierarchical config for memory and per-level caches.
//! 3. **Enums:** Cache kind, replacement policy, and byte order selection.
//!
//! Configuration is supplied as JSON via [`Config::from_json`] or built in
//! code; `Config::default()` yields the reference configuration.

use serde::Deserialize;

use crate::common::constants::WORD_BYTES;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
pub mod defaults {
    /// Total capacity of one cache level in bytes (32 KiB, reference config).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Number of data words per cache block.
    pub const BLOCK_WORDS: usize = 4;

    /// Associativity for set-associative caches (4-way, reference config).
    pub const CACHE_WAYS: usize = 4;

    /// Value returned for a main-memory byte that was never written.
    pub const MEMORY_DEFAULT: u8 = 0;
}

/// Byte order used when an instruction word is split into bytes for storage.
///
/// Endianness governs only how multi-byte instruction words are laid out in
/// memory; the byte-addressed load/store API used by instruction semantics is
/// unaffected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endianness {
    /// Least-significant byte at the lowest address (RISC-V default).
    #[default]
    Little,
    /// Most-significant byte at the lowest address.
    Big,
}

/// Organization of one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    /// No cache at this level; the level is skipped entirely.
    None,
    /// One block per row; the row index fully determines placement.
    DirectMapped,
    /// A single row holding every block; any block may hold any line.
    FullyAssociative,
    /// Multiple rows of multiple blocks each.
    #[default]
    SetAssociative,
}

/// Victim selection policy for a cache row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementPolicy {
    /// Uniform pseudo-random choice among the row's blocks.
    Random,
    /// Least recently used; ordering updated on every access.
    #[default]
    Lru,
    /// Insertion order; not affected by hits.
    Fifo,
}

/// Main memory parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Value read from a byte address that was never written.
    pub default_value: u8,
    /// Byte order for instruction-word storage.
    pub endianness: Endianness,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            default_value: defaults::MEMORY_DEFAULT,
            endianness: Endianness::Little,
        }
    }
}

/// Parameters for one cache level.
///
/// For [`CacheKind::DirectMapped`] the associativity is forced to 1 and for
/// [`CacheKind::FullyAssociative`] the row count is forced to 1; `ways` is
/// only consulted for set-associative caches.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct CacheLevelConfig {
    /// Cache organization for this level.
    pub kind: CacheKind,
    /// Victim selection policy.
    pub policy: ReplacementPolicy,
    /// Total data capacity in bytes.
    pub size_bytes: usize,
    /// Words per block.
    pub block_words: usize,
    /// Associativity (set-associative only).
    pub ways: usize,
}

impl Default for CacheLevelConfig {
    fn default() -> Self {
        Self {
            kind: CacheKind::SetAssociative,
            policy: ReplacementPolicy::Lru,
            size_bytes: defaults::CACHE_SIZE,
            block_words: defaults::BLOCK_WORDS,
            ways: defaults::CACHE_WAYS,
        }
    }
}

/// Root simulator configuration.
///
/// Cache levels are listed nearest-to-the-core first; main memory sits
/// beneath the last level. An empty list routes every access directly to
/// main memory.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main memory parameters.
    pub memory: MemoryConfig,
    /// Cache hierarchy, outermost last.
    pub caches: Vec<CacheLevelConfig>,
}

impl Config {
    /// Parses and validates a configuration from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error when the document is
    /// malformed or contains unknown enum values, and a [`ConfigError`] when
    /// a cache level describes an unbuildable geometry.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every cache level describes a buildable geometry.
    ///
    /// [`Config::from_json`] calls this automatically; configurations built
    /// in code can be checked with it before constructing a hierarchy.
    /// Levels of kind [`CacheKind::None`] are never built, so their
    /// parameters are not inspected.
    ///
    /// # Errors
    ///
    /// Reports the first offending level: zero `ways` on a set-associative
    /// level, zero `block_words`, or a capacity smaller than one row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (level, cache) in self.caches.iter().enumerate() {
            if cache.kind == CacheKind::None {
                continue;
            }
            if cache.block_words == 0 {
                return Err(ConfigError::ZeroBlockWords { level });
            }
            if cache.kind == CacheKind::SetAssociative && cache.ways == 0 {
                return Err(ConfigError::ZeroWays { level });
            }
            let block_bytes = cache.block_words * WORD_BYTES as usize;
            let row_bytes = match cache.kind {
                CacheKind::SetAssociative => block_bytes * cache.ways,
                _ => block_bytes,
            };
            if cache.size_bytes < row_bytes {
                return Err(ConfigError::CapacityTooSmall {
                    level,
                    size_bytes: cache.size_bytes,
                });
            }
        }
        Ok(())
    }
}
