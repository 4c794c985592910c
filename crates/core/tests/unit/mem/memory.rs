//! Main memory and byte-order tests.

use pretty_assertions::assert_eq;

use rivet_core::config::{Config, Endianness, MemoryConfig};
use rivet_core::mem::{MainMemory, MemoryHierarchy};

fn cacheless(memory: MemoryConfig) -> Config {
    Config {
        memory,
        caches: Vec::new(),
    }
}

// ══════════════════════════════════════════════════════════
// 1. Sparse storage
// ══════════════════════════════════════════════════════════

/// Never-written addresses read the configured default byte.
#[test]
fn unwritten_bytes_read_the_default() {
    let mem = MainMemory::new(&MemoryConfig {
        default_value: 0xCC,
        endianness: Endianness::Little,
    });
    assert_eq!(mem.read(0), 0xCC);
    assert_eq!(mem.read(u64::MAX), 0xCC);
    assert_eq!(mem.populated(), 0);
}

/// Only written bytes consume storage, anywhere in the address space.
#[test]
fn storage_is_sparse_across_the_address_space() {
    let mut mem = MainMemory::new(&MemoryConfig::default());
    mem.write(0, 1);
    mem.write(u64::MAX, 2);
    mem.write(1 << 40, 3);
    assert_eq!(mem.populated(), 3);
    assert_eq!(mem.read(0), 1);
    assert_eq!(mem.read(u64::MAX), 2);
    assert_eq!(mem.read(1 << 40), 3);
}

#[test]
fn overwrites_do_not_grow_storage() {
    let mut mem = MainMemory::new(&MemoryConfig::default());
    mem.write(5, 1);
    mem.write(5, 2);
    assert_eq!(mem.populated(), 1);
    assert_eq!(mem.read(5), 2);
}

// ══════════════════════════════════════════════════════════
// 2. Byte order
// ══════════════════════════════════════════════════════════

/// Instruction words land in memory under the configured byte order.
#[test]
fn instruction_words_follow_configured_endianness() {
    let mut little = MemoryHierarchy::new(&cacheless(MemoryConfig::default()));
    little.store_word(0, 0x0031_00B3).unwrap();
    assert_eq!(
        [0, 1, 2, 3].map(|i| little.memory().read(i)),
        [0xB3, 0x00, 0x31, 0x00]
    );

    let mut big = MemoryHierarchy::new(&cacheless(MemoryConfig {
        default_value: 0,
        endianness: Endianness::Big,
    }));
    big.store_word(0, 0x0031_00B3).unwrap();
    assert_eq!(
        [0, 1, 2, 3].map(|i| big.memory().read(i)),
        [0x00, 0x31, 0x00, 0xB3]
    );
    assert_eq!(big.fetch_word(0).unwrap(), 0x0031_00B3);
}

/// Data accesses are little-endian regardless of the instruction byte order.
#[test]
fn data_accesses_ignore_instruction_endianness() {
    let mut mem = MemoryHierarchy::new(&cacheless(MemoryConfig {
        default_value: 0,
        endianness: Endianness::Big,
    }));
    mem.store_u32(0x10, 0x1122_3344).unwrap();
    assert_eq!(mem.memory().read(0x10), 0x44);
    assert_eq!(mem.memory().read(0x13), 0x11);
    assert_eq!(mem.load_u32(0x10).unwrap(), 0x1122_3344);
    assert_eq!(mem.load_u16(0x10).unwrap(), 0x3344);
    assert_eq!(mem.load_u64(0x10).unwrap(), 0x1122_3344);
}
