//! Immediate shuffle and split tests.

use pretty_assertions::assert_eq;

use rivet_core::isa::imm::{
    decode_b, decode_j, decode_s, encode_b, encode_j, encode_s, sign_extend, split_hi_lo,
};

// ══════════════════════════════════════════════════════════
// 1. Sign extension
// ══════════════════════════════════════════════════════════

#[test]
fn sign_extend_widths() {
    assert_eq!(sign_extend(0x7FF, 12), 0x7FF);
    assert_eq!(sign_extend(0x800, 12), -0x800);
    assert_eq!(sign_extend(0xFFF, 12), -1);
    assert_eq!(sign_extend(0x1, 1), -1);
    assert_eq!(sign_extend(u64::MAX, 64), -1);
}

// ══════════════════════════════════════════════════════════
// 2. Branch shuffle
// ══════════════════════════════════════════════════════════

/// The branch fragments carry `imm[12|10:5]` and `imm[4:1|11]`.
#[test]
fn branch_shuffle_bit_placement() {
    // offset 16 = bit 4 only: lands in the low fragment, shifted up one.
    assert_eq!(encode_b(16).unwrap(), (0, 0b10000));
    // offset -2 = all bits set: both fragments saturate.
    assert_eq!(encode_b(-2).unwrap(), (0x7F, 0x1F));
}

#[test]
fn branch_offsets_round_trip() {
    for offset in [-0x1000, -0x800, -2, 0, 2, 16, 0x7FE, 0xFFE] {
        let (hi7, lo5) = encode_b(offset).unwrap();
        assert_eq!(decode_b(hi7, lo5), offset, "offset {offset:#x}");
    }
}

#[test]
fn branch_rejects_odd_and_out_of_range() {
    assert!(encode_b(3).is_err());
    assert!(encode_b(0x1000).is_err());
    assert!(encode_b(-0x1002).is_err());
}

// ══════════════════════════════════════════════════════════
// 3. Store split
// ══════════════════════════════════════════════════════════

#[test]
fn store_offsets_round_trip() {
    for offset in [-0x800, -1, 0, 1, 0x1F, 0x20, 0x7FF] {
        let (hi7, lo5) = encode_s(offset).unwrap();
        assert_eq!(decode_s(hi7, lo5), offset, "offset {offset:#x}");
    }
    assert!(encode_s(0x800).is_err());
    assert!(encode_s(-0x801).is_err());
}

// ══════════════════════════════════════════════════════════
// 4. Jump shuffle
// ══════════════════════════════════════════════════════════

/// The jump field carries `imm[20|10:1|11|19:12]`.
#[test]
fn jump_shuffle_bit_placement() {
    // offset 2 = bit 1 only: lowest bit of the middle run.
    assert_eq!(encode_j(2).unwrap(), 1 << 9);
    // offset 0x800 = bit 11 only.
    assert_eq!(encode_j(0x800).unwrap(), 1 << 8);
    // offset 0x1000 = bit 12 only: lowest bit of the top run.
    assert_eq!(encode_j(0x1000).unwrap(), 1);
}

#[test]
fn jump_offsets_round_trip() {
    for offset in [-0x10_0000, -0x1000, -2, 0, 2, 0x800, 0x1000, 0xF_FFFE] {
        let field = encode_j(offset).unwrap();
        assert_eq!(decode_j(field), offset, "offset {offset:#x}");
    }
}

#[test]
fn jump_rejects_odd_and_out_of_range() {
    assert!(encode_j(1).is_err());
    assert!(encode_j(0x10_0000).is_err());
    assert!(encode_j(-0x10_0002).is_err());
}

// ══════════════════════════════════════════════════════════
// 5. Hi/lo split
// ══════════════════════════════════════════════════════════

/// `(hi << 12) + sext(lo)` reproduces the original offset, including the
/// carry correction when the low half sign-extends negative.
#[test]
fn split_hi_lo_reconstructs_offset() {
    for offset in [
        0,
        1,
        0x7FF,
        0x800, // low half sign-extends negative: hi must carry.
        0xFFF,
        0x1000,
        -1,
        -0x800,
        -0x1234,
        0x7FFF_F7FF,
        -0x8000_0000,
    ] {
        let (hi, lo) = split_hi_lo(offset).unwrap();
        let rebuilt = (i64::from(hi as i32) << 12).wrapping_add(i64::from(lo));
        // hi is a 20-bit field; reconstruction is modulo 32 bits.
        assert_eq!(rebuilt as i32 as i64, offset, "offset {offset:#x}");
    }
}

#[test]
fn split_hi_lo_rejects_beyond_32_bits() {
    assert!(split_hi_lo(1 << 32).is_err());
    assert!(split_hi_lo(-(1 << 32)).is_err());
}
