//! Immediate encoding helpers.
//!
//! This module implements the immediate bit shuffles and splits the base
//! encoding applies on top of the contiguous field layouts. It provides:
//! 1. **Sign Extension:** Widening an N-bit two's-complement value to `i64`.
//! 2. **Branch Shuffle:** The split 13-bit branch offset spread across the
//!    high-7/low-5 immediate fragments.
//! 3. **Jump Shuffle:** The scrambled 21-bit jump offset packed into a single
//!    20-bit field.
//! 4. **Hi/Lo Split:** The carry-corrected upper-20/lower-12 decomposition
//!    used by `auipc`-based address materialization.

use crate::common::error::ImmOverflow;

/// Sign-extends the low `bits` bits of `value` to an `i64`.
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    debug_assert!(bits > 0 && bits <= 64);
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Packs a branch offset into the high-7/low-5 immediate fragments.
///
/// The offset must be even and representable in 13 signed bits (±4 KiB).
/// The fragments carry, most-significant first:
/// `hi7 = offset[12] ++ offset[10:5]`, `lo5 = offset[4:1] ++ offset[11]`.
///
/// # Errors
///
/// Returns [`ImmOverflow`] when the offset is odd or out of range.
pub fn encode_b(offset: i64) -> Result<(u32, u32), ImmOverflow> {
    if offset % 2 != 0 || offset < -0x1000 || offset > 0xFFE {
        return Err(ImmOverflow {
            value: offset,
            bits: 13,
        });
    }
    let imm = offset as u64;
    let hi7 = (((imm >> 12) & 0x1) << 6) | ((imm >> 5) & 0x3F);
    let lo5 = (((imm >> 1) & 0xF) << 1) | ((imm >> 11) & 0x1);
    Ok((hi7 as u32, lo5 as u32))
}

/// Reassembles a branch offset from its immediate fragments.
pub fn decode_b(hi7: u32, lo5: u32) -> i64 {
    let hi7 = u64::from(hi7);
    let lo5 = u64::from(lo5);
    let imm = (((hi7 >> 6) & 0x1) << 12)
        | ((lo5 & 0x1) << 11)
        | ((hi7 & 0x3F) << 5)
        | (((lo5 >> 1) & 0xF) << 1);
    sign_extend(imm, 13)
}

/// Packs a store offset into the high-7/low-5 immediate fragments.
///
/// Unlike the branch shuffle, the store split is a plain concatenation:
/// `hi7 = offset[11:5]`, `lo5 = offset[4:0]`. The offset must fit 12 signed
/// bits.
///
/// # Errors
///
/// Returns [`ImmOverflow`] when the offset is out of range.
pub fn encode_s(offset: i64) -> Result<(u32, u32), ImmOverflow> {
    if offset < -0x800 || offset > 0x7FF {
        return Err(ImmOverflow {
            value: offset,
            bits: 12,
        });
    }
    let imm = offset as u64;
    Ok((((imm >> 5) & 0x7F) as u32, (imm & 0x1F) as u32))
}

/// Reassembles a store offset from its immediate fragments.
pub fn decode_s(hi7: u32, lo5: u32) -> i64 {
    sign_extend(u64::from((hi7 << 5) | (lo5 & 0x1F)), 12)
}

/// Packs a jump offset into the scrambled 20-bit jump field.
///
/// The offset must be even and representable in 21 signed bits (±1 MiB).
/// The field carries, most-significant first:
/// `offset[20] ++ offset[10:1] ++ offset[11] ++ offset[19:12]`.
///
/// # Errors
///
/// Returns [`ImmOverflow`] when the offset is odd or out of range.
pub fn encode_j(offset: i64) -> Result<u32, ImmOverflow> {
    if offset % 2 != 0 || offset < -0x10_0000 || offset > 0xF_FFFE {
        return Err(ImmOverflow {
            value: offset,
            bits: 21,
        });
    }
    let imm = offset as u64;
    let field = (((imm >> 20) & 0x1) << 19)
        | (((imm >> 1) & 0x3FF) << 9)
        | (((imm >> 11) & 0x1) << 8)
        | ((imm >> 12) & 0xFF);
    Ok(field as u32)
}

/// Reassembles a jump offset from the scrambled 20-bit jump field.
pub fn decode_j(field: u32) -> i64 {
    let field = u64::from(field);
    let imm = (((field >> 19) & 0x1) << 20)
        | ((field & 0xFF) << 12)
        | (((field >> 8) & 0x1) << 11)
        | (((field >> 9) & 0x3FF) << 1);
    sign_extend(imm, 21)
}

/// Splits an offset into a carry-corrected upper-20 and signed lower-12 part.
///
/// Adding `(hi << 12) + lo` with `lo` sign-extended reproduces the original
/// offset: the upper part absorbs the carry generated when the low 12 bits
/// sign-extend negative.
///
/// # Errors
///
/// Returns [`ImmOverflow`] when the offset exceeds the ±2 GiB reach of the
/// `auipc` pair.
pub fn split_hi_lo(offset: i64) -> Result<(u32, i32), ImmOverflow> {
    if i32::try_from(offset).is_err() {
        return Err(ImmOverflow {
            value: offset,
            bits: 32,
        });
    }
    let hi = (((offset + 0x800) >> 12) & 0xF_FFFF) as u32;
    let lo = sign_extend(offset as u64, 12) as i32;
    Ok((hi, lo))
}
