//! Pseudo-instruction expansion.
//!
//! This module lowers pseudo-instructions into sequences of real
//! instructions before execution. It provides:
//! 1. **Aliases:** Single-instruction rewrites (`mv`, `not`, `neg`, `seqz`,
//!    `snez`, `nop`, `j`, `jr`, `ret`, and the compare-to-zero branches).
//! 2. **Address Materialization:** The `auipc`-based two-instruction pairs
//!    for `la`, `call`, and `tail`.
//! 3. **Constant Materialization:** The width-classed `lui`/`ori`/`slli`
//!    sequence for `li`, up to eight instructions for a full 64-bit constant.
//!
//! Expansion is position-dependent: pc-relative pseudos receive the address
//! the sequence will occupy and compute their offsets against it.

use crate::common::error::ExpandError;

use super::abi::{REG_RA, REG_T1, REG_ZERO};
use super::field::{FieldLabel, OperandMap};
use super::imm;
use super::kind::Kind;

/// Expands a pseudo-instruction into real `(kind, operands)` pairs.
///
/// `value` carries the pseudo's immediate: the literal constant for `li`,
/// the absolute target address for `la`, `call`, `tail`, `j`, and the
/// compare-to-zero branches, and is ignored by pure register aliases.
/// `addr` is the address the expanded sequence will occupy; pc-relative
/// pseudos compute their offsets against it.
///
/// # Errors
///
/// Returns [`ExpandError::NotPseudo`] for real instructions,
/// [`ExpandError::MissingOperand`] when a register operand is absent, and
/// [`ExpandError::Immediate`] when a pc-relative target is out of reach.
pub fn expand(
    kind: Kind,
    ops: &OperandMap,
    value: i64,
    addr: u64,
) -> Result<Vec<(Kind, OperandMap)>, ExpandError> {
    let offset = || value.wrapping_sub(addr as i64);

    match kind {
        Kind::Nop => Ok(vec![i_type(Kind::Addi, REG_ZERO, REG_ZERO, 0)]),
        Kind::Mv => {
            let (rd, rs) = reg_pair(kind, ops)?;
            Ok(vec![i_type(Kind::Addi, rd, rs, 0)])
        }
        Kind::Not => {
            let (rd, rs) = reg_pair(kind, ops)?;
            Ok(vec![i_type(Kind::Xori, rd, rs, 0xFFF)])
        }
        Kind::Neg => {
            let (rd, rs) = reg_pair(kind, ops)?;
            Ok(vec![r_type(Kind::Sub, rd, REG_ZERO, rs)])
        }
        Kind::Seqz => {
            let (rd, rs) = reg_pair(kind, ops)?;
            Ok(vec![i_type(Kind::Sltiu, rd, rs, 1)])
        }
        Kind::Snez => {
            let (rd, rs) = reg_pair(kind, ops)?;
            Ok(vec![r_type(Kind::Sltu, rd, REG_ZERO, rs)])
        }
        Kind::Li => {
            let rd = req(kind, ops, FieldLabel::Rd)?;
            Ok(expand_li(rd, value))
        }
        Kind::La => {
            let rd = req(kind, ops, FieldLabel::Rd)?;
            let (hi, lo) = imm::split_hi_lo(offset())?;
            Ok(vec![
                u_type(Kind::Auipc, rd, hi),
                i_type(Kind::Addi, rd, rd, lo12(lo)),
            ])
        }
        Kind::Call => {
            let (hi, lo) = imm::split_hi_lo(offset())?;
            Ok(vec![
                u_type(Kind::Auipc, REG_RA, hi),
                i_type(Kind::Jalr, REG_RA, REG_RA, lo12(lo)),
            ])
        }
        Kind::Tail => {
            let (hi, lo) = imm::split_hi_lo(offset())?;
            Ok(vec![
                u_type(Kind::Auipc, REG_T1, hi),
                i_type(Kind::Jalr, REG_ZERO, REG_T1, lo12(lo)),
            ])
        }
        Kind::J => {
            let field = imm::encode_j(offset())?;
            Ok(vec![u_type(Kind::Jal, REG_ZERO, field)])
        }
        Kind::Jr => {
            let rs = req(kind, ops, FieldLabel::Rs1)?;
            Ok(vec![i_type(Kind::Jalr, REG_ZERO, rs, 0)])
        }
        Kind::Ret => Ok(vec![i_type(Kind::Jalr, REG_ZERO, REG_RA, 0)]),
        Kind::Beqz => branch_zero(kind, Kind::Beq, ops, offset()),
        Kind::Bnez => branch_zero(kind, Kind::Bne, ops, offset()),
        Kind::Bltz => branch_zero(kind, Kind::Blt, ops, offset()),
        Kind::Bgez => branch_zero(kind, Kind::Bge, ops, offset()),
        _ => Err(ExpandError::NotPseudo(kind)),
    }
}

/// Materializes a 64-bit constant into `rd`.
///
/// The constant is classed by significant width and built from a `lui` high
/// fragment followed by alternating `slli`/`ori` steps that concatenate
/// 12-bit fragments, widest class first:
///
/// | class | high fragment | 12-bit fragments | instructions |
/// |-------|---------------|------------------|--------------|
/// | 20    | bits 31:12    | none             | 1            |
/// | 28    | bits 27:12    | 1                | 2            |
/// | 32    | bits 31:12    | 1                | 2            |
/// | 40    | bits 39:24    | 2                | 4            |
/// | 52    | bits 51:36    | 3                | 6            |
/// | 64    | bits 63:48    | 4                | 8            |
fn expand_li(rd: u32, value: i64) -> Vec<(Kind, OperandMap)> {
    let u = value as u64;
    let sig = significant_bits(value);

    let (hi, frags): (u32, Vec<u64>) = if u & 0xFFF == 0 && sig <= 32 {
        (((u >> 12) & 0xF_FFFF) as u32, vec![])
    } else if sig <= 28 {
        (((u >> 12) & 0xFFFF) as u32, vec![u & 0xFFF])
    } else if sig <= 32 {
        (((u >> 12) & 0xF_FFFF) as u32, vec![u & 0xFFF])
    } else if sig <= 40 {
        (
            ((u >> 24) & 0xFFFF) as u32,
            vec![(u >> 12) & 0xFFF, u & 0xFFF],
        )
    } else if sig <= 52 {
        (
            ((u >> 36) & 0xFFFF) as u32,
            vec![(u >> 24) & 0xFFF, (u >> 12) & 0xFFF, u & 0xFFF],
        )
    } else {
        (
            ((u >> 48) & 0xFFFF) as u32,
            vec![
                (u >> 36) & 0xFFF,
                (u >> 24) & 0xFFF,
                (u >> 12) & 0xFFF,
                u & 0xFFF,
            ],
        )
    };

    let mut out = vec![u_type(Kind::Lui, rd, hi)];
    for (i, &frag) in frags.iter().enumerate() {
        if i > 0 {
            out.push(shift_type(Kind::Slli, rd, rd, 12));
        }
        out.push(i_type(Kind::Ori, rd, rd, frag as u32));
    }
    out
}

/// Number of bits needed to represent `value` in two's complement, counting
/// from the most significant set bit. Negative values always need the full
/// width.
fn significant_bits(value: i64) -> u32 {
    if value < 0 {
        64
    } else if value == 0 {
        0
    } else {
        64 - value.leading_zeros()
    }
}

fn branch_zero(
    pseudo: Kind,
    real: Kind,
    ops: &OperandMap,
    offset: i64,
) -> Result<Vec<(Kind, OperandMap)>, ExpandError> {
    let rs = req(pseudo, ops, FieldLabel::Rs1)?;
    let (hi7, lo5) = imm::encode_b(offset)?;
    Ok(vec![(
        real,
        OperandMap::from_pairs(&[
            (FieldLabel::Rs1, rs),
            (FieldLabel::Rs2, REG_ZERO),
            (FieldLabel::ImmHi7, hi7),
            (FieldLabel::ImmLo5, lo5),
        ]),
    )])
}

fn reg_pair(kind: Kind, ops: &OperandMap) -> Result<(u32, u32), ExpandError> {
    Ok((
        req(kind, ops, FieldLabel::Rd)?,
        req(kind, ops, FieldLabel::Rs1)?,
    ))
}

fn req(kind: Kind, ops: &OperandMap, field: FieldLabel) -> Result<u32, ExpandError> {
    ops.get(field)
        .ok_or(ExpandError::MissingOperand { kind, field })
}

fn lo12(lo: i32) -> u32 {
    (lo as u32) & 0xFFF
}

fn r_type(kind: Kind, rd: u32, rs1: u32, rs2: u32) -> (Kind, OperandMap) {
    (
        kind,
        OperandMap::from_pairs(&[
            (FieldLabel::Rd, rd),
            (FieldLabel::Rs1, rs1),
            (FieldLabel::Rs2, rs2),
        ]),
    )
}

fn i_type(kind: Kind, rd: u32, rs1: u32, imm12: u32) -> (Kind, OperandMap) {
    (
        kind,
        OperandMap::from_pairs(&[
            (FieldLabel::Rd, rd),
            (FieldLabel::Rs1, rs1),
            (FieldLabel::Imm12, imm12),
        ]),
    )
}

fn shift_type(kind: Kind, rd: u32, rs1: u32, shamt: u32) -> (Kind, OperandMap) {
    (
        kind,
        OperandMap::from_pairs(&[
            (FieldLabel::Rd, rd),
            (FieldLabel::Rs1, rs1),
            (FieldLabel::Shamt, shamt),
        ]),
    )
}

fn u_type(kind: Kind, rd: u32, imm20: u32) -> (Kind, OperandMap) {
    (
        kind,
        OperandMap::from_pairs(&[(FieldLabel::Rd, rd), (FieldLabel::Imm20, imm20)]),
    )
}
