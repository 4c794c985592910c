//! Instruction disassembler.
//!
//! Renders decoded instruction words as assembly text. It provides:
//! 1. **Plain Rendering:** [`disassemble`] shows pc-relative targets as raw
//!    offsets.
//! 2. **Located Rendering:** [`disassemble_at`] folds the instruction's
//!    address into branch and jump targets and resolves them to symbol names
//!    when a resolver knows them.
//!
//! Registers are always rendered with their ABI names; immediates are
//! rendered in hexadecimal with an explicit sign.

use super::abi;
use super::codec;
use super::field::{FieldLabel, OperandMap};
use super::imm;
use super::kind::{Format, Kind};

/// Disassembles a word without address context.
///
/// Branch and jump targets render as signed offsets from the instruction.
/// Returns `None` when the word decodes to no known instruction.
pub fn disassemble(word: u32) -> Option<String> {
    let (kind, ops) = codec::decode(word)?;
    Some(render(kind, &ops, None, |_| None))
}

/// Disassembles a word located at `addr`.
///
/// Branch and jump targets are materialized as absolute addresses and passed
/// through `resolve`; a known symbol replaces the numeric target. Returns
/// `None` when the word decodes to no known instruction.
pub fn disassemble_at(
    word: u32,
    addr: u64,
    resolve: impl Fn(u64) -> Option<String>,
) -> Option<String> {
    let (kind, ops) = codec::decode(word)?;
    Some(render(kind, &ops, Some(addr), resolve))
}

fn render(
    kind: Kind,
    ops: &OperandMap,
    addr: Option<u64>,
    resolve: impl Fn(u64) -> Option<String>,
) -> String {
    let m = kind.mnemonic();
    let rd = || reg(ops, FieldLabel::Rd);
    let rs1 = || reg(ops, FieldLabel::Rs1);
    let rs2 = || reg(ops, FieldLabel::Rs2);

    match kind.format() {
        Format::R => format!("{m} {}, {}, {}", rd(), rs1(), rs2()),
        Format::I => format!("{m} {}, {}, {}", rd(), rs1(), imm12(ops)),
        Format::Load => format!("{m} {}, {}({})", rd(), imm12(ops), rs1()),
        Format::Store => {
            let offset = imm::decode_s(
                ops.get(FieldLabel::ImmHi7).unwrap_or(0),
                ops.get(FieldLabel::ImmLo5).unwrap_or(0),
            );
            format!("{m} {}, {}({})", rs2(), signed(offset), rs1())
        }
        Format::JumpReg => format!("{m} {}, {}({})", rd(), imm12(ops), rs1()),
        Format::Shift => format!(
            "{m} {}, {}, {}",
            rd(),
            rs1(),
            ops.get(FieldLabel::Shamt).unwrap_or(0)
        ),
        Format::ShiftW => format!(
            "{m} {}, {}, {}",
            rd(),
            rs1(),
            ops.get(FieldLabel::ShamtW).unwrap_or(0)
        ),
        Format::Branch => {
            let offset = imm::decode_b(
                ops.get(FieldLabel::ImmHi7).unwrap_or(0),
                ops.get(FieldLabel::ImmLo5).unwrap_or(0),
            );
            format!(
                "{m} {}, {}, {}",
                rs1(),
                rs2(),
                target(offset, addr, &resolve)
            )
        }
        Format::Upper => format!(
            "{m} {}, {}",
            rd(),
            signed(i64::from(ops.get(FieldLabel::Imm20).unwrap_or(0)))
        ),
        Format::Jump => {
            let offset = imm::decode_j(ops.get(FieldLabel::Imm20).unwrap_or(0));
            format!("{m} {}, {}", rd(), target(offset, addr, &resolve))
        }
        Format::Csr => format!(
            "{m} {}, {:#x}, {}",
            rd(),
            ops.get(FieldLabel::Csr).unwrap_or(0),
            rs1()
        ),
        Format::CsrImm => format!(
            "{m} {}, {:#x}, {}",
            rd(),
            ops.get(FieldLabel::Csr).unwrap_or(0),
            ops.get(FieldLabel::Uimm).unwrap_or(0)
        ),
        Format::System | Format::Fence | Format::Pseudo => m.to_owned(),
    }
}

/// Renders a pc-relative target: a resolved symbol, an absolute address when
/// the instruction's location is known, or the raw offset otherwise.
fn target(offset: i64, addr: Option<u64>, resolve: &impl Fn(u64) -> Option<String>) -> String {
    match addr {
        Some(addr) => {
            let dest = addr.wrapping_add(offset as u64);
            resolve(dest).unwrap_or_else(|| format!("{dest:#x}"))
        }
        None => signed(offset),
    }
}

fn reg(ops: &OperandMap, label: FieldLabel) -> &'static str {
    ops.get(label)
        .and_then(abi::name)
        .unwrap_or("?")
}

fn imm12(ops: &OperandMap) -> String {
    signed(imm::sign_extend(
        u64::from(ops.get(FieldLabel::Imm12).unwrap_or(0)),
        12,
    ))
}

fn signed(value: i64) -> String {
    if value < 0 {
        format!("-{:#x}", value.unsigned_abs())
    } else {
        format!("{value:#x}")
    }
}
