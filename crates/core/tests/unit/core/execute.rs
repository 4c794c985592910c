//! Execution engine tests.
//!
//! Programs are encoded with the crate's own codec, loaded at address zero,
//! and stepped through the full fetch/decode/execute path.

use pretty_assertions::assert_eq;

use rivet_core::common::error::ExecError;
use rivet_core::core::Effect;
use rivet_core::isa::field::{FieldLabel, OperandMap};
use rivet_core::isa::imm;
use rivet_core::isa::kind::Kind;

use crate::common::{assemble, cpu_with_program};

fn r_word(kind: Kind, rd: u32, rs1: u32, rs2: u32) -> u32 {
    assemble(
        kind,
        &[
            (FieldLabel::Rd, rd),
            (FieldLabel::Rs1, rs1),
            (FieldLabel::Rs2, rs2),
        ],
    )
}

fn i_word(kind: Kind, rd: u32, rs1: u32, imm12: u32) -> u32 {
    assemble(
        kind,
        &[
            (FieldLabel::Rd, rd),
            (FieldLabel::Rs1, rs1),
            (FieldLabel::Imm12, imm12),
        ],
    )
}

// ══════════════════════════════════════════════════════════
// 1. Arithmetic
// ══════════════════════════════════════════════════════════

/// The reference example: `add x1, x2, x3` with 5 and 7 produces 12 and
/// advances the pc by one word.
#[test]
fn add_advances_pc_and_writes_sum() {
    let mut cpu = cpu_with_program(&[0x0031_00B3]);
    cpu.regs.write(2, 5);
    cpu.regs.write(3, 7);

    assert_eq!(cpu.step().unwrap(), Effect::None);
    assert_eq!(cpu.regs.read(1), 12);
    assert_eq!(cpu.pc, 4);
}

#[test]
fn writes_to_x0_are_discarded() {
    let mut cpu = cpu_with_program(&[i_word(Kind::Addi, 0, 0, 42)]);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(0), 0);
}

#[test]
fn addition_wraps_modulo_64_bits() {
    let mut cpu = cpu_with_program(&[r_word(Kind::Add, 1, 2, 3)]);
    cpu.regs.write(2, u64::MAX);
    cpu.regs.write(3, 2);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 1);
}

/// Word-sized ops truncate to 32 bits and sign-extend the result.
#[test]
fn addw_truncates_and_sign_extends() {
    let mut cpu = cpu_with_program(&[r_word(Kind::Addw, 1, 2, 3)]);
    cpu.regs.write(2, 0x7FFF_FFFF);
    cpu.regs.write(3, 1);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn comparisons_distinguish_signedness() {
    let mut cpu = cpu_with_program(&[
        r_word(Kind::Slt, 1, 2, 3),
        r_word(Kind::Sltu, 4, 2, 3),
    ]);
    cpu.regs.write(2, u64::MAX); // -1 signed, huge unsigned.
    cpu.regs.write(3, 1);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 1);
    assert_eq!(cpu.regs.read(4), 0);
}

#[test]
fn shifts_use_six_bit_amounts() {
    let mut cpu = cpu_with_program(&[
        r_word(Kind::Sll, 1, 2, 3),
        r_word(Kind::Sra, 4, 2, 5),
    ]);
    cpu.regs.write(2, 0x8000_0000_0000_0000);
    cpu.regs.write(3, 64 + 1); // only the low six bits count.
    cpu.regs.write(5, 63);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 0);
    assert_eq!(cpu.regs.read(4), u64::MAX);
}

// ══════════════════════════════════════════════════════════
// 2. Division conventions
// ══════════════════════════════════════════════════════════

/// Division by zero: all-ones quotient, dividend remainder. Never traps.
#[test]
fn division_by_zero_follows_convention() {
    let mut cpu = cpu_with_program(&[
        r_word(Kind::Div, 1, 2, 3),
        r_word(Kind::Rem, 4, 2, 3),
        r_word(Kind::Divu, 5, 2, 3),
        r_word(Kind::Remu, 6, 2, 3),
    ]);
    cpu.regs.write(2, 1234);
    cpu.regs.write(3, 0);
    for _ in 0..4 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.regs.read(1), u64::MAX);
    assert_eq!(cpu.regs.read(4), 1234);
    assert_eq!(cpu.regs.read(5), u64::MAX);
    assert_eq!(cpu.regs.read(6), 1234);
}

/// Signed overflow (`MIN / -1`): dividend quotient, zero remainder.
#[test]
fn division_overflow_follows_convention() {
    let mut cpu = cpu_with_program(&[
        r_word(Kind::Div, 1, 2, 3),
        r_word(Kind::Rem, 4, 2, 3),
    ]);
    cpu.regs.write(2, i64::MIN as u64);
    cpu.regs.write(3, -1_i64 as u64);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), i64::MIN as u64);
    assert_eq!(cpu.regs.read(4), 0);
}

#[test]
fn divw_works_on_32_bit_values() {
    let mut cpu = cpu_with_program(&[
        r_word(Kind::Divw, 1, 2, 3),
        r_word(Kind::Remw, 4, 2, 3),
    ]);
    cpu.regs.write(2, (-7_i64) as u64);
    cpu.regs.write(3, 2);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1) as i64, -3);
    assert_eq!(cpu.regs.read(4) as i64, -1);
}

#[test]
fn mulh_returns_high_half() {
    let mut cpu = cpu_with_program(&[
        r_word(Kind::Mulhu, 1, 2, 3),
        r_word(Kind::Mulh, 4, 2, 3),
    ]);
    cpu.regs.write(2, u64::MAX);
    cpu.regs.write(3, u64::MAX);
    cpu.step().unwrap();
    cpu.step().unwrap();
    // (2^64-1)^2 = 2^128 - 2^65 + 1: high half is 2^64 - 2.
    assert_eq!(cpu.regs.read(1), u64::MAX - 1);
    // (-1) * (-1) = 1: high half is zero.
    assert_eq!(cpu.regs.read(4), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Control flow
// ══════════════════════════════════════════════════════════

#[test]
fn jal_links_and_jumps() {
    let field = imm::encode_j(16).unwrap();
    let word = assemble(Kind::Jal, &[(FieldLabel::Rd, 1), (FieldLabel::Imm20, field)]);
    let mut cpu = cpu_with_program(&[word]);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 4);
    assert_eq!(cpu.pc, 16);
}

/// `jalr` clears the low bit of the computed target.
#[test]
fn jalr_masks_target_low_bit() {
    let mut cpu = cpu_with_program(&[i_word(Kind::Jalr, 1, 2, 1)]);
    cpu.regs.write(2, 0x100);
    cpu.step().unwrap();
    assert_eq!(cpu.pc, 0x100);
    assert_eq!(cpu.regs.read(1), 4);
}

#[test]
fn branches_follow_taken_and_fallthrough_paths() {
    let (hi7, lo5) = imm::encode_b(8).unwrap();
    let blt = assemble(
        Kind::Blt,
        &[
            (FieldLabel::Rs1, 2),
            (FieldLabel::Rs2, 3),
            (FieldLabel::ImmHi7, hi7),
            (FieldLabel::ImmLo5, lo5),
        ],
    );
    // -1 < 1 signed: taken.
    let mut cpu = cpu_with_program(&[blt]);
    cpu.regs.write(2, u64::MAX);
    cpu.regs.write(3, 1);
    cpu.step().unwrap();
    assert_eq!(cpu.pc, 8);

    // 1 < -1 signed is false: fall through.
    let mut cpu = cpu_with_program(&[blt]);
    cpu.regs.write(2, 1);
    cpu.regs.write(3, u64::MAX);
    cpu.step().unwrap();
    assert_eq!(cpu.pc, 4);
}

#[test]
fn backward_branches_wrap_the_pc() {
    let (hi7, lo5) = imm::encode_b(-8).unwrap();
    let beq = assemble(
        Kind::Beq,
        &[
            (FieldLabel::Rs1, 0),
            (FieldLabel::Rs2, 0),
            (FieldLabel::ImmHi7, hi7),
            (FieldLabel::ImmLo5, lo5),
        ],
    );
    let mut cpu = cpu_with_program(&[0x0000_0013, 0x0000_0013, beq]); // two nops.
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.pc, 0);
}

// ══════════════════════════════════════════════════════════
// 4. Memory operations
// ══════════════════════════════════════════════════════════

#[test]
fn store_then_load_round_trips() {
    let (hi7, lo5) = imm::encode_s(0).unwrap();
    let sd = assemble(
        Kind::Sd,
        &[
            (FieldLabel::Rs1, 2),
            (FieldLabel::Rs2, 3),
            (FieldLabel::ImmHi7, hi7),
            (FieldLabel::ImmLo5, lo5),
        ],
    );
    let ld = i_word(Kind::Ld, 4, 2, 0);
    let mut cpu = cpu_with_program(&[sd, ld]);
    cpu.regs.write(2, 0x1000);
    cpu.regs.write(3, 0xDEAD_BEEF_CAFE_F00D);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(4), 0xDEAD_BEEF_CAFE_F00D);
}

/// Sub-word loads sign- or zero-extend as their mnemonic dictates.
#[test]
fn narrow_loads_extend_correctly() {
    let (hi7, lo5) = imm::encode_s(0).unwrap();
    let sw = assemble(
        Kind::Sw,
        &[
            (FieldLabel::Rs1, 2),
            (FieldLabel::Rs2, 3),
            (FieldLabel::ImmHi7, hi7),
            (FieldLabel::ImmLo5, lo5),
        ],
    );
    let mut cpu = cpu_with_program(&[
        sw,
        i_word(Kind::Lb, 4, 2, 0),
        i_word(Kind::Lbu, 5, 2, 0),
        i_word(Kind::Lh, 6, 2, 0),
        i_word(Kind::Lhu, 7, 2, 0),
        i_word(Kind::Lw, 8, 2, 0),
        i_word(Kind::Lwu, 9, 2, 0),
    ]);
    cpu.regs.write(2, 0x2000);
    cpu.regs.write(3, 0xFFFF_8080);
    for _ in 0..7 {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.regs.read(4) as i64, -128);
    assert_eq!(cpu.regs.read(5), 0x80);
    assert_eq!(cpu.regs.read(6) as i64, -32640);
    assert_eq!(cpu.regs.read(7), 0x8080);
    assert_eq!(cpu.regs.read(8), 0xFFFF_FFFF_FFFF_8080);
    assert_eq!(cpu.regs.read(9), 0xFFFF_8080);
}

// ══════════════════════════════════════════════════════════
// 5. Effects and errors
// ══════════════════════════════════════════════════════════

#[test]
fn system_instructions_surface_effects() {
    let mut cpu = cpu_with_program(&[0x0000_0073, 0x0010_0073]);
    assert_eq!(cpu.step().unwrap(), Effect::EnvironmentCall);
    assert_eq!(cpu.step().unwrap(), Effect::Breakpoint);
    assert_eq!(cpu.pc, 8);
}

#[test]
fn unrecognized_words_report_pc_and_leave_it_unchanged() {
    let mut cpu = cpu_with_program(&[0xFFFF_FFFF]);
    let err = cpu.step().unwrap_err();
    assert_eq!(
        err,
        ExecError::Unrecognized {
            word: 0xFFFF_FFFF,
            pc: 0,
        }
    );
    assert_eq!(cpu.pc, 0);
}

#[test]
fn pseudo_instructions_are_rejected_by_execute() {
    let mut cpu = cpu_with_program(&[]);
    let err = cpu.execute(Kind::Li, &OperandMap::new()).unwrap_err();
    assert_eq!(err, ExecError::NotExpanded(Kind::Li));
}

/// An expanded `li` sequence, executed for real, materializes the constant
/// for values whose fragments carry no high `ori` bits.
#[test]
fn executed_li_expansion_materializes_aligned_constants() {
    let value = 0x0123_4000_5000_6000_i64;
    let seq = rivet_core::isa::pseudo::expand(
        Kind::Li,
        &OperandMap::from_pairs(&[(FieldLabel::Rd, 5)]),
        value,
        0,
    )
    .unwrap();
    let words: Vec<u32> = seq
        .iter()
        .map(|(kind, ops)| rivet_core::isa::codec::encode(*kind, ops).unwrap())
        .collect();
    let mut cpu = cpu_with_program(&words);
    for _ in 0..words.len() {
        cpu.step().unwrap();
    }
    assert_eq!(cpu.regs.read(5), value as u64);
}

#[test]
fn counters_track_retired_instructions() {
    let mut cpu = cpu_with_program(&[0x0000_0013, 0x0000_0013]); // nops.
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.csrs.minstret, 2);
    assert_eq!(cpu.csrs.mcycle, 2);
}

/// A register-index operand wider than its 5-bit field is truncated to the
/// field width, the same way encoding truncates it, instead of faulting.
#[test]
fn oversized_register_index_is_masked() {
    let mut cpu = cpu_with_program(&[]);
    cpu.regs.write(2, 5);
    cpu.regs.write(3, 7);
    let ops = OperandMap::from_pairs(&[
        (FieldLabel::Rd, 40), // 40 & 0x1F == 8
        (FieldLabel::Rs1, 2),
        (FieldLabel::Rs2, 3),
    ]);
    assert_eq!(cpu.execute(Kind::Add, &ops), Ok(Effect::None));
    assert_eq!(cpu.regs.read(8), 12);
}

/// A shift amount wider than its field is truncated to the field width
/// rather than overflowing the shift.
#[test]
fn oversized_shift_amount_is_masked() {
    let mut cpu = cpu_with_program(&[]);
    cpu.regs.write(2, 1);
    let ops = OperandMap::from_pairs(&[
        (FieldLabel::Rd, 1),
        (FieldLabel::Rs1, 2),
        (FieldLabel::Shamt, 200), // 200 & 0x3F == 8
    ]);
    assert_eq!(cpu.execute(Kind::Slli, &ops), Ok(Effect::None));
    assert_eq!(cpu.regs.read(1), 1 << 8);

    let ops = OperandMap::from_pairs(&[
        (FieldLabel::Rd, 1),
        (FieldLabel::Rs1, 2),
        (FieldLabel::ShamtW, 33), // 33 & 0x1F == 1
    ]);
    assert_eq!(cpu.execute(Kind::Slliw, &ops), Ok(Effect::None));
    assert_eq!(cpu.regs.read(1), 2);
}

/// Reset clears core state but leaves memory contents alone.
#[test]
fn reset_preserves_memory() {
    let mut cpu = cpu_with_program(&[i_word(Kind::Addi, 1, 0, 42)]);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 42);

    cpu.reset();
    assert_eq!(cpu.regs.read(1), 0);
    assert_eq!(cpu.pc, 0);
    assert_eq!(cpu.csrs.minstret, 0);

    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 42);
}
