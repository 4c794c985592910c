//! CSR access rule tests.
//!
//! The CSR address encodes its own access rules: bits 9:8 are the minimum
//! privilege and bits 11:10 both set marks the read-only range. Both are
//! enforced strictly, before any side effect.

use pretty_assertions::assert_eq;

use rivet_core::common::error::CsrError;
use rivet_core::core::arch::csr::{self, Csrs};
use rivet_core::core::arch::PrivilegeMode;
use rivet_core::core::Effect;
use rivet_core::isa::field::{FieldLabel, OperandMap};
use rivet_core::isa::kind::Kind;

use crate::common::{assemble, cpu_with_program};

// ══════════════════════════════════════════════════════════
// 1. Address-encoded access rules
// ══════════════════════════════════════════════════════════

#[test]
fn privilege_is_encoded_in_address_bits() {
    assert_eq!(Csrs::required_privilege(csr::CYCLE), PrivilegeMode::User);
    assert_eq!(Csrs::required_privilege(0x100), PrivilegeMode::Supervisor);
    assert_eq!(Csrs::required_privilege(csr::MSTATUS), PrivilegeMode::Machine);
    assert_eq!(Csrs::required_privilege(csr::MVENDORID), PrivilegeMode::Machine);
}

#[test]
fn read_only_range_is_top_two_bits() {
    assert!(Csrs::is_read_only(csr::CYCLE));
    assert!(Csrs::is_read_only(csr::MVENDORID));
    assert!(!Csrs::is_read_only(csr::MSTATUS));
    assert!(!Csrs::is_read_only(csr::MCYCLE));
}

#[test]
fn user_mode_cannot_touch_machine_csrs() {
    let csrs = Csrs::new();
    let err = csrs.read_checked(csr::MSTATUS, PrivilegeMode::User).unwrap_err();
    assert_eq!(
        err,
        CsrError::PrivilegeViolation {
            addr: csr::MSTATUS,
            required: PrivilegeMode::Machine,
            current: PrivilegeMode::User,
        }
    );
}

#[test]
fn user_mode_can_read_counters() {
    let mut csrs = Csrs::new();
    csrs.mcycle = 77;
    assert_eq!(csrs.read_checked(csr::CYCLE, PrivilegeMode::User).unwrap(), 77);
    assert_eq!(
        csrs.read_checked(csr::INSTRET, PrivilegeMode::User).unwrap(),
        0
    );
}

#[test]
fn read_only_csrs_reject_writes_at_any_privilege() {
    let mut csrs = Csrs::new();
    let err = csrs
        .write_checked(csr::CYCLE, 1, PrivilegeMode::Machine)
        .unwrap_err();
    assert_eq!(err, CsrError::ReadOnly { addr: csr::CYCLE });
}

#[test]
fn machine_mode_reads_and_writes_machine_csrs() {
    let mut csrs = Csrs::new();
    csrs.write_checked(csr::MSCRATCH, 0xABCD, PrivilegeMode::Machine)
        .unwrap();
    assert_eq!(
        csrs.read_checked(csr::MSCRATCH, PrivilegeMode::Machine).unwrap(),
        0xABCD
    );
}

#[test]
fn unimplemented_csrs_read_zero_and_swallow_writes() {
    let mut csrs = Csrs::new();
    csrs.write(0x345, 99);
    assert_eq!(csrs.read(0x345), 0);
}

// ══════════════════════════════════════════════════════════
// 2. CSR instruction semantics
// ══════════════════════════════════════════════════════════

fn csr_word(kind: Kind, rd: u32, rs1: u32, addr: u32) -> u32 {
    assemble(
        kind,
        &[
            (FieldLabel::Rd, rd),
            (FieldLabel::Rs1, rs1),
            (FieldLabel::Csr, addr),
        ],
    )
}

/// `csrrw` swaps: old value to `rd`, register value into the CSR.
#[test]
fn csrrw_swaps_register_and_csr() {
    let mut cpu = cpu_with_program(&[csr_word(Kind::Csrrw, 1, 2, csr::MSCRATCH)]);
    cpu.csrs.mscratch = 0x11;
    cpu.regs.write(2, 0x22);
    assert_eq!(cpu.step().unwrap(), Effect::None);
    assert_eq!(cpu.regs.read(1), 0x11);
    assert_eq!(cpu.csrs.mscratch, 0x22);
}

/// `csrrs` with `rs1 = x0` is a pure read: no write is attempted, so even
/// read-only CSRs are accessible.
#[test]
fn csrrs_with_x0_reads_read_only_csrs() {
    let mut cpu = cpu_with_program(&[csr_word(Kind::Csrrs, 1, 0, csr::CYCLE)]);
    cpu.csrs.mcycle = 5;
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 5);
}

#[test]
fn csrrs_and_csrrc_mask_bits() {
    let mut cpu = cpu_with_program(&[
        csr_word(Kind::Csrrs, 1, 2, csr::MSCRATCH),
        csr_word(Kind::Csrrc, 3, 4, csr::MSCRATCH),
    ]);
    cpu.csrs.mscratch = 0b1010;
    cpu.regs.write(2, 0b0101);
    cpu.regs.write(4, 0b0011);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(1), 0b1010);
    assert_eq!(cpu.csrs.mscratch, 0b1111);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(3), 0b1111);
    assert_eq!(cpu.csrs.mscratch, 0b1100);
}

/// Immediate forms use the zero-extended five-bit field as the source.
#[test]
fn csr_immediate_forms_use_uimm() {
    let word = assemble(
        Kind::Csrrwi,
        &[
            (FieldLabel::Rd, 1),
            (FieldLabel::Uimm, 0x1F),
            (FieldLabel::Csr, csr::MSCRATCH),
        ],
    );
    let mut cpu = cpu_with_program(&[word]);
    cpu.step().unwrap();
    assert_eq!(cpu.csrs.mscratch, 0x1F);
}

/// A privilege violation surfaces as an execution error and the pc stays.
#[test]
fn csr_access_from_user_mode_faults() {
    let mut cpu = cpu_with_program(&[csr_word(Kind::Csrrw, 1, 2, csr::MSTATUS)]);
    cpu.mode = PrivilegeMode::User;
    assert!(cpu.step().is_err());
    assert_eq!(cpu.pc, 0);
}

#[test]
fn misa_reports_rv64im() {
    let csrs = Csrs::new();
    let misa = csrs.read(csr::MISA);
    assert_eq!(misa >> 62, 2); // 64-bit.
    assert_ne!(misa & (1 << 8), 0); // I.
    assert_ne!(misa & (1 << 12), 0); // M.
}
