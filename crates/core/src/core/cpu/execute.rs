//! Instruction execution engine.
//!
//! Implements the architectural semantics of every real instruction kind.
//! Pseudo-instructions are rejected here; they must be lowered by
//! [`crate::isa::pseudo`] before they reach the core.
//!
//! Division follows the architectural conventions for exceptional operands:
//! division by zero yields an all-ones quotient and leaves the dividend as
//! the remainder, and signed overflow (`MIN / -1`) yields the dividend as
//! the quotient with a zero remainder. No divide ever traps.

use crate::common::error::ExecError;
use crate::isa::field::{FieldLabel, OperandMap};
use crate::isa::imm;
use crate::isa::kind::Kind;

use super::Cpu;

/// Observable side effect of one executed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Normal completion.
    None,
    /// An `ecall` requested service from the execution environment.
    EnvironmentCall,
    /// An `ebreak` requested a debugger stop.
    Breakpoint,
}

/// Fetches a required operand, truncated to its field width the same way
/// encoding truncates oversized values. Register indices and shift amounts
/// in particular must never reach the datapath wider than their field.
fn req(kind: Kind, ops: &OperandMap, field: FieldLabel) -> Result<u32, ExecError> {
    let value = ops
        .get(field)
        .ok_or(ExecError::MissingOperand { kind, field })?;
    Ok(value & ((1 << field.max_width()) - 1))
}

/// Truncates to 32 bits and sign-extends back to 64, the common epilogue of
/// every word-sized (`*w`) operation.
fn sext32(value: u64) -> u64 {
    value as u32 as i32 as i64 as u64
}

fn div_signed(a: i64, b: i64) -> i64 {
    if b == 0 {
        -1
    } else if a == i64::MIN && b == -1 {
        a
    } else {
        a.wrapping_div(b)
    }
}

fn rem_signed(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else if a == i64::MIN && b == -1 {
        0
    } else {
        a.wrapping_rem(b)
    }
}

fn div_unsigned(a: u64, b: u64) -> u64 {
    if b == 0 { u64::MAX } else { a / b }
}

fn rem_unsigned(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { a % b }
}

fn div_signed32(a: i32, b: i32) -> i32 {
    if b == 0 {
        -1
    } else if a == i32::MIN && b == -1 {
        a
    } else {
        a.wrapping_div(b)
    }
}

fn rem_signed32(a: i32, b: i32) -> i32 {
    if b == 0 {
        a
    } else if a == i32::MIN && b == -1 {
        0
    } else {
        a.wrapping_rem(b)
    }
}

fn div_unsigned32(a: u32, b: u32) -> u32 {
    if b == 0 { u32::MAX } else { a / b }
}

fn rem_unsigned32(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { a % b }
}

impl Cpu {
    /// Executes one decoded instruction, updating registers, memory, CSRs,
    /// and the program counter.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::NotExpanded`] for pseudo-instructions,
    /// [`ExecError::MissingOperand`] when the operand map lacks a required
    /// field, and propagates memory and CSR failures. The program counter
    /// is not advanced on error.
    #[allow(clippy::too_many_lines)]
    pub fn execute(&mut self, kind: Kind, ops: &OperandMap) -> Result<Effect, ExecError> {
        if kind.is_pseudo() {
            return Err(ExecError::NotExpanded(kind));
        }

        let mut next = self.pc.wrapping_add(4);
        let mut effect = Effect::None;

        match kind {
            Kind::Lui => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let imm = req(kind, ops, FieldLabel::Imm20)?;
                self.regs
                    .write(rd as usize, sext32(u64::from(imm) << 12));
            }
            Kind::Auipc => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let imm = req(kind, ops, FieldLabel::Imm20)?;
                let offset = imm::sign_extend(u64::from(imm) << 12, 32);
                self.regs
                    .write(rd as usize, self.pc.wrapping_add(offset as u64));
            }
            Kind::Jal => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let offset = imm::decode_j(req(kind, ops, FieldLabel::Imm20)?);
                self.regs.write(rd as usize, next);
                next = self.pc.wrapping_add(offset as u64);
            }
            Kind::Jalr => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let rs1 = req(kind, ops, FieldLabel::Rs1)?;
                let offset = imm::sign_extend(u64::from(req(kind, ops, FieldLabel::Imm12)?), 12);
                let target = self
                    .regs
                    .read(rs1 as usize)
                    .wrapping_add(offset as u64)
                    & !1;
                self.regs.write(rd as usize, next);
                next = target;
            }
            Kind::Beq | Kind::Bne | Kind::Blt | Kind::Bge | Kind::Bltu | Kind::Bgeu => {
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize);
                let b = self.regs.read(req(kind, ops, FieldLabel::Rs2)? as usize);
                let offset = imm::decode_b(
                    req(kind, ops, FieldLabel::ImmHi7)?,
                    req(kind, ops, FieldLabel::ImmLo5)?,
                );
                let taken = match kind {
                    Kind::Beq => a == b,
                    Kind::Bne => a != b,
                    Kind::Blt => (a as i64) < (b as i64),
                    Kind::Bge => (a as i64) >= (b as i64),
                    Kind::Bltu => a < b,
                    _ => a >= b,
                };
                if taken {
                    next = self.pc.wrapping_add(offset as u64);
                }
            }
            Kind::Lb | Kind::Lh | Kind::Lw | Kind::Ld | Kind::Lbu | Kind::Lhu | Kind::Lwu => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let rs1 = req(kind, ops, FieldLabel::Rs1)?;
                let offset = imm::sign_extend(u64::from(req(kind, ops, FieldLabel::Imm12)?), 12);
                let addr = self.regs.read(rs1 as usize).wrapping_add(offset as u64);
                let value = match kind {
                    Kind::Lb => self.mem.read_byte(addr)? as i8 as i64 as u64,
                    Kind::Lbu => u64::from(self.mem.read_byte(addr)?),
                    Kind::Lh => self.mem.load_u16(addr)? as i16 as i64 as u64,
                    Kind::Lhu => u64::from(self.mem.load_u16(addr)?),
                    Kind::Lw => self.mem.load_u32(addr)? as i32 as i64 as u64,
                    Kind::Lwu => u64::from(self.mem.load_u32(addr)?),
                    _ => self.mem.load_u64(addr)?,
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Sb | Kind::Sh | Kind::Sw | Kind::Sd => {
                let rs1 = req(kind, ops, FieldLabel::Rs1)?;
                let rs2 = req(kind, ops, FieldLabel::Rs2)?;
                let offset = imm::decode_s(
                    req(kind, ops, FieldLabel::ImmHi7)?,
                    req(kind, ops, FieldLabel::ImmLo5)?,
                );
                let addr = self.regs.read(rs1 as usize).wrapping_add(offset as u64);
                let value = self.regs.read(rs2 as usize);
                match kind {
                    Kind::Sb => self.mem.write_byte(addr, value as u8)?,
                    Kind::Sh => self.mem.store_u16(addr, value as u16)?,
                    Kind::Sw => self.mem.store_u32(addr, value as u32)?,
                    _ => self.mem.store_u64(addr, value)?,
                }
            }
            Kind::Addi | Kind::Slti | Kind::Sltiu | Kind::Xori | Kind::Ori | Kind::Andi
            | Kind::Addiw => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize);
                let imm =
                    imm::sign_extend(u64::from(req(kind, ops, FieldLabel::Imm12)?), 12) as u64;
                let value = match kind {
                    Kind::Addi => a.wrapping_add(imm),
                    Kind::Slti => u64::from((a as i64) < (imm as i64)),
                    Kind::Sltiu => u64::from(a < imm),
                    Kind::Xori => a ^ imm,
                    Kind::Ori => a | imm,
                    Kind::Andi => a & imm,
                    _ => sext32(a.wrapping_add(imm)),
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Slli | Kind::Srli | Kind::Srai => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize);
                let shamt = req(kind, ops, FieldLabel::Shamt)?;
                let value = match kind {
                    Kind::Slli => a << shamt,
                    Kind::Srli => a >> shamt,
                    _ => ((a as i64) >> shamt) as u64,
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Slliw | Kind::Srliw | Kind::Sraiw => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize) as u32;
                let shamt = req(kind, ops, FieldLabel::ShamtW)?;
                let value = match kind {
                    Kind::Slliw => sext32(u64::from(a << shamt)),
                    Kind::Srliw => sext32(u64::from(a >> shamt)),
                    _ => ((a as i32) >> shamt) as i64 as u64,
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Add | Kind::Sub | Kind::Sll | Kind::Slt | Kind::Sltu | Kind::Xor | Kind::Srl
            | Kind::Sra | Kind::Or | Kind::And => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize);
                let b = self.regs.read(req(kind, ops, FieldLabel::Rs2)? as usize);
                let value = match kind {
                    Kind::Add => a.wrapping_add(b),
                    Kind::Sub => a.wrapping_sub(b),
                    Kind::Sll => a << (b & 0x3F),
                    Kind::Slt => u64::from((a as i64) < (b as i64)),
                    Kind::Sltu => u64::from(a < b),
                    Kind::Xor => a ^ b,
                    Kind::Srl => a >> (b & 0x3F),
                    Kind::Sra => ((a as i64) >> (b & 0x3F)) as u64,
                    Kind::Or => a | b,
                    _ => a & b,
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Addw | Kind::Subw | Kind::Sllw | Kind::Srlw | Kind::Sraw => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize);
                let b = self.regs.read(req(kind, ops, FieldLabel::Rs2)? as usize);
                let value = match kind {
                    Kind::Addw => sext32(a.wrapping_add(b)),
                    Kind::Subw => sext32(a.wrapping_sub(b)),
                    Kind::Sllw => sext32((a as u32).wrapping_shl(b as u32 & 0x1F).into()),
                    Kind::Srlw => sext32((a as u32).wrapping_shr(b as u32 & 0x1F).into()),
                    _ => ((a as u32 as i32) >> (b & 0x1F)) as i64 as u64,
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Mul | Kind::Mulh | Kind::Mulhsu | Kind::Mulhu | Kind::Div | Kind::Divu
            | Kind::Rem | Kind::Remu => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize);
                let b = self.regs.read(req(kind, ops, FieldLabel::Rs2)? as usize);
                let value = match kind {
                    Kind::Mul => a.wrapping_mul(b),
                    Kind::Mulh => {
                        ((i128::from(a as i64).wrapping_mul(i128::from(b as i64))) >> 64) as u64
                    }
                    Kind::Mulhsu => ((i128::from(a as i64).wrapping_mul(i128::from(b))) >> 64) as u64,
                    Kind::Mulhu => ((u128::from(a) * u128::from(b)) >> 64) as u64,
                    Kind::Div => div_signed(a as i64, b as i64) as u64,
                    Kind::Divu => div_unsigned(a, b),
                    Kind::Rem => rem_signed(a as i64, b as i64) as u64,
                    _ => rem_unsigned(a, b),
                };
                self.regs.write(rd as usize, value);
            }
            Kind::Mulw | Kind::Divw | Kind::Divuw | Kind::Remw | Kind::Remuw => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let a = self.regs.read(req(kind, ops, FieldLabel::Rs1)? as usize) as u32;
                let b = self.regs.read(req(kind, ops, FieldLabel::Rs2)? as usize) as u32;
                let value = match kind {
                    Kind::Mulw => a.wrapping_mul(b) as i32,
                    Kind::Divw => div_signed32(a as i32, b as i32),
                    Kind::Divuw => div_unsigned32(a, b) as i32,
                    Kind::Remw => rem_signed32(a as i32, b as i32),
                    _ => rem_unsigned32(a, b) as i32,
                };
                self.regs.write(rd as usize, value as i64 as u64);
            }
            Kind::Fence => {}
            Kind::Ecall => effect = Effect::EnvironmentCall,
            Kind::Ebreak => effect = Effect::Breakpoint,
            Kind::Csrrw | Kind::Csrrs | Kind::Csrrc => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let rs1 = req(kind, ops, FieldLabel::Rs1)?;
                let addr = req(kind, ops, FieldLabel::Csr)?;
                let src = self.regs.read(rs1 as usize);
                let old = self.csrs.read_checked(addr, self.mode)?;
                match kind {
                    Kind::Csrrw => self.csrs.write_checked(addr, src, self.mode)?,
                    Kind::Csrrs if rs1 != 0 => {
                        self.csrs.write_checked(addr, old | src, self.mode)?;
                    }
                    Kind::Csrrc if rs1 != 0 => {
                        self.csrs.write_checked(addr, old & !src, self.mode)?;
                    }
                    _ => {}
                }
                self.regs.write(rd as usize, old);
            }
            Kind::Csrrwi | Kind::Csrrsi | Kind::Csrrci => {
                let rd = req(kind, ops, FieldLabel::Rd)?;
                let uimm = u64::from(req(kind, ops, FieldLabel::Uimm)?);
                let addr = req(kind, ops, FieldLabel::Csr)?;
                let old = self.csrs.read_checked(addr, self.mode)?;
                match kind {
                    Kind::Csrrwi => self.csrs.write_checked(addr, uimm, self.mode)?,
                    Kind::Csrrsi if uimm != 0 => {
                        self.csrs.write_checked(addr, old | uimm, self.mode)?;
                    }
                    Kind::Csrrci if uimm != 0 => {
                        self.csrs.write_checked(addr, old & !uimm, self.mode)?;
                    }
                    _ => {}
                }
                self.regs.write(rd as usize, old);
            }
            _ => return Err(ExecError::NotExpanded(kind)),
        }

        self.pc = next;
        Ok(effect)
    }
}
