//! The closed instruction-kind set and its encoding table.
//!
//! This module defines every instruction the simulator understands. It
//! provides:
//! 1. **Kinds:** One enum variant per opcode and pseudo-instruction, defined
//!    once and immutable thereafter.
//! 2. **Layouts:** Per-kind ordered bit-field layouts (most-significant
//!    first, summing to 32 bits) shared with the codec.
//! 3. **Metadata:** Mnemonic, operand shape, word count, canonical-form
//!    pointer, and required ISA extensions.
//!
//! [`Kind::ALL`] fixes the declaration order used by first-match decoding;
//! kinds whose static patterns could ambiguously satisfy another encoding
//! must appear before it.

use super::field::{FieldLabel, FieldSpec};

/// Major opcodes of the base encoding.
mod op {
    pub const LUI: u32 = 0x37;
    pub const AUIPC: u32 = 0x17;
    pub const JAL: u32 = 0x6F;
    pub const JALR: u32 = 0x67;
    pub const BRANCH: u32 = 0x63;
    pub const LOAD: u32 = 0x03;
    pub const STORE: u32 = 0x23;
    pub const OP_IMM: u32 = 0x13;
    pub const OP: u32 = 0x33;
    pub const OP_IMM_32: u32 = 0x1B;
    pub const OP_32: u32 = 0x3B;
    pub const MISC_MEM: u32 = 0x0F;
    pub const SYSTEM: u32 = 0x73;
}

/// Funct3 minor codes, grouped by opcode family.
mod f3 {
    pub const ADD_SUB: u32 = 0x0;
    pub const SLL: u32 = 0x1;
    pub const SLT: u32 = 0x2;
    pub const SLTU: u32 = 0x3;
    pub const XOR: u32 = 0x4;
    pub const SRL_SRA: u32 = 0x5;
    pub const OR: u32 = 0x6;
    pub const AND: u32 = 0x7;

    pub const BEQ: u32 = 0x0;
    pub const BNE: u32 = 0x1;
    pub const BLT: u32 = 0x4;
    pub const BGE: u32 = 0x5;
    pub const BLTU: u32 = 0x6;
    pub const BGEU: u32 = 0x7;

    pub const LB: u32 = 0x0;
    pub const LH: u32 = 0x1;
    pub const LW: u32 = 0x2;
    pub const LD: u32 = 0x3;
    pub const LBU: u32 = 0x4;
    pub const LHU: u32 = 0x5;
    pub const LWU: u32 = 0x6;

    pub const MUL: u32 = 0x0;
    pub const MULH: u32 = 0x1;
    pub const MULHSU: u32 = 0x2;
    pub const MULHU: u32 = 0x3;
    pub const DIV: u32 = 0x4;
    pub const DIVU: u32 = 0x5;
    pub const REM: u32 = 0x6;
    pub const REMU: u32 = 0x7;

    pub const CSRRW: u32 = 0x1;
    pub const CSRRS: u32 = 0x2;
    pub const CSRRC: u32 = 0x3;
    pub const CSRRWI: u32 = 0x5;
    pub const CSRRSI: u32 = 0x6;
    pub const CSRRCI: u32 = 0x7;
}

/// Funct7/funct6/funct12 discriminators.
mod fn7 {
    pub const BASE: u32 = 0x00;
    pub const ALT: u32 = 0x20;
    pub const MULDIV: u32 = 0x01;

    pub const SHIFT6_BASE: u32 = 0x00;
    pub const SHIFT6_ARITH: u32 = 0x10;

    pub const ECALL: u32 = 0x000;
    pub const EBREAK: u32 = 0x001;
}

const fn r_layout(funct7: u32, funct3: u32, opcode: u32) -> [FieldSpec; 6] {
    [
        FieldSpec::fixed(FieldLabel::Funct7, 7, funct7),
        FieldSpec::operand(FieldLabel::Rs2, 5),
        FieldSpec::operand(FieldLabel::Rs1, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, opcode),
    ]
}

const fn i_layout(funct3: u32, opcode: u32) -> [FieldSpec; 5] {
    [
        FieldSpec::operand(FieldLabel::Imm12, 12),
        FieldSpec::operand(FieldLabel::Rs1, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, opcode),
    ]
}

const fn shift_layout(funct6: u32, funct3: u32, opcode: u32) -> [FieldSpec; 6] {
    [
        FieldSpec::fixed(FieldLabel::Funct6, 6, funct6),
        FieldSpec::operand(FieldLabel::Shamt, 6),
        FieldSpec::operand(FieldLabel::Rs1, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, opcode),
    ]
}

const fn shiftw_layout(funct7: u32, funct3: u32, opcode: u32) -> [FieldSpec; 6] {
    [
        FieldSpec::fixed(FieldLabel::Funct7, 7, funct7),
        FieldSpec::operand(FieldLabel::ShamtW, 5),
        FieldSpec::operand(FieldLabel::Rs1, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, opcode),
    ]
}

const fn split_layout(funct3: u32, opcode: u32) -> [FieldSpec; 6] {
    [
        FieldSpec::operand(FieldLabel::ImmHi7, 7),
        FieldSpec::operand(FieldLabel::Rs2, 5),
        FieldSpec::operand(FieldLabel::Rs1, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::ImmLo5, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, opcode),
    ]
}

const fn upper_layout(opcode: u32) -> [FieldSpec; 3] {
    [
        FieldSpec::operand(FieldLabel::Imm20, 20),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, opcode),
    ]
}

const fn csr_layout(funct3: u32) -> [FieldSpec; 5] {
    [
        FieldSpec::operand(FieldLabel::Csr, 12),
        FieldSpec::operand(FieldLabel::Rs1, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, op::SYSTEM),
    ]
}

const fn csri_layout(funct3: u32) -> [FieldSpec; 5] {
    [
        FieldSpec::operand(FieldLabel::Csr, 12),
        FieldSpec::operand(FieldLabel::Uimm, 5),
        FieldSpec::fixed(FieldLabel::Funct3, 3, funct3),
        FieldSpec::operand(FieldLabel::Rd, 5),
        FieldSpec::fixed(FieldLabel::Opcode, 7, op::SYSTEM),
    ]
}

const fn system_layout(funct12: u32) -> [FieldSpec; 5] {
    [
        FieldSpec::fixed(FieldLabel::Funct12, 12, funct12),
        FieldSpec::fixed(FieldLabel::Rs1, 5, 0),
        FieldSpec::fixed(FieldLabel::Funct3, 3, 0),
        FieldSpec::fixed(FieldLabel::Rd, 5, 0),
        FieldSpec::fixed(FieldLabel::Opcode, 7, op::SYSTEM),
    ]
}

const LUI_F: [FieldSpec; 3] = upper_layout(op::LUI);
const AUIPC_F: [FieldSpec; 3] = upper_layout(op::AUIPC);
const JAL_F: [FieldSpec; 3] = upper_layout(op::JAL);
const JALR_F: [FieldSpec; 5] = i_layout(0x0, op::JALR);

const BEQ_F: [FieldSpec; 6] = split_layout(f3::BEQ, op::BRANCH);
const BNE_F: [FieldSpec; 6] = split_layout(f3::BNE, op::BRANCH);
const BLT_F: [FieldSpec; 6] = split_layout(f3::BLT, op::BRANCH);
const BGE_F: [FieldSpec; 6] = split_layout(f3::BGE, op::BRANCH);
const BLTU_F: [FieldSpec; 6] = split_layout(f3::BLTU, op::BRANCH);
const BGEU_F: [FieldSpec; 6] = split_layout(f3::BGEU, op::BRANCH);

const LB_F: [FieldSpec; 5] = i_layout(f3::LB, op::LOAD);
const LH_F: [FieldSpec; 5] = i_layout(f3::LH, op::LOAD);
const LW_F: [FieldSpec; 5] = i_layout(f3::LW, op::LOAD);
const LD_F: [FieldSpec; 5] = i_layout(f3::LD, op::LOAD);
const LBU_F: [FieldSpec; 5] = i_layout(f3::LBU, op::LOAD);
const LHU_F: [FieldSpec; 5] = i_layout(f3::LHU, op::LOAD);
const LWU_F: [FieldSpec; 5] = i_layout(f3::LWU, op::LOAD);

const SB_F: [FieldSpec; 6] = split_layout(0x0, op::STORE);
const SH_F: [FieldSpec; 6] = split_layout(0x1, op::STORE);
const SW_F: [FieldSpec; 6] = split_layout(0x2, op::STORE);
const SD_F: [FieldSpec; 6] = split_layout(0x3, op::STORE);

const ADDI_F: [FieldSpec; 5] = i_layout(f3::ADD_SUB, op::OP_IMM);
const SLTI_F: [FieldSpec; 5] = i_layout(f3::SLT, op::OP_IMM);
const SLTIU_F: [FieldSpec; 5] = i_layout(f3::SLTU, op::OP_IMM);
const XORI_F: [FieldSpec; 5] = i_layout(f3::XOR, op::OP_IMM);
const ORI_F: [FieldSpec; 5] = i_layout(f3::OR, op::OP_IMM);
const ANDI_F: [FieldSpec; 5] = i_layout(f3::AND, op::OP_IMM);
const SLLI_F: [FieldSpec; 6] = shift_layout(fn7::SHIFT6_BASE, f3::SLL, op::OP_IMM);
const SRLI_F: [FieldSpec; 6] = shift_layout(fn7::SHIFT6_BASE, f3::SRL_SRA, op::OP_IMM);
const SRAI_F: [FieldSpec; 6] = shift_layout(fn7::SHIFT6_ARITH, f3::SRL_SRA, op::OP_IMM);

const ADD_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::ADD_SUB, op::OP);
const SUB_F: [FieldSpec; 6] = r_layout(fn7::ALT, f3::ADD_SUB, op::OP);
const SLL_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::SLL, op::OP);
const SLT_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::SLT, op::OP);
const SLTU_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::SLTU, op::OP);
const XOR_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::XOR, op::OP);
const SRL_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::SRL_SRA, op::OP);
const SRA_F: [FieldSpec; 6] = r_layout(fn7::ALT, f3::SRL_SRA, op::OP);
const OR_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::OR, op::OP);
const AND_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::AND, op::OP);

const ADDIW_F: [FieldSpec; 5] = i_layout(f3::ADD_SUB, op::OP_IMM_32);
const SLLIW_F: [FieldSpec; 6] = shiftw_layout(fn7::BASE, f3::SLL, op::OP_IMM_32);
const SRLIW_F: [FieldSpec; 6] = shiftw_layout(fn7::BASE, f3::SRL_SRA, op::OP_IMM_32);
const SRAIW_F: [FieldSpec; 6] = shiftw_layout(fn7::ALT, f3::SRL_SRA, op::OP_IMM_32);
const ADDW_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::ADD_SUB, op::OP_32);
const SUBW_F: [FieldSpec; 6] = r_layout(fn7::ALT, f3::ADD_SUB, op::OP_32);
const SLLW_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::SLL, op::OP_32);
const SRLW_F: [FieldSpec; 6] = r_layout(fn7::BASE, f3::SRL_SRA, op::OP_32);
const SRAW_F: [FieldSpec; 6] = r_layout(fn7::ALT, f3::SRL_SRA, op::OP_32);

const MUL_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::MUL, op::OP);
const MULH_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::MULH, op::OP);
const MULHSU_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::MULHSU, op::OP);
const MULHU_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::MULHU, op::OP);
const DIV_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::DIV, op::OP);
const DIVU_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::DIVU, op::OP);
const REM_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::REM, op::OP);
const REMU_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::REMU, op::OP);
const MULW_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::MUL, op::OP_32);
const DIVW_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::DIV, op::OP_32);
const DIVUW_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::DIVU, op::OP_32);
const REMW_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::REM, op::OP_32);
const REMUW_F: [FieldSpec; 6] = r_layout(fn7::MULDIV, f3::REMU, op::OP_32);

const FENCE_F: [FieldSpec; 5] = i_layout(0x0, op::MISC_MEM);
const ECALL_F: [FieldSpec; 5] = system_layout(fn7::ECALL);
const EBREAK_F: [FieldSpec; 5] = system_layout(fn7::EBREAK);

const CSRRW_F: [FieldSpec; 5] = csr_layout(f3::CSRRW);
const CSRRS_F: [FieldSpec; 5] = csr_layout(f3::CSRRS);
const CSRRC_F: [FieldSpec; 5] = csr_layout(f3::CSRRC);
const CSRRWI_F: [FieldSpec; 5] = csri_layout(f3::CSRRWI);
const CSRRSI_F: [FieldSpec; 5] = csri_layout(f3::CSRRSI);
const CSRRCI_F: [FieldSpec; 5] = csri_layout(f3::CSRRCI);

/// Pseudo-instructions occupy no encoding of their own.
const PSEUDO_F: [FieldSpec; 0] = [];

/// ISA extension an instruction kind belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extension {
    /// Base integer instruction set.
    I,
    /// Integer multiply/divide extension.
    M,
    /// Control/status register extension.
    Zicsr,
}

/// Operand shape and rendering family of an instruction kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register arithmetic/logic.
    R,
    /// Register-immediate arithmetic/logic.
    I,
    /// Memory load.
    Load,
    /// 64-bit shift with 6-bit shift amount.
    Shift,
    /// 32-bit word shift with 5-bit shift amount.
    ShiftW,
    /// Memory store.
    Store,
    /// Conditional branch with split immediate.
    Branch,
    /// Upper-immediate (LUI/AUIPC).
    Upper,
    /// PC-relative jump with shuffled 20-bit immediate.
    Jump,
    /// Register-indirect jump.
    JumpReg,
    /// CSR access with register source.
    Csr,
    /// CSR access with immediate source.
    CsrImm,
    /// Fixed-encoding system instruction.
    System,
    /// Memory ordering fence.
    Fence,
    /// Expands to real instructions before execution.
    Pseudo,
}

impl Format {
    /// Operand-shape tag for this family.
    pub fn shape(self) -> &'static str {
        match self {
            Self::R => "register,register,register",
            Self::I => "register,register,immediate",
            Self::Load | Self::JumpReg | Self::Store => "register,immediate(register)",
            Self::Shift | Self::ShiftW => "register,register,shift-amount",
            Self::Branch => "register,register,address",
            Self::Upper => "register,immediate",
            Self::Jump => "register,address",
            Self::Csr => "register,csr,register",
            Self::CsrImm => "register,csr,immediate",
            Self::System | Self::Fence | Self::Pseudo => "",
        }
    }
}

/// One instruction kind per opcode and pseudo-instruction.
///
/// The set is closed: constructed once at startup and immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Kind {
    // RV64I
    Lui, Auipc, Jal, Jalr,
    Beq, Bne, Blt, Bge, Bltu, Bgeu,
    Lb, Lh, Lw, Ld, Lbu, Lhu, Lwu,
    Sb, Sh, Sw, Sd,
    Addi, Slti, Sltiu, Xori, Ori, Andi,
    Slli, Srli, Srai,
    Add, Sub, Sll, Slt, Sltu, Xor, Srl, Sra, Or, And,
    Addiw, Slliw, Srliw, Sraiw,
    Addw, Subw, Sllw, Srlw, Sraw,
    Fence, Ecall, Ebreak,
    // RV64M
    Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu,
    Mulw, Divw, Divuw, Remw, Remuw,
    // Zicsr
    Csrrw, Csrrs, Csrrc, Csrrwi, Csrrsi, Csrrci,
    // Pseudo-instructions
    Nop, Mv, Not, Neg, Seqz, Snez,
    Li, La,
    J, Jr, Ret, Call, Tail,
    Beqz, Bnez, Bltz, Bgez,
}

impl Kind {
    /// Every kind in declaration order.
    ///
    /// Decode iterates this list and takes the first full match, so more
    /// specific encodings (fully static system instructions) are declared
    /// before the CSR forms that share their opcode.
    pub const ALL: &'static [Kind] = &[
        Kind::Lui, Kind::Auipc, Kind::Jal, Kind::Jalr,
        Kind::Beq, Kind::Bne, Kind::Blt, Kind::Bge, Kind::Bltu, Kind::Bgeu,
        Kind::Lb, Kind::Lh, Kind::Lw, Kind::Ld, Kind::Lbu, Kind::Lhu, Kind::Lwu,
        Kind::Sb, Kind::Sh, Kind::Sw, Kind::Sd,
        Kind::Addi, Kind::Slti, Kind::Sltiu, Kind::Xori, Kind::Ori, Kind::Andi,
        Kind::Slli, Kind::Srli, Kind::Srai,
        Kind::Add, Kind::Sub, Kind::Sll, Kind::Slt, Kind::Sltu, Kind::Xor,
        Kind::Srl, Kind::Sra, Kind::Or, Kind::And,
        Kind::Addiw, Kind::Slliw, Kind::Srliw, Kind::Sraiw,
        Kind::Addw, Kind::Subw, Kind::Sllw, Kind::Srlw, Kind::Sraw,
        Kind::Fence, Kind::Ecall, Kind::Ebreak,
        Kind::Mul, Kind::Mulh, Kind::Mulhsu, Kind::Mulhu,
        Kind::Div, Kind::Divu, Kind::Rem, Kind::Remu,
        Kind::Mulw, Kind::Divw, Kind::Divuw, Kind::Remw, Kind::Remuw,
        Kind::Csrrw, Kind::Csrrs, Kind::Csrrc,
        Kind::Csrrwi, Kind::Csrrsi, Kind::Csrrci,
        Kind::Nop, Kind::Mv, Kind::Not, Kind::Neg, Kind::Seqz, Kind::Snez,
        Kind::Li, Kind::La,
        Kind::J, Kind::Jr, Kind::Ret, Kind::Call, Kind::Tail,
        Kind::Beqz, Kind::Bnez, Kind::Bltz, Kind::Bgez,
    ];

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Kind::Lui => "lui", Kind::Auipc => "auipc", Kind::Jal => "jal", Kind::Jalr => "jalr",
            Kind::Beq => "beq", Kind::Bne => "bne", Kind::Blt => "blt", Kind::Bge => "bge",
            Kind::Bltu => "bltu", Kind::Bgeu => "bgeu",
            Kind::Lb => "lb", Kind::Lh => "lh", Kind::Lw => "lw", Kind::Ld => "ld",
            Kind::Lbu => "lbu", Kind::Lhu => "lhu", Kind::Lwu => "lwu",
            Kind::Sb => "sb", Kind::Sh => "sh", Kind::Sw => "sw", Kind::Sd => "sd",
            Kind::Addi => "addi", Kind::Slti => "slti", Kind::Sltiu => "sltiu",
            Kind::Xori => "xori", Kind::Ori => "ori", Kind::Andi => "andi",
            Kind::Slli => "slli", Kind::Srli => "srli", Kind::Srai => "srai",
            Kind::Add => "add", Kind::Sub => "sub", Kind::Sll => "sll", Kind::Slt => "slt",
            Kind::Sltu => "sltu", Kind::Xor => "xor", Kind::Srl => "srl", Kind::Sra => "sra",
            Kind::Or => "or", Kind::And => "and",
            Kind::Addiw => "addiw", Kind::Slliw => "slliw", Kind::Srliw => "srliw",
            Kind::Sraiw => "sraiw",
            Kind::Addw => "addw", Kind::Subw => "subw", Kind::Sllw => "sllw",
            Kind::Srlw => "srlw", Kind::Sraw => "sraw",
            Kind::Fence => "fence", Kind::Ecall => "ecall", Kind::Ebreak => "ebreak",
            Kind::Mul => "mul", Kind::Mulh => "mulh", Kind::Mulhsu => "mulhsu",
            Kind::Mulhu => "mulhu", Kind::Div => "div", Kind::Divu => "divu",
            Kind::Rem => "rem", Kind::Remu => "remu",
            Kind::Mulw => "mulw", Kind::Divw => "divw", Kind::Divuw => "divuw",
            Kind::Remw => "remw", Kind::Remuw => "remuw",
            Kind::Csrrw => "csrrw", Kind::Csrrs => "csrrs", Kind::Csrrc => "csrrc",
            Kind::Csrrwi => "csrrwi", Kind::Csrrsi => "csrrsi", Kind::Csrrci => "csrrci",
            Kind::Nop => "nop", Kind::Mv => "mv", Kind::Not => "not", Kind::Neg => "neg",
            Kind::Seqz => "seqz", Kind::Snez => "snez",
            Kind::Li => "li", Kind::La => "la",
            Kind::J => "j", Kind::Jr => "jr", Kind::Ret => "ret",
            Kind::Call => "call", Kind::Tail => "tail",
            Kind::Beqz => "beqz", Kind::Bnez => "bnez", Kind::Bltz => "bltz",
            Kind::Bgez => "bgez",
        }
    }

    /// Ordered bit-field layout, most-significant first.
    ///
    /// Pseudo-instructions return an empty layout; the codec rejects them.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Kind::Lui => &LUI_F,
            Kind::Auipc => &AUIPC_F,
            Kind::Jal => &JAL_F,
            Kind::Jalr => &JALR_F,
            Kind::Beq => &BEQ_F,
            Kind::Bne => &BNE_F,
            Kind::Blt => &BLT_F,
            Kind::Bge => &BGE_F,
            Kind::Bltu => &BLTU_F,
            Kind::Bgeu => &BGEU_F,
            Kind::Lb => &LB_F,
            Kind::Lh => &LH_F,
            Kind::Lw => &LW_F,
            Kind::Ld => &LD_F,
            Kind::Lbu => &LBU_F,
            Kind::Lhu => &LHU_F,
            Kind::Lwu => &LWU_F,
            Kind::Sb => &SB_F,
            Kind::Sh => &SH_F,
            Kind::Sw => &SW_F,
            Kind::Sd => &SD_F,
            Kind::Addi => &ADDI_F,
            Kind::Slti => &SLTI_F,
            Kind::Sltiu => &SLTIU_F,
            Kind::Xori => &XORI_F,
            Kind::Ori => &ORI_F,
            Kind::Andi => &ANDI_F,
            Kind::Slli => &SLLI_F,
            Kind::Srli => &SRLI_F,
            Kind::Srai => &SRAI_F,
            Kind::Add => &ADD_F,
            Kind::Sub => &SUB_F,
            Kind::Sll => &SLL_F,
            Kind::Slt => &SLT_F,
            Kind::Sltu => &SLTU_F,
            Kind::Xor => &XOR_F,
            Kind::Srl => &SRL_F,
            Kind::Sra => &SRA_F,
            Kind::Or => &OR_F,
            Kind::And => &AND_F,
            Kind::Addiw => &ADDIW_F,
            Kind::Slliw => &SLLIW_F,
            Kind::Srliw => &SRLIW_F,
            Kind::Sraiw => &SRAIW_F,
            Kind::Addw => &ADDW_F,
            Kind::Subw => &SUBW_F,
            Kind::Sllw => &SLLW_F,
            Kind::Srlw => &SRLW_F,
            Kind::Sraw => &SRAW_F,
            Kind::Fence => &FENCE_F,
            Kind::Ecall => &ECALL_F,
            Kind::Ebreak => &EBREAK_F,
            Kind::Mul => &MUL_F,
            Kind::Mulh => &MULH_F,
            Kind::Mulhsu => &MULHSU_F,
            Kind::Mulhu => &MULHU_F,
            Kind::Div => &DIV_F,
            Kind::Divu => &DIVU_F,
            Kind::Rem => &REM_F,
            Kind::Remu => &REMU_F,
            Kind::Mulw => &MULW_F,
            Kind::Divw => &DIVW_F,
            Kind::Divuw => &DIVUW_F,
            Kind::Remw => &REMW_F,
            Kind::Remuw => &REMUW_F,
            Kind::Csrrw => &CSRRW_F,
            Kind::Csrrs => &CSRRS_F,
            Kind::Csrrc => &CSRRC_F,
            Kind::Csrrwi => &CSRRWI_F,
            Kind::Csrrsi => &CSRRSI_F,
            Kind::Csrrci => &CSRRCI_F,
            _ => &PSEUDO_F,
        }
    }

    /// Operand shape and rendering family.
    pub fn format(self) -> Format {
        match self {
            Kind::Lui | Kind::Auipc => Format::Upper,
            Kind::Jal => Format::Jump,
            Kind::Jalr => Format::JumpReg,
            Kind::Beq | Kind::Bne | Kind::Blt | Kind::Bge | Kind::Bltu | Kind::Bgeu => {
                Format::Branch
            }
            Kind::Lb | Kind::Lh | Kind::Lw | Kind::Ld | Kind::Lbu | Kind::Lhu | Kind::Lwu => {
                Format::Load
            }
            Kind::Sb | Kind::Sh | Kind::Sw | Kind::Sd => Format::Store,
            Kind::Addi | Kind::Slti | Kind::Sltiu | Kind::Xori | Kind::Ori | Kind::Andi
            | Kind::Addiw => Format::I,
            Kind::Slli | Kind::Srli | Kind::Srai => Format::Shift,
            Kind::Slliw | Kind::Srliw | Kind::Sraiw => Format::ShiftW,
            Kind::Add | Kind::Sub | Kind::Sll | Kind::Slt | Kind::Sltu | Kind::Xor
            | Kind::Srl | Kind::Sra | Kind::Or | Kind::And | Kind::Addw | Kind::Subw
            | Kind::Sllw | Kind::Srlw | Kind::Sraw | Kind::Mul | Kind::Mulh | Kind::Mulhsu
            | Kind::Mulhu | Kind::Div | Kind::Divu | Kind::Rem | Kind::Remu | Kind::Mulw
            | Kind::Divw | Kind::Divuw | Kind::Remw | Kind::Remuw => Format::R,
            Kind::Fence => Format::Fence,
            Kind::Ecall | Kind::Ebreak => Format::System,
            Kind::Csrrw | Kind::Csrrs | Kind::Csrrc => Format::Csr,
            Kind::Csrrwi | Kind::Csrrsi | Kind::Csrrci => Format::CsrImm,
            _ => Format::Pseudo,
        }
    }

    /// Returns `true` for kinds that expand to real instructions.
    pub fn is_pseudo(self) -> bool {
        self.format() == Format::Pseudo
    }

    /// Number of 32-bit words the kind occupies in memory.
    ///
    /// Real instructions occupy one word; pseudo-instructions reserve the
    /// worst case of their expansion.
    pub fn words(self) -> u32 {
        match self {
            Kind::Li => 8,
            Kind::La | Kind::Call | Kind::Tail => 2,
            _ => 1,
        }
    }

    /// Canonical form this kind is an alias or relative variant of.
    pub fn base(self) -> Option<Kind> {
        match self {
            Kind::Nop | Kind::Mv => Some(Kind::Addi),
            Kind::Not => Some(Kind::Xori),
            Kind::Neg => Some(Kind::Sub),
            Kind::Seqz => Some(Kind::Sltiu),
            Kind::Snez => Some(Kind::Sltu),
            Kind::Li => Some(Kind::Lui),
            Kind::La | Kind::Call | Kind::Tail => Some(Kind::Auipc),
            Kind::J => Some(Kind::Jal),
            Kind::Jr | Kind::Ret => Some(Kind::Jalr),
            Kind::Beqz => Some(Kind::Beq),
            Kind::Bnez => Some(Kind::Bne),
            Kind::Bltz => Some(Kind::Blt),
            Kind::Bgez => Some(Kind::Bge),
            _ => None,
        }
    }

    /// ISA extensions required by this kind.
    pub fn extensions(self) -> &'static [Extension] {
        match self {
            Kind::Mul | Kind::Mulh | Kind::Mulhsu | Kind::Mulhu | Kind::Div | Kind::Divu
            | Kind::Rem | Kind::Remu | Kind::Mulw | Kind::Divw | Kind::Divuw | Kind::Remw
            | Kind::Remuw => &[Extension::I, Extension::M],
            Kind::Csrrw | Kind::Csrrs | Kind::Csrrc | Kind::Csrrwi | Kind::Csrrsi
            | Kind::Csrrci => &[Extension::I, Extension::Zicsr],
            _ => &[Extension::I],
        }
    }

    /// Operand-shape tag, e.g. `"register,register,register"`.
    pub fn shape(self) -> &'static str {
        match self.format() {
            Format::Pseudo => match self {
                Kind::Nop | Kind::Ret => "",
                Kind::Mv | Kind::Not | Kind::Neg | Kind::Seqz | Kind::Snez => "register,register",
                Kind::Li => "register,immediate",
                Kind::La => "register,address",
                Kind::J | Kind::Call | Kind::Tail => "address",
                Kind::Jr => "register",
                Kind::Beqz | Kind::Bnez | Kind::Bltz | Kind::Bgez => "register,address",
                _ => "",
            },
            f => f.shape(),
        }
    }
}
