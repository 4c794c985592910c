//! Instruction-set architecture model.
//!
//! Everything that defines the instruction encoding lives here: the closed
//! kind set and its bit-field layouts, the codec that folds layouts to and
//! from 32-bit words, the immediate shuffles, pseudo-instruction expansion,
//! ABI register naming, and the disassembler.

pub mod abi;
pub mod codec;
pub mod disasm;
pub mod field;
pub mod imm;
pub mod kind;
pub mod pseudo;

pub use field::{FieldLabel, FieldSpec, OperandMap};
pub use kind::{Extension, Format, Kind};
