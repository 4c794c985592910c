//! ISA model tests: codec, immediates, pseudo expansion, disassembly.

pub mod imm;
pub mod kind;
