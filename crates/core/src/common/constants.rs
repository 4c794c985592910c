//! Architecture-wide constants.

/// Size of one instruction word in bytes. All instructions are fixed-width.
pub const WORD_BYTES: u64 = 4;

/// Width of an encoded instruction in bits.
pub const INSTRUCTION_BITS: u32 = 32;

/// Native register width in bits (RV64).
pub const XLEN: u32 = 64;

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;
