//! Error taxonomy for the simulator core.
//!
//! This module defines the recoverable failure conditions of the simulator.
//! It provides:
//! 1. **Execution Errors:** Missing operands, unexpanded pseudo-instructions,
//!    and unrecognized instruction words.
//! 2. **Expansion Errors:** Failures during pseudo-instruction expansion.
//! 3. **Memory Errors:** Internal cache inconsistencies.
//! 4. **CSR Errors:** Privilege violations and read-only writes.
//! 5. **Configuration Errors:** Malformed documents and unbuildable cache
//!    geometries, refused before any simulator state exists.
//!
//! All failures are local and recoverable at single-instruction or
//! single-access granularity; none of them aborts a simulated run unless the
//! driver chooses to halt.

use thiserror::Error;

use crate::core::arch::mode::PrivilegeMode;
use crate::isa::field::FieldLabel;
use crate::isa::kind::Kind;

/// An immediate value does not fit the bit-field it is destined for.
///
/// Detected at pseudo-instruction expansion time and reported against the
/// responsible instruction; execution does not proceed for that instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("immediate {value:#x} does not fit in {bits} bits")]
pub struct ImmOverflow {
    /// The offending value.
    pub value: i64,
    /// The width of the destination field in bits.
    pub bits: u32,
}

/// Failure during execution of a single instruction.
///
/// Execution of the offending instruction is skipped; the run continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecError {
    /// A required operand was absent from the decoded operand map.
    #[error("missing {field:?} operand for {kind:?}")]
    MissingOperand {
        /// The instruction kind being executed.
        kind: Kind,
        /// The absent field.
        field: FieldLabel,
    },

    /// A pseudo-instruction reached the execution engine without expansion.
    #[error("pseudo-instruction {0:?} must be expanded before execution")]
    NotExpanded(Kind),

    /// No instruction kind matched the fetched word.
    #[error("unrecognized instruction word {word:#010x} at pc {pc:#x}")]
    Unrecognized {
        /// The raw fetched word.
        word: u32,
        /// The program counter at the time of the fetch.
        pc: u64,
    },

    /// A memory or cache access failed.
    #[error(transparent)]
    Mem(#[from] MemError),

    /// A CSR access was rejected.
    #[error(transparent)]
    Csr(#[from] CsrError),
}

/// Failure during pseudo-instruction expansion.
///
/// Expansion of the offending instruction halts and produces no output for
/// it; output already produced for prior instructions is unaffected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// A required operand was absent from the pseudo-instruction's operands.
    #[error("missing {field:?} operand for {kind:?}")]
    MissingOperand {
        /// The pseudo-instruction kind being expanded.
        kind: Kind,
        /// The absent field.
        field: FieldLabel,
    },

    /// The resolved immediate does not fit the expansion's field budget.
    #[error(transparent)]
    Immediate(#[from] ImmOverflow),

    /// The kind is not a pseudo-instruction.
    #[error("{0:?} is not a pseudo-instruction")]
    NotPseudo(Kind),
}

/// Internal memory/cache hierarchy failure.
///
/// Fatal to the single access; no other row or block is touched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemError {
    /// The replacement policy selected a way outside the row.
    #[error("victim way {way} out of range for row {row} ({ways} ways)")]
    VictimOutOfRange {
        /// The addressed row.
        row: usize,
        /// The way returned by the policy.
        way: usize,
        /// The row's associativity.
        ways: usize,
    },
}

/// Rejected simulator configuration.
///
/// A document that parses but describes a cache geometry that cannot be
/// built (no ways, no block words, or too little capacity for a single row)
/// is refused here rather than failing during construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document failed to deserialize.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    /// A set-associative cache level has zero ways.
    #[error("cache level {level} has zero ways")]
    ZeroWays {
        /// Index of the offending level, nearest to the core first.
        level: usize,
    },

    /// A cache level has zero words per block.
    #[error("cache level {level} has zero words per block")]
    ZeroBlockWords {
        /// Index of the offending level, nearest to the core first.
        level: usize,
    },

    /// A cache level's capacity cannot hold one full row of blocks.
    #[error("cache level {level}: {size_bytes} bytes cannot hold one full row")]
    CapacityTooSmall {
        /// Index of the offending level, nearest to the core first.
        level: usize,
        /// The configured capacity in bytes.
        size_bytes: usize,
    },
}

/// Rejected control/status register access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CsrError {
    /// The current privilege mode is below the CSR's required privilege.
    #[error("csr {addr:#05x} requires {required} privilege, current mode is {current}")]
    PrivilegeViolation {
        /// The CSR address.
        addr: u32,
        /// The minimum privilege encoded in the address.
        required: PrivilegeMode,
        /// The privilege mode of the access.
        current: PrivilegeMode,
    },

    /// Write to a CSR in the read-only address range.
    #[error("csr {addr:#05x} is read-only")]
    ReadOnly {
        /// The CSR address.
        addr: u32,
    },
}
