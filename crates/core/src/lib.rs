//! Rivet simulator core.
//!
//! A 64-bit RISC-V instruction-set simulator with a configurable cache
//! hierarchy. The crate is organized as follows:
//! 1. **ISA Model** ([`isa`]): The closed instruction-kind set, the
//!    bit-field codec, immediate shuffles, pseudo-instruction expansion, and
//!    the disassembler.
//! 2. **Core** ([`core`]): Register files, CSRs, privilege modes, and the
//!    fetch/decode/execute engine.
//! 3. **Memory** ([`mem`]): Sparse main memory and write-back caches with
//!    pluggable replacement policies.
//! 4. **Configuration** ([`config`]): JSON-loadable parameters for memory
//!    and each cache level.
//!
//! The simulator is single-threaded by design: one [`Cpu`] owns its memory
//! hierarchy and drivers call [`Cpu::step`] in a loop.

pub mod common;
pub mod config;
pub mod core;
pub mod isa;
pub mod mem;

pub use crate::config::Config;
pub use crate::core::{Cpu, Effect};
pub use crate::mem::MemoryHierarchy;
