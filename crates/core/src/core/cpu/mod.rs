//! The simulated processor core.
//!
//! This module ties the architectural state to the memory hierarchy. It
//! provides:
//! 1. **State:** Register file, CSRs, program counter, and privilege mode.
//! 2. **Fetch/Decode/Execute:** [`Cpu::step`] runs one instruction through
//!    the full pipeline, including instruction fetch through the cache
//!    hierarchy.
//! 3. **Image Loading:** Placing encoded instruction words into simulated
//!    memory at a base address.

mod execute;

pub use execute::Effect;

use tracing::debug;

use crate::common::constants::WORD_BYTES;
use crate::common::error::{ExecError, MemError};
use crate::config::Config;
use crate::isa::codec;
use crate::mem::MemoryHierarchy;

use super::arch::{Csrs, Gpr, PrivilegeMode};

/// A single simulated hardware thread.
pub struct Cpu {
    /// General-purpose register file.
    pub regs: Gpr,
    /// Control and status registers.
    pub csrs: Csrs,
    /// Program counter.
    pub pc: u64,
    /// Current privilege mode. Cores reset into Machine mode.
    pub mode: PrivilegeMode,
    /// The cache hierarchy and main memory this core fetches from and
    /// loads/stores through.
    pub mem: MemoryHierarchy,
}

impl Cpu {
    /// Creates a core in the reset state over a freshly built hierarchy.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            csrs: Csrs::new(),
            pc: 0,
            mode: PrivilegeMode::Machine,
            mem: MemoryHierarchy::new(config),
        }
    }

    /// Returns the architectural state to reset values.
    ///
    /// Memory and caches are left untouched; only core state is cleared.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.csrs.reset();
        self.pc = 0;
        self.mode = PrivilegeMode::Machine;
    }

    /// Stores encoded instruction words into memory starting at `base`.
    ///
    /// Words are laid out under the configured instruction byte order.
    ///
    /// # Errors
    ///
    /// Propagates memory hierarchy failures.
    pub fn load_image(&mut self, base: u64, words: &[u32]) -> Result<(), MemError> {
        for (i, &word) in words.iter().enumerate() {
            self.mem.store_word(base + i as u64 * WORD_BYTES, word)?;
        }
        Ok(())
    }

    /// Fetches, decodes, and executes one instruction.
    ///
    /// On success the program counter has advanced (or jumped) and the
    /// cycle and retired-instruction counters are incremented.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Unrecognized`] when the fetched word decodes to
    /// no known instruction, and propagates execution failures. The program
    /// counter is left unchanged on error so a driver can inspect or skip
    /// the faulting instruction.
    pub fn step(&mut self) -> Result<Effect, ExecError> {
        let word = self.mem.fetch_word(self.pc)?;
        let (kind, ops) = codec::decode(word).ok_or(ExecError::Unrecognized {
            word,
            pc: self.pc,
        })?;
        debug!(pc = self.pc, mnemonic = kind.mnemonic(), "executing");

        let effect = self.execute(kind, &ops)?;
        self.csrs.mcycle = self.csrs.mcycle.wrapping_add(1);
        self.csrs.minstret = self.csrs.minstret.wrapping_add(1);
        Ok(effect)
    }
}
