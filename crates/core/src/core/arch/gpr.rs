//! General-purpose register file.
//!
//! This module implements the integer register file. It performs the
//! following:
//! 1. **Storage:** Maintains the 32 integer registers (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Register `x0` is hardwired to zero; writes
//!    to it are discarded.
//! 3. **Debugging:** Utilities for dumping the complete register state.

use crate::common::constants::GPR_COUNT;
use crate::isa::abi;

/// The integer register file.
///
/// Register `x0` always reads as zero regardless of writes.
#[derive(Clone, Debug)]
pub struct Gpr {
    regs: [u64; GPR_COUNT],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self {
            regs: [0; GPR_COUNT],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 64-bit register value. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register. Writes to `x0` are discarded.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 64-bit value to write.
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Clears every register back to the reset state.
    pub fn reset(&mut self) {
        self.regs = [0; GPR_COUNT];
    }

    /// Dumps all registers with their ABI names, two per line.
    pub fn dump(&self) {
        for i in (0..GPR_COUNT).step_by(2) {
            println!(
                "{:>4}={:#018x} {:>4}={:#018x}",
                abi::REG_NAMES[i],
                self.read(i),
                abi::REG_NAMES[i + 1],
                self.read(i + 1)
            );
        }
    }
}
