//! Control and status registers.
//!
//! This module implements the CSR file of the simulated core. It provides:
//! 1. **Address Definitions:** Constants for the implemented machine-level
//!    and user-counter CSRs.
//! 2. **Register Storage:** The [`Csrs`] struct holding architectural state.
//! 3. **Access Logic:** Raw reads and writes plus privilege-checked variants
//!    that enforce the access rules encoded in the CSR address itself.
//!
//! The address encodes its own access rules: bits 9:8 give the minimum
//! privilege mode and an address whose top two bits are both set is
//! read-only. The checked accessors enforce both strictly.

use crate::common::error::CsrError;

use super::mode::PrivilegeMode;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;

/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;

/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;

/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;

/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;

/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;

/// Machine vendor ID CSR address (read-only).
pub const MVENDORID: u32 = 0xF11;

/// Machine architecture ID CSR address (read-only).
pub const MARCHID: u32 = 0xF12;

/// Machine implementation ID CSR address (read-only).
pub const MIMPID: u32 = 0xF13;

/// Machine hardware thread ID CSR address (read-only).
pub const MHARTID: u32 = 0xF14;

/// Machine cycle counter CSR address.
pub const MCYCLE: u32 = 0xB00;

/// Machine instructions retired counter CSR address.
pub const MINSTRET: u32 = 0xB02;

/// Cycle counter CSR address (read-only, user mode accessible).
pub const CYCLE: u32 = 0xC00;

/// Real-time counter CSR address (read-only, user mode accessible).
pub const TIME: u32 = 0xC01;

/// Instructions retired counter CSR address (read-only, user mode accessible).
pub const INSTRET: u32 = 0xC02;

/// `misa` value reported by the simulator: RV64 with the I and M extensions.
const MISA_VALUE: u64 = (2 << 62) | (1 << 8) | (1 << 12);

/// Control and status register file.
///
/// Unimplemented addresses read as zero and ignore writes, which is the
/// conventional behavior for optional CSRs.
#[derive(Clone, Debug, Default)]
pub struct Csrs {
    /// Machine status.
    pub mstatus: u64,
    /// Trap vector base address.
    pub mtvec: u64,
    /// Machine scratch register.
    pub mscratch: u64,
    /// Exception program counter.
    pub mepc: u64,
    /// Trap cause.
    pub mcause: u64,
    /// Trap value.
    pub mtval: u64,
    /// Cycle counter, incremented once per executed instruction.
    pub mcycle: u64,
    /// Retired-instruction counter.
    pub minstret: u64,
}

impl Csrs {
    /// Creates a CSR file in the reset state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every register back to the reset state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Minimum privilege mode required to access `addr`, taken from address
    /// bits 9:8.
    pub fn required_privilege(addr: u32) -> PrivilegeMode {
        match (addr >> 8) & 0b11 {
            0 => PrivilegeMode::User,
            1 => PrivilegeMode::Supervisor,
            _ => PrivilegeMode::Machine,
        }
    }

    /// Returns `true` when `addr` lies in the read-only address range
    /// (bits 11:10 both set).
    pub fn is_read_only(addr: u32) -> bool {
        (addr >> 10) & 0b11 == 0b11
    }

    /// Reads a CSR without privilege checking.
    ///
    /// # Returns
    ///
    /// The register value; unimplemented addresses read as zero.
    pub fn read(&self, addr: u32) -> u64 {
        match addr {
            MSTATUS => self.mstatus,
            MISA => MISA_VALUE,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            MCYCLE | CYCLE | TIME => self.mcycle,
            MINSTRET | INSTRET => self.minstret,
            MVENDORID | MARCHID | MIMPID | MHARTID => 0,
            _ => 0,
        }
    }

    /// Writes a CSR without privilege checking.
    ///
    /// Writes to unimplemented or inherently read-only registers are
    /// discarded.
    pub fn write(&mut self, addr: u32, val: u64) {
        match addr {
            MSTATUS => self.mstatus = val,
            MTVEC => self.mtvec = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            MCYCLE => self.mcycle = val,
            MINSTRET => self.minstret = val,
            _ => {}
        }
    }

    /// Reads a CSR, enforcing the privilege encoded in the address.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError::PrivilegeViolation`] when `mode` is below the
    /// address's required privilege.
    pub fn read_checked(&self, addr: u32, mode: PrivilegeMode) -> Result<u64, CsrError> {
        let required = Self::required_privilege(addr);
        if mode < required {
            return Err(CsrError::PrivilegeViolation {
                addr,
                required,
                current: mode,
            });
        }
        Ok(self.read(addr))
    }

    /// Writes a CSR, enforcing privilege and the read-only address range.
    ///
    /// # Errors
    ///
    /// Returns [`CsrError::PrivilegeViolation`] when `mode` is below the
    /// address's required privilege, and [`CsrError::ReadOnly`] for writes
    /// into the read-only range.
    pub fn write_checked(
        &mut self,
        addr: u32,
        val: u64,
        mode: PrivilegeMode,
    ) -> Result<(), CsrError> {
        let required = Self::required_privilege(addr);
        if mode < required {
            return Err(CsrError::PrivilegeViolation {
                addr,
                required,
                current: mode,
            });
        }
        if Self::is_read_only(addr) {
            return Err(CsrError::ReadOnly { addr });
        }
        self.write(addr, val);
        Ok(())
    }
}
