//! Privilege modes.
//!
//! This module defines the privilege levels recognized by the simulator. It
//! provides:
//! 1. **Mode Classification:** User (U), Supervisor (S), and Machine (M)
//!    levels with their architectural ordering.
//! 2. **Serialization:** Conversion between numeric encodings and variants.
//! 3. **Observability:** Human-readable naming and display formatting.

/// Privilege mode levels.
///
/// Three modes gate access to control/status registers. Machine mode is the
/// highest privilege level and the reset state of the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrivilegeMode {
    /// User mode (U-mode), the lowest level, for application code.
    User = 0,

    /// Supervisor mode (S-mode), the intermediate level, for kernels.
    Supervisor = 1,

    /// Machine mode (M-mode), the highest level, for firmware.
    Machine = 3,
}

impl PrivilegeMode {
    /// Converts a numeric privilege encoding to a mode.
    ///
    /// # Arguments
    ///
    /// * `val` - The numeric privilege value (0, 1, or 3).
    ///
    /// # Returns
    ///
    /// The corresponding mode; unassigned encodings map to `Machine`.
    pub fn from_u8(val: u8) -> Self {
        match val {
            0 => PrivilegeMode::User,
            1 => PrivilegeMode::Supervisor,
            _ => PrivilegeMode::Machine,
        }
    }

    /// Converts a privilege mode to its numeric encoding.
    ///
    /// # Returns
    ///
    /// The architectural value of the mode (0, 1, or 3).
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns the human-readable name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            PrivilegeMode::User => "User",
            PrivilegeMode::Supervisor => "Supervisor",
            PrivilegeMode::Machine => "Machine",
        }
    }
}

impl std::fmt::Display for PrivilegeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
