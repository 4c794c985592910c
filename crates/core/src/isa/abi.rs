//! ABI register names.
//!
//! Maps between architectural register indices and the standard calling
//! convention names used by the disassembler and pseudo-instruction
//! expansion.

/// Architectural index of the hard-wired zero register.
pub const REG_ZERO: u32 = 0;

/// Architectural index of the return-address register (`ra`).
pub const REG_RA: u32 = 1;

/// Architectural index of the second temporary (`t1`), the scratch register
/// used by tail-call expansion.
pub const REG_T1: u32 = 6;

/// ABI names indexed by architectural register number.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for a register index, or `None` when out of range.
pub fn name(index: u32) -> Option<&'static str> {
    REG_NAMES.get(index as usize).copied()
}

/// Resolves an ABI or architectural register name to its index.
///
/// Accepts ABI names (`a0`), the `fp` alias for `s0`, and raw `x0`..`x31`
/// forms.
pub fn lookup(name: &str) -> Option<u32> {
    if name == "fp" {
        return Some(8);
    }
    if let Some(rest) = name.strip_prefix('x') {
        if let Ok(index) = rest.parse::<u32>() {
            return (index < 32).then_some(index);
        }
    }
    REG_NAMES
        .iter()
        .position(|&n| n == name)
        .map(|i| i as u32)
}
