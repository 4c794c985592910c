//! Bit-field roles and operand maps.
//!
//! This module defines the vocabulary of the bit-field codec. It provides:
//! 1. **Field Labels:** The closed set of roles a bit-field can play inside a
//!    32-bit encoding, each with a static-vs-operand class and maximum width.
//! 2. **Field Specs:** One slot of an instruction layout, ordered
//!    most-significant-first and summing to exactly 32 bits.
//! 3. **Operand Maps:** The label-to-bits mapping produced by decode and
//!    consumed by encode and execute.

/// Identifies the role of a bit-field within an instruction encoding.
///
/// Labels are either opcode-discriminating static patterns (`Opcode`,
/// `Funct3`, `Funct6`, `Funct7`, `Funct12`) or variable operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldLabel {
    /// Major opcode (7 bits, static).
    Opcode,
    /// Minor function code (3 bits, static).
    Funct3,
    /// Shift-distinguishing function code for 64-bit shifts (6 bits, static).
    Funct6,
    /// Function code for register-register operations (7 bits, static).
    Funct7,
    /// Full immediate-position function code for system ops (12 bits, static).
    Funct12,
    /// Destination register (5 bits).
    Rd,
    /// First source register (5 bits).
    Rs1,
    /// Second source register (5 bits).
    Rs2,
    /// Contiguous 12-bit immediate.
    Imm12,
    /// High split-immediate fragment for store/branch formats (7 bits).
    ImmHi7,
    /// Low split-immediate fragment for store/branch formats (5 bits).
    ImmLo5,
    /// Upper 20-bit immediate (U and J formats).
    Imm20,
    /// Shift amount for 64-bit shifts (6 bits).
    Shamt,
    /// Shift amount for 32-bit word shifts (5 bits).
    ShamtW,
    /// Control/status register address (12 bits).
    Csr,
    /// Zero-extended 5-bit immediate for CSR immediate forms.
    Uimm,
}

impl FieldLabel {
    /// Returns `true` when the label carries a variable operand rather than a
    /// static opcode-discriminating pattern.
    pub fn is_operand(self) -> bool {
        !matches!(
            self,
            Self::Opcode | Self::Funct3 | Self::Funct6 | Self::Funct7 | Self::Funct12
        )
    }

    /// Maximum width of the field in bits.
    pub fn max_width(self) -> u32 {
        match self {
            Self::Funct3 => 3,
            Self::Rd | Self::Rs1 | Self::Rs2 | Self::ImmLo5 | Self::ShamtW | Self::Uimm => 5,
            Self::Funct6 | Self::Shamt => 6,
            Self::Opcode | Self::Funct7 | Self::ImmHi7 => 7,
            Self::Funct12 | Self::Imm12 | Self::Csr => 12,
            Self::Imm20 => 20,
        }
    }
}

/// One slot of an instruction layout.
///
/// A slot with `fixed` bits participates in opcode discrimination; a slot
/// without them is extracted into (or written from) the operand map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    /// Role of this slot.
    pub label: FieldLabel,
    /// Width in bits.
    pub width: u32,
    /// Static bit pattern, or `None` for a variable operand.
    pub fixed: Option<u32>,
}

impl FieldSpec {
    /// A static slot carrying the given bit pattern.
    pub const fn fixed(label: FieldLabel, width: u32, bits: u32) -> Self {
        Self {
            label,
            width,
            fixed: Some(bits),
        }
    }

    /// A variable operand slot.
    pub const fn operand(label: FieldLabel, width: u32) -> Self {
        Self {
            label,
            width,
            fixed: None,
        }
    }
}

/// Mapping from field label to a fixed-width bit value.
///
/// Produced by decode and consumed by encode and execute. Entries are kept
/// sorted by label so equality is structural regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperandMap {
    entries: Vec<(FieldLabel, u32)>,
}

impl OperandMap {
    /// Creates an empty operand map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(label, value)` pairs.
    pub fn from_pairs(pairs: &[(FieldLabel, u32)]) -> Self {
        let mut map = Self::new();
        for &(label, value) in pairs {
            map.insert(label, value);
        }
        map
    }

    /// Returns the value bound to `label`, if any.
    pub fn get(&self, label: FieldLabel) -> Option<u32> {
        self.entries
            .binary_search_by_key(&label, |&(l, _)| l)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Binds `value` to `label`, replacing any previous binding.
    pub fn insert(&mut self, label: FieldLabel, value: u32) {
        match self.entries.binary_search_by_key(&label, |&(l, _)| l) {
            Ok(i) => self.entries[i].1 = value,
            Err(i) => self.entries.insert(i, (label, value)),
        }
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no field is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(label, value)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldLabel, u32)> + '_ {
        self.entries.iter().copied()
    }
}
