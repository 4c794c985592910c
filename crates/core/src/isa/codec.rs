//! Bit-field instruction codec.
//!
//! This module converts between 32-bit instruction words and operand maps.
//! It provides:
//! 1. **Encoding:** Folding a kind's layout and operand map into a word,
//!    most-significant field first.
//! 2. **Decoding:** First-match scanning of [`Kind::ALL`], comparing static
//!    fields and extracting operands.
//! 3. **Byte Order:** Splitting and joining instruction words for storage
//!    under either endianness.
//!
//! Both directions are driven entirely by the per-kind layouts in
//! [`crate::isa::kind`]; no instruction-specific bit twiddling lives here.

use tracing::warn;

use crate::common::constants::INSTRUCTION_BITS;
use crate::config::Endianness;

use super::field::{FieldLabel, OperandMap};
use super::kind::Kind;

/// Encodes an instruction kind and its operands into a 32-bit word.
///
/// Fields are folded most-significant first. An operand absent from `ops`
/// encodes as zero bits and a warning is logged; the result is still a
/// best-effort word. Operand values wider than their field are truncated to
/// the field width.
///
/// Returns `None` when the kind has no machine encoding (pseudo-instructions)
/// or its layout does not cover exactly 32 bits.
pub fn encode(kind: Kind, ops: &OperandMap) -> Option<u32> {
    let fields = kind.fields();
    let total: u32 = fields.iter().map(|f| f.width).sum();
    if total != INSTRUCTION_BITS {
        return None;
    }

    let mut word: u32 = 0;
    for field in fields {
        let bits = match field.fixed {
            Some(bits) => bits,
            None => ops.get(field.label).unwrap_or_else(|| {
                warn!(
                    kind = kind.mnemonic(),
                    field = ?field.label,
                    "operand missing during encode, emitting zero bits"
                );
                0
            }),
        };
        word = (word << field.width) | (bits & mask(field.width));
    }
    Some(word)
}

/// Decodes a 32-bit word into the first matching instruction kind.
///
/// Kinds are tried in [`Kind::ALL`] declaration order; a kind matches when
/// every static field equals the corresponding bits of the word. Operand
/// fields of the winning kind are extracted into the returned map.
///
/// Returns `None` when no kind matches.
pub fn decode(word: u32) -> Option<(Kind, OperandMap)> {
    Kind::ALL
        .iter()
        .filter(|kind| !kind.is_pseudo())
        .find_map(|&kind| try_decode(kind, word).map(|ops| (kind, ops)))
}

/// Attempts to match `word` against a single kind's layout.
fn try_decode(kind: Kind, word: u32) -> Option<OperandMap> {
    let mut ops = OperandMap::new();
    let mut shift = INSTRUCTION_BITS;
    for field in kind.fields() {
        shift -= field.width;
        let bits = (word >> shift) & mask(field.width);
        match field.fixed {
            Some(expected) if bits != expected => return None,
            Some(_) => {}
            None => ops.insert(field.label, bits),
        }
    }
    Some(ops)
}

/// Returns `true` when `value` fits the maximum width of `label`.
pub fn fits(label: FieldLabel, value: u32) -> bool {
    value <= mask(label.max_width())
}

/// Splits an instruction word into bytes for storage.
pub fn to_bytes(word: u32, endianness: Endianness) -> [u8; 4] {
    match endianness {
        Endianness::Little => word.to_le_bytes(),
        Endianness::Big => word.to_be_bytes(),
    }
}

/// Joins stored bytes back into an instruction word.
pub fn from_bytes(bytes: [u8; 4], endianness: Endianness) -> u32 {
    match endianness {
        Endianness::Little => u32::from_le_bytes(bytes),
        Endianness::Big => u32::from_be_bytes(bytes),
    }
}

const fn mask(width: u32) -> u32 {
    if width >= 32 { u32::MAX } else { (1u32 << width) - 1 }
}
