//! Instruction-kind metadata tests.

use pretty_assertions::assert_eq;

use rivet_core::isa::abi;
use rivet_core::isa::kind::{Extension, Kind};

/// `ALL` lists every kind exactly once.
#[test]
fn all_has_no_duplicates() {
    let mut seen = std::collections::HashSet::new();
    for &kind in Kind::ALL {
        assert!(seen.insert(kind), "{kind:?} listed twice");
    }
}

/// Pseudo-instructions point at the canonical form they lower to; real
/// instructions have none.
#[test]
fn base_pointers_partition_the_set() {
    for &kind in Kind::ALL {
        if kind.is_pseudo() {
            let base = kind.base().expect("pseudo must name a base");
            assert!(!base.is_pseudo(), "{kind:?} must lower to a real kind");
        } else {
            assert_eq!(kind.base(), None, "{kind:?} is already canonical");
        }
    }
}

/// Real instructions occupy one word; pseudos reserve their worst case.
#[test]
fn word_counts_bound_expansion() {
    for &kind in Kind::ALL.iter().filter(|k| !k.is_pseudo()) {
        assert_eq!(kind.words(), 1);
    }
    assert_eq!(Kind::Li.words(), 8);
    assert_eq!(Kind::Call.words(), 2);
    assert_eq!(Kind::Tail.words(), 2);
    assert_eq!(Kind::La.words(), 2);
    assert_eq!(Kind::Mv.words(), 1);
}

#[test]
fn extensions_gate_multiply_and_csr_kinds() {
    assert_eq!(Kind::Add.extensions(), &[Extension::I]);
    assert!(Kind::Divw.extensions().contains(&Extension::M));
    assert!(Kind::Csrrwi.extensions().contains(&Extension::Zicsr));
}

#[test]
fn shapes_describe_operand_lists() {
    assert_eq!(Kind::Add.shape(), "register,register,register");
    assert_eq!(Kind::Lw.shape(), "register,immediate(register)");
    assert_eq!(Kind::Li.shape(), "register,immediate");
    assert_eq!(Kind::Ret.shape(), "");
}

#[test]
fn mnemonics_are_lowercase_and_unique() {
    let mut seen = std::collections::HashSet::new();
    for &kind in Kind::ALL {
        let m = kind.mnemonic();
        assert_eq!(m, m.to_lowercase());
        assert!(seen.insert(m), "mnemonic {m} reused");
    }
}

#[test]
fn abi_names_round_trip() {
    for i in 0..32 {
        let name = abi::name(i).unwrap();
        assert_eq!(abi::lookup(name), Some(i));
        assert_eq!(abi::lookup(&format!("x{i}")), Some(i));
    }
    assert_eq!(abi::lookup("fp"), Some(8));
    assert_eq!(abi::lookup("x32"), None);
    assert_eq!(abi::name(32), None);
}
