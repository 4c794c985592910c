//! Shared test fixtures.

use rivet_core::config::Config;
use rivet_core::isa::codec;
use rivet_core::isa::field::{FieldLabel, OperandMap};
use rivet_core::isa::kind::Kind;
use rivet_core::Cpu;

/// Installs the log subscriber so `RUST_LOG` reveals simulator traces from
/// failing tests. Safe to call from every fixture; only the first install
/// wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builds a cacheless core with `words` loaded at address zero.
pub fn cpu_with_program(words: &[u32]) -> Cpu {
    init_tracing();
    let config = Config::default();
    let mut cpu = Cpu::new(&config);
    cpu.load_image(0, words).unwrap();
    cpu
}

/// Encodes an instruction from `(label, value)` pairs, panicking on
/// unencodable kinds so tests fail loudly.
pub fn assemble(kind: Kind, pairs: &[(FieldLabel, u32)]) -> u32 {
    codec::encode(kind, &OperandMap::from_pairs(pairs)).unwrap()
}
