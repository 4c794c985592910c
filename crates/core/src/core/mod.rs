//! Simulated core: architectural state and the execution engine.

pub mod arch;
pub mod cpu;

pub use cpu::{Cpu, Effect};
