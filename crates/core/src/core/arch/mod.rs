//! Architectural state: register files, CSRs, and privilege modes.

pub mod csr;
pub mod gpr;
pub mod mode;

pub use csr::Csrs;
pub use gpr::Gpr;
pub use mode::PrivilegeMode;
