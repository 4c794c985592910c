//! Common utilities and types used throughout the simulator core.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the simulator. It includes:
//! 1. **Constants:** System-wide constants for word sizes and instruction widths.
//! 2. **Error Handling:** The error taxonomy for codec, expansion, execution,
//!    memory/cache, and CSR access failures.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for all recoverable simulator failures.
pub mod error;

pub use error::{CsrError, ExecError, ExpandError, ImmOverflow, MemError};
