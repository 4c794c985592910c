//! Cache replacement policies.
//!
//! Implements the victim-selection algorithms for associative cache rows.
//!
//! # Policies
//!
//! - `Fifo`: First-In, First-Out.
//! - `Lru`: Least Recently Used.
//! - `Random`: Pseudo-random selection.

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

/// Pseudo-random replacement policy.
pub mod random;

pub use fifo::FifoPolicy;
pub use lru::LruPolicy;
pub use random::RandomPolicy;

/// Trait for cache replacement policies.
///
/// A policy observes accesses and insertions per row and selects victim ways.
/// Insertion and access are reported separately so insertion-order policies
/// are not perturbed by hits.
pub trait ReplacementPolicy: Send + Sync {
    /// Records an access to a resident line.
    ///
    /// # Arguments
    ///
    /// * `row` - The cache row index.
    /// * `way` - The way within the row that was accessed.
    fn touch(&mut self, row: usize, way: usize);

    /// Records the insertion of a new line.
    ///
    /// # Arguments
    ///
    /// * `row` - The cache row index.
    /// * `way` - The way the line was inserted into.
    fn filled(&mut self, row: usize, way: usize);

    /// Selects and commits the victim way for the next insertion into `row`.
    fn victim(&mut self, row: usize) -> usize;

    /// Reports the way [`Self::victim`] would select, without advancing any
    /// internal state.
    fn peek_victim(&self, row: usize) -> usize;
}
