//! Pseudo-random replacement policy.
//!
//! Evicts a uniformly chosen line from the row. Uses an xorshift generator
//! so victim sequences are deterministic across runs, which keeps simulation
//! results reproducible.

use super::ReplacementPolicy;

/// Random policy state.
pub struct RandomPolicy {
    /// Associativity of the cache.
    ways: usize,
    /// Internal xorshift generator state.
    state: u64,
}

impl RandomPolicy {
    /// Creates a Random policy for a cache of `ways` ways per row.
    ///
    /// # Arguments
    ///
    /// * `rows` - The number of rows (unused, required by the interface).
    /// * `ways` - The associativity of the cache.
    pub fn new(_rows: usize, ways: usize) -> Self {
        Self {
            ways,
            state: 123_456_789,
        }
    }

    fn next(state: u64) -> u64 {
        let mut x = state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        x
    }
}

impl ReplacementPolicy for RandomPolicy {
    /// Access patterns do not affect random selection.
    fn touch(&mut self, _row: usize, _way: usize) {}

    fn filled(&mut self, _row: usize, _way: usize) {}

    /// Advances the generator and maps its output to a way index.
    fn victim(&mut self, _row: usize) -> usize {
        self.state = Self::next(self.state);
        (self.state as usize) % self.ways
    }

    /// Computes the next selection without advancing the generator.
    fn peek_victim(&self, _row: usize) -> usize {
        (Self::next(self.state) as usize) % self.ways
    }
}
