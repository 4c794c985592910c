//! First-In, First-Out (FIFO) replacement policy.
//!
//! Evicts the oldest line in a row regardless of how recently it was
//! accessed. Each row carries a round-robin pointer that advances when a
//! line is inserted; hits leave the order untouched.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(R) where R is the number of rows
//! - **Best Case:** Streaming accesses where all lines matter equally
//! - **Worst Case:** Strong temporal locality (evicts frequently-used lines)

use super::ReplacementPolicy;

/// FIFO policy state.
pub struct FifoPolicy {
    /// The next way to evict, per row.
    next_way: Vec<usize>,
    /// Associativity of the cache.
    ways: usize,
}

impl FifoPolicy {
    /// Creates a FIFO policy for a cache of `rows` rows of `ways` ways.
    pub fn new(rows: usize, ways: usize) -> Self {
        Self {
            next_way: vec![0; rows],
            ways,
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Hits do not affect insertion order.
    fn touch(&mut self, _row: usize, _way: usize) {}

    /// Advances the round-robin pointer past a newly inserted line.
    fn filled(&mut self, row: usize, way: usize) {
        if self.next_way[row] == way {
            self.next_way[row] = (self.next_way[row] + 1) % self.ways;
        }
    }

    fn victim(&mut self, row: usize) -> usize {
        self.next_way[row]
    }

    fn peek_victim(&self, row: usize) -> usize {
        self.next_way[row]
    }
}
