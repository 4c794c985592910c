//! Least Recently Used (LRU) replacement policy.
//!
//! Evicts the line that has gone unaccessed the longest. Each row keeps a
//! usage stack; an accessed or inserted way moves to the top (most recently
//! used) and the bottom of the stack is the victim.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(W) where W is the associativity
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(R × W) where R is the number of rows
//! - **Best Case:** Accesses with good temporal locality
//! - **Worst Case:** Scans larger than cache capacity (thrashing)

use super::ReplacementPolicy;

/// LRU policy state.
pub struct LruPolicy {
    /// One usage stack per row. Index 0 is most recently used, the last
    /// index is the victim.
    usage: Vec<Vec<usize>>,
}

impl LruPolicy {
    /// Creates an LRU policy for a cache of `rows` rows of `ways` ways.
    pub fn new(rows: usize, ways: usize) -> Self {
        let mut usage = Vec::with_capacity(rows);
        for _ in 0..rows {
            usage.push((0..ways).collect());
        }
        Self { usage }
    }

    fn promote(&mut self, row: usize, way: usize) {
        let stack = &mut self.usage[row];
        if let Some(pos) = stack.iter().position(|&x| x == way) {
            stack.remove(pos);
        }
        stack.insert(0, way);
    }
}

impl ReplacementPolicy for LruPolicy {
    /// Moves the accessed way to the most-recently-used position.
    fn touch(&mut self, row: usize, way: usize) {
        self.promote(row, way);
    }

    /// Newly inserted lines start at the most-recently-used position.
    fn filled(&mut self, row: usize, way: usize) {
        self.promote(row, way);
    }

    fn victim(&mut self, row: usize) -> usize {
        self.peek_victim(row)
    }

    /// Returns the way at the bottom of the usage stack.
    fn peek_victim(&self, row: usize) -> usize {
        self.usage[row].last().copied().unwrap_or(0)
    }
}
