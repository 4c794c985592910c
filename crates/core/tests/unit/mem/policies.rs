//! Replacement policy tests.
//!
//! Exercises each policy in isolation through the `ReplacementPolicy`
//! interface: `touch` on access, `filled` on insertion, `victim`/
//! `peek_victim` for selection.

use rivet_core::mem::policies::{FifoPolicy, LruPolicy, RandomPolicy, ReplacementPolicy};

// ══════════════════════════════════════════════════════════
// 1. LRU
// ══════════════════════════════════════════════════════════

/// Initial stack is [0, 1, .., W-1] with way 0 most recent.
#[test]
fn lru_initial_victim_is_last_way() {
    let mut policy = LruPolicy::new(1, 4);
    assert_eq!(policy.victim(0), 3);
}

/// Touching ways in order 0,1,2,3 makes 0 the least recently used.
#[test]
fn lru_sequential_touches_reorder() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.touch(0, way);
    }
    assert_eq!(policy.victim(0), 0);
}

#[test]
fn lru_reaccess_promotes() {
    let mut policy = LruPolicy::new(1, 4);
    for way in 0..4 {
        policy.touch(0, way);
    }
    policy.touch(0, 0);
    assert_eq!(policy.victim(0), 1);
    policy.touch(0, 1);
    assert_eq!(policy.victim(0), 2);
}

/// Insertions count as uses, same as touches.
#[test]
fn lru_fill_promotes_like_touch() {
    let mut policy = LruPolicy::new(1, 2);
    policy.filled(0, 1);
    assert_eq!(policy.victim(0), 0);
}

#[test]
fn lru_rows_are_independent() {
    let mut policy = LruPolicy::new(2, 2);
    policy.touch(0, 0);
    policy.touch(0, 1);
    assert_eq!(policy.victim(0), 0);
    assert_eq!(policy.victim(1), 1); // row 1 untouched.
}

// ══════════════════════════════════════════════════════════
// 2. FIFO
// ══════════════════════════════════════════════════════════

/// The pointer advances on insertion only.
#[test]
fn fifo_advances_on_fill() {
    let mut policy = FifoPolicy::new(1, 2);
    assert_eq!(policy.victim(0), 0);
    policy.filled(0, 0);
    assert_eq!(policy.victim(0), 1);
    policy.filled(0, 1);
    assert_eq!(policy.victim(0), 0);
}

/// Hits leave insertion order untouched.
#[test]
fn fifo_ignores_touches() {
    let mut policy = FifoPolicy::new(1, 2);
    policy.filled(0, 0);
    policy.filled(0, 1);
    policy.touch(0, 0);
    policy.touch(0, 0);
    assert_eq!(policy.victim(0), 0);
}

#[test]
fn fifo_pointer_wraps() {
    let mut policy = FifoPolicy::new(1, 3);
    for way in 0..3 {
        policy.filled(0, way);
    }
    assert_eq!(policy.victim(0), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Random
// ══════════════════════════════════════════════════════════

/// Victims stay within the row and the sequence is deterministic.
#[test]
fn random_is_bounded_and_deterministic() {
    let mut a = RandomPolicy::new(1, 4);
    let mut b = RandomPolicy::new(1, 4);
    for _ in 0..64 {
        let victim = a.victim(0);
        assert!(victim < 4);
        assert_eq!(victim, b.victim(0));
    }
}

/// `peek_victim` predicts the next selection without consuming it.
#[test]
fn random_peek_matches_next_victim() {
    let mut policy = RandomPolicy::new(1, 4);
    for _ in 0..16 {
        let peeked = policy.peek_victim(0);
        assert_eq!(policy.victim(0), peeked);
    }
}

#[test]
fn random_ignores_touches() {
    let mut touched = RandomPolicy::new(1, 4);
    let mut untouched = RandomPolicy::new(1, 4);
    touched.touch(0, 2);
    touched.filled(0, 1);
    assert_eq!(touched.victim(0), untouched.victim(0));
}
