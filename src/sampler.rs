//! Bounded random sampling
//!
//! Shuffle-then-take over an owned pool. The pool is always a request-scoped
//! copy, so shuffling never touches a framework's stored question list.

use rand::Rng;

/// Unbiased in-place permutation (end-to-start Fisher-Yates).
///
/// For `i` from `len - 1` down to 1, swap slot `i` with a uniformly chosen
/// slot in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Take at most `count` items from `pool`, chosen uniformly at random.
///
/// A pool that already fits is returned as-is, in its original order.
/// `count == 0` yields nothing.
pub fn sample<T, R: Rng + ?Sized>(mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    if count == 0 {
        return Vec::new();
    }
    if pool.len() <= count {
        return pool;
    }
    shuffle(&mut pool, rng);
    pool.truncate(count);
    pool
}
