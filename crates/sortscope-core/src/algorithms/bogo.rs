//! Bogo sort.

use std::cmp::Ordering;

use rand::Rng;

use crate::engine::{SortAccess, Step};

/// Check sortedness; if unsorted, swap every position with a random one and
/// try again. Unbounded in the worst case, but every comparison and swap is
/// a checkpoint, so a stop request always lands. The random source is the
/// engine's seeded one, so a given seed replays the same permutations.
pub(super) fn sort(access: &mut SortAccess<'_>) -> Step {
    let len = access.len();
    while !is_sorted(access)? {
        for i in 0..len {
            let j = access.rng().random_range(0..len);
            access.swap(i, j)?;
        }
    }
    Ok(())
}

fn is_sorted(access: &mut SortAccess<'_>) -> Step<bool> {
    for i in 1..access.len() {
        if access.compare(i - 1, i)? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}
