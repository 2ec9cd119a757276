//! Bubble sort.

use std::cmp::Ordering;

use crate::engine::{SortAccess, Step};

/// Compare adjacent pairs, swapping when out of order. Each pass carries the
/// largest remaining element to the end, so the outer bound shrinks by one.
/// There is no early exit: a full run always costs `n(n-1)/2` comparisons.
pub(super) fn sort(access: &mut SortAccess<'_>) -> Step {
    for end in (1..access.len()).rev() {
        for j in 0..end {
            if access.compare(j, j + 1)? == Ordering::Greater {
                access.swap(j, j + 1)?;
            }
        }
    }
    Ok(())
}
