//! Insertion sort.

use std::cmp::Ordering;

use crate::engine::{SortAccess, Step};
use crate::state::HighlightRole;

/// Grow a sorted prefix, shifting each new element backward by adjacent
/// swaps until its left neighbour is not larger.
pub(super) fn sort(access: &mut SortAccess<'_>) -> Step {
    for i in 1..access.len() {
        access.mark(HighlightRole::Current, Some(i))?;
        let mut pos = i;
        while pos > 0 && access.compare(pos - 1, pos)? == Ordering::Greater {
            access.swap(pos - 1, pos)?;
            pos -= 1;
        }
    }
    Ok(())
}
