//! Quick sort with Hoare partitioning.
//!
//! The pivot is always the first element of the range. Already sorted or
//! reverse sorted input therefore degrades to O(n²) comparisons and O(n)
//! recursion depth. That is the behaviour being visualized, so it is kept.

use std::cmp::Ordering;

use crate::engine::{SortAccess, Step};
use crate::state::HighlightRole;

pub(super) fn sort(access: &mut SortAccess<'_>) -> Step {
    let len = access.len();
    quick_sort(access, 0, len - 1)
}

fn quick_sort(access: &mut SortAccess<'_>, lo: usize, hi: usize) -> Step {
    if lo < hi {
        let split = partition(access, lo, hi)?;
        access.mark_and_pace(HighlightRole::Current, Some(split), 1.0)?;
        quick_sort(access, lo, split)?;
        quick_sort(access, split + 1, hi)?;
    }
    Ok(())
}

/// Partition `lo..=hi` around the value at `lo`. Returns `split` such that
/// every element of `lo..=split` is `<=` every element of `split+1..=hi`,
/// with `lo <= split < hi`.
fn partition(access: &mut SortAccess<'_>, lo: usize, hi: usize) -> Step<usize> {
    let pivot = access.pivot(lo)?;
    let mut i = lo;
    let mut j = hi;
    loop {
        while i < hi && access.compare_to(i, pivot, HighlightRole::CompareA)? == Ordering::Less {
            i += 1;
        }
        while j > lo && access.compare_to(j, pivot, HighlightRole::CompareB)? == Ordering::Greater
        {
            j -= 1;
        }
        if i >= j {
            return Ok(j);
        }
        access.swap(i, j)?;
        i += 1;
        j -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::super::Algorithm;
    use super::super::tests::run_instant;

    #[test]
    fn five_element_scenario() {
        let snap = run_instant(Algorithm::Quick, vec![2, 1, 4, 3, 0]).snapshot();
        assert_eq!(snap.values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn handles_duplicates() {
        let snap = run_instant(Algorithm::Quick, vec![3, 1, 3, 0, 1, 3, 2]).snapshot();
        assert_eq!(snap.values, vec![0, 1, 1, 2, 3, 3, 3]);
    }

    #[test]
    fn two_elements() {
        let snap = run_instant(Algorithm::Quick, vec![1, 0]).snapshot();
        assert_eq!(snap.values, vec![0, 1]);
        assert_eq!(snap.counters.swaps, 1);
    }

    #[test]
    fn sorted_input_is_quadratic() {
        // First-element pivot on sorted input peels one element per level.
        let n = 64u64;
        let snap = run_instant(Algorithm::Quick, (0..n as u32).collect()).snapshot();
        assert!(snap.is_sorted());
        assert_eq!(snap.counters.swaps, 0);
        assert!(
            snap.counters.comparisons >= n * (n - 1) / 2,
            "only {} comparisons",
            snap.counters.comparisons
        );
    }

    #[test]
    fn pivot_capture_is_not_an_access() {
        let snap = run_instant(Algorithm::Quick, vec![5, 2, 7, 0, 3, 6, 1, 4]).snapshot();
        assert!(snap.is_sorted());
        assert!(snap.counters.swaps > 0);
        assert_eq!(snap.counters.accesses, 2 * snap.counters.swaps);
    }
}
