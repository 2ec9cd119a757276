//! Shared array state observed by renderers while a sort mutates it.
//!
//! [`SharedArrayState`] is a cheaply cloneable handle around the array,
//! its highlight slots and the run counters. Every accessor takes the lock
//! once, so a swap is a single indivisible mutation from any reader's point
//! of view and a [`Snapshot`] never contains a half-applied exchange.

use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::error::EngineError;

/// Number of highlight roles.
pub const ROLE_COUNT: usize = 3;

/// Smallest array the engine accepts.
pub const MIN_ELEMENTS: usize = 2;

/// Named highlight slot with a stable meaning for renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRole {
    /// Element currently being processed (outer loop position, sweep cursor).
    Current,
    /// First element of the latest compare or swap.
    CompareA,
    /// Second element of the latest compare or swap.
    CompareB,
}

impl HighlightRole {
    /// All roles in slot order.
    pub const ALL: [HighlightRole; ROLE_COUNT] = [
        HighlightRole::Current,
        HighlightRole::CompareA,
        HighlightRole::CompareB,
    ];

    /// Slot index of this role.
    pub const fn index(self) -> usize {
        match self {
            HighlightRole::Current => 0,
            HighlightRole::CompareA => 1,
            HighlightRole::CompareB => 2,
        }
    }

    /// Human-readable role name.
    pub const fn name(self) -> &'static str {
        match self {
            HighlightRole::Current => "current",
            HighlightRole::CompareA => "compare-a",
            HighlightRole::CompareB => "compare-b",
        }
    }
}

/// Running counters for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Element comparisons performed.
    pub comparisons: u64,
    /// Element reads and writes performed (a swap counts 2).
    pub accesses: u64,
    /// Completed element exchanges.
    pub swaps: u64,
}

/// Point-in-time copy of the shared state, handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Array contents.
    pub values: Vec<u32>,
    /// Highlighted index per role, `None` when the slot is empty.
    pub highlights: [Option<usize>; ROLE_COUNT],
    /// Counters at the time of the copy.
    pub counters: Counters,
}

impl Snapshot {
    /// Highlighted index for a role.
    pub fn highlight(&self, role: HighlightRole) -> Option<usize> {
        self.highlights[role.index()]
    }

    /// Whether `values` is in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }
}

#[derive(Debug)]
struct ArrayData {
    values: Vec<u32>,
    highlights: [Option<usize>; ROLE_COUNT],
    counters: Counters,
}

impl ArrayData {
    fn check(&self, index: usize) -> Result<(), EngineError> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(EngineError::out_of_range(index, self.values.len()))
        }
    }
}

/// Array, highlight slots and counters behind a single lock.
///
/// Cloning the handle shares the same underlying state. The sort worker is
/// the only writer during a run; renderers read through [`snapshot`](Self::snapshot).
#[derive(Clone, Debug)]
pub struct SharedArrayState {
    inner: Arc<Mutex<ArrayData>>,
}

impl SharedArrayState {
    /// Create a state holding `0..n` in ascending order.
    pub fn new(n: usize) -> Result<Self, EngineError> {
        Self::from_values(identity(n)?)
    }

    /// Create a state holding the given values.
    pub fn from_values(values: Vec<u32>) -> Result<Self, EngineError> {
        check_len(values.len())?;
        Ok(Self {
            inner: Arc::new(Mutex::new(ArrayData {
                values,
                highlights: [None; ROLE_COUNT],
                counters: Counters::default(),
            })),
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.lock().values.len()
    }

    /// Always false: the array holds at least [`MIN_ELEMENTS`] values.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().values.is_empty()
    }

    /// Read one element, counting one access.
    pub fn get(&self, index: usize) -> Result<u32, EngineError> {
        let mut data = self.inner.lock();
        data.check(index)?;
        data.counters.accesses += 1;
        Ok(data.values[index])
    }

    /// Read one element without counting it. Used to hold a pivot, whose
    /// cost is carried by the comparisons made against it.
    pub fn peek(&self, index: usize) -> Result<u32, EngineError> {
        let data = self.inner.lock();
        data.check(index)?;
        Ok(data.values[index])
    }

    /// Write one element, counting one access.
    pub fn set(&self, index: usize, value: u32) -> Result<(), EngineError> {
        let mut data = self.inner.lock();
        data.check(index)?;
        data.counters.accesses += 1;
        data.values[index] = value;
        Ok(())
    }

    /// Exchange two elements and mark them as compare-a/compare-b.
    ///
    /// Counts two accesses and one swap. Both indices are validated before
    /// anything changes, so a failed swap leaves the array untouched.
    pub fn swap(&self, a: usize, b: usize) -> Result<(), EngineError> {
        let mut data = self.inner.lock();
        data.check(a)?;
        data.check(b)?;
        data.values.swap(a, b);
        data.counters.accesses += 2;
        data.counters.swaps += 1;
        data.highlights[HighlightRole::CompareA.index()] = Some(a);
        data.highlights[HighlightRole::CompareB.index()] = Some(b);
        Ok(())
    }

    /// Compare two elements, counting one comparison and no accesses.
    pub fn compare(&self, a: usize, b: usize) -> Result<Ordering, EngineError> {
        let mut data = self.inner.lock();
        data.check(a)?;
        data.check(b)?;
        data.counters.comparisons += 1;
        Ok(data.values[a].cmp(&data.values[b]))
    }

    /// Compare an element against a held value (a pivot), counting one comparison.
    pub fn compare_value(&self, index: usize, value: u32) -> Result<Ordering, EngineError> {
        let mut data = self.inner.lock();
        data.check(index)?;
        data.counters.comparisons += 1;
        Ok(data.values[index].cmp(&value))
    }

    /// Set a highlight slot. `None` clears it.
    pub fn mark(&self, role: HighlightRole, index: Option<usize>) -> Result<(), EngineError> {
        let mut data = self.inner.lock();
        if let Some(i) = index {
            data.check(i)?;
        }
        data.highlights[role.index()] = index;
        Ok(())
    }

    /// Clear every highlight slot.
    pub fn clear_highlights(&self) {
        self.inner.lock().highlights = [None; ROLE_COUNT];
    }

    /// Count one comparison performed outside [`compare`](Self::compare).
    pub fn record_comparison(&self) {
        self.inner.lock().counters.comparisons += 1;
    }

    /// Zero the counters.
    pub fn reset_counters(&self) {
        self.inner.lock().counters = Counters::default();
    }

    /// Reinitialize to `0..n` unshuffled, clearing counters and highlights.
    ///
    /// Must not be called while a run is in progress; the session enforces this.
    pub fn reset(&self, n: usize) -> Result<(), EngineError> {
        self.replace(identity(n)?)
    }

    /// Replace the array contents, clearing counters and highlights.
    pub fn replace(&self, values: Vec<u32>) -> Result<(), EngineError> {
        check_len(values.len())?;
        let mut data = self.inner.lock();
        data.values = values;
        data.highlights = [None; ROLE_COUNT];
        data.counters = Counters::default();
        Ok(())
    }

    /// Shuffle the array in place without touching counters.
    pub fn shuffle<R: Rng + ?Sized>(&self, rng: &mut R) {
        self.inner.lock().values.shuffle(rng);
    }

    /// Current counters.
    pub fn counters(&self) -> Counters {
        self.inner.lock().counters
    }

    /// Copy of the whole state, taken under one lock.
    pub fn snapshot(&self) -> Snapshot {
        let data = self.inner.lock();
        Snapshot {
            values: data.values.clone(),
            highlights: data.highlights,
            counters: data.counters,
        }
    }
}

/// Fail with [`EngineError::TooFewElements`] below [`MIN_ELEMENTS`].
pub(crate) fn check_len(len: usize) -> Result<(), EngineError> {
    if len < MIN_ELEMENTS {
        return Err(EngineError::TooFewElements { len });
    }
    Ok(())
}

/// `0..n` in ascending order.
pub(crate) fn identity(n: usize) -> Result<Vec<u32>, EngineError> {
    check_len(n)?;
    Ok((0..n as u32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn new_holds_identity() {
        let state = SharedArrayState::new(5).unwrap();
        assert_eq!(state.snapshot().values, vec![0, 1, 2, 3, 4]);
        assert_eq!(state.counters(), Counters::default());
    }

    #[test]
    fn rejects_single_element() {
        assert_eq!(
            SharedArrayState::new(1).unwrap_err(),
            EngineError::TooFewElements { len: 1 }
        );
        assert!(SharedArrayState::from_values(vec![]).is_err());
    }

    #[test]
    fn set_out_of_range_fails_without_clamping() {
        let state = SharedArrayState::new(3).unwrap();
        assert_eq!(
            state.set(3, 9).unwrap_err(),
            EngineError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(state.snapshot().values, vec![0, 1, 2]);
    }

    #[test]
    fn get_and_set_count_one_access_each() {
        let state = SharedArrayState::new(3).unwrap();
        state.set(0, 2).unwrap();
        assert_eq!(state.get(0).unwrap(), 2);
        assert_eq!(state.counters().accesses, 2);
    }

    #[test]
    fn peek_is_bounds_checked_and_uncounted() {
        let state = SharedArrayState::from_values(vec![4, 9]).unwrap();
        assert_eq!(state.peek(1).unwrap(), 9);
        assert_eq!(state.counters(), Counters::default());
        assert_eq!(
            state.peek(2).unwrap_err(),
            EngineError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn swap_counts_two_accesses_and_marks() {
        let state = SharedArrayState::new(4).unwrap();
        state.swap(0, 3).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.values, vec![3, 1, 2, 0]);
        assert_eq!(snap.counters.accesses, 2);
        assert_eq!(snap.counters.swaps, 1);
        assert_eq!(snap.highlight(HighlightRole::CompareA), Some(0));
        assert_eq!(snap.highlight(HighlightRole::CompareB), Some(3));
    }

    #[test]
    fn failed_swap_leaves_array_untouched() {
        let state = SharedArrayState::new(4).unwrap();
        assert!(state.swap(1, 4).is_err());
        let snap = state.snapshot();
        assert_eq!(snap.values, vec![0, 1, 2, 3]);
        assert_eq!(snap.counters, Counters::default());
    }

    #[test]
    fn compare_counts_comparison_only() {
        let state = SharedArrayState::from_values(vec![3, 1]).unwrap();
        assert_eq!(state.compare(0, 1).unwrap(), Ordering::Greater);
        assert_eq!(state.compare_value(1, 1).unwrap(), Ordering::Equal);
        let counters = state.counters();
        assert_eq!(counters.comparisons, 2);
        assert_eq!(counters.accesses, 0);
    }

    #[test]
    fn mark_validates_range() {
        let state = SharedArrayState::new(3).unwrap();
        state.mark(HighlightRole::Current, Some(2)).unwrap();
        assert!(state.mark(HighlightRole::Current, Some(3)).is_err());
        assert_eq!(state.snapshot().highlight(HighlightRole::Current), Some(2));
        state.mark(HighlightRole::Current, None).unwrap();
        assert_eq!(state.snapshot().highlight(HighlightRole::Current), None);
    }

    #[test]
    fn reset_clears_everything() {
        let state = SharedArrayState::from_values(vec![2, 0, 1]).unwrap();
        state.swap(0, 1).unwrap();
        state.record_comparison();
        state.reset(4).unwrap();
        let snap = state.snapshot();
        assert_eq!(snap.values, vec![0, 1, 2, 3]);
        assert_eq!(snap.highlights, [None; ROLE_COUNT]);
        assert_eq!(snap.counters, Counters::default());
    }

    #[test]
    fn shuffle_keeps_permutation_and_counters() {
        let state = SharedArrayState::new(64).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        state.shuffle(&mut rng);
        let mut values = state.snapshot().values;
        values.sort_unstable();
        assert_eq!(values, (0..64).collect::<Vec<u32>>());
        assert_eq!(state.counters(), Counters::default());
    }

    #[test]
    fn clones_share_storage() {
        let state = SharedArrayState::new(3).unwrap();
        let reader = state.clone();
        state.swap(0, 2).unwrap();
        assert_eq!(reader.snapshot().values, vec![2, 1, 0]);
    }
}
