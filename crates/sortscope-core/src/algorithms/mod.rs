//! The closed set of visualized sorting algorithms.
//!
//! Each algorithm is plain step sequencing over a [`SortAccess`]. None of
//! them knows about pausing or pacing: the engine intercepts every
//! primitive, and the algorithms just propagate [`Halt`](crate::Halt) with `?`.

mod bogo;
mod bubble;
mod insertion;
mod quick;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{SortAccess, Step};

/// A sorting algorithm the engine can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Adjacent-pair bubble sort with a shrinking outer bound.
    Bubble,
    /// Insertion sort by repeated backward swaps.
    Insertion,
    /// Recursive quick sort, Hoare partition, first element as pivot.
    Quick,
    /// Random permutation until sorted.
    Bogo,
}

impl Algorithm {
    /// All algorithms, in menu order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Quick,
        Algorithm::Bogo,
    ];

    /// Stable identifier used on the command line and in settings files.
    pub const fn id(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Quick => "quick",
            Algorithm::Bogo => "bogo",
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Bogo => "Bogo Sort",
        }
    }

    /// Average time complexity, for display.
    pub const fn time_complexity(self) -> &'static str {
        match self {
            Algorithm::Bubble | Algorithm::Insertion => "O(n^2)",
            Algorithm::Quick => "O(n log n)",
            Algorithm::Bogo => "O(n * n!)",
        }
    }

    /// Auxiliary space complexity, for display.
    pub const fn space_complexity(self) -> &'static str {
        match self {
            Algorithm::Bubble | Algorithm::Insertion | Algorithm::Bogo => "O(1)",
            Algorithm::Quick => "O(log n)",
        }
    }

    /// Sort the array behind `access` in ascending order.
    pub fn sort(self, access: &mut SortAccess<'_>) -> Step {
        match self {
            Algorithm::Bubble => bubble::sort(access),
            Algorithm::Insertion => insertion::sort(access),
            Algorithm::Quick => quick::sort(access),
            Algorithm::Bogo => bogo::sort(access),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an algorithm id is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Parse an id, case-insensitively. A trailing `sort` is accepted
    /// (`"quicksort"`, `"bubble-sort"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let key = normalized
            .strip_suffix("sort")
            .map(|k| k.trim_end_matches(['-', '_', ' ']))
            .unwrap_or(normalized.as_str());
        Algorithm::ALL
            .into_iter()
            .find(|a| a.id() == key)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}
