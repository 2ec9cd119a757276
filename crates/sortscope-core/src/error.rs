//! Error types for the sort engine.

use thiserror::Error;

/// Errors surfaced by the engine and the session API.
///
/// A cooperative stop is not an error: it is reported as
/// [`RunOutcome::Stopped`](crate::RunOutcome::Stopped). Only faults that
/// end a run abnormally, and caller mistakes, show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An algorithm addressed an element outside the array.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the array at the time of the access.
        len: usize,
    },

    /// A run is already in progress.
    #[error("a sort is already running")]
    AlreadyRunning,

    /// The pause wait was interrupted by a shutdown rather than a stop request.
    #[error("paused run interrupted by shutdown")]
    InterruptedWhilePaused,

    /// Arrays must hold at least two elements.
    #[error("array of length {len} is too short, at least 2 elements are required")]
    TooFewElements {
        /// Requested length.
        len: usize,
    },

    /// The worker thread could not be started.
    #[error("failed to spawn sort worker: {0}")]
    Spawn(String),

    /// The worker thread panicked before reporting an outcome.
    #[error("sort worker panicked")]
    RunPanicked,
}

impl EngineError {
    /// Create an index-out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        EngineError::IndexOutOfRange { index, len }
    }
}
