//! Sortscope Core - instrumented sort execution engine
//!
//! This crate runs textbook comparison sorts one primitive operation at a
//! time so that a renderer and an audio layer can watch them live. Every
//! compare and swap goes through the engine, which paces it to a human
//! timescale and honours pause/resume/stop requests in between.
//!
//! # Core Abstractions
//!
//! - [`SharedArrayState`] - Array, highlight slots and counters behind one lock
//! - [`PacingPolicy`] - Step delay as a function of element count and speed
//! - [`ControlSignal`] - Running / pause-requested / stop-requested, with a
//!   blocking [`checkpoint`](ControlSignal::checkpoint)
//! - [`SortEngine`] - Drives one [`Algorithm`] through a [`SortAccess`]
//! - [`Session`] - Worker thread management, run handles and snapshots
//!
//! # Example
//!
//! ```rust
//! use sortscope_core::{Algorithm, RunOutcome, Session, SessionConfig};
//!
//! let session = Session::new(SessionConfig::instant().with_seed(11)).unwrap();
//! let run = session.start_run(Algorithm::Quick, 64).unwrap();
//!
//! // A renderer would poll this from its own thread.
//! let _frame = session.snapshot();
//!
//! assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);
//! let done = session.snapshot();
//! assert!(done.is_sorted());
//! assert!(done.counters.comparisons > 0);
//! ```
//!
//! # Threading
//!
//! Exactly one worker thread mutates the state during a run. Control
//! surfaces only touch the run's [`ControlSignal`] through a [`RunHandle`];
//! observers only call [`Session::snapshot`]. A stop request takes effect at
//! the next checkpoint, which is at most one pacing delay away.

pub mod algorithms;
pub mod control;
pub mod engine;
pub mod error;
pub mod pacing;
pub mod session;
pub mod state;

pub use algorithms::{Algorithm, UnknownAlgorithm};
pub use control::{ControlSignal, ControlState, StopCause};
pub use engine::{Halt, RunOutcome, SortAccess, SortEngine, Step};
pub use error::EngineError;
pub use pacing::{DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, DEFAULT_SPEED, MAX_SPEED, PacingPolicy};
pub use session::{DEFAULT_ELEMENTS, RunHandle, RunStatus, Session, SessionConfig};
pub use state::{
    Counters, HighlightRole, MIN_ELEMENTS, ROLE_COUNT, SharedArrayState, Snapshot,
};
