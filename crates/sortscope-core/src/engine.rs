//! Sort engine: runs one algorithm against the shared state, intercepting
//! every primitive operation for pacing and cooperative interruption.
//!
//! Algorithms never see the [`ControlSignal`] or the [`PacingPolicy`]. They
//! receive a [`SortAccess`] whose primitives check the signal first, mutate
//! the state under its lock, then sleep for the pacing delay. A stop request
//! therefore takes effect within one pacing delay, and an in-flight swap is
//! either applied whole or not at all.

use std::cmp::Ordering;
use std::ops::ControlFlow;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::algorithms::Algorithm;
use crate::control::{ControlSignal, StopCause};
use crate::error::EngineError;
use crate::pacing::PacingPolicy;
use crate::state::{HighlightRole, SharedArrayState};

/// Pacing factor of one completion sweep step.
const SWEEP_FACTOR: f64 = 2.0;

/// How a run ended when it did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// The algorithm finished and the array is sorted.
    Completed,
    /// The run unwound at a checkpoint before finishing.
    Stopped,
}

/// Reason a primitive operation did not complete.
///
/// Algorithms propagate this with `?`; the engine decides what it means.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Halt {
    /// A checkpoint asked the run to unwind.
    Stop(StopCause),
    /// The algorithm made an invalid access.
    Fault(EngineError),
}

impl From<EngineError> for Halt {
    fn from(err: EngineError) -> Self {
        Halt::Fault(err)
    }
}

/// Result of a primitive operation.
pub type Step<T = ()> = Result<T, Halt>;

/// Restricted view of the array handed to an algorithm.
pub struct SortAccess<'a> {
    state: &'a SharedArrayState,
    control: &'a ControlSignal,
    pacing: &'a PacingPolicy,
    rng: SmallRng,
    len: usize,
}

impl<'a> SortAccess<'a> {
    fn new(
        state: &'a SharedArrayState,
        control: &'a ControlSignal,
        pacing: &'a PacingPolicy,
        seed: u64,
    ) -> Self {
        Self {
            len: state.len(),
            state,
            control,
            pacing,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of elements. Fixed for the whole run.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, arrays hold at least two elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-run random source, seeded by the engine.
    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Compare the elements at `a` and `b`, marking them compare-a/compare-b.
    pub fn compare(&mut self, a: usize, b: usize) -> Step<Ordering> {
        self.checkpoint()?;
        let ordering = self.state.compare(a, b)?;
        self.state.mark(HighlightRole::CompareA, Some(a))?;
        self.state.mark(HighlightRole::CompareB, Some(b))?;
        self.pace(1.0);
        Ok(ordering)
    }

    /// Compare the element at `index` against a held value, marking it under `role`.
    pub fn compare_to(&mut self, index: usize, value: u32, role: HighlightRole) -> Step<Ordering> {
        self.checkpoint()?;
        let ordering = self.state.compare_value(index, value)?;
        self.state.mark(role, Some(index))?;
        self.pace(1.0);
        Ok(ordering)
    }

    /// Exchange the elements at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Step {
        self.checkpoint()?;
        self.state.swap(a, b)?;
        self.pace(1.0);
        Ok(())
    }

    /// Value at `index`, held as a pivot for later [`compare_to`](Self::compare_to)
    /// calls. Not paced and not counted as an access.
    pub fn pivot(&mut self, index: usize) -> Step<u32> {
        Ok(self.state.peek(index)?)
    }

    /// Set a highlight slot without pacing.
    pub fn mark(&mut self, role: HighlightRole, index: Option<usize>) -> Step {
        Ok(self.state.mark(role, index)?)
    }

    /// Set a highlight slot and pause for `factor` times the step delay.
    pub fn mark_and_pace(
        &mut self,
        role: HighlightRole,
        index: Option<usize>,
        factor: f64,
    ) -> Step {
        self.checkpoint()?;
        self.state.mark(role, index)?;
        self.pace(factor);
        Ok(())
    }

    fn checkpoint(&self) -> Step {
        match self.control.checkpoint() {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(cause) => Err(Halt::Stop(cause)),
        }
    }

    fn pace(&self, factor: f64) {
        self.pacing.pace(self.len, factor);
    }
}

/// Drives one algorithm to completion, stop or failure.
///
/// The engine clears highlights on entry and exit but leaves counters alone;
/// resetting them is the caller's job.
#[derive(Clone, Copy, Debug)]
pub struct SortEngine {
    sweep: bool,
    seed: u64,
}

impl Default for SortEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SortEngine {
    /// Engine with the completion sweep enabled and seed 0.
    pub fn new() -> Self {
        Self { sweep: true, seed: 0 }
    }

    /// Enable or disable the completion sweep.
    pub fn with_sweep(mut self, sweep: bool) -> Self {
        self.sweep = sweep;
        self
    }

    /// Seed for the per-run random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run `algorithm` on `state` until it completes, is stopped, or faults.
    pub fn run(
        &self,
        algorithm: Algorithm,
        state: &SharedArrayState,
        control: &ControlSignal,
        pacing: &PacingPolicy,
    ) -> Result<RunOutcome, EngineError> {
        state.clear_highlights();
        tracing::info!(
            algorithm = algorithm.id(),
            elements = state.len(),
            speed = pacing.speed(),
            "sort started"
        );

        let mut access = SortAccess::new(state, control, pacing, self.seed);
        let result = match algorithm.sort(&mut access) {
            Ok(()) => {
                if self.sweep {
                    sweep(&mut access);
                }
                Ok(RunOutcome::Completed)
            }
            Err(Halt::Stop(StopCause::Requested)) => Ok(RunOutcome::Stopped),
            Err(Halt::Stop(StopCause::Interrupted)) => {
                tracing::debug!(error = %EngineError::InterruptedWhilePaused, "run interrupted");
                Ok(RunOutcome::Stopped)
            }
            Err(Halt::Fault(err)) => {
                tracing::warn!(algorithm = algorithm.id(), error = %err, "sort failed");
                Err(err)
            }
        };

        state.clear_highlights();
        if let Ok(outcome) = result {
            let counters = state.counters();
            tracing::info!(
                algorithm = algorithm.id(),
                ?outcome,
                comparisons = counters.comparisons,
                accesses = counters.accesses,
                swaps = counters.swaps,
                "sort finished"
            );
        }
        result
    }
}

/// Walk the sorted array under the current role. Cosmetic only: values are
/// never touched, and a stop cuts the walk short without changing the outcome.
fn sweep(access: &mut SortAccess<'_>) {
    for index in 0..access.len() {
        if access
            .mark_and_pace(HighlightRole::Current, Some(index), SWEEP_FACTOR)
            .is_err()
        {
            break;
        }
    }
}
