//! Cooperative pause/resume/stop signalling between a control surface and
//! the sort worker.
//!
//! The control surface calls the `request_*` methods from any thread. The
//! worker calls [`ControlSignal::checkpoint`] between primitive operations;
//! it is the only place a run ever blocks. A pause parks the worker on a
//! condition variable rather than spinning.
//!
//! # States
//!
//! ```text
//!            request_pause
//!   Running ───────────────▶ PauseRequested
//!      ▲    ◀─────────────── │
//!      │     request_resume  │
//!      └──────┬──────────────┘
//!             │ request_stop (from any state)
//!             ▼
//!       StopRequested  (absorbing)
//! ```

use std::ops::ControlFlow;

use parking_lot::{Condvar, Mutex};

/// Requested run state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlState {
    /// The worker proceeds at every checkpoint.
    #[default]
    Running,
    /// The worker parks at its next checkpoint until resumed or stopped.
    PauseRequested,
    /// The worker unwinds at its next checkpoint. Terminal for the run.
    StopRequested,
}

/// Why a checkpoint told the worker to unwind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopCause {
    /// A control surface called [`ControlSignal::request_stop`].
    Requested,
    /// The signal was shut down (see [`ControlSignal::interrupt`]).
    Interrupted,
}

#[derive(Debug, Default)]
struct Signal {
    state: ControlState,
    interrupted: bool,
}

/// Tri-state control handle shared by one run and its control surface.
///
/// Created fresh for every run. All request methods are idempotent and may be
/// called at any time, including after the run has finished.
#[derive(Debug, Default)]
pub struct ControlSignal {
    signal: Mutex<Signal>,
    wake: Condvar,
}

impl ControlSignal {
    /// Create a signal in the `Running` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the worker to park at its next checkpoint. Ignored once stopped.
    pub fn request_pause(&self) {
        let mut signal = self.signal.lock();
        if signal.state == ControlState::Running {
            signal.state = ControlState::PauseRequested;
            tracing::debug!("pause requested");
        }
    }

    /// Release a paused worker. Ignored unless a pause is pending.
    pub fn request_resume(&self) {
        let mut signal = self.signal.lock();
        if signal.state == ControlState::PauseRequested {
            signal.state = ControlState::Running;
            tracing::debug!("resume requested");
            self.wake.notify_all();
        }
    }

    /// Ask the worker to unwind. There is no way back to `Running`.
    pub fn request_stop(&self) {
        let mut signal = self.signal.lock();
        if signal.state != ControlState::StopRequested {
            signal.state = ControlState::StopRequested;
            tracing::debug!("stop requested");
        }
        self.wake.notify_all();
    }

    /// Shut the signal down from outside the control protocol.
    ///
    /// A worker parked on a pause wakes with [`StopCause::Interrupted`], as
    /// does any later checkpoint unless a stop was requested first.
    pub fn interrupt(&self) {
        let mut signal = self.signal.lock();
        signal.interrupted = true;
        self.wake.notify_all();
    }

    /// Current requested state.
    pub fn state(&self) -> ControlState {
        self.signal.lock().state
    }

    /// Whether a pause is pending.
    pub fn is_paused(&self) -> bool {
        self.state() == ControlState::PauseRequested
    }

    /// Whether a stop was requested.
    pub fn is_stopped(&self) -> bool {
        self.state() == ControlState::StopRequested
    }

    /// The single suspension point of a run.
    ///
    /// Returns `Continue` when running, `Break` when the run must unwind.
    /// While a pause is pending the calling thread blocks until the signal is
    /// resumed, stopped or interrupted.
    pub fn checkpoint(&self) -> ControlFlow<StopCause> {
        let mut signal = self.signal.lock();
        loop {
            match signal.state {
                ControlState::StopRequested => return ControlFlow::Break(StopCause::Requested),
                _ if signal.interrupted => return ControlFlow::Break(StopCause::Interrupted),
                ControlState::Running => return ControlFlow::Continue(()),
                ControlState::PauseRequested => self.wake.wait(&mut signal),
            }
        }
    }
}
