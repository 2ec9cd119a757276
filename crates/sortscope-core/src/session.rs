//! Session: the control API exposed to renderers and control surfaces.
//!
//! A [`Session`] owns the shared array, the pacing policy and at most one
//! active run. Each run executes on its own worker thread with a fresh
//! [`ControlSignal`]; the returned [`RunHandle`] is how a control surface
//! pauses, resumes or stops that particular run.
//!
//! # Example
//!
//! ```rust
//! use sortscope_core::{Algorithm, RunOutcome, Session, SessionConfig};
//!
//! let session = Session::new(SessionConfig::instant().with_seed(7)).unwrap();
//! let handle = session.start_run(Algorithm::Insertion, 32).unwrap();
//! assert_eq!(session.join(&handle).unwrap(), RunOutcome::Completed);
//! assert!(session.snapshot().is_sorted());
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::algorithms::Algorithm;
use crate::control::ControlSignal;
use crate::engine::{RunOutcome, SortEngine};
use crate::error::EngineError;
use crate::pacing::{DEFAULT_MAX_DELAY, DEFAULT_MIN_DELAY, DEFAULT_SPEED, PacingPolicy};
use crate::state::{SharedArrayState, Snapshot, check_len, identity};

/// Worker stack size. Quick sort on sorted input recurses once per element.
const WORKER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Element count a new session starts with.
pub const DEFAULT_ELEMENTS: usize = 50;

/// Session construction parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Initial array length.
    pub elements: usize,
    /// Lower pacing bound.
    pub min_delay: Duration,
    /// Upper pacing bound.
    pub max_delay: Duration,
    /// Initial speed, 0..=100.
    pub speed: u8,
    /// Whether completed runs end with the highlight sweep.
    pub sweep: bool,
    /// Fixed seed for shuffles and random algorithms. `None` draws a fresh
    /// seed per run.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            elements: DEFAULT_ELEMENTS,
            min_delay: DEFAULT_MIN_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            speed: DEFAULT_SPEED,
            sweep: true,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Unpaced configuration without the completion sweep.
    pub fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            sweep: false,
            ..Self::default()
        }
    }

    /// Builder-style seed setter.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder-style speed setter.
    pub fn with_speed(mut self, speed: u8) -> Self {
        self.speed = speed;
        self
    }

    /// The pacing policy these bounds and speed describe.
    pub fn pacing(&self) -> PacingPolicy {
        PacingPolicy::new(self.min_delay, self.max_delay).with_speed(self.speed)
    }
}

/// What the session is doing right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// No run has been started since the last reset.
    Idle,
    /// A run is in progress.
    Running,
    /// A run is parked on a pause.
    Paused,
    /// The latest run finished with this outcome.
    Finished(RunOutcome),
    /// The latest run failed.
    Failed(EngineError),
}

/// Where the worker reports how its run ended. Written once.
#[derive(Debug, Default)]
struct OutcomeSlot {
    value: Mutex<Option<Result<RunOutcome, EngineError>>>,
    filled: Condvar,
}

impl OutcomeSlot {
    /// Store `result` unless an outcome is already present, and wake waiters.
    fn fill(&self, result: Result<RunOutcome, EngineError>) {
        let mut value = self.value.lock();
        if value.is_none() {
            *value = Some(result);
        }
        self.filled.notify_all();
    }

    fn get(&self) -> Option<Result<RunOutcome, EngineError>> {
        self.value.lock().clone()
    }

    fn wait(&self) -> Result<RunOutcome, EngineError> {
        let mut value = self.value.lock();
        loop {
            if let Some(result) = value.as_ref() {
                return result.clone();
            }
            self.filled.wait(&mut value);
        }
    }
}

/// Reports [`EngineError::RunPanicked`] if the worker unwinds before it
/// fills the slot itself.
struct ReportOnExit(Arc<OutcomeSlot>);

impl Drop for ReportOnExit {
    fn drop(&mut self) {
        self.0.fill(Err(EngineError::RunPanicked));
    }
}

/// Control handle for one run.
///
/// Cloneable and usable from any thread. Calls on a handle whose run has
/// already finished are no-ops.
#[derive(Clone, Debug)]
pub struct RunHandle {
    id: u64,
    algorithm: Algorithm,
    control: Arc<ControlSignal>,
    outcome: Arc<OutcomeSlot>,
}

impl RunHandle {
    /// Session-unique run id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Algorithm this run executes.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Park the run at its next checkpoint.
    pub fn pause(&self) {
        self.control.request_pause();
    }

    /// Release a paused run.
    pub fn resume(&self) {
        self.control.request_resume();
    }

    /// Make the run unwind at its next checkpoint.
    pub fn stop(&self) {
        self.control.request_stop();
    }

    /// Whether the worker has reported an outcome.
    pub fn is_finished(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Reported outcome, once finished.
    pub fn outcome(&self) -> Option<Result<RunOutcome, EngineError>> {
        self.outcome.get()
    }
}

struct ActiveRun {
    handle: RunHandle,
    worker: JoinHandle<()>,
}

impl ActiveRun {
    /// The worker fills the outcome slot as its last act, panics included,
    /// so an empty slot means the run is still going.
    fn is_live(&self) -> bool {
        !self.handle.is_finished()
    }
}

/// Owns the shared state and runs one sort at a time.
pub struct Session {
    state: SharedArrayState,
    pacing: PacingPolicy,
    config: SessionConfig,
    active: Mutex<Option<ActiveRun>>,
    next_id: AtomicU64,
}

impl Session {
    /// Create a session holding `0..config.elements`.
    pub fn new(config: SessionConfig) -> Result<Self, EngineError> {
        Ok(Self {
            state: SharedArrayState::new(config.elements)?,
            pacing: config.pacing(),
            config,
            active: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    /// Shared state handle, for consumers that poll on their own.
    pub fn state(&self) -> &SharedArrayState {
        &self.state
    }

    /// Pacing policy shared with every run.
    pub fn pacing(&self) -> &PacingPolicy {
        &self.pacing
    }

    /// Shuffle `0..elements` and sort it with `algorithm` on a worker thread.
    ///
    /// The shared state is untouched until the worker has started; it then
    /// swaps in the shuffled array before the first primitive operation. A
    /// failed start leaves the previous run's array and outcome in place.
    pub fn start_run(&self, algorithm: Algorithm, elements: usize) -> Result<RunHandle, EngineError> {
        let mut active = self.active.lock();
        Self::ensure_idle(active.as_ref())?;

        let mut values = identity(elements)?;
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(seed);
        values.shuffle(&mut rng);

        self.launch(&mut active, algorithm, values, rng.random())
    }

    /// Sort the given values with `algorithm` on a worker thread.
    pub fn start_run_on(&self, algorithm: Algorithm, values: Vec<u32>) -> Result<RunHandle, EngineError> {
        let mut active = self.active.lock();
        Self::ensure_idle(active.as_ref())?;

        check_len(values.len())?;
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());

        self.launch(&mut active, algorithm, values, seed)
    }

    /// Park `handle`'s run at its next checkpoint.
    pub fn pause(&self, handle: &RunHandle) {
        handle.pause();
    }

    /// Release `handle`'s run.
    pub fn resume(&self, handle: &RunHandle) {
        handle.resume();
    }

    /// Stop `handle`'s run.
    pub fn stop(&self, handle: &RunHandle) {
        handle.stop();
    }

    /// Set the speed for this and later runs, 0..=100.
    pub fn set_speed(&self, percent: u8) {
        self.pacing.set_speed(percent);
    }

    /// Point-in-time copy of the array, highlights and counters.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Reinitialize the array to `0..elements` in order.
    ///
    /// Fails with [`EngineError::AlreadyRunning`] while a run is in progress.
    pub fn reset(&self, elements: usize) -> Result<(), EngineError> {
        let active = self.active.lock();
        Self::ensure_idle(active.as_ref())?;
        self.state.reset(elements)
    }

    /// Status of the latest run.
    pub fn status(&self) -> RunStatus {
        let active = self.active.lock();
        let Some(run) = active.as_ref() else {
            return RunStatus::Idle;
        };
        match run.handle.outcome() {
            Some(Ok(outcome)) => RunStatus::Finished(outcome),
            Some(Err(err)) => RunStatus::Failed(err),
            None if run.handle.control.is_paused() => RunStatus::Paused,
            None => RunStatus::Running,
        }
    }

    /// Block until `handle`'s run finishes and return its outcome.
    ///
    /// Any number of threads may wait on the same run. Waiting does not end
    /// the run early and other calls still see it as live until it reports.
    pub fn join(&self, handle: &RunHandle) -> Result<RunOutcome, EngineError> {
        handle.outcome.wait()
    }

    /// Wake the active run if it is paused and make it unwind.
    ///
    /// The run reports [`RunOutcome::Stopped`].
    pub fn shutdown(&self) {
        if let Some(run) = self.active.lock().as_ref() {
            run.handle.control.interrupt();
        }
    }

    fn ensure_idle(active: Option<&ActiveRun>) -> Result<(), EngineError> {
        match active {
            Some(run) if run.is_live() => Err(EngineError::AlreadyRunning),
            _ => Ok(()),
        }
    }

    fn launch(
        &self,
        active: &mut Option<ActiveRun>,
        algorithm: Algorithm,
        values: Vec<u32>,
        seed: u64,
    ) -> Result<RunHandle, EngineError> {
        let handle = RunHandle {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            algorithm,
            control: Arc::new(ControlSignal::new()),
            outcome: Arc::new(OutcomeSlot::default()),
        };

        let engine = SortEngine::new()
            .with_sweep(self.config.sweep)
            .with_seed(seed);
        let state = self.state.clone();
        let pacing = self.pacing.clone();
        let control = Arc::clone(&handle.control);
        let outcome = Arc::clone(&handle.outcome);

        let worker = thread::Builder::new()
            .name(format!("sort-{}", algorithm.id()))
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                let report = ReportOnExit(outcome);
                let result = state
                    .replace(values)
                    .and_then(|()| engine.run(algorithm, &state, &control, &pacing));
                report.0.fill(result);
            })
            .map_err(|e| EngineError::Spawn(e.to_string()))?;

        tracing::debug!(run = handle.id, algorithm = algorithm.id(), seed, "run launched");
        let previous = active.replace(ActiveRun {
            handle: handle.clone(),
            worker,
        });
        if let Some(previous) = previous {
            // Already reported, joining only reaps the thread.
            let _ = previous.worker.join();
        }
        Ok(handle)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(run) = self.active.get_mut().take() {
            run.handle.stop();
            let _ = run.worker.join();
        }
    }
}
