//! Integration tests for sortscope-core.
//!
//! Drives whole runs through [`Session`] on real worker threads: the fixed
//! scenarios, stopping and pausing mid-run, and observers reading snapshots
//! while the worker mutates the array.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use sortscope_core::{
    Algorithm, EngineError, HighlightRole, RunOutcome, RunStatus, Session, SessionConfig,
    Snapshot,
};

/// A lightly paced configuration: fast enough for tests, slow enough that a
/// run is still in flight when the test pokes at it.
fn paced(seed: u64) -> SessionConfig {
    SessionConfig {
        elements: 24,
        min_delay: Duration::from_micros(200),
        max_delay: Duration::from_millis(2),
        speed: 0,
        sweep: false,
        seed: Some(seed),
    }
}

fn assert_permutation(snap: &Snapshot, len: u32) {
    let mut values = snap.values.clone();
    values.sort_unstable();
    assert_eq!(values, (0..len).collect::<Vec<u32>>(), "not a permutation: {:?}", snap.values);
}

/// Element counts small enough for bogo sort to finish quickly.
fn elements_for(algorithm: Algorithm) -> usize {
    if algorithm == Algorithm::Bogo { 5 } else { 24 }
}

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn bubble_sort_five_scrambled() {
    let session = Session::new(SessionConfig::instant()).unwrap();
    let run = session
        .start_run_on(Algorithm::Bubble, vec![2, 1, 4, 3, 0])
        .unwrap();
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);

    let snap = session.snapshot();
    assert_eq!(snap.values, vec![0, 1, 2, 3, 4]);
    assert_eq!(snap.counters.comparisons, 10);
    assert!(snap.counters.accesses > 0);
    assert_eq!(snap.counters.accesses % 2, 0);
    assert_eq!(snap.counters.accesses, 2 * snap.counters.swaps);
}

#[test]
fn insertion_sort_already_sorted() {
    let session = Session::new(SessionConfig::instant()).unwrap();
    let run = session
        .start_run_on(Algorithm::Insertion, vec![0, 1, 2, 3, 4])
        .unwrap();
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);

    let snap = session.snapshot();
    assert_eq!(snap.values, vec![0, 1, 2, 3, 4]);
    assert_eq!(snap.counters.swaps, 0);
    assert_eq!(snap.counters.comparisons, 4);
}

#[test]
fn stop_immediately_after_start() {
    let session = Session::new(SessionConfig::default()).unwrap();
    let input = vec![2, 1, 4, 3, 0];
    let run = session.start_run_on(Algorithm::Bubble, input).unwrap();
    session.stop(&run);

    assert_eq!(session.join(&run).unwrap(), RunOutcome::Stopped);
    let snap = session.snapshot();
    assert_permutation(&snap, 5);
    assert_eq!(snap.counters.accesses, 2 * snap.counters.swaps);
    assert!(snap.highlights.iter().all(Option::is_none));
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[test]
fn every_algorithm_completes_on_shuffled_input() {
    for algorithm in Algorithm::ALL {
        let session = Session::new(SessionConfig::instant().with_seed(2024)).unwrap();
        let n = elements_for(algorithm);
        let run = session.start_run(algorithm, n).unwrap();
        assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed, "{algorithm}");

        let snap = session.snapshot();
        assert!(snap.is_sorted(), "{algorithm} left {:?}", snap.values);
        assert_permutation(&snap, n as u32);
    }
}

#[test]
fn completion_sweep_ends_with_clear_highlights() {
    let config = SessionConfig {
        sweep: true,
        ..paced(8)
    };
    let session = Session::new(config).unwrap();
    let run = session.start_run(Algorithm::Insertion, 12).unwrap();
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);
    let snap = session.snapshot();
    assert!(snap.is_sorted());
    assert_eq!(snap.highlight(HighlightRole::Current), None);
}

// ---------------------------------------------------------------------------
// Stopping
// ---------------------------------------------------------------------------

#[test]
fn stop_mid_run_keeps_a_permutation() {
    for algorithm in Algorithm::ALL {
        let session = Session::new(paced(17)).unwrap();
        let n = elements_for(algorithm);
        let run = session.start_run(algorithm, n).unwrap();
        thread::sleep(Duration::from_millis(15));
        run.stop();

        // Tiny inputs can finish before the stop lands; both are valid.
        let outcome = session.join(&run).unwrap();
        let snap = session.snapshot();
        assert_permutation(&snap, n as u32);
        if outcome == RunOutcome::Completed {
            assert!(snap.is_sorted());
        }
    }
}

#[test]
fn stop_lands_within_one_pacing_delay() {
    let config = SessionConfig {
        elements: 50,
        speed: 0,
        sweep: false,
        seed: Some(3),
        ..SessionConfig::default()
    };
    let session = Session::new(config).unwrap();
    let delay = session.pacing().delay_for(50, 0);

    let run = session.start_run(Algorithm::Bubble, 50).unwrap();
    thread::sleep(delay * 3);

    let requested = Instant::now();
    session.stop(&run);
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Stopped);
    let latency = requested.elapsed();

    // One step delay plus scheduling slack.
    assert!(
        latency < delay + Duration::from_millis(250),
        "stop took {latency:?} with step delay {delay:?}"
    );
}

#[test]
fn stop_is_a_no_op_after_finish() {
    let session = Session::new(SessionConfig::instant().with_seed(4)).unwrap();
    let run = session.start_run(Algorithm::Quick, 30).unwrap();
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);
    session.stop(&run);
    session.stop(&run);
    assert_eq!(session.status(), RunStatus::Finished(RunOutcome::Completed));
}

#[test]
fn out_of_range_access_reports_failed_status() {
    let session = Session::new(paced(9)).unwrap();
    let run = session.start_run(Algorithm::Bubble, 24).unwrap();
    while session.snapshot().counters.comparisons == 0 {
        thread::sleep(Duration::from_millis(1));
    }
    run.pause();
    thread::sleep(Duration::from_millis(20));

    // Shrinking the array under a parked worker is an algorithm-visible bug.
    session.state().replace(vec![1, 0]).unwrap();
    run.resume();

    let err = session.join(&run).unwrap_err();
    assert!(
        matches!(err, EngineError::IndexOutOfRange { len: 2, .. }),
        "got {err:?}"
    );
    assert_eq!(session.status(), RunStatus::Failed(err));
    assert!(session.snapshot().highlights.iter().all(Option::is_none));

    // A failed run does not block the next one.
    let next = session.start_run(Algorithm::Insertion, 8).unwrap();
    next.stop();
    assert_eq!(session.join(&next).unwrap(), RunOutcome::Stopped);
}

// ---------------------------------------------------------------------------
// Pausing
// ---------------------------------------------------------------------------

#[test]
fn pause_freezes_progress() {
    let session = Session::new(paced(5)).unwrap();
    let run = session.start_run(Algorithm::Bubble, 24).unwrap();
    thread::sleep(Duration::from_millis(10));

    session.pause(&run);
    // Let the worker reach its checkpoint.
    thread::sleep(Duration::from_millis(20));
    let frozen = session.snapshot();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(session.snapshot(), frozen, "state changed while paused");
    assert_eq!(session.status(), RunStatus::Paused);

    session.resume(&run);
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);
    assert!(session.snapshot().is_sorted());
}

#[test]
fn pause_resume_is_deterministic() {
    for algorithm in Algorithm::ALL {
        let n = elements_for(algorithm);

        let reference = Session::new(paced(77)).unwrap();
        let run = reference.start_run(algorithm, n).unwrap();
        reference.join(&run).unwrap();
        let expected = reference.snapshot();

        let interrupted = Session::new(paced(77)).unwrap();
        let run = interrupted.start_run(algorithm, n).unwrap();
        for _ in 0..3 {
            thread::sleep(Duration::from_millis(5));
            run.pause();
            thread::sleep(Duration::from_millis(10));
            run.resume();
        }
        assert_eq!(interrupted.join(&run).unwrap(), RunOutcome::Completed);

        assert_eq!(interrupted.snapshot(), expected, "{algorithm} diverged after pause/resume");
    }
}

#[test]
fn stop_while_paused() {
    let session = Session::new(paced(6)).unwrap();
    let run = session.start_run(Algorithm::Insertion, 24).unwrap();
    run.pause();
    thread::sleep(Duration::from_millis(20));
    run.stop();
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Stopped);
    assert_permutation(&session.snapshot(), 24);
}

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

#[test]
fn concurrent_snapshots_never_see_torn_swaps() {
    let session = Arc::new(Session::new(paced(21)).unwrap());
    let done = Arc::new(AtomicBool::new(false));

    let observer = {
        let session = Arc::clone(&session);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut frames = 0u32;
            while !done.load(Ordering::SeqCst) {
                let snap = session.snapshot();
                assert_permutation(&snap, 24);
                for index in snap.highlights.iter().flatten() {
                    assert!(*index < 24, "highlight {index} out of range");
                }
                frames += 1;
            }
            frames
        })
    };

    let run = session.start_run(Algorithm::Quick, 24).unwrap();
    assert_eq!(session.join(&run).unwrap(), RunOutcome::Completed);
    done.store(true, Ordering::SeqCst);
    assert!(observer.join().unwrap() > 0);
}

#[test]
fn counters_only_grow_during_a_run() {
    let session = Session::new(paced(12)).unwrap();
    let run = session.start_run(Algorithm::Insertion, 24).unwrap();
    let mut last = session.snapshot().counters;
    while !run.is_finished() {
        let now = session.snapshot().counters;
        assert!(now.comparisons >= last.comparisons);
        assert!(now.accesses >= last.accesses);
        assert!(now.swaps >= last.swaps);
        last = now;
        thread::sleep(Duration::from_millis(1));
    }
    session.join(&run).unwrap();
}
