//! Run one sort and report its counters.

use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use sortscope_config::Settings;
use sortscope_core::{Algorithm, Counters, RunHandle, RunOutcome, Session};

use crate::render::{CLEAR, render_frame};

/// How often the spinner or bar view samples the shared state.
const FRAME_INTERVAL: Duration = Duration::from_millis(40);

#[derive(Args)]
pub struct RunArgs {
    /// Algorithm id (see `sortscope algorithms`); defaults to the settings file
    #[arg(value_name = "ALGORITHM")]
    algorithm: Option<Algorithm>,

    /// Number of elements to shuffle and sort
    #[arg(short = 'n', long)]
    elements: Option<usize>,

    /// Speed from 0 (slowest) to 100 (fastest)
    #[arg(short, long)]
    speed: Option<u8>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file to use instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the shortest step delay in milliseconds
    #[arg(long)]
    min_delay_ms: Option<u64>,

    /// Override the longest step delay in milliseconds
    #[arg(long)]
    max_delay_ms: Option<u64>,

    /// Skip the highlight sweep after a completed sort
    #[arg(long)]
    no_sweep: bool,

    /// Draw the array as bars while it sorts
    #[arg(long, conflicts_with = "json")]
    watch: bool,

    /// Columns available to the bar view
    #[arg(long, default_value = "80")]
    width: usize,

    /// Rows available to the bar view
    #[arg(long, default_value = "20")]
    height: usize,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    algorithm: Algorithm,
    elements: usize,
    outcome: RunOutcome,
    sorted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    elapsed_ms: u128,
    #[serde(flatten)]
    counters: Counters,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let settings = resolve_settings(&args)?;
    let algorithm = args.algorithm.unwrap_or(settings.algorithm);

    let session = Session::new(settings.session_config())?;
    let started = Instant::now();
    let handle = session.start_run(algorithm, settings.element_count)?;

    let stopper = handle.clone();
    ctrlc::set_handler(move || stopper.stop())?;

    if args.watch {
        watch(&session, &handle, args.width, args.height)?;
    } else {
        spin(&session, &handle, algorithm, args.json)?;
    }

    let outcome = session.join(&handle)?;
    let snap = session.snapshot();
    let report = Report {
        algorithm,
        elements: snap.values.len(),
        outcome,
        sorted: snap.is_sorted(),
        seed: settings.seed,
        elapsed_ms: started.elapsed().as_millis(),
        counters: snap.counters,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Settings file plus command-line overrides, validated.
fn resolve_settings(args: &RunArgs) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_or_default()?,
    };

    if let Some(elements) = args.elements {
        settings.element_count = elements;
    }
    if let Some(speed) = args.speed {
        settings.speed = speed;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(min) = args.min_delay_ms {
        settings.min_delay_ms = min;
    }
    if let Some(max) = args.max_delay_ms {
        settings.max_delay_ms = max;
    }
    if args.no_sweep {
        settings.sweep = false;
    }

    settings.validate()?;
    Ok(settings)
}

fn spin(
    session: &Session,
    handle: &RunHandle,
    algorithm: Algorithm,
    quiet: bool,
) -> anyhow::Result<()> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::with_template(
        "{spinner:.cyan} [{elapsed_precise}] {prefix}: {msg}",
    )?);
    spinner.set_prefix(algorithm.name());
    spinner.enable_steady_tick(Duration::from_millis(100));

    while !handle.is_finished() {
        let c = session.state().counters();
        spinner.set_message(format!(
            "{} comparisons, {} accesses, {} swaps",
            c.comparisons, c.accesses, c.swaps
        ));
        thread::sleep(FRAME_INTERVAL);
    }

    spinner.finish_and_clear();
    Ok(())
}

fn watch(
    session: &Session,
    handle: &RunHandle,
    width: usize,
    height: usize,
) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    loop {
        let finished = handle.is_finished();
        let frame = render_frame(&session.snapshot(), width, height);
        write!(stdout, "{CLEAR}{frame}")?;
        stdout.flush()?;
        if finished {
            return Ok(());
        }
        thread::sleep(FRAME_INTERVAL);
    }
}

fn print_report(report: &Report) {
    let verdict = match report.outcome {
        RunOutcome::Completed => "completed",
        RunOutcome::Stopped => "stopped",
    };
    println!(
        "{} on {} elements {} in {:.2}s",
        report.algorithm.name(),
        report.elements,
        verdict,
        report.elapsed_ms as f64 / 1000.0
    );
    println!("  Comparisons: {}", report.counters.comparisons);
    println!("  Accesses:    {}", report.counters.accesses);
    println!("  Swaps:       {}", report.counters.swaps);
    if let Some(seed) = report.seed {
        println!("  Seed:        {seed}");
    }
}
