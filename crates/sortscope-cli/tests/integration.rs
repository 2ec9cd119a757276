//! Integration tests for sortscope-cli.
//!
//! Invokes the built binary. Runs use zero pacing delays and an explicit
//! settings file so they neither sleep nor read the user's real settings.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Helper to get the path to the `sortscope` binary built by cargo.
fn sortscope_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sortscope"))
}

/// Write an empty settings file so defaults apply without touching `~/.config`.
fn empty_settings(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "").unwrap();
    path
}

fn run_json(config: &Path, extra: &[&str]) -> Output {
    sortscope_bin()
        .args(["run", "--json", "--no-sweep", "--min-delay-ms", "0", "--max-delay-ms", "0"])
        .arg("--config")
        .arg(config)
        .args(extra)
        .output()
        .expect("failed to run sortscope run")
}

// ---------------------------------------------------------------------------
// `sortscope algorithms`
// ---------------------------------------------------------------------------

#[test]
fn cli_algorithms_lists_every_algorithm() {
    let output = sortscope_bin()
        .arg("algorithms")
        .output()
        .expect("failed to run sortscope algorithms");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Available Algorithms"));
    for id in ["bubble", "insertion", "quick", "bogo"] {
        assert!(stdout.contains(id), "missing {id}");
    }
}

#[test]
fn cli_algorithms_json() {
    let output = sortscope_bin()
        .args(["algorithms", "--json"])
        .output()
        .expect("failed to run sortscope algorithms --json");
    assert!(output.status.success());

    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[2]["id"], "quick");
    assert_eq!(list[2]["time"], "O(n log n)");
}

// ---------------------------------------------------------------------------
// `sortscope run`
// ---------------------------------------------------------------------------

#[test]
fn cli_run_quick_reports_sorted_json() {
    let dir = TempDir::new().unwrap();
    let config = empty_settings(&dir);
    let output = run_json(&config, &["quick", "--elements", "64", "--seed", "7"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["algorithm"], "quick");
    assert_eq!(report["outcome"], "completed");
    assert_eq!(report["sorted"], true);
    assert_eq!(report["elements"], 64);
    assert_eq!(report["seed"], 7);
    assert!(report["comparisons"].as_u64().unwrap() > 0);
}

#[test]
fn cli_run_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let config = empty_settings(&dir);
    let counts = |out: Output| {
        let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        (report["comparisons"].clone(), report["swaps"].clone())
    };

    let first = counts(run_json(&config, &["insertion", "-n", "40", "--seed", "5"]));
    let second = counts(run_json(&config, &["insertion", "-n", "40", "--seed", "5"]));
    assert_eq!(first, second);
}

#[test]
fn cli_run_uses_settings_algorithm_by_default() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("settings.toml");
    std::fs::write(&config, "algorithm = \"insertion\"\nelement_count = 12\n").unwrap();

    let output = run_json(&config, &[]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["algorithm"], "insertion");
    assert_eq!(report["elements"], 12);
}

#[test]
fn cli_run_rejects_unknown_algorithm() {
    let dir = TempDir::new().unwrap();
    let config = empty_settings(&dir);
    let output = run_json(&config, &["heap"]);
    assert!(!output.status.success());
}

#[test]
fn cli_run_rejects_out_of_range_elements() {
    let dir = TempDir::new().unwrap();
    let config = empty_settings(&dir);
    let output = run_json(&config, &["bubble", "--elements", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("element_count"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// `sortscope config`
// ---------------------------------------------------------------------------

#[test]
fn cli_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub").join("settings.toml");

    let init = sortscope_bin()
        .args(["config", "init", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(init.status.success());
    assert!(path.exists());

    let again = sortscope_bin()
        .args(["config", "init", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(!again.status.success(), "init must not clobber without --force");

    let show = sortscope_bin()
        .args(["config", "show", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(show.status.success());
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("element_count = 50"), "got: {stdout}");
    assert!(stdout.contains("algorithm = \"bubble\""), "got: {stdout}");
}

#[test]
fn cli_config_path_names_settings_file() {
    let output = sortscope_bin().args(["config", "path"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("settings.toml"));
}
