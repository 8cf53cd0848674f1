//! CLI Integration Tests
//!
//! These tests run the `explorer` binary and verify its output formats and
//! command behaviors. Each run gets a private config directory so the user's
//! own configuration never leaks in.
//!
//! ```
//! cargo test --package explorer-cli --test cli_integration
//! ```

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run the explorer binary with an isolated home and config directory
fn run_explorer_in(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_explorer"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("NO_COLOR")
        .env_remove("EXPLORER_SEED")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run explorer binary")
}

/// Run explorer in a throwaway home directory
fn run_explorer(args: &[&str]) -> Output {
    let home = TempDir::new().unwrap();
    run_explorer_in(home.path(), args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = run_explorer(&["--help"]);
    assert!(output.status.success(), "Help should succeed");

    let out = stdout(&output);
    for cmd in ["read", "watch", "classify", "summary", "history", "config"] {
        assert!(out.contains(cmd), "Help should list {} command", cmd);
    }
}

#[test]
fn test_version_command() {
    let output = run_explorer(&["--version"]);
    assert!(output.status.success(), "Version should succeed");
    assert!(stdout(&output).contains("explorer"));
}

#[test]
fn test_subcommand_help() {
    for cmd in ["read", "watch", "classify", "summary", "history", "config"] {
        let output = run_explorer(&[cmd, "--help"]);
        assert!(output.status.success(), "{} --help should succeed", cmd);
        assert!(!stdout(&output).is_empty(), "{} --help should produce output", cmd);
    }
}

#[test]
fn test_unknown_command_fails() {
    let output = run_explorer(&["scan"]);
    assert!(!output.status.success());
}

// =============================================================================
// Read
// =============================================================================

#[test]
fn test_read_json() {
    let output = run_explorer(&["read", "--seed", "1", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value = json(&output);
    assert_eq!(value["generation"], 0);
    let sensors = value["sensors"].as_array().unwrap();
    assert_eq!(sensors.len(), 5);
    for sensor in sensors {
        assert_eq!(sensor["history"].as_array().unwrap().len(), 24);
    }
    assert_eq!(sensors[3]["id"], "s004");
    assert_eq!(sensors[3]["status"], "critical");
}

#[test]
fn test_read_same_seed_same_values() {
    let values = |output: &Output| -> Vec<serde_json::Value> {
        json(output)["sensors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| {
                let history: Vec<_> = s["history"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|r| r["value"].clone())
                    .collect();
                serde_json::json!({ "value": s["value"], "history": history })
            })
            .collect()
    };

    let first = run_explorer(&["read", "--seed", "77", "--format", "json"]);
    let second = run_explorer(&["read", "--seed", "77", "--format", "json"]);
    assert_eq!(values(&first), values(&second));
}

#[test]
fn test_read_type_filter_csv() {
    let output = run_explorer(&[
        "read",
        "--seed",
        "1",
        "--type",
        "gas",
        "--format",
        "csv",
        "--no-header",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("0,s002,Gas Sensor,gas,"));
}

#[test]
fn test_read_unknown_type_fails() {
    let output = run_explorer(&["read", "--type", "lidar"]);
    assert!(!output.status.success());
}

#[test]
fn test_read_text_respects_no_color_env() {
    let home = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_explorer"))
        .args(["read", "--seed", "1"])
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("[CRITICAL]"));
    assert!(!out.contains('\u{1b}'), "NO_COLOR output should have no escapes");
}

#[test]
fn test_no_color_env_values() {
    let run = |value: &str| {
        let home = TempDir::new().unwrap();
        let output = Command::new(env!("CARGO_BIN_EXE_explorer"))
            .args(["classify", "95", "--min", "0", "--max", "100"])
            .env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join(".config"))
            .env("NO_COLOR", value)
            .output()
            .unwrap();
        assert!(output.status.success(), "NO_COLOR={}: {}", value, stderr(&output));
        stdout(&output)
    };

    for value in ["1", "true", "yes", "anything"] {
        assert!(!run(value).contains('\u{1b}'), "NO_COLOR={} should disable colour", value);
    }
    for value in ["0", "false", "off"] {
        assert!(run(value).contains('\u{1b}'), "NO_COLOR={} should keep colour", value);
    }
}

#[test]
fn test_output_flag_writes_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("sensors.json");
    let output = run_explorer_in(
        home.path(),
        &[
            "read",
            "--format",
            "json",
            "--output",
            path.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).is_empty());

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["sensors"].as_array().unwrap().len(), 5);
}

// =============================================================================
// Classify
// =============================================================================

#[test]
fn test_classify_text() {
    let output = run_explorer(&["--no-color", "classify", "95", "--min", "0", "--max", "100"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "95 in [0, 100]: [CRITICAL] #e74c3c (95.0% of range)\n"
    );
}

#[test]
fn test_classify_boundaries_json() {
    let cases = [("69.9", "normal"), ("70", "warning"), ("89.9", "warning"), ("90", "critical")];
    for (value, expected) in cases {
        let output = run_explorer(&[
            "classify", value, "--min", "0", "--max", "100", "--format", "json",
        ]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(json(&output)["status"], expected, "value {}", value);
    }
}

#[test]
fn test_classify_negative_range() {
    let output = run_explorer(&[
        "classify", "-5", "--min", "-10", "--max", "10", "--format", "json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(json(&output)["status"], "normal");
}

#[test]
fn test_classify_invalid_range_fails() {
    let output = run_explorer(&["classify", "5", "--min", "10", "--max", "10"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid range"));
}

// =============================================================================
// Summary and History
// =============================================================================

#[test]
fn test_summary_csv() {
    let output = run_explorer(&["summary", "--seed", "3", "--format", "csv"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "total,normal,warning,critical\n5,4,0,1\n");
}

#[test]
fn test_history_json() {
    let output = run_explorer(&["history", "s005", "--seed", "9", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value = json(&output);
    assert_eq!(value["id"], "s005");
    assert_eq!(value["unit"], "cm");
    let history = value["history"].as_array().unwrap();
    assert_eq!(history.len(), 24);
    assert_eq!(value["stats"]["current"], 150.0);
    assert_eq!(value["status"], "normal");
}

#[test]
fn test_history_unknown_sensor_fails() {
    let output = run_explorer(&["history", "s042"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown sensor: s042"));
}

// =============================================================================
// Watch
// =============================================================================

#[test]
fn test_watch_count_json_lines() {
    let output = run_explorer(&[
        "--quiet",
        "watch",
        "--interval",
        "1",
        "--count",
        "2",
        "--seed",
        "4",
        "--format",
        "json",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    let generations: Vec<u64> = out
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["generation"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(generations, vec![0, 1, 2]);
}

#[test]
fn test_watch_rejects_out_of_range_interval() {
    let output = run_explorer(&["watch", "--interval", "0", "--count", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("out of range"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_set_changes_default_format() {
    let home = TempDir::new().unwrap();

    let set = run_explorer_in(home.path(), &["config", "set", "format", "csv"]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));

    let path = run_explorer_in(home.path(), &["config", "path"]);
    let config_path = stdout(&path).trim().to_string();
    assert!(config_path.ends_with("config.toml"));
    assert!(std::fs::read_to_string(&config_path).unwrap().contains("csv"));

    let summary = run_explorer_in(home.path(), &["summary"]);
    assert!(summary.status.success(), "stderr: {}", stderr(&summary));
    assert!(stdout(&summary).starts_with("total,normal,warning,critical\n"));

    // An explicit flag still wins over the config file
    let summary = run_explorer_in(home.path(), &["summary", "--format", "json"]);
    assert_eq!(json(&summary)["total"], 5);
}

#[test]
fn test_config_set_rejects_bad_value() {
    let output = run_explorer(&["config", "set", "interval", "600"]);
    assert!(!output.status.success());
}
