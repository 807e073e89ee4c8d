//! Process-level tests for the `trendsignal` and `trendsignal-gen` binaries.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

const CSV: &str = "timestamp,open,high,low,close,volume\n\
2024-01-01,9,11,8,10,100\n\
2024-01-02,10,13,9,12,100\n\
2024-01-03,12,12,8,9,100\n\
2024-01-04,9,16,9,15,100\n\
2024-01-05,15,15,14,15,100\n";

fn trendsignal(dir: &Path, config: &str) -> (Option<i32>, String) {
    std::fs::write(dir.join("data.csv"), CSV).unwrap();
    std::fs::write(dir.join("config.toml"), config).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_trendsignal"))
        .arg("--input")
        .arg(dir.join("data.csv"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--output")
        .arg(dir.join("metrics.json"))
        .arg("--log-file")
        .arg(dir.join("run.log"))
        .output()
        .unwrap();
    (
        output.status.code(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

#[test]
fn success_exits_zero_and_mirrors_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout) = trendsignal(dir.path(), "seed = 42\nwindow = 3\nversion = \"v1\"\n");

    assert_eq!(code, Some(0));
    let artifact = std::fs::read_to_string(dir.path().join("metrics.json")).unwrap();
    assert_eq!(stdout, format!("{artifact}\n"));

    let json: Value = serde_json::from_str(&artifact).unwrap();
    assert_eq!(json["value"], 0.6);
    assert_eq!(json["status"], "success");
}

#[test]
fn log_file_records_run() {
    let dir = tempfile::tempdir().unwrap();
    trendsignal(dir.path(), "seed = 42\nwindow = 3\nversion = \"v1\"\n");

    let log = std::fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains("Job started"));
    assert!(log.contains("Rolling mean calculated with window=3"));
    assert!(log.contains("Job completed successfully"));
}

#[test]
fn config_error_exits_one_with_error_report() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout) = trendsignal(dir.path(), "seed = 42\nversion = \"v1\"\n");

    assert_eq!(code, Some(1));
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["status"], "error");
    assert!(json["error_message"].as_str().unwrap().contains("window"));

    let log = std::fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains("Job failed at START"));
}

#[test]
fn missing_argument_is_usage_error() {
    let status = Command::new(env!("CARGO_BIN_EXE_trendsignal"))
        .arg("--input")
        .arg("x.csv")
        .output()
        .unwrap()
        .status;
    assert_eq!(status.code(), Some(2));
}

#[test]
fn generator_output_feeds_batch_job() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("sample.csv");

    let status = Command::new(env!("CARGO_BIN_EXE_trendsignal-gen"))
        .arg("--output")
        .arg(&data)
        .args(["--rows", "500", "--seed", "7"])
        .status()
        .unwrap();
    assert!(status.success());

    std::fs::write(dir.path().join("config.toml"), "seed = 7\nwindow = 20\nversion = \"v1\"\n")
        .unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_trendsignal"))
        .arg("--input")
        .arg(&data)
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--output")
        .arg(dir.path().join("metrics.json"))
        .arg("--log-file")
        .arg(dir.path().join("run.log"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rows_processed"], 500);
}
