use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gmv(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gmv").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "{}").unwrap();
    (dir, config)
}

#[test]
fn extract_labeled_figure_from_file() {
    let (dir, config) = workspace();
    let input = dir.path().join("ocr.txt");
    fs::write(&input, "Pendapatan\n286.9K").unwrap();

    gmv(&config)
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""gmv":"286900""#))
        .stdout(predicate::str::contains(r#""strategy":"labeled_magnitude""#))
        .stdout(predicate::str::contains(r#""formatted":"Rp 286.900""#));
}

#[test]
fn extract_from_stdin_as_text() {
    let (_dir, config) = workspace();

    gmv(&config)
        .args(["extract", "-", "--format", "text"])
        .write_stdin("Total: Rp 1.234.567")
        .assert()
        .success()
        .stdout(predicate::str::contains("GMV: Rp 1.234.567"))
        .stdout(predicate::str::contains("Strategy: currency_format"));
}

#[test]
fn extract_not_found_is_not_an_error() {
    let (_dir, config) = workspace();

    gmv(&config)
        .args(["extract", "-"])
        .write_stdin("Suhu 25 derajat, tidak ada data")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""gmv":null"#));
}

#[test]
fn extract_require_fails_when_not_found() {
    let (_dir, config) = workspace();

    gmv(&config)
        .args(["extract", "-", "--require"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No GMV value found"));
}

#[test]
fn extract_explain_lists_declined_strategies() {
    let (_dir, config) = workspace();

    gmv(&config)
        .args(["extract", "-", "--explain"])
        .write_stdin("GMV 0K\nTotal 98.500")
        .assert()
        .success()
        .stderr(predicate::str::contains("labeled_magnitude"))
        .stderr(predicate::str::contains("currency_format"))
        .stdout(predicate::str::contains(r#""gmv":"98500""#));
}

#[test]
fn extract_csv_output() {
    let (_dir, config) = workspace();

    gmv(&config)
        .args(["extract", "-", "--format", "csv"])
        .write_stdin("GMV: 500K")
        .assert()
        .success()
        .stdout(predicate::str::contains("source,gmv,strategy,formatted,extracted_at"))
        .stdout(predicate::str::contains("-,500000,labeled_magnitude,Rp 500.000,"));
}

#[test]
fn extract_missing_file_fails() {
    let (dir, config) = workspace();

    gmv(&config)
        .arg("extract")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn extract_respects_configured_currency_symbol() {
    let (_dir, config) = workspace();
    fs::write(&config, r#"{"output": {"currency_symbol": "IDR"}}"#).unwrap();

    gmv(&config)
        .args(["extract", "-", "--format", "text"])
        .write_stdin("Views 1.2M Pendapatan 500K")
        .assert()
        .success()
        .stdout(predicate::str::contains("GMV: IDR 500.000"));
}

#[test]
fn batch_writes_reports_and_summary() {
    let (dir, config) = workspace();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), "Pendapatan\n286.9K").unwrap();
    fs::write(inputs.join("b.txt"), "Total: Rp 1.234.567").unwrap();
    fs::write(inputs.join("c.txt"), "tidak ada data").unwrap();

    gmv(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 with GMV, 1 without, 0 failed"));

    assert!(out.join("a.json").exists());
    assert!(out.join("c.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,found,286900,labeled_magnitude"));
    assert!(summary.contains("b.txt,found,1234567,currency_format"));
    assert!(summary.contains("c.txt,not_found,"));
}

#[test]
fn batch_without_matches_fails() {
    let (dir, config) = workspace();

    gmv(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().join("empty").display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn batch_report_write_failure_becomes_error_row() {
    let (dir, config) = workspace();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), "GMV: 500K").unwrap();
    fs::write(inputs.join("b.txt"), "Total: Rp 1.234.567").unwrap();
    // A directory where a.json should go makes that one report unwritable.
    fs::create_dir_all(out.join("a.json")).unwrap();

    gmv(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .arg("--summary")
        .arg("--continue-on-error")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 with GMV, 0 without, 1 failed"));

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.txt,error,"));
    assert!(summary.contains("cannot write"));
    assert!(summary.contains("b.txt,found,1234567,currency_format"));
}

#[test]
fn batch_report_write_failure_stops_without_continue() {
    let (dir, config) = workspace();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("a.txt"), "GMV: 500K").unwrap();
    fs::create_dir_all(out.join("a.json")).unwrap();

    gmv(&config)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[cfg(unix)]
#[test]
fn scan_runs_configured_recognizer() {
    let (dir, config) = workspace();
    fs::write(
        &config,
        r#"{"recognizer": {"command": ["cat", "{input}"], "timeout_ms": 5000, "max_retries": 0}}"#,
    )
    .unwrap();
    // cat stands in for the OCR engine: the "screenshot" already holds its text.
    let screenshot = dir.path().join("shot.png");
    fs::write(&screenshot, "GMV: 500K").unwrap();

    gmv(&config)
        .arg("scan")
        .arg(&screenshot)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""gmv":"500000""#));
}

#[cfg(unix)]
#[test]
fn scan_reports_recognizer_failure() {
    let (dir, config) = workspace();
    fs::write(
        &config,
        r#"{"recognizer": {"command": ["gmv-no-such-ocr-program"], "max_retries": 0}}"#,
    )
    .unwrap();
    let screenshot = dir.path().join("shot.png");
    fs::write(&screenshot, "").unwrap();

    gmv(&config)
        .arg("scan")
        .arg(&screenshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read the screenshot"));
}

#[test]
fn config_set_then_get() {
    let (dir, _) = workspace();
    let config = dir.path().join("fresh").join("config.json");

    gmv(&config)
        .args(["config", "set", "recognizer.timeout_ms", "1500"])
        .assert()
        .success();

    gmv(&config)
        .args(["config", "get", "recognizer.timeout_ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1500"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let (_dir, config) = workspace();

    gmv(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    gmv(&config)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let written = fs::read_to_string(&config).unwrap();
    assert!(written.contains("tesseract"));
}
