//! Integration tests for the wordbench CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary isolated from the developer's own config and environment
fn wordbench(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("WORDBENCH_COUNTING__WORKERS")
        .env_remove("WORDBENCH_COUNTING__TOP_N")
        .env_remove("RUST_LOG");
    cmd
}

fn corpus(dir: &TempDir) {
    fs::write(dir.path().join("a.txt"), "the cat sat. The CAT sat!").unwrap();
    fs::write(dir.path().join("b.txt"), "a dog and a cat").unwrap();
}

/// Test CLI binary exists and responds to --help with the long description
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordbench counts word frequencies"))
        .stdout(predicate::str::contains("run"));
}

/// Test -h prints the short summary
#[test]
fn test_cli_short_help() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Benchmark word-frequency counting strategies"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wordbench"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    let mut cmd = Command::cargo_bin("wordbench").unwrap();
    cmd.arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_run_reports_every_strategy() {
    let dir = TempDir::new().unwrap();
    corpus(&dir);

    wordbench(&dir)
        .args(["run", "a.txt", "b.txt", "--workers", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Top frequent words in"))
        .stdout(predicate::str::contains("Multithreading Resource Usage"))
        .stdout(predicate::str::contains("Word count for"))
        .stdout(predicate::str::contains("Total word count for all files combined"));
}

#[test]
fn test_missing_file_does_not_abort_run() {
    let dir = TempDir::new().unwrap();
    corpus(&dir);

    let assert = wordbench(&dir)
        .args(["run", "a.txt", "missing.txt", "b.txt", "-s", "single"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to open"))
        .stdout(predicate::str::contains("b.txt"));

    // One notice per failed file, not one from the log and another from the report
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert_eq!(stderr.matches("failed to open").count(), 1);
}

#[test]
fn test_run_json_output() {
    let dir = TempDir::new().unwrap();
    corpus(&dir);

    let assert = wordbench(&dir)
        .args(["--format", "json", "run", "a.txt", "b.txt", "-w", "1"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let runs = report["runs"].as_array().unwrap();
    assert_eq!(runs.len(), 3);
    // a.txt has 3 distinct words, b.txt has 4
    assert_eq!(report["combined_word_count"], 7);
    assert_eq!(report["consistent"], true);
    assert_eq!(runs[0]["files"][0]["top_words"][0]["word"], "cat");
}

#[test]
fn test_run_directory_corpus_from_config() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("texts")).unwrap();
    fs::write(dir.path().join("texts/one.txt"), "alpha beta").unwrap();
    fs::write(
        dir.path().join("wordbench.toml"),
        concat!(
            "[corpus]\nfiles = [\"texts\"]\n\n",
            "[counting]\nworkers = 1\n\n",
            "[run]\nstrategies = [\"threads\"]\n",
        ),
    )
    .unwrap();

    wordbench(&dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("one.txt"))
        .stdout(predicate::str::contains("Multiprocessing").not());
}

#[test]
fn test_run_without_corpus_fails() {
    let dir = TempDir::new().unwrap();

    wordbench(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No corpus files"));
}

#[test]
fn test_count_single_file() {
    let dir = TempDir::new().unwrap();
    corpus(&dir);

    wordbench(&dir)
        .args(["count", "a.txt", "--strategy", "single", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cat"))
        .stdout(predicate::str::contains("sat"))
        .stdout(predicate::str::contains("Elapsed time for single-threading"));
}

#[test]
fn test_config_show_uses_defaults() {
    let dir = TempDir::new().unwrap();

    wordbench(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("workers = 4"))
        .stdout(predicate::str::contains("merge = \"fold\""));
}

#[test]
fn test_config_show_picks_up_env() {
    let dir = TempDir::new().unwrap();

    wordbench(&dir)
        .env("WORDBENCH_COUNTING__WORKERS", "8")
        .args(["--format", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workers\": 8"));
}

#[test]
fn test_config_validate_rejects_empty_strategies() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.toml");
    fs::write(&config_path, "[run]\nstrategies = []\n").unwrap();

    wordbench(&dir)
        .args(["config", "validate", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("run.strategies"));
}

#[test]
fn test_config_validate_accepts_defaults() {
    let dir = TempDir::new().unwrap();

    wordbench(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}
