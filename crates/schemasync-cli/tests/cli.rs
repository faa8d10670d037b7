//! End-to-end runs of the `schemasync` binary against stand-in diff tools.
#![cfg(unix)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

/// Stand-in diff tools live with `schemasync-diff` and are committed with the
/// executable bit; both crates run against the same scripts.
fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("schemasync-diff")
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_str()
        .unwrap()
        .to_string()
}

/// A `schemasync` invocation of `tool`, rooted in `dir` with an empty config file, so
/// neither the user's config nor their environment leaks in.
fn schemasync(dir: &Path, tool: &str) -> Command {
    let config = dir.join("schemasync.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = Command::cargo_bin("schemasync").unwrap();
    cmd.current_dir(dir)
        .env_remove("SCHEMASYNC_DEV_PASSWORD")
        .env_remove("SCHEMASYNC_PROD_PASSWORD")
        .env_remove("SCHEMASYNC_TOOL")
        .env_remove("RUST_LOG")
        .args(["--config", config.to_str().unwrap()])
        .args(["--tool", tool])
        .args(["--dev-db", "app_dev", "--dev-user", "dev"])
        .args(["--prod-host", "db.prod", "--prod-db", "app", "--prod-user", "owner"]);
    cmd
}

fn sql_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".sql"))
        .collect()
}

#[test]
fn dry_run_prints_sql_and_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-changes"))
        .args(["--dev-password", "d", "--prod-password", "p", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ALTER TABLE t ADD COLUMN c int;"))
        .stdout(predicate::str::contains("This was a dry run"));

    assert!(sql_files(dir.path()).is_empty());
}

#[test]
fn default_output_name_is_timestamped() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-changes"))
        .args(["--dev-password", "d", "--prod-password", "p"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Migration SQL saved to: migration_"));

    let files = sql_files(dir.path());
    assert_eq!(files.len(), 1);
    let name = &files[0];
    let stamp = name
        .strip_prefix("migration_")
        .and_then(|rest| rest.strip_suffix(".sql"))
        .unwrap();
    let (date, time) = stamp.split_once('_').unwrap();
    assert_eq!(date.len(), 8);
    assert_eq!(time.len(), 6);
    assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));

    let written = std::fs::read_to_string(dir.path().join(name)).unwrap();
    assert!(written.contains("-- Run this SQL on PRODUCTION to match DEVELOPMENT schema\n\nBEGIN;\n\n"));
    assert!(written.ends_with("ALTER TABLE t ADD COLUMN c int;\n\n\nCOMMIT;\n"));
}

#[test]
fn explicit_output_path_is_used() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-changes"))
        .args(["--dev-password", "d", "--prod-password", "p", "-o", "sync.sql"])
        .assert()
        .success();

    assert_eq!(sql_files(dir.path()), vec!["sync.sql".to_string()]);
}

#[test]
fn in_sync_exits_zero_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-in-sync"))
        .args(["--dev-password", "d", "--prod-password", "p"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✓ No differences found! Schemas are already in sync.",
        ));

    assert!(sql_files(dir.path()).is_empty());
}

#[test]
fn tool_failure_reports_stderr_and_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-fails"))
        .args(["--dev-password", "d", "--prod-password", "p"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "FATAL: database \"app\" does not exist",
        ));

    assert!(sql_files(dir.path()).is_empty());
}

#[test]
fn missing_tool_with_no_install_exits_one() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), "/nonexistent/migra")
        .arg("--no-install")
        .args(["--dev-password", "d", "--prod-password", "p"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("installation is disabled"));
}

#[test]
fn non_interactive_run_connects_without_passwords() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-changes"))
        .args(["--dry-run", "--with-privileges"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "-- arg: postgresql://owner@db.prod:5432/app\n\
             -- arg: postgresql://dev@localhost:5432/app_dev\n\
             -- arg: --with-privileges\n",
        ));
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    Command::cargo_bin("schemasync")
        .unwrap()
        .args(["--dev-db", "app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dev-user"));
}

#[test]
fn tool_failure_with_binary_stdout_still_reports_stderr() {
    let dir = tempfile::tempdir().unwrap();

    schemasync(dir.path(), &fixture("migra-garbled"))
        .args(["--dev-password", "d", "--prod-password", "p"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "FATAL: password authentication failed",
        ));

    assert!(sql_files(dir.path()).is_empty());
}
