//! End-to-end CLI runs that never reach the object store.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn s3deploy(cwd: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("s3deploy").expect("binary is built");
    cmd.current_dir(cwd.path()).env_remove("RUST_LOG");
    cmd
}

fn site(cwd: &TempDir) {
    let root = cwd.path().join("site");
    fs::create_dir_all(root.join("nested")).expect("create site dirs");
    fs::write(root.join("index.html"), "<html>").expect("write index.html");
    fs::write(root.join("app.abc123.js"), "js").expect("write app.abc123.js");
    fs::write(root.join("nested/skip.html"), "<html>").expect("write nested html");
}

#[test]
fn test_dry_run_prints_plan() {
    let cwd = TempDir::new().expect("create temp dir");
    site(&cwd);

    s3deploy(&cwd)
        .args([
            "deploy",
            "--root",
            "site",
            "--files",
            "*.html,*.abc123.js",
            "--forever",
            "*.abc123.js",
            "--dest",
            "www/",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upload plan (2 file(s)):"))
        .stdout(predicate::str::contains("www/index.html"))
        .stdout(predicate::str::contains("www/app.abc123.js"))
        .stdout(predicate::str::contains("nested").not())
        .stdout(predicate::str::contains("Dry-run mode"));
}

#[test]
fn test_dry_run_reads_default_config_file() {
    let cwd = TempDir::new().expect("create temp dir");
    site(&cwd);
    fs::write(
        cwd.path().join("deploy.yaml"),
        "default:\n  root: site\n  files: \"*.js\"\nstaging:\n  dest: staging/\n",
    )
    .expect("write deploy.yaml");

    s3deploy(&cwd)
        .args(["deploy", "--env", "staging", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging/app.abc123.js"))
        .stdout(predicate::str::contains("index.html").not());
}

#[test]
fn test_unknown_env_fails() {
    let cwd = TempDir::new().expect("create temp dir");
    fs::write(cwd.path().join("deploy.yaml"), "default:\n  bucket: b\n").expect("write config");

    s3deploy(&cwd)
        .args(["deploy", "--env", "prod", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config for env 'prod' not found"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let cwd = TempDir::new().expect("create temp dir");

    s3deploy(&cwd)
        .args(["deploy", "--config", "nope.yaml", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_malformed_config_fails() {
    let cwd = TempDir::new().expect("create temp dir");
    fs::write(cwd.path().join("deploy.yaml"), "default: [oops").expect("write config");

    s3deploy(&cwd)
        .args(["deploy", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_invalid_glob_fails() {
    let cwd = TempDir::new().expect("create temp dir");
    site(&cwd);

    s3deploy(&cwd)
        .args(["deploy", "--root", "site", "--files", "[a-", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid glob pattern"));
}

#[test]
fn test_missing_bucket_fails_before_any_upload() {
    let cwd = TempDir::new().expect("create temp dir");
    site(&cwd);

    s3deploy(&cwd)
        .args(["deploy", "--root", "site", "--key", "k", "--secret", "s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'bucket' must be set"));
}

#[test]
fn test_unknown_region_fails() {
    let cwd = TempDir::new().expect("create temp dir");
    site(&cwd);

    s3deploy(&cwd)
        .args([
            "deploy", "--root", "site", "--bucket", "b", "--key", "k", "--secret", "s", "--region",
            "atlantis-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown region: atlantis-1"));
}
