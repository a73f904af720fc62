// ABOUTME: Integration tests for the kubeship CLI commands.
// ABOUTME: Validates --help output, init behavior, and failures before any cluster contact.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn kubeship_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("kubeship"))
}

#[test]
fn help_shows_commands() {
    kubeship_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn deploy_help_lists_overrides() {
    kubeship_cmd()
        .args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--image"))
        .stdout(predicate::str::contains("--replicas"))
        .stdout(predicate::str::contains("--keep-image"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("kubeship.yml");

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .success();

    assert!(config_path.exists(), "kubeship.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("workload: my-app"));
    assert!(content.contains("IMAGE_REF"));
}

#[test]
fn init_writes_given_workload_and_image() {
    let temp_dir = tempfile::tempdir().unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--workload", "api", "--image", "ghcr.io/org/api:v1"])
        .assert()
        .success();

    let content = fs::read_to_string(temp_dir.path().join("kubeship.yml")).unwrap();
    assert!(content.contains("workload: api"));
    assert!(content.contains("image: ghcr.io/org/api:v1"));
}

#[test]
fn init_rejects_invalid_workload() {
    let temp_dir = tempfile::tempdir().unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--workload", "My_App"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("kubeship.yml");

    fs::write(&config_path, "existing: config").unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("kubeship.yml");

    fs::write(&config_path, "existing: config").unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("workload:"));
}

#[test]
fn deploy_without_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn deploy_rejects_unqualified_image_before_connecting() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("kubeship.yml"), "workload: web\n").unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .args(["deploy", "--image", "nginx:latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry"));
}

#[test]
fn deploy_rejects_zero_replicas() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("kubeship.yml"),
        "workload: web\nimage: registry.example.com/web:abc\n",
    )
    .unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .args(["deploy", "--replicas", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn json_error_is_structured() {
    let temp_dir = tempfile::tempdir().unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .args(["--json", "deploy", "-d", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"event\":\"error\""));
}

#[test]
fn deploy_removes_workdir_even_when_config_is_missing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let workdir = temp_dir.path().join("build");
    fs::create_dir_all(workdir.join("context")).unwrap();
    fs::write(workdir.join("context/Dockerfile"), "FROM scratch\n").unwrap();

    kubeship_cmd()
        .current_dir(temp_dir.path())
        .arg("deploy")
        .arg("--workdir")
        .arg(&workdir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));

    assert!(!workdir.exists(), "workdir should be removed after a failed run");
}
