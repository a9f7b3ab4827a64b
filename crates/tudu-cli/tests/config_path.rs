use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("api_base_url ="));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# existing config").unwrap();

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_updates_value() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .args(["config", "set-url", "http://localhost:4000/api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set api_base_url"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("http://localhost:4000/api"));
}

#[test]
fn test_config_set_url_rejects_garbage() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .args(["config", "set-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid URL"));
}
