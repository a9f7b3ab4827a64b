//! Integration tests for login/signup/logout against a mock API.

mod fixtures;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tudu(home: &std::path::Path, server: &MockServer) -> Command {
    let mut cmd = Command::cargo_bin("tudu").unwrap();
    cmd.env("TUDU_HOME", home)
        .env("TUDU_API_URL", format!("{}/api", server.uri()))
        .env("TUDU_BLOCK_REAL_API", "1");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_persists_session() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "email": "ada@example.com", "name": "Ada" },
            "token": "tok-abcdefghijklmnop",
        })))
        .expect(1)
        .mount(&server)
        .await;

    tudu(dir.path(), &server)
        .args(["login", "--email", "ada@example.com", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ada@example.com"));

    let session = fs::read_to_string(fixtures::session_path(dir.path())).unwrap();
    assert!(session.contains("tok-abcdefghijklmnop"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_leaves_no_session() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    tudu(dir.path(), &server)
        .args(["login", "--email", "ada@example.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!fixtures::session_path(dir.path()).exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_persists_session() {
    let dir = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "email": "new@example.com",
            "password": "pw123456",
            "name": "Newcomer",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": { "email": "new@example.com", "name": "Newcomer" },
            "token": "tok-qrstuvwxyz123456",
        })))
        .expect(1)
        .mount(&server)
        .await;

    tudu(dir.path(), &server)
        .args([
            "signup",
            "--email",
            "new@example.com",
            "--password",
            "pw123456",
            "--name",
            "Newcomer",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created for new@example.com"));

    assert!(fixtures::session_path(dir.path()).exists());
}

#[test]
fn test_logout_clears_session() {
    let dir = tempdir().unwrap();
    fixtures::seed_session(dir.path(), "tok-abcdefghijklmnop");

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!fixtures::session_path(dir.path()).exists());
}

#[test]
fn test_logout_when_not_logged_in() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_login_requires_credentials() {
    let dir = tempdir().unwrap();

    Command::cargo_bin("tudu")
        .unwrap()
        .env("TUDU_HOME", dir.path())
        .env_remove("TUDU_PASSWORD")
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}
