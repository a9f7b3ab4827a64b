//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::json;

/// Path of the session file under a test TUDU_HOME.
pub fn session_path(home: &Path) -> PathBuf {
    home.join("session.json")
}

/// Writes a persisted session that is still valid.
pub fn seed_session(home: &Path, token: &str) {
    write_session(home, token, u64::MAX);
}

/// Writes a persisted session with an explicit expiry stamp.
pub fn write_session(home: &Path, token: &str, expires: u64) {
    std::fs::create_dir_all(home).unwrap();
    let session = json!({
        "user": { "email": "ada@example.com", "name": "Ada" },
        "token": token,
        "expires": expires,
    });
    std::fs::write(session_path(home), session.to_string()).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_session_writes_the_token() {
        let dir = tempfile::tempdir().unwrap();
        seed_session(dir.path(), "tok-fixture");
        let contents = std::fs::read_to_string(session_path(dir.path())).unwrap();
        assert!(contents.contains("tok-fixture"));
    }
}
