//! Session persistence.
//!
//! Stores the session in `$TUDU_HOME/session.json` with restricted
//! permissions (0600). Tokens are never logged or displayed in full.
//!
//! The store is an explicit value passed to whatever needs it; there is
//! no process-global session state. An expired or unreadable session
//! file is treated the same as an absent one.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;
use crate::types::User;

/// Session filename under the tudu home directory.
const SESSION_FILE: &str = "session.json";

/// Sessions live for 24 hours, matching the API token's intended lifetime.
pub const SESSION_TTL_MS: u64 = 24 * 60 * 60 * 1000;

fn now_millis() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// An authenticated session: the user plus the bearer token the API
/// issued for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    /// Opaque bearer credential issued by the auth API.
    pub token: String,
    /// Expiry timestamp in milliseconds since epoch.
    pub expires: u64,
}

impl Session {
    /// Creates a session expiring [`SESSION_TTL_MS`] from now.
    pub fn new(user: User, token: String) -> Self {
        Self {
            user,
            token,
            expires: now_millis().saturating_add(SESSION_TTL_MS),
        }
    }

    /// Returns true if the session is past its expiry stamp.
    pub fn is_expired(&self) -> bool {
        now_millis() >= self.expires
    }
}

/// On-disk session store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store rooted at the given home directory.
    pub fn new(home: &Path) -> Self {
        Self {
            path: home.join(SESSION_FILE),
        }
    }

    /// Creates a store rooted at the resolved `$TUDU_HOME`.
    pub fn open_default() -> Self {
        Self::new(&paths::tudu_home())
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session.
    ///
    /// Missing, unparseable, and expired files all yield `Ok(None)`;
    /// the latter two also remove the file so the next load is clean.
    ///
    /// # Errors
    /// Returns an error only if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        let Ok(session) = serde_json::from_str::<Session>(&contents) else {
            tracing::warn!(path = %self.path.display(), "discarding unparseable session file");
            let _ = fs::remove_file(&self.path);
            return Ok(None);
        };

        if session.is_expired() {
            tracing::info!("persisted session expired, discarding");
            let _ = fs::remove_file(&self.path);
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Saves the session to disk with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the persisted session. Returns true if one existed.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// Masks a token for display and logging.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
        }
    }

    #[test]
    fn roundtrip_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(store.load().unwrap().is_none());

        let session = Session::new(user(), "tok-1234567890-abcdef".into());
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().expect("session should load");
        assert_eq!(loaded.token, session.token);
        assert_eq!(loaded.user.email, "ada@example.com");
    }

    #[cfg(unix)]
    #[test]
    fn session_file_has_restricted_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        store
            .save(&Session::new(user(), "tok-1234567890-abcdef".into()))
            .unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn expired_session_loads_as_none_and_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let mut session = Session::new(user(), "tok-1234567890-abcdef".into());
        session.expires = 1; // long past
        store.save(&session).unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_session_loads_as_none_and_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn clear_reports_whether_a_session_existed() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(!store.clear().unwrap());

        store
            .save(&Session::new(user(), "tok-1234567890-abcdef".into()))
            .unwrap();
        assert!(store.clear().unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("tok-abcdefghijklmnop"), "tok-abcdefgh...");
        assert_eq!(mask_token("short"), "***");
    }
}
