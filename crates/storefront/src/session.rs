//! Login session context and its on-disk persistence.
//!
//! A [`Session`] is created from a successful login, owned by the
//! application shell, and passed explicitly to whatever needs the token.
//! [`SessionStore`] keeps it across CLI invocations as a small JSON file.

use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::LoginResponse;

/// Errors that can occur while persisting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading, writing or removing the session file failed.
    #[error("session file error: {0}")]
    Io(#[from] io::Error),

    /// The session file is not valid session JSON.
    #[error("session file is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// An authenticated user.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct Session {
    token: SecretString,
    username: String,
    balance: Decimal,
}

impl Session {
    /// Create a session.
    #[must_use]
    pub fn new(token: SecretString, username: impl Into<String>, balance: Decimal) -> Self {
        Self {
            token,
            username: username.into(),
            balance,
        }
    }

    /// Bearer token for authenticated requests.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// Logged-in username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Wallet balance at login time.
    #[must_use]
    pub const fn balance(&self) -> Decimal {
        self.balance
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: SecretString::from(response.token),
            username: response.username,
            balance: response.balance,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("username", &self.username)
            .field("balance", &self.balance)
            .finish()
    }
}

/// File representation of a [`Session`].
#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    username: String,
    balance: Decimal,
}

/// Persists the session as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session. A missing file means nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession = serde_json::from_str(&contents)?;
        Ok(Some(Session {
            token: SecretString::from(stored.token),
            username: stored.username,
            balance: stored.balance,
        }))
    }

    /// Save a session, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file cannot be written.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredSession {
            token: session.token.expose_secret().to_string(),
            username: session.username.clone(),
            balance: session.balance,
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Remove the saved session. Clearing an absent session is not an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
