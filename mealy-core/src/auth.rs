//! Session token storage.
//!
//! The token lives in the same key-value store as the overlay maps,
//! under a primary key plus a legacy alias older client versions wrote.
//! Reads fall back to the alias; writes keep both keys in sync so a
//! downgrade still finds the session.

use std::path::PathBuf;

use thiserror::Error;

use crate::overlay::{FileBackend, StorageBackend, StorageError};

/// Primary storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Alias kept for sessions written by older client versions.
pub const LEGACY_TOKEN_KEY: &str = "authToken";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not logged in. Run 'mealy login' first.")]
    NotLoggedIn,

    #[error("Failed to store session: {0}")]
    Storage(#[from] StorageError),
}

/// Stored bearer-token session.
pub struct SessionStore {
    backend: Box<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Opens session storage on the filesystem under `data_dir`, the
    /// same directory the overlay cache lives in.
    pub fn open(data_dir: PathBuf) -> Self {
        Self::new(Box::new(FileBackend::new(data_dir)))
    }

    /// Returns the stored token, if any.
    pub fn token(&self) -> Option<String> {
        self.backend
            .get(TOKEN_KEY)
            .or_else(|| self.backend.get(LEGACY_TOKEN_KEY))
            .filter(|token| !token.is_empty())
    }

    /// Returns the stored token or the not-logged-in error every
    /// authenticated command reports.
    pub fn require_token(&self) -> Result<String, AuthError> {
        self.token().ok_or(AuthError::NotLoggedIn)
    }

    /// Stores a fresh token under both keys. Empty tokens are ignored.
    pub fn set_token(&self, token: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Ok(());
        }
        self.backend.set(TOKEN_KEY, token)?;
        self.backend.set(LEGACY_TOKEN_KEY, token)?;
        Ok(())
    }

    /// Removes the session under both keys.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.backend.remove(TOKEN_KEY)?;
        self.backend.remove(LEGACY_TOKEN_KEY)?;
        Ok(())
    }
}
