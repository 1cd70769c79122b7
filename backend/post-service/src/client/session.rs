use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::derived_email;

/// The locally chosen identity. Not a credential: the server trusts
/// whatever username is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub email: String,
}

impl CurrentUser {
    /// `None` for a blank username
    pub fn login(username: &str) -> Option<Self> {
        let username = username.trim();
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            email: derived_email(username),
        })
    }
}

/// JSON file holding the current user between runs
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved user; a missing or unreadable file means logged out
    pub fn load(&self) -> Option<CurrentUser> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding corrupt session file");
                None
            }
        }
    }

    pub fn save(&self, user: &CurrentUser) -> std::io::Result<()> {
        let json = serde_json::to_string(user)?;
        std::fs::write(&self.path, json)
    }

    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
