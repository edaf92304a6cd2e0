//! On-disk store for the single user profile.
//!
//! Loaded once on startup and rewritten wholesale on every change. Writes go
//! through a temp file in the same directory so a crash mid-write never
//! leaves a truncated profile behind.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::config;
use crate::models::UserProfile;

pub struct ProfileStore {
    path: PathBuf,
}

#[derive(Error, Debug)]
pub enum ProfileStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Atomic replace failed: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the standard location, ~/NexGen/profile.json.
    pub fn default_location() -> Self {
        Self::new(config::profile_path())
    }

    /// Load the profile, falling back to defaults when the file is missing
    /// or unreadable. A corrupt file is logged and ignored, never fatal.
    pub fn load(&self) -> UserProfile {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return UserProfile::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "cannot read profile, using defaults");
                return UserProfile::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "corrupt profile file, using defaults");
                UserProfile::default()
            }
        }
    }

    /// Persist the profile atomically (temp file + rename).
    pub fn save(&self, profile: &UserProfile) -> Result<(), ProfileStoreError> {
        let parent = self
            .path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&parent)?;

        let json = serde_json::to_string_pretty(profile)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path)?;

        tracing::debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}
