//! Local persistence for the profile record.
//!
//! A single flat record under one fixed key, last-writer-wins. Loading is
//! deliberately forgiving: malformed stored data is discarded and the
//! defaults are used instead, so a broken file can never wedge the CLI.

use anyhow::{Context, Result};
use diet_service_client::profile::Profile;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed storage key for the persisted profile.
pub const PROFILE_KEY: &str = "demo_profile";

pub struct ProfileStore {
    base_dir: PathBuf,
}

impl ProfileStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn profile_path(&self) -> PathBuf {
        self.base_dir.join(format!("{PROFILE_KEY}.json"))
    }

    /// Persist the full normalized profile (dislikes included), replacing
    /// any prior value.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", self.base_dir))?;
        let path = self.profile_path();
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&path, json).with_context(|| format!("Failed to write profile: {path:?}"))?;
        Ok(())
    }

    /// Load the stored profile. An absent file, unreadable file or
    /// malformed JSON yields the default profile; well-formed JSON is
    /// restored field by field with per-field fallbacks.
    pub fn load(&self) -> Profile {
        let path = self.profile_path();
        let Ok(content) = fs::read_to_string(&path) else {
            return Profile::default();
        };
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => Profile::from_stored(&value),
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "discarding malformed stored profile");
                Profile::default()
            }
        }
    }
}
