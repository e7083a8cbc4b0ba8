//! Profile persistence with validation at every load/save boundary

use crate::error::{JobTailorError, Result};
use crate::profile::model::Profile;
use log::warn;
use std::path::{Path, PathBuf};

/// File-backed profile store: one pretty-printed JSON document per name.
pub struct ProfileStore {
    profiles_dir: PathBuf,
}

impl ProfileStore {
    pub fn new<P: Into<PathBuf>>(profiles_dir: P) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
        }
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir.join(format!("{}.json", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.profile_path(name).exists()
    }

    /// Load a profile by name.
    ///
    /// A profile that parses but fails validation is still returned, with each
    /// issue logged as a warning; callers must tolerate unvalidated data.
    /// Missing files and malformed JSON are errors.
    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.profile_path(name);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                JobTailorError::Profile(format!("Profile '{}' not found", name))
            } else {
                JobTailorError::Io(e)
            }
        })?;

        let profile: Profile = serde_json::from_str(&content).map_err(|e| {
            JobTailorError::Profile(format!("Profile '{}' is not valid JSON: {}", name, e))
        })?;

        for issue in profile.validate() {
            warn!("Loaded profile '{}' is invalid: {}", name, issue);
        }

        Ok(profile)
    }

    /// Save a profile, refusing data that fails validation.
    pub fn save(&self, name: &str, profile: &Profile) -> Result<()> {
        let issues = profile.validate();
        if !issues.is_empty() {
            return Err(JobTailorError::ProfileValidation(format!(
                "Cannot save profile '{}': {}",
                name,
                issues.join("; ")
            )));
        }

        std::fs::create_dir_all(&self.profiles_dir)?;
        let content = serde_json::to_string_pretty(profile)?;
        std::fs::write(self.profile_path(name), content)?;
        Ok(())
    }

    /// Create a new profile; fails if the name is already taken.
    pub fn create(&self, name: &str, profile: &Profile) -> Result<()> {
        if self.exists(name) {
            return Err(JobTailorError::Profile(format!(
                "Profile '{}' already exists",
                name
            )));
        }
        self.save(name, profile)
    }

    /// List profile names, from the `.json` files in the profiles directory.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.profiles_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.profiles_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
