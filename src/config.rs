//! Configuration management for job-tailor

use crate::error::{JobTailorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub scoring: ScoringConfig,
    pub tailoring: TailoringConfig,
    pub storage: StorageConfig,
}

/// Remote listing feed: a README rendered from a GitHub repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub repo_owner: String,
    pub repo_name: String,
    pub branch: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Minimum fit score for "High Fit".
    pub high_threshold: f64,
    /// Minimum fit score for "Medium Fit".
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoringConfig {
    /// Keep every work experience entry, matched or not, when the list has at
    /// most this many entries.
    pub work_keep_all_max: usize,
    /// Same policy for projects.
    pub project_keep_all_max: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub db_path: PathBuf,
    pub profiles_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl SourceConfig {
    pub fn listing_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/README.md",
            self.repo_owner, self.repo_name, self.branch
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("job-tailor");

        Self {
            source: SourceConfig {
                repo_owner: "SimplifyJobs".to_string(),
                repo_name: "New-Grad-Positions".to_string(),
                branch: "dev".to_string(),
            },
            scoring: ScoringConfig {
                high_threshold: 5.0,
                medium_threshold: 2.0,
            },
            tailoring: TailoringConfig {
                work_keep_all_max: 3,
                project_keep_all_max: 2,
            },
            storage: StorageConfig {
                db_path: data_dir.join("jobs.db"),
                profiles_dir: data_dir.join("profiles"),
                output_dir: data_dir.join("output_resumes"),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                JobTailorError::Configuration(format!("Failed to parse config: {}", e))
            })?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.check()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            JobTailorError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("job-tailor")
            .join("config.toml")
    }

    fn check(&self) -> Result<()> {
        if self.scoring.medium_threshold > self.scoring.high_threshold {
            return Err(JobTailorError::Configuration(format!(
                "medium_threshold ({}) must not exceed high_threshold ({})",
                self.scoring.medium_threshold, self.scoring.high_threshold
            )));
        }
        Ok(())
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.storage.output_dir)?;
        Ok(())
    }
}
