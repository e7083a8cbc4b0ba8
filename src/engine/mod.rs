//! Fit scoring and tailoring engine
//!
//! Extracts keywords from a job description, scores profile sections by
//! keyword containment, and produces a tailored, reordered resume for one
//! specific job.

pub mod keywords;
pub mod render;
pub mod scoring;
pub mod tailor;

pub use keywords::{extract_keywords, keyword_score};
pub use render::render_markdown;
pub use scoring::{profile_fit_score, FitCategory, FitThresholds};
pub use tailor::{tailor_resume, KeepPolicy, TailoredResume};

use crate::config::Config;
use crate::error::{JobTailorError, Result};
use crate::profile::{Profile, ProfileStore};

/// Scoring and tailoring against one loaded profile.
#[derive(Debug)]
pub struct TailorEngine {
    profile: Profile,
    thresholds: FitThresholds,
    policy: KeepPolicy,
}

impl TailorEngine {
    pub fn new(profile: Profile, thresholds: FitThresholds, policy: KeepPolicy) -> Self {
        Self {
            profile,
            thresholds,
            policy,
        }
    }

    /// Load the named profile and build an engine from it.
    ///
    /// Profile problems make construction fail; no scoring or tailoring can
    /// proceed without a usable profile.
    pub fn from_store(store: &ProfileStore, name: &str, config: &Config) -> Result<Self> {
        let profile = store.load(name).map_err(|e| {
            JobTailorError::Profile(format!("Could not load profile '{}': {}", name, e))
        })?;

        Ok(Self::new(
            profile,
            FitThresholds {
                high: config.scoring.high_threshold,
                medium: config.scoring.medium_threshold,
            },
            KeepPolicy {
                work_keep_all_max: config.tailoring.work_keep_all_max,
                project_keep_all_max: config.tailoring.project_keep_all_max,
            },
        ))
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Aggregate fit score and category for one job description.
    pub fn score_job(&self, description: &str) -> (f64, FitCategory) {
        let keywords = extract_keywords(description);
        let score = profile_fit_score(&self.profile, &keywords) as f64;
        let category = self.thresholds.categorize(score);
        (score, category)
    }

    /// Tailor the profile for one job description.
    pub fn tailor(&self, description: &str) -> TailoredResume {
        let keywords = extract_keywords(description);
        tailor_resume(&self.profile, &keywords, &self.policy)
    }
}
