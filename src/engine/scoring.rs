//! Aggregate profile scoring and fit categorization

use crate::engine::keywords::keyword_score;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fit category stored on each job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitCategory {
    High,
    Medium,
    Low,
    Unclassified,
}

impl FitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitCategory::High => "High Fit",
            FitCategory::Medium => "Medium Fit",
            FitCategory::Low => "Low Fit",
            FitCategory::Unclassified => "unclassified",
        }
    }

    /// Parse the stored label; anything unrecognized is unclassified.
    pub fn from_label(label: &str) -> Self {
        match label {
            "High Fit" => FitCategory::High,
            "Medium Fit" => FitCategory::Medium,
            "Low Fit" => FitCategory::Low,
            _ => FitCategory::Unclassified,
        }
    }
}

impl fmt::Display for FitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied categorization thresholds.
#[derive(Debug, Clone, Copy)]
pub struct FitThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for FitThresholds {
    fn default() -> Self {
        Self {
            high: 5.0,
            medium: 2.0,
        }
    }
}

impl FitThresholds {
    /// Map a fit score to a category. A score exactly on a threshold maps to
    /// the higher category.
    pub fn categorize(&self, score: f64) -> FitCategory {
        if score >= self.high {
            FitCategory::High
        } else if score >= self.medium {
            FitCategory::Medium
        } else {
            FitCategory::Low
        }
    }
}

/// Aggregate fit score of a whole profile against one keyword set: the sum of
/// keyword scores over every skills category, every work experience's
/// description and technologies, and every project's description and
/// technologies. Titles and companies are not part of the aggregate.
pub fn profile_fit_score(profile: &Profile, keywords: &[String]) -> usize {
    let mut score = 0;

    for skills_list in profile.skills.values() {
        score += keyword_score(skills_list, keywords);
    }

    for exp in &profile.work_experience {
        let fragments: Vec<&str> = exp
            .description
            .iter()
            .chain(exp.technologies.iter())
            .map(String::as_str)
            .collect();
        score += keyword_score(&fragments, keywords);
    }

    for proj in &profile.projects {
        let fragments: Vec<&str> = proj
            .description
            .iter()
            .chain(proj.technologies.iter())
            .map(String::as_str)
            .collect();
        score += keyword_score(&fragments, keywords);
    }

    score
}
