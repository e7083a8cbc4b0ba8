//! Structured resume profile data

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete resume profile, persisted as one JSON document per profile name.
///
/// Lists keep the order the user wrote them in; the tailoring engine relies on
/// that order for stable ranking. Skill categories iterate in sorted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    #[serde(default)]
    pub major: String,
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    /// None renders as "Present".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Profile {
    /// Validate the profile against the required shape.
    ///
    /// Returns every problem found rather than stopping at the first, so the
    /// store can report them all at once.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.personal_info.name.trim().is_empty() {
            issues.push("personal_info.name must not be empty".to_string());
        }
        if self.personal_info.email.trim().is_empty() {
            issues.push("personal_info.email must not be empty".to_string());
        }

        for (i, edu) in self.education.iter().enumerate() {
            if edu.degree.trim().is_empty() {
                issues.push(format!("education[{}].degree must not be empty", i));
            }
            if edu.institution.trim().is_empty() {
                issues.push(format!("education[{}].institution must not be empty", i));
            }
        }

        for (i, exp) in self.work_experience.iter().enumerate() {
            if exp.title.trim().is_empty() {
                issues.push(format!("work_experience[{}].title must not be empty", i));
            }
            if exp.company.trim().is_empty() {
                issues.push(format!("work_experience[{}].company must not be empty", i));
            }
        }

        for (i, proj) in self.projects.iter().enumerate() {
            if proj.name.trim().is_empty() {
                issues.push(format!("projects[{}].name must not be empty", i));
            }
        }

        for category in self.skills.keys() {
            if category.trim().is_empty() {
                issues.push("skills contains an empty category name".to_string());
            }
        }

        issues
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Minimal profile with just the personal details filled in, used by the
    /// guided creation flow.
    pub fn with_personal_info(personal_info: PersonalInfo) -> Self {
        Self {
            personal_info,
            education: Vec::new(),
            work_experience: Vec::new(),
            projects: Vec::new(),
            skills: BTreeMap::new(),
        }
    }
}
