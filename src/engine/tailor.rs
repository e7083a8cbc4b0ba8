//! Section tailoring: filter and reorder profile sections for one job

use crate::engine::keywords::keyword_score;
use crate::profile::{Education, PersonalInfo, Profile, Project, WorkExperience};
use serde::Serialize;
use std::collections::BTreeMap;

/// Keep-all policy when no entry matches any keyword: a section with at most
/// this many entries is kept whole, a longer one is filtered down to the
/// matching entries (possibly none).
#[derive(Debug, Clone, Copy)]
pub struct KeepPolicy {
    pub work_keep_all_max: usize,
    pub project_keep_all_max: usize,
}

impl Default for KeepPolicy {
    fn default() -> Self {
        Self {
            work_keep_all_max: 3,
            project_keep_all_max: 2,
        }
    }
}

/// A resume derived from one profile for one job description. Ephemeral:
/// only its rendered form persists.
#[derive(Debug, Clone, Serialize)]
pub struct TailoredResume {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub work_experience: Vec<WorkExperience>,
    pub projects: Vec<Project>,
    pub skills: BTreeMap<String, Vec<String>>,
}

/// Tailor a profile against a keyword set.
///
/// Education passes through verbatim; experience and projects are scored,
/// stable-sorted, and filtered; skills are reordered so matches lead.
pub fn tailor_resume(profile: &Profile, keywords: &[String], policy: &KeepPolicy) -> TailoredResume {
    TailoredResume {
        personal_info: profile.personal_info.clone(),
        education: profile.education.clone(),
        work_experience: tailor_experience(&profile.work_experience, keywords, policy.work_keep_all_max),
        projects: tailor_projects(&profile.projects, keywords, policy.project_keep_all_max),
        skills: tailor_skills(&profile.skills, keywords),
    }
}

fn experience_score(exp: &WorkExperience, keywords: &[String]) -> usize {
    let mut fragments: Vec<&str> = vec![&exp.title, &exp.company];
    fragments.extend(exp.description.iter().map(String::as_str));
    fragments.extend(exp.technologies.iter().map(String::as_str));
    keyword_score(&fragments, keywords)
}

fn project_score(proj: &Project, keywords: &[String]) -> usize {
    let mut fragments: Vec<&str> = vec![&proj.name];
    fragments.extend(proj.description.iter().map(String::as_str));
    fragments.extend(proj.technologies.iter().map(String::as_str));
    keyword_score(&fragments, keywords)
}

fn tailor_experience(
    entries: &[WorkExperience],
    keywords: &[String],
    keep_all_max: usize,
) -> Vec<WorkExperience> {
    let mut scored: Vec<(usize, &WorkExperience)> = entries
        .iter()
        .map(|exp| (experience_score(exp, keywords), exp))
        .collect();

    // Stable sort: ties keep their original relative order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let keep_all = scored.len() <= keep_all_max;
    scored
        .into_iter()
        .filter(|(score, _)| *score > 0 || keep_all)
        .map(|(_, exp)| exp.clone())
        .collect()
}

fn tailor_projects(entries: &[Project], keywords: &[String], keep_all_max: usize) -> Vec<Project> {
    let mut scored: Vec<(usize, &Project)> = entries
        .iter()
        .map(|proj| (project_score(proj, keywords), proj))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let keep_all = scored.len() <= keep_all_max;
    scored
        .into_iter()
        .filter(|(score, _)| *score > 0 || keep_all)
        .map(|(_, proj)| proj.clone())
        .collect()
}

/// Reorder each category so keyword-matching skills come first.
///
/// Partitioned rather than front-inserted: matched skills keep their original
/// relative order, then the unmatched ones in theirs.
fn tailor_skills(
    skills: &BTreeMap<String, Vec<String>>,
    keywords: &[String],
) -> BTreeMap<String, Vec<String>> {
    let mut tailored = BTreeMap::new();

    for (category, skills_list) in skills {
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for skill in skills_list {
            let skill_lower = skill.to_lowercase();
            if keywords.iter().any(|k| skill_lower.contains(&k.to_lowercase())) {
                matched.push(skill.clone());
            } else {
                unmatched.push(skill.clone());
            }
        }

        matched.extend(unmatched);
        tailored.insert(category.clone(), matched);
    }

    tailored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exp(title: &str, description: &[&str], technologies: &[&str]) -> WorkExperience {
        WorkExperience {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            start_date: "2020".to_string(),
            end_date: None,
            description: description.iter().map(|s| s.to_string()).collect(),
            technologies: technologies.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn proj(name: &str, technologies: &[&str]) -> Project {
        Project {
            name: name.to_string(),
            start_date: "2021".to_string(),
            end_date: None,
            description: Vec::new(),
            technologies: technologies.iter().map(|s| s.to_string()).collect(),
            link: None,
        }
    }

    #[test]
    fn matching_entries_sort_by_score_descending() {
        let entries = vec![
            exp("One hit", &["python"], &[]),
            exp("Two hits", &["python and sql"], &[]),
        ];
        let keywords = vec!["python".to_string(), "sql".to_string()];

        let tailored = tailor_experience(&entries, &keywords, 3);
        assert_eq!(tailored[0].title, "Two hits");
        assert_eq!(tailored[1].title, "One hit");
    }

    #[test]
    fn tied_entries_keep_original_order() {
        let entries = vec![
            exp("First", &["python"], &[]),
            exp("Second", &["python"], &[]),
            exp("Third", &["python"], &[]),
        ];
        let keywords = vec!["python".to_string()];

        let tailored = tailor_experience(&entries, &keywords, 3);
        let titles: Vec<&str> = tailored.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn short_list_with_no_matches_is_kept_whole() {
        let entries = vec![exp("A", &[], &[]), exp("B", &[], &[]), exp("C", &[], &[])];
        let tailored = tailor_experience(&entries, &["rust".to_string()], 3);
        assert_eq!(tailored.len(), 3);
    }

    #[test]
    fn long_list_with_no_matches_tailors_to_empty() {
        let entries = vec![
            exp("A", &[], &[]),
            exp("B", &[], &[]),
            exp("C", &[], &[]),
            exp("D", &[], &[]),
        ];
        let tailored = tailor_experience(&entries, &["rust".to_string()], 3);
        assert!(tailored.is_empty());
    }

    #[test]
    fn long_list_keeps_only_matches() {
        let entries = vec![
            exp("A", &[], &[]),
            exp("B", &["rust services"], &[]),
            exp("C", &[], &[]),
            exp("D", &[], &[]),
        ];
        let tailored = tailor_experience(&entries, &["rust".to_string()], 3);
        assert_eq!(tailored.len(), 1);
        assert_eq!(tailored[0].title, "B");
    }

    #[test]
    fn experience_score_includes_title_and_company() {
        let entry = exp("Python Engineer", &[], &[]);
        assert_eq!(experience_score(&entry, &["python".to_string()]), 1);
        assert_eq!(experience_score(&entry, &["acme".to_string()]), 1);
    }

    #[test]
    fn projects_keep_all_threshold_is_two() {
        let entries = vec![proj("A", &[]), proj("B", &[]), proj("C", &[])];
        let tailored = tailor_projects(&entries, &["rust".to_string()], 2);
        assert!(tailored.is_empty());

        let two = vec![proj("A", &[]), proj("B", &[])];
        let tailored = tailor_projects(&two, &["rust".to_string()], 2);
        assert_eq!(tailored.len(), 2);
    }

    #[test]
    fn matched_skills_lead_in_original_order() {
        let skills = BTreeMap::from([(
            "Tools".to_string(),
            vec![
                "Git".to_string(),
                "Docker".to_string(),
                "Kubernetes".to_string(),
                "Jira".to_string(),
            ],
        )]);
        let keywords = vec!["docker".to_string(), "jira".to_string()];

        let tailored = tailor_skills(&skills, &keywords);
        assert_eq!(
            tailored["Tools"],
            vec!["Docker", "Jira", "Git", "Kubernetes"]
        );
    }

    #[test]
    fn skill_matching_is_substring_based() {
        let skills = BTreeMap::from([(
            "Databases".to_string(),
            vec!["PostgreSQL".to_string(), "Redis".to_string()],
        )]);
        // "sql" is contained in "PostgreSQL".
        let tailored = tailor_skills(&skills, &["sql".to_string()]);
        assert_eq!(tailored["Databases"], vec!["PostgreSQL", "Redis"]);
        assert_eq!(tailored["Databases"][0], "PostgreSQL");
    }

    #[test]
    fn education_passes_through_untailored() {
        let mut profile = Profile::with_personal_info(PersonalInfo {
            name: "T".to_string(),
            email: "t@e.c".to_string(),
            ..Default::default()
        });
        profile.education = vec![Education {
            degree: "BS".to_string(),
            major: "CS".to_string(),
            institution: "State U".to_string(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            gpa: None,
            honors: None,
        }];

        let tailored = tailor_resume(&profile, &["unrelated".to_string()], &KeepPolicy::default());
        assert_eq!(tailored.education, profile.education);
    }
}
