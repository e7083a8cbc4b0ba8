//! Integration tests for job-tailor

use job_tailor::db::{JobStore, NewJob};
use job_tailor::engine::{
    extract_keywords, FitCategory, FitThresholds, KeepPolicy, TailorEngine,
};
use job_tailor::profile::{PersonalInfo, Profile, ProfileStore, Project, WorkExperience};
use job_tailor::scrape::ListingParser;
use job_tailor::workflow::ApplicationWorkflow;
use std::collections::BTreeMap;

fn base_profile() -> Profile {
    let mut profile = Profile::with_personal_info(PersonalInfo {
        name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "555-0100".to_string(),
        linkedin: "https://linkedin.com/in/janedoe".to_string(),
        github: "https://github.com/janedoe".to_string(),
    });
    profile.skills = BTreeMap::from([(
        "Languages".to_string(),
        vec!["Python".to_string(), "Java".to_string()],
    )]);
    profile
}

fn engine_for(profile: Profile) -> TailorEngine {
    TailorEngine::new(profile, FitThresholds::default(), KeepPolicy::default())
}

const LISTING_HTML: &str = r#"
    <h3>Software Engineering</h3>
    <table>
      <thead><tr><th>Company</th><th>Role</th><th>Location</th><th>Application</th><th>Age</th></tr></thead>
      <tbody>
        <tr>
          <td>Initech</td>
          <td>Python Engineer</td>
          <td>Austin, TX</td>
          <td><a href="https://initech.example/apply">Apply</a></td>
          <td>2d</td>
        </tr>
      </tbody>
    </table>
"#;

#[test]
fn python_skill_leads_its_category_after_tailoring() {
    let engine = engine_for(base_profile());

    let keywords = extract_keywords("Seeking Python engineer");
    assert!(keywords.contains(&"python".to_string()));
    assert!(keywords.contains(&"seeking".to_string()));
    assert!(keywords.contains(&"engineer".to_string()));

    let tailored = engine.tailor("Seeking Python engineer");
    assert_eq!(tailored.skills["Languages"], vec!["Python", "Java"]);
    assert_eq!(tailored.skills["Languages"][0], "Python");
}

#[test]
fn short_tokens_never_become_keywords() {
    let keywords = extract_keywords("Seeking Python engineer to do it");
    assert!(!keywords.contains(&"to".to_string()));
    assert!(!keywords.contains(&"do".to_string()));
    assert!(!keywords.contains(&"it".to_string()));
}

#[test]
fn four_unmatched_experiences_tailor_to_empty() {
    let mut profile = base_profile();
    profile.skills.clear();
    for i in 0..4 {
        profile.work_experience.push(WorkExperience {
            title: format!("Role {}", i),
            company: format!("Employer {}", i),
            location: "Nowhere".to_string(),
            start_date: "2020".to_string(),
            end_date: None,
            description: vec!["Unrelated work".to_string()],
            technologies: Vec::new(),
        });
    }

    let tailored = engine_for(profile).tailor("quantum blockchain wizardry");
    assert!(tailored.work_experience.is_empty());
}

#[test]
fn three_unmatched_experiences_are_kept_whole() {
    let mut profile = base_profile();
    profile.skills.clear();
    for i in 0..3 {
        profile.work_experience.push(WorkExperience {
            title: format!("Role {}", i),
            company: format!("Employer {}", i),
            location: "Nowhere".to_string(),
            start_date: "2020".to_string(),
            end_date: None,
            description: vec!["Unrelated work".to_string()],
            technologies: Vec::new(),
        });
    }

    let tailored = engine_for(profile).tailor("quantum blockchain wizardry");
    assert_eq!(tailored.work_experience.len(), 3);
}

#[test]
fn duplicate_scrape_rounds_insert_nothing_new() {
    let store = JobStore::open_in_memory().unwrap();
    let engine = engine_for(base_profile());
    let parser = ListingParser::new();

    let mut rounds = Vec::new();
    for _ in 0..2 {
        let scraped = parser.parse(LISTING_HTML);
        let scraped_at = chrono::Utc::now();
        let jobs: Vec<NewJob> = scraped
            .iter()
            .map(|job| {
                let (fit_score, fit_category) = engine.score_job(&job.description_text());
                let mut new_job = NewJob::unscored(
                    job.company.clone(),
                    job.role.clone(),
                    job.location.clone(),
                    job.link.clone(),
                    job.date_posted.clone(),
                    job.original_category.clone(),
                    job.raw_snapshot(scraped_at).unwrap(),
                );
                new_job.fit_score = fit_score;
                new_job.fit_category = fit_category;
                new_job
            })
            .collect();
        rounds.push(store.insert_jobs(&jobs).unwrap());
    }

    assert_eq!(rounds, vec![1, 0]);
    assert_eq!(store.list_jobs(None, None).unwrap().len(), 1);
}

#[test]
fn profile_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProfileStore::new(dir.path());

    let mut profile = base_profile();
    profile.work_experience.push(WorkExperience {
        title: "Software Engineer".to_string(),
        company: "Tech Corp".to_string(),
        location: "Remote".to_string(),
        start_date: "2020-01".to_string(),
        end_date: Some("2023-06".to_string()),
        description: vec!["Developed Python applications".to_string()],
        technologies: vec!["Python".to_string(), "SQL".to_string()],
    });
    profile.projects.push(Project {
        name: "Web Scraper".to_string(),
        start_date: "2021".to_string(),
        end_date: None,
        description: vec!["Scraped data from websites".to_string()],
        technologies: vec!["Python".to_string()],
        link: Some("https://github.com/janedoe/scraper".to_string()),
    });

    store.save("jane", &profile).unwrap();
    assert_eq!(store.load("jane").unwrap(), profile);
}

#[test]
fn scrape_score_store_apply_flow() {
    let dir = tempfile::tempdir().unwrap();
    let store = JobStore::open_in_memory().unwrap();

    let mut profile = base_profile();
    profile.work_experience.push(WorkExperience {
        title: "Backend Engineer".to_string(),
        company: "Initech".to_string(),
        location: "Remote".to_string(),
        start_date: "2021".to_string(),
        end_date: None,
        description: vec!["Built Python services".to_string()],
        technologies: vec!["Python".to_string()],
    });
    let engine = engine_for(profile);

    // Scrape and score.
    let scraped = ListingParser::new().parse(LISTING_HTML);
    assert_eq!(scraped.len(), 1);
    let (fit_score, fit_category) = engine.score_job(&scraped[0].description_text());
    // "python" and "engineer" both hit the experience text; "python" hits the
    // skill list.
    assert!(fit_score >= 2.0);
    assert_ne!(fit_category, FitCategory::Unclassified);

    let mut new_job = NewJob::unscored(
        scraped[0].company.clone(),
        scraped[0].role.clone(),
        scraped[0].location.clone(),
        scraped[0].link.clone(),
        scraped[0].date_posted.clone(),
        scraped[0].original_category.clone(),
        scraped[0].raw_snapshot(chrono::Utc::now()).unwrap(),
    );
    new_job.fit_score = fit_score;
    new_job.fit_category = fit_category;
    assert_eq!(store.insert_jobs(&[new_job]).unwrap(), 1);

    // Select and apply.
    let job = store.get_job(1).unwrap().unwrap();
    assert_eq!(job.original_category, "Software Engineering");

    let workflow = ApplicationWorkflow::new(
        &store,
        &engine,
        dir.path().to_path_buf(),
        "jane".to_string(),
    );
    let (tailored, markdown) = workflow.preview(&job);
    assert_eq!(tailored.skills["Languages"][0], "Python");
    assert!(markdown.contains("# Jane Doe"));
    assert!(markdown.contains("### Backend Engineer at Initech"));

    let path = workflow.render_and_record(&job, &markdown).unwrap();
    assert!(path.exists());
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "jane_Initech_Python Engineer.pdf"
    );
    assert_eq!(store.get_job(1).unwrap().unwrap().status, "resume_tailored");
}

#[test]
fn rejecting_the_preview_marks_the_job() {
    let store = JobStore::open_in_memory().unwrap();
    let engine = engine_for(base_profile());

    store
        .insert_jobs(&[NewJob::unscored(
            "Initech".to_string(),
            "Python Engineer".to_string(),
            "Austin, TX".to_string(),
            "https://initech.example/apply".to_string(),
            "2d".to_string(),
            "Software Engineering".to_string(),
            "{}".to_string(),
        )])
        .unwrap();
    let job = store.get_job(1).unwrap().unwrap();

    let workflow = ApplicationWorkflow::new(
        &store,
        &engine,
        std::env::temp_dir(),
        "jane".to_string(),
    );
    workflow.reject(&job).unwrap();
    assert_eq!(
        store.get_job(1).unwrap().unwrap().status,
        "tailoring_rejected"
    );
}
