//! Application flow for one selected job: tailor, preview, render, record

use crate::db::{JobRecord, JobStore};
use crate::engine::{render_markdown, TailorEngine, TailoredResume};
use crate::error::Result;
use crate::output::PdfRenderer;
use log::info;
use std::path::PathBuf;

/// Orchestrates the per-job application steps around one shared job store.
/// The interactive approval gate stays with the caller; this type only
/// prepares previews and records decisions.
pub struct ApplicationWorkflow<'a> {
    store: &'a JobStore,
    engine: &'a TailorEngine,
    renderer: PdfRenderer,
    output_dir: PathBuf,
    profile_name: String,
}

impl<'a> ApplicationWorkflow<'a> {
    pub fn new(
        store: &'a JobStore,
        engine: &'a TailorEngine,
        output_dir: PathBuf,
        profile_name: String,
    ) -> Self {
        Self {
            store,
            engine,
            renderer: PdfRenderer::new(),
            output_dir,
            profile_name,
        }
    }

    /// Build the text the engine extracts keywords from: role and company,
    /// plus whatever descriptive fields the raw scrape snapshot carries.
    pub fn job_description_text(job: &JobRecord) -> String {
        let mut text = format!("{} {}", job.role, job.company);

        if let Ok(raw) = serde_json::from_str::<serde_json::Value>(&job.raw_data) {
            for key in [
                "Description",
                "description",
                "location",
                "requirements",
                "qualifications",
                "responsibilities",
            ] {
                if let Some(value) = raw.get(key).and_then(|v| v.as_str()) {
                    text.push(' ');
                    text.push_str(value);
                }
            }
        }

        text
    }

    /// Tailor the profile for this job and render the Markdown preview.
    pub fn preview(&self, job: &JobRecord) -> (TailoredResume, String) {
        let description = Self::job_description_text(job);
        let tailored = self.engine.tailor(&description);
        let markdown = render_markdown(&tailored);
        (tailored, markdown)
    }

    /// Record that the user rejected the tailored resume.
    pub fn reject(&self, job: &JobRecord) -> Result<()> {
        self.store.update_status(job.id, "tailoring_rejected")?;
        info!("Marked job {} as tailoring_rejected", job.id);
        Ok(())
    }

    /// Deterministic output path for this job's rendered resume.
    pub fn output_path(&self, job: &JobRecord) -> PathBuf {
        let filename = format!(
            "{}_{}_{}.pdf",
            self.profile_name,
            sanitize_component(&job.company),
            sanitize_component(&job.role)
        );
        self.output_dir.join(filename)
    }

    /// Render the approved resume and record the outcome on the job record:
    /// `resume_tailored` on success, `pdf_render_failed` on failure (the
    /// render error is still returned so the caller can show it).
    pub fn render_and_record(&self, job: &JobRecord, markdown: &str) -> Result<PathBuf> {
        let path = self.output_path(job);

        match self.renderer.render_markdown(markdown, &path) {
            Ok(()) => {
                self.store.update_status(job.id, "resume_tailored")?;
                Ok(path)
            }
            Err(e) => {
                self.store.update_status(job.id, "pdf_render_failed")?;
                Err(e)
            }
        }
    }
}

/// Sanitize a company or role name for use in a filename: keep alphanumerics,
/// spaces, and underscores, and trim trailing whitespace.
pub fn sanitize_component(component: &str) -> String {
    component
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewJob;
    use crate::engine::{FitThresholds, KeepPolicy};
    use crate::profile::{PersonalInfo, Profile};
    use std::collections::BTreeMap;
    use std::path::Path;

    fn engine() -> TailorEngine {
        let mut profile = Profile::with_personal_info(PersonalInfo {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            ..Default::default()
        });
        profile.skills = BTreeMap::from([(
            "Languages".to_string(),
            vec!["Python".to_string(), "Java".to_string()],
        )]);
        TailorEngine::new(profile, FitThresholds::default(), KeepPolicy::default())
    }

    fn stored_job(store: &JobStore, raw_data: &str) -> JobRecord {
        let mut job = NewJob::unscored(
            "Tech Corp".to_string(),
            "Python Engineer".to_string(),
            "Remote".to_string(),
            "https://example.com/job".to_string(),
            "2d".to_string(),
            "Software Engineering".to_string(),
            raw_data.to_string(),
        );
        job.status = "new".to_string();
        store.insert_jobs(&[job]).unwrap();
        store.get_job(1).unwrap().unwrap()
    }

    #[test]
    fn sanitize_keeps_alphanumerics_spaces_and_underscores() {
        assert_eq!(sanitize_component("Tech Corp, Inc."), "Tech Corp Inc");
        assert_eq!(sanitize_component("C++ Dev / SRE"), "C Dev  SRE");
        assert_eq!(sanitize_component("plain_name"), "plain_name");
        assert_eq!(sanitize_component("trailing!  "), "trailing");
    }

    #[test]
    fn description_text_includes_raw_data_fields() {
        let store = JobStore::open_in_memory().unwrap();
        let job = stored_job(
            &store,
            r#"{"description": "We need Python experience", "requirements": "SQL a plus"}"#,
        );

        let text = ApplicationWorkflow::job_description_text(&job);
        assert_eq!(
            text,
            "Python Engineer Tech Corp We need Python experience SQL a plus"
        );
    }

    #[test]
    fn description_text_survives_opaque_raw_data() {
        let store = JobStore::open_in_memory().unwrap();
        let job = stored_job(&store, "not json");

        let text = ApplicationWorkflow::job_description_text(&job);
        assert_eq!(text, "Python Engineer Tech Corp");
    }

    #[test]
    fn reject_updates_job_status() {
        let store = JobStore::open_in_memory().unwrap();
        let job = stored_job(&store, "{}");
        let engine = engine();
        let workflow = ApplicationWorkflow::new(
            &store,
            &engine,
            PathBuf::from("/tmp/out"),
            "alice".to_string(),
        );

        workflow.reject(&job).unwrap();
        let updated = store.get_job(job.id).unwrap().unwrap();
        assert_eq!(updated.status, "tailoring_rejected");
    }

    #[test]
    fn output_path_is_deterministic_and_sanitized() {
        let store = JobStore::open_in_memory().unwrap();
        let job = stored_job(&store, "{}");
        let engine = engine();
        let workflow = ApplicationWorkflow::new(
            &store,
            &engine,
            PathBuf::from("/tmp/out"),
            "alice".to_string(),
        );

        assert_eq!(
            workflow.output_path(&job),
            Path::new("/tmp/out/alice_Tech Corp_Python Engineer.pdf")
        );
    }

    #[test]
    fn render_success_marks_resume_tailored() {
        let dir = tempfile::tempdir().unwrap();
        let store = JobStore::open_in_memory().unwrap();
        let job = stored_job(&store, "{}");
        let engine = engine();
        let workflow = ApplicationWorkflow::new(
            &store,
            &engine,
            dir.path().to_path_buf(),
            "alice".to_string(),
        );

        let (_, markdown) = workflow.preview(&job);
        let path = workflow.render_and_record(&job, &markdown).unwrap();
        assert!(path.exists());

        let updated = store.get_job(job.id).unwrap().unwrap();
        assert_eq!(updated.status, "resume_tailored");
    }

    #[test]
    fn preview_puts_matching_skill_first() {
        let store = JobStore::open_in_memory().unwrap();
        let job = stored_job(&store, "{}");
        let engine = engine();
        let workflow = ApplicationWorkflow::new(
            &store,
            &engine,
            PathBuf::from("/tmp/out"),
            "alice".to_string(),
        );

        let (tailored, markdown) = workflow.preview(&job);
        assert_eq!(tailored.skills["Languages"][0], "Python");
        assert!(markdown.contains("**Languages:** Python, Java"));
    }
}
