//! Local job store backed by SQLite
//!
//! One connection is opened per session and passed by reference to whatever
//! needs it. Each insert and update commits on its own; there are no
//! multi-row transactions and no deletes.

use crate::engine::FitCategory;
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// A job ready for insertion, before it has a surrogate key.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub company: String,
    pub role: String,
    pub location: String,
    pub link: String,
    pub date_posted: String,
    pub original_category: String,
    pub fit_score: f64,
    pub fit_category: FitCategory,
    pub status: String,
    /// JSON snapshot of the scraped fields, kept for debugging and tailoring.
    pub raw_data: String,
}

impl NewJob {
    /// A job that has not been scored yet.
    pub fn unscored(
        company: String,
        role: String,
        location: String,
        link: String,
        date_posted: String,
        original_category: String,
        raw_data: String,
    ) -> Self {
        Self {
            company,
            role,
            location,
            link,
            date_posted,
            original_category,
            fit_score: -1.0,
            fit_category: FitCategory::Unclassified,
            status: "new".to_string(),
            raw_data,
        }
    }
}

/// A full stored job record.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub location: String,
    pub link: String,
    pub date_posted: String,
    pub original_category: String,
    pub fit_score: f64,
    pub fit_category: FitCategory,
    pub status: String,
    pub raw_data: String,
}

/// The subset of columns used for listing and selection.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub location: String,
    pub link: String,
    pub fit_score: f64,
    pub fit_category: FitCategory,
    pub status: String,
}

pub struct JobStore {
    conn: Connection,
}

impl JobStore {
    /// Open (creating if necessary) the store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                company TEXT NOT NULL,
                role TEXT NOT NULL,
                location TEXT,
                link TEXT,
                date_posted TEXT,
                original_category TEXT,
                fit_score REAL,
                fit_category TEXT,
                status TEXT DEFAULT 'new',
                raw_data TEXT
            )",
            (),
        )?;
        Ok(())
    }

    /// Insert a batch of jobs, skipping any whose (link, role) pair is
    /// already stored. The check is application-level rather than a storage
    /// constraint. Returns the number of genuinely new records.
    pub fn insert_jobs(&self, jobs: &[NewJob]) -> Result<usize> {
        let mut inserted = 0;

        for job in jobs {
            let existing: Option<i64> = self
                .conn
                .query_row(
                    "SELECT id FROM jobs WHERE link = ?1 AND role = ?2",
                    params![job.link, job.role],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                continue;
            }

            self.conn.execute(
                "INSERT INTO jobs (company, role, location, link, date_posted,
                     original_category, fit_score, fit_category, status, raw_data)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    job.company,
                    job.role,
                    job.location,
                    job.link,
                    job.date_posted,
                    job.original_category,
                    job.fit_score,
                    job.fit_category.as_str(),
                    job.status,
                    job.raw_data,
                ],
            )?;
            inserted += 1;
        }

        Ok(inserted)
    }

    fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<JobSummary> {
        Ok(JobSummary {
            id: row.get(0)?,
            company: row.get(1)?,
            role: row.get(2)?,
            location: row.get(3)?,
            link: row.get(4)?,
            fit_score: row.get(5)?,
            fit_category: FitCategory::from_label(&row.get::<_, String>(6)?),
            status: row.get(7)?,
        })
    }

    /// List jobs, optionally filtered by status and/or fit category.
    pub fn list_jobs(
        &self,
        status: Option<&str>,
        fit_category: Option<FitCategory>,
    ) -> Result<Vec<JobSummary>> {
        let mut sql = String::from(
            "SELECT id, company, role, location, link, fit_score, fit_category, status
             FROM jobs WHERE 1=1",
        );
        let mut args: Vec<String> = Vec::new();

        if let Some(status) = status {
            sql.push_str(&format!(" AND status = ?{}", args.len() + 1));
            args.push(status.to_string());
        }
        if let Some(category) = fit_category {
            sql.push_str(&format!(" AND fit_category = ?{}", args.len() + 1));
            args.push(category.as_str().to_string());
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(args.iter()), Self::summary_from_row)?;

        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row?);
        }
        Ok(jobs)
    }

    /// All jobs ordered by fit score descending, then id, for the selection
    /// display.
    pub fn list_ranked(&self) -> Result<Vec<JobSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, company, role, location, link, fit_score, fit_category, status
             FROM jobs ORDER BY fit_score DESC, id ASC",
        )?;
        let rows = stmt.query_map((), Self::summary_from_row)?;

        let mut jobs = Vec::new();
        for row in rows {
            jobs.push(row?);
        }
        Ok(jobs)
    }

    /// Fetch one job by surrogate key.
    pub fn get_job(&self, id: i64) -> Result<Option<JobRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, company, role, location, link, date_posted,
                        original_category, fit_score, fit_category, status, raw_data
                 FROM jobs WHERE id = ?1",
                params![id],
                |row| {
                    Ok(JobRecord {
                        id: row.get(0)?,
                        company: row.get(1)?,
                        role: row.get(2)?,
                        location: row.get(3)?,
                        link: row.get(4)?,
                        date_posted: row.get(5)?,
                        original_category: row.get(6)?,
                        fit_score: row.get(7)?,
                        fit_category: FitCategory::from_label(&row.get::<_, String>(8)?),
                        status: row.get(9)?,
                        raw_data: row.get(10)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    pub fn update_status(&self, id: i64, status: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE jobs SET status = ?1 WHERE id = ?2",
            params![status, id],
        )?;
        Ok(())
    }

    pub fn update_fit(&self, id: i64, fit_score: f64, fit_category: FitCategory) -> Result<()> {
        self.conn.execute(
            "UPDATE jobs SET fit_score = ?1, fit_category = ?2 WHERE id = ?3",
            params![fit_score, fit_category.as_str(), id],
        )?;
        Ok(())
    }
}
