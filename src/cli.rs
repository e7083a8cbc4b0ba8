//! CLI interface for job-tailor

use crate::engine::FitCategory;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "job-tailor")]
#[command(about = "Personal job-application assistant")]
#[command(
    long_about = "Scrape a job-listing feed, rank postings against your resume profile, and tailor and render a resume for the one you pick"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage resume profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Scrape the listing feed and score new jobs against a profile
    Scrape {
        /// Profile to score listings against
        #[arg(short, long)]
        profile: String,
    },

    /// Browse stored jobs
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },

    /// Tailor, preview, and render a resume for one stored job
    Apply {
        /// Job id (see `jobs list`)
        id: i64,

        /// Profile to tailor
        #[arg(short, long)]
        profile: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create a new profile with guided prompts
    Create {
        /// Profile name
        name: String,
    },

    /// Create a new profile from a JSON file
    Import {
        /// Profile name
        name: String,

        /// Path to a profile JSON document
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print a profile as JSON
    Show {
        /// Profile name
        name: String,
    },

    /// List available profiles
    List,

    /// Validate a profile and report every issue
    Validate {
        /// Profile name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum JobsAction {
    /// List stored jobs grouped by fit category
    List {
        /// Filter by status (e.g. new, applied, resume_tailored)
        #[arg(long)]
        status: Option<String>,

        /// Filter by fit category: high, medium, low, unclassified
        #[arg(long)]
        fit: Option<String>,
    },

    /// Show one job in full
    Show {
        /// Job id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse the `--fit` filter value.
pub fn parse_fit_filter(value: &str) -> Result<FitCategory, String> {
    match value.to_lowercase().as_str() {
        "high" => Ok(FitCategory::High),
        "medium" => Ok(FitCategory::Medium),
        "low" => Ok(FitCategory::Low),
        "unclassified" => Ok(FitCategory::Unclassified),
        _ => Err(format!(
            "Invalid fit category: {}. Supported: high, medium, low, unclassified",
            value
        )),
    }
}
