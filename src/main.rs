//! job-tailor: scrape job listings, rank them against a resume profile, and
//! tailor and render a resume for the job you pick

use clap::Parser;
use colored::Colorize;
use indicatif::ProgressBar;
use job_tailor::cli::{self, Cli, Commands, ConfigAction, JobsAction, ProfileAction};
use job_tailor::config::Config;
use job_tailor::db::{JobStore, NewJob};
use job_tailor::engine::{FitCategory, TailorEngine};
use job_tailor::error::{JobTailorError, Result};
use job_tailor::profile::{PersonalInfo, Profile, ProfileStore};
use job_tailor::scrape::ListingScraper;
use job_tailor::workflow::ApplicationWorkflow;
use log::{error, info};
use std::io::{self, Write};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Profile { action } => handle_profile(action, &config),

        Commands::Scrape { profile } => handle_scrape(&profile, &config).await,

        Commands::Jobs { action } => handle_jobs(action, &config),

        Commands::Apply { id, profile } => handle_apply(id, &profile, &config),

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Listing source: {}", config.source.listing_url());
                    println!("Job store: {}", config.storage.db_path.display());
                    println!("Profiles: {}", config.storage.profiles_dir.display());
                    println!("Output: {}", config.storage.output_dir.display());
                    println!("\nFit thresholds:");
                    println!("  High Fit: score >= {}", config.scoring.high_threshold);
                    println!("  Medium Fit: score >= {}", config.scoring.medium_threshold);
                    println!("\nTailoring keep-all maximums:");
                    println!("  Work experience: {}", config.tailoring.work_keep_all_max);
                    println!("  Projects: {}", config.tailoring.project_keep_all_max);
                }
                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    let default_config = Config::default();
                    default_config.save()?;
                    println!("✅ Configuration reset successfully!");
                }
            }
            Ok(())
        }
    }
}

fn handle_profile(action: ProfileAction, config: &Config) -> Result<()> {
    let store = ProfileStore::new(&config.storage.profiles_dir);

    match action {
        ProfileAction::Create { name } => {
            if store.exists(&name) {
                return Err(JobTailorError::Profile(format!(
                    "Profile '{}' already exists",
                    name
                )));
            }

            println!("Entering personal information for '{}':", name);
            let personal_info = PersonalInfo {
                name: prompt("Name: ")?,
                email: prompt("Email: ")?,
                phone: prompt("Phone: ")?,
                linkedin: prompt("LinkedIn Profile URL: ")?,
                github: prompt("GitHub Profile URL: ")?,
            };

            store.create(&name, &Profile::with_personal_info(personal_info))?;
            println!("✅ Profile '{}' saved successfully.", name);
            println!(
                "💡 Fill in education, experience, projects, and skills by editing {}",
                config
                    .storage
                    .profiles_dir
                    .join(format!("{}.json", name))
                    .display()
            );
        }

        ProfileAction::Import { name, file } => {
            let content = std::fs::read_to_string(&file)?;
            let profile: Profile = serde_json::from_str(&content).map_err(|e| {
                JobTailorError::Profile(format!("'{}' is not a valid profile: {}", file.display(), e))
            })?;
            store.create(&name, &profile)?;
            println!("✅ Profile '{}' imported from {}.", name, file.display());
        }

        ProfileAction::Show { name } => {
            let profile = store.load(&name)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }

        ProfileAction::List => {
            let names = store.list()?;
            if names.is_empty() {
                println!("No profiles found.");
            } else {
                println!("Available profiles:");
                for name in names {
                    println!("- {}", name);
                }
            }
        }

        ProfileAction::Validate { name } => {
            let profile = store.load(&name)?;
            let issues = profile.validate();
            if issues.is_empty() {
                println!("✅ Profile '{}' is valid.", name);
            } else {
                println!("⚠️  Profile '{}' has {} issue(s):", name, issues.len());
                for issue in issues {
                    println!("  - {}", issue);
                }
            }
        }
    }

    Ok(())
}

async fn handle_scrape(profile_name: &str, config: &Config) -> Result<()> {
    let profile_store = ProfileStore::new(&config.storage.profiles_dir);
    let engine = TailorEngine::from_store(&profile_store, profile_name, config)?;
    let store = JobStore::open(&config.storage.db_path)?;

    let scraper = ListingScraper::new(&config.source);
    println!("🔎 Scraping jobs from {}...", scraper.url());

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Fetching listings...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let scraped = scraper.scrape().await;
    spinner.finish_and_clear();

    if scraped.is_empty() {
        println!("No jobs scraped or an error occurred.");
        return Ok(());
    }
    println!("Found {} raw listings.", scraped.len());

    let scraped_at = chrono::Utc::now();
    let mut new_jobs = Vec::with_capacity(scraped.len());
    for job in &scraped {
        let (fit_score, fit_category) = engine.score_job(&job.description_text());
        new_jobs.push(NewJob {
            company: job.company.clone(),
            role: job.role.clone(),
            location: job.location.clone(),
            link: job.link.clone(),
            date_posted: job.date_posted.clone(),
            original_category: job.original_category.clone(),
            fit_score,
            fit_category,
            status: "new".to_string(),
            raw_data: job.raw_snapshot(scraped_at)?,
        });
    }

    let inserted = store.insert_jobs(&new_jobs)?;
    info!(
        "Inserted {} of {} scraped jobs",
        inserted,
        new_jobs.len()
    );
    println!(
        "✅ Inserted {} new unique jobs ({} already known).",
        inserted,
        new_jobs.len() - inserted
    );

    Ok(())
}

fn handle_jobs(action: JobsAction, config: &Config) -> Result<()> {
    let store = JobStore::open(&config.storage.db_path)?;

    match action {
        JobsAction::List { status, fit } => {
            let fit_filter = match fit.as_deref() {
                Some(value) => Some(cli::parse_fit_filter(value).map_err(JobTailorError::InvalidInput)?),
                None => None,
            };

            if status.is_some() || fit_filter.is_some() {
                let jobs = store.list_jobs(status.as_deref(), fit_filter)?;
                if jobs.is_empty() {
                    println!("No jobs match the given filters.");
                    return Ok(());
                }
                for job in jobs {
                    print_job_line(job.id, &job.role, &job.company, &job.location, job.fit_score, &job.status);
                }
                return Ok(());
            }

            let ranked = store.list_ranked()?;
            if ranked.is_empty() {
                println!("No jobs found in the database. Run `job-tailor scrape` first.");
                return Ok(());
            }

            println!("--- Available Job Listings ---");
            for category in [
                FitCategory::High,
                FitCategory::Medium,
                FitCategory::Low,
                FitCategory::Unclassified,
            ] {
                let group: Vec<_> = ranked
                    .iter()
                    .filter(|job| job.fit_category == category)
                    .collect();
                if group.is_empty() {
                    continue;
                }

                let heading = format!("### {} Jobs ###", category);
                match category {
                    FitCategory::High => println!("\n{}", heading.green().bold()),
                    FitCategory::Medium => println!("\n{}", heading.yellow().bold()),
                    FitCategory::Low => println!("\n{}", heading.red().bold()),
                    FitCategory::Unclassified => println!("\n{}", heading.bold()),
                }
                for job in group {
                    print_job_line(job.id, &job.role, &job.company, &job.location, job.fit_score, &job.status);
                }
            }
        }

        JobsAction::Show { id } => {
            let job = store.get_job(id)?.ok_or(JobTailorError::JobNotFound(id))?;
            println!("[{}] {} at {}", job.id, job.role.bold(), job.company);
            println!("Location: {}", job.location);
            println!("Link: {}", job.link);
            println!("Posted: {}", job.date_posted);
            println!("Category: {}", job.original_category);
            println!("Fit: {} (score {:.2})", job.fit_category, job.fit_score);
            println!("Status: {}", job.status);
            if let Ok(raw) = serde_json::from_str::<serde_json::Value>(&job.raw_data) {
                println!("Raw data: {}", serde_json::to_string_pretty(&raw)?);
            }
        }
    }

    Ok(())
}

fn print_job_line(id: i64, role: &str, company: &str, location: &str, fit_score: f64, status: &str) {
    let location_line = location.lines().next().unwrap_or("");
    println!(
        "  [{}] {} at {} ({}) - Fit Score: {:.2} [{}]",
        id, role, company, location_line, fit_score, status
    );
}

fn handle_apply(id: i64, profile_name: &str, config: &Config) -> Result<()> {
    let profile_store = ProfileStore::new(&config.storage.profiles_dir);
    let engine = TailorEngine::from_store(&profile_store, profile_name, config)?;
    let store = JobStore::open(&config.storage.db_path)?;

    let job = store.get_job(id)?.ok_or(JobTailorError::JobNotFound(id))?;
    println!(
        "--- Initiating application for: {} at {} ---",
        job.role.bold(),
        job.company.bold()
    );
    println!("Job link: {}", job.link);

    let workflow = ApplicationWorkflow::new(
        &store,
        &engine,
        config.storage.output_dir.clone(),
        profile_name.to_string(),
    );

    let (_tailored, markdown) = workflow.preview(&job);
    println!("\n--- Tailored Resume Preview ---\n");
    println!("{}", markdown);
    println!("-------------------------------");

    let approval = prompt("Do you approve this tailored resume and wish to proceed? (yes/no): ")?;
    if approval.to_lowercase() != "yes" {
        workflow.reject(&job)?;
        println!("Application cancelled.");
        return Ok(());
    }

    config.ensure_output_dir()?;
    match workflow.render_and_record(&job, &markdown) {
        Ok(path) => {
            println!("✅ Resume rendered to {}", path.display());
        }
        Err(e) => {
            println!("{} {}", "❌ Failed to render resume:".red(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
