//! Listing ingestion: fetch the remote job board and parse it into records

pub mod parser;

pub use parser::{ListingParser, ScrapedJob};

use crate::config::SourceConfig;
use crate::error::Result;
use log::{error, info};

/// Fetches the configured listing feed and parses it into scraped jobs.
pub struct ListingScraper {
    url: String,
    client: reqwest::Client,
}

impl ListingScraper {
    pub fn new(source: &SourceConfig) -> Self {
        Self {
            url: source.listing_url(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One best-effort GET of the listing document.
    pub async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetch and parse the feed. Network and parse failures are reported and
    /// yield an empty list; they are never fatal to the caller.
    pub async fn scrape(&self) -> Vec<ScrapedJob> {
        match self.fetch().await {
            Ok(html) => {
                let jobs = ListingParser::new().parse(&html);
                info!("Parsed {} job listings from {}", jobs.len(), self.url);
                jobs
            }
            Err(e) => {
                error!("Failed to fetch listings from {}: {}", self.url, e);
                Vec::new()
            }
        }
    }
}
