//! HTML table parsing for the job listing feed

use crate::error::Result;
use chrono::{DateTime, Utc};
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::BTreeMap;

/// One job row scraped from a listing table.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedJob {
    pub company: String,
    pub role: String,
    pub location: String,
    pub link: String,
    pub date_posted: String,
    pub original_category: String,
    /// Columns the header map did not recognize, keyed by lower-snake name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ScrapedJob {
    /// The text used to extract keywords when scoring this listing.
    pub fn description_text(&self) -> String {
        format!("{} {}", self.role, self.company)
    }

    /// JSON snapshot of every scraped field, stamped with the scrape time.
    pub fn raw_snapshot(&self, scraped_at: DateTime<Utc>) -> Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let serde_json::Value::Object(map) = &mut value {
            map.insert(
                "scraped_at".to_string(),
                serde_json::Value::String(scraped_at.to_rfc3339()),
            );
        }
        Ok(serde_json::to_string(&value)?)
    }
}

enum ColumnKey {
    Company,
    Role,
    Location,
    Link,
    DatePosted,
    Other(String),
}

fn map_header(header: &str) -> ColumnKey {
    match header {
        "Company" => ColumnKey::Company,
        "Role" => ColumnKey::Role,
        "Location" => ColumnKey::Location,
        "Application" => ColumnKey::Link,
        "Age" => ColumnKey::DatePosted,
        other => ColumnKey::Other(other.to_lowercase().replace(' ', "_")),
    }
}

/// Parses listing tables out of the fetched HTML document.
pub struct ListingParser {
    table: Selector,
    header_cell: Selector,
    body_row: Selector,
    cell: Selector,
    anchor: Selector,
    details: Selector,
    pictographs: Regex,
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingParser {
    pub fn new() -> Self {
        Self {
            table: Selector::parse("table").expect("Invalid table selector"),
            header_cell: Selector::parse("thead th").expect("Invalid header selector"),
            body_row: Selector::parse("tbody tr").expect("Invalid row selector"),
            cell: Selector::parse("td").expect("Invalid cell selector"),
            anchor: Selector::parse("a").expect("Invalid anchor selector"),
            details: Selector::parse("details").expect("Invalid details selector"),
            pictographs: Regex::new(
                "[\u{1F600}-\u{1F64F}\u{1F300}-\u{1F5FF}\u{1F680}-\u{1F6FF}\u{1F1E0}-\u{1F1FF}\u{2702}-\u{27B0}]",
            )
            .expect("Invalid pictograph regex"),
        }
    }

    /// Parse every table in the document into scraped jobs. Rows whose cell
    /// count does not match the header count are skipped individually.
    pub fn parse(&self, html: &str) -> Vec<ScrapedJob> {
        let document = Html::parse_document(html);
        let mut jobs = Vec::new();

        for table in document.select(&self.table) {
            let category = self.preceding_category(&table);

            let headers: Vec<ColumnKey> = table
                .select(&self.header_cell)
                .map(|th| map_header(visible_text(&th).as_str()))
                .collect();
            if headers.is_empty() {
                debug!("Skipping table without a header row");
                continue;
            }

            for row in table.select(&self.body_row) {
                let cells: Vec<ElementRef> = row.select(&self.cell).collect();
                if cells.len() != headers.len() {
                    debug!(
                        "Skipping row with {} cells against {} headers",
                        cells.len(),
                        headers.len()
                    );
                    continue;
                }

                let mut job = ScrapedJob {
                    company: String::new(),
                    role: String::new(),
                    location: String::new(),
                    link: String::new(),
                    date_posted: String::new(),
                    original_category: category.clone(),
                    extra: BTreeMap::new(),
                };

                for (key, cell) in headers.iter().zip(&cells) {
                    match key {
                        ColumnKey::Company => job.company = self.company_text(cell),
                        ColumnKey::Role => job.role = visible_text(cell),
                        ColumnKey::Location => job.location = self.location_text(cell),
                        ColumnKey::Link => job.link = self.link_target(cell),
                        ColumnKey::DatePosted => job.date_posted = visible_text(cell),
                        ColumnKey::Other(name) => {
                            job.extra.insert(name.clone(), visible_text(cell));
                        }
                    }
                }

                jobs.push(job);
            }
        }

        jobs
    }

    /// Category of a table: the nearest preceding `<h3>` sibling.
    fn preceding_category(&self, table: &ElementRef) -> String {
        table
            .prev_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "h3")
            .map(|el| visible_text(&el))
            .unwrap_or_else(|| "Uncategorized".to_string())
    }

    /// Company names come through with decorative pictographs attached.
    fn company_text(&self, cell: &ElementRef) -> String {
        self.pictographs
            .replace_all(&visible_text(cell), "")
            .trim()
            .to_string()
    }

    /// Link cells resolve to the first anchor's target, else the visible text.
    fn link_target(&self, cell: &ElementRef) -> String {
        cell.select(&self.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string)
            .unwrap_or_else(|| visible_text(cell))
    }

    /// Location cells are either plain text (with `<br>` as line breaks) or a
    /// `<details>` widget whose body lists every location.
    fn location_text(&self, cell: &ElementRef) -> String {
        if let Some(details) = cell.select(&self.details).next() {
            self.expanded_location(&details)
        } else {
            text_with_breaks(cell)
        }
    }

    /// Full multi-line text of a `<details>` widget, summary excluded.
    fn expanded_location(&self, details: &ElementRef) -> String {
        let mut out = String::new();
        for child in details.children() {
            if let Some(el) = ElementRef::wrap(child) {
                match el.value().name() {
                    "summary" => continue,
                    "br" => out.push('\n'),
                    _ => {
                        out.push_str(&raw_text_with_breaks(&el));
                        out.push('\n');
                    }
                }
            } else if let Some(text) = child.value().as_text() {
                out.push_str(text);
            }
        }
        tidy_lines(&out)
    }
}

fn visible_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn raw_text_with_breaks(el: &ElementRef) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
        } else if let Some(element) = node.value().as_element() {
            if element.name() == "br" {
                out.push('\n');
            }
        }
    }
    out
}

fn text_with_breaks(el: &ElementRef) -> String {
    tidy_lines(&raw_text_with_breaks(el))
}

fn tidy_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
