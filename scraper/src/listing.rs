//! Listing page: URL construction, fetch and posting-identifier extraction.

use common::SearchQuery;
use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::warn;

use crate::error::{Result, ScrapeError};
use crate::http::get_text;

const ENTRY_SELECTOR: &str = "li";
const CARD_SELECTOR: &str = "div.base-card";
const URN_ATTRIBUTE: &str = "data-entity-urn";

/// What to do with a listing entry whose identifier cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedEntry {
    /// Log a warning and keep going with the remaining entries.
    #[default]
    Skip,
    /// Fail the whole extraction.
    Abort,
}

/// `{base}?keywords=..&location=..&start=..` with percent-encoded values.
pub fn listing_url(base: &str, query: &SearchQuery) -> Result<Url> {
    let start = query.start.to_string();
    Url::parse_with_params(
        base,
        &[
            ("keywords", query.keywords.as_str()),
            ("location", query.location.as_str()),
            ("start", start.as_str()),
        ],
    )
    .map_err(|e| ScrapeError::Url {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

pub fn fetch_listing(client: &Client, base: &str, query: &SearchQuery) -> Result<String> {
    let url = listing_url(base, query)?;
    get_text(client, url.as_str())
}

/// Takes the identifier out of `urn:li:jobPosting:<id>` (the fourth segment).
pub fn parse_job_id(urn: &str) -> Result<String> {
    match urn.split(':').nth(3) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ScrapeError::MalformedUrn(urn.to_string())),
    }
}

/// Identifiers of every list item, in document order. Duplicates are kept.
pub fn extract_job_ids(html: &str, policy: MalformedEntry) -> Result<Vec<String>> {
    let entry_selector = selector(ENTRY_SELECTOR)?;
    let card_selector = selector(CARD_SELECTOR)?;
    let document = Html::parse_document(html);

    let mut job_ids = Vec::new();
    for (position, entry) in document.select(&entry_selector).enumerate() {
        let parsed = entry
            .select(&card_selector)
            .next()
            .ok_or_else(|| {
                ScrapeError::MissingElement(format!("{CARD_SELECTOR} in list item {position}"))
            })
            .and_then(|card| {
                card.value().attr(URN_ATTRIBUTE).ok_or_else(|| {
                    ScrapeError::MissingElement(format!("{URN_ATTRIBUTE} on list item {position}"))
                })
            })
            .and_then(parse_job_id);

        match (parsed, policy) {
            (Ok(job_id), _) => job_ids.push(job_id),
            (Err(e), MalformedEntry::Abort) => return Err(e),
            (Err(e), MalformedEntry::Skip) => warn!("⚠️  Skipping listing entry: {}", e),
        }
    }

    Ok(job_ids)
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}
