use std::path::PathBuf;
use std::time::Duration;

use common::SearchQuery;

use crate::error::{Result, ScrapeError};
use crate::export::WriteMode;
use crate::listing::MalformedEntry;

pub const LISTING_BASE: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";
pub const DETAIL_BASE: &str = "https://www.linkedin.com/jobs-guest/jobs/api/jobPosting";

const DEFAULT_KEYWORDS: &str = "Python Developer";
const DEFAULT_LOCATION: &str = "Vancouver, British Columbia, Canada";
const DEFAULT_OUTPUT: &str = "data/Scraped_LinkedIn_Jobposts.csv";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub query: SearchQuery,
    pub listing_base: String,
    pub detail_base: String,
    pub output: PathBuf,
    pub write_mode: WriteMode,
    pub on_malformed: MalformedEntry,
    pub timeout: Duration,
    pub user_agent: String,
    pub system_proxy: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self::new(SearchQuery::new(DEFAULT_KEYWORDS, DEFAULT_LOCATION, 0))
    }
}

impl ScrapeConfig {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            listing_base: LISTING_BASE.to_string(),
            detail_base: DETAIL_BASE.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            write_mode: WriteMode::Append,
            on_malformed: MalformedEntry::Skip,
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            system_proxy: true,
        }
    }

    /// Defaults overridden by `SCRAPER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let keywords = lookup("SCRAPER_KEYWORDS").unwrap_or_else(|| DEFAULT_KEYWORDS.to_string());
        let location = lookup("SCRAPER_LOCATION").unwrap_or_else(|| DEFAULT_LOCATION.to_string());
        let start: u32 = match lookup("SCRAPER_START") {
            Some(start) => start.trim().parse().map_err(|_| {
                ScrapeError::Config(format!(
                    "SCRAPER_START must be a non-negative integer, got {start:?}"
                ))
            })?,
            None => 0,
        };

        let mut config = Self::new(SearchQuery::new(keywords, location, start));

        let listing_base =
            lookup("SCRAPER_LISTING_BASE").unwrap_or_else(|| LISTING_BASE.to_string());
        let detail_base = lookup("SCRAPER_DETAIL_BASE").unwrap_or_else(|| DETAIL_BASE.to_string());
        config = config.with_endpoints(listing_base, detail_base);

        if let Some(output) = lookup("SCRAPER_OUTPUT") {
            config.output = PathBuf::from(output);
        }
        if let Some(mode) = lookup("SCRAPER_WRITE_MODE") {
            config.write_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "append" => WriteMode::Append,
                "overwrite" => WriteMode::Overwrite,
                other => {
                    return Err(ScrapeError::Config(format!(
                        "SCRAPER_WRITE_MODE must be append or overwrite, got {other:?}"
                    )))
                }
            };
        }
        if let Some(policy) = lookup("SCRAPER_ON_MALFORMED") {
            config.on_malformed = match policy.trim().to_ascii_lowercase().as_str() {
                "skip" => MalformedEntry::Skip,
                "abort" => MalformedEntry::Abort,
                other => {
                    return Err(ScrapeError::Config(format!(
                        "SCRAPER_ON_MALFORMED must be skip or abort, got {other:?}"
                    )))
                }
            };
        }
        if let Some(secs) = lookup("SCRAPER_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ScrapeError::Config(format!(
                    "SCRAPER_TIMEOUT_SECS must be an integer, got {secs:?}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("SCRAPER_SYSTEM_PROXY") {
            let enabled = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ScrapeError::Config(format!(
                        "SCRAPER_SYSTEM_PROXY must be true or false, got {other:?}"
                    )))
                }
            };
            config = config.with_system_proxy(enabled);
        }

        Ok(config)
    }

    pub fn with_endpoints(
        mut self,
        listing_base: impl Into<String>,
        detail_base: impl Into<String>,
    ) -> Self {
        self.listing_base = listing_base.into();
        self.detail_base = detail_base.into();
        self
    }

    pub fn with_system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = enabled;
        self
    }
}
