//! Job Posting Scraper
//!
//! Fetches one page of guest job-search results, scrapes every posting's
//! detail page and appends the records to a CSV (or JSON) file.

mod config;
mod detail;
mod error;
mod export;
mod http;
mod listing;
mod pipeline;
#[cfg(test)]
mod test_server;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ScrapeConfig;
use crate::export::sink_for;
use crate::pipeline::JobPostingScraper;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🔍 Starting Job Posting Scraper...");

    let config = ScrapeConfig::from_env().context("Failed to read configuration")?;
    let mut sink = sink_for(&config.output, config.write_mode);
    let scraper = JobPostingScraper::new(config).context("Failed to build HTTP client")?;

    let report = scraper.run(sink.as_mut()).context("Scrape run failed")?;

    for (job_id, reason) in &report.skipped {
        warn!("⚠️  Posting {} not collected: {}", job_id, reason);
    }

    let incomplete = report
        .table
        .iter()
        .filter(|record| !record.missing_fields().is_empty())
        .count();
    let applicants = report.table.total_applicants();

    info!(
        "📊 {} of {} postings collected, {} skipped, {} with missing fields, {} applicants",
        report.table.len(),
        report.ids_found,
        report.skipped.len(),
        incomplete,
        applicants
    );
    info!("✨ Scraping complete! Output: {:?}", report.export.path);

    Ok(())
}
