//! Listing → identifiers → detail pages → export, strictly in sequence.

use common::{JobRecord, JobTable};
use reqwest::blocking::Client;
use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::detail::fetch_detail;
use crate::error::Result;
use crate::export::{ExportSummary, RecordSink};
use crate::http::build_client;
use crate::listing::{extract_job_ids, fetch_listing};

#[derive(Debug)]
pub struct RunReport {
    pub ids_found: usize,
    pub table: JobTable,
    /// Identifiers whose detail page could not be fetched, with the reason.
    pub skipped: Vec<(String, String)>,
    pub export: ExportSummary,
}

/// Holds the HTTP client and configuration; keeps no state between calls.
pub struct JobPostingScraper {
    client: Client,
    config: ScrapeConfig,
}

impl JobPostingScraper {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn fetch_listing(&self) -> Result<String> {
        fetch_listing(&self.client, &self.config.listing_base, &self.config.query)
    }

    pub fn job_ids(&self) -> Result<Vec<String>> {
        let html = self.fetch_listing()?;
        extract_job_ids(&html, self.config.on_malformed)
    }

    pub fn scrape_detail(&self, job_id: &str) -> Result<JobRecord> {
        fetch_detail(&self.client, &self.config.detail_base, job_id)
    }

    /// One detail request per identifier, in order. A failed request drops
    /// that identifier only.
    pub fn scrape_all(&self, job_ids: &[String]) -> (JobTable, Vec<(String, String)>) {
        let mut table = JobTable::new();
        let mut skipped = Vec::new();

        for (i, job_id) in job_ids.iter().enumerate() {
            match self.scrape_detail(job_id) {
                Ok(record) => {
                    info!(
                        "📋 [{}/{}] {} at {}",
                        i + 1,
                        job_ids.len(),
                        record.job_title.as_deref().unwrap_or("?"),
                        record.company_name.as_deref().unwrap_or("?")
                    );
                    table.push(record);
                }
                Err(e) => {
                    warn!("❌ Skipping posting {}: {}", job_id, e);
                    skipped.push((job_id.clone(), e.to_string()));
                }
            }
        }

        (table, skipped)
    }

    /// Full run. Only a listing failure or an export failure is fatal.
    pub fn run(&self, sink: &mut dyn RecordSink) -> Result<RunReport> {
        info!(
            "🔍 Searching \"{}\" in \"{}\" from offset {}",
            self.config.query.keywords, self.config.query.location, self.config.query.start
        );

        let job_ids = self.job_ids()?;
        info!("📊 Found {} postings on the listing page", job_ids.len());

        let (table, skipped) = self.scrape_all(&job_ids);
        let export = sink.write_table(&table)?;
        info!(
            "💾 Saved {} jobs to {:?}{}",
            export.rows_written,
            export.path,
            if export.header_written { " (new header)" } else { "" }
        );

        Ok(RunReport {
            ids_found: job_ids.len(),
            table,
            skipped,
            export,
        })
    }
}
