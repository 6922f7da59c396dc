//! Shared data model for the job-posting scraper.
//!
//! A run starts from a [`SearchQuery`], yields one [`JobRecord`] per posting
//! identifier and ends as a [`JobTable`] handed to an export sink.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Export column order. Every record serializes to exactly these keys.
pub const COLUMNS: [&str; 5] = [
    "Job_ID",
    "job_title",
    "company_name",
    "time_posted",
    "number_applicants",
];

/// Search parameters used to build the listing URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: String,
    pub start: u32,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>, start: u32) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            start,
        }
    }
}

/// Outcome of one markup lookup.
///
/// Serializes as the text itself, or as null (an empty CSV cell) when the
/// locator matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Field {
    Present(String),
    #[default]
    Absent,
}

impl Field {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Field::Present(text) => Some(text.as_str()),
            Field::Absent => None,
        }
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Absent, Field::Present)
    }
}

impl From<Field> for Option<String> {
    fn from(field: Field) -> Self {
        match field {
            Field::Present(text) => Some(text),
            Field::Absent => None,
        }
    }
}

/// One scraped posting. Absent lookups keep their key with a null value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobRecord {
    #[serde(rename = "Job_ID")]
    pub job_id: String,
    pub job_title: Field,
    pub company_name: Field,
    pub time_posted: Field,
    pub number_applicants: Field,
}

impl JobRecord {
    /// Column names of the fields whose locator found nothing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (COLUMNS[1], &self.job_title),
            (COLUMNS[2], &self.company_name),
            (COLUMNS[3], &self.time_posted),
            (COLUMNS[4], &self.number_applicants),
        ]
        .into_iter()
        .filter(|(_, field)| !field.is_present())
        .map(|(name, _)| name)
        .collect()
    }

    /// Cells in [`COLUMNS`] order, absent fields as empty strings.
    pub fn to_row(&self) -> [&str; 5] {
        [
            self.job_id.as_str(),
            self.job_title.as_deref().unwrap_or(""),
            self.company_name.as_deref().unwrap_or(""),
            self.time_posted.as_deref().unwrap_or(""),
            self.number_applicants.as_deref().unwrap_or(""),
        ]
    }

    pub fn applicants(&self) -> Option<u32> {
        self.number_applicants.as_deref().and_then(applicant_count)
    }
}

/// Records in the order their identifiers were discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobTable {
    records: Vec<JobRecord>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: JobRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Sum of every parseable applicant count. Widened to `u64`: each count
    /// comes from page text and may be close to `u32::MAX`.
    pub fn total_applicants(&self) -> u64 {
        self.records
            .iter()
            .filter_map(JobRecord::applicants)
            .map(u64::from)
            .sum()
    }
}

impl FromIterator<JobRecord> for JobTable {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a JobTable {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Extracts the applicant count from a caption like "Over 200 applicants".
/// Returns the first number found, ignoring thousands separators.
pub fn applicant_count(caption: &str) -> Option<u32> {
    let re = Regex::new(r"(\d{1,3}(?:,\d{3})+|\d+)").ok()?;

    let matched = re.captures(caption)?.get(1)?;
    let clean_number: String = matched
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    clean_number.parse::<u32>().ok()
}
