//! Output sinks for a finished [`JobTable`].

use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use common::{JobRecord, JobTable, COLUMNS};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Keep what is already in the file and add the new records after it.
    #[default]
    Append,
    /// Replace the file contents.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows_written: usize,
    pub header_written: bool,
}

pub trait RecordSink {
    fn write_table(&mut self, table: &JobTable) -> Result<ExportSummary>;
}

/// Delimited text output. The header row is emitted only when the file is
/// created, empty, or overwritten, so repeated appends never duplicate it.
pub struct CsvSink {
    path: PathBuf,
    mode: WriteMode,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }
}

impl RecordSink for CsvSink {
    fn write_table(&mut self, table: &JobTable) -> Result<ExportSummary> {
        ensure_parent_dir(&self.path)?;

        let (file, header_written) = match self.mode {
            WriteMode::Overwrite => (File::create(&self.path)?, true),
            WriteMode::Append => {
                let is_empty = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
                let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
                (file, is_empty)
            }
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));

        if header_written {
            writer.write_record(COLUMNS)?;
        }
        for record in table {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        Ok(ExportSummary {
            path: self.path.clone(),
            rows_written: table.len(),
            header_written,
        })
    }
}

/// Pretty-printed JSON array of records. Appending merges with the array
/// already stored at `path`.
pub struct JsonSink {
    path: PathBuf,
    mode: WriteMode,
}

#[derive(Serialize, serde::Deserialize)]
struct JsonRow {
    #[serde(flatten)]
    record: JobRecord,
    #[serde(default)]
    applicants_min: Option<u32>,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>, mode: WriteMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }
}

impl RecordSink for JsonSink {
    fn write_table(&mut self, table: &JobTable) -> Result<ExportSummary> {
        ensure_parent_dir(&self.path)?;

        let mut rows: Vec<JsonRow> = match self.mode {
            WriteMode::Append if self.path.exists() => {
                let content = fs::read_to_string(&self.path)?;
                if content.trim().is_empty() {
                    Vec::new()
                } else {
                    serde_json::from_str(&content)?
                }
            }
            _ => Vec::new(),
        };

        rows.extend(table.iter().map(|record| JsonRow {
            record: record.clone(),
            applicants_min: record.applicants(),
        }));

        let json_output = serde_json::to_string_pretty(&rows)?;
        fs::write(&self.path, json_output)?;

        Ok(ExportSummary {
            path: self.path.clone(),
            rows_written: table.len(),
            header_written: false,
        })
    }
}

/// Picks the sink from the file extension: `.json` gets JSON, anything else CSV.
pub fn sink_for(path: &Path, mode: WriteMode) -> Box<dyn RecordSink> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonSink::new(path, mode))
    } else {
        Box::new(CsvSink::new(path, mode))
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
