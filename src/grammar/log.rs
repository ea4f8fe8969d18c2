//! Monthly CSV log of grammar checks
//!
//! One file per month, `grammar_checks_<YYYY-MM>.csv`, with a
//! `Timestamp,Original Text,Corrected Text` header.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use super::is_failure_marker;

const FILE_PREFIX: &str = "grammar_checks_";
const HEADER: [&str; 3] = ["Timestamp", "Original Text", "Corrected Text"];

/// Timestamp format of log rows
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Month format of log file names
pub const MONTH_FORMAT: &str = "%Y-%m";

/// One logged grammar check
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogEntry {
    pub timestamp: String,
    pub original: String,
    pub corrected: String,
}

impl LogEntry {
    /// The check failed and `corrected` holds a failure marker
    pub fn is_failure(&self) -> bool {
        is_failure_marker(&self.corrected)
    }
}

/// The `_logs` directory of a notes tree
#[derive(Debug, Clone)]
pub struct GrammarLog {
    dir: PathBuf,
}

impl GrammarLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.dir.is_dir()
    }

    /// Log file for a `YYYY-MM` month
    pub fn file_for(&self, month: &str) -> PathBuf {
        self.dir.join(format!("{}{}.csv", FILE_PREFIX, month))
    }

    /// Append one row to the month of `now`, writing the header for a new file
    pub fn append(&self, now: NaiveDateTime, original: &str, corrected: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create: {}", self.dir.display()))?;

        let path = self.file_for(&now.format(MONTH_FORMAT).to_string());
        let is_new = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;

        let mut writer = csv::Writer::from_writer(file);
        if is_new {
            writer.write_record(HEADER)?;
        }
        writer.write_record([
            now.format(TIMESTAMP_FORMAT).to_string().as_str(),
            original,
            corrected,
        ])?;
        writer
            .flush()
            .with_context(|| format!("Failed to write: {}", path.display()))?;

        Ok(path)
    }

    /// Entries of a month, most recent first; `None` if there is no log for it
    pub fn read_month(&self, month: &str) -> Result<Option<Vec<LogEntry>>> {
        let path = self.file_for(month);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open: {}", path.display()))?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.with_context(|| format!("Failed to parse: {}", path.display()))?;
            // Rows missing a column are skipped
            if record.len() < 3 {
                continue;
            }
            entries.push(LogEntry {
                timestamp: record[0].to_string(),
                original: record[1].to_string(),
                corrected: record[2].to_string(),
            });
        }

        entries.sort_by(|a, b| b.cmp(a));
        Ok(Some(entries))
    }

    /// Months that have a log file, most recent first
    pub fn months(&self) -> Result<Vec<String>> {
        let mut months = Vec::new();
        if !self.dir.exists() {
            return Ok(months);
        }

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read: {}", self.dir.display()))?
            .flatten()
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(month) = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(".csv"))
            {
                months.push(month.to_string());
            }
        }

        months.sort_by(|a, b| b.cmp(a));
        Ok(months)
    }

    /// Write an entry to `exports/grammar_check_<timestamp>.md`
    pub fn export(&self, entry: &LogEntry) -> Result<PathBuf> {
        let export_dir = self.dir.join("exports");
        fs::create_dir_all(&export_dir)
            .with_context(|| format!("Failed to create: {}", export_dir.display()))?;

        let safe_timestamp = entry.timestamp.replace(':', "-").replace(' ', "_");
        let path = export_dir.join(format!("grammar_check_{}.md", safe_timestamp));

        let content = format!(
            "# Grammar Check - {}\n\n## Original Text\n\n{}\n\n## Corrected Text\n\n{}",
            entry.timestamp, entry.original, entry.corrected
        );
        fs::write(&path, content).with_context(|| format!("Failed to write: {}", path.display()))?;

        Ok(path)
    }
}
