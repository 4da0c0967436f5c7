//! CSV row reading for the schedule cleaner.
//!
//! Wraps a [`csv::Reader`] so each data line comes back as a [`RawRow`]
//! keyed by trimmed header names. Rows are produced lazily, one at a time.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use schedule_core::config::ColumnNames;
use schedule_core::models::RawRow;
use schedule_core::{Result, ScheduleError};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Streaming reader over the rows of a header-led CSV source.
pub struct RowReader<R: Read> {
    inner: csv::Reader<R>,
    headers: Vec<String>,
}

impl RowReader<File> {
    /// Open `path` for reading. A missing or unreadable file is fatal.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| ScheduleError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> RowReader<R> {
    /// Wrap any byte source. The header line is read immediately.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // short and long rows are tolerated
            .from_reader(reader);

        let headers = normalize_headers(inner.headers()?);
        debug!("CSV headers: {:?}", headers);

        Ok(RowReader { inner, headers })
    }

    /// Trimmed header names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Headers from `columns` that the source does not provide.
    pub fn missing_columns<'c>(&self, columns: &'c ColumnNames) -> Vec<&'c str> {
        columns
            .all()
            .into_iter()
            .filter(|name| !self.headers.iter().any(|h| h == name.trim()))
            .collect()
    }

    /// Log a warning for each expected column the source lacks.
    pub fn warn_missing_columns(&self, columns: &ColumnNames) {
        for name in self.missing_columns(columns) {
            warn!("Input has no '{}' column; its values will be empty", name);
        }
    }

    /// Iterate over the remaining rows.
    ///
    /// Decoding errors (bad framing, invalid UTF-8) are yielded as `Err` and
    /// should abort the run.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<RawRow>> + '_ {
        let headers = &self.headers;
        self.inner
            .records()
            .map(move |record| -> Result<RawRow> { Ok(to_raw_row(headers, &record?)) })
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Trim header names and drop a UTF-8 byte-order mark from the first one.
fn normalize_headers(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 {
                h.trim_start_matches('\u{feff}')
            } else {
                h
            };
            h.trim().to_string()
        })
        .collect()
}

/// Pair headers with values; missing trailing values are simply absent and
/// values beyond the last header are dropped.
fn to_raw_row(headers: &[String], record: &StringRecord) -> RawRow {
    RawRow::from_pairs(
        headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v)),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
