//! End-to-end normalization pipeline.
//!
//! Streams rows from the reader through normalization, filtering and day
//! expansion, accumulating meeting records in input order together with a
//! [`RunReport`] of what was kept and why rows were dropped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use schedule_core::config::PipelineConfig;
use schedule_core::emitter::emit_records;
use schedule_core::filter::{ExclusionReason, RowDecision, RowFilter};
use schedule_core::models::{MeetingRecord, RawRow};
use schedule_core::normalizer::normalize_row;
use schedule_core::time_utils::format_meeting_span;
use schedule_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::reader::RowReader;

// ── Public types ──────────────────────────────────────────────────────────────

/// Row-level counters accumulated while the pipeline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowStats {
    /// Data rows read from the input (header excluded).
    pub rows_read: usize,
    /// Rows that produced at least one meeting record.
    pub rows_included: usize,
    /// Rows dropped by the filter.
    pub rows_excluded: usize,
    /// Dropped rows broken down by reason.
    pub exclusions: BTreeMap<ExclusionReason, usize>,
    /// Total meeting records produced.
    pub records_emitted: usize,
}

impl RowStats {
    fn record_exclusion(&mut self, reason: ExclusionReason) {
        self.rows_excluded += 1;
        *self.exclusions.entry(reason).or_insert(0) += 1;
    }

    /// Number of rows excluded for `reason`.
    pub fn excluded_for(&self, reason: ExclusionReason) -> usize {
        self.exclusions.get(&reason).copied().unwrap_or(0)
    }
}

/// Diagnostics for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// RFC 3339 timestamp when the run finished.
    pub generated_at: String,
    pub input_path: PathBuf,
    /// Where the records were written; unset for in-memory runs.
    pub output_path: Option<PathBuf>,
    #[serde(flatten)]
    pub stats: RowStats,
    /// Wall-clock seconds spent reading and transforming rows.
    pub elapsed_seconds: f64,
}

/// Records plus the report describing how they were produced.
#[derive(Debug, Clone)]
pub struct CleanResult {
    pub records: Vec<MeetingRecord>,
    pub report: RunReport,
}

// ── SchedulePipeline ──────────────────────────────────────────────────────────

/// Per-row transformation bound to one configuration.
pub struct SchedulePipeline<'a> {
    config: &'a PipelineConfig,
    filter: RowFilter<'a>,
}

impl<'a> SchedulePipeline<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        SchedulePipeline {
            config,
            filter: RowFilter::new(&config.filter),
        }
    }

    /// Run one raw row through every step, appending its records to `out`.
    ///
    /// Returns the filter decision's reason when the row was dropped.
    pub fn process_row(
        &self,
        row: &RawRow,
        out: &mut Vec<MeetingRecord>,
    ) -> std::result::Result<usize, ExclusionReason> {
        let fields = normalize_row(row, self.config);
        match self.filter.evaluate(fields) {
            RowDecision::Included(scheduled) => {
                debug!(
                    "Included {} {} {} {:?} ({} {})",
                    scheduled.fields.subject,
                    scheduled.fields.course_number,
                    scheduled.fields.section,
                    scheduled.days,
                    format_meeting_span(scheduled.start_minutes, scheduled.end_minutes),
                    scheduled.fields.building,
                );
                Ok(emit_records(&scheduled, out))
            }
            RowDecision::Excluded(reason) => Err(reason),
        }
    }

    /// Drive the pipeline over a sequence of rows.
    ///
    /// The first `Err` from `rows` aborts the run and is returned as-is.
    pub fn run<I>(&self, rows: I) -> Result<(Vec<MeetingRecord>, RowStats)>
    where
        I: IntoIterator<Item = Result<RawRow>>,
    {
        let mut records: Vec<MeetingRecord> = Vec::new();
        let mut stats = RowStats::default();

        for (idx, row) in rows.into_iter().enumerate() {
            self.tally(idx, &row?, &mut records, &mut stats);
        }

        Ok((records, stats))
    }

    fn tally(
        &self,
        idx: usize,
        row: &RawRow,
        records: &mut Vec<MeetingRecord>,
        stats: &mut RowStats,
    ) {
        stats.rows_read += 1;
        match self.process_row(row, records) {
            Ok(emitted) => {
                stats.rows_included += 1;
                stats.records_emitted += emitted;
            }
            Err(reason) => {
                debug!("Row {} excluded: {}", idx + 1, reason);
                stats.record_exclusion(reason);
            }
        }
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Clean an in-memory batch of rows. Never fails.
pub fn clean_rows<I>(rows: I, config: &PipelineConfig) -> (Vec<MeetingRecord>, RowStats)
where
    I: IntoIterator<Item = RawRow>,
{
    let pipeline = SchedulePipeline::new(config);
    let mut records = Vec::new();
    let mut stats = RowStats::default();

    for (idx, row) in rows.into_iter().enumerate() {
        pipeline.tally(idx, &row, &mut records, &mut stats);
    }

    (records, stats)
}

/// Read and clean the schedule extract at `input`.
///
/// 1. Open the CSV and warn about any expected column it lacks.
/// 2. Stream each row through normalization, filtering and expansion.
/// 3. Return the records in input order with a [`RunReport`].
///
/// Nothing is written to disk here.
pub fn clean_schedule(input: &Path, config: &PipelineConfig) -> Result<CleanResult> {
    let start = Instant::now();

    let mut reader = RowReader::from_path(input)?;
    reader.warn_missing_columns(&config.columns);

    let (records, stats) = SchedulePipeline::new(config).run(reader.rows())?;

    info!(
        "Read {} rows from {}: {} included, {} excluded, {} meeting records",
        stats.rows_read,
        input.display(),
        stats.rows_included,
        stats.rows_excluded,
        stats.records_emitted,
    );
    for (reason, count) in &stats.exclusions {
        debug!("  {:>6} excluded: {}", count, reason);
    }

    let report = RunReport {
        generated_at: Utc::now().to_rfc3339(),
        input_path: input.to_path_buf(),
        output_path: None,
        stats,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };

    Ok(CleanResult { records, report })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
