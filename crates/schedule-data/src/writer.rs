//! Serialization of pipeline output.
//!
//! Each artifact is serialized in one piece to a temporary sibling file and
//! only renamed over its destination on [`StagedFile::commit`]. A staged file
//! that is dropped without being committed is removed, so a failed run never
//! leaves a truncated or partial artifact behind.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use schedule_core::models::MeetingRecord;
use schedule_core::{Result, ScheduleError};
use serde::Serialize;
use tracing::debug;

use crate::pipeline::RunReport;

/// JSON layout for written artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// Two-space indentation.
    #[default]
    Pretty,
    /// Single line, no extra whitespace.
    Compact,
}

/// A fully serialized artifact waiting to be moved into place.
#[must_use = "a staged file is discarded unless committed"]
#[derive(Debug)]
pub struct StagedFile {
    tmp: PathBuf,
    dest: PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Final location of the artifact.
    pub fn destination(&self) -> &Path {
        &self.dest
    }

    /// Rename the temporary file over the destination.
    pub fn commit(mut self) -> Result<()> {
        std::fs::rename(&self.tmp, &self.dest).map_err(|source| ScheduleError::FileWrite {
            path: self.dest.clone(),
            source,
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_file(&self.tmp);
        }
    }
}

/// Serialize the full record collection next to `path` without publishing it.
pub fn stage_records(
    path: &Path,
    records: &[MeetingRecord],
    style: JsonStyle,
) -> Result<StagedFile> {
    let staged = stage_json(path, records, style)?;
    debug!("Staged {} records for {}", records.len(), path.display());
    Ok(staged)
}

/// Serialize a run report (always indented) next to `path`.
pub fn stage_report(path: &Path, report: &RunReport) -> Result<StagedFile> {
    stage_json(path, report, JsonStyle::Pretty)
}

/// Load a previously written record collection.
pub fn load_records(path: &Path) -> Result<Vec<MeetingRecord>> {
    let file = File::open(path).map_err(|source| ScheduleError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize `value` into the temporary sibling of `path` and sync it.
///
/// Serialization failures, including I/O errors raised while encoding, are
/// reported as [`ScheduleError::FileWrite`] against `path`.
fn stage_json<T>(path: &Path, value: &T, style: JsonStyle) -> Result<StagedFile>
where
    T: Serialize + ?Sized,
{
    let write_err = |source: std::io::Error| ScheduleError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let tmp = temp_path_for(path);
    let file = File::create(&tmp).map_err(write_err)?;
    // From here on the temp file exists and is removed if staging fails.
    let staged = StagedFile {
        tmp,
        dest: path.to_path_buf(),
        committed: false,
    };

    let mut out = BufWriter::new(file);
    let encoded = match style {
        JsonStyle::Pretty => serde_json::to_writer_pretty(&mut out, value),
        JsonStyle::Compact => serde_json::to_writer(&mut out, value),
    };
    encoded.map_err(|e| write_err(e.into()))?;
    out.write_all(b"\n").map_err(write_err)?;
    out.flush().map_err(write_err)?;
    out.get_ref().sync_all().map_err(write_err)?;

    Ok(staged)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_core::models::Weekday;
    use tempfile::TempDir;

    fn write_records(path: &Path, records: &[MeetingRecord], style: JsonStyle) -> Result<()> {
        stage_records(path, records, style)?.commit()
    }

    fn record(day: Weekday) -> MeetingRecord {
        MeetingRecord {
            course: "ALE 2170".to_string(),
            title: "Intro".to_string(),
            section: "001".to_string(),
            course_type: "LEC".to_string(),
            building: "SCI".to_string(),
            room: "101".to_string(),
            day,
            start_minutes: 540,
            end_minutes: 590,
            max_enrollment: None,
            current_enrollment: Some(28),
        }
    }

    #[test]
    fn test_write_and_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![
            record(Weekday::Friday),
            record(Weekday::Monday),
            record(Weekday::Wednesday),
        ];

        write_records(&path, &records, JsonStyle::Pretty).unwrap();
        let loaded = load_records(&path).unwrap();
        assert_eq!(loaded, records);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_pretty_output_is_indented_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_records(&path, &[record(Weekday::Monday)], JsonStyle::Pretty).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"course\": \"ALE 2170\""));
        assert!(text.contains("\"maxEnrollment\": null"));
        assert!(text.contains("\"startMinutes\": 540"));
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_records(&path, &[record(Weekday::Thursday)], JsonStyle::Compact).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end().lines().count(), 1);
        assert!(text.contains("\"day\":\"R\""));
    }

    #[test]
    fn test_empty_collection_writes_empty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        write_records(&path, &[], JsonStyle::Pretty).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn test_unwritable_destination_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("out.json");
        let err =
            write_records(&path, &[record(Weekday::Monday)], JsonStyle::Pretty).unwrap_err();

        assert!(matches!(err, ScheduleError::FileWrite { .. }));
        assert!(!path.exists());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();

        write_records(&path, &[record(Weekday::Monday)], JsonStyle::Compact).unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_staged_file_dropped_without_commit_is_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let staged = stage_records(&path, &[record(Weekday::Monday)], JsonStyle::Pretty).unwrap();
        assert_eq!(staged.destination(), path.as_path());
        assert!(temp_path_for(&path).exists());
        assert!(!path.exists());

        drop(staged);
        assert!(!temp_path_for(&path).exists());
        assert!(!path.exists());
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot encode"))
        }
    }

    #[test]
    fn test_encoding_failure_is_reported_as_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let err = stage_json(&path, &Unserializable, JsonStyle::Compact).unwrap_err();
        match &err {
            ScheduleError::FileWrite { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("expected FileWrite, got {other:?}"),
        }
        assert!(err.to_string().contains("cannot encode"));
        assert!(!temp_path_for(&path).exists());
        assert!(!path.exists());
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/tmp/does-not-exist-schedule-out.json")).unwrap_err();
        assert!(matches!(err, ScheduleError::FileRead { .. }));
    }

    #[test]
    fn test_temp_path_for() {
        assert_eq!(
            temp_path_for(Path::new("/data/fall_cleaned.json")),
            PathBuf::from("/data/fall_cleaned.json.tmp")
        );
    }
}
