//! Immutable pipeline configuration.
//!
//! Column names, placeholder tokens and the course-type table live here and
//! are passed explicitly into the normalizer and the row filter. Every field
//! has a built-in default, so a JSON config file only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};

// ── ColumnNames ────────────────────────────────────────────────────────────────

/// Header names of the columns the normalizer extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnNames {
    pub subject: String,
    pub course_number: String,
    pub title: String,
    pub section: String,
    pub course_type: String,
    pub start_time: String,
    pub end_time: String,
    pub days: String,
    pub building: String,
    pub room: String,
    pub max_enrollment: String,
    pub current_enrollment: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            subject: "Subj".to_string(),
            course_number: "#".to_string(),
            title: "Title".to_string(),
            section: "Sec".to_string(),
            course_type: "Lec Lab".to_string(),
            start_time: "Start Time".to_string(),
            end_time: "End Time".to_string(),
            days: "Days".to_string(),
            building: "Bldg".to_string(),
            room: "Room".to_string(),
            max_enrollment: "Max Enrollment".to_string(),
            current_enrollment: "Current Enrollment".to_string(),
        }
    }
}

impl ColumnNames {
    /// All configured header names, in extraction order.
    pub fn all(&self) -> [&str; 12] {
        [
            self.subject.as_str(),
            self.course_number.as_str(),
            self.title.as_str(),
            self.section.as_str(),
            self.course_type.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
            self.days.as_str(),
            self.building.as_str(),
            self.room.as_str(),
            self.max_enrollment.as_str(),
            self.current_enrollment.as_str(),
        ]
    }
}

// ── FilterPolicy ───────────────────────────────────────────────────────────────

/// Placeholder tokens that mark a row as not physically scheduled.
///
/// All comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterPolicy {
    /// Time value meaning "to be announced".
    pub unscheduled_time: String,
    /// Building value for sections without a physical location.
    pub online_building: String,
    /// Room values that do not name an actual room.
    pub room_placeholders: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy {
            unscheduled_time: "TBA".to_string(),
            online_building: "ONLINE".to_string(),
            room_placeholders: vec!["SEE NOTES".to_string()],
        }
    }
}

impl FilterPolicy {
    pub fn is_unscheduled_time(&self, value: &str) -> bool {
        value.eq_ignore_ascii_case(&self.unscheduled_time)
    }

    pub fn is_online_building(&self, value: &str) -> bool {
        value.eq_ignore_ascii_case(&self.online_building)
    }

    pub fn is_room_placeholder(&self, value: &str) -> bool {
        self.room_placeholders
            .iter()
            .any(|p| value.eq_ignore_ascii_case(p))
    }
}

// ── CourseTypeMap ──────────────────────────────────────────────────────────────

/// Maps upper-cased raw instruction-type codes to their canonical code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseTypeMap(BTreeMap<String, String>);

impl Default for CourseTypeMap {
    fn default() -> Self {
        // LCLB is a combined lecture/lab, HYBD hybrid, TD thesis/dissertation.
        let codes = ["LEC", "LAB", "LCLB", "HYBD", "ONL", "TD"];
        CourseTypeMap(
            codes
                .iter()
                .map(|c| (c.to_string(), c.to_string()))
                .collect(),
        )
    }
}

impl CourseTypeMap {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        CourseTypeMap(
            entries
                .into_iter()
                .map(|(k, v)| (k.trim().to_uppercase(), v))
                .collect(),
        )
    }

    /// Canonical code for `raw`; unknown codes pass through upper-cased.
    pub fn normalize(&self, raw: &str) -> String {
        let key = raw.trim().to_uppercase();
        match self.0.get(&key) {
            Some(mapped) => mapped.clone(),
            None => key,
        }
    }
}

// ── PipelineConfig ─────────────────────────────────────────────────────────────

/// Everything the normalization pipeline needs besides the input itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub columns: ColumnNames,
    pub filter: FilterPolicy,
    pub course_types: CourseTypeMap,
}

impl PipelineConfig {
    /// Default location of the user-level config file:
    /// `~/.schedule-clean/config.json`.
    pub fn default_path() -> PathBuf {
        Self::default_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// The config path rooted at `base_dir` (used for testing).
    pub fn default_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".schedule-clean").join("config.json")
    }

    /// Load a config file, failing on unreadable files or invalid contents.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScheduleError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: PipelineConfig = serde_json::from_str(&content)
            .map_err(|e| ScheduleError::Config(format!("{}: {}", path.display(), e)))?;
        // Re-key so hand-written lowercase codes still match.
        config.course_types = CourseTypeMap::new(config.course_types.0);
        config.validate()?;
        Ok(config)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must load successfully. Without one, the default
    /// path is used when it exists; a broken default file is reported and
    /// ignored in favour of the built-in defaults.
    pub fn resolve(explicit: Option<&Path>, default_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!("Loading pipeline config from {}", path.display());
            return Self::load_from(path);
        }

        if !default_path.exists() {
            return Ok(Self::default());
        }

        match Self::load_from(default_path) {
            Ok(config) => {
                debug!("Loaded pipeline config from {}", default_path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Ignoring config at {}: {}", default_path.display(), e);
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(blank) = self.columns.all().iter().find(|c| c.trim().is_empty()) {
            return Err(ScheduleError::Config(format!(
                "column names must not be blank (got {:?})",
                blank
            )));
        }
        if self.filter.unscheduled_time.trim().is_empty() {
            return Err(ScheduleError::Config(
                "filter.unscheduled_time must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(tmp: &TempDir, body: &str) -> PathBuf {
        let path = tmp.path().join("config.json");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_default_columns_match_extract_headers() {
        let cols = ColumnNames::default();
        assert_eq!(cols.course_number, "#");
        assert_eq!(cols.course_type, "Lec Lab");
        assert_eq!(cols.current_enrollment, "Current Enrollment");
    }

    #[test]
    fn test_filter_policy_is_case_insensitive() {
        let policy = FilterPolicy::default();
        assert!(policy.is_unscheduled_time("tba"));
        assert!(policy.is_online_building("Online"));
        assert!(policy.is_room_placeholder("see notes"));
        assert!(!policy.is_room_placeholder("SEE"));
    }

    #[test]
    fn test_course_type_map_passes_unknown_upper_cased() {
        let map = CourseTypeMap::default();
        assert_eq!(map.normalize("lec"), "LEC");
        assert_eq!(map.normalize(" lclb "), "LCLB");
        assert_eq!(map.normalize("sem"), "SEM");
        assert_eq!(map.normalize(""), "");
    }

    #[test]
    fn test_course_type_map_aliases() {
        let mut entries = BTreeMap::new();
        entries.insert("lecture".to_string(), "LEC".to_string());
        let map = CourseTypeMap::new(entries);
        assert_eq!(map.normalize("Lecture"), "LEC");
    }

    #[test]
    fn test_load_partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"{"columns": {"building": "Building"}, "filter": {"room_placeholders": ["SEE NOTES", "TBD"]}}"#,
        );

        let config = PipelineConfig::load_from(&path).unwrap();
        assert_eq!(config.columns.building, "Building");
        assert_eq!(config.columns.room, "Room");
        assert_eq!(config.filter.unscheduled_time, "TBA");
        assert!(config.filter.is_room_placeholder("tbd"));
        assert_eq!(config.course_types, CourseTypeMap::default());
    }

    #[test]
    fn test_load_course_types_rekeys_lowercase() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"course_types": {"lab": "LAB", "studio": "LAB"}}"#);
        let config = PipelineConfig::load_from(&path).unwrap();
        assert_eq!(config.course_types.normalize("Studio"), "LAB");
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"colums": {}}"#);
        let err = PipelineConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ScheduleError::Config(_)));
    }

    #[test]
    fn test_load_rejects_blank_column() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, r#"{"columns": {"days": "  "}}"#);
        let err = PipelineConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("must not be blank"));
    }

    #[test]
    fn test_resolve_explicit_missing_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.json");
        let default = PipelineConfig::default_path_in(tmp.path());
        let err = PipelineConfig::resolve(Some(&missing), &default).unwrap_err();
        assert!(matches!(err, ScheduleError::FileRead { .. }));
    }

    #[test]
    fn test_resolve_without_files_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let default = PipelineConfig::default_path_in(tmp.path());
        let config = PipelineConfig::resolve(None, &default).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_resolve_broken_default_falls_back() {
        let tmp = TempDir::new().unwrap();
        let default = PipelineConfig::default_path_in(tmp.path());
        std::fs::create_dir_all(default.parent().unwrap()).unwrap();
        std::fs::write(&default, "{not json").unwrap();

        let config = PipelineConfig::resolve(None, &default).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_resolve_reads_default_path() {
        let tmp = TempDir::new().unwrap();
        let default = PipelineConfig::default_path_in(tmp.path());
        std::fs::create_dir_all(default.parent().unwrap()).unwrap();
        std::fs::write(&default, r#"{"filter": {"online_building": "VIRTUAL"}}"#).unwrap();

        let config = PipelineConfig::resolve(None, &default).unwrap();
        assert!(config.filter.is_online_building("virtual"));
    }
}
