use crate::config::PipelineConfig;
use crate::models::{NormalizedFields, RawRow};

/// Trim whitespace, then strip one matching pair of surrounding quotes.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.to_string(),
        None => trimmed.to_string(),
    }
}

/// Coerce cleaned text to an integer, or `None` when empty or malformed.
pub fn parse_optional_int(cleaned: &str) -> Option<i64> {
    if cleaned.is_empty() {
        return None;
    }
    cleaned.trim().parse().ok()
}

/// Cleaned value of `column`, empty when the column is absent.
fn extract(row: &RawRow, column: &str) -> String {
    row.get(column).map(clean_str).unwrap_or_default()
}

/// Decode one raw row into its trimmed, typed fields.
///
/// Missing columns become empty strings (or `None` for enrollments). This
/// step never fails.
pub fn normalize_row(row: &RawRow, config: &PipelineConfig) -> NormalizedFields {
    let cols = &config.columns;
    let field = |name: &String| extract(row, name);

    NormalizedFields {
        subject: field(&cols.subject),
        course_number: field(&cols.course_number),
        title: field(&cols.title),
        section: field(&cols.section),
        course_type: config.course_types.normalize(&field(&cols.course_type)),
        start_time_raw: field(&cols.start_time),
        end_time_raw: field(&cols.end_time),
        days_raw: field(&cols.days),
        building: field(&cols.building),
        room: field(&cols.room),
        max_enrollment: parse_optional_int(&field(&cols.max_enrollment)),
        current_enrollment: parse_optional_int(&field(&cols.current_enrollment)),
    }
}
