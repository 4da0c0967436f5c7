use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A weekday on which a section can meet.
///
/// Serialized as the single-letter registrar code, with Thursday as `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "M")]
    Monday,
    #[serde(rename = "T")]
    Tuesday,
    #[serde(rename = "W")]
    Wednesday,
    #[serde(rename = "R")]
    Thursday,
    #[serde(rename = "F")]
    Friday,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Resolve a day-pattern letter (case-insensitive) to a weekday.
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            _ => None,
        }
    }

    /// The single-letter code used in day patterns and in the output.
    pub fn code(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One row of the raw extract, keyed by header name.
///
/// Keys are stored trimmed, and lookups trim the requested name as well, so
/// padded headers such as `" Start Time "` resolve under `"Start Time"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    /// Build a row from `(header, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let fields = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_string(), v.into()))
            .collect();
        RawRow { fields }
    }

    /// Raw value of `column`, or `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The decoded, trimmed representation of one input row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields {
    pub subject: String,
    pub course_number: String,
    pub title: String,
    pub section: String,
    pub course_type: String,
    pub start_time_raw: String,
    pub end_time_raw: String,
    pub days_raw: String,
    pub building: String,
    pub room: String,
    /// `None` when the source text is empty or not an integer.
    pub max_enrollment: Option<i64>,
    /// `None` when the source text is empty or not an integer.
    pub current_enrollment: Option<i64>,
}

/// A single section meeting on a single weekday: the unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    /// Subject and course number joined by a space, e.g. `"ALE 2170"`.
    pub course: String,
    pub title: String,
    pub section: String,
    #[serde(rename = "type")]
    pub course_type: String,
    pub building: String,
    pub room: String,
    pub day: Weekday,
    /// Minutes since midnight.
    #[serde(alias = "start_minutes")]
    pub start_minutes: u32,
    /// Minutes since midnight. Not guaranteed to be after `start_minutes`.
    #[serde(alias = "end_minutes")]
    pub end_minutes: u32,
    #[serde(alias = "max_enrollment")]
    pub max_enrollment: Option<i64>,
    #[serde(alias = "current_enrollment")]
    pub current_enrollment: Option<i64>,
}
