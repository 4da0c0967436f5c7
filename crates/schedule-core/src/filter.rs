//! Row eligibility policy.
//!
//! Each normalized row is classified as either [`RowDecision::Included`],
//! carrying the parsed meeting times and weekdays, or
//! [`RowDecision::Excluded`] with the first reason that disqualified it.
//! Textual checks run before any parsing; parse failures are checked after.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::FilterPolicy;
use crate::days::parse_days;
use crate::models::{NormalizedFields, Weekday};
use crate::time_utils::encode_time;

/// Why a row contributed no meeting records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Start or end time is empty or the "to be announced" token.
    TimeNotScheduled,
    /// Building is empty or marks an online section.
    NoPhysicalLocation,
    /// Room is a placeholder rather than a real room.
    RoomPlaceholder,
    /// Start or end time is not a valid `HH:MM` value.
    UnparseableTime,
    /// The day pattern contains no recognised weekday.
    NoMeetingDays,
}

impl ExclusionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ExclusionReason::TimeNotScheduled => "time_not_scheduled",
            ExclusionReason::NoPhysicalLocation => "no_physical_location",
            ExclusionReason::RoomPlaceholder => "room_placeholder",
            ExclusionReason::UnparseableTime => "unparseable_time",
            ExclusionReason::NoMeetingDays => "no_meeting_days",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row that passed every check, with its parsed schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRow {
    pub fields: NormalizedFields,
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// Never empty.
    pub days: Vec<Weekday>,
}

/// Outcome of running one row through the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDecision {
    Included(ScheduledRow),
    Excluded(ExclusionReason),
}

impl RowDecision {
    pub fn exclusion_reason(&self) -> Option<ExclusionReason> {
        match self {
            RowDecision::Included(_) => None,
            RowDecision::Excluded(reason) => Some(*reason),
        }
    }
}

/// Applies a [`FilterPolicy`] to normalized rows.
pub struct RowFilter<'a> {
    policy: &'a FilterPolicy,
}

impl<'a> RowFilter<'a> {
    pub fn new(policy: &'a FilterPolicy) -> Self {
        RowFilter { policy }
    }

    /// Textual pre-filter: placeholder and empty-field checks, no parsing.
    pub fn screen(&self, fields: &NormalizedFields) -> Option<ExclusionReason> {
        let unscheduled = |t: &str| t.is_empty() || self.policy.is_unscheduled_time(t);
        if unscheduled(fields.start_time_raw.as_str())
            || unscheduled(fields.end_time_raw.as_str())
        {
            return Some(ExclusionReason::TimeNotScheduled);
        }

        if fields.building.trim().is_empty() || self.policy.is_online_building(&fields.building) {
            return Some(ExclusionReason::NoPhysicalLocation);
        }

        if self.policy.is_room_placeholder(&fields.room) {
            return Some(ExclusionReason::RoomPlaceholder);
        }

        None
    }

    /// Classify a row, parsing its times and day pattern when it survives
    /// the textual checks.
    pub fn evaluate(&self, fields: NormalizedFields) -> RowDecision {
        if let Some(reason) = self.screen(&fields) {
            return RowDecision::Excluded(reason);
        }

        let (start_minutes, end_minutes) = match (
            encode_time(&fields.start_time_raw),
            encode_time(&fields.end_time_raw),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => return RowDecision::Excluded(ExclusionReason::UnparseableTime),
        };

        let days = parse_days(&fields.days_raw);
        if days.is_empty() {
            return RowDecision::Excluded(ExclusionReason::NoMeetingDays);
        }

        RowDecision::Included(ScheduledRow {
            fields,
            start_minutes,
            end_minutes,
            days,
        })
    }
}
