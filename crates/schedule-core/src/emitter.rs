use crate::filter::ScheduledRow;
use crate::models::{MeetingRecord, NormalizedFields, Weekday};

/// Join subject and number with one space, dropping empty parts.
///
/// # Examples
///
/// ```
/// use schedule_core::emitter::build_course_code;
///
/// assert_eq!(build_course_code("ALE", "2170"), "ALE 2170");
/// assert_eq!(build_course_code("", "2170"), "2170");
/// ```
pub fn build_course_code(subject: &str, course_number: &str) -> String {
    [subject.trim(), course_number.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build the record for one `(fields, day)` pair.
pub fn build_record(
    fields: &NormalizedFields,
    day: Weekday,
    start_minutes: u32,
    end_minutes: u32,
) -> MeetingRecord {
    MeetingRecord {
        course: build_course_code(&fields.subject, &fields.course_number),
        title: fields.title.clone(),
        section: fields.section.clone(),
        course_type: fields.course_type.clone(),
        building: fields.building.clone(),
        room: fields.room.clone(),
        day,
        start_minutes,
        end_minutes,
        max_enrollment: fields.max_enrollment,
        current_enrollment: fields.current_enrollment,
    }
}

/// Append one record per meeting day of `row` to `out`, in day order.
///
/// Returns the number of records appended.
pub fn emit_records(row: &ScheduledRow, out: &mut Vec<MeetingRecord>) -> usize {
    out.extend(
        row.days
            .iter()
            .map(|&day| build_record(&row.fields, day, row.start_minutes, row.end_minutes)),
    );
    row.days.len()
}
