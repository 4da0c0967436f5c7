/// Encode a wall-clock `HH:MM` string as minutes since midnight.
///
/// Returns `None` for anything that is not exactly two colon-separated
/// integer tokens. Surrounding whitespace around the string and around each
/// token is tolerated. No range check is applied to either component, so
/// `"25:99"` encodes to `1599`. Signed components such as `"-0:30"` are
/// unparseable since minutes since midnight are unsigned.
///
/// # Examples
///
/// ```
/// use schedule_core::time_utils::encode_time;
///
/// assert_eq!(encode_time("14:30"), Some(870));
/// assert_eq!(encode_time("TBA"), None);
/// assert_eq!(encode_time("-0:30"), None);
/// ```
pub fn encode_time(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut parts = trimmed.split(':');
    let (hours, minutes) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (h, m),
        _ => return None,
    };

    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// Render minutes since midnight as 12-hour clock text.
///
/// Values past 23:59 wrap onto the following day's clock face.
///
/// # Examples
///
/// ```
/// use schedule_core::time_utils::format_minutes;
///
/// assert_eq!(format_minutes(870), "2:30 PM");
/// assert_eq!(format_minutes(0), "12:00 AM");
/// assert_eq!(format_minutes(720), "12:00 PM");
/// ```
pub fn format_minutes(minutes: u32) -> String {
    let of_day = minutes % (24 * 60);
    let hours = of_day / 60;
    let mins = of_day % 60;
    let period = if hours < 12 { "AM" } else { "PM" };
    let display_hour = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, mins, period)
}

/// Render a meeting's start and end as `"9:00 AM - 9:50 AM"`.
pub fn format_meeting_span(start_minutes: u32, end_minutes: u32) -> String {
    format!(
        "{} - {}",
        format_minutes(start_minutes),
        format_minutes(end_minutes)
    )
}
