use crate::models::Weekday;

/// Parse a free-text day pattern such as `"M  W  F   "` into weekdays.
///
/// Recognised letters are `M T W R F` in either case; everything else is
/// skipped. The result keeps first-occurrence order and holds no duplicates.
/// An empty result means the section has no weekly meeting.
pub fn parse_days(pattern: &str) -> Vec<Weekday> {
    let mut days: Vec<Weekday> = Vec::with_capacity(Weekday::ALL.len());
    for day in pattern.chars().filter_map(Weekday::from_code) {
        if !days.contains(&day) {
            days.push(day);
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use Weekday::*;

    #[test]
    fn test_parse_days_padded_patterns() {
        assert_eq!(parse_days("M  W  F   "), vec![Monday, Wednesday, Friday]);
        assert_eq!(parse_days(" T  R    "), vec![Tuesday, Thursday]);
        assert_eq!(parse_days("  W     "), vec![Wednesday]);
    }

    #[test]
    fn test_parse_days_deduplicates_in_first_occurrence_order() {
        assert_eq!(parse_days("MWM"), vec![Monday, Wednesday]);
        assert_eq!(parse_days("FM"), vec![Friday, Monday]);
    }

    #[test]
    fn test_parse_days_is_case_insensitive() {
        assert_eq!(parse_days("tr"), vec![Tuesday, Thursday]);
        assert_eq!(parse_days("mTwRf"), Weekday::ALL.to_vec());
    }

    #[test]
    fn test_parse_days_ignores_unknown_characters() {
        assert_eq!(parse_days("S U"), Vec::<Weekday>::new());
        assert_eq!(parse_days("M-W/F*"), vec![Monday, Wednesday, Friday]);
    }

    #[test]
    fn test_parse_days_empty() {
        assert!(parse_days("").is_empty());
        assert!(parse_days("      ").is_empty());
    }

    #[test]
    fn test_parse_days_output_is_bounded_subset() {
        let days = parse_days("MTWRFMTWRF xyz MTWRF");
        assert_eq!(days.len(), 5);
        assert_eq!(days, Weekday::ALL.to_vec());
    }
}
