//! Turning typed date/time input into something the validator understands.

use apptbook_core::appointment::parse_date_time;
use chrono::{DateTime, Local, Utc};

/// Local wall-clock format used for prompts and defaults.
pub const WHEN_FORMAT: &str = "%Y-%m-%d %H:%M";

const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mon", "monday"),
    ("tue", "tuesday"),
    ("tues", "tuesday"),
    ("wed", "wednesday"),
    ("thu", "thursday"),
    ("thurs", "thursday"),
    ("fri", "friday"),
    ("sat", "saturday"),
    ("sun", "sunday"),
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("sept", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// Show an instant as local wall-clock time in `WHEN_FORMAT`.
pub fn format_when(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format(WHEN_FORMAT).to_string()
}

/// Resolve typed input to a date/time string.
///
/// Exact formats are passed through untouched. Otherwise natural language
/// such as "tomorrow 3pm" is tried; it must name a time of day, since an
/// appointment needs one. Anything unrecognized is passed through as-is so
/// the validator reports it as an invalid date/time.
pub fn resolve_when(input: &str) -> String {
    let input = input.trim();

    if parse_date_time(input).is_some() || !has_time_of_day(input) {
        return input.to_string();
    }

    let expanded = expand_abbreviations(input);
    match fuzzydate::parse(&expanded) {
        Ok(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        Err(_) => input.to_string(),
    }
}

fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map_or(word, |(_, full)| *full)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Does the input mention a time of day (3pm, 15:30, noon, midnight)?
fn has_time_of_day(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    let chars: Vec<char> = lower.chars().collect();

    chars.iter().enumerate().any(|(i, &c)| match c {
        ':' => {
            i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
        }
        'a' | 'p' => {
            let followed_by_m = chars.get(i + 1) == Some(&'m');
            let ends_word = chars.get(i + 2).is_none_or(|n| !n.is_alphanumeric());
            let digit_before = chars[..i]
                .iter()
                .rev()
                .find(|p| **p != ' ')
                .is_some_and(|p| p.is_ascii_digit());
            followed_by_m && ends_word && digit_before
        }
        _ => false,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn exact_formats_pass_through() {
        assert_eq!(resolve_when("2026-03-20T15:00:00Z"), "2026-03-20T15:00:00Z");
        assert_eq!(resolve_when(" 2026-03-20 15:00 "), "2026-03-20 15:00");
    }

    #[test]
    fn date_without_time_passes_through() {
        assert_eq!(resolve_when("tomorrow"), "tomorrow");
        assert!(parse_date_time(&resolve_when("tomorrow")).is_none());
    }

    #[test]
    fn garbage_passes_through() {
        assert_eq!(resolve_when("whenever works"), "whenever works");
    }

    #[test]
    fn natural_language_with_time_resolves() {
        let resolved = resolve_when("tomorrow 3pm");
        let parsed = parse_date_time(&resolved).unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.hour(), 15);
        assert_eq!(local.minute(), 0);
    }

    #[test]
    fn abbreviations_expand() {
        assert_eq!(expand_abbreviations("Sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("sept 5 10:30"), "september 5 10:30");
        assert_eq!(expand_abbreviations("next  friday"), "next friday");
    }

    #[test]
    fn time_of_day_detection() {
        assert!(has_time_of_day("tomorrow 6pm"));
        assert!(has_time_of_day("sat 3 PM"));
        assert!(has_time_of_day("march 20 9:30"));
        assert!(has_time_of_day("friday noon"));
        assert!(!has_time_of_day("tomorrow"));
        assert!(!has_time_of_day("december 3"));
        assert!(!has_time_of_day("3 amsterdam"));
    }

    #[test]
    fn format_when_uses_local_time() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 20, 15, 0, 0).unwrap();
        let expected = dt.with_timezone(&Local).format(WHEN_FORMAT).to_string();
        assert_eq!(format_when(&dt), expected);
        assert_eq!(parse_date_time(&format_when(&dt)), Some(dt));
    }
}
