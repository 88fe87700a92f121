use chrono::{DateTime, Duration};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Timestamps at or above this are milliseconds (13 digits), below it seconds.
pub const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Any non-alphanumeric character starts a new word.
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

/// Unix seconds from a 10-digit seconds or 13-digit milliseconds timestamp.
pub fn to_unix_seconds(timestamp: i64) -> i64 {
    if timestamp >= MILLIS_THRESHOLD {
        timestamp / 1000
    } else {
        timestamp
    }
}

/// Renders a Unix timestamp (seconds or milliseconds) as `YYYY-MM-DD HH:MM`
/// shifted by a fixed number of hours from UTC.
pub fn format_display_time(timestamp: i64, offset_hours: i32) -> Option<String> {
    let utc = DateTime::from_timestamp(to_unix_seconds(timestamp), 0)?;
    let shifted = utc.naive_utc() + Duration::hours(i64::from(offset_hours));
    Some(shifted.format(DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(to_title_case("jean dupont"), "Jean Dupont");
        assert_eq!(to_title_case("JEAN dUPONT"), "Jean Dupont");
        assert_eq!(to_title_case("élodie"), "Élodie");
        assert_eq!(to_title_case(""), "");
    }

    #[test]
    fn test_unix_seconds_from_either_precision() {
        assert_eq!(to_unix_seconds(1760297400123), 1760297400);
        assert_eq!(to_unix_seconds(1760297400), 1760297400);
        assert_eq!(to_unix_seconds(MILLIS_THRESHOLD), 1_000_000_000);
    }

    #[test]
    fn test_display_time_accepts_seconds_and_millis() {
        assert_eq!(
            format_display_time(1760297400000, 2).as_deref(),
            Some("2025-10-12 21:30")
        );
        assert_eq!(
            format_display_time(1760297400, 2).as_deref(),
            Some("2025-10-12 21:30")
        );
    }

    #[test]
    fn test_display_time_crosses_midnight() {
        // 2025-10-06 23:00 UTC
        assert_eq!(
            format_display_time(1759791600, 2).as_deref(),
            Some("2025-10-07 01:00")
        );
        assert_eq!(
            format_display_time(1759791600, 0).as_deref(),
            Some("2025-10-06 23:00")
        );
    }
}
