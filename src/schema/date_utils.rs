//! Day-first date parsing for the claim date columns.

use chrono::{NaiveDate, NaiveDateTime};

/// Date format configuration for string-to-date conversions
///
/// Formats are tried in order. Ambiguous `a/b/yyyy` values always resolve
/// day-first, so `03/04/2020` is the 3rd of April.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateFormatConfig {
    /// Date-only formats to try
    pub date_formats: Vec<String>,
    /// Date-time formats to try, keeping only the date part
    pub datetime_formats: Vec<String>,
    /// Enable heuristic format detection when no listed format matches
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            date_formats: vec![
                "%d/%m/%Y".to_string(), // 15/01/2023
                "%d-%m-%Y".to_string(), // 15-01-2023
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y-%m-%d".to_string(), // 2023-01-15
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%Y%m%d".to_string(),   // 20230115
                "%d %b %Y".to_string(), // 15 Jan 2023
            ],
            datetime_formats: vec![
                "%d/%m/%Y %H:%M:%S".to_string(),
                "%d/%m/%Y %H:%M".to_string(),
                "%Y-%m-%d %H:%M:%S".to_string(),
                "%Y-%m-%dT%H:%M:%S".to_string(),
            ],
            enable_format_detection: true,
        }
    }
}

/// Parse a date string with multiple format attempts
///
/// Returns `None` for empty or unparseable input.
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    for format in &config.datetime_formats {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect a day-first date format from the shape of the string
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    for (separator, day_first, year_first) in [
        ('/', "%d/%m/%Y", "%Y/%m/%d"),
        ('-', "%d-%m-%Y", "%Y-%m-%d"),
        ('.', "%d.%m.%Y", "%Y.%m.%d"),
    ] {
        let parts: Vec<&str> = s.split(separator).collect();
        if parts.len() != 3 || !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            continue;
        }
        if parts[0].len() == 4 {
            return Some(year_first);
        }
        if parts[2].len() == 4 {
            return Some(day_first);
        }
    }

    // Compact format (YYYYMMDD)
    if s.len() == 8 && s.chars().all(|c| c.is_ascii_digit()) {
        return Some("%Y%m%d");
    }

    None
}
