//! Value extraction and date handling for container report lines.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

pub const VIDEO_DATE_DISPLAY: &str = "%b %-d, %Y \n %H:%M";

// `yyyy-MM-dd HH:mm:ss <zone>`; the zone is an abbreviation, `Z`, or a numeric offset.
static REPORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\s+([A-Za-z]{1,6}|Z|[+-]\d{2}:?\d{2})$")
        .expect("static report date pattern is valid")
});

/// The part of a report line after its first colon, trimmed.
pub fn line_value(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value.trim())
}

/// Parses a report date value and renders it as `"Mon D, YYYY \n HH:MM"`.
///
/// The wall-clock time is shown as written; the zone token only has to be present.
pub fn format_report_date(value: &str) -> Option<String> {
    let caps = REPORT_DATE.captures(value.trim())?;
    let naive = NaiveDateTime::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d %H:%M:%S").ok()?;
    Some(naive.format(VIDEO_DATE_DISPLAY).to_string())
}
