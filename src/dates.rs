use chrono::{NaiveDate, NaiveDateTime};

pub const INVALID_DATE: &str = "Invalid Date";
pub const CANONICAL_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

enum Pattern {
    /// Date and 12-hour clock, e.g. `3/05/24 11:59pm`.
    DateTime(&'static str),
    /// Date only; time is midnight.
    Date(&'static str),
}

// Tried in order, first success wins.
const INPUT_PATTERNS: [Pattern; 4] = [
    Pattern::DateTime("%-m/%d/%y %-I:%M%p"),
    Pattern::DateTime("%m/%d/%y %-I:%M%p"),
    Pattern::Date("%m/%d/%y"),
    Pattern::Date("%-m/%d/%y"),
];

/// Parses a loosely formatted due date. The caller strips any `Due ` prefix.
pub fn parse_loose(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    INPUT_PATTERNS.iter().find_map(|pattern| match pattern {
        Pattern::DateTime(fmt) => NaiveDateTime::parse_from_str(raw, fmt).ok(),
        Pattern::Date(fmt) => NaiveDate::parse_from_str(raw, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
    })
}

/// Canonical `MM/DD/YYYY HH:MM:SS` form of `raw`, or [`INVALID_DATE`].
pub fn normalize(raw: &str) -> String {
    match parse_loose(raw) {
        Some(dt) => format_canonical(&dt),
        None => INVALID_DATE.to_string(),
    }
}

pub fn format_canonical(dt: &NaiveDateTime) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

pub fn parse_canonical(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, CANONICAL_FORMAT).ok()
}
