use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::RowError;

/// Layouts tried in order against the trimmed text. The first full match wins.
const PATTERNS: &[Pattern] = &[
    Pattern::DateTime("%Y-%m-%d %H:%M:%S"),
    Pattern::DateTime("%Y/%m/%d %H:%M:%S"),
    Pattern::Date("%Y-%m-%d"),
    Pattern::Date("%Y/%m/%d"),
    Pattern::DateTime("%m/%d/%Y %H:%M:%S"),
    Pattern::Date("%m/%d/%Y"),
];

/// ISO-8601 shapes accepted once `T` and a trailing `Z` are normalized away.
const ISO_FALLBACKS: &[Pattern] = &[
    Pattern::DateTime("%Y-%m-%d %H:%M:%S%.f"),
    Pattern::DateTime("%Y-%m-%d %H:%M"),
    Pattern::Offset("%Y-%m-%d %H:%M:%S%.f%:z"),
    Pattern::Offset("%Y-%m-%d %H:%M%:z"),
    Pattern::Date("%Y-%m-%d"),
    Pattern::Date("%Y%m%d"),
];

#[derive(Debug, Clone, Copy)]
enum Pattern {
    DateTime(&'static str),
    Date(&'static str),
    /// Carries a UTC offset, which is dropped. The wall-clock time is kept.
    Offset(&'static str),
}

/// chrono's `%Y` also takes one to three digits; exports always carry four.
const YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

impl Pattern {
    fn parse(self, s: &str) -> Option<NaiveDateTime> {
        let parsed = match self {
            Pattern::DateTime(fmt) => NaiveDateTime::parse_from_str(s, fmt).ok(),
            Pattern::Date(fmt) => NaiveDate::parse_from_str(s, fmt)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            Pattern::Offset(fmt) => DateTime::parse_from_str(s, fmt)
                .ok()
                .map(|dt| dt.naive_local()),
        };
        parsed.filter(|dt| YEARS.contains(&dt.year()))
    }
}

/// Turns export timestamp text into a naive date-time.
///
/// No timezone is applied; the date and time are taken at face value.
pub fn normalize_timestamp(text: &str) -> Result<NaiveDateTime, RowError> {
    let trimmed = text.trim();

    if let Some(parsed) = PATTERNS.iter().find_map(|p| p.parse(trimmed)) {
        return Ok(parsed);
    }

    let iso = trimmed.replace('T', " ");
    let iso = iso.strip_suffix('Z').unwrap_or(&iso);

    ISO_FALLBACKS
        .iter()
        .find_map(|p| p.parse(iso))
        .ok_or_else(|| RowError::MalformedTimestamp(text.to_string()))
}
