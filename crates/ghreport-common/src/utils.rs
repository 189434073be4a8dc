//! Shared utility functions: date conversion and text escaping.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use crate::error::{GhReportError, Result};
use crate::types::{DatedRecord, SeriesRecord};

/// Timestamp format of the `date` field served by the GHData API,
/// e.g. `2020-01-01T00:00:00.000Z`.
pub const API_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parses `field` of every record with `format`, keeping the records in order.
///
/// A record whose date is missing, not a string, or not in `format` fails the
/// whole conversion; the error names the offending row.
pub fn convert_dates(records: Vec<SeriesRecord>, field: &str, format: &str) -> Result<Vec<DatedRecord>> {
    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let raw = record.get_str(field).ok_or_else(|| {
                GhReportError::render(format!("row {row}: missing date field '{field}'"))
            })?;
            let date = parse_timestamp(raw, format).map_err(|e| {
                GhReportError::render_with_source(format!("row {row}: cannot parse date '{raw}'"), e)
            })?;
            Ok(DatedRecord { date, record })
        })
        .collect::<Result<Vec<_>>>()
        .inspect(|dated| debug!(records = dated.len(), field, "Converted dates"))
}

/// Parses a UTC timestamp with a `chrono` format string.
pub fn parse_timestamp(raw: &str, format: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, format).map(|naive| Utc.from_utc_datetime(&naive))
}

/// Formats a timestamp as a calendar date for axis labels.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Parses `#rgb` or `#rrggbb` into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            // #abc is shorthand for #aabbcc
            let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => None,
    }
}

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
