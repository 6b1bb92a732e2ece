//! Month normalization: spreadsheet serials and date strings to `Mon-YYYY`.
//!
//! Serials are read with UTC calendar fields. For strings, zero-padded ISO
//! date-only forms (`2024-01-15`, `2024-01`) mean UTC midnight, zoned
//! timestamps carry their own offset, and every other form is a local
//! wall-clock time. All parsed strings are then read with
//! local calendar fields, so west of UTC `2024-01-01` lands in `Dec-2023`
//! while serial `45292` is always `Jan-2024`. Both behaviours are kept as-is.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mailpulse_models::{format_month_label, UNKNOWN_MONTH};

use super::row::RawValue;

/// Days between the spreadsheet epoch (serial 0, 1899-12-30) and 1970-01-01.
pub const SERIAL_UNIX_EPOCH_OFFSET: f64 = 25569.0;

/// Serial of 9999-12-31, the last date a spreadsheet can hold.
pub const MAX_SERIAL: f64 = 2958465.0;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Unpadded ISO dates (`2024-1-5`) are local, unlike the padded form.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d-%B-%Y",
    "%a %B %d %Y",
    "%a, %d %B %Y",
];

// Tried with a leading day of `1` so that month-only labels resolve to a date.
// Must run before `DATE_FORMATS`: chrono lets `%B %d %Y` split `Jan 2024`
// into day 20 of year 24.
const MONTH_YEAR_FORMATS: &[&str] = &["%B-%Y", "%B %Y", "%B, %Y", "%Y/%m", "%m/%Y"];

/// Maps a raw month cell to a canonical label.
///
/// Numbers are spreadsheet serials, strings are parsed as dates and passed
/// through unchanged when they are not dates, and anything else is `Unknown`.
pub fn normalize_month(value: &RawValue) -> String {
    match value {
        RawValue::Number(serial) => serial_to_month(*serial),
        RawValue::Text(text) if !text.trim().is_empty() => match parse_date(text.trim()) {
            Some(date) => label(date),
            None => text.clone(),
        },
        _ => UNKNOWN_MONTH.to_string(),
    }
}

/// Converts a spreadsheet serial (1900 date system) to a `Mon-YYYY` label.
pub fn serial_to_month(serial: f64) -> String {
    serial_to_date(serial)
        .map(label)
        .unwrap_or_else(|| UNKNOWN_MONTH.to_string())
}

/// Calendar date of a serial, read in UTC. `None` below 1 or past 9999-12-31.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial >= MAX_SERIAL + 1.0 {
        return None;
    }

    let days = (serial - SERIAL_UNIX_EPOCH_OFFSET).floor() as i64;
    NaiveDate::from_ymd_opt(1970, 1, 1)?.checked_add_signed(Duration::days(days))
}

/// Best-effort general date parse, yielding the local calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.with_timezone(&Local).date_naive());
    }
    if let Ok(date_time) = DateTime::parse_from_rfc2822(text) {
        return Some(date_time.with_timezone(&Local).date_naive());
    }

    if let Some(date) = parse_iso_date_only(text) {
        return utc_midnight_in_local(date);
    }

    if let Some(date_time) = DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(date_time.date());
    }

    if let Some(date) = parse_with_first_day(text, MONTH_YEAR_FORMATS) {
        return Some(date);
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// `YYYY-MM-DD` or `YYYY-MM`, with zero-padded fields.
fn parse_iso_date_only(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let padded = |len: usize| {
        bytes.len() == len
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
    };

    if padded(10) {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
    } else if padded(7) {
        parse_with_first_day(text, &["%Y-%m"])
    } else {
        None
    }
}

fn parse_with_first_day(text: &str, formats: &[&str]) -> Option<NaiveDate> {
    let with_day = format!("1 {}", text);
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&with_day, &format!("%d {}", format)).ok())
}

fn utc_midnight_in_local(date: NaiveDate) -> Option<NaiveDate> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(&Local).date_naive())
}

fn label(date: NaiveDate) -> String {
    format_month_label(date.year(), date.month()).unwrap_or_else(|| UNKNOWN_MONTH.to_string())
}
