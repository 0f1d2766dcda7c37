//! Date and time conversion between the console and the store.
//!
//! The store keeps hike dates as `YYYY-MM-DD` and observation times as
//! `YYYY-MM-DD HH:MM`, both of which sort lexically in calendar order. People
//! type and read `DD/MM/YYYY`, so every conversion between the two happens here
//! and nowhere else.

use crate::libs::error::{HikeError, Result};
use chrono::{NaiveDate, NaiveDateTime};

/// Hike dates as shown to and typed by the user.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// Hike dates as persisted.
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";
/// Observation times as shown to the user.
pub const DISPLAY_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";
/// Observation times as persisted.
pub const STORAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn to_storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

pub fn to_storage_time(time: NaiveDateTime) -> String {
    time.format(STORAGE_TIME_FORMAT).to_string()
}

/// Parses a date typed by the user. Both `DD/MM/YYYY` and `YYYY-MM-DD` are accepted.
pub fn parse_input_date(input: &str) -> Result<NaiveDate> {
    parse_stored_date(input).ok_or_else(|| HikeError::ValidationFailed(format!("'{}' is not a valid date, expected DD/MM/YYYY", input.trim())))
}

/// Parses an observation time typed by the user.
///
/// Accepts `yyyy-MM-dd HH:mm` and `dd/MM/yyyy HH:mm`, the two shapes older
/// versions produced, as well as the ISO `T` separator.
pub fn parse_input_time(input: &str) -> Result<NaiveDateTime> {
    parse_stored_time(input)
        .ok_or_else(|| HikeError::ValidationFailed(format!("'{}' is not a valid time, expected YYYY-MM-DD HH:MM", input.trim())))
}

/// Reads a persisted hike date, tolerating legacy `DD/MM/YYYY` rows.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, STORAGE_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, DISPLAY_DATE_FORMAT))
        .ok()
}

/// Reads a persisted observation time, tolerating legacy shapes.
pub fn parse_stored_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    [STORAGE_TIME_FORMAT, "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", DISPLAY_TIME_FORMAT]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Rewrites any readable hike date into `YYYY-MM-DD`.
///
/// Text that cannot be read as a date is returned unchanged, so rows written
/// by older versions still round-trip.
///
/// # Examples
///
/// ```rust
/// use hikelog::libs::formatter::canonical_date;
///
/// assert_eq!(canonical_date("15/01/2024"), "2024-01-15");
/// assert_eq!(canonical_date("2024-01-15"), "2024-01-15");
/// assert_eq!(canonical_date("someday"), "someday");
/// ```
pub fn canonical_date(value: &str) -> String {
    match parse_stored_date(value) {
        Some(date) => to_storage_date(date),
        None => value.to_string(),
    }
}

/// Rewrites any readable observation time into `YYYY-MM-DD HH:MM`; unreadable text is kept as-is.
pub fn canonical_time(value: &str) -> String {
    match parse_stored_time(value) {
        Some(time) => to_storage_time(time),
        None => value.to_string(),
    }
}

/// Renders a persisted date for display; unparseable values are shown as-is.
pub fn format_display_date(stored: &str) -> String {
    match parse_stored_date(stored) {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => stored.to_string(),
    }
}

/// Renders a persisted observation time for display; unparseable values are shown as-is.
pub fn format_display_time(stored: &str) -> String {
    match parse_stored_time(stored) {
        Some(time) => time.format(DISPLAY_TIME_FORMAT).to_string(),
        None => stored.to_string(),
    }
}

pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Renders a group size, where `0` means the size is not tracked.
pub fn format_group_size(size: u32) -> String {
    match size {
        0 => "-".to_string(),
        n => n.to_string(),
    }
}
