//! Calendar helpers
//!
//! Formatting for date inputs (`YYYY-MM-DD`) and for display (`D Mon YYYY`),
//! plus month boundaries used as the default range of list and report views.
//! Functions taking raw strings return an empty string on empty or invalid
//! input instead of failing.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::models::DateRange;

/// Formats a date for date inputs and query parameters.
///
/// # Arguments
///
/// * `date` - The calendar date to format
///
/// # Returns
///
/// The date as zero-padded `YYYY-MM-DD`, e.g. `2024-01-05`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalizes a date string to `YYYY-MM-DD`, or `""` if it cannot be parsed.
pub fn format_date_input(input: &str) -> String {
    parse_date(input).map(format_date).unwrap_or_default()
}

/// Formats a date as `D Mon YYYY`, e.g. `3 Jan 2024`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// String variant of [`display_date`].
///
/// # Arguments
///
/// * `input` - Any date string [`parse_date`] accepts
///
/// # Returns
///
/// The date as `D Mon YYYY`, or `""` for empty or invalid input.
pub fn format_display_date(input: &str) -> String {
    parse_date(input).map(display_date).unwrap_or_default()
}

/// Parses the calendar date of `YYYY-MM-DD`, a local `YYYY-MM-DDTHH:MM:SS`
/// timestamp, or an RFC 3339 timestamp (converted to local time).
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|timestamp| timestamp.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|timestamp| timestamp.with_timezone(&Local).date_naive())
        })
}

/// The current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(date)
}

/// First day of the current local month as `YYYY-MM-DD`.
pub fn get_first_day_of_month() -> String {
    format_date(first_day_of_month(today()))
}

/// Last day of the current local month as `YYYY-MM-DD`.
pub fn get_last_day_of_month() -> String {
    format_date(last_day_of_month(today()))
}

/// The inclusive range covering the month of `date`.
pub fn month_range(date: NaiveDate) -> DateRange {
    DateRange::new(first_day_of_month(date), last_day_of_month(date))
}

/// Default range of the list and report views.
pub fn current_month_range() -> DateRange {
    month_range(today())
}
