//! Form field validators
//!
//! Every validator is total: invalid input yields `false`, never a panic
//! or an error. Forms combine these checks into field-level messages.

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::dates::parse_date;

/// Inclusive bounds for a patient's age in years.
pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 150;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
    static ref DATE_FORMAT_RE: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles");
}

/// Returns `true` if the value is non-blank after trimming.
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Checks the `local@domain.tld` shape: no whitespace, exactly one `@`,
/// and at least one dot after it.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks the minimum password length.
///
/// # Arguments
///
/// * `password` - The raw password field, untrimmed
///
/// # Returns
///
/// `true` when the password holds at least [`MIN_PASSWORD_LEN`] Unicode
/// scalar values. An emoji counts once.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Parses the leading integer of a form input.
///
/// Leading whitespace is skipped and an optional sign is accepted; parsing
/// stops at the first non-digit, so `"42abc"` and `"42.9"` both yield 42.
/// Returns `None` when no digit follows, or the digits overflow an `i64`.
pub fn parse_age(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Validates the age field of the prescription form.
///
/// # Arguments
///
/// * `age` - The raw form input, read the way [`parse_age`] reads it
///
/// # Returns
///
/// `true` when the input holds an integer within `[0, 150]`.
pub fn validate_age(age: &str) -> bool {
    matches!(parse_age(age), Some(value) if (MIN_AGE..=MAX_AGE).contains(&value))
}

/// Rejects prescription dates after the end of today (local time).
///
/// # Arguments
///
/// * `date` - A `YYYY-MM-DD` date or a timestamp accepted by [`parse_date`]
///
/// # Returns
///
/// `false` for future dates, and for empty or unparseable input.
pub fn validate_prescription_date(date: &str) -> bool {
    validate_prescription_date_at(date, Local::now().naive_local())
}

/// Same as [`validate_prescription_date`] with an explicit local clock.
///
/// The day boundary is 23:59:59.999 of `now`'s calendar day. A bare date is
/// taken as local midnight, so today's date always passes.
pub fn validate_prescription_date_at(date: &str, now: NaiveDateTime) -> bool {
    let Some(selected) = parse_local_datetime(date) else {
        return false;
    };

    let end_of_today = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .map(|time| now.date().and_time(time))
        .unwrap_or(now);
    selected <= end_of_today
}

/// Checks the `YYYY-MM-DD` shape of an optional date field.
///
/// An empty value passes: the field is optional. Only the shape is checked,
/// not whether the calendar date exists.
pub fn validate_date_format(date: &str) -> bool {
    date.is_empty() || DATE_FORMAT_RE.is_match(date)
}

fn parse_local_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Local).naive_local());
    }

    parse_date(input).and_then(|date| date.and_hms_opt(0, 0, 0))
}
