//! Field validators for input validation
//!
//! Each validator inspects one untyped JSON value and returns a
//! human-readable message on failure. Messages are prefixed with the field's
//! display label so they can be surfaced to clients unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    /// Loose email shape: something@something.tld, no whitespace
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Date-only layout accepted for travel and schedule dates
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local date-time layouts accepted when no offset is given
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Validate that a value is a string that is not blank after trimming
pub fn validate_non_blank(value: &Value, label: &str) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(format!("{} must be a non-empty string", label)),
    }
}

/// Validate that a value is a number strictly greater than zero
pub fn validate_positive_number(value: &Value, label: &str) -> Result<(), String> {
    match value.as_f64() {
        Some(n) if n > 0.0 => Ok(()),
        _ => Err(format!("{} must be a positive number", label)),
    }
}

/// Validate that a value is a whole number no smaller than `min`
///
/// Counts are stored as `u32`, so anything above that range is rejected
/// here rather than failing later during deserialization.
pub fn validate_count(value: &Value, label: &str, min: u64) -> Result<(), String> {
    match value.as_u64() {
        Some(n) if n >= min && n <= u64::from(u32::MAX) => Ok(()),
        _ => Err(format!("{} must be an integer of at least {}", label, min)),
    }
}

/// Parse the date layouts clients send: `YYYY-MM-DD`, RFC 3339, or a local
/// date-time without offset. Offsets are normalized to UTC.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

/// Validate that a value is a string holding a parseable date
pub fn validate_date(value: &Value, label: &str) -> Result<NaiveDateTime, String> {
    value
        .as_str()
        .and_then(parse_date)
        .ok_or_else(|| format!("{} must be a valid date", label))
}

/// Validate that `start` falls strictly before `end`
pub fn validate_date_order(
    start: NaiveDateTime,
    end: NaiveDateTime,
    start_label: &str,
    end_label: &str,
) -> Result<(), String> {
    if start >= end {
        return Err(format!("{} must be after {}", end_label, start_label));
    }
    Ok(())
}

/// Validate that a value is one of a fixed set of strings (exact match)
pub fn validate_one_of(value: &Value, label: &str, allowed: &[&str]) -> Result<(), String> {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => Ok(()),
        _ => Err(format!("{} must be one of: {}", label, allowed.join(", "))),
    }
}

/// Validate email address shape after trimming
pub fn validate_email(value: &Value, label: &str) -> Result<(), String> {
    validate_non_blank(value, label)?;
    let trimmed = value.as_str().map(str::trim).unwrap_or_default();
    if !EMAIL_REGEX.is_match(trimmed) {
        return Err(format!("{} must be a valid email address", label));
    }
    Ok(())
}

/// Validate that a value is an array, optionally non-empty
pub fn validate_array<'a>(
    value: &'a Value,
    label: &str,
    allow_empty: bool,
) -> Result<&'a Vec<Value>, String> {
    match value.as_array() {
        Some(items) if items.is_empty() && !allow_empty => {
            Err(format!("{} must be a non-empty array", label))
        }
        Some(items) => Ok(items),
        None if allow_empty => Err(format!("{} must be an array", label)),
        None => Err(format!("{} must be a non-empty array", label)),
    }
}

/// Validate that every element of an array is a non-blank string
pub fn validate_string_items(items: &[Value], label: &str) -> Result<(), String> {
    let all_strings = items
        .iter()
        .all(|item| item.as_str().is_some_and(|s| !s.trim().is_empty()));
    if !all_strings {
        return Err(format!("{} must contain only non-empty strings", label));
    }
    Ok(())
}

/// Validate every element of an array of objects
///
/// `text_field` must be a non-blank string on each entry; `count_field`, when
/// given, must be an integer of at least 1 (itinerary day numbers).
pub fn validate_object_items(
    items: &[Value],
    label: &str,
    text_field: &str,
    count_field: Option<&str>,
) -> Result<(), String> {
    for (i, item) in items.iter().enumerate() {
        let Some(entry) = item.as_object() else {
            return Err(format!("{} entry {} must be an object", label, i));
        };

        let text_ok = entry
            .get(text_field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());
        if !text_ok {
            return Err(format!(
                "{} entry {} {} must be a non-empty string",
                label, i, text_field
            ));
        }

        if let Some(count_field) = count_field {
            let count_ok = entry
                .get(count_field)
                .and_then(Value::as_u64)
                .is_some_and(|n| n >= 1 && n <= u64::from(u32::MAX));
            if !count_ok {
                return Err(format!(
                    "{} entry {} {} must be an integer of at least 1",
                    label, i, count_field
                ));
            }
        }
    }
    Ok(())
}
