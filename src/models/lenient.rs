//! Permissive deserializers for the backend's loosely typed JSON.
//!
//! The backend stores whatever the client sent: amounts arrive as numbers
//! or numeric strings, dates in several ISO shapes, ids as numbers or
//! strings. These helpers coerce on a best-effort basis and never fail on
//! a malformed value; a field that cannot be understood reads as zero or
//! as missing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Category;

/// Naive date-time layouts accepted after RFC 3339 fails.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Reads an `f64` out of a number or a numeric string.
///
/// Non-finite results count as unreadable.
fn number_from(value: &Value) -> Option<f64> {
    value
        .as_str()
        .map_or_else(|| value.as_f64(), |text| text.trim().parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
}

/// Reads an integer id out of a number or a numeric string.
fn integer_from(value: &Value) -> Option<i64> {
    value
        .as_str()
        .map_or_else(|| value.as_i64(), |text| text.trim().parse::<i64>().ok())
}

/// Parses a timestamp in any of the shapes the backend and clients emit.
///
/// Offsets are not normalized: `2024-03-31T23:30:00-05:00` stays on
/// March 31st.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.naive_local());
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Amount field: unreadable or missing values read as `0.0`.
pub(super) fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(number_from).unwrap_or(0.0))
}

/// Optional amount field: unreadable values read as `None`.
pub(super) fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(number_from))
}

/// Timestamp field: unparseable values read as `None`.
pub(super) fn timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => parse_timestamp(&text),
        Some(_) | None => None,
    })
}

/// Optional id field: accepts numbers and numeric strings.
pub(super) fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(integer_from).map(T::from))
}

/// Category field: anything that is not a known label is [`Category::Other`].
pub(super) fn category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => Category::from_label(&text),
        Some(_) | None => Category::Other,
    })
}
