//! Lenient deserializers for digital inspection form fields.
//!
//! Form front-ends send whatever their inputs hold: numbers as strings,
//! empty strings for untouched fields, `"10:30"` for times. Use these with
//! `#[serde(default, deserialize_with = "...")]` on `Option` fields.

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Number or numeric string; `null` and `""` are absent.
pub fn parse_f32(value: &Value) -> Result<Option<f32>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(|f| Some(f as f32))
            .ok_or_else(|| format!("{n} is not a valid number")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|_| format!("'{s}' is not a valid number")),
        other => Err(format!("expected a number, got {other}")),
    }
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`; `null` and `""` are absent.
pub fn parse_time(value: &Value) -> Result<Option<NaiveTime>, String> {
    let Some(s) = non_empty_str(value)? else {
        return Ok(None);
    };
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .map(Some)
        .ok_or_else(|| format!("'{s}' is not a valid time (expected HH:MM)"))
}

/// `YYYY-MM-DD` or `DD/MM/YYYY`; a trailing `T...` time part is ignored.
pub fn parse_date(value: &Value) -> Result<Option<NaiveDate>, String> {
    let Some(s) = non_empty_str(value)? else {
        return Ok(None);
    };
    let day = s.split_once('T').map_or(s, |(d, _)| d);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
        .map(Some)
        .ok_or_else(|| format!("'{s}' is not a valid date (expected YYYY-MM-DD)"))
}

/// Boolean or `"true"`/`"false"` (any case); `null` and `""` are absent.
pub fn parse_bool(value: &Value) -> Result<Option<bool>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Some(true)),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(Some(false)),
        other => Err(format!("expected a boolean, got {other}")),
    }
}

fn non_empty_str(value: &Value) -> Result<Option<&str>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim())),
        other => Err(format!("expected a string, got {other}")),
    }
}

fn lenient<'de, D, T>(
    deserializer: D,
    parse: fn(&Value) -> Result<Option<T>, String>,
) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null);
    parse(&value).map_err(D::Error::custom)
}

pub fn lenient_f32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f32>, D::Error> {
    lenient(d, parse_f32)
}

pub fn lenient_time<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
    lenient(d, parse_time)
}

pub fn lenient_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    lenient(d, parse_date)
}

pub fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    lenient(d, parse_bool)
}
