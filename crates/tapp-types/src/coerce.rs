//! Lax coercion of raw JSON scalars into typed field values.
//!
//! Integers accept JSON integers, floats without a fractional part and
//! numeric strings. Floats accept any number and numeric strings. Strings
//! accept only strings. Booleans are never numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::error::{ErrorKind, FieldError, Loc};

pub fn int(value: &Value, loc: &Loc) -> Result<i64, FieldError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                Some(f) if f.fract() != 0.0 => {
                    Err(FieldError::new(ErrorKind::IntFromFloat, loc.clone(), value.clone()))
                }
                _ => Err(FieldError::new(ErrorKind::IntType, loc.clone(), value.clone())),
            }
        }
        Value::String(s) => parse_int_str(s)
            .ok_or_else(|| FieldError::new(ErrorKind::IntParsing, loc.clone(), value.clone())),
        _ => Err(FieldError::new(ErrorKind::IntType, loc.clone(), value.clone())),
    }
}

/// Parse an integer from text as it arrives in a path or query string.
pub fn parse_int_str(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

pub fn float(value: &Value, loc: &Loc) -> Result<f64, FieldError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FieldError::new(ErrorKind::FloatType, loc.clone(), value.clone())),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(FieldError::new(ErrorKind::FloatParsing, loc.clone(), value.clone())),
        },
        _ => Err(FieldError::new(ErrorKind::FloatType, loc.clone(), value.clone())),
    }
}

pub fn string(value: &Value, loc: &Loc) -> Result<String, FieldError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| FieldError::new(ErrorKind::StringType, loc.clone(), value.clone()))
}

pub fn datetime(value: &Value, loc: &Loc) -> Result<NaiveDateTime, FieldError> {
    match value {
        Value::String(s) => parse_datetime_str(s)
            .ok_or_else(|| FieldError::new(ErrorKind::DatetimeParsing, loc.clone(), value.clone())),
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| FieldError::new(ErrorKind::DatetimeParsing, loc.clone(), value.clone())),
        _ => Err(FieldError::new(ErrorKind::DatetimeType, loc.clone(), value.clone())),
    }
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime_str(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.naive_utc());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
