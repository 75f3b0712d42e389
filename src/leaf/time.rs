//! Time span and timestamp converters.

use std::time::Duration;

use super::prepare;
use crate::descriptor::TypeDescriptor;
use crate::error::{ConversionError, Result};
use crate::registry::{ConverterRegistry, LeafConverter};
use crate::value::Value;

/// Converts to [`Duration`].
///
/// - integers: milliseconds
/// - floats: seconds
/// - strings: ISO-8601 (`PT1H30M`, `P2DT0.5S`, `P1W`) or integer milliseconds
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationConverter;

impl LeafConverter for DurationConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::Duration(d) => Some(*d),
            Value::Int(ms) => u64::try_from(*ms).ok().map(Duration::from_millis),
            Value::Float(secs) => Duration::try_from_secs_f64(*secs).ok(),
            Value::Str(s) => {
                let s = prepare(s, registry);
                parse_iso_duration(s).or_else(|| s.parse::<u64>().ok().map(Duration::from_millis))
            }
            _ => None,
        };
        parsed
            .map(Value::Duration)
            .ok_or_else(|| ConversionError::conversion(target, &value, "not a duration"))
    }
}

/// Parse an ISO-8601 duration.
///
/// Supports weeks and days before `T`, hours, minutes and (fractional)
/// seconds after it. Years and months are rejected because their length
/// depends on a calendar.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use convert_kit::leaf::parse_iso_duration;
///
/// assert_eq!(parse_iso_duration("PT15M"), Some(Duration::from_secs(900)));
/// assert_eq!(parse_iso_duration("P1DT1H"), Some(Duration::from_secs(90_000)));
/// assert_eq!(parse_iso_duration("P1Y"), None);
/// ```
pub fn parse_iso_duration(s: &str) -> Option<Duration> {
    let rest = s.strip_prefix(['P', 'p'])?;
    let (date, time) = match rest.split_once(['T', 't']) {
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };
    if time.is_some_and(str::is_empty) {
        return None;
    }

    let mut secs = 0.0;
    let mut seen = false;
    for (n, unit) in components(date)? {
        secs += n * match unit {
            'W' => 604_800.0,
            'D' => 86_400.0,
            _ => return None,
        };
        seen = true;
    }
    for (n, unit) in components(time.unwrap_or(""))? {
        secs += n * match unit {
            'H' => 3_600.0,
            'M' => 60.0,
            'S' => 1.0,
            _ => return None,
        };
        seen = true;
    }

    if !seen {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

/// Split `12H30M` into `[(12, 'H'), (30, 'M')]`.
fn components(s: &str) -> Option<Vec<(f64, char)>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_alphabetic() {
            let n = s[start..i].parse::<f64>().ok()?;
            out.push((n, c.to_ascii_uppercase()));
            start = i + 1;
        }
    }
    if start != s.len() {
        return None;
    }
    Some(out)
}

/// Converts to a timestamp with offset.
///
/// - integers: milliseconds since the Unix epoch (UTC)
/// - strings: RFC 3339, `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (UTC),
///   or `YYYY-MM-DD` (midnight UTC)
#[cfg(feature = "time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeConverter;

#[cfg(feature = "time")]
impl LeafConverter for DateTimeConverter {
    fn convert(
        &self,
        target: &TypeDescriptor,
        value: Value,
        registry: &ConverterRegistry,
    ) -> Result<Value> {
        let parsed = match &value {
            Value::Null => return Ok(Value::Null),
            Value::Str(s) if s.trim().is_empty() => return Ok(Value::Null),
            Value::DateTime(t) => Some(*t),
            Value::Int(ms) => {
                chrono::DateTime::from_timestamp_millis(*ms).map(|t| t.fixed_offset())
            }
            Value::Str(s) => parse_date_time(prepare(s, registry)),
            _ => None,
        };
        parsed
            .map(Value::DateTime)
            .ok_or_else(|| ConversionError::conversion(target, &value, "not a date-time"))
    }
}

/// Parse a timestamp in one of the formats accepted by [`DateTimeConverter`].
#[cfg(feature = "time")]
pub fn parse_date_time(s: &str) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    use chrono::{NaiveDate, NaiveDateTime};

    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(t);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
