//! Timestamp formatting utilities
//!
//! Provides the formats available for the `"ts"` builtin. The default renders
//! local time as `2006-01-02 15:04:05.000000`.

use super::value::Value;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Pattern used by the `Local` and `Utc` formats, and as the fallback for an
/// invalid custom pattern
pub const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use funclog::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Utc.format(&instant), "2025-01-08 10:30:45.000000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// Local time with microseconds: `2025-01-08 10:30:45.123456`
    #[default]
    Local,

    /// UTC with microseconds: `2025-01-08 10:30:45.123456`
    Utc,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in microseconds, logged as a number: `1736332245123456`
    UnixMicros,

    /// Custom strftime pattern, in local time
    ///
    /// ```
    /// use funclog::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// assert!(format.is_valid());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Local => {
                format_pattern(&datetime.with_timezone(&Local), DEFAULT_PATTERN)
            }
            TimestampFormat::Utc => format_pattern(datetime, DEFAULT_PATTERN),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(pattern) => {
                let local = datetime.with_timezone(&Local);
                try_format_pattern(&local, pattern)
                    .unwrap_or_else(|| format_pattern(&local, DEFAULT_PATTERN))
            }
        }
    }

    /// The `"ts"` value for `datetime`: a number for numeric formats, a
    /// string otherwise
    #[must_use]
    pub fn to_value(&self, datetime: &DateTime<Utc>) -> Value {
        match self {
            TimestampFormat::UnixMicros => Value::Int(datetime.timestamp_micros()),
            _ => Value::String(self.format(datetime)),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMicros)
    }

    /// Whether a custom pattern parses as strftime
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(pattern) => is_valid_pattern(pattern),
            _ => true,
        }
    }

    /// Get a description of this format
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            TimestampFormat::Local => "Local time with microseconds (2025-01-08 10:30:45.123456)",
            TimestampFormat::Utc => "UTC with microseconds (2025-01-08 10:30:45.123456)",
            TimestampFormat::Rfc3339 => "RFC 3339 with timezone (2025-01-08T10:30:45+00:00)",
            TimestampFormat::UnixMicros => "Unix timestamp in microseconds (1736332245123456)",
            TimestampFormat::Custom(_) => "Custom strftime format",
        }
    }
}

fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn try_format_pattern<Tz>(datetime: &DateTime<Tz>, pattern: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if !is_valid_pattern(pattern) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", datetime.format(pattern)).ok()?;
    Some(out)
}

fn format_pattern<Tz>(datetime: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    try_format_pattern(datetime, pattern).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_utc_format() {
        let result = TimestampFormat::Utc.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08 10:30:45.123456");
    }

    #[test]
    fn test_local_format_shape() {
        let result = TimestampFormat::Local.format(&fixed_datetime());
        let expected = fixed_datetime()
            .with_timezone(&Local)
            .format(DEFAULT_PATTERN)
            .to_string();
        assert_eq!(result, expected);
        assert!(result.ends_with(".123456"));
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_micros() {
        let format = TimestampFormat::UnixMicros;
        let parsed: i64 = format.format(&fixed_datetime()).parse().expect("valid unix micros");
        assert_eq!(parsed, 1_736_332_245_123_456);
        assert_eq!(format.to_value(&fixed_datetime()), Value::Int(1_736_332_245_123_456));
        assert!(format.is_numeric());
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d".to_string());
        let expected = fixed_datetime().with_timezone(&Local).format("%Y/%m/%d").to_string();
        assert_eq!(format.format(&fixed_datetime()), expected);
        assert!(matches!(format.to_value(&fixed_datetime()), Value::String(_)));
    }

    #[test]
    fn test_invalid_custom_falls_back() {
        let format = TimestampFormat::Custom("%Q broken".to_string());
        assert!(!format.is_valid());
        assert_eq!(
            format.format(&fixed_datetime()),
            TimestampFormat::Local.format(&fixed_datetime())
        );
    }

    #[test]
    fn test_default_is_local() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Local);
        assert!(TimestampFormat::default().is_valid());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TimestampFormat::UnixMicros).expect("serialize");
        assert_eq!(json, "\"unix_micros\"");

        let format: TimestampFormat =
            serde_json::from_str(r#"{"custom":"%Y-%m-%d"}"#).expect("deserialize custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
