//! Formatter configuration
//!
//! [`Options`] controls which builtins appear on every line and which info
//! levels pass the verbosity gate. It can be built in code with the `with_*`
//! methods or parsed from JSON.

use super::error::{LoggerError, Result};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kinds of lines get a `"caller"` builtin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageClass {
    /// No line logs its caller
    #[default]
    None,
    /// Info and error lines
    All,
    /// Info lines only
    Info,
    /// Error lines only
    Error,
}

impl MessageClass {
    #[must_use]
    pub fn includes_info(&self) -> bool {
        matches!(self, MessageClass::All | MessageClass::Info)
    }

    #[must_use]
    pub fn includes_error(&self) -> bool {
        matches!(self, MessageClass::All | MessageClass::Error)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageClass::None => "none",
            MessageClass::All => "all",
            MessageClass::Info => "info",
            MessageClass::Error => "error",
        }
    }
}

impl fmt::Display for MessageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageClass {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(MessageClass::None),
            "all" => Ok(MessageClass::All),
            "info" => Ok(MessageClass::Info),
            "error" => Ok(MessageClass::Error),
            other => Err(LoggerError::config(
                "MessageClass",
                format!("unknown class '{}'", other),
            )),
        }
    }
}

/// Options for a [`Formatter`](super::formatter::Formatter)
///
/// # Examples
///
/// ```
/// use funclog::{MessageClass, Options};
///
/// let options = Options::new()
///     .with_log_caller(MessageClass::Error)
///     .with_verbosity(2);
/// assert!(options.validate().is_ok());
///
/// let parsed = Options::from_json(r#"{"log_caller":"error","verbosity":2}"#).unwrap();
/// assert_eq!(parsed, options);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Lines that carry a `"caller"` builtin
    pub log_caller: MessageClass,
    /// Whether lines carry a `"ts"` builtin
    pub log_timestamp: bool,
    /// Highest info level that is written
    pub verbosity: i32,
    /// Format of the `"ts"` builtin
    pub timestamp_format: TimestampFormat,
}

impl Options {
    /// Create options with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log_caller(mut self, class: MessageClass) -> Self {
        self.log_caller = class;
        self
    }

    #[must_use]
    pub fn with_log_timestamp(mut self, enabled: bool) -> Self {
        self.log_timestamp = enabled;
        self
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Use a strftime pattern for the `"ts"` builtin
    #[must_use]
    pub fn with_custom_timestamp(mut self, pattern: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(pattern.to_string());
        self
    }

    /// Parse options from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject settings that would silently misbehave at log time
    pub fn validate(&self) -> Result<()> {
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "Options",
                format!("invalid timestamp pattern: {:?}", self.timestamp_format),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.log_caller, MessageClass::None);
        assert!(!options.log_timestamp);
        assert_eq!(options.verbosity, 0);
        assert_eq!(options.timestamp_format, TimestampFormat::Local);
    }

    #[test]
    fn test_builder_pattern() {
        let options = Options::new()
            .with_log_caller(MessageClass::All)
            .with_log_timestamp(true)
            .with_verbosity(4)
            .with_timestamp_format(TimestampFormat::UnixMicros);

        assert_eq!(options.log_caller, MessageClass::All);
        assert!(options.log_timestamp);
        assert_eq!(options.verbosity, 4);
        assert_eq!(options.timestamp_format, TimestampFormat::UnixMicros);
    }

    #[test]
    fn test_message_class_membership() {
        assert!(MessageClass::All.includes_info());
        assert!(MessageClass::All.includes_error());
        assert!(MessageClass::Info.includes_info());
        assert!(!MessageClass::Info.includes_error());
        assert!(!MessageClass::Error.includes_info());
        assert!(!MessageClass::None.includes_error());
    }

    #[test]
    fn test_message_class_from_str() {
        assert_eq!("ALL".parse::<MessageClass>().unwrap(), MessageClass::All);
        assert_eq!("error".parse::<MessageClass>().unwrap(), MessageClass::Error);
        let err = "sometimes".parse::<MessageClass>().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_from_json() {
        let options =
            Options::from_json(r#"{"log_timestamp":true,"timestamp_format":"utc"}"#).unwrap();
        assert!(options.log_timestamp);
        assert_eq!(options.timestamp_format, TimestampFormat::Utc);
        assert_eq!(options.log_caller, MessageClass::None);

        assert!(matches!(Options::from_json("{not json"), Err(LoggerError::JsonError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let options = Options::new().with_custom_timestamp("%Q");
        assert!(options.validate().is_err());
        assert!(Options::from_json(r#"{"timestamp_format":{"custom":"%Q"}}"#).is_err());
        assert!(Options::new().with_custom_timestamp("%H:%M").validate().is_ok());
    }
}
