//! Output format configuration for log lines
//!
//! Provides the two line layouts:
//! - KeyValue: `"key"="value"` pairs separated by spaces (default)
//! - Json: a single JSON object per line

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Space-separated key-value pairs (default)
    ///
    /// Example: `"level"=0 "msg"="Request processed" "status"=200`
    #[default]
    KeyValue,

    /// JSON object for machine processing
    ///
    /// Example: `{"logger":"http","level":0,"msg":"Request processed","status":200}`
    Json,
}

impl OutputFormat {
    /// Separator written between two pairs
    #[must_use]
    pub fn pair_separator(&self) -> u8 {
        match self {
            OutputFormat::KeyValue => b' ',
            OutputFormat::Json => b',',
        }
    }

    /// Separator written between a key and its value
    #[must_use]
    pub fn key_separator(&self) -> u8 {
        match self {
            OutputFormat::KeyValue => b'=',
            OutputFormat::Json => b':',
        }
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::KeyValue => "key_value",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "key_value" | "keyvalue" | "kv" | "text" => Ok(OutputFormat::KeyValue),
            "json" => Ok(OutputFormat::Json),
            other => Err(LoggerError::config(
                "OutputFormat",
                format!("unknown output format '{}'", other),
            )),
        }
    }
}
