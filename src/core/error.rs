//! Error types for the logger system
//!
//! The formatting core never returns these to the application: rendering is
//! total and degrades to escape tokens. Errors surface only at the edges,
//! i.e. configuration parsing and appender I/O.

use std::fmt;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A value could not be inspected; rendered as `"<unhandled-KIND>"`
    #[error("Unrenderable value ({kind}): {message}")]
    Unrenderable { kind: &'static str, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an unrenderable-value error
    pub fn unrenderable(kind: &'static str, message: impl Into<String>) -> Self {
        LoggerError::Unrenderable {
            kind,
            message: message.into(),
        }
    }

    /// The escape token that replaces a value which failed to render.
    pub fn escape_token(&self) -> String {
        match self {
            LoggerError::Unrenderable { kind, .. } => format!("<unhandled-{}>", kind),
            _ => "<unhandled-error>".to_string(),
        }
    }
}

impl serde::ser::Error for LoggerError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        LoggerError::unrenderable("custom", msg.to_string())
    }
}
