//! Console appender implementation

use crate::core::{Appender, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Writes lines to stdout as `prefix line`, or just `line` when the prefix is
/// empty.
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn format_line(&self, prefix: &str, line: &str) -> String {
        if prefix.is_empty() {
            return line.to_string();
        }
        format!("{} {}", self.paint_prefix(prefix), line)
    }

    #[cfg(feature = "console")]
    fn paint_prefix(&self, prefix: &str) -> String {
        if self.use_colors {
            prefix.cyan().bold().to_string()
        } else {
            prefix.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint_prefix(&self, prefix: &str) -> String {
        let _ = self.use_colors;
        prefix.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn write(&self, prefix: &str, line: &str) -> Result<()> {
        let output = self.format_line(prefix, line);
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", output)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatting() {
        let appender = ConsoleAppender::with_colors(false);
        assert_eq!(appender.format_line("", r#""msg"="m""#), r#""msg"="m""#);
        assert_eq!(appender.format_line("svc", r#""msg"="m""#), r#"svc "msg"="m""#);
    }

    #[test]
    fn test_write_succeeds() {
        let appender = ConsoleAppender::new();
        assert!(appender.write("test", r#""level"=0 "msg"="console""#).is_ok());
        assert!(appender.flush().is_ok());
        assert_eq!(appender.name(), "console");
    }
}
