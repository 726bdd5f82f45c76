//! File appender implementation

use crate::core::{Appender, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends lines to a file, one per line, as `prefix line`.
pub struct FileAppender {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    auto_flush: bool,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open {} for append", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
            auto_flush: false,
        })
    }

    /// Flush after every line instead of when the buffer fills
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use funclog::appenders::FileAppender;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_auto_flush(true);
    /// ```
    #[must_use]
    pub fn with_auto_flush(mut self, auto_flush: bool) -> Self {
        self.auto_flush = auto_flush;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn write(&self, prefix: &str, line: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        if prefix.is_empty() {
            writeln!(writer, "{}", line)?;
        } else {
            writeln!(writer, "{} {}", prefix, line)?;
        }
        if self.auto_flush {
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let appender = FileAppender::new(&path).unwrap();

        appender.write("svc", r#""level"=0 "msg"="one""#).unwrap();
        appender.write("", r#"{"logger":"","msg":"two"}"#).unwrap();
        appender.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "svc \"level\"=0 \"msg\"=\"one\"\n{\"logger\":\"\",\"msg\":\"two\"}\n"
        );
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let appender = FileAppender::new(&path).unwrap().with_auto_flush(true);
        appender.write("", "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing\nnew\n");
        assert_eq!(appender.path(), path.as_path());
    }

    #[test]
    fn test_open_failure_has_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");
        let err = FileAppender::new(&path).err().unwrap();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
    }
}
