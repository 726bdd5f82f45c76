//! In-memory appender
//!
//! Keeps every `(prefix, line)` record. Clones share the same buffer, so a
//! test can hand one clone to a logger and inspect another.

use crate::core::{Appender, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct MemoryAppender {
    records: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured `(prefix, line)` pairs, oldest first
    pub fn records(&self) -> Vec<(String, String)> {
        self.records.lock().clone()
    }

    /// Captured lines without their prefixes
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn write(&self, prefix: &str, line: &str) -> Result<()> {
        self.records
            .lock()
            .push((prefix.to_string(), line.to_string()));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_records() {
        let memory = MemoryAppender::new();
        let writer = memory.clone();
        writer.write("p", "one").unwrap();
        writer.write("", "two").unwrap();

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.lines(), vec!["one".to_string(), "two".to_string()]);
        assert_eq!(memory.records()[0], ("p".to_string(), "one".to_string()));

        memory.clear();
        assert!(writer.is_empty());
    }
}
