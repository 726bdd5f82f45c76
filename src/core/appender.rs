//! Appender trait for log output destinations
//!
//! An appender is a ready-made write callback. [`into_write_fn`] adapts one
//! into the [`WriteFn`] a [`FuncSink`](super::sink::FuncSink) expects. Write
//! failures and panics inside an appender are reported on stderr and never
//! reach the code that logged.

use super::error::Result;
use super::sink::WriteFn;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub trait Appender: Send + Sync {
    /// Write one finished line. `prefix` is empty for JSON lines.
    fn write(&self, prefix: &str, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Adapt an appender into a write callback.
pub fn into_write_fn(appender: Arc<dyn Appender>) -> WriteFn {
    Arc::new(move |prefix: &str, line: &str| {
        let result = panic::catch_unwind(AssertUnwindSafe(|| appender.write(prefix, line)));
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}. The line was dropped.",
                    appender.name(),
                    panic_message(panic_info.as_ref())
                );
            }
        }
    })
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Failing;

    impl Appender for Failing {
        fn write(&self, _prefix: &str, _line: &str) -> Result<()> {
            Err(LoggerError::config("Failing", "always fails"))
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Appender for Panicking {
        fn write(&self, _prefix: &str, _line: &str) -> Result<()> {
            panic!("appender exploded");
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    struct Counting(AtomicUsize);

    impl Appender for Counting {
        fn write(&self, _prefix: &str, _line: &str) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_errors_are_contained() {
        let write = into_write_fn(Arc::new(Failing));
        write("prefix", "line");
    }

    #[test]
    fn test_panics_are_contained() {
        let write = into_write_fn(Arc::new(Panicking));
        write("", "line");
        write("", "again");
    }

    #[test]
    fn test_one_write_per_call() {
        let counting = Arc::new(Counting(AtomicUsize::new(0)));
        let write = into_write_fn(counting.clone());
        write("a", "1");
        write("b", "2");
        assert_eq!(counting.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "Unknown panic");
    }
}
