//! Logging macros for ergonomic key-value lists.
//!
//! The macros expand at the call site, so caller attribution reports the line
//! of the macro invocation.
//!
//! # Examples
//!
//! ```
//! use funclog::prelude::*;
//! use funclog::{error, info};
//!
//! let memory = MemoryAppender::new();
//! let logger = Logger::builder().appender(memory.clone()).build();
//!
//! // Message only
//! info!(logger, "Server started");
//!
//! // With key-value pairs
//! let port = 8080;
//! info!(logger, "Server listening", "port", port, "tls", false);
//!
//! // Errors take an optional error value
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "refused");
//! error!(logger, Some(&err), "Connect failed", "attempt", 3);
//!
//! assert_eq!(memory.lines()[1], r#""level"=0 "msg"="Server listening" "port"=8080 "tls"=false"#);
//! assert_eq!(memory.lines()[2], r#""msg"="Connect failed" "error"="refused" "attempt"=3"#);
//! ```

/// Build a key-value list from alternating keys and values.
///
/// Every item is captured by reference. Items implementing
/// [`Loggable`](crate::Loggable) go through `Value::loggable`, everything else
/// through its `Serialize` impl.
///
/// ```
/// use funclog::{kv, Loggable, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Token(String);
///
/// impl Loggable for Token {
///     fn stringify(&self) -> Option<String> {
///         Some("Token(****)".to_string())
///     }
/// }
///
/// let pairs = kv!["user", "ann", "id", 7, "token", Token("xyz".into())];
/// assert_eq!(pairs[3], Value::Int(7));
/// assert_eq!(pairs[5].as_str(), Some("Token(****)"));
/// let empty = kv![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {{
        let pairs: [$crate::Value; 0] = [];
        pairs
    }};
    ($($item:expr),+ $(,)?) => {
        [$({
            #[allow(unused_imports)]
            use $crate::__private::{CaptureHooked as _, CaptureSerialized as _};
            (&$crate::__private::CaptureItem(&$item)).capture_item()
        }),+]
    };
}

/// Log an info line with alternating keys and values.
///
/// ```
/// # use funclog::prelude::*;
/// # let logger = Logger::discard();
/// use funclog::info;
/// info!(logger, "Simple message");
/// info!(logger.v(1), "Cache miss", "key", "user:42");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $item:expr)* $(,)?) => {
        $logger.info($msg, &$crate::kv![$($item),*])
    };
}

/// Log an error line with alternating keys and values.
///
/// ```
/// # use funclog::prelude::*;
/// # let logger = Logger::discard();
/// use funclog::error;
/// error!(logger, None, "Startup failed", "stage", "config");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $err:expr, $msg:expr $(, $item:expr)* $(,)?) => {
        $logger.error($err, $msg, &$crate::kv![$($item),*])
    };
}
