//! Call-site attribution
//!
//! Logging entry points are `#[track_caller]`, so the location of the
//! application's call arrives as a [`CallSite`] no matter how many internal
//! layers sit between it and the formatter. A depth of zero reports that site
//! directly. Wrapper functions that log on behalf of their own callers raise
//! the depth; the resolver then walks the stack with `backtrace`, anchors on
//! the call site's frame and steps outward.

use super::value::Value;
use backtrace::Backtrace;
use serde::Serialize;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};

/// Source location captured by a `#[track_caller]` entry point
pub type CallSite = &'static Location<'static>;

/// Source location reported in the `"caller"` builtin
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Caller {
    /// Base name of the source file
    pub file: String,
    pub line: u32,
}

impl Caller {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Placeholder used when the location cannot be determined
    pub fn unknown() -> Self {
        Self::new("<unknown>", 0)
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.line == 0 && self.file == "<unknown>"
    }

    /// The call site itself, reduced to its base file name
    pub fn from_site(site: CallSite) -> Self {
        Self::new(base_name(Path::new(site.file())), site.line())
    }

    /// `{"file":…,"line":…}`
    pub fn to_value(&self) -> Value {
        Value::Object(vec![
            ("file".to_string(), Value::String(self.file.clone())),
            ("line".to_string(), Value::UInt(u64::from(self.line))),
        ])
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Resolve the location `depth` frames outward from `site`.
///
/// Returns [`Caller::unknown`] when the frame holding `site` is not on the
/// current stack or the stack is shallower than requested.
///
/// A depth above zero reads file and line from the binary's debug info. Builds
/// without line tables, such as a default release profile, resolve every such
/// request to [`Caller::unknown`]; enable them with
/// `debug = "line-tables-only"` under `[profile.release]`. Depth zero never
/// walks the stack.
pub fn resolve(site: CallSite, depth: usize) -> Caller {
    if depth == 0 {
        return Caller::from_site(site);
    }

    let frames = symbol_locations();
    let anchor = frames
        .iter()
        .position(|(file, line)| *line == site.line() && file.ends_with(site.file()));

    match anchor.and_then(|index| frames.get(index + depth)) {
        Some((file, line)) => Caller::new(base_name(file), *line),
        None => Caller::unknown(),
    }
}

/// File and line of every resolved symbol, innermost first. Inlined calls
/// count as frames of their own.
fn symbol_locations() -> Vec<(PathBuf, u32)> {
    let backtrace = Backtrace::new();
    backtrace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| Some((symbol.filename()?.to_path_buf(), symbol.lineno()?)))
        .collect()
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
