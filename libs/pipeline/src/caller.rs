//! Caller-location capability.
//!
//! Frame-skip counts over a walked stack are not portable to Rust; the
//! idiomatic equivalent is `#[track_caller]` on the public `create`
//! boundary, which hands the factory a `std::panic::Location` for the call
//! site with no stack walking at all. The locator only decides how that
//! location is formatted.

/// Formats a source location as a caller descriptor.
pub trait CallerLocator: Send + Sync {
    /// Format `file:line` for display, e.g. stripping directory prefixes.
    fn format(&self, file: &str, line: u32) -> String;
}

/// Production locator: `<relative-path>:<line>` with configured directory
/// prefixes stripped.
pub struct SourcePathLocator {
    strip_prefixes: Vec<String>,
}

impl SourcePathLocator {
    /// Locator that strips nothing.
    pub fn new() -> Self {
        Self {
            strip_prefixes: Vec::new(),
        }
    }

    /// Adds a directory prefix to strip, e.g. the workspace root or a
    /// dependency cache directory.
    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefixes.push(prefix.into());
        self
    }
}

impl Default for SourcePathLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerLocator for SourcePathLocator {
    fn format(&self, file: &str, line: u32) -> String {
        let mut path = file;
        for prefix in &self.strip_prefixes {
            if let Some(stripped) = path.strip_prefix(prefix.as_str()) {
                path = stripped.trim_start_matches('/');
                break;
            }
        }
        format!("{path}:{line}")
    }
}

/// Fixed caller descriptor, for tests.
pub struct FixedCaller(pub String);

impl CallerLocator for FixedCaller {
    fn format(&self, _file: &str, _line: u32) -> String {
        self.0.clone()
    }
}
