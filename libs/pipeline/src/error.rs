//! Error types for the pipeline crate.

use thiserror::Error;

/// Errors from the identity-lookup capability.
///
/// Internal to the pipeline: the enricher absorbs every variant into the
/// fallback subject and never surfaces one to callers of `create`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The address is not known to the lookup backend.
    #[error("no identity found for {0}")]
    Unresolved(String),

    /// The lookup backend failed.
    #[error("lookup backend error: {0}")]
    Backend(String),

    /// The lookup did not complete within the configured deadline.
    #[error("lookup timed out")]
    Timeout,
}

/// Errors from rendering an event to a sink.
///
/// Rendering is an I/O boundary, so these propagate to the caller.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The sink rejected a write (e.g. closed stream).
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The context could not be pretty-printed.
    #[error("context formatting failed: {0}")]
    ContextFormat(#[from] serde_json::Error),
}
