//! Removal of sensitive context keys before an event is finalized.

use std::collections::HashSet;

use crate::Context;

/// Context keys stripped by the default policy.
pub const DEFAULT_REDACTIONS: [&str; 5] = ["password", "secret", "token", "community", "privateKey"];

/// Denylist of sensitive context keys.
///
/// Redaction is copy-on-redact: the source mapping is never touched and a
/// new mapping is returned. Callers must use the return value.
#[derive(Debug, Clone)]
pub struct RedactionPolicy {
    keys: HashSet<String>,
}

impl RedactionPolicy {
    /// Policy with an explicit denylist.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy that redacts nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }

    /// Returns a copy of `context` with every denylisted top-level key
    /// removed. Key order of the surviving entries is preserved.
    #[must_use]
    pub fn redact(&self, context: &Context) -> Context {
        context
            .iter()
            .filter(|(key, _)| !self.keys.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REDACTIONS)
    }
}
