//! Validation rules turning a candidate record into an immutable event.

use crate::{EventCandidate, FieldViolation, Level, LogEvent, ValidationError};

const EMPTY_REASON: &str = "must be present and non-empty";

/// Checks a candidate event against the field schema.
///
/// Every required field is checked; all failures are collected into a
/// single [`ValidationError`] rather than stopping at the first. The
/// `context` field is deliberately exempt from the presence rule: an empty
/// mapping is a valid context.
#[derive(Debug, Clone)]
pub struct Validator {
    allowed_levels: Vec<Level>,
}

impl Validator {
    /// Validator accepting the full level set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed_levels: Level::ALL.to_vec(),
        }
    }

    /// Validator restricted to a subset of levels.
    #[must_use]
    pub fn with_levels(levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            allowed_levels: levels.into_iter().collect(),
        }
    }

    /// Validates `candidate`, returning the immutable event or the
    /// complete set of violations.
    pub fn validate(&self, candidate: EventCandidate) -> Result<LogEvent, ValidationError> {
        let mut violations = Vec::new();

        if candidate.module.is_empty() {
            violations.push(FieldViolation {
                field: "module",
                reason: EMPTY_REASON.to_string(),
            });
        }

        let level = self.check_level(&candidate.level, &mut violations);

        if candidate.message.is_empty() {
            violations.push(FieldViolation {
                field: "message",
                reason: EMPTY_REASON.to_string(),
            });
        }

        // context: presence not enforced; an empty mapping is valid.

        if candidate.trace.is_empty() {
            violations.push(FieldViolation {
                field: "trace",
                reason: EMPTY_REASON.to_string(),
            });
        }

        if candidate.timestamp.is_none() {
            violations.push(FieldViolation {
                field: "timestamp",
                reason: "must be set at creation time".to_string(),
            });
        }

        if candidate.caller.is_empty() {
            violations.push(FieldViolation {
                field: "caller",
                reason: EMPTY_REASON.to_string(),
            });
        }

        if candidate.subject.is_empty() {
            violations.push(FieldViolation {
                field: "subject",
                reason: EMPTY_REASON.to_string(),
            });
        }

        match (violations.is_empty(), level) {
            (true, Some(level)) => Ok(LogEvent::from_validated(candidate, level)),
            _ => Err(ValidationError::new(violations)),
        }
    }

    fn check_level(&self, raw: &str, violations: &mut Vec<FieldViolation>) -> Option<Level> {
        if raw.is_empty() {
            violations.push(FieldViolation {
                field: "level",
                reason: EMPTY_REASON.to_string(),
            });
            return None;
        }

        match Level::parse(raw) {
            Some(level) if self.allowed_levels.contains(&level) => Some(level),
            _ => {
                violations.push(FieldViolation {
                    field: "level",
                    reason: format!(
                        "must be one of [{}], got '{raw}'",
                        self.allowed_levels
                            .iter()
                            .map(Level::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                });
                None
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
