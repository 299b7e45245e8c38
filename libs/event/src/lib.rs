//! # logpipe-event
//!
//! Validated, immutable log-event value object for the logpipe pipeline.
//!
//! ## Design Principles
//!
//! - Events are immutable once validated; there is no way to construct a
//!   [`LogEvent`] except through [`Validator::validate`]
//! - Events never contain redacted values; redaction happens before
//!   validation and is a pure copy, never an in-place mutation
//! - Validation reports the complete set of failing fields, not just the
//!   first, so callers can assert on the full failure set
//! - The context is an ordered mapping; key order is preserved through
//!   redaction and serialization
//!
//! ## Candidate vs Event
//!
//! A [`EventCandidate`] is the raw record assembled by the pipeline. Its
//! `level` is a plain string because candidates originate outside the type
//! system (wire input, user-supplied strings); membership in the level set
//! is a runtime validation rule, not a compile-time one.

mod error;
mod event;
mod level;
mod redact;
mod validate;

pub use error::{FieldViolation, ValidationError};
pub use event::{Context, EventCandidate, LogEvent};
pub use level::{Level, UnknownLevel};
pub use redact::{RedactionPolicy, DEFAULT_REDACTIONS};
pub use validate::Validator;
