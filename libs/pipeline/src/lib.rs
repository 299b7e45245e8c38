//! # logpipe-pipeline
//!
//! Async enrichment, redaction, and sink rendering for logpipe events.
//!
//! ## Design Principles
//!
//! - Collaborators are injected through constructors, never resolved from
//!   a runtime registry
//! - Subject resolution degrades gracefully: lookup errors, timeouts, and
//!   cancellations all fall back to the `"server"` subject and never fail
//!   event creation
//! - Validation failures are structural and always surfaced; an event that
//!   fails validation is never rendered
//! - Rendering style is an immutable configuration passed to the renderer,
//!   not process-global state
//!
//! ## Pipeline
//!
//! ```text
//! create(module, level, message, context)
//!     → Enricher (trace snapshot merge + async subject lookup)
//!     → RedactionPolicy (copy-on-redact)
//!     → Validator (complete violation set)
//!     → LogEvent (immutable)
//! render(event, sink)
//!     → summary line [+ caller line] [+ pretty context block]
//! ```

mod caller;
mod enrich;
mod error;
mod factory;
mod lookup;
mod render;
mod sink;
mod trace;

pub use caller::{CallerLocator, FixedCaller, SourcePathLocator};
pub use enrich::{Enricher, FALLBACK_SUBJECT};
pub use error::{LookupError, RenderError};
pub use factory::EventFactory;
pub use lookup::{IdentityLookup, StaticLookup};
pub use render::{RenderStyle, Renderer, DEFAULT_CONTEXT_LENGTH};
pub use sink::{BufferSink, ConsoleSink, Sink};
pub use trace::{ProcessTrace, StaticTrace, TraceContext};

pub use logpipe_event::{
    Context, EventCandidate, FieldViolation, Level, LogEvent, RedactionPolicy, ValidationError,
    Validator,
};
