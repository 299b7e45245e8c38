//! Rendering of validated events to a sink.
//!
//! The summary line format is a stable contract that downstream log
//! parsers depend on: field order, bracket delimiters, and truncation
//! length must not change.

use colored::Colorize;

use logpipe_event::{Level, LogEvent};

use crate::{RenderError, Sink};

/// Display width for trace and subject identifiers. Truncation keeps the
/// tail of long identifiers so their suffixes stay visually stable.
pub const DEFAULT_CONTEXT_LENGTH: usize = 8;

/// Immutable rendering configuration.
///
/// Passed into the renderer at construction; there is no process-global
/// theme state.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// Colorize the summary line (and dim the context block) per level.
    pub color: bool,

    /// Emit a second line with the caller location.
    pub verbose: bool,

    /// Tail-truncation length for trace and subject identifiers.
    pub context_length: usize,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            color: false,
            verbose: false,
            context_length: DEFAULT_CONTEXT_LENGTH,
        }
    }
}

/// Formats events into human-readable lines and writes them to a sink.
///
/// Rendering is synchronous and unbuffered: each section is written
/// immediately. Sink failures propagate as [`RenderError`] since this is
/// an I/O boundary the caller must be able to react to.
pub struct Renderer {
    style: RenderStyle,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    /// Renders `event` to `sink`: summary line, optional caller line,
    /// optional pretty-printed context block.
    ///
    /// Rendering the same event twice with the same style produces
    /// byte-identical output.
    pub fn render(&self, event: &LogEvent, sink: &mut dyn Sink) -> Result<(), RenderError> {
        let summary = self.summary_line(event);
        if self.style.color {
            sink.write_line(&paint(event.level(), &summary))?;
        } else {
            sink.write_line(&summary)?;
        }

        if self.style.verbose {
            sink.write_line(&format!(" -> {}", event.caller()))?;
        }

        if !event.context().is_empty() {
            let block = serde_json::to_string_pretty(event.context())?;
            if self.style.color {
                sink.write_line(&block.dimmed().to_string())?;
            } else {
                sink.write_line(&block)?;
            }
        }

        Ok(())
    }

    /// `<level-initial> <timestamp> [<tail-of-trace>] [<module>] [<tail-of-subject>] <message>`
    fn summary_line(&self, event: &LogEvent) -> String {
        let n = self.style.context_length;
        format!(
            "{} {} [{}] [{}] [{}] {}",
            event.level().initial(),
            event
                .timestamp()
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            tail(event.trace(), n),
            event.module(),
            tail(event.subject(), n),
            event.message(),
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderStyle::default())
    }
}

/// Last `n` characters of `s`, or all of `s` if it is shorter.
fn tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

fn paint(level: Level, line: &str) -> String {
    match level {
        Level::Debug => line.blue(),
        Level::Info => line.green(),
        Level::Warn => line.yellow(),
        Level::Error => line.red(),
        Level::Critical => line.red().bold(),
    }
    .to_string()
}
