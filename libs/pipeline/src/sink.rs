//! Sink abstraction: destinations for rendered lines.

use std::io::{self, Write};

/// A destination accepting pre-formatted text lines.
///
/// Write order matches call order. A shared sink (console, stream) is
/// responsible for its own write atomicity; the renderer performs no
/// buffering of its own.
pub trait Sink {
    /// Writes one pre-formatted line (which may contain embedded newlines
    /// for multi-line blocks), followed by a line terminator.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes to stdout, holding the stdout lock for the duration of each
/// line so concurrent renderers do not interleave within a line.
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

/// Collects lines in memory, for tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written so far, in write order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Sink for BufferSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sink_preserves_write_order() {
        let mut sink = BufferSink::new();
        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        assert_eq!(sink.lines(), ["first", "second"]);
    }
}
