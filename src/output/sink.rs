//! Destinations for report lines.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Receives the text lines a timer emits.
///
/// One line per successful run, plus one clock-resolution line per timer.
/// Lines carry no trailing newline.
pub trait ReportSink {
    /// Emit one line.
    fn emit(&mut self, line: &str) -> io::Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        (**self).emit(line)
    }
}

/// Writes lines to standard output. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)
    }
}

/// Writes lines to any `io::Write`.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

/// Forwards lines as `tracing` events at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        tracing::info!(target: "mockbench::report", "{}", line);
        Ok(())
    }
}

/// Keeps lines in memory.
///
/// Clones share the same buffer, so a handle kept by the caller sees the
/// lines emitted through the clone handed to a timer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all lines emitted so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ReportSink for MemorySink {
    fn emit(&mut self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit("first").unwrap();
        sink.emit("second").unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "first\nsecond\n");
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let handle = MemorySink::new();
        let mut boxed: Box<dyn ReportSink> = Box::new(handle.clone());
        boxed.emit("row").unwrap();
        assert_eq!(handle.lines(), vec!["row".to_string()]);
        assert_eq!(handle.take(), vec!["row".to_string()]);
        assert!(handle.lines().is_empty());
    }

    #[test]
    fn test_tracing_sink_never_fails() {
        assert!(TracingSink.emit("row").is_ok());
    }
}
