//! Report rendering and emission.

pub mod json;
mod sink;
mod terminal;

pub use sink::{MemorySink, ReportSink, StdoutSink, TracingSink, WriterSink};
pub use terminal::{format_duration, format_report, format_resolution};
