//! # mockbench
//!
//! Measure the cost of short operations precisely enough to compare them.
//!
//! This crate times a callable many times and reports:
//! - The minimum sample (headline figure: noise only ever adds time)
//! - The mean (secondary figure, exposes how noisy the run was)
//! - A caveat when figures approach the clock's resolution
//!
//! Typical use is ranking the per-call overhead of mocking frameworks:
//! a mocked method dispatch, a raised mocked event, a mocked property read.
//!
//! ## Operations Must Be Repeatable
//!
//! The operation runs `warmup + samples` times back-to-back. It must not
//! accumulate state that makes later calls cheaper or dearer than earlier
//! ones. Build mocks and inputs *outside* the closure.
//!
//! ```ignore
//! // ❌ WRONG - the mock is rebuilt inside the measured call
//! timer.measure("mocked read", || Mock::new().value());
//!
//! // ✅ CORRECT - build once, measure only the call
//! let mock = Mock::new();
//! timer.measure("mocked read", || mock.value());
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use mockbench::Timer;
//!
//! let mut timer = Timer::new(10, 100)?;
//! timer.measure("direct call", || target.value())?;
//! timer.measure_with("mocked call", || mock.value(), |samples| {
//!     println!("p99: {:?}", samples.percentile(0.99));
//! })?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod result;
mod timer;

// Functional modules
pub mod checks;
pub mod measurement;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use checks::ResolutionWarning;
pub use config::{Config, ENV_LABEL_WIDTH, ENV_SAMPLES, ENV_WARMUP};
pub use error::{ConfigError, MeasureError, Phase};
pub use measurement::{black_box, resolution_us, Sample, SampleSet};
pub use output::{MemorySink, ReportSink, StdoutSink, TracingSink, WriterSink};
pub use result::Report;
pub use statistics::Summary;
pub use timer::Timer;

/// Measure an operation with the default configuration.
///
/// Runs 100 untimed warm-up calls and 1,000 timed calls, prints one row to
/// standard output, and returns the report. Use [`Timer`] to configure the
/// counts, redirect output or attach a hook.
///
/// # Errors
///
/// Returns [`MeasureError::EmptyLabel`] if `label` is blank.
pub fn measure<F, T>(label: &str, operation: F) -> Result<Report, MeasureError>
where
    F: FnMut() -> T,
{
    Timer::default().measure(label, operation)
}
