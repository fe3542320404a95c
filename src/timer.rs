//! Main `Timer` entry point.

use std::convert::Infallible;
use std::fmt;

use crate::checks::resolution_check;
use crate::config::Config;
use crate::error::{ConfigError, MeasureError};
use crate::measurement::{resolution_us, Collector, SampleSet};
use crate::output::{format_report, format_resolution, ReportSink, StdoutSink};
use crate::result::Report;
use crate::statistics::Summary;

/// Multi-sample timer for short operations.
///
/// Each `measure` call is a self-contained run: warm-up, sampling,
/// aggregation, one emitted row, optional hook, done. Nothing carries over
/// between runs except the one-time clock resolution line.
///
/// # Example
///
/// ```ignore
/// use mockbench::Timer;
///
/// let mut timer = Timer::new(10, 100)?;
/// let direct = timer.measure("direct call", || service.handle(42))?;
/// let mocked = timer.measure("mocked call", || mock.handle(42))?;
///
/// println!("mock is {:.1}x slower", mocked.slowdown_vs(&direct).unwrap_or(f64::NAN));
/// ```
///
/// # Concurrency
///
/// `measure` takes `&mut self`, so one timer runs one measurement at a time.
/// Threads measuring concurrently should each own a timer.
pub struct Timer {
    config: Config,
    sink: Box<dyn ReportSink + Send>,
    resolution_reported: bool,
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("config", &self.config)
            .field("resolution_reported", &self.resolution_reported)
            .finish_non_exhaustive()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl Timer {
    /// Create a timer with the given warm-up and sample counts.
    ///
    /// Rows are printed to standard output.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSamples`] if `samples` is zero.
    pub fn new(warmup: usize, samples: usize) -> Result<Self, ConfigError> {
        Ok(Self::from_config(Config::new(warmup, samples)?))
    }

    /// Create a timer from a validated configuration.
    ///
    /// Primes the clock resolution cache so probing never happens between
    /// runs.
    pub fn from_config(config: Config) -> Self {
        resolution_us();
        Self {
            config,
            sink: Box::new(StdoutSink),
            resolution_reported: false,
        }
    }

    /// Create a timer with the [`Config::quick`] preset.
    pub fn quick() -> Self {
        Self::from_config(Config::quick())
    }

    /// Send emitted rows to `sink` instead of standard output.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: ReportSink + Send + 'static,
    {
        self.sink = Box::new(sink);
        self
    }

    /// The configuration this timer runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clock resolution in microseconds (process-wide, cached).
    ///
    /// Reported minimums near or below this figure are unreliable.
    pub fn resolution_us(&self) -> f64 {
        resolution_us()
    }

    /// Emit the clock resolution line, once per timer.
    ///
    /// Called automatically before the first row; calling it earlier lets a
    /// session print the figure up front.
    pub fn report_resolution(&mut self) {
        if self.resolution_reported {
            return;
        }
        self.resolution_reported = true;
        let line = format_resolution(resolution_us());
        self.emit(&line);
    }

    /// Measure an operation.
    ///
    /// Runs `operation` `warmup + samples` times, times the last `samples`
    /// calls and emits one row. A panic inside `operation` unwinds through
    /// this call; nothing is emitted for that run.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::EmptyLabel`] if `label` is blank.
    pub fn measure<F, T>(&mut self, label: &str, operation: F) -> Result<Report, MeasureError>
    where
        F: FnMut() -> T,
    {
        self.measure_with(label, operation, |_| {})
    }

    /// Measure an operation and hand the full sample set to `hook`.
    ///
    /// The hook runs once, after the row is emitted and before this call
    /// returns. Use it for percentiles, spread or histograms.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::EmptyLabel`] if `label` is blank.
    pub fn measure_with<F, T, H>(
        &mut self,
        label: &str,
        mut operation: F,
        hook: H,
    ) -> Result<Report, MeasureError>
    where
        F: FnMut() -> T,
        H: FnOnce(&SampleSet),
    {
        self.try_measure_with(label, || Ok::<T, Infallible>(operation()), hook)
    }

    /// Measure a fallible operation.
    ///
    /// # Errors
    ///
    /// The first `Err` from `operation` aborts the run. Partial samples are
    /// dropped and nothing is emitted.
    pub fn try_measure<F, T, E>(
        &mut self,
        label: &str,
        operation: F,
    ) -> Result<Report, MeasureError<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.try_measure_with(label, operation, |_| {})
    }

    /// Measure a fallible operation and hand the full sample set to `hook`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::EmptyLabel`] if `label` is blank, or
    /// [`MeasureError::Operation`] for the first failing call. On either
    /// path nothing is emitted and `hook` is not called.
    pub fn try_measure_with<F, T, E, H>(
        &mut self,
        label: &str,
        operation: F,
        hook: H,
    ) -> Result<Report, MeasureError<E>>
    where
        F: FnMut() -> Result<T, E>,
        H: FnOnce(&SampleSet),
    {
        if label.trim().is_empty() {
            return Err(MeasureError::EmptyLabel);
        }

        let collector = Collector::new(self.config.warmup(), self.config.samples());
        tracing::debug!(
            label,
            warmup = collector.warmup_iterations(),
            samples = collector.sample_iterations(),
            invocations = self.config.invocations(),
            "starting measurement"
        );

        let samples = collector.collect(operation).map_err(|interrupted| {
            tracing::warn!(
                label,
                phase = %interrupted.phase,
                iteration = interrupted.iteration,
                "operation failed; run discarded"
            );
            MeasureError::Operation {
                label: label.to_string(),
                phase: interrupted.phase,
                iteration: interrupted.iteration,
                source: interrupted.error,
            }
        })?;

        // Config guarantees at least one sample and durations are finite.
        let micros = samples.to_micros();
        let summary = Summary::from_samples(&micros).unwrap_or_default();
        let resolution = resolution_us();
        let warning = resolution_check(&micros, &summary, resolution);
        if let Some(warning) = &warning {
            tracing::warn!(label, "{}", warning.description());
        }

        let report = Report {
            label: label.to_string(),
            summary,
            resolution_us: resolution,
            warmup: self.config.warmup(),
            warning,
        };

        self.report_resolution();
        let row = format_report(&report, self.config.label_width());
        self.emit(&row);

        hook(&samples);

        tracing::info!(
            label,
            min_us = report.summary.min_us,
            mean_us = report.summary.mean_us,
            "measurement complete"
        );
        Ok(report)
    }

    fn emit(&mut self, line: &str) {
        if let Err(err) = self.sink.emit(line) {
            tracing::warn!(error = %err, "failed to emit report line");
        }
    }
}
