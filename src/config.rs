//! Configuration for measurement runs.

use std::env;

use crate::error::ConfigError;

/// Environment variable overriding the warm-up count.
pub const ENV_WARMUP: &str = "MOCKBENCH_WARMUP";
/// Environment variable overriding the sample count.
pub const ENV_SAMPLES: &str = "MOCKBENCH_SAMPLES";
/// Environment variable overriding the label column width.
pub const ENV_LABEL_WIDTH: &str = "MOCKBENCH_LABEL_WIDTH";

/// Validated configuration for a [`Timer`](crate::Timer).
///
/// Values are checked when the config is built, so a `Config` in hand is
/// always usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Untimed priming invocations (default: 100).
    warmup: usize,

    /// Timed invocations per run (default: 1,000).
    samples: usize,

    /// Width of the label column in printed rows (default: 40).
    label_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            warmup: 100,
            samples: 1_000,
            label_width: 40,
        }
    }
}

impl Config {
    /// Create a configuration with the given warm-up and sample counts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSamples`] if `samples` is zero.
    pub fn new(warmup: usize, samples: usize) -> Result<Self, ConfigError> {
        if samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        Ok(Self {
            warmup,
            samples,
            ..Self::default()
        })
    }

    /// Fast preset for smoke runs and tests.
    ///
    /// Settings:
    /// - 10 warm-up iterations
    /// - 100 samples
    pub fn quick() -> Self {
        Self {
            warmup: 10,
            samples: 100,
            ..Self::default()
        }
    }

    /// Set the label column width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroLabelWidth`] if `width` is zero.
    pub fn with_label_width(mut self, width: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroLabelWidth);
        }
        self.label_width = width;
        Ok(self)
    }

    /// Merge overrides from `MOCKBENCH_*` environment variables.
    ///
    /// Unset variables keep the current value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for values that are not
    /// non-negative integers, and the usual validation errors otherwise.
    pub fn from_env(self) -> Result<Self, ConfigError> {
        self.merge_vars(|key| env::var(key).ok())
    }

    fn merge_vars<F>(self, mut lookup: F) -> Result<Self, ConfigError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let warmup = parse_count(ENV_WARMUP, lookup(ENV_WARMUP))?.unwrap_or(self.warmup);
        let samples = parse_count(ENV_SAMPLES, lookup(ENV_SAMPLES))?.unwrap_or(self.samples);
        let width =
            parse_count(ENV_LABEL_WIDTH, lookup(ENV_LABEL_WIDTH))?.unwrap_or(self.label_width);

        Self::new(warmup, samples)?.with_label_width(width)
    }

    /// Untimed priming invocations per run.
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Timed invocations per run.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Width of the label column.
    pub fn label_width(&self) -> usize {
        self.label_width
    }

    /// Total invocations of the operation for one successful run.
    pub fn invocations(&self) -> usize {
        self.warmup + self.samples
    }
}

fn parse_count(key: &str, raw: Option<String>) -> Result<Option<usize>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    raw.trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        })
}
