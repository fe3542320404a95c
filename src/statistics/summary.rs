//! Headline statistics for a completed run.
//!
//! The minimum is the headline figure: scheduling noise, interrupts and
//! cache misses only ever add time, so the fastest observed call is the
//! closest estimate of the operation's steady-state cost. The mean is kept
//! alongside it to expose how much noise the run absorbed.

use serde::{Deserialize, Serialize};

/// Summary of one sample set, all figures in microseconds.
///
/// Invariant: `min_us <= mean_us <= max_us`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of samples summarized.
    pub samples: usize,
    /// Fastest sample (headline figure).
    pub min_us: f64,
    /// Arithmetic mean.
    pub mean_us: f64,
    /// Slowest sample.
    pub max_us: f64,
}

impl Summary {
    /// Summarize a slice of durations in microseconds.
    ///
    /// Returns `None` for an empty slice or one holding non-finite values.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.iter().any(|x| !x.is_finite()) {
            return None;
        }
        let mean_us = mean(samples)?;
        let (min_us, max_us) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });

        Some(Self {
            samples: samples.len(),
            min_us,
            // Rounding in the sum can push the mean a hair outside [min, max]
            // for near-constant data.
            mean_us: mean_us.clamp(min_us, max_us),
            max_us,
        })
    }

    /// Ratio of mean to minimum; 1.0 means a perfectly quiet run.
    pub fn noise_ratio(&self) -> f64 {
        if self.min_us > 0.0 {
            self.mean_us / self.min_us
        } else {
            f64::INFINITY
        }
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation, or `None` for an empty slice.
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    let variance = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / samples.len() as f64;
    Some(variance.sqrt())
}
