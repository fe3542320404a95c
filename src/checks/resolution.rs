//! Noise-floor check.
//!
//! Flags runs whose measured cost is close to the smallest increment the
//! clock can distinguish. Such figures are mostly quantization and are not
//! a sound basis for comparison. Flagged runs are still reported, with the
//! warning attached.

use serde::{Deserialize, Serialize};

use crate::statistics::Summary;

/// Warning from the resolution check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolutionWarning {
    /// Mean cost is at or below the clock resolution.
    ///
    /// Critical: most samples are zero or a single tick.
    BelowResolution {
        /// Mean sample in microseconds.
        mean_us: f64,
        /// Clock resolution in microseconds.
        resolution_us: f64,
    },

    /// Mean cost is within a small multiple of the clock resolution.
    NearResolution {
        /// Mean sample in microseconds.
        mean_us: f64,
        /// Clock resolution in microseconds.
        resolution_us: f64,
    },

    /// Many samples share identical values.
    ///
    /// Indicates the clock's tick dominates the spread of the data.
    HighQuantization {
        /// Number of distinct values observed.
        unique_values: usize,
        /// Total number of samples.
        total_samples: usize,
    },
}

impl ResolutionWarning {
    /// Check if this warning indicates a critical issue.
    pub fn is_critical(&self) -> bool {
        matches!(self, ResolutionWarning::BelowResolution { .. })
    }

    /// Get a human-readable description of the warning.
    pub fn description(&self) -> String {
        match self {
            ResolutionWarning::BelowResolution {
                mean_us,
                resolution_us,
            } => format!(
                "CRITICAL: mean cost ({:.3} us) is at or below the clock resolution \
                 ({:.3} us). This figure is unreliable.",
                mean_us, resolution_us
            ),
            ResolutionWarning::NearResolution {
                mean_us,
                resolution_us,
            } => format!(
                "Mean cost ({:.3} us) is within {}x of the clock resolution ({:.3} us). \
                 Treat comparisons against this row with caution.",
                mean_us, NEAR_FACTOR, resolution_us
            ),
            ResolutionWarning::HighQuantization {
                unique_values,
                total_samples,
            } => format!(
                "High quantization: only {} distinct values in {} samples. \
                 Clock resolution may be affecting measurement quality.",
                unique_values, total_samples
            ),
        }
    }
}

/// Means below this multiple of the resolution are flagged.
const NEAR_FACTOR: f64 = 10.0;

/// Minimum distinct values expected per 1000 samples.
const MIN_UNIQUE_PER_1000: usize = 20;

/// Minimum sample count before quantization is assessed.
const MIN_SAMPLES_FOR_QUANTIZATION: usize = 100;

/// Values closer than this (1ns) count as identical.
const DISTINCT_TOLERANCE_US: f64 = 0.001;

/// Check a completed run against the clock resolution.
///
/// Returns the most severe applicable warning, or `None` when the run is
/// comfortably above the noise floor.
pub fn resolution_check(
    samples: &[f64],
    summary: &Summary,
    resolution_us: f64,
) -> Option<ResolutionWarning> {
    if summary.mean_us <= resolution_us {
        return Some(ResolutionWarning::BelowResolution {
            mean_us: summary.mean_us,
            resolution_us,
        });
    }

    if summary.mean_us < NEAR_FACTOR * resolution_us {
        return Some(ResolutionWarning::NearResolution {
            mean_us: summary.mean_us,
            resolution_us,
        });
    }

    quantization_check(samples)
}

fn quantization_check(samples: &[f64]) -> Option<ResolutionWarning> {
    if samples.len() < MIN_SAMPLES_FOR_QUANTIZATION {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut unique_count = 1;
    let mut last_value = sorted[0];
    for &val in &sorted[1..] {
        if (val - last_value).abs() > DISTINCT_TOLERANCE_US {
            unique_count += 1;
            last_value = val;
        }
    }

    let expected_unique =
        (samples.len() as f64 / 1000.0 * MIN_UNIQUE_PER_1000 as f64).max(10.0) as usize;

    if unique_count < expected_unique / 2 {
        Some(ResolutionWarning::HighQuantization {
            unique_values: unique_count,
            total_samples: samples.len(),
        })
    } else {
        None
    }
}
