//! Result of a completed measurement run.

use serde::{Deserialize, Serialize};

use crate::checks::ResolutionWarning;
use crate::statistics::Summary;

/// Outcome of one successful `measure` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Label the run was measured under.
    pub label: String,

    /// Headline statistics over the sample set.
    pub summary: Summary,

    /// Clock resolution in microseconds at the time of the run.
    pub resolution_us: f64,

    /// Untimed priming invocations performed.
    pub warmup: usize,

    /// Noise-floor caveat, if the run is too close to the clock resolution.
    pub warning: Option<ResolutionWarning>,
}

impl Report {
    /// Fastest observed call in microseconds (headline figure).
    pub fn min_us(&self) -> f64 {
        self.summary.min_us
    }

    /// Mean call cost in microseconds.
    pub fn mean_us(&self) -> f64 {
        self.summary.mean_us
    }

    /// Whether the headline figure should be trusted for comparisons.
    ///
    /// `false` when the run carries a critical resolution warning.
    pub fn is_reliable(&self) -> bool {
        !self.warning.as_ref().is_some_and(ResolutionWarning::is_critical)
    }

    /// How many times slower this run's headline figure is than `baseline`'s.
    ///
    /// Returns `None` if the baseline minimum is zero.
    pub fn slowdown_vs(&self, baseline: &Report) -> Option<f64> {
        if baseline.summary.min_us > 0.0 {
            Some(self.summary.min_us / baseline.summary.min_us)
        } else {
            None
        }
    }
}
