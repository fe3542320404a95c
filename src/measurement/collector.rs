//! Sample collection: warm-up followed by strictly sequential timed calls.
//!
//! Every timed call is bracketed by its own pair of clock reads, so each
//! start timestamp is taken after the previous call's end timestamp. Calls
//! are never batched or reordered.

use serde::Serialize;

use super::clock::{black_box, duration_to_us, now};
use crate::error::Phase;
use crate::statistics::{compute_quantile, compute_quantiles, mean, std_dev};

/// A single measured duration, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Sample(f64);

impl Sample {
    /// Duration in microseconds.
    pub fn micros(self) -> f64 {
        self.0
    }
}

/// Ordered samples from one measurement run.
///
/// Samples appear in invocation order. The set is only ever built from a
/// complete run, so its length always equals the configured sample count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Wrap raw durations (microseconds) that were recorded elsewhere.
    ///
    /// Negative and non-finite values are clamped to zero.
    pub fn from_micros(samples: Vec<f64>) -> Self {
        let samples = samples
            .into_iter()
            .map(|us| Sample(if us.is_finite() && us > 0.0 { us } else { 0.0 }))
            .collect();
        Self { samples }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the set holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in invocation order.
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterate over samples in invocation order.
    pub fn iter(&self) -> impl Iterator<Item = Sample> + '_ {
        self.samples.iter().copied()
    }

    /// Durations in microseconds, in invocation order.
    pub fn to_micros(&self) -> Vec<f64> {
        self.iter().map(Sample::micros).collect()
    }

    /// Consume the set and return the raw durations.
    pub fn into_micros(self) -> Vec<f64> {
        self.samples.into_iter().map(Sample::micros).collect()
    }

    /// Smallest sample, or `None` if empty.
    pub fn min(&self) -> Option<f64> {
        self.iter().map(Sample::micros).min_by(|a, b| a.total_cmp(b))
    }

    /// Largest sample, or `None` if empty.
    pub fn max(&self) -> Option<f64> {
        self.iter().map(Sample::micros).max_by(|a, b| a.total_cmp(b))
    }

    /// Arithmetic mean, or `None` if empty.
    pub fn mean(&self) -> Option<f64> {
        mean(&self.to_micros())
    }

    /// Median (50th percentile), or `None` if empty.
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }

    /// Percentile with linear interpolation, `p` in `[0, 1]`.
    ///
    /// Returns `None` if the set is empty or `p` is out of range.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if self.samples.is_empty() || !(0.0..=1.0).contains(&p) {
            return None;
        }
        let mut scratch = self.to_micros();
        Some(compute_quantile(&mut scratch, p))
    }

    /// Several percentiles at once, in the order of `ps`.
    ///
    /// Sorts one copy of the samples however many percentiles are asked
    /// for. Returns `None` if the set is empty or any `p` is outside `[0, 1]`.
    pub fn percentiles(&self, ps: &[f64]) -> Option<Vec<f64>> {
        if self.samples.is_empty() || ps.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return None;
        }
        Some(compute_quantiles(&self.to_micros(), ps))
    }

    /// Population standard deviation, or `None` if empty.
    pub fn std_dev(&self) -> Option<f64> {
        std_dev(&self.to_micros())
    }
}

/// Where and why collection stopped early.
#[derive(Debug)]
pub struct Interrupted<E> {
    /// Phase in which the operation failed.
    pub phase: Phase,
    /// Zero-based iteration within that phase.
    pub iteration: usize,
    /// The operation's error.
    pub error: E,
}

/// Runs the warm-up and sampling loops for one operation.
#[derive(Debug, Clone, Copy)]
pub struct Collector {
    /// Untimed priming invocations.
    warmup_iterations: usize,
    /// Timed invocations.
    sample_iterations: usize,
}

impl Collector {
    /// Create a collector with the given iteration counts.
    pub fn new(warmup_iterations: usize, sample_iterations: usize) -> Self {
        Self {
            warmup_iterations,
            sample_iterations,
        }
    }

    /// Number of untimed priming invocations.
    pub fn warmup_iterations(&self) -> usize {
        self.warmup_iterations
    }

    /// Number of timed invocations.
    pub fn sample_iterations(&self) -> usize {
        self.sample_iterations
    }

    /// Run warm-up iterations without timing them.
    ///
    /// Lets lazy initialization, cache fills and first-call costs happen
    /// outside the measurement window.
    fn warmup<F, T, E>(&self, operation: &mut F) -> Result<(), Interrupted<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        for iteration in 0..self.warmup_iterations {
            if let Err(error) = black_box(operation()) {
                return Err(Interrupted {
                    phase: Phase::Warmup,
                    iteration,
                    error,
                });
            }
        }
        Ok(())
    }

    /// Collect one timed sample per invocation.
    ///
    /// Performs exactly `warmup_iterations + sample_iterations` calls on
    /// success. The first failing call stops collection and the partial
    /// samples are dropped.
    pub fn collect<F, T, E>(&self, mut operation: F) -> Result<SampleSet, Interrupted<E>>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.warmup(&mut operation)?;

        let mut samples = Vec::with_capacity(self.sample_iterations);
        for iteration in 0..self.sample_iterations {
            let start = now();
            let outcome = black_box(operation());
            let end = now();

            if let Err(error) = outcome {
                return Err(Interrupted {
                    phase: Phase::Sampling,
                    iteration,
                    error,
                });
            }
            samples.push(Sample(duration_to_us(end.saturating_duration_since(start))));
        }

        Ok(SampleSet { samples })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_collect_counts_invocations() {
        let collector = Collector::new(7, 13);
        let mut calls = 0usize;
        let set = collector
            .collect(|| {
                calls += 1;
                Ok::<_, Infallible>(calls)
            })
            .unwrap();

        assert_eq!(calls, 20);
        assert_eq!(set.len(), 13);
        assert!(set.iter().all(|s| s.micros() >= 0.0));
    }

    #[test]
    fn test_collect_stops_on_warmup_error() {
        let collector = Collector::new(5, 10);
        let mut calls = 0usize;
        let err = collector
            .collect(|| {
                calls += 1;
                if calls == 2 {
                    Err("boom")
                } else {
                    Ok(())
                }
            })
            .unwrap_err();

        assert_eq!(calls, 2);
        assert_eq!(err.phase, Phase::Warmup);
        assert_eq!(err.iteration, 1);
        assert_eq!(err.error, "boom");
    }

    #[test]
    fn test_collect_stops_on_sampling_error() {
        let collector = Collector::new(2, 5);
        let mut calls = 0usize;
        let err = collector
            .collect(|| {
                calls += 1;
                if calls == 5 {
                    Err(calls)
                } else {
                    Ok(())
                }
            })
            .unwrap_err();

        assert_eq!(calls, 5);
        assert_eq!(err.phase, Phase::Sampling);
        assert_eq!(err.iteration, 2);
        assert_eq!(err.error, 5);
    }

    #[test]
    fn test_sample_set_helpers() {
        let set = SampleSet::from_micros(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(set.min(), Some(1.0));
        assert_eq!(set.max(), Some(4.0));
        assert_eq!(set.mean(), Some(2.5));
        assert_eq!(set.median(), Some(2.5));
        assert_eq!(set.percentile(0.0), Some(1.0));
        assert_eq!(set.percentile(1.0), Some(4.0));
        assert_eq!(set.percentile(1.5), None);
        // Order is preserved.
        assert_eq!(set.to_micros(), vec![4.0, 1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_sample_set_std_dev() {
        let set = SampleSet::from_micros(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(set.std_dev(), Some(2.0));
    }

    #[test]
    fn test_from_micros_clamps_invalid() {
        let set = SampleSet::from_micros(vec![-1.0, f64::NAN, 3.0]);
        assert_eq!(set.to_micros(), vec![0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_empty_sample_set() {
        let set = SampleSet::from_micros(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.min(), None);
        assert_eq!(set.mean(), None);
        assert_eq!(set.median(), None);
        assert_eq!(set.std_dev(), None);
        assert_eq!(set.percentiles(&[0.5]), None);
    }

    #[test]
    fn test_sample_set_percentiles() {
        let set = SampleSet::from_micros(vec![5.0, 1.0, 4.0, 2.0, 3.0]);
        let batch = set.percentiles(&[0.99, 0.0, 0.5]).unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], set.percentile(0.99).unwrap());
        assert_eq!(batch[1], 1.0);
        assert_eq!(batch[2], 3.0);
        assert_eq!(set.percentiles(&[0.5, 1.5]), None);
    }

    #[test]
    fn test_collected_samples_stored_as_sample() {
        let collector = Collector::new(0, 4);
        let set = collector.collect(|| Ok::<_, Infallible>(())).unwrap();
        assert_eq!(set.as_slice().len(), 4);
        assert_eq!(
            set.as_slice().iter().map(|s| s.micros()).collect::<Vec<_>>(),
            set.to_micros()
        );
    }
}
