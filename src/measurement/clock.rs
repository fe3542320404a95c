//! Wall-clock timestamps and clock resolution probing.
//!
//! All timing goes through `std::time::Instant`, the platform's monotonic
//! high-resolution clock:
//! - Linux/macOS: `clock_gettime(CLOCK_MONOTONIC)` / `mach_absolute_time`
//! - Windows: `QueryPerformanceCounter`
//!
//! The resolution probe finds the smallest increment the clock actually
//! exposes, which on virtualized or older hosts can be far coarser than
//! the nominal 1ns.

use std::hint::black_box as std_black_box;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Independent probes taken when estimating the resolution.
const PROBES: usize = 64;

/// Clock reads allowed per probe before giving up on that probe.
const MAX_READS_PER_PROBE: usize = 1_000_000;

/// Documented resolution of the platform clock, in microseconds.
///
/// Used when the clock never advances during probing.
#[cfg(windows)]
pub const NOMINAL_RESOLUTION_US: f64 = 0.1;

/// Documented resolution of the platform clock, in microseconds.
///
/// Used when the clock never advances during probing.
#[cfg(not(windows))]
pub const NOMINAL_RESOLUTION_US: f64 = 0.001;

static RESOLUTION_US: OnceLock<f64> = OnceLock::new();

/// Wrapper around `std::hint::black_box` for preventing compiler optimizations.
///
/// The timer passes every operation result through this so the call cannot be
/// optimized away or moved across the timestamps.
#[inline]
pub fn black_box<T>(x: T) -> T {
    std_black_box(x)
}

/// Read the high-resolution clock.
#[inline]
pub fn now() -> Instant {
    Instant::now()
}

/// Convert a duration to fractional microseconds.
#[inline]
pub fn duration_to_us(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000.0
}

/// Smallest time increment the clock can distinguish, in microseconds.
///
/// Probed on first call and cached for the lifetime of the process; every
/// later call returns the identical value. Safe to call from many threads.
pub fn resolution_us() -> f64 {
    *RESOLUTION_US.get_or_init(|| {
        resolve_resolution(probe_resolution_us(now, PROBES, MAX_READS_PER_PROBE))
    })
}

/// Turn a probe outcome into the resolution value, falling back to
/// [`NOMINAL_RESOLUTION_US`] when the clock never advanced.
fn resolve_resolution(probed: Option<f64>) -> f64 {
    match probed {
        Some(resolution) => {
            tracing::debug!(resolution_us = resolution, "clock resolution probed");
            resolution
        }
        None => {
            tracing::warn!(
                fallback_us = NOMINAL_RESOLUTION_US,
                "clock did not advance during resolution probe; using nominal resolution"
            );
            NOMINAL_RESOLUTION_US
        }
    }
}

/// Probe the resolution of an arbitrary clock.
///
/// Each probe reads the clock back-to-back until it advances, giving up
/// after `max_reads` reads. The smallest nonzero delta across `probes`
/// probes is returned so a single preempted probe cannot inflate the
/// result. Returns `None` if no probe ever saw the clock advance.
///
/// The loop does not allocate.
pub fn probe_resolution_us<F>(mut read: F, probes: usize, max_reads: usize) -> Option<f64>
where
    F: FnMut() -> Instant,
{
    let mut min_delta: Option<Duration> = None;

    for _ in 0..probes {
        let start = read();
        for _ in 0..max_reads {
            let next = read();
            let delta = next.saturating_duration_since(start);
            if !delta.is_zero() {
                if min_delta.map_or(true, |min| delta < min) {
                    min_delta = Some(delta);
                }
                break;
            }
        }
    }

    min_delta.map(duration_to_us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_monotonic() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }

    #[test]
    fn test_duration_to_us() {
        assert_eq!(duration_to_us(Duration::from_micros(1_500)), 1_500.0);
        assert_eq!(duration_to_us(Duration::from_nanos(250)), 0.25);
    }

    #[test]
    fn test_resolution_positive_and_cached() {
        let first = resolution_us();
        let second = resolution_us();
        assert!(first > 0.0, "resolution_us = {}", first);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_resolution_reasonable() {
        // Even coarse virtualized clocks tick at least every 20ms.
        let resolution = resolution_us();
        assert!(resolution < 20_000.0, "resolution_us = {}", resolution);
    }

    #[test]
    fn test_frozen_clock_gives_up() {
        let frozen = Instant::now();
        assert_eq!(probe_resolution_us(|| frozen, 8, 1_000), None);
    }

    #[test]
    fn test_frozen_clock_falls_back_to_nominal() {
        let frozen = Instant::now();
        let probed = probe_resolution_us(|| frozen, 8, 1_000);
        assert_eq!(resolve_resolution(probed), NOMINAL_RESOLUTION_US);
    }

    #[test]
    fn test_probed_value_used_as_is() {
        assert_eq!(resolve_resolution(Some(0.042)), 0.042);
    }

    #[test]
    fn test_probe_takes_minimum_delta() {
        // Synthetic clock: advances 3us on every read, except every 4th read
        // which advances only 1us.
        let origin = Instant::now();
        let mut reads = 0u64;
        let mut offset = Duration::ZERO;
        let resolution = probe_resolution_us(
            || {
                reads += 1;
                offset += if reads % 4 == 0 {
                    Duration::from_micros(1)
                } else {
                    Duration::from_micros(3)
                };
                origin + offset
            },
            16,
            10,
        );
        assert_eq!(resolution, Some(1.0));
    }

    #[test]
    fn test_probe_ignores_stalled_prefix() {
        // Clock that only advances after several identical reads.
        let origin = Instant::now();
        let mut reads = 0u64;
        let resolution = probe_resolution_us(
            || {
                reads += 1;
                origin + Duration::from_micros(2 * (reads / 5))
            },
            4,
            100,
        );
        assert_eq!(resolution, Some(2.0));
    }
}
