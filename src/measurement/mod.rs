//! Measurement infrastructure.
//!
//! This module provides:
//! - Wall-clock timestamps and the clock resolution probe
//! - Sample collection: warm-up, then strictly sequential timed calls
//!
//! # Clock
//!
//! Timing uses `std::time::Instant`. Its effective resolution depends on
//! the host:
//! - Bare-metal Linux: tens of nanoseconds (vDSO `clock_gettime`)
//! - Virtual machines without a stable TSC: up to microseconds
//! - Windows: 100ns (`QueryPerformanceCounter` at 10 MHz)
//!
//! [`resolution_us`] reports what the current host actually achieves.

mod clock;
mod collector;

pub use clock::{
    black_box, duration_to_us, now, probe_resolution_us, resolution_us, NOMINAL_RESOLUTION_US,
};
pub use collector::{Collector, Interrupted, Sample, SampleSet};
