//! Statistics over sample sets.
//!
//! - Headline summary (minimum, mean, maximum) computed for every run
//! - Quantiles and spread, for callers doing richer analysis in a hook

mod quantile;
mod summary;

pub use quantile::{compute_quantile, compute_quantiles};
pub use summary::{mean, std_dev, Summary};
