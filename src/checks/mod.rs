//! Post-run checks that qualify a report without suppressing it.

mod resolution;

pub use resolution::{resolution_check, ResolutionWarning};
