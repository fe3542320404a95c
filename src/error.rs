//! Error types for timer construction and measurement runs.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a timer configuration is invalid.
///
/// Raised at construction time, never deferred to the first `measure` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one timed invocation is required to produce a sample set.
    #[error("sample count must be at least 1")]
    ZeroSamples,

    /// The label column needs at least one character.
    #[error("label width must be at least 1")]
    ZeroLabelWidth,

    /// An environment override could not be parsed as a non-negative count.
    #[error("invalid value {value:?} for {key}: expected a non-negative integer")]
    InvalidEnv {
        /// Variable name.
        key: String,
        /// Raw value found in the environment.
        value: String,
    },
}

/// Phase of a measurement run in which the operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Untimed priming invocations.
    Warmup,
    /// Timed invocations.
    Sampling,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warmup => write!(f, "warm-up"),
            Self::Sampling => write!(f, "sampling"),
        }
    }
}

/// Error returned by a `measure` call.
///
/// The type parameter is the error type of the timed operation. Infallible
/// operations use the default, so only [`MeasureError::EmptyLabel`] can occur.
#[derive(Debug, Error)]
pub enum MeasureError<E = Infallible> {
    /// The label was empty; nothing was invoked.
    #[error("measurement label must not be empty")]
    EmptyLabel,

    /// The timed operation failed. The run was aborted and nothing was reported.
    #[error("operation {label:?} failed during {phase} iteration {iteration}")]
    Operation {
        /// Label of the aborted run.
        label: String,
        /// Phase in which the failure happened.
        phase: Phase,
        /// Zero-based iteration index within that phase.
        iteration: usize,
        /// The operation's own error.
        #[source]
        source: E,
    },
}

impl<E> MeasureError<E> {
    /// Returns the operation's error, if this is an operation failure.
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Operation { source, .. } => Some(source),
            Self::EmptyLabel => None,
        }
    }
}
