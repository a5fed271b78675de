//! Errors returned by distance-map runs.

use std::error::Error;
use std::fmt;

use graindist_core::DistanceClass;
use graindist_grid::GridError;

use crate::config::ConfigError;

/// Errors from [`DistanceMapper::run`](crate::DistanceMapper::run) and
/// the per-channel operations.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The input grid could not be built or is malformed.
    Grid(GridError),
    /// An input violated the entry-point contract, e.g. a caller-owned
    /// output array of the wrong length.
    Precondition {
        /// Human-readable description of the violation.
        reason: String,
    },
    /// A channel hit its round limit before converging.
    SweepLimitExceeded {
        /// The channel that did not converge.
        class: DistanceClass,
        /// The configured round limit.
        limit: usize,
    },
    /// The run was cancelled through its
    /// [`CancelToken`](crate::CancelToken).
    Cancelled {
        /// The channel that observed the cancellation.
        class: DistanceClass,
        /// Rounds completed by that channel before stopping.
        sweeps: usize,
    },
}

impl EngineError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid configuration: {e}"),
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
            Self::Precondition { reason } => write!(f, "precondition violated: {reason}"),
            Self::SweepLimitExceeded { class, limit } => {
                write!(f, "{class} channel did not converge within {limit} sweeps")
            }
            Self::Cancelled { class, sweeps } => {
                write!(f, "{class} channel cancelled after {sweeps} sweeps")
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for EngineError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
