//! Error types for plate construction and relaxation setup.

use std::fmt;

/// Errors that can stop a run before the relaxation loop starts.
///
/// Once a [`crate::FieldPair`] exists and a [`crate::RelaxationEngine`] has
/// been built, the loop itself cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum PlateError {
    /// A run parameter is outside its accepted range.
    InvalidArgument {
        /// Parameter name as shown to the user.
        name: &'static str,
        /// Human-readable description of the valid range.
        reason: String,
    },
    /// The two field buffers could not be allocated.
    AllocationFailure {
        /// Number of cells requested per buffer.
        cells: usize,
    },
    /// The worker pool for the parallel schedule could not be started.
    WorkerPool {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for PlateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "wrong {name}: {reason}")
            }
            Self::AllocationFailure { cells } => {
                write!(f, "could not allocate two buffers of {cells} cells")
            }
            Self::WorkerPool { reason } => write!(f, "worker pool: {reason}"),
        }
    }
}

impl std::error::Error for PlateError {}
