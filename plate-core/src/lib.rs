//! Steady-state heat on a square plate by Jacobi relaxation.
//!
//! [`FieldPair::initialize`] seeds both buffers from a validated
//! [`PlateParams`]; [`RelaxationEngine::run`] iterates until the largest
//! per-cell change of a pass is at most epsilon.

pub mod checksum;
pub mod engine;
pub mod error;
pub mod field;
pub mod kernel;
pub mod params;
pub mod progress;

pub use checksum::checksum;
pub use engine::{RelaxConfig, RelaxOutcome, RelaxationEngine, Schedule, Termination, DEFAULT_WORKERS};
pub use error::PlateError;
pub use field::{plate_average, Buffer, Field, FieldPair};
pub use params::PlateParams;
pub use progress::{PowerOfTwoSampler, ProgressLog, ProgressObserver, ProgressPoint, Sampled};
