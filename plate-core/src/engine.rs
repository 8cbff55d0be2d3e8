//! Double-buffered Jacobi relaxation run to a residual tolerance.

use crate::error::PlateError;
use crate::field::{Buffer, FieldPair};
use crate::kernel::{sweep_parallel, sweep_sequential};
use crate::params::PlateParams;
use crate::progress::ProgressObserver;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WORKERS: usize = 4;

/// How a pass is spread over threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    Sequential,
    /// Rows split across a dedicated pool of `workers` threads.
    Parallel { workers: usize },
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Parallel {
            workers: DEFAULT_WORKERS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelaxConfig {
    pub epsilon: f64,
    /// Stop after this many passes even if not converged. `None` runs
    /// until convergence.
    pub max_iterations: Option<u64>,
    pub schedule: Schedule,
}

impl RelaxConfig {
    pub fn new(epsilon: f64) -> Self {
        RelaxConfig {
            epsilon,
            max_iterations: None,
            schedule: Schedule::default(),
        }
    }

    pub fn from_params(params: &PlateParams) -> Self {
        Self::new(params.epsilon())
    }

    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Converged,
    /// The configured cap was reached with the residual still above epsilon.
    IterationCap,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxOutcome {
    pub termination: Termination,
    /// Number of passes run.
    pub iterations: u64,
    /// Residual of the last pass.
    pub residual: f64,
    /// Buffer holding the final field.
    pub buffer: Buffer,
}

impl RelaxOutcome {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

pub struct RelaxationEngine {
    config: RelaxConfig,
    pool: Option<rayon::ThreadPool>,
}

impl RelaxationEngine {
    pub fn new(config: RelaxConfig) -> Result<RelaxationEngine, PlateError> {
        if config.max_iterations == Some(0) {
            return Err(PlateError::InvalidArgument {
                name: "max iterations",
                reason: "must be at least 1".into(),
            });
        }

        let pool = match config.schedule {
            Schedule::Sequential => None,
            Schedule::Parallel { workers: 0 } => {
                return Err(PlateError::InvalidArgument {
                    name: "worker count",
                    reason: "must be at least 1".into(),
                });
            }
            Schedule::Parallel { workers } => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("relax_worker_{}", i))
                    .build()
                    .map_err(|e| PlateError::WorkerPool {
                        reason: e.to_string(),
                    })?,
            ),
        };

        Ok(RelaxationEngine { config, pool })
    }

    pub fn config(&self) -> &RelaxConfig {
        &self.config
    }

    /// Runs one pass, flips the buffer roles and returns the pass residual.
    pub fn step(&self, fields: &mut FieldPair) -> f64 {
        let n = fields.n();
        let residual = {
            let (current, next) = fields.split_for_pass();
            match &self.pool {
                Some(pool) => pool.install(|| sweep_parallel(current.cells(), next.cells_mut(), n)),
                None => sweep_sequential(current.cells(), next.cells_mut(), n),
            }
        };
        fields.flip();
        residual
    }

    /// Relaxes until a pass changes no cell by more than epsilon.
    ///
    /// At least one pass always runs. With no iteration cap the loop is
    /// unbounded; a tolerance too tight for the grid will keep it running.
    pub fn run<O: ProgressObserver>(&self, fields: &mut FieldPair, observer: &mut O) -> RelaxOutcome {
        let epsilon = self.config.epsilon;
        let mut iteration = 0u64;

        let (termination, residual) = loop {
            let residual = self.step(fields);
            iteration += 1;
            observer.on_pass(iteration, residual);

            if residual <= epsilon {
                break (Termination::Converged, residual);
            }
            if self.config.max_iterations.is_some_and(|cap| iteration >= cap) {
                break (Termination::IterationCap, residual);
            }
        };

        observer.on_finish(iteration, residual);

        match termination {
            Termination::Converged => {
                tracing::info!(iterations = iteration, residual, "converged");
            }
            Termination::IterationCap => {
                tracing::warn!(
                    iterations = iteration,
                    residual,
                    epsilon,
                    "stopped at iteration cap before converging"
                );
            }
        }

        RelaxOutcome {
            termination,
            iterations: iteration,
            residual,
            buffer: fields.current_role(),
        }
    }
}
