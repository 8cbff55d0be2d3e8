//! Progress reporting, kept out of the numerical loop.
//!
//! The engine calls a [`ProgressObserver`] after every pass and once more
//! when it stops. Observers here sample passes at 1, 2, 4, 8, … and always
//! forward the final pair.

use serde::Serialize;

/// Receives `(iteration, residual)` after each pass.
pub trait ProgressObserver {
    fn on_pass(&mut self, iteration: u64, residual: f64);

    /// Called once when the loop stops, with the last pass.
    fn on_finish(&mut self, _iteration: u64, _residual: f64) {}
}

impl ProgressObserver for () {
    fn on_pass(&mut self, _iteration: u64, _residual: f64) {}
}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &mut T {
    fn on_pass(&mut self, iteration: u64, residual: f64) {
        (**self).on_pass(iteration, residual);
    }

    fn on_finish(&mut self, iteration: u64, residual: f64) {
        (**self).on_finish(iteration, residual);
    }
}

/// Decides which passes are worth printing.
#[derive(Clone, Debug)]
pub struct PowerOfTwoSampler {
    next_print: u64,
}

impl Default for PowerOfTwoSampler {
    fn default() -> Self {
        PowerOfTwoSampler { next_print: 1 }
    }
}

impl PowerOfTwoSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_emit(&mut self, iteration: u64) -> bool {
        if iteration == self.next_print {
            self.next_print = self.next_print.saturating_mul(2);
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub iteration: u64,
    pub residual: f64,
    /// Set on the pair emitted when the loop stops.
    pub last: bool,
}

/// Forwards sampled points and the final pair to `sink`.
pub struct Sampled<S> {
    sampler: PowerOfTwoSampler,
    sink: S,
}

impl<S: FnMut(ProgressPoint)> Sampled<S> {
    pub fn new(sink: S) -> Self {
        Sampled {
            sampler: PowerOfTwoSampler::new(),
            sink,
        }
    }
}

impl<S: FnMut(ProgressPoint)> ProgressObserver for Sampled<S> {
    fn on_pass(&mut self, iteration: u64, residual: f64) {
        if self.sampler.should_emit(iteration) {
            tracing::debug!(iteration, residual, "progress");
            (self.sink)(ProgressPoint {
                iteration,
                residual,
                last: false,
            });
        }
    }

    fn on_finish(&mut self, iteration: u64, residual: f64) {
        (self.sink)(ProgressPoint {
            iteration,
            residual,
            last: true,
        });
    }
}

/// Records sampled points in memory.
#[derive(Clone, Debug, Default)]
pub struct ProgressLog {
    sampler: PowerOfTwoSampler,
    points: Vec<ProgressPoint>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[ProgressPoint] {
        &self.points
    }

    pub fn iterations(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.iteration).collect()
    }
}

impl ProgressObserver for ProgressLog {
    fn on_pass(&mut self, iteration: u64, residual: f64) {
        if self.sampler.should_emit(iteration) {
            self.points.push(ProgressPoint {
                iteration,
                residual,
                last: false,
            });
        }
    }

    fn on_finish(&mut self, iteration: u64, residual: f64) {
        self.points.push(ProgressPoint {
            iteration,
            residual,
            last: true,
        });
    }
}
