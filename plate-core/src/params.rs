use crate::error::PlateError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const ORDER_RANGE: RangeInclusive<usize> = 3..=2000;
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const EPSILON_RANGE: RangeInclusive<f64> = 1e-6..=100.0;

/// Validated inputs for one plate run.
///
/// Construction is the only place ranges are checked; everything
/// downstream assumes a `PlateParams` is in range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateParams {
    n: usize,
    north: f64,
    wall: f64,
    epsilon: f64,
}

impl PlateParams {
    pub fn new(n: usize, north: f64, wall: f64, epsilon: f64) -> Result<PlateParams, PlateError> {
        if !ORDER_RANGE.contains(&n) {
            return Err(PlateError::InvalidArgument {
                name: "map order",
                reason: format!("expected 3 <= N <= 2000, got {n}"),
            });
        }
        // `contains` is false for NaN, so non-finite input lands here too.
        if !TEMPERATURE_RANGE.contains(&north) {
            return Err(PlateError::InvalidArgument {
                name: "north temperature",
                reason: format!("expected 0 <= T <= 100, got {north}"),
            });
        }
        if !TEMPERATURE_RANGE.contains(&wall) {
            return Err(PlateError::InvalidArgument {
                name: "walls temperature",
                reason: format!("expected 0 <= T <= 100, got {wall}"),
            });
        }
        if !EPSILON_RANGE.contains(&epsilon) {
            return Err(PlateError::InvalidArgument {
                name: "epsilon value",
                reason: format!("expected 1e-6 <= epsilon <= 100, got {epsilon}"),
            });
        }
        Ok(PlateParams {
            n,
            north,
            wall,
            epsilon,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn wall(&self) -> f64 {
        self.wall
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_endpoints() {
        assert!(PlateParams::new(3, 0.0, 100.0, 1e-6).is_ok());
        assert!(PlateParams::new(2000, 100.0, 0.0, 100.0).is_ok());
    }

    #[test]
    fn rejects_small_and_large_orders() {
        for n in [0, 1, 2, 2001] {
            let err = PlateParams::new(n, 50.0, 50.0, 1.0).unwrap_err();
            assert!(matches!(err, PlateError::InvalidArgument { name: "map order", .. }));
        }
    }

    #[test]
    fn rejects_out_of_range_temperatures() {
        assert!(PlateParams::new(10, -0.5, 20.0, 1.0).is_err());
        assert!(PlateParams::new(10, 20.0, 100.5, 1.0).is_err());
        assert!(PlateParams::new(10, f64::NAN, 20.0, 1.0).is_err());
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        assert!(PlateParams::new(10, 20.0, 20.0, 1e-7).is_err());
        assert!(PlateParams::new(10, 20.0, 20.0, 100.1).is_err());
        assert!(PlateParams::new(10, 20.0, 20.0, 0.0).is_err());
    }
}
