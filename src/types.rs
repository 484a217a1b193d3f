//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rng_util;

/// The preference direction for one score dimension.
///
/// The Pareto filter compares score vectors dimension by dimension; each
/// dimension declares whether lower or higher values are better. With
/// all-[`Minimize`](Direction::Minimize) directions the filter follows the
/// plain lower-is-better convention; the optimization driver compares
/// predictive uncertainties under [`Maximize`](Direction::Maximize), since
/// the least-explored candidates are the ones worth evaluating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Lower values are better.
    Minimize,
    /// Higher values are better.
    Maximize,
}

/// The bounded hyper-rectangle being searched.
///
/// Each decision-space dimension has an inclusive `[low, high]` interval.
/// Decision vectors are valid only if every coordinate lies inside its
/// interval.
///
/// # Examples
///
/// ```
/// use mobo::Bounds;
///
/// // The unit hypercube [0, 1]^3
/// let bounds = Bounds::unit(3);
/// assert_eq!(bounds.dim(), 3);
/// assert!(bounds.contains(&[0.2, 0.5, 1.0]));
/// assert!(!bounds.contains(&[0.2, 1.5, 1.0]));
///
/// // Custom intervals per dimension
/// let bounds = Bounds::new(vec![(-5.0, 5.0), (0.0, 10.0)]).unwrap();
/// assert_eq!(bounds.dim(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    intervals: Vec<(f64, f64)>,
}

impl Bounds {
    /// Creates bounds from per-dimension `(low, high)` intervals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] if any interval has `low > high`
    /// or a non-finite endpoint.
    pub fn new(intervals: Vec<(f64, f64)>) -> Result<Self> {
        for &(low, high) in &intervals {
            if !(low.is_finite() && high.is_finite()) || low > high {
                return Err(Error::InvalidBounds { low, high });
            }
        }
        Ok(Self { intervals })
    }

    /// Creates the unit hypercube `[0, 1]^dim`.
    #[must_use]
    pub fn unit(dim: usize) -> Self {
        Self {
            intervals: vec![(0.0, 1.0); dim],
        }
    }

    /// Returns the number of decision-space dimensions.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.intervals.len()
    }

    /// Returns the `(low, high)` interval for one dimension.
    ///
    /// # Panics
    ///
    /// Panics if `dimension >= self.dim()`.
    #[must_use]
    pub fn interval(&self, dimension: usize) -> (f64, f64) {
        self.intervals[dimension]
    }

    /// Returns `true` if `point` has the right arity and every coordinate
    /// lies inside its interval.
    #[must_use]
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.intervals.len()
            && point
                .iter()
                .zip(&self.intervals)
                .all(|(&v, &(low, high))| v >= low && v <= high)
    }

    /// Validates a candidate point against these bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] on wrong arity and
    /// [`Error::OutOfBounds`] naming the first offending coordinate.
    pub fn check(&self, point: &[f64]) -> Result<()> {
        if point.len() != self.intervals.len() {
            return Err(Error::DimensionMismatch {
                expected: self.intervals.len(),
                got: point.len(),
            });
        }
        for (dimension, (&value, &(low, high))) in
            point.iter().zip(&self.intervals).enumerate()
        {
            if !(value >= low && value <= high) {
                return Err(Error::OutOfBounds {
                    dimension,
                    value,
                    low,
                    high,
                });
            }
        }
        Ok(())
    }

    /// Draws one uniform random point inside the bounds.
    #[must_use]
    pub fn sample(&self, rng: &mut fastrand::Rng) -> Vec<f64> {
        self.intervals
            .iter()
            .map(|&(low, high)| rng_util::f64_range(rng, low, high))
            .collect()
    }
}
