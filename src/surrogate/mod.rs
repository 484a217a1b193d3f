//! Surrogate model trait and implementations.
//!
//! A surrogate is a cheap statistical stand-in for one expensive objective:
//! it is retrained from every observation seen so far and then queried for a
//! posterior mean and a posterior uncertainty at arbitrary points. The
//! driver keeps one surrogate per objective and retrains all of them at the
//! start of every iteration, so a model is never queried while it reflects
//! only a subset of the store.
//!
//! The provided implementation is [`MaternGp`], a Gaussian process with a
//! Matérn 5/2 kernel. Externally fitted models plug in through the
//! [`Surrogate`] trait:
//!
//! ```
//! use mobo::Result;
//! use mobo::surrogate::Surrogate;
//!
//! /// A nearest-observation model: predicts the value of the closest
//! /// training point, with uncertainty growing with distance to it.
//! struct Nearest {
//!     data: Vec<(Vec<f64>, f64)>,
//! }
//!
//! impl Surrogate for Nearest {
//!     fn train(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
//!         self.data = inputs.iter().cloned().zip(targets.iter().copied()).collect();
//!         Ok(())
//!     }
//!
//!     fn mu(&self, point: &[f64]) -> f64 {
//!         self.closest(point).map_or(0.0, |(_, y)| y)
//!     }
//!
//!     fn sigma(&self, point: &[f64]) -> f64 {
//!         self.closest(point).map_or(1.0, |(d, _)| d)
//!     }
//! }
//!
//! impl Nearest {
//!     fn closest(&self, point: &[f64]) -> Option<(f64, f64)> {
//!         self.data
//!             .iter()
//!             .map(|(x, y)| {
//!                 let d = x
//!                     .iter()
//!                     .zip(point)
//!                     .map(|(a, b)| (a - b) * (a - b))
//!                     .sum::<f64>()
//!                     .sqrt();
//!                 (d, *y)
//!             })
//!             .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap())
//!     }
//! }
//! ```

mod gp;

pub use gp::{MaternGp, MaternGpBuilder};

use crate::error::Result;

/// Per-objective probabilistic regressor.
///
/// Implementations must be fully retrainable: [`train`](Self::train)
/// replaces whatever the model learned before with a fit of the given data,
/// and afterwards [`mu`](Self::mu)/[`sigma`](Self::sigma) answer for the
/// new fit only. Partially trained states must never be observable.
pub trait Surrogate {
    /// Fits the model to `(inputs[i], targets[i])` pairs, replacing any
    /// previous fit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SurrogateTraining`](crate::Error::SurrogateTraining)
    /// on numerical failure. A failed fit aborts the optimization run; the
    /// driver never continues with a stale or partial model.
    fn train(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()>;

    /// Returns the posterior mean prediction at `point`.
    fn mu(&self, point: &[f64]) -> f64;

    /// Returns the posterior standard deviation at `point`, `≥ 0`.
    fn sigma(&self, point: &[f64]) -> f64;
}
