//! The [`Evaluator`] trait wraps the expensive objective function.
//!
//! The evaluator is the external collaborator the whole loop exists to
//! economize: typically a physics simulation or a real experiment that
//! takes seconds to minutes per call. The driver calls it once per
//! iteration, blocking until it returns, and treats any error as fatal to
//! the run — retrying a non-deterministic simulation with the same inputs
//! has no defined meaning, so no retry is attempted.
//!
//! Plain closures work directly:
//!
//! ```
//! use mobo::Error;
//!
//! // Two objectives over a scalar decision variable
//! let mut evaluator = |x: &[f64]| Ok::<_, Error>(vec![x[0], 1.0 - x[0]]);
//! ```
//!
//! For richer setups — owned simulator handles, per-call logging —
//! implement [`Evaluator`] on a struct:
//!
//! ```
//! use mobo::evaluator::Evaluator;
//!
//! struct GaitSimulator {
//!     step_limit: u32,
//! }
//!
//! impl Evaluator for GaitSimulator {
//!     type Error = String;
//!
//!     fn evaluate(&mut self, point: &[f64]) -> Result<Vec<f64>, String> {
//!         // run the simulation for `point`, measure speed and stability
//!         let _ = self.step_limit;
//!         Ok(vec![point.iter().sum(), 1.0])
//!     }
//! }
//! ```

/// The expensive objective function being optimized.
pub trait Evaluator {
    /// The error type returned by [`evaluate`](Self::evaluate).
    type Error: ToString + 'static;

    /// Evaluates the objectives at one decision vector, returning one
    /// value per objective.
    ///
    /// Takes `&mut self` because evaluation typically advances external
    /// state (a simulator, a robot, a test rig).
    ///
    /// # Errors
    ///
    /// Any error whose type implements `ToString`. An error aborts the
    /// optimization run without retry.
    fn evaluate(&mut self, point: &[f64]) -> Result<Vec<f64>, Self::Error>;
}

impl<F, E> Evaluator for F
where
    F: FnMut(&[f64]) -> Result<Vec<f64>, E>,
    E: ToString + 'static,
{
    type Error = E;

    fn evaluate(&mut self, point: &[f64]) -> Result<Vec<f64>, E> {
        self(point)
    }
}
