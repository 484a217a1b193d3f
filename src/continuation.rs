//! Pluggable continuation predicates.
//!
//! The driver does not define its own stopping rule; it asks an injected
//! [`Continuation`] after every completed iteration whether further
//! expensive evaluations are warranted. This keeps the loop reusable
//! across stopping criteria — an iteration budget, a plateau detector, a
//! wall-clock deadline — without modification.
//!
//! Plain closures work directly:
//!
//! ```
//! use mobo::continuation::Continuation;
//! use mobo::StudyState;
//!
//! // Stop once any observation reaches a target value
//! let mut target = |state: &StudyState<'_>| {
//!     state
//!         .observations
//!         .all()
//!         .iter()
//!         .all(|o| o.values[0] > 0.01)
//! };
//! ```

use crate::driver::StudyState;

/// Decides after each iteration whether the optimization should continue.
pub trait Continuation {
    /// Returns `true` to run another iteration, `false` to stop.
    ///
    /// Takes `&mut self` so stateful predicates (plateau trackers,
    /// deadlines) can update themselves per call.
    fn should_continue(&mut self, state: &StudyState<'_>) -> bool;
}

impl<F> Continuation for F
where
    F: FnMut(&StudyState<'_>) -> bool,
{
    fn should_continue(&mut self, state: &StudyState<'_>) -> bool {
        self(state)
    }
}

/// Stop after a fixed number of iterations.
///
/// # Examples
///
/// ```
/// use mobo::continuation::{Continuation, MaxIterations};
///
/// let mut stop = MaxIterations(25);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MaxIterations(pub usize);

impl Continuation for MaxIterations {
    fn should_continue(&mut self, state: &StudyState<'_>) -> bool {
        state.iteration < self.0
    }
}
