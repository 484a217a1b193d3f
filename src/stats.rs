//! Per-iteration statistics recording.
//!
//! After every completed iteration the driver hands the current
//! [`StudyState`] to an injected [`StatsSink`] — a fire-and-forget hook
//! for progress reporting, convergence dashboards, or dumping generations
//! to disk. The call is infallible by signature: a sink that can fail
//! internally must swallow its own errors, so reporting problems can never
//! abort an optimization run.
//!
//! Plain closures work directly:
//!
//! ```
//! use mobo::stats::StatsSink;
//! use mobo::StudyState;
//!
//! let mut history = Vec::new();
//! let mut sink = |state: &StudyState<'_>| {
//!     history.push(state.iteration);
//! };
//! ```

use crate::driver::StudyState;

/// Receives a read-only snapshot of the driver state once per completed
/// iteration.
pub trait StatsSink {
    /// Records one snapshot. Must not fail; the driver ignores anything
    /// that happens in here.
    fn record(&mut self, state: &StudyState<'_>);
}

impl<F> StatsSink for F
where
    F: FnMut(&StudyState<'_>),
{
    fn record(&mut self, state: &StudyState<'_>) {
        self(state);
    }
}

/// A sink that records nothing (the default).
#[derive(Clone, Copy, Debug, Default)]
pub struct NopSink;

impl StatsSink for NopSink {
    fn record(&mut self, _state: &StudyState<'_>) {}
}
