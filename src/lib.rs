#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Multi-objective Bayesian optimization for expensive black-box functions.
//!
//! `mobo` searches a bounded continuous decision space for points that jointly
//! optimize several expensive-to-evaluate objectives. One probabilistic
//! surrogate model is trained per objective from the accumulated observations;
//! the next point to evaluate is drawn uniformly at random from the **Pareto
//! front of the surrogates' predictive uncertainties**, so the loop keeps
//! spending its evaluation budget where no model is confident yet.
//!
//! # Getting started
//!
//! Optimize a two-objective function on `[0, 1]` in a few lines:
//!
//! ```
//! use mobo::prelude::*;
//!
//! let mut study = Study::builder()
//!     .bounds(Bounds::unit(1))
//!     .objectives(2)
//!     .initial_samples(3)
//!     .continuation(MaxIterations(10))
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! study
//!     .optimize(&mut |x: &[f64]| Ok::<_, Error>(vec![x[0], 1.0 - x[0]]), true)
//!     .unwrap();
//!
//! assert_eq!(study.iteration(), 10);
//! assert_eq!(study.observations().len(), 13);
//! ```
//!
//! # Core concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Study`] | Drive the optimization loop: initialize, retrain, select, evaluate, record. |
//! | [`Bounds`] | The bounded hyper-rectangle being searched. |
//! | [`ObservationStore`](observation::ObservationStore) | Append-only history of (point, objective values) pairs. |
//! | [`Surrogate`](surrogate::Surrogate) | Per-objective regressor queried for posterior mean and uncertainty. |
//! | [`CandidatePool`](candidate::CandidatePool) | Strategy producing the finite candidate set each iteration. |
//! | [`Continuation`](continuation::Continuation) | Pluggable predicate deciding whether another evaluation is warranted. |
//! | [`StatsSink`](stats::StatsSink) | Fire-and-forget per-iteration snapshot hook for reporting. |
//!
//! # How a point gets picked
//!
//! 1. Every surrogate is retrained from the **full** observation store, so no
//!    stale model is ever queried.
//! 2. The candidate pool produces a finite set of in-bounds points, each
//!    scored with the vector of predictive standard deviations (one per
//!    objective).
//! 3. The [`pareto`] filter reduces the set to the candidates whose
//!    uncertainty vector is not dominated — the points no model has explored
//!    well.
//! 4. One front member is drawn uniformly at random and handed to the
//!    expensive evaluator; the result is appended to the store.
//!
//! # Feature flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on public data types | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key optimization points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod candidate;
pub mod continuation;
mod driver;
mod error;
pub mod evaluator;
pub mod observation;
pub mod pareto;
mod rng_util;
mod selection;
pub mod stats;
pub mod surrogate;
mod types;

pub use driver::{Study, StudyBuilder, StudyState};
pub use error::{Error, Result};
pub use types::{Bounds, Direction};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use mobo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::candidate::{CandidatePool, FixedPool, GridPool, ScoredCandidate, UniformPool};
    pub use crate::continuation::{Continuation, MaxIterations};
    pub use crate::driver::{Study, StudyBuilder, StudyState};
    pub use crate::error::{Error, Result};
    pub use crate::evaluator::Evaluator;
    pub use crate::observation::{Observation, ObservationStore};
    pub use crate::stats::{NopSink, StatsSink};
    pub use crate::surrogate::{MaternGp, Surrogate};
    pub use crate::types::{Bounds, Direction};
}
