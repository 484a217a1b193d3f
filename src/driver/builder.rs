use crate::candidate::{CandidatePool, UniformPool};
use crate::continuation::{Continuation, MaxIterations};
use crate::error::{Error, Result};
use crate::observation::ObservationStore;
use crate::stats::{NopSink, StatsSink};
use crate::surrogate::{MaternGp, Surrogate};
use crate::types::{Bounds, Direction};

use super::Study;

/// Default size of the initial random evaluation batch.
const DEFAULT_INITIAL_SAMPLES: usize = 1;
/// Default iteration budget when no continuation predicate is supplied.
const DEFAULT_MAX_ITERATIONS: usize = 100;

/// A builder for constructing [`Study`] instances with a fluent API.
///
/// Created via [`Study::builder()`]. `bounds` and `objectives` are
/// required; everything else has a default.
///
/// # Defaults
///
/// | Option | Default |
/// |--------|---------|
/// | Surrogate | One [`MaternGp`] per objective |
/// | Candidate pool | [`UniformPool`] with 1000 points |
/// | Continuation | [`MaxIterations`]`(100)` |
/// | Statistics sink | [`NopSink`] |
/// | `initial_samples` | 1 |
/// | `seed` | random |
///
/// # Examples
///
/// ```
/// use mobo::prelude::*;
///
/// let study = Study::builder()
///     .bounds(Bounds::new(vec![(-1.0, 1.0), (-1.0, 1.0)]).unwrap())
///     .objectives(2)
///     .initial_samples(5)
///     .pool(UniformPool::new(500))
///     .continuation(MaxIterations(20))
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(study.bounds().dim(), 2);
/// ```
#[derive(Default)]
pub struct StudyBuilder {
    bounds: Option<Bounds>,
    objectives: Option<usize>,
    initial_samples: Option<usize>,
    initial_points: Option<Vec<Vec<f64>>>,
    surrogate_factory: Option<Box<dyn Fn() -> Box<dyn Surrogate>>>,
    pool: Option<Box<dyn CandidatePool>>,
    continuation: Option<Box<dyn Continuation>>,
    sink: Option<Box<dyn StatsSink>>,
    seed: Option<u64>,
}

impl StudyBuilder {
    /// Creates a new builder with default settings.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Sets the decision-space bounds (required).
    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the number of objectives (required).
    ///
    /// One surrogate model is created per objective.
    #[must_use]
    pub fn objectives(mut self, n: usize) -> Self {
        self.objectives = Some(n);
        self
    }

    /// Sets the size of the random initial evaluation batch.
    ///
    /// Ignored when [`initial_points`](Self::initial_points) supplies an
    /// explicit batch. Default: 1.
    #[must_use]
    pub fn initial_samples(mut self, n: usize) -> Self {
        self.initial_samples = Some(n);
        self
    }

    /// Supplies an explicit, deterministic initial batch instead of
    /// random points.
    ///
    /// Points are validated against the bounds at build time.
    #[must_use]
    pub fn initial_points(mut self, points: Vec<Vec<f64>>) -> Self {
        self.initial_points = Some(points);
        self
    }

    /// Sets the factory producing one surrogate per objective.
    ///
    /// Defaults to [`MaternGp::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use mobo::prelude::*;
    ///
    /// let study = Study::builder()
    ///     .bounds(Bounds::unit(1))
    ///     .objectives(2)
    ///     .surrogate_factory(|| Box::new(MaternGp::builder().noise_variance(1e-4).build()))
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn surrogate_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Surrogate> + 'static,
    {
        self.surrogate_factory = Some(Box::new(factory));
        self
    }

    /// Sets the candidate pool strategy.
    ///
    /// Defaults to [`UniformPool`] with 1000 points per iteration.
    #[must_use]
    pub fn pool(mut self, pool: impl CandidatePool + 'static) -> Self {
        self.pool = Some(Box::new(pool));
        self
    }

    /// Sets the continuation predicate deciding when to stop.
    ///
    /// Defaults to [`MaxIterations`]`(100)`.
    #[must_use]
    pub fn continuation(mut self, continuation: impl Continuation + 'static) -> Self {
        self.continuation = Some(Box::new(continuation));
        self
    }

    /// Sets the statistics sink receiving per-iteration snapshots.
    ///
    /// Defaults to [`NopSink`].
    #[must_use]
    pub fn stats(mut self, sink: impl StatsSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sets the random seed for reproducibility.
    ///
    /// Seeds candidate generation, random initial batches, and the
    /// uniform tie-break, making a run fully deterministic for a given
    /// evaluator.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configured [`Study`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `bounds` or `objectives` is
    /// missing or zero, and [`Error::OutOfBounds`] /
    /// [`Error::DimensionMismatch`] if an explicit initial point does not
    /// fit the bounds.
    pub fn build(self) -> Result<Study> {
        let bounds = self
            .bounds
            .ok_or(Error::InvalidConfig("bounds are required"))?;
        if bounds.dim() == 0 {
            return Err(Error::InvalidConfig(
                "bounds must have at least one dimension",
            ));
        }
        let objectives = self
            .objectives
            .ok_or(Error::InvalidConfig("objective count is required"))?;
        if objectives == 0 {
            return Err(Error::InvalidConfig("at least one objective is required"));
        }

        if let Some(points) = &self.initial_points {
            for point in points {
                bounds.check(point)?;
            }
        }

        let factory = self
            .surrogate_factory
            .unwrap_or_else(|| Box::new(|| Box::new(MaternGp::new())));
        let models: Vec<Box<dyn Surrogate>> = (0..objectives).map(|_| factory()).collect();

        let rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        Ok(Study {
            bounds,
            directions: vec![Direction::Maximize; objectives],
            models,
            store: ObservationStore::new(),
            iteration: 0,
            initial_samples: self.initial_samples.unwrap_or(DEFAULT_INITIAL_SAMPLES),
            initial_points: self.initial_points,
            pool: self.pool.unwrap_or_else(|| Box::new(UniformPool::default())),
            continuation: self
                .continuation
                .unwrap_or_else(|| Box::new(MaxIterations(DEFAULT_MAX_ITERATIONS))),
            sink: self.sink.unwrap_or_else(|| Box::new(NopSink)),
            rng,
        })
    }
}
