//! The optimization driver.
//!
//! [`Study`] owns everything a run needs — the decision-space bounds, one
//! surrogate per objective, the observation store, the candidate pool, the
//! continuation predicate, the statistics sink, and a seeded RNG — and
//! orchestrates the per-iteration cycle:
//!
//! 1. retrain every surrogate from the full observation store;
//! 2. generate and score candidates;
//! 3. Pareto-filter the per-objective uncertainty vectors;
//! 4. draw one non-dominated candidate uniformly at random;
//! 5. evaluate it through the expensive [`Evaluator`];
//! 6. append the observation;
//! 7. advance the iteration counter;
//! 8. hand a [`StudyState`] snapshot to the statistics sink.
//!
//! Any failure — malformed candidate, surrogate fit, evaluator error —
//! aborts the run and surfaces to the caller. The loop never retries and
//! never continues in a degraded mode, since a masked failure would
//! silently corrupt the search.

mod builder;

pub use builder::StudyBuilder;

use crate::candidate::{self, CandidatePool};
use crate::continuation::Continuation;
use crate::error::{Error, Result};
use crate::evaluator::Evaluator;
use crate::observation::ObservationStore;
use crate::pareto;
use crate::selection;
use crate::stats::StatsSink;
use crate::surrogate::Surrogate;
use crate::types::{Bounds, Direction};

/// Read-only snapshot of the driver state, handed to the continuation
/// predicate and the statistics sink after every completed iteration.
pub struct StudyState<'a> {
    /// Completed optimization iterations (initialization excluded).
    pub iteration: usize,
    /// The observation history so far.
    pub observations: &'a ObservationStore,
    /// The current surrogate models, one per objective, all trained on the
    /// full history.
    pub models: &'a [Box<dyn Surrogate>],
}

/// Drives a multi-objective Bayesian optimization run.
///
/// Construct via [`Study::builder()`], then call
/// [`optimize`](Self::optimize) with the expensive evaluator. The study
/// keeps its observation history across calls, so a second
/// `optimize(…, false)` resumes where the first left off.
///
/// # Examples
///
/// ```
/// use mobo::prelude::*;
///
/// let mut study = Study::builder()
///     .bounds(Bounds::unit(1))
///     .objectives(2)
///     .initial_points(vec![vec![0.5]])
///     .continuation(MaxIterations(3))
///     .seed(7)
///     .build()
///     .unwrap();
///
/// study
///     .optimize(&mut |x: &[f64]| Ok::<_, Error>(vec![x[0], 1.0 - x[0]]), true)
///     .unwrap();
///
/// assert_eq!(study.iteration(), 3);
/// assert_eq!(study.observations().len(), 4);
/// let last = study.observations().last().unwrap();
/// assert!((last.values[0] + last.values[1] - 1.0).abs() < 1e-12);
/// ```
pub struct Study {
    bounds: Bounds,
    /// Per-dimension directions for the uncertainty front: all
    /// `Maximize`, because the least-explored candidates are preferred.
    directions: Vec<Direction>,
    models: Vec<Box<dyn Surrogate>>,
    store: ObservationStore,
    iteration: usize,
    initial_samples: usize,
    initial_points: Option<Vec<Vec<f64>>>,
    pool: Box<dyn CandidatePool>,
    continuation: Box<dyn Continuation>,
    sink: Box<dyn StatsSink>,
    rng: fastrand::Rng,
}

impl std::fmt::Debug for Study {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Study")
            .field("bounds", &self.bounds)
            .field("directions", &self.directions)
            .field("models", &self.models.len())
            .field("iteration", &self.iteration)
            .field("initial_samples", &self.initial_samples)
            .field("initial_points", &self.initial_points)
            .finish_non_exhaustive()
    }
}

impl Study {
    /// Returns a [`StudyBuilder`] for constructing a study with a fluent
    /// API.
    #[must_use]
    pub fn builder() -> StudyBuilder {
        StudyBuilder::new()
    }

    /// Runs the optimization loop until the continuation predicate stops
    /// it.
    ///
    /// If `reset` is true or no prior observations exist, the store is
    /// (re)initialized with the configured initial batch first; with
    /// `reset = false` an already-populated study resumes where it left
    /// off. The loop then repeats the retrain → score → filter → select →
    /// evaluate → record cycle, consulting the continuation predicate
    /// before every iteration.
    ///
    /// # Errors
    ///
    /// Propagates the first failure unchanged: surrogate training
    /// failures, malformed or out-of-bounds candidates, evaluator errors
    /// ([`Error::Evaluation`], carrying the iteration count), and
    /// observation arity mismatches. No retry is attempted; the
    /// observation store keeps everything recorded up to the failure for
    /// diagnosis.
    pub fn optimize<E: Evaluator>(&mut self, evaluator: &mut E, reset: bool) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span =
            tracing::info_span!("optimize", reset, objectives = self.models.len()).entered();

        self.initialize(evaluator, reset)?;

        loop {
            let state = StudyState {
                iteration: self.iteration,
                observations: &self.store,
                models: &self.models,
            };
            if !self.continuation.should_continue(&state) {
                trace_info!(
                    iteration = self.iteration,
                    observations = self.store.len(),
                    "optimization stopped"
                );
                return Ok(());
            }
            self.step(evaluator)?;
        }
    }

    /// Evaluates the initial batch when starting fresh.
    ///
    /// Guarantees at least one observation exists before the first model
    /// update: with an empty batch configuration, one random point is
    /// evaluated.
    fn initialize<E: Evaluator>(&mut self, evaluator: &mut E, reset: bool) -> Result<()> {
        if reset || self.store.is_empty() {
            self.store.clear();
            self.iteration = 0;

            let batch: Vec<Vec<f64>> = match &self.initial_points {
                Some(points) => points.clone(),
                None => (0..self.initial_samples)
                    .map(|_| self.bounds.sample(&mut self.rng))
                    .collect(),
            };
            for point in batch {
                self.bounds.check(&point)?;
                self.evaluate_and_record(evaluator, point)?;
            }
            trace_info!(batch = self.store.len(), "initial batch evaluated");
        }

        if self.store.is_empty() {
            let point = self.bounds.sample(&mut self.rng);
            self.evaluate_and_record(evaluator, point)?;
        }
        Ok(())
    }

    /// One full optimization iteration, in strict order.
    fn step<E: Evaluator>(&mut self, evaluator: &mut E) -> Result<()> {
        // (1) Retrain every surrogate from the full store, so the scoring
        // below never sees a model trained on a subset of the history.
        let inputs = self.store.points();
        for (objective, model) in self.models.iter_mut().enumerate() {
            let targets = self.store.objective_values(objective);
            model.train(&inputs, &targets)?;
            trace_debug!(objective, observations = inputs.len(), "surrogate retrained");
        }

        // (2) Candidate generation and scoring.
        let points = self.pool.generate(&self.bounds, &mut self.rng);
        if points.is_empty() {
            return Err(Error::NoCandidates);
        }
        let scored = candidate::score_candidates(&self.models, points, &self.bounds)?;

        // (3) Pareto front of the per-objective uncertainties.
        let front =
            pareto::pareto_front_indices_by(&scored, &self.directions, |c| c.sigmas.as_slice());

        // (4) Uniform random tie-break among the front.
        let chosen = &scored[front[selection::select_uniform(&front, &mut self.rng)?]];
        let point = chosen.point.clone();

        // (5) Expensive evaluation; failures are fatal, no retry.
        let values = self.evaluate_checked(evaluator, &point)?;

        trace_info!(
            iteration = self.iteration + 1,
            point = ?point,
            observed = ?values,
            expected = ?chosen.means,
            sigma = ?chosen.sigmas,
            front = front.len(),
            "iteration complete"
        );

        // (6) Record, (7) advance the counter.
        self.store.push(point, values)?;
        self.iteration += 1;

        // (8) Statistics snapshot, fire-and-forget.
        let state = StudyState {
            iteration: self.iteration,
            observations: &self.store,
            models: &self.models,
        };
        self.sink.record(&state);

        Ok(())
    }

    fn evaluate_and_record<E: Evaluator>(
        &mut self,
        evaluator: &mut E,
        point: Vec<f64>,
    ) -> Result<()> {
        let values = self.evaluate_checked(evaluator, &point)?;
        self.store.push(point, values)?;
        Ok(())
    }

    /// Calls the evaluator and validates the arity of its result against
    /// the configured objective count.
    fn evaluate_checked<E: Evaluator>(
        &mut self,
        evaluator: &mut E,
        point: &[f64],
    ) -> Result<Vec<f64>> {
        let values = evaluator.evaluate(point).map_err(|e| Error::Evaluation {
            iteration: self.iteration,
            reason: e.to_string(),
        })?;
        if values.len() != self.models.len() {
            return Err(Error::DimensionMismatch {
                expected: self.models.len(),
                got: values.len(),
            });
        }
        Ok(values)
    }

    /// Returns the observation history.
    #[must_use]
    pub fn observations(&self) -> &ObservationStore {
        &self.store
    }

    /// Returns the number of completed optimization iterations.
    ///
    /// Initial-batch evaluations do not count as iterations.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Returns the decision-space bounds.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns the surrogate models, one per objective.
    #[must_use]
    pub fn models(&self) -> &[Box<dyn Surrogate>] {
        &self.models
    }

    /// Returns a read-only snapshot of the current driver state.
    #[must_use]
    pub fn state(&self) -> StudyState<'_> {
        StudyState {
            iteration: self.iteration,
            observations: &self.store,
            models: &self.models,
        }
    }
}
