//! Integration tests for the optimization driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use mobo::prelude::*;

/// The two-objective trade-off `(x, 1 - x)` over a scalar in [0, 1].
fn tradeoff(x: &[f64]) -> mobo::Result<Vec<f64>> {
    Ok(vec![x[0], 1.0 - x[0]])
}

// ---------------------------------------------------------------------------
// End-to-end behavior
// ---------------------------------------------------------------------------

#[test]
fn test_end_to_end_scenario() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(3))
        .seed(42)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    assert_eq!(study.iteration(), 3);
    assert_eq!(study.observations().len(), 4);
    assert_eq!(study.observations().all()[0].point, vec![0.5]);
    for obs in study.observations().all() {
        assert!(study.bounds().contains(&obs.point));
        assert_eq!(obs.values.len(), 2);
        assert!((obs.values[0] + obs.values[1] - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_monotonic_growth_in_evaluation_order() {
    let evaluated = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&evaluated);
    let mut evaluator = move |x: &[f64]| {
        log.borrow_mut().push(x.to_vec());
        Ok::<_, Error>(vec![x[0], 1.0 - x[0]])
    };

    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_samples(2)
        .continuation(MaxIterations(5))
        .seed(3)
        .build()
        .unwrap();

    study.optimize(&mut evaluator, true).unwrap();

    assert_eq!(study.observations().len(), 2 + 5);
    // The store holds exactly the evaluated points, in evaluation order.
    let stored: Vec<Vec<f64>> = study.observations().points();
    assert_eq!(stored, *evaluated.borrow());
}

#[test]
fn test_seeded_runs_are_deterministic() {
    let run = || {
        let mut study = Study::builder()
            .bounds(Bounds::unit(1))
            .objectives(2)
            .initial_samples(2)
            .continuation(MaxIterations(4))
            .seed(99)
            .build()
            .unwrap();
        study.optimize(&mut tradeoff, true).unwrap();
        study.observations().points()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_resume_without_reset() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(3))
        .seed(8)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();
    assert_eq!(study.observations().len(), 4);

    // The iteration budget is exhausted, so resuming evaluates nothing...
    study.optimize(&mut tradeoff, false).unwrap();
    assert_eq!(study.observations().len(), 4);
    assert_eq!(study.iteration(), 3);

    // ...while a reset starts over: fresh batch, fresh counter.
    study.optimize(&mut tradeoff, true).unwrap();
    assert_eq!(study.observations().len(), 4);
    assert_eq!(study.iteration(), 3);
}

#[test]
fn test_empty_initial_batch_still_samples_one_point() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_samples(0)
        .continuation(MaxIterations(2))
        .seed(5)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    // One seed point before the first model update, plus two iterations.
    assert_eq!(study.observations().len(), 3);
    assert_eq!(study.iteration(), 2);
}

#[test]
fn test_selected_points_come_from_the_pool() {
    let pool_points = vec![vec![0.25], vec![0.75]];
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .pool(FixedPool::new(pool_points.clone()))
        .continuation(MaxIterations(6))
        .seed(21)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    for obs in &study.observations().all()[1..] {
        assert!(
            pool_points.contains(&obs.point),
            "evaluated point {:?} was never offered by the pool",
            obs.point
        );
    }
}

// ---------------------------------------------------------------------------
// Model freshness
// ---------------------------------------------------------------------------

/// Test double that records how many observations it was trained on and
/// checks, at query time, that this matches the number of evaluations
/// completed so far — i.e. that it is never queried while stale.
struct FreshnessProbe {
    completed_evals: Rc<Cell<usize>>,
    trained_on: Cell<usize>,
    train_log: Rc<RefCell<Vec<usize>>>,
}

impl Surrogate for FreshnessProbe {
    fn train(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> mobo::Result<()> {
        assert_eq!(inputs.len(), targets.len());
        self.trained_on.set(inputs.len());
        self.train_log.borrow_mut().push(inputs.len());
        Ok(())
    }

    fn mu(&self, _point: &[f64]) -> f64 {
        0.0
    }

    fn sigma(&self, _point: &[f64]) -> f64 {
        assert_eq!(
            self.trained_on.get(),
            self.completed_evals.get(),
            "surrogate queried while trained on a strict subset of the store"
        );
        1.0
    }
}

#[test]
fn test_models_are_never_queried_stale() {
    let completed_evals = Rc::new(Cell::new(0));
    let train_log = Rc::new(RefCell::new(Vec::new()));

    let evals = Rc::clone(&completed_evals);
    let mut evaluator = move |x: &[f64]| {
        evals.set(evals.get() + 1);
        Ok::<_, Error>(vec![x[0], 1.0 - x[0]])
    };

    let factory_evals = Rc::clone(&completed_evals);
    let factory_log = Rc::clone(&train_log);
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_samples(2)
        .continuation(MaxIterations(4))
        .seed(13)
        .surrogate_factory(move || {
            Box::new(FreshnessProbe {
                completed_evals: Rc::clone(&factory_evals),
                trained_on: Cell::new(0),
                train_log: Rc::clone(&factory_log),
            })
        })
        .build()
        .unwrap();

    study.optimize(&mut evaluator, true).unwrap();

    // Both models retrain every iteration on the full store: sizes 2, 3,
    // 4, 5 — twice each.
    assert_eq!(*train_log.borrow(), vec![2, 2, 3, 3, 4, 4, 5, 5]);
}

// ---------------------------------------------------------------------------
// Statistics sink
// ---------------------------------------------------------------------------

#[test]
fn test_sink_records_once_per_iteration() {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink_log = Rc::clone(&snapshots);

    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(3))
        .stats(move |state: &StudyState<'_>| {
            sink_log
                .borrow_mut()
                .push((state.iteration, state.observations.len()));
        })
        .seed(1)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    // One snapshot per completed iteration, none for the initial batch.
    assert_eq!(*snapshots.borrow(), vec![(1, 2), (2, 3), (3, 4)]);
}

// ---------------------------------------------------------------------------
// Failure semantics
// ---------------------------------------------------------------------------

#[test]
fn test_evaluation_failure_is_fatal() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut evaluator = move |x: &[f64]| {
        counter.set(counter.get() + 1);
        if counter.get() > 3 {
            Err("simulator crashed".to_string())
        } else {
            Ok(vec![x[0], 1.0 - x[0]])
        }
    };

    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(10))
        .seed(2)
        .build()
        .unwrap();

    let err = study.optimize(&mut evaluator, true).unwrap_err();
    match err {
        Error::Evaluation { iteration, reason } => {
            assert_eq!(iteration, 2);
            assert!(reason.contains("simulator crashed"));
        }
        other => panic!("expected Error::Evaluation, got {other}"),
    }

    // No retry: exactly one failing call, and everything recorded up to
    // the failure stays available for diagnosis.
    assert_eq!(calls.get(), 4);
    assert_eq!(study.observations().len(), 3);
    assert_eq!(study.iteration(), 2);
    assert!(study.observations().last().is_ok());
}

#[test]
fn test_objective_arity_change_is_fatal() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut evaluator = move |x: &[f64]| {
        counter.set(counter.get() + 1);
        if counter.get() > 2 {
            // Suddenly a third objective value
            Ok::<_, Error>(vec![x[0], 1.0 - x[0], 0.0])
        } else {
            Ok(vec![x[0], 1.0 - x[0]])
        }
    };

    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(10))
        .seed(4)
        .build()
        .unwrap();

    let err = study.optimize(&mut evaluator, true).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 2,
            got: 3
        }
    ));
}

/// Surrogate whose fit always fails, standing in for a numerical
/// singularity.
struct SingularSurrogate;

impl Surrogate for SingularSurrogate {
    fn train(&mut self, _inputs: &[Vec<f64>], _targets: &[f64]) -> mobo::Result<()> {
        Err(Error::SurrogateTraining {
            reason: "synthetic singularity".into(),
        })
    }
    fn mu(&self, _point: &[f64]) -> f64 {
        0.0
    }
    fn sigma(&self, _point: &[f64]) -> f64 {
        1.0
    }
}

#[test]
fn test_surrogate_training_failure_is_fatal() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(10))
        .surrogate_factory(|| Box::new(SingularSurrogate))
        .seed(6)
        .build()
        .unwrap();

    let err = study.optimize(&mut tradeoff, true).unwrap_err();
    assert!(matches!(err, Error::SurrogateTraining { .. }));
    // The initial batch was evaluated; the first iteration never completed.
    assert_eq!(study.observations().len(), 1);
    assert_eq!(study.iteration(), 0);
}

#[test]
fn test_empty_candidate_pool_is_an_error() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .pool(FixedPool::new(Vec::new()))
        .continuation(MaxIterations(1))
        .seed(1)
        .build()
        .unwrap();

    let err = study.optimize(&mut tradeoff, true).unwrap_err();
    assert!(matches!(err, Error::NoCandidates));
}

#[test]
fn test_out_of_bounds_candidate_is_an_error() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .pool(FixedPool::new(vec![vec![2.0]]))
        .continuation(MaxIterations(1))
        .seed(1)
        .build()
        .unwrap();

    let err = study.optimize(&mut tradeoff, true).unwrap_err();
    assert!(matches!(err, Error::OutOfBounds { dimension: 0, .. }));
}
