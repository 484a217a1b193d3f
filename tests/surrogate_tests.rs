//! Integration tests for the GP surrogate inside the full loop.

use std::cell::RefCell;
use std::rc::Rc;

use mobo::pareto::pareto_front_indices;
use mobo::prelude::*;

fn tradeoff(x: &[f64]) -> mobo::Result<Vec<f64>> {
    Ok(vec![x[0], 1.0 - x[0]])
}

#[test]
fn test_uncertainty_drives_exploration() {
    // One observation at 0.1; the pool offers a point right next to it and
    // a point far away. The far point has higher posterior uncertainty on
    // both objectives, so it must be evaluated first; once it is observed,
    // the near point becomes the most uncertain and is evaluated next.
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.1]])
        .pool(FixedPool::new(vec![vec![0.12], vec![0.9]]))
        .continuation(MaxIterations(2))
        .seed(0)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    let points = study.observations().points();
    assert_eq!(points, vec![vec![0.1], vec![0.9], vec![0.12]]);
}

#[test]
fn test_gp_posterior_after_run() {
    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(3))
        .seed(17)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    // Models were last trained on everything except the final observation,
    // so query at an earlier training point: the posterior interpolates it
    // with near-zero uncertainty.
    let probe = &study.observations().all()[0];
    for (objective, model) in study.models().iter().enumerate() {
        assert!(
            (model.mu(&probe.point) - probe.values[objective]).abs() < 0.05,
            "posterior mean should interpolate the training data"
        );
        assert!(model.sigma(&probe.point) < 0.05);
    }
}

#[test]
fn test_observed_tradeoff_is_one_big_front() {
    // Every observation of (x, 1 - x) is Pareto-optimal under
    // minimization, so the front of the observed values always spans the
    // whole store. The sink checks this after every iteration.
    let front_sizes = Rc::new(RefCell::new(Vec::new()));
    let sink_log = Rc::clone(&front_sizes);

    let mut study = Study::builder()
        .bounds(Bounds::unit(1))
        .objectives(2)
        .initial_points(vec![vec![0.5]])
        .continuation(MaxIterations(4))
        .stats(move |state: &StudyState<'_>| {
            let values: Vec<Vec<f64>> = state
                .observations
                .all()
                .iter()
                .map(|o| o.values.clone())
                .collect();
            let front =
                pareto_front_indices(&values, &[Direction::Minimize, Direction::Minimize]);
            sink_log.borrow_mut().push((front.len(), values.len()));
        })
        .seed(23)
        .build()
        .unwrap();

    study.optimize(&mut tradeoff, true).unwrap();

    let log = front_sizes.borrow();
    assert_eq!(log.len(), 4);
    for &(front, total) in log.iter() {
        assert_eq!(front, total);
    }
}
