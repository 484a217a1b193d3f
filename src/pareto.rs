//! Pareto dominance and non-dominated front extraction.
//!
//! In multi-objective optimization there is generally no single best
//! solution. Instead, the goal is the **Pareto front** — the subset of a
//! collection where no score dimension can be improved without worsening
//! another. This module provides the dominance test, front extraction over
//! arbitrary entities, and a hypervolume indicator for measuring front
//! quality.
//!
//! The filter is dimension-agnostic: it works for any number of score
//! dimensions `k ≥ 1` and is parameterized by a per-dimension
//! [`Direction`]. The optimization driver applies it to the per-objective
//! predictive uncertainties of its surrogate models (all
//! [`Maximize`](Direction::Maximize), preferring the least-explored
//! candidates), but nothing here is specific to that use.
//!
//! # Available functions
//!
//! | Function | Purpose |
//! |---|---|
//! | [`dominates`] | Pairwise dominance test between two score vectors |
//! | [`pareto_front_indices`] | Filter score vectors to the non-dominated subset |
//! | [`pareto_front_indices_by`] | Same, over entities exposing a score slice |
//! | [`hypervolume`] | Measure the quality of a minimization front |
//!
//! # Example
//!
//! ```
//! use mobo::Direction;
//! use mobo::pareto::pareto_front_indices;
//!
//! let scores = vec![
//!     vec![1.0, 5.0], // non-dominated
//!     vec![5.0, 1.0], // non-dominated
//!     vec![3.0, 3.0], // non-dominated
//!     vec![4.0, 4.0], // dominated by (3, 3)
//! ];
//! let dirs = [Direction::Minimize, Direction::Minimize];
//!
//! let mut front = pareto_front_indices(&scores, &dirs);
//! front.sort_unstable();
//! assert_eq!(front, vec![0, 1, 2]);
//! ```

use crate::types::Direction;

/// Returns `true` if score vector `a` Pareto-dominates score vector `b`.
///
/// `a` dominates `b` if it is at least as good in every dimension and
/// strictly better in at least one, respecting the given directions. Equal
/// vectors do not dominate each other, so ties on all dimensions mean both
/// survive a front filter.
///
/// # Panics
///
/// Panics (in debug) if `a`, `b`, and `directions` have inconsistent
/// lengths.
#[must_use]
pub fn dominates(a: &[f64], b: &[f64], directions: &[Direction]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), directions.len());

    let mut strictly_better = false;
    for ((&av, &bv), dir) in a.iter().zip(b.iter()).zip(directions.iter()) {
        let (better, worse) = match dir {
            Direction::Minimize => (av < bv, av > bv),
            Direction::Maximize => (av > bv, av < bv),
        };
        if worse {
            return false;
        }
        if better {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Filters entities to the indices of the non-dominated (Pareto-optimal)
/// subset, scoring each entity through `score`.
///
/// The selector decouples the filter from any particular entity layout:
/// the driver passes candidates and selects their uncertainty vectors, but
/// any slice-of-scores view works. Pairwise comparison, O(n²·k).
///
/// Guarantees: an empty input yields an empty output; any non-empty input
/// yields a non-empty output; entities whose scores tie on every dimension
/// all survive.
#[must_use]
pub fn pareto_front_indices_by<T, F>(items: &[T], directions: &[Direction], score: F) -> Vec<usize>
where
    F: Fn(&T) -> &[f64],
{
    let mut front = Vec::new();
    'outer: for (i, a) in items.iter().enumerate() {
        for (j, b) in items.iter().enumerate() {
            if i != j && dominates(score(b), score(a), directions) {
                continue 'outer;
            }
        }
        front.push(i);
    }
    front
}

/// Filters plain score vectors to the indices of the non-dominated subset.
///
/// Equivalent to [`pareto_front_indices_by`] with the identity selector.
#[must_use]
pub fn pareto_front_indices(scores: &[Vec<f64>], directions: &[Direction]) -> Vec<usize> {
    pareto_front_indices_by(scores, directions, |s| s.as_slice())
}

/// Compute the hypervolume indicator of a minimization front.
///
/// The hypervolume is the volume of the score space dominated by the front
/// and bounded by a reference point; a **higher** hypervolume indicates a
/// better front. `reference_point` should be worse than every front member
/// in every dimension; members that do not strictly dominate it are
/// ignored. All dimensions are treated as minimized — negate maximized
/// dimensions before calling.
///
/// Uses recursive slicing on the last dimension; cost grows with the
/// number of dimensions and the front size.
///
/// # Panics
///
/// Panics (in debug) if the dimensions of `front` and `reference_point`
/// are inconsistent.
#[must_use]
pub fn hypervolume(front: &[Vec<f64>], reference_point: &[f64]) -> f64 {
    if front.is_empty() {
        return 0.0;
    }
    let d = reference_point.len();
    debug_assert!(front.iter().all(|p| p.len() == d));

    // Keep only points strictly dominated by the reference point.
    let filtered: Vec<Vec<f64>> = front
        .iter()
        .filter(|p| p.iter().zip(reference_point).all(|(&pv, &rv)| pv < rv))
        .cloned()
        .collect();

    if filtered.is_empty() {
        return 0.0;
    }

    hv_recursive(&filtered, reference_point)
}

/// Recursive hypervolume via slicing on the last dimension.
///
/// All points are dominated by `reference`.
fn hv_recursive(points: &[Vec<f64>], reference: &[f64]) -> f64 {
    let d = reference.len();

    // Base case: 1-D hypervolume is just the gap from the best point to ref.
    if d == 1 {
        let min_val = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
        return (reference[0] - min_val).max(0.0);
    }

    // Single point: hypervolume is the product of gaps.
    if points.len() == 1 {
        return points[0]
            .iter()
            .zip(reference)
            .map(|(&p, &r)| (r - p).max(0.0))
            .product();
    }

    // Sort by last dimension ascending.
    let mut sorted: Vec<&Vec<f64>> = points.iter().collect();
    sorted.sort_by(|a, b| {
        a[d - 1]
            .partial_cmp(&b[d - 1])
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    let sub_ref: Vec<f64> = reference[..d - 1].to_vec();
    let all_min = vec![Direction::Minimize; d - 1];
    let mut result = 0.0;

    for i in 0..sorted.len() {
        let height = if i + 1 < sorted.len() {
            sorted[i + 1][d - 1] - sorted[i][d - 1]
        } else {
            reference[d - 1] - sorted[i][d - 1]
        };

        if height <= 0.0 {
            continue;
        }

        // Project points[0..=i] onto the first d-1 dimensions and keep
        // only the non-dominated subset.
        let projected: Vec<Vec<f64>> = sorted[..=i].iter().map(|p| p[..d - 1].to_vec()).collect();
        let front = pareto_front_indices(&projected, &all_min);
        let non_dom: Vec<Vec<f64>> = front.iter().map(|&j| projected[j].clone()).collect();

        if !non_dom.is_empty() {
            result += height * hv_recursive(&non_dom, &sub_ref);
        }
    }

    result
}
