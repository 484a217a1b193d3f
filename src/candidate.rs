//! Candidate generation and surrogate-based scoring.
//!
//! Each iteration the driver needs a finite set of candidate decision
//! points annotated with the per-objective predictive uncertainty of the
//! current surrogates. A [`CandidatePool`] produces the raw points; the
//! scoring step validates them against the decision-space bounds and
//! queries every surrogate for its posterior mean and standard deviation,
//! yielding [`ScoredCandidate`]s ready for the Pareto filter.
//!
//! Three pool strategies are provided:
//!
//! | Pool | Strategy |
//! |------|----------|
//! | [`UniformPool`] | n uniform random points in bounds (the default) |
//! | [`GridPool`] | per-dimension lattice, optionally jittered |
//! | [`FixedPool`] | an externally supplied candidate list |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rng_util;
use crate::surrogate::Surrogate;
use crate::types::Bounds;

/// A candidate decision point annotated with the per-objective posterior
/// mean and standard deviation of the current surrogate models.
///
/// The `sigmas` vector is the score the Pareto filter operates on; `means`
/// travel along for diagnostics and reporting.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredCandidate {
    /// The candidate decision vector.
    pub point: Vec<f64>,
    /// Posterior mean per objective.
    pub means: Vec<f64>,
    /// Posterior standard deviation per objective.
    pub sigmas: Vec<f64>,
}

/// Strategy producing the finite candidate set for one iteration.
///
/// Pools are re-invoked every iteration, so randomized pools yield a fresh
/// set each time while deterministic pools ([`GridPool`] without jitter,
/// [`FixedPool`]) repeat theirs.
pub trait CandidatePool {
    /// Produces the candidate points for the current iteration.
    fn generate(&self, bounds: &Bounds, rng: &mut fastrand::Rng) -> Vec<Vec<f64>>;
}

/// Uniform random candidates in bounds.
///
/// # Examples
///
/// ```
/// use mobo::Bounds;
/// use mobo::candidate::{CandidatePool, UniformPool};
///
/// let pool = UniformPool::new(100);
/// let mut rng = fastrand::Rng::with_seed(1);
/// let points = pool.generate(&Bounds::unit(2), &mut rng);
/// assert_eq!(points.len(), 100);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct UniformPool {
    size: usize,
}

impl UniformPool {
    /// Creates a pool producing `size` random points per iteration.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Default for UniformPool {
    /// 1000 candidates per iteration.
    fn default() -> Self {
        Self::new(1000)
    }
}

impl CandidatePool for UniformPool {
    fn generate(&self, bounds: &Bounds, rng: &mut fastrand::Rng) -> Vec<Vec<f64>> {
        (0..self.size).map(|_| bounds.sample(rng)).collect()
    }
}

/// A per-dimension lattice over the bounds, optionally jittered.
///
/// With `points_per_dim = n` the pool produces `n^d` candidates for a
/// `d`-dimensional space. A nonzero `jitter` perturbs each lattice point
/// uniformly by up to ± half a cell width times `jitter`, clamped back
/// into bounds.
#[derive(Clone, Copy, Debug)]
pub struct GridPool {
    points_per_dim: usize,
    jitter: f64,
}

impl GridPool {
    /// Creates an unjittered lattice with `points_per_dim` points per
    /// dimension.
    #[must_use]
    pub fn new(points_per_dim: usize) -> Self {
        Self {
            points_per_dim,
            jitter: 0.0,
        }
    }

    /// Sets the jitter factor in `[0, 1]`; 0 is a fixed grid, 1 perturbs
    /// by up to half a cell width.
    #[must_use]
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }
}

impl CandidatePool for GridPool {
    #[allow(clippy::cast_precision_loss)]
    fn generate(&self, bounds: &Bounds, rng: &mut fastrand::Rng) -> Vec<Vec<f64>> {
        let d = bounds.dim();
        let n = self.points_per_dim;
        if n == 0 || d == 0 {
            return Vec::new();
        }

        let total = u32::try_from(d)
            .ok()
            .and_then(|d| n.checked_pow(d))
            .unwrap_or(0);
        let mut points = Vec::with_capacity(total);

        // Enumerate the lattice via a mixed-radix counter over dimensions.
        let mut index = vec![0_usize; d];
        loop {
            let mut point = Vec::with_capacity(d);
            for (dim, &i) in index.iter().enumerate() {
                let (low, high) = bounds.interval(dim);
                let cell = (high - low) / n as f64;
                // Cell centers, so the grid never sits on the boundary.
                let mut v = low + (i as f64 + 0.5) * cell;
                if self.jitter > 0.0 {
                    let half = 0.5 * cell * self.jitter;
                    v = rng_util::f64_range(rng, v - half, v + half).clamp(low, high);
                }
                point.push(v);
            }
            points.push(point);

            // Advance the counter; stop after the last lattice point.
            let mut dim = 0;
            loop {
                index[dim] += 1;
                if index[dim] < n {
                    break;
                }
                index[dim] = 0;
                dim += 1;
                if dim == d {
                    return points;
                }
            }
        }
    }
}

/// An externally supplied candidate list, repeated every iteration.
///
/// Points are handed to scoring unmodified, so out-of-bounds entries
/// surface as errors there.
#[derive(Clone, Debug)]
pub struct FixedPool {
    points: Vec<Vec<f64>>,
}

impl FixedPool {
    /// Creates a pool from an explicit candidate list.
    #[must_use]
    pub fn new(points: Vec<Vec<f64>>) -> Self {
        Self { points }
    }
}

impl CandidatePool for FixedPool {
    fn generate(&self, _bounds: &Bounds, _rng: &mut fastrand::Rng) -> Vec<Vec<f64>> {
        self.points.clone()
    }
}

/// Scores candidate points with the current surrogate models.
///
/// Every point is validated against `bounds` first; a malformed or
/// out-of-bounds candidate aborts the iteration with an error rather than
/// being silently skipped.
pub(crate) fn score_candidates(
    models: &[Box<dyn Surrogate>],
    points: Vec<Vec<f64>>,
    bounds: &Bounds,
) -> Result<Vec<ScoredCandidate>> {
    let mut scored = Vec::with_capacity(points.len());
    for point in points {
        bounds.check(&point)?;
        let means = models.iter().map(|m| m.mu(&point)).collect();
        let sigmas = models.iter().map(|m| m.sigma(&point)).collect();
        scored.push(ScoredCandidate {
            point,
            means,
            sigmas,
        });
    }
    Ok(scored)
}
