//! Gaussian process surrogate with a Matérn 5/2 kernel.
//!
//! The default [`Surrogate`] implementation. Training observations are
//! standardized (zero mean, unit variance) and a GP with a Matérn 5/2
//! kernel (ARD lengthscales set to the per-dimension standard deviation of
//! the training inputs) is fitted via Cholesky decomposition of
//! `K + σ²I`. Predictions are un-standardized back to observation units,
//! so [`sigma`](Surrogate::sigma) is comparable across retrains.
//!
//! Fitting cost is O(n³) in the number of observations; every retrain uses
//! the full training set, so a freshly trained model always reflects every
//! observation it was given.
//!
//! # Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `noise_variance` | 1e-6 | Observation noise added to the kernel diagonal |
//!
//! # Examples
//!
//! ```
//! use mobo::surrogate::{MaternGp, Surrogate};
//!
//! let mut gp = MaternGp::builder().noise_variance(1e-4).build();
//! gp.train(&[vec![0.0], vec![0.5], vec![1.0]], &[0.0, 0.25, 1.0])
//!     .unwrap();
//!
//! // Uncertainty is near zero at a training point...
//! assert!(gp.sigma(&[0.5]) < 0.1);
//! // ...and the mean interpolates the data
//! assert!((gp.mu(&[0.5]) - 0.25).abs() < 0.1);
//! ```

use nalgebra::DMatrix;

use crate::error::{Error, Result};

use super::Surrogate;

/// Default observation noise variance.
const DEFAULT_NOISE_VAR: f64 = 1e-6;

/// Precomputed √5 constant.
const SQRT_5: f64 = 2.236_067_977_499_79;

/// Gaussian process surrogate (Matérn 5/2, ARD lengthscales).
///
/// Before the first successful [`train`](Surrogate::train) call the model
/// answers with its prior: `mu = 0`, `sigma = 1`.
///
/// # Examples
///
/// ```
/// use mobo::surrogate::{MaternGp, Surrogate};
///
/// let gp = MaternGp::new();
/// // Untrained prior
/// assert!((gp.mu(&[0.3]) - 0.0).abs() < f64::EPSILON);
/// assert!((gp.sigma(&[0.3]) - 1.0).abs() < f64::EPSILON);
/// ```
pub struct MaternGp {
    noise_variance: f64,
    fitted: Option<Fitted>,
}

/// A fitted GP ready for predictions.
struct Fitted {
    /// Cholesky factor of `K + σ²I`.
    cholesky: nalgebra::linalg::Cholesky<f64, nalgebra::Dyn>,
    /// `α = (K + σ²I)^{-1} y` (standardized targets).
    alpha: nalgebra::DVector<f64>,
    /// Training inputs, one row per observation.
    x_train: Vec<Vec<f64>>,
    /// ARD lengthscales per dimension.
    lengthscales: Vec<f64>,
    /// Signal variance (1.0: targets are standardized).
    signal_var: f64,
    /// Mean of the original targets, for un-standardization.
    y_mean: f64,
    /// Std dev of the original targets, for un-standardization.
    y_std: f64,
}

impl MaternGp {
    /// Creates a GP with the default noise variance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            noise_variance: DEFAULT_NOISE_VAR,
            fitted: None,
        }
    }

    /// Creates a builder for configuring a [`MaternGp`].
    #[must_use]
    pub fn builder() -> MaternGpBuilder {
        MaternGpBuilder::default()
    }
}

impl Default for MaternGp {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`MaternGp`].
///
/// # Examples
///
/// ```
/// use mobo::surrogate::MaternGp;
///
/// let gp = MaternGp::builder().noise_variance(1e-4).build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct MaternGpBuilder {
    noise_variance: Option<f64>,
}

impl MaternGpBuilder {
    /// Sets the observation noise variance added to the kernel diagonal.
    ///
    /// Larger values make the GP smoother and more tolerant of noisy
    /// observations. Default: 1e-6 (near-noiseless).
    #[must_use]
    pub fn noise_variance(mut self, v: f64) -> Self {
        self.noise_variance = Some(v);
        self
    }

    /// Builds the configured [`MaternGp`].
    #[must_use]
    pub fn build(self) -> MaternGp {
        MaternGp {
            noise_variance: self.noise_variance.unwrap_or(DEFAULT_NOISE_VAR),
            fitted: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Matérn 5/2 kernel
// ---------------------------------------------------------------------------

/// Matérn 5/2 kernel with ARD lengthscales.
///
/// `k(x1, x2) = σ² (1 + √5 r + 5/3 r²) exp(-√5 r)`
/// where `r = sqrt(Σ ((x1_i - x2_i) / l_i)²)`
fn matern52(x1: &[f64], x2: &[f64], lengthscales: &[f64], signal_var: f64) -> f64 {
    let mut r_sq = 0.0;
    for i in 0..x1.len() {
        let diff = (x1[i] - x2[i]) / lengthscales[i];
        r_sq += diff * diff;
    }
    let r = r_sq.sqrt();
    let sqrt5_r = SQRT_5 * r;
    signal_var * (1.0 + sqrt5_r + 5.0 / 3.0 * r_sq) * (-sqrt5_r).exp()
}

/// Build the kernel matrix `K + σ²I`.
fn kernel_matrix(
    x: &[Vec<f64>],
    lengthscales: &[f64],
    signal_var: f64,
    noise_var: f64,
) -> DMatrix<f64> {
    let n = x.len();
    DMatrix::from_fn(n, n, |i, j| {
        let k = matern52(&x[i], &x[j], lengthscales, signal_var);
        if i == j { k + noise_var } else { k }
    })
}

/// Compute the kernel vector `k(x*, X)` for a test point.
fn kernel_vector(
    x_star: &[f64],
    x_train: &[Vec<f64>],
    lengthscales: &[f64],
    signal_var: f64,
) -> nalgebra::DVector<f64> {
    nalgebra::DVector::from_fn(x_train.len(), |i, _| {
        matern52(x_star, &x_train[i], lengthscales, signal_var)
    })
}

// ---------------------------------------------------------------------------
// Fitting and prediction
// ---------------------------------------------------------------------------

#[allow(clippy::cast_precision_loss)]
fn fit(x_train: &[Vec<f64>], y_train: &[f64], noise_var: f64) -> Result<Fitted> {
    let n = y_train.len();
    if n == 0 || x_train.len() != n {
        return Err(Error::SurrogateTraining {
            reason: format!(
                "training set is inconsistent: {} inputs, {} targets",
                x_train.len(),
                n
            ),
        });
    }

    // Standardize y
    let y_mean = y_train.iter().sum::<f64>() / n as f64;
    let y_var = if n > 1 {
        y_train.iter().map(|&y| (y - y_mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        1.0
    };
    let y_std = y_var.sqrt().max(1e-10);
    let y_standardized: Vec<f64> = y_train.iter().map(|&y| (y - y_mean) / y_std).collect();

    // ARD lengthscales: per-dimension std dev of training X, clamped
    let d = x_train[0].len();
    let lengthscales: Vec<f64> = (0..d)
        .map(|j| {
            let mean_j = x_train.iter().map(|x| x[j]).sum::<f64>() / n as f64;
            let var_j = x_train
                .iter()
                .map(|x| (x[j] - mean_j).powi(2))
                .sum::<f64>()
                / n as f64;
            var_j.sqrt().max(0.01)
        })
        .collect();

    // Signal variance = 1.0 (targets are standardized)
    let signal_var = 1.0;

    let k = kernel_matrix(x_train, &lengthscales, signal_var, noise_var);
    let Some(cholesky) = nalgebra::linalg::Cholesky::new(k) else {
        return Err(Error::SurrogateTraining {
            reason: "Cholesky decomposition of the kernel matrix failed (singular or \
                     non-positive-definite; consider a larger noise variance)"
                .into(),
        });
    };

    // α = (K + σ²I)^{-1} y
    let y_vec = nalgebra::DVector::from_column_slice(&y_standardized);
    let alpha = cholesky.solve(&y_vec);

    Ok(Fitted {
        cholesky,
        alpha,
        x_train: x_train.to_vec(),
        lengthscales,
        signal_var,
        y_mean,
        y_std,
    })
}

/// Predict mean and standard deviation (standardized space) at a point.
fn predict(model: &Fitted, x: &[f64]) -> (f64, f64) {
    let k_star = kernel_vector(x, &model.x_train, &model.lengthscales, model.signal_var);

    // Mean: k*^T α
    let mean = k_star.dot(&model.alpha);

    // Variance: k(x*, x*) - k*^T (K + σ²I)^{-1} k*
    let v = model.cholesky.solve(&k_star);
    let var = (model.signal_var - k_star.dot(&v)).max(0.0);

    (mean, var.sqrt())
}

impl Surrogate for MaternGp {
    fn train(&mut self, inputs: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        self.fitted = Some(fit(inputs, targets, self.noise_variance)?);
        Ok(())
    }

    fn mu(&self, point: &[f64]) -> f64 {
        self.fitted.as_ref().map_or(0.0, |m| {
            let (mean, _) = predict(m, point);
            mean * m.y_std + m.y_mean
        })
    }

    fn sigma(&self, point: &[f64]) -> f64 {
        self.fitted.as_ref().map_or(1.0, |m| {
            let (_, std) = predict(m, point);
            std * m.y_std
        })
    }
}
