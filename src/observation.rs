//! Append-only storage for completed evaluations.
//!
//! Every expensive evaluation yields one [`Observation`] — the decision
//! vector that was evaluated and the objective values it produced. The
//! [`ObservationStore`] keeps them in evaluation order: surrogate training
//! and reporting both depend on that order, so observations are never
//! removed or reordered once appended.
//!
//! The driver is the store's only writer; everything else (candidate
//! scoring, selection, statistics) reads through `&` views, which is how
//! the single-writer/many-reader discipline is expressed here.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One completed evaluation: a decision vector and the objective values
/// observed for it. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// The evaluated decision vector.
    pub point: Vec<f64>,
    /// The observed objective values, one per objective.
    pub values: Vec<f64>,
}

/// Append-only, ordered collection of [`Observation`]s.
///
/// Dimensions are locked by the first append: every later observation must
/// carry the same decision-vector and objective-vector arities, otherwise
/// [`push`](Self::push) fails with [`Error::DimensionMismatch`].
///
/// # Examples
///
/// ```
/// use mobo::observation::ObservationStore;
///
/// let mut store = ObservationStore::new();
/// store.push(vec![0.5], vec![0.5, 0.5]).unwrap();
/// store.push(vec![0.2], vec![0.2, 0.8]).unwrap();
///
/// assert_eq!(store.len(), 2);
/// assert_eq!(store.last().unwrap().point, vec![0.2]);
/// // Projection onto objective 1, in evaluation order
/// assert_eq!(store.objective_values(1), vec![0.5, 0.8]);
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationStore {
    observations: Vec<Observation>,
}

impl ObservationStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns `true` if no observations have been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Appends one observation in O(1) amortized time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `point` or `values` differs
    /// in arity from the observations already stored.
    pub fn push(&mut self, point: Vec<f64>, values: Vec<f64>) -> Result<()> {
        if let Some(first) = self.observations.first() {
            if point.len() != first.point.len() {
                return Err(Error::DimensionMismatch {
                    expected: first.point.len(),
                    got: point.len(),
                });
            }
            if values.len() != first.values.len() {
                return Err(Error::DimensionMismatch {
                    expected: first.values.len(),
                    got: values.len(),
                });
            }
        }
        self.observations.push(Observation { point, values });
        Ok(())
    }

    /// Returns a read-only view of all observations in evaluation order.
    ///
    /// The view is valid until the next append.
    #[must_use]
    pub fn all(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns the most recent observation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyStore`] if nothing has been recorded yet.
    pub fn last(&self) -> Result<&Observation> {
        self.observations.last().ok_or(Error::EmptyStore)
    }

    /// Returns the evaluated decision vectors in evaluation order.
    #[must_use]
    pub fn points(&self) -> Vec<Vec<f64>> {
        self.observations.iter().map(|o| o.point.clone()).collect()
    }

    /// Projects the store onto one objective dimension: the observed value
    /// of `objective` for every observation, in evaluation order.
    ///
    /// This is the training target vector for that objective's surrogate.
    ///
    /// # Panics
    ///
    /// Panics if `objective` is out of range for the stored value vectors.
    #[must_use]
    pub fn objective_values(&self, objective: usize) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| o.values[objective])
            .collect()
    }

    /// Removes every observation. Used by the driver's reset path.
    pub fn clear(&mut self) {
        self.observations.clear();
    }
}
