#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the lower bound is greater than the upper bound.
    #[error("invalid bounds: low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a decision or objective vector has the wrong arity.
    #[error("dimension mismatch: expected {expected} dimensions but got {got}")]
    DimensionMismatch {
        /// The expected number of dimensions.
        expected: usize,
        /// The actual number of dimensions.
        got: usize,
    },

    /// Returned when a candidate lies outside the decision-space bounds.
    #[error(
        "candidate out of bounds: dimension {dimension} has value {value}, outside [{low}, {high}]"
    )]
    OutOfBounds {
        /// The offending dimension.
        dimension: usize,
        /// The offending coordinate value.
        value: f64,
        /// The lower bound of that dimension.
        low: f64,
        /// The upper bound of that dimension.
        high: f64,
    },

    /// Returned when reading from an observation store with no observations.
    #[error("observation store is empty")]
    EmptyStore,

    /// Returned when the selection policy is handed an empty non-dominated set.
    #[error("selection from an empty non-dominated set")]
    EmptySelection,

    /// Returned when the candidate pool produces no candidates.
    #[error("candidate pool produced no candidates")]
    NoCandidates,

    /// Returned when fitting a surrogate model fails numerically.
    #[error("surrogate training failed: {reason}")]
    SurrogateTraining {
        /// Why the fit failed.
        reason: String,
    },

    /// Returned when the external evaluation callable fails.
    ///
    /// The run aborts without retry; `iteration` records how many
    /// optimization iterations had completed when the failure occurred.
    #[error("evaluation failed at iteration {iteration}: {reason}")]
    Evaluation {
        /// Completed iterations at the time of failure.
        iteration: usize,
        /// The evaluator's error message.
        reason: String,
    },

    /// Returned when a study is configured inconsistently.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
