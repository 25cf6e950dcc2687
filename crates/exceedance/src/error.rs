//! Error types for the pluvial-exceedance crate.

/// Error type for all fallible operations in the pluvial-exceedance crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExceedanceError {
    /// Returned when the observation series is empty (N = 0).
    #[error("input data is empty")]
    EmptyData,

    /// Returned when no observation exceeds the wetness threshold (N_wet = 0).
    #[error("no wet observations above threshold {threshold}")]
    NoWetObservations {
        /// The wetness threshold that was applied.
        threshold: f64,
    },

    /// Returned when an observation is negative.
    #[error("negative precipitation amount {value} at index {index}")]
    NegativeAmount {
        /// Position of the offending observation.
        index: usize,
        /// The negative value.
        value: f64,
    },

    /// Returned when an observation is NaN or infinite.
    #[error("non-finite precipitation amount at index {index}")]
    NonFiniteAmount {
        /// Position of the offending observation.
        index: usize,
    },

    /// Returned when a probability argument lies outside [0, 1].
    #[error("invalid probability for {name}: {value} (must be in [0, 1])")]
    InvalidProbability {
        /// Name of the argument.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
