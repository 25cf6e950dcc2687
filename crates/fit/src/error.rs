//! Error types for the pluvial-fit crate.

use pluvial_exceedance::ExceedanceError;

/// Error type for all fallible operations in the pluvial-fit crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FitError {
    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when there are too few observations.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when input contains NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a fit requires strictly positive values.
    #[error("input data contains non-positive value {value}")]
    NonPositiveData {
        /// The offending value.
        value: f64,
    },

    /// Returned when the sample cannot identify the distribution.
    #[error("degenerate sample: {reason}")]
    DegenerateSample {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a distribution parameter is invalid.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a gamma distribution cannot be constructed.
    ///
    /// The `message` field is a `String` because statrs errors do not
    /// implement `Clone`.
    #[error("gamma construction failed (shape={shape}, scale={scale}): {message}")]
    GammaConstruction {
        /// Shape parameter that caused the failure.
        shape: f64,
        /// Scale parameter that caused the failure.
        scale: f64,
        /// Description of the failure.
        message: String,
    },

    /// Returned when amounts and years slices differ in length.
    #[error("length mismatch: amounts has {amounts_len} elements, years has {years_len}")]
    LengthMismatch {
        /// Length of the amounts slice.
        amounts_len: usize,
        /// Length of the years slice.
        years_len: usize,
    },

    /// Returned when probability conversion fails.
    #[error(transparent)]
    Exceedance(#[from] ExceedanceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let e = FitError::InsufficientData { n: 5, min: 10 };
        assert_eq!(
            e.to_string(),
            "insufficient data: got 5 observations, need at least 10"
        );
    }

    #[test]
    fn error_non_positive_data() {
        let e = FitError::NonPositiveData { value: 0.0 };
        assert_eq!(e.to_string(), "input data contains non-positive value 0");
    }

    #[test]
    fn error_degenerate_sample() {
        let e = FitError::DegenerateSample {
            reason: "zero variance".to_string(),
        };
        assert_eq!(e.to_string(), "degenerate sample: zero variance");
    }

    #[test]
    fn error_gamma_construction() {
        let e = FitError::GammaConstruction {
            shape: -1.0,
            scale: 2.0,
            message: "shape must be positive".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "gamma construction failed (shape=-1, scale=2): shape must be positive"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = FitError::LengthMismatch {
            amounts_len: 10,
            years_len: 9,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch: amounts has 10 elements, years has 9"
        );
    }

    #[test]
    fn error_exceedance_is_transparent() {
        let e = FitError::from(ExceedanceError::EmptyData);
        assert_eq!(e.to_string(), "input data is empty");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<FitError>();
    }
}
