//! Error types for the pluvial-synth crate.

/// Error type for all fallible operations in the pluvial-synth crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthError {
    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let e = SynthError::InvalidConfig {
            reason: "p_wet must be in [0, 1], got 2".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid configuration: p_wet must be in [0, 1], got 2"
        );
    }

    #[test]
    fn error_buffer_length_mismatch() {
        let e = SynthError::BufferLengthMismatch {
            expected: 365,
            got: 366,
        };
        assert_eq!(
            e.to_string(),
            "buffer length mismatch: expected 365, got 366"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SynthError>();
    }
}
