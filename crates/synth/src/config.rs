//! Configuration for synthetic series generation.

use crate::error::SynthError;

/// Parameters of the occurrence/amount model.
///
/// # Example
///
/// ```
/// use pluvial_synth::SynthConfig;
///
/// let config = SynthConfig::new(3650)
///     .with_p_wet(0.25)
///     .with_gamma(0.7, 10.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SynthConfig {
    n_days: usize,
    p_wet: f64,
    gamma_shape: f64,
    gamma_scale: f64,
}

impl SynthConfig {
    /// Creates a configuration for `n_days` days.
    ///
    /// Defaults: `p_wet = 0.3`, `gamma_shape = 0.8`, `gamma_scale = 8.0`.
    pub fn new(n_days: usize) -> Self {
        Self {
            n_days,
            p_wet: 0.3,
            gamma_shape: 0.8,
            gamma_scale: 8.0,
        }
    }

    /// Sets the daily wet probability.
    pub fn with_p_wet(mut self, p: f64) -> Self {
        self.p_wet = p;
        self
    }

    /// Sets the shape and scale of the wet-day amount distribution.
    pub fn with_gamma(mut self, shape: f64, scale: f64) -> Self {
        self.gamma_shape = shape;
        self.gamma_scale = scale;
        self
    }

    /// Returns the number of days to generate.
    pub fn n_days(&self) -> usize {
        self.n_days
    }

    /// Returns the daily wet probability.
    pub fn p_wet(&self) -> f64 {
        self.p_wet
    }

    /// Returns the Gamma shape parameter.
    pub fn gamma_shape(&self) -> f64 {
        self.gamma_shape
    }

    /// Returns the Gamma scale parameter.
    pub fn gamma_scale(&self) -> f64 {
        self.gamma_scale
    }

    /// Validates this configuration.
    ///
    /// `p_wet` must lie in `[0, 1]`; shape and scale must be finite and
    /// positive.
    pub fn validate(&self) -> Result<(), SynthError> {
        if !self.p_wet.is_finite() || !(0.0..=1.0).contains(&self.p_wet) {
            return Err(SynthError::InvalidConfig {
                reason: format!("p_wet must be in [0, 1], got {}", self.p_wet),
            });
        }
        if !self.gamma_shape.is_finite() || self.gamma_shape <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "gamma_shape must be finite and > 0, got {}",
                    self.gamma_shape
                ),
            });
        }
        if !self.gamma_scale.is_finite() || self.gamma_scale <= 0.0 {
            return Err(SynthError::InvalidConfig {
                reason: format!(
                    "gamma_scale must be finite and > 0, got {}",
                    self.gamma_scale
                ),
            });
        }
        Ok(())
    }
}
