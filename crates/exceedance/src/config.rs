//! Configuration for exceedance-probability estimation.

use crate::error::ExceedanceError;

/// Number of daily trials per year used by the annualization.
pub const DAYS_PER_YEAR: u32 = 365;

/// Configuration for [`estimate_exceedance`](crate::estimate_exceedance).
///
/// # Example
///
/// ```
/// use pluvial_exceedance::ExceedanceConfig;
///
/// let config = ExceedanceConfig::new().with_wet_threshold(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct ExceedanceConfig {
    wet_threshold: f64,
    days_per_year: u32,
}

impl ExceedanceConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `wet_threshold = 0.0`, `days_per_year = 365`.
    pub fn new() -> Self {
        Self {
            wet_threshold: 0.0,
            days_per_year: DAYS_PER_YEAR,
        }
    }

    /// Sets the wetness threshold. Days with amount strictly above it are wet.
    pub fn with_wet_threshold(mut self, v: f64) -> Self {
        self.wet_threshold = v;
        self
    }

    /// Sets the number of daily trials per year.
    pub fn with_days_per_year(mut self, n: u32) -> Self {
        self.days_per_year = n;
        self
    }

    /// Returns the wetness threshold.
    pub fn wet_threshold(&self) -> f64 {
        self.wet_threshold
    }

    /// Returns the number of daily trials per year.
    pub fn days_per_year(&self) -> u32 {
        self.days_per_year
    }

    /// Validates this configuration.
    ///
    /// The threshold must be finite and non-negative and `days_per_year`
    /// must be at least 1.
    pub fn validate(&self) -> Result<(), ExceedanceError> {
        if !self.wet_threshold.is_finite() || self.wet_threshold < 0.0 {
            return Err(ExceedanceError::InvalidConfig {
                reason: format!(
                    "wet_threshold must be finite and >= 0, got {}",
                    self.wet_threshold
                ),
            });
        }
        if self.days_per_year < 1 {
            return Err(ExceedanceError::InvalidConfig {
                reason: format!("days_per_year must be >= 1, got {}", self.days_per_year),
            });
        }
        Ok(())
    }
}

impl Default for ExceedanceConfig {
    fn default() -> Self {
        Self::new()
    }
}
