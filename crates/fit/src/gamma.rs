//! Gamma distribution parameter type and statrs bridge.

use pluvial_exceedance::TailModel;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Gamma};

use crate::error::FitError;

/// Validated parameters for a Gamma distribution (shape/scale convention).
///
/// Both `shape` (k) and `scale` (theta) must be finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GammaParams {
    shape: f64,
    scale: f64,
}

impl GammaParams {
    /// Create new gamma parameters after validating that both `shape` and
    /// `scale` are finite and strictly positive.
    pub fn new(shape: f64, scale: f64) -> Option<Self> {
        if shape.is_finite() && shape > 0.0 && scale.is_finite() && scale > 0.0 {
            Some(Self { shape, scale })
        } else {
            None
        }
    }

    /// Method-of-moments estimate: shape = mean² / var, scale = var / mean.
    ///
    /// Returns `None` if `mean` or `var` are not finite and positive.
    pub fn from_moments(mean: f64, var: f64) -> Option<Self> {
        if !mean.is_finite() || mean <= 0.0 || !var.is_finite() || var <= 0.0 {
            return None;
        }
        Self::new((mean * mean) / var, var / mean)
    }

    /// Shape parameter (k).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter (theta).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Distribution mean (shape * scale).
    pub fn mean(&self) -> f64 {
        self.shape * self.scale
    }

    /// Distribution variance (shape * scale²).
    pub fn var(&self) -> f64 {
        self.shape * self.scale * self.scale
    }

    /// Rate parameter (1 / scale). statrs parameterises Gamma by
    /// (shape, rate).
    pub fn rate(&self) -> f64 {
        1.0 / self.scale
    }
}

impl TailModel for GammaParams {
    fn survival(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 1.0;
        }
        match gamma_dist(self) {
            Ok(dist) => dist.sf(x),
            Err(_) => f64::NAN,
        }
    }
}

/// Build a [`statrs::distribution::Gamma`] from validated [`GammaParams`].
pub(crate) fn gamma_dist(params: &GammaParams) -> Result<Gamma, FitError> {
    Gamma::new(params.shape(), params.rate()).map_err(|e| FitError::GammaConstruction {
        shape: params.shape(),
        scale: params.scale(),
        message: e.to_string(),
    })
}
