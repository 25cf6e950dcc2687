//! Generalized Extreme Value distribution for annual maxima.
//!
//! F(x) = exp(-(1 + xi*(x-mu)/sigma)^(-1/xi)), with location mu, scale sigma
//! and shape xi.
//!
//! - xi > 0: Frechet (heavy upper tail)
//! - xi = 0: Gumbel (exponential tail)
//! - xi < 0: reversed Weibull (bounded upper tail)

use serde::Serialize;
use tracing::debug;

use crate::error::FitError;

/// Below this magnitude the shape is treated as exactly zero (Gumbel).
const GUMBEL_EPS: f64 = 1e-8;
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Minimum number of block maxima accepted by [`fit_gev`].
pub const MIN_GEV_MAXIMA: usize = 10;

/// Validated GEV parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GevParams {
    location: f64,
    scale: f64,
    shape: f64,
}

impl GevParams {
    /// Returns `None` unless all parameters are finite and `scale > 0`.
    pub fn new(location: f64, scale: f64, shape: f64) -> Option<Self> {
        if location.is_finite() && scale.is_finite() && scale > 0.0 && shape.is_finite() {
            Some(Self {
                location,
                scale,
                shape,
            })
        } else {
            None
        }
    }

    /// Location parameter (mu).
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Scale parameter (sigma).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shape parameter (xi).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// `-ln F(x)`, or `None` outside the support.
    fn neg_log_cdf(&self, x: f64) -> Option<f64> {
        let z = (x - self.location) / self.scale;
        if self.shape.abs() < GUMBEL_EPS {
            Some((-z).exp())
        } else {
            let t = 1.0 + self.shape * z;
            if t <= 0.0 {
                None
            } else {
                Some(t.powf(-1.0 / self.shape))
            }
        }
    }

    /// Cumulative distribution function.
    pub fn cdf(&self, x: f64) -> f64 {
        match self.neg_log_cdf(x) {
            Some(y) => (-y).exp(),
            // Below the lower bound for xi > 0, above the upper bound for xi < 0.
            None if self.shape > 0.0 => 0.0,
            None => 1.0,
        }
    }

    /// Probability that an annual maximum exceeds `x`.
    pub fn survival(&self, x: f64) -> f64 {
        match self.neg_log_cdf(x) {
            Some(y) => -(-y).exp_m1(),
            None if self.shape > 0.0 => 1.0,
            None => 0.0,
        }
    }

    /// Quantile function. Returns NaN for `p` outside (0, 1).
    pub fn quantile(&self, p: f64) -> f64 {
        if !(p > 0.0 && p < 1.0) {
            return f64::NAN;
        }
        let y = -p.ln();
        if self.shape.abs() < GUMBEL_EPS {
            self.location - self.scale * y.ln()
        } else {
            self.location + self.scale * (y.powf(-self.shape) - 1.0) / self.shape
        }
    }

    /// Amount exceeded on average once every `return_period` years.
    ///
    /// # Errors
    ///
    /// Returns [`FitError::InvalidParameter`] unless `return_period > 1`.
    pub fn return_level(&self, return_period: f64) -> Result<f64, FitError> {
        if !return_period.is_finite() || return_period <= 1.0 {
            return Err(FitError::InvalidParameter {
                reason: format!("return period must be finite and > 1, got {return_period}"),
            });
        }
        Ok(self.quantile(1.0 - 1.0 / return_period))
    }

    /// Return period in years of an annual maximum exceeding `x`.
    /// Infinite above a bounded upper tail.
    pub fn return_period(&self, x: f64) -> f64 {
        1.0 / self.survival(x)
    }

    /// Log-density of a single observation.
    pub fn log_pdf(&self, x: f64) -> f64 {
        gev_log_pdf(x, self.location, self.scale, self.shape)
    }
}

fn gev_log_pdf(x: f64, mu: f64, sigma: f64, xi: f64) -> f64 {
    if sigma <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let z = (x - mu) / sigma;

    if xi.abs() < GUMBEL_EPS {
        -sigma.ln() - z - (-z).exp()
    } else {
        let t = 1.0 + xi * z;
        if t <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let inv_xi = 1.0 / xi;
        -sigma.ln() - (1.0 + inv_xi) * t.ln() - t.powf(-inv_xi)
    }
}

/// Fits a GEV distribution to block maxima by maximum likelihood.
///
/// Starts from the Gumbel method-of-moments estimate and runs coordinate
/// descent with shrinking step sizes. The shape is kept in (-0.5, 1.0),
/// where the likelihood is regular.
///
/// # Errors
///
/// Returns [`FitError::InsufficientData`] for fewer than
/// [`MIN_GEV_MAXIMA`] values, [`FitError::NonFiniteData`] for NaN or
/// infinite input and [`FitError::DegenerateSample`] for constant input.
pub fn fit_gev(maxima: &[f64]) -> Result<GevParams, FitError> {
    if maxima.len() < MIN_GEV_MAXIMA {
        return Err(FitError::InsufficientData {
            n: maxima.len(),
            min: MIN_GEV_MAXIMA,
        });
    }
    if maxima.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFiniteData);
    }

    let n = maxima.len() as f64;
    let mean = maxima.iter().sum::<f64>() / n;
    let std = (maxima.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
    if std <= 1e-12 {
        return Err(FitError::DegenerateSample {
            reason: "block maxima are constant".to_string(),
        });
    }

    let mut sigma = std * 6.0_f64.sqrt() / std::f64::consts::PI;
    let mut mu = mean - EULER_GAMMA * sigma;
    let mut xi = 0.0_f64;

    let neg_ll = |mu: f64, sigma: f64, xi: f64| -> f64 {
        let ll: f64 = maxima.iter().map(|&x| gev_log_pdf(x, mu, sigma, xi)).sum();
        if ll.is_nan() || ll.is_infinite() {
            f64::INFINITY
        } else {
            -ll
        }
    };

    let base_steps = [0.5, 0.2, 0.05, 0.01, 0.002];
    for &base in &base_steps {
        let mu_step = base * std;
        let sigma_step = base * sigma.max(0.1);
        let xi_step = base * 0.5;

        for _ in 0..200 {
            let mut improved = false;

            for &delta in &[-mu_step, mu_step] {
                if neg_ll(mu + delta, sigma, xi) < neg_ll(mu, sigma, xi) {
                    mu += delta;
                    improved = true;
                }
            }
            for &delta in &[-sigma_step, sigma_step] {
                let new_sigma = sigma + delta;
                if new_sigma > 1e-6 && neg_ll(mu, new_sigma, xi) < neg_ll(mu, sigma, xi) {
                    sigma = new_sigma;
                    improved = true;
                }
            }
            for &delta in &[-xi_step, xi_step] {
                let new_xi = xi + delta;
                if new_xi > -0.5 && new_xi < 1.0 && neg_ll(mu, sigma, new_xi) < neg_ll(mu, sigma, xi)
                {
                    xi = new_xi;
                    improved = true;
                }
            }

            if !improved {
                break;
            }
        }
    }

    debug!(n = maxima.len(), mu, sigma, xi, "fitted gev");

    GevParams::new(mu, sigma, xi).ok_or_else(|| FitError::InvalidParameter {
        reason: format!("gev fit produced invalid parameters ({mu}, {sigma}, {xi})"),
    })
}
