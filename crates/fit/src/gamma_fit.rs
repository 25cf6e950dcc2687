//! Gamma fitting for wet-day precipitation amounts.

use statrs::function::gamma::digamma;
use tracing::debug;

use crate::error::FitError;
use crate::gamma::GammaParams;

/// Method used to fit gamma distribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMethod {
    /// Method of moments estimation.
    #[default]
    Mme,
    /// Maximum likelihood with the location fixed at zero.
    Mle,
}

/// Bisection stops once the bracket is this narrow relative to its midpoint.
const MLE_REL_TOL: f64 = 1e-12;
const MLE_MAX_ITER: usize = 200;

/// Fits a Gamma distribution to wet-day amounts.
///
/// # Errors
///
/// Returns [`FitError::EmptyData`], [`FitError::NonFiniteData`] or
/// [`FitError::InsufficientData`] for unusable input, and
/// [`FitError::DegenerateSample`] when fewer than 3 distinct values are
/// present or the variance vanishes. `Mle` additionally rejects
/// non-positive values with [`FitError::NonPositiveData`].
pub fn fit_gamma(values: &[f64], method: FitMethod) -> Result<GammaParams, FitError> {
    if values.is_empty() {
        return Err(FitError::EmptyData);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFiniteData);
    }
    if values.len() < 3 {
        return Err(FitError::InsufficientData {
            n: values.len(),
            min: 3,
        });
    }
    if count_unique(values) < 3 {
        return Err(FitError::DegenerateSample {
            reason: "fewer than 3 distinct values".to_string(),
        });
    }

    let params = match method {
        FitMethod::Mme => fit_gamma_mme(values)?,
        FitMethod::Mle => fit_gamma_mle(values)?,
    };
    debug!(
        ?method,
        n = values.len(),
        shape = params.shape(),
        scale = params.scale(),
        "fitted gamma"
    );
    Ok(params)
}

fn fit_gamma_mme(values: &[f64]) -> Result<GammaParams, FitError> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

    if variance <= 1e-10 {
        return Err(FitError::DegenerateSample {
            reason: format!("variance {variance} is too small"),
        });
    }

    GammaParams::from_moments(mean, variance).ok_or_else(|| FitError::InvalidParameter {
        reason: format!("moments (mean={mean}, var={variance}) give no valid gamma"),
    })
}

/// Solves `ln k - digamma(k) = ln(mean) - mean(ln x)` for the shape `k`.
///
/// The left side decreases monotonically from +inf to 0, so bisection on a
/// bracket around the closed-form approximation always converges.
fn fit_gamma_mle(values: &[f64]) -> Result<GammaParams, FitError> {
    if let Some(&value) = values.iter().find(|&&v| v <= 0.0) {
        return Err(FitError::NonPositiveData { value });
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let mean_log = values.iter().map(|x| x.ln()).sum::<f64>() / n;
    let s = mean.ln() - mean_log;
    if !s.is_finite() || s <= 0.0 {
        return Err(FitError::DegenerateSample {
            reason: format!("log-moment statistic {s} is not positive"),
        });
    }

    let f = |k: f64| k.ln() - digamma(k) - s;

    let k0 = (3.0 - s + ((s - 3.0).powi(2) + 24.0 * s).sqrt()) / (12.0 * s);
    let mut lo = k0 / 2.0;
    let mut hi = k0 * 2.0;
    while f(lo) < 0.0 {
        lo /= 2.0;
    }
    while f(hi) > 0.0 {
        hi *= 2.0;
    }

    for _ in 0..MLE_MAX_ITER {
        let mid = 0.5 * (lo + hi);
        if f(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
        if (hi - lo) <= MLE_REL_TOL * mid {
            break;
        }
    }

    let shape = 0.5 * (lo + hi);
    GammaParams::new(shape, mean / shape).ok_or_else(|| FitError::InvalidParameter {
        reason: format!("maximum likelihood shape {shape} is invalid"),
    })
}

/// Counts the number of unique values in a slice, using an epsilon
/// tolerance of 1e-10 for floating-point comparison.
fn count_unique(values: &[f64]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    sorted
        .windows(2)
        .filter(|w| (w[1] - w[0]).abs() > 1e-10)
        .count()
        + 1
}
