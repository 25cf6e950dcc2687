//! Return levels implied by a fitted wet-day Gamma distribution.

use pluvial_exceedance::daily_from_annual;
use statrs::distribution::ContinuousCDF;

use crate::error::FitError;
use crate::gamma::{GammaParams, gamma_dist};

/// Daily amount exceeded on average once every `return_period` years.
///
/// Inverts the independent-day annualization: the annual probability
/// `1 / return_period` is converted to a per-wet-day probability, which is
/// then read off the upper tail of the Gamma distribution.
///
/// # Errors
///
/// Returns [`FitError::InvalidParameter`] unless `return_period > 1`, and
/// [`FitError::Exceedance`] when the annual probability cannot be reached
/// with the given `p_wet`.
pub fn gamma_return_level(
    params: &GammaParams,
    p_wet: f64,
    return_period: f64,
    days_per_year: u32,
) -> Result<f64, FitError> {
    if !return_period.is_finite() || return_period <= 1.0 {
        return Err(FitError::InvalidParameter {
            reason: format!("return period must be finite and > 1, got {return_period}"),
        });
    }
    let p_daily = daily_from_annual(1.0 / return_period, p_wet, days_per_year)?;
    let dist = gamma_dist(params)?;
    Ok(dist.inverse_cdf(1.0 - p_daily))
}
