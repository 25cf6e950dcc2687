//! Conversion between daily and annual exceedance probabilities.
//!
//! Daily exceedances are treated as independent Bernoulli trials, one per
//! day, each succeeding with probability `p_event * p_wet`. Wet-spell
//! persistence is ignored, so the annual figure is an approximation.

use serde::Serialize;

use crate::error::ExceedanceError;

/// Describes how a daily probability was turned into an annual one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annualization {
    /// `1 - (1 - p)^days_per_year`, assuming independent days.
    IndependentBernoulli {
        /// Number of daily trials per year.
        days_per_year: u32,
    },
}

impl Annualization {
    /// Returns `true` when the conversion is an approximation rather than an
    /// exact result. Always true for the independent-day model.
    pub fn is_approximate(&self) -> bool {
        match self {
            Self::IndependentBernoulli { .. } => true,
        }
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ExceedanceError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ExceedanceError::InvalidProbability { name, value })
    }
}

/// Annual probability of at least one exceedance, without argument checks.
///
/// Evaluated as `-expm1(days * ln1p(-p))` so tiny daily probabilities do not
/// cancel to zero.
pub(crate) fn annualize_unchecked(p_event: f64, p_wet: f64, days_per_year: u32) -> f64 {
    -(days_per_year as f64 * (-p_event * p_wet).ln_1p()).exp_m1()
}

/// Annualizes a per-wet-day exceedance probability.
///
/// Returns `1 - (1 - p_event * p_wet)^days_per_year`.
///
/// # Errors
///
/// Returns [`ExceedanceError::InvalidProbability`] if either probability is
/// outside `[0, 1]` and [`ExceedanceError::InvalidConfig`] if
/// `days_per_year` is zero.
pub fn annualize(p_event: f64, p_wet: f64, days_per_year: u32) -> Result<f64, ExceedanceError> {
    check_probability("p_event", p_event)?;
    check_probability("p_wet", p_wet)?;
    if days_per_year == 0 {
        return Err(ExceedanceError::InvalidConfig {
            reason: "days_per_year must be >= 1, got 0".to_string(),
        });
    }
    Ok(annualize_unchecked(p_event, p_wet, days_per_year))
}

/// Inverts [`annualize`]: the per-wet-day probability whose annualized
/// value equals `p_annual`.
///
/// # Errors
///
/// Returns [`ExceedanceError::InvalidProbability`] if an argument is outside
/// `[0, 1]`, if `p_wet` is zero, or if the requested annual probability
/// cannot be reached with the given wet-day fraction.
pub fn daily_from_annual(
    p_annual: f64,
    p_wet: f64,
    days_per_year: u32,
) -> Result<f64, ExceedanceError> {
    check_probability("p_annual", p_annual)?;
    check_probability("p_wet", p_wet)?;
    if p_wet == 0.0 {
        return Err(ExceedanceError::InvalidProbability {
            name: "p_wet",
            value: p_wet,
        });
    }
    if days_per_year == 0 {
        return Err(ExceedanceError::InvalidConfig {
            reason: "days_per_year must be >= 1, got 0".to_string(),
        });
    }

    let per_day = -((-p_annual).ln_1p() / days_per_year as f64).exp_m1();
    let p_event = per_day / p_wet;
    if p_event > 1.0 {
        return Err(ExceedanceError::InvalidProbability {
            name: "p_annual",
            value: p_annual,
        });
    }
    Ok(p_event)
}
