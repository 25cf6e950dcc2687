//! Annualized exceedance from a fitted parametric distribution.

use serde::Serialize;

use crate::annualize::{Annualization, annualize};
use crate::config::ExceedanceConfig;
use crate::error::ExceedanceError;

/// A fitted continuous distribution of wet-day amounts.
pub trait TailModel {
    /// Probability that a wet-day amount exceeds `x` (the survival function).
    fn survival(&self, x: f64) -> f64;
}

/// Exceedance of a fixed threshold under a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelExceedance {
    /// The amount whose exceedance is evaluated.
    pub threshold: f64,
    /// Per-wet-day exceedance probability from the model's survival function.
    pub p_daily: f64,
    /// Probability of at least one exceedance per year.
    pub p_annual: f64,
    /// `1 / p_annual` in years. Infinite when the threshold is never exceeded.
    pub return_period: f64,
    /// How `p_annual` was derived.
    pub annualization: Annualization,
}

/// Annualizes the model exceedance probability of `threshold`.
///
/// `p_daily` is read from the model's survival function, then combined with
/// `p_wet` exactly as the empirical estimator does for ranked records.
///
/// # Errors
///
/// Returns [`ExceedanceError::InvalidConfig`] for an invalid config or a
/// non-finite threshold, and [`ExceedanceError::InvalidProbability`] if
/// `p_wet` or the model's survival value falls outside `[0, 1]`.
pub fn model_exceedance(
    model: &impl TailModel,
    threshold: f64,
    p_wet: f64,
    config: &ExceedanceConfig,
) -> Result<ModelExceedance, ExceedanceError> {
    config.validate()?;
    if !threshold.is_finite() {
        return Err(ExceedanceError::InvalidConfig {
            reason: format!("threshold must be finite, got {threshold}"),
        });
    }

    let p_daily = model.survival(threshold);
    let p_annual = annualize(p_daily, p_wet, config.days_per_year())?;

    Ok(ModelExceedance {
        threshold,
        p_daily,
        p_annual,
        return_period: 1.0 / p_annual,
        annualization: Annualization::IndependentBernoulli {
            days_per_year: config.days_per_year(),
        },
    })
}
