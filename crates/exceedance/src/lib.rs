//! Empirical exceedance probabilities and return periods for daily
//! precipitation.
//!
//! # Pipeline
//!
//! 1. **Filter** observations strictly above the wetness threshold
//! 2. **Rank** wet amounts largest first with a stable sort (ties keep input order)
//! 3. **Weibull plotting position**: return period `(n_wet + 1) / m`,
//!    probability `m / (n_wet + 1)`
//! 4. **Annualize**: `1 - (1 - p * p_wet)^365`
//!
//! The annualization treats days as independent Bernoulli trials and ignores
//! wet-spell persistence. It is an approximation and is flagged as such on
//! every result.
//!
//! # Quick Start
//!
//! ```
//! use pluvial_exceedance::{ExceedanceConfig, estimate_exceedance};
//!
//! let amounts = [0.0, 5.0, 0.0, 20.0, 10.0];
//! let result = estimate_exceedance(&amounts, &ExceedanceConfig::new()).unwrap();
//!
//! assert_eq!(result.n_wet(), 3);
//! assert_eq!(result.records()[0].amount, 20.0);
//! assert_eq!(result.records()[0].return_period, 4.0);
//! ```

mod annualize;
mod config;
mod error;
mod model;
mod rank;
mod result;

pub use annualize::{Annualization, annualize, daily_from_annual};
pub use config::{DAYS_PER_YEAR, ExceedanceConfig};
pub use error::ExceedanceError;
pub use model::{ModelExceedance, TailModel, model_exceedance};
pub use result::{ExceedanceResult, RankedRecord};

use tracing::debug;

/// Validates the observation series.
fn validate_amounts(amounts: &[f64]) -> Result<(), ExceedanceError> {
    if amounts.is_empty() {
        return Err(ExceedanceError::EmptyData);
    }
    for (index, &value) in amounts.iter().enumerate() {
        if !value.is_finite() {
            return Err(ExceedanceError::NonFiniteAmount { index });
        }
        if value < 0.0 {
            return Err(ExceedanceError::NegativeAmount { index, value });
        }
    }
    Ok(())
}

/// Estimates the empirical return period and exceedance probabilities of
/// every wet observation.
///
/// # Arguments
///
/// * `amounts` — Daily precipitation amounts in series order. The position
///   of each value is its day-index.
/// * `config` — Wetness threshold and days per year.
///
/// # Errors
///
/// Returns [`ExceedanceError::EmptyData`] if `amounts` is empty,
/// [`ExceedanceError::NonFiniteAmount`] or [`ExceedanceError::NegativeAmount`]
/// for invalid observations, and [`ExceedanceError::NoWetObservations`] if no
/// amount exceeds the threshold. Nothing is returned on error.
pub fn estimate_exceedance(
    amounts: &[f64],
    config: &ExceedanceConfig,
) -> Result<ExceedanceResult, ExceedanceError> {
    config.validate()?;
    validate_amounts(amounts)?;

    let threshold = config.wet_threshold();
    let ranked = rank::rank_wet(amounts, threshold);
    if ranked.is_empty() {
        return Err(ExceedanceError::NoWetObservations { threshold });
    }

    let n = amounts.len();
    let n_wet = ranked.len();
    let p_wet = n_wet as f64 / n as f64;
    let plotting_base = (n_wet + 1) as f64;
    let days = config.days_per_year();

    let records: Vec<RankedRecord> = ranked
        .into_iter()
        .map(|r| {
            let m = r.rank as f64;
            let probability = m / plotting_base;
            RankedRecord {
                rank: r.rank,
                index: r.index,
                amount: r.amount,
                return_period: plotting_base / m,
                probability,
                annual_probability: annualize::annualize_unchecked(probability, p_wet, days),
            }
        })
        .collect();

    debug!(n, n_wet, p_wet, threshold, "ranked wet observations");

    Ok(ExceedanceResult::new(
        records,
        n,
        threshold,
        Annualization::IndependentBernoulli {
            days_per_year: days,
        },
    ))
}
