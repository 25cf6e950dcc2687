//! Block maxima extraction.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::FitError;

/// The largest amount observed in one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualMaximum {
    pub year: i32,
    pub amount: f64,
}

/// Annual maxima of a dated daily series, in ascending year order.
///
/// A year contributes only when it holds at least `min_days` observations,
/// so partial first and last years are left out the same way
/// [`block_maxima`] drops a trailing partial block. Missing (NaN) days
/// still count towards `min_days` but are skipped when taking the maximum;
/// a year with no finite amount is omitted.
///
/// # Errors
///
/// Returns [`FitError::LengthMismatch`] if the slices differ in length.
pub fn annual_maxima(
    amounts: &[f64],
    years: &[i32],
    min_days: usize,
) -> Result<Vec<AnnualMaximum>, FitError> {
    if amounts.len() != years.len() {
        return Err(FitError::LengthMismatch {
            amounts_len: amounts.len(),
            years_len: years.len(),
        });
    }

    // year -> (days seen, running maximum)
    let mut by_year: BTreeMap<i32, (usize, Option<f64>)> = BTreeMap::new();
    for (&amount, &year) in amounts.iter().zip(years) {
        let entry = by_year.entry(year).or_insert((0, None));
        entry.0 += 1;
        if amount.is_finite() {
            entry.1 = Some(entry.1.map_or(amount, |m| m.max(amount)));
        }
    }

    let n_years = by_year.len();
    let maxima: Vec<AnnualMaximum> = by_year
        .into_iter()
        .filter(|&(_, (days, _))| days >= min_days)
        .filter_map(|(year, (_, max))| max.map(|amount| AnnualMaximum { year, amount }))
        .collect();
    debug!(n_years, n_kept = maxima.len(), min_days, "annual maxima");
    Ok(maxima)
}

/// Maxima of consecutive blocks of `block_len` days for an undated series.
///
/// Blocks are numbered from 1. A trailing partial block is dropped.
///
/// # Errors
///
/// Returns [`FitError::InvalidParameter`] if `block_len` is zero.
pub fn block_maxima(amounts: &[f64], block_len: usize) -> Result<Vec<AnnualMaximum>, FitError> {
    if block_len == 0 {
        return Err(FitError::InvalidParameter {
            reason: "block length must be >= 1".to_string(),
        });
    }

    Ok(amounts
        .chunks_exact(block_len)
        .enumerate()
        .filter_map(|(i, block)| {
            block
                .iter()
                .copied()
                .filter(|a| a.is_finite())
                .reduce(f64::max)
                .map(|amount| AnnualMaximum {
                    year: i as i32 + 1,
                    amount,
                })
        })
        .collect())
}
