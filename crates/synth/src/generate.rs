//! Daily series generation.

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Gamma};
use tracing::debug;

use crate::config::SynthConfig;
use crate::error::SynthError;

/// Generates a daily precipitation series.
///
/// # Errors
///
/// Returns [`SynthError::InvalidConfig`] if the configuration is invalid.
pub fn generate_series(config: &SynthConfig, rng: &mut impl Rng) -> Result<Vec<f64>, SynthError> {
    let mut out = vec![0.0; config.n_days()];
    generate_series_into(config, rng, &mut out)?;
    Ok(out)
}

/// Generates a daily precipitation series into a pre-allocated buffer.
///
/// Each day first draws a Bernoulli trial with probability `p_wet`. Wet days
/// then draw an amount from Gamma(shape, scale); dry days are 0.0. Occurrence
/// and amount draws are interleaved day by day, so the same seed always
/// yields the same series.
///
/// # Errors
///
/// Returns [`SynthError::BufferLengthMismatch`] if `out.len() != n_days`
/// and [`SynthError::InvalidConfig`] if the configuration is invalid.
pub fn generate_series_into(
    config: &SynthConfig,
    rng: &mut impl Rng,
    out: &mut [f64],
) -> Result<(), SynthError> {
    config.validate()?;
    if out.len() != config.n_days() {
        return Err(SynthError::BufferLengthMismatch {
            expected: config.n_days(),
            got: out.len(),
        });
    }

    let occurrence = Bernoulli::new(config.p_wet()).map_err(|e| SynthError::InvalidConfig {
        reason: e.to_string(),
    })?;
    let amount = Gamma::new(config.gamma_shape(), config.gamma_scale()).map_err(|e| {
        SynthError::InvalidConfig {
            reason: e.to_string(),
        }
    })?;

    let mut n_wet = 0usize;
    for slot in out.iter_mut() {
        *slot = if occurrence.sample(rng) {
            n_wet += 1;
            amount.sample(rng)
        } else {
            0.0
        };
    }

    debug!(n_days = out.len(), n_wet, "generated synthetic series");
    Ok(())
}
