//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use pluvial_exceedance::ExceedanceConfig;
use pluvial_fit::FitMethod;
use pluvial_synth::SynthConfig;

/// Parses a Gamma fitting method name into the corresponding enum variant.
pub fn parse_fit_method(s: &str) -> Result<FitMethod> {
    match s.to_lowercase().as_str() {
        "mme" | "moments" => Ok(FitMethod::Mme),
        "mle" => Ok(FitMethod::Mle),
        other => bail!("unknown fit method: {other:?}"),
    }
}

/// Builds a [`SynthConfig`] from the TOML synth section.
pub fn build_synth_config(t: &SynthToml, n_days: Option<usize>) -> Result<SynthConfig> {
    let cfg = SynthConfig::new(n_days.unwrap_or(t.n_days))
        .with_p_wet(t.p_wet)
        .with_gamma(t.gamma_shape, t.gamma_scale);
    cfg.validate().context("invalid [synth] configuration")?;
    Ok(cfg)
}

/// Builds an [`ExceedanceConfig`] from the TOML analysis section.
pub fn build_exceedance_config(
    t: &AnalysisToml,
    wet_threshold: Option<f64>,
) -> Result<ExceedanceConfig> {
    let cfg = ExceedanceConfig::new()
        .with_wet_threshold(wet_threshold.unwrap_or(t.wet_threshold))
        .with_days_per_year(t.days_per_year);
    cfg.validate().context("invalid [analysis] configuration")?;
    Ok(cfg)
}
