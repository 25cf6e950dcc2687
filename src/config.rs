use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level Pluvial configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PluvialConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Synthetic generation settings.
    #[serde(default)]
    pub synth: SynthToml,

    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthToml {
    #[serde(default = "default_n_days")]
    pub n_days: usize,
    #[serde(default = "default_p_wet")]
    pub p_wet: f64,
    #[serde(default = "default_gamma_shape")]
    pub gamma_shape: f64,
    #[serde(default = "default_gamma_scale")]
    pub gamma_scale: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Default for SynthToml {
    fn default() -> Self {
        Self {
            n_days: default_n_days(),
            p_wet: default_p_wet(),
            gamma_shape: default_gamma_shape(),
            gamma_scale: default_gamma_scale(),
            start_date: None,
        }
    }
}

fn default_n_days() -> usize {
    3650
}
fn default_p_wet() -> f64 {
    0.3
}
fn default_gamma_shape() -> f64 {
    0.8
}
fn default_gamma_scale() -> f64 {
    8.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    #[serde(default)]
    pub wet_threshold: f64,
    #[serde(default = "default_days_per_year")]
    pub days_per_year: u32,
    #[serde(default = "default_fit_method")]
    pub fit_method: String,
    #[serde(default = "default_model_thresholds")]
    pub model_thresholds: Vec<f64>,
    #[serde(default = "default_return_periods")]
    pub return_periods: Vec<f64>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for AnalysisToml {
    fn default() -> Self {
        Self {
            wet_threshold: 0.0,
            days_per_year: default_days_per_year(),
            fit_method: default_fit_method(),
            model_thresholds: default_model_thresholds(),
            return_periods: default_return_periods(),
            top_n: default_top_n(),
        }
    }
}

fn default_days_per_year() -> u32 {
    365
}
fn default_fit_method() -> String {
    "mme".to_string()
}
fn default_model_thresholds() -> Vec<f64> {
    vec![10.0, 25.0, 50.0]
}
fn default_return_periods() -> Vec<f64> {
    vec![2.0, 5.0, 10.0, 25.0, 50.0, 100.0]
}
fn default_top_n() -> usize {
    20
}

/// Loads the TOML configuration, or the built-in defaults when no path is given.
pub fn load(path: Option<&Path>) -> Result<PluvialConfig> {
    let Some(path) = path else {
        return Ok(PluvialConfig::default());
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: PluvialConfig = toml::from_str("").unwrap();
        assert!(cfg.seed.is_none());
        assert_eq!(cfg.synth.n_days, 3650);
        assert_eq!(cfg.analysis.days_per_year, 365);
        assert_eq!(cfg.analysis.fit_method, "mme");
        assert_eq!(cfg.analysis.top_n, 20);
        assert_eq!(cfg.analysis.return_periods.len(), 6);
    }

    #[test]
    fn full_toml() {
        let cfg: PluvialConfig = toml::from_str(
            r#"
            seed = 7
            [synth]
            n_days = 730
            p_wet = 0.4
            gamma_shape = 1.2
            gamma_scale = 5.0
            start_date = "1990-01-01"
            [analysis]
            wet_threshold = 0.5
            fit_method = "mle"
            model_thresholds = [20.0]
            return_periods = [10.0, 100.0]
            top_n = 0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.synth.n_days, 730);
        assert_eq!(
            cfg.synth.start_date,
            Some(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap())
        );
        assert_eq!(cfg.analysis.wet_threshold, 0.5);
        assert_eq!(cfg.analysis.fit_method, "mle");
        assert_eq!(cfg.analysis.model_thresholds, vec![20.0]);
        assert_eq!(cfg.analysis.top_n, 0);
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<PluvialConfig, _> = toml::from_str("[analysis]\nbogus = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_without_path_uses_defaults() {
        let cfg = load(None).unwrap();
        assert_eq!(cfg.synth.p_wet, 0.3);
    }

    #[test]
    fn load_missing_file_fails() {
        let result = load(Some(Path::new("/nonexistent/pluvial.toml")));
        assert!(result.is_err());
    }
}
