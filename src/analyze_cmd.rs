use std::collections::BTreeSet;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use pluvial_exceedance::{ExceedanceError, estimate_exceedance, model_exceedance};
use pluvial_fit::{
    MIN_GEV_MAXIMA, annual_maxima, block_maxima, fit_gamma, fit_gev, gamma_return_level,
};
use pluvial_stats::summarize;

use crate::cli::AnalyzeArgs;
use crate::config::{self, AnalysisToml};
use crate::convert;
use crate::report::{
    ExceedanceSection, GammaSection, GevSection, RecordOut, Report, ReturnLevel,
};
use crate::series::{Series, read_series};

/// Analyse a series and emit the JSON report.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _span = info_span!("analyze", input = %args.input.display()).entered();

    let cfg = config::load(args.config.as_deref())?;
    let exc_cfg = convert::build_exceedance_config(&cfg.analysis, args.wet_threshold)?;
    let method = convert::parse_fit_method(&cfg.analysis.fit_method)?;

    let series = read_series(&args.input)?;
    info!(n = series.precip.len(), dated = series.dates.is_some(), "series loaded");

    // Missing values are dropped; `valid_idx` maps back to input positions.
    let (valid_idx, values): (Vec<usize>, Vec<f64>) = series
        .precip
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .unzip();
    let n_missing = series.precip.len() - values.len();
    if n_missing > 0 {
        warn!(n_missing, "dropping missing observations");
    }

    let threshold = exc_cfg.wet_threshold();
    let summary = summarize(&series.precip, threshold);
    let result = estimate_exceedance(&values, &exc_cfg)
        .map_err(|e| to_input_index(e, &valid_idx))
        .context("exceedance estimation failed")?;
    info!(
        n = result.n(),
        n_wet = result.n_wet(),
        p_wet = result.p_wet(),
        "exceedance estimated"
    );

    let top_n = match cfg.analysis.top_n {
        0 => result.n_wet(),
        n => n,
    };
    let records = result
        .records()
        .iter()
        .take(top_n)
        .map(|rec| {
            let day_index = valid_idx[rec.index];
            let date = series.dates.as_ref().map(|d| d[day_index]);
            RecordOut::new(rec, day_index, date)
        })
        .collect();

    let exceedance = ExceedanceSection {
        n: result.n(),
        n_wet: result.n_wet(),
        p_wet: result.p_wet(),
        wet_threshold: result.wet_threshold(),
        annualization: result.annualization(),
        approximate: result.annualization().is_approximate(),
        records,
    };

    let wet: Vec<f64> = values.iter().copied().filter(|&v| v > threshold).collect();
    let gamma = match fit_gamma(&wet, method) {
        Ok(params) => {
            debug!(shape = params.shape(), scale = params.scale(), "gamma fitted");
            let model_exceedance = cfg
                .analysis
                .model_thresholds
                .iter()
                .map(|&x| model_exceedance(&params, x, result.p_wet(), &exc_cfg))
                .collect::<Result<Vec<_>, _>>()
                .context("model exceedance failed")?;
            let return_levels = return_levels(&cfg.analysis, |t| {
                gamma_return_level(&params, result.p_wet(), t, exc_cfg.days_per_year())
            });
            Some(GammaSection {
                method: cfg.analysis.fit_method.to_lowercase(),
                params,
                model_exceedance,
                return_levels,
            })
        }
        Err(e) => {
            warn!(error = %e, "gamma fit skipped");
            None
        }
    };

    let gev = gev_section(&series, &cfg.analysis)?;

    let report = Report {
        input: args.input.display().to_string(),
        summary,
        exceedance,
        gamma,
        gev,
    };
    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write report to stdout")?;
        }
    }
    Ok(())
}

/// Annual maxima (calendar years when dated, fixed blocks otherwise) and a
/// GEV fit when enough maxima are available.
fn gev_section(series: &Series, analysis: &AnalysisToml) -> Result<Option<GevSection>> {
    let min_days = analysis.days_per_year as usize;
    let (blocks, maxima) = match series.years() {
        Some(years) => {
            let maxima = annual_maxima(&series.precip, &years, min_days)?;
            let n_years = years.iter().collect::<BTreeSet<_>>().len();
            if maxima.len() < n_years {
                warn!(
                    n_dropped = n_years - maxima.len(),
                    min_days, "dropping incomplete years from annual maxima"
                );
            }
            ("calendar_year", maxima)
        }
        None => ("block", block_maxima(&series.precip, min_days)?),
    };
    if maxima.is_empty() {
        return Ok(None);
    }

    let params = if maxima.len() < MIN_GEV_MAXIMA {
        warn!(
            n_maxima = maxima.len(),
            min = MIN_GEV_MAXIMA,
            "too few maxima for GEV fit"
        );
        None
    } else {
        let amounts: Vec<f64> = maxima.iter().map(|m| m.amount).collect();
        match fit_gev(&amounts) {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(error = %e, "GEV fit failed");
                None
            }
        }
    };

    let return_levels = match &params {
        Some(p) => return_levels(analysis, |t| p.return_level(t)),
        None => Vec::new(),
    };

    Ok(Some(GevSection {
        blocks: blocks.to_string(),
        maxima,
        params,
        return_levels,
    }))
}

/// Rewrites observation indices in `err` from the filtered series back to
/// input day positions.
fn to_input_index(err: ExceedanceError, valid_idx: &[usize]) -> ExceedanceError {
    let day = |i: usize| valid_idx.get(i).copied().unwrap_or(i);
    match err {
        ExceedanceError::NegativeAmount { index, value } => ExceedanceError::NegativeAmount {
            index: day(index),
            value,
        },
        ExceedanceError::NonFiniteAmount { index } => {
            ExceedanceError::NonFiniteAmount { index: day(index) }
        }
        other => other,
    }
}

/// Evaluates `level` at each configured return period, skipping failures.
fn return_levels<E: std::fmt::Display>(
    analysis: &AnalysisToml,
    level: impl Fn(f64) -> Result<f64, E>,
) -> Vec<ReturnLevel> {
    analysis
        .return_periods
        .iter()
        .filter_map(|&t| match level(t) {
            Ok(level) => Some(ReturnLevel {
                return_period: t,
                level,
            }),
            Err(e) => {
                warn!(return_period = t, error = %e, "return level skipped");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn analyze(input: PathBuf, output: PathBuf, config: Option<PathBuf>) -> serde_json::Value {
        run(AnalyzeArgs {
            config,
            input,
            output: Some(output.clone()),
            wet_threshold: None,
        })
        .unwrap();
        let text = std::fs::read_to_string(output).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn small_text_series() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("obs.txt");
        std::fs::write(&input, "0\n5\n0\n20\n10\n").unwrap();

        let report = analyze(input, dir.path().join("report.json"), None);
        let exc = &report["exceedance"];
        assert_eq!(exc["n"], 5);
        assert_eq!(exc["n_wet"], 3);
        assert_eq!(exc["approximate"], true);
        assert_relative_eq!(exc["p_wet"].as_f64().unwrap(), 0.6);
        let records = exc["records"].as_array().unwrap();
        let days: Vec<u64> = records
            .iter()
            .map(|r| r["day_index"].as_u64().unwrap())
            .collect();
        assert_eq!(days, vec![3, 4, 1]);
        assert_eq!(records[0]["return_period"], 4.0);
        // Too few maxima for a GEV fit, and no complete block.
        assert!(report.get("gev").is_none());
    }

    #[test]
    fn missing_values_keep_input_day_index() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("obs.json");
        std::fs::write(
            &input,
            r#"{"dates": ["2001-03-01", "2001-03-02", "2001-03-03"], "precip": [null, 0.0, 7.5]}"#,
        )
        .unwrap();

        let report = analyze(input, dir.path().join("report.json"), None);
        assert_eq!(report["exceedance"]["n"], 2);
        let rec = &report["exceedance"]["records"][0];
        assert_eq!(rec["day_index"], 2);
        assert_eq!(rec["date"], "2001-03-03");
        // A three-day year is incomplete, so no annual maximum is reported.
        assert!(report.get("gev").is_none());
    }

    #[test]
    fn synthetic_decade_gets_gamma_and_gev() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("pluvial.toml");
        std::fs::write(
            &config,
            "seed = 11\n[synth]\nn_days = 7300\nstart_date = \"1980-01-01\"\n[analysis]\ntop_n = 5\n",
        )
        .unwrap();
        let series = dir.path().join("synth.json");
        crate::synth_cmd::run(crate::cli::SynthArgs {
            config: Some(config.clone()),
            output: series.clone(),
            seed: None,
            days: None,
        })
        .unwrap();

        let report = analyze(series, dir.path().join("report.json"), Some(config));
        assert_eq!(report["exceedance"]["records"].as_array().unwrap().len(), 5);
        assert_eq!(report["gamma"]["method"], "mme");
        assert_eq!(
            report["gamma"]["model_exceedance"].as_array().unwrap().len(),
            3
        );
        // 1999 ends on 26 December and is left out.
        let maxima = report["gev"]["maxima"].as_array().unwrap();
        assert_eq!(maxima.len(), 19);
        assert_eq!(maxima[18]["year"], 1998);
        assert!(report["gev"]["params"].is_object());
    }

    #[test]
    fn negative_amount_reports_input_day() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("obs.txt");
        std::fs::write(&input, "NA\nNA\n3\n-1\n").unwrap();
        let err = run(AnalyzeArgs {
            config: None,
            input,
            output: None,
            wet_threshold: None,
        })
        .unwrap_err();
        let root = err.downcast_ref::<ExceedanceError>().unwrap();
        assert!(matches!(
            root,
            ExceedanceError::NegativeAmount { index: 3, .. }
        ));
        assert!(format!("{err:#}").contains("at index 3"));
    }

    #[test]
    fn all_dry_series_fails() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("dry.txt");
        std::fs::write(&input, "0\n0\n0\n").unwrap();
        let result = run(AnalyzeArgs {
            config: None,
            input,
            output: None,
            wet_threshold: None,
        });
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("exceedance estimation failed"));
    }
}
