//! Reading and writing daily precipitation series.
//!
//! Two formats are supported, chosen by file extension:
//!
//! - `.json`: `{"dates": ["YYYY-MM-DD", ...], "precip": [..]}` with `dates`
//!   optional and `null` amounts read as missing.
//! - anything else: one observation per line, either `amount` or
//!   `YYYY-MM-DD,amount`. Blank lines and lines starting with `#` are skipped.
//!   `NA` marks a missing amount.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A daily series with optional dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub dates: Option<Vec<NaiveDate>>,
    /// Daily amounts. Missing values are NaN.
    pub precip: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct SeriesJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    dates: Option<Vec<NaiveDate>>,
    precip: Vec<Option<f64>>,
}

impl Series {
    /// Calendar year of each day, when the series is dated.
    pub fn years(&self) -> Option<Vec<i32>> {
        self.dates
            .as_ref()
            .map(|d| d.iter().map(|date| date.year()).collect())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Reads a series from `path`.
pub fn read_series(path: &Path) -> Result<Series> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read series: {}", path.display()))?;
    let series = if is_json(path) {
        parse_json(&text)
    } else {
        parse_text(&text)
    };
    series.with_context(|| format!("failed to parse series: {}", path.display()))
}

/// Writes a series to `path`.
pub fn write_series(path: &Path, series: &Series) -> Result<()> {
    let text = if is_json(path) {
        format_json(series)?
    } else {
        format_text(series)
    };
    fs::write(path, text).with_context(|| format!("failed to write series: {}", path.display()))
}

fn parse_json(text: &str) -> Result<Series> {
    let raw: SeriesJson = serde_json::from_str(text).context("invalid series JSON")?;
    if let Some(dates) = &raw.dates {
        if dates.len() != raw.precip.len() {
            bail!(
                "dates has {} entries but precip has {}",
                dates.len(),
                raw.precip.len()
            );
        }
    }
    Ok(Series {
        dates: raw.dates,
        precip: raw
            .precip
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect(),
    })
}

fn format_json(series: &Series) -> Result<String> {
    let raw = SeriesJson {
        dates: series.dates.clone(),
        precip: series
            .precip
            .iter()
            .map(|&v| v.is_finite().then_some(v))
            .collect(),
    };
    serde_json::to_string_pretty(&raw).context("failed to serialise series")
}

fn parse_amount(s: &str, line_no: usize) -> Result<f64> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("na") {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("line {line_no}: invalid amount {s:?}"))
}

fn parse_text(text: &str) -> Result<Series> {
    let mut dates = Vec::new();
    let mut precip = Vec::new();
    let mut dated: Option<bool> = None;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (date, amount) = match line.split_once(',') {
            Some((d, a)) => {
                let date = NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                    .with_context(|| format!("line {line_no}: invalid date {:?}", d.trim()))?;
                (Some(date), parse_amount(a, line_no)?)
            }
            None => (None, parse_amount(line, line_no)?),
        };

        match dated {
            None => dated = Some(date.is_some()),
            Some(d) if d != date.is_some() => {
                bail!("line {line_no}: mixes dated and undated observations")
            }
            Some(_) => {}
        }

        if let Some(date) = date {
            dates.push(date);
        }
        precip.push(amount);
    }

    Ok(Series {
        dates: dated.unwrap_or(false).then_some(dates),
        precip,
    })
}

fn format_text(series: &Series) -> String {
    let mut out = String::with_capacity(series.precip.len() * 16);
    for (i, &amount) in series.precip.iter().enumerate() {
        let value = if amount.is_finite() {
            format!("{amount}")
        } else {
            "NA".to_string()
        };
        match &series.dates {
            Some(dates) => out.push_str(&format!("{},{value}\n", dates[i].format("%Y-%m-%d"))),
            None => out.push_str(&format!("{value}\n")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn text_undated() {
        let s = parse_text("# header\n1.5\n\n0\nNA\n12\n").unwrap();
        assert!(s.dates.is_none());
        assert_eq!(s.precip.len(), 4);
        assert_eq!(s.precip[0], 1.5);
        assert!(s.precip[2].is_nan());
    }

    #[test]
    fn text_dated() {
        let s = parse_text("2000-12-31,3.0\n2001-01-01, 0.5\n").unwrap();
        assert_eq!(s.dates, Some(vec![ymd(2000, 12, 31), ymd(2001, 1, 1)]));
        assert_eq!(s.years(), Some(vec![2000, 2001]));
        assert_eq!(s.precip, vec![3.0, 0.5]);
    }

    #[test]
    fn text_mixed_rejected() {
        let err = parse_text("2000-01-01,1.0\n2.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn text_bad_amount_reports_line() {
        let err = parse_text("1.0\nabc\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn json_nulls_are_missing() {
        let s = parse_json(r#"{"precip": [1.0, null, 0.0]}"#).unwrap();
        assert!(s.dates.is_none());
        assert!(s.precip[1].is_nan());
    }

    #[test]
    fn json_length_mismatch() {
        let text = r#"{"dates": ["2000-01-01"], "precip": [1.0, 2.0]}"#;
        assert!(parse_json(text).is_err());
    }

    #[test]
    fn file_round_trip_both_formats() {
        let dir = tempdir().unwrap();
        let series = Series {
            dates: Some(vec![ymd(2010, 6, 1), ymd(2010, 6, 2), ymd(2010, 6, 3)]),
            precip: vec![0.0, 4.25, f64::NAN],
        };

        for name in ["s.json", "s.txt"] {
            let path = dir.path().join(name);
            write_series(&path, &series).unwrap();
            let back = read_series(&path).unwrap();
            assert_eq!(back.dates, series.dates);
            assert_eq!(back.precip[..2], series.precip[..2]);
            assert!(back.precip[2].is_nan());
        }
    }

    #[test]
    fn missing_file_has_context() {
        let err = read_series(Path::new("/nonexistent/series.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read series"));
    }
}
