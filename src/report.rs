//! JSON report written by `pluvial analyze`.
//!
//! Non-finite numbers (for instance an infinite return period) serialise as
//! `null`.

use chrono::NaiveDate;
use serde::Serialize;

use pluvial_exceedance::{Annualization, ModelExceedance, RankedRecord};
use pluvial_fit::{AnnualMaximum, GammaParams, GevParams};
use pluvial_stats::SeriesSummary;

#[derive(Debug, Serialize)]
pub struct Report {
    pub input: String,
    pub summary: SeriesSummary,
    pub exceedance: ExceedanceSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<GammaSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gev: Option<GevSection>,
}

#[derive(Debug, Serialize)]
pub struct ExceedanceSection {
    pub n: usize,
    pub n_wet: usize,
    pub p_wet: f64,
    pub wet_threshold: f64,
    pub annualization: Annualization,
    pub approximate: bool,
    /// Largest wet observations first. Truncated to `top_n` when non-zero.
    pub records: Vec<RecordOut>,
}

/// A ranked record mapped back to the input series.
#[derive(Debug, Serialize)]
pub struct RecordOut {
    pub rank: usize,
    pub day_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub return_period: f64,
    pub probability: f64,
    pub annual_probability: f64,
}

impl RecordOut {
    /// `day_index` is the record's position in the unfiltered input series.
    pub fn new(record: &RankedRecord, day_index: usize, date: Option<NaiveDate>) -> Self {
        Self {
            rank: record.rank,
            day_index,
            date,
            amount: record.amount,
            return_period: record.return_period,
            probability: record.probability,
            annual_probability: record.annual_probability,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnLevel {
    pub return_period: f64,
    pub level: f64,
}

#[derive(Debug, Serialize)]
pub struct GammaSection {
    pub method: String,
    pub params: GammaParams,
    pub model_exceedance: Vec<ModelExceedance>,
    pub return_levels: Vec<ReturnLevel>,
}

#[derive(Debug, Serialize)]
pub struct GevSection {
    /// `"calendar_year"` for dated input, `"block"` otherwise.
    pub blocks: String,
    pub maxima: Vec<AnnualMaximum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<GevParams>,
    pub return_levels: Vec<ReturnLevel>,
}
