//! Result types for exceedance-probability estimation.

use serde::Serialize;

use crate::annualize::Annualization;

/// A wet observation with its empirical frequency attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedRecord {
    /// 1-based rank after a stable descending sort; 1 is the largest amount.
    pub rank: usize,
    /// Position of the observation in the input series (day-index).
    pub index: usize,
    /// Precipitation amount.
    pub amount: f64,
    /// Weibull return period `(n_wet + 1) / rank`, in wet-day units.
    pub return_period: f64,
    /// Per-event exceedance probability `rank / (n_wet + 1)`.
    pub probability: f64,
    /// Probability of at least one exceedance per year.
    pub annual_probability: f64,
}

/// The output of [`estimate_exceedance`](crate::estimate_exceedance).
///
/// Records are ordered by descending amount (ascending rank).
#[derive(Debug, Clone, Serialize)]
pub struct ExceedanceResult {
    records: Vec<RankedRecord>,
    n: usize,
    n_wet: usize,
    p_wet: f64,
    wet_threshold: f64,
    annualization: Annualization,
}

impl ExceedanceResult {
    pub(crate) fn new(
        records: Vec<RankedRecord>,
        n: usize,
        wet_threshold: f64,
        annualization: Annualization,
    ) -> Self {
        let n_wet = records.len();
        Self {
            records,
            n,
            n_wet,
            p_wet: n_wet as f64 / n as f64,
            wet_threshold,
            annualization,
        }
    }

    /// Ranked records, largest amount first.
    pub fn records(&self) -> &[RankedRecord] {
        &self.records
    }

    /// Total sample size N.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of wet observations N_wet.
    pub fn n_wet(&self) -> usize {
        self.n_wet
    }

    /// Wet-day probability `n_wet / n`.
    pub fn p_wet(&self) -> f64 {
        self.p_wet
    }

    /// The wetness threshold used to select wet observations.
    pub fn wet_threshold(&self) -> f64 {
        self.wet_threshold
    }

    /// How `annual_probability` was derived. The independent-day model is an
    /// approximation; see [`Annualization::is_approximate`].
    pub fn annualization(&self) -> Annualization {
        self.annualization
    }

    /// Returns the record with the given 1-based rank.
    pub fn by_rank(&self, rank: usize) -> Option<&RankedRecord> {
        rank.checked_sub(1).and_then(|i| self.records.get(i))
    }

    /// Returns the record of the observation at `index` in the input series,
    /// if that observation was wet.
    pub fn by_index(&self, index: usize) -> Option<&RankedRecord> {
        self.records.iter().find(|r| r.index == index)
    }
}
