//! Statistical helper functions for daily precipitation series.

use serde::Serialize;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Adjusted Fisher-Pearson sample skewness `G1`.
///
/// Returns `None` for fewer than 3 elements or zero variance.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let m = mean(data);
    let m2 = data.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / nf;
    let m3 = data.iter().map(|&x| (x - m).powi(3)).sum::<f64>() / nf;
    if m2 <= 1e-300 {
        return None;
    }
    let g1 = m3 / m2.powf(1.5);
    Some((nf * (nf - 1.0)).sqrt() / (nf - 2.0) * g1)
}

/// Quantile with linear interpolation between order statistics (type 7).
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Fraction of finite values strictly above `threshold`.
/// Returns 0.0 if there are no finite values.
pub fn wet_fraction(data: &[f64], threshold: f64) -> f64 {
    let finite = data.iter().filter(|x| x.is_finite()).count();
    if finite == 0 {
        return 0.0;
    }
    let wet = data
        .iter()
        .filter(|&&x| x.is_finite() && x > threshold)
        .count();
    wet as f64 / finite as f64
}

/// Upper percentiles of wet-day amounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WetPercentiles {
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

/// Descriptive statistics of a daily precipitation series.
///
/// Non-finite values are counted in `n` but excluded from every statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Number of observations, including non-finite ones.
    pub n: usize,
    /// Number of finite observations.
    pub n_valid: usize,
    /// Number of finite observations above the wet threshold.
    pub n_wet: usize,
    /// `n_wet / n_valid`.
    pub p_wet: f64,
    pub mean: f64,
    pub sd: f64,
    pub max: Option<f64>,
    pub wet_mean: f64,
    pub wet_sd: f64,
    pub wet_skewness: Option<f64>,
    pub wet_percentiles: Option<WetPercentiles>,
}

/// Summarise a daily precipitation series.
///
/// Days with amount strictly above `threshold` count as wet.
pub fn summarize(data: &[f64], threshold: f64) -> SeriesSummary {
    let valid: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    let mut wet: Vec<f64> = valid.iter().copied().filter(|&x| x > threshold).collect();
    wet.sort_by(|a, b| a.total_cmp(b));

    let max = valid.iter().copied().reduce(f64::max);
    let wet_percentiles = if wet.is_empty() {
        None
    } else {
        Some(WetPercentiles {
            p50: median(&wet),
            p90: quantile_type7(&wet, 0.90),
            p95: quantile_type7(&wet, 0.95),
            p99: quantile_type7(&wet, 0.99),
        })
    };

    SeriesSummary {
        n: data.len(),
        n_valid: valid.len(),
        n_wet: wet.len(),
        p_wet: wet_fraction(&valid, threshold),
        mean: mean(&valid),
        sd: sd(&valid),
        max,
        wet_mean: mean(&wet),
        wet_sd: sd(&wet),
        wet_skewness: skewness(&wet),
        wet_percentiles,
    }
}
