//! Integration tests for ranked exceedance records.

use approx::assert_relative_eq;
use pluvial_exceedance::{
    ExceedanceConfig, ExceedanceError, TailModel, annualize, estimate_exceedance,
    model_exceedance,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Gamma as GammaDist};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Daily series where each day is wet with probability `p_wet` and wet
/// amounts are Gamma(0.8, 8.0).
fn synthetic_series(n: usize, p_wet: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = GammaDist::new(0.8, 8.0).expect("valid gamma params");
    (0..n)
        .map(|_| {
            if rng.random_bool(p_wet) {
                dist.sample(&mut rng)
            } else {
                0.0
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. reference_scenario
// ---------------------------------------------------------------------------
#[test]
fn reference_scenario() {
    let amounts = [0.0, 5.0, 0.0, 20.0, 10.0];
    let result = estimate_exceedance(&amounts, &ExceedanceConfig::new()).unwrap();

    assert_eq!(result.n(), 5);
    assert_eq!(result.n_wet(), 3);
    assert_relative_eq!(result.p_wet(), 0.6);

    let records = result.records();
    let amounts: Vec<f64> = records.iter().map(|r| r.amount).collect();
    let ranks: Vec<usize> = records.iter().map(|r| r.rank).collect();
    assert_eq!(amounts, vec![20.0, 10.0, 5.0]);
    assert_eq!(ranks, vec![1, 2, 3]);

    assert_relative_eq!(records[0].return_period, 4.0);
    assert_relative_eq!(records[1].return_period, 2.0);
    assert_relative_eq!(records[2].return_period, 4.0 / 3.0);

    assert_eq!(records[0].probability, 0.25);
    assert_eq!(records[1].probability, 0.5);
    assert_eq!(records[2].probability, 0.75);

    let expected = 1.0 - (1.0 - 0.25_f64 * 0.6).powf(365.0);
    assert_relative_eq!(records[0].annual_probability, expected);
    assert!(records[0].annual_probability > 0.999_999);
    assert!(result.annualization().is_approximate());
}

// ---------------------------------------------------------------------------
// 2. ranks_are_a_permutation
// ---------------------------------------------------------------------------
#[test]
fn ranks_are_a_permutation() {
    let amounts = synthetic_series(3650, 0.3, 42);
    let result = estimate_exceedance(&amounts, &ExceedanceConfig::new()).unwrap();

    let mut ranks: Vec<usize> = result.records().iter().map(|r| r.rank).collect();
    ranks.sort_unstable();
    let expected: Vec<usize> = (1..=result.n_wet()).collect();
    assert_eq!(ranks, expected);
}

// ---------------------------------------------------------------------------
// 3. return_period_monotone
// ---------------------------------------------------------------------------
#[test]
fn return_period_monotone() {
    let amounts = synthetic_series(2000, 0.4, 7);
    let result = estimate_exceedance(&amounts, &ExceedanceConfig::new()).unwrap();
    let records = result.records();

    for w in records.windows(2) {
        assert!(w[0].return_period >= w[1].return_period);
        assert!(w[0].amount >= w[1].amount);
    }

    let n_wet = result.n_wet() as f64;
    let last = records.last().unwrap();
    assert_relative_eq!(last.return_period, (n_wet + 1.0) / n_wet);
    assert_relative_eq!(records[0].return_period, n_wet + 1.0);
}

// ---------------------------------------------------------------------------
// 4. probability_is_exact_plotting_position
// ---------------------------------------------------------------------------
#[test]
fn probability_is_exact_plotting_position() {
    let amounts = synthetic_series(1500, 0.5, 11);
    let result = estimate_exceedance(&amounts, &ExceedanceConfig::new()).unwrap();
    let base = (result.n_wet() + 1) as f64;

    for r in result.records() {
        assert_eq!(r.probability, r.rank as f64 / base);
        assert!(r.probability > 0.0 && r.probability <= 1.0);
    }
}

// ---------------------------------------------------------------------------
// 5. annual_probability_bounded_and_monotone
// ---------------------------------------------------------------------------
#[test]
fn annual_probability_bounded_and_monotone() {
    let amounts = synthetic_series(5000, 0.05, 3);
    let result = estimate_exceedance(&amounts, &ExceedanceConfig::new()).unwrap();

    let mut prev = 0.0;
    for r in result.records() {
        assert!((0.0..=1.0).contains(&r.annual_probability));
        assert!(r.annual_probability >= prev);
        prev = r.annual_probability;
    }
}

// ---------------------------------------------------------------------------
// 6. ties_follow_input_order
// ---------------------------------------------------------------------------
#[test]
fn ties_follow_input_order() {
    let result = estimate_exceedance(&[5.0, 5.0, 5.0], &ExceedanceConfig::new()).unwrap();
    let records = result.records();

    let indices: Vec<usize> = records.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    // Ties do not share a return period: each rank gets its own.
    assert_relative_eq!(records[0].return_period, 4.0);
    assert_relative_eq!(records[1].return_period, 2.0);
    assert_relative_eq!(records[2].return_period, 4.0 / 3.0);
}

// ---------------------------------------------------------------------------
// 7. wet_threshold_excludes_drizzle
// ---------------------------------------------------------------------------
#[test]
fn wet_threshold_excludes_drizzle() {
    let amounts = [0.2, 0.5, 0.6, 3.0, 0.0];
    let config = ExceedanceConfig::new().with_wet_threshold(0.5);
    let result = estimate_exceedance(&amounts, &config).unwrap();

    assert_eq!(result.n_wet(), 2);
    assert_relative_eq!(result.p_wet(), 0.4);
    assert_eq!(result.wet_threshold(), 0.5);

    let config = ExceedanceConfig::new().with_wet_threshold(5.0);
    assert!(matches!(
        estimate_exceedance(&amounts, &config),
        Err(ExceedanceError::NoWetObservations { .. })
    ));
}

// ---------------------------------------------------------------------------
// 8. model_round_trip
// ---------------------------------------------------------------------------
struct Exponential {
    mean: f64,
}

impl TailModel for Exponential {
    fn survival(&self, x: f64) -> f64 {
        if x <= 0.0 {
            1.0
        } else {
            (-x / self.mean).exp()
        }
    }
}

#[test]
fn model_round_trip() {
    let config = ExceedanceConfig::new();
    let model = Exponential { mean: 6.0 };
    let p_wet = 0.3;

    for &x in &[20.0, 40.0, 60.0] {
        let m = model_exceedance(&model, x, p_wet, &config).unwrap();
        let p_daily = model.survival(x);
        let expected_rp = 1.0 / (1.0 - (1.0 - p_daily * p_wet).powf(365.0));
        assert_relative_eq!(m.return_period, expected_rp, max_relative = 1e-10);

        let recomputed = annualize(m.p_daily, p_wet, 365).unwrap();
        assert_relative_eq!(recomputed, 1.0 / m.return_period, max_relative = 1e-12);
    }
}
