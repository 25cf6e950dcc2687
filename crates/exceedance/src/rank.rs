//! Wet-day filtering and descending rank assignment.

/// A wet observation in descending-amount order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RankedWet {
    /// 1-based rank; 1 is the largest amount.
    pub rank: usize,
    /// Position of the observation in the input series.
    pub index: usize,
    /// Precipitation amount.
    pub amount: f64,
}

/// Selects amounts strictly above `threshold` and ranks them largest first.
///
/// Uses a stable sort, so equal amounts keep their input order and the
/// earlier observation receives the smaller rank. Callers must have rejected
/// non-finite values.
pub(crate) fn rank_wet(amounts: &[f64], threshold: f64) -> Vec<RankedWet> {
    let mut wet: Vec<(usize, f64)> = amounts
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, a)| a > threshold)
        .collect();

    wet.sort_by(|a, b| b.1.total_cmp(&a.1));

    wet.into_iter()
        .enumerate()
        .map(|(i, (index, amount))| RankedWet {
            rank: i + 1,
            index,
            amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_and_sorts() {
        let ranked = rank_wet(&[0.0, 5.0, 0.0, 20.0, 10.0], 0.0);
        let amounts: Vec<f64> = ranked.iter().map(|r| r.amount).collect();
        let indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(amounts, vec![20.0, 10.0, 5.0]);
        assert_eq!(indices, vec![3, 4, 1]);
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = rank_wet(&[5.0, 5.0, 7.0, 5.0], 0.0);
        let indices: Vec<usize> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 0, 1, 3]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let ranked = rank_wet(&[0.5, 0.6, 0.4], 0.5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].index, 1);
    }

    #[test]
    fn all_dry() {
        assert!(rank_wet(&[0.0, 0.0], 0.0).is_empty());
    }
}
