//! Column arithmetic on owned working copies
//!
//! Ordering, normalization and running totals used by the Gini computation.
//! Every function returns a new vector; inputs are never modified.

use std::cmp::Ordering;

/// Row order that sorts `rank` in the given direction
///
/// The sort is stable in both directions: rows with equal rank keep their
/// input order, including when sorting descending.
pub fn stable_order(rank: &[f64], ascending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rank.len()).collect();
    // slice::sort_by is stable
    if ascending {
        order.sort_by(|&a, &b| compare(rank[a], rank[b]));
    } else {
        order.sort_by(|&a, &b| compare(rank[b], rank[a]));
    }
    order
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Gather `values` in the given row order
pub fn take(values: &[f64], order: &[usize]) -> Vec<f64> {
    order.iter().map(|&i| values[i]).collect()
}

/// Total of a column
pub fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Divide a column by its total so that it sums to 1
///
/// Values are first rescaled by a power of two near the largest magnitude,
/// so the total stays finite for any finite column. Returns `None` when the
/// total is zero up to rounding, i.e. within `n * EPSILON * sum(|v|)`.
pub fn normalize(values: &[f64]) -> Option<Vec<f64>> {
    let max_abs = values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if max_abs == 0.0 {
        return None;
    }

    let scale = power_of_two_scale(max_abs);
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();

    let sum = total(&scaled);
    let magnitude: f64 = scaled.iter().map(|v| v.abs()).sum();
    if sum.abs() <= f64::EPSILON * magnitude * scaled.len() as f64 {
        return None;
    }
    Some(scaled.iter().map(|v| v / sum).collect())
}

/// Largest power of two not above `max_abs`, clamped to the normal range.
/// Dividing by it is exact.
fn power_of_two_scale(max_abs: f64) -> f64 {
    let exponent = max_abs.log2().floor().clamp(-1022.0, 1023.0) as i32;
    2.0_f64.powi(exponent)
}

/// Running (prefix) sums
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |acc, &v| {
            *acc += v;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stable_order_ascending() {
        let rank = vec![3.0, 1.0, 2.0, 1.0];
        assert_eq!(stable_order(&rank, true), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_stable_order_descending_keeps_ties_in_input_order() {
        let rank = vec![1.0, 3.0, 2.0, 3.0];
        assert_eq!(stable_order(&rank, false), vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_signed_zero_ranks_tie() {
        let rank = vec![0.0, -0.0];
        assert_eq!(stable_order(&rank, true), vec![0, 1]);
        assert_eq!(stable_order(&rank, false), vec![0, 1]);
    }

    #[test]
    fn test_take() {
        assert_eq!(take(&[10.0, 20.0, 30.0], &[2, 0, 1]), vec![30.0, 10.0, 20.0]);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[1.0, 3.0]), Some(vec![0.25, 0.75]));
        assert_eq!(normalize(&[0.0, 0.0]), None);
        assert_eq!(normalize(&[2.0, -2.0]), None);
        assert_eq!(normalize(&[]), None);
    }

    #[test]
    fn test_normalize_cancelling_total() {
        // 0.1 + 0.2 - 0.3 is about 5.5e-17 in floating point
        assert_eq!(normalize(&[0.1, 0.2, -0.3]), None);
        assert_eq!(normalize(&[1.0e-300, -1.0e-300, 0.0]), None);

        let shares = normalize(&[1.0, -0.5]).unwrap();
        assert_eq!(shares, vec![2.0, -1.0]);
    }

    #[test]
    fn test_normalize_large_values() {
        assert_eq!(normalize(&[1.0e308, 1.0e308]), Some(vec![0.5, 0.5]));
        assert_eq!(normalize(&[f64::MAX, f64::MAX]), Some(vec![0.5, 0.5]));
    }

    #[test]
    fn test_normalize_tiny_values() {
        let tiny = f64::MIN_POSITIVE / 4.0;
        assert_eq!(normalize(&[tiny, 3.0 * tiny]), Some(vec![0.25, 0.75]));
    }

    #[test]
    fn test_cumulative_sum() {
        assert_eq!(cumulative_sum(&[0.25, 0.25, 0.5]), vec![0.25, 0.5, 1.0]);
        assert!(cumulative_sum(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_normalized_column_sums_to_one(
            values in prop::collection::vec(0.001f64..1.0e6, 1..200)
        ) {
            let shares = normalize(&values).unwrap();
            prop_assert!((total(&shares) - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_cumulative_shares_end_at_one_and_never_decrease(
            values in prop::collection::vec(0.0f64..1.0e3, 1..200)
                .prop_filter("nonzero total", |v| total(v) > 0.0)
        ) {
            let running = cumulative_sum(&normalize(&values).unwrap());
            prop_assert!(running.windows(2).all(|w| w[1] >= w[0]));
            prop_assert!((running[running.len() - 1] - 1.0).abs() < 1e-9);
        }
    }
}
