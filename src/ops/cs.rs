use crate::ops::stats::{is_present, nan_max, nan_median, nan_min, protected_div, Moments};
use crate::types::Label;
use std::collections::HashMap;

/// Range scale that keeps the section maximum inside the last bin.
pub const BIN_RANGE_SCALE: f64 = 1.000001;

#[inline]
fn broadcast(value: f64, len: usize) -> Vec<f64> {
    vec![value; len]
}

pub fn sec_max(x: &[f64]) -> Vec<f64> {
    broadcast(nan_max(x), x.len())
}

pub fn sec_min(x: &[f64]) -> Vec<f64> {
    broadcast(nan_min(x), x.len())
}

pub fn sec_mean(x: &[f64]) -> Vec<f64> {
    broadcast(Moments::collect(x).map_or(f64::NAN, |m| m.mean), x.len())
}

pub fn sec_median(x: &[f64]) -> Vec<f64> {
    broadcast(nan_median(x), x.len())
}

pub fn sec_std(x: &[f64]) -> Vec<f64> {
    broadcast(Moments::collect(x).map_or(f64::NAN, Moments::std), x.len())
}

/// 0-based ascending rank; equal values keep their input order, missing values stay missing.
pub fn sec_rank(x: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..x.len()).filter(|&i| is_present(x[i])).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]).then(a.cmp(&b)));
    let mut out = vec![f64::NAN; x.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        out[idx] = rank as f64;
    }
    out
}

/// `(x - mean) / std` over the whole section.
pub fn sec_neutralize(x: &[f64]) -> Vec<f64> {
    let Some(m) = Moments::collect(x) else {
        return broadcast(f64::NAN, x.len());
    };
    let std = m.std();
    x.iter().map(|v| protected_div(v - m.mean, std)).collect()
}

#[inline]
fn freq_key(v: f64) -> u64 {
    // -0.0 and 0.0 count as the same value
    if v == 0.0 {
        0.0_f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// Number of occurrences of each position's exact value in the section.
pub fn sec_freq(x: &[f64]) -> Vec<f64> {
    let mut counts: HashMap<u64, usize> = HashMap::with_capacity(x.len());
    for &v in x.iter().filter(|v| is_present(**v)) {
        *counts.entry(freq_key(v)).or_default() += 1;
    }
    x.iter()
        .map(|&v| {
            if is_present(v) {
                counts[&freq_key(v)] as f64
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// Bounds of the finite values; infinities take part in binning but not in the range.
fn finite_bounds(x: &[f64]) -> Option<(f64, f64)> {
    let finite: Vec<f64> = x.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        None
    } else {
        Some((nan_min(&finite), nan_max(&finite)))
    }
}

/// Splits the value range into `bins` equal-width bins labelled `1..=bins`.
///
/// `bins` is clamped to `len - 1`. A flat section, or one too short to split,
/// lands entirely in bin 1. Infinite values fall into the first or last bin.
pub fn cut_equal_distance(x: &[f64], bins: usize) -> Vec<Label> {
    if !x.iter().any(|v| is_present(*v)) {
        return vec![Label::Missing; x.len()];
    }
    let d = bins.min(x.len().saturating_sub(1));
    let bounds = finite_bounds(x).filter(|(min, max)| max > min);
    let (Some((min, max)), true) = (bounds, d > 0) else {
        return x
            .iter()
            .map(|v| if is_present(*v) { Label::Int(1) } else { Label::Missing })
            .collect();
    };
    let range = max - min;
    let edges: Vec<f64> = (0..=d)
        .map(|i| min + i as f64 * range * BIN_RANGE_SCALE / d as f64)
        .collect();
    x.iter()
        .map(|&v| {
            if is_present(v) {
                let bin = edges.partition_point(|e| *e <= v).clamp(1, d);
                Label::Int(bin as i64)
            } else {
                Label::Missing
            }
        })
        .collect()
}

/// Equal-population bins: equal-distance binning over the section ranks.
pub fn cut_equal_amount(x: &[f64], bins: usize) -> Vec<Label> {
    cut_equal_distance(&sec_rank(x), bins)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn bin_sizes(labels: &[Label]) -> HashMap<i64, usize> {
        let mut sizes = HashMap::new();
        for label in labels {
            if let Label::Int(bin) = label {
                *sizes.entry(*bin).or_default() += 1;
            }
        }
        sizes
    }

    #[test]
    fn broadcast_statistics_repeat_one_value() {
        let x = [4.0, 1.0, NAN, 7.0];
        assert_eq!(sec_max(&x), vec![7.0; 4]);
        assert_eq!(sec_min(&x), vec![1.0; 4]);
        assert_eq!(sec_mean(&x), vec![4.0; 4]);
        assert_eq!(sec_median(&x), vec![4.0; 4]);
        assert!((sec_std(&x)[0] - 6.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rank_is_ascending_and_zero_based() {
        assert_eq!(sec_rank(&[30.0, 10.0, 20.0]), vec![2.0, 0.0, 1.0]);
        let with_gap = sec_rank(&[5.0, NAN, 1.0]);
        assert_eq!(with_gap[0], 1.0);
        assert!(with_gap[1].is_nan());
        assert_eq!(with_gap[2], 0.0);
    }

    #[test]
    fn neutralize_standardizes_and_guards_flat_sections() {
        let out = sec_neutralize(&[1.0, 2.0, 3.0]);
        let std = (2.0_f64 / 3.0).sqrt();
        assert!((out[0] + 1.0 / std).abs() < 1e-12);
        assert!(out[1].abs() < 1e-12);
        assert!(sec_neutralize(&[2.0, 2.0, 2.0]).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn singleton_section_statistics() {
        assert_eq!(sec_mean(&[3.0]), vec![3.0]);
        assert_eq!(sec_std(&[3.0]), vec![0.0]);
        assert!(sec_neutralize(&[3.0])[0].is_nan());
    }

    #[test]
    fn freq_counts_exact_matches() {
        let out = sec_freq(&[1.0, 2.0, 1.0, NAN, 0.0, -0.0]);
        assert_eq!(out[0], 2.0);
        assert_eq!(out[1], 1.0);
        assert_eq!(out[2], 2.0);
        assert!(out[3].is_nan());
        assert_eq!(out[4], 2.0);
    }

    #[test]
    fn equal_distance_bins_cover_min_and_max() {
        let out = cut_equal_distance(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(
            out,
            [1, 1, 2, 2, 3, 3].map(Label::Int).to_vec(),
            "max must land in the last bin"
        );
    }

    #[test]
    fn infinities_are_ranked_counted_and_binned() {
        let x = [1.0, f64::INFINITY, 2.0, f64::NEG_INFINITY, NAN, 3.0];
        assert_eq!(sec_max(&x)[0], f64::INFINITY);
        assert_eq!(sec_min(&x)[0], f64::NEG_INFINITY);
        let rank = sec_rank(&x);
        assert_eq!(&rank[..4], &[1.0, 4.0, 2.0, 0.0]);
        assert!(rank[4].is_nan());
        assert_eq!(rank[5], 3.0);
        assert_eq!(sec_freq(&[f64::INFINITY, 1.0, f64::INFINITY])[0], 2.0);
        assert_eq!(
            cut_equal_distance(&x, 2),
            vec![
                Label::Int(1),
                Label::Int(2),
                Label::Int(1),
                Label::Int(1),
                Label::Missing,
                Label::Int(2)
            ]
        );
    }

    #[test]
    fn equal_distance_flat_or_empty_sections() {
        assert_eq!(cut_equal_distance(&[2.0, 2.0, 2.0], 3), vec![Label::Int(1); 3]);
        assert_eq!(cut_equal_distance(&[NAN, NAN], 3), vec![Label::Missing; 2]);
        assert_eq!(cut_equal_distance(&[9.0], 3), vec![Label::Int(1)]);
    }

    #[test]
    fn equal_amount_bins_have_balanced_population() {
        let x: Vec<f64> = (0..23).map(|i| ((i * 37) % 23) as f64 * 1.7 - 4.0).collect();
        for bins in 3..=10 {
            let sizes = bin_sizes(&cut_equal_amount(&x, bins));
            assert_eq!(sizes.len(), bins);
            let lo = sizes.values().min().copied().unwrap_or_default();
            let hi = sizes.values().max().copied().unwrap_or_default();
            assert!(hi - lo <= 1, "bins={bins} sizes={sizes:?}");
        }
    }
}
