//! Grouped section statistics: each category is treated as its own cross-section.

use crate::ops::cs;
use crate::ops::group::apply_grouped;
use crate::types::Label;

pub fn gb_max(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_max)
}

pub fn gb_min(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_min)
}

pub fn gb_mean(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_mean)
}

pub fn gb_median(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_median)
}

pub fn gb_std(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_std)
}

pub fn gb_rank(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_rank)
}

pub fn gb_neutralize(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_neutralize)
}

pub fn gb_freq(groups: &[Label], x: &[f64]) -> Vec<f64> {
    apply_grouped(groups, x, f64::NAN, cs::sec_freq)
}

pub fn gb_cut_equal_distance(groups: &[Label], x: &[f64], bins: usize) -> Vec<Label> {
    apply_grouped(groups, x, Label::Missing, |section| {
        cs::cut_equal_distance(section, bins)
    })
}

pub fn gb_cut_equal_amount(groups: &[Label], x: &[f64], bins: usize) -> Vec<Label> {
    apply_grouped(groups, x, Label::Missing, |section| {
        cs::cut_equal_amount(section, bins)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(groups: &[Label], x: &[f64], wanted: &Label) -> Vec<f64> {
        groups
            .iter()
            .zip(x)
            .filter(|(g, _)| *g == wanted)
            .map(|(_, v)| *v)
            .collect()
    }

    #[test]
    fn grouped_rank_restarts_per_category() {
        let groups: Vec<Label> = ["a", "b", "a", "b", "a"].map(Label::from).to_vec();
        let out = gb_rank(&groups, &[5.0, 1.0, 3.0, 0.5, 4.0]);
        assert_eq!(out, vec![2.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn grouped_statistics_equal_per_category_application() {
        let groups: Vec<Label> = [1, 2, 2, 1, 1, 2, 1].map(Label::Int).to_vec();
        let x = [3.0, 8.0, 6.0, 1.0, 9.0, 4.0, 2.0];
        for stat in [gb_max, gb_min, gb_mean, gb_median, gb_std, gb_neutralize] {
            let out = stat(&groups, &x);
            for label in [Label::Int(1), Label::Int(2)] {
                let member_out = split(&groups, &out, &label);
                let single: Vec<Label> = vec![label.clone(); member_out.len()];
                let direct = stat(&single, &split(&groups, &x, &label));
                assert_eq!(member_out, direct);
            }
        }
    }

    #[test]
    fn grouped_bins_label_within_each_category() {
        let groups: Vec<Label> = [1, 1, 1, 1, 2, 2, 2, 2].map(Label::Int).to_vec();
        let x = [1.0, 2.0, 3.0, 4.0, 100.0, 200.0, 300.0, 400.0];
        let out = gb_cut_equal_distance(&groups, &x, 3);
        assert_eq!(out, [1, 1, 2, 3, 1, 1, 2, 3].map(Label::Int).to_vec());
        let amount = gb_cut_equal_amount(&groups, &x, 3);
        assert_eq!(amount, out);
    }

    #[test]
    fn grouped_freq_counts_within_category() {
        let groups: Vec<Label> = [1, 1, 2, 2].map(Label::Int).to_vec();
        assert_eq!(gb_freq(&groups, &[7.0, 7.0, 7.0, 8.0]), vec![2.0, 2.0, 1.0, 1.0]);
    }
}
