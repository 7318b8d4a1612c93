use crate::types::Label;
use std::collections::BTreeMap;

/// Applies `section` to each category's values independently and scatters the
/// per-group results back to their original positions.
///
/// `section` must return one output per input value. Positions labelled
/// [`Label::Missing`] belong to no group and receive `missing`. Extra section
/// parameters are captured by the closure.
///
/// # Panics
/// Panics when `categories` and `values` differ in length.
pub fn apply_grouped<T, F>(categories: &[Label], values: &[f64], missing: T, section: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&[f64]) -> Vec<T>,
{
    assert_eq!(
        categories.len(),
        values.len(),
        "apply_grouped requires equal-length inputs"
    );
    let mut groups: BTreeMap<&Label, Vec<usize>> = BTreeMap::new();
    for (idx, label) in categories.iter().enumerate() {
        if !label.is_missing() {
            groups.entry(label).or_default().push(idx);
        }
    }

    let mut out = vec![missing; values.len()];
    let mut group_values = Vec::new();
    for indices in groups.values() {
        group_values.clear();
        group_values.extend(indices.iter().map(|&idx| values[idx]));
        let result = section(&group_values);
        debug_assert_eq!(
            result.len(),
            indices.len(),
            "section statistic must return one value per input"
        );
        for (&idx, value) in indices.iter().zip(result) {
            out[idx] = value;
        }
    }
    out
}
