use crate::types::Label;

const COMBINE_P1: i128 = 15_485_863;
const COMBINE_P2: i128 = 32_416_190_071;
const COMBINE_P3: i128 = 100_000_007;

#[inline]
fn combine_pair(a: &Label, b: &Label) -> Label {
    match (a, b) {
        (Label::Missing, _) | (_, Label::Missing) => Label::Missing,
        (Label::Int(a), Label::Int(b)) => {
            let mixed = (*a as i128 * COMBINE_P1 + *b as i128 * COMBINE_P2).rem_euclid(COMBINE_P3);
            Label::Int(mixed as i64)
        }
        (a, b) => Label::Text(format!("{a}|{b}")),
    }
}

/// Crosses two category sequences into one.
///
/// # Panics
/// Panics when `a` and `b` differ in length.
pub fn combine(a: &[Label], b: &[Label]) -> Vec<Label> {
    assert_eq!(a.len(), b.len(), "combine requires equal-length inputs");
    a.iter().zip(b).map(|(a, b)| combine_pair(a, b)).collect()
}
