use factor_primitives::Label;

#[allow(dead_code)]
pub const TOL: f64 = 1e-9;

/// NaN-aware elementwise comparison with a fixed tolerance.
#[allow(dead_code)]
pub fn approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() <= TOL)
}

/// Deterministic pseudo-random walk; identical for identical seeds.
#[allow(dead_code)]
pub fn walk(seed: u64, n: usize) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    let mut level = 100.0;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let step = ((state >> 33) as f64 / (1_u64 << 31) as f64) - 0.5;
            level += step;
            level
        })
        .collect()
}

/// Replaces every `every`-th value, starting at `offset`, with NaN.
#[allow(dead_code)]
pub fn with_gaps(mut x: Vec<f64>, offset: usize, every: usize) -> Vec<f64> {
    for idx in (offset..x.len()).step_by(every) {
        x[idx] = f64::NAN;
    }
    x
}

#[allow(dead_code)]
pub fn two_groups(n: usize) -> Vec<Label> {
    (0..n)
        .map(|i| if i % 3 == 0 { Label::from("a") } else { Label::from("b") })
        .collect()
}
