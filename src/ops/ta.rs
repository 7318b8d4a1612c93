use crate::ops::fill::forward_fill;
use crate::ops::stats::{nan_max, nan_min, protected_div, PairMoments};
use crate::ops::ts::{effective_window, rolling};

/// KAMA fast and slow smoothing periods.
pub const KAMA_FAST_PERIOD: f64 = 2.0;
pub const KAMA_SLOW_PERIOD: f64 = 30.0;

#[inline]
fn smoothing(period: f64) -> f64 {
    2.0 / (period + 1.0)
}

/// Forward-filled body of `x` after its leading gaps, plus the gap count.
///
/// `None` when fewer than `d` real observations follow the gaps.
fn filled_body(x: &[f64], d: usize) -> Option<(Vec<f64>, usize)> {
    if d == 0 {
        return None;
    }
    let (mut filled, leading) = forward_fill(x);
    if filled.len() - leading < d {
        return None;
    }
    filled.drain(..leading);
    Some((filled, leading))
}

/// Exponential moving average seeded with the simple mean of the first `d` real values.
pub fn ema(x: &[f64], window: usize) -> Vec<f64> {
    let d = effective_window(window, x.len());
    let mut out = vec![f64::NAN; x.len()];
    let Some((body, leading)) = filled_body(x, d) else {
        return out;
    };
    let alpha = smoothing(d as f64);
    let mut prev = body[..d].iter().sum::<f64>() / d as f64;
    out[leading + d - 1] = prev;
    for (i, &v) in body.iter().enumerate().skip(d) {
        prev += (v - prev) * alpha;
        out[leading + i] = prev;
    }
    out
}

/// `2 * EMA(x) - EMA(EMA(x))`; the window shrinks to half the series when it does not fit twice.
pub fn dema(x: &[f64], window: usize) -> Vec<f64> {
    let n = x.len();
    let d = if n + 2 > 2 * window {
        window
    } else {
        (n / 2).saturating_sub(1)
    };
    let first = ema(x, d);
    let second = ema(&first, d);
    first
        .iter()
        .zip(second)
        .map(|(a, b)| 2.0 * a - b)
        .collect()
}

/// Simple moving average over the forward-filled series.
pub fn ma(x: &[f64], window: usize) -> Vec<f64> {
    let d = effective_window(window, x.len());
    let mut out = vec![f64::NAN; x.len()];
    let Some((body, leading)) = filled_body(x, d) else {
        return out;
    };
    for end in d - 1..body.len() {
        out[leading + end] = body[end + 1 - d..=end].iter().sum::<f64>() / d as f64;
    }
    out
}

/// Kaufman adaptive moving average.
pub fn kama(x: &[f64], window: usize) -> Vec<f64> {
    let d = effective_window(window, x.len());
    let mut out = vec![f64::NAN; x.len()];
    let Some((body, leading)) = filled_body(x, d) else {
        return out;
    };
    let fast = smoothing(KAMA_FAST_PERIOD);
    let slow = smoothing(KAMA_SLOW_PERIOD);
    let mut prev = body[d - 1];
    for i in d..body.len() {
        let period_change = body[i] - body[i - d];
        let total_change: f64 = body[i - d..=i]
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .sum();
        let efficiency = if period_change >= total_change || total_change == 0.0 {
            1.0
        } else {
            (period_change / total_change).abs()
        };
        let sc = (efficiency * (fast - slow) + slow).powi(2);
        prev = sc * body[i] + (1.0 - sc) * prev;
        out[leading + i] = prev;
    }
    out
}

pub fn midpoint(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| (nan_max(w) + nan_min(w)) / 2.0)
}

fn returns(x: &[f64]) -> Vec<f64> {
    x.windows(2)
        .map(|pair| protected_div(pair[1] - pair[0], pair[0]))
        .collect()
}

/// Windowed beta of `y`'s returns on `x`'s returns.
///
/// # Panics
/// Panics when `x` and `y` differ in length.
pub fn beta(x: &[f64], y: &[f64], window: usize) -> Vec<f64> {
    assert_eq!(x.len(), y.len(), "beta requires equal-length inputs");
    let d = effective_window(window, x.len());
    let mut out = vec![f64::NAN; x.len()];
    if d == 0 {
        return out;
    }
    let rx = returns(x);
    let ry = returns(y);
    for start in 0..=rx.len() - d {
        let wx = &rx[start..start + d];
        let wy = &ry[start..start + d];
        out[start + d] = PairMoments::collect(wx, wy).slope();
    }
    out
}

/// Moments of the window's present values paired with their offsets from the window start.
fn regression(w: &[f64]) -> PairMoments {
    let index: Vec<f64> = (0..w.len()).map(|i| i as f64).collect();
    PairMoments::collect(&index, w)
}

fn regression_slope(w: &[f64]) -> f64 {
    regression(w).slope()
}

/// Slope of the window regressed on its offsets `0..d`.
pub fn linearreg_slope(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, regression_slope)
}

pub fn linearreg_angle(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| regression_slope(w).atan().to_degrees())
}

pub fn linearreg_intercept(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| {
        let m = regression(w);
        m.mean_y - m.slope() * m.mean_x
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAN: f64 = f64::NAN;

    fn same(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() <= 1e-9)
    }

    #[test]
    fn ema_of_flat_series_is_fixed_point() {
        let out = ema(&[10.0; 5], 3);
        assert!(same(&out, &[NAN, NAN, 10.0, 10.0, 10.0]));
    }

    #[test]
    fn ema_recursion_and_leading_gaps() {
        let out = ema(&[NAN, 1.0, 2.0, 3.0, NAN, 5.0], 2);
        // seed mean(1, 2) at index 2, alpha = 2/3, the gap at index 4 carries 3.0
        let s2 = 1.5;
        let s3 = s2 + (3.0 - s2) * (2.0 / 3.0);
        let s4 = s3 + (3.0 - s3) * (2.0 / 3.0);
        let s5 = s4 + (5.0 - s4) * (2.0 / 3.0);
        assert!(same(&out, &[NAN, NAN, s2, s3, s4, s5]));
    }

    #[test]
    fn ema_without_enough_history_is_missing() {
        let out = ema(&[NAN, NAN, NAN, 1.0, 2.0], 3);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn dema_of_flat_series_is_flat() {
        let out = dema(&[4.0; 10], 3);
        assert!(out[..4].iter().all(|v| v.is_nan()));
        assert!(out[4..].iter().all(|v| (v - 4.0).abs() < 1e-12));
    }

    #[test]
    fn dema_shrinks_window_on_short_series() {
        // six points do not exceed 2 * 5 - 2, so the window becomes 6 / 2 - 1 = 2
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(same(&dema(&x, 5), &{
            let first = ema(&x, 2);
            let second = ema(&first, 2);
            first
                .iter()
                .zip(&second)
                .map(|(a, b)| 2.0 * a - b)
                .collect::<Vec<_>>()
        }));
    }

    #[test]
    fn ma_skips_leading_gaps_and_fills_interior() {
        let out = ma(&[NAN, 1.0, 2.0, NAN, 6.0], 3);
        assert!(same(&out, &[NAN, NAN, NAN, 5.0 / 3.0, 10.0 / 3.0]));
    }

    #[test]
    fn kama_trending_series_uses_fast_constant() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = kama(&x, 3);
        let sc = (2.0_f64 / 3.0).powi(2);
        let k3 = sc * 4.0 + (1.0 - sc) * 3.0;
        let k4 = sc * 5.0 + (1.0 - sc) * k3;
        assert!(same(&out, &[NAN, NAN, NAN, k3, k4]));
    }

    #[test]
    fn kama_choppy_series_moves_slowly() {
        let x = [1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        let out = kama(&x, 2);
        // net change over two steps is zero, so only the slow constant remains
        let sc = (2.0_f64 / 31.0).powi(2);
        let k2 = sc * 1.0 + (1.0 - sc) * 2.0;
        assert!((out[2] - k2).abs() < 1e-12);
    }

    #[test]
    fn midpoint_averages_window_extremes() {
        let out = midpoint(&[1.0, 5.0, 3.0, 9.0], 3);
        assert!(same(&out, &[NAN, NAN, 3.0, 6.0]));
    }

    #[test]
    fn beta_of_series_with_itself_is_one() {
        let x = [1.0, 2.0, 3.0, 5.0, 4.0, 6.0, 7.0];
        let out = beta(&x, &x, 3);
        assert!(out[..3].iter().all(|v| v.is_nan()));
        assert!(out[3..].iter().all(|v| (v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn beta_scales_with_return_multiple() {
        let x = [1.0, 2.0, 3.0, 5.0, 4.0, 6.0, 7.0];
        let mut y = vec![1.0];
        for pair in x.windows(2) {
            let r = (pair[1] - pair[0]) / pair[0];
            let last = *y.last().expect("seeded");
            y.push(last * (1.0 + 2.0 * r));
        }
        let out = beta(&x, &y, 3);
        assert!(out[3..].iter().all(|v| (v - 2.0).abs() < 1e-9));
    }

    #[test]
    fn beta_ignores_returns_with_a_missing_side() {
        let x = [1.0, 2.0, 3.0, 5.0, 4.0, 6.0];
        let mut y = vec![1.0];
        for pair in x.windows(2) {
            let r = (pair[1] - pair[0]) / pair[0];
            let last = *y.last().expect("seeded");
            y.push(last * (1.0 + 2.0 * r));
        }
        y[5] = NAN;
        let out = beta(&x, &y, 4);
        assert!(out[..4].iter().all(|v| v.is_nan()));
        assert!((out[4] - 2.0).abs() < 1e-9);
        assert!((out[5] - 2.0).abs() < 1e-9, "three full return pairs remain");
    }

    #[test]
    fn regression_with_a_gap_fits_the_present_points() {
        let x = [0.0, 1.0, NAN, 3.0, 4.0];
        let slope = linearreg_slope(&x, 4);
        let angle = linearreg_angle(&x, 4);
        let intercept = linearreg_intercept(&x, 4);
        for end in 3..x.len() {
            assert!((slope[end] - 1.0).abs() < 1e-9);
            assert!((angle[end] - 45.0).abs() < 1e-9);
            // value of the fitted line at the window start
            assert!((intercept[end] - x[end - 3]).abs() < 1e-9);
        }
    }

    #[test]
    fn ma_on_a_long_series_matches_each_window_mean() {
        let x: Vec<f64> = (0..20_000).map(|i| 1.0e9 + (i % 7) as f64 * 0.1).collect();
        let d = 30;
        let out = ma(&x, d);
        for end in [d - 1, 10_000, x.len() - 1] {
            let expected = x[end + 1 - d..=end].iter().sum::<f64>() / d as f64;
            assert_eq!(out[end], expected);
        }
    }

    #[test]
    fn regression_family_on_a_line() {
        let x: Vec<f64> = (0..6).map(|i| 2.0 * i as f64 + 1.0).collect();
        let slope = linearreg_slope(&x, 3);
        let angle = linearreg_angle(&x, 3);
        let intercept = linearreg_intercept(&x, 3);
        assert!(slope[..2].iter().all(|v| v.is_nan()));
        for end in 2..x.len() {
            assert!((slope[end] - 2.0).abs() < 1e-9);
            assert!((angle[end] - 2.0_f64.atan().to_degrees()).abs() < 1e-9);
            assert!((intercept[end] - x[end - 2]).abs() < 1e-9);
        }
    }
}
