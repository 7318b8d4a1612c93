use crate::ops::stats::{
    corr_guarded, is_present, nan_max, nan_mean, nan_min, nan_std, nan_sum, protected_div,
    Moments,
};
use crate::types::Label;

/// Resolves a requested window against a series of length `len`.
///
/// A window at least as long as the series is clamped to `len - 1`. A result of
/// zero means no window can be formed and every output position is missing.
#[inline]
pub const fn effective_window(window: usize, len: usize) -> usize {
    if window >= len {
        len.saturating_sub(1)
    } else {
        window
    }
}

/// Evaluates `stat` over every full trailing window `[i - d + 1, i]`.
pub(crate) fn rolling<F>(x: &[f64], window: usize, stat: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let d = effective_window(window, x.len());
    let mut out = vec![f64::NAN; x.len()];
    if d == 0 {
        return out;
    }
    for end in d - 1..x.len() {
        out[end] = stat(&x[end + 1 - d..=end]);
    }
    out
}

pub(crate) fn rolling_pair<F>(x: &[f64], y: &[f64], window: usize, stat: F) -> Vec<f64>
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    assert_eq!(x.len(), y.len(), "rolling pair requires equal-length inputs");
    let d = effective_window(window, x.len());
    let mut out = vec![f64::NAN; x.len()];
    if d == 0 {
        return out;
    }
    for end in d - 1..x.len() {
        let start = end + 1 - d;
        out[end] = stat(&x[start..=end], &y[start..=end]);
    }
    out
}

/// Shifts `x` forward by `lag` positions, filling the head with `missing`.
pub fn shift<T: Clone>(x: &[T], lag: usize, missing: T) -> Vec<T> {
    let d = effective_window(lag, x.len());
    let mut out = vec![missing; x.len()];
    if d == 0 {
        return out;
    }
    out[d..].clone_from_slice(&x[..x.len() - d]);
    out
}

pub fn delay(x: &[f64], lag: usize) -> Vec<f64> {
    shift(x, lag, f64::NAN)
}

pub fn delay_category(x: &[Label], lag: usize) -> Vec<Label> {
    shift(x, lag, Label::Missing)
}

pub fn delta(x: &[f64], lag: usize) -> Vec<f64> {
    let lagged = shift(x, lag, f64::NAN);
    x.iter().zip(lagged).map(|(cur, old)| cur - old).collect()
}

pub fn ts_min(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, nan_min)
}

pub fn ts_max(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, nan_max)
}

pub fn ts_sum(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, nan_sum)
}

pub fn ts_mean(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, nan_mean)
}

pub fn ts_stddev(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, nan_std)
}

fn arg_extremum(values: &[f64], better: fn(f64, f64) -> bool) -> f64 {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        if !is_present(v) {
            continue;
        }
        match best {
            Some((_, cur)) if !better(v, cur) => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map_or(f64::NAN, |(idx, _)| idx as f64)
}

/// Offset from the window start of the window maximum; ties keep the earliest.
pub fn ts_argmax(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| arg_extremum(w, |v, cur| v > cur))
}

pub fn ts_argmin(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| arg_extremum(w, |v, cur| v < cur))
}

/// Sort position of the window's last value among the window, divided by the window length.
pub fn ts_rank(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| {
        let Some(&latest) = w.last() else {
            return f64::NAN;
        };
        if !is_present(latest) {
            return f64::NAN;
        }
        let below = w.iter().filter(|v| **v < latest).count();
        below as f64 / w.len() as f64
    })
}

pub fn ts_corr(x: &[f64], y: &[f64], window: usize) -> Vec<f64> {
    rolling_pair(x, y, window, corr_guarded)
}

/// Mean of period-over-period fractional changes inside the window.
pub fn ts_mean_return(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| {
        let changes: Vec<f64> = w
            .windows(2)
            .map(|pair| protected_div(pair[1] - pair[0], pair[0]))
            .collect();
        nan_mean(&changes)
    })
}

/// `(last - mean) / std` of the trailing window.
pub fn ts_neutralize(x: &[f64], window: usize) -> Vec<f64> {
    rolling(x, window, |w| {
        let Some(&latest) = w.last() else {
            return f64::NAN;
        };
        match Moments::collect(w) {
            Some(m) if is_present(latest) => protected_div(latest - m.mean, m.std()),
            _ => f64::NAN,
        }
    })
}
