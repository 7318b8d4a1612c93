/// Denominators at or below this magnitude are treated as zero.
pub const DIV_EPS: f64 = 1e-12;

/// Pairs at or below this count make a correlation undefined.
pub const MIN_CORR_PAIRS: usize = 2;

/// Only NaN marks a missing observation; infinities are present values.
#[inline]
pub(crate) fn is_present(v: f64) -> bool {
    !v.is_nan()
}

/// Population moments of the present values in a slice; missing values are skipped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Moments {
    pub(crate) n: f64,
    pub(crate) mean: f64,
    pub(crate) m2: f64,
}

impl Moments {
    pub(crate) fn collect(values: &[f64]) -> Option<Self> {
        let mut n = 0usize;
        let mut sum = 0.0_f64;
        for &v in values.iter().filter(|v| is_present(**v)) {
            n += 1;
            sum += v;
        }
        if n == 0 {
            return None;
        }
        let mean = sum / n as f64;
        let m2 = values
            .iter()
            .filter(|v| is_present(**v))
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>();
        Some(Self {
            n: n as f64,
            mean,
            m2,
        })
    }

    #[inline]
    pub(crate) fn std(self) -> f64 {
        (self.m2 / self.n).max(0.0).sqrt()
    }
}

/// Joint population moments over the positions where both sides are present.
///
/// Every statistic read from it (means, stds, correlation) describes the same
/// point set.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairMoments {
    pub(crate) n: usize,
    pub(crate) mean_x: f64,
    pub(crate) mean_y: f64,
    sxx: f64,
    syy: f64,
    sxy: f64,
}

impl PairMoments {
    /// # Panics
    /// Panics when `x` and `y` differ in length.
    pub(crate) fn collect(x: &[f64], y: &[f64]) -> Self {
        assert_eq!(x.len(), y.len(), "paired moments require equal-length inputs");
        let pairs = || {
            x.iter()
                .zip(y)
                .filter(|(a, b)| is_present(**a) && is_present(**b))
        };
        let mut n = 0usize;
        let mut sum_x = 0.0_f64;
        let mut sum_y = 0.0_f64;
        for (&a, &b) in pairs() {
            n += 1;
            sum_x += a;
            sum_y += b;
        }
        let mean_x = sum_x / n as f64;
        let mean_y = sum_y / n as f64;
        let (mut sxx, mut syy, mut sxy) = (0.0_f64, 0.0_f64, 0.0_f64);
        for (&a, &b) in pairs() {
            let dx = a - mean_x;
            let dy = b - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        Self {
            n,
            mean_x,
            mean_y,
            sxx,
            syy,
            sxy,
        }
    }

    #[inline]
    pub(crate) fn std_x(&self) -> f64 {
        (self.sxx / self.n as f64).sqrt()
    }

    #[inline]
    pub(crate) fn std_y(&self) -> f64 {
        (self.syy / self.n as f64).sqrt()
    }

    /// Guarded Pearson correlation; NaN for too few pairs or a flat side.
    pub(crate) fn corr(&self) -> f64 {
        if self.n <= MIN_CORR_PAIRS {
            return f64::NAN;
        }
        let flat = |ss: f64| ss.is_nan() || ss <= DIV_EPS;
        if flat(self.sxx) || flat(self.syy) {
            return f64::NAN;
        }
        (self.sxy / (self.sxx.sqrt() * self.syy.sqrt())).clamp(-1.0, 1.0)
    }

    /// Slope of `y` on `x` through the correlation and std-ratio identity.
    pub(crate) fn slope(&self) -> f64 {
        protected_div(self.corr() * self.std_y(), self.std_x())
    }
}

#[inline]
pub(crate) fn nan_sum(values: &[f64]) -> f64 {
    let mut any = false;
    let mut sum = 0.0;
    for &v in values.iter().filter(|v| is_present(**v)) {
        any = true;
        sum += v;
    }
    if any {
        sum
    } else {
        f64::NAN
    }
}

#[inline]
pub(crate) fn nan_mean(values: &[f64]) -> f64 {
    Moments::collect(values).map_or(f64::NAN, |m| m.mean)
}

#[inline]
pub(crate) fn nan_std(values: &[f64]) -> f64 {
    Moments::collect(values).map_or(f64::NAN, Moments::std)
}

#[inline]
pub(crate) fn nan_min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| is_present(*v))
        .fold(f64::NAN, f64::min)
}

#[inline]
pub(crate) fn nan_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| is_present(*v))
        .fold(f64::NAN, f64::max)
}

pub(crate) fn nan_median(values: &[f64]) -> f64 {
    let mut present: Vec<f64> = values.iter().copied().filter(|v| is_present(*v)).collect();
    if present.is_empty() {
        return f64::NAN;
    }
    present.sort_by(f64::total_cmp);
    let mid = present.len() / 2;
    if present.len() % 2 == 1 {
        present[mid]
    } else {
        (present[mid - 1] + present[mid]) * 0.5
    }
}

/// Division that yields the missing marker for a zero, tiny or non-finite denominator.
#[inline]
pub fn protected_div(num: f64, den: f64) -> f64 {
    if !den.is_finite() || den.abs() <= DIV_EPS {
        f64::NAN
    } else {
        num / den
    }
}

/// Pearson correlation over positions where both sides are present.
///
/// Returns NaN when at most [`MIN_CORR_PAIRS`] pairs survive or either side has no spread.
///
/// # Panics
/// Panics when `x` and `y` differ in length.
pub fn corr_guarded(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "corr_guarded requires equal-length inputs");
    PairMoments::collect(x, y).corr()
}
