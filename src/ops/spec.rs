use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Trailing-window statistic along the time axis.
    TimeSeries,
    /// Whole-vector statistic, optionally per category.
    Section,
    /// Position-by-position transform.
    Elem,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OpCode {
    Combine,
    Delay,
    Delta,
    TsMin,
    TsMax,
    TsArgMax,
    TsArgMin,
    TsRank,
    TsSum,
    TsMean,
    TsStddev,
    TsCorr,
    TsMeanReturn,
    TsNeutralize,
    Ema,
    Dema,
    Ma,
    Kama,
    Midpoint,
    Beta,
    LinearRegSlope,
    LinearRegAngle,
    LinearRegIntercept,
    SecMax,
    SecMin,
    SecMean,
    SecMedian,
    SecStd,
    SecRank,
    SecNeutralize,
    SecFreq,
    CutEqualDistance,
    CutEqualAmount,
    GbMax,
    GbMin,
    GbMean,
    GbMedian,
    GbStd,
    GbRank,
    GbNeutralize,
    GbFreq,
    GbCutEqualDistance,
    GbCutEqualAmount,
}

impl OpCode {
    pub const COUNT: usize = Self::GbCutEqualAmount as usize + 1;

    #[inline]
    pub const fn as_usize(self) -> usize {
        self as usize
    }
}
