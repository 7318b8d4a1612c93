//! Primitive layer entry.
//!
//! Extension path (minimal touch points):
//! 1) implement kernel in `ts.rs` / `ta.rs` / `cs.rs` / `gb.rs` / `elem.rs`,
//! 2) add opcode in `spec.rs` and register meta in `catalog.rs` (`OP_METAS`),
//! 3) add kernel unit tests and a call-boundary test in `src/tests`.

pub mod arg_spec;
pub mod catalog;
pub mod spec;

pub mod cs;
pub mod elem;
pub mod fill;
pub mod gb;
pub mod group;
pub mod stats;
pub mod ta;
pub mod ts;

pub use arg_spec::{IntRange, OperandSpec, ReturnKind, SpecMatch, WINDOW_RANGE};
pub use catalog::{Kernel, OpMeta, Registry};
pub use cs::{
    cut_equal_amount, cut_equal_distance, sec_freq, sec_max, sec_mean, sec_median, sec_min,
    sec_neutralize, sec_rank, sec_std, BIN_RANGE_SCALE,
};
pub use elem::combine;
pub use fill::forward_fill;
pub use gb::{
    gb_cut_equal_amount, gb_cut_equal_distance, gb_freq, gb_max, gb_mean, gb_median, gb_min,
    gb_neutralize, gb_rank, gb_std,
};
pub use group::apply_grouped;
pub use spec::{Domain, OpCode};
pub use stats::{corr_guarded, protected_div, DIV_EPS};
pub use ta::{
    beta, dema, ema, kama, linearreg_angle, linearreg_intercept, linearreg_slope, ma, midpoint,
    KAMA_FAST_PERIOD, KAMA_SLOW_PERIOD,
};
pub use ts::{
    delay, delay_category, delta, effective_window, shift, ts_argmax, ts_argmin, ts_corr, ts_max,
    ts_mean, ts_mean_return, ts_min, ts_neutralize, ts_rank, ts_stddev, ts_sum,
};
