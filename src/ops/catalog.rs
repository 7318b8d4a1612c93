use crate::ops::arg_spec::{OperandSpec, ReturnKind};
use crate::ops::spec::{Domain, OpCode};
use crate::ops::{cs, elem, gb, ta, ts};
use crate::types::Label;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Typed computation bound to a registry entry.
///
/// The variant fixes the operand shape; [`validate_meta`] checks that the declared
/// operand specs agree with it.
#[derive(Clone, Copy)]
pub enum Kernel {
    /// `(category, category) -> category`
    CategoryPair(fn(&[Label], &[Label]) -> Vec<Label>),
    /// `(number | category, int) -> same kind`
    Shift {
        number: fn(&[f64], usize) -> Vec<f64>,
        category: fn(&[Label], usize) -> Vec<Label>,
    },
    /// `(number, int) -> number`
    Window(fn(&[f64], usize) -> Vec<f64>),
    /// `(number, number, int) -> number`
    PairWindow(fn(&[f64], &[f64], usize) -> Vec<f64>),
    /// `(number) -> number`
    Section(fn(&[f64]) -> Vec<f64>),
    /// `(number, int) -> category`
    SectionBins(fn(&[f64], usize) -> Vec<Label>),
    /// `(category, number) -> number`
    Grouped(fn(&[Label], &[f64]) -> Vec<f64>),
    /// `(category, number, int) -> category`
    GroupedBins(fn(&[Label], &[f64], usize) -> Vec<Label>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Number,
    Category,
    Any,
    Int,
}

impl Kernel {
    const fn slots(self) -> &'static [Slot] {
        match self {
            Self::CategoryPair(_) => &[Slot::Category, Slot::Category],
            Self::Shift { .. } => &[Slot::Any, Slot::Int],
            Self::Window(_) | Self::SectionBins(_) => &[Slot::Number, Slot::Int],
            Self::PairWindow(_) => &[Slot::Number, Slot::Number, Slot::Int],
            Self::Section(_) => &[Slot::Number],
            Self::Grouped(_) => &[Slot::Category, Slot::Number],
            Self::GroupedBins(_) => &[Slot::Category, Slot::Number, Slot::Int],
        }
    }

    const fn returns(self) -> ReturnKind {
        match self {
            Self::CategoryPair(_) | Self::SectionBins(_) | Self::GroupedBins(_) => {
                ReturnKind::Category
            }
            Self::Shift { .. } => ReturnKind::SameAsInput,
            Self::Window(_) | Self::PairWindow(_) | Self::Section(_) | Self::Grouped(_) => {
                ReturnKind::Number
            }
        }
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CategoryPair(_) => "CategoryPair",
            Self::Shift { .. } => "Shift",
            Self::Window(_) => "Window",
            Self::PairWindow(_) => "PairWindow",
            Self::Section(_) => "Section",
            Self::SectionBins(_) => "SectionBins",
            Self::Grouped(_) => "Grouped",
            Self::GroupedBins(_) => "GroupedBins",
        };
        f.write_str(name)
    }
}

fn slot_matches(slot: Slot, spec: OperandSpec) -> bool {
    matches!(
        (slot, spec),
        (Slot::Number, OperandSpec::Number { .. })
            | (Slot::Category, OperandSpec::Category)
            | (Slot::Any, OperandSpec::AnyVector)
            | (Slot::Int, OperandSpec::Int { .. })
    )
}

/// Static description of one primitive, consumed by the expression search.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OpMeta {
    /// Unique registry name.
    pub name: &'static str,
    pub op: OpCode,
    pub domain: Domain,
    /// Ordered operand constraints; the arity is their count.
    pub operands: &'static [OperandSpec],
    pub returns: ReturnKind,
    #[serde(skip)]
    pub kernel: Kernel,
}

impl OpMeta {
    #[inline]
    pub const fn arity(&self) -> usize {
        self.operands.len()
    }
}

/// Immutable primitive table indexed by name and opcode.
#[derive(Debug)]
pub struct Registry {
    metas: &'static [OpMeta],
    by_name: HashMap<&'static str, usize>,
    by_op: [usize; OpCode::COUNT],
}

static GLOBAL_REGISTRY: OnceLock<Registry> = OnceLock::new();
const MISSING_IDX: usize = usize::MAX;

impl Registry {
    /// Builds and validates the table.
    ///
    /// # Panics
    /// Panics when the static table is inconsistent: duplicate names or opcodes,
    /// uncovered opcodes, or operand specs that disagree with a kernel.
    pub fn new() -> Self {
        build_registry(&OP_METAS)
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::new)
    }

    pub fn get(&self, name: &str) -> Option<&'static OpMeta> {
        let metas = self.metas;
        self.by_name.get(name).map(|idx| &metas[*idx])
    }

    pub fn get_by_op(&self, op: OpCode) -> Option<&'static OpMeta> {
        match self.by_op[op.as_usize()] {
            MISSING_IDX => None,
            idx => Some(&self.metas[idx]),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static OpMeta> {
        self.metas.iter()
    }

    pub fn len(&self) -> usize {
        self.metas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    pub fn descriptors(&self) -> &'static [OpMeta] {
        self.metas
    }

    /// Static table as a JSON array, for loading into the expression search.
    pub fn descriptors_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.metas)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_registry(metas: &'static [OpMeta]) -> Registry {
    let mut by_name = HashMap::with_capacity(metas.len());
    let mut by_op = [MISSING_IDX; OpCode::COUNT];

    for (idx, meta) in metas.iter().enumerate() {
        validate_meta(meta);
        if by_name.insert(meta.name, idx).is_some() {
            panic!("duplicate primitive name in registry: {}", meta.name);
        }
        let op_slot = meta.op.as_usize();
        if by_op[op_slot] != MISSING_IDX {
            panic!("duplicate opcode in registry: {:?}", meta.op);
        }
        by_op[op_slot] = idx;
    }

    for (op_slot, idx) in by_op.iter().enumerate() {
        if *idx == MISSING_IDX {
            panic!("opcode slot not registered: {}", op_slot);
        }
    }

    Registry {
        metas,
        by_name,
        by_op,
    }
}

fn validate_meta(meta: &OpMeta) {
    let slots = meta.kernel.slots();
    if slots.len() != meta.operands.len() {
        panic!(
            "primitive `{}` declares {} operands but its {:?} kernel takes {}",
            meta.name,
            meta.operands.len(),
            meta.kernel,
            slots.len()
        );
    }
    for (idx, (slot, spec)) in slots.iter().zip(meta.operands).enumerate() {
        if !slot_matches(*slot, *spec) {
            panic!(
                "primitive `{}` operand {} declared as {} but kernel expects {:?}",
                meta.name,
                idx,
                spec.expected(),
                slot
            );
        }
    }
    if meta.kernel.returns() != meta.returns {
        panic!(
            "primitive `{}` declares return {:?} but kernel yields {:?}",
            meta.name,
            meta.returns,
            meta.kernel.returns()
        );
    }
    if !meta.operands.first().is_some_and(|spec| spec.is_vector()) {
        panic!("primitive `{}` must take a vector first operand", meta.name);
    }
}

const NUMBER_WINDOW: &[OperandSpec] = &[OperandSpec::NUMBER, OperandSpec::WINDOW];
const ANY_WINDOW: &[OperandSpec] = &[OperandSpec::AnyVector, OperandSpec::WINDOW];
const NUMBER_PAIR_WINDOW: &[OperandSpec] = &[
    OperandSpec::NUMBER,
    OperandSpec::NUMBER,
    OperandSpec::WINDOW,
];
const NUMBER_ONLY: &[OperandSpec] = &[OperandSpec::NUMBER];
const CATEGORY_PAIR: &[OperandSpec] = &[OperandSpec::Category, OperandSpec::Category];
const GROUPED: &[OperandSpec] = &[OperandSpec::Category, OperandSpec::NUMBER];
const GROUPED_WINDOW: &[OperandSpec] = &[
    OperandSpec::Category,
    OperandSpec::NUMBER,
    OperandSpec::WINDOW,
];

const fn ts_window(
    name: &'static str,
    op: OpCode,
    kernel: fn(&[f64], usize) -> Vec<f64>,
) -> OpMeta {
    OpMeta {
        name,
        op,
        domain: Domain::TimeSeries,
        operands: NUMBER_WINDOW,
        returns: ReturnKind::Number,
        kernel: Kernel::Window(kernel),
    }
}

const fn ts_pair_window(
    name: &'static str,
    op: OpCode,
    kernel: fn(&[f64], &[f64], usize) -> Vec<f64>,
) -> OpMeta {
    OpMeta {
        name,
        op,
        domain: Domain::TimeSeries,
        operands: NUMBER_PAIR_WINDOW,
        returns: ReturnKind::Number,
        kernel: Kernel::PairWindow(kernel),
    }
}

const fn section(name: &'static str, op: OpCode, kernel: fn(&[f64]) -> Vec<f64>) -> OpMeta {
    OpMeta {
        name,
        op,
        domain: Domain::Section,
        operands: NUMBER_ONLY,
        returns: ReturnKind::Number,
        kernel: Kernel::Section(kernel),
    }
}

const fn section_bins(
    name: &'static str,
    op: OpCode,
    kernel: fn(&[f64], usize) -> Vec<Label>,
) -> OpMeta {
    OpMeta {
        name,
        op,
        domain: Domain::Section,
        operands: NUMBER_WINDOW,
        returns: ReturnKind::Category,
        kernel: Kernel::SectionBins(kernel),
    }
}

const fn grouped(
    name: &'static str,
    op: OpCode,
    kernel: fn(&[Label], &[f64]) -> Vec<f64>,
) -> OpMeta {
    OpMeta {
        name,
        op,
        domain: Domain::Section,
        operands: GROUPED,
        returns: ReturnKind::Number,
        kernel: Kernel::Grouped(kernel),
    }
}

const fn grouped_bins(
    name: &'static str,
    op: OpCode,
    kernel: fn(&[Label], &[f64], usize) -> Vec<Label>,
) -> OpMeta {
    OpMeta {
        name,
        op,
        domain: Domain::Section,
        operands: GROUPED_WINDOW,
        returns: ReturnKind::Category,
        kernel: Kernel::GroupedBins(kernel),
    }
}

static OP_METAS: [OpMeta; OpCode::COUNT] = [
    OpMeta {
        name: "combine",
        op: OpCode::Combine,
        domain: Domain::Elem,
        operands: CATEGORY_PAIR,
        returns: ReturnKind::Category,
        kernel: Kernel::CategoryPair(elem::combine),
    },
    OpMeta {
        name: "delay",
        op: OpCode::Delay,
        domain: Domain::TimeSeries,
        operands: ANY_WINDOW,
        returns: ReturnKind::SameAsInput,
        kernel: Kernel::Shift {
            number: ts::delay,
            category: ts::delay_category,
        },
    },
    ts_window("delta", OpCode::Delta, ts::delta),
    ts_window("ts_min", OpCode::TsMin, ts::ts_min),
    ts_window("ts_max", OpCode::TsMax, ts::ts_max),
    ts_window("ts_argmax", OpCode::TsArgMax, ts::ts_argmax),
    ts_window("ts_argmin", OpCode::TsArgMin, ts::ts_argmin),
    ts_window("ts_rank", OpCode::TsRank, ts::ts_rank),
    ts_window("ts_sum", OpCode::TsSum, ts::ts_sum),
    ts_window("ts_mean", OpCode::TsMean, ts::ts_mean),
    ts_window("ts_stddev", OpCode::TsStddev, ts::ts_stddev),
    ts_pair_window("ts_corr", OpCode::TsCorr, ts::ts_corr),
    ts_window("ts_mean_return", OpCode::TsMeanReturn, ts::ts_mean_return),
    ts_window("ts_neutralize", OpCode::TsNeutralize, ts::ts_neutralize),
    ts_window("EMA", OpCode::Ema, ta::ema),
    ts_window("DEMA", OpCode::Dema, ta::dema),
    ts_window("MA", OpCode::Ma, ta::ma),
    ts_window("KAMA", OpCode::Kama, ta::kama),
    ts_window("MIDPOINT", OpCode::Midpoint, ta::midpoint),
    ts_pair_window("BETA", OpCode::Beta, ta::beta),
    ts_window("LINEARREG_SLOPE", OpCode::LinearRegSlope, ta::linearreg_slope),
    ts_window("LINEARREG_ANGLE", OpCode::LinearRegAngle, ta::linearreg_angle),
    ts_window(
        "LINEARREG_INTERCEPT",
        OpCode::LinearRegIntercept,
        ta::linearreg_intercept,
    ),
    section("sec_max", OpCode::SecMax, cs::sec_max),
    section("sec_min", OpCode::SecMin, cs::sec_min),
    section("sec_mean", OpCode::SecMean, cs::sec_mean),
    section("sec_median", OpCode::SecMedian, cs::sec_median),
    section("sec_std", OpCode::SecStd, cs::sec_std),
    section("sec_rank", OpCode::SecRank, cs::sec_rank),
    section("sec_neutralize", OpCode::SecNeutralize, cs::sec_neutralize),
    section("sec_freq", OpCode::SecFreq, cs::sec_freq),
    section_bins(
        "CUT_EQUAL_DISTANCE",
        OpCode::CutEqualDistance,
        cs::cut_equal_distance,
    ),
    section_bins("CUT_EQUAL_AMOUNT", OpCode::CutEqualAmount, cs::cut_equal_amount),
    grouped("gb_max", OpCode::GbMax, gb::gb_max),
    grouped("gb_min", OpCode::GbMin, gb::gb_min),
    grouped("gb_mean", OpCode::GbMean, gb::gb_mean),
    grouped("gb_median", OpCode::GbMedian, gb::gb_median),
    grouped("gb_std", OpCode::GbStd, gb::gb_std),
    grouped("gb_rank", OpCode::GbRank, gb::gb_rank),
    grouped("gb_neu", OpCode::GbNeutralize, gb::gb_neutralize),
    grouped("gb_freq", OpCode::GbFreq, gb::gb_freq),
    grouped_bins(
        "gb_cut_eq_dist",
        OpCode::GbCutEqualDistance,
        gb::gb_cut_equal_distance,
    ),
    grouped_bins(
        "gb_cut_eq_amt",
        OpCode::GbCutEqualAmount,
        gb::gb_cut_equal_amount,
    ),
];
