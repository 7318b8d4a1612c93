use crate::types::{Interval, OperandKind};
use serde::Serialize;

/// Inclusive integer range for scalar parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    #[inline]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Window lengths accepted by every windowed primitive and bin counts accepted by binning.
pub const WINDOW_RANGE: IntRange = IntRange::new(3, 30);

/// Constraint on one operand position of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum OperandSpec {
    /// Numeric vector whose values must lie inside `domain`.
    Number { domain: Interval },
    /// Category vector.
    Category,
    /// Either a numeric or a category vector.
    AnyVector,
    /// Integer scalar, possibly broadcast, within an inclusive range.
    Int { range: IntRange },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnKind {
    Number,
    Category,
    /// Same kind as the first operand.
    SameAsInput,
}

/// Result of checking one operand against its declared constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecMatch {
    Ok,
    WrongKind,
    OutOfDomain,
    OutOfRange,
}

impl OperandSpec {
    pub const NUMBER: Self = Self::Number {
        domain: Interval::UNBOUNDED,
    };
    pub const WINDOW: Self = Self::Int {
        range: WINDOW_RANGE,
    };

    #[inline]
    pub const fn is_vector(self) -> bool {
        !matches!(self, Self::Int { .. })
    }

    pub const fn expected(self) -> &'static str {
        match self {
            Self::Number { .. } => "number vector",
            Self::Category => "category vector",
            Self::AnyVector => "number or category vector",
            Self::Int { .. } => "int scalar",
        }
    }

    pub fn check(self, kind: &OperandKind) -> SpecMatch {
        match (self, kind) {
            (Self::Number { domain }, OperandKind::Number { domain: actual }) => {
                if domain.contains_interval(actual) {
                    SpecMatch::Ok
                } else {
                    SpecMatch::OutOfDomain
                }
            }
            (Self::Category, OperandKind::Category) => SpecMatch::Ok,
            (Self::AnyVector, OperandKind::Number { .. } | OperandKind::Category) => SpecMatch::Ok,
            (Self::Int { range }, OperandKind::Int(value)) => {
                if range.contains(*value) {
                    SpecMatch::Ok
                } else {
                    SpecMatch::OutOfRange
                }
            }
            _ => SpecMatch::WrongKind,
        }
    }

    /// Whether an operand of `kind` may be bound to this position.
    #[inline]
    pub fn accepts(self, kind: &OperandKind) -> bool {
        self.check(kind) == SpecMatch::Ok
    }
}
