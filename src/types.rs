use serde::Serialize;
use std::fmt;

/// Discrete label carried by a category sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Label {
    Int(i64),
    Text(String),
    /// Absent label; positions holding it are never grouped.
    Missing,
}

impl Label {
    #[inline]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Missing => f.write_str("<missing>"),
        }
    }
}

/// Borrowed argument handed to a primitive at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    Number(&'a [f64]),
    Category(&'a [Label]),
    /// Plain integer parameter.
    Int(i64),
    /// Integer parameter broadcast to a vector by the caller; only element 0 is read.
    Broadcast(&'a [f64]),
}

impl Operand<'_> {
    #[inline]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number vector",
            Self::Category(_) => "category vector",
            Self::Int(_) => "int scalar",
            Self::Broadcast(_) => "broadcast int",
        }
    }

    #[inline]
    pub const fn vector_len(&self) -> Option<usize> {
        match self {
            Self::Number(v) | Self::Broadcast(v) => Some(v.len()),
            Self::Category(v) => Some(v.len()),
            Self::Int(_) => None,
        }
    }
}

/// Sequence produced by a primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Number(Vec<f64>),
    Category(Vec<Label>),
}

impl Value {
    pub fn len(&self) -> usize {
        match self {
            Self::Number(v) => v.len(),
            Self::Category(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_operand(&self) -> Operand<'_> {
        match self {
            Self::Number(v) => Operand::Number(v),
            Self::Category(v) => Operand::Category(v),
        }
    }

    pub fn as_number(&self) -> Option<&[f64]> {
        match self {
            Self::Number(v) => Some(v),
            Self::Category(_) => None,
        }
    }

    pub fn as_category(&self) -> Option<&[Label]> {
        match self {
            Self::Category(v) => Some(v),
            Self::Number(_) => None,
        }
    }

    pub fn into_number(self) -> Option<Vec<f64>> {
        match self {
            Self::Number(v) => Some(v),
            Self::Category(_) => None,
        }
    }

    pub fn into_category(self) -> Option<Vec<Label>> {
        match self {
            Self::Category(v) => Some(v),
            Self::Number(_) => None,
        }
    }
}

/// Closed numeric interval; `None` bounds are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    pub lo: Option<f64>,
    pub hi: Option<f64>,
}

impl Interval {
    pub const UNBOUNDED: Self = Self { lo: None, hi: None };

    #[inline]
    pub const fn new(lo: Option<f64>, hi: Option<f64>) -> Self {
        Self { lo, hi }
    }

    /// Whether every value of `inner` also lies in `self`.
    pub fn contains_interval(&self, inner: &Interval) -> bool {
        let lo_ok = match (self.lo, inner.lo) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(outer), Some(inner)) => inner >= outer,
        };
        let hi_ok = match (self.hi, inner.hi) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(outer), Some(inner)) => inner <= outer,
        };
        lo_ok && hi_ok
    }
}

/// What the search engine knows about a candidate operand before evaluating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OperandKind {
    Number { domain: Interval },
    Category,
    Int(i64),
}

impl OperandKind {
    pub const fn number() -> Self {
        Self::Number {
            domain: Interval::UNBOUNDED,
        }
    }

    #[inline]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number vector",
            Self::Category => "category vector",
            Self::Int(_) => "int scalar",
        }
    }
}
