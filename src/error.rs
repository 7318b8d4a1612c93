use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PrimitiveError {
    #[error("unknown primitive `{name}`")]
    UnknownPrimitive { name: String },
    #[error("primitive `{name}` requires {expected} operands, got {actual}")]
    InvalidArity {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("primitive `{name}` operand {index} expects {expected}, got {actual}")]
    OperandMismatch {
        name: &'static str,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("primitive `{name}` operand {index} has length {actual}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("primitive `{name}` received an empty broadcast window at operand {index}")]
    EmptyBroadcast { name: &'static str, index: usize },
    #[error("primitive `{name}` operand {index} value {value} is outside [{min}, {max}]")]
    ParamOutOfRange {
        name: &'static str,
        index: usize,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("primitive `{name}` operand {index} domain is not contained in the declared domain")]
    DomainMismatch { name: &'static str, index: usize },
}
