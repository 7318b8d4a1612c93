pub mod error;
pub mod eval;
pub mod ops;
pub mod types;

pub use error::PrimitiveError;
pub use ops::{Domain, Kernel, OpCode, OpMeta, OperandSpec, Registry, ReturnKind};
pub use types::{Interval, Label, Operand, OperandKind, Value};

#[cfg(test)]
mod tests;
