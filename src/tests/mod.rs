use crate::ops::{OpCode, OperandSpec, Registry, ReturnKind};
use crate::types::{Label, Operand, OperandKind, Value};
use crate::PrimitiveError;


const NAN: f64 = f64::NAN;

fn approx_eq(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || (x - y).abs() <= 1e-9)
}

fn ramp(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64).collect()
}

fn zigzag() -> Vec<f64> {
    vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 8.0, 7.0]
}

fn parity_groups(n: usize) -> Vec<Label> {
    (0..n).map(|i| Label::Int((i % 2) as i64)).collect()
}

fn number(value: Value) -> Vec<f64> {
    value.into_number().expect("number result")
}

fn category(value: Value) -> Vec<Label> {
    value.into_category().expect("category result")
}
