//! Call boundary between the expression search and the primitive kernels.
//!
//! Operands are bound against the registry entry once per call: arity, operand
//! kind, vector length and the window parameter are resolved here so kernels
//! only ever see plain slices and one `usize` window.

use crate::error::PrimitiveError;
use crate::ops::{Kernel, OpMeta, OperandSpec, Registry, SpecMatch};
use crate::types::{Label, Operand, OperandKind, Value};
use tracing::{debug, trace_span};

#[derive(Debug, Clone, Copy)]
enum Bound<'a> {
    Number(&'a [f64]),
    Category(&'a [Label]),
    Window(usize),
}

impl Registry {
    /// Evaluates primitive `name` over `operands`.
    ///
    /// Window parameters are not range-checked here; oversized windows clamp to the
    /// series length and a zero window yields an all-missing result.
    pub fn call(&self, name: &str, operands: &[Operand<'_>]) -> Result<Value, PrimitiveError> {
        let meta = self.lookup(name)?;
        let span = trace_span!("primitive", primitive = meta.name, operands = operands.len());
        let _guard = span.enter();

        let bound = bind(meta, operands).inspect_err(|err| {
            debug!(primitive = meta.name, error = %err, "rejected primitive call");
        })?;
        Ok(run(meta, &bound))
    }

    /// Static compatibility check of candidate operands against `name`'s constraints.
    ///
    /// Unlike [`Registry::call`], integer parameters must lie inside their declared range.
    pub fn check(&self, name: &str, kinds: &[OperandKind]) -> Result<(), PrimitiveError> {
        let meta = self.lookup(name)?;
        check_arity(meta, kinds.len())?;
        for (index, (spec, kind)) in meta.operands.iter().zip(kinds).enumerate() {
            match spec.check(kind) {
                SpecMatch::Ok => {}
                SpecMatch::WrongKind => {
                    return Err(PrimitiveError::OperandMismatch {
                        name: meta.name,
                        index,
                        expected: spec.expected(),
                        actual: kind.kind_name(),
                    })
                }
                SpecMatch::OutOfDomain => {
                    return Err(PrimitiveError::DomainMismatch {
                        name: meta.name,
                        index,
                    })
                }
                SpecMatch::OutOfRange => {
                    let (OperandSpec::Int { range }, OperandKind::Int(value)) = (spec, kind) else {
                        unreachable!("range mismatch only arises for int operands");
                    };
                    return Err(PrimitiveError::ParamOutOfRange {
                        name: meta.name,
                        index,
                        value: *value,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&'static OpMeta, PrimitiveError> {
        self.get(name).ok_or_else(|| {
            debug!(primitive = name, "unknown primitive");
            PrimitiveError::UnknownPrimitive {
                name: name.to_string(),
            }
        })
    }
}

fn check_arity(meta: &OpMeta, actual: usize) -> Result<(), PrimitiveError> {
    if actual != meta.arity() {
        return Err(PrimitiveError::InvalidArity {
            name: meta.name,
            expected: meta.arity(),
            actual,
        });
    }
    Ok(())
}

/// Reduces an int parameter, plain or broadcast, to one window length.
fn normalize_window(
    meta: &OpMeta,
    index: usize,
    operand: Operand<'_>,
) -> Result<usize, PrimitiveError> {
    let raw = match operand {
        Operand::Int(value) => value,
        Operand::Broadcast(values) => {
            let Some(&first) = values.first() else {
                return Err(PrimitiveError::EmptyBroadcast {
                    name: meta.name,
                    index,
                });
            };
            if first.is_finite() {
                first as i64
            } else {
                0
            }
        }
        other => {
            return Err(PrimitiveError::OperandMismatch {
                name: meta.name,
                index,
                expected: "int scalar",
                actual: other.kind_name(),
            })
        }
    };
    Ok(usize::try_from(raw).unwrap_or(0))
}

fn bind<'a>(meta: &OpMeta, operands: &[Operand<'a>]) -> Result<Vec<Bound<'a>>, PrimitiveError> {
    check_arity(meta, operands.len())?;

    let mut bound = Vec::with_capacity(operands.len());
    for (index, (spec, operand)) in meta.operands.iter().zip(operands).enumerate() {
        let arg = match (spec, *operand) {
            (OperandSpec::Number { .. } | OperandSpec::AnyVector, Operand::Number(x)) => {
                Bound::Number(x)
            }
            (OperandSpec::Category | OperandSpec::AnyVector, Operand::Category(x)) => {
                Bound::Category(x)
            }
            (OperandSpec::Int { .. }, operand) => {
                Bound::Window(normalize_window(meta, index, operand)?)
            }
            (spec, operand) => {
                return Err(PrimitiveError::OperandMismatch {
                    name: meta.name,
                    index,
                    expected: spec.expected(),
                    actual: operand.kind_name(),
                })
            }
        };
        bound.push(arg);
    }

    let primary = match bound.first() {
        Some(Bound::Number(x)) => x.len(),
        Some(Bound::Category(x)) => x.len(),
        _ => 0,
    };
    for (index, arg) in bound.iter().enumerate().skip(1) {
        let actual = match arg {
            Bound::Number(x) => x.len(),
            Bound::Category(x) => x.len(),
            Bound::Window(window) => {
                if *window >= primary {
                    debug!(
                        primitive = meta.name,
                        requested = *window,
                        len = primary,
                        "window clamped to series length"
                    );
                }
                continue;
            }
        };
        if actual != primary {
            return Err(PrimitiveError::LengthMismatch {
                name: meta.name,
                index,
                expected: primary,
                actual,
            });
        }
    }
    Ok(bound)
}

fn run(meta: &OpMeta, args: &[Bound<'_>]) -> Value {
    use Bound::{Category, Number, Window};

    match (meta.kernel, args) {
        (Kernel::CategoryPair(f), [Category(a), Category(b)]) => Value::Category(f(a, b)),
        (Kernel::Shift { number, .. }, [Number(x), Window(d)]) => Value::Number(number(x, *d)),
        (Kernel::Shift { category, .. }, [Category(x), Window(d)]) => {
            Value::Category(category(x, *d))
        }
        (Kernel::Window(f), [Number(x), Window(d)]) => Value::Number(f(x, *d)),
        (Kernel::PairWindow(f), [Number(x), Number(y), Window(d)]) => Value::Number(f(x, y, *d)),
        (Kernel::Section(f), [Number(x)]) => Value::Number(f(x)),
        (Kernel::SectionBins(f), [Number(x), Window(d)]) => Value::Category(f(x, *d)),
        (Kernel::Grouped(f), [Category(g), Number(x)]) => Value::Number(f(g, x)),
        (Kernel::GroupedBins(f), [Category(g), Number(x), Window(d)]) => {
            Value::Category(f(g, x, *d))
        }
        (kernel, _) => unreachable!(
            "primitive `{}` operands bound against a {:?} kernel of a different shape",
            meta.name, kernel
        ),
    }
}
