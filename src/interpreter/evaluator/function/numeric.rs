use std::cmp::Ordering;

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, round_half_even_i64},
};

/// Applies a float function to a numeric argument.
///
/// The generated functions accept exactly one argument. Integers are
/// converted to floats first; the result is always a float.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::numeric::sin, value::core::Value},
/// };
///
/// let r = sin(&[Value::Float(std::f64::consts::PI / 2.0)], Position::new(1, 1)).unwrap();
/// assert_eq!(r, Value::Float(1.0));
/// ```
macro_rules! float_builtin {
    ($fname:ident, $float_fn:ident) => {
        pub fn $fname(args: &[Value], position: Position) -> EvalResult<Value> {
            Ok(Value::Float(args[0].as_float(position)?.$float_fn()))
        }
    };
}

float_builtin!(sin, sin);
float_builtin!(cos, cos);
float_builtin!(tan, tan);
float_builtin!(atan, atan);

/// Returns the absolute value of a number, keeping its kind.
///
/// # Errors
/// `Overflow` for the most negative integer, `TypeMismatch` for non-numbers.
pub fn abs(args: &[Value], position: Position) -> EvalResult<Value> {
    match &args[0] {
        Value::Integer(n) => n.checked_abs()
                              .map(Value::Integer)
                              .ok_or(RuntimeError::Overflow { position }),
        Value::Float(x) => Ok(Value::Float(x.abs())),
        other => Err(expected_number(other, position)),
    }
}

/// Rounds a number half to even.
///
/// With one argument the result is an integer. With a digit count, floats
/// stay floats rounded to that many decimal places, and integers are
/// rounded to a multiple of ten when the count is negative.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::numeric::round, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(round(&[Value::Float(2.5)], at).unwrap(), Value::Integer(2));
/// assert_eq!(round(&[Value::Float(3.5)], at).unwrap(), Value::Integer(4));
/// assert_eq!(round(&[Value::Float(3.14159), Value::Integer(2)], at).unwrap(),
///            Value::Float(3.14));
/// assert_eq!(round(&[Value::Integer(1250), Value::Integer(-2)], at).unwrap(),
///            Value::Integer(1200));
/// ```
pub fn round(args: &[Value], position: Position) -> EvalResult<Value> {
    let Some(digits) = args.get(1) else {
        return match &args[0] {
            Value::Integer(n) => Ok(Value::Integer(*n)),
            Value::Float(x) => float_to_integer(x.round_ties_even(), position),
            other => Err(expected_number(other, position)),
        };
    };
    let digits = digits.as_integer(position)?;

    match &args[0] {
        Value::Integer(n) if digits >= 0 => Ok(Value::Integer(*n)),
        Value::Integer(n) => {
            let step = u32::try_from(digits.unsigned_abs()).ok()
                                                           .and_then(|d| 10_i64.checked_pow(d));
            match step {
                Some(step) => round_half_even_i64(*n, step).map(Value::Integer)
                                                          .ok_or(RuntimeError::Overflow { position }),
                None => Ok(Value::Integer(0)),
            }
        },
        Value::Float(x) => Ok(Value::Float(round_float(*x, digits))),
        other => Err(expected_number(other, position)),
    }
}

fn round_float(x: f64, digits: i64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let exponent = i32::try_from(digits.clamp(-400, 400)).unwrap_or(0);
    let scale = 10_f64.powi(exponent.abs());
    if !scale.is_finite() {
        return if exponent > 0 { x } else { 0.0_f64.copysign(x) };
    }

    if exponent >= 0 {
        let scaled = x * scale;
        if scaled.is_finite() { scaled.round_ties_even() / scale } else { x }
    } else {
        (x / scale).round_ties_even() * scale
    }
}

/// Implements `floor` and `ceil`; both return integers.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::numeric::floor_ceil, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(floor_ceil("floor", &[Value::Float(-1.5)], at).unwrap(), Value::Integer(-2));
/// assert_eq!(floor_ceil("ceil", &[Value::Float(-1.5)], at).unwrap(), Value::Integer(-1));
/// ```
pub fn floor_ceil(name: &str, args: &[Value], position: Position) -> EvalResult<Value> {
    let op = if name == "floor" { f64::floor } else { f64::ceil };

    match &args[0] {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Float(x) => float_to_integer(op(*x), position),
        other => Err(expected_number(other, position)),
    }
}

/// Computes the square root as a float.
///
/// # Errors
/// `InvalidArgument` for negative input.
pub fn sqrt(args: &[Value], position: Position) -> EvalResult<Value> {
    let x = args[0].as_float(position)?;
    if x < 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("Cannot take the square root of {}.",
                                                                    args[0]),
                                                   position });
    }
    Ok(Value::Float(x.sqrt()))
}

/// Returns the smallest or largest argument.
///
/// A single array argument is searched element-wise. Elements must be all
/// numbers or all strings; ties keep the first candidate, and the result is
/// the original value with its kind intact.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::numeric::min_max, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// let r = min_max("min", &[3.into(), 1.5.into(), 7.into()], at).unwrap();
/// assert_eq!(r, Value::Float(1.5));
///
/// let array = Value::from(vec![3.into(), 9.into(), 4.into()]);
/// assert_eq!(min_max("max", &[array], at).unwrap(), Value::Integer(9));
///
/// assert!(min_max("max", &[Value::from(vec![])], at).is_err());
/// ```
pub fn min_max(name: &str, args: &[Value], position: Position) -> EvalResult<Value> {
    let wanted = if name == "min" { Ordering::Less } else { Ordering::Greater };

    let candidates = match args {
        [Value::Array(items)] => items.borrow().clone(),
        _ => args.to_vec(),
    };

    let mut best: Option<Value> = None;
    for candidate in candidates {
        best = match best {
            Some(current) if candidate.total_compare(&current, position)? != wanted => Some(current),
            _ => Some(candidate),
        };
    }

    best.ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{name} of an empty array."),
                                                       position })
}

/// Computes a logarithm, natural by default or in the given base.
///
/// # Errors
/// - `InvalidArgument` for a non-positive argument or base.
/// - `DivideByZero` for base `1`.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::numeric::log, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(log(&[Value::Float(std::f64::consts::E)], at).unwrap(), Value::Float(1.0));
/// assert_eq!(log(&[Value::Integer(8), Value::Integer(2)], at).unwrap(), Value::Float(3.0));
/// assert!(log(&[Value::Integer(0)], at).is_err());
/// ```
pub fn log(args: &[Value], position: Position) -> EvalResult<Value> {
    let x = positive(&args[0], position)?;
    let Some(base) = args.get(1) else {
        return Ok(Value::Float(x.ln()));
    };

    let base = positive(base, position)?;
    if base == 1.0 {
        return Err(RuntimeError::DivideByZero { position });
    }
    Ok(Value::Float(x.ln() / base.ln()))
}

/// Computes the base-2 logarithm.
pub fn log2(args: &[Value], position: Position) -> EvalResult<Value> {
    Ok(Value::Float(positive(&args[0], position)?.log2()))
}

fn positive(value: &Value, position: Position) -> EvalResult<f64> {
    let x = value.as_float(position)?;
    if x > 0.0 {
        Ok(x)
    } else {
        Err(RuntimeError::InvalidArgument { details: format!("Logarithm of non-positive value {value}."),
                                            position })
    }
}

fn float_to_integer(x: f64, position: Position) -> EvalResult<Value> {
    f64_to_i64_checked(x).map(Value::Integer)
                         .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("Cannot convert {x} to int."),
                                                                        position })
}

fn expected_number(value: &Value, position: Position) -> RuntimeError {
    RuntimeError::TypeMismatch { details: format!("Expected a number, found {}.", value.type_name()),
                                 position }
}
