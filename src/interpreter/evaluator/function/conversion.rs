use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::{f64_to_i64_checked, i64_to_f64},
};

/// Converts a value to an integer.
///
/// Floats are truncated toward zero, booleans become `0` or `1`, and strings
/// are parsed as a decimal integer after trimming surrounding whitespace.
///
/// # Errors
/// - `InvalidArgument` for a string that is not an integer, or a float that
///   is not finite or does not fit.
/// - `TypeMismatch` for any other kind of value.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::conversion::int, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(int(&[Value::Float(-2.7)], at).unwrap(), Value::Integer(-2));
/// assert_eq!(int(&[Value::from(" 42 ")], at).unwrap(), Value::Integer(42));
/// assert!(int(&[Value::from("4.2")], at).is_err());
/// ```
pub fn int(args: &[Value], position: Position) -> EvalResult<Value> {
    match &args[0] {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Float(x) => f64_to_i64_checked(*x).map(Value::Integer).ok_or_else(|| {
                                                     RuntimeError::InvalidArgument { details: format!("Cannot convert {} to int.",
                                                                                                      args[0]),
                                                                                     position }
                                                 }),
        Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        Value::String(s) => s.trim()
                             .parse::<i64>()
                             .map(Value::Integer)
                             .map_err(|_| RuntimeError::InvalidArgument { details: format!("Invalid literal for int: '{s}'."),
                                                                          position }),
        other => Err(RuntimeError::TypeMismatch { details: format!("Cannot convert a value of type {} to int.",
                                                                   other.type_name()),
                                                  position }),
    }
}

/// Converts a value to a float.
///
/// Integers and booleans convert numerically; strings are parsed after
/// trimming surrounding whitespace and may spell `inf` or `nan`.
///
/// # Errors
/// - `InvalidArgument` for a string that is not a number.
/// - `TypeMismatch` for any other kind of value.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::conversion::float, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(float(&[Value::Integer(3)], at).unwrap(), Value::Float(3.0));
/// assert_eq!(float(&[Value::from("2.5")], at).unwrap(), Value::Float(2.5));
/// assert!(float(&[Value::from("two")], at).is_err());
/// ```
pub fn float(args: &[Value], position: Position) -> EvalResult<Value> {
    match &args[0] {
        Value::Integer(n) => Ok(Value::Float(i64_to_f64(*n))),
        Value::Float(x) => Ok(Value::Float(*x)),
        Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s.trim()
                             .parse::<f64>()
                             .map(Value::Float)
                             .map_err(|_| RuntimeError::InvalidArgument { details: format!("Invalid literal for float: '{s}'."),
                                                                          position }),
        other => Err(RuntimeError::TypeMismatch { details: format!("Cannot convert a value of type {} to float.",
                                                                   other.type_name()),
                                                  position }),
    }
}

/// Converts a value to its printed form.
#[must_use]
pub fn str(args: &[Value]) -> Value {
    Value::String(args[0].to_string())
}
