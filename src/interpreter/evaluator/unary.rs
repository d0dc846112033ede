use crate::{
    ast::{Position, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation; integer negation is overflow-checked.
    /// - `Not`: the negated truthiness of any value, as a boolean.
    /// - `BitNot`: bitwise complement of an integer.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::{Position, UnaryOperator},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::Integer(5), at).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::from(""), at).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// let v = Context::eval_unary(UnaryOperator::BitNot, &Value::Integer(0), at).unwrap();
    /// assert_eq!(v, Value::Integer(-1));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Negate, &Value::Integer(i64::MIN), at).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, position: Position) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow { position }),
                Value::Float(x) => Ok(Value::Float(-x)),
                _ => Err(RuntimeError::TypeMismatch { details: format!("Cannot negate a value of type {}.",
                                                                       value.type_name()),
                                                      position }),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOperator::BitNot => match value {
                Value::Integer(n) => Ok(Value::Integer(!n)),
                _ => Err(RuntimeError::TypeMismatch { details: format!("Bitwise complement needs an int, found {}.",
                                                                       value.type_name()),
                                                      position }),
            },
        }
    }
}
