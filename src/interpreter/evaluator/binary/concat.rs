use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Joins two strings or two arrays with `+`.
    ///
    /// Array concatenation always builds a new array; neither operand is
    /// modified.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let a = Value::from(vec![1.into()]);
    /// let b = Value::from(vec![2.into(), 3.into()]);
    ///
    /// let joined = Context::eval_concat(&a, &b, Position::new(1, 1)).unwrap();
    /// assert_eq!(joined.to_string(), "[1, 2, 3]");
    /// assert_eq!(a.to_string(), "[1]");
    /// ```
    pub fn eval_concat(left: &Value, right: &Value, position: Position) -> EvalResult<Value> {
        match (left, right) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            (Value::Array(a), Value::Array(b)) => {
                let joined = a.borrow().iter().chain(b.borrow().iter()).cloned().collect::<Vec<_>>();
                Ok(Value::from(joined))
            },
            _ => Err(RuntimeError::TypeMismatch { details: format!("Cannot concatenate {} and {}.",
                                                                   left.type_name(),
                                                                   right.type_name()),
                                                  position }),
        }
    }
}
