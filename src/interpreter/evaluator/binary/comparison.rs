use std::cmp::Ordering;

use crate::{
    ast::{BinaryOperator, Position},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// `Equal` and `NotEqual` never fail: values of different kinds are simply
    /// unequal. The relational operators need two numbers or two strings; a
    /// comparison with NaN is false.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: The left-hand value.
    /// - `right`: The right-hand value.
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing a boolean result.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::{BinaryOperator, Position},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Less, &3.into(), &5.5.into(), at);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_comparison(BinaryOperator::Equal, &1.into(), &"1".into(), at);
    /// assert_eq!(result.unwrap(), Value::Bool(false));
    ///
    /// assert!(Context::eval_comparison(BinaryOperator::Less, &1.into(), &"1".into(), at).is_err());
    /// ```
    pub fn eval_comparison(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => left.equals(right),
            NotEqual => !left.equals(right),
            _ => {
                let ordering = left.partial_compare(right, position)?;
                matches!((op, ordering),
                         (Less, Some(Ordering::Less))
                         | (LessEqual, Some(Ordering::Less | Ordering::Equal))
                         | (Greater, Some(Ordering::Greater))
                         | (GreaterEqual, Some(Ordering::Greater | Ordering::Equal)))
            },
        };

        Ok(Value::Bool(result))
    }
}
