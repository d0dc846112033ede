use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates an exponentiation operation.
    ///
    /// Integer–integer exponentiation with a non-negative exponent uses checked
    /// arithmetic and stays an integer. Negative integer exponents and any
    /// float operand are computed in floating-point form.
    ///
    /// # Errors
    /// - `DivideByZero` when zero is raised to a negative power.
    /// - `Overflow` when an integer power does not fit.
    /// - `InvalidArgument` when the real result is undefined, as for a
    ///   negative base with a fractional exponent.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    ///
    /// assert_eq!(Context::eval_pow(&2.into(), &10.into(), at).unwrap(), Value::Integer(1024));
    /// assert_eq!(Context::eval_pow(&2.into(), &(-1).into(), at).unwrap(), Value::Float(0.5));
    /// assert!(Context::eval_pow(&0.into(), &(-1).into(), at).is_err());
    /// ```
    pub fn eval_pow(base: &Value, exponent: &Value, position: Position) -> EvalResult<Value> {
        if !base.is_number() || !exponent.is_number() {
            return Err(RuntimeError::TypeMismatch { details: format!("Cannot apply ** to {} and {}.",
                                                                     base.type_name(),
                                                                     exponent.type_name()),
                                                    position });
        }

        if let (Value::Integer(b), Value::Integer(e)) = (base, exponent)
           && *e >= 0
        {
            return integer_pow(*b, *e).map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow { position });
        }

        let b = base.as_float(position)?;
        let e = exponent.as_float(position)?;

        if b == 0.0 && e < 0.0 {
            return Err(RuntimeError::DivideByZero { position });
        }

        let result = b.powf(e);
        if result.is_nan() && !b.is_nan() && !e.is_nan() {
            return Err(RuntimeError::InvalidArgument { details: format!("{base} ** {exponent} has no real value."),
                                                       position });
        }

        Ok(Value::Float(result))
    }
}

fn integer_pow(base: i64, exponent: i64) -> Option<i64> {
    match (base, u32::try_from(exponent)) {
        (_, Ok(e)) => base.checked_pow(e),
        (0 | 1, Err(_)) => Some(base),
        (-1, Err(_)) => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => None,
    }
}
