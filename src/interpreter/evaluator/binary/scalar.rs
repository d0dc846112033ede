use crate::{
    ast::{BinaryOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a numeric arithmetic operation.
    ///
    /// Two integers stay an integer, with overflow reported instead of
    /// wrapping; a float on either side makes the result a float. Division
    /// always produces a float. Modulo takes the sign of the divisor. The
    /// operator must be one of `Add`, `Sub`, `Mul`, `Div` or `Mod`.
    ///
    /// # Parameters
    /// - `op`: The arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the computed number.
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
    /// let r = Context::eval_arithmetic(BinaryOperator::Mod, &(-7).into(), &3.into(), at).unwrap();
    /// assert_eq!(r, Value::Integer(2));
    ///
    /// let r = Context::eval_arithmetic(BinaryOperator::Mul, &1.5.into(), &2.into(), at).unwrap();
    /// assert_eq!(r, Value::Float(3.0));
    ///
    /// let r = Context::eval_arithmetic(BinaryOperator::Add, &i64::MAX.into(), &1.into(), at);
    /// assert!(r.is_err());
    /// ```
    pub fn eval_arithmetic(op: BinaryOperator,
                           left: &Value,
                           right: &Value,
                           position: Position)
                           -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        if !left.is_number() || !right.is_number() {
            return Err(RuntimeError::TypeMismatch { details: format!("Cannot apply {op} to {} and {}.",
                                                                     left.type_name(),
                                                                     right.type_name()),
                                                    position });
        }

        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            let result = match op {
                Add => a.checked_add(*b),
                Sub => a.checked_sub(*b),
                Mul => a.checked_mul(*b),
                Mod => {
                    if *b == 0 {
                        return Err(RuntimeError::DivideByZero { position });
                    }
                    Some(floored_rem(*a, *b))
                },
                Div => return Self::eval_float_arithmetic(op, left, right, position),
                _ => unreachable!(),
            };
            return result.map(Value::Integer)
                         .ok_or(RuntimeError::Overflow { position });
        }

        Self::eval_float_arithmetic(op, left, right, position)
    }

    fn eval_float_arithmetic(op: BinaryOperator,
                             left: &Value,
                             right: &Value,
                             position: Position)
                             -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mod, Mul, Sub};

        let a = left.as_float(position)?;
        let b = right.as_float(position)?;

        Ok(Value::Float(match op {
                            Add => a + b,
                            Sub => a - b,
                            Mul => a * b,
                            Div => {
                                if b == 0.0 {
                                    return Err(RuntimeError::DivideByZero { position });
                                }
                                a / b
                            },
                            Mod => {
                                if b == 0.0 {
                                    return Err(RuntimeError::DivideByZero { position });
                                }
                                floored_fmod(a, b)
                            },
                            _ => unreachable!(),
                        }))
    }
}

/// Integer remainder with the sign of the divisor.
fn floored_rem(a: i64, b: i64) -> i64 {
    // i64::MIN % -1 overflows in hardware but is mathematically 0.
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) { r + b } else { r }
}

/// Float remainder with the sign of the divisor.
fn floored_fmod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r == 0.0 {
        0.0_f64.copysign(b)
    } else if (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}
