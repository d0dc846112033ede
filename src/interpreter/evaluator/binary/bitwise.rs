use crate::{
    ast::{BinaryOperator, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `& | ^ << >>` on two integers.
    ///
    /// `>>` is an arithmetic shift. A left shift that loses significant bits
    /// is an overflow.
    ///
    /// # Errors
    /// - `TypeMismatch` unless both operands are integers.
    /// - `InvalidArgument` for a shift count outside `0..64`.
    /// - `Overflow` for a left shift that does not fit.
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
    /// let r = Context::eval_bitwise(BinaryOperator::BitXor, &6.into(), &3.into(), at).unwrap();
    /// assert_eq!(r, Value::Integer(5));
    ///
    /// let r = Context::eval_bitwise(BinaryOperator::ShiftRight, &(-8).into(), &1.into(), at).unwrap();
    /// assert_eq!(r, Value::Integer(-4));
    ///
    /// assert!(Context::eval_bitwise(BinaryOperator::ShiftLeft, &1.into(), &64.into(), at).is_err());
    /// ```
    pub fn eval_bitwise(op: BinaryOperator,
                        left: &Value,
                        right: &Value,
                        position: Position)
                        -> EvalResult<Value> {
        use BinaryOperator::{BitAnd, BitOr, BitXor, ShiftLeft, ShiftRight};

        let (Value::Integer(a), Value::Integer(b)) = (left, right) else {
            return Err(RuntimeError::TypeMismatch { details: format!("Cannot apply {op} to {} and {}.",
                                                                     left.type_name(),
                                                                     right.type_name()),
                                                    position });
        };
        let (a, b) = (*a, *b);

        match op {
            BitAnd => Ok(Value::Integer(a & b)),
            BitOr => Ok(Value::Integer(a | b)),
            BitXor => Ok(Value::Integer(a ^ b)),
            ShiftLeft | ShiftRight => {
                let count = u32::try_from(b).ok()
                                            .filter(|count| *count < i64::BITS)
                                            .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("Invalid shift count {b}."),
                                                                                           position })?;
                if op == ShiftRight {
                    return Ok(Value::Integer(a >> count));
                }

                let shifted = a << count;
                if shifted >> count == a {
                    Ok(Value::Integer(shifted))
                } else {
                    Err(RuntimeError::Overflow { position })
                }
            },
            _ => unreachable!(),
        }
    }
}
