use crate::{
    ast::{BinaryOperator, Expr, Position},
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            env::Env,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary expression.
    ///
    /// `and` and `or` evaluate their right operand only when the left one does
    /// not decide the result, and always yield a boolean. Every other operator
    /// evaluates both operands, left first, and defers to [`eval_binary`].
    ///
    /// [`eval_binary`]: Context::eval_binary
    pub(crate) fn eval_binary_expr(&mut self,
                                   left: &Expr,
                                   op: BinaryOperator,
                                   right: &Expr,
                                   env: &Env,
                                   position: Position)
                                   -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                let result = self.eval(left, env)?.is_truthy() && self.eval(right, env)?.is_truthy();
                Ok(Value::Bool(result))
            },
            BinaryOperator::Or => {
                let result = self.eval(left, env)?.is_truthy() || self.eval(right, env)?.is_truthy();
                Ok(Value::Bool(result))
            },
            _ => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                Self::eval_binary(op, &left, &right, position)
            },
        }
    }

    /// Evaluates a binary operation between two values.
    ///
    /// This function routes the operation to specialized handlers depending on
    /// the operator and operand types. `+` concatenates two strings or two
    /// arrays and otherwise behaves like the other arithmetic operators, which
    /// use `eval_arithmetic`. Power calls `eval_pow`. Relational and equality
    /// operators use `eval_comparison`, and the bitwise operators use
    /// `eval_bitwise`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
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
    /// let sum = Context::eval_binary(BinaryOperator::Add, &3.into(), &4.into(), at).unwrap();
    /// assert_eq!(sum, Value::Integer(7));
    ///
    /// let text = Context::eval_binary(BinaryOperator::Add, &"ab".into(), &"c".into(), at).unwrap();
    /// assert_eq!(text, Value::from("abc"));
    ///
    /// let quotient = Context::eval_binary(BinaryOperator::Div, &6.into(), &3.into(), at).unwrap();
    /// assert_eq!(quotient.to_string(), "2.0");
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       position: Position)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual,
            Mod, Mul, NotEqual, Or, Pow, ShiftLeft, ShiftRight, Sub,
        };

        match op {
            Add => match (left, right) {
                (Value::String(_), Value::String(_)) | (Value::Array(_), Value::Array(_)) => {
                    Self::eval_concat(left, right, position)
                },
                _ => Self::eval_arithmetic(op, left, right, position),
            },

            Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right, position),

            Pow => Self::eval_pow(left, right, position),

            Less | Greater | LessEqual | GreaterEqual | Equal | NotEqual => {
                Self::eval_comparison(op, left, right, position)
            },

            BitAnd | BitOr | BitXor | ShiftLeft | ShiftRight => {
                Self::eval_bitwise(op, left, right, position)
            },

            And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
            Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
        }
    }
}
