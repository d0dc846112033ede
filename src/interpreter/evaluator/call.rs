use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            env::Env,
        },
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// Builtins and user functions both check their arity before running.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the value to call.
    /// - `arguments`: Argument expressions.
    /// - `env`: Scope the call appears in.
    /// - `position`: Position of the call for error reporting.
    ///
    /// # Returns
    /// The callee's result, `Nil` for a function that finished without
    /// returning a value.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            arguments: &[Expr],
                            env: &Env,
                            position: Position)
                            -> EvalResult<Value> {
        let callee = self.eval(callee, env)?;
        let args = arguments.iter()
                            .map(|argument| self.eval(argument, env))
                            .collect::<EvalResult<Vec<_>>>()?;

        self.call_value(&callee, args, position)
    }

    /// Calls a value with already evaluated arguments.
    ///
    /// # Errors
    /// `NotCallable` for anything but a function or a builtin, plus whatever
    /// the callee raises.
    pub(crate) fn call_value(&mut self,
                             callee: &Value,
                             args: Vec<Value>,
                             position: Position)
                             -> EvalResult<Value> {
        match callee {
            Value::Builtin(def) => def.call(self, &args, position),
            Value::Function(function) => self.call_function(function, args, position),
            _ => Err(RuntimeError::NotCallable { type_name: callee.type_name(),
                                                 position }),
        }
    }
}
