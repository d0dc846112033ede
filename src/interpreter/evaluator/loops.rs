use crate::{
    ast::{Expr, Position, RangeDirection, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Flow},
            env::{Env, Scope},
        },
        value::core::Value,
    },
};

/// What a loop does after one run of its body.
enum Step {
    Continue,
    Stop,
    Leave(Flow),
}

impl Context {
    /// Executes `for var in iterable { body }`.
    ///
    /// Arrays are read by position on every iteration, so elements appended
    /// by the body are visited too. Strings are iterated by character over a
    /// snapshot taken before the first iteration. The loop variable is an
    /// ordinary binding in the current scope and keeps its last value.
    ///
    /// # Errors
    /// `TypeMismatch` if the iterable is neither an array nor a string.
    pub(crate) fn exec_for_each(&mut self,
                                var: &str,
                                iterable: &Expr,
                                body: &[Statement],
                                env: &Env,
                                position: Position)
                                -> EvalResult<Flow> {
        match self.eval(iterable, env)? {
            Value::Array(items) => {
                let mut i = 0;
                loop {
                    self.check_interrupt(position)?;
                    let Some(item) = items.borrow().get(i).cloned() else {
                        break;
                    };
                    i += 1;

                    Scope::define(env, var, item);
                    match self.run_body(body, env)? {
                        Step::Continue => {},
                        Step::Stop => break,
                        Step::Leave(flow) => return Ok(flow),
                    }
                }
            },
            Value::String(text) => {
                for c in text.chars() {
                    self.check_interrupt(position)?;

                    Scope::define(env, var, Value::String(c.to_string()));
                    match self.run_body(body, env)? {
                        Step::Continue => {},
                        Step::Stop => break,
                        Step::Leave(flow) => return Ok(flow),
                    }
                }
            },
            other => {
                return Err(RuntimeError::TypeMismatch { details: format!("Cannot iterate over a value of type {}.",
                                                                         other.type_name()),
                                                        position });
            },
        }

        Ok(Flow::Normal)
    }

    /// Executes an inclusive range loop.
    ///
    /// `start -> end` counts up and `start <- end` counts down; both bounds
    /// are evaluated once, before the first iteration. A range whose start is
    /// already past its end runs zero times.
    ///
    /// # Errors
    /// `TypeMismatch` if either bound is not an integer.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn exec_for_range(&mut self,
                                 var: &str,
                                 start: &Expr,
                                 end: &Expr,
                                 direction: RangeDirection,
                                 body: &[Statement],
                                 env: &Env,
                                 position: Position)
                                 -> EvalResult<Flow> {
        let start_value = self.eval(start, env)?.as_integer(start.position())?;
        let end_value = self.eval(end, env)?.as_integer(end.position())?;

        let range: Box<dyn Iterator<Item = i64>> = match direction {
            RangeDirection::Ascending => Box::new(start_value..=end_value),
            RangeDirection::Descending => Box::new((end_value..=start_value).rev()),
        };

        for i in range {
            self.check_interrupt(position)?;

            Scope::define(env, var, Value::Integer(i));
            match self.run_body(body, env)? {
                Step::Continue => {},
                Step::Stop => break,
                Step::Leave(flow) => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    /// Executes `while condition { body }`, re-evaluating the condition before
    /// every iteration.
    pub(crate) fn exec_while(&mut self,
                             condition: &Expr,
                             body: &[Statement],
                             env: &Env,
                             position: Position)
                             -> EvalResult<Flow> {
        loop {
            self.check_interrupt(position)?;
            if !self.eval(condition, env)?.is_truthy() {
                break;
            }

            match self.run_body(body, env)? {
                Step::Continue => {},
                Step::Stop => break,
                Step::Leave(flow) => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    /// Executes a loop with no condition; only an exit, a return, an error
    /// or an interrupt ends it.
    pub(crate) fn exec_infinite_loop(&mut self,
                                     body: &[Statement],
                                     env: &Env,
                                     position: Position)
                                     -> EvalResult<Flow> {
        loop {
            self.check_interrupt(position)?;

            match self.run_body(body, env)? {
                Step::Continue => {},
                Step::Stop => return Ok(Flow::Normal),
                Step::Leave(flow) => return Ok(flow),
            }
        }
    }

    /// Runs one iteration. A break is absorbed here; a return passes through.
    fn run_body(&mut self, body: &[Statement], env: &Env) -> EvalResult<Step> {
        Ok(match self.exec_block(body, env)? {
            Flow::Normal => Step::Continue,
            Flow::Break(_) => Step::Stop,
            flow @ Flow::Return(_) => Step::Leave(flow),
        })
    }
}
