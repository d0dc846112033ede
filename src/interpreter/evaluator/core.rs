use std::{path::PathBuf, rc::Rc};

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    ast::{AssignTarget, Expr, Position, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            env::{CycleTracker, Env, Scope},
            function::{core::BUILTIN_TABLE, file::FileTable},
        },
        value::{core::Value, function::Function},
    },
    runtime::{InputSource, Interrupt, RunOptions},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Bound on statements and expressions being evaluated at once, across all
/// active calls. It keeps the native stack of the run thread from running
/// out whatever call-depth limit the run was given.
pub const MAX_EVAL_DEPTH: usize = 20_000;

/// How a statement finished.
///
/// `Return` travels up to the nearest enclosing call and `Break` to the
/// nearest enclosing loop. Every statement list checks the flow after each
/// statement and stops early on anything but `Normal`.
#[derive(Debug)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A return statement ran with this value.
    Return(Value),
    /// An exit statement ran at this position.
    Break(Position),
}

/// Stores the runtime state of one program run.
///
/// ## Usage
///
/// A `Context` is created per run from its [`RunOptions`] and discarded with
/// the run. It owns the global scope, the output buffer, the input source,
/// the random generator and the open-file table, so nothing is shared between
/// runs except the interrupt flag. Dropping the context closes every file the
/// run opened and empties every scope and array the run may have left in a
/// reference cycle.
pub struct Context {
    /// The outermost scope, holding the builtins and top-level bindings.
    pub(crate) globals:    Env,
    /// Everything printed so far.
    pub(crate) output:     String,
    /// Where `ask` reads its lines.
    pub(crate) input:      Box<dyn InputSource>,
    /// Files opened by the program.
    pub(crate) files:      FileTable,
    /// Generator behind `rand` and `randint`.
    pub(crate) rng:        StdRng,
    /// Directory relative paths resolve against.
    pub(crate) workdir:    PathBuf,
    pub(crate) cycles:     CycleTracker,
    interrupt:             Interrupt,
    call_depth:            usize,
    max_call_depth:        usize,
    eval_depth:            usize,
}

impl Context {
    /// Creates a context for a fresh run and binds the standard library into
    /// the global scope.
    #[must_use]
    pub fn new(options: RunOptions) -> Self {
        let globals = Scope::global();
        for def in BUILTIN_TABLE {
            Scope::define(&globals, def.name, Value::Builtin(def));
        }
        let mut cycles = CycleTracker::default();
        cycles.track_scope(&globals);

        let rng = options.seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        Self { globals,
               output: String::new(),
               input: options.input,
               files: FileTable::default(),
               rng,
               workdir: options.workdir,
               cycles,
               interrupt: options.interrupt,
               call_depth: 0,
               max_call_depth: options.max_call_depth,
               eval_depth: 0 }
    }

    /// The output the program has printed so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Reads a top-level binding.
    ///
    /// The value is shared with the program: an array read this way sees
    /// later changes made by the program.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<Value> {
        Scope::lookup(&self.globals, name)
    }

    /// Takes the printed output, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Executes a whole program in the global scope.
    ///
    /// # Returns
    /// `Ok(())` if every statement ran, or the first runtime error.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::parse_program},
    ///     lexicon::Lexicon,
    ///     runtime::RunOptions,
    /// };
    ///
    /// let tokens = tokenize("x = [1, 2]; x[0] += 4; say x;", &Lexicon::default()).unwrap();
    /// let program = parse_program(&tokens).unwrap();
    ///
    /// let mut context = Context::new(RunOptions::default());
    /// context.execute(&program).unwrap();
    ///
    /// assert_eq!(context.output(), "[5, 2]");
    /// ```
    pub fn execute(&mut self, program: &Program) -> EvalResult<()> {
        let globals = Rc::clone(&self.globals);
        match self.exec_block(&program.statements, &globals)? {
            Flow::Normal | Flow::Return(_) => Ok(()),
            Flow::Break(position) => Err(RuntimeError::InvalidControlTransfer { statement: "exit",
                                                                                position }),
        }
    }

    /// Runs statements in order until one transfers control.
    ///
    /// Blocks do not open a scope: every statement runs in `env`.
    pub(crate) fn exec_block(&mut self, statements: &[Statement], env: &Env) -> EvalResult<Flow> {
        for statement in statements {
            match self.exec_statement(statement, env)? {
                Flow::Normal => {},
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a single statement.
    ///
    /// Function declarations bind a function value in `env`, so a declaration
    /// inside a function body is only visible from that call's scope.
    /// Assignments always write `env` itself; reads walk outward.
    pub(crate) fn exec_statement(&mut self, statement: &Statement, env: &Env) -> EvalResult<Flow> {
        let position = statement_position(statement);
        self.check_interrupt(position)?;

        self.descend(position)?;
        let flow = self.run_statement(statement, env);
        self.eval_depth -= 1;
        flow
    }

    fn run_statement(&mut self, statement: &Statement, env: &Env) -> EvalResult<Flow> {
        match statement {
            Statement::Function(decl) => {
                let function = Function { decl: Rc::clone(decl),
                                          env:  Rc::clone(env), };
                Scope::define(env, &decl.name, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            },
            Statement::Assign { target,
                                value,
                                position, } => {
                let value = self.eval(value, env)?;
                match target {
                    AssignTarget::Variable(name) => Scope::define(env, name, value),
                    AssignTarget::Index { target, index } => {
                        let target = self.eval(target, env)?;
                        let index = self.eval(index, env)?;
                        self.cycles.track_store(&target, &value);
                        Self::assign_index(&target, &index, value, *position)?;
                    },
                }
                Ok(Flow::Normal)
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                let taken = match condition {
                    Some(condition) => self.eval(condition, env)?.is_truthy(),
                    None => true,
                };

                if taken {
                    self.exec_block(then_branch, env)
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch, env)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::ForEach { var,
                                 iterable,
                                 body,
                                 position, } => self.exec_for_each(var, iterable, body, env, *position),
            Statement::ForRange { var,
                                  start,
                                  end,
                                  direction,
                                  body,
                                  position, } => {
                self.exec_for_range(var, start, end, *direction, body, env, *position)
            },
            Statement::While { condition,
                               body,
                               position, } => self.exec_while(condition, body, env, *position),
            Statement::InfiniteLoop { body, position } => {
                self.exec_infinite_loop(body, env, *position)
            },
            Statement::Break { position } => Ok(Flow::Break(*position)),
            Statement::Return { value, position } => {
                if self.call_depth == 0 {
                    return Err(RuntimeError::InvalidControlTransfer { statement: "return",
                                                                      position:  *position, });
                }
                let value = match value {
                    Some(expr) => self.eval(expr, env)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
            Statement::Print { arguments, .. } => {
                for argument in arguments {
                    let value = self.eval(argument, env)?;
                    self.output.push_str(&value.to_string());
                }
                Ok(Flow::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr, env)?;
                Ok(Flow::Normal)
            },
            Statement::Block { statements, .. } => self.exec_block(statements, env),
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// evaluated left to right; `and`, `or` and the ternary only evaluate the
    /// operands they need.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Scope names are resolved in.
    ///
    /// # Returns
    /// The value of the expression, or the first runtime error raised while
    /// computing it.
    ///
    /// # Errors
    /// Besides the errors of the operation itself, `RecursionLimit` once
    /// [`MAX_EVAL_DEPTH`] evaluations are in progress.
    pub fn eval(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        self.descend(expr.position())?;
        let value = self.eval_expr(expr, env);
        self.eval_depth -= 1;
        value
    }

    fn eval_expr(&mut self, expr: &Expr, env: &Env) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, position } => {
                Scope::lookup(env, name).ok_or_else(|| RuntimeError::UndefinedIdentifier { name:     name.clone(),
                                                                                           position: *position, })
            },
            Expr::Unary { op, expr, position } => {
                let value = self.eval(expr, env)?;
                Self::eval_unary(*op, &value, *position)
            },
            Expr::Binary { left,
                           op,
                           right,
                           position, } => self.eval_binary_expr(left, *op, right, env, *position),
            Expr::Ternary { condition,
                            then_expr,
                            else_expr,
                            .. } => {
                if self.eval(condition, env)?.is_truthy() {
                    self.eval(then_expr, env)
                } else {
                    self.eval(else_expr, env)
                }
            },
            Expr::Call { callee,
                         arguments,
                         position, } => self.eval_call(callee, arguments, env, *position),
            Expr::Index { target,
                          index,
                          position, } => {
                let target = self.eval(target, env)?;
                let index = self.eval(index, env)?;
                Self::eval_index(&target, &index, *position)
            },
            Expr::Slice { target,
                          start,
                          end,
                          position, } => {
                let target = self.eval(target, env)?;
                let start = start.as_ref().map(|e| self.eval(e, env)).transpose()?;
                let end = end.as_ref().map(|e| self.eval(e, env)).transpose()?;
                Self::eval_slice(&target, start.as_ref(), end.as_ref(), *position)
            },
            Expr::ArrayLiteral { elements, .. } => {
                let values = elements.iter()
                                     .map(|e| self.eval(e, env))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::from(values))
            },
        }
    }

    /// Calls a user-defined function with already evaluated arguments.
    ///
    /// The arity is checked before anything else, so a mismatched call has no
    /// side effects. The body runs in a fresh scope whose parent is the scope
    /// the function was declared in.
    pub(crate) fn call_function(&mut self,
                                function: &Function,
                                args: Vec<Value>,
                                position: Position)
                                -> EvalResult<Value> {
        if args.len() != function.arity() {
            return Err(RuntimeError::ArityMismatch { name: function.name().to_string(),
                                                     expected: function.arity().to_string(),
                                                     found: args.len(),
                                                     position });
        }
        if self.call_depth >= self.max_call_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.max_call_depth,
                                                      position });
        }

        let scope = Scope::child(&function.env);
        self.cycles.track_scope(&scope);
        for (param, arg) in function.decl.params.iter().zip(args) {
            Scope::define(&scope, param, arg);
        }

        self.call_depth += 1;
        let flow = self.exec_block(&function.decl.body, &scope);
        self.call_depth -= 1;

        match flow? {
            Flow::Normal => Ok(Value::Nil),
            Flow::Return(value) => Ok(value),
            Flow::Break(position) => Err(RuntimeError::InvalidControlTransfer { statement: "exit",
                                                                                position }),
        }
    }

    /// Counts one more statement or expression under evaluation.
    ///
    /// Callers undo it by decrementing `eval_depth` once the evaluation
    /// finishes, whatever its outcome.
    fn descend(&mut self, position: Position) -> EvalResult<()> {
        if self.eval_depth >= MAX_EVAL_DEPTH {
            return Err(RuntimeError::RecursionLimit { limit: MAX_EVAL_DEPTH,
                                                      position });
        }
        self.eval_depth += 1;
        Ok(())
    }

    /// Fails with `Interrupted` once the run's interrupt flag is set.
    pub(crate) fn check_interrupt(&self, position: Position) -> EvalResult<()> {
        if self.interrupt.is_triggered() {
            Err(RuntimeError::Interrupted { position })
        } else {
            Ok(())
        }
    }

    /// Resolves a program-supplied path against the run's working directory.
    pub(crate) fn resolve_path(&self, path: &str) -> PathBuf {
        self.workdir.join(path)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.files.close_all();
        self.cycles.release();
    }
}

fn statement_position(statement: &Statement) -> Position {
    match statement {
        Statement::Function(decl) => decl.position,
        Statement::Assign { position, .. }
        | Statement::If { position, .. }
        | Statement::ForEach { position, .. }
        | Statement::ForRange { position, .. }
        | Statement::While { position, .. }
        | Statement::InfiniteLoop { position, .. }
        | Statement::Break { position }
        | Statement::Return { position, .. }
        | Statement::Print { position, .. }
        | Statement::Expression { position, .. }
        | Statement::Block { position, .. } => *position,
    }
}
