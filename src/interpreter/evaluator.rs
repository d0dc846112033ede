/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions, including
/// arithmetic, concatenation, comparisons, bitwise and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, logical NOT and bitwise complement.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the statement executor, the expression
/// evaluator and the control-flow signals returned by statements.
pub mod core;

/// The environment chain.
///
/// Scopes map names to values and link to their enclosing scope; lookups
/// walk outward, assignments write the innermost scope.
pub mod env;

/// Loop execution.
///
/// Implements for-each, inclusive range, while and infinite loops, each
/// checking for interruption on every iteration.
pub mod loops;

/// Indexing, slicing and element assignment.
pub mod index;

/// Call expressions.
///
/// Evaluates the callee and its arguments and dispatches to builtins or
/// user-defined functions.
pub mod call;

/// Function evaluation.
///
/// Holds the builtin table and the implementations of the standard library.
pub mod function;
