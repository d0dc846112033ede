/// Entry points of the parser.
///
/// Holds the program and expression entry points, the ternary level and the
/// result alias shared by every parsing routine.
pub mod core;

/// Unary, postfix and primary expressions.
///
/// Handles prefix operators, calls, indexing, slicing, literals, names,
/// grouping and array literals.
pub mod unary;

/// Binary operator precedence levels.
///
/// Implements one routine per precedence level, from logical or down to
/// exponentiation.
pub mod binary;

/// Block parsing.
///
/// Parses brace-delimited statement sequences.
pub mod block;

/// Utility functions for the parser.
///
/// Provides token expectations, error construction and comma-separated list
/// parsing.
pub mod utils;

/// Statement parsing.
///
/// Implements every statement form: declarations, conditionals, the three
/// loop forms, exits, returns, printing, assignments and expression
/// statements.
pub mod statement;
