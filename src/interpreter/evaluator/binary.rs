/// Binary operator dispatch.
///
/// Routes each operator to its handler and implements the short-circuiting
/// logical operators, which need the unevaluated right operand.
pub mod core;

/// Arithmetic on numbers: `+ - * / %` with integer overflow checks.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Equality and ordering comparisons.
pub mod comparison;

/// Integer bitwise operators and shifts.
pub mod bitwise;

/// Concatenation of strings and arrays.
pub mod concat;
