/// The runtime value type.
///
/// Defines `Value` and the operations every evaluator path needs: type names,
/// truthiness, equality, ordering and the coercions used by operators and
/// builtins.
pub mod core;

/// User-defined function values.
///
/// A function value pairs a shared declaration with the environment it was
/// declared in, which is what gives the language lexical scoping.
pub mod function;

/// Textual forms of values.
///
/// Implements the printed form used by `PRINT` and `str`, including float
/// formatting, quoted strings inside arrays and cycle-safe array rendering.
pub mod display;
