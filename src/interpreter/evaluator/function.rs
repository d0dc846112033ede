/// The builtin table.
///
/// Declares every standard-library function with its arity and binds the
/// table into each run's global scope.
pub mod core;
/// Conversion builtins: `int`, `float` and `str`.
pub mod conversion;
/// Numeric builtins.
///
/// Rounding, roots, logarithms, trigonometry and `min`/`max`.
pub mod numeric;
/// String builtins, plus `len` for strings and arrays.
pub mod string;
/// Array builtins.
///
/// Every mutator works on the array in place, so all references to it see
/// the change.
pub mod array;
/// File builtins and the per-run open-file table.
pub mod file;
/// `rand` and `randint`, drawn from the run's seeded generator.
pub mod random;
/// `time`.
pub mod time;
/// `ask`, reading from the run's input source.
pub mod input;
