/// Numeric conversion and formatting helpers.
///
/// This module provides checked conversions between `i64`, `usize` and `f64`,
/// sequence index normalisation shared by indexing, slicing and the array
/// builtins, and the float formatting used whenever a value is printed.
pub mod num;
