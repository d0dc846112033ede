use std::cmp::Ordering;

use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
    util::num::normalize_index,
};

/// Appends a value to the end of an array.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::array::push, value::core::Value},
/// };
///
/// let array = Value::from(vec![1.into()]);
/// let alias = array.clone();
///
/// push(&[array, 2.into()], Position::new(1, 1)).unwrap();
/// assert_eq!(alias.to_string(), "[1, 2]");
/// ```
pub fn push(args: &[Value], position: Position) -> EvalResult<Value> {
    args[0].as_array(position)?
           .borrow_mut()
           .push(args[1].clone());
    Ok(Value::Nil)
}

/// Inserts a value before the given index.
///
/// Negative indices count from the end; indices past either end insert at
/// that end.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::array::insert, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
/// let array = Value::from(vec![1.into(), 3.into()]);
///
/// insert(&[array.clone(), 1.into(), 2.into()], at).unwrap();
/// insert(&[array.clone(), 100.into(), 4.into()], at).unwrap();
/// insert(&[array.clone(), (-100).into(), 0.into()], at).unwrap();
/// assert_eq!(array.to_string(), "[0, 1, 2, 3, 4]");
/// ```
pub fn insert(args: &[Value], position: Position) -> EvalResult<Value> {
    let items = args[0].as_array(position)?;
    let index = args[1].as_integer(position)?;

    let mut items = items.borrow_mut();
    let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let index = if index < 0 { index.saturating_add(len).max(0) } else { index.min(len) };
    items.insert(usize::try_from(index).unwrap_or(0), args[2].clone());

    Ok(Value::Nil)
}

/// Removes and returns the element at an index, the last one by default.
///
/// # Errors
/// `IndexOutOfBounds` for an empty array or an index outside it.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::array::pop, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
/// let array = Value::from(vec![1.into(), 2.into(), 3.into()]);
///
/// assert_eq!(pop(&[array.clone()], at).unwrap(), Value::Integer(3));
/// assert_eq!(pop(&[array.clone(), 0.into()], at).unwrap(), Value::Integer(1));
/// assert_eq!(array.to_string(), "[2]");
/// ```
pub fn pop(args: &[Value], position: Position) -> EvalResult<Value> {
    let items = args[0].as_array(position)?;
    let index = match args.get(1) {
        Some(index) => index.as_integer(position)?,
        None => -1,
    };

    let mut items = items.borrow_mut();
    let len = items.len();
    let slot = normalize_index(index, len).ok_or(RuntimeError::IndexOutOfBounds { index,
                                                                                  len,
                                                                                  position })?;
    Ok(items.remove(slot))
}

/// Removes and returns the first element equal to the given value.
///
/// # Errors
/// `InvalidArgument` if no element is equal.
pub fn remove(args: &[Value], position: Position) -> EvalResult<Value> {
    let items = args[0].as_array(position)?;
    let target = &args[1];

    let found = items.borrow().iter().position(|item| item.equals(target));
    match found {
        Some(slot) => Ok(items.borrow_mut().remove(slot)),
        None => Err(RuntimeError::InvalidArgument { details: format!("{target} is not in the array."),
                                                    position }),
    }
}

/// Reverses an array in place.
pub fn reverse(args: &[Value], position: Position) -> EvalResult<Value> {
    args[0].as_array(position)?.borrow_mut().reverse();
    Ok(Value::Nil)
}

/// Sorts an array in place, ascending and stable.
///
/// # Errors
/// `TypeMismatch` unless the elements are all numbers or all strings.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::array::sort, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// let numbers = Value::from(vec![3.into(), 1.5.into(), (-2).into()]);
/// sort(&[numbers.clone()], at).unwrap();
/// assert_eq!(numbers.to_string(), "[-2, 1.5, 3]");
///
/// let mixed = Value::from(vec![1.into(), "a".into()]);
/// assert!(sort(&[mixed], at).is_err());
/// ```
pub fn sort(args: &[Value], position: Position) -> EvalResult<Value> {
    let items = args[0].as_array(position)?;

    let mut items = items.borrow_mut();
    let all_numbers = items.iter().all(Value::is_number);
    let all_strings = items.iter().all(|item| matches!(item, Value::String(_)));
    if !all_numbers && !all_strings {
        return Err(RuntimeError::TypeMismatch { details: "array_sort needs all numbers or all strings.".to_string(),
                                                position });
    }

    items.sort_by(|a, b| a.total_compare(b, position).unwrap_or(Ordering::Equal));
    Ok(Value::Nil)
}
