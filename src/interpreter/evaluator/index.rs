use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
    util::num::{normalize_index, slice_bounds},
};

impl Context {
    /// Evaluates `target[index]`.
    ///
    /// Indexing a string yields a one-character string, indexing an array
    /// yields the element itself. Negative indices count from the end.
    ///
    /// # Errors
    /// - `TypeMismatch` if the index is not an integer or the target is
    ///   neither a string nor an array.
    /// - `IndexOutOfBounds` if the normalised index falls outside the
    ///   sequence.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    /// let text = Value::from("abc");
    ///
    /// assert_eq!(Context::eval_index(&text, &Value::from(-1), at).unwrap(), Value::from("c"));
    /// assert!(Context::eval_index(&text, &Value::from(3), at).is_err());
    /// assert!(Context::eval_index(&text, &Value::from(1.0), at).is_err());
    /// ```
    pub fn eval_index(target: &Value, index: &Value, position: Position) -> EvalResult<Value> {
        match target {
            Value::String(text) => {
                let index = index_of(index, position)?;
                let len = text.chars().count();
                normalize_index(index, len).and_then(|i| text.chars().nth(i))
                                           .map(|c| Value::String(c.to_string()))
                                           .ok_or(RuntimeError::IndexOutOfBounds { index,
                                                                                   len,
                                                                                   position })
            },
            Value::Array(items) => {
                let index = index_of(index, position)?;
                let items = items.borrow();
                normalize_index(index, items.len()).map(|i| items[i].clone())
                                                   .ok_or(RuntimeError::IndexOutOfBounds { index,
                                                                                           len: items.len(),
                                                                                           position })
            },
            _ => Err(RuntimeError::TypeMismatch { details: format!("A value of type {} cannot be indexed.",
                                                                   target.type_name()),
                                                  position }),
        }
    }

    /// Evaluates `target[start:end]`.
    ///
    /// Bounds are clamped to the sequence, so slicing never fails on range.
    /// Slicing an array produces a new array.
    ///
    /// # Errors
    /// `TypeMismatch` if a bound is not an integer or the target is neither a
    /// string nor an array.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::Position,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let at = Position::new(1, 1);
    /// let array = Value::from(vec![10.into(), 20.into(), 30.into(), 40.into()]);
    ///
    /// let slice = Context::eval_slice(&array, Some(&1.into()), Some(&3.into()), at).unwrap();
    /// assert_eq!(slice.to_string(), "[20, 30]");
    ///
    /// let slice = Context::eval_slice(&array, None, Some(&(-1).into()), at).unwrap();
    /// assert_eq!(slice.to_string(), "[10, 20, 30]");
    /// ```
    pub fn eval_slice(target: &Value,
                      start: Option<&Value>,
                      end: Option<&Value>,
                      position: Position)
                      -> EvalResult<Value> {
        let start = start.map(|v| index_of(v, position)).transpose()?;
        let end = end.map(|v| index_of(v, position)).transpose()?;

        match target {
            Value::String(text) => {
                let (from, to) = slice_bounds(start, end, text.chars().count());
                Ok(Value::String(text.chars().skip(from).take(to - from).collect()))
            },
            Value::Array(items) => {
                let items = items.borrow();
                let (from, to) = slice_bounds(start, end, items.len());
                Ok(Value::from(items[from..to].to_vec()))
            },
            _ => Err(RuntimeError::TypeMismatch { details: format!("A value of type {} cannot be sliced.",
                                                                   target.type_name()),
                                                  position }),
        }
    }

    /// Stores `value` at `target[index]`.
    ///
    /// Only arrays support element assignment; strings are immutable.
    ///
    /// # Errors
    /// - `TypeMismatch` if the target is not an array or the index is not an
    ///   integer.
    /// - `IndexOutOfBounds` if the normalised index falls outside the array.
    pub fn assign_index(target: &Value,
                        index: &Value,
                        value: Value,
                        position: Position)
                        -> EvalResult<()> {
        let Value::Array(items) = target else {
            return Err(RuntimeError::TypeMismatch { details: format!("Cannot assign to an element of a value of type {}.",
                                                                     target.type_name()),
                                                    position });
        };

        let index = index_of(index, position)?;
        let mut items = items.borrow_mut();
        let len = items.len();
        let slot = normalize_index(index, len).ok_or(RuntimeError::IndexOutOfBounds { index,
                                                                                      len,
                                                                                      position })?;
        items[slot] = value;
        Ok(())
    }
}

fn index_of(index: &Value, position: Position) -> EvalResult<i64> {
    match index {
        Value::Integer(n) => Ok(*n),
        _ => Err(RuntimeError::TypeMismatch { details: format!("Indices must be ints, found {}.",
                                                               index.type_name()),
                                              position }),
    }
}
