use crate::{
    ast::Position,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Returns the length of a string in characters or of an array in elements.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::string::len, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(len(&[Value::from("héllo")], at).unwrap(), Value::Integer(5));
/// assert_eq!(len(&[Value::from(vec![1.into(), 2.into()])], at).unwrap(), Value::Integer(2));
/// assert!(len(&[Value::Integer(5)], at).is_err());
/// ```
pub fn len(args: &[Value], position: Position) -> EvalResult<Value> {
    let len = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.borrow().len(),
        other => {
            return Err(RuntimeError::TypeMismatch { details: format!("A value of type {} has no length.",
                                                                     other.type_name()),
                                                    position });
        },
    };
    Ok(Value::Integer(count(len)))
}

/// Extracts `length` characters starting at `start`.
///
/// A negative start counts from the end. The range is clamped to the string,
/// so out-of-range requests return a shorter or empty string.
///
/// # Errors
/// `InvalidArgument` for a negative length.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::string::substr, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
/// let text = Value::from("interpreter");
///
/// assert_eq!(substr(&[text.clone(), 5.into(), 4.into()], at).unwrap(), Value::from("pret"));
/// assert_eq!(substr(&[text.clone(), (-3).into(), 10.into()], at).unwrap(), Value::from("ter"));
/// assert!(substr(&[text, 0.into(), (-1).into()], at).is_err());
/// ```
pub fn substr(args: &[Value], position: Position) -> EvalResult<Value> {
    let text = args[0].as_str(position)?;
    let start = args[1].as_integer(position)?;
    let length = args[2].as_integer(position)?;

    if length < 0 {
        return Err(RuntimeError::InvalidArgument { details: format!("substr length must not be negative, found {length}."),
                                                   position });
    }

    let total = count(text.chars().count());
    let start = if start < 0 { (start.saturating_add(total)).max(0) } else { start.min(total) };
    let skip = usize::try_from(start).unwrap_or(0);
    let take = usize::try_from(length).unwrap_or(usize::MAX);

    Ok(Value::String(text.chars().skip(skip).take(take).collect()))
}

/// Returns the character index of the first occurrence of `needle`, or `-1`.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::string::pos, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(pos(&["banana".into(), "na".into()], at).unwrap(), Value::Integer(2));
/// assert_eq!(pos(&["banana".into(), "x".into()], at).unwrap(), Value::Integer(-1));
/// ```
pub fn pos(args: &[Value], position: Position) -> EvalResult<Value> {
    let text = args[0].as_str(position)?;
    let needle = args[1].as_str(position)?;

    Ok(Value::Integer(text.find(needle)
                          .map_or(-1, |byte| count(text[..byte].chars().count()))))
}

/// Applies a string transformation such as `upper`, `lower` or `trim`.
pub fn map_text<F>(f: F, args: &[Value], position: Position) -> EvalResult<Value>
    where F: Fn(&str) -> String
{
    Ok(Value::String(f(args[0].as_str(position)?)))
}

/// Replaces every occurrence of `old` with `new`.
pub fn replace(args: &[Value], position: Position) -> EvalResult<Value> {
    let text = args[0].as_str(position)?;
    let old = args[1].as_str(position)?;
    let new = args[2].as_str(position)?;

    Ok(Value::String(text.replace(old, new)))
}

/// Splits a string on a separator into a new array of strings.
///
/// # Errors
/// `InvalidArgument` for an empty separator.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::string::split, value::core::Value},
/// };
///
/// let parts = split(&["a,b,,c".into(), ",".into()], Position::new(1, 1)).unwrap();
/// assert_eq!(parts.to_string(), "['a', 'b', '', 'c']");
/// ```
pub fn split(args: &[Value], position: Position) -> EvalResult<Value> {
    let text = args[0].as_str(position)?;
    let separator = args[1].as_str(position)?;

    if separator.is_empty() {
        return Err(RuntimeError::InvalidArgument { details: "Empty separator.".to_string(),
                                                   position });
    }

    Ok(Value::from(text.split(separator).map(Value::from).collect::<Vec<_>>()))
}

/// Joins the printed forms of an array's elements with a separator.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::string::join, value::core::Value},
/// };
///
/// let items = Value::from(vec!["a".into(), 1.into(), 2.5.into()]);
/// let joined = join(&["-".into(), items], Position::new(1, 1)).unwrap();
/// assert_eq!(joined, Value::from("a-1-2.5"));
/// ```
pub fn join(args: &[Value], position: Position) -> EvalResult<Value> {
    let separator = args[0].as_str(position)?;
    let items = args[1].as_array(position)?;

    let joined = items.borrow()
                      .iter()
                      .map(ToString::to_string)
                      .collect::<Vec<_>>()
                      .join(separator);
    Ok(Value::String(joined))
}

/// Returns the one-character string for a Unicode code point.
///
/// # Errors
/// `InvalidArgument` if the number is not a valid code point.
pub fn chr(args: &[Value], position: Position) -> EvalResult<Value> {
    let code = args[0].as_integer(position)?;

    u32::try_from(code).ok()
                       .and_then(char::from_u32)
                       .map(|c| Value::String(c.to_string()))
                       .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{code} is not a valid character code."),
                                                                      position })
}

/// Returns the code point of a one-character string.
///
/// # Errors
/// `InvalidArgument` unless the string has exactly one character.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     interpreter::{evaluator::function::string::ord, value::core::Value},
/// };
///
/// let at = Position::new(1, 1);
///
/// assert_eq!(ord(&["A".into()], at).unwrap(), Value::Integer(65));
/// assert!(ord(&["AB".into()], at).is_err());
/// ```
pub fn ord(args: &[Value], position: Position) -> EvalResult<Value> {
    let text = args[0].as_str(position)?;

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Integer(i64::from(u32::from(c)))),
        _ => Err(RuntimeError::InvalidArgument { details: format!("ord expects a single character, found a string of length {}.",
                                                                  text.chars().count()),
                                                 position }),
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
