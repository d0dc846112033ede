use std::{fmt, rc::Rc};

use crate::{interpreter::value::core::Value, util::num::format_float};

impl fmt::Display for Value {
    /// Writes the textual form `PRINT` and `str` produce.
    ///
    /// Strings print raw at the top level and quoted inside arrays. An array
    /// that contains itself prints the inner occurrence as `[...]`.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::value::core::Value;
    ///
    /// let array = Value::from(vec![1.into(), 2.5.into(), "a".into(), true.into()]);
    ///
    /// assert_eq!(array.to_string(), "[1, 2.5, 'a', true]");
    /// assert_eq!(Value::from("a").to_string(), "a");
    /// assert_eq!(Value::Nil.to_string(), "nil");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new(), false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new(), true)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>,
               value: &Value,
               visiting: &mut Vec<*const ()>,
               quoted: bool)
               -> fmt::Result {
    match value {
        Value::Integer(n) => write!(f, "{n}"),
        Value::Float(x) => f.write_str(&format_float(*x)),
        Value::String(s) if quoted => f.write_str(&quote(s)),
        Value::String(s) => f.write_str(s),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Array(items) => {
            let id = Rc::as_ptr(items).cast::<()>();
            if visiting.contains(&id) {
                return f.write_str("[...]");
            }

            visiting.push(id);
            f.write_str("[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, visiting, true)?;
            }
            visiting.pop();
            f.write_str("]")
        },
        Value::Function(func) => write!(f, "<function {}>", func.name()),
        Value::Builtin(def) => write!(f, "<builtin {}>", def.name),
        Value::File(handle) => write!(f, "<file {handle}>"),
        Value::Nil => f.write_str("nil"),
    }
}

/// Quotes a string the way it appears inside a printed array.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote.
///
/// ## Example
/// ```
/// use lexiscript::interpreter::value::display::quote;
///
/// assert_eq!(quote("a"), "'a'");
/// assert_eq!(quote("it's"), "\"it's\"");
/// assert_eq!(quote("tab\there"), "'tab\\there'");
/// ```
#[must_use]
pub fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') { '"' } else { '\'' };

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            },
            c if c.is_control() && u32::from(c) < 0x100 => {
                quoted.push_str(&format!("\\x{:02x}", u32::from(c)));
            },
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}
