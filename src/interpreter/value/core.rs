use std::{cell::RefCell, cmp::Ordering, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{
    ast::{LiteralValue, Position},
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::BuiltinDef},
        value::function::Function,
    },
    util::num::i64_to_f64,
};

/// A shared, mutable array. Every holder sees in-place changes.
pub type Array = Rc<RefCell<Vec<Value>>>;

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditions. Arrays and functions are
/// reference values: copying the value copies the reference.
#[derive(Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// An immutable string.
    String(String),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A resizable array shared by reference.
    Array(Array),
    /// A user-defined function.
    Function(Rc<Function>),
    /// A standard-library function.
    Builtin(&'static BuiltinDef),
    /// A handle into the run's open-file table.
    File(usize),
    /// The result of a call that finished without returning a value.
    Nil,
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(v)))
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Float(x) => Self::Float(*x),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl Value {
    /// The name `type()` reports for this value.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(1.5).type_name(), "float");
    /// assert_eq!(Value::from(vec![]).type_name(), "array");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Array(_) => "array",
            Self::Function(_) => "function",
            Self::Builtin(_) => "builtin",
            Self::File(_) => "file",
            Self::Nil => "nil",
        }
    }

    /// Tests the value for truthiness.
    ///
    /// Numbers are true when non-zero, strings and arrays when non-empty, and
    /// `Nil` is false. Functions, builtins and files are always true.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::value::core::Value;
    ///
    /// assert!(Value::from(-1).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::Nil.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Float(x) => *x != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Array(items) => !items.borrow().is_empty(),
            Self::Function(_) | Self::Builtin(_) | Self::File(_) => true,
            Self::Nil => false,
        }
    }

    /// Tests whether the value is an integer or a float.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Converts a numeric value to `f64`.
    ///
    /// # Parameters
    /// - `position`: Source position for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: For integers and floats.
    /// - `Err(RuntimeError::TypeMismatch)`: For anything else.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{ast::Position, interpreter::value::core::Value};
    ///
    /// assert_eq!(Value::from(10).as_float(Position::default()).unwrap(), 10.0);
    /// assert!(Value::from("10").as_float(Position::default()).is_err());
    /// ```
    pub fn as_float(&self, position: Position) -> EvalResult<f64> {
        match self {
            Self::Integer(n) => Ok(i64_to_f64(*n)),
            Self::Float(x) => Ok(*x),
            _ => Err(RuntimeError::TypeMismatch { details: format!("Expected a number, found {}.",
                                                                   self.type_name()),
                                                  position }),
        }
    }

    /// Extracts an integer.
    ///
    /// # Errors
    /// `TypeMismatch` for any non-integer value, floats included.
    pub fn as_integer(&self, position: Position) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            _ => Err(RuntimeError::TypeMismatch { details: format!("Expected an int, found {}.",
                                                                   self.type_name()),
                                                  position }),
        }
    }

    /// Borrows the string inside a `Value::String`.
    ///
    /// # Errors
    /// `TypeMismatch` for any other value.
    pub fn as_str(&self, position: Position) -> EvalResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(RuntimeError::TypeMismatch { details: format!("Expected a string, found {}.",
                                                                   self.type_name()),
                                                  position }),
        }
    }

    /// Returns the shared array inside a `Value::Array`.
    ///
    /// # Errors
    /// `TypeMismatch` for any other value.
    pub fn as_array(&self, position: Position) -> EvalResult<&Array> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(RuntimeError::TypeMismatch { details: format!("Expected an array, found {}.",
                                                                   self.type_name()),
                                                  position }),
        }
    }

    /// Compares two values with the language's `==`.
    ///
    /// Equality is total: numbers compare numerically across integers and
    /// floats, arrays compare element-wise, functions by identity, and values
    /// of different kinds are simply unequal.
    ///
    /// # Example
    /// ```
    /// use lexiscript::interpreter::value::core::Value;
    ///
    /// assert!(Value::from(1).equals(&Value::from(1.0)));
    /// assert!(!Value::from(1).equals(&Value::from("1")));
    /// assert!(Value::from(vec![1.into()]).equals(&Value::from(vec![1.into()])));
    /// ```
    ///
    /// Arrays that contain themselves compare without looping: a pair of
    /// arrays already being compared further up counts as equal.
    /// ```
    /// use lexiscript::{
    ///     ast::Position,
    ///     interpreter::{evaluator::function::array::push, value::core::Value},
    /// };
    ///
    /// let (a, b) = (Value::from(vec![1.into()]), Value::from(vec![1.into()]));
    /// push(&[a.clone(), a.clone()], Position::default()).unwrap();
    /// push(&[b.clone(), b.clone()], Position::default()).unwrap();
    ///
    /// assert!(a.equals(&b));
    /// ```
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self.equals_within(other, &mut Vec::new())
    }

    fn equals_within(&self, other: &Self, comparing: &mut Vec<(*const (), *const ())>) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Integer(_) | Self::Float(_), Self::Integer(_) | Self::Float(_)) => {
                self.as_float(Position::default()).ok() == other.as_float(Position::default()).ok()
            },
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let pair = (Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>());
                if comparing.contains(&pair) {
                    return true;
                }

                comparing.push(pair);
                let (a, b) = (a.borrow(), b.borrow());
                let equal = a.len() == b.len()
                            && a.iter().zip(b.iter()).all(|(x, y)| x.equals_within(y, comparing));
                comparing.pop();
                equal
            },
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => std::ptr::eq(*a, *b),
            (Self::File(a), Self::File(b)) => a == b,
            (Self::Nil, Self::Nil) => true,
            _ => false,
        }
    }

    /// Orders two values for the relational operators.
    ///
    /// Numbers compare numerically and strings lexicographically. A
    /// comparison involving NaN has no ordering and yields `None`.
    ///
    /// # Errors
    /// `TypeMismatch` when the operands are not both numbers or both strings.
    pub fn partial_compare(&self, other: &Self, position: Position) -> EvalResult<Option<Ordering>> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Ok(Some(a.cmp(b))),
            (Self::Integer(_) | Self::Float(_), Self::Integer(_) | Self::Float(_)) => {
                Ok(self.as_float(position)?
                       .partial_cmp(&other.as_float(position)?))
            },
            (Self::String(a), Self::String(b)) => Ok(Some(a.cmp(b))),
            _ => Err(RuntimeError::TypeMismatch { details: format!("Cannot compare {} with {}.",
                                                                   self.type_name(),
                                                                   other.type_name()),
                                                  position }),
        }
    }

    /// Orders two values totally, for sorting and for `min`/`max`.
    ///
    /// Floats use a total order in which NaN sorts above every number.
    ///
    /// # Errors
    /// `TypeMismatch` when the operands are not both numbers or both strings.
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use lexiscript::{ast::Position, interpreter::value::core::Value};
    ///
    /// let order = Value::from(2).total_compare(&Value::from(1.5), Position::default());
    /// assert_eq!(order.unwrap(), Ordering::Greater);
    /// ```
    pub fn total_compare(&self, other: &Self, position: Position) -> EvalResult<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Ok(a.cmp(b)),
            (Self::Integer(_) | Self::Float(_), Self::Integer(_) | Self::Float(_)) => {
                Ok(OrderedFloat(self.as_float(position)?).cmp(&OrderedFloat(other.as_float(position)?)))
            },
            (Self::String(a), Self::String(b)) => Ok(a.cmp(b)),
            _ => Err(RuntimeError::TypeMismatch { details: format!("Cannot compare {} with {}.",
                                                                   self.type_name(),
                                                                   other.type_name()),
                                                  position }),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}
