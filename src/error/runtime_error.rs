use crate::ast::Position;

#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// An operation received a value of the wrong kind.
    TypeMismatch {
        /// Details about the mismatch.
        details:  String,
        /// Where the operation was applied.
        position: Position,
    },
    /// A callable received the wrong number of arguments.
    ArityMismatch {
        /// Name of the callable.
        name:     String,
        /// Human-readable description of the accepted counts.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
        /// Position of the call.
        position: Position,
    },
    /// A value that is not a function or builtin was called.
    NotCallable {
        /// The type name of the value.
        type_name: &'static str,
        /// Position of the call.
        position:  Position,
    },
    /// An index fell outside the sequence after negative-index normalisation.
    IndexOutOfBounds {
        /// The index as written.
        index:    i64,
        /// Length of the indexed sequence.
        len:      usize,
        /// Position of the indexing expression.
        position: Position,
    },
    /// A name was read before any binding for it was visible.
    UndefinedIdentifier {
        /// The name looked up.
        name:     String,
        /// Position of the reference.
        position: Position,
    },
    /// A `return` outside any call, or an exit outside any loop.
    InvalidControlTransfer {
        /// Which transfer was misplaced, e.g. `"return"`.
        statement: &'static str,
        /// Position of the statement.
        position:  Position,
    },
    /// Division or modulo by zero.
    DivideByZero {
        /// Position of the operator.
        position: Position,
    },
    /// Integer arithmetic overflowed.
    Overflow {
        /// Position of the operation.
        position: Position,
    },
    /// An argument was outside the domain of an operation.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details:  String,
        /// Position of the call or operator.
        position: Position,
    },
    /// A file operation failed.
    Io {
        /// The underlying failure.
        details:  String,
        /// Position of the call.
        position: Position,
    },
    /// Calls nested deeper than the configured limit, or evaluation nested
    /// deeper than the evaluator allows.
    RecursionLimit {
        /// The limit that was reached.
        limit:    usize,
        /// Position of the call that exceeded it.
        position: Position,
    },
    /// The run was stopped from outside.
    Interrupted {
        /// Position of the statement about to run.
        position: Position,
    },
}

impl RuntimeError {
    /// The name of the error kind, as reported after the `RuntimeError:`
    /// prefix.
    ///
    /// ## Example
    /// ```
    /// use lexiscript::{ast::Position, error::RuntimeError};
    ///
    /// let e = RuntimeError::Overflow { position: Position::new(1, 1) };
    /// assert_eq!(e.kind(), "Overflow");
    /// ```
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::ArityMismatch { .. } => "ArityMismatch",
            Self::NotCallable { .. } => "NotCallable",
            Self::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            Self::UndefinedIdentifier { .. } => "UndefinedIdentifier",
            Self::InvalidControlTransfer { .. } => "InvalidControlTransfer",
            Self::DivideByZero { .. } => "DivideByZero",
            Self::Overflow { .. } => "Overflow",
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::Io { .. } => "Io",
            Self::RecursionLimit { .. } => "RecursionLimit",
            Self::Interrupted { .. } => "Interrupted",
        }
    }

    /// Position of the construct that failed.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::TypeMismatch { position, .. }
            | Self::ArityMismatch { position, .. }
            | Self::NotCallable { position, .. }
            | Self::IndexOutOfBounds { position, .. }
            | Self::UndefinedIdentifier { position, .. }
            | Self::InvalidControlTransfer { position, .. }
            | Self::DivideByZero { position }
            | Self::Overflow { position }
            | Self::InvalidArgument { position, .. }
            | Self::Io { position, .. }
            | Self::RecursionLimit { position, .. }
            | Self::Interrupted { position } => *position,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { details, position } => {
                write!(f, "Error on {position}: {details}")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found,
                                  position, } => write!(f,
                                                        "Error on {position}: {name} expects {expected} argument(s), but {found} were given."),
            Self::NotCallable { type_name, position } => {
                write!(f, "Error on {position}: A value of type {type_name} is not callable.")
            },
            Self::IndexOutOfBounds { index,
                                     len,
                                     position, } => write!(f,
                                                           "Error on {position}: Index {index} is out of bounds for length {len}."),
            Self::UndefinedIdentifier { name, position } => {
                write!(f, "Error on {position}: Undefined identifier '{name}'.")
            },
            Self::InvalidControlTransfer { statement, position } => {
                write!(f, "Error on {position}: '{statement}' is not allowed here.")
            },
            Self::DivideByZero { position } => write!(f, "Error on {position}: Division by zero."),
            Self::Overflow { position } => {
                write!(f, "Error on {position}: Integer arithmetic overflowed.")
            },
            Self::InvalidArgument { details, position } => {
                write!(f, "Error on {position}: {details}")
            },
            Self::Io { details, position } => write!(f, "Error on {position}: {details}"),
            Self::RecursionLimit { limit, position } => {
                write!(f, "Error on {position}: Maximum recursion depth of {limit} exceeded.")
            },
            Self::Interrupted { position } => {
                write!(f, "Error on {position}: Execution was interrupted.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
