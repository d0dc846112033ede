use crate::ast::Position;

#[derive(Debug)]
/// Represents all errors that can occur during parsing.
pub enum ParseError {
    /// Found a token the grammar does not allow here.
    UnexpectedToken {
        /// The source text of the token encountered.
        found:    String,
        /// A description of what the parser was looking for.
        expected: String,
        /// Position of the token encountered.
        position: Position,
    },
    /// Reached the end of input in the middle of a construct.
    UnexpectedEndOfInput {
        /// A description of what the parser was looking for.
        expected: String,
    },
    /// The left-hand side of an assignment is neither a name nor an index.
    InvalidAssignmentTarget {
        /// Position of the assignment operator.
        position: Position,
    },
    /// Brackets, blocks or prefix operators are nested deeper than the
    /// parser allows.
    NestingTooDeep {
        /// The deepest nesting accepted.
        limit:    usize,
        /// Position of the construct that went one level too deep.
        position: Position,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { found,
                                    expected,
                                    position, } => {
                write!(f, "Error on {position}: Expected {expected}, found '{found}'.")
            },

            Self::UnexpectedEndOfInput { expected } => {
                write!(f, "Unexpected end of input: expected {expected}.")
            },

            Self::InvalidAssignmentTarget { position } => {
                write!(f, "Error on {position}: Invalid assignment target.")
            },

            Self::NestingTooDeep { limit, position } => {
                write!(f, "Error on {position}: Nesting exceeds the limit of {limit} levels.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
