use crate::ast::Position;

/// The reason a piece of source text could not be turned into a token.
///
/// This is the error type the tokenizer produces internally; it carries no
/// location. [`LexError::new`] attaches the offending text and its position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[default]
    InvalidCharacter,
    /// A string literal without its closing quote.
    UnterminatedString,
    /// A backslash followed by a character with no escape meaning.
    InvalidEscape(char),
    /// A digit-led word that is neither an integer nor a float, or an integer
    /// outside the 64-bit range.
    MalformedNumber,
    /// A `/*` comment without its closing `*/`.
    UnterminatedComment,
}

#[derive(Debug)]
/// Represents all errors that can occur during tokenization.
pub enum LexError {
    /// A character outside the language.
    InvalidCharacter {
        /// The character found.
        found:    char,
        /// Where it was found.
        position: Position,
    },
    /// A string literal was opened but never closed.
    UnterminatedString {
        /// Position of the opening quote.
        position: Position,
    },
    /// A string literal contains an unknown escape sequence.
    InvalidEscape {
        /// The character following the backslash.
        escape:   char,
        /// Position of the string literal.
        position: Position,
    },
    /// A numeric literal is malformed or out of range.
    MalformedNumber {
        /// The literal as written.
        text:     String,
        /// Position of the literal.
        position: Position,
    },
    /// A block comment was opened but never closed.
    UnterminatedComment {
        /// Position of the opening `/*`.
        position: Position,
    },
}

impl LexError {
    /// Builds a located error from a tokenizer failure.
    ///
    /// # Parameters
    /// - `kind`: What went wrong.
    /// - `text`: The source slice the tokenizer was looking at.
    /// - `position`: Where that slice starts.
    ///
    /// # Example
    /// ```
    /// use lexiscript::{
    ///     ast::Position,
    ///     error::{LexError, LexErrorKind},
    /// };
    ///
    /// let e = LexError::new(LexErrorKind::InvalidCharacter, "$", Position::new(1, 4));
    /// assert_eq!(e.to_string(), "Error on line 1, column 4: Invalid character '$'.");
    /// ```
    #[must_use]
    pub fn new(kind: LexErrorKind, text: &str, position: Position) -> Self {
        match kind {
            LexErrorKind::InvalidCharacter => {
                Self::InvalidCharacter { found: text.chars().next().unwrap_or('\0'),
                                         position }
            },
            LexErrorKind::UnterminatedString => Self::UnterminatedString { position },
            LexErrorKind::InvalidEscape(escape) => Self::InvalidEscape { escape, position },
            LexErrorKind::MalformedNumber => Self::MalformedNumber { text: text.to_string(),
                                                                     position },
            LexErrorKind::UnterminatedComment => Self::UnterminatedComment { position },
        }
    }

    /// Position of the offending text.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::UnterminatedString { position }
            | Self::InvalidEscape { position, .. }
            | Self::MalformedNumber { position, .. }
            | Self::UnterminatedComment { position } => *position,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { found, position } => {
                write!(f, "Error on {position}: Invalid character '{found}'.")
            },
            Self::UnterminatedString { position } => {
                write!(f, "Error on {position}: Unterminated string literal.")
            },
            Self::InvalidEscape { escape, position } => {
                write!(f, "Error on {position}: Invalid escape sequence '\\{escape}'.")
            },
            Self::MalformedNumber { text, position } => {
                write!(f, "Error on {position}: Malformed number literal '{text}'.")
            },
            Self::UnterminatedComment { position } => {
                write!(f, "Error on {position}: Unterminated block comment.")
            },
        }
    }
}

impl std::error::Error for LexError {}
