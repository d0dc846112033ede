/// Lexical errors.
///
/// Defines the failures the tokenizer can report: characters outside the
/// language, broken string or number literals, and unterminated comments.
pub mod lex_error;
/// Lexicon errors.
///
/// Configuration failures raised while building a lexicon, before any program
/// runs.
pub mod lexicon_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree from
/// tokens. Parse errors include unexpected tokens, a premature end of input and
/// invalid assignment targets.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include type mismatches, arity mismatches, out-of-range indices,
/// misplaced control transfers and failures reported by builtins.
pub mod runtime_error;

pub use lex_error::{LexError, LexErrorKind};
pub use lexicon_error::LexiconError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error that halts a run, tagged with the phase that raised it.
///
/// The rendered form starts with the category so that a malformed program can
/// be told apart from one that failed while executing.
///
/// ## Example
/// ```
/// use lexiscript::{
///     ast::Position,
///     error::{Error, RuntimeError},
/// };
///
/// let error = Error::from(RuntimeError::DivideByZero { position: Position::new(2, 7) });
///
/// assert_eq!(error.to_string(),
///            "RuntimeError: DivideByZero: Error on line 2, column 7: Division by zero.");
/// ```
#[derive(Debug)]
pub enum Error {
    /// The source could not be tokenized.
    Lexical(LexError),
    /// The tokens do not form a program.
    Parse(ParseError),
    /// The program failed while executing.
    Runtime(RuntimeError),
}

impl Error {
    /// The category name used as the prefix of the rendered error.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Lexical(_) => "LexicalError",
            Self::Parse(_) => "ParseError",
            Self::Runtime(_) => "RuntimeError",
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical(e) => write!(f, "{}: {e}", self.category()),
            Self::Parse(e) => write!(f, "{}: {e}", self.category()),
            Self::Runtime(e) => write!(f, "{}: {}: {e}", self.category(), e.kind()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lexical(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Lexical(error)
    }
}

impl From<ParseError> for Error {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<RuntimeError> for Error {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}
