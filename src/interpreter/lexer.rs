use std::collections::HashMap;

use logos::{FilterResult, Logos};

use crate::{
    ast::{LiteralValue, Position},
    error::{LexError, LexErrorKind},
    lexicon::{Lexicon, Role},
};

/// State carried by the lexer while it scans one source text.
///
/// The keyword table is a copy of the lexicon's word-to-role map, so the
/// identifier callback can tag keywords without any global state.
#[derive(Default)]
pub struct LexerExtras {
    /// Surface keyword to role.
    pub keywords: HashMap<String, Role>,
}

impl LexerExtras {
    /// Builds the lexer state for one lexicon.
    #[must_use]
    pub fn new(lexicon: &Lexicon) -> Self {
        Self { keywords: lexicon.iter()
                                .map(|(role, surface)| (surface.to_string(), role))
                                .collect(), }
    }
}

/// An identifier-shaped word: either a keyword of the active lexicon or a
/// plain name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Word {
    /// A surface token of the lexicon, tagged with its role.
    Keyword(Role),
    /// Any other identifier.
    Name(String),
}

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Keywords are not fixed: they are recognised through the lexicon held in
/// [`LexerExtras`].
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`.
    ///
    /// Any digit-led word is scanned here and validated by the callback, so
    /// `1.2.3` or `12ab` fail as a whole instead of splitting.
    #[regex(r"[0-9][0-9A-Za-z_.]*", lex_number)]
    Number(LiteralValue),
    /// Double-quoted string literal with escapes resolved.
    #[token("\"", lex_string)]
    Str(String),
    /// Keywords and identifiers.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| {
        let slice = lex.slice();
        lex.extras
           .keywords
           .get(slice)
           .map_or_else(|| Word::Name(slice.to_string()), |role| Word::Keyword(*role))
    })]
    Word(Word),
    /// `// Comments.`
    #[token("//", |lex| {
        let len = lex.remainder().find('\n').unwrap_or(lex.remainder().len());
        lex.bump(len);
        logos::Skip
    })]
    Comment,
    /// `/* Block comments. */`
    #[token("/*", lex_block_comment)]
    BlockComment,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `?`
    #[token("?")]
    Question,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `**`
    #[token("**")]
    StarStar,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `~`
    #[token("~")]
    Tilde,
    /// `^`
    #[token("^")]
    Caret,
    /// `|`
    #[token("|")]
    Pipe,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `->`
    #[token("->")]
    Arrow,
    /// `<-`
    #[token("<-")]
    BackArrow,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `**=`
    #[token("**=")]
    StarStarAssign,
    /// `&=`
    #[token("&=")]
    AmpersandAssign,
    /// `|=`
    #[token("|=")]
    PipeAssign,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `<<=`
    #[token("<<=")]
    ShiftLeftAssign,
    /// `>>=`
    #[token(">>=")]
    ShiftRightAssign,
}

impl Token {
    /// Tests whether this token spells `role` in the active lexicon.
    #[must_use]
    pub fn is_keyword(&self, role: Role) -> bool {
        matches!(self, Self::Word(Word::Keyword(r)) if *r == role)
    }
}

/// A token together with its source text and position.
#[derive(Debug, PartialEq, Clone)]
pub struct Lexeme {
    /// The token.
    pub token:    Token,
    /// The source slice the token was read from.
    pub text:     String,
    /// Where the token starts.
    pub position: Position,
}

/// Validates a digit-led word as an integer or a float literal.
fn lex_number(lex: &logos::Lexer<'_, Token>) -> Result<LiteralValue, LexErrorKind> {
    let text = lex.slice();

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse::<i64>()
                   .map(LiteralValue::Integer)
                   .map_err(|_| LexErrorKind::MalformedNumber);
    }

    match text.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
               && !fraction.is_empty()
               && whole.bytes().all(|b| b.is_ascii_digit())
               && fraction.bytes().all(|b| b.is_ascii_digit()) =>
        {
            text.parse::<f64>()
                .map(LiteralValue::Float)
                .map_err(|_| LexErrorKind::MalformedNumber)
        },
        _ => Err(LexErrorKind::MalformedNumber),
    }
}

/// Scans a string literal after its opening quote.
///
/// The literal may span lines. On failure the rest of the input is consumed,
/// since nothing after an unterminated quote can be tokenized reliably.
fn lex_string(lex: &mut logos::Lexer<'_, Token>) -> Result<String, LexErrorKind> {
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(offset + 1);
                return Ok(value);
            },
            '\\' => {
                let escaped = match chars.next() {
                    Some((_, 'n')) => '\n',
                    Some((_, 't')) => '\t',
                    Some((_, 'r')) => '\r',
                    Some((_, '0')) => '\0',
                    Some((_, '\\')) => '\\',
                    Some((_, '"')) => '"',
                    Some((_, '\'')) => '\'',
                    Some((_, other)) => {
                        lex.bump(lex.remainder().len());
                        return Err(LexErrorKind::InvalidEscape(other));
                    },
                    None => break,
                };
                value.push(escaped);
            },
            _ => value.push(c),
        }
    }

    lex.bump(lex.remainder().len());
    Err(LexErrorKind::UnterminatedString)
}

/// Skips a block comment after its opening `/*`.
fn lex_block_comment(lex: &mut logos::Lexer<'_, Token>) -> FilterResult<(), LexErrorKind> {
    if let Some(end) = lex.remainder().find("*/") {
        lex.bump(end + 2);
        FilterResult::Skip
    } else {
        lex.bump(lex.remainder().len());
        FilterResult::Error(LexErrorKind::UnterminatedComment)
    }
}

/// Maps byte offsets of a source text to 1-based lines and columns.
struct LineIndex<'s> {
    source:      &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    fn new(source: &'s str) -> Self {
        let line_starts = std::iter::once(0).chain(source.match_indices('\n')
                                                         .map(|(i, _)| i + 1))
                                            .collect();
        Self { source,
               line_starts }
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.line_starts
                       .partition_point(|start| *start <= offset)
                       .max(1);
        let start = self.line_starts[line - 1];
        let column = self.source
                         .get(start..offset)
                         .map_or(1, |prefix| prefix.chars().count() + 1);
        Position::new(line, column)
    }
}

/// Turns a source text into tokens, recognising keywords through `lexicon`.
///
/// # Parameters
/// - `source`: The program text.
/// - `lexicon`: The active keyword mapping.
///
/// # Returns
/// The tokens in source order, each with its text and position.
///
/// # Errors
/// Returns the first `LexError` encountered.
///
/// # Example
/// ```
/// use lexiscript::{
///     interpreter::lexer::{Token, Word, tokenize},
///     lexicon::{Lexicon, Role},
/// };
///
/// let tokens = tokenize("say x;", &Lexicon::default()).unwrap();
///
/// assert_eq!(tokens[0].token, Token::Word(Word::Keyword(Role::Print)));
/// assert_eq!(tokens[1].token, Token::Word(Word::Name("x".to_string())));
/// assert_eq!(tokens[2].position.column, 6);
/// ```
pub fn tokenize(source: &str, lexicon: &Lexicon) -> Result<Vec<Lexeme>, LexError> {
    let index = LineIndex::new(source);
    let mut lexer = Token::lexer_with_extras(source, LexerExtras::new(lexicon));
    let mut lexemes = Vec::new();

    while let Some(token) = lexer.next() {
        let position = index.position(lexer.span().start);
        match token {
            Ok(token) => lexemes.push(Lexeme { token,
                                               text: lexer.slice().to_string(),
                                               position }),
            Err(kind) => return Err(LexError::new(kind, lexer.slice(), position)),
        }
    }

    Ok(lexemes)
}
