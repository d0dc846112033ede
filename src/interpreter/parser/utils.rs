use std::{cell::Cell, iter::Peekable};

use crate::{
    ast::Position,
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token, Word},
        parser::core::{MAX_NESTING_DEPTH, ParseResult},
    },
    lexicon::Role,
};

thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// Marks one level of recursive descent for as long as it is alive.
///
/// Every grammar rule that can recurse into itself holds a guard while it
/// parses the nested part, so the depth of the native stack the parser uses
/// is bounded by [`MAX_NESTING_DEPTH`].
pub(in crate::interpreter::parser) struct NestingGuard;

impl NestingGuard {
    /// Enters one more level of nesting at `at`, the next lexeme.
    ///
    /// # Errors
    /// `NestingTooDeep` once [`MAX_NESTING_DEPTH`] levels are already open.
    pub(in crate::interpreter::parser) fn enter(at: Option<&&Lexeme>) -> ParseResult<Self> {
        NESTING.with(|depth| {
                   if depth.get() >= MAX_NESTING_DEPTH {
                       let position = at.map_or_else(Position::default, |lexeme| lexeme.position);
                       return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                               position });
                   }
                   depth.set(depth.get() + 1);
                   Ok(Self)
               })
    }
}

impl Drop for NestingGuard {
    fn drop(&mut self) {
        NESTING.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Builds the error for a token the grammar does not allow at this point.
///
/// `None` means the input ran out.
pub(in crate::interpreter::parser) fn unexpected(found: Option<&Lexeme>,
                                                 expected: &str)
                                                 -> ParseError {
    match found {
        Some(lexeme) => ParseError::UnexpectedToken { found:    lexeme.text.clone(),
                                                      expected: expected.to_string(),
                                                      position: lexeme.position, },
        None => ParseError::UnexpectedEndOfInput { expected: expected.to_string() },
    }
}

/// Consumes the next token, which must equal `token`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `token`: The required token.
/// - `expected`: Description used in the error message.
///
/// # Returns
/// The position of the consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    token: &Token,
                                                    expected: &str)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(lexeme) if lexeme.token == *token => Ok(lexeme.position),
        other => Err(unexpected(other, expected)),
    }
}

/// Consumes the next token, which must be the keyword for `role`.
pub(in crate::interpreter::parser) fn expect_keyword<'a, I>(tokens: &mut Peekable<I>,
                                                            role: Role)
                                                            -> ParseResult<Position>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(lexeme) if lexeme.token.is_keyword(role) => Ok(lexeme.position),
        other => Err(unexpected(other, &format!("{role} keyword"))),
    }
}

/// Tests whether the next token is `token` without consuming it.
pub(in crate::interpreter::parser) fn next_is<'a, I>(tokens: &mut Peekable<I>,
                                                     token: &Token)
                                                     -> bool
    where I: Iterator<Item = &'a Lexeme>
{
    tokens.peek().is_some_and(|lexeme| lexeme.token == *token)
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, call arguments, parameter lists
/// and call-style print arguments. It repeatedly calls `parse_item` to parse
/// one element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut items = Vec::new();
    if next_is(tokens, closing) {
        tokens.next();

        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some(Lexeme { token: Token::Comma,
                          .. }) => {},
            Some(lexeme) if lexeme.token == *closing => break,
            other => return Err(unexpected(other, "',' or the end of the list")),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// The next token must be a name; keywords of the active lexicon are rejected.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at an identifier.
///
/// # Returns
/// A `String` containing the identifier.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the next token is not an identifier,
/// - the input ends unexpectedly.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a Lexeme>
{
    match tokens.next() {
        Some(Lexeme { token: Token::Word(Word::Name(name)),
                      .. }) => Ok(name.clone()),
        other => Err(unexpected(other, "identifier")),
    }
}
