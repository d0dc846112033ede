use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{expect, next_is, unexpected},
        },
    },
};

/// Parses a block of statements enclosed in braces.
///
/// Blocks introduce no scope of their own; they only group statements for
/// conditionals, loops and function bodies.
///
/// Grammar:
/// ```text
///     block := "{" statement* "}"
/// ```
/// # Parameters
/// - `tokens`: Token stream positioned at `{`.
/// - `depth`: How many function bodies enclose the block.
///
/// # Returns
/// The statements inside the braces.
///
/// # Errors
/// Returns a `ParseError` if the opening `{` is missing, a statement fails to
/// parse, or the input ends before the closing `}`.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    expect(tokens, &Token::LBrace, "'{'")?;

    let mut statements = Vec::new();
    loop {
        if next_is(tokens, &Token::RBrace) {
            tokens.next();
            return Ok(statements);
        }
        if tokens.peek().is_none() {
            return Err(unexpected(None, "'}'"));
        }
        statements.push(parse_statement(tokens, depth)?);
    }
}
