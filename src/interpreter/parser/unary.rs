use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, Position, UnaryOperator},
    interpreter::{
        lexer::{Lexeme, Token, Word},
        parser::{
            binary::parse_power,
            core::{ParseResult, parse_expression},
            utils::{NestingGuard, expect, next_is, parse_comma_separated, unexpected},
        },
    },
    lexicon::Role,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `NOT` (logical not, spelled by the lexicon)
/// - `~`  (bitwise complement)
///
/// Unary operators are right-associative, so an input like `-~x` is parsed as
/// `-(~x)`. Without a prefix operator the function delegates to
/// [`parse_power`].
///
/// Grammar:
/// ```text
///     unary := ("-" | NOT | "~") unary
///            | power
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or the operand expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(lexeme) = tokens.peek().copied() else {
        return Err(unexpected(None, "expression"));
    };

    let op = match lexeme.token {
        Token::Minus => UnaryOperator::Negate,
        Token::Tilde => UnaryOperator::BitNot,
        Token::Word(Word::Keyword(Role::Not)) => UnaryOperator::Not,
        _ => return parse_power(tokens),
    };
    let _guard = NestingGuard::enter(Some(&lexeme))?;
    let position = lexeme.position;
    tokens.next();

    let expr = parse_unary(tokens)?;
    Ok(Expr::Unary { op,
                     expr: Box::new(expr),
                     position })
}

/// Parses a primary expression followed by any number of postfix operators.
///
/// Postfix operators bind tightest and chain left to right:
///
/// 1. **Calls** `expr(args)`; any expression may be called, e.g.
///    `handlers[0](x)`.
/// 2. **Indexing** `expr[index]`.
/// 3. **Slicing** `expr[start:end]`, where either bound may be omitted.
///
/// Grammar:
/// ```text
///     postfix := primary ( "(" args ")" | "[" expression "]"
///                        | "[" expression? ":" expression? "]" )*
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at a primary expression.
///
/// # Returns
/// The expression with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if a bracket or parenthesis is left unclosed, or a
/// sub-expression fails to parse.
pub(crate) fn parse_postfix_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut node = parse_primary(tokens)?;

    loop {
        match tokens.peek() {
            Some(Lexeme { token: Token::LParen,
                          position,
                          .. }) => {
                let position = *position;
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                node = Expr::Call { callee: Box::new(node),
                                    arguments,
                                    position };
            },
            Some(Lexeme { token: Token::LBracket,
                          position,
                          .. }) => {
                let position = *position;
                tokens.next();
                node = parse_index_or_slice(tokens, node, position)?;
            },
            _ => break,
        }
    }

    Ok(node)
}

/// Parses the inside of `[...]` after an expression.
///
/// A colon anywhere at the top level of the brackets makes it a slice.
fn parse_index_or_slice<'a, I>(tokens: &mut Peekable<I>,
                               target: Expr,
                               position: Position)
                               -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut start = None;

    if !next_is(tokens, &Token::Colon) {
        let index = parse_expression(tokens)?;
        if !next_is(tokens, &Token::Colon) {
            expect(tokens, &Token::RBracket, "']' after index")?;
            return Ok(Expr::Index { target: Box::new(target),
                                    index: Box::new(index),
                                    position });
        }
        start = Some(Box::new(index));
    }

    expect(tokens, &Token::Colon, "':' in slice")?;
    let end = if next_is(tokens, &Token::RBracket) {
        None
    } else {
        Some(Box::new(parse_expression(tokens)?))
    };
    expect(tokens, &Token::RBracket, "']' after slice")?;

    Ok(Expr::Slice { target: Box::new(target),
                     start,
                     end,
                     position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals
/// - identifiers
/// - parenthesized expressions
/// - array literals (`[ ... ]`)
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "[" elements "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(lexeme) = tokens.next() else {
        return Err(unexpected(None, "expression"));
    };
    let position = lexeme.position;

    match &lexeme.token {
        Token::Number(value) => Ok(Expr::Literal { value: value.clone(),
                                                   position }),
        Token::Str(text) => Ok(Expr::Literal { value: LiteralValue::String(text.clone()),
                                               position }),
        Token::Word(Word::Keyword(Role::True)) => Ok(Expr::Literal { value: true.into(),
                                                                     position }),
        Token::Word(Word::Keyword(Role::False)) => Ok(Expr::Literal { value: false.into(),
                                                                      position }),
        Token::Word(Word::Name(name)) => Ok(Expr::Identifier { name: name.clone(),
                                                               position }),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')'")?;
            Ok(expr)
        },
        Token::LBracket => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::ArrayLiteral { elements,
                                    position })
        },
        _ => Err(unexpected(Some(lexeme), "expression")),
    }
}
