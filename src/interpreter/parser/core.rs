use std::iter::Peekable;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token},
        parser::{
            binary::parse_logical_or,
            statement::parse_statement,
            utils::{NestingGuard, expect},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply expressions and statements may nest before parsing fails.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Parses a whole token stream into a program.
///
/// Parsing stops at the first error; there is no recovery, so a program with
/// any syntax error never produces a partial tree.
///
/// # Parameters
/// - `lexemes`: Every token of the source, in order.
///
/// # Returns
/// The top-level statements as a [`Program`].
///
/// # Example
/// ```
/// use lexiscript::{
///     interpreter::{lexer::tokenize, parser::core::parse_program},
///     lexicon::Lexicon,
/// };
///
/// let tokens = tokenize("x = 1; say x;", &Lexicon::default()).unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// let tokens = tokenize("if x { say x;", &Lexicon::default()).unwrap();
/// assert!(parse_program(&tokens).is_err());
/// ```
pub fn parse_program(lexemes: &[Lexeme]) -> ParseResult<Program> {
    let mut tokens = lexemes.iter().peekable();
    let mut statements = Vec::new();

    while tokens.peek().is_some() {
        statements.push(parse_statement(&mut tokens, 0)?);
    }

    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, the ternary conditional, and
/// recursively descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or ("?" expression ":" expression)?`
///
/// The ternary is right-associative: `a ? b : c ? d : e` groups as
/// `a ? b : (c ? d : e)`.
///
/// # Parameters
/// - `tokens`: Token iterator providing lexemes.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let _guard = NestingGuard::enter(tokens.peek())?;
    let condition = parse_logical_or(tokens)?;

    if let Some(Lexeme { token: Token::Question,
                         position,
                         .. }) = tokens.peek()
    {
        let position = *position;
        tokens.next();
        let then_expr = parse_expression(tokens)?;
        expect(tokens, &Token::Colon, "':' in conditional expression")?;
        let else_expr = parse_expression(tokens)?;

        return Ok(Expr::Ternary { condition: Box::new(condition),
                                  then_expr: Box::new(then_expr),
                                  else_expr: Box::new(else_expr),
                                  position });
    }

    Ok(condition)
}
