use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Lexeme, Token, Word},
        parser::{
            core::ParseResult,
            unary::{parse_postfix_expression, parse_unary},
            utils::NestingGuard,
        },
    },
    lexicon::Role,
};

/// Parses one left-associative precedence level.
///
/// Repeatedly reads an operand with `next_level` and folds it into the left
/// operand while the next token maps to one of `operators`.
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `next_level`: The routine for the next tighter precedence level.
/// - `operators`: The operators accepted at this level.
///
/// # Returns
/// A left-leaning `Expr::Binary` tree.
fn parse_left_assoc<'a, I>(tokens: &mut Peekable<I>,
                           next_level: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                           operators: &[BinaryOperator])
                           -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let mut left = next_level(tokens)?;
    loop {
        if let Some(lexeme) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&lexeme.token)
           && operators.contains(&op)
        {
            let position = lexeme.position;
            tokens.next();
            let right = next_level(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  position };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and (OR logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, parse_logical_and, &[BinaryOperator::Or])
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality (AND equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, parse_equality, &[BinaryOperator::And])
}

/// Parses `==` and `!=`.
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     parse_relational,
                     &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses relational operators: `<`, `>`, `<=`, `>=`.
///
/// The range arrows `->` and `<-` are separate tokens and end a relational
/// expression, which is what lets `FOR i IN a <- b` parse its bounds.
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     parse_bitwise_or,
                     &[BinaryOperator::Less,
                       BinaryOperator::Greater,
                       BinaryOperator::LessEqual,
                       BinaryOperator::GreaterEqual])
}

/// Parses `|`.
pub fn parse_bitwise_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, parse_bitwise_xor, &[BinaryOperator::BitOr])
}

/// Parses `^`.
pub fn parse_bitwise_xor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, parse_bitwise_and, &[BinaryOperator::BitXor])
}

/// Parses `&`.
pub fn parse_bitwise_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens, parse_shift, &[BinaryOperator::BitAnd])
}

/// Parses `<<` and `>>`.
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     parse_additive,
                     &[BinaryOperator::ShiftLeft, BinaryOperator::ShiftRight])
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     parse_multiplicative,
                     &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    parse_left_assoc(tokens,
                     parse_unary,
                     &[BinaryOperator::Mul, BinaryOperator::Div, BinaryOperator::Mod])
}

/// Parses exponentiation expressions.
///
/// Exponentiation binds tighter than the prefix operators on its left and is
/// right-associative: `-2 ** 2` is `-(2 ** 2)` and `a ** b ** c` is
/// `a ** (b ** c)`. The right operand may itself carry a prefix operator, as
/// in `2 ** -1`.
///
/// The rule is: `power := postfix ("**" unary)?`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let base = parse_postfix_expression(tokens)?;

    if let Some(Lexeme { token: Token::StarStar,
                         position,
                         .. }) = tokens.peek()
    {
        let position = *position;
        let _guard = NestingGuard::enter(tokens.peek())?;
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::Binary { left: Box::new(base),
                                 op: BinaryOperator::Pow,
                                 right: Box::new(exponent),
                                 position });
    }

    Ok(base)
}

/// Converts a token to its corresponding binary operator, if any.
///
/// The logical operators are keywords, so their spelling comes from the
/// lexicon.
///
/// # Parameters
/// - `token`: The token to inspect.
///
/// # Returns
/// `Some(BinaryOperator)` if the token represents one, otherwise `None`.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Percent), Some(BinaryOperator::Mod));
/// assert_eq!(token_to_binary_operator(&Token::Arrow), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::StarStar => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Ampersand => Some(BinaryOperator::BitAnd),
        Token::Pipe => Some(BinaryOperator::BitOr),
        Token::Caret => Some(BinaryOperator::BitXor),
        Token::ShiftLeft => Some(BinaryOperator::ShiftLeft),
        Token::ShiftRight => Some(BinaryOperator::ShiftRight),
        Token::Word(Word::Keyword(Role::And)) => Some(BinaryOperator::And),
        Token::Word(Word::Keyword(Role::Or)) => Some(BinaryOperator::Or),
        _ => None,
    }
}

/// Converts a compound assignment token to the operator it applies.
///
/// # Example
/// ```
/// use lexiscript::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::compound_assignment_operator},
/// };
///
/// assert_eq!(compound_assignment_operator(&Token::ShiftLeftAssign),
///            Some(BinaryOperator::ShiftLeft));
/// assert_eq!(compound_assignment_operator(&Token::Assign), None);
/// ```
#[must_use]
pub const fn compound_assignment_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::PlusAssign => Some(BinaryOperator::Add),
        Token::MinusAssign => Some(BinaryOperator::Sub),
        Token::StarAssign => Some(BinaryOperator::Mul),
        Token::SlashAssign => Some(BinaryOperator::Div),
        Token::PercentAssign => Some(BinaryOperator::Mod),
        Token::StarStarAssign => Some(BinaryOperator::Pow),
        Token::AmpersandAssign => Some(BinaryOperator::BitAnd),
        Token::PipeAssign => Some(BinaryOperator::BitOr),
        Token::CaretAssign => Some(BinaryOperator::BitXor),
        Token::ShiftLeftAssign => Some(BinaryOperator::ShiftLeft),
        Token::ShiftRightAssign => Some(BinaryOperator::ShiftRight),
        _ => None,
    }
}
