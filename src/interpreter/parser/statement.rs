use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{AssignTarget, Expr, FunctionDecl, RangeDirection, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, Token, Word},
        parser::{
            binary::compound_assignment_operator,
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::{
                NestingGuard, expect, expect_keyword, next_is, parse_comma_separated,
                parse_identifier, unexpected,
            },
        },
    },
    lexicon::Role,
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a function declaration,
/// - a conditional,
/// - a `FOR` or `WHILE` loop,
/// - an `EXIT` or `RETURN`,
/// - a `PRINT`,
/// - a nested block,
/// - an assignment or an expression statement.
///
/// The leading token decides the form; anything that does not start with a
/// keyword or `{` is an assignment or an expression.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `depth`: How many function bodies enclose the statement.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let Some(lexeme) = tokens.peek().copied() else {
        return Err(unexpected(None, "statement"));
    };
    let _guard = NestingGuard::enter(Some(&lexeme))?;
    let position = lexeme.position;

    match lexeme.token {
        Token::Word(Word::Keyword(Role::Function)) => parse_function_declaration(tokens, depth),
        Token::Word(Word::Keyword(Role::If)) => parse_if(tokens, depth),
        Token::Word(Word::Keyword(Role::For)) => parse_for(tokens, depth),
        Token::Word(Word::Keyword(Role::While)) => parse_while(tokens, depth),
        Token::Word(Word::Keyword(Role::Exit)) => {
            tokens.next();
            expect(tokens, &Token::Semicolon, "';' after EXIT")?;
            Ok(Statement::Break { position })
        },
        Token::Word(Word::Keyword(Role::Return)) => {
            tokens.next();
            let value = if next_is(tokens, &Token::Semicolon) {
                None
            } else {
                Some(parse_expression(tokens)?)
            };
            expect(tokens, &Token::Semicolon, "';' after RETURN")?;
            Ok(Statement::Return { value, position })
        },
        Token::Word(Word::Keyword(Role::Print)) => parse_print(tokens),
        Token::LBrace => {
            let statements = parse_block(tokens, depth)?;
            Ok(Statement::Block { statements,
                                  position })
        },
        _ => parse_assignment_or_expression(tokens),
    }
}

/// Parses a function declaration.
///
/// Syntax:
/// ```text
///     FUNCTION name(param, ...) { body }
/// ```
/// The body is parsed one level deeper, so functions declared inside it are
/// private to each call of this one.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `FUNCTION` keyword.
/// - `depth`: Nesting depth of the declaration itself.
///
/// # Returns
/// A `Statement::Function` holding the shared declaration.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     depth: usize)
                                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let position = expect_keyword(tokens, Role::Function)?;
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen, "'(' after function name")?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = parse_block(tokens, depth + 1)?;

    Ok(Statement::Function(Rc::new(FunctionDecl { name,
                                                  params,
                                                  body,
                                                  depth,
                                                  position })))
}

/// Parses a conditional with optional `ELSE` and chained `ELSE IF`.
///
/// Syntax:
/// ```text
///     IF <condition>? { ... }
///     ELSE IF <condition>? { ... }
///     ELSE { ... }
/// ```
/// A missing condition makes the branch unconditional. Nested `ELSE IF`
/// constructs are parsed recursively into the else branch.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `IF` keyword.
/// - `depth`: Function nesting depth.
///
/// # Returns
/// A `Statement::If` node representing the full conditional.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let _guard = NestingGuard::enter(tokens.peek())?;
    let position = expect_keyword(tokens, Role::If)?;

    let condition = if next_is(tokens, &Token::LBrace) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    let then_branch = parse_block(tokens, depth)?;

    let else_branch = match tokens.peek() {
        Some(lexeme) if lexeme.token.is_keyword(Role::Else) => {
            tokens.next();
            match tokens.peek() {
                Some(lexeme) if lexeme.token.is_keyword(Role::If) => {
                    Some(vec![parse_if(tokens, depth)?])
                },
                Some(Lexeme { token: Token::LBrace,
                              .. }) => Some(parse_block(tokens, depth)?),
                other => return Err(unexpected(other.copied(), "IF keyword or '{' after ELSE")),
            }
        },
        _ => None,
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       position })
}

/// Parses the `FOR` statement forms.
///
/// Syntax:
/// ```text
///     FOR name IN <sequence> { ... }
///     FOR name IN <start> -> <end> { ... }
///     FOR name IN <start> <- <end> { ... }
///     FOR { ... }
/// ```
/// The bare form is rewritten here into a `WHILE TRUE` loop.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the `FOR` keyword.
/// - `depth`: Function nesting depth.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let position = expect_keyword(tokens, Role::For)?;

    if next_is(tokens, &Token::LBrace) {
        let body = parse_block(tokens, depth)?;
        return Ok(Statement::While { condition: Expr::Literal { value: true.into(),
                                                                position },
                                     body,
                                     position });
    }

    let var = parse_identifier(tokens)?;
    expect_keyword(tokens, Role::In)?;
    let first = parse_expression(tokens)?;

    let direction = match tokens.peek() {
        Some(Lexeme { token: Token::Arrow,
                      .. }) => Some(RangeDirection::Ascending),
        Some(Lexeme { token: Token::BackArrow,
                      .. }) => Some(RangeDirection::Descending),
        _ => None,
    };

    let Some(direction) = direction else {
        let body = parse_block(tokens, depth)?;
        return Ok(Statement::ForEach { var,
                                       iterable: first,
                                       body,
                                       position });
    };

    tokens.next();
    let end = parse_expression(tokens)?;
    let body = parse_block(tokens, depth)?;

    Ok(Statement::ForRange { var,
                             start: first,
                             end,
                             direction,
                             body,
                             position })
}

/// Parses `WHILE <condition>? { ... }`.
///
/// Without a condition the loop is an `InfiniteLoop`, left only through
/// `EXIT`, `RETURN` or an error.
fn parse_while<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let position = expect_keyword(tokens, Role::While)?;

    if next_is(tokens, &Token::LBrace) {
        let body = parse_block(tokens, depth)?;
        return Ok(Statement::InfiniteLoop { body, position });
    }

    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens, depth)?;

    Ok(Statement::While { condition,
                          body,
                          position })
}

/// Parses a `PRINT` statement.
///
/// Two argument forms are accepted:
/// ```text
///     PRINT(a, b, c);
///     PRINT a, b, c;
/// ```
/// A parenthesized list counts as the call-style form only when `;` follows
/// the closing parenthesis; otherwise the parenthesis belongs to the first
/// expression, as in `PRINT (a + b) * c;`.
fn parse_print<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let position = expect_keyword(tokens, Role::Print)?;

    if next_is(tokens, &Token::LParen) {
        let mut attempt = tokens.clone();
        attempt.next();
        if let Ok(arguments) = parse_comma_separated(&mut attempt, parse_expression, &Token::RParen)
           && next_is(&mut attempt, &Token::Semicolon)
        {
            attempt.next();
            *tokens = attempt;
            return Ok(Statement::Print { arguments,
                                         position });
        }
    }

    let arguments = if next_is(tokens, &Token::Semicolon) {
        Vec::new()
    } else {
        let mut arguments = vec![parse_expression(tokens)?];
        while next_is(tokens, &Token::Comma) {
            tokens.next();
            arguments.push(parse_expression(tokens)?);
        }
        arguments
    };
    expect(tokens, &Token::Semicolon, "';' after PRINT arguments")?;

    Ok(Statement::Print { arguments,
                          position })
}

/// Parses an assignment or an expression statement.
///
/// The left-hand side is read as an ordinary expression first. If `=` or a
/// compound operator follows, that expression must be a name or an indexing
/// expression. A compound assignment `target OP= value` is rewritten into
/// `target = target OP value`.
///
/// # Errors
/// - `InvalidAssignmentTarget` if anything else appears left of `=`.
/// - `UnexpectedToken` if the statement does not end with `;`.
fn parse_assignment_or_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a Lexeme> + Clone
{
    let expr = parse_expression(tokens)?;

    let Some(lexeme) = tokens.peek().copied() else {
        return Err(unexpected(None, "';'"));
    };
    let position = lexeme.position;

    let compound = compound_assignment_operator(&lexeme.token);
    if lexeme.token != Token::Assign && compound.is_none() {
        expect(tokens, &Token::Semicolon, "';' after expression")?;
        return Ok(Statement::Expression { position: expr.position(),
                                          expr });
    }
    tokens.next();

    let target = match &expr {
        Expr::Identifier { name, .. } => AssignTarget::Variable(name.clone()),
        Expr::Index { target, index, .. } => AssignTarget::Index { target: target.clone(),
                                                                   index:  index.clone(), },
        _ => return Err(ParseError::InvalidAssignmentTarget { position }),
    };

    let rhs = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon, "';' after assignment")?;

    let value = match compound {
        Some(op) => Expr::Binary { left: Box::new(expr),
                                   op,
                                   right: Box::new(rhs),
                                   position },
        None => rhs,
    };

    Ok(Statement::Assign { target,
                           value,
                           position })
}
