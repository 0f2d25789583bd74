use std::rc::Rc;

use crate::{
    ast::{Expr, PrefixOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{Parser, Precedence, PrefixRule},
            statement::parse_block_statement,
            utils::{parse_expression_list, parse_function_parameters},
        },
    },
};

/// Maps a token kind to the rule that can start an expression with it.
///
/// This is the prefix half of the parser's dispatch table; it is fixed and
/// total over the grammar. Tokens that cannot begin an expression map to
/// `None`, which the caller reports as a missing prefix rule.
pub(crate) fn prefix_rule(token: &Token) -> Option<PrefixRule> {
    match token {
        Token::Identifier(_) => Some(parse_identifier),
        Token::Integer(_) => Some(parse_integer_literal),
        Token::Str(_) => Some(parse_string_literal),
        Token::Bool(_) => Some(parse_boolean_literal),
        Token::Bang | Token::Minus => Some(parse_prefix_expression),
        Token::LParen => Some(parse_grouped_expression),
        Token::LBracket => Some(parse_array_literal),
        Token::If => Some(parse_if_expression),
        Token::While => Some(parse_while_expression),
        Token::Function => Some(parse_function_literal),
        _ => None,
    }
}

fn parse_identifier(parser: &mut Parser<'_>) -> Option<Expr> {
    match &parser.current.0 {
        Token::Identifier(name) => Some(Expr::Identifier { name: name.clone(),
                                                           line: parser.current.1, }),
        _ => unreachable!(),
    }
}

fn parse_integer_literal(parser: &mut Parser<'_>) -> Option<Expr> {
    match parser.current.0 {
        Token::Integer(value) => Some(Expr::IntegerLiteral { value,
                                                             line: parser.current.1, }),
        _ => unreachable!(),
    }
}

fn parse_string_literal(parser: &mut Parser<'_>) -> Option<Expr> {
    match &parser.current.0 {
        Token::Str(value) => Some(Expr::StringLiteral { value: value.clone(),
                                                        line:  parser.current.1, }),
        _ => unreachable!(),
    }
}

fn parse_boolean_literal(parser: &mut Parser<'_>) -> Option<Expr> {
    match parser.current.0 {
        Token::Bool(value) => Some(Expr::BooleanLiteral { value,
                                                          line: parser.current.1, }),
        _ => unreachable!(),
    }
}

/// Parses `!` or `-` applied to the expression that follows.
///
/// The operand is parsed at [`Precedence::Prefix`], so `-a * b` groups as
/// `((-a) * b)`.
fn parse_prefix_expression(parser: &mut Parser<'_>) -> Option<Expr> {
    let line = parser.current.1;
    let op = match parser.current.0 {
        Token::Bang => PrefixOperator::Not,
        Token::Minus => PrefixOperator::Negate,
        _ => unreachable!(),
    };

    parser.advance();
    let right = parser.parse_expression(Precedence::Prefix)?;

    Some(Expr::Prefix { op,
                        right: Box::new(right),
                        line })
}

/// Parses `( <expression> )`, yielding the inner expression unchanged.
fn parse_grouped_expression(parser: &mut Parser<'_>) -> Option<Expr> {
    parser.advance();
    let expr = parser.parse_expression(Precedence::Lowest)?;

    if !parser.expect_peek(&Token::RParen, "')'") {
        return None;
    }
    Some(expr)
}

/// Parses `[ <expression>, ... ]`.
fn parse_array_literal(parser: &mut Parser<'_>) -> Option<Expr> {
    let line = parser.current.1;
    let elements = parse_expression_list(parser, &Token::RBracket, "']'")?;

    Some(Expr::ArrayLiteral { elements, line })
}

/// Parses `if ( <condition> ) { ... }` with an optional `else { ... }`.
fn parse_if_expression(parser: &mut Parser<'_>) -> Option<Expr> {
    let line = parser.current.1;

    if !parser.expect_peek(&Token::LParen, "'('") {
        return None;
    }
    parser.advance();
    let condition = parser.parse_expression(Precedence::Lowest)?;
    if !parser.expect_peek(&Token::RParen, "')'") {
        return None;
    }

    if !parser.expect_peek(&Token::LBrace, "'{'") {
        return None;
    }
    let consequence = parse_block_statement(parser);

    let alternative = if parser.peek.0 == Token::Else {
        parser.advance();
        if !parser.expect_peek(&Token::LBrace, "'{'") {
            return None;
        }
        Some(parse_block_statement(parser))
    } else {
        None
    };

    Some(Expr::If { condition: Box::new(condition),
                    consequence,
                    alternative,
                    line })
}

/// Parses `while ( <condition> ) { ... }`.
fn parse_while_expression(parser: &mut Parser<'_>) -> Option<Expr> {
    let line = parser.current.1;

    if !parser.expect_peek(&Token::LParen, "'('") {
        return None;
    }
    parser.advance();
    let condition = parser.parse_expression(Precedence::Lowest)?;
    if !parser.expect_peek(&Token::RParen, "')'") {
        return None;
    }

    if !parser.expect_peek(&Token::LBrace, "'{'") {
        return None;
    }
    let body = parse_block_statement(parser);

    Some(Expr::While { condition: Box::new(condition),
                       body,
                       line })
}

/// Parses `fn ( <parameters> ) { ... }`.
fn parse_function_literal(parser: &mut Parser<'_>) -> Option<Expr> {
    let line = parser.current.1;

    if !parser.expect_peek(&Token::LParen, "'('") {
        return None;
    }
    let parameters = parse_function_parameters(parser)?;

    if !parser.expect_peek(&Token::LBrace, "'{'") {
        return None;
    }
    let body = parse_block_statement(parser);

    Some(Expr::FunctionLiteral { parameters: Rc::new(parameters),
                                 body: Rc::new(body),
                                 line })
}
