use crate::{
    ast::{Expr, InfixOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{InfixRule, Parser, Precedence},
            utils::parse_expression_list,
        },
    },
};

/// Maps a token kind to the rule that can extend an expression with it.
///
/// This is the infix half of the parser's dispatch table. Binary operators
/// share one rule; calls and indexing have their own because their right
/// side is a delimited list rather than a sub-expression.
pub(crate) fn infix_rule(token: &Token) -> Option<InfixRule> {
    match token {
        Token::Plus
        | Token::Minus
        | Token::Asterisk
        | Token::Slash
        | Token::Percent
        | Token::Eq
        | Token::NotEq
        | Token::Lt
        | Token::Gt
        | Token::Le
        | Token::Ge => Some(parse_infix_expression),
        Token::LParen => Some(parse_call_expression),
        Token::LBracket => Some(parse_index_expression),
        _ => None,
    }
}

/// Binding strength of a token when it appears in infix position.
///
/// Tokens without an infix role bind at [`Precedence::Lowest`], which
/// stops the climbing loop.
#[must_use]
pub(crate) const fn token_precedence(token: &Token) -> Precedence {
    match token {
        Token::Eq | Token::NotEq => Precedence::Equals,
        Token::Lt | Token::Gt | Token::Le | Token::Ge => Precedence::LessGreater,
        Token::Plus | Token::Minus => Precedence::Sum,
        Token::Asterisk | Token::Slash | Token::Percent => Precedence::Product,
        Token::LParen => Precedence::Call,
        Token::LBracket => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Maps a token to its binary operator, when it has one.
#[must_use]
pub(crate) const fn infix_operator(token: &Token) -> Option<InfixOperator> {
    match token {
        Token::Plus => Some(InfixOperator::Add),
        Token::Minus => Some(InfixOperator::Sub),
        Token::Asterisk => Some(InfixOperator::Mul),
        Token::Slash => Some(InfixOperator::Div),
        Token::Percent => Some(InfixOperator::Mod),
        Token::Eq => Some(InfixOperator::Eq),
        Token::NotEq => Some(InfixOperator::NotEq),
        Token::Lt => Some(InfixOperator::Less),
        Token::Gt => Some(InfixOperator::Greater),
        Token::Le => Some(InfixOperator::LessEqual),
        Token::Ge => Some(InfixOperator::GreaterEqual),
        _ => None,
    }
}

/// Parses the right side of a binary operation.
///
/// The right operand is parsed at the operator's own precedence, so a
/// chain of equal-precedence operators folds to the left.
fn parse_infix_expression(parser: &mut Parser<'_>, left: Expr) -> Option<Expr> {
    let line = parser.current.1;
    let op = infix_operator(&parser.current.0)?;
    let precedence = parser.current_precedence();

    parser.advance();
    let right = parser.parse_expression(precedence)?;

    Some(Expr::Infix { left: Box::new(left),
                       op,
                       right: Box::new(right),
                       line })
}

/// Parses the argument list of a call; the callee is the expression
/// already parsed to the left of `(`.
fn parse_call_expression(parser: &mut Parser<'_>, callee: Expr) -> Option<Expr> {
    let line = parser.current.1;
    let arguments = parse_expression_list(parser, &Token::RParen, "')'")?;

    Some(Expr::Call { callee: Box::new(callee),
                      arguments,
                      line })
}

/// Parses `[ <expression> ]` applied to the collection parsed to the left.
fn parse_index_expression(parser: &mut Parser<'_>, collection: Expr) -> Option<Expr> {
    let line = parser.current.1;

    parser.advance();
    let index = parser.parse_expression(Precedence::Lowest)?;

    if !parser.expect_peek(&Token::RBracket, "']'") {
        return None;
    }
    Some(Expr::Index { collection: Box::new(collection),
                       index: Box::new(index),
                       line })
}
