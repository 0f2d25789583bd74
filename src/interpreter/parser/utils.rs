use crate::{
    ast::Expr,
    interpreter::{
        lexer::Token,
        parser::core::{Parser, Precedence},
    },
};

/// Parses a comma-separated, possibly empty expression list up to a
/// closing token.
///
/// This is the shared grammar behind call arguments and array literals.
/// The current token must be the opening delimiter; on success the closing
/// token has been consumed.
///
/// Grammar (simplified): `list := (expression ("," expression)*)?`
pub(crate) fn parse_expression_list(parser: &mut Parser<'_>,
                                    closing: &Token,
                                    description: &'static str)
                                    -> Option<Vec<Expr>> {
    let mut items = Vec::new();

    if parser.peek.0 == *closing {
        parser.advance();
        return Some(items);
    }

    parser.advance();
    items.push(parser.parse_expression(Precedence::Lowest)?);

    while parser.peek.0 == Token::Comma {
        parser.advance();
        parser.advance();
        items.push(parser.parse_expression(Precedence::Lowest)?);
    }

    if !parser.expect_peek(closing, description) {
        return None;
    }
    Some(items)
}

/// Parses a comma-separated, possibly empty parameter-name list.
///
/// Same list shape as [`parse_expression_list`], but each element must be
/// a plain identifier. The current token must be the opening `(`; on
/// success the closing `)` has been consumed.
pub(crate) fn parse_function_parameters(parser: &mut Parser<'_>) -> Option<Vec<String>> {
    let mut parameters = Vec::new();

    if parser.peek.0 == Token::RParen {
        parser.advance();
        return Some(parameters);
    }

    parser.advance();
    parameters.push(parameter_name(parser)?);

    while parser.peek.0 == Token::Comma {
        parser.advance();
        parser.advance();
        parameters.push(parameter_name(parser)?);
    }

    if !parser.expect_peek(&Token::RParen, "')'") {
        return None;
    }
    Some(parameters)
}

fn parameter_name(parser: &mut Parser<'_>) -> Option<String> {
    match &parser.current.0 {
        Token::Identifier(name) => Some(name.clone()),
        _ => {
            parser.errors
                  .push(crate::error::ParseError::ExpectedToken { expected: "a parameter name",
                                                                  found: parser.current
                                                                               .0
                                                                               .to_string(),
                                                                  line: parser.current.1, });
            None
        },
    }
}
