use std::rc::Rc;

use super::error::Expected;
use super::statements::parse_block;
use crate::ast::{BinaryOperator, Expression, FunctionDeclaration, Identifier, Numeral, UnaryOperator};
use crate::error::SyntaxError;
use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::stack::ensure_sufficient_stack;

type ParseFunction = fn(&mut Parser) -> Result<Expression, SyntaxError>;

pub fn parse_expression(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parser.nested(|parser| match parser.peek_kinds() {
        (TokenKind::Ident(_), TokenKind::Assign) => parse_assignment(parser),
        (TokenKind::Function, _) => parse_function_literal(parser),
        _ => parse_comparison(parser),
    })
}

fn parse_assignment(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    let name = parser.parse_ident()?;
    parser.expect_token(TokenKind::Assign)?;

    Ok(Expression::VariableAssignment {
        name: Identifier { name },
        value: Box::new(parse_expression(parser)?),
    })
}

fn parse_function_literal(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parser.expect_token(TokenKind::Function)?;
    Ok(Expression::Function(parse_function_rest(parser, None)?))
}

/// Parameter list and body, shared by named and anonymous declarations.
pub(crate) fn parse_function_rest(
    parser: &mut Parser,
    name: Option<Identifier>,
) -> Result<FunctionDeclaration, SyntaxError> {
    parser.expect_token(TokenKind::LParen)?;
    let parameters = parse_sequence(parser, |parser| {
        parser.parse_ident().map(|name| Identifier { name })
    })?;

    let body: Rc<[_]> = parse_block(parser)?.into();

    Ok(FunctionDeclaration {
        name,
        parameters,
        body,
    })
}

/// Comma separated elements up to the closing `)`, which is consumed. The
/// opening `(` must already be consumed. Trailing commas are rejected.
fn parse_sequence<T>(
    parser: &mut Parser,
    parse_element: impl Fn(&mut Parser) -> Result<T, SyntaxError>,
) -> Result<Vec<T>, SyntaxError> {
    let mut elements = Vec::new();

    if parser.next_if(&TokenKind::RParen).is_some() {
        return Ok(elements);
    }

    loop {
        elements.push(parse_element(parser)?);

        if parser.next_if(&TokenKind::Comma).is_none() {
            parser.expect_token(TokenKind::RParen)?;
            return Ok(elements);
        }
    }
}

fn comparison_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::LessThan => Some(BinaryOperator::LessThan),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Equal => Some(BinaryOperator::Equal),
        TokenKind::GreaterThan => Some(BinaryOperator::GreaterThan),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        _ => None,
    }
}

fn additive_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        _ => None,
    }
}

fn multiplicative_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Asterisk => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        _ => None,
    }
}

fn power_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Power => Some(BinaryOperator::Power),
        _ => None,
    }
}

/// `left (operator right)*`, folded to the left. Each fold puts the tree
/// built so far one level deeper.
fn parse_binary_operation(
    parser: &mut Parser,
    left_operand: ParseFunction,
    operator_of: fn(&TokenKind) -> Option<BinaryOperator>,
    right_operand: ParseFunction,
) -> Result<Expression, SyntaxError> {
    let mut left = left_operand(parser)?;
    let mut folds = 0;

    let result = loop {
        let Some(operator) = operator_of(&parser.current().kind) else {
            break Ok(left);
        };
        if let Err(error) = parser.enter() {
            break Err(error);
        }
        folds += 1;

        parser.advance();
        match ensure_sufficient_stack(|| right_operand(parser)) {
            Ok(right) => {
                left = Expression::BinaryOperation(operator, Box::new(left), Box::new(right))
            }
            Err(error) => break Err(error),
        }
    };

    parser.leave(folds);
    result
}

fn parse_comparison(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parse_binary_operation(parser, parse_arithmetic, comparison_operator, parse_arithmetic)
}

fn parse_arithmetic(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parse_binary_operation(parser, parse_term, additive_operator, parse_term)
}

fn parse_term(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parse_binary_operation(parser, parse_factor, multiplicative_operator, parse_factor)
}

fn parse_factor(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    let operator = match parser.current().kind {
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Minus => UnaryOperator::Minus,
        _ => return parse_power(parser),
    };
    parser.advance();

    let child = parser.nested(parse_factor)?;
    Ok(Expression::UnaryOperation(operator, Box::new(child)))
}

// The right operand goes back through `factor`, which makes `**` right
// associative and binds it tighter than a unary sign on its left.
fn parse_power(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parse_binary_operation(parser, parse_atom, power_operator, parse_factor)
}

fn parse_atom(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    match parser.peek_kinds() {
        (TokenKind::Number(_), _) => parse_number(parser),
        (TokenKind::Ident(_), TokenKind::LParen) => parse_function_call(parser),
        (TokenKind::Ident(_), _) => Ok(Expression::VariableAccess(Identifier {
            name: parser.parse_ident()?,
        })),
        (TokenKind::LParen, _) => parse_grouped_expression(parser),
        _ => Err(SyntaxError::unexpected_other(
            Expected::Expression,
            parser.current(),
        )),
    }
}

fn parse_number(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    let token = parser.advance();
    let TokenKind::Number(text) = &token.kind else {
        return Err(SyntaxError::unexpected_other(Expected::Expression, &token));
    };

    match Numeral::parse(text.clone()) {
        Some(numeral) => Ok(Expression::NumberLiteral(numeral)),
        None => Err(SyntaxError::InvalidNumeral {
            text: text.clone(),
            location: token.location,
        }),
    }
}

fn parse_function_call(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    let name = parser.parse_ident()?;
    parser.expect_token(TokenKind::LParen)?;
    let arguments = parse_sequence(parser, parse_expression)?;

    Ok(Expression::FunctionCall {
        name: Identifier { name },
        arguments,
    })
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, SyntaxError> {
    parser.expect_token(TokenKind::LParen)?;
    let expression = parse_expression(parser)?;
    parser.expect_token(TokenKind::RParen)?;

    Ok(expression)
}
