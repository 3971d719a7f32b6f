use crate::ast::{IfStatement, ReturnStatement, Statement};
use crate::error::SyntaxError;
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression, parse_function_rest};
use crate::parser::Parser;

/// Statements up to (not including) `end`, separated by one or more
/// newline tokens.
pub fn parse_statements(parser: &mut Parser, end: &TokenKind) -> Result<Vec<Statement>, SyntaxError> {
    let mut statements = Vec::new();

    parser.skip_new_lines();
    while parser.current().kind != *end {
        statements.push(parse_statement(parser)?);

        if parser.current().kind == *end {
            break;
        }
        parser.expect_token(TokenKind::NewLine)?;
        parser.skip_new_lines();
    }

    Ok(statements)
}

pub fn parse_statement(parser: &mut Parser) -> Result<Statement, SyntaxError> {
    match parser.peek_kinds() {
        (TokenKind::Function, TokenKind::Ident(_)) => parse_function_declaration(parser),
        (TokenKind::If, _) => Ok(Statement::If(parse_if_statement(parser)?)),
        (TokenKind::Return, _) => Ok(Statement::Return(parse_return_statement(parser)?)),
        (TokenKind::LBrace, _) => Ok(Statement::Block(parse_block(parser)?)),
        _ => Ok(Statement::Expression(parse_expression(parser)?)),
    }
}

fn parse_function_declaration(parser: &mut Parser) -> Result<Statement, SyntaxError> {
    parser.expect_token(TokenKind::Function)?;
    let name = parser.parse_ident()?;

    Ok(Statement::FunctionDeclaration(parse_function_rest(
        parser,
        Some(crate::ast::Identifier { name }),
    )?))
}

fn parse_if_statement(parser: &mut Parser) -> Result<IfStatement, SyntaxError> {
    parser.expect_token(TokenKind::If)?;

    parser.expect_token(TokenKind::LParen)?;
    let condition = parse_expression(parser)?;
    parser.expect_token(TokenKind::RParen)?;

    let consequence = parse_block(parser)?;

    Ok(IfStatement {
        condition,
        consequence,
    })
}

fn parse_return_statement(parser: &mut Parser) -> Result<ReturnStatement, SyntaxError> {
    parser.expect_token(TokenKind::Return)?;
    let value = parse_expression(parser)?;

    Ok(ReturnStatement { value })
}

pub(crate) fn parse_block(parser: &mut Parser) -> Result<Vec<Statement>, SyntaxError> {
    parser.expect_token(TokenKind::LBrace)?;
    let statements = parser.nested(|parser| parse_statements(parser, &TokenKind::RBrace))?;
    parser.expect_token(TokenKind::RBrace)?;

    Ok(statements)
}
