use std::fmt::Display;

use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};

#[derive(Debug, PartialEq, Clone)]
pub enum Expected {
    Token(TokenKind),
    Identifier,
    Expression,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::Identifier => write!(f, "'Identifier' literal"),
            Expected::Expression => write!(f, "expression"),
        }
    }
}

impl SyntaxError {
    pub fn unexpected_token(expected: TokenKind, got: &Token) -> SyntaxError {
        SyntaxError::unexpected_other(Expected::Token(expected), got)
    }

    pub fn unexpected_other(expected: Expected, got: &Token) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            expected,
            found: got.kind.clone(),
            location: got.location,
        }
    }
}
