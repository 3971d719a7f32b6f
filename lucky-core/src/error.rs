use std::rc::Rc;

use thiserror::Error;

use crate::lexer::{Location, TokenKind};
use crate::parser::error::Expected;

/// Failure raised while lexing or parsing. Any of these aborts the whole
/// parse attempt; no partial token stream or AST is produced.
#[derive(Debug, PartialEq, Clone, Error)]
pub enum SyntaxError {
    #[error("Unrecognized symbol '{symbol}' at {location}")]
    IllegalSymbol { symbol: char, location: Location },
    #[error("Unterminated literal '{text}' at {location}")]
    UnterminatedLiteral { text: Rc<str>, location: Location },
    #[error("Expected {expected} but got {found} at {location}")]
    UnexpectedToken {
        expected: Expected,
        found: TokenKind,
        location: Location,
    },
    #[error("Invalid numeral '{text}' at {location}")]
    InvalidNumeral { text: Rc<str>, location: Location },
    #[error("Nesting deeper than {limit} levels at {location}")]
    NestingTooDeep { limit: usize, location: Location },
}

impl SyntaxError {
    pub fn location(&self) -> Location {
        match self {
            SyntaxError::IllegalSymbol { location, .. }
            | SyntaxError::UnterminatedLiteral { location, .. }
            | SyntaxError::UnexpectedToken { location, .. }
            | SyntaxError::InvalidNumeral { location, .. }
            | SyntaxError::NestingTooDeep { location, .. } => *location,
        }
    }
}
