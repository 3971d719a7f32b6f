pub mod error;
pub mod expressions;
pub mod statements;

use crate::ast::Program;
use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};
use crate::stack::ensure_sufficient_stack;
use statements::parse_statements;

/// Deepest syntax tree the parser builds. Trees are dropped recursively, so
/// this bounds the native stack used when a program is released.
pub const MAX_NESTING: usize = 1_000;

/// Recursive-descent parser over a finished token stream, looking at most
/// two tokens ahead.
pub struct Parser {
    tokens: std::vec::IntoIter<Token>,
    current: Token,
    next: Token,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens = tokens.into_iter();
        let current = tokens.next().unwrap_or(Token {
            kind: TokenKind::End,
            location: crate::lexer::Location::start(),
        });
        let next = tokens.next().unwrap_or(Token {
            kind: TokenKind::End,
            location: current.location,
        });
        Self {
            tokens,
            current,
            next,
            depth: 0,
        }
    }

    pub(crate) fn current(&self) -> &Token {
        &self.current
    }

    pub(crate) fn peek_kinds(&self) -> (&TokenKind, &TokenKind) {
        (&self.current.kind, &self.next.kind)
    }

    /// Moves the window one token forward and returns the token that was
    /// current. Past the end of the stream `End` keeps being produced.
    pub(crate) fn advance(&mut self) -> Token {
        let following = self.tokens.next().unwrap_or(Token {
            kind: TokenKind::End,
            location: self.next.location,
        });
        let next = std::mem::replace(&mut self.next, following);
        std::mem::replace(&mut self.current, next)
    }

    pub(crate) fn next_if(&mut self, kind: &TokenKind) -> Option<Token> {
        (self.current.kind == *kind).then(|| self.advance())
    }

    pub(crate) fn parse_ident(&mut self) -> Result<std::rc::Rc<str>, SyntaxError> {
        match &self.current.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(SyntaxError::unexpected_other(
                error::Expected::Identifier,
                &self.current,
            )),
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.current.kind == token_kind {
            Ok(self.advance())
        } else {
            Err(SyntaxError::unexpected_token(token_kind, &self.current))
        }
    }

    /// Runs `parse` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Parser) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        self.enter()?;
        let result = ensure_sufficient_stack(|| parse(self));
        self.leave(1);
        result
    }

    pub(crate) fn enter(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::NestingTooDeep {
                limit: MAX_NESTING,
                location: self.current.location,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self, levels: usize) {
        self.depth -= levels;
    }

    pub(crate) fn skip_new_lines(&mut self) {
        while self.next_if(&TokenKind::NewLine).is_some() {}
    }

    pub fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        let statements = parse_statements(self, &TokenKind::End)?;
        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }
}
