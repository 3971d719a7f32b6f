pub mod recognizer;
pub mod token;

use std::rc::Rc;

use crate::error::SyntaxError;
use recognizer::{CommentState, IdentifierState, NumeralState, Recognizer, State};
pub use token::{Location, Token, TokenKind};

const COMMENT: char = '#';

#[derive(Clone)]
pub struct Tokenizer<'a> {
    iter: std::iter::Peekable<std::str::Chars<'a>>,
    position: Location,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.chars().peekable();
        Self {
            iter,
            position: Location::start(),
            finished: false,
        }
    }

    /// Scans the whole input. The result always ends with exactly one
    /// [`TokenKind::End`] token.
    pub fn tokenize(self) -> Result<Vec<Token>, SyntaxError> {
        self.collect()
    }

    /// Produces the next token. Once the input is exhausted every call
    /// returns an `End` token at the end-of-input location.
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespaces_and_comments()?;

        let location = self.position;
        let Some(&ch) = self.iter.peek() else {
            return Ok(Token {
                kind: TokenKind::End,
                location,
            });
        };

        let kind = match ch {
            '\n' | ';' => self.single(TokenKind::NewLine),
            ',' => self.single(TokenKind::Comma),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '/' => self.single(TokenKind::Slash),
            '*' => self.with_lookahead('*', TokenKind::Power, TokenKind::Asterisk),
            '<' => self.with_lookahead('=', TokenKind::LessEqual, TokenKind::LessThan),
            '>' => self.with_lookahead('=', TokenKind::GreaterEqual, TokenKind::GreaterThan),
            '=' => self.with_lookahead('=', TokenKind::Equal, TokenKind::Assign),
            ch if ch.is_ascii_alphabetic() => {
                let ident = self.recognize_with(IdentifierState::Begin)?;
                token::keywords(&ident).unwrap_or(TokenKind::Ident(ident))
            }
            ch if ch.is_ascii_digit() || ch == '.' => {
                TokenKind::Number(self.recognize_with(NumeralState::Begin)?)
            }
            symbol => return Err(SyntaxError::IllegalSymbol { symbol, location }),
        };

        Ok(Token { kind, location })
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        self.position.offset += 1;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(ch)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    /// Consumes the current symbol and, if the following one is `expected`,
    /// that one too.
    fn with_lookahead(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
        self.bump();
        if self.iter.peek() == Some(&expected) {
            self.bump();
            matched
        } else {
            otherwise
        }
    }

    fn skip_whitespaces_and_comments(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.iter.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.bump();
                }
                Some(&COMMENT) => {
                    self.recognize_with(CommentState::Begin)?;
                }
                _ => return Ok(()),
            }
        }
    }

    fn recognize_with<S: State>(&mut self, start: S) -> Result<Rc<str>, SyntaxError> {
        let mut recognizer = Recognizer::new(start);
        let mut last = self.position;

        while let Some(&symbol) = self.iter.peek() {
            if !recognizer.next(symbol) {
                break;
            }
            last = self.position;
            self.bump();
        }

        if recognizer.is_recognized() {
            return Ok(recognizer.into_value().into());
        }

        if recognizer.is_invalid() {
            if let Some(symbol) = recognizer.value().chars().last() {
                return Err(SyntaxError::IllegalSymbol {
                    symbol,
                    location: last,
                });
            }
        }

        match self.iter.peek() {
            Some(&symbol) => Err(SyntaxError::IllegalSymbol {
                symbol,
                location: self.position,
            }),
            None => Err(SyntaxError::UnterminatedLiteral {
                text: recognizer.into_value().into(),
                location: self.position,
            }),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        match &token {
            Ok(Token {
                kind: TokenKind::End,
                ..
            })
            | Err(_) => self.finished = true,
            Ok(token) => tracing::trace!(kind = %token.kind, location = %token.location, "token"),
        }
        Some(token)
    }
}
