//! Finite-state recognizers for the lexical categories that span more than
//! one symbol: numerals, identifiers and comments.

pub trait State: Copy {
    /// Transition on `symbol`, or `None` when the state has no edge for it.
    fn next(self, symbol: char) -> Option<Self>;

    fn is_final(self) -> bool;

    /// Absorbing rejection state. Reaching it means the last consumed symbol
    /// was the offending one.
    fn is_invalid(self) -> bool {
        false
    }
}

/// Drives a [`State`] machine over a stream of symbols, collecting the ones
/// it accepts.
pub struct Recognizer<S: State> {
    state: S,
    value: String,
}

impl<S: State> Recognizer<S> {
    pub fn new(start: S) -> Self {
        Self {
            state: start,
            value: String::new(),
        }
    }

    /// Feeds one symbol. Returns `false` without consuming it when the
    /// current state has no edge for the symbol.
    pub fn next(&mut self, symbol: char) -> bool {
        match self.state.next(symbol) {
            Some(state) => {
                self.state = state;
                self.value.push(symbol);
                true
            }
            None => false,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.state.is_final()
    }

    pub fn is_invalid(&self) -> bool {
        self.state.is_invalid()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Feeds every symbol of `input` until the machine stops.
    pub fn recognize(mut self, input: &str) -> (bool, String) {
        for symbol in input.chars() {
            if !self.next(symbol) {
                break;
            }
        }
        (self.is_recognized(), self.value)
    }
}

/// Numeral grammar: `0`, or a non-zero-led integer with single `_`
/// separators between digits, optionally followed by one `.` and a
/// fractional part obeying the same separator rule. A leading `.` is allowed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NumeralState {
    Begin,
    Zero,
    Integer,
    IntegerSeparator,
    FractionStart,
    Fraction,
    FractionSeparator,
    Invalid,
}

const SEPARATOR: char = '_';
const DOT: char = '.';

impl State for NumeralState {
    fn next(self, symbol: char) -> Option<Self> {
        use NumeralState::*;
        match (self, symbol) {
            (Begin, '0') => Some(Zero),
            (Begin, '1'..='9') => Some(Integer),
            (Begin, DOT) => Some(FractionStart),
            (Zero, DOT) => Some(FractionStart),
            (Zero, '0'..='9') => Some(Invalid),
            (Integer, '0'..='9') => Some(Integer),
            (Integer, DOT) => Some(FractionStart),
            (Integer, SEPARATOR) => Some(IntegerSeparator),
            (IntegerSeparator, '0'..='9') => Some(Integer),
            (FractionStart, '0'..='9') => Some(Fraction),
            (Fraction, '0'..='9') => Some(Fraction),
            (Fraction, SEPARATOR) => Some(FractionSeparator),
            (Fraction, DOT) => Some(Invalid),
            (FractionSeparator, '0'..='9') => Some(Fraction),
            _ => None,
        }
    }

    fn is_final(self) -> bool {
        matches!(
            self,
            NumeralState::Zero | NumeralState::Integer | NumeralState::Fraction
        )
    }

    fn is_invalid(self) -> bool {
        self == NumeralState::Invalid
    }
}

/// An ASCII letter followed by letters or digits.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IdentifierState {
    Begin,
    Identifier,
}

impl State for IdentifierState {
    fn next(self, symbol: char) -> Option<Self> {
        match (self, symbol) {
            (IdentifierState::Begin, ch) if ch.is_ascii_alphabetic() => {
                Some(IdentifierState::Identifier)
            }
            (IdentifierState::Identifier, ch) if ch.is_ascii_alphanumeric() => {
                Some(IdentifierState::Identifier)
            }
            _ => None,
        }
    }

    fn is_final(self) -> bool {
        self == IdentifierState::Identifier
    }
}

/// `#` up to, but not including, the end of the line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CommentState {
    Begin,
    Comment,
}

impl State for CommentState {
    fn next(self, symbol: char) -> Option<Self> {
        match (self, symbol) {
            (CommentState::Begin, '#') => Some(CommentState::Comment),
            (CommentState::Comment, '\n') => None,
            (CommentState::Comment, _) => Some(CommentState::Comment),
            _ => None,
        }
    }

    fn is_final(self) -> bool {
        self == CommentState::Comment
    }
}
