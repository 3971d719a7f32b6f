use std::fmt::Display;
use std::rc::Rc;

/// Position of a token in the source text.
///
/// `offset` counts characters from the start of the input; `line` and
/// `column` are 1-based.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Location {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn start() -> Self {
        Location {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Number(Rc<str>),
    Ident(Rc<str>),

    // Operators
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Power,

    LessThan,
    LessEqual,
    Equal,
    GreaterThan,
    GreaterEqual,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    NewLine,

    // Keywords
    Function,
    If,
    Return,

    End,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    /// Source text of literal tokens. Operators, delimiters and keywords
    /// carry no text.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Number(text) | TokenKind::Ident(text) => Some(text),
            _ => None,
        }
    }
}

pub(crate) fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "function" => Some(TokenKind::Function),
        "if" => Some(TokenKind::If),
        "return" => Some(TokenKind::Return),
        _ => None,
    }
}

impl TokenKind {
    fn category(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Number(_) | Ident(_) => "literal",
            Assign | Plus | Minus | Asterisk | Slash | Power | LessThan | LessEqual | Equal
            | GreaterThan | GreaterEqual => "operator",
            LParen | RParen | LBrace | RBrace | Comma | NewLine | End => "delimiter",
            Function | If | Return => "keyword",
        }
    }

    fn to_str(&self) -> &str {
        use TokenKind::*;
        match self {
            Number(_) => "Number",
            Ident(_) => "Identifier",
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Slash => "/",
            Power => "**",
            LessThan => "<",
            LessEqual => "<=",
            Equal => "==",
            GreaterThan => ">",
            GreaterEqual => ">=",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            Comma => ",",
            NewLine => "NewLine",
            Function => "function",
            If => "if",
            Return => "return",
            End => "End",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' {}", self.to_str(), self.category())
    }
}
