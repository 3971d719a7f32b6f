pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod stack;

pub use error::SyntaxError;

/// Lexes and parses `source` in one go.
pub fn parse(source: &str) -> Result<ast::Program, SyntaxError> {
    let tokens = lexer::Tokenizer::new(source).tokenize()?;
    parser::Parser::new(tokens).parse_program()
}
