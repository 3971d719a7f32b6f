use std::io::Write;

use lucky_core::SyntaxError;
use lucky_interpreter::{RuntimeError, Value};

use super::reader::PROMPT;

pub struct Printer<W: Write> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print(&mut self, result: Result<Value, RuntimeError>) -> std::io::Result<()> {
        match result {
            Ok(Value::None) => Ok(()),
            Ok(value) => writeln!(self.out, "{}", value),
            Err(error) => writeln!(self.out, "Runtime error: {}", error),
        }
    }

    /// Points at the offending column of the line just typed after the prompt.
    pub fn print_syntax_error(&mut self, error: &SyntaxError) -> std::io::Result<()> {
        let padding = PROMPT.len() + error.location().column.saturating_sub(1);
        writeln!(self.out, "{}^", " ".repeat(padding))?;
        writeln!(self.out, "Syntax error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Printer;
    use lucky_interpreter::{RuntimeError, Value};

    fn printed(print: impl FnOnce(&mut Printer<&mut Vec<u8>>)) -> String {
        let mut out = Vec::new();
        print(&mut Printer::new(&mut out));
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_values() {
        assert_eq!(printed(|p| p.print(Ok(Value::Number(2.5))).unwrap()), "2.5\n");
        assert_eq!(printed(|p| p.print(Ok(Value::None)).unwrap()), "");
        assert_eq!(
            printed(|p| p.print(Err(RuntimeError::ZeroDivision)).unwrap()),
            "Runtime error: Division by zero\n"
        );
    }

    #[test]
    fn test_caret_under_column() {
        let error = lucky_core::parse("x = 1 $").unwrap_err();
        assert_eq!(
            printed(|p| p.print_syntax_error(&error).unwrap()),
            "        ^\nSyntax error: Unrecognized symbol '$' at line 1, column 7\n"
        );
    }
}
