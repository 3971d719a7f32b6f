mod evaluator;
mod printer;
mod reader;

use evaluator::Evaluator;
use printer::Printer;
use reader::{ReadOutput, Reader};

use crate::error::RunnerError;

struct Repl<W: std::io::Write> {
    reader: Reader,
    evaluator: Evaluator,
    printer: Printer<W>,
}

impl<W: std::io::Write> Repl<W> {
    fn run(mut self) -> Result<(), RunnerError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => return Ok(()),
                ReadOutput::Clear => continue,
                ReadOutput::Error(error) => self.printer.print_syntax_error(&error)?,
                ReadOutput::Value(program) => {
                    let result = self.evaluator.evaluate(&program);
                    self.printer.print(result)?
                }
            }
        }
    }
}

pub fn start(max_depth: usize) -> Result<(), RunnerError> {
    Repl {
        reader: Reader::new()?,
        evaluator: Evaluator::new(max_depth),
        printer: Printer::new(std::io::stdout()),
    }
    .run()
}
