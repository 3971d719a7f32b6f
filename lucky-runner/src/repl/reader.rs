use lucky_core::ast::Program;
use lucky_core::SyntaxError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub const PROMPT: &str = "> ";

pub enum ReadOutput {
    Exit,
    Clear,
    Value(Program),
    Error(SyntaxError),
}

pub struct Reader {
    rl: DefaultEditor,
}

impl Reader {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            rl: DefaultEditor::new()?,
        })
    }

    pub fn read(&mut self) -> Result<ReadOutput, ReadlineError> {
        let line = match self.rl.readline(PROMPT) {
            // Ctrl-C drops the current line
            Err(ReadlineError::Interrupted) => return Ok(ReadOutput::Clear),
            Err(ReadlineError::Eof) => return Ok(ReadOutput::Exit),
            Err(err) => return Err(err),
            Ok(line) => line,
        };

        if line.trim().is_empty() {
            return Ok(ReadOutput::Clear);
        }
        self.rl.add_history_entry(line.as_str())?;

        Ok(parse_line(&line))
    }
}

fn parse_line(line: &str) -> ReadOutput {
    match lucky_core::parse(line) {
        Ok(program) => ReadOutput::Value(program),
        Err(error) => ReadOutput::Error(error),
    }
}
