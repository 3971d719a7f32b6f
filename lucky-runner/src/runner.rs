use std::path::Path;

use lucky_interpreter::{Interpreter, Value};

use crate::error::RunnerError;

pub fn execute_file(path: &Path, max_depth: usize) -> Result<(), RunnerError> {
    let source = std::fs::read_to_string(path).map_err(|source| RunnerError::Read {
        path: path.to_owned(),
        source,
    })?;

    let value = execute(&source, max_depth)?;
    if value != Value::None {
        println!("{value}");
    }
    Ok(())
}

pub fn execute(source: &str, max_depth: usize) -> Result<Value, RunnerError> {
    let program = lucky_core::parse(source)?;
    let value = Interpreter::new(&program).with_max_depth(max_depth).run()?;
    Ok(value)
}
