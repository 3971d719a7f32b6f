use std::path::PathBuf;

use lucky_core::SyntaxError;
use lucky_interpreter::RuntimeError;
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Could not read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Could not write output: {0}")]
    Output(#[from] std::io::Error),
}
