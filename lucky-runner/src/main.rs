mod error;
mod repl;
mod runner;

use clap::Parser;
use lucky_interpreter::evaluator::DEFAULT_MAX_DEPTH;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Script to run. Starts the REPL when omitted.
    path: Option<PathBuf>,
    /// Maximum nesting of function calls before a stack overflow is reported.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
    /// Log filter such as `debug` or `lucky_interpreter=trace`. Defaults to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match log_level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::from_default_env(),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let result = match cli.path {
        None => repl::start(cli.max_depth),
        Some(path) => runner::execute_file(&path, cli.max_depth),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "exiting with failure");
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}
