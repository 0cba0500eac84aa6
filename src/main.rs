//! CLI entry point for rendering influence map videos from SGF records

use clap::Parser;
use goinfluence::io::cli::{Cli, ReplayProcessor};
use goinfluence::io::logging::init_logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let mut processor = ReplayProcessor::new(cli);
    match processor.process() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
