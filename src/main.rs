mod cli;

use std::{error::Error, process::ExitCode};

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode, Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.cmd {
        Command::Compare(args) => cli::compare::handle_compare_command(args),
        Command::Fixtures(args) => cli::fixtures::handle_fixtures_command(args),
    };

    result.map_err(|e| {
        eprintln!("Error: {}", e);
        e
    })
}
