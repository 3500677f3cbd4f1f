//! Hook Normalizer command-line entry point.

use clap::Parser;
use hook_normalizer::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so records on stdout stay machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("hook_normalizer=info".parse()?))
        .init();

    cli::run_command(&args)
}
