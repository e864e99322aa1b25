use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    let config = config::CliConfig::resolve(&cli)?;
    tracing_subscriber::fmt()
        .with_max_level(config.max_level()?)
        .with_writer(std::io::stderr)
        .init();
    commands::run_command(cli, &config)
}
