mod cleanup;
mod commands;
mod config;
mod error;
mod fetch;
mod ops;
mod probe;
mod prompt;
mod reports;

use clap::Parser;
use env_logger::Env;
use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level().as_str()))
        .format_timestamp(None)
        .init();

    cli.run()
}
