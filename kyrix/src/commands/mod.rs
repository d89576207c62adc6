mod completions;
mod new;

use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use log::LevelFilter;
use new::NewCommand;

#[derive(Parser)]
#[command(name = "create-kyrix")]
#[command(version)]
#[command(about = "Scaffold a Kyrix app with the database, ORM and tooling of your choice")]
pub(crate) struct Cli {
    /// Log every step of the run
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Log level used unless `RUST_LOG` says otherwise.
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::New(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Kyrix project
    New(NewCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["create-kyrix", "new", "app", "-v"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Debug);

        let cli = Cli::try_parse_from(["create-kyrix", "new"]).unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Warn);
    }
}
