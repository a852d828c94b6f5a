mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use veil_config::Config;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries the masked text
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        cli::Commands::Mask(args) => commands::mask::handle(args, &config),
        cli::Commands::Session { file } => commands::session::handle(file, &config),
        cli::Commands::Symbols => commands::symbols(),
        cli::Commands::Completions { shell } => commands::completions(shell),
    }
}
