//! Notegraph - forward links and backlinks for markdown notes.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use notegraph::{Config, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli.config, cli.content.as_deref())?;
    notegraph::debug!("config"; "content directory: {}", config.content_dir().display());

    match &cli.command {
        Commands::Check => cli::check::run(&config).await,
        Commands::Links { document } => cli::links::run(&config, document).await,
        Commands::Graph { output } => cli::graph::run(&config, output.as_deref()).await,
        Commands::Watch => cli::watch::run(&config).await,
    }
}
