//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use notegraph::config::CONFIG_FILE;

/// Forward links and backlinks for a folder of markdown notes
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Content directory path (overrides [content].dir)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path, searched upward from the working directory
    #[arg(short = 'C', long, global = true, default_value = CONFIG_FILE, value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Report every route collision and broken link
    #[command(visible_alias = "c")]
    Check,

    /// Show the forward links and backlinks of one document
    #[command(visible_alias = "l")]
    Links {
        /// Document id (`notes/a`) or route (`/notes/a`)
        document: String,
    },

    /// Export all documents and links as JSON
    #[command(visible_alias = "g")]
    Graph {
        /// Write to a file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Rebuild the graph whenever the content directory changes
    #[command(visible_alias = "w")]
    Watch,
}
