//! Command-line interface module.

mod args;
pub mod check;
pub mod graph;
pub mod links;
pub mod watch;

pub use args::{Cli, Commands};
