//! CLI module
//!
//! Command-line interface for the search client.
//!
//! # Commands
//!
//! - `token` - Authenticate and report the token expiry
//! - `search` - Run a JSON search, one record per line
//! - `export` - Run a tabular export, one record per line
//! - `columns` - Print the expected export columns
//! - `validate` - Check a query file offline

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
