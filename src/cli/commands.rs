//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Forensic file-event search client
#[derive(Parser, Debug)]
#[command(name = "ffs-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate and report the token expiry
    Token,

    /// Run a JSON search through every page
    Search {
        /// Query file (JSON wire format)
        #[arg(short, long)]
        query: PathBuf,
    },

    /// Run a tabular export
    Export {
        /// Query file (JSON wire format)
        #[arg(short, long)]
        query: PathBuf,
    },

    /// Print the expected export columns
    Columns,

    /// Parse and validate a query file without contacting the service
    Validate {
        /// Query file (JSON wire format)
        #[arg(short, long)]
        query: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
