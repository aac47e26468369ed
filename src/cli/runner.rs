//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::FfsClient;
use crate::config::ClientConfig;
use crate::decode::FileEvent;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpTransport;
use crate::query::Query;
use crate::schema::SchemaRegistry;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Token => self.token().await,
            Commands::Search { query } => self.search(query, false).await,
            Commands::Export { query } => self.search(query, true).await,
            Commands::Columns => self.columns(),
            Commands::Validate { query } => self.validate(query),
        }
    }

    /// Build a client from the configuration file
    fn client(&self) -> Result<FfsClient<HttpTransport>> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -c flag)"))?;
        FfsClient::from_config(ClientConfig::from_path(path)?)
    }

    async fn token(&self) -> Result<()> {
        let credential = self.client()?.authenticate().await?;
        self.output(&json!({
            "type": "TOKEN",
            "status": "SUCCEEDED",
            "expires_at": credential.expires_at,
        }))
    }

    async fn search(&self, query_path: &Path, export: bool) -> Result<()> {
        let query = load_query(query_path)?;
        let client = self.client()?;
        let credential = client.authenticate().await?;

        let started = Instant::now();
        let events = if export {
            client.export_csv(&query, &credential).await?
        } else {
            client.search(&query, &credential).await?
        };
        info!(
            records = events.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search finished"
        );

        self.output_records(&events)
    }

    fn columns(&self) -> Result<()> {
        let registry = SchemaRegistry::csv_export();
        for (position, column) in registry.columns().iter().enumerate() {
            self.output(&json!({
                "position": position,
                "header": column.header,
                "field": column.field,
                "kind": format!("{:?}", column.kind),
            }))?;
        }
        Ok(())
    }

    fn validate(&self, query_path: &Path) -> Result<()> {
        let query = load_query(query_path)?;
        query.validate()?;
        self.output(&json!({
            "type": "VALIDATE",
            "status": "SUCCEEDED",
            "groups": query.groups().len(),
            "page_size": query.page_size(),
        }))
    }

    /// Output one message
    fn output<T: Serialize>(&self, msg: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{line}");
        Ok(())
    }

    /// Output records, one per line
    fn output_records(&self, events: &[FileEvent]) -> Result<()> {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for event in events {
            match self.cli.format {
                OutputFormat::Json => serde_json::to_writer(&mut out, event)?,
                OutputFormat::Pretty => serde_json::to_writer_pretty(&mut out, event)?,
            }
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Read a query file in the service's JSON wire format
fn load_query(path: &Path) -> Result<Query> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read query file '{}'", path.display()))?;
    Query::from_json(&bytes)
}
