//! fluxql CLI
//!
//! Parses queries and prints their normalized form or their syntax tree.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use fluxql_core::parse_query;

/// Parse and normalize time-series queries.
#[derive(Parser)]
#[command(name = "fluxql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query text. Read from --file or stdin when omitted.
    #[arg(env = "FLUXQL_QUERY", conflicts_with = "file")]
    query: Option<String>,

    /// Read the query from a file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One normalized statement per line.
    Text,
    /// The syntax tree as pretty-printed JSON.
    Json,
}

impl Cli {
    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(query) = &self.query {
            return Ok(query.clone());
        }
        if let Some(path) = &self.file {
            debug!(path = %path.display(), "reading query file");
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        debug!("reading query from stdin");
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        Ok(input)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let input = cli.read_input()?;
    let query = parse_query(&input)?;
    info!(statements = query.len(), "parsed query");

    match cli.format {
        Format::Text => {
            for stmt in &query.statements {
                println!("{stmt}");
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&query)?);
        }
    }

    Ok(())
}
