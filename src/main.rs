// Chunk: docs/chunks/cli_host - Command line host for the render pipeline

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use smart_read::{render_file_with_config, Config};
use smart_read_syntax::Grammar;
use tracing::debug;

/// Print a numbered window of a source file, collapsing over-long string
/// literals without shifting line numbers.
#[derive(Parser)]
#[command(name = "smart-read", version, about)]
struct Cli {
    /// File to read
    path: PathBuf,

    /// First line to show (1-based)
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    start: i64,

    /// Last line to show (inclusive); defaults to the end of the file
    #[arg(long, allow_negative_numbers = true)]
    end: Option<i64>,

    /// Truncate literals longer than this many bytes; negative disables
    #[arg(long, allow_negative_numbers = true)]
    char_limit: Option<i64>,

    /// Grammar to parse with, overriding the file extension
    #[arg(long)]
    grammar: Option<Grammar>,

    /// Show literals in full
    #[arg(long)]
    no_truncate: bool,

    /// Leave sources with syntax errors untruncated
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout carries only the window
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smart_read=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    if let Some(limit) = cli.char_limit {
        config.char_limit = limit;
    }
    if cli.no_truncate {
        config.char_limit = -1;
    }
    config.grammar = cli.grammar.or(config.grammar);
    config.strict |= cli.strict;

    debug!(?config, "loaded configuration");

    let end = cli.end.unwrap_or(i64::MAX);
    println!("{}", render_file_with_config(&cli.path, cli.start, end, &config));
    Ok(())
}
