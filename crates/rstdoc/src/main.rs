//! rstdoc CLI - reStructuredText to Markdown converter.
//!
//! Provides commands for:
//! - `convert`: Convert a document or a directory tree to Markdown
//! - `optimize`: Clean up a Markdown file for size-constrained readers
//! - `chunk`: Split a Markdown file into word-bounded chunks (JSON)

mod batch;
mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ChunkArgs, ConvertArgs, OptimizeArgs};
use output::Output;

/// rstdoc - reStructuredText to Markdown converter.
#[derive(Parser)]
#[command(name = "rstdoc", version, about)]
struct Cli {
    /// Enable verbose output (pipeline logs and directive warnings).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert documents to Markdown.
    Convert(ConvertArgs),
    /// Optimize a Markdown file.
    Optimize(OptimizeArgs),
    /// Split a Markdown file into chunks.
    Chunk(ChunkArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Optimize(args) => args.execute(),
        Commands::Chunk(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
