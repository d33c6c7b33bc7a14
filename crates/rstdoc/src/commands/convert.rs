//! `rstdoc convert` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use rstdoc_config::{CliSettings, Config, ConvertConfig};

use crate::batch::{self, Pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Document or directory to convert (overrides config source_dir).
    path: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rstdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render :doc: and :ref: roles as plain text instead of links.
    #[arg(long)]
    no_references: bool,

    /// Run the optimize pass on converted Markdown.
    #[arg(long)]
    optimize: bool,

    /// Also write <name>.chunks.json next to each Markdown file.
    #[arg(long)]
    chunks: bool,

    /// Word budget per chunk (overrides config).
    #[arg(long)]
    chunk_size: Option<usize>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source is missing, or any
    /// document fails to convert.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.path,
            output_dir: self.output,
            preserve_references: self.no_references.then_some(false),
            optimize: self.optimize.then_some(true),
            chunks: self.chunks.then_some(true),
            chunk_size: self.chunk_size,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let pipeline = Pipeline::from_config(&config)?;
        let convert = &config.convert_resolved;

        let (root, sources) = resolve_sources(convert)?;
        if sources.is_empty() {
            output.warning(&format!("No documents found in {}", root.display()));
            return Ok(());
        }

        output.info(&format!(
            "Converting {} document(s) from {}",
            sources.len(),
            root.display()
        ));
        let report = batch::convert_tree(&pipeline, &root, &sources, &convert.output_dir);

        for written in &report.written {
            for warning in &written.warnings {
                output.warning(&format!("Warning: {warning}"));
            }
        }
        for failure in &report.failures {
            output.error(&format!("{}: {}", failure.source.display(), failure.error));
        }
        if !report.failures.is_empty() {
            return Err(CliError::Batch {
                failed: report.failures.len(),
                total: sources.len(),
            });
        }

        let chunk_sets = report.written.iter().filter(|w| w.chunks.is_some()).count();
        output.success(&format!(
            "Converted {} document(s) to {}",
            report.written.len(),
            convert.output_dir.display()
        ));
        if chunk_sets > 0 {
            output.info(&format!("Chunk sets written: {chunk_sets}"));
        }
        Ok(())
    }
}

/// Source root and the documents under it.
///
/// A single file converts on its own, whatever its extension.
fn resolve_sources(convert: &ConvertConfig) -> Result<(PathBuf, Vec<PathBuf>), CliError> {
    let source = &convert.source_dir;
    if source.is_file() {
        let root = source.parent().unwrap_or(Path::new(".")).to_path_buf();
        let name = source
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| CliError::SourceNotFound(source.clone()))?;
        return Ok((root, vec![name]));
    }
    if !source.is_dir() {
        return Err(CliError::SourceNotFound(source.clone()));
    }
    let sources = batch::collect_sources(source, convert)?;
    Ok((source.clone(), sources))
}
