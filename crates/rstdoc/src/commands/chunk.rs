//! `rstdoc chunk` command implementation.

use std::path::PathBuf;

use clap::Args;
use rstdoc_config::{CliSettings, Config};
use rstdoc_optimize::chunk_content;

use crate::commands::{optimize_options, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the chunk command.
#[derive(Args)]
pub(crate) struct ChunkArgs {
    /// Markdown file to split.
    file: PathBuf,

    /// Output JSON file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rstdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Word budget per chunk (overrides config).
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Leave the per-chunk navigation context empty.
    #[arg(long)]
    no_context: bool,
}

impl ChunkArgs {
    /// Execute the chunk command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the file cannot be read or
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            chunk_size: self.chunk_size,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut options = optimize_options(&config);
        if self.no_context {
            options.add_context_headers = false;
        }
        options.validate()?;

        let markdown = std::fs::read_to_string(&self.file)?;
        let chunks = chunk_content(&markdown, &options);
        let mut json = serde_json::to_string_pretty(&chunks)?;
        json.push('\n');
        write_output(self.output.as_deref(), &json)?;

        if let Some(path) = &self.output {
            Output::new().success(&format!(
                "Wrote {} chunk(s) to {}",
                chunks.len(),
                path.display()
            ));
        }
        Ok(())
    }
}
