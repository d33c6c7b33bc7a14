//! `rstdoc optimize` command implementation.

use std::path::PathBuf;

use clap::Args;
use rstdoc_config::{CliSettings, Config};
use rstdoc_optimize::optimize;

use crate::commands::{optimize_options, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the optimize command.
#[derive(Args)]
pub(crate) struct OptimizeArgs {
    /// Markdown file to optimize.
    file: PathBuf,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover rstdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reduce links to their label text.
    #[arg(long)]
    no_references: bool,

    /// Do not insert breadcrumb lines under deep headings.
    #[arg(long)]
    no_context_headers: bool,
}

impl OptimizeArgs {
    /// Execute the optimize command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the file cannot be read or
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            preserve_references: self.no_references.then_some(false),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let mut options = optimize_options(&config);
        if self.no_context_headers {
            options.add_context_headers = false;
        }

        let markdown = std::fs::read_to_string(&self.file)?;
        let optimized = optimize(&markdown, &options);
        write_output(self.output.as_deref(), &optimized)?;

        if let Some(path) = &self.output {
            Output::new().success(&format!(
                "Optimized {} -> {}",
                self.file.display(),
                path.display()
            ));
        }
        Ok(())
    }
}
