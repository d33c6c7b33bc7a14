//! CLI error types.

use rstdoc_config::ConfigError;
use rstdoc_optimize::OptionsError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Walk(#[from] ignore::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("Source not found: {}", .0.display())]
    SourceNotFound(std::path::PathBuf),

    #[error("{failed} of {total} documents failed to convert")]
    Batch { failed: usize, total: usize },
}
