//! CLI command implementations.

pub(crate) mod chunk;
pub(crate) mod convert;
pub(crate) mod optimize;

use std::io::Write;
use std::path::Path;

use rstdoc_config::Config;
use rstdoc_optimize::OptimizeOptions;

pub(crate) use chunk::ChunkArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use optimize::OptimizeArgs;

use crate::error::CliError;

/// Optimizer options from the `[optimize]` section.
///
/// Reference handling follows `convert.preserve_references`.
pub(crate) fn optimize_options(config: &Config) -> OptimizeOptions {
    OptimizeOptions {
        chunk_size: config.optimize.chunk_size,
        preserve_references: config.convert_resolved.preserve_references,
        add_context_headers: config.optimize.add_context_headers,
        simplify_structure: config.optimize.simplify_structure,
        remove_redundancy: config.optimize.remove_redundancy,
    }
}

/// Write to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    if let Some(path) = path {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
