//! Directory conversion.
//!
//! Source documents are discovered with the `ignore` walker (so `.gitignore`
//! and `.ignore` files are honored) and converted in parallel on the global
//! rayon pool. Output mirrors each document's path relative to the source
//! root, with an `.md` extension; chunk sets go to `<name>.chunks.json`.
//!
//! A failing document is reported and skipped; the rest of the batch still
//! runs. Sources that would write the same output file (`a.rst` and `a.txt`)
//! fail before conversion, except the first in source order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;
use rstdoc_config::{Config, ConvertConfig};
use rstdoc_convert::{ConvertOptions, Converter, ParseError};
use rstdoc_optimize::{ContentChunk, OptimizeOptions, chunk_content, optimize};

use crate::commands::optimize_options;
use crate::error::CliError;

/// Per-document conversion pipeline built from configuration.
pub(crate) struct Pipeline {
    converter: Converter,
    optimize: Option<OptimizeOptions>,
    chunks: Option<OptimizeOptions>,
}

/// Pipeline output for one document.
pub(crate) struct Rendered {
    pub(crate) markdown: String,
    pub(crate) chunks: Option<Vec<ContentChunk>>,
    pub(crate) warnings: Vec<String>,
}

impl Pipeline {
    pub(crate) fn from_config(config: &Config) -> Result<Self, CliError> {
        let options = optimize_options(config);
        options.validate()?;

        let converter = Converter::new(ConvertOptions {
            preserve_references: config.convert_resolved.preserve_references,
        });
        Ok(Self {
            converter,
            optimize: config.optimize.enabled.then_some(options),
            chunks: config.optimize.chunks.then_some(options),
        })
    }

    /// Convert, then optionally optimize and chunk.
    ///
    /// Chunks are cut from the converted Markdown, not the optimized one, so
    /// breadcrumb lines never land in chunk content.
    pub(crate) fn run(&self, source: &[u8], document_id: &str) -> Result<Rendered, ParseError> {
        let conversion = self.converter.convert(source, document_id)?;
        let chunks = self
            .chunks
            .map(|options| chunk_content(&conversion.markdown, &options));
        let markdown = match self.optimize {
            Some(options) => optimize(&conversion.markdown, &options),
            None => conversion.markdown,
        };
        Ok(Rendered {
            markdown,
            chunks,
            warnings: conversion.warnings,
        })
    }
}

/// Document that could not be converted.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DocumentError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot serialize chunks: {0}")]
    Json(#[from] serde_json::Error),

    #[error("output {} is already written by {}", output.display(), other.display())]
    OutputCollision { output: PathBuf, other: PathBuf },
}

/// Files written for one document.
pub(crate) struct Written {
    pub(crate) chunks: Option<PathBuf>,
    pub(crate) warnings: Vec<String>,
}

pub(crate) struct DocumentFailure {
    pub(crate) source: PathBuf,
    pub(crate) error: DocumentError,
}

/// Outcome of a batch: successes and failures, in source order.
pub(crate) struct BatchReport {
    pub(crate) written: Vec<Written>,
    pub(crate) failures: Vec<DocumentFailure>,
}

/// List source documents under `root`, relative to it, sorted.
pub(crate) fn collect_sources(root: &Path, convert: &ConvertConfig) -> Result<Vec<PathBuf>, CliError> {
    let mut sources = Vec::new();

    for entry in WalkBuilder::new(root)
        .require_git(false)
        .follow_links(false)
        .build()
    {
        let entry = entry?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if !convert.matches_extension(path) {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(root) {
            sources.push(relative.to_path_buf());
        }
    }

    sources.sort();
    tracing::debug!(root = %root.display(), count = sources.len(), "Collected sources");
    Ok(sources)
}

/// Split `sources` into documents with a unique Markdown output and
/// failures for the rest.
///
/// The first source claiming an output keeps it.
fn claim_outputs<'a>(
    sources: &'a [PathBuf],
    output_dir: &Path,
) -> (Vec<&'a PathBuf>, Vec<DocumentFailure>) {
    let mut owners: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(sources.len());
    let mut unique = Vec::with_capacity(sources.len());
    let mut collisions = Vec::new();

    for relative in sources {
        let output = output_dir.join(relative).with_extension("md");
        if let Some(owner) = owners.get(&output) {
            tracing::warn!(source = %relative.display(), other = %owner.display(), "Output collision");
            collisions.push(DocumentFailure {
                source: relative.clone(),
                error: DocumentError::OutputCollision {
                    output,
                    other: (*owner).clone(),
                },
            });
            continue;
        }
        owners.insert(output, relative);
        unique.push(relative);
    }

    (unique, collisions)
}

/// Convert every document in `sources` into `output_dir`.
pub(crate) fn convert_tree(
    pipeline: &Pipeline,
    root: &Path,
    sources: &[PathBuf],
    output_dir: &Path,
) -> BatchReport {
    let (unique, collisions) = claim_outputs(sources, output_dir);

    let results: Vec<Result<Written, DocumentFailure>> = unique
        .par_iter()
        .map(|relative| {
            convert_one(pipeline, root, relative, output_dir).map_err(|error| DocumentFailure {
                source: (*relative).clone(),
                error,
            })
        })
        .collect();

    let mut written = Vec::with_capacity(results.len());
    let mut failures = collisions;
    for result in results {
        match result {
            Ok(item) => written.push(item),
            Err(failure) => failures.push(failure),
        }
    }
    failures.sort_by(|a, b| a.source.cmp(&b.source));

    BatchReport { written, failures }
}

fn convert_one(
    pipeline: &Pipeline,
    root: &Path,
    relative: &Path,
    output_dir: &Path,
) -> Result<Written, DocumentError> {
    let path = root.join(relative);
    let bytes = std::fs::read(&path).map_err(|source| DocumentError::Read {
        path: path.clone(),
        source,
    })?;

    let document_id = relative.to_string_lossy().replace('\\', "/");
    let rendered = pipeline.run(&bytes, &document_id)?;

    let target = output_dir.join(relative);
    let markdown = target.with_extension("md");
    write_file(&markdown, rendered.markdown.as_bytes())?;

    let chunks = match rendered.chunks {
        Some(chunks) => {
            let json = serde_json::to_string_pretty(&chunks)?;
            let chunks_path = target.with_extension("chunks.json");
            write_file(&chunks_path, json.as_bytes())?;
            Some(chunks_path)
        }
        None => None,
    };

    tracing::info!(document_id, output = %markdown.display(), "Converted document");
    Ok(Written {
        chunks,
        warnings: rendered.warnings,
    })
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), DocumentError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    };
    write().map_err(|source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    })
}
