//! Markdown optimization and chunking for size-constrained readers.
//!
//! Two entry points over rendered Markdown:
//!
//! - [`optimize`]: cleanup rewrites, then breadcrumb lines under deep
//!   headings. Idempotent.
//! - [`chunk_content`]: cleanup rewrites, then a split into
//!   [`ContentChunk`]s bounded by a word budget, each annotated with its
//!   position and neighbors.
//!
//! | Option                | Effect                                                    |
//! |-----------------------|-----------------------------------------------------------|
//! | `simplify_structure`  | clamp headings to `####`, collapse blank lines, drop empty headings |
//! | `remove_redundancy`   | `***x***` → `**x**`, `[u](u)` → `u`                       |
//! | `preserve_references` | when `false`, links are reduced to their label            |
//! | `add_context_headers` | breadcrumbs (`optimize`), chunk `context` (`chunk_content`) |
//! | `chunk_size`          | word budget per chunk                                     |
//!
//! Fenced code blocks are never rewritten or split.
//!
//! # Example
//!
//! ```
//! use rstdoc_optimize::{OptimizeOptions, chunk_content, optimize};
//!
//! let markdown = "# Guide\n\nIntro.\n\n## Install\n\nSteps.\n\n### Linux\n\nRun it.\n";
//! let options = OptimizeOptions::default();
//!
//! let optimized = optimize(markdown, &options);
//! assert!(optimized.contains("### Linux\n*Guide → Install*\n"));
//!
//! let chunks = chunk_content(markdown, &options);
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].id, "chunk-1");
//! ```

mod chunk;
mod cleanup;
mod context;
mod fence;
mod heading;
mod options;
mod words;

pub use chunk::{ContentChunk, INTRODUCTION_TITLE};
pub use options::{DEFAULT_CHUNK_SIZE, OptimizeOptions, OptionsError};
pub use words::word_count;

/// Apply cleanup rewrites and context headers.
///
/// `optimize(optimize(x)) == optimize(x)`.
#[must_use]
pub fn optimize(markdown: &str, options: &OptimizeOptions) -> String {
    let cleaned = cleanup::cleanup(markdown, options);
    let output = if options.add_context_headers {
        context::add_context_headers(&cleaned)
    } else {
        cleaned
    };

    tracing::debug!(
        input_words = word_count(markdown),
        output_words = word_count(&output),
        "Optimized markdown"
    );
    output
}

/// Split Markdown into chunks of at most `chunk_size` words.
///
/// Cleanup rewrites selected by `options` run first. Empty input yields no
/// chunks. A zero budget is treated as one word.
#[must_use]
pub fn chunk_content(markdown: &str, options: &OptimizeOptions) -> Vec<ContentChunk> {
    let cleaned = cleanup::cleanup(markdown, options);
    let chunks = chunk::chunk_markdown(
        &cleaned,
        options.chunk_size.max(1),
        options.add_context_headers,
    );

    tracing::debug!(
        chunks = chunks.len(),
        chunk_size = options.chunk_size,
        "Chunked markdown"
    );
    chunks
}
