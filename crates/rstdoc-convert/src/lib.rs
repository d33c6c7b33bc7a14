//! reStructuredText-style markup to Markdown conversion.
//!
//! # Pipeline
//!
//! ```text
//! bytes ── decode ──► text ── rewrite rules ──► text ── parse ──► Document ── render ──► Markdown
//!          (UTF-8,            (substitutions,            (title,              (headings,
//!           BOM, CRLF)         targets, admonitions,      sections,            literal blocks,
//!                              toctree)                   directives)          lists, roles, links)
//! ```
//!
//! - [`preprocess`]: ordered, independent text rewrite rules applied before
//!   parsing. Admonitions and `toctree` blocks are inlined here and never
//!   reach the parser as directives.
//! - [`parse`]: single forward pass recovering the title, sections and
//!   directive blocks.
//! - [`extract_directive`]: greedy, non-recursive directive block scanner.
//! - [`MarkdownRenderer`]: emits Markdown; malformed directives degrade to
//!   their original markup and are reported as warnings.
//!
//! Decoding is the only step that can fail.
//!
//! # Example
//!
//! ```
//! use rstdoc_convert::{ConvertOptions, convert};
//!
//! let source = b"Title\n=====\n\n.. note::\n   Remember this.\n";
//! let markdown = convert(source, "index.rst", &ConvertOptions::default()).unwrap();
//! assert_eq!(markdown, "# Title\n\n> \u{2139}\u{fe0f} **Note:** Remember this.\n");
//! ```

mod adornment;
mod converter;
mod directive;
mod document;
mod error;
mod input;
mod literal;
mod parser;
pub mod preprocess;
mod render;

pub use adornment::{FALLBACK_LEVEL, UNDERLINE_LEVELS, level_for};
pub use converter::{Conversion, ConvertOptions, Converter, convert};
pub use directive::extract_directive;
pub use document::{Body, Directive, DirectiveAnchor, Document, Section};
pub use error::{DirectiveError, ParseError};
pub use parser::{INTRODUCTION_TITLE, parse};
pub use render::MarkdownRenderer;
