//! Markdown renderer.
//!
//! Walks a [`Document`] and emits one flat Markdown string:
//!
//! ```text
//! # Title                 document title, if any
//!
//! lead text
//!
//! ## Section              depth = level + 1 with a title, clamped to 6
//!
//! section body            literal blocks, lists, inline markup, directives
//! ```
//!
//! Directives are rendered where their anchors sit in the body. A
//! recognized directive that cannot be rendered is emitted as its original
//! markup and reported as a warning.

mod directive;
mod inline;
mod text;

use crate::{Body, Conversion, Document};

/// Deepest Markdown heading.
const MAX_HEADING_DEPTH: u8 = 6;

/// Renders a parsed [`Document`] to Markdown.
///
/// # Example
///
/// ```
/// use rstdoc_convert::{MarkdownRenderer, parse};
///
/// let doc = parse("Guide\n=====\n\nSee :doc:`install`.\n");
/// let result = MarkdownRenderer::new().render(&doc);
/// assert_eq!(result.markdown, "# Guide\n\nSee [install](install.md).\n");
/// assert_eq!(result.title.as_deref(), Some("Guide"));
/// ```
#[derive(Debug)]
pub struct MarkdownRenderer {
    preserve_references: bool,
    document_id: String,
    warnings: Vec<String>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer that keeps references as links.
    #[must_use]
    pub fn new() -> Self {
        Self {
            preserve_references: true,
            document_id: String::new(),
            warnings: Vec::new(),
        }
    }

    /// Render `:doc:`/`:ref:` references as links (`true`) or bare labels.
    #[must_use]
    pub fn with_preserve_references(mut self, preserve: bool) -> Self {
        self.preserve_references = preserve;
        self
    }

    /// Identifier prefixed to warnings.
    #[must_use]
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = document_id.into();
        self
    }

    /// Render the document.
    pub fn render(mut self, doc: &Document) -> Conversion {
        let mut blocks: Vec<String> = Vec::with_capacity(doc.sections.len() * 2 + 2);

        if let Some(title) = &doc.title {
            blocks.push(format!("# {}", self.inline(title)));
            blocks.push(self.render_body(&doc.lead, doc));
        }

        let offset = doc.depth_offset();
        for section in &doc.sections {
            let depth = section.level.saturating_add(offset).min(MAX_HEADING_DEPTH);
            blocks.push(format!(
                "{} {}",
                "#".repeat(usize::from(depth)),
                self.inline(&section.title)
            ));
            blocks.push(self.render_body(&section.content, doc));
        }

        let mut markdown = blocks
            .into_iter()
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        if !markdown.is_empty() {
            markdown.push('\n');
        }

        Conversion {
            markdown,
            title: doc.title.clone(),
            warnings: self.warnings,
        }
    }

    fn inline(&self, text: &str) -> String {
        inline::render_inline(text, self.preserve_references)
    }

    /// Render text pieces and anchored directives in source order.
    fn render_body(&mut self, body: &Body, doc: &Document) -> String {
        let mut pieces = Vec::with_capacity(body.anchors.len() * 2 + 1);
        let mut last = 0;

        for anchor in &body.anchors {
            pieces.push(text::render_text(
                &body.text[last..anchor.offset],
                self.preserve_references,
            ));
            if let Some(directive) = doc.directives.get(anchor.directive) {
                pieces.push(self.render_directive(directive));
            }
            last = anchor.offset;
        }
        pieces.push(text::render_text(&body.text[last..], self.preserve_references));

        pieces
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn render_directive(&mut self, directive: &crate::Directive) -> String {
        match directive::render_directive(directive, self.preserve_references) {
            Ok(markdown) => markdown,
            Err(err) => {
                tracing::warn!(
                    document_id = %self.document_id,
                    directive = %directive.name,
                    line = directive.line,
                    "{err}"
                );
                self.warnings.push(if self.document_id.is_empty() {
                    err.to_string()
                } else {
                    format!("{}: {err}", self.document_id)
                });
                directive.raw.clone()
            }
        }
    }
}
