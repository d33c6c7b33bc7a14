//! Conversion entry points.

use crate::preprocess::Preprocessor;
use crate::{MarkdownRenderer, ParseError, input, parse};

/// Conversion options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Render `:doc:`/`:ref:` references as Markdown links instead of bare
    /// labels.
    pub preserve_references: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            preserve_references: true,
        }
    }
}

/// Result of converting one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Conversion {
    /// Rendered Markdown, ending with a single newline (empty for empty input).
    pub markdown: String,
    /// Document title, if the input has a level-1 header.
    pub title: Option<String>,
    /// Malformed directives that were emitted as raw markup.
    pub warnings: Vec<String>,
}

/// Markup to Markdown converter.
///
/// Runs the pipeline: decode, pre-processing rewrite rules, structural
/// parsing, rendering. Holds no per-document state, so one converter can be
/// shared across threads.
///
/// # Example
///
/// ```
/// use rstdoc_convert::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::default());
/// let result = converter.convert(b".. note::\n   Remember this.\n", "notes.rst").unwrap();
/// assert!(result.markdown.contains("> ℹ️ **Note:** Remember this."));
/// ```
pub struct Converter {
    options: ConvertOptions,
    preprocessor: Preprocessor,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl Converter {
    /// Create a converter with the standard rewrite rules.
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            preprocessor: Preprocessor::default(),
        }
    }

    /// Replace the rewrite rules.
    #[must_use]
    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> ConvertOptions {
        self.options
    }

    /// Convert raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not UTF-8 text.
    pub fn convert(&self, source: &[u8], document_id: &str) -> Result<Conversion, ParseError> {
        let text = input::decode(source, document_id)?;
        Ok(self.run(&text, document_id))
    }

    /// Convert already decoded text.
    #[must_use]
    pub fn convert_str(&self, source: &str, document_id: &str) -> Conversion {
        self.run(&input::normalize(source), document_id)
    }

    fn run(&self, text: &str, document_id: &str) -> Conversion {
        let text = self.preprocessor.process(text);
        let doc = parse(&text);
        tracing::debug!(
            document_id,
            sections = doc.sections.len(),
            directives = doc.directives.len(),
            "Parsed document"
        );

        let conversion = MarkdownRenderer::new()
            .with_preserve_references(self.options.preserve_references)
            .with_document_id(document_id)
            .render(&doc);
        if !conversion.warnings.is_empty() {
            tracing::debug!(document_id, warnings = conversion.warnings.len(), "Converted with warnings");
        }
        conversion
    }
}

/// Convert markup to Markdown.
///
/// Fails only on undecodable input; everything else yields best-effort
/// Markdown.
///
/// ```
/// use rstdoc_convert::{ConvertOptions, convert};
///
/// let markdown = convert(b"Title\n=====\n\nBody text.\n", "index.rst", &ConvertOptions::default()).unwrap();
/// assert_eq!(markdown, "# Title\n\nBody text.\n");
/// ```
pub fn convert(
    source: &[u8],
    document_id: &str,
    options: &ConvertOptions,
) -> Result<String, ParseError> {
    Converter::new(*options)
        .convert(source, document_id)
        .map(|c| c.markdown)
}

#[cfg(test)]
mod tests {
    // Converters are shared across batch worker threads
    static_assertions::assert_impl_all!(super::Converter: Send, Sync);
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};

    use super::*;

    fn convert_str(input: &str) -> String {
        Converter::default().convert_str(input, "test.rst").markdown
    }

    /// Heading levels and texts of rendered Markdown.
    fn headings(markdown: &str) -> Vec<(HeadingLevel, String)> {
        let mut out = Vec::new();
        let mut current: Option<(HeadingLevel, String)> = None;
        for event in Parser::new(markdown) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => current = Some((level, String::new())),
                Event::Text(text) | Event::Code(text) => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(&text);
                    }
                }
                Event::End(pulldown_cmark::TagEnd::Heading(_)) => out.extend(current.take()),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn test_title_scenario() {
        let markdown = convert_str("Title\n=====\n\nBody text.\n");
        assert_eq!(markdown, "# Title\n\nBody text.\n");
        assert_eq!(headings(&markdown), vec![(HeadingLevel::H1, "Title".to_owned())]);
    }

    #[test]
    fn test_note_scenario() {
        let markdown = convert_str("Intro\n-----\n\n.. note::\n   Remember this.\n");
        assert!(markdown.contains("> ℹ️ **Note:** Remember this.\n"));
    }

    #[test]
    fn test_doc_reference_scenario() {
        let markdown = convert_str("See :doc:`Target<label>` for details.\n");
        assert!(markdown.contains("[label](label.md)"));
    }

    #[test]
    fn test_heading_structure() {
        let input = "\
Manual
======

Install
-------

Steps.

Linux
~~~~~

Run it.

Usage
-----

Done.
";
        assert_eq!(
            headings(&convert_str(input)),
            vec![
                (HeadingLevel::H1, "Manual".to_owned()),
                (HeadingLevel::H3, "Install".to_owned()),
                (HeadingLevel::H4, "Linux".to_owned()),
                (HeadingLevel::H3, "Usage".to_owned()),
            ]
        );
    }

    #[test]
    fn test_full_pipeline() {
        let input = "\
.. |project| replace:: Widget

.. _intro:

Widget guide
============

Welcome to |project|. See `docs <https://example.com>`_.

.. warning:: Back up first.

.. toctree::
   :maxdepth: 1

   install
   usage

Example::

    widget --run

.. code-block:: shell
   :caption: Shell

   widget --help
";
        let expected = "\
# Widget guide

Welcome to Widget. See [docs](https://example.com).

> ⚠️ **Warning:** Back up first.

<!-- toctree: install, usage -->

Example:

```
widget --run
```

*Shell*

```shell
widget --help
```
";
        let result = Converter::default().convert(input.as_bytes(), "guide.rst").unwrap();
        assert_eq!(result.markdown, expected);
        assert_eq!(result.title.as_deref(), Some("Widget guide"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_footnotes_and_citations_survive() {
        let markdown = convert_str(
            "Para\n----\n\nSee [1]_ and [CIT2002]_.\n\n.. [1] Important footnote text.\n\n.. [CIT2002] Cited work.\n",
        );
        assert!(markdown.contains("Important footnote text."));
        assert!(markdown.contains("Cited work."));
    }

    #[test]
    fn test_substitution_definition_in_code_block_is_code() {
        let result = Converter::default().convert_str(
            "Doc\n---\n\n.. code-block:: rst\n\n   .. |name| replace:: value\n",
            "test.rst",
        );
        assert_eq!(result.markdown, "## Doc\n\n```rst\n.. |name| replace:: value\n```\n");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_substitution_definition_in_literal_block_is_code() {
        let markdown =
            convert_str("Example::\n\n    .. |name| replace:: value\n    Use |name| here.\n");
        assert!(markdown.contains("```\n.. |name| replace:: value\nUse |name| here.\n```\n"));
    }

    #[test]
    fn test_crlf_and_bom() {
        let markdown = convert(
            b"\xef\xbb\xbfTitle\r\n=====\r\n\r\nBody.\r\n",
            "win.rst",
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(markdown, "# Title\n\nBody.\n");
    }

    #[test]
    fn test_undecodable_input_fails() {
        let err = convert(b"\xff\xfe", "bad.rst", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::NotUtf8 { .. }));
    }

    #[test]
    fn test_deterministic() {
        let input = "Title\n=====\n\n* a\n* b\n\n.. autoclass:: pkg.A\n\nSub\n---\n\n:ref:`x`\n";
        let converter = Converter::default();
        let first = converter.convert_str(input, "a.rst");
        let second = converter.convert_str(input, "a.rst");
        assert_eq!(first, second);
    }

    #[test]
    fn test_preserve_references_off() {
        let converter = Converter::new(ConvertOptions {
            preserve_references: false,
        });
        let result = converter.convert_str("Read :doc:`intro`.\n", "x.rst");
        assert_eq!(result.markdown, "# Introduction\n\nRead intro.\n");
    }

    #[test]
    fn test_custom_preprocessor() {
        let converter = Converter::default().with_preprocessor(Preprocessor::new());
        let result = converter.convert_str(".. note::\n   Raw.\n", "x.rst");
        assert_eq!(result.markdown, "# Introduction\n\n.. note::\n   Raw.\n");
    }
}
