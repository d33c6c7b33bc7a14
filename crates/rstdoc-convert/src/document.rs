//! Document tree produced by the structural parser.

use std::collections::BTreeMap;

/// Parsed markup document.
///
/// Built by [`parse`](crate::parse) and consumed once by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document {
    /// Text of the first level-1 header, if any.
    pub title: Option<String>,
    /// Body between the title header and the next section header.
    pub lead: Body,
    /// Sections in source order.
    pub sections: Vec<Section>,
    /// Structured directives, referenced from bodies through anchors.
    pub directives: Vec<Directive>,
}

impl Document {
    /// Heading depth offset applied to sections when a title is present.
    #[must_use]
    pub fn depth_offset(&self) -> u8 {
        u8::from(self.title.is_some())
    }
}

/// A section opened by a recognized header.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Section {
    /// Header text.
    pub title: String,
    /// Nesting level derived from the underline character (1-6).
    pub level: u8,
    /// Raw section content.
    pub content: Body,
}

impl Section {
    pub(crate) fn new(title: impl Into<String>, level: u8) -> Self {
        Self {
            title: title.into(),
            level,
            content: Body::default(),
        }
    }
}

/// Raw text body with the positions of directives extracted from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Body {
    /// Source lines, each terminated by a newline.
    pub text: String,
    /// Directive positions, ordered by offset.
    pub anchors: Vec<DirectiveAnchor>,
}

impl Body {
    /// Check whether the body holds neither text nor directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty() && self.text.trim().is_empty()
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub(crate) fn push_anchor(&mut self, directive: usize) {
        self.anchors.push(DirectiveAnchor {
            offset: self.text.len(),
            directive,
        });
    }
}

/// Position of a directive inside a [`Body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DirectiveAnchor {
    /// Byte offset into [`Body::text`] where the directive appeared.
    pub offset: usize,
    /// Index into [`Document::directives`].
    pub directive: usize,
}

/// Block directive captured by the extractor.
///
/// ```text
/// .. code-block:: python
///    :caption: Example
///
///    print("hi")
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Directive {
    /// Directive name (`code-block`, `autoclass`, ...).
    pub name: String,
    /// Free text following `::` on the directive line.
    pub arguments: Vec<String>,
    /// `:key: value` option lines.
    pub options: BTreeMap<String, String>,
    /// Body lines with the block indent removed.
    pub content: Vec<String>,
    /// 1-indexed source line of the directive marker.
    pub line: usize,
    /// Original markup of the whole block.
    pub raw: String,
}

impl Directive {
    /// First argument, if any.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Option value by name.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Body joined with newlines.
    #[must_use]
    pub fn body(&self) -> String {
        self.content.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_anchor_records_current_offset() {
        let mut body = Body::default();
        body.push_line("first");
        body.push_anchor(0);
        body.push_line("second");

        assert_eq!(body.text, "first\nsecond\n");
        assert_eq!(
            body.anchors,
            vec![DirectiveAnchor {
                offset: 6,
                directive: 0
            }]
        );
    }

    #[test]
    fn test_body_is_empty() {
        let mut body = Body::default();
        assert!(body.is_empty());
        body.push_line("   ");
        assert!(body.is_empty());
        body.push_anchor(3);
        assert!(!body.is_empty());
    }

    #[test]
    fn test_depth_offset() {
        let mut doc = Document::default();
        assert_eq!(doc.depth_offset(), 0);
        doc.title = Some("Guide".to_owned());
        assert_eq!(doc.depth_offset(), 1);
    }
}
