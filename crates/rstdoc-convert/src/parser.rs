//! Structural parser.
//!
//! Single forward pass over the lines of (preprocessed) markup text:
//! recognizes section headers, hands directive blocks to the extractor and
//! collects everything else verbatim into the current body.

use crate::adornment::detect_header;
use crate::directive::{extract_directive, parse_open};
use crate::literal::LiteralTracker;
use crate::{Body, Document, Section};

/// Title of the implicit section holding text before the first header.
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// Where the next content line goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Before any header.
    Introduction,
    /// After the document title, before the next section.
    Lead,
    /// Inside the last section.
    Section,
}

/// Parse markup text into a [`Document`].
///
/// Never fails: unrecognized constructs stay as plain content lines.
///
/// - The first level-1 header becomes the document title and is not added
///   to `sections`.
/// - Every other header opens a new section.
/// - Lines before the first header form an implicit level-1 section titled
///   [`INTRODUCTION_TITLE`].
/// - Directive blocks are extracted into `directives` and anchored at their
///   position in the current body.
///
/// # Example
///
/// ```
/// use rstdoc_convert::parse;
///
/// let doc = parse("Guide\n=====\n\nWelcome.\n\nSetup\n-----\n\nRun it.\n");
/// assert_eq!(doc.title.as_deref(), Some("Guide"));
/// assert_eq!(doc.lead.text, "\nWelcome.\n\n");
/// assert_eq!(doc.sections.len(), 1);
/// assert_eq!(doc.sections[0].title, "Setup");
/// assert_eq!(doc.sections[0].level, 2);
/// ```
#[must_use]
pub fn parse(text: &str) -> Document {
    let lines: Vec<&str> = text.lines().collect();
    let mut doc = Document::default();
    let mut intro = Body::default();
    let mut target = Target::Introduction;
    let mut literal = LiteralTracker::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        let in_literal = literal.update(line);

        if !in_literal {
            if let Some(header) = detect_header(&lines, idx) {
                if header.level == 1 && doc.title.is_none() {
                    tracing::trace!(title = %header.title, "Document title");
                    doc.title = Some(header.title);
                    target = Target::Lead;
                } else {
                    doc.sections.push(Section::new(header.title, header.level));
                    target = Target::Section;
                }
                idx += header.lines;
                literal.reset();
                continue;
            }

            if parse_open(line).is_some()
                && let Some((directive, next)) = extract_directive(&lines, idx)
            {
                let index = doc.directives.len();
                tracing::trace!(name = %directive.name, line = directive.line, "Directive");
                body_mut(&mut doc, &mut intro, target).push_anchor(index);
                doc.directives.push(directive);
                idx = next;
                literal.reset();
                continue;
            }
        }

        body_mut(&mut doc, &mut intro, target).push_line(line);
        idx += 1;
    }

    if !intro.is_empty() {
        let mut section = Section::new(INTRODUCTION_TITLE, 1);
        section.content = intro;
        doc.sections.insert(0, section);
    }

    doc
}

fn body_mut<'a>(doc: &'a mut Document, intro: &'a mut Body, target: Target) -> &'a mut Body {
    match target {
        Target::Introduction => intro,
        Target::Lead => &mut doc.lead,
        Target::Section => match doc.sections.last_mut() {
            Some(section) => &mut section.content,
            None => intro,
        },
    }
}
