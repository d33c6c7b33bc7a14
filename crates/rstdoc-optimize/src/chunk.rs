//! Size-bounded chunking.
//!
//! Markdown is split into sections at heading boundaries. Sections are packed
//! greedily into chunks under the word budget; a section larger than the
//! budget is split at paragraph boundaries into numbered parts. A paragraph
//! is never split, so a part holding one oversized paragraph overshoots the
//! budget and is flagged with `overflow`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::fence::code_mask;
use crate::heading::parse_heading;
use crate::word_count;

/// Title of the section holding text before the first heading.
pub const INTRODUCTION_TITLE: &str = "Introduction";

/// A bounded slice of a Markdown document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    /// `chunk-<n>`, numbered from 1 in emission order.
    pub id: String,
    /// Title of the first packed section, or `<section> (Part N)`.
    pub title: String,
    /// Markdown content.
    pub content: String,
    /// Whitespace-separated tokens in `content`.
    pub word_count: usize,
    /// `sections`, `chunkType`, and for parts `partOf`, `part` and `overflow`.
    pub metadata: BTreeMap<String, Value>,
    /// Position and neighbor titles, e.g. `Chunk 2 of 5 | Previous: A | Next: C`.
    ///
    /// Filled only when `add_context_headers` is set; otherwise `None` and
    /// omitted from JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Markdown section: a heading line and everything up to the next heading.
#[derive(Debug)]
struct MarkdownSection {
    title: String,
    content: String,
    words: usize,
}

/// Chunk `markdown` under a `budget` of words per chunk.
pub(crate) fn chunk_markdown(markdown: &str, budget: usize, with_context: bool) -> Vec<ContentChunk> {
    let mut builder = ChunkBuilder::default();
    let mut pending: Vec<MarkdownSection> = Vec::new();
    let mut pending_words = 0;

    for section in split_sections(markdown) {
        if section.words > budget {
            builder.push_sections(std::mem::take(&mut pending));
            pending_words = 0;
            builder.push_parts(&section, budget);
            continue;
        }
        if !pending.is_empty() && pending_words + section.words > budget {
            builder.push_sections(std::mem::take(&mut pending));
            pending_words = 0;
        }
        pending_words += section.words;
        pending.push(section);
    }
    builder.push_sections(pending);

    let mut chunks = builder.chunks;
    if with_context {
        annotate(&mut chunks);
    }
    chunks
}

/// Assigns ids from a per-call counter.
#[derive(Default)]
struct ChunkBuilder {
    chunks: Vec<ContentChunk>,
}

impl ChunkBuilder {
    fn push(&mut self, title: String, content: String, metadata: BTreeMap<String, Value>) {
        self.chunks.push(ContentChunk {
            id: format!("chunk-{}", self.chunks.len() + 1),
            title,
            word_count: word_count(&content),
            content,
            metadata,
            context: None,
        });
    }

    /// One chunk holding whole sections.
    fn push_sections(&mut self, sections: Vec<MarkdownSection>) {
        let Some(first) = sections.first() else {
            return;
        };
        let title = first.title.clone();
        let titles: Vec<Value> = sections.iter().map(|s| json!(s.title)).collect();
        let content = sections
            .into_iter()
            .map(|s| s.content)
            .collect::<Vec<_>>()
            .join("\n\n");

        let metadata = BTreeMap::from([
            ("sections".to_owned(), Value::Array(titles)),
            ("chunkType".to_owned(), json!("sections")),
        ]);
        self.push(title, content, metadata);
    }

    /// Split an oversized section into paragraph-aligned parts.
    fn push_parts(&mut self, section: &MarkdownSection, budget: usize) {
        let mut parts: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut words = 0;

        for paragraph in split_paragraphs(&section.content) {
            let paragraph_words = word_count(&paragraph);
            if !current.is_empty() && words + paragraph_words > budget {
                parts.push(std::mem::take(&mut current));
                words = 0;
            }
            words += paragraph_words;
            current.push(paragraph);
        }
        if !current.is_empty() {
            parts.push(current);
        }

        let total = parts.len();
        for (idx, paragraphs) in parts.into_iter().enumerate() {
            let part = idx + 1;
            let title = if total > 1 {
                format!("{} (Part {part})", section.title)
            } else {
                section.title.clone()
            };
            let content = paragraphs.join("\n\n");

            let mut metadata = BTreeMap::from([
                ("sections".to_owned(), json!([section.title])),
                ("chunkType".to_owned(), json!("section-part")),
                ("partOf".to_owned(), json!(section.title)),
                ("part".to_owned(), json!(part)),
            ]);
            let words = word_count(&content);
            if words > budget {
                tracing::debug!(section = %section.title, part, words, budget, "Paragraph exceeds chunk budget");
                metadata.insert("overflow".to_owned(), Value::Bool(true));
            }
            self.push(title, content, metadata);
        }
    }
}

/// Fill navigational context: ordinal position and neighbor titles.
fn annotate(chunks: &mut [ContentChunk]) {
    let total = chunks.len();
    let titles: Vec<String> = chunks.iter().map(|c| c.title.clone()).collect();

    for (idx, chunk) in chunks.iter_mut().enumerate() {
        let mut context = format!("Chunk {} of {total}", idx + 1);
        if let Some(previous) = idx.checked_sub(1).and_then(|i| titles.get(i)) {
            context.push_str(" | Previous: ");
            context.push_str(previous);
        }
        if let Some(next) = titles.get(idx + 1) {
            context.push_str(" | Next: ");
            context.push_str(next);
        }
        chunk.context = Some(context);
    }
}

fn split_sections(markdown: &str) -> Vec<MarkdownSection> {
    let lines: Vec<&str> = markdown.lines().collect();
    let code = code_mask(&lines);
    let mut sections = Vec::new();
    let mut title = INTRODUCTION_TITLE;
    let mut start = 0;

    for (idx, &line) in lines.iter().enumerate() {
        if code[idx] {
            continue;
        }
        if let Some(heading) = parse_heading(line) {
            push_section(&mut sections, title, &lines[start..idx]);
            title = heading.text;
            start = idx;
        }
    }
    push_section(&mut sections, title, &lines[start..]);
    sections
}

fn push_section(sections: &mut Vec<MarkdownSection>, title: &str, lines: &[&str]) {
    let first = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let content = lines[first..].join("\n").trim_end().to_owned();
    if content.is_empty() {
        return;
    }
    sections.push(MarkdownSection {
        title: title.to_owned(),
        words: word_count(&content),
        content,
    });
}

/// Blank-line separated paragraphs; fenced code stays in one paragraph.
fn split_paragraphs(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();
    let code = code_mask(&lines);
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (idx, &line) in lines.iter().enumerate() {
        if !code[idx] && line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn words(n: usize, word: &str) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn test_sections_packed_under_budget() {
        let md = "# A\n\none two three\n\n# B\n\nfour five\n\n# C\n\nsix seven eight nine\n";
        let chunks = chunk_markdown(md, 10, false);

        // A = 5 words, B = 4, C = 6
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].id, "chunk-1");
        assert_eq!(chunks[0].title, "A");
        assert_eq!(chunks[0].content, "# A\n\none two three\n\n# B\n\nfour five");
        assert_eq!(chunks[0].word_count, 9);
        assert_eq!(chunks[0].metadata["sections"], json!(["A", "B"]));
        assert_eq!(chunks[0].metadata["chunkType"], json!("sections"));
        assert_eq!(chunks[1].id, "chunk-2");
        assert_eq!(chunks[1].title, "C");
        assert_eq!(chunks[1].context, None);
    }

    #[test]
    fn test_oversized_section_split_into_parts() {
        let md = format!(
            "## Big\n\n{}\n\n{}\n\n{}\n",
            words(6, "alpha"),
            words(6, "beta"),
            words(6, "gamma")
        );
        let chunks = chunk_markdown(&md, 10, false);

        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Big (Part 1)", "Big (Part 2)", "Big (Part 3)"]);
        for (idx, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata["partOf"], json!("Big"));
            assert_eq!(chunk.metadata["part"], json!(idx + 1));
            assert_eq!(chunk.metadata["chunkType"], json!("section-part"));
            assert!(chunk.word_count <= 10);
            assert!(!chunk.metadata.contains_key("overflow"));
        }
        assert_eq!(chunks[0].content, format!("## Big\n\n{}", words(6, "alpha")));
    }

    #[test]
    fn test_pending_sections_flushed_before_parts() {
        let md = format!("# Small\n\nfew words\n\n# Big\n\n{}\n\n{}\n", words(8, "x"), words(8, "y"));
        let chunks = chunk_markdown(&md, 10, false);
        let titles: Vec<&str> = chunks.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Small", "Big (Part 1)", "Big (Part 2)"]);
    }

    #[test]
    fn test_single_paragraph_overflow() {
        let md = format!("# Huge\n\n{}\n", words(30, "w"));
        let chunks = chunk_markdown(&md, 10, false);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].title, "Huge (Part 1)");
        assert_eq!(chunks[0].content, "# Huge");
        assert_eq!(chunks[1].word_count, 30);
        assert_eq!(chunks[1].metadata["overflow"], json!(true));
    }

    #[test]
    fn test_code_block_never_split() {
        let code = (0..12).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n\n");
        let md = format!("# Code\n\n```\n{code}\n```\n");
        let chunks = chunk_markdown(&md, 5, false);

        assert_eq!(chunks.len(), 2);
        assert!(chunks[1].content.starts_with("```"));
        assert!(chunks[1].content.ends_with("```"));
        assert_eq!(chunks[1].metadata["overflow"], json!(true));
    }

    #[test]
    fn test_introduction_section() {
        let chunks = chunk_markdown("Preface text.\n\n# Next\n\nBody\n", 100, false);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, INTRODUCTION_TITLE);
        assert_eq!(chunks[0].metadata["sections"], json!(["Introduction", "Next"]));
    }

    #[test]
    fn test_heading_inside_code_is_not_boundary() {
        let md = "# Real\n\n```\n# comment\n```\n";
        let chunks = chunk_markdown(md, 100, false);
        assert_eq!(chunks[0].metadata["sections"], json!(["Real"]));
    }

    #[test]
    fn test_context_annotation() {
        let md = "# A\n\none\n\n# B\n\ntwo\n\n# C\n\nthree\n";
        let chunks = chunk_markdown(md, 3, true);
        let contexts: Vec<&str> = chunks.iter().filter_map(|c| c.context.as_deref()).collect();
        assert_eq!(
            contexts,
            vec![
                "Chunk 1 of 3 | Next: B",
                "Chunk 2 of 3 | Previous: A | Next: C",
                "Chunk 3 of 3 | Previous: B",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(chunk_markdown("", 10, true).is_empty());
        assert!(chunk_markdown("\n\n  \n", 10, true).is_empty());
    }

    #[test]
    fn test_reconstruction_preserves_words() {
        let md = format!(
            "Intro words here\n\n# One\n\n{}\n\n## Two\n\n{}\n\n{}\n\n# Three\n\nend\n",
            words(4, "a"),
            words(7, "b"),
            words(7, "c")
        );
        let chunks = chunk_markdown(&md, 9, false);
        let joined = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        assert_eq!(word_count(&joined), word_count(&md));
        assert_eq!(joined, md.trim_end());
    }

    #[test]
    fn test_serializes_camel_case() {
        let chunks = chunk_markdown("# A\n\ntext\n", 10, true);
        let json = serde_json::to_value(&chunks[0]).unwrap();
        assert_eq!(json["wordCount"], json!(3));
        assert_eq!(json["context"], json!("Chunk 1 of 1"));
        assert_eq!(json["metadata"]["chunkType"], json!("sections"));

        let plain = chunk_markdown("# A\n\ntext\n", 10, false);
        let json = serde_json::to_value(&plain[0]).unwrap();
        assert!(json.get("context").is_none());
    }
}
