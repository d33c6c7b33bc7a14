//! Document-wide cleanup rewrites.
//!
//! Every rewrite is idempotent and skips fenced code. Order:
//!
//! 1. heading depth clamp (structure)
//! 2. triple emphasis and self-referential links (redundancy)
//! 3. link stripping when references are not preserved
//! 4. empty heading removal (structure)
//! 5. blank line collapse (structure)

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::OptimizeOptions;
use crate::fence::code_mask;
use crate::heading::parse_heading;

/// Deepest heading kept by the clamp.
pub(crate) const MAX_DEPTH: usize = 4;

static TRIPLE_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*([^*\n]+?)\*\*\*").unwrap());

static TRIPLE_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"___([^_\n]+?)___").unwrap());

/// Inline link or image: `[label](target)` / `![alt](src)`.
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[([^\[\]\n]+)\]\(([^()\s]+)\)").unwrap());

/// Apply the cleanup rewrites selected by `options`.
pub(crate) fn cleanup(markdown: &str, options: &OptimizeOptions) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let code = code_mask(&lines);

    let mut rewritten: Vec<(String, bool)> = lines
        .iter()
        .zip(&code)
        .map(|(line, &is_code)| {
            if is_code {
                ((*line).to_owned(), true)
            } else {
                (rewrite_line(line, options), false)
            }
        })
        .collect();

    if options.simplify_structure {
        rewritten = remove_empty_headings(rewritten);
        rewritten = collapse_blank_lines(rewritten);
    }

    let mut output = rewritten
        .into_iter()
        .map(|(line, _)| line)
        .collect::<Vec<_>>()
        .join("\n");
    if markdown.ends_with('\n') && !output.is_empty() {
        output.push('\n');
    }
    output
}

fn rewrite_line(line: &str, options: &OptimizeOptions) -> String {
    let mut line = if options.simplify_structure {
        clamp_heading(line)
    } else {
        line.to_owned()
    };

    if options.remove_redundancy {
        line = collapse_emphasis(line, &TRIPLE_STAR, "**$1**");
        line = collapse_emphasis(line, &TRIPLE_UNDERSCORE, "__$1__");
    }

    if (options.remove_redundancy || !options.preserve_references) && line.contains("](") {
        line = LINK
            .replace_all(&line, |caps: &Captures| {
                let is_image = !caps[1].is_empty();
                let label = &caps[2];
                let target = &caps[3];
                let self_link = options.remove_redundancy && label == target;
                if !is_image && (self_link || !options.preserve_references) {
                    label.to_owned()
                } else {
                    caps[0].to_owned()
                }
            })
            .into_owned();
    }

    line
}

/// Rewrite until no match is left.
///
/// A run of four or more markers loses one level per replacement.
fn collapse_emphasis(mut line: String, pattern: &Regex, replacement: &str) -> String {
    loop {
        let next = match pattern.replace_all(&line, replacement) {
            Cow::Borrowed(_) => return line,
            Cow::Owned(next) => next,
        };
        line = next;
    }
}

fn clamp_heading(line: &str) -> String {
    match parse_heading(line) {
        Some(heading) if heading.depth > MAX_DEPTH => {
            format!("{} {}", "#".repeat(MAX_DEPTH), heading.text)
        }
        _ => line.to_owned(),
    }
}

/// What follows a line, looking forward past blank lines.
#[derive(Clone, Copy)]
enum Next {
    End,
    Body,
    Heading,
}

/// Drop headings with no body text of their own.
///
/// A heading is empty when the next non-blank line is another heading, of
/// any depth, or the end of input. Scans backwards so a chain of empty
/// headings collapses in one pass.
fn remove_empty_headings(lines: Vec<(String, bool)>) -> Vec<(String, bool)> {
    let mut next = Next::End;
    let mut kept = Vec::with_capacity(lines.len());

    for (line, is_code) in lines.into_iter().rev() {
        if is_code {
            next = Next::Body;
        } else if let Some(heading) = parse_heading(&line) {
            if matches!(next, Next::End | Next::Heading) {
                tracing::trace!(heading = heading.text, "Dropping empty heading");
                continue;
            }
            next = Next::Heading;
        } else if !line.trim().is_empty() {
            next = Next::Body;
        }
        kept.push((line, is_code));
    }

    kept.reverse();
    kept
}

/// Collapse runs of blank lines to one and drop leading blank lines.
fn collapse_blank_lines(lines: Vec<(String, bool)>) -> Vec<(String, bool)> {
    let mut out: Vec<(String, bool)> = Vec::with_capacity(lines.len());
    for (line, is_code) in lines {
        let blank = !is_code && line.trim().is_empty();
        if blank {
            if out.last().is_none_or(|(prev, prev_code)| !prev_code && prev.is_empty()) {
                continue;
            }
            out.push((String::new(), false));
        } else {
            out.push((line, is_code));
        }
    }
    while out.last().is_some_and(|(line, is_code)| !is_code && line.is_empty()) {
        out.pop();
    }
    out
}
