//! Body text rendering.
//!
//! Literal blocks are extracted first so list and inline rewrites never see
//! code. Remaining prose lines get list markers normalized, then inline
//! substitutions.

use std::sync::LazyLock;

use regex::Regex;

use super::inline::render_inline;
use crate::input::{indent_of, is_blank};
use crate::literal::opens_literal;

/// `* item`, `+ item`, `• item`, ...
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*+•‣⁃-][ \t]+(\S.*)$").unwrap());

/// `1. item`, `1) item`, `(1) item`, `#. item`
static ENUMERATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:(\d+)[.)]|\((\d+)\)|#[.)])[ \t]+(\S.*)$").unwrap()
});

/// Render a raw text body to Markdown.
///
/// Leading blank lines and trailing whitespace are removed.
pub(crate) fn render_text(text: &str, preserve_references: bool) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        if opens_literal(line)
            && let Some((code, next)) = literal_body(&lines, idx)
        {
            let indent = " ".repeat(indent_of(line));
            if let Some(lead) = literal_lead(line) {
                out.push(render_inline(&lead, preserve_references));
            }
            if out.last().is_some_and(|l| !is_blank(l)) {
                out.push(String::new());
            }
            let fence = fence_for(&code);
            out.push(format!("{indent}{fence}"));
            out.extend(code.iter().map(|l| {
                if l.is_empty() {
                    String::new()
                } else {
                    format!("{indent}{l}")
                }
            }));
            out.push(format!("{indent}{fence}"));
            if lines.get(next).is_some_and(|l| !is_blank(l)) {
                out.push(String::new());
            }
            idx = next;
            continue;
        }

        out.push(render_inline(&normalize_list_marker(line), preserve_references));
        idx += 1;
    }

    trim_blank_lines(&out)
}

/// Dedented body of the literal block opened at `start`.
///
/// The block needs a blank separator line, then lines indented deeper than
/// the opener. Returns the body and the index of the first line after it.
fn literal_body(lines: &[&str], start: usize) -> Option<(Vec<String>, usize)> {
    let base = indent_of(lines[start]);
    let mut idx = start + 1;
    if !lines.get(idx).is_some_and(|l| is_blank(l)) {
        return None;
    }
    while lines.get(idx).is_some_and(|l| is_blank(l)) {
        idx += 1;
    }

    let first = idx;
    let mut end = idx;
    while let Some(line) = lines.get(idx) {
        if !is_blank(line) {
            if indent_of(line) <= base {
                break;
            }
            end = idx + 1;
        }
        idx += 1;
    }
    if end == first {
        return None;
    }

    let block = &lines[first..end];
    let dedent = block
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_of(l))
        .min()
        .unwrap_or(0);
    let code = block
        .iter()
        .map(|l| {
            if is_blank(l) {
                String::new()
            } else {
                l[dedent..].trim_end().to_owned()
            }
        })
        .collect();
    Some((code, end))
}

/// Paragraph text of a literal block opener.
///
/// `::` alone disappears, `text ::` loses the marker and `text::` keeps a
/// single colon.
fn literal_lead(line: &str) -> Option<String> {
    let indent = &line[..indent_of(line)];
    let text = line.trim().strip_suffix("::")?;
    if text.is_empty() {
        None
    } else if text.ends_with(char::is_whitespace) {
        Some(format!("{indent}{}", text.trim_end()))
    } else {
        Some(format!("{indent}{text}:"))
    }
}

/// Fence longer than any backtick run opening a code line.
pub(crate) fn fence_for(code: &[String]) -> String {
    let longest = code
        .iter()
        .map(|l| l.trim_start().chars().take_while(|&c| c == '`').count())
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Normalize bullet and enumerated list markers.
fn normalize_list_marker(line: &str) -> String {
    if let Some(caps) = BULLET.captures(line) {
        return format!("{}- {}", &caps[1], &caps[2]);
    }
    if let Some(caps) = ENUMERATED.captures(line) {
        let number = caps.get(2).or_else(|| caps.get(3)).map_or("1", |m| m.as_str());
        return format!("{}{number}. {}", &caps[1], &caps[4]);
    }
    line.to_owned()
}

fn trim_blank_lines(lines: &[String]) -> String {
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    lines[start..].join("\n").trim_end().to_owned()
}
