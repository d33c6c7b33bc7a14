//! Hyperlink target and comment rewrite rule.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{RewriteRule, join_lines};
use crate::directive::parse_open;
use crate::input::{indent_of, is_blank};
use crate::literal::LiteralTracker;

/// `.. _name: url` or ``.. _`quoted name`: url``
static TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\.\.\s+_(`[^`]+`|[^:`]+):(?:\s+(\S.*))?\s*$").unwrap()
});

/// `` `name`_ `` reference without an embedded URL.
static NAMED_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`<>]+)`_").unwrap());

/// Removes hyperlink targets and comments.
///
/// Targets (`.. _name:`) and comments are dropped together with their
/// indented continuation lines. Footnotes (`.. [1]`), citations and
/// substitution definitions other than `replace::` are content and pass
/// through unchanged. Targets pointing at a URL are remembered first, and matching
/// `` `name`_ `` references are rewritten to `` `name <url>`_ `` so the
/// renderer turns them into links.
///
/// ```
/// use rstdoc_convert::preprocess::{RewriteRule, TargetRule};
///
/// let input = "Use `Rust`_.\n\n.. _Rust: https://rust-lang.org\n";
/// assert_eq!(TargetRule.rewrite(input), "Use `Rust <https://rust-lang.org>`_.\n\n");
/// ```
pub struct TargetRule;

impl RewriteRule for TargetRule {
    fn name(&self) -> &'static str {
        "target"
    }

    fn rewrite(&self, input: &str) -> String {
        if !input.contains("..") {
            return input.to_owned();
        }

        let lines: Vec<&str> = input.lines().collect();
        let urls = collect_urls(&lines);

        let mut out = Vec::with_capacity(lines.len());
        let mut literal = LiteralTracker::new();
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            if literal.update(line) {
                out.push(line.to_owned());
                idx += 1;
                continue;
            }

            if is_removable_markup(line) {
                let base = indent_of(line);
                idx += 1;
                // Continuation lines, stopping before trailing blanks
                let mut end = idx;
                while let Some(next) = lines.get(end) {
                    if !is_blank(next) && indent_of(next) <= base {
                        break;
                    }
                    end += 1;
                }
                while end > idx && is_blank(lines[end - 1]) {
                    end -= 1;
                }
                idx = end;
                continue;
            }

            out.push(resolve_references(line, &urls));
            idx += 1;
        }

        join_lines(&out, input.ends_with('\n'))
    }
}

/// A hyperlink target or a comment.
fn is_removable_markup(line: &str) -> bool {
    TARGET.is_match(line) || is_comment(line)
}

/// Explicit markup that is neither a directive nor a footnote, citation,
/// target or substitution definition.
fn is_comment(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("..") else {
        return false;
    };
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return false;
    }
    !rest.trim_start().starts_with(['[', '|', '_']) && parse_open(line).is_none()
}

fn collect_urls(lines: &[&str]) -> HashMap<String, String> {
    lines
        .iter()
        .filter_map(|line| TARGET.captures(line))
        .filter_map(|caps| {
            let url = caps.get(2)?.as_str().trim();
            let is_url = url.contains("://") || url.starts_with("mailto:");
            is_url.then(|| (normalize_name(&caps[1]), url.to_owned()))
        })
        .collect()
}

fn resolve_references(line: &str, urls: &HashMap<String, String>) -> String {
    if urls.is_empty() {
        return line.to_owned();
    }
    NAMED_REFERENCE
        .replace_all(line, |caps: &Captures| match urls.get(&normalize_name(&caps[1])) {
            Some(url) => format!("`{} <{url}>`_", &caps[1]),
            None => caps[0].to_owned(),
        })
        .into_owned()
}

/// Reference names are case-insensitive with collapsed whitespace.
fn normalize_name(name: &str) -> String {
    name.trim_matches('`')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
