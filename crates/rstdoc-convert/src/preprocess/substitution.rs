//! Substitution rewrite rule.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{RewriteRule, join_lines};
use crate::input::{indent_of, is_blank};
use crate::literal::LiteralTracker;

/// `.. |name| replace:: text`
static DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\.\.\s+\|([^|]+)\|\s+replace::\s*(.*)$").unwrap());

/// `|name|`, optionally linked with a trailing `_` or `__`.
static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|([^|\s][^|]*)\|(?:__?)?").unwrap());

/// Expands `replace::` substitution definitions.
///
/// Definitions (and their indented continuation lines) are removed and
/// each `|name|` reference is replaced by the definition text. References
/// without a definition are left unchanged.
///
/// ```
/// use rstdoc_convert::preprocess::{RewriteRule, SubstitutionRule};
///
/// let input = "Welcome to |project|.\n\n.. |project| replace:: Sphinx\n";
/// assert_eq!(SubstitutionRule.rewrite(input), "Welcome to Sphinx.\n\n");
/// ```
pub struct SubstitutionRule;

impl RewriteRule for SubstitutionRule {
    fn name(&self) -> &'static str {
        "substitution"
    }

    fn rewrite(&self, input: &str) -> String {
        if !input.contains("replace::") {
            return input.to_owned();
        }

        let lines: Vec<&str> = input.lines().collect();
        let mut definitions = HashMap::new();
        // Kept lines, flagged when they belong to a literal block
        let mut kept: Vec<(&str, bool)> = Vec::with_capacity(lines.len());
        let mut literal = LiteralTracker::new();
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            if literal.update(line) {
                kept.push((line, true));
                idx += 1;
                continue;
            }
            let Some(caps) = DEFINITION.captures(line) else {
                kept.push((line, false));
                idx += 1;
                continue;
            };

            let base = caps[1].len();
            let mut text = caps[3].trim().to_owned();
            idx += 1;
            while let Some(next) = lines.get(idx) {
                if is_blank(next) || indent_of(next) <= base {
                    break;
                }
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(next.trim());
                idx += 1;
            }
            definitions.insert(normalize_name(&caps[2]), text);
        }

        let out: Vec<String> = kept
            .into_iter()
            .map(|(line, is_literal)| {
                if is_literal {
                    return line.to_owned();
                }
                REFERENCE
                    .replace_all(line, |caps: &Captures| {
                        definitions
                            .get(&normalize_name(&caps[1]))
                            .cloned()
                            .unwrap_or_else(|| caps[0].to_owned())
                    })
                    .into_owned()
            })
            .collect();

        join_lines(&out, input.ends_with('\n'))
    }
}

/// Substitution names are case-insensitive with collapsed whitespace.
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
