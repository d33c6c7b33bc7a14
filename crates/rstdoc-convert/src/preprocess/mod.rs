//! Text rewrite rules applied before structural parsing.
//!
//! Some constructs are inlined rather than attached to the document tree:
//! admonitions become blockquotes, `toctree` blocks become comment
//! placeholders, substitutions are expanded and comments are dropped.
//! Each construct is handled by an independent [`RewriteRule`]; the
//! [`Preprocessor`] applies them in a fixed order.
//!
//! # Standard rules
//!
//! | Order | Rule                 | Match                                   | Replacement                        |
//! |-------|----------------------|-----------------------------------------|------------------------------------|
//! | 1     | [`SubstitutionRule`] | `.. \|name\| replace:: text` + `\|name\|` | definition removed, text inlined   |
//! | 2     | [`TargetRule`]       | `.. _name: url`, `..` comments          | removed; `` `name`_ `` gets the url |
//! | 3     | [`AdmonitionRule`]   | `.. note::` and friends + body          | `> ℹ️ **Note:** body`              |
//! | 4     | [`ToctreeRule`]      | `.. toctree::` + entries                | `<!-- toctree: a, b -->`           |
//!
//! Rules never touch literal blocks (`::` paragraphs).

mod admonition;
mod substitution;
mod target;
mod toctree;

pub use admonition::AdmonitionRule;
pub use substitution::SubstitutionRule;
pub use target::TargetRule;
pub use toctree::ToctreeRule;

use crate::Directive;
use crate::directive::{extract_directive, parse_open};
use crate::input::is_blank;
use crate::literal::LiteralTracker;

/// An independent text-to-text rewrite.
pub trait RewriteRule: Send + Sync {
    /// Rule name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite the whole input.
    fn rewrite(&self, input: &str) -> String;
}

/// Ordered list of rewrite rules.
///
/// # Example
///
/// ```
/// use rstdoc_convert::preprocess::Preprocessor;
///
/// let output = Preprocessor::default().process(".. note::\n   Remember this.\n");
/// assert_eq!(output, "> ℹ️ **Note:** Remember this.\n");
/// ```
pub struct Preprocessor {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
            .with_rule(SubstitutionRule)
            .with_rule(TargetRule)
            .with_rule(AdmonitionRule)
            .with_rule(ToctreeRule)
    }
}

impl Preprocessor {
    /// Create a preprocessor without rules.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; rules run in registration order.
    #[must_use]
    pub fn with_rule<R: RewriteRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the registered rules, in order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Apply every rule in order.
    #[must_use]
    pub fn process(&self, input: &str) -> String {
        self.rules.iter().fold(input.to_owned(), |text, rule| {
            tracing::trace!(rule = rule.name(), "Applying rewrite rule");
            rule.rewrite(&text)
        })
    }
}

/// Replace directive blocks accepted by `accept` with rendered lines.
///
/// `render` receives the directive and the marker's indentation. A blank
/// line is inserted after the replacement when the block is directly
/// followed by text.
pub(crate) fn rewrite_directives<A, R>(input: &str, accept: A, mut render: R) -> String
where
    A: Fn(&str) -> bool,
    R: FnMut(&Directive, usize) -> Vec<String>,
{
    let lines: Vec<&str> = input.lines().collect();
    let mut out = Vec::with_capacity(lines.len());
    let mut literal = LiteralTracker::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx];
        if !literal.update(line)
            && let Some(open) = parse_open(line)
            && accept(open.name)
            && let Some((directive, next)) = extract_directive(&lines, idx)
        {
            out.extend(render(&directive, open.indent));
            if lines.get(next).is_some_and(|l| !is_blank(l)) {
                out.push(String::new());
            }
            idx = next;
            continue;
        }
        out.push(line.to_owned());
        idx += 1;
    }

    join_lines(&out, input.ends_with('\n'))
}

/// Join lines, preserving the input's trailing newline.
pub(crate) fn join_lines(lines: &[String], trailing_newline: bool) -> String {
    let mut output = lines.join("\n");
    if trailing_newline && !output.is_empty() {
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl RewriteRule for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }

        fn rewrite(&self, input: &str) -> String {
            input.to_uppercase()
        }
    }

    #[test]
    fn test_standard_rule_order() {
        assert_eq!(
            Preprocessor::default().rule_names(),
            vec!["substitution", "target", "admonition", "toctree"]
        );
    }

    #[test]
    fn test_custom_rule() {
        let pre = Preprocessor::new().with_rule(Upper);
        assert_eq!(pre.process("abc\n"), "ABC\n");
    }

    #[test]
    fn test_empty_preprocessor_is_identity() {
        let input = ".. note::\n   body\n";
        assert_eq!(Preprocessor::new().process(input), input);
    }

    #[test]
    fn test_rewrite_directives_separates_following_text() {
        let output = rewrite_directives(
            ".. marker::\n   body\nnext\n",
            |name| name == "marker",
            |d, _| vec![format!("[{}]", d.body())],
        );
        assert_eq!(output, "[body]\n\nnext\n");
    }

    #[test]
    fn test_rewrite_directives_skips_literal_blocks() {
        let input = "Example::\n\n    .. marker::\n       body\n";
        let output = rewrite_directives(input, |_| true, |_, _| vec!["X".to_owned()]);
        assert_eq!(output, input);
    }

    #[test]
    fn test_join_lines() {
        let lines = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(join_lines(&lines, true), "a\nb\n");
        assert_eq!(join_lines(&lines, false), "a\nb");
        assert_eq!(join_lines(&[], true), "");
    }
}
