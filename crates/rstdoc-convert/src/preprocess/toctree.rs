//! Table-of-contents rewrite rule.

use super::{RewriteRule, rewrite_directives};
use crate::Directive;

/// Rewrites `toctree` blocks to an opaque comment placeholder.
///
/// Options are dropped; entries of the form `Title <target>` keep only the
/// target.
///
/// ```
/// use rstdoc_convert::preprocess::{RewriteRule, ToctreeRule};
///
/// let input = ".. toctree::\n   :maxdepth: 2\n\n   intro\n   Usage <usage/index>\n";
/// assert_eq!(ToctreeRule.rewrite(input), "<!-- toctree: intro, usage/index -->\n");
/// ```
pub struct ToctreeRule;

impl RewriteRule for ToctreeRule {
    fn name(&self) -> &'static str {
        "toctree"
    }

    fn rewrite(&self, input: &str) -> String {
        rewrite_directives(input, |name| name == "toctree", render)
    }
}

fn render(directive: &Directive, indent: usize) -> Vec<String> {
    let entries: Vec<&str> = directive
        .content
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(entry_target)
        .collect();

    let prefix = " ".repeat(indent);
    if entries.is_empty() {
        vec![format!("{prefix}<!-- toctree -->")]
    } else {
        vec![format!("{prefix}<!-- toctree: {} -->", entries.join(", "))]
    }
}

/// Target of a `Title <target>` entry, or the entry itself.
fn entry_target(entry: &str) -> &str {
    entry
        .strip_suffix('>')
        .and_then(|s| s.rfind('<').map(|pos| s[pos + 1..].trim()))
        .unwrap_or(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toctree() {
        assert_eq!(ToctreeRule.rewrite(".. toctree::\n   :hidden:\n"), "<!-- toctree -->\n");
    }

    #[test]
    fn test_toctree_between_paragraphs() {
        let input = "Contents:\n\n.. toctree::\n\n   install\n   api\nMore text\n";
        assert_eq!(
            ToctreeRule.rewrite(input),
            "Contents:\n\n<!-- toctree: install, api -->\n\nMore text\n"
        );
    }

    #[test]
    fn test_entry_target() {
        assert_eq!(entry_target("install"), "install");
        assert_eq!(entry_target("Install guide <guide/install>"), "guide/install");
        assert_eq!(entry_target("self"), "self");
    }
}
