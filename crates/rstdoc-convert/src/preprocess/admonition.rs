//! Admonition rewrite rule.

use super::{RewriteRule, rewrite_directives};
use crate::Directive;

/// Admonition name, marker and label.
const ADMONITIONS: [(&str, &str, &str); 10] = [
    ("note", "ℹ️", "Note"),
    ("warning", "⚠️", "Warning"),
    ("tip", "💡", "Tip"),
    ("important", "❗", "Important"),
    ("caution", "⚠️", "Caution"),
    ("danger", "🛑", "Danger"),
    ("attention", "❗", "Attention"),
    ("hint", "💡", "Hint"),
    ("error", "❌", "Error"),
    ("seealso", "🔗", "See also"),
];

/// Marker for `.. admonition:: Custom title`.
const GENERIC_MARKER: &str = "📌";

/// Rewrites admonition directives to blockquotes.
///
/// ```text
/// .. warning:: Mind the gap.        > ⚠️ **Warning:** Mind the gap.
///    Second line.                   > Second line.
/// ```
///
/// The text on the marker line and the body form the quote; the label is
/// bold and the marker icon comes first. `.. admonition:: Title` uses its
/// argument as the label.
pub struct AdmonitionRule;

impl RewriteRule for AdmonitionRule {
    fn name(&self) -> &'static str {
        "admonition"
    }

    fn rewrite(&self, input: &str) -> String {
        rewrite_directives(
            input,
            |name| name == "admonition" || lookup(name).is_some(),
            render,
        )
    }
}

fn lookup(name: &str) -> Option<(&'static str, &'static str)> {
    let name = name.to_ascii_lowercase();
    ADMONITIONS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, icon, label)| (*icon, *label))
}

fn render(directive: &Directive, indent: usize) -> Vec<String> {
    let prefix = " ".repeat(indent);

    let (icon, label, mut text): (&str, &str, Vec<&str>) = match lookup(&directive.name) {
        Some((icon, label)) => {
            let text = directive
                .arguments
                .iter()
                .chain(&directive.content)
                .map(String::as_str)
                .collect();
            (icon, label, text)
        }
        None => (
            GENERIC_MARKER,
            directive.argument().unwrap_or("Note"),
            directive.content.iter().map(String::as_str).collect(),
        ),
    };

    while text.first().is_some_and(|l| l.trim().is_empty()) {
        text.remove(0);
    }

    let Some((first, rest)) = text.split_first() else {
        return vec![format!("{prefix}> {icon} **{label}**")];
    };

    let mut out = vec![format!("{prefix}> {icon} **{label}:** {first}")];
    out.extend(rest.iter().map(|line| {
        if line.trim().is_empty() {
            format!("{prefix}>")
        } else {
            format!("{prefix}> {line}")
        }
    }));
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rewrite(input: &str) -> String {
        AdmonitionRule.rewrite(input)
    }

    #[test]
    fn test_note_body() {
        assert_eq!(
            rewrite(".. note::\n   Remember this.\n"),
            "> ℹ️ **Note:** Remember this.\n"
        );
    }

    #[test]
    fn test_argument_and_body() {
        let input = "Intro\n\n.. warning:: Mind the gap.\n   Second line.\n\n   New paragraph.\nAfter\n";
        let expected = "Intro\n\n> ⚠️ **Warning:** Mind the gap.\n> Second line.\n>\n> New paragraph.\n\nAfter\n";
        assert_eq!(rewrite(input), expected);
    }

    #[test]
    fn test_all_known_admonitions() {
        for (name, icon, label) in ADMONITIONS {
            let output = rewrite(&format!(".. {name}::\n   Body\n"));
            assert_eq!(output, format!("> {icon} **{label}:** Body\n"));
        }
    }

    #[test]
    fn test_empty_admonition() {
        assert_eq!(rewrite(".. tip::\n"), "> 💡 **Tip**\n");
    }

    #[test]
    fn test_generic_admonition_uses_argument_as_label() {
        assert_eq!(
            rewrite(".. admonition:: Custom\n\n   Body text\n"),
            "> 📌 **Custom:** Body text\n"
        );
    }

    #[test]
    fn test_indented_admonition_keeps_indent() {
        let input = "* item\n\n  .. note::\n\n     Nested\n";
        assert_eq!(rewrite(input), "* item\n\n  > ℹ️ **Note:** Nested\n");
    }

    #[test]
    fn test_other_directives_untouched() {
        let input = ".. code-block:: python\n\n   x = 1\n";
        assert_eq!(rewrite(input), input);
    }
}
