//! Inline markup substitutions.
//!
//! Applied per line, in order: inline literals are extracted first and
//! shielded from the later passes, then roles, then external links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// ``` ``code`` ```
static INLINE_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"``(.+?)``").unwrap());

/// `:name:`text`` or `:domain:name:`text``
static ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([A-Za-z][\w+.-]*(?::[A-Za-z][\w+.-]*)?):`([^`]+)`").unwrap()
});

/// `` `label <url>`_ `` and anonymous `` `label <url>`__ ``
static EXTERNAL_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`<]*?)\s*<([^<>`]+)>`__?").unwrap());

/// Python domain roles rendered as inline code.
const CODE_ROLES: [&str; 9] = [
    "class", "func", "meth", "mod", "attr", "exc", "data", "obj", "const",
];

/// Roles rendered as their plain text.
const TEXT_ROLES: [&str; 7] = [
    "term", "abbr", "guilabel", "file", "command", "program", "kbd",
];

/// Render inline markup of a single line.
pub(crate) fn render_inline(line: &str, preserve_references: bool) -> String {
    if !line.contains('`') {
        return line.to_owned();
    }

    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for m in INLINE_LITERAL.find_iter(line) {
        out.push_str(&render_markup(&line[last..m.start()], preserve_references));
        let inner = &m.as_str()[2..m.as_str().len() - 2];
        out.push_str(&code_span(inner));
        last = m.end();
    }
    out.push_str(&render_markup(&line[last..], preserve_references));
    out
}

fn render_markup(text: &str, preserve_references: bool) -> String {
    if !text.contains('`') {
        return text.to_owned();
    }
    let with_roles = ROLE.replace_all(text, |caps: &Captures| {
        render_role(&caps[1], &caps[2], preserve_references).unwrap_or_else(|| caps[0].to_owned())
    });
    EXTERNAL_LINK
        .replace_all(&with_roles, |caps: &Captures| {
            let url = caps[2].trim();
            let label = caps[1].trim();
            if label.is_empty() {
                format!("[{url}]({url})")
            } else {
                format!("[{label}]({url})")
            }
        })
        .into_owned()
}

/// Render a role, or `None` to keep it unchanged.
fn render_role(name: &str, text: &str, preserve_references: bool) -> Option<String> {
    let (title, target) = split_title(text);

    let rendered = match name {
        "doc" if preserve_references => format!("[{target}]({target}.md)"),
        "ref" if preserve_references => format!("[{}](#{target})", title.unwrap_or(target)),
        "doc" | "ref" => title.unwrap_or(target).to_owned(),
        "math" => format!("${}$", text.trim()),
        _ if TEXT_ROLES.contains(&name) => title.unwrap_or(target).to_owned(),
        _ if CODE_ROLES.contains(&name.strip_prefix("py:").unwrap_or(name)) => {
            code_span(&code_role_text(title, target))
        }
        _ => return None,
    };
    Some(rendered)
}

/// Split `Title <target>` into its parts.
fn split_title(text: &str) -> (Option<&str>, &str) {
    if let Some(inner) = text.trim().strip_suffix('>')
        && let Some(pos) = inner.rfind('<')
    {
        let title = inner[..pos].trim();
        let target = inner[pos + 1..].trim();
        if !target.is_empty() {
            return (Some(title).filter(|t| !t.is_empty()), target);
        }
    }
    (None, text.trim())
}

/// Display text of a code role; `~` keeps only the last component.
fn code_role_text(title: Option<&str>, target: &str) -> String {
    if let Some(title) = title {
        return title.to_owned();
    }
    match target.strip_prefix('~') {
        Some(path) => path.rsplit('.').next().unwrap_or(path).to_owned(),
        None => target.trim_start_matches('!').to_owned(),
    }
}

fn code_span(code: &str) -> String {
    if code.contains('`') {
        format!("`` {code} ``")
    } else {
        format!("`{code}`")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn inline(line: &str) -> String {
        render_inline(line, true)
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(inline("**bold** and *emphasis*"), "**bold** and *emphasis*");
    }

    #[test]
    fn test_inline_literal() {
        assert_eq!(inline("Run ``cargo test`` now"), "Run `cargo test` now");
        assert_eq!(inline("``a`b``"), "`` a`b ``");
    }

    #[test]
    fn test_inline_literal_shields_markup() {
        assert_eq!(inline("``:doc:`x` here``"), "`` :doc:`x` here ``");
    }

    #[test]
    fn test_doc_reference() {
        assert_eq!(inline("See :doc:`Target<label>`."), "See [label](label.md).");
        assert_eq!(inline(":doc:`install`"), "[install](install.md)");
        assert_eq!(render_inline(":doc:`Target <label>`", false), "Target");
        assert_eq!(render_inline(":doc:`install`", false), "install");
    }

    #[test]
    fn test_ref_reference() {
        assert_eq!(inline(":ref:`Setup <setup-section>`"), "[Setup](#setup-section)");
        assert_eq!(inline(":ref:`setup`"), "[setup](#setup)");
        assert_eq!(render_inline(":ref:`Setup <setup-section>`", false), "Setup");
    }

    #[test]
    fn test_code_roles() {
        assert_eq!(inline(":class:`pkg.Widget`"), "`pkg.Widget`");
        assert_eq!(inline(":func:`~pkg.mod.run`"), "`run`");
        assert_eq!(inline(":py:meth:`Widget.draw`"), "`Widget.draw`");
        assert_eq!(inline(":exc:`Custom <pkg.Error>`"), "`Custom`");
    }

    #[test]
    fn test_text_roles() {
        assert_eq!(inline("Press :kbd:`Ctrl+C`"), "Press Ctrl+C");
        assert_eq!(inline(":term:`Widgets <widget>`"), "Widgets");
    }

    #[test]
    fn test_math_role() {
        assert_eq!(inline(":math:`a^2 + b^2`"), "$a^2 + b^2$");
    }

    #[test]
    fn test_unknown_role_unchanged() {
        assert_eq!(inline(":custom:`value`"), ":custom:`value`");
    }

    #[test]
    fn test_external_links() {
        assert_eq!(
            inline("Visit `Rust <https://rust-lang.org>`_ today"),
            "Visit [Rust](https://rust-lang.org) today"
        );
        assert_eq!(
            inline("`anon <https://example.com>`__"),
            "[anon](https://example.com)"
        );
        assert_eq!(
            inline("`<https://example.com>`_"),
            "[https://example.com](https://example.com)"
        );
    }

    #[test]
    fn test_link_and_role_on_one_line() {
        assert_eq!(
            inline(":doc:`guide` and `site <https://x.io>`_"),
            "[guide](guide.md) and [site](https://x.io)"
        );
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("Title <target>"), (Some("Title"), "target"));
        assert_eq!(split_title("target"), (None, "target"));
        assert_eq!(split_title("<target>"), (None, "target"));
        assert_eq!(split_title("a <>"), (None, "a <>"));
    }
}
