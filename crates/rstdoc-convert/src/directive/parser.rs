//! Directive marker parsing.
//!
//! Parses explicit markup of the form `.. name:: argument`.

use crate::input::indent_of;

/// Parsed directive marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirectiveOpen<'a> {
    /// Indentation of the marker line.
    pub indent: usize,
    /// Directive name.
    pub name: &'a str,
    /// Remainder of the line after `::`, trimmed (may be empty).
    pub argument: &'a str,
}

/// Parse a line for a directive marker.
///
/// Returns `None` for comments, targets and substitution definitions.
pub(crate) fn parse_open(line: &str) -> Option<DirectiveOpen<'_>> {
    let indent = indent_of(line);
    let rest = line[indent..].strip_prefix("..")?;

    // Marker must be followed by whitespace
    if !rest.starts_with(' ') {
        return None;
    }
    let rest = rest.trim_start();

    let sep = rest.find("::")?;
    let name = &rest[..sep];
    if !is_valid_directive_name(name) {
        return None;
    }

    let after = &rest[sep + 2..];
    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        return None;
    }

    Some(DirectiveOpen {
        indent,
        name,
        argument: after.trim(),
    })
}

/// Check if a name is a valid directive name.
///
/// Valid names contain alphanumerics, hyphens, underscores, dots, plus signs
/// and single colons (domain prefixes such as `py:function`).
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(':')
        && !name.ends_with(':')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | ':'))
}

/// Parse a `:key: value` option line.
///
/// Returns `(key, value)`; the value may be empty for flag options.
pub(crate) fn parse_option(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix(':')?;
    let end = rest.find(':')?;
    let key = &rest[..end];
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    let value = &rest[end + 1..];
    if !value.is_empty() && !value.starts_with(char::is_whitespace) {
        return None;
    }
    Some((key, value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_with_argument() {
        let open = parse_open(".. code-block:: python").unwrap();
        assert_eq!(open.indent, 0);
        assert_eq!(open.name, "code-block");
        assert_eq!(open.argument, "python");
    }

    #[test]
    fn test_directive_without_argument() {
        let open = parse_open(".. toctree::").unwrap();
        assert_eq!(open.name, "toctree");
        assert_eq!(open.argument, "");
    }

    #[test]
    fn test_indented_directive() {
        let open = parse_open("   .. note:: Inside a list").unwrap();
        assert_eq!(open.indent, 3);
        assert_eq!(open.name, "note");
        assert_eq!(open.argument, "Inside a list");
    }

    #[test]
    fn test_domain_directive() {
        let open = parse_open(".. py:function:: spam(eggs)").unwrap();
        assert_eq!(open.name, "py:function");
        assert_eq!(open.argument, "spam(eggs)");
    }

    #[test]
    fn test_not_directive() {
        assert!(parse_open("regular text").is_none());
        assert!(parse_open("").is_none());
        assert!(parse_open(".. _target:").is_none());
        assert!(parse_open(".. a comment line").is_none());
        assert!(parse_open(".. |name| replace:: text").is_none());
        assert!(parse_open("..note::").is_none());
        assert!(parse_open(".. note::text").is_none());
    }

    #[test]
    fn test_is_valid_directive_name() {
        assert!(is_valid_directive_name("note"));
        assert!(is_valid_directive_name("code-block"));
        assert!(is_valid_directive_name("py:class"));
        assert!(!is_valid_directive_name(""));
        assert!(!is_valid_directive_name(":bad"));
        assert!(!is_valid_directive_name("two words"));
    }

    #[test]
    fn test_parse_option() {
        assert_eq!(parse_option("   :maxdepth: 2"), Some(("maxdepth", "2")));
        assert_eq!(parse_option(":linenos:"), Some(("linenos", "")));
        assert_eq!(
            parse_option(":caption: Some caption"),
            Some(("caption", "Some caption"))
        );
        assert_eq!(parse_option("not an option"), None);
        assert_eq!(parse_option(":doc:`index`"), None);
        assert_eq!(parse_option(": x: y"), None);
    }
}
