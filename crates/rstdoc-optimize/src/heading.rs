//! ATX heading recognition.

/// A `#`-prefixed heading line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Heading<'a> {
    /// Number of leading `#` characters (1-6).
    pub depth: usize,
    /// Heading text without markers.
    pub text: &'a str,
}

/// Parse a heading line.
///
/// Only unindented headings are recognized; a closing `#` sequence is
/// dropped.
pub(crate) fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let depth = line.bytes().take_while(|&b| b == b'#').count();
    if depth == 0 || depth > 6 {
        return None;
    }

    let rest = &line[depth..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }

    let text = rest.trim();
    let stripped = text.trim_end_matches('#');
    let text = if stripped.is_empty() || stripped.ends_with([' ', '\t']) {
        stripped.trim_end()
    } else {
        text
    };

    Some(Heading { depth, text })
}
