//! Directive block extraction.
//!
//! Greedy, non-recursive block scanner: nested directive markup inside a body
//! is kept as raw text.

use std::collections::BTreeMap;

use super::parser::{parse_open, parse_option};
use crate::Directive;
use crate::input::{indent_of, is_blank};

/// Extract the directive whose marker is at `start`.
///
/// Returns the directive and the index of the first line after the block,
/// or `None` if `lines[start]` is not a directive marker.
///
/// The block is parsed in order: marker line with optional argument, option
/// lines, one optional blank separator, then the body. The indentation of
/// the first body line is the block's indent unit; the body ends at the
/// first non-blank line indented less than that unit.
///
/// ```
/// use rstdoc_convert::extract_directive;
///
/// let lines = [".. code-block:: rust", "   :caption: Demo", "", "   fn main() {}", "", "Text"];
/// let (directive, next) = extract_directive(&lines, 0).unwrap();
/// assert_eq!(directive.name, "code-block");
/// assert_eq!(directive.arguments, vec!["rust"]);
/// assert_eq!(directive.option("caption"), Some("Demo"));
/// assert_eq!(directive.content, vec!["fn main() {}"]);
/// assert_eq!(next, 4);
/// ```
#[must_use]
pub fn extract_directive(lines: &[&str], start: usize) -> Option<(Directive, usize)> {
    let open = parse_open(lines.get(start)?)?;
    let base = open.indent;

    let mut options = BTreeMap::new();
    let mut idx = start + 1;
    while let Some(line) = lines.get(idx) {
        if indent_of(line) <= base || is_blank(line) {
            break;
        }
        let Some((key, value)) = parse_option(line) else {
            break;
        };
        options.insert(key.to_owned(), value.to_owned());
        idx += 1;
    }
    let mut end = idx;

    if lines.get(idx).is_some_and(|l| is_blank(l)) {
        idx += 1;
    }

    let mut content = Vec::new();
    let unit = lines[idx..]
        .iter()
        .find(|l| !is_blank(l))
        .map(|l| indent_of(l))
        .filter(|&indent| indent > base);

    if let Some(unit) = unit {
        while let Some(line) = lines.get(idx) {
            if is_blank(line) {
                content.push(String::new());
            } else if indent_of(line) >= unit {
                content.push(line[unit..].to_owned());
                end = idx + 1;
            } else {
                break;
            }
            idx += 1;
        }
        while content.last().is_some_and(String::is_empty) {
            content.pop();
        }
    }

    let arguments = if open.argument.is_empty() {
        Vec::new()
    } else {
        vec![open.argument.to_owned()]
    };

    let directive = Directive {
        name: open.name.to_owned(),
        arguments,
        options,
        content,
        line: start + 1,
        raw: lines[start..end].join("\n"),
    };
    Some((directive, end))
}
