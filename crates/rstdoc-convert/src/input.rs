//! Input decoding and normalization.

use crate::ParseError;

/// Tab stop width used when expanding tabs.
const TAB_WIDTH: usize = 8;

/// Decode raw bytes into normalized markup text.
pub(crate) fn decode(bytes: &[u8], document_id: &str) -> Result<String, ParseError> {
    if let Some(offset) = bytes.iter().position(|&b| b == 0) {
        return Err(ParseError::Binary {
            document_id: document_id.to_owned(),
            offset,
        });
    }

    let text = std::str::from_utf8(bytes).map_err(|e| ParseError::NotUtf8 {
        document_id: document_id.to_owned(),
        valid_up_to: e.valid_up_to(),
    })?;

    Ok(normalize(text))
}

/// Strip a byte order mark, unify line endings and expand tabs.
pub(crate) fn normalize(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let text = if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text.to_owned()
    };

    if text.contains('\t') {
        text.split('\n')
            .map(expand_tabs)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        text
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Number of leading spaces.
pub(crate) fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Check whether a line contains only whitespace.
pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
