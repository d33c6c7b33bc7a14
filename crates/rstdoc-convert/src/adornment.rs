//! Section header recognition.
//!
//! A header is a non-indented text line followed by an underline made of a
//! single repeated punctuation character, optionally preceded by an
//! identical overline.

use crate::input::is_blank;

/// Underline character to level table, in priority order.
pub const UNDERLINE_LEVELS: [(char, u8); 6] = [
    ('=', 1),
    ('-', 2),
    ('~', 3),
    ('^', 4),
    ('"', 5),
    ('\'', 6),
];

/// Level assigned to adornment characters missing from [`UNDERLINE_LEVELS`].
///
/// Unrelated heading styles alias to this level. Downstream consumers may
/// rely on it, so it is kept as is.
pub const FALLBACK_LEVEL: u8 = 2;

/// Characters accepted as adornment.
const ADORNMENT_CHARS: &str = "=-~^\"'`#*+:._<>";

/// Minimum underline length for titles longer than the underline.
const MIN_UNDERLINE: usize = 3;

/// Map an underline character to a nesting level.
///
/// ```
/// use rstdoc_convert::level_for;
///
/// assert_eq!(level_for('='), 1);
/// assert_eq!(level_for('-'), 2);
/// assert_eq!(level_for('~'), 3);
/// assert_eq!(level_for('*'), 2);
/// ```
#[must_use]
pub fn level_for(ch: char) -> u8 {
    UNDERLINE_LEVELS
        .iter()
        .find(|(c, _)| *c == ch)
        .map_or(FALLBACK_LEVEL, |(_, level)| *level)
}

/// Recognized header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Header {
    pub title: String,
    pub level: u8,
    /// Number of source lines making up the header.
    pub lines: usize,
}

/// Detect a header starting at `idx`.
pub(crate) fn detect_header(lines: &[&str], idx: usize) -> Option<Header> {
    let line = *lines.get(idx)?;

    if let Some(ch) = adornment_char(line) {
        // Overline + title + matching underline
        let title = lines.get(idx + 1)?.trim();
        let under = lines.get(idx + 2)?;
        if title.is_empty() || adornment_char(title).is_some() {
            return None;
        }
        if adornment_char(under) == Some(ch) && long_enough(under, title) {
            return Some(Header {
                title: title.to_owned(),
                level: level_for(ch),
                lines: 3,
            });
        }
        return None;
    }

    if !is_title_line(line) {
        return None;
    }
    let under = lines.get(idx + 1)?;
    let ch = adornment_char(under)?;
    if !long_enough(under, line.trim()) {
        return None;
    }

    Some(Header {
        title: line.trim().to_owned(),
        level: level_for(ch),
        lines: 2,
    })
}

/// Return the repeated character if the line is an adornment line.
fn adornment_char(line: &str) -> Option<char> {
    if line.starts_with(' ') {
        return None;
    }
    let trimmed = line.trim_end();
    let first = trimmed.chars().next()?;
    if !ADORNMENT_CHARS.contains(first) {
        return None;
    }
    trimmed.chars().all(|c| c == first).then_some(first)
}

fn is_title_line(line: &str) -> bool {
    !is_blank(line) && !line.starts_with(' ') && !line.starts_with("..")
}

fn long_enough(underline: &str, title: &str) -> bool {
    let len = underline.trim_end().chars().count();
    len >= 2 && (len >= MIN_UNDERLINE || len >= title.chars().count())
}
