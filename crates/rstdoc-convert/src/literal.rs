//! Literal block tracking for line-by-line scanners.
//!
//! A paragraph ending in `::` introduces an indented literal block. Directive
//! and header markup inside such a block is plain text and must be skipped.
//! Bodies of code directives (`code-block`, `math`, ...) are treated the same
//! way so rewrite rules leave them alone.

use crate::directive::parse_open;
use crate::input::{indent_of, is_blank};

/// Directives whose body is verbatim text.
const VERBATIM_DIRECTIVES: [&str; 4] = ["code", "code-block", "sourcecode", "math"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    /// Saw a `::` line at the given indent, waiting for the indented body.
    Expecting(usize),
    /// Inside a body indented deeper than the given indent.
    Inside(usize),
}

/// Tracks literal block state during line-by-line processing.
#[derive(Debug)]
pub(crate) struct LiteralTracker {
    state: State,
}

impl Default for LiteralTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Outside,
        }
    }

    /// Update state with the next line.
    ///
    /// Returns `true` if the line belongs to a literal block body.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let blank = is_blank(line);
        let indent = indent_of(line);

        match self.state {
            State::Expecting(base) => {
                if blank {
                    return false;
                }
                if indent > base {
                    self.state = State::Inside(base);
                    return true;
                }
                self.state = State::Outside;
            }
            State::Inside(base) => {
                if blank || indent > base {
                    return true;
                }
                self.state = State::Outside;
            }
            State::Outside => {}
        }

        if opens_literal(line) || opens_verbatim_directive(line) {
            self.state = State::Expecting(indent);
        }
        false
    }

    /// Forget any pending or open literal block.
    pub(crate) fn reset(&mut self) {
        self.state = State::Outside;
    }
}

/// Check if a line introduces a literal block.
///
/// Explicit markup (`.. name::`) ends in `::` too but is a directive.
pub(crate) fn opens_literal(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.ends_with("::") && !trimmed.starts_with("..")
}

fn opens_verbatim_directive(line: &str) -> bool {
    parse_open(line).is_some_and(|open| VERBATIM_DIRECTIVES.contains(&open.name))
}
