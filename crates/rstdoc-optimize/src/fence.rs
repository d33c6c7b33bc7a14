//! Code fence tracking.
//!
//! Fenced code is opaque: line rewrites, heading detection and paragraph
//! splitting all skip it.

/// Tracks code fence state during line-by-line processing.
///
/// Fences use backticks or tildes (three or more). The closing fence must
/// use the same character and be at least as long as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character used for the current fence (backtick or tilde).
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Update fence state with the next line.
    ///
    /// Returns `true` if the line is code: a fence marker or a line inside
    /// a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
            }
            return true;
        }

        if let Some((ch, len)) = detect_fence(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
            return true;
        }
        false
    }
}

/// Code flag for every line.
pub(crate) fn code_mask(lines: &[&str]) -> Vec<bool> {
    let mut tracker = FenceTracker::new();
    lines.iter().map(|line| tracker.update(line)).collect()
}

fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

/// Same character, at least as long, nothing but whitespace after.
fn is_closing_fence(trimmed: &str, expected: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected) {
        return false;
    }
    let count = trimmed.chars().take_while(|&c| c == expected).count();
    count >= min_len && trimmed[count..].chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let lines = ["text", "```rust", "# not a heading", "```", "after"];
        assert_eq!(code_mask(&lines), vec![false, true, true, true, false]);
    }

    #[test]
    fn test_tilde_fence() {
        let lines = ["~~~", "code", "~~~"];
        assert_eq!(code_mask(&lines), vec![true, true, true]);
    }

    #[test]
    fn test_shorter_fence_does_not_close() {
        let lines = ["````", "```", "still code", "````", "text"];
        assert_eq!(code_mask(&lines), vec![true, true, true, true, false]);
    }

    #[test]
    fn test_mixed_fence_chars() {
        let lines = ["```", "~~~", "```", "text"];
        assert_eq!(code_mask(&lines), vec![true, true, true, false]);
    }

    #[test]
    fn test_closing_fence_with_info_does_not_close() {
        let lines = ["```", "```python", "```", "x"];
        assert_eq!(code_mask(&lines), vec![true, true, true, false]);
    }

    #[test]
    fn test_indented_fence() {
        let lines = ["  ```", "  code", "  ```", "text"];
        assert_eq!(code_mask(&lines), vec![true, true, true, false]);
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let lines = ["```", "a", "b"];
        assert_eq!(code_mask(&lines), vec![true, true, true]);
    }

    #[test]
    fn test_two_backticks_not_fence() {
        let lines = ["``inline``", "text"];
        assert_eq!(code_mask(&lines), vec![false, false]);
    }
}
