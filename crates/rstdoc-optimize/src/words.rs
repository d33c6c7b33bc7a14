/// Count whitespace-separated tokens.
///
/// ```
/// use rstdoc_optimize::word_count;
///
/// assert_eq!(word_count("  one two\n\nthree  "), 3);
/// assert_eq!(word_count(""), 0);
/// ```
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
