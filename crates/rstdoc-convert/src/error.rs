//! Conversion error types.

/// Input that cannot be read as text.
///
/// The only error that aborts a conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Input is not valid UTF-8.
    #[error("{document_id}: input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    NotUtf8 {
        /// Identifier of the failed document.
        document_id: String,
        /// Length of the valid prefix.
        valid_up_to: usize,
    },
    /// Input contains a NUL byte.
    #[error("{document_id}: binary content (NUL byte at offset {offset})")]
    Binary {
        /// Identifier of the failed document.
        document_id: String,
        /// Offset of the first NUL byte.
        offset: usize,
    },
}

/// Recognized directive that cannot be rendered as structured content.
///
/// Reported as a warning; the directive is emitted as its original markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("line {line}: malformed `{name}` directive: {reason}")]
    Malformed {
        name: String,
        line: usize,
        reason: &'static str,
    },
}

impl DirectiveError {
    pub(crate) fn malformed(directive: &crate::Directive, reason: &'static str) -> Self {
        Self::Malformed {
            name: directive.name.clone(),
            line: directive.line,
            reason,
        }
    }
}
