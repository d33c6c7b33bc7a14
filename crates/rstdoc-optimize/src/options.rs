//! Optimizer options.

/// Default chunk budget in words.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Invalid caller-supplied options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,
}

/// Options shared by [`optimize`](crate::optimize) and
/// [`chunk_content`](crate::chunk_content).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimizeOptions {
    /// Word budget per chunk.
    pub chunk_size: usize,
    /// Keep Markdown links; when `false` links are reduced to their label.
    pub preserve_references: bool,
    /// Insert breadcrumb lines under deep headings in `optimize`, and fill
    /// [`ContentChunk::context`](crate::ContentChunk::context) in
    /// `chunk_content`. When `false`, chunks carry no context.
    pub add_context_headers: bool,
    /// Clamp heading depth, collapse blank lines, drop empty headings.
    pub simplify_structure: bool,
    /// Collapse triple emphasis and self-referential links.
    pub remove_redundancy: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            preserve_references: true,
            add_context_headers: true,
            simplify_structure: true,
            remove_redundancy: true,
        }
    }
}

impl OptimizeOptions {
    /// Check caller-supplied values.
    ///
    /// The entry points themselves treat a zero budget as one word.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.chunk_size == 0 {
            return Err(OptionsError::ZeroChunkSize);
        }
        Ok(())
    }
}
