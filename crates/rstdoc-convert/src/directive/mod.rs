//! Block directive recognition and extraction.
//!
//! Directives use explicit markup:
//!
//! ```text
//! .. name:: argument
//!    :option: value
//!
//!    Body text, indented by the block's indent unit.
//! ```
//!
//! [`extract_directive`] turns one such block into a [`Directive`](crate::Directive)
//! record. Admonitions and `toctree` never reach it: the
//! [`preprocess`](crate::preprocess) rules rewrite them beforehand.

mod extract;
mod parser;

pub use extract::extract_directive;
pub(crate) use parser::parse_open;
