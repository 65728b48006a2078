//! Error types for document parsing.

use thiserror::Error;

/// Errors that can occur while parsing a document.
///
/// None of these reach a caller of the index: a document that fails to
/// parse simply contributes no declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed XML reported by the reader.
    #[error("XML error at byte {offset}: {message}")]
    Xml { offset: usize, message: String },

    /// An element was still open at end of input.
    #[error("Unclosed element <{name}> opened at byte {offset}")]
    Unclosed { name: String, offset: usize },

    /// A closing tag without a matching open element.
    #[error("Unexpected closing tag at byte {offset}")]
    UnexpectedEnd { offset: usize },

    /// A second top-level element.
    #[error("Second root element at byte {offset}")]
    MultipleRoots { offset: usize },

    /// No element at all.
    #[error("Document has no root element")]
    Empty,

    /// Offsets are stored as `u32`; larger documents are not indexable.
    #[error("Document exceeds the maximum indexable size")]
    TooLarge,
}

impl ParseError {
    /// Create an XML error.
    pub fn xml(offset: usize, message: impl Into<String>) -> Self {
        Self::Xml {
            offset,
            message: message.into(),
        }
    }
}
