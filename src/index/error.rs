//! Error types for index persistence.

use std::path::PathBuf;

use thiserror::Error;

use super::codec::CodecError;

/// Errors raised while saving or loading a persisted index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// IO error while reading or writing the index file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A key or value failed to decode.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The file does not start with the index magic.
    #[error("Not an index file: {}", path.display())]
    BadMagic { path: PathBuf },

    /// Structurally invalid content.
    #[error("Corrupt index at byte {offset}: {message}")]
    Corrupt { offset: usize, message: String },
}

impl IndexError {
    /// Create a corruption error.
    pub fn corrupt(offset: usize, message: impl Into<String>) -> Self {
        Self::Corrupt {
            offset,
            message: message.into(),
        }
    }
}
