//! Error types for schema and registry loading.

use thiserror::Error;

use crate::syntax::ParseError;

/// Errors raised while loading a factory bean registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// IO error while reading the registry file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry is not well-formed XML.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Well-formed XML that is not a registry.
    #[error("Invalid registry: {0}")]
    Invalid(String),
}

impl RegistryError {
    /// Create an invalid registry error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
