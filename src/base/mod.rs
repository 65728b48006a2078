//! Foundation types for the bean index.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned document identifiers
//! - [`FileSet`] - Path ↔ [`FileId`] interning table
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - Domain constants (namespaces, markers, index version)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod file_id;
mod file_set;

pub use file_id::FileId;
pub use file_set::FileSet;

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
