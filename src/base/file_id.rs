//! Interned document identifiers.

use std::fmt;

/// Identifier of one indexed document.
///
/// A `FileId` is only meaningful relative to the [`FileSet`](super::FileSet)
/// that handed it out. The persisted index stores paths, not ids, and
/// re-interns them on load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    /// Create a file id from its raw index.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw index of this id.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}
