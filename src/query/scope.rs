//! Search boundaries.

use rustc_hash::FxHashSet;

use crate::base::FileId;

/// The set of documents a query may return hits from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Every indexed document.
    #[default]
    Everything,
    /// Only these documents. An empty set matches nothing.
    Files(FxHashSet<FileId>),
}

impl SearchScope {
    pub fn files(files: impl IntoIterator<Item = FileId>) -> Self {
        Self::Files(files.into_iter().collect())
    }

    pub fn file(file: FileId) -> Self {
        Self::files([file])
    }

    /// A scope that matches nothing.
    pub fn empty() -> Self {
        Self::Files(FxHashSet::default())
    }

    pub fn contains(&self, file: FileId) -> bool {
        match self {
            Self::Everything => true,
            Self::Files(files) => files.contains(&file),
        }
    }

    /// True if no document can match.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Files(files) if files.is_empty())
    }

    /// Documents in either scope.
    pub fn union(self, other: SearchScope) -> Self {
        match (self, other) {
            (Self::Files(mut a), Self::Files(b)) => {
                a.extend(b);
                Self::Files(a)
            }
            _ => Self::Everything,
        }
    }
}
