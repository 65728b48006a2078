//! Document snapshots handed to the resolver.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::base::FileId;

/// The text of one document at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub file: FileId,
    pub text: Arc<str>,
}

/// Supplies the current text of documents at resolve time.
///
/// Queries call [`snapshot`](Self::snapshot) once per document, so every hit
/// of one document is resolved against the same text.
pub trait DocumentSource {
    fn snapshot(&self, file: FileId) -> Option<DocumentSnapshot>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn snapshot(&self, file: FileId) -> Option<DocumentSnapshot> {
        (**self).snapshot(file)
    }
}

/// A fixed set of documents held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: FxHashMap<FileId, Arc<str>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: FileId, text: impl Into<Arc<str>>) {
        self.documents.insert(file, text.into());
    }

    pub fn remove(&mut self, file: FileId) -> Option<Arc<str>> {
        self.documents.remove(&file)
    }
}

impl DocumentSource for MemorySource {
    fn snapshot(&self, file: FileId) -> Option<DocumentSnapshot> {
        let text = self.documents.get(&file)?;
        Some(DocumentSnapshot {
            file,
            text: Arc::clone(text),
        })
    }
}
