//! Concurrent per-document index storage.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::base::FileId;

use super::extract::IndexEntries;
use super::keys::IndexKey;

/// Hash of a document's text, stored alongside its entries.
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = FxHasher::default();
    text.hash(&mut hasher);
    hasher.finish()
}

/// The index entries of one document snapshot. Immutable once built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileIndex {
    content_hash: u64,
    entries: IndexEntries,
}

impl FileIndex {
    pub fn new(content_hash: u64, entries: IndexEntries) -> Self {
        Self {
            content_hash,
            entries,
        }
    }

    /// Hash of the text these entries were extracted from.
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    /// Offsets stored under `key`.
    pub fn get(&self, key: &IndexKey) -> Option<&[u32]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn entries(&self) -> &IndexEntries {
        &self.entries
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}

/// Index entries of every indexed document.
///
/// Each document maps to an `Arc<FileIndex>`; re-indexing swaps the whole
/// `Arc` under the write lock, so a reader sees either the old entries or
/// the new ones, never a mix. Readers clone the `Arc` and release the lock
/// immediately.
#[derive(Debug)]
pub struct IndexStore {
    version: u32,
    files: RwLock<FxHashMap<FileId, Arc<FileIndex>>>,
}

impl IndexStore {
    /// Create an empty store stamped with `version`.
    pub fn new(version: u32) -> Self {
        Self {
            version,
            files: RwLock::new(FxHashMap::default()),
        }
    }

    /// The version stamp the entries were built under.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Replace every entry of `file`. Returns the previous entries.
    pub fn replace(&self, file: FileId, index: FileIndex) -> Option<Arc<FileIndex>> {
        tracing::debug!("Storing {} keys for {}", index.key_count(), file);
        self.files.write().insert(file, Arc::new(index))
    }

    /// Drop every entry of `file`.
    pub fn remove(&self, file: FileId) -> Option<Arc<FileIndex>> {
        self.files.write().remove(&file)
    }

    /// Entries of `file`.
    pub fn file(&self, file: FileId) -> Option<Arc<FileIndex>> {
        self.files.read().get(&file).cloned()
    }

    /// Offsets of `key` in `file`, empty when none are stored.
    pub fn get(&self, file: FileId, key: &IndexKey) -> Vec<u32> {
        self.file(file)
            .and_then(|index| index.get(key).map(<[u32]>::to_vec))
            .unwrap_or_default()
    }

    /// True if entries are stored for `file`.
    pub fn contains(&self, file: FileId) -> bool {
        self.files.read().contains_key(&file)
    }

    /// Indexed documents in ascending order.
    pub fn files(&self) -> Vec<FileId> {
        let mut files: Vec<FileId> = self.files.read().keys().copied().collect();
        files.sort_unstable();
        files
    }

    /// Every document with its entries, in ascending document order.
    pub fn snapshot(&self) -> Vec<(FileId, Arc<FileIndex>)> {
        let mut files: Vec<_> = self
            .files
            .read()
            .iter()
            .map(|(&file, index)| (file, Arc::clone(index)))
            .collect();
        files.sort_unstable_by_key(|(file, _)| *file);
        files
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }

    pub fn clear(&self) {
        self.files.write().clear();
    }
}
