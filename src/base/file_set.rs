//! Path interning for documents.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::FileId;

/// Bidirectional map between document paths and [`FileId`]s.
///
/// Ids are dense and never reused: removing a document from the index does
/// not release its id, so a stale id can never alias a different path.
#[derive(Debug, Default, Clone)]
pub struct FileSet {
    paths: Vec<PathBuf>,
    ids: FxHashMap<PathBuf, FileId>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a path, returning its existing id if already known.
    pub fn intern(&mut self, path: impl AsRef<Path>) -> FileId {
        let path = path.as_ref();
        if let Some(&id) = self.ids.get(path) {
            return id;
        }
        let id = FileId::new(self.paths.len() as u32);
        self.paths.push(path.to_path_buf());
        self.ids.insert(path.to_path_buf(), id);
        id
    }

    /// Look up the id of a path without interning it.
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.ids.get(path.as_ref()).copied()
    }

    /// Look up the path of an id.
    pub fn path(&self, file: FileId) -> Option<&Path> {
        self.paths.get(file.index() as usize).map(PathBuf::as_path)
    }

    /// Iterate over all interned `(id, path)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FileId, &Path)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(idx, path)| (FileId::new(idx as u32), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
