//! IndexHost: documents, index and persistence behind one handle.
//!
//! ## Usage
//!
//! ```ignore
//! let host = IndexHost::new(IndexConfig::default());
//! host.load_directory(Path::new("src/main/resources"))?;
//!
//! let hits: Vec<_> = host
//!     .query()
//!     .find_by_name("dataSource", &SearchScope::Everything)
//!     .collect();
//!
//! host.save_index(Path::new(".beans.idx"))?;
//! ```
//!
//! Every operation takes `&self`; the host can be shared across threads.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{FileId, FileSet};
use crate::index::{BeansIndex, FileIndex, IndexError, IndexStore, LoadOutcome, content_hash, persist};
use crate::query::{DocumentSnapshot, DocumentSource, QueryEngine, SearchScope};

use super::config::IndexConfig;
use super::file_loader;
use super::modules::ModuleGraph;

/// Current text of every document known to the host.
#[derive(Debug, Default)]
pub struct HostDocuments {
    texts: RwLock<FxHashMap<FileId, Arc<str>>>,
}

impl HostDocuments {
    fn get(&self, file: FileId) -> Option<Arc<str>> {
        self.texts.read().get(&file).cloned()
    }

    fn insert(&self, file: FileId, text: Arc<str>) {
        self.texts.write().insert(file, text);
    }

    fn remove(&self, file: FileId) -> Option<Arc<str>> {
        self.texts.write().remove(&file)
    }

    fn files(&self) -> Vec<FileId> {
        let mut files: Vec<FileId> = self.texts.read().keys().copied().collect();
        files.sort_unstable();
        files
    }

    fn len(&self) -> usize {
        self.texts.read().len()
    }
}

impl DocumentSource for HostDocuments {
    fn snapshot(&self, file: FileId) -> Option<DocumentSnapshot> {
        self.get(file).map(|text| DocumentSnapshot { file, text })
    }
}

/// What [`IndexHost::open_index`] found on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenStatus {
    /// Entries were loaded; `stale` documents differ from their entries and
    /// will be re-indexed before the next query.
    Loaded { documents: usize, stale: usize },
    /// The file was built under another version or was unreadable as an
    /// index; nothing was loaded.
    Discarded,
    /// No index file exists.
    Missing,
}

/// Owns the documents, the index store and the module graph.
pub struct IndexHost {
    index: BeansIndex,
    parallel: bool,
    files: RwLock<FileSet>,
    documents: HostDocuments,
    store: IndexStore,
    /// Documents whose entries must be rebuilt before the next query.
    dirty: Mutex<FxHashSet<FileId>>,
    modules: RwLock<ModuleGraph>,
}

impl Default for IndexHost {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl IndexHost {
    pub fn new(config: IndexConfig) -> Self {
        let index = config.build_index();
        tracing::debug!(
            "Index host with {} extensions, version {}",
            config.extensions().len(),
            index.version()
        );
        Self {
            store: index.new_store(),
            index,
            parallel: config.parallel(),
            files: RwLock::new(FileSet::new()),
            documents: HostDocuments::default(),
            dirty: Mutex::new(FxHashSet::default()),
            modules: RwLock::new(ModuleGraph::new()),
        }
    }

    pub fn index(&self) -> &BeansIndex {
        &self.index
    }

    pub fn version(&self) -> u32 {
        self.index.version()
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.files.read().file_id(path)
    }

    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.files.read().path(file).map(Path::to_path_buf)
    }

    /// Number of documents with text in the host.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    // ========================================================================
    // DOCUMENTS
    // ========================================================================

    /// Set the text of a document and index it immediately.
    pub fn set_file_content(&self, path: &Path, text: &str) -> FileId {
        let file = self.files.write().intern(path);
        let text: Arc<str> = Arc::from(text);
        let built = self.build(file, path, &text);
        self.documents.insert(file, text);
        self.apply(file, built);
        self.dirty.lock().remove(&file);
        file
    }

    /// Forget a document. Returns false if it was unknown.
    pub fn remove_file(&self, path: &Path) -> bool {
        let Some(file) = self.file_id(path) else {
            return false;
        };
        let known = self.documents.remove(file).is_some();
        self.store.remove(file);
        self.dirty.lock().remove(&file);
        self.modules.write().remove_file(file);
        known
    }

    /// Load and index every document under `dir`.
    ///
    /// Documents that cannot be read are reported together after the rest
    /// have been loaded.
    pub fn load_directory(&self, dir: &Path) -> Result<usize, String> {
        let paths = file_loader::collect_file_paths(dir, self.index.file_extensions())?;

        let read = |path: &PathBuf| {
            file_loader::load_file(path).map(|text| (path.clone(), Arc::<str>::from(text)))
        };
        let results: Vec<_> = if self.parallel {
            paths.par_iter().map(read).collect()
        } else {
            paths.iter().map(read).collect()
        };

        let mut errors = Vec::new();
        let mut jobs = Vec::new();
        {
            let mut files = self.files.write();
            for result in results {
                match result {
                    Ok((path, text)) => jobs.push((files.intern(&path), path, text)),
                    Err(e) => errors.push(e),
                }
            }
        }

        let loaded = jobs.len();
        for (file, _, text) in &jobs {
            self.documents.insert(*file, Arc::clone(text));
        }
        self.index_all(jobs);
        tracing::info!("Loaded {} documents from {}", loaded, dir.display());

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(format!(
                "Failed to load {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            ))
        }
    }

    /// Schedule a document for re-indexing before the next query.
    pub fn mark_dirty(&self, path: &Path) -> bool {
        match self.file_id(path) {
            Some(file) => self.dirty.lock().insert(file),
            None => false,
        }
    }

    pub fn is_dirty(&self, path: &Path) -> bool {
        self.file_id(path)
            .is_some_and(|file| self.dirty.lock().contains(&file))
    }

    /// Re-index every dirty document. Returns how many were processed.
    pub fn flush(&self) -> usize {
        let dirty: Vec<FileId> = self.dirty.lock().drain().collect();
        if dirty.is_empty() {
            return 0;
        }
        let jobs: Vec<_> = {
            let files = self.files.read();
            dirty
                .into_iter()
                .filter_map(|file| {
                    let path = files.path(file)?.to_path_buf();
                    let text = self.documents.get(file)?;
                    Some((file, path, text))
                })
                .collect()
        };
        let count = jobs.len();
        tracing::debug!("Rebuilding {} dirty documents", count);
        self.index_all(jobs);
        count
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Query engine over the current documents. Dirty documents are
    /// re-indexed first.
    pub fn query(&self) -> QueryEngine<'_, HostDocuments> {
        self.flush();
        QueryEngine::new(&self.store, self.index.schema(), &self.documents)
    }

    /// Change the module graph.
    pub fn update_modules<R>(&self, update: impl FnOnce(&mut ModuleGraph) -> R) -> R {
        update(&mut self.modules.write())
    }

    /// Documents of `module`; empty for unknown modules.
    pub fn scope(&self, module: &str) -> SearchScope {
        self.modules.read().scope(module)
    }

    /// Documents of `module` and of every module depending on it.
    pub fn scope_with_dependents(&self, module: &str) -> SearchScope {
        self.modules.read().scope_with_dependents(module)
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// Write the index to `path`, re-indexing dirty documents first.
    pub fn save_index(&self, path: &Path) -> Result<(), IndexError> {
        self.flush();
        persist::save(&self.store, &self.files.read(), path)
    }

    /// Load a persisted index.
    ///
    /// Entries are only taken for documents the host has no entries for
    /// yet. A loaded entry whose content hash differs from the document's
    /// current text is rebuilt lazily, as is every known document left
    /// without entries. Only I/O failures are errors; a corrupt file is
    /// logged and discarded.
    pub fn open_index(&self, path: &Path) -> Result<OpenStatus, IndexError> {
        let outcome = {
            let mut files = self.files.write();
            persist::load(path, self.index.version(), &mut files)
        };

        let status = match outcome {
            Ok(LoadOutcome::Loaded(loaded)) => {
                let mut documents = 0;
                let mut stale = 0;
                for (file, entries) in loaded.snapshot() {
                    if self.store.contains(file) {
                        continue;
                    }
                    let current = self.documents.get(file);
                    if current
                        .as_deref()
                        .is_some_and(|text| content_hash(text) != entries.content_hash())
                    {
                        stale += 1;
                        self.dirty.lock().insert(file);
                    }
                    self.store.replace(file, FileIndex::clone(&entries));
                    documents += 1;
                }
                OpenStatus::Loaded { documents, stale }
            }
            Ok(LoadOutcome::Discarded { found, expected }) => {
                tracing::info!("Index version {} != {}, rebuilding lazily", found, expected);
                OpenStatus::Discarded
            }
            Ok(LoadOutcome::Missing) => OpenStatus::Missing,
            Err(IndexError::Io(e)) => return Err(IndexError::Io(e)),
            Err(e) => {
                tracing::warn!("Discarding unreadable index {}: {}", path.display(), e);
                OpenStatus::Discarded
            }
        };

        let mut dirty = self.dirty.lock();
        for file in self.documents.files() {
            if !self.store.contains(file) {
                dirty.insert(file);
            }
        }
        Ok(status)
    }

    // ========================================================================
    // INDEXING
    // ========================================================================

    /// Entries for one document, `None` if it is not eligible.
    ///
    /// Entries already stored for identical text are reused.
    fn build(&self, file: FileId, path: &Path, text: &str) -> Option<FileIndex> {
        if !self.index.eligible(path, text) {
            return None;
        }
        let hash = content_hash(text);
        if let Some(existing) = self.store.file(file) {
            if existing.content_hash() == hash {
                tracing::trace!("{} unchanged, keeping entries", file);
                return Some(FileIndex::clone(&existing));
            }
        }
        Some(FileIndex::new(hash, self.index.index_document(text)))
    }

    fn apply(&self, file: FileId, built: Option<FileIndex>) {
        match built {
            Some(entries) => {
                self.store.replace(file, entries);
            }
            None => {
                self.store.remove(file);
            }
        }
    }

    fn index_all(&self, jobs: Vec<(FileId, PathBuf, Arc<str>)>) {
        let build = |(file, path, text): &(FileId, PathBuf, Arc<str>)| {
            (*file, self.build(*file, path, text))
        };
        let built: Vec<_> = if self.parallel {
            jobs.par_iter().map(build).collect()
        } else {
            jobs.iter().map(build).collect()
        };
        for (file, entries) in built {
            self.apply(file, entries);
        }
    }
}
