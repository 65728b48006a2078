//! Index descriptor: version, eligibility and per-document indexing.

use std::path::Path;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::constants::{INDEX_VERSION, XML_EXTENSIONS};
use crate::dom::SchemaRegistry;

use super::extract::{IndexEntries, extract_document, index_entries, passes_prefilter};
use super::store::{FileIndex, IndexStore, content_hash};

/// Describes how documents are indexed under one schema.
///
/// Everything that can change extraction results is folded into
/// [`version`](Self::version); a persisted index stamped with any other
/// version is discarded.
#[derive(Clone, Debug)]
pub struct BeansIndex {
    schema: Arc<SchemaRegistry>,
    file_extensions: Vec<SmolStr>,
    version: u32,
}

impl BeansIndex {
    pub fn new(schema: Arc<SchemaRegistry>) -> Self {
        let version = Self::compute_version(&schema);
        Self {
            schema,
            file_extensions: XML_EXTENSIONS.iter().map(|e| SmolStr::new(e)).collect(),
            version,
        }
    }

    /// Override the file extensions considered documents.
    pub fn with_file_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.file_extensions = extensions
            .into_iter()
            .map(|e| SmolStr::new(e.as_ref().trim_start_matches('.')))
            .collect();
        self
    }

    /// Base version, plus every extension's contribution, plus the factory
    /// registry's indexing version.
    pub fn compute_version(schema: &SchemaRegistry) -> u32 {
        let extensions = schema
            .extensions()
            .iter()
            .fold(0u32, |sum, e| sum.wrapping_add(e.version_contribution()));
        INDEX_VERSION
            .wrapping_add(extensions)
            .wrapping_add(schema.factories().indexing_version())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn schema(&self) -> &Arc<SchemaRegistry> {
        &self.schema
    }

    pub fn file_extensions(&self) -> &[SmolStr] {
        &self.file_extensions
    }

    /// True if `path` has a document extension.
    pub fn has_document_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.file_extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    /// Cheap check run before any parsing: document extension plus the
    /// namespace and root markers in the raw text.
    pub fn eligible(&self, path: &Path, text: &str) -> bool {
        self.has_document_extension(path) && passes_prefilter(text, &self.schema)
    }

    /// Entries of one document. Ineligible or malformed text has none.
    pub fn index_document(&self, text: &str) -> IndexEntries {
        index_entries(&extract_document(text, &self.schema))
    }

    /// Entries of one document stamped with its content hash.
    pub fn index_file(&self, text: &str) -> FileIndex {
        FileIndex::new(content_hash(text), self.index_document(text))
    }

    /// An empty store stamped with this descriptor's version.
    pub fn new_store(&self) -> IndexStore {
        IndexStore::new(self.version)
    }
}
