//! Bean index: extraction, key mapping, encoding and storage.
//!
//! This module turns a document into per-key offset lists and keeps those
//! lists for every indexed document. Offsets are candidates only: the query
//! layer re-validates each one against the current text.
//!
//! ## Key Types
//!
//! - [`KeyCategory`] / [`IndexKey`] - the key taxonomy
//! - [`ExtractionRecord`] / [`DeclarationShape`] - one classified declaration
//! - [`BeansIndex`] - version, eligibility and per-document indexing
//! - [`IndexStore`] / [`FileIndex`] - concurrent per-document storage
//!
//! ## Pipeline
//!
//! ```text
//! raw text
//!     │  eligible(path, text)      ← cheap marker pre-filter
//!     ▼
//! DeclarationTree                  ← parse + bind (fails soft)
//!     │  extract(tree)
//!     ▼
//! Vec<ExtractionRecord>            ← one per declaration, pre-order
//!     │  index_entries(records)
//!     ▼
//! IndexMap<IndexKey, Vec<u32>>     ← per-document entries
//!     │  IndexStore::replace
//!     ▼
//! FileId → Arc<FileIndex>          ← atomic swap; persisted via encode_*
//! ```

mod codec;
mod descriptor;
mod error;
mod extract;
mod keys;
pub mod persist;
mod store;

pub use codec::{CodecError, decode_key, decode_value, encode_key, encode_value};
pub use descriptor::BeansIndex;
pub use error::IndexError;
pub use extract::{
    DeclarationShape, ExtractionRecord, IndexEntries, extract, extract_document, index_entries,
};
pub use keys::{IndexKey, KeyCategory};
pub use persist::LoadOutcome;
pub use store::{FileIndex, IndexStore, content_hash};

#[cfg(test)]
mod tests;
