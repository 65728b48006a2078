//! Query engine: index lookups validated against current documents.
//!
//! The index only knows offsets. A query gathers the candidate offsets for
//! a key across the documents of a [`SearchScope`], then re-parses each
//! document from a [`DocumentSource`] snapshot and keeps the offsets that
//! still land on a matching declaration.
//!
//! ```text
//! query(key, scope)
//!     │  gather: Arc<FileIndex> per document in scope (ascending FileId)
//!     │          key offsets ∪ provider offsets, sorted, deduplicated
//!     ▼
//! Declarations (lazy)
//!     │  per document, on first demand: snapshot → parse → bind
//!     │  text hash ≠ entries hash: re-extract offsets from the snapshot
//!     │  per offset: enclosing_declaration_at + kind check
//!     │              provider hits: exact name/type re-check
//!     ▼
//! ResolvedDeclaration
//! ```

mod engine;
mod scope;
mod source;

pub use engine::{DeclarationKind, Declarations, QueryEngine, ResolvedDeclaration};
pub use scope::SearchScope;
pub use source::{DocumentSnapshot, DocumentSource, MemorySource};
