//! # beanscope-base
//!
//! Inverted index over bean definition XML documents: which declarations
//! carry a given name, produce a given type or have a given shape, across
//! thousands of documents, without re-parsing them on every question.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → IndexHost, configuration, document loading, modules
//!   ↓
//! query     → Two-phase lookups: gather offsets, re-resolve, filter
//!   ↓
//! index     → Keys, extraction, codec, storage, persistence
//!   ↓
//! dom       → Declaration schema, namespace extensions, factory registry
//!   ↓
//! syntax    → XML document model with byte ranges
//!   ↓
//! base      → Primitives (FileId, FileSet, TextRange, constants)
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → dom → index → query → project)
// ============================================================================

/// Foundation types: FileId, FileSet, TextRange
pub mod base;

/// Syntax: XML elements, attributes and their byte ranges
pub mod syntax;

/// Declaration schema: what elements mean
pub mod dom;

/// The index: keys, extraction, encoding, storage
pub mod index;

/// Queries over the index
pub mod query;

/// Host: documents, persistence, modules
pub mod project;

// Re-export foundation types
pub use base::{FileId, FileSet, TextRange, TextSize};

// Re-export the main entry points
pub use index::{BeansIndex, IndexKey, KeyCategory};
pub use project::{IndexConfig, IndexHost};
pub use query::{DeclarationKind, ResolvedDeclaration, SearchScope};
