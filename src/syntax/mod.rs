//! Syntax layer: the XML document model and its parser.
//!
//! Documents are parsed once into an arena of [`XmlElement`]s that keep
//! the byte range of every element, so an offset stored in the index can be
//! mapped back to the element it came from with [`XmlDocument::element_at`].
//!
//! ```text
//! raw text ──parse_document──▶ XmlDocument
//!                                 ├─ elements: Vec<XmlElement>   (arena, pre-order)
//!                                 └─ root: ElementId
//! ```

mod document;
mod error;
pub mod parser;

pub use document::{ElementId, XmlAttribute, XmlDocument, XmlElement};
pub use error::ParseError;
pub use parser::parse_document;

#[cfg(test)]
mod tests;
