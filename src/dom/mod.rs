//! Declaration schema: what the elements of a document *mean*.
//!
//! The syntax layer only knows elements and attributes. This layer binds a
//! parsed [`XmlDocument`](crate::syntax::XmlDocument) to a
//! [`SchemaRegistry`] and answers questions such as "is this element a bean
//! declaration?", "what is its declared name?" or "which type does it
//! produce?".
//!
//! ## Key Types
//!
//! - [`ElementDescriptor`] - how one extension element is declared
//!   (role, name rule, type rule)
//! - [`NamespaceExtension`] - a pluggable namespace: descriptors,
//!   pre-filter markers and a model version
//! - [`FactoryBeanRegistry`] - known factory bean classes
//! - [`SchemaRegistry`] - all of the above, injected at construction
//! - [`DeclarationTree`] / [`DeclarationNode`] - a document bound to a schema
//!
//! ## Classification
//!
//! ```text
//! beans namespace      bean            → NodeKind::Bean
//!                      alias           → NodeKind::Alias
//!                      anything else   → NodeKind::Other (walked through)
//! extension namespace  declaration     → NodeKind::Custom
//!                      package scan    → NodeKind::PackageScan
//!                      container       → NodeKind::Other
//!                      unknown tag     → NodeKind::CustomWrapper
//! foreign namespace    any             → NodeKind::CustomWrapper
//! no namespace         any             → NodeKind::Other
//! ```
//!
//! A would-be `CustomWrapper` directly inside a bean or extension
//! declaration is a decorator and becomes `Other` in [`DeclarationTree::kind`].

pub mod builtin;
mod error;
mod extension;
mod factories;
mod schema;
mod tree;

pub use error::RegistryError;
pub use extension::NamespaceExtension;
pub use factories::FactoryBeanRegistry;
pub use schema::{
    BeanNameProvider, BeanNameRule, BeanTypeProvider, BeanTypeRule, ElementDescriptor,
    ElementRole, NodeKind, SchemaRegistry,
};
pub use tree::{DeclarationNode, DeclarationTree, tokenize_names};
