//! Project layer: configuration, document loading and the [`IndexHost`].
//!
//! ```text
//! IndexConfig ──build_index──▶ BeansIndex
//!                                  │
//! directory ──file_loader──▶ IndexHost ──query()──▶ QueryEngine
//!                                  │
//!                     ModuleGraph ─┴─ scope() ──▶ SearchScope
//! ```

mod config;
pub mod file_loader;
mod host;
mod modules;

pub use config::IndexConfig;
pub use host::{HostDocuments, IndexHost, OpenStatus};
pub use modules::ModuleGraph;
