//! Pluggable namespace extensions.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use smol_str::SmolStr;

use super::schema::ElementDescriptor;

/// A namespace contributed to the schema from outside the core.
///
/// Extensions are passed to [`SchemaRegistry::new`](super::SchemaRegistry::new)
/// explicitly. Each one contributes to the index version through
/// [`version_contribution`](Self::version_contribution), so adding, removing
/// or re-versioning an extension invalidates any persisted index.
#[derive(Clone, Debug)]
pub struct NamespaceExtension {
    name: SmolStr,
    namespace: SmolStr,
    markers: Vec<SmolStr>,
    model_version: u32,
    elements: Vec<ElementDescriptor>,
}

impl NamespaceExtension {
    /// Create an extension for `namespace`, identified by `name`.
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            namespace: SmolStr::new(namespace),
            markers: Vec::new(),
            model_version: 0,
            elements: Vec::new(),
        }
    }

    /// Add a raw-text marker accepted by the eligibility pre-filter.
    pub fn with_marker(mut self, marker: &str) -> Self {
        self.markers.push(SmolStr::new(marker));
        self
    }

    /// Set the semantic version of this extension's element model.
    pub fn with_model_version(mut self, version: u32) -> Self {
        self.model_version = version;
        self
    }

    pub fn with_element(mut self, descriptor: ElementDescriptor) -> Self {
        self.elements.push(descriptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn model_version(&self) -> u32 {
        self.model_version
    }

    pub fn elements(&self) -> &[ElementDescriptor] {
        &self.elements
    }

    /// Pre-filter markers: the namespace URI itself plus any extra markers.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.namespace.as_str()).chain(self.markers.iter().map(SmolStr::as_str))
    }

    /// Stable hash of the extension's identity (its name).
    pub fn identity_hash(&self) -> u32 {
        let mut hasher = FxHasher::default();
        self.name.as_str().hash(&mut hasher);
        let hash = hasher.finish();
        (hash ^ (hash >> 32)) as u32
    }

    /// What this extension adds to the index version.
    pub fn version_contribution(&self) -> u32 {
        self.model_version.wrapping_add(self.identity_hash())
    }
}
