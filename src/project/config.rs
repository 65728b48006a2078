//! Host configuration.

use std::path::Path;

use smol_str::SmolStr;

use crate::base::constants::XML_EXTENSIONS;
use crate::dom::{
    FactoryBeanRegistry, NamespaceExtension, RegistryError, SchemaRegistry, builtin,
};
use crate::index::BeansIndex;

/// Configuration of an [`IndexHost`](super::IndexHost).
///
/// The default indexes `.xml` documents with the built-in `context`/`util`
/// extensions, the bundled factory registry and parallel extraction.
#[derive(Clone, Debug)]
pub struct IndexConfig {
    extensions: Vec<NamespaceExtension>,
    factories: FactoryBeanRegistry,
    file_extensions: Vec<SmolStr>,
    parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            extensions: builtin::extensions(),
            factories: FactoryBeanRegistry::bundled(),
            file_extensions: XML_EXTENSIONS.iter().map(|e| SmolStr::new(e)).collect(),
            parallel: true,
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Core schema only: no extensions, empty factory registry.
    pub fn bare() -> Self {
        Self {
            extensions: Vec::new(),
            factories: FactoryBeanRegistry::new(),
            ..Self::default()
        }
    }

    /// Register an additional namespace extension.
    pub fn with_extension(mut self, extension: NamespaceExtension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Replace all namespace extensions.
    pub fn with_extensions(mut self, extensions: Vec<NamespaceExtension>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_factories(mut self, factories: FactoryBeanRegistry) -> Self {
        self.factories = factories;
        self
    }

    /// Replace the factory registry with one loaded from an XML file.
    pub fn with_factory_registry_file(mut self, path: &Path) -> Result<Self, RegistryError> {
        self.factories = FactoryBeanRegistry::load(path)?;
        Ok(self)
    }

    /// File extensions considered documents, with or without a leading dot.
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

    /// Extract documents on the rayon pool when loading or rebuilding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn extensions(&self) -> &[NamespaceExtension] {
        &self.extensions
    }

    pub fn factories(&self) -> &FactoryBeanRegistry {
        &self.factories
    }

    pub fn file_extensions(&self) -> &[SmolStr] {
        &self.file_extensions
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// The index descriptor this configuration describes.
    pub fn build_index(&self) -> BeansIndex {
        let schema = SchemaRegistry::new(self.extensions.clone(), self.factories.clone());
        BeansIndex::new(std::sync::Arc::new(schema)).with_file_extensions(&self.file_extensions)
    }
}
