//! Registry of known factory bean classes.
//!
//! A declaration whose class is a factory bean does not produce an instance
//! of that class but of the factory's object type. The extraction engine
//! uses this registry to flag such declarations (`FactoryBeanClass` shape).
//!
//! The registry is loaded from an XML resource:
//!
//! ```xml
//! <factories version="0">
//!   <factory-bean factory="org.example.ListFactoryBean" object-type="java.util.List"/>
//! </factories>
//! ```

use std::path::Path;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::constants::FACTORY_BEAN_SUFFIX;
use crate::syntax::parse_document;

use super::error::RegistryError;

const BUNDLED_FACTORIES: &str = include_str!("factories.xml");

const ROOT_TAG: &str = "factories";
const ENTRY_TAG: &str = "factory-bean";

/// Known factory bean classes and the objects they produce.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactoryBeanRegistry {
    /// factory fqn → object type (when statically known)
    factories: IndexMap<SmolStr, Option<SmolStr>>,
    indexing_version: u32,
}

impl FactoryBeanRegistry {
    /// An empty registry; only the suffix convention applies.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry bundled with the crate.
    pub fn bundled() -> Self {
        Self::from_xml(BUNDLED_FACTORIES).unwrap_or_else(|e| {
            tracing::warn!("Bundled factory registry is invalid: {}", e);
            Self::new()
        })
    }

    /// Load a registry from a file.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let text = std::fs::read_to_string(path)?;
        let registry = Self::from_xml(&text)?;
        tracing::debug!(
            "Loaded {} factory beans from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse a registry document.
    pub fn from_xml(text: &str) -> Result<Self, RegistryError> {
        let document = parse_document(text)?;
        let root = document.element(document.root());
        if root.local_name != ROOT_TAG {
            return Err(RegistryError::invalid(format!(
                "expected <{}> root, found <{}>",
                ROOT_TAG, root.name
            )));
        }

        let indexing_version = match root.attribute("version") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| RegistryError::invalid(format!("bad version '{}'", raw)))?,
            None => 0,
        };

        let mut registry = Self {
            factories: IndexMap::new(),
            indexing_version,
        };
        for child in document.children(document.root()) {
            let entry = document.element(child);
            if entry.local_name != ENTRY_TAG {
                continue;
            }
            let Some(factory) = entry.attribute("factory").map(str::trim) else {
                return Err(RegistryError::invalid(format!(
                    "<{}> without factory attribute",
                    ENTRY_TAG
                )));
            };
            if factory.is_empty() {
                continue;
            }
            let object_type = entry
                .attribute("object-type")
                .map(str::trim)
                .filter(|t| !t.is_empty());
            registry = registry.with_factory(factory, object_type);
        }
        Ok(registry)
    }

    /// Register a factory class.
    pub fn with_factory(mut self, fqn: &str, object_type: Option<&str>) -> Self {
        self.factories
            .insert(SmolStr::new(fqn), object_type.map(SmolStr::new));
        self
    }

    /// Set the version folded into the index version.
    pub fn with_indexing_version(mut self, version: u32) -> Self {
        self.indexing_version = version;
        self
    }

    pub fn indexing_version(&self) -> u32 {
        self.indexing_version
    }

    /// True if `fqn` is listed in the registry.
    pub fn is_known_factory(&self, fqn: &str) -> bool {
        self.factories.contains_key(fqn)
    }

    /// Object type produced by a listed factory, when statically known.
    pub fn object_type(&self, fqn: &str) -> Option<&str> {
        self.factories.get(fqn)?.as_deref()
    }

    /// True if a declaration of class `fqn` should be treated as a factory
    /// bean: listed in the registry, or named by the suffix convention.
    pub fn is_factory_bean_candidate(&self, fqn: &str) -> bool {
        self.is_known_factory(fqn) || fqn.ends_with(FACTORY_BEAN_SUFFIX)
    }

    /// Listed factory classes in registration order.
    pub fn factories(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(SmolStr::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
