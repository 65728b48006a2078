//! Element descriptors and the schema registry.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::constants::{ALIAS_TAG, BEAN_TAG, BEANS_NAMESPACE};
use crate::syntax::XmlElement;

use super::extension::NamespaceExtension;
use super::factories::FactoryBeanRegistry;

// ============================================================================
// PROVIDERS
// ============================================================================

/// Computes a bean name that is not written literally in the document.
///
/// Evaluated at query time only; the index records the element under the
/// `NameProvider` category and leaves the exact match to the resolver.
pub trait BeanNameProvider: Send + Sync + fmt::Debug {
    fn bean_name(&self, element: &XmlElement) -> Option<String>;
}

/// Computes the produced type of an element at query time.
pub trait BeanTypeProvider: Send + Sync + fmt::Debug {
    fn bean_type(&self, element: &XmlElement) -> Option<String>;
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// How an extension element takes part in the declaration tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// A component declaration.
    Declaration,
    /// A package scan directive (declares components indirectly).
    PackageScan,
    /// Structural element; walked through, never indexed itself.
    Container,
}

/// Name rule attached to an element kind.
#[derive(Clone, Debug)]
pub enum BeanNameRule {
    /// The element has a name for display purposes only; it is not indexed
    /// by name.
    DisplayOnly,
    /// Every element of this kind has the same fixed name.
    Literal(SmolStr),
    /// The name is computed per element at query time.
    Computed(Arc<dyn BeanNameProvider>),
}

/// Type rule attached to an element kind.
#[derive(Clone, Debug)]
pub enum BeanTypeRule {
    /// Every element of this kind produces this fully-qualified type.
    Literal(SmolStr),
    /// The type is computed per element at query time.
    Computed(Arc<dyn BeanTypeProvider>),
}

impl BeanTypeRule {
    /// The literal type, if this rule carries a non-empty one.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Describes one element of an extension namespace.
#[derive(Clone, Debug)]
pub struct ElementDescriptor {
    pub local_name: SmolStr,
    pub role: ElementRole,
    pub bean_name: Option<BeanNameRule>,
    pub bean_type: Option<BeanTypeRule>,
}

impl ElementDescriptor {
    fn new(local_name: &str, role: ElementRole) -> Self {
        Self {
            local_name: SmolStr::new(local_name),
            role,
            bean_name: None,
            bean_type: None,
        }
    }

    /// A component declaration.
    pub fn declaration(local_name: &str) -> Self {
        Self::new(local_name, ElementRole::Declaration)
    }

    /// A package scan directive.
    pub fn package_scan(local_name: &str) -> Self {
        Self::new(local_name, ElementRole::PackageScan)
    }

    /// A structural element of a known namespace.
    pub fn container(local_name: &str) -> Self {
        Self::new(local_name, ElementRole::Container)
    }

    pub fn with_name(mut self, rule: BeanNameRule) -> Self {
        self.bean_name = Some(rule);
        self
    }

    pub fn with_type(mut self, rule: BeanTypeRule) -> Self {
        self.bean_type = Some(rule);
        self
    }

    pub fn with_literal_type(self, fqn: &str) -> Self {
        self.with_type(BeanTypeRule::Literal(SmolStr::new(fqn)))
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classification of one element against the schema.
#[derive(Clone, Copy, Debug)]
pub enum NodeKind<'s> {
    /// A `bean` element of the core namespace.
    Bean,
    /// A standalone `alias` directive.
    Alias,
    /// A declaration contributed by an extension.
    Custom(&'s ElementDescriptor),
    /// A package scan directive contributed by an extension.
    PackageScan(&'s ElementDescriptor),
    /// An element of a namespace the schema cannot interpret.
    CustomWrapper,
    /// Not a declaration.
    Other,
}

impl<'s> NodeKind<'s> {
    /// True for every kind a `DeclarationNode` can wrap except aliases.
    pub fn is_bean_like(&self) -> bool {
        matches!(
            self,
            Self::Bean | Self::Custom(_) | Self::PackageScan(_) | Self::CustomWrapper
        )
    }

    /// True for kinds the query layer can resolve an offset to.
    pub fn is_declaration(&self) -> bool {
        self.is_bean_like() || matches!(self, Self::Alias)
    }

    /// Descriptor of extension elements.
    pub fn descriptor(&self) -> Option<&'s ElementDescriptor> {
        match *self {
            Self::Custom(descriptor) | Self::PackageScan(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// The complete declaration schema: core namespace, extensions and the
/// factory bean registry.
///
/// Everything that influences extraction lives here, which is what makes
/// [`BeansIndex::version`](crate::index::BeansIndex::version) computable from
/// a registry alone.
#[derive(Debug)]
pub struct SchemaRegistry {
    extensions: Vec<NamespaceExtension>,
    /// namespace URI → local name → descriptor
    descriptors: FxHashMap<SmolStr, FxHashMap<SmolStr, ElementDescriptor>>,
    factories: FactoryBeanRegistry,
}

impl SchemaRegistry {
    /// Build a registry from explicit extensions and a factory registry.
    pub fn new(extensions: Vec<NamespaceExtension>, factories: FactoryBeanRegistry) -> Self {
        let mut descriptors: FxHashMap<SmolStr, FxHashMap<SmolStr, ElementDescriptor>> =
            FxHashMap::default();
        for extension in &extensions {
            let by_name = descriptors
                .entry(SmolStr::new(extension.namespace()))
                .or_default();
            for descriptor in extension.elements() {
                by_name.insert(descriptor.local_name.clone(), descriptor.clone());
            }
        }
        Self {
            extensions,
            descriptors,
            factories,
        }
    }

    /// The built-in `context`/`util` extensions and the bundled factory
    /// registry.
    pub fn builtin() -> Self {
        Self::new(
            super::builtin::extensions(),
            FactoryBeanRegistry::bundled(),
        )
    }

    pub fn extensions(&self) -> &[NamespaceExtension] {
        &self.extensions
    }

    pub fn factories(&self) -> &FactoryBeanRegistry {
        &self.factories
    }

    /// True if `namespace` is the core namespace or belongs to an extension.
    pub fn is_known_namespace(&self, namespace: &str) -> bool {
        namespace == BEANS_NAMESPACE || self.descriptors.contains_key(namespace)
    }

    /// Descriptor of an extension element.
    pub fn descriptor(&self, namespace: &str, local_name: &str) -> Option<&ElementDescriptor> {
        self.descriptors.get(namespace)?.get(local_name)
    }

    /// Classify an element.
    pub fn classify(&self, element: &XmlElement) -> NodeKind<'_> {
        let Some(namespace) = element.namespace.as_deref() else {
            return NodeKind::Other;
        };
        if namespace == BEANS_NAMESPACE {
            return match element.local_name.as_str() {
                BEAN_TAG => NodeKind::Bean,
                ALIAS_TAG => NodeKind::Alias,
                _ => NodeKind::Other,
            };
        }
        match self.descriptor(namespace, &element.local_name) {
            Some(descriptor) => match descriptor.role {
                ElementRole::Declaration => NodeKind::Custom(descriptor),
                ElementRole::PackageScan => NodeKind::PackageScan(descriptor),
                ElementRole::Container => NodeKind::Other,
            },
            None => NodeKind::CustomWrapper,
        }
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
