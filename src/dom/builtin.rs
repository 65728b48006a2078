//! Built-in namespace extensions (`context:` and `util:`).
//!
//! These are ordinary [`NamespaceExtension`]s; a caller that wants a bare
//! schema passes an empty list to [`SchemaRegistry::new`](super::SchemaRegistry::new)
//! instead.

use std::sync::Arc;

use crate::base::constants::{CONTEXT_NAMESPACE, UTIL_NAMESPACE};
use crate::syntax::XmlElement;

use super::extension::NamespaceExtension;
use super::schema::{
    BeanNameProvider, BeanNameRule, BeanTypeProvider, BeanTypeRule, ElementDescriptor,
};

pub const CONTEXT_EXTENSION: &str = "context";
pub const UTIL_EXTENSION: &str = "util";

const PLACEHOLDER_CONFIGURER: &str =
    "org.springframework.context.support.PropertySourcesPlaceholderConfigurer";

/// All built-in extensions.
pub fn extensions() -> Vec<NamespaceExtension> {
    vec![context(), util()]
}

/// The `context:` namespace.
pub fn context() -> NamespaceExtension {
    NamespaceExtension::new(CONTEXT_EXTENSION, CONTEXT_NAMESPACE)
        .with_model_version(1)
        .with_element(ElementDescriptor::package_scan("component-scan"))
        .with_element(
            ElementDescriptor::declaration("annotation-config").with_name(BeanNameRule::DisplayOnly),
        )
        .with_element(
            ElementDescriptor::declaration("property-placeholder")
                .with_literal_type(PLACEHOLDER_CONFIGURER),
        )
        .with_element(ElementDescriptor::container("include-filter"))
        .with_element(ElementDescriptor::container("exclude-filter"))
}

/// The `util:` namespace.
pub fn util() -> NamespaceExtension {
    NamespaceExtension::new(UTIL_EXTENSION, UTIL_NAMESPACE)
        .with_model_version(1)
        .with_element(ElementDescriptor::declaration("list").with_literal_type("java.util.List"))
        .with_element(ElementDescriptor::declaration("set").with_literal_type("java.util.Set"))
        .with_element(ElementDescriptor::declaration("map").with_literal_type("java.util.Map"))
        .with_element(
            ElementDescriptor::declaration("properties").with_literal_type("java.util.Properties"),
        )
        .with_element(
            ElementDescriptor::declaration("constant")
                .with_type(BeanTypeRule::Computed(Arc::new(StaticFieldType))),
        )
        .with_element(
            ElementDescriptor::declaration("property-path")
                .with_name(BeanNameRule::Computed(Arc::new(PropertyPathName))),
        )
}

// ============================================================================
// PROVIDERS
// ============================================================================

/// `util:constant` produces a value of the class owning `static-field`.
///
/// The real field type is unknowable without a class model; the owning class
/// is the closest answer the document itself can give.
#[derive(Debug)]
pub struct StaticFieldType;

impl BeanTypeProvider for StaticFieldType {
    fn bean_type(&self, element: &XmlElement) -> Option<String> {
        let field = element.attribute("static-field")?.trim();
        let (class, member) = field.rsplit_once('.')?;
        if class.is_empty() || member.is_empty() {
            return None;
        }
        Some(class.replace('$', "."))
    }
}

/// `util:property-path` is named by its `id`, or by the path itself.
#[derive(Debug)]
pub struct PropertyPathName;

impl BeanNameProvider for PropertyPathName {
    fn bean_name(&self, element: &XmlElement) -> Option<String> {
        ["id", "path"]
            .into_iter()
            .filter_map(|attr| element.attribute(attr))
            .map(str::trim)
            .find(|name| !name.is_empty())
            .map(str::to_string)
    }
}

