//! A parsed document bound to a [`SchemaRegistry`].

use text_size::{TextRange, TextSize};

use crate::base::constants::{BEANS_NAMESPACE, BEANS_TAG, NAME_DELIMITERS};
use crate::syntax::{ElementId, XmlDocument, XmlElement, parse_document};

use super::factories::FactoryBeanRegistry;
use super::schema::{BeanNameRule, BeanTypeRule, NodeKind, SchemaRegistry};

/// Split a multi-valued `name` attribute into its non-empty tokens.
pub fn tokenize_names(raw: &str) -> Vec<String> {
    raw.split(NAME_DELIMITERS)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Attribute value, trimmed, `None` when absent or blank.
fn non_empty<'e>(element: &'e XmlElement, name: &str) -> Option<&'e str> {
    element
        .attribute(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Canonical form of a class reference (`Outer$Inner` → `Outer.Inner`).
fn normalize_class(raw: &str) -> String {
    raw.replace('$', ".")
}

// ============================================================================
// TREE
// ============================================================================

/// A document whose root is a `beans` element of the core namespace.
#[derive(Debug)]
pub struct DeclarationTree<'s> {
    document: XmlDocument,
    schema: &'s SchemaRegistry,
}

impl<'s> DeclarationTree<'s> {
    /// Bind a document to a schema. `None` unless the root is `beans`.
    pub fn bind(document: XmlDocument, schema: &'s SchemaRegistry) -> Option<Self> {
        let root = document.element(document.root());
        if !root.is(BEANS_NAMESPACE, BEANS_TAG) {
            tracing::trace!("Root <{}> is not a beans element", root.name);
            return None;
        }
        Some(Self { document, schema })
    }

    /// Parse and bind in one step, failing soft.
    pub fn parse(text: &str, schema: &'s SchemaRegistry) -> Option<Self> {
        match parse_document(text) {
            Ok(document) => Self::bind(document, schema),
            Err(e) => {
                tracing::trace!("Document did not parse: {}", e);
                None
            }
        }
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    pub fn schema(&self) -> &'s SchemaRegistry {
        self.schema
    }

    /// The `beans` root element.
    pub fn root(&self) -> ElementId {
        self.document.root()
    }

    pub fn element(&self, id: ElementId) -> &XmlElement {
        self.document.element(id)
    }

    pub fn children(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.document.children(id)
    }

    /// Classification of an element.
    ///
    /// Unknown-namespace elements written directly inside a declaration
    /// decorate it and are not wrappers of their own.
    pub fn kind(&self, id: ElementId) -> NodeKind<'s> {
        self.classify(self.document.element(id))
    }

    fn classify(&self, element: &XmlElement) -> NodeKind<'s> {
        let kind = self.schema.classify(element);
        if !matches!(kind, NodeKind::CustomWrapper) {
            return kind;
        }
        let decorates = element
            .parent
            .and_then(|parent| self.document.get(parent))
            .is_some_and(|parent| {
                matches!(
                    self.schema.classify(parent),
                    NodeKind::Bean | NodeKind::Custom(_) | NodeKind::PackageScan(_)
                )
            });
        if decorates { NodeKind::Other } else { kind }
    }

    /// Declaration handle for `id`, `None` when the element is not one.
    pub fn node(&self, id: ElementId) -> Option<DeclarationNode<'_>> {
        let element = self.document.get(id)?;
        let kind = self.classify(element);
        if !kind.is_declaration() {
            return None;
        }
        Some(DeclarationNode {
            id,
            element,
            kind,
            factories: self.schema.factories(),
        })
    }

    /// The declaration whose element is the smallest one containing `offset`.
    ///
    /// The innermost element must itself be a declaration: an offset inside
    /// a nested `property` of a bean does not resolve to the bean.
    pub fn enclosing_declaration_at(&self, offset: TextSize) -> Option<DeclarationNode<'_>> {
        let id = self.document.element_at(offset)?;
        self.node(id)
    }
}

// ============================================================================
// NODE
// ============================================================================

/// A declaration element with its classification.
#[derive(Clone, Copy, Debug)]
pub struct DeclarationNode<'a> {
    id: ElementId,
    element: &'a XmlElement,
    kind: NodeKind<'a>,
    factories: &'a FactoryBeanRegistry,
}

impl<'a> DeclarationNode<'a> {
    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> NodeKind<'a> {
        self.kind
    }

    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    pub fn offset(&self) -> TextSize {
        self.element.offset()
    }

    pub fn range(&self) -> TextRange {
        self.element.range
    }

    /// Raw qualified tag name.
    pub fn tag_name(&self) -> &'a str {
        &self.element.name
    }

    /// `id`, else the first token of `name`.
    pub fn declared_name(&self) -> Option<String> {
        if let Some(id) = non_empty(self.element, "id") {
            return Some(id.to_string());
        }
        let name = self.element.attribute("name")?;
        tokenize_names(name).into_iter().next()
    }

    /// Additional names declared through `name`.
    ///
    /// Without an `id` the first token already serves as the declared name
    /// and is not repeated here.
    pub fn aliases(&self) -> Vec<String> {
        let Some(name) = self.element.attribute("name") else {
            return Vec::new();
        };
        let mut tokens = tokenize_names(name);
        if non_empty(self.element, "id").is_none() && !tokens.is_empty() {
            tokens.remove(0);
        }
        tokens
    }

    /// True if a `class` attribute is written, even if blank.
    pub fn has_class(&self) -> bool {
        self.element.has_attribute("class")
    }

    /// The `class` attribute in canonical form.
    pub fn class_name(&self) -> Option<String> {
        non_empty(self.element, "class").map(normalize_class)
    }

    pub fn has_factory_method(&self) -> bool {
        self.element.has_attribute("factory-method")
    }

    pub fn has_factory_bean(&self) -> bool {
        self.element.has_attribute("factory-bean")
    }

    pub fn has_parent(&self) -> bool {
        self.element.has_attribute("parent")
    }

    /// Target of a standalone alias directive (its `alias` attribute).
    pub fn alias_name(&self) -> Option<&'a str> {
        match self.kind {
            NodeKind::Alias => non_empty(self.element, "alias"),
            _ => None,
        }
    }

    /// Name the declaration is known by, evaluated now.
    ///
    /// Computed names are produced by the element's provider; display-only
    /// names are never reported.
    pub fn bean_name(&self) -> Option<String> {
        match self.kind {
            NodeKind::Alias => self.alias_name().map(str::to_string),
            NodeKind::Other => None,
            _ => match self.kind.descriptor().and_then(|d| d.bean_name.as_ref()) {
                Some(BeanNameRule::DisplayOnly) => None,
                Some(BeanNameRule::Literal(name)) if !name.is_empty() => Some(name.to_string()),
                Some(BeanNameRule::Computed(provider)) => provider.bean_name(self.element),
                _ => self.declared_name(),
            },
        }
    }

    /// Fully-qualified type the declaration produces, evaluated now.
    pub fn bean_type(&self) -> Option<String> {
        match self.kind {
            NodeKind::Bean => self.class_name(),
            NodeKind::Custom(descriptor) | NodeKind::PackageScan(descriptor) => {
                match descriptor.bean_type.as_ref()? {
                    BeanTypeRule::Literal(fqn) if !fqn.is_empty() => Some(fqn.to_string()),
                    BeanTypeRule::Literal(_) => None,
                    BeanTypeRule::Computed(provider) => provider.bean_type(self.element),
                }
            }
            _ => None,
        }
    }

    /// True if the produced type is treated as a factory bean.
    pub fn is_factory_bean_class(&self) -> bool {
        self.bean_type()
            .is_some_and(|fqn| self.factories.is_factory_bean_candidate(&fqn))
    }

    /// Object type a listed factory bean produces, when the registry knows it.
    pub fn factory_object_type(&self) -> Option<String> {
        let fqn = self.bean_type()?;
        self.factories.object_type(&fqn).map(str::to_string)
    }
}
