//! Arena-backed XML document model.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// Index of an element inside its [`XmlDocument`].
///
/// Ids are assigned in document order (pre-order), so comparing two ids of
/// the same document compares their start offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single attribute with its resolved namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Raw qualified name as written (`p:name`, `class`).
    pub name: SmolStr,
    /// Name without prefix.
    pub local_name: SmolStr,
    /// Namespace URI. Unprefixed attributes have no namespace.
    pub namespace: Option<SmolStr>,
    /// Unescaped value.
    pub value: String,
}

/// An element of a parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlElement {
    /// Raw qualified name as written (`util:list`, `bean`).
    pub name: SmolStr,
    pub prefix: Option<SmolStr>,
    pub local_name: SmolStr,
    /// Namespace URI resolved from the `xmlns` declarations in scope.
    pub namespace: Option<SmolStr>,
    /// Attributes in source order, `xmlns` declarations excluded.
    pub attributes: Vec<XmlAttribute>,
    /// From the opening `<` to the end of the closing tag.
    pub range: TextRange,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl XmlElement {
    /// Value of an unprefixed attribute.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Value of a namespaced attribute.
    pub fn attribute_ns(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.as_deref() == Some(namespace) && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// True if an unprefixed attribute is explicitly present, even if empty.
    pub fn has_attribute(&self, local_name: &str) -> bool {
        self.attribute(local_name).is_some()
    }

    /// True if this element is `local_name` in `namespace`.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }

    /// Offset of the opening `<`.
    pub fn offset(&self) -> TextSize {
        self.range.start()
    }
}

/// A parsed document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlDocument {
    pub(crate) elements: Vec<XmlElement>,
    pub(crate) root: ElementId,
}

impl XmlDocument {
    /// The single root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Element by id.
    ///
    /// # Panics
    /// If `id` was not produced by this document.
    pub fn element(&self, id: ElementId) -> &XmlElement {
        &self.elements[id.index()]
    }

    /// Element by id, `None` for foreign ids.
    pub fn get(&self, id: ElementId) -> Option<&XmlElement> {
        self.elements.get(id.index())
    }

    /// Child elements of `id` in document order.
    pub fn children(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|element| element.children.iter().copied())
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &XmlElement)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(idx, element)| (ElementId::new(idx), element))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The smallest element whose range contains `offset`.
    ///
    /// Sibling ranges never overlap, so the search descends one child per
    /// level using a binary search over start offsets.
    pub fn element_at(&self, offset: TextSize) -> Option<ElementId> {
        let mut current = self.root;
        if !self.element(current).range.contains(offset) {
            return None;
        }
        loop {
            let children = &self.element(current).children;
            let idx = children.partition_point(|&c| self.element(c).range.start() <= offset);
            match idx.checked_sub(1).map(|i| children[i]) {
                Some(child) if self.element(child).range.contains(offset) => current = child,
                _ => return Some(current),
            }
        }
    }
}
