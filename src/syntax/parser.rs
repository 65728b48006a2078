//! Document parser built on `quick-xml`.
//!
//! The reader works on the raw text so every event can be mapped back to a
//! byte offset. Namespace prefixes are resolved against the `xmlns`
//! declarations of the enclosing elements while the tree is built.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::document::{ElementId, XmlAttribute, XmlDocument, XmlElement};
use super::error::ParseError;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse raw text into an [`XmlDocument`].
pub fn parse_document(text: &str) -> Result<XmlDocument, ParseError> {
    if u32::try_from(text.len()).is_err() {
        return Err(ParseError::TooLarge);
    }

    let mut reader = Reader::from_str(text);
    let mut builder = DocumentBuilder::default();

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| ParseError::xml(reader.buffer_position() as usize, e.to_string()))?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(ref start) => {
                builder.open(start, tag_start(text, before, after))?;
            }
            Event::Empty(ref start) => {
                builder.open(start, tag_start(text, before, after))?;
                builder.close(after)?;
            }
            Event::End(_) => {
                builder.close(after)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    builder.finish()
}

/// Offset of the `<` that opened the event read between `before` and `after`.
fn tag_start(text: &str, before: usize, after: usize) -> usize {
    text.get(before..after)
        .and_then(|slice| slice.find('<'))
        .map_or(before, |idx| before + idx)
}

fn to_size(offset: usize) -> Result<TextSize, ParseError> {
    TextSize::try_from(offset).map_err(|_| ParseError::TooLarge)
}

fn split_qname(raw: &str) -> (Option<SmolStr>, SmolStr) {
    match raw.split_once(':') {
        Some((prefix, local)) => (Some(SmolStr::new(prefix)), SmolStr::new(local)),
        None => (None, SmolStr::new(raw)),
    }
}

// ============================================================================
// TREE BUILDER
// ============================================================================

/// Namespace declarations introduced by one element.
type NamespaceScope = Vec<(Option<SmolStr>, SmolStr)>;

#[derive(Default)]
struct DocumentBuilder {
    elements: Vec<XmlElement>,
    /// Currently open elements, innermost last.
    open: Vec<ElementId>,
    /// One entry per open element.
    scopes: Vec<NamespaceScope>,
    root: Option<ElementId>,
}

impl DocumentBuilder {
    fn open(&mut self, start: &BytesStart<'_>, offset: usize) -> Result<(), ParseError> {
        let raw_name = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| ParseError::xml(offset, e.to_string()))?
            .to_string();

        let mut scope = NamespaceScope::new();
        let mut raw_attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ParseError::xml(offset, e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| ParseError::xml(offset, e.to_string()))?
                .to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::xml(offset, e.to_string()))?
                .into_owned();

            if key == "xmlns" {
                scope.push((None, SmolStr::new(&value)));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                scope.push((Some(SmolStr::new(prefix)), SmolStr::new(&value)));
            } else {
                raw_attributes.push((key, value));
            }
        }
        self.scopes.push(scope);

        let (prefix, local_name) = split_qname(&raw_name);
        let namespace = self.resolve(prefix.as_deref(), true);
        let attributes = raw_attributes
            .into_iter()
            .map(|(key, value)| {
                let (attr_prefix, attr_local) = split_qname(&key);
                // Unprefixed attributes never take the default namespace.
                let attr_namespace = attr_prefix
                    .as_deref()
                    .and_then(|p| self.resolve(Some(p), false));
                XmlAttribute {
                    name: SmolStr::new(&key),
                    local_name: attr_local,
                    namespace: attr_namespace,
                    value,
                }
            })
            .collect();

        let id = ElementId::new(self.elements.len());
        let parent = self.open.last().copied();
        match parent {
            Some(parent) => self.elements[parent.index()].children.push(id),
            None if self.root.is_some() => return Err(ParseError::MultipleRoots { offset }),
            None => self.root = Some(id),
        }

        let start = to_size(offset)?;
        self.elements.push(XmlElement {
            name: SmolStr::new(&raw_name),
            prefix,
            local_name,
            namespace,
            attributes,
            range: TextRange::empty(start),
            parent,
            children: Vec::new(),
        });
        self.open.push(id);
        Ok(())
    }

    fn close(&mut self, end: usize) -> Result<(), ParseError> {
        let id = self
            .open
            .pop()
            .ok_or(ParseError::UnexpectedEnd { offset: end })?;
        self.scopes.pop();
        let element = &mut self.elements[id.index()];
        element.range = TextRange::new(element.range.start(), to_size(end)?);
        Ok(())
    }

    /// Resolve a prefix against the open scopes, innermost first.
    ///
    /// `use_default` selects whether an absent prefix picks up the default
    /// namespace (elements) or stays unqualified (attributes).
    fn resolve(&self, prefix: Option<&str>, use_default: bool) -> Option<SmolStr> {
        if prefix.is_none() && !use_default {
            return None;
        }
        if prefix == Some("xml") {
            return Some(SmolStr::new_static(XML_NAMESPACE));
        }
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter())
            .find(|(declared, _)| declared.as_deref() == prefix)
            .map(|(_, uri)| uri.clone())
            .filter(|uri| !uri.is_empty())
    }

    fn finish(self) -> Result<XmlDocument, ParseError> {
        if let Some(&unclosed) = self.open.first() {
            let element = &self.elements[unclosed.index()];
            return Err(ParseError::Unclosed {
                name: element.name.to_string(),
                offset: u32::from(element.range.start()) as usize,
            });
        }
        let root = self.root.ok_or(ParseError::Empty)?;
        Ok(XmlDocument {
            elements: self.elements,
            root,
        })
    }
}
