//! Extraction of declaration records and their mapping to index keys.

use indexmap::IndexMap;
use text_size::TextSize;

use crate::base::constants::{NAMESPACE_MARKER, ROOT_MARKERS};
use crate::dom::{
    BeanNameRule, BeanTypeRule, DeclarationNode, DeclarationTree, NodeKind, SchemaRegistry,
};
use crate::syntax::ElementId;

use super::keys::{IndexKey, KeyCategory};

/// Per-document index entries in extraction order.
pub type IndexEntries = IndexMap<IndexKey, Vec<u32>>;

/// How a declaration produces its instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeclarationShape {
    #[default]
    Simple,
    FactoryMethod,
    FactoryBean,
    FactoryBeanClass,
    Custom,
    CustomWrapper,
    ComponentScan,
    Alias,
    TypeProvider,
    AbstractDeclaration,
    NameProvider,
}

/// One classified declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractionRecord {
    pub offset: TextSize,
    pub shape: DeclarationShape,
    pub id: Option<String>,
    pub fqn: Option<String>,
    pub aliases: Vec<String>,
}

impl ExtractionRecord {
    fn new(offset: TextSize, shape: DeclarationShape) -> Self {
        Self {
            offset,
            shape,
            ..Self::default()
        }
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// True if `text` carries a namespace marker and a root marker.
pub(crate) fn passes_prefilter(text: &str, schema: &SchemaRegistry) -> bool {
    let has_namespace = text.contains(NAMESPACE_MARKER)
        || schema
            .extensions()
            .iter()
            .flat_map(|e| e.markers())
            .any(|marker| text.contains(marker));
    has_namespace && ROOT_MARKERS.iter().any(|marker| text.contains(marker))
}

/// Pre-filter, parse, bind and extract. Any failure yields no records.
pub fn extract_document(text: &str, schema: &SchemaRegistry) -> Vec<ExtractionRecord> {
    if !passes_prefilter(text, schema) {
        return Vec::new();
    }
    match DeclarationTree::parse(text, schema) {
        Some(tree) => extract(&tree),
        None => Vec::new(),
    }
}

/// Walk a bound document and classify every declaration, pre-order.
pub fn extract(tree: &DeclarationTree<'_>) -> Vec<ExtractionRecord> {
    let mut records = Vec::new();
    walk(tree, tree.root(), &mut records);
    records
}

fn walk(tree: &DeclarationTree<'_>, parent: ElementId, records: &mut Vec<ExtractionRecord>) {
    for child in tree.children(parent) {
        match tree.kind(child) {
            NodeKind::Other => walk(tree, child, records),
            NodeKind::Alias => {
                let target = tree.node(child).and_then(|node| node.alias_name());
                if let Some(target) = target {
                    let mut record =
                        ExtractionRecord::new(tree.element(child).offset(), DeclarationShape::Alias);
                    record.id = Some(target.to_string());
                    push(records, record);
                }
            }
            NodeKind::CustomWrapper => {
                let offset = tree.element(child).offset();
                push(
                    records,
                    ExtractionRecord::new(offset, DeclarationShape::CustomWrapper),
                );
            }
            NodeKind::Bean | NodeKind::Custom(_) | NodeKind::PackageScan(_) => {
                if let Some(node) = tree.node(child) {
                    declaration_records(&node, tree.schema(), records);
                }
                walk(tree, child, records);
            }
        }
    }
}

fn push(records: &mut Vec<ExtractionRecord>, record: ExtractionRecord) {
    tracing::trace!(
        "Extracted {:?} at {:?} id={:?} fqn={:?}",
        record.shape,
        record.offset,
        record.id,
        record.fqn
    );
    records.push(record);
}

fn declaration_records(
    node: &DeclarationNode<'_>,
    schema: &SchemaRegistry,
    records: &mut Vec<ExtractionRecord>,
) {
    let mut record = ExtractionRecord::new(node.offset(), DeclarationShape::Simple);
    let mut name_provider = None;

    record.id = match node.kind().descriptor().and_then(|d| d.bean_name.as_ref()) {
        None => node.declared_name(),
        Some(BeanNameRule::DisplayOnly) => None,
        Some(BeanNameRule::Literal(name)) if !name.is_empty() => Some(name.to_string()),
        Some(_) => {
            name_provider = Some(ExtractionRecord::new(
                node.offset(),
                DeclarationShape::NameProvider,
            ));
            None
        }
    };
    record.aliases = node.aliases();

    let (shape, fqn) = classify_shape(node);
    record.shape = shape;
    record.fqn = fqn;

    let reclassify = matches!(record.shape, DeclarationShape::Simple | DeclarationShape::Custom)
        && record
            .fqn
            .as_deref()
            .is_some_and(|fqn| schema.factories().is_factory_bean_candidate(fqn));
    if reclassify {
        record.shape = DeclarationShape::FactoryBeanClass;
    }

    push(records, record);
    if let Some(provider) = name_provider {
        push(records, provider);
    }
}

/// Shape and type of a declaration; the first matching rule wins.
fn classify_shape(node: &DeclarationNode<'_>) -> (DeclarationShape, Option<String>) {
    match node.kind() {
        NodeKind::Bean => {
            if node.has_class() {
                let shape = if node.has_factory_method() {
                    DeclarationShape::FactoryMethod
                } else {
                    DeclarationShape::Simple
                };
                (shape, node.class_name())
            } else if node.has_factory_bean() {
                (DeclarationShape::FactoryBean, None)
            } else if node.has_parent() {
                (DeclarationShape::AbstractDeclaration, None)
            } else {
                (DeclarationShape::Simple, None)
            }
        }
        NodeKind::PackageScan(_) => (DeclarationShape::ComponentScan, None),
        NodeKind::Custom(descriptor) => match &descriptor.bean_type {
            Some(rule @ BeanTypeRule::Literal(_)) => match rule.literal() {
                Some(fqn) => (DeclarationShape::Custom, Some(fqn.to_string())),
                None => (DeclarationShape::TypeProvider, None),
            },
            Some(BeanTypeRule::Computed(_)) => (DeclarationShape::TypeProvider, None),
            None => (DeclarationShape::Simple, None),
        },
        _ => (DeclarationShape::Simple, None),
    }
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map records to per-key offset lists.
///
/// Aliases are indexed only under their own category. Missing ids and types
/// emit nothing.
pub fn index_entries(records: &[ExtractionRecord]) -> IndexEntries {
    let mut entries = IndexEntries::new();
    for record in records {
        let offset = u32::from(record.offset);
        let mut add = |key: IndexKey| {
            let offsets = entries.entry(key).or_default();
            if offsets.last() != Some(&offset) {
                offsets.push(offset);
            }
        };

        if record.shape == DeclarationShape::Alias {
            if let Some(id) = &record.id {
                add(IndexKey::alias(id));
            }
            continue;
        }

        if let Some(id) = &record.id {
            add(IndexKey::by_name(id));
        }
        for alias in &record.aliases {
            add(IndexKey::by_name(alias));
        }

        let singleton = match record.shape {
            DeclarationShape::Simple | DeclarationShape::Custom => {
                if let Some(fqn) = &record.fqn {
                    add(IndexKey::by_type(fqn));
                }
                None
            }
            DeclarationShape::FactoryBeanClass => {
                if let Some(fqn) = &record.fqn {
                    add(IndexKey::by_type(fqn));
                }
                Some(KeyCategory::FactoryBeanClass)
            }
            DeclarationShape::TypeProvider => Some(KeyCategory::TypeProvider),
            DeclarationShape::NameProvider => Some(KeyCategory::NameProvider),
            DeclarationShape::ComponentScan => Some(KeyCategory::ComponentScan),
            DeclarationShape::FactoryBean => Some(KeyCategory::FactoryBean),
            DeclarationShape::FactoryMethod => Some(KeyCategory::FactoryMethod),
            DeclarationShape::CustomWrapper => Some(KeyCategory::CustomWrapper),
            DeclarationShape::AbstractDeclaration => Some(KeyCategory::AbstractDeclaration),
            DeclarationShape::Alias => None,
        };
        if let Some(category) = singleton {
            add(IndexKey::singleton(category));
        }
    }
    entries
}
