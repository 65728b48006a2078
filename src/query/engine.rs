//! Two-phase queries: gather candidate offsets, then resolve and filter.

use std::iter::FusedIterator;
use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::base::FileId;
use crate::dom::{DeclarationNode, DeclarationTree, NodeKind, SchemaRegistry};
use crate::index::{
    FileIndex, IndexKey, IndexStore, KeyCategory, content_hash, extract, index_entries,
};

use super::scope::SearchScope;
use super::source::DocumentSource;

/// What a resolved hit is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// A component declaration (core `bean` or extension element).
    Bean,
    /// A standalone alias directive.
    Alias,
    /// An element of a namespace the schema cannot interpret.
    CustomWrapper,
}

/// A hit re-validated against the current document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDeclaration {
    pub file: FileId,
    pub offset: TextSize,
    pub range: TextRange,
    pub kind: DeclarationKind,
    /// Raw qualified tag name (`bean`, `util:list`).
    pub tag_name: SmolStr,
    pub bean_name: Option<String>,
    pub aliases: Vec<String>,
    pub bean_type: Option<String>,
    /// Object type produced by a registered factory bean class.
    pub factory_object_type: Option<String>,
}

impl ResolvedDeclaration {
    fn new(file: FileId, node: &DeclarationNode<'_>, kind: DeclarationKind) -> Self {
        Self {
            file,
            offset: node.offset(),
            range: node.range(),
            kind,
            tag_name: SmolStr::new(node.tag_name()),
            bean_name: node.bean_name(),
            aliases: node.aliases(),
            bean_type: node.bean_type(),
            factory_object_type: node.factory_object_type(),
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Entry point for queries over one store.
///
/// Cheap to construct; holds only borrows. Each call to
/// [`query`](Self::query) reads the store afresh.
pub struct QueryEngine<'a, S: DocumentSource + ?Sized> {
    store: &'a IndexStore,
    schema: &'a SchemaRegistry,
    source: &'a S,
}

impl<'a, S: DocumentSource + ?Sized> QueryEngine<'a, S> {
    pub fn new(store: &'a IndexStore, schema: &'a SchemaRegistry, source: &'a S) -> Self {
        Self {
            store,
            schema,
            source,
        }
    }

    /// Lazily resolve every declaration indexed under `key` within `scope`.
    ///
    /// Within one document hits come in ascending offset order; documents
    /// are visited in ascending [`FileId`] order.
    pub fn query(&self, key: IndexKey, scope: &SearchScope) -> Declarations<'a, S> {
        let documents: Vec<(FileId, Arc<FileIndex>)> = if scope.is_empty() {
            Vec::new()
        } else {
            self.store
                .snapshot()
                .into_iter()
                .filter(|(file, _)| scope.contains(*file))
                .collect()
        };
        tracing::debug!("Query {} over {} documents", key, documents.len());
        Declarations {
            schema: self.schema,
            source: self.source,
            key,
            documents: documents.into_iter(),
            current: None,
        }
    }

    /// Declarations named `name`, including computed names equal to it.
    pub fn find_by_name(&self, name: &str, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::by_name(name), scope)
    }

    /// Declarations producing `fqn`, including computed types equal to it.
    pub fn find_by_type(&self, fqn: &str, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::by_type(fqn), scope)
    }

    /// Standalone alias directives introducing `name`.
    pub fn find_aliases(&self, name: &str, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::alias(name), scope)
    }

    pub fn find_component_scans(&self, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::singleton(KeyCategory::ComponentScan), scope)
    }

    pub fn find_factory_beans(&self, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::singleton(KeyCategory::FactoryBean), scope)
    }

    pub fn find_factory_bean_classes(&self, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::singleton(KeyCategory::FactoryBeanClass), scope)
    }

    pub fn find_factory_methods(&self, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::singleton(KeyCategory::FactoryMethod), scope)
    }

    pub fn find_abstract_beans(&self, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::singleton(KeyCategory::AbstractDeclaration), scope)
    }

    pub fn find_custom_wrappers(&self, scope: &SearchScope) -> Declarations<'a, S> {
        self.query(IndexKey::singleton(KeyCategory::CustomWrapper), scope)
    }
}

// ============================================================================
// ITERATOR
// ============================================================================

/// A candidate offset; `exact` hits came from a provider category and must
/// match the requested payload when evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Hit {
    offset: u32,
    exact: bool,
}

/// A document being resolved.
struct OpenDocument<'a> {
    file: FileId,
    tree: DeclarationTree<'a>,
    hits: std::vec::IntoIter<Hit>,
}

/// Lazy sequence of resolved declarations.
///
/// Dropping it at any point is safe; it never holds a store lock between
/// items.
pub struct Declarations<'a, S: DocumentSource + ?Sized> {
    schema: &'a SchemaRegistry,
    source: &'a S,
    key: IndexKey,
    documents: std::vec::IntoIter<(FileId, Arc<FileIndex>)>,
    current: Option<OpenDocument<'a>>,
}

impl<S: DocumentSource + ?Sized> Declarations<'_, S> {
    /// The key being queried.
    pub fn key(&self) -> &IndexKey {
        &self.key
    }
}

/// Provider category consulted alongside a payload key.
fn provider_category(category: KeyCategory) -> Option<KeyCategory> {
    match category {
        KeyCategory::ByName => Some(KeyCategory::NameProvider),
        KeyCategory::ByType => Some(KeyCategory::TypeProvider),
        _ => None,
    }
}

/// Key and provider offsets of one document, sorted and deduplicated.
///
/// An offset present under both keeps its plain (unchecked) form.
fn gather(index: &FileIndex, key: &IndexKey) -> Vec<Hit> {
    let mut hits: Vec<Hit> = index
        .get(key)
        .unwrap_or_default()
        .iter()
        .map(|&offset| Hit {
            offset,
            exact: false,
        })
        .collect();
    if let Some(provider) = provider_category(key.category()) {
        let provided = index
            .get(&IndexKey::singleton(provider))
            .unwrap_or_default();
        hits.extend(provided.iter().map(|&offset| Hit {
            offset,
            exact: true,
        }));
    }
    // `false < true`, so the unchecked hit sorts first and survives dedup.
    hits.sort_unstable();
    hits.dedup_by_key(|hit| hit.offset);
    hits
}

/// Resolve one hit against a bound document.
fn resolve(
    key: &IndexKey,
    file: FileId,
    tree: &DeclarationTree<'_>,
    hit: Hit,
) -> Option<ResolvedDeclaration> {
    let Some(node) = tree.enclosing_declaration_at(TextSize::from(hit.offset)) else {
        tracing::trace!("Dropping stale offset {} in {}", hit.offset, file);
        return None;
    };

    let kind = match (key.category(), node.kind()) {
        (KeyCategory::Alias, NodeKind::Alias) => DeclarationKind::Alias,
        (KeyCategory::CustomWrapper, NodeKind::CustomWrapper) => DeclarationKind::CustomWrapper,
        (
            KeyCategory::Alias | KeyCategory::CustomWrapper,
            NodeKind::Bean | NodeKind::Custom(_) | NodeKind::PackageScan(_),
        ) => return None,
        (_, NodeKind::Bean | NodeKind::Custom(_) | NodeKind::PackageScan(_)) => {
            DeclarationKind::Bean
        }
        _ => {
            tracing::trace!("Offset {} in {} no longer matches {}", hit.offset, file, key);
            return None;
        }
    };

    if hit.exact {
        let actual = match key.category() {
            KeyCategory::ByName => node.bean_name(),
            KeyCategory::ByType => node.bean_type(),
            _ => None,
        };
        if actual.as_deref() != Some(key.payload()) {
            return None;
        }
    }

    let resolved = ResolvedDeclaration::new(file, &node, kind);
    tracing::trace!("Resolved {} at {} in {}", key, u32::from(resolved.offset), file);
    Some(resolved)
}

impl<'a, S: DocumentSource + ?Sized> Iterator for Declarations<'a, S> {
    type Item = ResolvedDeclaration;

    fn next(&mut self) -> Option<ResolvedDeclaration> {
        loop {
            if let Some(document) = self.current.as_mut() {
                for hit in document.hits.by_ref() {
                    if let Some(resolved) = resolve(&self.key, document.file, &document.tree, hit) {
                        return Some(resolved);
                    }
                }
                self.current = None;
            }

            let (file, index) = self.documents.next()?;
            let hits = gather(&index, &self.key);
            if hits.is_empty() {
                continue;
            }
            let Some(snapshot) = self.source.snapshot(file) else {
                tracing::debug!("No snapshot for {}, skipping", file);
                continue;
            };
            let Some(tree) = DeclarationTree::parse(&snapshot.text, self.schema) else {
                tracing::debug!("{} no longer parses, skipping", file);
                continue;
            };
            // Offsets are only meaningful against the text they were taken from.
            let hash = content_hash(&snapshot.text);
            let hits = if hash == index.content_hash() {
                hits
            } else {
                tracing::debug!("{} changed since it was indexed, re-extracting", file);
                gather(&FileIndex::new(hash, index_entries(&extract(&tree))), &self.key)
            };
            self.current = Some(OpenDocument {
                file,
                tree,
                hits: hits.into_iter(),
            });
        }
    }
}

impl<S: DocumentSource + ?Sized> FusedIterator for Declarations<'_, S> {}
