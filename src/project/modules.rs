//! Modules: named groups of documents with dependency edges.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::query::SearchScope;

#[derive(Clone, Debug, Default)]
struct Module {
    files: FxHashSet<FileId>,
    dependencies: Vec<SmolStr>,
}

/// Named modules in registration order.
///
/// Scopes for unknown modules are empty rather than errors, so a query
/// against a module that was just removed simply finds nothing.
#[derive(Clone, Debug, Default)]
pub struct ModuleGraph {
    modules: IndexMap<SmolStr, Module>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module; a no-op if it exists.
    pub fn add_module(&mut self, name: &str) {
        self.modules.entry(SmolStr::new(name)).or_default();
    }

    /// Drop a module and every edge pointing at it.
    pub fn remove_module(&mut self, name: &str) -> bool {
        let removed = self.modules.shift_remove(name).is_some();
        if removed {
            for module in self.modules.values_mut() {
                module.dependencies.retain(|dep| dep != name);
            }
        }
        removed
    }

    /// Add a document to a module, registering the module if needed.
    pub fn add_file(&mut self, module: &str, file: FileId) {
        self.modules
            .entry(SmolStr::new(module))
            .or_default()
            .files
            .insert(file);
    }

    /// Remove a document from every module.
    pub fn remove_file(&mut self, file: FileId) {
        for module in self.modules.values_mut() {
            module.files.remove(&file);
        }
    }

    /// Record that `module` depends on `dependency`.
    pub fn add_dependency(&mut self, module: &str, dependency: &str) {
        self.add_module(dependency);
        let deps = &mut self.modules.entry(SmolStr::new(module)).or_default().dependencies;
        if !deps.iter().any(|dep| dep == dependency) {
            deps.push(SmolStr::new(dependency));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(SmolStr::as_str)
    }

    /// Direct dependencies of a module.
    pub fn dependencies(&self, name: &str) -> &[SmolStr] {
        self.modules
            .get(name)
            .map_or(&[][..], |module| module.dependencies.as_slice())
    }

    /// Documents of one module.
    pub fn scope(&self, name: &str) -> SearchScope {
        match self.modules.get(name) {
            Some(module) => SearchScope::Files(module.files.clone()),
            None => SearchScope::empty(),
        }
    }

    /// Documents of a module and of every module that depends on it,
    /// directly or transitively.
    pub fn scope_with_dependents(&self, name: &str) -> SearchScope {
        self.closure(name, |graph, current| {
            graph
                .modules
                .iter()
                .filter(|(_, module)| module.dependencies.iter().any(|dep| dep == current))
                .map(|(other, _)| other.clone())
                .collect()
        })
    }

    /// Documents of a module and of everything it depends on.
    pub fn scope_with_dependencies(&self, name: &str) -> SearchScope {
        self.closure(name, |graph, current| graph.dependencies(current).to_vec())
    }

    fn closure<F>(&self, name: &str, next: F) -> SearchScope
    where
        F: Fn(&Self, &str) -> Vec<SmolStr>,
    {
        if !self.contains(name) {
            return SearchScope::empty();
        }
        let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
        let mut stack = vec![SmolStr::new(name)];
        let mut files = FxHashSet::default();
        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(module) = self.modules.get(&current) {
                files.extend(module.files.iter().copied());
            }
            stack.extend(next(self, &current));
        }
        SearchScope::Files(files)
    }
}
