#![allow(clippy::unwrap_used)]

use std::path::Path;

use beanscope::{DeclarationKind, IndexConfig, IndexHost, ResolvedDeclaration, SearchScope};

use crate::helpers::fixtures::{beans, project};

fn loaded_project() -> (tempfile::TempDir, IndexHost) {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let host = IndexHost::new(IndexConfig::default());
    assert_eq!(host.load_directory(dir.path()).unwrap(), 4);
    (dir, host)
}

fn bean_names(hits: &[ResolvedDeclaration]) -> Vec<&str> {
    hits.iter().filter_map(|h| h.bean_name.as_deref()).collect()
}

#[test]
fn test_project_is_indexed() {
    let (_dir, host) = loaded_project();
    assert_eq!(host.document_count(), 4);
    // `pom.xml` is read but never indexed.
    assert_eq!(host.store().len(), 3);
}

#[test]
fn test_find_by_name_and_alias_tokens() {
    let (_dir, host) = loaded_project();
    let everything = SearchScope::Everything;

    let by_id: Vec<_> = host.query().find_by_name("widgetService", &everything).collect();
    let by_alias: Vec<_> = host.query().find_by_name("widgetSvc", &everything).collect();
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id, by_alias);
    assert_eq!(by_id[0].aliases, vec!["widgets", "widgetSvc"]);
    assert_eq!(
        by_id[0].bean_type.as_deref(),
        Some("com.acme.service.WidgetService")
    );
}

#[test]
fn test_alias_directives_are_separate() {
    let (_dir, host) = loaded_project();
    let everything = SearchScope::Everything;

    assert!(
        host.query()
            .find_by_name("primaryDataSource", &everything)
            .next()
            .is_none()
    );
    let aliases: Vec<_> = host
        .query()
        .find_aliases("primaryDataSource", &everything)
        .collect();
    assert_eq!(aliases.len(), 1);
    assert_eq!(aliases[0].kind, DeclarationKind::Alias);
    assert_eq!(aliases[0].tag_name, "alias");
}

#[test]
fn test_find_by_type() {
    let (_dir, host) = loaded_project();
    let everything = SearchScope::Everything;

    let lists: Vec<_> = host.query().find_by_type("java.util.List", &everything).collect();
    assert_eq!(bean_names(&lists), vec!["regions"]);
    assert_eq!(lists[0].tag_name, "util:list");

    let factories: Vec<_> = host
        .query()
        .find_by_type("org.example.SessionFactoryBean", &everything)
        .collect();
    assert_eq!(bean_names(&factories), vec!["sessionFactory"]);
    assert_eq!(
        factories,
        host.query().find_factory_bean_classes(&everything).collect::<Vec<_>>()
    );
}

#[test]
fn test_shape_queries() {
    let (_dir, host) = loaded_project();
    let everything = SearchScope::Everything;
    let engine = host.query();

    let scans: Vec<_> = engine.find_component_scans(&everything).collect();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].tag_name, "context:component-scan");

    let methods: Vec<_> = engine.find_factory_methods(&everything).collect();
    assert_eq!(bean_names(&methods), vec!["clock"]);

    let factory_beans: Vec<_> = engine.find_factory_beans(&everything).collect();
    assert_eq!(bean_names(&factory_beans), vec!["session"]);

    let abstracts: Vec<_> = engine.find_abstract_beans(&everything).collect();
    assert_eq!(bean_names(&abstracts), vec!["template"]);

    assert_eq!(engine.find_custom_wrappers(&everything).count(), 0);
}

#[test]
fn test_computed_names_are_checked_exactly() {
    let (_dir, host) = loaded_project();
    let everything = SearchScope::Everything;

    let hits: Vec<_> = host
        .query()
        .find_by_name("sessionFactory.timeout", &everything)
        .collect();
    assert_eq!(bean_names(&hits), vec!["sessionFactory.timeout"]);
    assert_eq!(hits[0].tag_name, "util:property-path");

    // The plain `sessionFactory` hit must not drag the property path along.
    let plain: Vec<_> = host
        .query()
        .find_by_name("sessionFactory", &everything)
        .collect();
    assert_eq!(bean_names(&plain), vec!["sessionFactory"]);
}

#[test]
fn test_module_scopes() {
    let (dir, host) = loaded_project();
    let file = |relative: &str| host.file_id(&dir.path().join(relative)).unwrap();
    let data = file("core/src/main/resources/data.xml");
    let factories = file("core/src/main/resources/factories.xml");
    let services = file("web/src/main/resources/services.xml");
    host.update_modules(|graph| {
        graph.add_file("core", data);
        graph.add_file("core", factories);
        graph.add_file("web", services);
        graph.add_dependency("web", "core");
    });

    let engine = host.query();
    assert_eq!(
        engine.find_by_name("dataSource", &host.scope("web")).count(),
        0
    );
    assert_eq!(
        engine
            .find_by_name("dataSource", &host.scope_with_dependents("core"))
            .count(),
        1
    );
    assert_eq!(
        engine.find_component_scans(&host.scope("web")).count(),
        1
    );
}

#[test]
fn test_edit_is_visible_to_next_query() {
    let (dir, host) = loaded_project();
    let path = dir.path().join("web/src/main/resources/services.xml");
    let everything = SearchScope::Everything;

    host.set_file_content(&path, &beans(r#"<bean id="renamed" class="com.acme.X"/>"#));
    assert_eq!(host.query().find_by_name("widgetService", &everything).count(), 0);
    assert_eq!(host.query().find_by_name("renamed", &everything).count(), 1);
    assert_eq!(host.query().find_component_scans(&everything).count(), 0);
}

#[test]
fn test_removed_document_disappears() {
    let (dir, host) = loaded_project();
    assert!(host.remove_file(&dir.path().join("core/src/main/resources/data.xml")));
    assert_eq!(
        host.query()
            .find_by_name("dataSource", &SearchScope::Everything)
            .count(),
        0
    );
    assert!(!host.remove_file(Path::new("/nowhere.xml")));
}
