#![allow(clippy::unwrap_used)]

use std::fs;

use beanscope::dom::NamespaceExtension;
use beanscope::project::OpenStatus;
use beanscope::{IndexConfig, IndexHost, SearchScope};

use crate::helpers::fixtures::{beans, project};

#[test]
fn test_index_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let index_path = dir.path().join(".beans.idx");

    let first = IndexHost::default();
    first.load_directory(dir.path()).unwrap();
    first.save_index(&index_path).unwrap();

    let second = IndexHost::default();
    assert_eq!(
        second.open_index(&index_path).unwrap(),
        OpenStatus::Loaded {
            documents: 3,
            stale: 0
        }
    );
    second.load_directory(dir.path()).unwrap();
    for file in first.store().files() {
        let path = first.path(file).unwrap();
        let a = first.store().file(file).unwrap();
        let b = second.store().file(second.file_id(&path).unwrap()).unwrap();
        assert_eq!(*a, *b);
    }
    assert_eq!(
        second
            .query()
            .find_by_name("dataSource", &SearchScope::Everything)
            .count(),
        1
    );
}

#[test]
fn test_edits_after_save_are_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let index_path = dir.path().join(".beans.idx");

    let first = IndexHost::default();
    first.load_directory(dir.path()).unwrap();
    first.save_index(&index_path).unwrap();

    fs::write(
        dir.path().join("core/src/main/resources/data.xml"),
        beans(r#"<bean id="replacement" class="com.acme.Replacement"/>"#),
    )
    .unwrap();

    let second = IndexHost::default();
    second.open_index(&index_path).unwrap();
    second.load_directory(dir.path()).unwrap();

    let everything = SearchScope::Everything;
    assert_eq!(second.query().find_by_name("dataSource", &everything).count(), 0);
    assert_eq!(second.query().find_by_name("replacement", &everything).count(), 1);
}

#[test]
fn test_extension_version_change_forces_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let index_path = dir.path().join(".beans.idx");

    let first = IndexHost::default();
    first.load_directory(dir.path()).unwrap();
    first.save_index(&index_path).unwrap();

    let extended = IndexConfig::default()
        .with_extension(NamespaceExtension::new("acme", "urn:acme:beans").with_model_version(1));
    let second = IndexHost::new(extended);
    assert_ne!(second.version(), first.version());

    second.load_directory(dir.path()).unwrap();
    assert_eq!(second.open_index(&index_path).unwrap(), OpenStatus::Discarded);
    assert_eq!(second.store().len(), 3);
    assert_eq!(
        second
            .query()
            .find_by_name("widgetService", &SearchScope::Everything)
            .count(),
        1
    );

    // Saving under the new version makes the file loadable again.
    second.save_index(&index_path).unwrap();
    let third = IndexHost::new(
        IndexConfig::default().with_extension(
            NamespaceExtension::new("acme", "urn:acme:beans").with_model_version(1),
        ),
    );
    assert!(matches!(
        third.open_index(&index_path).unwrap(),
        OpenStatus::Loaded { documents: 3, .. }
    ));
}

#[test]
fn test_truncated_index_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let index_path = dir.path().join(".beans.idx");

    let first = IndexHost::default();
    first.load_directory(dir.path()).unwrap();
    first.save_index(&index_path).unwrap();

    let bytes = fs::read(&index_path).unwrap();
    fs::write(&index_path, &bytes[..bytes.len() / 2]).unwrap();

    let second = IndexHost::default();
    second.load_directory(dir.path()).unwrap();
    assert_eq!(second.open_index(&index_path).unwrap(), OpenStatus::Discarded);
    assert_eq!(second.store().len(), 3);
}
