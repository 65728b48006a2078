#![allow(clippy::unwrap_used)]

use beanscope::TextSize;
use beanscope::dom::{FactoryBeanRegistry, SchemaRegistry, builtin};
use beanscope::index::{
    DeclarationShape, ExtractionRecord, IndexKey, KeyCategory, extract_document, index_entries,
};

use crate::helpers::fixtures::{FACTORIES, SERVICES, beans};

fn offset_of(text: &str, needle: &str) -> TextSize {
    TextSize::from(text.find(needle).unwrap() as u32)
}

#[test]
fn test_simple_declaration_end_to_end() {
    let schema = SchemaRegistry::builtin();
    let text = beans(r#"<bean id="widget1" class="com.acme.Widget"/>"#);
    let offset = offset_of(&text, "<bean ");

    let records = extract_document(&text, &schema);
    assert_eq!(
        records,
        vec![ExtractionRecord {
            offset,
            shape: DeclarationShape::Simple,
            id: Some("widget1".to_string()),
            fqn: Some("com.acme.Widget".to_string()),
            aliases: Vec::new(),
        }]
    );

    let entries = index_entries(&records);
    let at = u32::from(offset);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[&IndexKey::by_name("widget1")], vec![at]);
    assert_eq!(entries[&IndexKey::by_type("com.acme.Widget")], vec![at]);
}

#[test]
fn test_alias_directive_end_to_end() {
    let schema = SchemaRegistry::builtin();
    let text = beans(r#"<alias name="a1" alias="realBean"/>"#);

    let records = extract_document(&text, &schema);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].shape, DeclarationShape::Alias);
    assert_eq!(records[0].id.as_deref(), Some("realBean"));
    assert_eq!(records[0].offset, offset_of(&text, "<alias"));

    let entries = index_entries(&records);
    assert_eq!(entries.keys().collect::<Vec<_>>(), vec![&IndexKey::alias("realBean")]);
}

#[test]
fn test_factory_bean_suffix_end_to_end() {
    // The suffix convention applies even with an empty registry.
    let schema = SchemaRegistry::new(builtin::extensions(), FactoryBeanRegistry::new());
    let text = beans(r#"<bean id="f" class="org.example.MyFactoryBean"/>"#);
    let at = u32::from(offset_of(&text, "<bean "));

    let records = extract_document(&text, &schema);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].shape, DeclarationShape::FactoryBeanClass);

    let entries = index_entries(&records);
    assert_eq!(entries[&IndexKey::by_type("org.example.MyFactoryBean")], vec![at]);
    assert_eq!(
        entries[&IndexKey::singleton(KeyCategory::FactoryBeanClass)],
        vec![at]
    );
}

#[test]
fn test_every_record_has_one_shape() {
    let schema = SchemaRegistry::builtin();
    let text = beans(&format!("{SERVICES}{FACTORIES}"));
    let shapes: Vec<_> = extract_document(&text, &schema)
        .into_iter()
        .map(|r| r.shape)
        .collect();
    assert_eq!(
        shapes,
        vec![
            DeclarationShape::ComponentScan,
            DeclarationShape::Simple,
            DeclarationShape::FactoryMethod,
            DeclarationShape::AbstractDeclaration,
            DeclarationShape::Custom,
            DeclarationShape::FactoryBeanClass,
            DeclarationShape::FactoryBean,
            DeclarationShape::Simple,
            DeclarationShape::NameProvider,
        ]
    );
}

#[test]
fn test_foreign_documents_yield_nothing() {
    let schema = SchemaRegistry::builtin();
    assert!(extract_document("<project><bean id=\"x\"/></project>", &schema).is_empty());
    assert!(extract_document(&beans("<bean id=\"x\">"), &schema).is_empty());
}
