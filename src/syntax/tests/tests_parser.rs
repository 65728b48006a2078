#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::syntax::{ParseError, parse_document};

const BEANS_NS: &str = "http://www.springframework.org/schema/beans";

#[test]
fn test_parse_resolves_default_namespace() {
    let text = format!(r#"<beans xmlns="{BEANS_NS}"><bean id="a"/></beans>"#);
    let doc = parse_document(&text).unwrap();

    let root = doc.element(doc.root());
    assert_eq!(root.local_name, "beans");
    assert_eq!(root.namespace.as_deref(), Some(BEANS_NS));

    let bean = doc.element(root.children[0]);
    assert!(bean.is(BEANS_NS, "bean"));
    assert_eq!(bean.attribute("id"), Some("a"));
}

#[test]
fn test_parse_resolves_prefixed_elements_and_attributes() {
    let text = r#"<b:beans xmlns:b="urn:beans" xmlns:p="urn:p" xmlns:u="urn:util">
        <b:bean id="x" p:name="n"/>
        <u:list id="l"/>
    </b:beans>"#;
    let doc = parse_document(text).unwrap();
    let root = doc.element(doc.root());
    assert_eq!(root.prefix.as_deref(), Some("b"));
    assert_eq!(root.namespace.as_deref(), Some("urn:beans"));

    let bean = doc.element(root.children[0]);
    assert_eq!(bean.attribute_ns("urn:p", "name"), Some("n"));
    assert_eq!(bean.attribute("name"), None);

    let list = doc.element(root.children[1]);
    assert!(list.is("urn:util", "list"));
}

#[test]
fn test_unprefixed_attributes_have_no_namespace() {
    let text = r#"<beans xmlns="urn:beans"><bean class="A"/></beans>"#;
    let doc = parse_document(text).unwrap();
    let bean = doc.element(doc.element(doc.root()).children[0]);
    assert_eq!(bean.attributes[0].namespace, None);
}

#[test]
fn test_inner_declaration_shadows_outer_prefix() {
    let text = r#"<a:root xmlns:a="urn:one"><a:child xmlns:a="urn:two"/><a:child/></a:root>"#;
    let doc = parse_document(text).unwrap();
    let root = doc.element(doc.root());
    assert_eq!(doc.element(root.children[0]).namespace.as_deref(), Some("urn:two"));
    assert_eq!(doc.element(root.children[1]).namespace.as_deref(), Some("urn:one"));
}

#[test]
fn test_xmlns_declarations_are_not_attributes() {
    let text = r#"<beans xmlns="urn:beans" xmlns:p="urn:p" default-lazy-init="true"/>"#;
    let doc = parse_document(text).unwrap();
    let root = doc.element(doc.root());
    assert_eq!(root.attributes.len(), 1);
    assert_eq!(root.attribute("default-lazy-init"), Some("true"));
}

#[test]
fn test_attribute_values_are_unescaped() {
    let text = r#"<beans><bean id="a&amp;b"/></beans>"#;
    let doc = parse_document(text).unwrap();
    let bean = doc.element(doc.element(doc.root()).children[0]);
    assert_eq!(bean.attribute("id"), Some("a&b"));
}

#[test]
fn test_element_ranges_cover_tags() {
    let text = "<beans>\n  <bean id=\"a\">\n    <property name=\"p\"/>\n  </bean>\n</beans>";
    let doc = parse_document(text).unwrap();
    let root = doc.element(doc.root());
    assert_eq!(u32::from(root.range.start()), 0);
    assert_eq!(u32::from(root.range.end()) as usize, text.len());

    let bean = doc.element(root.children[0]);
    let start = text.find("<bean ").unwrap();
    let end = text.find("</bean>").unwrap() + "</bean>".len();
    assert_eq!(u32::from(bean.range.start()) as usize, start);
    assert_eq!(u32::from(bean.range.end()) as usize, end);

    let property = doc.element(bean.children[0]);
    assert_eq!(
        u32::from(property.offset()) as usize,
        text.find("<property").unwrap()
    );
}

#[test]
fn test_prolog_and_comments_are_skipped() {
    let text = "<?xml version=\"1.0\"?>\n<!-- header -->\n<beans><!-- c --><bean/></beans>";
    let doc = parse_document(text).unwrap();
    assert_eq!(doc.len(), 2);
    assert_eq!(
        u32::from(doc.element(doc.root()).offset()) as usize,
        text.find("<beans").unwrap()
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("<!-- only a comment -->")]
fn test_empty_documents(#[case] text: &str) {
    assert_eq!(parse_document(text), Err(ParseError::Empty));
}

#[test]
fn test_unclosed_element_is_an_error() {
    assert!(parse_document("<beans><bean>").is_err());
}

#[test]
fn test_mismatched_end_tag_is_an_error() {
    assert!(parse_document("<beans><bean></beans>").is_err());
}

#[test]
fn test_second_root_is_an_error() {
    let err = parse_document("<beans/><beans/>").unwrap_err();
    assert_eq!(err, ParseError::MultipleRoots { offset: 8 });
}
