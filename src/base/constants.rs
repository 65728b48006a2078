//! Domain constants: namespaces, pre-filter markers and the index version.

/// Namespace of the core bean definition schema.
pub const BEANS_NAMESPACE: &str = "http://www.springframework.org/schema/beans";
/// Namespace of the `context:` extension.
pub const CONTEXT_NAMESPACE: &str = "http://www.springframework.org/schema/context";
/// Namespace of the `util:` extension.
pub const UTIL_NAMESPACE: &str = "http://www.springframework.org/schema/util";
/// Marker every eligible document must contain somewhere in its raw text.
pub const NAMESPACE_MARKER: &str = "http://www.springframework.org/";

/// Root element markers; at least one must appear in an eligible document.
pub const ROOT_MARKERS: &[&str] = &["<beans", ":beans"];

/// Local name of the root element (and of nested profile blocks).
pub const BEANS_TAG: &str = "beans";
pub const BEAN_TAG: &str = "bean";
pub const ALIAS_TAG: &str = "alias";

/// File extensions considered documents of the expected format.
pub const XML_EXTENSIONS: &[&str] = &["xml"];

/// Naming convention recognised by the factory-bean heuristic.
pub const FACTORY_BEAN_SUFFIX: &str = "FactoryBean";

/// Base version of the extraction semantics. Bump on any change to
/// extraction or key mapping.
pub const INDEX_VERSION: u32 = 27;

/// Separators accepted inside a multi-valued `name` attribute.
pub const NAME_DELIMITERS: &[char] = &[',', ';', ' ', '\t', '\n', '\r'];
