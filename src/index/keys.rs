//! The key taxonomy.

use std::fmt;

use smol_str::SmolStr;

/// A dimension along which declarations are indexed.
///
/// The discriminant is the on-disk ordinal and must never be reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyCategory {
    ByName = 0,
    ByType = 1,
    ComponentScan = 2,
    FactoryBean = 3,
    FactoryBeanClass = 4,
    FactoryMethod = 5,
    CustomWrapper = 6,
    Alias = 7,
    TypeProvider = 8,
    AbstractDeclaration = 9,
    NameProvider = 10,
}

impl KeyCategory {
    pub const ALL: [KeyCategory; 11] = [
        Self::ByName,
        Self::ByType,
        Self::ComponentScan,
        Self::FactoryBean,
        Self::FactoryBeanClass,
        Self::FactoryMethod,
        Self::CustomWrapper,
        Self::Alias,
        Self::TypeProvider,
        Self::AbstractDeclaration,
        Self::NameProvider,
    ];

    /// True if every key of this category is the same key.
    pub const fn is_singleton(self) -> bool {
        !matches!(self, Self::ByName | Self::ByType | Self::Alias)
    }

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByName => "by-name",
            Self::ByType => "by-type",
            Self::ComponentScan => "component-scan",
            Self::FactoryBean => "factory-bean",
            Self::FactoryBeanClass => "factory-bean-class",
            Self::FactoryMethod => "factory-method",
            Self::CustomWrapper => "custom-wrapper",
            Self::Alias => "alias",
            Self::TypeProvider => "type-provider",
            Self::AbstractDeclaration => "abstract-declaration",
            Self::NameProvider => "name-provider",
        }
    }
}

impl fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key of the index: a category and, for payload-keyed categories, a
/// name or fully-qualified type.
///
/// Fields are private so the payload of singleton-keyed categories is
/// always empty; derived equality and hashing then collapse every key of
/// such a category into one.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexKey {
    category: KeyCategory,
    payload: SmolStr,
}

impl IndexKey {
    /// Build a key, dropping the payload of singleton-keyed categories.
    pub fn new(category: KeyCategory, payload: &str) -> Self {
        let payload = if category.is_singleton() {
            SmolStr::default()
        } else {
            SmolStr::new(payload)
        };
        Self { category, payload }
    }

    /// The one key of a singleton-keyed category.
    ///
    /// For payload-keyed categories this is the key with an empty payload.
    pub fn singleton(category: KeyCategory) -> Self {
        Self {
            category,
            payload: SmolStr::default(),
        }
    }

    pub fn by_name(name: &str) -> Self {
        Self::new(KeyCategory::ByName, name)
    }

    pub fn by_type(fqn: &str) -> Self {
        Self::new(KeyCategory::ByType, fqn)
    }

    pub fn alias(name: &str) -> Self {
        Self::new(KeyCategory::Alias, name)
    }

    pub fn category(&self) -> KeyCategory {
        self.category
    }

    /// The payload; always empty for singleton-keyed categories.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_singleton() {
            write!(f, "{}", self.category)
        } else {
            write!(f, "{}({})", self.category, self.payload)
        }
    }
}
