use std::fmt;

/// An inline tag in a task title.
///
/// Variant order is the canonical sort order: contexts, then projects, then
/// key:value pairs, each sorted by name (and value). The derived `Ord` relies
/// on that, so keep the variants in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// `@name`
    Context(String),
    /// `+name`
    Project(String),
    /// `key:value`
    KeyValue { key: String, value: String },
}

impl Tag {
    pub fn context(name: impl Into<String>) -> Self {
        Tag::Context(name.into())
    }

    pub fn project(name: impl Into<String>) -> Self {
        Tag::Project(name.into())
    }

    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag::KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The exact text of this tag as it appears in a title.
    pub fn raw(&self) -> String {
        self.to_string()
    }

    /// The key of a key:value tag, `None` for contexts and projects.
    pub fn key(&self) -> Option<&str> {
        match self {
            Tag::KeyValue { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The value of a key:value tag whose key is `key`.
    pub fn value_for(&self, wanted: &str) -> Option<&str> {
        match self {
            Tag::KeyValue { key, value } if key == wanted => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Context(name) => write!(f, "@{}", name),
            Tag::Project(name) => write!(f, "+{}", name),
            Tag::KeyValue { key, value } => write!(f, "{}:{}", key, value),
        }
    }
}
