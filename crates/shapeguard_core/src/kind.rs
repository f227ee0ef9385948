//! Kind definitions and the kind checker.
//!
//! # Responsibility
//! - Name the fixed set of scalar kinds a field or slot may be bound to.
//! - Decide whether a runtime value belongs to a kind or a union of kinds.
//!
//! # Invariants
//! - Unknown tags are kept as data and never match any value.
//! - `object` excludes `null` even though `null` reports category `object`.
//! - Unions nest at most one level (`AnyOf` holds tags, not definitions).

use crate::value::{Category, Value};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Declaration string for the string kind.
pub const KIND_STRING: &str = "string";
/// Declaration string for the number kind.
pub const KIND_NUMBER: &str = "number";
/// Declaration string for the boolean kind.
pub const KIND_BOOLEAN: &str = "boolean";
/// Declaration string for the non-null object kind.
pub const KIND_OBJECT: &str = "object";
/// Declaration string for the function kind.
pub const KIND_FUNCTION: &str = "function";

const SUPPORTED_KIND_TAGS: &[&str] = &[
    KIND_STRING,
    KIND_NUMBER,
    KIND_BOOLEAN,
    KIND_OBJECT,
    KIND_FUNCTION,
];

/// Returns the declaration strings that name a recognised kind.
pub fn supported_kind_tags() -> &'static [&'static str] {
    SUPPORTED_KIND_TAGS
}

/// One atomic kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KindTag {
    String,
    Number,
    Boolean,
    Object,
    Function,
    /// Any other declaration string. Parsing is case-sensitive.
    Unknown(String),
}

impl KindTag {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => KIND_STRING,
            Self::Number => KIND_NUMBER,
            Self::Boolean => KIND_BOOLEAN,
            Self::Object => KIND_OBJECT,
            Self::Function => KIND_FUNCTION,
            Self::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns whether `value` belongs to this tag.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.category() == Category::String,
            Self::Number => value.category() == Category::Number,
            Self::Boolean => value.category() == Category::Boolean,
            Self::Function => value.category() == Category::Function,
            Self::Object => value.category() == Category::Object && !value.is_null(),
            Self::Unknown(_) => false,
        }
    }
}

impl From<&str> for KindTag {
    fn from(value: &str) -> Self {
        match value {
            KIND_STRING => Self::String,
            KIND_NUMBER => Self::Number,
            KIND_BOOLEAN => Self::Boolean,
            KIND_OBJECT => Self::Object,
            KIND_FUNCTION => Self::Function,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for KindTag {
    fn from(value: String) -> Self {
        match Self::from(value.as_str()) {
            Self::Unknown(_) => Self::Unknown(value),
            known => known,
        }
    }
}

impl From<KindTag> for String {
    fn from(value: KindTag) -> Self {
        match value {
            KindTag::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for KindTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind constraint: one tag, or a list meaning "at least one of".
///
/// Serialised as a bare string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindDef {
    Single(KindTag),
    AnyOf(Vec<KindTag>),
}

impl KindDef {
    pub fn string() -> Self {
        Self::Single(KindTag::String)
    }

    pub fn number() -> Self {
        Self::Single(KindTag::Number)
    }

    pub fn boolean() -> Self {
        Self::Single(KindTag::Boolean)
    }

    pub fn object() -> Self {
        Self::Single(KindTag::Object)
    }

    pub fn function() -> Self {
        Self::Single(KindTag::Function)
    }

    /// Builds a union from anything convertible into tags.
    pub fn any_of<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<KindTag>,
    {
        Self::AnyOf(tags.into_iter().map(Into::into).collect())
    }

    /// Tags named by this definition, in declaration order.
    pub fn tags(&self) -> &[KindTag] {
        match self {
            Self::Single(tag) => std::slice::from_ref(tag),
            Self::AnyOf(tags) => tags.as_slice(),
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        satisfies(value, self)
    }
}

impl From<KindTag> for KindDef {
    fn from(value: KindTag) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for KindDef {
    fn from(value: &str) -> Self {
        Self::Single(KindTag::from(value))
    }
}

impl Display for KindDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(tag) => write!(f, "{tag}"),
            Self::AnyOf(tags) => {
                let joined = tags
                    .iter()
                    .map(KindTag::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
        }
    }
}

/// Returns whether `value` satisfies `kind`.
///
/// A union matches when any member matches; an empty union matches nothing.
pub fn satisfies(value: &Value, kind: &KindDef) -> bool {
    match kind {
        KindDef::Single(tag) => tag.matches(value),
        KindDef::AnyOf(tags) => tags.iter().any(|tag| tag.matches(value)),
    }
}
