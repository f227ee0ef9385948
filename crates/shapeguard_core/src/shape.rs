//! Interface field maps.
//!
//! # Responsibility
//! - Declare which fields an interface allows and the kind each must hold.
//! - Merge a base interface into a derived one at registration time.
//!
//! # Invariants
//! - Presence in the map is the sole authority for "field is allowed".
//! - A `None` kind declares the field without constraining its values.
//! - Extension is a one-time shallow copy; no link to the base survives.

use crate::kind::KindDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to kind mapping for one interface.
///
/// Serialised as a JSON object, with `null` for untyped fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeDefinition {
    fields: BTreeMap<String, Option<KindDef>>,
}

impl ShapeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field bound to `kind`.
    pub fn field(mut self, name: impl Into<String>, kind: impl Into<KindDef>) -> Self {
        self.fields.insert(name.into(), Some(kind.into()));
        self
    }

    /// Declares a field that accepts any value.
    pub fn untyped(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), None);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, kind: Option<KindDef>) {
        self.fields.insert(name.into(), kind);
    }

    /// Merges `derived` over a copy of `base`; derived declarations win.
    pub fn extending(base: &ShapeDefinition, derived: ShapeDefinition) -> ShapeDefinition {
        let mut fields = base.fields.clone();
        fields.extend(derived.fields);
        ShapeDefinition { fields }
    }

    pub fn declares(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the kind bound to `field`, or `None` when the field is
    /// undeclared or untyped.
    pub fn kind_of(&self, field: &str) -> Option<&KindDef> {
        self.fields.get(field).and_then(Option::as_ref)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&KindDef>)> {
        self.fields
            .iter()
            .map(|(name, kind)| (name.as_str(), kind.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K> FromIterator<(K, Option<KindDef>)> for ShapeDefinition
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<KindDef>)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeDefinition;
    use crate::kind::KindDef;

    #[test]
    fn untyped_fields_are_declared_without_kind() {
        let shape = ShapeDefinition::new()
            .field("x", KindDef::number())
            .untyped("meta");

        assert!(shape.declares("meta"));
        assert_eq!(shape.kind_of("meta"), None);
        assert_eq!(shape.kind_of("x"), Some(&KindDef::number()));
        assert!(!shape.declares("y"));
    }

    #[test]
    fn extending_lets_derived_fields_win() {
        let base = ShapeDefinition::new()
            .field("id", KindDef::number())
            .field("label", KindDef::string());
        let derived = ShapeDefinition::new()
            .field("id", KindDef::string())
            .field("active", KindDef::boolean());

        let merged = ShapeDefinition::extending(&base, derived);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.kind_of("id"), Some(&KindDef::string()));
        assert_eq!(merged.kind_of("label"), Some(&KindDef::string()));
        assert_eq!(merged.kind_of("active"), Some(&KindDef::boolean()));
        // base is copied, not linked
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn deserializes_null_as_untyped() {
        let shape: ShapeDefinition =
            serde_json::from_str(r#"{ "x": "number", "id": ["string", "number"], "meta": null }"#)
                .expect("shape json");

        assert_eq!(shape.len(), 3);
        assert!(shape.declares("meta"));
        assert_eq!(shape.kind_of("meta"), None);
        assert_eq!(
            shape.kind_of("id"),
            Some(&KindDef::any_of(["string", "number"]))
        );
    }
}
