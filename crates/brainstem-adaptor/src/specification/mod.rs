//! Association specification.
//!
//! A [`Specification`] describes, per collection, which fields hold foreign
//! keys and which collection those keys point into. It is plain read-only
//! configuration: a response consults it by value while resolving fields.
//!
//! # Example
//!
//! ```
//! use brainstem_adaptor::{Association, CollectionSpec, Specification};
//!
//! let spec = Specification::new()
//!     .collection(
//!         "workspaces",
//!         CollectionSpec::new()
//!             .field("title")
//!             .association("participants", Association::new("participant_ids", "users")),
//!     )
//!     .known("users");
//!
//! assert!(spec.contains("users"));
//! assert!(spec.associations("users").unwrap().is_empty());
//! assert!(spec.associations("tasks").is_none());
//! ```

mod global;

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

pub use global::{clear_default, default_specification, set_default};

/// Associations declared for one collection, keyed by association name.
pub type Associations = BTreeMap<String, Association>;

pub(crate) static NO_ASSOCIATIONS: Associations = BTreeMap::new();

/// A declared relation from one collection to another.
///
/// Whether it is has-one or has-many is decided by the shape of the foreign
/// key value on each row, not by the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Association {
    /// Field on the owning row that holds the related id(s).
    pub foreign_key: String,

    /// Collection the ids point into.
    pub collection: String,
}

impl Association {
    /// Create an association definition.
    pub fn new(foreign_key: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            foreign_key: foreign_key.into(),
            collection: collection.into(),
        }
    }
}

/// Specification for a single collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSpec {
    /// Declared fields. Informational only, never enforced.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Map<String, Value>,

    /// Declared associations. `null` and a missing key both mean none.
    #[serde(default, deserialize_with = "null_as_default")]
    pub associations: Associations,
}

impl CollectionSpec {
    /// Create an empty collection specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Value::Object(Map::new()));
        self
    }

    /// Declare an association.
    pub fn association(mut self, name: impl Into<String>, association: Association) -> Self {
        self.associations.insert(name.into(), association);
        self
    }
}

/// The association specification for every collection an application knows.
///
/// Collections mapped to `null` are known but have no associations.
/// Collections missing from the mapping are unknown, and records in them
/// cannot be built while this specification is in effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specification(BTreeMap<String, Option<CollectionSpec>>);

impl Specification {
    /// Create an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a collection.
    pub fn collection(mut self, name: impl Into<String>, spec: CollectionSpec) -> Self {
        self.0.insert(name.into(), Some(spec));
        self
    }

    /// Mark a collection as known without any associations.
    pub fn known(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into(), None);
        self
    }

    /// Parse a specification from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Specification`] if the text is not valid
    /// JSON or does not have the specification layout.
    pub fn from_json(s: &str) -> Result<Self, Error> {
        serde_json::from_str(s).map_err(|e| {
            InvalidInputError::Specification {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Build a specification from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Specification`] if the value does not
    /// have the specification layout.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        serde_json::from_value(value).map_err(|e| {
            InvalidInputError::Specification {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Returns true if the collection has an entry, even a `null` one.
    pub fn contains(&self, collection: &str) -> bool {
        self.0.contains_key(collection)
    }

    /// Returns the collection's entry, `Some(None)` for a `null` entry.
    pub fn get(&self, collection: &str) -> Option<Option<&CollectionSpec>> {
        self.0.get(collection).map(Option::as_ref)
    }

    /// Returns the associations declared for a collection.
    ///
    /// `None` means the collection is unknown. A known collection without
    /// associations yields an empty map.
    pub fn associations(&self, collection: &str) -> Option<&Associations> {
        self.0.get(collection).map(|entry| match entry {
            Some(spec) => &spec.associations,
            None => &NO_ASSOCIATIONS,
        })
    }

    /// Iterate over the known collection names.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of known collections.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no collection is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users_spec() -> Value {
        json!({
            "users": {
                "fields": { "name": {} },
                "associations": {
                    "friends": { "foreign_key": "friend_ids", "collection": "users" },
                    "enemy": { "foreign_key": "enemy_id", "collection": "users" }
                }
            }
        })
    }

    #[test]
    fn from_value_reads_associations() {
        let spec = Specification::from_value(users_spec()).unwrap();
        let associations = spec.associations("users").unwrap();

        assert_eq!(associations.len(), 2);
        assert_eq!(associations["friends"], Association::new("friend_ids", "users"));
        assert!(spec.get("users").unwrap().unwrap().fields.contains_key("name"));
    }

    #[test]
    fn null_entry_is_known_without_associations() {
        let spec = Specification::from_json(r#"{"users": null}"#).unwrap();

        assert!(spec.contains("users"));
        assert_eq!(spec.get("users"), Some(None));
        assert!(spec.associations("users").unwrap().is_empty());
    }

    #[test]
    fn missing_and_null_associations_are_equivalent() {
        let spec = Specification::from_value(json!({
            "users": { "fields": { "name": {} } },
            "tasks": { "associations": null },
            "projects": { "associations": {} }
        }))
        .unwrap();

        for name in ["users", "tasks", "projects"] {
            assert!(spec.associations(name).unwrap().is_empty(), "{name}");
        }
    }

    #[test]
    fn unknown_collection_has_no_entry() {
        let spec = Specification::from_value(users_spec()).unwrap();
        assert!(!spec.contains("workspaces"));
        assert!(spec.associations("workspaces").is_none());
    }

    #[test]
    fn builder_matches_json() {
        let built = Specification::new().collection(
            "users",
            CollectionSpec::new()
                .field("name")
                .association("friends", Association::new("friend_ids", "users"))
                .association("enemy", Association::new("enemy_id", "users")),
        );

        assert_eq!(built, Specification::from_value(users_spec()).unwrap());
    }

    #[test]
    fn invalid_specification_fails() {
        let err = Specification::from_json("not json").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Specification { .. })
        ));

        let err = Specification::from_value(json!({
            "users": { "associations": { "friends": { "collection": "users" } } }
        }))
        .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
