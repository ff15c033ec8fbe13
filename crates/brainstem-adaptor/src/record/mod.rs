//! Records: navigable views over one row of a response.

mod field;

use std::sync::LazyLock;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::trace;

use crate::association::AssociationResolver;
use crate::error::{Error, InvalidResponseError};
use crate::response::{Response, id_from_value};
use crate::specification::{Association, Associations, NO_ASSOCIATIONS};

pub use field::Field;

static EMPTY_ROW: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// One row of one collection, viewed through the response that holds it.
///
/// A record never copies its row. Every access reads
/// `response[collection_name][id]` again.
///
/// Equality compares rows by value: two records are equal when their rows
/// are, and a record equals a raw row with the same content.
#[derive(Debug, Clone)]
pub struct Record<'r> {
    collection_name: String,
    id: String,
    response: &'r Response,
    associations: Option<&'r Associations>,
}

impl<'r> Record<'r> {
    /// Build the record for `(collection_name, id)` inside `response`.
    ///
    /// When the response has a specification, the collection must be known
    /// to it, be present in the body and hold a row object under `id`.
    /// Without a specification none of this is checked: the record reads as
    /// an empty row if the body lacks it, and never fails on access.
    ///
    /// # Errors
    ///
    /// Only with a specification:
    ///
    /// - [`InvalidResponseError::UnknownCollection`] if the specification has
    ///   no entry for the collection.
    /// - [`InvalidResponseError::MissingCollection`] if the body lacks the
    ///   collection.
    /// - [`InvalidResponseError::MissingRecord`] if the collection lacks `id`.
    /// - [`InvalidResponseError::MalformedRecord`] if the row is not an object.
    pub fn new(
        collection_name: impl Into<String>,
        id: impl Into<String>,
        response: &'r Response,
    ) -> Result<Self, Error> {
        let collection_name = collection_name.into();
        let id = id.into();

        // Without a specification every field is passed through raw, and a
        // record missing from the body reads as an empty row.
        let Some(specification) = response.specification() else {
            return Ok(Self {
                collection_name,
                id,
                response,
                associations: None,
            });
        };

        let associations = specification
            .associations(&collection_name)
            .ok_or_else(|| InvalidResponseError::UnknownCollection {
                collection: collection_name.clone(),
            })?;

        let rows = response.collection(&collection_name).ok_or_else(|| {
            InvalidResponseError::MissingCollection {
                collection: collection_name.clone(),
            }
        })?;

        match rows.get(&id) {
            None => {
                return Err(InvalidResponseError::MissingRecord {
                    collection: collection_name,
                    id,
                }
                .into());
            }
            Some(row) if !row.is_object() => {
                return Err(InvalidResponseError::MalformedRecord {
                    collection: collection_name,
                    id,
                }
                .into());
            }
            Some(_) => {}
        }

        Ok(Self {
            collection_name,
            id,
            response,
            associations: Some(associations),
        })
    }

    /// Record id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the collection the record lives in.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// The owning response.
    pub fn response(&self) -> &'r Response {
        self.response
    }

    /// Associations declared for this record's collection.
    ///
    /// Empty when the response has no specification.
    pub fn associations_specification(&self) -> &'r Associations {
        self.associations.unwrap_or(&NO_ASSOCIATIONS)
    }

    /// The raw row.
    pub fn data(&self) -> &'r Map<String, Value> {
        self.response
            .record_data(&self.collection_name, &self.id)
            .and_then(Value::as_object)
            .unwrap_or(&*EMPTY_ROW)
    }

    /// The raw row as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.data().clone())
    }

    /// Returns true if `name` is a declared association.
    pub fn has_association(&self, name: &str) -> bool {
        AssociationResolver::declares(self.associations_specification(), name)
    }

    /// The association called `name`, if declared.
    pub fn association_by_name(&self, name: &str) -> Option<&'r Association> {
        AssociationResolver::lookup(self.associations_specification(), name)
    }

    /// Access a field.
    ///
    /// A declared association resolves through its foreign key: an array of
    /// ids yields [`Field::Records`], a single id yields [`Field::Record`],
    /// and a null or missing key yields [`Field::Absent`]. Any other name is
    /// passed through raw, with missing and `null` fields as
    /// [`Field::Absent`].
    ///
    /// # Errors
    ///
    /// Only association resolution can fail: with
    /// [`InvalidResponseError::InvalidForeignKey`] when the key holds
    /// something other than ids, or like [`Record::new`] when a related
    /// record does not exist.
    pub fn get(&self, name: &str) -> Result<Field<'r>, Error> {
        match self.association_by_name(name) {
            Some(association) => self.resolve(name, association),
            None => Ok(Field::from_raw(self.data().get(name))),
        }
    }

    /// Value equality against a raw row.
    pub fn row_eq(&self, row: &Map<String, Value>) -> bool {
        self.data() == row
    }

    fn resolve(&self, name: &str, association: &'r Association) -> Result<Field<'r>, Error> {
        let key = self.data().get(&association.foreign_key);
        trace!(
            collection = %self.collection_name,
            id = %self.id,
            association = name,
            foreign_key = %association.foreign_key,
            target = %association.collection,
            "resolving association"
        );

        match key {
            None | Some(Value::Null) => Ok(Field::Absent),
            Some(Value::Array(ids)) => ids
                .iter()
                .map(|value| self.related(association, value))
                .collect::<Result<Vec<_>, _>>()
                .map(Field::Records),
            Some(value) => self.related(association, value).map(Field::Record),
        }
    }

    fn related(&self, association: &Association, value: &Value) -> Result<Record<'r>, Error> {
        let id = id_from_value(value).ok_or_else(|| InvalidResponseError::InvalidForeignKey {
            collection: self.collection_name.clone(),
            id: self.id.clone(),
            foreign_key: association.foreign_key.clone(),
        })?;
        Record::new(association.collection.as_str(), id, self.response)
    }
}

impl<'a, 'b> PartialEq<Record<'b>> for Record<'a> {
    fn eq(&self, other: &Record<'b>) -> bool {
        self.row_eq(other.data())
    }
}

impl PartialEq<Map<String, Value>> for Record<'_> {
    fn eq(&self, other: &Map<String, Value>) -> bool {
        self.row_eq(other)
    }
}

impl PartialEq<Value> for Record<'_> {
    fn eq(&self, other: &Value) -> bool {
        other.as_object().is_some_and(|row| self.row_eq(row))
    }
}

impl Serialize for Record<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.data().serialize(serializer)
    }
}
