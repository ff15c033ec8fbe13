//! Sideloaded responses.
//!
//! A [`Response`] owns the parsed body and the specification it resolves
//! associations with. Records borrow it.

mod data;

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::Error;
use crate::record::Record;
use crate::specification::{self, Specification};

pub(crate) use data::id_from_value;
pub use data::{ResponseData, ResponseInput, ResultPointer};

/// A parsed response together with its association specification.
///
/// # Example
///
/// ```
/// use brainstem_adaptor::{Association, CollectionSpec, Response, Specification};
/// use serde_json::json;
///
/// let spec = Specification::new()
///     .collection(
///         "workspaces",
///         CollectionSpec::new().association("owner", Association::new("owner_id", "users")),
///     )
///     .known("users");
///
/// let response = Response::with_specification(
///     json!({
///         "count": 1,
///         "results": [{ "key": "workspaces", "id": "10" }],
///         "workspaces": { "10": { "title": "some project", "owner_id": "2" } },
///         "users": { "2": { "full_name": "bob" } }
///     }),
///     spec,
/// )
/// .unwrap();
///
/// let results = response.results().unwrap();
/// let owner = results[0].get("owner").unwrap();
/// assert_eq!(owner, json!({ "full_name": "bob" }));
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    data: ResponseData,
    specification: Option<Arc<Specification>>,
}

impl Response {
    /// Parse a response using the process-wide default specification.
    ///
    /// Without a registered default, fields are passed through raw.
    ///
    /// # Errors
    ///
    /// See [`ResponseData::parse`].
    pub fn new(input: impl Into<ResponseInput>) -> Result<Self, Error> {
        let data = ResponseData::parse(input)?;
        Ok(Self::from_data(data, specification::default_specification()))
    }

    /// Parse a response that resolves associations with `specification`.
    ///
    /// # Errors
    ///
    /// See [`ResponseData::parse`].
    pub fn with_specification(
        input: impl Into<ResponseInput>,
        specification: impl Into<Arc<Specification>>,
    ) -> Result<Self, Error> {
        let data = ResponseData::parse(input)?;
        Ok(Self::from_data(data, Some(specification.into())))
    }

    /// Parse a response without any specification.
    ///
    /// # Errors
    ///
    /// See [`ResponseData::parse`].
    pub fn without_specification(input: impl Into<ResponseInput>) -> Result<Self, Error> {
        let data = ResponseData::parse(input)?;
        Ok(Self::from_data(data, None))
    }

    /// Wrap already parsed data.
    pub fn from_data(data: ResponseData, specification: Option<Arc<Specification>>) -> Self {
        debug!(
            has_specification = specification.is_some(),
            "building response"
        );
        Self {
            data,
            specification,
        }
    }

    /// The specification in effect, if any.
    pub fn specification(&self) -> Option<&Specification> {
        self.specification.as_deref()
    }

    /// The parsed data.
    pub fn data(&self) -> &ResponseData {
        &self.data
    }

    /// The original JSON object.
    pub fn response_data(&self) -> &Value {
        self.data.as_value()
    }

    /// The `count` member.
    pub fn count(&self) -> u64 {
        self.data.count()
    }

    /// Result pointers in input order.
    pub fn pointers(&self) -> &[ResultPointer] {
        self.data.results()
    }

    /// Records for every result pointer, in input order.
    ///
    /// Rebuilt on every call.
    ///
    /// # Errors
    ///
    /// Fails like [`Record::new`] if a pointer does not resolve.
    pub fn results(&self) -> Result<Vec<Record<'_>>, Error> {
        self.pointers()
            .iter()
            .map(|pointer| Record::new(pointer.collection.as_str(), pointer.id.as_str(), self))
            .collect()
    }

    /// Raw id → row mapping of a collection, `None` if the body lacks it.
    pub fn collection(&self, name: &str) -> Option<&Map<String, Value>> {
        self.data.collection(name)
    }

    /// Names of all collections in the body.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.data.collection_names()
    }

    /// Raw row for `(name, id)`.
    pub fn record_data(&self, name: &str, id: &str) -> Option<&Value> {
        self.data.row(name, id)
    }

    /// Build the record for `(name, id)`.
    ///
    /// # Errors
    ///
    /// See [`Record::new`].
    pub fn find(&self, name: &str, id: &str) -> Result<Record<'_>, Error> {
        Record::new(name, id, self)
    }
}
