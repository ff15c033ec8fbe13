//! brainstem-adaptor - Navigable records over sideloaded JSON API responses
//!
//! A sideloaded response carries a top-level `results` list of
//! `{ "key": collection, "id": id }` pointers plus one flat map of rows per
//! collection. Given a [`Specification`] of which fields are foreign keys,
//! a [`Response`] turns those rows into [`Record`]s whose associations
//! resolve to other records on access.
//!
//! # Example
//!
//! ```
//! use brainstem_adaptor::{Response, Specification};
//!
//! # fn example() -> Result<(), brainstem_adaptor::Error> {
//! let spec = Specification::from_json(r#"{
//!     "workspaces": {
//!         "associations": {
//!             "participants": { "foreign_key": "participant_ids", "collection": "users" }
//!         }
//!     },
//!     "users": null
//! }"#)?;
//!
//! let response = Response::with_specification(r#"{
//!     "count": 1,
//!     "results": [{ "key": "workspaces", "id": "10" }],
//!     "workspaces": { "10": { "title": "some project", "participant_ids": ["2", "6"] } },
//!     "users": { "2": { "full_name": "bob" }, "6": { "full_name": "chaz" } }
//! }"#, spec)?;
//!
//! for workspace in response.results()? {
//!     let participants = workspace.get("participants")?;
//!     for user in participants.as_records().unwrap_or_default() {
//!         println!("{}", user.get("full_name")?.to_value());
//!     }
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod association;
pub mod error;
pub mod record;
pub mod response;
pub mod specification;

// Re-export primary types at crate root for convenience
pub use association::AssociationResolver;
pub use error::{Error, InvalidInputError, InvalidResponseError};
pub use record::{Field, Record};
pub use response::{Response, ResponseData, ResponseInput, ResultPointer};
pub use specification::{Association, Associations, CollectionSpec, Specification};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
