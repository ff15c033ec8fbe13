//! Error types for the brainstem adaptor.
//!
//! Two families of failures exist: the response (or a record inside it) is
//! malformed, or the caller handed over input of the wrong shape.

use thiserror::Error;

/// The unified error type for adaptor operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The response body or one of its records is malformed.
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] InvalidResponseError),

    /// The caller supplied input of an unexpected type or shape.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if this is an [`InvalidResponseError`].
    pub fn is_invalid_response(&self) -> bool {
        matches!(self, Error::InvalidResponse(_))
    }

    /// Returns true if this is an [`InvalidInputError`].
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// Domain-level malformations of a sideloaded response.
///
/// Every message names whether the association specification, a collection,
/// or a record was at fault.
#[derive(Debug, Error)]
pub enum InvalidResponseError {
    /// The response text is not valid JSON.
    #[error("malformed JSON: {message}")]
    Json { message: String },

    /// The response is JSON but does not follow the sideloaded layout.
    #[error("malformed response: {reason}")]
    Malformed { reason: String },

    /// The specification has no entry for the collection.
    #[error("no association specification for collection '{collection}'")]
    UnknownCollection { collection: String },

    /// The collection is not part of the response body.
    #[error("collection '{collection}' is not included in response")]
    MissingCollection { collection: String },

    /// The id is not listed in an otherwise present collection.
    #[error("record '{id}' is not listed in collection '{collection}'")]
    MissingRecord { collection: String, id: String },

    /// The row stored under the id is not a JSON object.
    #[error("record '{id}' in collection '{collection}' is not an object")]
    MalformedRecord { collection: String, id: String },

    /// A foreign key holds something other than an id, a list of ids, or null.
    #[error(
        "record '{id}' in collection '{collection}' has an invalid association key '{foreign_key}'"
    )]
    InvalidForeignKey {
        collection: String,
        id: String,
        foreign_key: String,
    },
}

impl From<serde_json::Error> for InvalidResponseError {
    fn from(err: serde_json::Error) -> Self {
        InvalidResponseError::Json {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(InvalidResponseError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Response input was neither text nor a JSON object.
    #[error("Expected String or JSON object, got {found}")]
    UnexpectedType { found: String },

    /// The association specification could not be deserialized.
    #[error("invalid specification: {reason}")]
    Specification { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_part() {
        let err = InvalidResponseError::UnknownCollection {
            collection: "users".to_string(),
        };
        assert!(err.to_string().contains("association"));

        let err = InvalidResponseError::MissingCollection {
            collection: "users".to_string(),
        };
        assert!(err.to_string().contains("collection"));

        let err = InvalidResponseError::MissingRecord {
            collection: "users".to_string(),
            id: "12".to_string(),
        };
        assert!(err.to_string().contains("record"));
    }

    #[test]
    fn json_errors_become_invalid_response() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(parse_err);

        assert!(err.is_invalid_response());
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn unexpected_type_mentions_expected_string() {
        let err = Error::from(InvalidInputError::UnexpectedType {
            found: "null".to_string(),
        });
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Expected String"));
    }
}
