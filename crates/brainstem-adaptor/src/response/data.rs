//! Raw sideloaded response data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::{Error, InvalidInputError, InvalidResponseError};

const COUNT_KEY: &str = "count";
const RESULTS_KEY: &str = "results";

/// Input accepted by [`ResponseData::parse`].
///
/// Callers either hold the raw body as text or have already parsed it.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseInput {
    /// Raw JSON text.
    Text(String),
    /// An already parsed JSON value.
    Parsed(Value),
}

impl From<&str> for ResponseInput {
    fn from(s: &str) -> Self {
        ResponseInput::Text(s.to_string())
    }
}

impl From<String> for ResponseInput {
    fn from(s: String) -> Self {
        ResponseInput::Text(s)
    }
}

impl From<Value> for ResponseInput {
    fn from(value: Value) -> Self {
        ResponseInput::Parsed(value)
    }
}

impl From<Map<String, Value>> for ResponseInput {
    fn from(map: Map<String, Value>) -> Self {
        ResponseInput::Parsed(Value::Object(map))
    }
}

/// A pointer from the top-level `results` list into a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultPointer {
    /// Collection name, carried as `key` on the wire.
    #[serde(rename = "key")]
    pub collection: String,

    /// Record id within the collection.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

impl ResultPointer {
    /// Create a pointer.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// A parsed sideloaded response.
///
/// The original JSON object is kept as-is; collections and rows are read
/// from it on demand. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseData {
    raw: Value,
    count: u64,
    results: Vec<ResultPointer>,
}

impl ResponseData {
    /// Parse response input.
    ///
    /// A JSON string value is treated as raw text.
    ///
    /// # Errors
    ///
    /// - [`InvalidResponseError::Json`] if text input is not valid JSON.
    /// - [`InvalidResponseError::Malformed`] if the JSON is not an object or
    ///   its `count`/`results` members have the wrong shape.
    /// - [`InvalidInputError::UnexpectedType`] if the input is neither text
    ///   nor a JSON object.
    #[instrument(skip(input))]
    pub fn parse(input: impl Into<ResponseInput>) -> Result<Self, Error> {
        let raw = match input.into() {
            ResponseInput::Text(text) => Self::parse_text(&text)?,
            ResponseInput::Parsed(Value::String(text)) => Self::parse_text(&text)?,
            ResponseInput::Parsed(value @ Value::Object(_)) => value,
            ResponseInput::Parsed(other) => {
                return Err(InvalidInputError::UnexpectedType {
                    found: json_kind(&other).to_string(),
                }
                .into());
            }
        };

        let data = Self::from_object(raw)?;
        debug!(
            count = data.count,
            results = data.results.len(),
            "parsed response"
        );
        Ok(data)
    }

    fn parse_text(text: &str) -> Result<Value, Error> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(InvalidResponseError::Malformed {
                reason: format!("expected a JSON object, got {}", json_kind(&value)),
            }
            .into());
        }
        Ok(value)
    }

    fn from_object(raw: Value) -> Result<Self, Error> {
        let count = match raw.get(COUNT_KEY) {
            None | Some(Value::Null) => 0,
            Some(value) => value.as_u64().ok_or_else(|| InvalidResponseError::Malformed {
                reason: format!("'{COUNT_KEY}' must be a non-negative integer"),
            })?,
        };

        let results = match raw.get(RESULTS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => Vec::<ResultPointer>::deserialize(value).map_err(|e| {
                InvalidResponseError::Malformed {
                    reason: format!("invalid '{RESULTS_KEY}': {e}"),
                }
            })?,
        };

        Ok(Self {
            raw,
            count,
            results,
        })
    }

    /// The `count` member, 0 when absent.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Result pointers in input order.
    pub fn results(&self) -> &[ResultPointer] {
        &self.results
    }

    /// Raw id → row mapping for a collection, `None` if it is not in the body.
    pub fn collection(&self, name: &str) -> Option<&Map<String, Value>> {
        if Self::is_reserved(name) {
            return None;
        }
        self.raw.get(name).and_then(Value::as_object)
    }

    /// Names of all collections present in the body.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.raw
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(name, value)| !Self::is_reserved(name) && value.is_object())
            .map(|(name, _)| name.as_str())
    }

    /// Raw row stored under `id` in collection `name`.
    pub fn row(&self, name: &str, id: &str) -> Option<&Value> {
        self.collection(name).and_then(|rows| rows.get(id))
    }

    /// The original JSON object.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Consume and return the original JSON object.
    pub fn into_value(self) -> Value {
        self.raw
    }

    fn is_reserved(name: &str) -> bool {
        name == COUNT_KEY || name == RESULTS_KEY
    }
}

/// Normalise a JSON id to its string form.
///
/// Strings are taken verbatim and unsigned or signed integers are rendered in
/// decimal. Everything else is not an id.
pub(crate) fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid id: {value}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
