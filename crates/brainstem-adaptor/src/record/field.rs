//! Result of a record field access.

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::Record;

/// What a field access resolved to.
///
/// Compares equal to a JSON value the way [`Field::to_value`] renders it,
/// so `Absent` equals `null` and records equal their raw rows.
#[derive(Debug, Clone)]
pub enum Field<'r> {
    /// A plain field, passed through unchanged.
    Value(&'r Value),
    /// A has-one association.
    Record(Record<'r>),
    /// A has-many association, in foreign key order.
    Records(Vec<Record<'r>>),
    /// A missing or `null` field, or a `null` foreign key.
    Absent,
}

impl<'r> Field<'r> {
    pub(crate) fn from_raw(raw: Option<&'r Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Field::Absent,
            Some(value) => Field::Value(value),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// The plain value, if this is one.
    pub fn as_value(&self) -> Option<&'r Value> {
        match self {
            Field::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// The related record, if this is a has-one association.
    pub fn as_record(&self) -> Option<&Record<'r>> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    /// The related records, if this is a has-many association.
    pub fn as_records(&self) -> Option<&[Record<'r>]> {
        match self {
            Field::Records(records) => Some(records.as_slice()),
            _ => None,
        }
    }

    pub fn into_record(self) -> Option<Record<'r>> {
        match self {
            Field::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_records(self) -> Option<Vec<Record<'r>>> {
        match self {
            Field::Records(records) => Some(records),
            _ => None,
        }
    }

    /// Materialise as JSON, records rendered as their raw rows.
    pub fn to_value(&self) -> Value {
        match self {
            Field::Value(value) => (*value).clone(),
            Field::Record(record) => record.to_value(),
            Field::Records(records) => Value::Array(records.iter().map(Record::to_value).collect()),
            Field::Absent => Value::Null,
        }
    }
}

impl PartialEq<Value> for Field<'_> {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Field::Value(value), other) => *value == other,
            (Field::Record(record), other) => record == other,
            (Field::Records(records), Value::Array(rows)) => {
                records.len() == rows.len()
                    && records.iter().zip(rows).all(|(record, row)| record == row)
            }
            (Field::Records(_), _) => false,
            (Field::Absent, other) => other.is_null(),
        }
    }
}

impl Serialize for Field<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Value(value) => value.serialize(serializer),
            Field::Record(record) => record.serialize(serializer),
            Field::Records(records) => records.serialize(serializer),
            Field::Absent => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Response;
    use serde_json::json;

    fn response() -> Response {
        Response::without_specification(json!({
            "users": {
                "2": { "full_name": "bob" },
                "6": { "full_name": "chaz" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn absent_equals_null() {
        assert_eq!(Field::Absent, Value::Null);
        assert_ne!(Field::Absent, json!(0));
        assert_eq!(Field::from_raw(Some(&Value::Null)).to_value(), Value::Null);
    }

    #[test]
    fn records_compare_as_rows() {
        let response = response();
        let records = vec![
            response.find("users", "2").unwrap(),
            response.find("users", "6").unwrap(),
        ];
        let field = Field::Records(records);

        assert_eq!(field, json!([{ "full_name": "bob" }, { "full_name": "chaz" }]));
        assert_ne!(field, json!([{ "full_name": "chaz" }, { "full_name": "bob" }]));
        assert_ne!(field, json!([{ "full_name": "bob" }]));
        assert_eq!(field.as_records().map(|records| records.len()), Some(2));
    }

    #[test]
    fn serializes_like_to_value() {
        let response = response();
        let field = Field::Record(response.find("users", "6").unwrap());

        assert_eq!(serde_json::to_value(&field).unwrap(), field.to_value());
        assert_eq!(serde_json::to_value(Field::Absent).unwrap(), Value::Null);
    }
}
