//! Get command implementation.
//!
//! Paths are dotted. The first segment picks a record, either by result
//! index (`0`) or as `collection/id`. Every later segment is a field name,
//! resolved through associations, or an index into a list.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;
use serde_json::Value;
use tracing::debug;

use brainstem_adaptor::{Field, Record, Response};

use crate::input;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Response file, or `-` for stdin
    pub response: PathBuf,

    /// Path to resolve (e.g. `0.participants`, `users/2.full_name`).
    ///
    /// Segments are split on `.` first, so a `collection/id` start cannot
    /// address an id that itself contains `.`; start from its result index
    /// instead.
    pub path: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: GetArgs, spec: Option<&Path>) -> Result<()> {
    let response = input::load_response(&args.response, spec)?;
    let field = resolve_path(&response, &args.path)?;

    output::json_with(&field, args.pretty)
}

/// Walk `path` from its starting record.
pub fn resolve_path<'r>(response: &'r Response, path: &str) -> Result<Field<'r>> {
    let mut segments = path.split('.');
    let start = segments.next().filter(|s| !s.is_empty()).context("Empty path")?;

    let mut current = Field::Record(start_record(response, start)?);
    for segment in segments {
        debug!(segment, "descending");
        current = step(current, segment)?;
    }

    Ok(current)
}

fn start_record<'r>(response: &'r Response, segment: &str) -> Result<Record<'r>> {
    if let Some((collection, id)) = segment.split_once('/') {
        return response
            .find(collection, id)
            .with_context(|| format!("Failed to load {collection}/{id}"));
    }

    let index = parse_index(segment)?;
    let mut results = response.results().context("Failed to resolve results")?;
    if index >= results.len() {
        bail!("Result index {index} out of range ({} results)", results.len());
    }
    Ok(results.swap_remove(index))
}

fn step<'r>(current: Field<'r>, segment: &str) -> Result<Field<'r>> {
    match current {
        Field::Record(record) => record
            .get(segment)
            .with_context(|| format!("Failed to resolve '{segment}'")),
        Field::Records(mut records) => {
            let index = parse_index(segment)?;
            if index >= records.len() {
                bail!("Index {index} out of range ({} records)", records.len());
            }
            Ok(Field::Record(records.swap_remove(index)))
        }
        Field::Value(Value::Object(map)) => Ok(map
            .get(segment)
            .filter(|value| !value.is_null())
            .map_or(Field::Absent, Field::Value)),
        Field::Value(Value::Array(items)) => {
            let index = parse_index(segment)?;
            Ok(items
                .get(index)
                .filter(|value| !value.is_null())
                .map_or(Field::Absent, Field::Value))
        }
        Field::Value(_) => bail!("Cannot descend into '{segment}' of a scalar value"),
        Field::Absent => bail!("Cannot descend into '{segment}' of a null value"),
    }
}

fn parse_index(segment: &str) -> Result<usize> {
    segment
        .parse()
        .map_err(|_| anyhow!("Expected an index, got '{segment}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainstem_adaptor::{Association, CollectionSpec, Specification};
    use serde_json::json;

    fn response() -> Response {
        let spec = Specification::new()
            .collection(
                "workspaces",
                CollectionSpec::new()
                    .association("participants", Association::new("participant_ids", "users")),
            )
            .known("users");

        Response::with_specification(
            json!({
                "count": 1,
                "results": [{ "key": "workspaces", "id": "10" }],
                "workspaces": {
                    "10": { "title": "some project", "participant_ids": ["2", "6"], "tags": ["a"] }
                },
                "users": {
                    "2": { "full_name": "bob", "address": { "city": "Oslo" } },
                    "6": { "full_name": "chaz", "address": null }
                }
            }),
            spec,
        )
        .unwrap()
    }

    #[test]
    fn resolves_through_associations() {
        let response = response();

        let field = resolve_path(&response, "0.participants.1.full_name").unwrap();
        assert_eq!(field, json!("chaz"));

        let field = resolve_path(&response, "users/2.address.city").unwrap();
        assert_eq!(field, json!("Oslo"));

        let field = resolve_path(&response, "0.tags.0").unwrap();
        assert_eq!(field, json!("a"));
    }

    #[test]
    fn whole_records_and_lists() {
        let response = response();

        let field = resolve_path(&response, "0.participants").unwrap();
        assert_eq!(field.as_records().unwrap().len(), 2);

        let field = resolve_path(&response, "workspaces/10").unwrap();
        assert_eq!(field.as_record().unwrap().id(), "10");
    }

    #[test]
    fn bad_paths_fail() {
        let response = response();

        assert!(resolve_path(&response, "").is_err());
        assert!(resolve_path(&response, "3").is_err());
        assert!(resolve_path(&response, "first").is_err());
        assert!(resolve_path(&response, "0.participants.9").is_err());
        assert!(resolve_path(&response, "users/6.address.city").is_err());
        assert!(resolve_path(&response, "0.title.length").is_err());
        assert!(resolve_path(&response, "users/99").is_err());
    }

    #[test]
    fn dotted_ids_need_a_result_index() {
        let response = Response::without_specification(json!({
            "count": 1,
            "results": [{ "key": "versions", "id": "1.5" }],
            "versions": { "1.5": { "name": "point five" } }
        }))
        .unwrap();

        // Read as `versions/1` then field `5`.
        let field = resolve_path(&response, "versions/1.5").unwrap();
        assert!(field.is_absent());

        let field = resolve_path(&response, "0.name").unwrap();
        assert_eq!(field, json!("point five"));
    }
}
