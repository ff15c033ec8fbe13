//! Loading responses and specifications from disk or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use brainstem_adaptor::{Response, Specification};

/// Read a file, or stdin when the path is `-`.
fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read response from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load the specification file, if one was given.
pub fn load_specification(path: Option<&Path>) -> Result<Option<Specification>> {
    let Some(path) = path else {
        debug!("no specification given, associations will not resolve");
        return Ok(None);
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read specification {}", path.display()))?;
    let spec = Specification::from_json(&text).context("Invalid specification file")?;
    debug!(collections = spec.len(), path = %path.display(), "loaded specification");

    Ok(Some(spec))
}

/// Load and parse a response, resolving with `spec` when given.
pub fn load_response(path: &Path, spec: Option<&Path>) -> Result<Response> {
    let body = read_source(path)?;
    let response = match load_specification(spec)? {
        Some(spec) => Response::with_specification(body, spec),
        None => Response::without_specification(body),
    };

    response.context("Invalid response")
}
