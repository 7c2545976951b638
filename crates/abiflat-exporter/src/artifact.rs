//! Build artifact access
//!
//! Compilers lay artifacts out as `<root>/<Name>.sol/<Name>.json`. Only the
//! top-level `abi` array is read; bytecode and the rest of the metadata are
//! ignored.

use abiflat_runtime::{AbiflatError, ExportEntry, Result};
use serde_json::Value;
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Top-level field holding the contract ABI
pub const ABI_FIELD: &str = "abi";

/// Returns `<base>/<root>/<Artifact>.sol/<Artifact>.json`
///
/// An absolute source root replaces `base`.
pub fn artifact_path(base: &Path, entry: &ExportEntry) -> PathBuf {
    let artifact = entry.artifact();
    base.join(entry.root()).join(format!("{}.sol", artifact)).join(format!("{}.json", artifact))
}

/// Reads an artifact and extracts its `abi` array
pub fn read_abi(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => AbiflatError::artifact_not_found(path),
        _ => AbiflatError::IoError(err),
    })?;

    debug!(path = %path.display(), bytes = content.len(), "read artifact");

    extract_abi(path, &content)
}

/// Parses artifact bytes and pulls out the `abi` array
///
/// Invalid UTF-8 counts as malformed JSON. Numbers keep their literal form.
/// `path` is only used for error reporting.
pub fn extract_abi(path: &Path, content: &[u8]) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_slice(content)
        .map_err(|err| AbiflatError::malformed_artifact(path, err.to_string()))?;

    let mut fields = match document {
        Value::Object(fields) => fields,
        other => {
            return Err(AbiflatError::malformed_artifact(
                path,
                format!("expected a JSON object, found {}", kind_of(&other)),
            ))
        }
    };

    match fields.remove(ABI_FIELD) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(AbiflatError::malformed_artifact(
            path,
            format!("`abi` is {}, expected an array", kind_of(&other)),
        )),
        None => Err(AbiflatError::missing_abi(path)),
    }
}

/// Serializes an ABI in compact form: no whitespace, key order kept
pub fn to_compact_json(abi: &[Value]) -> Result<String> {
    serde_json::to_string(abi).map_err(|err| AbiflatError::other(err.to_string()))
}

/// Writes the ABI to `path`, truncating any previous content
///
/// The parent directory must already exist. Returns the number of bytes
/// written.
pub fn write_abi(path: &Path, abi: &[Value]) -> Result<usize> {
    let json = to_compact_json(abi)?;
    fs::write(path, &json).map_err(|err| AbiflatError::output_write(path, err))?;

    debug!(path = %path.display(), bytes = json.len(), "wrote abi");

    Ok(json.len())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
