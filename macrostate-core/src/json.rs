//! NaN-safe JSON output.

use std::path::Path;

use macrostate_types::MacroError;
use serde::Serialize;
use serde_json::Value;

/// Replace every number that is not a finite `f64` with `null`, recursively.
///
/// `serde_json` never stores NaN or infinities itself, so in practice this
/// normalizes values built elsewhere (for example through arbitrary-precision
/// parsing) before they are persisted.
#[must_use]
pub fn sanitize_json(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            if n.is_f64() && !n.as_f64().is_some_and(f64::is_finite) {
                Value::Null
            } else {
                Value::Number(n)
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_json).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, sanitize_json(v))).collect())
        }
        other => other,
    }
}

/// Serialize to pretty JSON with sorted keys, two-space indent and a trailing
/// newline. Non-finite floats become `null`.
///
/// # Errors
/// Returns `Serialization` when `value` cannot be represented as JSON (for
/// example a map with non-string keys).
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, MacroError> {
    // Going through `Value` sorts object keys (the default map is a BTreeMap)
    // and turns non-finite floats into null.
    let tree = serde_json::to_value(value).map_err(|e| MacroError::Serialization(e.to_string()))?;
    let mut out = serde_json::to_string_pretty(&sanitize_json(tree))
        .map_err(|e| MacroError::Serialization(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

/// Write [`to_json_pretty`] output to `path`, creating parent directories.
///
/// # Errors
/// Returns `Serialization` or `Io` on failure.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<(), MacroError> {
    let path = path.as_ref();
    let text = to_json_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}
