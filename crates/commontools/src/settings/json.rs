//! `appsettings.json` → flat settings keys.
//!
//! Objects nest with `:`, array elements are keyed by index, scalars keep
//! their JSON text (strings unquoted) and `null` values are left out.

use serde_json::Value;

use super::{Settings, join_key};

pub(super) fn parse(contents: &str) -> Result<Settings, String> {
    let mut settings = Settings::default();
    if contents.trim().is_empty() {
        return Ok(settings);
    }

    let value: Value = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "top-level JSON element must be an object, found {}",
                kind(&other)
            ));
        }
    };

    for (key, value) in &map {
        flatten(key, value, &mut settings);
    }
    Ok(settings)
}

fn flatten(path: &str, value: &Value, out: &mut Settings) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&join_key(path, key), child, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten(&join_key(path, &i.to_string()), child, out);
            }
        }
        Value::Null => log::trace!("skipping null setting {path}"),
        Value::String(s) => {
            out.insert(path, s.as_str());
        }
        Value::Bool(_) | Value::Number(_) => {
            out.insert(path, value.to_string());
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
