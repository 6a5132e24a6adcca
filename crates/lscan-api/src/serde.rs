use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use lscan_core::errors::{ErrorInfo, LscanError};
use lscan_core::EngineConfig;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

fn serde_error(code: &str, err: impl ToString) -> LscanError {
    LscanError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into JSON bytes with object keys in sorted order.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, LscanError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonical).map_err(|err| serde_error("json_write", err))?;
    Ok(bytes)
}

/// Converts a value into a [`Value`] tree.
pub fn to_json_value<T: Serialize>(value: &T) -> Result<Value, LscanError> {
    serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, LscanError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, LscanError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// Loads and validates an [`EngineConfig`] from a YAML file.
pub fn load_config(path: &Path) -> Result<EngineConfig, LscanError> {
    let bytes = fs::read(path).map_err(|err| {
        LscanError::Config(
            ErrorInfo::new("config_read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    let config: EngineConfig = from_yaml_slice(&bytes)?;
    config.validate()?;
    Ok(config)
}
