//! # Document Loading
//!
//! Reads configuration documents as JSON or YAML and produces a
//! `serde_json::Value` tree, or a typed model after the envelope check.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::validate::{DocumentError, SchemaValidator};

/// On-disk encoding of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Determine the format from a file extension.
    ///
    /// `.yaml`/`.yml` are YAML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse document text into a JSON value tree.
///
/// # Errors
///
/// Returns `DocumentError::Parse` if the text is not valid in `format`.
pub fn parse_value(
    content: &str,
    format: DocumentFormat,
    source_name: &str,
) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| DocumentError::Parse {
            source_name: source_name.to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
        DocumentFormat::Yaml => {
            let yaml_value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| DocumentError::Parse {
                    source_name: source_name.to_string(),
                    reason: format!("invalid YAML: {e}"),
                })?;
            yaml_to_json_value(&yaml_value).map_err(|reason| DocumentError::Parse {
                source_name: source_name.to_string(),
                reason: format!("YAML-to-JSON conversion failed: {reason}"),
            })
        }
    }
}

/// Read a document file into a JSON value tree.
///
/// # Errors
///
/// Returns `DocumentError::Load` if the file cannot be read and
/// `DocumentError::Parse` if it cannot be parsed.
pub fn load_value(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|e| DocumentError::Load {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    parse_value(&content, DocumentFormat::from_path(path), &path.display().to_string())
}

/// Envelope-check a JSON value against `schema_name` and deserialize it.
///
/// # Errors
///
/// Returns `DocumentError::SchemaViolation` if the envelope check fails and
/// `DocumentError::Deserialize` if the value does not map onto `T`.
pub fn parse_document<T: DeserializeOwned>(
    value: Value,
    schemas: &SchemaValidator,
    schema_name: &str,
    source_name: &str,
) -> Result<T, DocumentError> {
    schemas.validate_document(&value, schema_name, source_name)?;
    serde_json::from_value(value).map_err(|e| DocumentError::Deserialize {
        source_name: source_name.to_string(),
        reason: e.to_string(),
    })
}

/// Read a document file, envelope-check it, and deserialize it.
pub fn load_document<T: DeserializeOwned>(
    path: &Path,
    schemas: &SchemaValidator,
    schema_name: &str,
) -> Result<T, DocumentError> {
    let value = load_value(path)?;
    parse_document(value, schemas, schema_name, &path.display().to_string())
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Configuration documents only use the JSON-compatible subset of YAML;
/// tags are dropped and non-string keys are stringified.
pub(crate) fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
