//! # Navigation Document Loading
//!
//! Envelope check, deserialization and validation in one call.

use std::path::Path;

use serde_json::Value;
use sitecfg_schema::{load_value, parse_document, DocumentError, SchemaValidator, SITE_CONFIG_SCHEMA};

use crate::validate::{validate, ValidatedSiteConfig};

/// Validate an already-parsed navigation document.
///
/// # Errors
///
/// Returns `DocumentError::SchemaViolation` or `DocumentError::Deserialize`
/// for a malformed envelope and `DocumentError::Config` for the first
/// semantic violation.
pub fn parse_site_config(
    value: Value,
    schemas: &SchemaValidator,
    source_name: &str,
) -> Result<ValidatedSiteConfig, DocumentError> {
    let config = parse_document(value, schemas, SITE_CONFIG_SCHEMA, source_name)?;
    Ok(validate(config)?)
}

/// Load and validate a navigation document from a JSON or YAML file.
pub fn load_site_config(
    path: &Path,
    schemas: &SchemaValidator,
) -> Result<ValidatedSiteConfig, DocumentError> {
    let value = load_value(path)?;
    parse_site_config(value, schemas, &path.display().to_string())
}
