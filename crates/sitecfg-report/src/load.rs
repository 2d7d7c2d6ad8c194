//! # Report Document Loading

use std::path::Path;

use serde_json::Value;
use sitecfg_schema::{
    load_value, parse_document, DocumentError, SchemaValidator, REPORT_CONFIG_SCHEMA,
};

use crate::capability::RendererCapabilities;
use crate::validate::{validate_report, ValidatedReport};

/// Envelope-check, deserialize and validate a parsed report document.
///
/// # Errors
///
/// Returns `DocumentError::SchemaViolation` or `DocumentError::Deserialize`
/// for a malformed envelope and `DocumentError::Config` for the first
/// semantic violation.
pub fn parse_report_config(
    value: Value,
    schemas: &SchemaValidator,
    capabilities: &RendererCapabilities,
    source_name: &str,
) -> Result<ValidatedReport, DocumentError> {
    let config = parse_document(value, schemas, REPORT_CONFIG_SCHEMA, source_name)?;
    Ok(validate_report(config, capabilities)?)
}

/// Load and validate a report document from a JSON or YAML file.
pub fn load_report_config(
    path: &Path,
    schemas: &SchemaValidator,
    capabilities: &RendererCapabilities,
) -> Result<ValidatedReport, DocumentError> {
    let value = load_value(path)?;
    parse_report_config(value, schemas, capabilities, &path.display().to_string())
}
