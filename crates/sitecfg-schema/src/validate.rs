//! # Envelope Validation
//!
//! Structural validation of configuration documents against the embedded
//! JSON Schema definitions (Draft 2020-12).
//!
//! ## Invariant
//!
//! A document that fails the envelope check never reaches deserialization.
//! Violations are reported with the instance path, the schema path, and a
//! human-readable message.
//!
//! The built-in schemas are compiled into the crate and only use internal
//! `#/$defs/...` references.

use std::collections::HashMap;
use std::fmt;

use jsonschema::Validator;
use serde_json::Value;
use sitecfg_core::ConfigError;
use thiserror::Error;

/// Name of the embedded navigation document schema.
pub const SITE_CONFIG_SCHEMA: &str = "site-config.schema.json";

/// Name of the embedded report layout document schema.
pub const REPORT_CONFIG_SCHEMA: &str = "report-config.schema.json";

const SITE_CONFIG_SCHEMA_SOURCE: &str = include_str!("../schemas/site-config.schema.json");
const REPORT_CONFIG_SCHEMA_SOURCE: &str = include_str!("../schemas/report-config.schema.json");

/// Error while loading or validating a configuration document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("document load error for '{path}': {reason}")]
    Load {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The document text is not valid JSON/YAML.
    #[error("document parse error for '{source_name}': {reason}")]
    Parse {
        /// File path or other label of the document source.
        source_name: String,
        /// Parser error message.
        reason: String,
    },

    /// The document does not conform to its envelope schema.
    #[error("document '{source_name}' does not match schema '{schema_name}':\n{violations}")]
    SchemaViolation {
        /// File path or other label of the document source.
        source_name: String,
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The named schema is not registered.
    #[error("unknown schema '{schema_name}'")]
    UnknownSchema {
        /// The schema name that was requested.
        schema_name: String,
    },

    /// The schema itself could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema name.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The document passed the envelope check but could not be mapped
    /// onto the typed model.
    #[error("document '{source_name}' could not be deserialized: {reason}")]
    Deserialize {
        /// File path or other label of the document source.
        source_name: String,
        /// Deserializer error message.
        reason: String,
    },

    /// The document is well-formed but semantically invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A single envelope violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of envelope violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A registry of envelope schemas backed by the `jsonschema` crate.
///
/// ## Thread Safety
///
/// `SchemaValidator` is `Send + Sync`; a preview server can hold one for
/// its whole lifetime and share it across reloads.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    /// Map from schema name (e.g. `"site-config.schema.json"`) to parsed JSON.
    schemas: HashMap<String, Value>,
}

impl SchemaValidator {
    /// Create a validator holding the built-in site and report schemas.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` if an embedded schema is not valid JSON.
    pub fn builtin() -> Result<Self, DocumentError> {
        let mut validator = Self {
            schemas: HashMap::new(),
        };
        validator.register_source(SITE_CONFIG_SCHEMA, SITE_CONFIG_SCHEMA_SOURCE)?;
        validator.register_source(REPORT_CONFIG_SCHEMA, REPORT_CONFIG_SCHEMA_SOURCE)?;
        Ok(validator)
    }

    /// Register (or replace) a schema under `name`.
    pub fn register(&mut self, name: impl Into<String>, schema: Value) {
        self.schemas.insert(name.into(), schema);
    }

    fn register_source(&mut self, name: &str, source: &str) -> Result<(), DocumentError> {
        let value: Value = serde_json::from_str(source).map_err(|e| DocumentError::Parse {
            source_name: name.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        self.register(name, value);
        Ok(())
    }

    /// Returns the number of registered schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all registered schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Build a compiled `Validator` for a registered schema.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::UnknownSchema` if the schema is not registered
    /// and `DocumentError::ValidatorBuild` if it does not compile.
    pub fn build_validator(&self, schema_name: &str) -> Result<Validator, DocumentError> {
        let schema_value =
            self.schemas
                .get(schema_name)
                .ok_or_else(|| DocumentError::UnknownSchema {
                    schema_name: schema_name.to_string(),
                })?;

        jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .build(schema_value)
            .map_err(|e| DocumentError::ValidatorBuild {
                schema_name: schema_name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Validate a parsed JSON value against a registered schema.
    ///
    /// `source_name` labels the document in error messages (usually its path).
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::SchemaViolation` with every violation found.
    pub fn validate_document(
        &self,
        instance: &Value,
        schema_name: &str,
        source_name: &str,
    ) -> Result<(), DocumentError> {
        let validator = self.build_validator(schema_name)?;

        let errors: Vec<Violation> = validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            tracing::trace!(schema = schema_name, source = source_name, "envelope check passed");
            Ok(())
        } else {
            tracing::debug!(
                schema = schema_name,
                source = source_name,
                violations = errors.len(),
                "envelope check failed"
            );
            Err(DocumentError::SchemaViolation {
                source_name: source_name.to_string(),
                schema_name: schema_name.to_string(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }
}
