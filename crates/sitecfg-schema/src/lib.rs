//! # sitecfg-schema — Document Loading & Envelope Validation
//!
//! Reads configuration documents from disk or memory, converts YAML to
//! JSON, and checks the structural envelope of a document against an
//! embedded JSON Schema before it is deserialized into typed models.
//!
//! ## Two-Pass Loading
//!
//! 1. **Envelope pass** ([`SchemaValidator`]): JSON Schema (Draft 2020-12)
//!    checks field *types*: `sidebar` is an array, `label` is a string,
//!    every chart has a `type`. All violations are collected.
//! 2. **Semantic pass**: the schema crates (`sitecfg-nav`,
//!    `sitecfg-report`) deserialize the document and run their fail-fast
//!    validators, reporting a single `ConfigError`.
//!
//! The envelope schemas deliberately leave semantic rules (non-empty
//! labels, exactly-one target, capability lookups) to the second pass so
//! those failures surface with their `ConfigError` kind.
//!
//! ## Crate Policy
//!
//! - Depends only on `sitecfg-core` internally.
//! - Documents that fail either pass are rejected; nothing is defaulted
//!   except genuinely optional fields.

pub mod document;
pub mod validate;

pub use document::{load_document, load_value, parse_document, parse_value, DocumentFormat};
pub use validate::{
    DocumentError, SchemaValidator, ValidationViolations, Violation, REPORT_CONFIG_SCHEMA,
    SITE_CONFIG_SCHEMA,
};
