//! # sitecfg-core — Foundational Types for sitecfg
//!
//! This crate is the leaf of the sitecfg workspace. It defines the types
//! every schema crate shares: the structured error taxonomy reported by
//! validators, the field paths that locate a violation inside a document,
//! and the canonical byte form used to fingerprint validated documents.
//!
//! ## Key Design Principles
//!
//! 1. **One error taxonomy.** Both the navigation and report validators
//!    report through [`ConfigError`]. Every variant carries the
//!    [`FieldPath`] of the offending field and the offending value.
//!
//! 2. **`CanonicalBytes` newtype.** Document fingerprints flow through
//!    `CanonicalBytes::new()` (RFC 8785 JCS). Two documents that differ only
//!    in key order or whitespace produce the same [`ContentDigest`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sitecfg-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod path;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ConfigError, ConfigErrorKind, TargetConflict};
pub use path::{FieldPath, PathSegment};
