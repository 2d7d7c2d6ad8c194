//! # Error Types — Configuration Error Taxonomy
//!
//! Defines the structural validation errors shared by the navigation and
//! report layout validators. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every violation carries the [`FieldPath`] of the offending field so a
//!   human can fix the declaration without re-reading the whole document.
//! - Every violation carries the offending value (or what was expected).
//! - Validation is fail-fast: a validator returns the first violation it
//!   meets in declaration order. Nothing here is retried.

use std::fmt;

use thiserror::Error;

use crate::path::FieldPath;

/// Structural validation failure in a configuration document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A page sets both `slug` and `link`, or neither.
    #[error("{path}: page must set exactly one of `slug` or `link` ({conflict})")]
    AmbiguousTarget {
        /// Path of the offending page.
        path: FieldPath,
        /// Whether both or neither target was set.
        conflict: TargetConflict,
    },

    /// A label is missing, empty, or whitespace only.
    #[error("{path}: label must be a non-empty string")]
    MissingLabel {
        /// Path of the offending label field.
        path: FieldPath,
    },

    /// The same slug is declared twice in one navigation tree.
    #[error("{path}: duplicate slug {slug:?} (first declared at {first})")]
    DuplicateSlug {
        /// Path of the second declaration.
        path: FieldPath,
        /// The slug as written at `path`.
        slug: String,
        /// Path of the first declaration.
        first: FieldPath,
    },

    /// The report layout is not one the renderer recognizes.
    #[error("{path}: unknown layout {layout:?} (expected one of: {})", .expected.join(", "))]
    UnknownLayout {
        /// Path of the `layout` field.
        path: FieldPath,
        /// The offending layout value.
        layout: String,
        /// Layouts the renderer recognizes.
        expected: Vec<String>,
    },

    /// A report section is not one the renderer recognizes.
    #[error("{path}: unknown section {section:?} (expected one of: {})", .expected.join(", "))]
    UnknownSection {
        /// Path of the offending section entry.
        path: FieldPath,
        /// The offending section name.
        section: String,
        /// Sections the renderer recognizes.
        expected: Vec<String>,
    },

    /// A chart descriptor names a chart type with no capability entry.
    #[error("{path}: unknown chart type {chart_type:?} (expected one of: {})", .expected.join(", "))]
    UnknownChartType {
        /// Path of the offending `type` field.
        path: FieldPath,
        /// The offending chart type.
        chart_type: String,
        /// Chart types the renderer recognizes.
        expected: Vec<String>,
    },

    /// A chart type that binds external data was declared without `dataType`.
    #[error("{path}: chart type {chart_type:?} requires a `dataType`")]
    MissingDataType {
        /// Path of the offending chart descriptor.
        path: FieldPath,
        /// The chart type that requires a data binding.
        chart_type: String,
    },

    /// A `mode` was set that the chart type does not support.
    #[error(
        "{path}: mode {mode:?} is not valid for chart type {chart_type:?} (supported: {})",
        display_supported(.supported)
    )]
    IncompatibleMode {
        /// Path of the offending `mode` field.
        path: FieldPath,
        /// The chart type the mode was set on.
        chart_type: String,
        /// The offending mode value.
        mode: String,
        /// Modes the chart type supports. Empty when it ignores `mode`.
        supported: Vec<String>,
    },
}

fn display_supported(supported: &[String]) -> String {
    if supported.is_empty() {
        "none".to_string()
    } else {
        supported.join(", ")
    }
}

impl ConfigError {
    /// Returns the discriminant of this error.
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            Self::AmbiguousTarget { .. } => ConfigErrorKind::AmbiguousTarget,
            Self::MissingLabel { .. } => ConfigErrorKind::MissingLabel,
            Self::DuplicateSlug { .. } => ConfigErrorKind::DuplicateSlug,
            Self::UnknownLayout { .. } => ConfigErrorKind::UnknownLayout,
            Self::UnknownSection { .. } => ConfigErrorKind::UnknownSection,
            Self::UnknownChartType { .. } => ConfigErrorKind::UnknownChartType,
            Self::MissingDataType { .. } => ConfigErrorKind::MissingDataType,
            Self::IncompatibleMode { .. } => ConfigErrorKind::IncompatibleMode,
        }
    }

    /// Returns the path of the offending field.
    pub fn path(&self) -> &FieldPath {
        match self {
            Self::AmbiguousTarget { path, .. }
            | Self::MissingLabel { path }
            | Self::DuplicateSlug { path, .. }
            | Self::UnknownLayout { path, .. }
            | Self::UnknownSection { path, .. }
            | Self::UnknownChartType { path, .. }
            | Self::MissingDataType { path, .. }
            | Self::IncompatibleMode { path, .. } => path,
        }
    }

    /// Re-root this error under `prefix`.
    ///
    /// Used when a sub-document (e.g. one plugin's options) is validated on
    /// its own and the error must be reported relative to the whole file.
    pub fn with_prefix(self, prefix: &FieldPath) -> Self {
        match self {
            Self::AmbiguousTarget { path, conflict } => Self::AmbiguousTarget {
                path: prefix.join(&path),
                conflict,
            },
            Self::MissingLabel { path } => Self::MissingLabel {
                path: prefix.join(&path),
            },
            Self::DuplicateSlug { path, slug, first } => Self::DuplicateSlug {
                path: prefix.join(&path),
                slug,
                first: prefix.join(&first),
            },
            Self::UnknownLayout { path, layout, expected } => Self::UnknownLayout {
                path: prefix.join(&path),
                layout,
                expected,
            },
            Self::UnknownSection { path, section, expected } => Self::UnknownSection {
                path: prefix.join(&path),
                section,
                expected,
            },
            Self::UnknownChartType { path, chart_type, expected } => Self::UnknownChartType {
                path: prefix.join(&path),
                chart_type,
                expected,
            },
            Self::MissingDataType { path, chart_type } => Self::MissingDataType {
                path: prefix.join(&path),
                chart_type,
            },
            Self::IncompatibleMode { path, chart_type, mode, supported } => {
                Self::IncompatibleMode {
                    path: prefix.join(&path),
                    chart_type,
                    mode,
                    supported,
                }
            }
        }
    }
}

/// Discriminant of [`ConfigError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigErrorKind {
    AmbiguousTarget,
    MissingLabel,
    DuplicateSlug,
    UnknownLayout,
    UnknownSection,
    UnknownChartType,
    MissingDataType,
    IncompatibleMode,
}

impl ConfigErrorKind {
    /// Returns the stable identifier of this kind, e.g. `"DuplicateSlug"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmbiguousTarget => "AmbiguousTarget",
            Self::MissingLabel => "MissingLabel",
            Self::DuplicateSlug => "DuplicateSlug",
            Self::UnknownLayout => "UnknownLayout",
            Self::UnknownSection => "UnknownSection",
            Self::UnknownChartType => "UnknownChartType",
            Self::MissingDataType => "MissingDataType",
            Self::IncompatibleMode => "IncompatibleMode",
        }
    }
}

impl fmt::Display for ConfigErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError:{}", self.as_str())
    }
}

/// Why a page target could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetConflict {
    /// Both `slug` and `link` were set.
    Both,
    /// Neither `slug` nor `link` was set.
    Neither,
}

impl fmt::Display for TargetConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => f.write_str("both are set"),
            Self::Neither => f.write_str("neither is set"),
        }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
