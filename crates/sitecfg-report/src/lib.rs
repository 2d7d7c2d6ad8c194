//! # sitecfg-report — Report Layout Schema
//!
//! Models the options of the test-report dashboard plugin: which sections
//! are shown, how they are laid out, and the ordered list of charts.
//!
//! ## Capability Table
//!
//! What the renderer can draw is data, not logic. [`RendererCapabilities`]
//! lists the recognized layouts and sections and holds a [`ChartRegistry`]
//! mapping each chart type to its [`ChartCapability`]:
//!
//! | Chart | Requires `dataType` | Modes | Default mode |
//! |-------|---------------------|-------|--------------|
//! | `trend` | yes | `percent`, `raw` | `raw` |
//! | `bar` | yes | `percent`, `raw` | `raw` |
//! | `treemap` | yes | none | none |
//! | `heatmap` | no | none | none |
//! | `funnel` | no | none | none |
//!
//! Adding a chart type is a registry entry, not a validator change.
//!
//! ## Validation
//!
//! [`validate()`] checks `layout`, then `sections`, then every chart in
//! declaration order, and returns the first `ConfigError`. On success the
//! input is returned unchanged alongside [`ResolvedChart`]s carrying the
//! defaulted title and display mode.
//!
//! In a whole report document only plugins whose options carry a
//! [`DASHBOARD_KEYS`] entry are validated; other plugins pass through.

pub mod capability;
pub mod load;
pub mod model;
pub mod validate;

pub use capability::{
    CapabilityError, ChartCapability, ChartRegistry, DisplayMode, RendererCapabilities,
};
pub use load::{load_report_config, parse_report_config};
pub use model::{
    ChartDescriptor, PluginEntry, PluginOptions, ReportConfig, ReportLayoutConfig, DASHBOARD_KEYS,
};
pub use validate::{
    validate, validate_report, validate_with, ResolvedChart, ValidatedLayout, ValidatedReport,
};
