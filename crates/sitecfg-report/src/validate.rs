//! # Report Layout Validation
//!
//! Fail-fast validation of report layout options against a
//! [`RendererCapabilities`] table.
//!
//! ## Rules
//!
//! 1. `layout` is a recognized layout.
//! 2. Every entry of `sections` is a recognized section. Repeats are fine.
//! 3. For each chart, in declaration order:
//!    - `type` has a capability entry;
//!    - `dataType` is set (and not blank) when the capability requires it;
//!    - `mode`, when set, is a display mode the capability supports.
//!
//! The first violation is returned. Validation does not touch the input;
//! defaults for `title` and `mode` are reported separately as
//! [`ResolvedChart`]s.

use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Serialize, Serializer};
use sitecfg_core::{ConfigError, FieldPath};

use crate::capability::{ChartCapability, DisplayMode, RendererCapabilities};
use crate::model::{ChartDescriptor, ReportConfig, ReportLayoutConfig};

/// A chart as the renderer will draw it, after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedChart {
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Declared title, or one derived from the chart and data type.
    pub title: String,
    /// Declared mode, or the capability default. `None` for charts without
    /// display modes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<DisplayMode>,
}

/// Report layout options that passed [`validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLayout {
    config: ReportLayoutConfig,
    charts: Vec<ResolvedChart>,
}

impl ValidatedLayout {
    /// The options as declared.
    pub fn config(&self) -> &ReportLayoutConfig {
        &self.config
    }

    /// Charts with defaults applied, in declaration order.
    pub fn resolved_charts(&self) -> &[ResolvedChart] {
        &self.charts
    }

    pub fn into_inner(self) -> ReportLayoutConfig {
        self.config
    }
}

impl Deref for ValidatedLayout {
    type Target = ReportLayoutConfig;

    fn deref(&self) -> &ReportLayoutConfig {
        &self.config
    }
}

/// Serializes as the declared options; resolved defaults are not written back.
impl Serialize for ValidatedLayout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.config.serialize(serializer)
    }
}

/// A report configuration whose every plugin passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReport {
    config: ReportConfig,
    charts: BTreeMap<String, Vec<ResolvedChart>>,
}

impl ValidatedReport {
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Resolved charts of one plugin, or `None` if it is not a dashboard
    /// plugin of this report.
    pub fn resolved_charts(&self, plugin: &str) -> Option<&[ResolvedChart]> {
        self.charts.get(plugin).map(Vec::as_slice)
    }

    pub fn into_inner(self) -> ReportConfig {
        self.config
    }
}

impl Deref for ValidatedReport {
    type Target = ReportConfig;

    fn deref(&self) -> &ReportConfig {
        &self.config
    }
}

impl Serialize for ValidatedReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.config.serialize(serializer)
    }
}

/// Validate layout options against the built-in renderer capabilities.
///
/// # Errors
///
/// Returns the first of `UnknownLayout`, `UnknownSection`,
/// `UnknownChartType`, `MissingDataType` or `IncompatibleMode`.
pub fn validate(config: ReportLayoutConfig) -> Result<ValidatedLayout, ConfigError> {
    validate_with(config, &RendererCapabilities::builtin())
}

/// Validate layout options against `capabilities`.
pub fn validate_with(
    config: ReportLayoutConfig,
    capabilities: &RendererCapabilities,
) -> Result<ValidatedLayout, ConfigError> {
    let charts = check_layout(&config, capabilities).map_err(|err| {
        tracing::debug!(kind = %err.kind(), path = %err.path(), "report layout rejected");
        err
    })?;
    tracing::debug!(
        layout = %config.layout,
        sections = config.sections.len(),
        charts = charts.len(),
        "report layout validated"
    );
    Ok(ValidatedLayout { config, charts })
}

/// Validate the options of every dashboard plugin of a report
/// configuration, in plugin name order. Plugins whose options are not a
/// dashboard layout are passed through unchecked.
///
/// Error paths are relative to the whole document
/// (`plugins.awesome.options.charts[0].mode`).
pub fn validate_report(
    config: ReportConfig,
    capabilities: &RendererCapabilities,
) -> Result<ValidatedReport, ConfigError> {
    let mut charts = BTreeMap::new();
    for (name, plugin) in &config.plugins {
        let Some(options) = plugin.options.dashboard() else {
            tracing::debug!(plugin = %name, "plugin has no dashboard layout; skipped");
            continue;
        };
        let prefix = FieldPath::root().key("plugins").key(name.as_str()).key("options");
        let resolved = check_layout(options, capabilities).map_err(|err| {
            let err = err.with_prefix(&prefix);
            tracing::debug!(
                plugin = %name,
                kind = %err.kind(),
                path = %err.path(),
                "report plugin rejected"
            );
            err
        })?;
        charts.insert(name.clone(), resolved);
    }
    tracing::debug!(plugins = charts.len(), "report configuration validated");
    Ok(ValidatedReport { config, charts })
}

fn check_layout(
    config: &ReportLayoutConfig,
    capabilities: &RendererCapabilities,
) -> Result<Vec<ResolvedChart>, ConfigError> {
    let root = FieldPath::root();

    if !capabilities.has_layout(&config.layout) {
        return Err(ConfigError::UnknownLayout {
            path: root.key("layout"),
            layout: config.layout.clone(),
            expected: capabilities.layouts.clone(),
        });
    }

    let sections = root.key("sections");
    for (i, section) in config.sections.iter().enumerate() {
        if !capabilities.has_section(section) {
            return Err(ConfigError::UnknownSection {
                path: sections.index(i),
                section: section.clone(),
                expected: capabilities.sections.clone(),
            });
        }
    }

    let charts = root.key("charts");
    config
        .charts
        .iter()
        .enumerate()
        .map(|(i, chart)| check_chart(chart, &charts.index(i), capabilities))
        .collect()
}

fn check_chart(
    chart: &ChartDescriptor,
    path: &FieldPath,
    capabilities: &RendererCapabilities,
) -> Result<ResolvedChart, ConfigError> {
    let Some(capability) = capabilities.charts.get(&chart.chart_type) else {
        return Err(ConfigError::UnknownChartType {
            path: path.key("type"),
            chart_type: chart.chart_type.clone(),
            expected: capabilities.charts.chart_types(),
        });
    };

    let data_type = chart.bound_data_type();
    if capability.requires_data_type && data_type.is_none() {
        return Err(ConfigError::MissingDataType {
            path: path.clone(),
            chart_type: chart.chart_type.clone(),
        });
    }

    let mode = match &chart.mode {
        None => capability.default_mode,
        Some(raw) => Some(parse_mode(raw, capability, chart, path)?),
    };

    Ok(ResolvedChart {
        chart_type: chart.chart_type.clone(),
        data_type: data_type.map(str::to_string),
        title: chart
            .declared_title()
            .map_or_else(|| default_title(capability, data_type), str::to_string),
        mode,
    })
}

fn parse_mode(
    raw: &str,
    capability: &ChartCapability,
    chart: &ChartDescriptor,
    path: &FieldPath,
) -> Result<DisplayMode, ConfigError> {
    match raw.parse::<DisplayMode>() {
        Ok(mode) if capability.supports(mode) => Ok(mode),
        _ => Err(ConfigError::IncompatibleMode {
            path: path.key("mode"),
            chart_type: chart.chart_type.clone(),
            mode: raw.to_string(),
            supported: capability.modes.iter().map(|m| m.as_str().to_string()).collect(),
        }),
    }
}

/// `Trend: Status`, `Bar: Status trend`, or the bare display name.
fn default_title(capability: &ChartCapability, data_type: Option<&str>) -> String {
    match data_type {
        Some(data_type) => format!("{}: {}", capability.display_name, humanize(data_type)),
        None => capability.display_name.clone(),
    }
}

/// `successRateDistribution` → `Success rate distribution`.
fn humanize(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else if c == '_' || c == '-' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
