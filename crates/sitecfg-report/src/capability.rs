//! # Renderer Capabilities
//!
//! The lookup tables the report validator consults: recognized layouts,
//! recognized sections, and per-chart-type capability flags.
//!
//! ## Invariant
//!
//! A [`ChartRegistry`] never holds two entries for the same chart type, and
//! an entry's default mode is always one of its supported modes. Both are
//! checked on [`ChartRegistry::register`] and when a manifest is loaded.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitecfg_schema::{load_value, DocumentError};
use thiserror::Error;

/// How a chart scales its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// Values normalized to a percentage of the total.
    Percent,
    /// Values shown as counts.
    Raw,
}

impl DisplayMode {
    /// Returns the wire identifier of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent" => Ok(Self::Percent),
            "raw" => Ok(Self::Raw),
            other => Err(format!("unknown display mode: {other:?}")),
        }
    }
}

/// What the renderer can do with one chart type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartCapability {
    /// The chart type key, as written in `ChartDescriptor.type`.
    #[serde(rename = "type")]
    pub chart_type: String,
    /// Human-readable name, used to derive default titles.
    pub display_name: String,
    /// Whether the chart binds an external series and so needs `dataType`.
    #[serde(default)]
    pub requires_data_type: bool,
    /// Display modes the chart supports. Empty means `mode` is rejected.
    #[serde(default)]
    pub modes: Vec<DisplayMode>,
    /// Mode applied when a descriptor leaves `mode` unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<DisplayMode>,
}

impl ChartCapability {
    /// Whether `mode` may be set on this chart type.
    pub fn supports(&self, mode: DisplayMode) -> bool {
        self.modes.contains(&mode)
    }
}

/// Built-in chart capabilities: one row per chart type.
struct BuiltinChart {
    chart_type: &'static str,
    display_name: &'static str,
    requires_data_type: bool,
    modes: &'static [DisplayMode],
    default_mode: Option<DisplayMode>,
}

const BOTH_MODES: &[DisplayMode] = &[DisplayMode::Percent, DisplayMode::Raw];

#[rustfmt::skip]
const BUILTIN_CHARTS: &[BuiltinChart] = &[
    BuiltinChart { chart_type: "trend",   display_name: "Trend",   requires_data_type: true,  modes: BOTH_MODES, default_mode: Some(DisplayMode::Raw) },
    BuiltinChart { chart_type: "bar",     display_name: "Bar",     requires_data_type: true,  modes: BOTH_MODES, default_mode: Some(DisplayMode::Raw) },
    BuiltinChart { chart_type: "treemap", display_name: "Treemap", requires_data_type: true,  modes: &[],        default_mode: None },
    BuiltinChart { chart_type: "heatmap", display_name: "Heatmap", requires_data_type: false, modes: &[],        default_mode: None },
    BuiltinChart { chart_type: "funnel",  display_name: "Funnel",  requires_data_type: false, modes: &[],        default_mode: None },
];

const BUILTIN_LAYOUTS: &[&str] = &["split", "single", "base"];

const BUILTIN_SECTIONS: &[&str] = &["report", "charts", "timeline"];

/// Error building a capability table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// Two entries claim the same chart type.
    #[error("chart type {0:?} is already registered")]
    DuplicateChartType(String),

    /// The default mode is not among the supported modes.
    #[error("chart type {chart_type:?} defaults to mode {mode} which it does not support")]
    DefaultModeUnsupported {
        /// The offending chart type.
        chart_type: String,
        /// The unsupported default.
        mode: DisplayMode,
    },
}

/// Chart type → capability lookup table, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChartCapability>", into = "Vec<ChartCapability>")]
pub struct ChartRegistry {
    entries: Vec<ChartCapability>,
}

impl ChartRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The chart types the renderer ships with.
    pub fn builtin() -> Self {
        let entries = BUILTIN_CHARTS
            .iter()
            .map(|c| ChartCapability {
                chart_type: c.chart_type.to_string(),
                display_name: c.display_name.to_string(),
                requires_data_type: c.requires_data_type,
                modes: c.modes.to_vec(),
                default_mode: c.default_mode,
            })
            .collect();
        Self { entries }
    }

    /// Add a chart type.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityError::DuplicateChartType` if the type is already
    /// registered and `CapabilityError::DefaultModeUnsupported` if the
    /// default mode is not one of the supported modes.
    pub fn register(&mut self, capability: ChartCapability) -> Result<(), CapabilityError> {
        if self.get(&capability.chart_type).is_some() {
            return Err(CapabilityError::DuplicateChartType(capability.chart_type));
        }
        if let Some(mode) = capability.default_mode {
            if !capability.supports(mode) {
                return Err(CapabilityError::DefaultModeUnsupported {
                    chart_type: capability.chart_type,
                    mode,
                });
            }
        }
        self.entries.push(capability);
        Ok(())
    }

    /// Look up a chart type.
    pub fn get(&self, chart_type: &str) -> Option<&ChartCapability> {
        self.entries.iter().find(|c| c.chart_type == chart_type)
    }

    /// Registered chart type keys, in registration order.
    pub fn chart_types(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.chart_type.clone()).collect()
    }

    /// Number of registered chart types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no chart types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<ChartCapability>> for ChartRegistry {
    type Error = CapabilityError;

    fn try_from(entries: Vec<ChartCapability>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }
}

impl From<ChartRegistry> for Vec<ChartCapability> {
    fn from(registry: ChartRegistry) -> Self {
        registry.entries
    }
}

/// Everything the report renderer recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RendererCapabilities {
    /// Recognized `layout` values.
    pub layouts: Vec<String>,
    /// Recognized `sections` entries.
    pub sections: Vec<String>,
    /// Chart capability table.
    pub charts: ChartRegistry,
}

impl Default for RendererCapabilities {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RendererCapabilities {
    /// The capabilities of the current renderer.
    pub fn builtin() -> Self {
        Self {
            layouts: BUILTIN_LAYOUTS.iter().map(|s| s.to_string()).collect(),
            sections: BUILTIN_SECTIONS.iter().map(|s| s.to_string()).collect(),
            charts: ChartRegistry::builtin(),
        }
    }

    /// Whether `layout` is recognized.
    pub fn has_layout(&self, layout: &str) -> bool {
        self.layouts.iter().any(|l| l == layout)
    }

    /// Whether `section` is recognized.
    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }

    /// Build capabilities from a parsed manifest document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Deserialize` if the manifest is malformed or
    /// its chart table violates the registry invariants.
    pub fn from_value(value: Value, source_name: &str) -> Result<Self, DocumentError> {
        serde_json::from_value(value).map_err(|e| DocumentError::Deserialize {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load capabilities from a JSON or YAML manifest file.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let value = load_value(path)?;
        Self::from_value(value, &path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let charts = ChartRegistry::builtin();
        assert_eq!(
            charts.chart_types(),
            vec!["trend", "bar", "treemap", "heatmap", "funnel"]
        );
        let required: Vec<&str> = ["trend", "bar", "treemap", "heatmap", "funnel"]
            .into_iter()
            .filter(|t| charts.get(t).is_some_and(|c| c.requires_data_type))
            .collect();
        assert_eq!(required, vec!["trend", "bar", "treemap"]);
        assert!(charts.get("trend").unwrap().supports(DisplayMode::Percent));
        assert!(!charts.get("funnel").unwrap().supports(DisplayMode::Raw));
    }

    #[test]
    fn test_builtin_defaults_are_supported() {
        // Re-registering the builtin table enforces the registry invariants.
        let entries: Vec<ChartCapability> = ChartRegistry::builtin().into();
        ChartRegistry::try_from(entries).unwrap();
    }

    #[test]
    fn test_register_new_chart_type() {
        let mut charts = ChartRegistry::builtin();
        charts
            .register(ChartCapability {
                chart_type: "pie".to_string(),
                display_name: "Pie".to_string(),
                requires_data_type: true,
                modes: vec![DisplayMode::Percent],
                default_mode: Some(DisplayMode::Percent),
            })
            .unwrap();
        assert_eq!(charts.len(), 6);
        assert!(charts.get("pie").unwrap().requires_data_type);
    }

    #[test]
    fn test_register_duplicate_rejected() {
        let mut charts = ChartRegistry::builtin();
        let err = charts
            .register(ChartCapability {
                chart_type: "trend".to_string(),
                display_name: "Trend again".to_string(),
                requires_data_type: false,
                modes: Vec::new(),
                default_mode: None,
            })
            .unwrap_err();
        assert_eq!(err, CapabilityError::DuplicateChartType("trend".to_string()));
    }

    #[test]
    fn test_default_mode_must_be_supported() {
        let mut charts = ChartRegistry::new();
        let err = charts
            .register(ChartCapability {
                chart_type: "gauge".to_string(),
                display_name: "Gauge".to_string(),
                requires_data_type: false,
                modes: vec![DisplayMode::Raw],
                default_mode: Some(DisplayMode::Percent),
            })
            .unwrap_err();
        assert!(matches!(err, CapabilityError::DefaultModeUnsupported { .. }));
        assert!(charts.is_empty());
    }

    #[test]
    fn test_manifest_roundtrip() {
        let caps = RendererCapabilities::builtin();
        let value = serde_json::to_value(&caps).unwrap();
        assert_eq!(value["charts"][0]["type"], "trend");
        assert_eq!(value["charts"][0]["requiresDataType"], true);
        let back = RendererCapabilities::from_value(value, "inline").unwrap();
        assert_eq!(back, caps);
    }

    #[test]
    fn test_manifest_with_duplicate_chart_rejected() {
        let value = serde_json::json!({
            "layouts": ["split"],
            "sections": ["charts"],
            "charts": [
                {"type": "trend", "displayName": "Trend"},
                {"type": "trend", "displayName": "Trend"}
            ]
        });
        let err = RendererCapabilities::from_value(value, "caps.json").unwrap_err();
        assert!(err.to_string().contains("already registered"), "got: {err}");
    }

    #[test]
    fn test_display_mode_parse() {
        assert_eq!("percent".parse::<DisplayMode>(), Ok(DisplayMode::Percent));
        assert_eq!("raw".parse::<DisplayMode>(), Ok(DisplayMode::Raw));
        assert!("Percent".parse::<DisplayMode>().is_err());
    }

    #[test]
    fn test_layout_and_section_lookup() {
        let caps = RendererCapabilities::builtin();
        assert!(caps.has_layout("split"));
        assert!(!caps.has_layout("grid"));
        assert!(caps.has_section("charts"));
        assert!(!caps.has_section("chart"));
    }
}
