//! # Report Layout Model
//!
//! Typed form of the report configuration document. Keys the validator does
//! not interpret are kept in `extra` maps so a model serializes back to the
//! document it was read from.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Option keys that mark a plugin's options as a dashboard layout.
pub const DASHBOARD_KEYS: &[&str] = &["layout", "sections", "charts"];

/// The report configuration document: plugins keyed by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report plugins. Iterated in key order.
    pub plugins: BTreeMap<String, PluginEntry>,
    /// Other top-level keys (`name`, `output`, ...). Passed through.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One plugin entry of [`ReportConfig::plugins`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    #[serde(default, skip_serializing_if = "PluginOptions::is_empty")]
    pub options: PluginOptions,
    /// Other plugin keys (`import`, `enabled`, ...). Passed through.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `options` of a plugin.
///
/// Options carrying any of [`DASHBOARD_KEYS`] are a dashboard layout and
/// must deserialize as one. Anything else belongs to a plugin this crate
/// does not model and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PluginOptions {
    Dashboard(ReportLayoutConfig),
    Other(BTreeMap<String, Value>),
}

impl PluginOptions {
    /// The dashboard layout, if these options are one.
    pub fn dashboard(&self) -> Option<&ReportLayoutConfig> {
        match self {
            Self::Dashboard(layout) => Some(layout),
            Self::Other(_) => None,
        }
    }

    /// Whether these are empty non-dashboard options.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Other(map) if map.is_empty())
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self::Other(BTreeMap::new())
    }
}

impl From<ReportLayoutConfig> for PluginOptions {
    fn from(layout: ReportLayoutConfig) -> Self {
        Self::Dashboard(layout)
    }
}

impl<'de> Deserialize<'de> for PluginOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, Value>::deserialize(deserializer)?;
        if !DASHBOARD_KEYS.iter().any(|key| map.contains_key(*key)) {
            return Ok(Self::Other(map));
        }
        serde_json::from_value(Value::Object(map.into_iter().collect()))
            .map(Self::Dashboard)
            .map_err(serde::de::Error::custom)
    }
}

/// Layout options of the report dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayoutConfig {
    /// Sections shown, in display order.
    #[serde(default)]
    pub sections: Vec<String>,
    /// Arrangement of the sections.
    pub layout: String,
    /// Charts rendered in the charts section, in display order.
    #[serde(default)]
    pub charts: Vec<ChartDescriptor>,
    /// Other plugin options (`reportName`, `singleFile`, ...). Passed through.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ReportLayoutConfig {
    /// A layout with no sections and no charts.
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            sections: Vec::new(),
            layout: layout.into(),
            charts: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// One chart of the charts section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescriptor {
    /// Key into the chart capability table.
    #[serde(rename = "type")]
    pub chart_type: String,
    /// Name of the data series the chart binds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Display mode as written. Parsed during validation so an unknown
    /// value is reported with its chart type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ChartDescriptor {
    /// A descriptor with only `type` set.
    pub fn new(chart_type: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            data_type: None,
            title: None,
            mode: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set `dataType`.
    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    /// Set `title`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set `mode`.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// `title` if set and not blank.
    pub fn declared_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// `dataType` if set and not blank.
    pub fn bound_data_type(&self) -> Option<&str> {
        self.data_type
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_wire_names() {
        let chart = ChartDescriptor::new("trend")
            .with_data_type("status")
            .with_mode("percent");
        let value = serde_json::to_value(&chart).unwrap();
        assert_eq!(
            value,
            json!({"type": "trend", "dataType": "status", "mode": "percent"})
        );
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let value = json!({
            "name": "Allure C++",
            "plugins": {
                "awesome": {
                    "import": "@allurereport/plugin-awesome",
                    "options": {
                        "layout": "split",
                        "reportName": "Demo",
                        "charts": [{"type": "heatmap", "colors": ["red"]}]
                    }
                }
            }
        });
        let config: ReportConfig = serde_json::from_value(value.clone()).unwrap();
        let awesome = &config.plugins["awesome"];
        assert_eq!(awesome.extra["import"], "@allurereport/plugin-awesome");
        let options = awesome.options.dashboard().unwrap();
        assert_eq!(options.extra["reportName"], "Demo");
        assert_eq!(options.charts[0].extra["colors"], json!(["red"]));
        assert!(options.sections.is_empty());
        assert_eq!(serde_json::to_value(&config).unwrap(), value);
    }

    #[test]
    fn test_non_dashboard_plugins_kept_verbatim() {
        let value = json!({
            "plugins": {
                "awesome": {"options": {"layout": "single"}},
                "log": {"options": {"groupBy": "none"}},
                "csv": {"import": "@allurereport/plugin-csv"}
            }
        });
        let config: ReportConfig = serde_json::from_value(value.clone()).unwrap();
        assert!(config.plugins["awesome"].options.dashboard().is_some());
        match &config.plugins["log"].options {
            PluginOptions::Other(map) => assert_eq!(map["groupBy"], "none"),
            other => panic!("Expected Other, got: {other:?}"),
        }
        assert!(config.plugins["csv"].options.is_empty());
        assert_eq!(serde_json::to_value(&config).unwrap(), value);
    }

    #[test]
    fn test_dashboard_keys_without_layout_rejected() {
        let value = json!({"plugins": {"awesome": {"options": {"charts": []}}}});
        let err = serde_json::from_value::<ReportConfig>(value).unwrap_err();
        assert!(err.to_string().contains("layout"), "got: {err}");
    }

    #[test]
    fn test_bound_data_type_ignores_blank() {
        assert_eq!(ChartDescriptor::new("bar").bound_data_type(), None);
        assert_eq!(
            ChartDescriptor::new("bar").with_data_type("  ").bound_data_type(),
            None
        );
        assert_eq!(
            ChartDescriptor::new("bar")
                .with_data_type("statusTrend")
                .bound_data_type(),
            Some("statusTrend")
        );
    }
}
