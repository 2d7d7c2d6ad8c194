//! Integration tests: the report plugin configuration, loaded from disk and
//! validated against built-in and manifest-loaded capabilities.

use std::path::PathBuf;

use sitecfg_core::{ConfigError, ConfigErrorKind};
use sitecfg_report::{
    load_report_config, parse_report_config, validate_with, ChartDescriptor, DisplayMode,
    RendererCapabilities, ReportLayoutConfig,
};
use sitecfg_schema::{DocumentError, SchemaValidator};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_allurerc_fixture() {
    let schemas = SchemaValidator::builtin().unwrap();
    let caps = RendererCapabilities::builtin();
    let validated = load_report_config(&fixture("allurerc.json"), &schemas, &caps).unwrap();

    assert_eq!(validated.extra["name"], "Allure C++ Report");
    let options = validated.plugins["awesome"].options.dashboard().unwrap();
    assert_eq!(options.layout, "split");
    assert_eq!(options.charts.len(), 5);

    let resolved = validated.resolved_charts("awesome").unwrap();
    let summary: Vec<(&str, &str, Option<DisplayMode>)> = resolved
        .iter()
        .map(|c| (c.chart_type.as_str(), c.title.as_str(), c.mode))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("trend", "Trend: Status", Some(DisplayMode::Percent)),
            ("bar", "Status changes between runs", Some(DisplayMode::Raw)),
            ("treemap", "Treemap: Success rate distribution", None),
            ("heatmap", "Stability by layer", None),
            ("funnel", "Funnel: Testing pyramid", None),
        ]
    );
    assert!(validated.resolved_charts("classic").is_none());
}

#[test]
fn test_yaml_and_json_fixtures_are_identical() {
    let schemas = SchemaValidator::builtin().unwrap();
    let caps = RendererCapabilities::builtin();
    let json = load_report_config(&fixture("allurerc.json"), &schemas, &caps).unwrap();
    let yaml = load_report_config(&fixture("allurerc.yaml"), &schemas, &caps).unwrap();
    assert_eq!(json, yaml);
}

#[test]
fn test_incompatible_mode_surfaces_with_document_path() {
    let schemas = SchemaValidator::builtin().unwrap();
    let doc = serde_json::json!({
        "plugins": {
            "awesome": {
                "options": {
                    "layout": "split",
                    "charts": [{"type": "funnel", "dataType": "testingPyramid", "mode": "raw"}]
                }
            }
        }
    });
    let err = parse_report_config(doc, &schemas, &RendererCapabilities::builtin(), "inline")
        .unwrap_err();
    match err {
        DocumentError::Config(ConfigError::IncompatibleMode { path, mode, .. }) => {
            assert_eq!(path.to_string(), "plugins.awesome.options.charts[0].mode");
            assert_eq!(mode, "raw");
        }
        other => panic!("Expected IncompatibleMode, got: {other}"),
    }
}

#[test]
fn test_plugins_checked_in_name_order() {
    let schemas = SchemaValidator::builtin().unwrap();
    let doc = serde_json::json!({
        "plugins": {
            "zeta": {"options": {"layout": "grid"}},
            "alpha": {"options": {"layout": "split", "sections": ["summary"]}}
        }
    });
    let err = parse_report_config(doc, &schemas, &RendererCapabilities::builtin(), "inline")
        .unwrap_err();
    match err {
        DocumentError::Config(err) => {
            assert_eq!(err.kind(), ConfigErrorKind::UnknownSection);
            assert_eq!(err.path().to_string(), "plugins.alpha.options.sections[0]");
        }
        other => panic!("Expected Config error, got: {other}"),
    }
}

#[test]
fn test_chart_without_type_is_an_envelope_error() {
    let schemas = SchemaValidator::builtin().unwrap();
    let doc = serde_json::json!({
        "plugins": {"awesome": {"options": {"layout": "split", "charts": [{"dataType": "status"}]}}}
    });
    let err = parse_report_config(doc, &schemas, &RendererCapabilities::builtin(), "inline")
        .unwrap_err();
    assert!(
        matches!(err, DocumentError::SchemaViolation { .. }),
        "Expected SchemaViolation, got: {err}"
    );
}

#[test]
fn test_manifest_extends_chart_types() {
    let caps = RendererCapabilities::load(&fixture("renderer-capabilities.yaml")).unwrap();
    assert_eq!(caps.charts.len(), 6);

    let mut config = ReportLayoutConfig::new("single");
    config.charts = vec![ChartDescriptor::new("pie").with_data_type("status")];
    let validated = validate_with(config.clone(), &caps).unwrap();
    assert_eq!(validated.resolved_charts()[0].mode, Some(DisplayMode::Percent));
    assert_eq!(validated.resolved_charts()[0].title, "Pie: Status");

    let err = sitecfg_report::validate(config).unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::UnknownChartType);
}

#[test]
fn test_revalidated_serialization_matches() {
    let schemas = SchemaValidator::builtin().unwrap();
    let caps = RendererCapabilities::builtin();
    let validated = load_report_config(&fixture("allurerc.json"), &schemas, &caps).unwrap();
    let json = serde_json::to_value(&validated).unwrap();
    let again = parse_report_config(json, &schemas, &caps, "roundtrip").unwrap();
    assert_eq!(again, validated);
}

#[test]
fn test_other_plugins_pass_through_unchecked() {
    let schemas = SchemaValidator::builtin().unwrap();
    let doc = serde_json::json!({
        "plugins": {
            "awesome": {"options": {"layout": "split", "charts": [{"type": "heatmap"}]}},
            "log": {"options": {"groupBy": "none"}}
        }
    });
    let validated =
        parse_report_config(doc.clone(), &schemas, &RendererCapabilities::builtin(), "inline")
            .unwrap();
    assert_eq!(validated.resolved_charts("awesome").unwrap().len(), 1);
    assert!(validated.resolved_charts("log").is_none());
    assert_eq!(serde_json::to_value(&validated).unwrap(), doc);
}

#[test]
fn test_dashboard_options_without_layout_is_an_envelope_error() {
    let schemas = SchemaValidator::builtin().unwrap();
    let doc = serde_json::json!({
        "plugins": {"awesome": {"options": {"sections": ["charts"]}}}
    });
    let err = parse_report_config(doc, &schemas, &RendererCapabilities::builtin(), "inline")
        .unwrap_err();
    match err {
        DocumentError::SchemaViolation { violations, .. } => {
            assert!(violations
                .violations()
                .iter()
                .any(|v| v.instance_path == "/plugins/awesome/options"));
        }
        other => panic!("Expected SchemaViolation, got: {other}"),
    }
}
