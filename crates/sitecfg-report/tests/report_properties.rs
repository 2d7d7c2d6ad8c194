//! Property tests for the report layout validator.

use proptest::prelude::*;
use sitecfg_core::ConfigErrorKind;
use sitecfg_report::{validate, ChartDescriptor, DisplayMode, ReportLayoutConfig};

fn arb_data_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("status".to_string()),
        Just("statusTrend".to_string()),
        Just("successRateDistribution".to_string()),
        Just("testingPyramid".to_string()),
    ]
}

fn arb_title() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Z][a-z]{1,10}( [a-z]{1,8})?")
}

/// Charts that satisfy the built-in capability table.
fn arb_valid_chart() -> impl Strategy<Value = ChartDescriptor> {
    let moded = (
        prop_oneof![Just("trend"), Just("bar")],
        arb_data_type(),
        arb_title(),
        proptest::option::of(prop_oneof![Just("percent"), Just("raw")]),
    )
        .prop_map(|(ty, data, title, mode)| {
            let mut chart = ChartDescriptor::new(ty).with_data_type(data);
            chart.title = title;
            chart.mode = mode.map(str::to_string);
            chart
        });
    let treemap = (arb_data_type(), arb_title()).prop_map(|(data, title)| {
        let mut chart = ChartDescriptor::new("treemap").with_data_type(data);
        chart.title = title;
        chart
    });
    let unbound = (
        prop_oneof![Just("heatmap"), Just("funnel")],
        proptest::option::of(arb_data_type()),
        arb_title(),
    )
        .prop_map(|(ty, data, title)| {
            let mut chart = ChartDescriptor::new(ty);
            chart.data_type = data;
            chart.title = title;
            chart
        });
    prop_oneof![moded, treemap, unbound]
}

fn arb_valid_layout() -> impl Strategy<Value = ReportLayoutConfig> {
    (
        prop_oneof![Just("split"), Just("single"), Just("base")],
        proptest::collection::vec(
            prop_oneof![Just("report"), Just("charts"), Just("timeline")],
            0..4,
        ),
        proptest::collection::vec(arb_valid_chart(), 0..8),
    )
        .prop_map(|(layout, sections, charts)| {
            let mut config = ReportLayoutConfig::new(layout);
            config.sections = sections.into_iter().map(str::to_string).collect();
            config.charts = charts;
            config
        })
}

proptest! {
    #[test]
    fn valid_layouts_come_back_unchanged(config in arb_valid_layout()) {
        let validated = validate(config.clone()).unwrap();
        prop_assert_eq!(validated.config(), &config);
        prop_assert_eq!(validated.resolved_charts().len(), config.charts.len());
    }

    #[test]
    fn yaml_roundtrip_revalidates_identically(config in arb_valid_layout()) {
        let validated = validate(config).unwrap();
        let text = serde_yaml::to_string(&validated).unwrap();
        let back: ReportLayoutConfig = serde_yaml::from_str(&text).unwrap();
        prop_assert_eq!(validate(back).unwrap(), validated);
    }

    #[test]
    fn moded_charts_always_resolve_a_mode(config in arb_valid_layout()) {
        let validated = validate(config).unwrap();
        for chart in validated.resolved_charts() {
            let moded = chart.chart_type == "trend" || chart.chart_type == "bar";
            prop_assert_eq!(chart.mode.is_some(), moded);
            if let Some(mode) = chart.mode {
                prop_assert!(matches!(mode, DisplayMode::Percent | DisplayMode::Raw));
            }
            prop_assert!(!chart.title.trim().is_empty());
        }
    }

    #[test]
    fn dropping_a_required_data_type_is_caught(
        config in arb_valid_layout(),
        ty in prop_oneof![Just("trend"), Just("bar"), Just("treemap")],
    ) {
        let mut config = config;
        let at = config.charts.len();
        config.charts.push(ChartDescriptor::new(ty));
        let err = validate(config).unwrap_err();
        prop_assert_eq!(err.kind(), ConfigErrorKind::MissingDataType);
        prop_assert_eq!(err.path().to_string(), format!("charts[{at}]"));
    }
}
