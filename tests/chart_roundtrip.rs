//! Semantic round trips: serializing a model and reading the document back
//! reconstructs equal field values for every chart type.

use datawrapper_rs::charts::enums::{
    GridDisplay, Interpolation, LineDash, ReplaceFlags, ScaleY, ValueLabelDisplay,
};
use datawrapper_rs::charts::{
    AreaChart, ArrowChart, BarChart, ChartModel, ColumnChart, Line, LineChart,
    MultipleColumnChart, ScatterPlot, StackedBarChart,
};
use datawrapper_rs::{AxisValue, RangeAnnotation, TextAnnotation};
use serde_json::json;

#[test]
fn minimal_line_chart_wire_document() {
    let mut chart = LineChart::new();
    chart.base.title = "Temp".to_string();
    chart.base.data = datawrapper_rs::Table::from_csv("date,t\n2020/01,15\n2020/02,18\n").unwrap();

    let document = chart.serialize_model().unwrap();
    assert_eq!(document["type"], json!("d3-lines"));
    assert_eq!(document["title"], json!("Temp"));
    assert_eq!(document["metadata"]["visualize"]["x-grid"], json!("off"));
}

#[test]
fn default_models_roundtrip_for_every_type() {
    macro_rules! assert_default_roundtrip {
        ($($chart:ty),+ $(,)?) => {$(
            let chart = <$chart>::default();
            let document = chart.serialize_model().unwrap();
            let back = <$chart>::deserialize_model(&document).unwrap();
            assert_eq!(back, chart, "default {} did not round-trip", stringify!($chart));
        )+};
    }
    assert_default_roundtrip!(
        LineChart,
        AreaChart,
        BarChart,
        ColumnChart,
        ScatterPlot,
        StackedBarChart,
        MultipleColumnChart,
        ArrowChart,
    );
}

#[test]
fn configured_line_chart_roundtrips() {
    let mut chart = LineChart::new();
    chart.base.title = "Rates".to_string();
    chart.base.intro = "An intro".to_string();
    chart.base.notes = "Preliminary".to_string();
    chart.base.source_name = "ECB".to_string();
    chart.custom_range_y = [AxisValue::Int(0), AxisValue::Float(4.5)];
    chart.custom_ticks_y = vec![AxisValue::Int(0), AxisValue::Int(2), AxisValue::Int(4)];
    chart.y_grid = GridDisplay::Ticks;
    chart.scale_y = ScaleY::Log;
    chart.interpolation = Interpolation::StepAfter;
    chart.label_margin = 120;
    chart
        .color_category
        .insert("deposit".to_string(), "#15607a".to_string());
    chart.lines.push(Line {
        column: "deposit".to_string(),
        dash: Some(LineDash::LongDash),
        direct_label: true,
        ..Default::default()
    });
    chart
        .range_annotations
        .push(RangeAnnotation::x_range("2020/01", "2021/06"));
    chart
        .text_annotations
        .push(TextAnnotation::new("2022/07", 0.5, "first hike"));

    let document = chart.serialize_model().unwrap();
    let back = LineChart::deserialize_model(&document).unwrap();

    // Annotation ids are regenerated on write; compare everything else.
    assert_eq!(back.base, chart.base);
    assert_eq!(back.custom_range_y, chart.custom_range_y);
    assert_eq!(back.custom_ticks_y, chart.custom_ticks_y);
    assert_eq!(back.y_grid, chart.y_grid);
    assert_eq!(back.scale_y, chart.scale_y);
    assert_eq!(back.interpolation, chart.interpolation);
    assert_eq!(back.label_margin, chart.label_margin);
    assert_eq!(back.color_category, chart.color_category);
    assert_eq!(back.lines, chart.lines);
    let strip = |mut a: RangeAnnotation| {
        a.id = None;
        a
    };
    assert_eq!(
        back.range_annotations.into_iter().map(strip).collect::<Vec<_>>(),
        chart.range_annotations
    );
    assert_eq!(back.text_annotations[0].text, "first hike");
    assert_eq!(back.text_annotations[0].x, AxisValue::Text("2022/07".into()));
}

#[test]
fn configured_column_chart_roundtrips() {
    let mut chart = ColumnChart::new();
    chart.base.title = "Unemployment".to_string();
    chart.negative_color = Some("#d62728".to_string());
    chart.show_value_labels = ValueLabelDisplay::Always;
    chart.value_labels_format = "0.0%".to_string();
    chart.bar_padding = 45;
    chart.custom_range_y = Some([AxisValue::Int(0), AxisValue::Int(10)]);

    let document = chart.serialize_model().unwrap();
    let back = ColumnChart::deserialize_model(&document).unwrap();
    assert_eq!(back, chart);
}

#[test]
fn configured_bar_chart_reads_back_user_fields() {
    let mut chart = BarChart::new();
    chart.base.title = "Turnout".to_string();
    chart.label_column = "Country".to_string();
    chart.bar_column = "turnout".to_string();
    chart.custom_range = [AxisValue::Int(0), AxisValue::Int(100)];
    chart.background = true;
    chart.sort_bars = true;
    chart.replace_flags = ReplaceFlags::FourByThree;
    chart.highlighted_series = vec!["Malta (2022)".to_string()];

    let document = chart.serialize_model().unwrap();
    let back = BarChart::deserialize_model(&document).unwrap();
    assert_eq!(back.base.title, "Turnout");
    assert_eq!(back.label_column, "Country");
    assert_eq!(back.bar_column, "turnout");
    assert_eq!(back.custom_range, chart.custom_range);
    assert!(back.background);
    assert!(back.sort_bars);
    assert_eq!(back.replace_flags, ReplaceFlags::FourByThree);
    assert_eq!(back.highlighted_series, chart.highlighted_series);
    // With no explicit color column, the wire binds colors to the label
    // column and that binding is what reads back.
    assert_eq!(back.color_column, "Country");
}

#[test]
fn configured_multiple_column_chart_roundtrips() {
    let mut chart = MultipleColumnChart::new();
    chart.grid_column = 3;
    chart.sync_multiple_tooltips = true;
    chart.show_value_labels = ValueLabelDisplay::Hover;
    chart
        .color_category
        .insert("North".to_string(), "#1b9e77".to_string());

    let document = chart.serialize_model().unwrap();
    let back = MultipleColumnChart::deserialize_model(&document).unwrap();
    assert_eq!(back, chart);
}

#[test]
fn configured_stacked_bar_and_arrow_roundtrip() {
    let mut stacked = StackedBarChart::new();
    stacked.stack_percentages = true;
    stacked.negative_color = Some("#cc0000".to_string());
    let back = StackedBarChart::deserialize_model(&stacked.serialize_model().unwrap()).unwrap();
    assert_eq!(back, stacked);

    let mut arrow = ArrowChart::new();
    arrow.start_column = Some("2020".to_string());
    arrow.end_column = Some("2023".to_string());
    arrow.thick_arrows = false;
    let back = ArrowChart::deserialize_model(&arrow.serialize_model().unwrap()).unwrap();
    assert_eq!(back, arrow);
}

#[test]
fn configured_scatter_roundtrips() {
    let mut chart = ScatterPlot::new();
    chart.x_column = Some("GDP".to_string());
    chart.y_column = Some("Life Expectancy".to_string());
    chart.x_log = true;
    chart.opacity = 0.7;
    chart.x_ticks = vec![AxisValue::Int(1000), AxisValue::Int(100_000)];

    let back = ScatterPlot::deserialize_model(&chart.serialize_model().unwrap()).unwrap();
    assert_eq!(back, chart);
}

#[test]
fn unknown_config_keys_warn_but_construct() {
    // A typo'd key is reported through the log facade and otherwise
    // ignored; every recognized field still lands.
    let chart = LineChart::from_value(json!({
        "title": "Temp",
        "y-grid": "off",
        "sorce_name": "oops",
    }))
    .unwrap();
    assert_eq!(chart.base.title, "Temp");
    assert_eq!(chart.y_grid, GridDisplay::Off);
    assert_eq!(chart.base.source_name, "");
}

#[test]
fn color_category_overlay_shape() {
    let mut chart = LineChart::new();
    chart
        .color_category
        .insert("A".to_string(), "#fff".to_string());
    let document = chart.serialize_model().unwrap();
    assert_eq!(
        document["metadata"]["visualize"]["color-category"],
        json!({"map": {"A": "#fff"}})
    );

    let mut chart = ColumnChart::new();
    chart
        .color_category
        .insert("A".to_string(), "#fff".to_string());
    chart.category_order = vec!["A".to_string(), "B".to_string()];
    let document = chart.serialize_model().unwrap();
    assert_eq!(
        document["metadata"]["visualize"]["color-category"],
        json!({"map": {"A": "#fff"}, "categoryOrder": ["A", "B"]})
    );
}
