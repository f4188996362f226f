//! The column chart (`column-chart`).
//!
//! The column chart has the most wire quirks of the family: its Y-axis
//! range/tick keys drop the `-y` suffix (`custom-range`, `custom-ticks`),
//! grid state is mirrored into `grid-lines`/`grid-lines-x` encodings, axis
//! labels travel as a nested `yAxisLabels` object, and value labels use the
//! nested `valueLabels` form with conditional top-level companions.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::annotations::{RangeAnnotation, TextAnnotation, serialize_collection};
use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{
    GridDisplay, GridLabelAlign, GridLabelPosition, PlotHeightMode, ValueLabelDisplay,
    ValueLabelPlacement,
};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_i64, wire_str};
use crate::codecs::{AxisValue, color_category, enable_value, plot_height, range, ticks, value_labels};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper column chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnChart {
    #[serde(flatten)]
    pub base: BaseChart,

    //
    // Axes
    //
    #[serde(rename = "x-grid", alias = "x_grid")]
    pub x_grid: GridDisplay,
    #[serde(rename = "y-grid", alias = "y_grid")]
    pub y_grid: GridDisplay,
    #[serde(rename = "x-grid-format", alias = "x_grid_format")]
    pub x_grid_format: Option<String>,
    #[serde(rename = "y-grid-format", alias = "y_grid_format")]
    pub y_grid_format: Option<String>,
    #[serde(rename = "custom-range-x", alias = "custom_range_x")]
    pub custom_range_x: Option<[AxisValue; 2]>,
    /// Y-axis custom range; `custom-range` on the wire, without a suffix.
    #[serde(rename = "custom-range", alias = "custom_range_y")]
    pub custom_range_y: Option<[AxisValue; 2]>,
    #[serde(rename = "custom-ticks-x", alias = "custom_ticks_x")]
    pub custom_ticks_x: Option<Vec<AxisValue>>,
    /// Y-axis custom ticks; `custom-ticks` on the wire.
    #[serde(rename = "custom-ticks", alias = "custom_ticks_y")]
    pub custom_ticks_y: Option<Vec<AxisValue>>,
    #[serde(rename = "y-grid-labels", alias = "y_grid_labels")]
    pub y_grid_labels: GridLabelPosition,
    #[serde(rename = "y-grid-label-align", alias = "y_grid_label_align")]
    pub y_grid_label_align: GridLabelAlign,

    //
    // Appearance
    //
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    /// Color for negative values; `None` keeps a single color.
    #[serde(rename = "negative-color", alias = "negative_color")]
    pub negative_color: Option<String>,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    #[serde(rename = "category-labels", alias = "category_labels")]
    pub category_labels: IndexMap<String, String>,
    #[serde(rename = "category-order", alias = "category_order")]
    pub category_order: Vec<String>,
    /// Padding between columns as a percentage of the column width.
    #[serde(rename = "bar-padding", alias = "bar_padding")]
    pub bar_padding: i64,
    #[serde(rename = "plot-height-mode", alias = "plot_height_mode")]
    pub plot_height_mode: PlotHeightMode,
    #[serde(rename = "plot-height-fixed", alias = "plot_height_fixed")]
    pub plot_height_fixed: f64,
    #[serde(rename = "plot-height-ratio", alias = "plot_height_ratio")]
    pub plot_height_ratio: f64,

    //
    // Labels
    //
    #[serde(rename = "show-color-key", alias = "show_color_key")]
    pub show_color_key: bool,
    #[serde(rename = "show-value-labels", alias = "show_value_labels")]
    pub show_value_labels: ValueLabelDisplay,
    #[serde(rename = "value-labels-format", alias = "value_labels_format")]
    pub value_labels_format: String,
    #[serde(rename = "value-labels-placement", alias = "value_labels_placement")]
    pub value_labels_placement: ValueLabelPlacement,

    //
    // Annotations
    //
    #[serde(rename = "text-annotations", alias = "text_annotations")]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(rename = "range-annotations", alias = "range_annotations")]
    pub range_annotations: Vec<RangeAnnotation>,
}

impl Default for ColumnChart {
    fn default() -> Self {
        ColumnChart {
            base: BaseChart::default(),
            x_grid: GridDisplay::Off,
            y_grid: GridDisplay::On,
            x_grid_format: None,
            y_grid_format: None,
            custom_range_x: None,
            custom_range_y: None,
            custom_ticks_x: None,
            custom_ticks_y: None,
            y_grid_labels: GridLabelPosition::Outside,
            y_grid_label_align: GridLabelAlign::Left,
            base_color: PaletteColor::default(),
            negative_color: None,
            color_category: IndexMap::new(),
            category_labels: IndexMap::new(),
            category_order: Vec::new(),
            bar_padding: 30,
            plot_height_mode: PlotHeightMode::Fixed,
            plot_height_fixed: 300.0,
            plot_height_ratio: 0.5,
            show_color_key: false,
            show_value_labels: ValueLabelDisplay::Hover,
            value_labels_format: String::new(),
            value_labels_placement: ValueLabelPlacement::Outside,
            text_annotations: Vec::new(),
            range_annotations: Vec::new(),
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("x_grid", "x-grid"),
    FieldSpec::aliased("y_grid", "y-grid"),
    FieldSpec::aliased("x_grid_format", "x-grid-format"),
    FieldSpec::aliased("y_grid_format", "y-grid-format"),
    FieldSpec::aliased("custom_range_x", "custom-range-x"),
    FieldSpec::aliased("custom_range_y", "custom-range"),
    FieldSpec::aliased("custom_ticks_x", "custom-ticks-x"),
    FieldSpec::aliased("custom_ticks_y", "custom-ticks"),
    FieldSpec::aliased("y_grid_labels", "y-grid-labels"),
    FieldSpec::aliased("y_grid_label_align", "y-grid-label-align"),
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::aliased("negative_color", "negative-color"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("category_labels", "category-labels"),
    FieldSpec::aliased("category_order", "category-order"),
    FieldSpec::aliased("bar_padding", "bar-padding"),
    FieldSpec::aliased("plot_height_mode", "plot-height-mode"),
    FieldSpec::aliased("plot_height_fixed", "plot-height-fixed"),
    FieldSpec::aliased("plot_height_ratio", "plot-height-ratio"),
    FieldSpec::aliased("show_color_key", "show-color-key"),
    FieldSpec::aliased("show_value_labels", "show-value-labels"),
    FieldSpec::aliased("value_labels_format", "value-labels-format"),
    FieldSpec::aliased("value_labels_placement", "value-labels-placement"),
    FieldSpec::aliased("text_annotations", "text-annotations"),
    FieldSpec::aliased("range_annotations", "range-annotations"),
];

impl ColumnChart {
    pub fn new() -> Self {
        ColumnChart::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::Column)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("ColumnChart", obj, &fields);
        let chart: ColumnChart = serde_json::from_value(config)
            .map_err(|e| Error::validation("ColumnChart", e.to_string()))?;
        chart.validate()?;
        Ok(chart)
    }

    fn validate(&self) -> Result<()> {
        for annotation in &self.text_annotations {
            annotation.validate()?;
        }
        for annotation in &self.range_annotations {
            annotation.validate()?;
        }
        Ok(())
    }
}

impl ChartModel for ColumnChart {
    const CHART_TYPE: ChartType = ChartType::Column;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        self.validate()?;
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;
        let viz = visualize_mut(&mut document);

        // Grid state is written both as the shared string keys and as the
        // column chart's own encodings.
        viz.insert("x-grid".into(), json!(self.x_grid.as_str()));
        viz.insert("y-grid".into(), json!(self.y_grid.as_str()));
        viz.insert("grid-lines".into(), json!(self.y_grid == GridDisplay::On));
        if let Some(v) = &self.x_grid_format {
            viz.insert("x-grid-format".into(), json!(v));
        }
        if let Some(v) = &self.y_grid_format {
            viz.insert("y-grid-format".into(), json!(v));
        }
        if let Some(v) = &self.custom_range_x {
            viz.insert("custom-range-x".into(), range::serialize(v));
        }
        if let Some(v) = &self.custom_range_y {
            viz.insert("custom-range".into(), range::serialize(v));
        }
        if let Some(v) = &self.custom_ticks_x {
            viz.insert("custom-ticks-x".into(), json!(ticks::serialize(v)));
        }
        if let Some(v) = &self.custom_ticks_y {
            viz.insert("custom-ticks".into(), json!(ticks::serialize(v)));
        }
        let labels_off = self.y_grid_labels == GridLabelPosition::Off;
        viz.insert(
            "yAxisLabels".into(),
            json!({
                "enabled": !labels_off,
                "alignment": self.y_grid_label_align.as_str(),
                "placement": if labels_off { "" } else { self.y_grid_labels.as_str() },
            }),
        );

        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert(
            "negativeColor".into(),
            enable_value::serialize(self.negative_color.as_deref()),
        );
        viz.insert("bar-padding".into(), json!(self.bar_padding));
        viz.insert(
            "color-category".into(),
            color_category::serialize(
                &self.color_category,
                &self.category_labels,
                &self.category_order,
                None,
            ),
        );
        viz.insert(
            "color-by-column".into(),
            json!(!self.color_category.is_empty()),
        );
        for (key, value) in plot_height::serialize(
            &self.plot_height_mode,
            self.plot_height_fixed,
            self.plot_height_ratio,
        ) {
            viz.insert(key, value);
        }

        viz.insert("show-color-key".into(), json!(self.show_color_key));
        for (key, value) in value_labels::serialize(
            &self.show_value_labels,
            &self.value_labels_format,
            &self.value_labels_placement,
        ) {
            viz.insert(key, value);
        }

        viz.insert(
            "text-annotations".into(),
            serialize_collection(&self.text_annotations, TextAnnotation::to_wire)?,
        );
        viz.insert(
            "range-annotations".into(),
            serialize_collection(&self.range_annotations, RangeAnnotation::to_wire)?,
        );

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = ColumnChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        // The column chart's own grid encodings win over the shared keys.
        if let Some(grid_x) = viz.get("grid-lines-x").and_then(Value::as_object) {
            let enabled = grid_x
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            chart.x_grid = if enabled {
                grid_x
                    .get("type")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .unwrap_or("ticks")
                    .parse()?
            } else {
                GridDisplay::Off
            };
        }
        if let Some(v) = viz.get("grid-lines") {
            chart.y_grid = GridDisplay::from_wire(v)?;
        }
        if let Some(v) = wire_str(viz, "x-grid-format") {
            chart.x_grid_format = Some(v.to_string());
        }
        if let Some(v) = wire_str(viz, "y-grid-format") {
            chart.y_grid_format = Some(v.to_string());
        }
        if let Some(v) = viz.get("custom-range-x") {
            chart.custom_range_x = Some(range::deserialize(Some(v)));
        }
        if let Some(v) = viz.get("custom-range") {
            chart.custom_range_y = Some(range::deserialize(Some(v)));
        }
        if let Some(v) = wire_str(viz, "custom-ticks-x") {
            chart.custom_ticks_x = Some(ticks::deserialize(v));
        }
        if let Some(v) = wire_str(viz, "custom-ticks") {
            chart.custom_ticks_y = Some(ticks::deserialize(v));
        }
        if let Some(labels) = viz.get("yAxisLabels").and_then(Value::as_object) {
            let enabled = labels
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            chart.y_grid_labels = if enabled {
                labels
                    .get("placement")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .unwrap_or("outside")
                    .parse()?
            } else {
                GridLabelPosition::Off
            };
            if let Some(v) = labels.get("alignment").and_then(Value::as_str) {
                chart.y_grid_label_align = v.parse()?;
            }
        }

        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        if viz.contains_key("negativeColor") {
            chart.negative_color = enable_value::deserialize(viz.get("negativeColor"));
        }
        let colors = color_category::deserialize(viz.get("color-category"));
        chart.color_category = colors.color_category;
        chart.category_labels = colors.category_labels;
        chart.category_order = colors.category_order;
        if let Some(v) = wire_i64(viz, "bar-padding") {
            chart.bar_padding = v;
        }
        plot_height::deserialize(
            viz,
            &mut chart.plot_height_mode,
            &mut chart.plot_height_fixed,
            &mut chart.plot_height_ratio,
        )?;

        if let Some(v) = wire_bool(viz, "show-color-key") {
            chart.show_color_key = v;
        }
        let (show, format, placement) = value_labels::deserialize(viz)?;
        chart.show_value_labels = show;
        chart.value_labels_format = format;
        chart.value_labels_placement = placement;

        chart.text_annotations =
            TextAnnotation::deserialize_collection(viz.get("text-annotations"))?;
        chart.range_annotations =
            RangeAnnotation::deserialize_collection(viz.get("range-annotations"))?;

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_axis_keys_have_no_suffix() {
        let chart = ColumnChart {
            custom_range_y: Some([AxisValue::Int(0), AxisValue::Int(10)]),
            custom_ticks_y: Some(vec![AxisValue::Int(0), AxisValue::Int(5)]),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let viz = document["metadata"]["visualize"].as_object().unwrap();
        assert_eq!(viz["custom-range"], json!([0, 10]));
        assert_eq!(viz["custom-ticks"], json!("0,5"));
        assert!(!viz.contains_key("custom-range-y"));
        assert!(!viz.contains_key("custom-ticks-y"));
    }

    #[test]
    fn y_axis_labels_nest_into_object() {
        let chart = ColumnChart {
            y_grid_labels: GridLabelPosition::Off,
            y_grid_label_align: GridLabelAlign::Right,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["yAxisLabels"],
            json!({"enabled": false, "alignment": "right", "placement": ""})
        );
        let back = ColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(back.y_grid_labels, GridLabelPosition::Off);
        assert_eq!(back.y_grid_label_align, GridLabelAlign::Right);
    }

    #[test]
    fn negative_color_roundtrip() {
        let chart = ColumnChart {
            negative_color: Some("#E31A1C".to_string()),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["negativeColor"],
            json!({"value": "#E31A1C", "enabled": true})
        );
        let back = ColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(back.negative_color.as_deref(), Some("#E31A1C"));

        let chart = ColumnChart::new();
        let document = chart.serialize_model().unwrap();
        let back = ColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(back.negative_color, None);
    }

    #[test]
    fn grid_lines_x_object_drives_x_grid() {
        let document = json!({
            "type": "column-chart",
            "title": "t",
            "metadata": {"visualize": {
                "grid-lines-x": {"enabled": true, "type": "ticks"},
                "grid-lines": false,
            }}
        });
        let chart = ColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(chart.x_grid, GridDisplay::Ticks);
        assert_eq!(chart.y_grid, GridDisplay::Off);
    }

    #[test]
    fn value_labels_roundtrip() {
        let chart = ColumnChart {
            show_value_labels: ValueLabelDisplay::Always,
            value_labels_format: "0.0a".to_string(),
            value_labels_placement: ValueLabelPlacement::Inside,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let viz = &document["metadata"]["visualize"];
        assert_eq!(viz["valueLabels"]["show"], json!("always"));
        assert_eq!(viz["value-labels-always"], json!(true));
        assert_eq!(viz["value-label-format"], json!("0.0a"));
        let back = ColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(back.show_value_labels, ValueLabelDisplay::Always);
        assert_eq!(back.value_labels_format, "0.0a");
        assert_eq!(back.value_labels_placement, ValueLabelPlacement::Inside);
    }
}
