//! The scatter plot (`d3-scatter-plot`).
//!
//! The scatter plot nests its axis state into `x-axis`/`y-axis` objects
//! (with tick lists as real arrays, not comma strings), bundles tooltips
//! into a `tooltip` object with a forced `migrated` marker, and binds up to
//! six data columns to visual roles through `metadata.axes`.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::annotations::{RangeAnnotation, TextAnnotation, serialize_collection};
use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{
    PlotHeightMode, RegressionMethod, ScatterAxisPosition, ScatterGridLines, ScatterShape,
    ScatterShapeMode, ScatterSize, SizeLegendLabelPosition, SizeLegendPosition,
    SizeLegendTitlePosition, SizeLegendValues,
};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_f64, wire_i64, wire_str};
use crate::codecs::{AxisValue, color_category, plot_height, range};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper scatter plot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScatterPlot {
    #[serde(flatten)]
    pub base: BaseChart,

    //
    // Horizontal axis
    //
    /// Column bound to the x role (`axes.x`).
    #[serde(rename = "x-column", alias = "x_column")]
    pub x_column: Option<String>,
    #[serde(rename = "x-range", alias = "x_range")]
    pub x_range: [AxisValue; 2],
    #[serde(rename = "x-ticks", alias = "x_ticks")]
    pub x_ticks: Vec<AxisValue>,
    #[serde(rename = "x-log", alias = "x_log")]
    pub x_log: bool,
    #[serde(rename = "x-format", alias = "x_format")]
    pub x_format: String,
    #[serde(rename = "x-position", alias = "x_position")]
    pub x_position: ScatterAxisPosition,
    #[serde(rename = "x-grid-lines", alias = "x_grid_lines")]
    pub x_grid_lines: ScatterGridLines,

    //
    // Vertical axis
    //
    #[serde(rename = "y-column", alias = "y_column")]
    pub y_column: Option<String>,
    #[serde(rename = "y-range", alias = "y_range")]
    pub y_range: [AxisValue; 2],
    #[serde(rename = "y-ticks", alias = "y_ticks")]
    pub y_ticks: Vec<AxisValue>,
    #[serde(rename = "y-log", alias = "y_log")]
    pub y_log: bool,
    #[serde(rename = "y-format", alias = "y_format")]
    pub y_format: String,
    #[serde(rename = "y-position", alias = "y_position")]
    pub y_position: ScatterAxisPosition,
    #[serde(rename = "y-grid-lines", alias = "y_grid_lines")]
    pub y_grid_lines: ScatterGridLines,

    //
    // Color
    //
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    /// Point opacity (0–1).
    pub opacity: f64,
    pub outlines: bool,
    #[serde(rename = "color-outline", alias = "color_outline")]
    pub color_outline: String,
    #[serde(rename = "show-color-key", alias = "show_color_key")]
    pub show_color_key: bool,
    /// Column bound to the color role (`axes.color`).
    #[serde(rename = "color-column", alias = "color_column")]
    pub color_column: String,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    #[serde(rename = "category-labels", alias = "category_labels")]
    pub category_labels: IndexMap<String, String>,
    #[serde(rename = "category-order", alias = "category_order")]
    pub category_order: Vec<String>,
    #[serde(rename = "exclude-from-color-key", alias = "exclude_from_color_key")]
    pub exclude_from_color_key: Vec<String>,

    //
    // Size
    //
    pub size: ScatterSize,
    #[serde(rename = "fixed-size", alias = "fixed_size")]
    pub fixed_size: f64,
    /// Column bound to the size role (`axes.size`).
    #[serde(rename = "size-column", alias = "size_column")]
    pub size_column: Option<String>,
    #[serde(rename = "max-size", alias = "max_size")]
    pub max_size: f64,
    #[serde(rename = "responsive-symbol-size", alias = "responsive_symbol_size")]
    pub responsive_symbol_size: bool,
    #[serde(rename = "show-size-legend", alias = "show_size_legend")]
    pub show_size_legend: bool,
    #[serde(rename = "size-legend-position", alias = "size_legend_position")]
    pub size_legend_position: SizeLegendPosition,
    #[serde(rename = "legend-offset-x", alias = "legend_offset_x")]
    pub legend_offset_x: i64,
    #[serde(rename = "legend-offset-y", alias = "legend_offset_y")]
    pub legend_offset_y: i64,
    /// `size-legend-values-setting` on the wire.
    #[serde(rename = "size-legend-values-format", alias = "size_legend_values_format")]
    pub size_legend_values_format: SizeLegendValues,
    #[serde(rename = "size-legend-values", alias = "size_legend_values")]
    pub size_legend_values: Vec<f64>,
    #[serde(
        rename = "size-legend-label-position",
        alias = "size_legend_label_position"
    )]
    pub size_legend_label_position: SizeLegendLabelPosition,
    #[serde(rename = "size-legend-label-format", alias = "size_legend_label_format")]
    pub size_legend_label_format: String,
    #[serde(
        rename = "size-legend-title-enabled",
        alias = "size_legend_title_enabled"
    )]
    pub size_legend_title_enabled: bool,
    #[serde(rename = "size-legend-title", alias = "size_legend_title")]
    pub size_legend_title: String,
    #[serde(
        rename = "size-legend-title-position",
        alias = "size_legend_title_position"
    )]
    pub size_legend_title_position: SizeLegendTitlePosition,
    #[serde(rename = "size-legend-title-width", alias = "size_legend_title_width")]
    pub size_legend_title_width: f64,

    //
    // Shape
    //
    pub shape: ScatterShapeMode,
    #[serde(rename = "fixed-shape", alias = "fixed_shape")]
    pub fixed_shape: ScatterShape,
    /// Column bound to the shape role (`axes.shape`).
    #[serde(rename = "shape-column", alias = "shape_column")]
    pub shape_column: Option<String>,

    //
    // Trend line
    //
    pub regression: bool,
    #[serde(rename = "regression-method", alias = "regression_method")]
    pub regression_method: RegressionMethod,

    //
    // Appearance
    //
    #[serde(rename = "plot-height-mode", alias = "plot_height_mode")]
    pub plot_height_mode: PlotHeightMode,
    #[serde(rename = "plot-height-fixed", alias = "plot_height_fixed")]
    pub plot_height_fixed: f64,
    #[serde(rename = "plot-height-ratio", alias = "plot_height_ratio")]
    pub plot_height_ratio: f64,

    //
    // Annotations and labeling
    //
    #[serde(rename = "text-annotations", alias = "text_annotations")]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(rename = "range-annotations", alias = "range_annotations")]
    pub range_annotations: Vec<RangeAnnotation>,
    /// Custom line definitions, in the provider's mini syntax.
    #[serde(rename = "custom-lines", alias = "custom_lines")]
    pub custom_lines: String,
    /// Column bound to the label role (`axes.labels`).
    #[serde(rename = "label-column", alias = "label_column")]
    pub label_column: Option<String>,
    #[serde(rename = "auto-labels", alias = "auto_labels")]
    pub auto_labels: bool,
    /// Values to force labels for.
    #[serde(rename = "add-labels", alias = "add_labels")]
    pub add_labels: Vec<AxisValue>,
    #[serde(rename = "highlight-labeled", alias = "highlight_labeled")]
    pub highlight_labeled: bool,

    //
    // Tooltips
    //
    #[serde(rename = "tooltip-enabled", alias = "tooltip_enabled")]
    pub tooltip_enabled: bool,
    #[serde(rename = "tooltip-title", alias = "tooltip_title")]
    pub tooltip_title: String,
    #[serde(rename = "tooltip-body", alias = "tooltip_body")]
    pub tooltip_body: String,
    #[serde(rename = "tooltip-sticky", alias = "tooltip_sticky")]
    pub tooltip_sticky: bool,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        ScatterPlot {
            base: BaseChart::default(),
            x_column: None,
            x_range: [AxisValue::unset(), AxisValue::unset()],
            x_ticks: Vec::new(),
            x_log: false,
            x_format: String::new(),
            x_position: ScatterAxisPosition::Bottom,
            x_grid_lines: ScatterGridLines::On,
            y_column: None,
            y_range: [AxisValue::unset(), AxisValue::unset()],
            y_ticks: Vec::new(),
            y_log: false,
            y_format: String::new(),
            y_position: ScatterAxisPosition::Bottom,
            y_grid_lines: ScatterGridLines::On,
            base_color: PaletteColor::default(),
            opacity: 1.0,
            outlines: false,
            color_outline: "#000000".to_string(),
            show_color_key: false,
            color_column: String::new(),
            color_category: IndexMap::new(),
            category_labels: IndexMap::new(),
            category_order: Vec::new(),
            exclude_from_color_key: Vec::new(),
            size: ScatterSize::Fixed,
            fixed_size: 5.0,
            size_column: None,
            max_size: 25.0,
            responsive_symbol_size: false,
            show_size_legend: false,
            size_legend_position: SizeLegendPosition::Above,
            legend_offset_x: 0,
            legend_offset_y: 0,
            size_legend_values_format: SizeLegendValues::Auto,
            size_legend_values: Vec::new(),
            size_legend_label_position: SizeLegendLabelPosition::Below,
            size_legend_label_format: String::new(),
            size_legend_title_enabled: false,
            size_legend_title: String::new(),
            size_legend_title_position: SizeLegendTitlePosition::Left,
            size_legend_title_width: 200.0,
            shape: ScatterShapeMode::Fixed,
            fixed_shape: ScatterShape::Circle,
            shape_column: None,
            regression: false,
            regression_method: RegressionMethod::Linear,
            plot_height_mode: PlotHeightMode::Fixed,
            plot_height_fixed: 300.0,
            plot_height_ratio: 0.5,
            text_annotations: Vec::new(),
            range_annotations: Vec::new(),
            custom_lines: String::new(),
            label_column: None,
            auto_labels: true,
            add_labels: Vec::new(),
            highlight_labeled: true,
            tooltip_enabled: true,
            tooltip_title: String::new(),
            tooltip_body: String::new(),
            tooltip_sticky: false,
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("x_column", "x-column"),
    FieldSpec::aliased("x_range", "x-range"),
    FieldSpec::aliased("x_ticks", "x-ticks"),
    FieldSpec::aliased("x_log", "x-log"),
    FieldSpec::aliased("x_format", "x-format"),
    FieldSpec::aliased("x_position", "x-position"),
    FieldSpec::aliased("x_grid_lines", "x-grid-lines"),
    FieldSpec::aliased("y_column", "y-column"),
    FieldSpec::aliased("y_range", "y-range"),
    FieldSpec::aliased("y_ticks", "y-ticks"),
    FieldSpec::aliased("y_log", "y-log"),
    FieldSpec::aliased("y_format", "y-format"),
    FieldSpec::aliased("y_position", "y-position"),
    FieldSpec::aliased("y_grid_lines", "y-grid-lines"),
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::new("opacity"),
    FieldSpec::new("outlines"),
    FieldSpec::aliased("color_outline", "color-outline"),
    FieldSpec::aliased("show_color_key", "show-color-key"),
    FieldSpec::aliased("color_column", "color-column"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("category_labels", "category-labels"),
    FieldSpec::aliased("category_order", "category-order"),
    FieldSpec::aliased("exclude_from_color_key", "exclude-from-color-key"),
    FieldSpec::new("size"),
    FieldSpec::aliased("fixed_size", "fixed-size"),
    FieldSpec::aliased("size_column", "size-column"),
    FieldSpec::aliased("max_size", "max-size"),
    FieldSpec::aliased("responsive_symbol_size", "responsive-symbol-size"),
    FieldSpec::aliased("show_size_legend", "show-size-legend"),
    FieldSpec::aliased("size_legend_position", "size-legend-position"),
    FieldSpec::aliased("legend_offset_x", "legend-offset-x"),
    FieldSpec::aliased("legend_offset_y", "legend-offset-y"),
    FieldSpec::aliased("size_legend_values_format", "size-legend-values-format"),
    FieldSpec::aliased("size_legend_values", "size-legend-values"),
    FieldSpec::aliased("size_legend_label_position", "size-legend-label-position"),
    FieldSpec::aliased("size_legend_label_format", "size-legend-label-format"),
    FieldSpec::aliased("size_legend_title_enabled", "size-legend-title-enabled"),
    FieldSpec::aliased("size_legend_title", "size-legend-title"),
    FieldSpec::aliased("size_legend_title_position", "size-legend-title-position"),
    FieldSpec::aliased("size_legend_title_width", "size-legend-title-width"),
    FieldSpec::new("shape"),
    FieldSpec::aliased("fixed_shape", "fixed-shape"),
    FieldSpec::aliased("shape_column", "shape-column"),
    FieldSpec::new("regression"),
    FieldSpec::aliased("regression_method", "regression-method"),
    FieldSpec::aliased("plot_height_mode", "plot-height-mode"),
    FieldSpec::aliased("plot_height_fixed", "plot-height-fixed"),
    FieldSpec::aliased("plot_height_ratio", "plot-height-ratio"),
    FieldSpec::aliased("text_annotations", "text-annotations"),
    FieldSpec::aliased("range_annotations", "range-annotations"),
    FieldSpec::aliased("custom_lines", "custom-lines"),
    FieldSpec::aliased("label_column", "label-column"),
    FieldSpec::aliased("auto_labels", "auto-labels"),
    FieldSpec::aliased("add_labels", "add-labels"),
    FieldSpec::aliased("highlight_labeled", "highlight-labeled"),
    FieldSpec::aliased("tooltip_enabled", "tooltip-enabled"),
    FieldSpec::aliased("tooltip_title", "tooltip-title"),
    FieldSpec::aliased("tooltip_body", "tooltip-body"),
    FieldSpec::aliased("tooltip_sticky", "tooltip-sticky"),
];

impl ScatterPlot {
    pub fn new() -> Self {
        ScatterPlot::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::Scatter)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("ScatterPlot", obj, &fields);
        let chart: ScatterPlot = serde_json::from_value(config)
            .map_err(|e| Error::validation("ScatterPlot", e.to_string()))?;
        chart.validate()?;
        Ok(chart)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::validation(
                "opacity",
                format!("{} is not between 0.0 and 1.0", self.opacity),
            ));
        }
        for annotation in &self.text_annotations {
            annotation.validate()?;
        }
        for annotation in &self.range_annotations {
            annotation.validate()?;
        }
        Ok(())
    }
}

impl ChartModel for ScatterPlot {
    const CHART_TYPE: ChartType = ChartType::Scatter;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        self.validate()?;
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;

        // Column-to-role bindings; only roles actually assigned appear.
        let mut axes = Map::new();
        let roles: [(&str, Option<&String>); 6] = [
            ("x", self.x_column.as_ref()),
            ("y", self.y_column.as_ref()),
            ("size", self.size_column.as_ref()),
            ("shape", self.shape_column.as_ref()),
            ("labels", self.label_column.as_ref()),
            (
                "color",
                (!self.color_column.is_empty()).then_some(&self.color_column),
            ),
        ];
        for (role, column) in roles {
            if let Some(column) = column {
                axes.insert(role.to_string(), json!(column));
            }
        }
        document["metadata"]["axes"] = Value::Object(axes);

        let viz = visualize_mut(&mut document);
        // Axes
        viz.insert(
            "x-axis".into(),
            json!({
                "log": self.x_log,
                "range": range::serialize(&self.x_range),
                "ticks": self.x_ticks,
            }),
        );
        viz.insert("x-format".into(), json!(self.x_format));
        viz.insert("x-pos".into(), json!(self.x_position.as_str()));
        viz.insert("x-grid-lines".into(), json!(self.x_grid_lines.as_str()));
        viz.insert(
            "y-axis".into(),
            json!({
                "log": self.y_log,
                "range": range::serialize(&self.y_range),
                "ticks": self.y_ticks,
            }),
        );
        viz.insert("y-format".into(), json!(self.y_format));
        viz.insert("y-pos".into(), json!(self.y_position.as_str()));
        viz.insert("y-grid-lines".into(), json!(self.y_grid_lines.as_str()));
        // Color
        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert("opacity".into(), json!(self.opacity));
        viz.insert("outlines".into(), json!(self.outlines));
        viz.insert("color-outline".into(), json!(self.color_outline));
        viz.insert("show-color-key".into(), json!(self.show_color_key));
        viz.insert(
            "color-category".into(),
            color_category::serialize(
                &self.color_category,
                &self.category_labels,
                &self.category_order,
                Some(&self.exclude_from_color_key),
            ),
        );
        viz.insert(
            "color-by-column".into(),
            json!(!self.color_category.is_empty()),
        );
        // Size
        viz.insert("size".into(), json!(self.size.as_str()));
        viz.insert("fixed-size".into(), json!(self.fixed_size));
        viz.insert("max-size".into(), json!(self.max_size));
        viz.insert(
            "responsive-symbol-size".into(),
            json!(self.responsive_symbol_size),
        );
        viz.insert("show-size-legend".into(), json!(self.show_size_legend));
        viz.insert(
            "size-legend-position".into(),
            json!(self.size_legend_position.as_str()),
        );
        viz.insert("legend-offset-x".into(), json!(self.legend_offset_x));
        viz.insert("legend-offset-y".into(), json!(self.legend_offset_y));
        viz.insert(
            "size-legend-values-setting".into(),
            json!(self.size_legend_values_format.as_str()),
        );
        viz.insert("size-legend-values".into(), json!(self.size_legend_values));
        viz.insert(
            "size-legend-label-position".into(),
            json!(self.size_legend_label_position.as_str()),
        );
        viz.insert(
            "size-legend-label-format".into(),
            json!(self.size_legend_label_format),
        );
        viz.insert(
            "size-legend-title-enabled".into(),
            json!(self.size_legend_title_enabled),
        );
        viz.insert("size-legend-title".into(), json!(self.size_legend_title));
        viz.insert(
            "size-legend-title-position".into(),
            json!(self.size_legend_title_position.as_str()),
        );
        viz.insert(
            "size-legend-title-width".into(),
            json!(self.size_legend_title_width),
        );
        // Shape
        viz.insert("shape".into(), json!(self.shape.as_str()));
        viz.insert("fixed-shape".into(), json!(self.fixed_shape.as_str()));
        // Trend line
        viz.insert("regression".into(), json!(self.regression));
        viz.insert(
            "regression-method".into(),
            json!(self.regression_method.as_str()),
        );
        // Appearance
        for (key, value) in plot_height::serialize(
            &self.plot_height_mode,
            self.plot_height_fixed,
            self.plot_height_ratio,
        ) {
            viz.insert(key, value);
        }
        // Annotations and labeling
        viz.insert(
            "text-annotations".into(),
            serialize_collection(&self.text_annotations, TextAnnotation::to_wire)?,
        );
        viz.insert(
            "range-annotations".into(),
            serialize_collection(&self.range_annotations, RangeAnnotation::to_wire)?,
        );
        viz.insert("custom-lines".into(), json!(self.custom_lines));
        viz.insert("auto-labels".into(), json!(self.auto_labels));
        viz.insert("add-labels".into(), json!(self.add_labels));
        viz.insert("highlight-labeled".into(), json!(self.highlight_labeled));
        // Tooltips
        viz.insert(
            "tooltip".into(),
            json!({
                "body": self.tooltip_body,
                "title": self.tooltip_title,
                "sticky": self.tooltip_sticky,
                "enabled": self.tooltip_enabled,
                "migrated": true,
            }),
        );

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = ScatterPlot {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        if let Some(axes) = metadata_section(document, "axes") {
            chart.x_column = wire_str(axes, "x").map(str::to_string);
            chart.y_column = wire_str(axes, "y").map(str::to_string);
            chart.size_column = wire_str(axes, "size").map(str::to_string);
            chart.shape_column = wire_str(axes, "shape").map(str::to_string);
            chart.label_column = wire_str(axes, "labels").map(str::to_string);
            if let Some(v) = wire_str(axes, "color") {
                chart.color_column = v.to_string();
            }
        }
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        if let Some(axis) = viz.get("x-axis").and_then(Value::as_object) {
            chart.x_log = axis.get("log").and_then(Value::as_bool).unwrap_or(false);
            chart.x_range = range::deserialize(axis.get("range"));
            if let Some(ticks) = axis.get("ticks") {
                chart.x_ticks = serde_json::from_value(ticks.clone())?;
            }
        }
        if let Some(v) = wire_str(viz, "x-format") {
            chart.x_format = v.to_string();
        }
        if let Some(v) = wire_str(viz, "x-pos") {
            chart.x_position = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "x-grid-lines") {
            chart.x_grid_lines = v.parse()?;
        }
        if let Some(axis) = viz.get("y-axis").and_then(Value::as_object) {
            chart.y_log = axis.get("log").and_then(Value::as_bool).unwrap_or(false);
            chart.y_range = range::deserialize(axis.get("range"));
            if let Some(ticks) = axis.get("ticks") {
                chart.y_ticks = serde_json::from_value(ticks.clone())?;
            }
        }
        if let Some(v) = wire_str(viz, "y-format") {
            chart.y_format = v.to_string();
        }
        if let Some(v) = wire_str(viz, "y-pos") {
            chart.y_position = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "y-grid-lines") {
            chart.y_grid_lines = v.parse()?;
        }

        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        if let Some(v) = wire_f64(viz, "opacity") {
            chart.opacity = v;
        }
        if let Some(v) = wire_bool(viz, "outlines") {
            chart.outlines = v;
        }
        if let Some(v) = wire_str(viz, "color-outline") {
            chart.color_outline = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "show-color-key") {
            chart.show_color_key = v;
        }
        let colors = color_category::deserialize(viz.get("color-category"));
        chart.color_category = colors.color_category;
        chart.category_labels = colors.category_labels;
        chart.category_order = colors.category_order;
        chart.exclude_from_color_key = colors.exclude_from_color_key;

        if let Some(v) = wire_str(viz, "size") {
            chart.size = v.parse()?;
        }
        if let Some(v) = wire_f64(viz, "fixed-size") {
            chart.fixed_size = v;
        }
        if let Some(v) = wire_f64(viz, "max-size") {
            chart.max_size = v;
        }
        if let Some(v) = wire_bool(viz, "responsive-symbol-size") {
            chart.responsive_symbol_size = v;
        }
        if let Some(v) = wire_bool(viz, "show-size-legend") {
            chart.show_size_legend = v;
        }
        if let Some(v) = wire_str(viz, "size-legend-position") {
            chart.size_legend_position = v.parse()?;
        }
        if let Some(v) = wire_i64(viz, "legend-offset-x") {
            chart.legend_offset_x = v;
        }
        if let Some(v) = wire_i64(viz, "legend-offset-y") {
            chart.legend_offset_y = v;
        }
        if let Some(v) = wire_str(viz, "size-legend-values-setting") {
            chart.size_legend_values_format = v.parse()?;
        }
        if let Some(v) = viz.get("size-legend-values") {
            chart.size_legend_values = serde_json::from_value(v.clone())?;
        }
        if let Some(v) = wire_str(viz, "size-legend-label-position") {
            chart.size_legend_label_position = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "size-legend-label-format") {
            chart.size_legend_label_format = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "size-legend-title-enabled") {
            chart.size_legend_title_enabled = v;
        }
        if let Some(v) = wire_str(viz, "size-legend-title") {
            chart.size_legend_title = v.to_string();
        }
        if let Some(v) = wire_str(viz, "size-legend-title-position") {
            chart.size_legend_title_position = v.parse()?;
        }
        if let Some(v) = wire_f64(viz, "size-legend-title-width") {
            chart.size_legend_title_width = v;
        }

        if let Some(v) = wire_str(viz, "shape") {
            chart.shape = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "fixed-shape") {
            chart.fixed_shape = v.parse()?;
        }

        if let Some(v) = wire_bool(viz, "regression") {
            chart.regression = v;
        }
        if let Some(v) = wire_str(viz, "regression-method") {
            chart.regression_method = v.parse()?;
        }

        plot_height::deserialize(
            viz,
            &mut chart.plot_height_mode,
            &mut chart.plot_height_fixed,
            &mut chart.plot_height_ratio,
        )?;

        chart.text_annotations =
            TextAnnotation::deserialize_collection(viz.get("text-annotations"))?;
        chart.range_annotations =
            RangeAnnotation::deserialize_collection(viz.get("range-annotations"))?;
        if let Some(v) = wire_str(viz, "custom-lines") {
            chart.custom_lines = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "auto-labels") {
            chart.auto_labels = v;
        }
        if let Some(v) = viz.get("add-labels") {
            chart.add_labels = serde_json::from_value(v.clone())?;
        }
        if let Some(v) = wire_bool(viz, "highlight-labeled") {
            chart.highlight_labeled = v;
        }

        if let Some(tooltip) = viz.get("tooltip").and_then(Value::as_object) {
            chart.tooltip_enabled = tooltip
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            chart.tooltip_title = tooltip
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            chart.tooltip_body = tooltip
                .get("body")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            chart.tooltip_sticky = tooltip
                .get("sticky")
                .and_then(Value::as_bool)
                .unwrap_or(false);
        }

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_only_include_assigned_roles() {
        let chart = ScatterPlot {
            x_column: Some("GDP".to_string()),
            y_column: Some("Life Expectancy".to_string()),
            size_column: Some("Population".to_string()),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let axes = document["metadata"]["axes"].as_object().unwrap();
        assert_eq!(axes.len(), 3);
        assert_eq!(axes["x"], json!("GDP"));
        assert_eq!(axes["size"], json!("Population"));
        assert!(!axes.contains_key("color"));
    }

    #[test]
    fn axis_state_nests_into_objects() {
        let chart = ScatterPlot {
            x_log: true,
            x_range: [AxisValue::Int(0), AxisValue::Int(80000)],
            x_ticks: vec![AxisValue::Int(0), AxisValue::Int(40000)],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["x-axis"],
            json!({"log": true, "range": [0, 80000], "ticks": [0, 40000]})
        );
    }

    #[test]
    fn tooltip_object_carries_migrated_marker() {
        let chart = ScatterPlot {
            tooltip_title: "{{ Country }}".to_string(),
            tooltip_sticky: true,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let tooltip = &document["metadata"]["visualize"]["tooltip"];
        assert_eq!(tooltip["migrated"], json!(true));
        assert_eq!(tooltip["sticky"], json!(true));
        let back = ScatterPlot::deserialize_model(&document).unwrap();
        assert_eq!(back.tooltip_title, "{{ Country }}");
        assert!(back.tooltip_sticky);
    }

    #[test]
    fn size_and_shape_roundtrip() {
        let chart = ScatterPlot {
            size: ScatterSize::Dynamic,
            size_column: Some("Population".to_string()),
            max_size: 40.0,
            shape: ScatterShapeMode::Fixed,
            fixed_shape: ScatterShape::Wye,
            regression: true,
            regression_method: RegressionMethod::Logarithmic,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        // The values-setting key has a wire name unlike the model name.
        assert_eq!(
            document["metadata"]["visualize"]["size-legend-values-setting"],
            json!("auto")
        );
        let back = ScatterPlot::deserialize_model(&document).unwrap();
        assert_eq!(back, chart);
    }

    #[test]
    fn opacity_out_of_range_fails() {
        let chart = ScatterPlot {
            opacity: 1.2,
            ..Default::default()
        };
        assert!(chart.serialize_model().is_err());
    }
}
