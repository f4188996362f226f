//! The line chart (`d3-lines`).

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::annotations::{
    AreaFill, LineSymbols, LineValueLabels, RangeAnnotation, TextAnnotation,
    serialize_collection,
};
use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, serialize_base,
    visualize_mut,
};
use crate::charts::enums::{
    GridDisplay, GridLabelAlign, GridLabelPosition, Interpolation, LineDash, LineWidth,
    PlotHeightMode, ScaleY,
};
use crate::charts::{ChartType, wire_bool, wire_i64, wire_str};
use crate::codecs::{AxisValue, plot_height, range, ticks};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// Configuration for one line, keyed by its data column in the wire
/// `lines` mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Line {
    /// The data column this line draws.
    pub column: String,
    /// Title shown in tooltips and legends; empty uses the column name.
    pub title: String,
    pub interpolation: Interpolation,
    pub width: LineWidth,
    /// `None` draws a solid line.
    pub dash: Option<LineDash>,
    #[serde(rename = "colorKey", alias = "color_key")]
    pub color_key: bool,
    /// Direct label in the right-hand margin.
    #[serde(rename = "directLabel", alias = "direct_label")]
    pub direct_label: bool,
    /// Line outline (`bgStroke` on the wire).
    #[serde(rename = "bgStroke", alias = "outline")]
    pub outline: bool,
    /// Symbols on the line; presence enables them.
    pub symbols: Option<LineSymbols>,
    /// Per-line value labels; presence enables them.
    #[serde(rename = "valueLabels", alias = "value_labels")]
    pub value_labels: Option<LineValueLabels>,
    #[serde(rename = "connectMissingPoints", alias = "connect_missing_points")]
    pub connect_missing_points: bool,
}

impl Default for Line {
    fn default() -> Self {
        Line {
            column: String::new(),
            title: String::new(),
            interpolation: Interpolation::Linear,
            width: LineWidth::Thin,
            dash: None,
            color_key: false,
            direct_label: false,
            outline: false,
            symbols: None,
            value_labels: None,
            connect_missing_points: false,
        }
    }
}

impl Line {
    pub fn new(column: impl Into<String>) -> Self {
        Line {
            column: column.into(),
            ..Default::default()
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let line: Line = serde_json::from_value(value)
            .map_err(|e| Error::validation("lines", e.to_string()))?;
        line.validate()?;
        Ok(line)
    }

    pub fn validate(&self) -> Result<()> {
        if self.column.is_empty() {
            return Err(Error::validation(
                "column",
                "a line configuration requires a column name",
            ));
        }
        Ok(())
    }

    /// The wire entry for this line; the column name is the mapping key
    /// and not repeated inside.
    fn to_wire(&self) -> Result<Value> {
        self.validate()?;
        let mut entry = json!({
            "title": self.title,
            "interpolation": self.interpolation.as_str(),
            "width": self.width.as_str(),
            "colorKey": self.color_key,
            "directLabel": self.direct_label,
            "bgStroke": self.outline,
            "connectMissingPoints": self.connect_missing_points,
            "symbols": match &self.symbols {
                Some(symbols) => symbols.to_wire(),
                None => json!({"enabled": false}),
            },
            "valueLabels": match &self.value_labels {
                Some(labels) => labels.to_wire(),
                None => json!({"enabled": false}),
            },
        });
        if let Some(dash) = self.dash {
            entry["dash"] = json!(dash.as_str());
        }
        Ok(entry)
    }

    fn from_wire(column: &str, config: &Map<String, Value>) -> Result<Self> {
        let mut line = Line::new(column);
        if let Some(title) = config.get("title").and_then(Value::as_str) {
            line.title = title.to_string();
        }
        if let Some(raw) = config.get("interpolation").and_then(Value::as_str) {
            line.interpolation = raw.parse()?;
        }
        if let Some(raw) = config.get("width").and_then(Value::as_str) {
            line.width = raw.parse()?;
        }
        line.dash = match config.get("dash").and_then(Value::as_str) {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        if let Some(v) = config.get("colorKey").and_then(Value::as_bool) {
            line.color_key = v;
        }
        if let Some(v) = config.get("directLabel").and_then(Value::as_bool) {
            line.direct_label = v;
        }
        if let Some(v) = config.get("bgStroke").and_then(Value::as_bool) {
            line.outline = v;
        }
        if let Some(v) = config.get("connectMissingPoints").and_then(Value::as_bool) {
            line.connect_missing_points = v;
        }
        line.symbols = LineSymbols::from_wire(config.get("symbols"))?;
        line.value_labels = LineValueLabels::from_wire(config.get("valueLabels"))?;
        Ok(line)
    }
}

/// A Datawrapper line chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineChart {
    #[serde(flatten)]
    pub base: BaseChart,

    //
    // Horizontal axis
    //
    #[serde(rename = "custom-range-x", alias = "custom_range_x")]
    pub custom_range_x: [AxisValue; 2],
    #[serde(rename = "custom-ticks-x", alias = "custom_ticks_x")]
    pub custom_ticks_x: Vec<AxisValue>,
    /// Format for the x grid labels; a date or number format string.
    #[serde(rename = "x-grid-format", alias = "x_grid_format")]
    pub x_grid_format: String,
    #[serde(rename = "x-grid", alias = "x_grid")]
    pub x_grid: GridDisplay,

    //
    // Vertical axis
    //
    #[serde(rename = "custom-range-y", alias = "custom_range_y")]
    pub custom_range_y: [AxisValue; 2],
    #[serde(rename = "custom-ticks-y", alias = "custom_ticks_y")]
    pub custom_ticks_y: Vec<AxisValue>,
    #[serde(rename = "y-grid-format", alias = "y_grid_format")]
    pub y_grid_format: String,
    #[serde(rename = "y-grid", alias = "y_grid")]
    pub y_grid: GridDisplay,
    #[serde(rename = "y-grid-labels", alias = "y_grid_labels")]
    pub y_grid_labels: GridLabelPosition,
    #[serde(rename = "y-grid-label-align", alias = "y_grid_label_align")]
    pub y_grid_label_align: GridLabelAlign,
    #[serde(rename = "scale-y", alias = "scale_y")]
    pub scale_y: ScaleY,
    /// Subdivide a log scale.
    #[serde(rename = "y-grid-subdivide", alias = "y_grid_subdivide")]
    pub y_grid_subdivide: bool,

    //
    // Lines
    //
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    pub interpolation: Interpolation,
    /// Connector lines between line ends and their labels.
    #[serde(rename = "connector-lines", alias = "connector_lines")]
    pub connector_lines: bool,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    /// Per-line configuration overrides.
    pub lines: Vec<Line>,
    #[serde(rename = "area-fills", alias = "area_fills")]
    pub area_fills: Vec<AreaFill>,

    //
    // Labels
    //
    #[serde(rename = "stack-color-legend", alias = "stack_color_legend")]
    pub stack_color_legend: bool,
    /// Color line category labels like the line itself.
    #[serde(rename = "label-colors", alias = "label_colors")]
    pub label_colors: bool,
    /// Right-hand label margin; zero is auto.
    #[serde(rename = "label-margin", alias = "label_margin")]
    pub label_margin: i64,
    #[serde(rename = "value-labels-format", alias = "value_labels_format")]
    pub value_labels_format: String,
    #[serde(rename = "value-label-colors", alias = "value_label_colors")]
    pub value_label_colors: bool,

    //
    // Tooltips
    //
    #[serde(rename = "show-tooltips", alias = "show_tooltips")]
    pub show_tooltips: bool,
    #[serde(rename = "tooltip-x-format", alias = "tooltip_x_format")]
    pub tooltip_x_format: String,
    #[serde(rename = "tooltip-number-format", alias = "tooltip_number_format")]
    pub tooltip_number_format: String,

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
    // Annotations
    //
    #[serde(rename = "text-annotations", alias = "text_annotations")]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(rename = "range-annotations", alias = "range_annotations")]
    pub range_annotations: Vec<RangeAnnotation>,
}

impl Default for LineChart {
    fn default() -> Self {
        LineChart {
            base: BaseChart::default(),
            custom_range_x: [AxisValue::unset(), AxisValue::unset()],
            custom_ticks_x: Vec::new(),
            x_grid_format: "auto".to_string(),
            x_grid: GridDisplay::Off,
            custom_range_y: [AxisValue::unset(), AxisValue::unset()],
            custom_ticks_y: Vec::new(),
            y_grid_format: String::new(),
            y_grid: GridDisplay::On,
            y_grid_labels: GridLabelPosition::Auto,
            y_grid_label_align: GridLabelAlign::Left,
            scale_y: ScaleY::Linear,
            y_grid_subdivide: true,
            base_color: PaletteColor::default(),
            interpolation: Interpolation::Linear,
            connector_lines: false,
            color_category: IndexMap::new(),
            lines: Vec::new(),
            area_fills: Vec::new(),
            stack_color_legend: false,
            label_colors: false,
            label_margin: 0,
            value_labels_format: String::new(),
            value_label_colors: false,
            show_tooltips: true,
            tooltip_x_format: String::new(),
            tooltip_number_format: String::new(),
            plot_height_mode: PlotHeightMode::Fixed,
            plot_height_fixed: 300.0,
            plot_height_ratio: 0.5,
            text_annotations: Vec::new(),
            range_annotations: Vec::new(),
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("custom_range_x", "custom-range-x"),
    FieldSpec::aliased("custom_ticks_x", "custom-ticks-x"),
    FieldSpec::aliased("x_grid_format", "x-grid-format"),
    FieldSpec::aliased("x_grid", "x-grid"),
    FieldSpec::aliased("custom_range_y", "custom-range-y"),
    FieldSpec::aliased("custom_ticks_y", "custom-ticks-y"),
    FieldSpec::aliased("y_grid_format", "y-grid-format"),
    FieldSpec::aliased("y_grid", "y-grid"),
    FieldSpec::aliased("y_grid_labels", "y-grid-labels"),
    FieldSpec::aliased("y_grid_label_align", "y-grid-label-align"),
    FieldSpec::aliased("scale_y", "scale-y"),
    FieldSpec::aliased("y_grid_subdivide", "y-grid-subdivide"),
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::new("interpolation"),
    FieldSpec::aliased("connector_lines", "connector-lines"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::new("lines"),
    FieldSpec::aliased("area_fills", "area-fills"),
    FieldSpec::aliased("stack_color_legend", "stack-color-legend"),
    FieldSpec::aliased("label_colors", "label-colors"),
    FieldSpec::aliased("label_margin", "label-margin"),
    FieldSpec::aliased("value_labels_format", "value-labels-format"),
    FieldSpec::aliased("value_label_colors", "value-label-colors"),
    FieldSpec::aliased("show_tooltips", "show-tooltips"),
    FieldSpec::aliased("tooltip_x_format", "tooltip-x-format"),
    FieldSpec::aliased("tooltip_number_format", "tooltip-number-format"),
    FieldSpec::aliased("plot_height_mode", "plot-height-mode"),
    FieldSpec::aliased("plot_height_fixed", "plot-height-fixed"),
    FieldSpec::aliased("plot_height_ratio", "plot-height-ratio"),
    FieldSpec::aliased("text_annotations", "text-annotations"),
    FieldSpec::aliased("range_annotations", "range-annotations"),
];

impl LineChart {
    pub fn new() -> Self {
        LineChart::default()
    }

    /// Build from a loose JSON mapping. Unrecognized keys warn (naming each
    /// key) but never fail; invalid values fail with the same validation
    /// errors as typed construction.
    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        crate::charts::check_chart_type(obj, ChartType::Line)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("LineChart", obj, &fields);
        let chart: LineChart = serde_json::from_value(config)
            .map_err(|e| Error::validation("LineChart", e.to_string()))?;
        chart.validate()?;
        Ok(chart)
    }

    fn validate(&self) -> Result<()> {
        for line in &self.lines {
            line.validate()?;
        }
        for fill in &self.area_fills {
            fill.validate()?;
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

impl ChartModel for LineChart {
    const CHART_TYPE: ChartType = ChartType::Line;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;

        let mut lines = Map::new();
        for line in &self.lines {
            lines.insert(line.column.clone(), line.to_wire()?);
        }

        let viz = visualize_mut(&mut document);
        // Horizontal axis
        viz.insert("custom-range-x".into(), range::serialize(&self.custom_range_x));
        viz.insert("custom-ticks-x".into(), json!(ticks::serialize(&self.custom_ticks_x)));
        viz.insert("x-grid-format".into(), json!(self.x_grid_format));
        viz.insert("x-grid".into(), json!(self.x_grid.as_str()));
        // Vertical axis
        viz.insert("custom-range-y".into(), range::serialize(&self.custom_range_y));
        viz.insert("custom-ticks-y".into(), json!(ticks::serialize(&self.custom_ticks_y)));
        viz.insert("y-grid-format".into(), json!(self.y_grid_format));
        viz.insert("y-grid".into(), json!(self.y_grid.as_str()));
        viz.insert("y-grid-labels".into(), json!(self.y_grid_labels.as_str()));
        viz.insert(
            "y-grid-label-align".into(),
            json!(self.y_grid_label_align.as_str()),
        );
        viz.insert("scale-y".into(), json!(self.scale_y.as_str()));
        viz.insert("y-grid-subdivide".into(), json!(self.y_grid_subdivide));
        // Lines
        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert("interpolation".into(), json!(self.interpolation.as_str()));
        viz.insert("connector-lines".into(), json!(self.connector_lines));
        viz.insert(
            "color-category".into(),
            crate::codecs::color_category::serialize(
                &self.color_category,
                &IndexMap::new(),
                &[],
                None,
            ),
        );
        // Labels
        viz.insert("stack-color-legend".into(), json!(self.stack_color_legend));
        viz.insert("label-colors".into(), json!(self.label_colors));
        viz.insert("label-margin".into(), json!(self.label_margin));
        viz.insert("value-labels-format".into(), json!(self.value_labels_format));
        viz.insert("value-label-colors".into(), json!(self.value_label_colors));
        // Tooltips
        viz.insert("show-tooltips".into(), json!(self.show_tooltips));
        viz.insert("tooltip-x-format".into(), json!(self.tooltip_x_format));
        viz.insert(
            "tooltip-number-format".into(),
            json!(self.tooltip_number_format),
        );
        // Appearance
        for (key, value) in plot_height::serialize(
            &self.plot_height_mode,
            self.plot_height_fixed,
            self.plot_height_ratio,
        ) {
            viz.insert(key, value);
        }
        // Per-line configuration and annotation collections
        viz.insert("lines".into(), Value::Object(lines));
        viz.insert(
            "text-annotations".into(),
            serialize_collection(&self.text_annotations, TextAnnotation::to_wire)?,
        );
        viz.insert(
            "range-annotations".into(),
            serialize_collection(&self.range_annotations, RangeAnnotation::to_wire)?,
        );
        viz.insert(
            "custom-area-fills".into(),
            serialize_collection(&self.area_fills, AreaFill::to_wire)?,
        );

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = LineChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        let Some(viz) = crate::charts::base::metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        // Horizontal axis
        chart.custom_range_x = range::deserialize(viz.get("custom-range-x"));
        chart.custom_ticks_x = ticks::deserialize(wire_str(viz, "custom-ticks-x").unwrap_or(""));
        if let Some(v) = wire_str(viz, "x-grid-format") {
            chart.x_grid_format = v.to_string();
        }
        if let Some(v) = viz.get("x-grid") {
            chart.x_grid = GridDisplay::from_wire(v)?;
        }

        // Vertical axis
        chart.custom_range_y = range::deserialize(viz.get("custom-range-y"));
        chart.custom_ticks_y = ticks::deserialize(wire_str(viz, "custom-ticks-y").unwrap_or(""));
        if let Some(v) = wire_str(viz, "y-grid-format") {
            chart.y_grid_format = v.to_string();
        }
        if let Some(v) = viz.get("y-grid") {
            chart.y_grid = GridDisplay::from_wire(v)?;
        }
        if let Some(v) = wire_str(viz, "y-grid-labels") {
            chart.y_grid_labels = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "y-grid-label-align") {
            chart.y_grid_label_align = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "scale-y") {
            chart.scale_y = v.parse()?;
        }
        if let Some(v) = wire_bool(viz, "y-grid-subdivide") {
            chart.y_grid_subdivide = v;
        }

        // Lines
        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        if let Some(v) = wire_str(viz, "interpolation") {
            chart.interpolation = v.parse()?;
        }
        if let Some(v) = wire_bool(viz, "connector-lines") {
            chart.connector_lines = v;
        }
        chart.color_category =
            crate::codecs::color_category::deserialize(viz.get("color-category")).color_category;
        if let Some(lines) = viz.get("lines").and_then(Value::as_object) {
            for (column, config) in lines {
                if let Some(config) = config.as_object() {
                    chart.lines.push(Line::from_wire(column, config)?);
                }
            }
        }
        chart.area_fills = AreaFill::deserialize_collection(viz.get("custom-area-fills"))?;

        // Labels
        if let Some(v) = wire_bool(viz, "stack-color-legend") {
            chart.stack_color_legend = v;
        }
        if let Some(v) = wire_bool(viz, "label-colors") {
            chart.label_colors = v;
        }
        if let Some(v) = wire_i64(viz, "label-margin") {
            chart.label_margin = v;
        }
        if let Some(v) = wire_str(viz, "value-labels-format") {
            chart.value_labels_format = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "value-label-colors") {
            chart.value_label_colors = v;
        }

        // Tooltips
        if let Some(v) = wire_bool(viz, "show-tooltips") {
            chart.show_tooltips = v;
        }
        if let Some(v) = wire_str(viz, "tooltip-x-format") {
            chart.tooltip_x_format = v.to_string();
        }
        if let Some(v) = wire_str(viz, "tooltip-number-format") {
            chart.tooltip_number_format = v.to_string();
        }

        // Appearance
        plot_height::deserialize(
            viz,
            &mut chart.plot_height_mode,
            &mut chart.plot_height_fixed,
            &mut chart.plot_height_ratio,
        )?;

        // Annotations
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
    fn default_serializes_documented_defaults() {
        let chart = LineChart::new();
        let document = chart.serialize_model().unwrap();
        let viz = &document["metadata"]["visualize"];
        assert_eq!(viz["x-grid"], json!("off"));
        assert_eq!(viz["y-grid"], json!("on"));
        assert_eq!(viz["custom-range-x"], json!(["", ""]));
        assert_eq!(viz["custom-ticks-x"], json!(""));
        assert_eq!(viz["plotHeightMode"], json!("fixed"));
        assert_eq!(viz["lines"], json!({}));
        assert_eq!(viz["text-annotations"], json!([]));
    }

    #[test]
    fn line_config_is_keyed_by_column() {
        let chart = LineChart {
            lines: vec![Line {
                column: "y".to_string(),
                width: LineWidth::Thick,
                dash: Some(LineDash::ShortDash),
                direct_label: true,
                symbols: Some(LineSymbols {
                    shape: crate::charts::enums::SymbolShape::Square,
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let line = &document["metadata"]["visualize"]["lines"]["y"];
        assert_eq!(line["width"], json!("style3"));
        assert_eq!(line["dash"], json!("style2"));
        assert_eq!(line["directLabel"], json!(true));
        assert_eq!(line["symbols"]["enabled"], json!(true));
        assert_eq!(line["symbols"]["shape"], json!("square"));
        assert_eq!(line["valueLabels"], json!({"enabled": false}));
    }

    #[test]
    fn lines_roundtrip_through_wire_mapping() {
        let chart = LineChart {
            lines: vec![Line {
                column: "y".to_string(),
                dash: Some(LineDash::MediumDash),
                value_labels: Some(LineValueLabels {
                    last: true,
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let back = LineChart::deserialize_model(&document).unwrap();
        assert_eq!(back.lines, chart.lines);
    }

    #[test]
    fn area_fills_roundtrip_through_uuid_mapping() {
        // Reads come back as a UUID-keyed mapping even though writes send a
        // list.
        let document = json!({
            "type": "d3-lines",
            "title": "t",
            "metadata": {
                "visualize": {
                    "custom-area-fills": {
                        "fill1": {
                            "from": "baseline",
                            "to": "value",
                            "color": "#ff0000",
                            "opacity": 0.5,
                            "useMixedColors": true,
                            "colorNegative": "#0000ff",
                            "interpolation": "step-before",
                        }
                    }
                }
            }
        });
        let chart = LineChart::deserialize_model(&document).unwrap();
        assert_eq!(chart.area_fills.len(), 1);
        let fill = &chart.area_fills[0];
        assert_eq!(fill.id.as_deref(), Some("fill1"));
        assert_eq!(fill.from_column, "baseline");
        assert_eq!(fill.to_column, "value");
        assert_eq!(fill.opacity, 0.5);
        assert!(fill.use_mixed_colors);
        assert_eq!(fill.color_negative.as_deref(), Some("#0000ff"));
        assert_eq!(fill.interpolation, Interpolation::StepBefore);
    }

    #[test]
    fn from_value_accepts_loose_config() {
        let chart = LineChart::from_value(json!({
            "title": "Temp",
            "y-grid": "ticks",
            "scale_y": "log",
            "lines": [{"column": "y", "width": "style2"}],
            "text-annotations": [{"x": 1, "y": 2, "text": "note"}],
        }))
        .unwrap();
        assert_eq!(chart.base.title, "Temp");
        assert_eq!(chart.y_grid, GridDisplay::Ticks);
        assert_eq!(chart.scale_y, ScaleY::Log);
        assert_eq!(chart.lines[0].width, LineWidth::Medium);
        assert_eq!(chart.text_annotations[0].text, "note");
    }

    #[test]
    fn from_value_rejects_wrong_chart_type() {
        let err = LineChart::from_value(json!({"chart-type": "d3-bars"})).unwrap_err();
        assert!(err.to_string().contains("d3-bars"), "{err}");
    }
}
