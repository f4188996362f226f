//! The multiple-column chart (`multiple-columns`): one small column chart
//! per panel.
//!
//! Its layout keys are camelCase on the wire (`gridLayout`,
//! `gridColumnCount`, …), panels travel as a mapping keyed by column, and
//! annotations are the plot-scoped variants that can target a single
//! panel.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::annotations::{PlotRangeAnnotation, PlotTextAnnotation, serialize_collection};
use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{
    GridDisplay, GridLabelAlign, GridLabelPosition, GridLayout, PanelSort, PlotHeightMode,
    Toggle, ValueLabelDisplay, ValueLabelPlacement,
};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_i64, wire_str};
use crate::codecs::{AxisValue, color_category, enable_value, plot_height, range, ticks, value_labels};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper multiple-column chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MultipleColumnChart {
    #[serde(flatten)]
    pub base: BaseChart,

    /// Per-panel configuration; each entry carries a `column` key naming
    /// the panel and travels keyed by that column on the wire.
    pub panels: Vec<Map<String, Value>>,

    //
    // Layout
    //
    #[serde(rename = "grid-layout", alias = "grid_layout")]
    pub grid_layout: GridLayout,
    /// Panel columns on desktop.
    #[serde(rename = "grid-column", alias = "grid_column")]
    pub grid_column: i64,
    /// Panel columns on mobile.
    #[serde(rename = "grid-column-mobile", alias = "grid_column_mobile")]
    pub grid_column_mobile: i64,
    /// Minimum panel width for the auto layout.
    #[serde(rename = "grid-column-width", alias = "grid_column_width")]
    pub grid_column_width: i64,
    #[serde(rename = "grid-row-height", alias = "grid_row_height")]
    pub grid_row_height: i64,
    pub sort: bool,
    #[serde(rename = "sort-reverse", alias = "sort_reverse")]
    pub sort_reverse: bool,
    #[serde(rename = "sort-by", alias = "sort_by")]
    pub sort_by: PanelSort,

    //
    // Horizontal axis
    //
    #[serde(rename = "x-grid-labels", alias = "x_grid_labels")]
    pub x_grid_labels: Toggle,
    /// Grid setting shared by every panel (`x-grid` on the wire).
    #[serde(rename = "x-grid-all", alias = "x_grid_all")]
    pub x_grid_all: GridDisplay,
    #[serde(rename = "x-grid", alias = "x_grid")]
    pub x_grid: GridDisplay,
    /// Show the x label on all panels, not just the bottom row.
    #[serde(rename = "x-grid-label-all", alias = "x_grid_label_all")]
    pub x_grid_label_all: bool,

    //
    // Vertical axis
    //
    #[serde(rename = "y-grid", alias = "y_grid")]
    pub y_grid: GridDisplay,
    #[serde(rename = "x-grid-format", alias = "x_grid_format")]
    pub x_grid_format: Option<String>,
    #[serde(rename = "y-grid-format", alias = "y_grid_format")]
    pub y_grid_format: Option<String>,
    #[serde(rename = "custom-range-x", alias = "custom_range_x")]
    pub custom_range_x: Option<[AxisValue; 2]>,
    #[serde(rename = "custom-range-y", alias = "custom_range_y")]
    pub custom_range_y: Option<[AxisValue; 2]>,
    #[serde(rename = "custom-ticks-x", alias = "custom_ticks_x")]
    pub custom_ticks_x: Option<Vec<AxisValue>>,
    #[serde(rename = "custom-ticks-y", alias = "custom_ticks_y")]
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
    #[serde(rename = "negative-color", alias = "negative_color")]
    pub negative_color: Option<String>,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    #[serde(rename = "bar-padding", alias = "bar_padding")]
    pub bar_padding: i64,
    #[serde(rename = "plot-height-mode", alias = "plot_height_mode")]
    pub plot_height_mode: PlotHeightMode,
    #[serde(rename = "plot-height-fixed", alias = "plot_height_fixed")]
    pub plot_height_fixed: f64,
    #[serde(rename = "plot-height-ratio", alias = "plot_height_ratio")]
    pub plot_height_ratio: f64,

    //
    // Tooltips
    //
    #[serde(rename = "show-tooltips", alias = "show_tooltips")]
    pub show_tooltips: bool,
    /// Show tooltips in every panel at once.
    #[serde(rename = "syncMultipleTooltips", alias = "sync_multiple_tooltips")]
    pub sync_multiple_tooltips: bool,
    #[serde(rename = "tooltip-number-format", alias = "tooltip_number_format")]
    pub tooltip_number_format: String,

    //
    // Labels
    //
    #[serde(rename = "label-colors", alias = "label_colors")]
    pub label_colors: bool,
    #[serde(rename = "show-color-key", alias = "show_color_key")]
    pub show_color_key: bool,
    #[serde(rename = "show-value-labels", alias = "show_value_labels")]
    pub show_value_labels: ValueLabelDisplay,
    #[serde(rename = "value-labels-format", alias = "value_labels_format")]
    pub value_labels_format: String,
    #[serde(rename = "value-labels-placement", alias = "value_labels_placement")]
    pub value_labels_placement: ValueLabelPlacement,
    #[serde(rename = "label-margin", alias = "label_margin")]
    pub label_margin: i64,

    //
    // Annotations
    //
    #[serde(rename = "text-annotations", alias = "text_annotations")]
    pub text_annotations: Vec<PlotTextAnnotation>,
    #[serde(rename = "range-annotations", alias = "range_annotations")]
    pub range_annotations: Vec<PlotRangeAnnotation>,
}

impl Default for MultipleColumnChart {
    fn default() -> Self {
        MultipleColumnChart {
            base: BaseChart::default(),
            panels: Vec::new(),
            grid_layout: GridLayout::FixedCount,
            grid_column: 2,
            grid_column_mobile: 2,
            grid_column_width: 200,
            grid_row_height: 140,
            sort: false,
            sort_reverse: false,
            sort_by: PanelSort::End,
            x_grid_labels: Toggle::On,
            x_grid_all: GridDisplay::Off,
            x_grid: GridDisplay::Off,
            x_grid_label_all: false,
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
            bar_padding: 30,
            plot_height_mode: PlotHeightMode::Fixed,
            plot_height_fixed: 300.0,
            plot_height_ratio: 0.5,
            show_tooltips: true,
            sync_multiple_tooltips: false,
            tooltip_number_format: String::new(),
            label_colors: false,
            show_color_key: false,
            show_value_labels: ValueLabelDisplay::Off,
            value_labels_format: String::new(),
            value_labels_placement: ValueLabelPlacement::Outside,
            label_margin: 0,
            text_annotations: Vec::new(),
            range_annotations: Vec::new(),
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("panels"),
    FieldSpec::aliased("grid_layout", "grid-layout"),
    FieldSpec::aliased("grid_column", "grid-column"),
    FieldSpec::aliased("grid_column_mobile", "grid-column-mobile"),
    FieldSpec::aliased("grid_column_width", "grid-column-width"),
    FieldSpec::aliased("grid_row_height", "grid-row-height"),
    FieldSpec::new("sort"),
    FieldSpec::aliased("sort_reverse", "sort-reverse"),
    FieldSpec::aliased("sort_by", "sort-by"),
    FieldSpec::aliased("x_grid_labels", "x-grid-labels"),
    FieldSpec::aliased("x_grid_all", "x-grid-all"),
    FieldSpec::aliased("x_grid", "x-grid"),
    FieldSpec::aliased("x_grid_label_all", "x-grid-label-all"),
    FieldSpec::aliased("y_grid", "y-grid"),
    FieldSpec::aliased("x_grid_format", "x-grid-format"),
    FieldSpec::aliased("y_grid_format", "y-grid-format"),
    FieldSpec::aliased("custom_range_x", "custom-range-x"),
    FieldSpec::aliased("custom_range_y", "custom-range-y"),
    FieldSpec::aliased("custom_ticks_x", "custom-ticks-x"),
    FieldSpec::aliased("custom_ticks_y", "custom-ticks-y"),
    FieldSpec::aliased("y_grid_labels", "y-grid-labels"),
    FieldSpec::aliased("y_grid_label_align", "y-grid-label-align"),
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::aliased("negative_color", "negative-color"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("bar_padding", "bar-padding"),
    FieldSpec::aliased("plot_height_mode", "plot-height-mode"),
    FieldSpec::aliased("plot_height_fixed", "plot-height-fixed"),
    FieldSpec::aliased("plot_height_ratio", "plot-height-ratio"),
    FieldSpec::aliased("show_tooltips", "show-tooltips"),
    FieldSpec::aliased("sync_multiple_tooltips", "syncMultipleTooltips"),
    FieldSpec::aliased("tooltip_number_format", "tooltip-number-format"),
    FieldSpec::aliased("label_colors", "label-colors"),
    FieldSpec::aliased("show_color_key", "show-color-key"),
    FieldSpec::aliased("show_value_labels", "show-value-labels"),
    FieldSpec::aliased("value_labels_format", "value-labels-format"),
    FieldSpec::aliased("value_labels_placement", "value-labels-placement"),
    FieldSpec::aliased("label_margin", "label-margin"),
    FieldSpec::aliased("text_annotations", "text-annotations"),
    FieldSpec::aliased("range_annotations", "range-annotations"),
];

impl MultipleColumnChart {
    pub fn new() -> Self {
        MultipleColumnChart::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::MultipleColumn)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("MultipleColumnChart", obj, &fields);
        let chart: MultipleColumnChart = serde_json::from_value(config)
            .map_err(|e| Error::validation("MultipleColumnChart", e.to_string()))?;
        chart.validate()?;
        Ok(chart)
    }

    fn validate(&self) -> Result<()> {
        for panel in &self.panels {
            if !panel.get("column").and_then(Value::as_str).is_some_and(|c| !c.is_empty()) {
                return Err(Error::validation(
                    "panels",
                    "every panel requires a non-empty column key",
                ));
            }
        }
        for annotation in &self.text_annotations {
            annotation.annotation.validate()?;
        }
        for annotation in &self.range_annotations {
            annotation.annotation.validate()?;
        }
        Ok(())
    }
}

impl ChartModel for MultipleColumnChart {
    const CHART_TYPE: ChartType = ChartType::MultipleColumn;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        self.validate()?;
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;

        // Panels travel keyed by their column.
        let mut panels = Map::new();
        for panel in &self.panels {
            let column = panel
                .get("column")
                .and_then(Value::as_str)
                .unwrap_or_default();
            panels.insert(column.to_string(), Value::Object(panel.clone()));
        }

        let viz = visualize_mut(&mut document);
        // Layout
        viz.insert("gridLayout".into(), json!(self.grid_layout.as_str()));
        viz.insert("gridColumnCount".into(), json!(self.grid_column));
        viz.insert(
            "gridColumnCountMobile".into(),
            json!(self.grid_column_mobile),
        );
        viz.insert("gridColumnMinWidth".into(), json!(self.grid_column_width));
        viz.insert("gridRowHeightFixed".into(), json!(self.grid_row_height));
        viz.insert(
            "sort".into(),
            json!({
                "enabled": self.sort,
                "reverse": self.sort_reverse,
                "by": self.sort_by.as_str(),
            }),
        );
        // Horizontal axis
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
            viz.insert("custom-range-y".into(), range::serialize(v));
        }
        if let Some(v) = &self.custom_ticks_x {
            viz.insert("custom-ticks-x".into(), json!(ticks::serialize(v)));
        }
        if let Some(v) = &self.custom_ticks_y {
            viz.insert("custom-ticks-y".into(), json!(ticks::serialize(v)));
        }
        viz.insert("x-grid-labels".into(), json!(self.x_grid_labels.as_str()));
        viz.insert("x-grid".into(), json!(self.x_grid_all.as_str()));
        let x_grid_off = self.x_grid == GridDisplay::Off;
        viz.insert(
            "grid-lines-x".into(),
            json!({
                "type": if x_grid_off { "" } else { self.x_grid.as_str() },
                "enabled": !x_grid_off,
            }),
        );
        // Vertical axis
        viz.insert("grid-lines".into(), json!(self.y_grid.is_on()));
        let labels_off = self.y_grid_labels == GridLabelPosition::Off;
        viz.insert(
            "yAxisLabels".into(),
            json!({
                "enabled": !labels_off,
                "alignment": self.y_grid_label_align.as_str(),
                "placement": if labels_off { "" } else { self.y_grid_labels.as_str() },
            }),
        );
        // Appearance
        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert(
            "negativeColor".into(),
            enable_value::serialize(self.negative_color.as_deref()),
        );
        viz.insert("bar-padding".into(), json!(self.bar_padding));
        viz.insert(
            "color-category".into(),
            color_category::serialize(&self.color_category, &IndexMap::new(), &[], None),
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
        viz.insert("panels".into(), Value::Object(panels));
        // Tooltips
        viz.insert("show-tooltips".into(), json!(self.show_tooltips));
        viz.insert(
            "syncMultipleTooltips".into(),
            json!(self.sync_multiple_tooltips),
        );
        viz.insert(
            "tooltip-number-format".into(),
            json!(self.tooltip_number_format),
        );
        // Labels
        viz.insert("show-color-key".into(), json!(self.show_color_key));
        viz.insert("label-colors".into(), json!(self.label_colors));
        viz.insert("label-margin".into(), json!(self.label_margin));
        for (key, value) in value_labels::serialize(
            &self.show_value_labels,
            &self.value_labels_format,
            &self.value_labels_placement,
        ) {
            viz.insert(key, value);
        }
        viz.insert("xGridLabelAllColumns".into(), json!(self.x_grid_label_all));
        // Annotations
        viz.insert(
            "text-annotations".into(),
            serialize_collection(&self.text_annotations, PlotTextAnnotation::to_wire)?,
        );
        viz.insert(
            "range-annotations".into(),
            serialize_collection(&self.range_annotations, PlotRangeAnnotation::to_wire)?,
        );

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = MultipleColumnChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        // Layout
        if let Some(v) = wire_str(viz, "gridLayout") {
            chart.grid_layout = v.parse()?;
        }
        if let Some(v) = wire_i64(viz, "gridColumnCount") {
            chart.grid_column = v;
        }
        if let Some(v) = wire_i64(viz, "gridColumnCountMobile") {
            chart.grid_column_mobile = v;
        }
        if let Some(v) = wire_i64(viz, "gridColumnMinWidth") {
            chart.grid_column_width = v;
        }
        if let Some(v) = wire_i64(viz, "gridRowHeightFixed") {
            chart.grid_row_height = v;
        }
        if let Some(sort) = viz.get("sort").and_then(Value::as_object) {
            chart.sort = sort.get("enabled").and_then(Value::as_bool).unwrap_or(false);
            chart.sort_reverse = sort.get("reverse").and_then(Value::as_bool).unwrap_or(false);
            if let Some(by) = sort.get("by").and_then(Value::as_str) {
                chart.sort_by = by.parse()?;
            }
        }

        // Axes
        if let Some(v) = wire_str(viz, "x-grid-format") {
            chart.x_grid_format = Some(v.to_string());
        }
        if let Some(v) = wire_str(viz, "y-grid-format") {
            chart.y_grid_format = Some(v.to_string());
        }
        if let Some(v) = viz.get("custom-range-x") {
            chart.custom_range_x = Some(range::deserialize(Some(v)));
        }
        if let Some(v) = viz.get("custom-range-y") {
            chart.custom_range_y = Some(range::deserialize(Some(v)));
        }
        if let Some(v) = wire_str(viz, "custom-ticks-x") {
            chart.custom_ticks_x = Some(ticks::deserialize(v));
        }
        if let Some(v) = wire_str(viz, "custom-ticks-y") {
            chart.custom_ticks_y = Some(ticks::deserialize(v));
        }
        if let Some(v) = wire_str(viz, "x-grid-labels") {
            chart.x_grid_labels = v.parse()?;
        }
        if let Some(v) = viz.get("x-grid") {
            chart.x_grid_all = GridDisplay::from_wire(v)?;
        }
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
        // `grid-lines` comes back as a boolean or the string "show".
        if let Some(v) = viz.get("grid-lines") {
            chart.y_grid = match v {
                Value::String(s) => {
                    if s == "show" {
                        GridDisplay::On
                    } else {
                        GridDisplay::Off
                    }
                }
                other => GridDisplay::from_wire(other)?,
            };
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
        } else {
            if let Some(v) = wire_str(viz, "y-grid-labels") {
                chart.y_grid_labels = v.parse()?;
            }
            if let Some(v) = wire_str(viz, "y-grid-label-align") {
                chart.y_grid_label_align = v.parse()?;
            }
        }

        // Appearance
        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        if let Some(v) = wire_i64(viz, "bar-padding") {
            chart.bar_padding = v;
        }
        chart.color_category =
            color_category::deserialize(viz.get("color-category")).color_category;
        if viz.contains_key("negativeColor") {
            chart.negative_color = enable_value::deserialize(viz.get("negativeColor"));
        }
        plot_height::deserialize(
            viz,
            &mut chart.plot_height_mode,
            &mut chart.plot_height_fixed,
            &mut chart.plot_height_ratio,
        )?;
        if let Some(panels) = viz.get("panels").and_then(Value::as_object) {
            for (column, config) in panels {
                let mut panel = config.as_object().cloned().unwrap_or_default();
                panel
                    .entry("column".to_string())
                    .or_insert_with(|| json!(column));
                chart.panels.push(panel);
            }
        }

        // Tooltips
        if let Some(v) = wire_bool(viz, "show-tooltips") {
            chart.show_tooltips = v;
        }
        if let Some(v) = wire_bool(viz, "syncMultipleTooltips") {
            chart.sync_multiple_tooltips = v;
        }
        if let Some(v) = wire_str(viz, "tooltip-number-format") {
            chart.tooltip_number_format = v.to_string();
        }

        // Labels
        if let Some(v) = wire_bool(viz, "label-colors") {
            chart.label_colors = v;
        }
        if let Some(v) = wire_bool(viz, "show-color-key") {
            chart.show_color_key = v;
        }
        if let Some(v) = wire_i64(viz, "label-margin") {
            chart.label_margin = v;
        }
        if let Some(v) = wire_bool(viz, "xGridLabelAllColumns") {
            chart.x_grid_label_all = v;
        }
        let (show, format, placement) = value_labels::deserialize(viz)?;
        chart.show_value_labels = show;
        chart.value_labels_format = format;
        chart.value_labels_placement = placement;

        // Annotations
        chart.text_annotations =
            PlotTextAnnotation::deserialize_collection(viz.get("text-annotations"))?;
        chart.range_annotations =
            PlotRangeAnnotation::deserialize_collection(viz.get("range-annotations"))?;

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::TextAnnotation;

    #[test]
    fn layout_keys_are_camel_case() {
        let chart = MultipleColumnChart {
            grid_column: 3,
            grid_row_height: 160,
            sort: true,
            sort_by: PanelSort::Title,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let viz = &document["metadata"]["visualize"];
        assert_eq!(viz["gridColumnCount"], json!(3));
        assert_eq!(viz["gridRowHeightFixed"], json!(160));
        assert_eq!(
            viz["sort"],
            json!({"enabled": true, "reverse": false, "by": "title"})
        );
    }

    #[test]
    fn panels_travel_keyed_by_column() {
        let mut panel = Map::new();
        panel.insert("column".to_string(), json!("Paris"));
        panel.insert("color".to_string(), json!("#cc0000"));
        let chart = MultipleColumnChart {
            panels: vec![panel],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let panels = document["metadata"]["visualize"]["panels"]
            .as_object()
            .unwrap();
        assert!(panels.contains_key("Paris"));
        assert_eq!(panels["Paris"]["color"], json!("#cc0000"));

        let back = MultipleColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(back.panels, chart.panels);
    }

    #[test]
    fn panel_without_column_fails() {
        let chart = MultipleColumnChart {
            panels: vec![Map::new()],
            ..Default::default()
        };
        assert!(chart.serialize_model().is_err());
    }

    #[test]
    fn plot_scoped_annotations_roundtrip() {
        let chart = MultipleColumnChart {
            text_annotations: vec![PlotTextAnnotation {
                annotation: TextAnnotation::new(1, 2, "peak"),
                plot: Some("Paris".to_string()),
                show_in_all_plots: false,
            }],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let annos = document["metadata"]["visualize"]["text-annotations"]
            .as_array()
            .unwrap();
        assert_eq!(annos[0]["position"]["plot"], json!("Paris"));
        assert_eq!(annos[0]["showInAllPlots"], json!(false));

        let back = MultipleColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(back.text_annotations[0].plot.as_deref(), Some("Paris"));
    }

    #[test]
    fn grid_lines_accepts_show_string() {
        let document = json!({
            "type": "multiple-columns",
            "title": "t",
            "metadata": {"visualize": {"grid-lines": "show"}}
        });
        let chart = MultipleColumnChart::deserialize_model(&document).unwrap();
        assert_eq!(chart.y_grid, GridDisplay::On);
    }
}
