//! The bar chart (`d3-bars`).
//!
//! Bars bind data columns to visual roles through a `metadata.axes`
//! mapping (`bars`, `labels`, `colors`, `groups`) alongside the usual
//! `visualize` keys, and carry overlay markers as a list.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::annotations::{BarOverlay, RangeAnnotation, TextAnnotation, serialize_collection};
use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{LabelAlignment, ReplaceFlags, TickPosition, ValueLabelAlignment};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_str};
use crate::codecs::{AxisValue, color_category, range, replace_flags, ticks};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper bar chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarChart {
    #[serde(flatten)]
    pub base: BaseChart,

    //
    // Labels
    //
    /// The column holding the bar labels; becomes `axes.labels`.
    #[serde(rename = "label-column", alias = "label_column")]
    pub label_column: String,
    #[serde(rename = "label-alignment", alias = "label_alignment")]
    pub label_alignment: LabelAlignment,
    /// Move labels to their own line.
    #[serde(rename = "block-labels", alias = "block_labels")]
    pub block_labels: bool,
    #[serde(rename = "show-value-labels", alias = "show_value_labels")]
    pub show_value_labels: bool,
    #[serde(rename = "value-label-alignment", alias = "value_label_alignment")]
    pub value_label_alignment: ValueLabelAlignment,
    #[serde(rename = "value-label-format", alias = "value_label_format")]
    pub value_label_format: String,
    #[serde(rename = "swap-labels", alias = "swap_labels")]
    pub swap_labels: bool,
    #[serde(rename = "replace-flags", alias = "replace_flags")]
    pub replace_flags: ReplaceFlags,
    #[serde(rename = "show-color-key", alias = "show_color_key")]
    pub show_color_key: bool,
    #[serde(rename = "stack-color-legend", alias = "stack_color_legend")]
    pub stack_color_legend: bool,
    #[serde(rename = "exclude-from-color-key", alias = "exclude_from_color_key")]
    pub exclude_from_color_key: Vec<String>,

    //
    // Horizontal axis
    //
    /// The column holding the bar values; becomes `axes.bars`.
    #[serde(rename = "bar-column", alias = "bar_column")]
    pub bar_column: String,
    #[serde(rename = "custom-range", alias = "custom_range")]
    pub custom_range: [AxisValue; 2],
    #[serde(rename = "force-grid", alias = "force_grid")]
    pub force_grid: bool,
    #[serde(rename = "custom-grid-lines", alias = "custom_grid_lines")]
    pub custom_grid_lines: Vec<AxisValue>,
    #[serde(rename = "tick-position", alias = "tick_position")]
    pub tick_position: TickPosition,
    #[serde(rename = "axis-label-format", alias = "axis_label_format")]
    pub axis_label_format: String,

    //
    // Appearance
    //
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    /// The column to color bars by; becomes `axes.colors`.
    #[serde(rename = "color-column", alias = "color_column")]
    pub color_column: String,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    #[serde(rename = "category-labels", alias = "category_labels")]
    pub category_labels: IndexMap<String, String>,
    #[serde(rename = "category-order", alias = "category_order")]
    pub category_order: Vec<String>,
    /// Separating line between bars.
    pub rules: bool,
    pub thick: bool,
    /// Shade the bar's full potential span.
    pub background: bool,

    //
    // Sorting and grouping
    //
    #[serde(rename = "sort-bars", alias = "sort_bars")]
    pub sort_bars: bool,
    #[serde(rename = "reverse-order", alias = "reverse_order")]
    pub reverse_order: bool,
    /// The column bars are grouped by; becomes `axes.groups`.
    #[serde(rename = "groups-column", alias = "groups_column")]
    pub groups_column: Option<String>,
    #[serde(rename = "show-group-labels", alias = "show_group_labels")]
    pub show_group_labels: bool,
    #[serde(rename = "show-category-labels", alias = "show_category_labels")]
    pub show_category_labels: bool,

    //
    // Overlays and annotations
    //
    pub overlays: Vec<BarOverlay>,
    #[serde(rename = "highlighted-series", alias = "highlighted_series")]
    pub highlighted_series: Vec<String>,
    #[serde(rename = "text-annotations", alias = "text_annotations")]
    pub text_annotations: Vec<TextAnnotation>,
    #[serde(rename = "range-annotations", alias = "range_annotations")]
    pub range_annotations: Vec<RangeAnnotation>,
}

impl Default for BarChart {
    fn default() -> Self {
        BarChart {
            base: BaseChart::default(),
            label_column: String::new(),
            label_alignment: LabelAlignment::Left,
            block_labels: false,
            show_value_labels: true,
            value_label_alignment: ValueLabelAlignment::Left,
            value_label_format: String::new(),
            swap_labels: false,
            replace_flags: ReplaceFlags::Off,
            show_color_key: false,
            stack_color_legend: false,
            exclude_from_color_key: Vec::new(),
            bar_column: String::new(),
            custom_range: [AxisValue::unset(), AxisValue::unset()],
            force_grid: false,
            custom_grid_lines: Vec::new(),
            tick_position: TickPosition::Top,
            axis_label_format: String::new(),
            base_color: PaletteColor::default(),
            color_column: String::new(),
            color_category: IndexMap::new(),
            category_labels: IndexMap::new(),
            category_order: Vec::new(),
            rules: false,
            thick: false,
            background: false,
            sort_bars: false,
            reverse_order: false,
            groups_column: None,
            show_group_labels: true,
            show_category_labels: true,
            overlays: Vec::new(),
            highlighted_series: Vec::new(),
            text_annotations: Vec::new(),
            range_annotations: Vec::new(),
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("label_column", "label-column"),
    FieldSpec::aliased("label_alignment", "label-alignment"),
    FieldSpec::aliased("block_labels", "block-labels"),
    FieldSpec::aliased("show_value_labels", "show-value-labels"),
    FieldSpec::aliased("value_label_alignment", "value-label-alignment"),
    FieldSpec::aliased("value_label_format", "value-label-format"),
    FieldSpec::aliased("swap_labels", "swap-labels"),
    FieldSpec::aliased("replace_flags", "replace-flags"),
    FieldSpec::aliased("show_color_key", "show-color-key"),
    FieldSpec::aliased("stack_color_legend", "stack-color-legend"),
    FieldSpec::aliased("exclude_from_color_key", "exclude-from-color-key"),
    FieldSpec::aliased("bar_column", "bar-column"),
    FieldSpec::aliased("custom_range", "custom-range"),
    FieldSpec::aliased("force_grid", "force-grid"),
    FieldSpec::aliased("custom_grid_lines", "custom-grid-lines"),
    FieldSpec::aliased("tick_position", "tick-position"),
    FieldSpec::aliased("axis_label_format", "axis-label-format"),
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::aliased("color_column", "color-column"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("category_labels", "category-labels"),
    FieldSpec::aliased("category_order", "category-order"),
    FieldSpec::new("rules"),
    FieldSpec::new("thick"),
    FieldSpec::new("background"),
    FieldSpec::aliased("sort_bars", "sort-bars"),
    FieldSpec::aliased("reverse_order", "reverse-order"),
    FieldSpec::aliased("groups_column", "groups-column"),
    FieldSpec::aliased("show_group_labels", "show-group-labels"),
    FieldSpec::aliased("show_category_labels", "show-category-labels"),
    FieldSpec::new("overlays"),
    FieldSpec::aliased("highlighted_series", "highlighted-series"),
    FieldSpec::aliased("text_annotations", "text-annotations"),
    FieldSpec::aliased("range_annotations", "range-annotations"),
];

impl BarChart {
    pub fn new() -> Self {
        BarChart::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::Bar)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("BarChart", obj, &fields);
        let chart: BarChart = serde_json::from_value(config)
            .map_err(|e| Error::validation("BarChart", e.to_string()))?;
        chart.validate()?;
        Ok(chart)
    }

    fn validate(&self) -> Result<()> {
        for overlay in &self.overlays {
            overlay.validate()?;
        }
        for annotation in &self.text_annotations {
            annotation.validate()?;
        }
        for annotation in &self.range_annotations {
            annotation.validate()?;
        }
        Ok(())
    }

    fn has_groups(&self) -> bool {
        self.groups_column.as_deref().is_some_and(|c| !c.is_empty())
    }
}

impl ChartModel for BarChart {
    const CHART_TYPE: ChartType = ChartType::Bar;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        self.validate()?;
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;

        let mut overlays = Vec::with_capacity(self.overlays.len());
        for overlay in &self.overlays {
            overlays.push(overlay.to_wire()?);
        }

        let viz = visualize_mut(&mut document);
        // Labels
        viz.insert("label-alignment".into(), json!(self.label_alignment.as_str()));
        viz.insert("block-labels".into(), json!(self.block_labels));
        viz.insert("show-value-labels".into(), json!(self.show_value_labels));
        viz.insert(
            "value-label-alignment".into(),
            json!(self.value_label_alignment.as_str()),
        );
        viz.insert("value-label-format".into(), json!(self.value_label_format));
        viz.insert("swap-labels".into(), json!(self.swap_labels));
        viz.insert(
            "replace-flags".into(),
            replace_flags::serialize(&self.replace_flags),
        );
        viz.insert("show-color-key".into(), json!(self.show_color_key));
        viz.insert("stack-color-legend".into(), json!(self.stack_color_legend));
        // Horizontal axis
        viz.insert("custom-range".into(), range::serialize(&self.custom_range));
        viz.insert("force-grid".into(), json!(self.force_grid));
        viz.insert(
            "custom-grid-lines".into(),
            json!(ticks::serialize(&self.custom_grid_lines)),
        );
        viz.insert("tick-position".into(), json!(self.tick_position.as_str()));
        viz.insert("axis-label-format".into(), json!(self.axis_label_format));
        // Appearance
        viz.insert("base-color".into(), self.base_color.to_wire());
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
        viz.insert("rules".into(), json!(self.rules));
        viz.insert("thick".into(), json!(self.thick));
        viz.insert("background".into(), json!(self.background));
        // Sorting and grouping
        viz.insert("sort-bars".into(), json!(self.sort_bars));
        viz.insert("reverse-order".into(), json!(self.reverse_order));
        viz.insert("group-by-column".into(), json!(self.has_groups()));
        viz.insert("show-group-labels".into(), json!(self.show_group_labels));
        viz.insert(
            "show-category-labels".into(),
            json!(self.show_category_labels),
        );
        // Overlays and annotations
        viz.insert("overlays".into(), Value::Array(overlays));
        viz.insert(
            "highlighted-series".into(),
            json!(self.highlighted_series),
        );
        viz.insert(
            "text-annotations".into(),
            serialize_collection(&self.text_annotations, TextAnnotation::to_wire)?,
        );
        viz.insert(
            "range-annotations".into(),
            serialize_collection(&self.range_annotations, RangeAnnotation::to_wire)?,
        );

        // Column-to-role bindings live beside visualize, not inside it.
        let mut axes = Map::new();
        axes.insert(
            "colors".into(),
            json!(if self.color_column.is_empty() {
                &self.label_column
            } else {
                &self.color_column
            }),
        );
        axes.insert("bars".into(), json!(self.bar_column));
        axes.insert("labels".into(), json!(self.label_column));
        if self.has_groups() {
            axes.insert("groups".into(), json!(self.groups_column));
        }
        document["metadata"]["axes"] = Value::Object(axes);

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = BarChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        let axes = metadata_section(document, "axes");
        if let Some(axes) = axes {
            if let Some(v) = wire_str(axes, "labels") {
                chart.label_column = v.to_string();
            }
            if let Some(v) = wire_str(axes, "bars") {
                chart.bar_column = v.to_string();
            }
            if let Some(v) = wire_str(axes, "colors") {
                chart.color_column = v.to_string();
            }
            if let Some(v) = wire_str(axes, "groups") {
                chart.groups_column = Some(v.to_string());
            }
        }
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        if let Some(v) = wire_str(viz, "label-alignment") {
            chart.label_alignment = v.parse()?;
        }
        if let Some(v) = wire_bool(viz, "block-labels") {
            chart.block_labels = v;
        }
        if let Some(v) = wire_bool(viz, "show-value-labels") {
            chart.show_value_labels = v;
        }
        if let Some(v) = wire_str(viz, "value-label-alignment") {
            chart.value_label_alignment = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "value-label-format") {
            chart.value_label_format = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "swap-labels") {
            chart.swap_labels = v;
        }
        if viz.contains_key("replace-flags") {
            chart.replace_flags = replace_flags::deserialize(viz.get("replace-flags"));
        }
        if let Some(v) = wire_bool(viz, "show-color-key") {
            chart.show_color_key = v;
        }
        if let Some(v) = wire_bool(viz, "stack-color-legend") {
            chart.stack_color_legend = v;
        }

        chart.custom_range = range::deserialize(viz.get("custom-range"));
        if let Some(v) = wire_bool(viz, "force-grid") {
            chart.force_grid = v;
        }
        if let Some(v) = wire_str(viz, "custom-grid-lines") {
            chart.custom_grid_lines = ticks::deserialize(v);
        }
        if let Some(v) = wire_str(viz, "tick-position") {
            chart.tick_position = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "axis-label-format") {
            chart.axis_label_format = v.to_string();
        }

        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        let colors = color_category::deserialize(viz.get("color-category"));
        chart.color_category = colors.color_category;
        chart.category_labels = colors.category_labels;
        chart.category_order = colors.category_order;
        chart.exclude_from_color_key = colors.exclude_from_color_key;
        if let Some(v) = wire_bool(viz, "rules") {
            chart.rules = v;
        }
        if let Some(v) = wire_bool(viz, "thick") {
            chart.thick = v;
        }
        if let Some(v) = wire_bool(viz, "background") {
            chart.background = v;
        }

        if let Some(v) = wire_bool(viz, "sort-bars") {
            chart.sort_bars = v;
        }
        if let Some(v) = wire_bool(viz, "reverse-order") {
            chart.reverse_order = v;
        }
        if let Some(v) = wire_bool(viz, "show-group-labels") {
            chart.show_group_labels = v;
        }
        if let Some(v) = wire_bool(viz, "show-category-labels") {
            chart.show_category_labels = v;
        }

        chart.overlays = BarOverlay::deserialize_collection(viz.get("overlays"))?;
        if let Some(v) = viz.get("highlighted-series") {
            chart.highlighted_series = serde_json::from_value(v.clone())?;
        }
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
    fn axes_bind_columns_to_roles() {
        let chart = BarChart {
            label_column: "Country".to_string(),
            bar_column: "turnout".to_string(),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let axes = &document["metadata"]["axes"];
        assert_eq!(axes["bars"], json!("turnout"));
        assert_eq!(axes["labels"], json!("Country"));
        // With no color column, colors fall back to the label column.
        assert_eq!(axes["colors"], json!("Country"));
        assert!(axes.get("groups").is_none());
    }

    #[test]
    fn groups_column_derives_group_by_column() {
        let chart = BarChart {
            groups_column: Some("Region".to_string()),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["group-by-column"],
            json!(true)
        );
        assert_eq!(document["metadata"]["axes"]["groups"], json!("Region"));
    }

    #[test]
    fn color_category_derives_color_by_column() {
        let mut chart = BarChart::new();
        chart
            .color_category
            .insert("A".to_string(), "#fff".to_string());
        let document = chart.serialize_model().unwrap();
        let viz = &document["metadata"]["visualize"];
        assert_eq!(viz["color-by-column"], json!(true));
        // Bar charts always carry excludeFromKey, even when empty.
        assert_eq!(viz["color-category"]["excludeFromKey"], json!([]));
    }

    #[test]
    fn custom_grid_lines_travel_as_comma_string() {
        let chart = BarChart {
            custom_grid_lines: vec![AxisValue::Int(0), AxisValue::Int(50), AxisValue::Int(100)],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["custom-grid-lines"],
            json!("0,50,100")
        );
        let back = BarChart::deserialize_model(&document).unwrap();
        assert_eq!(back.custom_grid_lines, chart.custom_grid_lines);
    }

    #[test]
    fn replace_flags_roundtrip() {
        let chart = BarChart {
            replace_flags: ReplaceFlags::Circle,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["replace-flags"],
            json!({"enabled": true, "style": "circle"})
        );
        let back = BarChart::deserialize_model(&document).unwrap();
        assert_eq!(back.replace_flags, ReplaceFlags::Circle);
    }

    #[test]
    fn overlays_roundtrip() {
        let chart = BarChart {
            overlays: vec![BarOverlay {
                title: "Target".to_string(),
                to_column: "target".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let back = BarChart::deserialize_model(&document).unwrap();
        assert_eq!(back.overlays, chart.overlays);
    }
}
