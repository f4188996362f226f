//! The arrow plot (`d3-arrow-plot`).

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{ArrowSort, GridDisplay, RangeExtent, ReplaceFlags};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_str};
use crate::codecs::{AxisValue, color_category, range, replace_flags};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper arrow plot: one arrow per row from a start column to an
/// end column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArrowChart {
    #[serde(flatten)]
    pub base: BaseChart,

    //
    // Arrows
    //
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    #[serde(rename = "thick-arrows", alias = "thick_arrows")]
    pub thick_arrows: bool,
    #[serde(rename = "y-grid", alias = "y_grid")]
    pub y_grid: GridDisplay,
    #[serde(rename = "replace-flags", alias = "replace_flags")]
    pub replace_flags: ReplaceFlags,

    //
    // Sorting and ordering
    //
    #[serde(rename = "sort-ranges", alias = "sort_ranges")]
    pub sort_ranges: bool,
    #[serde(rename = "sort-by", alias = "sort_by")]
    pub sort_by: ArrowSort,
    #[serde(rename = "reverse-order", alias = "reverse_order")]
    pub reverse_order: bool,

    //
    // Labels and formatting
    //
    #[serde(rename = "value-label-format", alias = "value_label_format")]
    pub value_label_format: String,
    /// The field used for the value labels.
    #[serde(rename = "range-value-labels", alias = "range_value_labels")]
    pub range_value_labels: String,

    //
    // Axes
    //
    #[serde(rename = "custom-range", alias = "custom_range")]
    pub custom_range: [AxisValue; 2],
    #[serde(rename = "range-extent", alias = "range_extent")]
    pub range_extent: RangeExtent,
    /// Column arrows start at (`axes.start`).
    #[serde(rename = "start-column", alias = "start_column")]
    pub start_column: Option<String>,
    /// Column arrows end at (`axes.end`).
    #[serde(rename = "end-column", alias = "end_column")]
    pub end_column: Option<String>,
    /// Column to color by (`axes.colors`).
    #[serde(rename = "color-column", alias = "color_column")]
    pub color_column: Option<String>,
    /// Column to label by (`axes.labels`).
    #[serde(rename = "label-column", alias = "label_column")]
    pub label_column: Option<String>,

    //
    // Features
    //
    /// Label on the first arrow naming the start/end columns
    /// (`show-arrow-key` on the wire).
    #[serde(rename = "arrow-key", alias = "arrow_key")]
    pub arrow_key: bool,
    #[serde(rename = "group-by-column", alias = "group_by_column")]
    pub group_by_column: bool,
}

impl Default for ArrowChart {
    fn default() -> Self {
        ArrowChart {
            base: BaseChart::default(),
            base_color: PaletteColor::default(),
            color_category: IndexMap::new(),
            thick_arrows: true,
            y_grid: GridDisplay::On,
            replace_flags: ReplaceFlags::Off,
            sort_ranges: false,
            sort_by: ArrowSort::End,
            reverse_order: false,
            value_label_format: String::new(),
            range_value_labels: String::new(),
            custom_range: [AxisValue::unset(), AxisValue::unset()],
            range_extent: RangeExtent::Nice,
            start_column: None,
            end_column: None,
            color_column: None,
            label_column: None,
            arrow_key: false,
            group_by_column: false,
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("thick_arrows", "thick-arrows"),
    FieldSpec::aliased("y_grid", "y-grid"),
    FieldSpec::aliased("replace_flags", "replace-flags"),
    FieldSpec::aliased("sort_ranges", "sort-ranges"),
    FieldSpec::aliased("sort_by", "sort-by"),
    FieldSpec::aliased("reverse_order", "reverse-order"),
    FieldSpec::aliased("value_label_format", "value-label-format"),
    FieldSpec::aliased("range_value_labels", "range-value-labels"),
    FieldSpec::aliased("custom_range", "custom-range"),
    FieldSpec::aliased("range_extent", "range-extent"),
    FieldSpec::aliased("start_column", "start-column"),
    FieldSpec::aliased("end_column", "end-column"),
    FieldSpec::aliased("color_column", "color-column"),
    FieldSpec::aliased("label_column", "label-column"),
    FieldSpec::aliased("arrow_key", "arrow-key"),
    FieldSpec::aliased("group_by_column", "group-by-column"),
];

impl ArrowChart {
    pub fn new() -> Self {
        ArrowChart::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::Arrow)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("ArrowChart", obj, &fields);
        serde_json::from_value(config)
            .map_err(|e| Error::validation("ArrowChart", e.to_string()))
    }
}

impl ChartModel for ArrowChart {
    const CHART_TYPE: ChartType = ChartType::Arrow;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;
        let viz = visualize_mut(&mut document);

        viz.insert("y-grid".into(), json!(self.y_grid.as_str()));
        viz.insert("reverse-order".into(), json!(self.reverse_order));
        viz.insert("thick-arrows".into(), json!(self.thick_arrows));
        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert(
            "color-category".into(),
            color_category::serialize(&self.color_category, &IndexMap::new(), &[], None),
        );
        viz.insert("range-value-labels".into(), json!(self.range_value_labels));
        viz.insert(
            "sort-range".into(),
            json!({
                "by": self.sort_by.as_str(),
                "enabled": self.sort_ranges,
            }),
        );
        viz.insert("custom-range".into(), range::serialize(&self.custom_range));
        viz.insert("range-extent".into(), json!(self.range_extent.as_str()));
        viz.insert("value-label-format".into(), json!(self.value_label_format));
        viz.insert(
            "color-by-column".into(),
            json!(!self.color_category.is_empty()),
        );
        viz.insert("group-by-column".into(), json!(self.group_by_column));
        viz.insert(
            "replace-flags".into(),
            replace_flags::serialize(&self.replace_flags),
        );
        viz.insert("show-arrow-key".into(), json!(self.arrow_key));

        let mut axes = Map::new();
        if let Some(start) = &self.start_column {
            axes.insert("start".into(), json!(start));
        }
        if let Some(end) = &self.end_column {
            axes.insert("end".into(), json!(end));
        }
        if let Some(colors) = &self.color_column {
            axes.insert("colors".into(), json!(colors));
        }
        if let Some(labels) = &self.label_column {
            axes.insert("labels".into(), json!(labels));
        }
        if !axes.is_empty() {
            document["metadata"]["axes"] = Value::Object(axes);
        }

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = ArrowChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        if let Some(axes) = metadata_section(document, "axes") {
            chart.start_column = wire_str(axes, "start").map(str::to_string);
            chart.end_column = wire_str(axes, "end").map(str::to_string);
            chart.color_column = wire_str(axes, "colors").map(str::to_string);
            chart.label_column = wire_str(axes, "labels").map(str::to_string);
        }
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        if let Some(v) = viz.get("y-grid") {
            chart.y_grid = GridDisplay::from_wire(v)?;
        }
        if let Some(v) = wire_bool(viz, "reverse-order") {
            chart.reverse_order = v;
        }
        if let Some(v) = wire_bool(viz, "thick-arrows") {
            chart.thick_arrows = v;
        }
        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        chart.color_category =
            color_category::deserialize(viz.get("color-category")).color_category;
        if let Some(v) = wire_str(viz, "range-value-labels") {
            chart.range_value_labels = v.to_string();
        }
        if let Some(v) = wire_str(viz, "value-label-format") {
            chart.value_label_format = v.to_string();
        }
        if let Some(sort) = viz.get("sort-range").and_then(Value::as_object) {
            if let Some(by) = sort.get("by").and_then(Value::as_str) {
                chart.sort_by = by.parse()?;
            }
            chart.sort_ranges = sort
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(false);
        }
        if viz.contains_key("replace-flags") {
            chart.replace_flags = replace_flags::deserialize(viz.get("replace-flags"));
        }
        chart.custom_range = range::deserialize(viz.get("custom-range"));
        if let Some(v) = wire_str(viz, "range-extent") {
            chart.range_extent = v.parse()?;
        }
        if let Some(v) = wire_bool(viz, "group-by-column") {
            chart.group_by_column = v;
        }
        if let Some(v) = wire_bool(viz, "show-arrow-key") {
            chart.arrow_key = v;
        }

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_folds_into_sort_range_object() {
        let chart = ArrowChart {
            sort_ranges: true,
            sort_by: ArrowSort::Difference,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["sort-range"],
            json!({"by": "difference", "enabled": true})
        );
        let back = ArrowChart::deserialize_model(&document).unwrap();
        assert!(back.sort_ranges);
        assert_eq!(back.sort_by, ArrowSort::Difference);
    }

    #[test]
    fn axes_are_omitted_when_no_columns_bound() {
        let document = ArrowChart::new().serialize_model().unwrap();
        assert!(document["metadata"].get("axes").is_none());

        let chart = ArrowChart {
            start_column: Some("2020".to_string()),
            end_column: Some("2023".to_string()),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["axes"],
            json!({"start": "2020", "end": "2023"})
        );
    }

    #[test]
    fn arrow_key_serializes_as_show_arrow_key() {
        let chart = ArrowChart {
            arrow_key: true,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["show-arrow-key"],
            json!(true)
        );
    }

    #[test]
    fn full_roundtrip() {
        let chart = ArrowChart {
            start_column: Some("2020".to_string()),
            end_column: Some("2023".to_string()),
            label_column: Some("Region".to_string()),
            custom_range: [AxisValue::Int(0), AxisValue::Int(200)],
            range_extent: RangeExtent::Custom,
            thick_arrows: false,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let back = ArrowChart::deserialize_model(&document).unwrap();
        assert_eq!(back, chart);
    }
}
