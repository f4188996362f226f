//! The stacked bar chart (`d3-bars-stacked`).
//!
//! Its `visualize` keys are flat, and — unlike every other type — its
//! writer puts the `axes` mapping at the top level of the document rather
//! than inside `metadata`. That placement is the provider's accepted
//! format and is mirrored here; the reader checks both spots.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{ReplaceFlags, ValueLabelMode};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_str};
use crate::codecs::{color_category, enable_value, replace_flags};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper stacked bar chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StackedBarChart {
    #[serde(flatten)]
    pub base: BaseChart,

    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,
    #[serde(rename = "replace-flags", alias = "replace_flags")]
    pub replace_flags: ReplaceFlags,
    /// `thick` on the wire.
    #[serde(rename = "thick-bars", alias = "thick_bars")]
    pub thick_bars: bool,
    #[serde(rename = "reverse-order", alias = "reverse_order")]
    pub reverse_order: bool,
    #[serde(rename = "value-label-format", alias = "value_label_format")]
    pub value_label_format: String,
    #[serde(rename = "date-label-format", alias = "date_label_format")]
    pub date_label_format: String,
    /// The field used for the value labels.
    #[serde(rename = "range-value-labels", alias = "range_value_labels")]
    pub range_value_labels: String,
    #[serde(rename = "color-by-column", alias = "color_by_column")]
    pub color_by_column: bool,
    /// Works together with a "Group" data column.
    #[serde(rename = "group-by-column", alias = "group_by_column")]
    pub group_by_column: bool,
    #[serde(rename = "show-color-key", alias = "show_color_key")]
    pub show_color_key: bool,
    #[serde(rename = "value-label-mode", alias = "value_label_mode")]
    pub value_label_mode: ValueLabelMode,
    /// Display values as percentages of the stack.
    #[serde(rename = "stack-percentages", alias = "stack_percentages")]
    pub stack_percentages: bool,
    #[serde(rename = "sort-bars", alias = "sort_bars")]
    pub sort_bars: bool,
    /// The column to sort by.
    #[serde(rename = "sort-by", alias = "sort_by")]
    pub sort_by: String,
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    #[serde(rename = "block-labels", alias = "block_labels")]
    pub block_labels: bool,
    #[serde(rename = "negative-color", alias = "negative_color")]
    pub negative_color: Option<String>,
    #[serde(rename = "groups-column", alias = "groups_column")]
    pub groups_column: Option<String>,
}

impl Default for StackedBarChart {
    fn default() -> Self {
        StackedBarChart {
            base: BaseChart::default(),
            color_category: IndexMap::new(),
            replace_flags: ReplaceFlags::Off,
            thick_bars: false,
            reverse_order: false,
            value_label_format: String::new(),
            date_label_format: String::new(),
            range_value_labels: String::new(),
            color_by_column: false,
            group_by_column: false,
            show_color_key: false,
            value_label_mode: ValueLabelMode::Left,
            stack_percentages: false,
            sort_bars: false,
            sort_by: String::new(),
            base_color: PaletteColor::default(),
            block_labels: false,
            negative_color: None,
            groups_column: None,
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("replace_flags", "replace-flags"),
    FieldSpec::aliased("thick_bars", "thick-bars"),
    FieldSpec::aliased("reverse_order", "reverse-order"),
    FieldSpec::aliased("value_label_format", "value-label-format"),
    FieldSpec::aliased("date_label_format", "date-label-format"),
    FieldSpec::aliased("range_value_labels", "range-value-labels"),
    FieldSpec::aliased("color_by_column", "color-by-column"),
    FieldSpec::aliased("group_by_column", "group-by-column"),
    FieldSpec::aliased("show_color_key", "show-color-key"),
    FieldSpec::aliased("value_label_mode", "value-label-mode"),
    FieldSpec::aliased("stack_percentages", "stack-percentages"),
    FieldSpec::aliased("sort_bars", "sort-bars"),
    FieldSpec::aliased("sort_by", "sort-by"),
    FieldSpec::aliased("base_color", "base-color"),
    FieldSpec::aliased("block_labels", "block-labels"),
    FieldSpec::aliased("negative_color", "negative-color"),
    FieldSpec::aliased("groups_column", "groups-column"),
];

impl StackedBarChart {
    pub fn new() -> Self {
        StackedBarChart::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::StackedBar)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("StackedBarChart", obj, &fields);
        serde_json::from_value(config)
            .map_err(|e| Error::validation("StackedBarChart", e.to_string()))
    }
}

impl ChartModel for StackedBarChart {
    const CHART_TYPE: ChartType = ChartType::StackedBar;

    fn base(&self) -> &BaseChart {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseChart {
        &mut self.base
    }

    fn serialize_model(&self) -> Result<Value> {
        let mut document = serialize_base(&self.base, Self::CHART_TYPE)?;
        let viz = visualize_mut(&mut document);

        viz.insert("reverse-order".into(), json!(self.reverse_order));
        viz.insert(
            "color-category".into(),
            color_category::serialize(&self.color_category, &IndexMap::new(), &[], None),
        );
        viz.insert("range-value-labels".into(), json!(self.range_value_labels));
        viz.insert("show-color-key".into(), json!(self.show_color_key));
        viz.insert("value-label-format".into(), json!(self.value_label_format));
        viz.insert("date-label-format".into(), json!(self.date_label_format));
        viz.insert("color-by-column".into(), json!(self.color_by_column));
        viz.insert("group-by-column".into(), json!(self.group_by_column));
        viz.insert("thick".into(), json!(self.thick_bars));
        viz.insert(
            "replace-flags".into(),
            replace_flags::serialize(&self.replace_flags),
        );
        viz.insert(
            "value-label-mode".into(),
            json!(self.value_label_mode.as_str()),
        );
        viz.insert("stack-percentages".into(), json!(self.stack_percentages));
        viz.insert("sort-bars".into(), json!(self.sort_bars));
        viz.insert("sort-by".into(), json!(self.sort_by));
        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert("block-labels".into(), json!(self.block_labels));
        viz.insert(
            "negativeColor".into(),
            enable_value::serialize(self.negative_color.as_deref()),
        );

        // The stacked-bar writer keeps axes at the document top level.
        if let Some(groups) = &self.groups_column {
            document["axes"] = json!({"groups": groups});
        }

        Ok(document)
    }

    fn deserialize_model(document: &Value) -> Result<Self> {
        let mut chart = StackedBarChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        // Accept axes at the top level or nested in metadata.
        let axes = document
            .get("axes")
            .and_then(Value::as_object)
            .or_else(|| metadata_section(document, "axes"));
        if let Some(axes) = axes {
            chart.groups_column = axes
                .get("groups")
                .and_then(Value::as_str)
                .map(str::to_string);
        }
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        if let Some(v) = wire_bool(viz, "reverse-order") {
            chart.reverse_order = v;
        }
        chart.color_category =
            color_category::deserialize(viz.get("color-category")).color_category;
        if let Some(v) = wire_str(viz, "range-value-labels") {
            chart.range_value_labels = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "show-color-key") {
            chart.show_color_key = v;
        }
        if let Some(v) = wire_str(viz, "value-label-format") {
            chart.value_label_format = v.to_string();
        }
        if let Some(v) = wire_str(viz, "date-label-format") {
            chart.date_label_format = v.to_string();
        }
        if let Some(v) = wire_bool(viz, "color-by-column") {
            chart.color_by_column = v;
        }
        if let Some(v) = wire_bool(viz, "group-by-column") {
            chart.group_by_column = v;
        }
        if let Some(v) = wire_bool(viz, "thick") {
            chart.thick_bars = v;
        }
        if viz.contains_key("replace-flags") {
            chart.replace_flags = replace_flags::deserialize(viz.get("replace-flags"));
        }
        if let Some(v) = wire_str(viz, "value-label-mode") {
            chart.value_label_mode = v.parse()?;
        }
        if let Some(v) = wire_bool(viz, "stack-percentages") {
            chart.stack_percentages = v;
        }
        if let Some(v) = wire_bool(viz, "sort-bars") {
            chart.sort_bars = v;
        }
        if let Some(v) = wire_str(viz, "sort-by") {
            chart.sort_by = v.to_string();
        }
        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        if let Some(v) = wire_bool(viz, "block-labels") {
            chart.block_labels = v;
        }
        if viz.contains_key("negativeColor") {
            chart.negative_color = enable_value::deserialize(viz.get("negativeColor"));
        }

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thick_bars_serialize_as_thick() {
        let chart = StackedBarChart {
            thick_bars: true,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(document["metadata"]["visualize"]["thick"], json!(true));
        let back = StackedBarChart::deserialize_model(&document).unwrap();
        assert!(back.thick_bars);
    }

    #[test]
    fn axes_sit_at_the_document_top_level() {
        let chart = StackedBarChart {
            groups_column: Some("Group".to_string()),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(document["axes"], json!({"groups": "Group"}));
        assert!(document["metadata"].get("axes").is_none());
        let back = StackedBarChart::deserialize_model(&document).unwrap();
        assert_eq!(back.groups_column.as_deref(), Some("Group"));
    }

    #[test]
    fn axes_nested_in_metadata_are_also_accepted() {
        let document = json!({
            "type": "d3-bars-stacked",
            "title": "t",
            "metadata": {"axes": {"groups": "Region"}, "visualize": {}}
        });
        let chart = StackedBarChart::deserialize_model(&document).unwrap();
        assert_eq!(chart.groups_column.as_deref(), Some("Region"));
    }

    #[test]
    fn full_roundtrip() {
        let mut chart = StackedBarChart {
            stack_percentages: true,
            sort_bars: true,
            sort_by: "total".to_string(),
            value_label_mode: ValueLabelMode::Diverging,
            replace_flags: ReplaceFlags::OneByOne,
            negative_color: Some("#d62728".to_string()),
            ..Default::default()
        };
        chart
            .color_category
            .insert("A".to_string(), "#1f77b4".to_string());
        let document = chart.serialize_model().unwrap();
        let back = StackedBarChart::deserialize_model(&document).unwrap();
        assert_eq!(back, chart);
    }
}
