//! The area chart (`d3-area`).
//!
//! Unlike the line chart, the axis format/range/tick fields here are
//! optional and their wire keys are omitted entirely until set.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::annotations::{RangeAnnotation, TextAnnotation, serialize_collection};
use crate::charts::base::{
    BASE_FIELDS, BaseChart, ChartModel, PaletteColor, deserialize_base, metadata_section,
    serialize_base, visualize_mut,
};
use crate::charts::enums::{
    AreaSort, GridDisplay, GridLabelAlign, GridLabelPosition, Interpolation, PlotHeightMode,
};
use crate::charts::{ChartType, check_chart_type, wire_bool, wire_str};
use crate::codecs::{AxisValue, color_category, plot_height, range, ticks};
use crate::error::{Error, Result};
use crate::fields::{FieldSpec, warn_unknown_keys};

/// A Datawrapper area chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaChart {
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
    // Areas
    //
    #[serde(rename = "base-color", alias = "base_color")]
    pub base_color: PaletteColor,
    /// Opacity of the area fills (0–1).
    #[serde(rename = "area-opacity", alias = "area_opacity")]
    pub area_opacity: f64,
    pub interpolation: Interpolation,
    #[serde(rename = "sort-areas", alias = "sort_areas")]
    pub sort_areas: AreaSort,
    #[serde(rename = "stack-areas", alias = "stack_areas")]
    pub stack_areas: bool,
    #[serde(rename = "stack-to-100", alias = "stack_to_100")]
    pub stack_to_100: bool,
    #[serde(rename = "area-separator-lines", alias = "area_separator_lines")]
    pub area_separator_lines: bool,
    #[serde(rename = "area-separator-color", alias = "area_separator_color")]
    pub area_separator_color: PaletteColor,
    #[serde(rename = "color-category", alias = "color_category")]
    pub color_category: IndexMap<String, String>,

    //
    // Labels
    //
    #[serde(rename = "show-color-key", alias = "show_color_key")]
    pub show_color_key: bool,

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

impl Default for AreaChart {
    fn default() -> Self {
        AreaChart {
            base: BaseChart::default(),
            x_grid: GridDisplay::Off,
            y_grid: GridDisplay::On,
            x_grid_format: None,
            y_grid_format: None,
            custom_range_x: None,
            custom_range_y: None,
            custom_ticks_x: None,
            custom_ticks_y: None,
            y_grid_labels: GridLabelPosition::Auto,
            y_grid_label_align: GridLabelAlign::Left,
            base_color: PaletteColor::default(),
            area_opacity: 0.8,
            interpolation: Interpolation::Linear,
            sort_areas: AreaSort::Keep,
            stack_areas: false,
            stack_to_100: false,
            area_separator_lines: false,
            area_separator_color: PaletteColor::Hex("#4682b4".to_string()),
            color_category: IndexMap::new(),
            show_color_key: false,
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
    FieldSpec::aliased("x_grid", "x-grid"),
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
    FieldSpec::aliased("area_opacity", "area-opacity"),
    FieldSpec::new("interpolation"),
    FieldSpec::aliased("sort_areas", "sort-areas"),
    FieldSpec::aliased("stack_areas", "stack-areas"),
    FieldSpec::aliased("stack_to_100", "stack-to-100"),
    FieldSpec::aliased("area_separator_lines", "area-separator-lines"),
    FieldSpec::aliased("area_separator_color", "area-separator-color"),
    FieldSpec::aliased("color_category", "color-category"),
    FieldSpec::aliased("show_color_key", "show-color-key"),
    FieldSpec::aliased("show_tooltips", "show-tooltips"),
    FieldSpec::aliased("tooltip_x_format", "tooltip-x-format"),
    FieldSpec::aliased("tooltip_number_format", "tooltip-number-format"),
    FieldSpec::aliased("plot_height_mode", "plot-height-mode"),
    FieldSpec::aliased("plot_height_fixed", "plot-height-fixed"),
    FieldSpec::aliased("plot_height_ratio", "plot-height-ratio"),
    FieldSpec::aliased("text_annotations", "text-annotations"),
    FieldSpec::aliased("range_annotations", "range-annotations"),
];

impl AreaChart {
    pub fn new() -> Self {
        AreaChart::default()
    }

    pub fn from_value(config: Value) -> Result<Self> {
        let obj = config
            .as_object()
            .ok_or_else(|| Error::validation("config", "chart config must be a mapping"))?;
        check_chart_type(obj, ChartType::Area)?;
        let mut fields: Vec<FieldSpec> = BASE_FIELDS.to_vec();
        fields.extend_from_slice(FIELDS);
        warn_unknown_keys("AreaChart", obj, &fields);
        let chart: AreaChart = serde_json::from_value(config)
            .map_err(|e| Error::validation("AreaChart", e.to_string()))?;
        chart.validate()?;
        Ok(chart)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.area_opacity) {
            return Err(Error::validation(
                "area_opacity",
                format!("{} is not between 0.0 and 1.0", self.area_opacity),
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

impl ChartModel for AreaChart {
    const CHART_TYPE: ChartType = ChartType::Area;

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

        viz.insert("x-grid".into(), json!(self.x_grid.as_str()));
        viz.insert("y-grid".into(), json!(self.y_grid.as_str()));
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
        viz.insert("y-grid-labels".into(), json!(self.y_grid_labels.as_str()));
        viz.insert(
            "y-grid-label-align".into(),
            json!(self.y_grid_label_align.as_str()),
        );

        viz.insert("area-opacity".into(), json!(self.area_opacity));
        viz.insert("base-color".into(), self.base_color.to_wire());
        viz.insert("interpolation".into(), json!(self.interpolation.as_str()));
        viz.insert("sort-areas".into(), json!(self.sort_areas.as_str()));
        viz.insert("stack-areas".into(), json!(self.stack_areas));
        viz.insert("stack-to-100".into(), json!(self.stack_to_100));
        viz.insert(
            "area-separator-lines".into(),
            json!(self.area_separator_lines),
        );
        viz.insert(
            "area-separator-color".into(),
            self.area_separator_color.to_wire(),
        );
        viz.insert(
            "color-category".into(),
            color_category::serialize(&self.color_category, &IndexMap::new(), &[], None),
        );

        viz.insert("show-color-key".into(), json!(self.show_color_key));
        viz.insert("show-tooltips".into(), json!(self.show_tooltips));
        viz.insert("tooltip-x-format".into(), json!(self.tooltip_x_format));
        viz.insert(
            "tooltip-number-format".into(),
            json!(self.tooltip_number_format),
        );

        for (key, value) in plot_height::serialize(
            &self.plot_height_mode,
            self.plot_height_fixed,
            self.plot_height_ratio,
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
        let mut chart = AreaChart {
            base: deserialize_base(document)?,
            ..Default::default()
        };
        let Some(viz) = metadata_section(document, "visualize") else {
            return Ok(chart);
        };

        if let Some(v) = viz.get("x-grid") {
            chart.x_grid = GridDisplay::from_wire(v)?;
        }
        if let Some(v) = viz.get("y-grid") {
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
        if let Some(v) = viz.get("custom-range-y") {
            chart.custom_range_y = Some(range::deserialize(Some(v)));
        }
        if let Some(v) = wire_str(viz, "custom-ticks-x") {
            chart.custom_ticks_x = Some(ticks::deserialize(v));
        }
        if let Some(v) = wire_str(viz, "custom-ticks-y") {
            chart.custom_ticks_y = Some(ticks::deserialize(v));
        }
        if let Some(v) = wire_str(viz, "y-grid-labels") {
            chart.y_grid_labels = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "y-grid-label-align") {
            chart.y_grid_label_align = v.parse()?;
        }

        if let Some(v) = viz.get("base-color") {
            chart.base_color = PaletteColor::from_wire(v)?;
        }
        // Opacity sometimes comes back as a string.
        match viz.get("area-opacity") {
            Some(Value::Number(n)) => chart.area_opacity = n.as_f64().unwrap_or(0.8),
            Some(Value::String(s)) if !s.is_empty() => {
                chart.area_opacity = s.parse().map_err(|_| {
                    Error::validation("area_opacity", format!("{s:?} is not a number"))
                })?;
            }
            _ => {}
        }
        if let Some(v) = wire_str(viz, "interpolation") {
            chart.interpolation = v.parse()?;
        }
        if let Some(v) = wire_str(viz, "sort-areas") {
            chart.sort_areas = v.parse()?;
        }
        if let Some(v) = wire_bool(viz, "stack-areas") {
            chart.stack_areas = v;
        }
        if let Some(v) = wire_bool(viz, "stack-to-100") {
            chart.stack_to_100 = v;
        }
        if let Some(v) = wire_bool(viz, "area-separator-lines") {
            chart.area_separator_lines = v;
        }
        if let Some(v) = viz.get("area-separator-color") {
            chart.area_separator_color = PaletteColor::from_wire(v)?;
        }
        chart.color_category =
            color_category::deserialize(viz.get("color-category")).color_category;

        if let Some(v) = wire_bool(viz, "show-color-key") {
            chart.show_color_key = v;
        }
        if let Some(v) = wire_bool(viz, "show-tooltips") {
            chart.show_tooltips = v;
        }
        if let Some(v) = wire_str(viz, "tooltip-x-format") {
            chart.tooltip_x_format = v.to_string();
        }
        if let Some(v) = wire_str(viz, "tooltip-number-format") {
            chart.tooltip_number_format = v.to_string();
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

        Ok(chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_axis_keys_are_omitted_until_set() {
        let chart = AreaChart::new();
        let document = chart.serialize_model().unwrap();
        let viz = document["metadata"]["visualize"].as_object().unwrap();
        assert!(!viz.contains_key("x-grid-format"));
        assert!(!viz.contains_key("custom-range-y"));
        assert_eq!(viz["x-grid"], json!("off"));

        let chart = AreaChart {
            custom_range_y: Some([AxisValue::Int(0), AxisValue::Int(100)]),
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        assert_eq!(
            document["metadata"]["visualize"]["custom-range-y"],
            json!([0, 100])
        );
    }

    #[test]
    fn stacking_roundtrip() {
        let chart = AreaChart {
            stack_areas: true,
            stack_to_100: true,
            sort_areas: AreaSort::Descending,
            area_opacity: 0.4,
            ..Default::default()
        };
        let document = chart.serialize_model().unwrap();
        let back = AreaChart::deserialize_model(&document).unwrap();
        assert_eq!(back, chart);
    }

    #[test]
    fn string_area_opacity_is_parsed() {
        let document = json!({
            "type": "d3-area",
            "title": "t",
            "metadata": {"visualize": {"area-opacity": "0.25"}}
        });
        let chart = AreaChart::deserialize_model(&document).unwrap();
        assert_eq!(chart.area_opacity, 0.25);
    }

    #[test]
    fn out_of_range_opacity_fails() {
        let chart = AreaChart {
            area_opacity: 1.5,
            ..Default::default()
        };
        assert!(chart.serialize_model().is_err());
    }
}
