//! Chart models, one per Datawrapper chart type, plus the type-tag
//! dispatch used when the type of a remote chart is not known up front.

use serde_json::{Map, Value};

use crate::api::Client;
use crate::error::{Error, Result};

pub mod base;
pub mod enums;

pub mod area;
pub mod arrow;
pub mod bar;
pub mod column;
pub mod line;
pub mod multiple_column;
pub mod scatter;
pub mod stacked_bar;

pub use area::AreaChart;
pub use arrow::ArrowChart;
pub use bar::BarChart;
pub use base::{BaseChart, ChartModel, ColumnFormat, PaletteColor, Transform};
pub use column::ColumnChart;
pub use line::{Line, LineChart};
pub use multiple_column::MultipleColumnChart;
pub use scatter::ScatterPlot;
pub use stacked_bar::StackedBarChart;

/// The wire type tags of the supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
    Area,
    Bar,
    Column,
    Scatter,
    StackedBar,
    MultipleColumn,
    Arrow,
}

impl ChartType {
    pub const ALL: &'static [ChartType] = &[
        ChartType::Line,
        ChartType::Area,
        ChartType::Bar,
        ChartType::Column,
        ChartType::Scatter,
        ChartType::StackedBar,
        ChartType::MultipleColumn,
        ChartType::Arrow,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "d3-lines",
            ChartType::Area => "d3-area",
            ChartType::Bar => "d3-bars",
            ChartType::Column => "column-chart",
            ChartType::Scatter => "d3-scatter-plot",
            ChartType::StackedBar => "d3-bars-stacked",
            ChartType::MultipleColumn => "multiple-columns",
            ChartType::Arrow => "d3-arrow-plot",
        }
    }

    /// Resolve a wire tag. Unknown tags fail with the supported set in the
    /// message.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let found = match tag {
            // The API has served both tags for split-panel column charts.
            "d3-bars-split" => Some(ChartType::MultipleColumn),
            other => ChartType::ALL.iter().copied().find(|t| t.as_str() == other),
        };
        found.ok_or_else(|| {
            let supported: Vec<&str> = ChartType::ALL.iter().map(|t| t.as_str()).collect();
            Error::validation(
                "type",
                format!(
                    "unsupported chart type {tag:?}; supported types: {}",
                    supported.join(", ")
                ),
            )
        })
    }

    fn matches_tag(&self, tag: &str) -> bool {
        tag == self.as_str() || (*self == ChartType::MultipleColumn && tag == "d3-bars-split")
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart of any supported type, as returned by [`get_chart`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnyChart {
    Line(LineChart),
    Area(AreaChart),
    Bar(BarChart),
    Column(ColumnChart),
    Scatter(ScatterPlot),
    StackedBar(StackedBarChart),
    MultipleColumn(MultipleColumnChart),
    Arrow(ArrowChart),
}

impl AnyChart {
    pub fn chart_type(&self) -> ChartType {
        match self {
            AnyChart::Line(_) => ChartType::Line,
            AnyChart::Area(_) => ChartType::Area,
            AnyChart::Bar(_) => ChartType::Bar,
            AnyChart::Column(_) => ChartType::Column,
            AnyChart::Scatter(_) => ChartType::Scatter,
            AnyChart::StackedBar(_) => ChartType::StackedBar,
            AnyChart::MultipleColumn(_) => ChartType::MultipleColumn,
            AnyChart::Arrow(_) => ChartType::Arrow,
        }
    }

    pub fn base(&self) -> &BaseChart {
        match self {
            AnyChart::Line(c) => c.base(),
            AnyChart::Area(c) => c.base(),
            AnyChart::Bar(c) => c.base(),
            AnyChart::Column(c) => c.base(),
            AnyChart::Scatter(c) => c.base(),
            AnyChart::StackedBar(c) => c.base(),
            AnyChart::MultipleColumn(c) => c.base(),
            AnyChart::Arrow(c) => c.base(),
        }
    }
}

/// Fetch a chart whose type is not known in advance: read its wire type
/// tag, then delegate to the matching model's fetch path.
pub fn get_chart(chart_id: &str, access_token: Option<&str>) -> Result<AnyChart> {
    let client = Client::new(access_token)?;
    let document = client.chart(chart_id)?;
    let tag = document
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Response(format!("chart {chart_id} has no type field")))?;
    let chart = match ChartType::from_tag(tag)? {
        ChartType::Line => AnyChart::Line(LineChart::get(chart_id, access_token)?),
        ChartType::Area => AnyChart::Area(AreaChart::get(chart_id, access_token)?),
        ChartType::Bar => AnyChart::Bar(BarChart::get(chart_id, access_token)?),
        ChartType::Column => AnyChart::Column(ColumnChart::get(chart_id, access_token)?),
        ChartType::Scatter => AnyChart::Scatter(ScatterPlot::get(chart_id, access_token)?),
        ChartType::StackedBar => {
            AnyChart::StackedBar(StackedBarChart::get(chart_id, access_token)?)
        }
        ChartType::MultipleColumn => {
            AnyChart::MultipleColumn(MultipleColumnChart::get(chart_id, access_token)?)
        }
        ChartType::Arrow => AnyChart::Arrow(ArrowChart::get(chart_id, access_token)?),
    };
    Ok(chart)
}

/// Reject a loose config whose `chart-type` names a different chart.
pub(crate) fn check_chart_type(config: &Map<String, Value>, expected: ChartType) -> Result<()> {
    let declared = config
        .get("chart_type")
        .or_else(|| config.get("chart-type"))
        .and_then(Value::as_str);
    match declared {
        Some(tag) if !expected.matches_tag(tag) => Err(Error::validation(
            "chart_type",
            format!("config declares {tag:?} but this model serializes as {:?}", expected.as_str()),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn wire_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

pub(crate) fn wire_bool(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

pub(crate) fn wire_i64(map: &Map<String, Value>, key: &str) -> Option<i64> {
    map.get(key).and_then(Value::as_i64)
}

pub(crate) fn wire_f64(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_resolve_to_types() {
        assert_eq!(ChartType::from_tag("d3-lines").unwrap(), ChartType::Line);
        assert_eq!(
            ChartType::from_tag("column-chart").unwrap(),
            ChartType::Column
        );
        // Legacy split-bars tag resolves to the multiple-column model.
        assert_eq!(
            ChartType::from_tag("d3-bars-split").unwrap(),
            ChartType::MultipleColumn
        );
    }

    #[test]
    fn unknown_tag_lists_supported_types() {
        let err = ChartType::from_tag("locator-map").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("locator-map"), "{msg}");
        assert!(msg.contains("d3-lines"), "{msg}");
        assert!(msg.contains("d3-arrow-plot"), "{msg}");
    }

    #[test]
    fn declared_type_must_match_model() {
        let config = serde_json::json!({"chart-type": "d3-area"});
        let err = check_chart_type(config.as_object().unwrap(), ChartType::Line).unwrap_err();
        assert!(err.to_string().contains("d3-area"));
        assert!(
            check_chart_type(config.as_object().unwrap(), ChartType::Area).is_ok()
        );
    }
}
