//! datawrapper-rs
//!
//! A typed Rust client for the Datawrapper chart API. Per-chart-type
//! models validate configuration, convert between snake_case attributes
//! and the provider's wire JSON field names, and drive the chart
//! lifecycle: create, update, publish, export, duplicate, fork, delete.
//!
//! ### Features
//! - Models for line, area, bar, column, scatter, stacked-bar,
//!   multiple-column and arrow charts
//! - Bidirectional codecs for the provider's nested metadata document,
//!   including UUID-keyed annotation collections
//! - Tabular data upload/download as CSV
//! - Chart export to PNG/PDF/SVG
//!
//! ### Example
//! ```no_run
//! use datawrapper_rs::charts::{ChartModel, LineChart};
//! use datawrapper_rs::table::Table;
//!
//! let mut chart = LineChart::new();
//! chart.base.title = "Temperature Over Time".to_string();
//! chart.base.source_name = "Weather Station".to_string();
//! chart.base.data = Table::from_csv("date,Temperature\n2020/01,15\n2020/02,18\n")?;
//!
//! let chart_id = chart.create(None)?; // token from DATAWRAPPER_ACCESS_TOKEN
//! chart.publish(None)?;
//! println!("published chart {chart_id}");
//! # Ok::<(), datawrapper_rs::Error>(())
//! ```

pub mod annotations;
pub mod api;
pub mod charts;
pub mod codecs;
pub mod error;
pub(crate) mod fields;
pub mod table;

pub use annotations::{
    AreaFill, BarOverlay, ConnectorLine, PlotRangeAnnotation, PlotTextAnnotation,
    RangeAnnotation, TextAnnotation,
};
pub use api::{Client, ExportFormat, ExportOptions};
pub use charts::{
    AnyChart, AreaChart, ArrowChart, BarChart, BaseChart, ChartModel, ChartType, ColumnChart,
    LineChart, MultipleColumnChart, ScatterPlot, StackedBarChart, get_chart,
};
pub use codecs::AxisValue;
pub use error::{Error, Result};
pub use table::Table;
