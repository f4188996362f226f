//! Closed-set value types for chart configuration fields.
//!
//! The API models most of these as bare string literals. Here each one is
//! an enum that validates against the closed set at parse time, exposes the
//! raw wire literal via `as_str()`, and serializes as that literal, so a
//! raw string from a config file and the symbolic constant are
//! interchangeable. Free-format fields (number/date format strings) stay
//! plain `String`s; the [`formats`] module carries the documented
//! constants for them.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Error;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every legal wire literal for this field.
            pub const ALLOWED: &'static [&'static str] = &[$($value),+];

            /// The raw wire literal.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw {
                    $( $value => Ok($name::$variant), )+
                    other => Err(Error::invalid_option($field, other, Self::ALLOWED)),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(D::Error::custom)
            }
        }
    };
}

/// Grid line display for an axis.
///
/// Accepts legacy booleans wherever a loose config is parsed: `true` means
/// `on`, `false` means `off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridDisplay {
    Off,
    On,
    Ticks,
    Lines,
}

impl GridDisplay {
    pub const ALLOWED: &'static [&'static str] = &["off", "on", "ticks", "lines"];

    pub const fn as_str(&self) -> &'static str {
        match self {
            GridDisplay::Off => "off",
            GridDisplay::On => "on",
            GridDisplay::Ticks => "ticks",
            GridDisplay::Lines => "lines",
        }
    }

    pub fn is_on(&self) -> bool {
        !matches!(self, GridDisplay::Off)
    }

    /// Parse a wire value, honoring the boolean backwards-compatibility
    /// convention.
    pub fn from_wire(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Bool(true) => Ok(GridDisplay::On),
            Value::Bool(false) => Ok(GridDisplay::Off),
            Value::String(s) => s.parse(),
            other => Err(Error::validation(
                "grid display",
                format!("expected a string or boolean, got {other}"),
            )),
        }
    }
}

impl std::fmt::Display for GridDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GridDisplay {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "off" => Ok(GridDisplay::Off),
            "on" => Ok(GridDisplay::On),
            "ticks" => Ok(GridDisplay::Ticks),
            "lines" => Ok(GridDisplay::Lines),
            other => Err(Error::invalid_option("grid display", other, Self::ALLOWED)),
        }
    }
}

impl Serialize for GridDisplay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GridDisplay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        GridDisplay::from_wire(&raw).map_err(D::Error::custom)
    }
}

string_enum! {
    /// Where axis grid labels are drawn.
    GridLabelPosition as "grid labels" {
        Auto => "auto",
        Inside => "inside",
        Outside => "outside",
        Off => "off",
        On => "on",
    }
}

string_enum! {
    /// Which side axis labels align to.
    GridLabelAlign as "grid label align" {
        Left => "left",
        Right => "right",
    }
}

string_enum! {
    /// Interpolation method for drawing lines and area edges.
    Interpolation as "interpolation" {
        Linear => "linear",
        Step => "step",
        StepAfter => "step-after",
        StepBefore => "step-before",
        MonotoneX => "monotone-x",
        Cardinal => "cardinal",
        Natural => "natural",
    }
}

string_enum! {
    /// Stroke width presets for lines.
    LineWidth as "line width" {
        /// 1px stroke.
        Thinnest => "style0",
        /// 2px stroke, the default.
        Thin => "style1",
        /// 3px stroke.
        Medium => "style2",
        /// 4px stroke.
        Thick => "style3",
        Invisible => "invisible",
    }
}

string_enum! {
    /// Dash pattern presets for lines.
    LineDash as "line dash" {
        Solid => "style1",
        ShortDash => "style2",
        MediumDash => "style3",
        LongDash => "style4",
    }
}

string_enum! {
    /// Nine-way anchor alignment for text annotations.
    TextAlign as "align" {
        TopLeft => "tl",
        TopCenter => "tc",
        TopRight => "tr",
        MiddleLeft => "ml",
        MiddleCenter => "mc",
        MiddleRight => "mr",
        BottomLeft => "bl",
        BottomCenter => "bc",
        BottomRight => "br",
    }
}

string_enum! {
    /// Dash pattern for annotation strokes.
    StrokeType as "stroke type" {
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
    }
}

string_enum! {
    /// Which axis a range annotation attaches to.
    AnnotationAxis as "type" {
        X => "x",
        Y => "y",
    }
}

string_enum! {
    /// Whether a range annotation draws as a line or a shaded range.
    AnnotationDisplay as "display" {
        Line => "line",
        Range => "range",
    }
}

string_enum! {
    /// Shape of the connector line between a text annotation and its target.
    ConnectorLineType as "connector line type" {
        Straight => "straight",
        CurveRight => "curveRight",
        CurveLeft => "curveLeft",
    }
}

string_enum! {
    /// How the plot height is determined.
    PlotHeightMode as "plot height mode" {
        Fixed => "fixed",
        Ratio => "ratio",
    }
}

string_enum! {
    /// Country-code flag replacement styles; `off` disables the feature.
    ReplaceFlags as "replace flags" {
        Off => "off",
        FourByThree => "4x3",
        OneByOne => "1x1",
        Circle => "circle",
    }
}

string_enum! {
    /// When value labels are shown.
    ValueLabelDisplay as "value labels" {
        Hover => "hover",
        Always => "always",
        Off => "off",
    }
}

string_enum! {
    /// Where value labels are placed relative to their bar or column.
    ValueLabelPlacement as "value label placement" {
        Inside => "inside",
        Outside => "outside",
        Below => "below",
    }
}

string_enum! {
    /// Alignment of value labels on bar charts.
    ValueLabelAlignment as "value label alignment" {
        Left => "left",
        Right => "right",
    }
}

string_enum! {
    /// Placement mode for over-bar labels on stacked bars.
    ValueLabelMode as "value label mode" {
        Left => "left",
        Diverging => "diverging",
    }
}

string_enum! {
    /// Alignment of the category labels on bar charts.
    LabelAlignment as "label alignment" {
        Left => "left",
        Right => "right",
    }
}

string_enum! {
    /// Position of the axis ticks on bar charts.
    TickPosition as "tick position" {
        Top => "top",
        Bottom => "bottom",
    }
}

string_enum! {
    /// Y-axis scale.
    ScaleY as "scale-y" {
        Linear => "linear",
        Log => "log",
    }
}

string_enum! {
    /// Symbol shapes drawn on lines.
    SymbolShape as "symbol shape" {
        Circle => "circle",
        Square => "square",
        Diamond => "diamond",
        TriangleUp => "triangleUp",
        TriangleDown => "triangleDown",
        Cross => "cross",
        Hexagon => "hexagon",
        Star => "star",
        Wye => "wye",
    }
}

string_enum! {
    /// Fill style of line symbols.
    SymbolStyle as "symbol style" {
        Hollow => "hollow",
        Fill => "fill",
    }
}

string_enum! {
    /// Which points on a line get symbols.
    SymbolDisplay as "symbol display" {
        Every => "every",
        First => "first",
        Last => "last",
        Both => "both",
    }
}

string_enum! {
    /// How area layers are sorted.
    AreaSort as "sort areas" {
        Keep => "keep",
        Ascending => "asc",
        Descending => "desc",
    }
}

string_enum! {
    /// Overlay flavors on bar charts.
    OverlayType as "overlay type" {
        Value => "value",
        Range => "range",
    }
}

string_enum! {
    /// Fill pattern for range overlays.
    OverlayPattern as "overlay pattern" {
        Solid => "solid",
        DiagonalUp => "diagonal-up",
        DiagonalDown => "diagonal-down",
    }
}

string_enum! {
    /// Whether point size is fixed or driven by a data column.
    ScatterSize as "size" {
        Fixed => "fixed",
        Dynamic => "dynamic",
    }
}

string_enum! {
    /// Whether point shape is fixed or driven by a data column.
    ScatterShapeMode as "shape" {
        Fixed => "fixed",
        Dynamic => "dynamic",
    }
}

string_enum! {
    /// D3 symbol identifiers for scatter points.
    ScatterShape as "fixed shape" {
        Circle => "symbolCircle",
        Square => "symbolSquare",
        Diamond => "symbolDiamond",
        Triangle => "symbolTriangle",
        TriangleDown => "symbolTriangleDown",
        Cross => "symbolCross",
        Star => "symbolStar",
        Wye => "symbolWye",
    }
}

string_enum! {
    /// Where a scatter axis draws its ticks and labels.
    ScatterAxisPosition as "axis position" {
        Bottom => "bottom",
        Top => "top",
        Left => "left",
        Right => "right",
        Zero => "zero",
        Off => "off",
    }
}

string_enum! {
    /// Grid line display on scatter plots.
    ScatterGridLines as "grid lines" {
        On => "on",
        Off => "off",
        NoLabels => "no-labels",
        JustLabels => "just-labels",
    }
}

string_enum! {
    /// Regression methods for the scatter trend line.
    RegressionMethod as "regression method" {
        Linear => "linear",
        Quadratic => "quadratic",
        Cubic => "cubic",
        Exponential => "exponential",
        Logarithmic => "logarithmic",
        Power => "power",
    }
}

string_enum! {
    /// Where the scatter size legend sits.
    SizeLegendPosition as "size legend position" {
        Above => "above",
        Below => "below",
        InsideLeftTop => "inside-left-top",
        InsideCenterTop => "inside-center-top",
        InsideRightTop => "inside-right-top",
        InsideLeftBottom => "inside-left-bottom",
        InsideCenterBottom => "inside-center-bottom",
        InsideRightBottom => "inside-right-bottom",
    }
}

string_enum! {
    /// Whether the size legend picks its values automatically.
    SizeLegendValues as "size legend values" {
        Auto => "auto",
        Custom => "custom",
    }
}

string_enum! {
    /// Where the size legend's value labels sit.
    SizeLegendLabelPosition as "size legend label position" {
        Below => "below",
        Right => "right",
    }
}

string_enum! {
    /// Where the size legend's title sits.
    SizeLegendTitlePosition as "size legend title position" {
        Left => "left",
        Right => "right",
        Above => "above",
        Below => "below",
    }
}

string_enum! {
    /// Sort key for arrow charts.
    ArrowSort as "sort by" {
        End => "end",
        Start => "start",
        Difference => "difference",
        Change => "change",
    }
}

string_enum! {
    /// How the arrow chart's x-range is derived.
    RangeExtent as "range extent" {
        Nice => "nice",
        Custom => "custom",
        Data => "data",
    }
}

string_enum! {
    /// Panel layout mode for multiple-column charts.
    GridLayout as "grid layout" {
        FixedCount => "fixedCount",
        MinimumWidth => "minimumWidth",
    }
}

string_enum! {
    /// Sort key for multiple-column panels.
    PanelSort as "sort by" {
        Start => "start",
        End => "end",
        Range => "range",
        Diff => "diff",
        Change => "change",
        Title => "title",
    }
}

string_enum! {
    /// A plain on/off toggle serialized as a string.
    Toggle as "toggle" {
        On => "on",
        Off => "off",
    }
}

string_enum! {
    /// Declared data type of a table column.
    ColumnType as "column type" {
        Auto => "auto",
        Text => "text",
        Number => "number",
        Date => "date",
    }
}

string_enum! {
    /// How the chart's data reaches Datawrapper.
    UploadMethod as "upload method" {
        Copy => "copy",
        Upload => "upload",
        GoogleSpreadsheet => "google-spreadsheet",
        ExternalData => "external-data",
    }
}

/// Stroke width in pixels, restricted to the values the API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeWidth {
    Thin,
    Medium,
    Thick,
}

impl StrokeWidth {
    pub const fn as_px(&self) -> u8 {
        match self {
            StrokeWidth::Thin => 1,
            StrokeWidth::Medium => 2,
            StrokeWidth::Thick => 3,
        }
    }

    pub fn from_px(px: i64) -> Result<Self, Error> {
        match px {
            1 => Ok(StrokeWidth::Thin),
            2 => Ok(StrokeWidth::Medium),
            3 => Ok(StrokeWidth::Thick),
            other => Err(Error::validation(
                "stroke width",
                format!("{other} is not one of 1, 2, 3"),
            )),
        }
    }
}

impl Serialize for StrokeWidth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_px())
    }
}

impl<'de> Deserialize<'de> for StrokeWidth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        StrokeWidth::from_px(raw).map_err(D::Error::custom)
    }
}

/// Arrow head style on connector lines. `None` serializes as the literal
/// `false` the API uses for "no arrow head".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowHead {
    Lines,
    Triangle,
    None,
}

impl ArrowHead {
    pub fn to_wire(&self) -> Value {
        match self {
            ArrowHead::Lines => Value::String("lines".into()),
            ArrowHead::Triangle => Value::String("triangle".into()),
            ArrowHead::None => Value::Bool(false),
        }
    }
}

impl Serialize for ArrowHead {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArrowHead::Lines => serializer.serialize_str("lines"),
            ArrowHead::Triangle => serializer.serialize_str("triangle"),
            ArrowHead::None => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for ArrowHead {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) if s == "lines" => Ok(ArrowHead::Lines),
            Value::String(s) if s == "triangle" => Ok(ArrowHead::Triangle),
            Value::Bool(false) => Ok(ArrowHead::None),
            other => Err(D::Error::custom(Error::validation(
                "arrow head",
                format!("{other} is not one of \"lines\", \"triangle\", false"),
            ))),
        }
    }
}

/// Format-string constants for the free-format number and date fields.
///
/// The API accepts arbitrary format strings in these fields; the constants
/// below are the documented presets.
pub mod formats {
    pub mod number {
        pub const AUTO: &str = "auto";
        pub const INTEGER: &str = "0";
        pub const ONE_DECIMAL: &str = "0.0";
        pub const TWO_DECIMALS: &str = "0.00";
        pub const THREE_DECIMALS: &str = "0.000";
        pub const UP_TO_ONE_DECIMAL: &str = "0.[0]";
        pub const UP_TO_TWO_DECIMALS: &str = "0.[00]";
        pub const THOUSANDS_SEPARATOR: &str = "0,0";
        pub const THOUSANDS_WITH_OPTIONAL_DECIMALS: &str = "0,0.[00]";
        pub const PERCENT_INTEGER: &str = "0%";
        pub const PERCENT_ONE_DECIMAL: &str = "0.0%";
        pub const PERCENT_UP_TO_TWO_DECIMALS: &str = "0.[00]%";
        pub const ORDINAL: &str = "0o";
        pub const ABBREVIATED: &str = "0a";
        pub const ABBREVIATED_ONE_DECIMAL: &str = "0.[0]a";
        pub const PLUS_SIGN: &str = "+0";
        pub const CURRENCY_ABBREVIATED: &str = "$0.[00]a";
        pub const PARENTHESES_FOR_NEGATIVES: &str = "(0,0.00)";
        pub const SCIENTIFIC_NOTATION: &str = "0,0e+0";
    }

    pub mod date {
        pub const AUTO: &str = "auto";
        pub const YEAR_FULL: &str = "YYYY";
        pub const YEAR_TWO_DIGIT: &str = "YY";
        pub const YEAR_ABBREVIATED: &str = "'YY";
        pub const YEAR_ABBREVIATED_FIRST: &str = "YYYY~~'YY";
        pub const YEAR_QUARTER: &str = "YYYY [Q]Q";
        pub const MONTH_FULL: &str = "MMMM";
        pub const MONTH_ABBREVIATED: &str = "MMM";
        pub const MONTH_ABBREVIATED_WITH_YEAR: &str = "MMM 'YY";
        pub const YEAR_MONTH_MULTILINE: &str = "YYYY|MMM";
        pub const DAY: &str = "D";
        pub const DAY_PADDED: &str = "DD";
        pub const DAY_ORDINAL: &str = "Do";
        pub const MONTH_DAY_YEAR_FULL: &str = "MMMM D, YYYY";
        pub const DAY_OF_WEEK_FULL: &str = "dddd";
        pub const DAY_OF_WEEK_SHORT: &str = "ddd";
        pub const HOUR_MINUTE: &str = "HH:mm";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_literal_and_symbolic_name_are_interchangeable() {
        assert_eq!("style3".parse::<LineWidth>().unwrap(), LineWidth::Thick);
        assert_eq!(LineWidth::Thick.as_str(), "style3");
        assert_eq!("4x3".parse::<ReplaceFlags>().unwrap(), ReplaceFlags::FourByThree);
    }

    #[test]
    fn unknown_literal_lists_legal_set() {
        let err = "style9".parse::<LineDash>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("style9"), "{msg}");
        assert!(msg.contains("style1"), "{msg}");
        assert!(msg.contains("style4"), "{msg}");
    }

    #[test]
    fn grid_display_accepts_legacy_booleans() {
        assert_eq!(
            GridDisplay::from_wire(&serde_json::json!(true)).unwrap(),
            GridDisplay::On
        );
        assert_eq!(
            GridDisplay::from_wire(&serde_json::json!(false)).unwrap(),
            GridDisplay::Off
        );
        assert_eq!(
            GridDisplay::from_wire(&serde_json::json!("ticks")).unwrap(),
            GridDisplay::Ticks
        );
        assert!(GridDisplay::from_wire(&serde_json::json!("sideways")).is_err());
    }

    #[test]
    fn stroke_width_rejects_out_of_range() {
        assert!(StrokeWidth::from_px(4).is_err());
        assert_eq!(StrokeWidth::from_px(2).unwrap(), StrokeWidth::Medium);
    }

    #[test]
    fn arrow_head_false_means_none() {
        let head: ArrowHead = serde_json::from_value(serde_json::json!(false)).unwrap();
        assert_eq!(head, ArrowHead::None);
        assert_eq!(ArrowHead::None.to_wire(), serde_json::json!(false));
        assert!(serde_json::from_value::<ArrowHead>(serde_json::json!(true)).is_err());
    }

    #[test]
    fn enums_serialize_as_raw_literals() {
        assert_eq!(
            serde_json::to_value(Interpolation::MonotoneX).unwrap(),
            serde_json::json!("monotone-x")
        );
        assert_eq!(
            serde_json::to_value(StrokeWidth::Thick).unwrap(),
            serde_json::json!(3)
        );
    }
}
