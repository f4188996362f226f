//! Annotation and overlay entities shared by the chart models.
//!
//! On the wire these collections are UUID-keyed mappings when read back
//! from the API but are accepted as plain lists on writes. The model side
//! always uses ordered lists; reading merges each mapping key into its
//! entry as `id`, and writing emits a list whose elements are stamped with
//! a fresh short id, since the list form carries no durable identifier.
//!
//! Two conventions to be aware of:
//! - *Enabled by presence*: a [`ConnectorLine`] on a [`TextAnnotation`] is
//!   on because it exists. `None` serializes as `{"enabled": false}`, and
//!   constructing one from a mapping with `enabled: false` is a validation
//!   error — omission is the only way to disable it.
//! - [`RangeAnnotation`] requires different coordinates depending on its
//!   axis and display: a line needs the first coordinate of its axis, a
//!   range needs both. The wire `position` object only ever contains the
//!   coordinates that are set.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::charts::enums::{
    AnnotationAxis, AnnotationDisplay, ArrowHead, ConnectorLineType, Interpolation,
    OverlayPattern, OverlayType, StrokeType, StrokeWidth, SymbolDisplay, SymbolShape, SymbolStyle,
    TextAlign,
};
use crate::codecs::AxisValue;
use crate::error::{Error, Result};

/// A freshly generated identifier for a serialized annotation entry.
fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Normalize a wire collection into a flat list of entries.
///
/// A mapping becomes a list with each key merged into its entry as `id`
/// (iteration follows document order); a list passes through unchanged;
/// `null` or a missing value yields an empty list.
pub(crate) fn collection_entries(wire: Option<&Value>) -> Result<Vec<Value>> {
    match wire {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .map(|(id, entry)| {
                let mut entry = entry.clone();
                if let Some(obj) = entry.as_object_mut() {
                    obj.insert("id".into(), json!(id));
                }
                entry
            })
            .collect()),
        Some(other) => Err(Error::Response(format!(
            "annotation collection must be a mapping or list, got {other}"
        ))),
    }
}

/// Serialize a collection of entities as the list form the API accepts on
/// writes. Every element receives a fresh short id.
pub(crate) fn serialize_collection<T>(
    items: &[T],
    to_wire: impl Fn(&T) -> Result<Value>,
) -> Result<Value> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let mut wire = to_wire(item)?;
        if let Some(obj) = wire.as_object_mut() {
            obj.insert("id".into(), json!(short_id()));
        }
        out.push(wire);
    }
    Ok(Value::Array(out))
}

/// Move the keys of a nested `position` object up to the top level of an
/// entry, so wire entries and loose configs deserialize the same way.
fn flatten_position(entry: &mut Value) {
    let Some(obj) = entry.as_object_mut() else {
        return;
    };
    let Some(Value::Object(position)) = obj.remove("position") else {
        return;
    };
    for (key, value) in position {
        obj.entry(key).or_insert(value);
    }
}

/// The color of annotation text: either an explicit color string or the
/// theme default, which the API encodes as the literal `false`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TextColor {
    #[default]
    ThemeDefault,
    Color(String),
}

impl TextColor {
    pub fn to_wire(&self) -> Value {
        match self {
            TextColor::ThemeDefault => Value::Bool(false),
            TextColor::Color(c) => Value::String(c.clone()),
        }
    }
}

impl From<&str> for TextColor {
    fn from(color: &str) -> Self {
        TextColor::Color(color.to_string())
    }
}

impl<'de> Deserialize<'de> for TextColor {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(false) => Ok(TextColor::ThemeDefault),
            Value::String(s) => Ok(TextColor::Color(s)),
            other => Err(serde::de::Error::custom(format!(
                "text color must be a color string or false, got {other}"
            ))),
        }
    }
}

/// The line connecting a text annotation to the point it describes.
///
/// There is no `enabled` field: the object's presence is what enables it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorLine {
    pub line_type: ConnectorLineType,
    pub circle: bool,
    pub stroke: StrokeWidth,
    pub arrow_head: ArrowHead,
    /// Circle outline style; only `solid` and `dashed` are accepted here.
    pub circle_style: StrokeType,
    pub circle_radius: i64,
    pub inherit_color: bool,
    pub target_padding: i64,
}

impl Default for ConnectorLine {
    fn default() -> Self {
        ConnectorLine {
            line_type: ConnectorLineType::Straight,
            circle: false,
            stroke: StrokeWidth::Thin,
            arrow_head: ArrowHead::Lines,
            circle_style: StrokeType::Solid,
            circle_radius: 15,
            inherit_color: false,
            target_padding: 4,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct ConnectorLineConfig {
    enabled: Option<bool>,
    #[serde(rename = "type", alias = "line_type")]
    line_type: ConnectorLineType,
    circle: bool,
    stroke: StrokeWidth,
    #[serde(rename = "arrowHead", alias = "arrow_head")]
    arrow_head: ArrowHead,
    #[serde(rename = "circleStyle", alias = "circle_style")]
    circle_style: StrokeType,
    #[serde(rename = "circleRadius", alias = "circle_radius")]
    circle_radius: i64,
    #[serde(rename = "inheritColor", alias = "inherit_color")]
    inherit_color: bool,
    #[serde(rename = "targetPadding", alias = "target_padding")]
    target_padding: i64,
}

impl Default for ConnectorLineConfig {
    fn default() -> Self {
        let d = ConnectorLine::default();
        ConnectorLineConfig {
            enabled: None,
            line_type: d.line_type,
            circle: d.circle,
            stroke: d.stroke,
            arrow_head: d.arrow_head,
            circle_style: d.circle_style,
            circle_radius: d.circle_radius,
            inherit_color: d.inherit_color,
            target_padding: d.target_padding,
        }
    }
}

impl<'de> Deserialize<'de> for ConnectorLine {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let config = ConnectorLineConfig::deserialize(deserializer)?;
        if config.enabled == Some(false) {
            return Err(serde::de::Error::custom(
                "connector line cannot be constructed with enabled=false; \
                 omit the connector line entirely to disable it",
            ));
        }
        if config.circle_style == StrokeType::Dotted {
            return Err(serde::de::Error::custom(
                "invalid circle style: dotted; must be solid or dashed",
            ));
        }
        Ok(ConnectorLine {
            line_type: config.line_type,
            circle: config.circle,
            stroke: config.stroke,
            arrow_head: config.arrow_head,
            circle_style: config.circle_style,
            circle_radius: config.circle_radius,
            inherit_color: config.inherit_color,
            target_padding: config.target_padding,
        })
    }
}

impl ConnectorLine {
    /// Build from a loose mapping. `enabled: false` is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::validation("connector_line", e.to_string()))
    }

    /// The wire object, with `enabled: true` forced by presence.
    pub fn to_wire(&self) -> Value {
        json!({
            "type": self.line_type.as_str(),
            "circle": self.circle,
            "stroke": self.stroke.as_px(),
            "enabled": true,
            "arrowHead": self.arrow_head.to_wire(),
            "circleStyle": self.circle_style.as_str(),
            "circleRadius": self.circle_radius,
            "inheritColor": self.inherit_color,
            "targetPadding": self.target_padding,
        })
    }
}

/// A free-text annotation placed at a position on the chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextAnnotation {
    /// Wire identifier; populated when reading from the API, never set by
    /// hand and regenerated on every write.
    pub id: Option<String>,
    /// Whether to draw a text outline (`bg` on the wire).
    #[serde(rename = "bg", alias = "outline")]
    pub outline: bool,
    pub dx: i64,
    pub dy: i64,
    pub bold: bool,
    pub size: i64,
    pub text: String,
    pub align: TextAlign,
    pub color: TextColor,
    /// Text width as a percentage of the chart width (0–100).
    pub width: f64,
    pub italic: bool,
    pub x: AxisValue,
    pub y: AxisValue,
    pub underline: bool,
    #[serde(rename = "showMobile", alias = "show_mobile")]
    pub show_mobile: bool,
    #[serde(rename = "showDesktop", alias = "show_desktop")]
    pub show_desktop: bool,
    /// `None` means no connector line; presence enables it.
    #[serde(rename = "connectorLine", alias = "connector_line")]
    pub connector_line: Option<ConnectorLine>,
    #[serde(rename = "mobileFallback", alias = "mobile_fallback")]
    pub mobile_fallback: bool,
}

impl Default for TextAnnotation {
    fn default() -> Self {
        TextAnnotation {
            id: None,
            outline: true,
            dx: 0,
            dy: 0,
            bold: false,
            size: 14,
            text: String::new(),
            align: TextAlign::TopLeft,
            color: TextColor::ThemeDefault,
            width: 33.3,
            italic: false,
            x: AxisValue::unset(),
            y: AxisValue::unset(),
            underline: false,
            show_mobile: true,
            show_desktop: true,
            connector_line: None,
            mobile_fallback: false,
        }
    }
}

impl TextAnnotation {
    pub fn new(x: impl Into<AxisValue>, y: impl Into<AxisValue>, text: impl Into<String>) -> Self {
        TextAnnotation {
            x: x.into(),
            y: y.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Build from a loose mapping, with the same validation as typed
    /// construction.
    pub fn from_value(value: Value) -> Result<Self> {
        let annotation: TextAnnotation = serde_json::from_value(value)
            .map_err(|e| Error::validation("text_annotations", e.to_string()))?;
        annotation.validate()?;
        Ok(annotation)
    }

    pub fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            return Err(Error::validation("text", "annotation text must not be empty"));
        }
        if !(0.0..=100.0).contains(&self.width) {
            return Err(Error::validation(
                "width",
                format!("{} is not between 0.0 and 100.0", self.width),
            ));
        }
        Ok(())
    }

    pub fn to_wire(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({
            "bg": self.outline,
            "dx": self.dx,
            "dy": self.dy,
            "bold": self.bold,
            "size": self.size,
            "text": self.text,
            "align": self.align.as_str(),
            "color": self.color.to_wire(),
            "width": self.width,
            "italic": self.italic,
            "position": {"x": self.x, "y": self.y},
            "underline": self.underline,
            "showMobile": self.show_mobile,
            "showDesktop": self.show_desktop,
            "connectorLine": match &self.connector_line {
                Some(line) => line.to_wire(),
                None => json!({"enabled": false}),
            },
            "mobileFallback": self.mobile_fallback,
        }))
    }

    /// One entry off the wire: position flattened, connector line resolved
    /// by the enabled-by-presence rule (`enabled: false` or missing means
    /// no connector line, not an error).
    fn from_entry(mut entry: Value) -> Result<Self> {
        flatten_position(&mut entry);
        if let Some(obj) = entry.as_object_mut() {
            let disabled = obj
                .get("connectorLine")
                .and_then(Value::as_object)
                .map(|c| !c.get("enabled").and_then(Value::as_bool).unwrap_or(false))
                .unwrap_or(false);
            if disabled {
                obj.remove("connectorLine");
            }
        }
        Self::from_value(entry)
    }

    /// Deserialize a whole wire collection (mapping, list or null).
    pub fn deserialize_collection(wire: Option<&Value>) -> Result<Vec<Self>> {
        collection_entries(wire)?
            .into_iter()
            .map(Self::from_entry)
            .collect()
    }
}

/// A highlighted line or shaded band across one axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RangeAnnotation {
    pub id: Option<String>,
    /// Which axis the annotation spans (`type` on the wire).
    #[serde(rename = "type", alias = "axis")]
    pub axis: AnnotationAxis,
    pub color: String,
    pub display: AnnotationDisplay,
    /// Opacity in percent (0–100).
    pub opacity: i64,
    pub x0: Option<AxisValue>,
    pub x1: Option<AxisValue>,
    pub y0: Option<AxisValue>,
    pub y1: Option<AxisValue>,
    #[serde(rename = "strokeType", alias = "stroke_type")]
    pub stroke_type: StrokeType,
    #[serde(rename = "strokeWidth", alias = "stroke_width")]
    pub stroke_width: StrokeWidth,
}

impl Default for RangeAnnotation {
    fn default() -> Self {
        RangeAnnotation {
            id: None,
            axis: AnnotationAxis::X,
            color: "#989898".to_string(),
            display: AnnotationDisplay::Range,
            opacity: 50,
            x0: None,
            x1: None,
            y0: None,
            y1: None,
            stroke_type: StrokeType::Solid,
            stroke_width: StrokeWidth::Medium,
        }
    }
}

impl RangeAnnotation {
    /// A vertical line at `x0`.
    pub fn x_line(x0: impl Into<AxisValue>) -> Self {
        RangeAnnotation {
            axis: AnnotationAxis::X,
            display: AnnotationDisplay::Line,
            x0: Some(x0.into()),
            ..Default::default()
        }
    }

    /// A shaded band between `x0` and `x1`.
    pub fn x_range(x0: impl Into<AxisValue>, x1: impl Into<AxisValue>) -> Self {
        RangeAnnotation {
            axis: AnnotationAxis::X,
            display: AnnotationDisplay::Range,
            x0: Some(x0.into()),
            x1: Some(x1.into()),
            ..Default::default()
        }
    }

    /// A horizontal line at `y0`.
    pub fn y_line(y0: impl Into<AxisValue>) -> Self {
        RangeAnnotation {
            axis: AnnotationAxis::Y,
            display: AnnotationDisplay::Line,
            y0: Some(y0.into()),
            ..Default::default()
        }
    }

    /// A shaded band between `y0` and `y1`.
    pub fn y_range(y0: impl Into<AxisValue>, y1: impl Into<AxisValue>) -> Self {
        RangeAnnotation {
            axis: AnnotationAxis::Y,
            display: AnnotationDisplay::Range,
            y0: Some(y0.into()),
            y1: Some(y1.into()),
            ..Default::default()
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let annotation: RangeAnnotation = serde_json::from_value(value)
            .map_err(|e| Error::validation("range_annotations", e.to_string()))?;
        annotation.validate()?;
        Ok(annotation)
    }

    /// Which coordinates are required depends on axis × display.
    pub fn validate(&self) -> Result<()> {
        if !(0..=100).contains(&self.opacity) {
            return Err(Error::validation(
                "opacity",
                format!("{} is not between 0 and 100", self.opacity),
            ));
        }
        let missing = match (self.axis, self.display) {
            (AnnotationAxis::X, AnnotationDisplay::Line) => {
                self.x0.is_none().then_some("x0")
            }
            (AnnotationAxis::X, AnnotationDisplay::Range) => {
                (self.x0.is_none() || self.x1.is_none()).then_some("x0 and x1")
            }
            (AnnotationAxis::Y, AnnotationDisplay::Line) => {
                self.y0.is_none().then_some("y0")
            }
            (AnnotationAxis::Y, AnnotationDisplay::Range) => {
                (self.y0.is_none() || self.y1.is_none()).then_some("y0 and y1")
            }
        };
        if let Some(fields) = missing {
            return Err(Error::validation(
                "position",
                format!(
                    "a {} annotation on the {} axis requires {fields}",
                    self.display, self.axis
                ),
            ));
        }
        Ok(())
    }

    /// Wire object; the `position` includes only the coordinates that are
    /// set, never null-valued keys.
    pub fn to_wire(&self) -> Result<Value> {
        self.validate()?;
        let mut position = Map::new();
        for (key, value) in [
            ("x0", &self.x0),
            ("x1", &self.x1),
            ("y0", &self.y0),
            ("y1", &self.y1),
        ] {
            if let Some(value) = value {
                position.insert(key.into(), serde_json::to_value(value)?);
            }
        }
        Ok(json!({
            "type": self.axis.as_str(),
            "color": self.color,
            "display": self.display.as_str(),
            "opacity": self.opacity,
            "position": position,
            "strokeType": self.stroke_type.as_str(),
            "strokeWidth": self.stroke_width.as_px(),
        }))
    }

    fn from_entry(mut entry: Value) -> Result<Self> {
        flatten_position(&mut entry);
        Self::from_value(entry)
    }

    pub fn deserialize_collection(wire: Option<&Value>) -> Result<Vec<Self>> {
        collection_entries(wire)?
            .into_iter()
            .map(Self::from_entry)
            .collect()
    }
}

/// A custom fill between two lines on a line chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaFill {
    pub id: Option<String>,
    /// Column the fill starts at (`from` on the wire).
    #[serde(rename = "from", alias = "from_column")]
    pub from_column: String,
    /// Column the fill extends to (`to` on the wire).
    #[serde(rename = "to", alias = "to_column")]
    pub to_column: String,
    pub color: String,
    /// Fill opacity between 0 and 1.
    pub opacity: f64,
    #[serde(rename = "useMixedColors", alias = "use_mixed_colors")]
    pub use_mixed_colors: bool,
    /// Fill color where the range is negative; setting it turns on
    /// `use_mixed_colors` unless the caller set that flag explicitly.
    #[serde(rename = "colorNegative", alias = "color_negative")]
    pub color_negative: Option<String>,
    pub interpolation: Interpolation,
}

impl Default for AreaFill {
    fn default() -> Self {
        AreaFill {
            id: None,
            from_column: String::new(),
            to_column: String::new(),
            color: "#4682b4".to_string(),
            opacity: 0.3,
            use_mixed_colors: false,
            color_negative: None,
            interpolation: Interpolation::Linear,
        }
    }
}

impl AreaFill {
    pub fn new(from_column: impl Into<String>, to_column: impl Into<String>) -> Self {
        AreaFill {
            from_column: from_column.into(),
            to_column: to_column.into(),
            ..Default::default()
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let mixed_colors_given = value
            .as_object()
            .map(|obj| obj.contains_key("use_mixed_colors") || obj.contains_key("useMixedColors"))
            .unwrap_or(false);
        let mut fill: AreaFill = serde_json::from_value(value)
            .map_err(|e| Error::validation("area_fills", e.to_string()))?;
        if fill.color_negative.is_some() && !mixed_colors_given {
            fill.use_mixed_colors = true;
        }
        fill.validate()?;
        Ok(fill)
    }

    pub fn validate(&self) -> Result<()> {
        if self.from_column.is_empty() || self.to_column.is_empty() {
            return Err(Error::validation(
                "area_fills",
                "an area fill requires both a from and a to column",
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::validation(
                "opacity",
                format!("{} is not between 0.0 and 1.0", self.opacity),
            ));
        }
        Ok(())
    }

    pub fn to_wire(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({
            "from": self.from_column,
            "to": self.to_column,
            "color": self.color,
            "opacity": self.opacity,
            "useMixedColors": self.use_mixed_colors,
            "colorNegative": self.color_negative.clone().unwrap_or_default(),
            "interpolation": self.interpolation.as_str(),
        }))
    }

    fn from_entry(entry: Value) -> Result<Self> {
        Self::from_value(entry)
    }

    pub fn deserialize_collection(wire: Option<&Value>) -> Result<Vec<Self>> {
        collection_entries(wire)?
            .into_iter()
            .map(Self::from_entry)
            .collect()
    }
}

/// A value marker or range band overlaid on a bar chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarOverlay {
    #[serde(rename = "type", alias = "overlay_type")]
    pub overlay_type: OverlayType,
    /// Title in tooltips and the color key; defaults to the column name.
    pub title: String,
    /// Column the overlay labels or draws ranges to (`to` on the wire).
    #[serde(rename = "to", alias = "to_column")]
    pub to_column: String,
    /// Column ranges start from; the provider's zero-baseline sentinel by
    /// default.
    #[serde(rename = "from", alias = "from_column")]
    pub from_column: String,
    pub color: String,
    pub opacity: f64,
    /// Fill pattern when the overlay type is `range`.
    pub pattern: OverlayPattern,
    #[serde(rename = "showInColorKey", alias = "show_in_color_key")]
    pub show_in_color_key: bool,
    #[serde(rename = "labelDirectly", alias = "label_directly")]
    pub label_directly: bool,
}

impl Default for BarOverlay {
    fn default() -> Self {
        BarOverlay {
            overlay_type: OverlayType::Value,
            title: String::new(),
            to_column: String::new(),
            from_column: "--zero-baseline--".to_string(),
            color: "#4682b4".to_string(),
            opacity: 0.6,
            pattern: OverlayPattern::Solid,
            show_in_color_key: true,
            label_directly: true,
        }
    }
}

impl BarOverlay {
    pub fn new(to_column: impl Into<String>) -> Self {
        BarOverlay {
            to_column: to_column.into(),
            ..Default::default()
        }
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let overlay: BarOverlay = serde_json::from_value(value)
            .map_err(|e| Error::validation("overlays", e.to_string()))?;
        overlay.validate()?;
        Ok(overlay)
    }

    pub fn validate(&self) -> Result<()> {
        if self.to_column.is_empty() {
            return Err(Error::validation("to", "an overlay requires a to column"));
        }
        Ok(())
    }

    pub fn to_wire(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({
            "type": self.overlay_type.as_str(),
            "title": self.title,
            "to": self.to_column,
            "from": self.from_column,
            "color": self.color,
            "opacity": self.opacity,
            "pattern": self.pattern.as_str(),
            "showInColorKey": self.show_in_color_key,
            "labelDirectly": self.label_directly,
        }))
    }

    pub fn deserialize_collection(wire: Option<&Value>) -> Result<Vec<Self>> {
        collection_entries(wire)?
            .into_iter()
            .map(Self::from_value)
            .collect()
    }
}

/// Symbols drawn on a line; presence enables them.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSymbols {
    pub shape: SymbolShape,
    pub style: SymbolStyle,
    pub on: SymbolDisplay,
    pub size: f64,
    /// Opacity between 0 and 1.
    pub opacity: f64,
}

#[derive(Deserialize)]
#[serde(default)]
struct LineSymbolsConfig {
    enabled: Option<bool>,
    shape: SymbolShape,
    style: SymbolStyle,
    on: SymbolDisplay,
    size: f64,
    opacity: f64,
}

impl Default for LineSymbolsConfig {
    fn default() -> Self {
        let d = LineSymbols::default();
        LineSymbolsConfig {
            enabled: None,
            shape: d.shape,
            style: d.style,
            on: d.on,
            size: d.size,
            opacity: d.opacity,
        }
    }
}

impl<'de> Deserialize<'de> for LineSymbols {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let config = LineSymbolsConfig::deserialize(deserializer)?;
        if config.enabled == Some(false) {
            return Err(serde::de::Error::custom(
                "symbols cannot be constructed with enabled=false; \
                 omit the symbols field entirely to disable them",
            ));
        }
        Ok(LineSymbols {
            shape: config.shape,
            style: config.style,
            on: config.on,
            size: config.size,
            opacity: config.opacity,
        })
    }
}

impl Default for LineSymbols {
    fn default() -> Self {
        LineSymbols {
            shape: SymbolShape::Circle,
            style: SymbolStyle::Fill,
            on: SymbolDisplay::Last,
            size: 6.0,
            opacity: 1.0,
        }
    }
}

impl LineSymbols {
    pub fn to_wire(&self) -> Value {
        json!({
            "enabled": true,
            "shape": self.shape.as_str(),
            "style": self.style.as_str(),
            "on": self.on.as_str(),
            "size": self.size,
            "opacity": self.opacity,
        })
    }

    /// `enabled: false` or a missing object means no symbols.
    pub fn from_wire(wire: Option<&Value>) -> Result<Option<Self>> {
        let Some(obj) = wire.and_then(Value::as_object) else {
            return Ok(None);
        };
        if !obj.get("enabled").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(None);
        }
        let mut entry = Value::Object(obj.clone());
        if let Some(map) = entry.as_object_mut() {
            map.remove("enabled");
        }
        serde_json::from_value(entry)
            .map(Some)
            .map_err(|e| Error::validation("symbols", e.to_string()))
    }
}

/// Per-line value labels; presence enables them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineValueLabels {
    pub first: bool,
    pub last: bool,
    pub show_circles: bool,
    pub max_inner_labels: i64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LineValueLabelsConfig {
    enabled: Option<bool>,
    first: bool,
    last: bool,
    #[serde(rename = "showCircles", alias = "show_circles")]
    show_circles: bool,
    #[serde(rename = "maxInnerLabels", alias = "max_inner_labels")]
    max_inner_labels: i64,
}

impl<'de> Deserialize<'de> for LineValueLabels {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let config = LineValueLabelsConfig::deserialize(deserializer)?;
        if config.enabled == Some(false) {
            return Err(serde::de::Error::custom(
                "value labels cannot be constructed with enabled=false; \
                 omit the value labels field entirely to disable them",
            ));
        }
        Ok(LineValueLabels {
            first: config.first,
            last: config.last,
            show_circles: config.show_circles,
            max_inner_labels: config.max_inner_labels,
        })
    }
}

impl LineValueLabels {
    pub fn to_wire(&self) -> Value {
        json!({
            "enabled": true,
            "first": self.first,
            "last": self.last,
            "showCircles": self.show_circles,
            "maxInnerLabels": self.max_inner_labels,
        })
    }

    pub fn from_wire(wire: Option<&Value>) -> Result<Option<Self>> {
        let Some(obj) = wire.and_then(Value::as_object) else {
            return Ok(None);
        };
        if !obj.get("enabled").and_then(Value::as_bool).unwrap_or(false) {
            return Ok(None);
        }
        let mut entry = Value::Object(obj.clone());
        if let Some(map) = entry.as_object_mut() {
            map.remove("enabled");
        }
        serde_json::from_value(entry)
            .map(Some)
            .map_err(|e| Error::validation("value_labels", e.to_string()))
    }
}

/// A text annotation scoped to one panel of a multi-panel chart.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct PlotTextAnnotation {
    #[serde(flatten)]
    pub annotation: TextAnnotation,
    /// The panel this annotation belongs to; `None` leaves placement to
    /// the provider.
    pub plot: Option<String>,
    #[serde(rename = "showInAllPlots", alias = "show_in_all_plots")]
    pub show_in_all_plots: bool,
}

impl PlotTextAnnotation {
    pub fn from_value(value: Value) -> Result<Self> {
        let annotation: PlotTextAnnotation = serde_json::from_value(value)
            .map_err(|e| Error::validation("text_annotations", e.to_string()))?;
        annotation.annotation.validate()?;
        Ok(annotation)
    }

    /// The base wire object plus `plot` inside `position` and
    /// `showInAllPlots` at the top level.
    pub fn to_wire(&self) -> Result<Value> {
        let mut wire = self.annotation.to_wire()?;
        if let Some(plot) = &self.plot {
            wire["position"]["plot"] = json!(plot);
        }
        wire["showInAllPlots"] = json!(self.show_in_all_plots);
        Ok(wire)
    }

    fn from_entry(mut entry: Value) -> Result<Self> {
        flatten_position(&mut entry);
        if let Some(obj) = entry.as_object_mut() {
            let disabled = obj
                .get("connectorLine")
                .and_then(Value::as_object)
                .map(|c| !c.get("enabled").and_then(Value::as_bool).unwrap_or(false))
                .unwrap_or(false);
            if disabled {
                obj.remove("connectorLine");
            }
        }
        Self::from_value(entry)
    }

    pub fn deserialize_collection(wire: Option<&Value>) -> Result<Vec<Self>> {
        collection_entries(wire)?
            .into_iter()
            .map(Self::from_entry)
            .collect()
    }
}

/// A range annotation scoped to one panel of a multi-panel chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotRangeAnnotation {
    #[serde(flatten)]
    pub annotation: RangeAnnotation,
    pub plot: Option<String>,
    #[serde(rename = "showInAllPlots", alias = "show_in_all_plots")]
    pub show_in_all_plots: bool,
}

impl Default for PlotRangeAnnotation {
    fn default() -> Self {
        PlotRangeAnnotation {
            annotation: RangeAnnotation::default(),
            plot: None,
            show_in_all_plots: true,
        }
    }
}

impl PlotRangeAnnotation {
    pub fn from_value(value: Value) -> Result<Self> {
        let annotation: PlotRangeAnnotation = serde_json::from_value(value)
            .map_err(|e| Error::validation("range_annotations", e.to_string()))?;
        annotation.annotation.validate()?;
        Ok(annotation)
    }

    pub fn to_wire(&self) -> Result<Value> {
        let mut wire = self.annotation.to_wire()?;
        if let Some(plot) = &self.plot {
            wire["position"]["plot"] = json!(plot);
        }
        wire["showInAllPlots"] = json!(self.show_in_all_plots);
        Ok(wire)
    }

    fn from_entry(mut entry: Value) -> Result<Self> {
        flatten_position(&mut entry);
        Self::from_value(entry)
    }

    pub fn deserialize_collection(wire: Option<&Value>) -> Result<Vec<Self>> {
        collection_entries(wire)?
            .into_iter()
            .map(Self::from_entry)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connector_line_enabled_false_is_rejected() {
        let err = ConnectorLine::from_value(json!({"enabled": false})).unwrap_err();
        assert!(err.to_string().contains("omit the connector line"));
    }

    #[test]
    fn connector_line_enabled_true_is_accepted() {
        let line = ConnectorLine::from_value(json!({"enabled": true, "type": "curveRight"})).unwrap();
        assert_eq!(line.line_type, ConnectorLineType::CurveRight);
        assert_eq!(line.to_wire()["enabled"], json!(true));
    }

    #[test]
    fn connector_line_dotted_circle_style_is_rejected() {
        assert!(ConnectorLine::from_value(json!({"circleStyle": "dotted"})).is_err());
    }

    #[test]
    fn missing_connector_line_serializes_disabled() {
        let anno = TextAnnotation::new(0, 0, "Hello");
        let wire = anno.to_wire().unwrap();
        assert_eq!(wire["connectorLine"], json!({"enabled": false}));
    }

    #[test]
    fn wire_connector_with_enabled_false_deserializes_to_none() {
        let wire = json!({
            "abc123": {
                "text": "note",
                "position": {"x": 1, "y": 2},
                "connectorLine": {"enabled": false, "type": "straight"},
            }
        });
        let annos = TextAnnotation::deserialize_collection(Some(&wire)).unwrap();
        assert_eq!(annos.len(), 1);
        assert_eq!(annos[0].id.as_deref(), Some("abc123"));
        assert_eq!(annos[0].x, AxisValue::Int(1));
        assert!(annos[0].connector_line.is_none());
    }

    #[test]
    fn collection_mapping_keys_become_ids_in_order() {
        let wire = json!({
            "k1": {"text": "a", "position": {"x": 0, "y": 0}},
            "k2": {"text": "b", "position": {"x": 1, "y": 1}},
        });
        let annos = TextAnnotation::deserialize_collection(Some(&wire)).unwrap();
        let ids: Vec<_> = annos.iter().map(|a| a.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["k1", "k2"]);
    }

    #[test]
    fn collection_serializes_as_list_with_fresh_ids() {
        let annos = vec![
            TextAnnotation::new(0, 0, "a"),
            TextAnnotation::new(1, 1, "b"),
        ];
        let wire = serialize_collection(&annos, TextAnnotation::to_wire).unwrap();
        let items = wire.as_array().expect("list, not mapping");
        assert_eq!(items.len(), 2);
        let id0 = items[0]["id"].as_str().unwrap();
        let id1 = items[1]["id"].as_str().unwrap();
        assert_eq!(id0.len(), 8);
        assert_ne!(id0, id1);
    }

    #[test]
    fn null_collection_is_empty() {
        assert!(TextAnnotation::deserialize_collection(None).unwrap().is_empty());
        assert!(
            TextAnnotation::deserialize_collection(Some(&Value::Null))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn range_annotation_conditional_bounds() {
        // An x line needs only x0.
        assert!(RangeAnnotation::x_line(5).validate().is_ok());
        // An x range with only x0 is invalid.
        let partial = RangeAnnotation {
            axis: AnnotationAxis::X,
            display: AnnotationDisplay::Range,
            x0: Some(5.into()),
            ..Default::default()
        };
        let err = partial.validate().unwrap_err();
        assert!(err.to_string().contains("x0 and x1"), "{err}");
    }

    #[test]
    fn range_annotation_position_omits_null_keys() {
        let wire = RangeAnnotation::x_line(AxisValue::Int(3)).to_wire().unwrap();
        assert_eq!(wire["position"], json!({"x0": 3}));

        let wire = RangeAnnotation::x_range(0, 10).to_wire().unwrap();
        assert_eq!(wire["position"], json!({"x0": 0, "x1": 10}));
    }

    #[test]
    fn range_annotation_opacity_bounds() {
        let mut anno = RangeAnnotation::y_line(1);
        anno.opacity = 150;
        assert!(anno.validate().is_err());
    }

    #[test]
    fn area_fill_negative_color_enables_mixed_colors() {
        let fill = AreaFill::from_value(json!({
            "from": "baseline",
            "to": "value",
            "colorNegative": "#0000ff",
        }))
        .unwrap();
        assert!(fill.use_mixed_colors);

        // An explicit caller choice wins over the derivation.
        let fill = AreaFill::from_value(json!({
            "from": "baseline",
            "to": "value",
            "colorNegative": "#0000ff",
            "useMixedColors": false,
        }))
        .unwrap();
        assert!(!fill.use_mixed_colors);
    }

    #[test]
    fn area_fill_opacity_bounds() {
        assert!(
            AreaFill::from_value(json!({"from": "a", "to": "b", "opacity": 1.1})).is_err()
        );
        assert!(
            AreaFill::from_value(json!({"from": "a", "to": "b", "opacity": 0.0})).is_ok()
        );
    }

    #[test]
    fn bar_overlay_defaults_to_zero_baseline() {
        let overlay = BarOverlay::new("turnout");
        assert_eq!(overlay.from_column, "--zero-baseline--");
        let wire = overlay.to_wire().unwrap();
        assert_eq!(wire["from"], json!("--zero-baseline--"));
        assert_eq!(wire["type"], json!("value"));
    }

    #[test]
    fn plot_annotation_carries_panel_in_position() {
        let anno = PlotTextAnnotation {
            annotation: TextAnnotation::new(2, 3, "peak"),
            plot: Some("Paris".to_string()),
            show_in_all_plots: false,
        };
        let wire = anno.to_wire().unwrap();
        assert_eq!(wire["position"]["plot"], json!("Paris"));
        assert_eq!(wire["showInAllPlots"], json!(false));

        let collection = json!({
            "u1": {
                "text": "peak",
                "position": {"x": 2, "y": 3, "plot": "Paris"},
                "showInAllPlots": true,
            }
        });
        let parsed = PlotTextAnnotation::deserialize_collection(Some(&collection)).unwrap();
        assert_eq!(parsed[0].plot.as_deref(), Some("Paris"));
        assert!(parsed[0].show_in_all_plots);
    }

    #[test]
    fn loose_mapping_and_typed_construction_agree() {
        let typed = TextAnnotation::new(1, 2, "note");
        let loose = TextAnnotation::from_value(json!({"x": 1, "y": 2, "text": "note"})).unwrap();
        assert_eq!(typed, loose);

        let err = TextAnnotation::from_value(json!({"x": 1, "y": 2, "text": ""})).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }
}
