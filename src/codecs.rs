//! Primitive codecs between model values and Datawrapper wire values.
//!
//! Each codec is a pair of pure `serialize`/`deserialize` functions with no
//! shared state. They cover the spots where the API's representation differs
//! from the model's: comma-joined tick lists, two-element ranges with `""`
//! as the "unset" sentinel, `{enabled, value}` / `{enabled, style}` nested
//! objects collapsed to a single optional field, the `color-category`
//! object with its sparse overlay keys, and the three `plotHeight*` fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::charts::enums::{PlotHeightMode, ReplaceFlags, ValueLabelDisplay, ValueLabelPlacement};
use crate::error::Result;

/// A scalar that can sit on either a numeric or a categorical/date axis.
///
/// Positions, ticks and range bounds accept numbers and strings alike; the
/// empty string doubles as the "unset" sentinel for range bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl AxisValue {
    /// The `""` sentinel used for unset range bounds.
    pub fn unset() -> Self {
        AxisValue::Text(String::new())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, AxisValue::Text(s) if s.is_empty())
    }

    /// Reinterpret a JSON value, keeping numbers as numbers and parsing
    /// numeric strings (whole-valued floats are promoted to integers).
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AxisValue::Int(i)
                } else {
                    AxisValue::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            Value::String(s) if s.is_empty() => AxisValue::unset(),
            Value::String(s) => match s.parse::<f64>() {
                Ok(num) if num.fract() == 0.0 && num.is_finite() => AxisValue::Int(num as i64),
                Ok(num) => AxisValue::Float(num),
                Err(_) => AxisValue::Text(s.clone()),
            },
            Value::Bool(b) => AxisValue::Text(b.to_string()),
            _ => AxisValue::unset(),
        }
    }
}

impl std::fmt::Display for AxisValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisValue::Int(i) => write!(f, "{i}"),
            AxisValue::Float(x) => write!(f, "{x}"),
            AxisValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for AxisValue {
    fn from(v: i64) -> Self {
        AxisValue::Int(v)
    }
}

impl From<f64> for AxisValue {
    fn from(v: f64) -> Self {
        AxisValue::Float(v)
    }
}

impl From<&str> for AxisValue {
    fn from(v: &str) -> Self {
        AxisValue::Text(v.to_string())
    }
}

impl From<String> for AxisValue {
    fn from(v: String) -> Self {
        AxisValue::Text(v)
    }
}

/// Custom tick marks: an ordered sequence in the model, a single
/// comma-joined string on the wire.
pub mod ticks {
    use super::*;

    /// Join tick values with `,` for the API. An empty list yields `""`.
    pub fn serialize(ticks: &[AxisValue]) -> String {
        ticks
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Split a comma-joined tick string back into values.
    ///
    /// Tokens are trimmed and numeric-parsed, with whole-valued floats
    /// promoted to integers. Two exceptions keep round trips honest on
    /// date-ish axes: a token of exactly four digits (a year such as
    /// `"2020"`) stays a string rather than being coerced to a number,
    /// and anything that fails to parse passes through unchanged. An
    /// empty input yields an empty list.
    pub fn deserialize(ticks: &str) -> Vec<AxisValue> {
        if ticks.is_empty() {
            return Vec::new();
        }
        ticks
            .split(',')
            .map(|raw| {
                let token = raw.trim();
                if token.is_empty() {
                    return AxisValue::Text(String::new());
                }
                if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
                    return AxisValue::Text(token.to_string());
                }
                match token.parse::<f64>() {
                    Ok(num) if num.fract() == 0.0 && num.is_finite() => {
                        AxisValue::Int(num as i64)
                    }
                    Ok(num) => AxisValue::Float(num),
                    Err(_) => AxisValue::Text(token.to_string()),
                }
            })
            .collect()
    }
}

/// A custom axis range: an ordered `[min, max]` pair where the empty
/// string means "unset bound".
pub mod range {
    use super::*;

    /// Emit the two-element array the API expects. Anything that is not a
    /// well-formed pair collapses to `["", ""]`.
    pub fn serialize(range: &[AxisValue; 2]) -> Value {
        json!([wire_bound(&range[0]), wire_bound(&range[1])])
    }

    fn wire_bound(bound: &AxisValue) -> Value {
        match bound {
            AxisValue::Int(i) => json!(i),
            AxisValue::Float(x) => json!(x),
            AxisValue::Text(s) => json!(s),
        }
    }

    /// Read a range off the wire. Total over malformed input: `null` or a
    /// missing value becomes `["", ""]`, short arrays are padded, long
    /// arrays truncated to two elements, and numeric strings are parsed.
    pub fn deserialize(value: Option<&Value>) -> [AxisValue; 2] {
        let mut out = [AxisValue::unset(), AxisValue::unset()];
        let Some(Value::Array(items)) = value else {
            return out;
        };
        for (slot, item) in out.iter_mut().zip(items.iter()) {
            *slot = AxisValue::from_wire(item);
        }
        out
    }
}

/// The `{enabled, value}` object used for on/off settings that carry a
/// payload, such as `negativeColor`. `None` in the model means disabled.
pub mod enable_value {
    use super::*;

    pub fn serialize(value: Option<&str>) -> Value {
        json!({
            "value": value.unwrap_or(""),
            "enabled": value.is_some(),
        })
    }

    pub fn deserialize(wire: Option<&Value>) -> Option<String> {
        let obj = wire?.as_object()?;
        if !obj.get("enabled").and_then(Value::as_bool).unwrap_or(false) {
            return None;
        }
        Some(obj.get("value")?.as_str()?.to_string())
    }
}

/// The `{enabled, style}` object behind `replace-flags`. The model folds
/// it into a single [`ReplaceFlags`] value with `off` as disabled.
pub mod replace_flags {
    use super::*;

    pub fn serialize(flags: &ReplaceFlags) -> Value {
        match flags {
            ReplaceFlags::Off => json!({"enabled": false, "style": ""}),
            style => json!({"enabled": true, "style": style.as_str()}),
        }
    }

    pub fn deserialize(wire: Option<&Value>) -> ReplaceFlags {
        let Some(obj) = wire.and_then(Value::as_object) else {
            return ReplaceFlags::Off;
        };
        let enabled = obj.get("enabled").and_then(Value::as_bool).unwrap_or(false);
        let style = obj.get("style").and_then(Value::as_str).unwrap_or("");
        if !enabled || style.is_empty() {
            return ReplaceFlags::Off;
        }
        style.parse().unwrap_or(ReplaceFlags::Off)
    }
}

/// The `color-category` object: a name→color map plus sparse overlay keys
/// for display labels, explicit ordering and legend exclusion.
pub mod color_category {
    use super::*;

    /// Values a chart model reads back from the wire object. Names absent
    /// from the overlay maps fall back to default legend behavior.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ColorCategorySpec {
        pub color_category: IndexMap<String, String>,
        pub category_labels: IndexMap<String, String>,
        pub category_order: Vec<String>,
        pub exclude_from_color_key: Vec<String>,
    }

    /// Build the wire object. The `map` key is always present; `labels`
    /// and `order` appear only when non-empty, while `exclude` is emitted
    /// whenever the chart type carries the field at all (even empty).
    pub fn serialize(
        map: &IndexMap<String, String>,
        labels: &IndexMap<String, String>,
        order: &[String],
        exclude: Option<&[String]>,
    ) -> Value {
        let mut obj = Map::new();
        obj.insert("map".into(), json!(map));
        if let Some(excluded) = exclude {
            obj.insert("excludeFromKey".into(), json!(excluded));
        }
        if !labels.is_empty() {
            obj.insert("categoryLabels".into(), json!(labels));
        }
        if !order.is_empty() {
            obj.insert("categoryOrder".into(), json!(order));
        }
        Value::Object(obj)
    }

    /// Extract the map and overlays, defaulting each to empty when absent
    /// or malformed.
    pub fn deserialize(wire: Option<&Value>) -> ColorCategorySpec {
        let mut spec = ColorCategorySpec::default();
        let Some(obj) = wire.and_then(Value::as_object) else {
            return spec;
        };
        if let Some(map) = obj.get("map").and_then(Value::as_object) {
            for (name, color) in map {
                if let Some(color) = color.as_str() {
                    spec.color_category.insert(name.clone(), color.to_string());
                }
            }
        }
        if let Some(labels) = obj.get("categoryLabels").and_then(Value::as_object) {
            for (name, label) in labels {
                if let Some(label) = label.as_str() {
                    spec.category_labels.insert(name.clone(), label.to_string());
                }
            }
        }
        if let Some(order) = obj.get("categoryOrder").and_then(Value::as_array) {
            spec.category_order = order
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        if let Some(excluded) = obj.get("excludeFromKey").and_then(Value::as_array) {
            spec.exclude_from_color_key = excluded
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        spec
    }
}

/// The three always-present `plotHeight*` wire fields bundled to and from
/// the model's mode/fixed/ratio triple.
pub mod plot_height {
    use super::*;

    pub fn serialize(mode: &PlotHeightMode, fixed: f64, ratio: f64) -> Vec<(String, Value)> {
        vec![
            ("plotHeightMode".into(), json!(mode.as_str())),
            ("plotHeightFixed".into(), json!(fixed)),
            ("plotHeightRatio".into(), json!(ratio)),
        ]
    }

    /// Overwrite only the fields actually present on the wire object, so a
    /// partial update leaves the others at their current values.
    pub fn deserialize(
        visualize: &Map<String, Value>,
        mode: &mut PlotHeightMode,
        fixed: &mut f64,
        ratio: &mut f64,
    ) -> Result<()> {
        if let Some(raw) = visualize.get("plotHeightMode").and_then(Value::as_str) {
            *mode = raw.parse()?;
        }
        if let Some(v) = visualize.get("plotHeightFixed").and_then(Value::as_f64) {
            *fixed = v;
        }
        if let Some(v) = visualize.get("plotHeightRatio").and_then(Value::as_f64) {
            *ratio = v;
        }
        Ok(())
    }
}

/// The column-chart family's value-label encoding: a nested `valueLabels`
/// object whose `enabled` key is the master switch, plus conditional
/// top-level companion fields.
pub mod value_labels {
    use super::*;

    pub fn serialize(
        show: &ValueLabelDisplay,
        format: &str,
        placement: &ValueLabelPlacement,
    ) -> Vec<(String, Value)> {
        let enabled = *show != ValueLabelDisplay::Off;
        let mut out = vec![(
            "valueLabels".to_string(),
            json!({
                "show": if enabled { show.as_str() } else { "" },
                "format": format,
                "enabled": enabled,
                "placement": placement.as_str(),
            }),
        )];
        if !format.is_empty() {
            out.push(("value-label-format".to_string(), json!(format)));
        }
        if *show == ValueLabelDisplay::Always {
            out.push(("value-labels-always".to_string(), json!(true)));
        }
        out
    }

    /// Read back `(show, format, placement)`. `valueLabels.enabled` wins
    /// over everything; when it is on, `show` decides hover vs always,
    /// falling back to the legacy `value-labels-always` flag.
    pub fn deserialize(
        visualize: &Map<String, Value>,
    ) -> Result<(ValueLabelDisplay, String, ValueLabelPlacement)> {
        let nested = visualize.get("valueLabels").and_then(Value::as_object);
        let enabled = nested
            .and_then(|o| o.get("enabled"))
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let show = if !enabled {
            ValueLabelDisplay::Off
        } else if let Some(show) = nested.and_then(|o| o.get("show")).and_then(Value::as_str) {
            match show {
                "always" => ValueLabelDisplay::Always,
                "hover" => ValueLabelDisplay::Hover,
                _ => ValueLabelDisplay::Off,
            }
        } else if visualize
            .get("value-labels-always")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            ValueLabelDisplay::Always
        } else {
            ValueLabelDisplay::Hover
        };
        let format = nested
            .and_then(|o| o.get("format"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let placement = match nested
            .and_then(|o| o.get("placement"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            Some(raw) => raw.parse()?,
            None => ValueLabelPlacement::Outside,
        };
        Ok((show, format, placement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_labels_enabled_is_master_switch() {
        let wire = json!({
            "valueLabels": {"show": "always", "format": "0.0a", "enabled": false, "placement": "inside"}
        });
        let (show, format, placement) =
            value_labels::deserialize(wire.as_object().unwrap()).unwrap();
        assert_eq!(show, ValueLabelDisplay::Off);
        assert_eq!(format, "0.0a");
        assert_eq!(placement, ValueLabelPlacement::Inside);
    }

    #[test]
    fn value_labels_always_adds_companion_fields() {
        let keys = value_labels::serialize(
            &ValueLabelDisplay::Always,
            "0.0a",
            &ValueLabelPlacement::Outside,
        );
        let names: Vec<&str> = keys.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["valueLabels", "value-label-format", "value-labels-always"]
        );
        let off = value_labels::serialize(&ValueLabelDisplay::Off, "", &ValueLabelPlacement::Outside);
        assert_eq!(off.len(), 1);
        assert_eq!(off[0].1["show"], json!(""));
        assert_eq!(off[0].1["enabled"], json!(false));
    }

    #[test]
    fn ticks_roundtrip_numeric() {
        let ticks = ticks::deserialize("0,10,20,30");
        assert_eq!(
            ticks,
            vec![
                AxisValue::Int(0),
                AxisValue::Int(10),
                AxisValue::Int(20),
                AxisValue::Int(30)
            ]
        );
        assert_eq!(ticks::serialize(&ticks), "0,10,20,30");
    }

    #[test]
    fn ticks_year_tokens_stay_strings() {
        assert_eq!(
            ticks::deserialize("2020,2021"),
            vec![AxisValue::Text("2020".into()), AxisValue::Text("2021".into())]
        );
    }

    #[test]
    fn ticks_mixed_floats_and_labels() {
        assert_eq!(
            ticks::deserialize(" 0.5, 1.5 ,low"),
            vec![
                AxisValue::Float(0.5),
                AxisValue::Float(1.5),
                AxisValue::Text("low".into())
            ]
        );
    }

    #[test]
    fn ticks_empty_string_is_empty_list() {
        assert_eq!(ticks::deserialize(""), Vec::<AxisValue>::new());
        assert_eq!(ticks::serialize(&[]), "");
    }

    #[test]
    fn range_deserialize_is_total() {
        assert_eq!(
            range::deserialize(None),
            [AxisValue::unset(), AxisValue::unset()]
        );
        assert_eq!(
            range::deserialize(Some(&json!([5]))),
            [AxisValue::Int(5), AxisValue::unset()]
        );
        assert_eq!(
            range::deserialize(Some(&json!([1, 2, 3]))),
            [AxisValue::Int(1), AxisValue::Int(2)]
        );
        assert_eq!(
            range::deserialize(Some(&json!(["0", "100"]))),
            [AxisValue::Int(0), AxisValue::Int(100)]
        );
        assert_eq!(
            range::deserialize(Some(&json!(["", "max"]))),
            [AxisValue::unset(), AxisValue::Text("max".into())]
        );
    }

    #[test]
    fn range_serialize_keeps_sentinels() {
        let wire = range::serialize(&[AxisValue::Int(0), AxisValue::unset()]);
        assert_eq!(wire, json!([0, ""]));
    }

    #[test]
    fn enable_value_inverse() {
        let on = enable_value::serialize(Some("#FF0000"));
        assert_eq!(on, json!({"value": "#FF0000", "enabled": true}));
        assert_eq!(
            enable_value::deserialize(Some(&on)),
            Some("#FF0000".to_string())
        );

        let off = enable_value::serialize(None);
        assert_eq!(enable_value::deserialize(Some(&off)), None);
        assert_eq!(enable_value::deserialize(None), None);
    }

    #[test]
    fn enable_value_disabled_payload_is_dropped() {
        let wire = json!({"enabled": false, "value": "#E31A1C"});
        assert_eq!(enable_value::deserialize(Some(&wire)), None);
    }

    #[test]
    fn replace_flags_roundtrip() {
        let wire = replace_flags::serialize(&ReplaceFlags::FourByThree);
        assert_eq!(wire, json!({"enabled": true, "style": "4x3"}));
        assert_eq!(replace_flags::deserialize(Some(&wire)), ReplaceFlags::FourByThree);

        let off = replace_flags::serialize(&ReplaceFlags::Off);
        assert_eq!(off, json!({"enabled": false, "style": ""}));
        assert_eq!(replace_flags::deserialize(Some(&off)), ReplaceFlags::Off);
        assert_eq!(replace_flags::deserialize(None), ReplaceFlags::Off);
    }

    #[test]
    fn color_category_minimal_has_only_map() {
        let mut map = IndexMap::new();
        map.insert("A".to_string(), "#fff".to_string());
        let wire = color_category::serialize(&map, &IndexMap::new(), &[], None);
        assert_eq!(wire, json!({"map": {"A": "#fff"}}));
    }

    #[test]
    fn color_category_order_adds_one_key() {
        let mut map = IndexMap::new();
        map.insert("A".to_string(), "#fff".to_string());
        let order = vec!["A".to_string(), "B".to_string()];
        let wire = color_category::serialize(&map, &IndexMap::new(), &order, None);
        let obj = wire.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["categoryOrder"], json!(["A", "B"]));
    }

    #[test]
    fn color_category_exclude_emitted_even_when_empty() {
        let wire = color_category::serialize(&IndexMap::new(), &IndexMap::new(), &[], Some(&[]));
        assert_eq!(wire, json!({"map": {}, "excludeFromKey": []}));
    }

    #[test]
    fn color_category_deserialize_defaults_to_empty() {
        let spec = color_category::deserialize(None);
        assert!(spec.color_category.is_empty());
        assert!(spec.category_labels.is_empty());
        assert!(spec.category_order.is_empty());
        assert!(spec.exclude_from_color_key.is_empty());

        let spec = color_category::deserialize(Some(&json!("garbage")));
        assert!(spec.color_category.is_empty());
    }

    #[test]
    fn plot_height_partial_update() {
        let mut mode = PlotHeightMode::Fixed;
        let mut fixed = 300.0;
        let mut ratio = 0.5;
        let wire = json!({"plotHeightMode": "ratio", "plotHeightRatio": 0.75});
        plot_height::deserialize(
            wire.as_object().unwrap(),
            &mut mode,
            &mut fixed,
            &mut ratio,
        )
        .unwrap();
        assert_eq!(mode, PlotHeightMode::Ratio);
        assert_eq!(fixed, 300.0);
        assert_eq!(ratio, 0.75);
    }
}
