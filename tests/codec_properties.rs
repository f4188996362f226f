//! Contract tests for the primitive codecs.

use datawrapper_rs::AxisValue;
use datawrapper_rs::codecs::{enable_value, range, ticks};
use serde_json::json;

#[test]
fn tick_list_inverse_for_numbers_and_labels() {
    let values = vec![
        AxisValue::Int(0),
        AxisValue::Float(2.5),
        AxisValue::Text("low".into()),
    ];
    assert_eq!(ticks::deserialize(&ticks::serialize(&values)), values);
}

#[test]
fn empty_tick_list_is_empty_string_and_back() {
    assert_eq!(ticks::serialize(&[]), "");
    assert_eq!(ticks::deserialize(""), Vec::<AxisValue>::new());
}

#[test]
fn tick_parsing_promotes_whole_floats() {
    assert_eq!(
        ticks::deserialize("0,10,20,30"),
        vec![
            AxisValue::Int(0),
            AxisValue::Int(10),
            AxisValue::Int(20),
            AxisValue::Int(30)
        ]
    );
}

#[test]
fn year_like_ticks_stay_strings() {
    // Four-digit tokens are not coerced, so date-axis ticks survive.
    assert_eq!(
        ticks::deserialize("2020,2021"),
        vec![
            AxisValue::Text("2020".into()),
            AxisValue::Text("2021".into())
        ]
    );
}

#[test]
fn range_deserialize_is_total() {
    let unset = [AxisValue::unset(), AxisValue::unset()];
    assert_eq!(range::deserialize(None), unset);
    assert_eq!(range::deserialize(Some(&json!(null))), unset);
    assert_eq!(
        range::deserialize(Some(&json!([7]))),
        [AxisValue::Int(7), AxisValue::unset()]
    );
    assert_eq!(
        range::deserialize(Some(&json!([1, 2, 3]))),
        [AxisValue::Int(1), AxisValue::Int(2)]
    );
}

#[test]
fn range_parses_numeric_strings_and_keeps_text() {
    assert_eq!(
        range::deserialize(Some(&json!(["0", "100"]))),
        [AxisValue::Int(0), AxisValue::Int(100)]
    );
    assert_eq!(
        range::deserialize(Some(&json!(["start", ""]))),
        [AxisValue::Text("start".into()), AxisValue::unset()]
    );
}

#[test]
fn enable_value_inverse() {
    for payload in [Some("#FF0000"), None] {
        let wire = enable_value::serialize(payload);
        assert_eq!(
            enable_value::deserialize(Some(&wire)),
            payload.map(str::to_string)
        );
    }
}
