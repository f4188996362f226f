//! The annotation layer's shape and validation invariants.

use datawrapper_rs::charts::{ChartModel, LineChart};
use datawrapper_rs::{ConnectorLine, RangeAnnotation, TextAnnotation};
use serde_json::json;

#[test]
fn serialized_collections_are_lists_never_mappings() {
    // Built directly...
    let mut chart = LineChart::new();
    chart.text_annotations.push(TextAnnotation::new(0, 0, "a"));
    let document = chart.serialize_model().unwrap();
    assert!(document["metadata"]["visualize"]["text-annotations"].is_array());

    // ...or reconstructed from a wire mapping: writes still emit a list.
    let wire = json!({
        "type": "d3-lines",
        "title": "t",
        "metadata": {"visualize": {"text-annotations": {
            "u1": {"text": "a", "position": {"x": 0, "y": 0}},
        }}}
    });
    let chart = LineChart::deserialize_model(&wire).unwrap();
    let document = chart.serialize_model().unwrap();
    let annos = &document["metadata"]["visualize"]["text-annotations"];
    assert!(annos.is_array());
    // Wire ids are not durable; each write stamps a fresh one.
    assert_ne!(annos[0]["id"], json!("u1"));
}

#[test]
fn connector_line_disable_is_rejected_everywhere() {
    // Direct loose construction.
    assert!(ConnectorLine::from_value(json!({"enabled": false})).is_err());

    // Nested in an annotation mapping.
    let err = TextAnnotation::from_value(json!({
        "x": 0,
        "y": 0,
        "text": "note",
        "connectorLine": {"enabled": false},
    }))
    .unwrap_err();
    assert!(err.to_string().contains("omit"), "{err}");

    // Nested in a full chart config.
    assert!(
        LineChart::from_value(json!({
            "text-annotations": [
                {"x": 0, "y": 0, "text": "note", "connector_line": {"enabled": false}},
            ]
        }))
        .is_err()
    );
}

#[test]
fn absent_connector_line_is_the_only_disabled_form() {
    let annotation = TextAnnotation::new(0, 0, "note");
    let wire = annotation.to_wire().unwrap();
    assert_eq!(wire["connectorLine"], json!({"enabled": false}));

    let present = TextAnnotation {
        connector_line: Some(ConnectorLine::default()),
        ..TextAnnotation::new(0, 0, "note")
    };
    let wire = present.to_wire().unwrap();
    assert_eq!(wire["connectorLine"]["enabled"], json!(true));
}

#[test]
fn range_annotation_bounds_depend_on_axis_and_display() {
    // x-line with only x0 succeeds.
    assert!(
        RangeAnnotation::from_value(json!({"type": "x", "display": "line", "x0": 5})).is_ok()
    );
    // x-range with only x0 fails.
    let err =
        RangeAnnotation::from_value(json!({"type": "x", "display": "range", "x0": 5}))
            .unwrap_err();
    assert!(err.to_string().contains("x0 and x1"), "{err}");
    // y-range needs both y bounds.
    assert!(
        RangeAnnotation::from_value(json!({"type": "y", "display": "range", "y0": 1, "y1": 2}))
            .is_ok()
    );
}

#[test]
fn mapping_order_becomes_list_order() {
    let wire = json!({
        "b-key": {"type": "y", "display": "line", "position": {"y0": 1}},
        "a-key": {"type": "y", "display": "line", "position": {"y0": 2}},
    });
    let annos = RangeAnnotation::deserialize_collection(Some(&wire)).unwrap();
    // Document order, not alphabetical.
    assert_eq!(annos[0].id.as_deref(), Some("b-key"));
    assert_eq!(annos[1].id.as_deref(), Some("a-key"));
}

#[test]
fn categorical_positions_are_preserved() {
    let annotation = TextAnnotation::new("2020/01", 21.5, "peak");
    let wire = annotation.to_wire().unwrap();
    assert_eq!(wire["position"], json!({"x": "2020/01", "y": 21.5}));
}
