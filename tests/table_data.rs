//! Tabular data encoding: CSV with a header on the way out, delimiter
//! sniffing on the way back.

use std::fs;

use datawrapper_rs::Table;
use serde_json::{Map, Value, json};

fn records(values: &[Value]) -> Vec<Map<String, Value>> {
    values
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect()
}

#[test]
fn csv_writes_header_then_rows() {
    let table = Table::from_records(&records(&[
        json!({"date": "2020/01", "Temperature": 15.0}),
        json!({"date": "2020/02", "Temperature": 18.0}),
    ]));
    let csv = table.to_csv().unwrap();
    assert!(csv.starts_with("date,Temperature\n"));
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn tab_delimited_responses_are_detected() {
    let table = Table::from_csv("Country\tturnout\nMalta\t85.6\n").unwrap();
    assert_eq!(
        table.columns(),
        &["Country".to_string(), "turnout".to_string()]
    );
    assert_eq!(table.rows()[0], vec![json!("Malta"), json!(85.6)]);
}

#[test]
fn quoted_commas_survive_a_roundtrip() {
    let table = Table::from_records(&records(&[
        json!({"city": "Washington, D.C.", "pop": 670_000}),
    ]));
    let csv = table.to_csv().unwrap();
    let back = Table::from_csv(&csv).unwrap();
    assert_eq!(back.rows()[0][0], json!("Washington, D.C."));
    assert_eq!(back.rows()[0][1], json!(670_000));
}

#[test]
fn csv_file_roundtrip() {
    let table = Table::from_records(&records(&[
        json!({"x": 1, "y": 10}),
        json!({"x": 2, "y": 20}),
    ]));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, table.to_csv().unwrap()).unwrap();
    let back = Table::from_csv(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, table);
}

#[test]
fn empty_table_writes_empty_body() {
    assert_eq!(Table::new().to_csv().unwrap(), "");
    assert!(Table::from_csv("").unwrap().is_empty());
    assert!(Table::from_csv("  \n").unwrap().is_empty());
}
